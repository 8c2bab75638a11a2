//! CLI argument parsing module
//!
//! The binary drives the popup controller against a file-backed browser: the
//! cookie jar comes from a JSON file, downloads land in a directory and the
//! clipboard is printed to stdout.

use crate::browser::fixture::FixtureBrowser;
use crate::browser::Platform;
use crate::config::{ExportFormat, SelectorConfig};
use crate::error::{Result, SelectorError};
use crate::exit_code::exit_code_for_error;
use crate::export::{DeliveryMethod, ExportDestination};
use crate::i18n;
use crate::logging;
use crate::popup::PopupController;
use crate::render::view::preview_value;
use crate::surface::{ListContent, RecordingSurface};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::warn;
use std::path::PathBuf;
use std::sync::Arc;

/// Main entry point for the CLI application
pub fn run() {
    let matches = create_app().get_matches();
    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    logging::init(level);

    if let Err(e) = run_with_args(&matches) {
        eprintln!("cookie-selector: error: {}", i18n::localize_error(&e));
        std::process::exit(exit_code_for_error(&e));
    }
}

/// What the command line asked for
#[derive(Debug, Clone)]
struct Invocation {
    url: String,
    cookies: Option<PathBuf>,
    filter: Option<String>,
    select: Vec<String>,
    select_all: bool,
    format: ExportFormat,
    destination: ExportDestination,
    list: bool,
}

impl Invocation {
    fn wants_export(&self) -> bool {
        self.select_all || !self.select.is_empty()
    }
}

fn run_with_args(matches: &ArgMatches) -> Result<()> {
    let (config, invocation) = build_config_from_args(matches)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let download_dir = config
            .export
            .download_dir
            .clone()
            .unwrap_or_else(FixtureBrowser::default_download_dir);
        let tab_url = Some(invocation.url.clone());
        let browser = Arc::new(match &invocation.cookies {
            Some(path) => FixtureBrowser::from_file(tab_url, path, download_dir)?,
            None => FixtureBrowser::new(tab_url, Vec::new(), download_dir),
        });

        let surface = RecordingSurface::new(config.view.viewport_height);
        let mut popup =
            PopupController::new(config, Platform::from_browser(browser.clone()), surface);
        popup.initialize().await?;

        if let Some(term) = &invocation.filter {
            popup.apply_filter(term);
        }
        popup.flush_frames();

        for name in &invocation.select {
            select_by_name(&mut popup, name);
        }
        if invocation.select_all {
            popup.select_all();
        }

        if invocation.list || !invocation.wants_export() {
            print_list(&popup);
        }

        if invocation.wants_export() {
            let outcome = popup
                .export(invocation.format, invocation.destination)
                .await?;
            match outcome.method {
                DeliveryMethod::Clipboard => {
                    println!("{}", browser.clipboard().unwrap_or_default());
                }
                DeliveryMethod::Native | DeliveryMethod::Anchor => {
                    for path in browser.downloads() {
                        println!("{}", path.display());
                    }
                }
            }
            eprintln!("{}", outcome.message());
        }
        Ok::<(), SelectorError>(())
    })
}

/// Select every visible record named `name`.
fn select_by_name(popup: &mut PopupController<RecordingSurface>, name: &str) {
    let domains: Vec<String> = popup
        .list()
        .filtered_records()
        .filter(|record| record.name == name)
        .map(|record| record.domain.clone())
        .collect();
    if domains.is_empty() {
        warn!("No visible cookie named {:?}", name);
    }
    for domain in domains {
        popup.set_selected(name, &domain, true);
    }
}

fn print_list(popup: &PopupController<RecordingSurface>) {
    if let ListContent::Empty(message) = &popup.surface().content {
        println!("{}", message);
        return;
    }
    for record in popup.list().filtered_records() {
        println!(
            "[{}] {}\t{}\t{}",
            if record.selected { "x" } else { " " },
            record.name,
            record.domain,
            preview_value(&record.value, 15)
        );
    }
    println!("{}", popup.list().selection_summary().label());
}

/// Create the CLI application structure
fn create_app() -> Command {
    Command::new("cookie-selector")
        .version(crate::VERSION)
        .about("Inspect, select and export the cookies of a page")
        .arg(Arg::new("url")
            .short('u')
            .long("url")
            .value_name("URL")
            .help("URL of the active tab")
            .required(true))
        .arg(Arg::new("cookies")
            .short('c')
            .long("cookies")
            .value_name("FILE")
            .help("JSON cookie jar to read cookies from")
            .value_parser(clap::value_parser!(PathBuf)))
        .arg(Arg::new("filter")
            .short('f')
            .long("filter")
            .value_name("TERM")
            .help("Only show cookies whose name or value contains TERM"))
        .arg(Arg::new("select")
            .short('s')
            .long("select")
            .value_name("NAME")
            .help("Select cookies by name")
            .action(ArgAction::Append))
        .arg(Arg::new("select-all")
            .short('a')
            .long("select-all")
            .help("Select every visible cookie")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("format")
            .short('F')
            .long("format")
            .value_name("FORMAT")
            .help("Export format")
            .value_parser(["json", "json-all", "netscape", "csv"]))
        .arg(Arg::new("output-dir")
            .short('o')
            .long("output-dir")
            .value_name("DIR")
            .help("Directory exported files are saved to")
            .value_parser(clap::value_parser!(PathBuf)))
        .arg(Arg::new("prompt")
            .long("prompt")
            .help("Export as if the user was asked where to save")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("copy")
            .long("copy")
            .help("Copy the export to the clipboard instead of saving it")
            .action(ArgAction::SetTrue)
            .conflicts_with("prompt"))
        .arg(Arg::new("list")
            .short('l')
            .long("list")
            .help("Print the cookie list")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("Verbose output")
            .action(ArgAction::SetTrue))
}

/// Build configuration from command line arguments
fn build_config_from_args(matches: &ArgMatches) -> Result<(SelectorConfig, Invocation)> {
    let mut config = SelectorConfig::default();

    if let Some(dir) = matches.get_one::<PathBuf>("output-dir") {
        config.export.download_dir = Some(dir.clone());
    }

    let format = match matches.get_one::<String>("format") {
        Some(raw) => raw
            .parse::<ExportFormat>()
            .map_err(|_| SelectorError::Unknown(format!("Unknown export format: {}", raw)))?,
        None => config.export.default_format,
    };

    let destination = if matches.get_flag("copy") {
        ExportDestination::Clipboard
    } else if matches.get_flag("prompt") {
        ExportDestination::DownloadPrompt
    } else {
        ExportDestination::DownloadDirect
    };

    let invocation = Invocation {
        url: matches
            .get_one::<String>("url")
            .cloned()
            .ok_or(SelectorError::NoUrl)?,
        cookies: matches.get_one::<PathBuf>("cookies").cloned(),
        filter: matches.get_one::<String>("filter").cloned(),
        select: matches
            .get_many::<String>("select")
            .map(|names| names.cloned().collect())
            .unwrap_or_default(),
        select_all: matches.get_flag("select-all"),
        format,
        destination,
        list: matches.get_flag("list"),
    };

    Ok((config, invocation))
}
