//! Serializers for the export formats

use crate::config::ExportFormat;
use crate::error::{Result, SelectorError};
use crate::record::CookieRecord;
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// Render `records` in `format`.
pub fn render(format: ExportFormat, records: &[&CookieRecord]) -> Result<String> {
    match format {
        ExportFormat::KeyValueJson => key_value_json(records),
        ExportFormat::FullJson => full_json(records),
        ExportFormat::Netscape => Ok(netscape(records)),
        ExportFormat::Csv => csv(records),
    }
}

/// `{ name: value }`; a repeated name keeps its first position with the
/// last value.
pub fn key_value_json(records: &[&CookieRecord]) -> Result<String> {
    let mut object = Map::new();
    for record in records {
        object.insert(record.name.clone(), Value::String(record.value.clone()));
    }
    Ok(serde_json::to_string_pretty(&Value::Object(object))?)
}

pub fn full_json(records: &[&CookieRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn netscape(records: &[&CookieRecord]) -> String {
    let mut content = String::from(
        "# Netscape HTTP Cookie File\n\
         # Generated by Cookie Selector\n\
         # This is a generated file! Do not edit.\n\n",
    );

    for record in records {
        // Format: domain \t include_subdomains \t path \t secure \t expiry \t name \t value
        let include_subdomains = bool_flag(record.domain.starts_with('.'));
        let domain = if record.domain.starts_with('.') {
            record.domain.clone()
        } else {
            format!(".{}", record.domain)
        };
        let path = if record.path.is_empty() {
            "/"
        } else {
            record.path.as_str()
        };

        content.push_str(&format!(
            "{}\t{}\t{}\t{}\t0\t{}\t{}\n",
            domain,
            include_subdomains,
            path,
            bool_flag(record.secure),
            record.name,
            record.value
        ));
    }
    content
}

fn bool_flag(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

pub const CSV_HEADER: &str = "Name,Value,Domain,Path,Secure,HttpOnly";

/// Header line as is, then one row per record with every field quoted.
pub fn csv(records: &[&CookieRecord]) -> Result<String> {
    let mut out = format!("{}\n", CSV_HEADER).into_bytes();
    {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut out);
        for record in records {
            writer
                .write_record([
                    record.name.as_str(),
                    record.value.as_str(),
                    record.domain.as_str(),
                    record.path.as_str(),
                    bool_text(record.secure),
                    bool_text(record.http_only),
                ])
                .map_err(csv_error)?;
        }
        writer.flush()?;
    }

    let mut text = String::from_utf8(out)
        .map_err(|e| SelectorError::ExportFailed(format!("CSV output is not UTF-8: {}", e)))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn csv_error(err: csv::Error) -> SelectorError {
    SelectorError::ExportFailed(format!("CSV encoding failed: {}", err))
}

/// `cookies_<domain>_<YYYY-MM-DD>.<ext>`, with `cookies_all_` for the full
/// JSON export.
pub fn export_filename(format: ExportFormat, domain: &str, date: NaiveDate) -> String {
    let prefix = match format {
        ExportFormat::FullJson => "cookies_all",
        _ => "cookies",
    };
    format!(
        "{}_{}_{}.{}",
        prefix,
        domain,
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Every name on its own line.
pub fn names_text<'a>(records: impl IntoIterator<Item = &'a CookieRecord>) -> String {
    records
        .into_iter()
        .map(|record| record.name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `name: value` lines.
pub fn values_text(records: &[&CookieRecord]) -> String {
    records
        .iter()
        .map(|record| format!("{}: {}", record.name, record.value))
        .collect::<Vec<_>>()
        .join("\n")
}
