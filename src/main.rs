fn main() {
    cookie_selector::cli::run();
}
