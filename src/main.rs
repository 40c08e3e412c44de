fn main() {
    if let Err(e) = skuprobe::cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
