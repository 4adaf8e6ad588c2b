fn main() {
    if let Err(e) = parley::cli::main() {
        eprintln!("❌ Error: {e}");
        std::process::exit(1);
    }
}
