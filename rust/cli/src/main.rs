fn main() {
    if let Err(e) = blackjack_cli::logging::init_logging() {
        eprintln!("WARNING: logging unavailable: {}", e);
    }
    let code = blackjack_cli::run(
        std::env::args(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    std::process::exit(code);
}
