fn main() {
    if let Err(err) = chainlink_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
