fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("QUIZMARK_LOG", "warn"))
        .init();

    if let Err(e) = quizmark::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
