use anyhow::Result;

fn main() -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(chat_reader::utils::log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    chat_reader::cli::run()
}
