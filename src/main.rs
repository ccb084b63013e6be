use tracing_subscriber::EnvFilter;

mod cli_runtime;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ncps=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli_runtime::run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(1);
        }
    }
}
