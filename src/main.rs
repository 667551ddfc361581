use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_stubgen=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command_line_interface = api_stubgen::cli::CommandLineInterface::load();
    if let Err(e) = command_line_interface.run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
