use bestagent::app::Application;
use bestagent::cli::Args;
use bestagent::commands::create_command_registry;
use bestagent::config::Config;
use bestagent::display;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("BESTAGENT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let args = Args::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            display::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let mut app = Application::new(args, config, create_command_registry());
    if let Err(e) = app.run().await {
        display::display_error(&e.to_string());
        std::process::exit(1);
    }
}
