use clap::Parser;
use coinlens::adapter::inbound::cli::command::Cli;
use coinlens::adapter::inbound::cli::output::{self, OutputConfig};
use coinlens::adapter::inbound::cli::run;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let config = match run::load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            output::error(&format!("Failed to load config: {e}"));
            std::process::exit(2);
        }
    };

    config.logging.clone().with_verbosity(cli.verbose).init();
    info!("coinlens starting");

    if let Err(e) = run::execute(&cli, &config).await {
        error!(error = %e, "Command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
