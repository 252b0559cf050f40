//! Dispatch of a parsed command line.

use tracing::debug;

use crate::adapter::inbound::cli::command::{Cli, Commands};
use crate::adapter::inbound::cli::{insight, market, news, output, watchlist};
use crate::error::Result;
use crate::infrastructure::bootstrap::{self, Services};
use crate::infrastructure::config::settings::Config;

/// Load configuration for `cli`, falling back to defaults when the default
/// path does not exist.
#[allow(clippy::result_large_err)]
pub fn load_config(cli: &Cli) -> Result<Config> {
    if !cli.config.exists() && cli.config == super::paths::default_config() {
        return Ok(Config::default());
    }
    Config::load(&cli.config)
}

/// Build the services and run the selected command.
pub async fn execute(cli: &Cli, config: &Config) -> Result<()> {
    let services = bootstrap::build_services(config)?;
    let sweeper = config
        .cache
        .sweep_interval()
        .map(|interval| {
            bootstrap::spawn_sweeper(services.market.clone(), services.news.clone(), interval)
        });

    let result = dispatch(cli, config, &services).await;

    if let Some(handle) = sweeper {
        handle.abort();
    }
    result
}

async fn dispatch(cli: &Cli, config: &Config, services: &Services) -> Result<()> {
    debug!(command = ?cli.command, json = output::is_json(), "Dispatching command");
    match &cli.command {
        Commands::Markets(args) => market::markets(args, config, services).await,
        Commands::Chart(args) => market::chart(args, services).await,
        Commands::Compare(args) => market::compare(args, services).await,
        Commands::History(args) => market::history(args, services).await,
        Commands::Rate(args) => market::rate(args, config, services).await,
        Commands::Convert(args) => market::convert(args, services).await,
        Commands::Performers(args) => market::performers(args, config, services).await,
        Commands::News(args) => news::execute(args, services).await,
        Commands::Insight(args) => insight::execute(args, config, services).await,
        Commands::Watchlist(command) => watchlist::execute(command, services),
    }
}
