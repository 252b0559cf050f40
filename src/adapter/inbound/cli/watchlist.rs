//! Handlers for `coinlens watchlist`.

use serde_json::json;

use crate::adapter::inbound::cli::command::WatchlistCommand;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;

/// Execute a watchlist subcommand.
pub fn execute(command: &WatchlistCommand, services: &Services) -> Result<()> {
    match command {
        WatchlistCommand::List => list(services),
        WatchlistCommand::Toggle { id } => toggle(id, services),
    }
}

fn list(services: &Services) -> Result<()> {
    let watchlist = services.watchlist.list();

    if output::is_json() {
        output::json_output(json!({
            "command": "watchlist.list",
            "ids": watchlist,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section("Watchlist");
    if watchlist.is_empty() {
        output::note("Watchlist is empty");
        return Ok(());
    }
    for id in watchlist.ids() {
        output::lines(id);
    }
    Ok(())
}

fn toggle(id: &str, services: &Services) -> Result<()> {
    let watched = services.watchlist.toggle(id)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "watchlist.toggle",
            "id": id,
            "watched": watched,
        }));
        return Ok(());
    }

    if watched {
        output::success(&format!("Added {id} to the watchlist"));
    } else {
        output::success(&format!("Removed {id} from the watchlist"));
    }
    Ok(())
}
