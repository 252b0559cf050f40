//! Handler for the `insight` command.

use serde_json::json;
use tracing::warn;

use crate::adapter::inbound::cli::command::InsightArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::HistoryInterval;
use crate::error::{QueryError, Result};
use crate::infrastructure::bootstrap::Services;
use crate::infrastructure::config::settings::Config;

/// Ask the LLM for an analysis of an asset from the listing.
pub async fn execute(args: &InsightArgs, config: &Config, services: &Services) -> Result<()> {
    let asset = services
        .market
        .find_asset(&args.id, config.market.listing_size)
        .await?
        .ok_or_else(|| QueryError::UnknownAsset(args.id.clone()))?;

    // History only enriches the prompt.
    let history = match services
        .market
        .asset_history(&asset.id, HistoryInterval::D1)
        .await
    {
        Ok(history) => history,
        Err(e) => {
            warn!(asset = %asset.id, error = %e, "Insight proceeds without history");
            Vec::new()
        }
    };

    if !services.insight.is_enabled() && !output::is_json() {
        output::hint("set GEMINI_API_KEY or ANTHROPIC_API_KEY to enable insights");
    }

    let pb = output::spinner(&format!("Analyzing {}", asset.name));
    let insight = services
        .insight
        .insights(&asset.name, asset.current_price, &history)
        .await;
    pb.finish_and_clear();

    if output::is_json() {
        output::json_output(json!({
            "command": "insight",
            "id": asset.id,
            "price": asset.current_price,
            "insight": insight,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section(&format!("{} ({})", asset.name, asset.symbol.to_ascii_uppercase()));
    output::field("Price", output::price(asset.current_price));
    output::field("Sentiment", &insight.sentiment);
    output::field("Support", output::negative(output::price(insight.support_level)));
    output::field(
        "Resistance",
        output::positive(output::price(insight.resistance_level)),
    );
    output::field("Advice", &insight.buying_advice);
    output::section("Key factors");
    for factor in &insight.key_factors {
        output::lines(&format!("- {factor}"));
    }
    Ok(())
}
