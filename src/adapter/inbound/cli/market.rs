//! Handlers for the market data commands.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::{
    ChartArgs, CompareArgs, ConvertArgs, HistoryArgs, MarketsArgs, PerformersArgs, RateArgs,
};
use crate::adapter::inbound::cli::output;
use crate::domain::{self, Asset};
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "#")]
    rank: String,
    #[tabled(rename = "Asset")]
    name: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "24h")]
    change: String,
    #[tabled(rename = "Market Cap")]
    market_cap: String,
    #[tabled(rename = "★")]
    watched: &'static str,
}

impl AssetRow {
    fn new(asset: &Asset, watched: bool) -> Self {
        Self {
            rank: asset
                .market_cap_rank
                .map_or_else(|| "-".to_string(), |rank| rank.to_string()),
            name: asset.name.clone(),
            symbol: asset.symbol.to_ascii_uppercase(),
            price: output::price(asset.current_price),
            change: output::change(asset.price_change_24h),
            market_cap: format!("{:.0}", asset.market_cap),
            watched: if watched { "★" } else { "" },
        }
    }
}

#[derive(Tabled)]
struct PointRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Price")]
    price: String,
}

#[derive(Tabled)]
struct ComparedRow {
    #[tabled(rename = "Asset")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "24h")]
    change_24h: String,
    #[tabled(rename = "Span")]
    change_span: String,
    #[tabled(rename = "Market Cap")]
    market_cap: String,
    #[tabled(rename = "Volume")]
    volume: String,
}

fn asset_table(services: &Services, assets: &[Asset]) -> String {
    let rows: Vec<AssetRow> = assets
        .iter()
        .map(|asset| AssetRow::new(asset, services.watchlist.contains(&asset.id)))
        .collect();
    Table::new(rows).to_string()
}

/// List the top assets by market capitalization.
pub async fn markets(args: &MarketsArgs, config: &Config, services: &Services) -> Result<()> {
    let limit = args.limit.unwrap_or(config.market.listing_size);

    let pb = output::spinner("Fetching market listing");
    let assets = match services.market.market_listing(limit).await {
        Ok(assets) => {
            pb.finish_and_clear();
            assets
        }
        Err(e) => {
            output::spinner_fail(&pb, "Failed to fetch market listing");
            return Err(e);
        }
    };
    let assets = if args.watchlist {
        services.watchlist.filter(assets)
    } else {
        assets
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "markets",
            "vs_currency": services.market.vs_currency(),
            "assets": assets,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section(&format!(
        "Top {} by market cap ({})",
        assets.len(),
        services.market.vs_currency().to_ascii_uppercase()
    ));
    if assets.is_empty() {
        output::note("No assets to show");
        if args.watchlist {
            output::hint(&format!(
                "add one with {}",
                output::highlight("coinlens watchlist toggle <id>")
            ));
        }
        return Ok(());
    }
    output::lines(&asset_table(services, &assets));
    Ok(())
}

/// Show the best and worst performers of the default listing.
pub async fn performers(
    args: &PerformersArgs,
    config: &Config,
    services: &Services,
) -> Result<()> {
    let assets = services
        .market
        .market_listing(config.market.listing_size)
        .await?;
    let ranked = domain::performers(&assets, args.count);

    if output::is_json() {
        output::json_output(json!({
            "command": "performers",
            "top": ranked.top,
            "lowest": ranked.lowest,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section("Top performers (24h)");
    output::lines(&asset_table(services, &ranked.top));
    output::section("Lowest performers (24h)");
    output::lines(&asset_table(services, &ranked.lowest));
    Ok(())
}

/// Show the price series of an asset.
pub async fn chart(args: &ChartArgs, services: &Services) -> Result<()> {
    let pb = output::spinner(&format!("Fetching {} chart", args.id));
    let series = match services.market.chart_series(&args.id, args.days).await {
        Ok(series) => {
            pb.finish_and_clear();
            series
        }
        Err(e) => {
            output::spinner_fail(&pb, &format!("Failed to fetch {} chart", args.id));
            return Err(e);
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "chart",
            "id": args.id,
            "days": args.days.to_string(),
            "series": series,
        }));
        return Ok(());
    }

    let Some(latest) = series.latest_price() else {
        output::warning(&format!("No price data for {}", args.id));
        return Ok(());
    };

    output::section(&format!("{} ({} days)", args.id, args.days));
    output::field("Price", output::price(latest.value));
    output::field("Change", output::change(series.change_percent()));
    output::field("Points", series.prices.len());
    if let (Some(low), Some(high)) = (
        series.prices.iter().map(|p| p.value).reduce(f64::min),
        series.prices.iter().map(|p| p.value).reduce(f64::max),
    ) {
        output::field("Low", output::price(low));
        output::field("High", output::price(high));
    }
    output::field("As of", latest.timestamp.format("%Y-%m-%d %H:%M UTC"));
    Ok(())
}

/// Compare up to three assets over one chart span.
pub async fn compare(args: &CompareArgs, services: &Services) -> Result<()> {
    let pb = output::spinner(&format!("Comparing {}", args.ids.join(", ")));
    let comparison = match services.market.compare(&args.ids, args.days).await {
        Ok(comparison) => {
            pb.finish_and_clear();
            comparison
        }
        Err(e) => {
            output::spinner_fail(&pb, "Failed to build comparison");
            return Err(e);
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "compare",
            "days": comparison.span,
            "leader": comparison.leader().map(|entry| &entry.asset.id),
            "assets": comparison.assets,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section(&format!("Comparison ({} days)", comparison.span));
    let rows: Vec<ComparedRow> = comparison
        .assets
        .iter()
        .map(|entry| ComparedRow {
            name: format!("{} ({})", entry.asset.name, entry.asset.symbol.to_ascii_uppercase()),
            price: output::price(entry.asset.current_price),
            change_24h: output::change(entry.asset.price_change_24h),
            change_span: output::change(entry.chart.change_percent()),
            market_cap: format!("{:.0}", entry.asset.market_cap),
            volume: format!("{:.0}", entry.asset.total_volume),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    if let Some(leader) = comparison.leader() {
        output::field("Leader", output::highlight(&leader.asset.name));
    }
    Ok(())
}

/// Show the most recent history points of an asset.
pub async fn history(args: &HistoryArgs, services: &Services) -> Result<()> {
    let points = services
        .market
        .asset_history(&args.id, args.interval)
        .await?;
    let recent = &points[points.len().saturating_sub(args.points)..];

    if output::is_json() {
        output::json_output(json!({
            "command": "history",
            "id": args.id,
            "interval": args.interval.as_str(),
            "points": recent,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section(&format!("{} history ({})", args.id, args.interval));
    if recent.is_empty() {
        output::note("No history available");
        return Ok(());
    }
    let rows: Vec<PointRow> = recent
        .iter()
        .map(|point| PointRow {
            time: point.time.format("%Y-%m-%d %H:%M").to_string(),
            price: output::price(point.price_usd),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}

/// Show a fiat exchange rate.
pub async fn rate(args: &RateArgs, config: &Config, services: &Services) -> Result<()> {
    let base = args.base.as_deref().unwrap_or(&config.market.fx_base);
    let quote = args.quote.as_deref().unwrap_or(&config.market.fx_quote);
    let rate = services.market.exchange_rate(base, quote).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "rate",
            "rate": rate,
        }));
        return Ok(());
    }

    output::field(
        &format!("{}/{}", rate.base, rate.quote),
        output::highlight(format!("{:.4}", rate.rate)),
    );
    Ok(())
}

/// Convert an amount between two assets.
pub async fn convert(args: &ConvertArgs, services: &Services) -> Result<()> {
    let conversion = services
        .market
        .convert(&args.from, &args.to, args.amount)
        .await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "convert",
            "conversion": conversion,
        }));
        return Ok(());
    }

    output::success(&format!(
        "{} {} = {} {}",
        conversion.amount,
        conversion.from,
        output::highlight(output::price(conversion.converted)),
        conversion.to
    ));
    if output::verbosity() > 0 {
        output::field("Rate", conversion.rate);
    }
    Ok(())
}
