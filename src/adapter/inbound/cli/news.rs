//! Handler for the `news` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::NewsArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;

/// Show recent news for a symbol.
pub async fn execute(args: &NewsArgs, services: &Services) -> Result<()> {
    let mut articles = match &services.news {
        Some(news) => news.news_for(&args.symbol).await,
        None => {
            output::note("News is disabled in configuration");
            Vec::new()
        }
    };
    articles.truncate(args.limit);

    if output::is_json() {
        output::json_output(json!({
            "command": "news",
            "symbol": args.symbol,
            "articles": articles,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section(&format!("News for {}", args.symbol.to_ascii_uppercase()));
    if articles.is_empty() {
        output::note("No articles available");
        return Ok(());
    }
    for article in &articles {
        println!();
        output::lines(&article.title);
        output::field("Source", &article.source);
        output::field(
            "Published",
            article.published_at.format("%Y-%m-%d %H:%M UTC"),
        );
        output::field("Link", output::muted(&article.url));
    }
    Ok(())
}
