use tracing_subscriber::EnvFilter;

use bookwell::config::AppConfig;
use bookwell::models::{ProviderKind, ProviderRef};
use bookwell::services::api::http::HttpMarketplaceApi;
use bookwell::services::calendar;
use bookwell::services::scheduling;
use bookwell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let (kind, id) = match (args.next(), args.next()) {
        (Some(kind), Some(id)) => (kind, id),
        _ => anyhow::bail!("usage: bookwell <doctor|gym> <provider-id>"),
    };
    let kind = ProviderKind::parse(&kind)
        .ok_or_else(|| anyhow::anyhow!("unknown provider kind: {kind}"))?;
    let provider = ProviderRef { kind, id };

    let config = AppConfig::from_env();
    tracing::info!("using marketplace API at {}", config.api_url);

    let api = HttpMarketplaceApi::from_config(&config)?;
    let state = AppState::new(config, Box::new(api));

    let rule_set = scheduling::load_availability(&state, &provider).await?;
    if rule_set.is_empty() {
        tracing::warn!(provider = %provider, "provider has no weekly availability");
        return Ok(());
    }
    tracing::info!(provider = %provider, "availability: {}", rule_set.to_human_readable());

    for rule in &rule_set.weekday_rules {
        let date = calendar::next_occurrence_from_today(rule.weekday);
        let open = rule_set.open_slots(rule.weekday);
        let slots = open
            .iter()
            .map(|s| format!("{}-{}", s.start, s.end))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{} {}: {}", rule.weekday, date.format("%Y-%m-%d"), slots);
    }

    Ok(())
}
