use dotenvy::dotenv;
use eventstore::{CatalogEntry, EventStoreError, global};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use config::{CatalogConfig, LOG_VAR, OutputFormat, log_filter};

mod config;
mod events;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Registry error: {0}")]
    Registry(#[from] EventStoreError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn render(entries: &[CatalogEntry], format: OutputFormat) -> Result<String, CatalogError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
        OutputFormat::Text => Ok(entries
            .iter()
            .map(|entry| match (&entry.name, entry.declared_by) {
                (Some(name), Some(origin)) if entry.inherited => {
                    format!("{}\t{} (from {})", entry.type_name, name, origin)
                }
                (Some(name), _) => format!("{}\t{}", entry.type_name, name),
                (None, _) => format!("{}\t<unnamed>", entry.type_name),
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn main() -> Result<(), BoxError> {
    dotenv().ok();

    let directives = std::env::var(LOG_VAR).ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Event Catalog v{}...", env!("CARGO_PKG_VERSION"));

    let config = CatalogConfig::from_env()?;
    let registry = global::install(events::build_registry()?)?;
    let output = render(&registry.catalog(), config.format)?;
    println!("{output}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_render_marks_inherited_names() {
        let registry = events::build_registry().unwrap();
        let text = render(&registry.catalog(), OutputFormat::Text).unwrap();
        assert!(text.lines().any(|line| line.ends_with("PirepAmended\tpirep.submitted (from event_catalog::events::PirepSubmitted)")));
        assert!(text.lines().any(|line| line.ends_with("TenantCreated\ttenant.created")));
    }

    #[test]
    fn test_json_render_is_an_array() {
        let registry = events::build_registry().unwrap();
        let json = render(&registry.catalog(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(registry.len()));
    }
}
