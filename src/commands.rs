//! Implementations behind the `forge` subcommands.

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::adapters::generation_client::HttpGenerationClient;
use crate::adapters::record_generator::RecordGenerator;
use crate::adapters::session::ForgeSession;
use crate::config::Settings;
use crate::domain::{GenerationState, Record, Schema};

/// Read a JSON schema file.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Schema file not found at '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON format in schema file at '{}'", path.display()))
}

/// Write records as pretty-printed JSON.
pub fn write_output(path: &Path, records: &[Record]) -> Result<()> {
    let encoded = serde_json::to_string_pretty(records)?;
    std::fs::write(path, encoded)
        .with_context(|| format!("Failed to write data to '{}'", path.display()))
}

/// Generate `count` records from the schema at `input` into `output`.
pub fn generate_to_file(input: &Path, output: &Path, count: i64) -> Result<usize> {
    if count <= 0 {
        bail!("Count must be a positive integer.");
    }
    let count = usize::try_from(count)?;

    let schema = load_schema(input)?;
    info!("Schema loaded from {}", input.display());

    let records = RecordGenerator::new().generate(&schema, count)?;
    write_output(output, &records)?;
    info!("Generated {} records to {}", records.len(), output.display());

    Ok(records.len())
}

/// Submit the schema at `input` to the configured generation service and
/// return the rendered output.
pub async fn request_remote(settings: &Settings, input: &Path, count: i64) -> Result<String> {
    let schema = load_schema(input)?;
    let client = Arc::new(HttpGenerationClient::from_settings(&settings.client));
    let mut session = ForgeSession::with_schema(client, schema);
    session.set_record_count(count);

    info!("Requesting {} records from {}", count, settings.client.api_url);
    if let GenerationState::Failed { message } = session.generate().await? {
        bail!("{}", message);
    }

    Ok(session.render_output().unwrap_or_default())
}

/// Run the generation service until the process is stopped.
pub async fn serve(settings: &Settings) -> Result<()> {
    let app = crate::create_app(Arc::new(RecordGenerator::new()));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    info!("Generation service listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
