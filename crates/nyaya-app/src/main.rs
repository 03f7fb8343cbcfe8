mod cli;
mod repl;

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use nyaya_ai::{GeminiClient, GeminiConfig};
use nyaya_chat::ChatService;
use nyaya_store::SessionStore;

/// Load environment variables from a .env file (KEY=VALUE lines).
fn load_dotenv() {
    // Try common locations for .env relative to the workspace
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        // Workspace root — two levels up from crates/nyaya-app/
        manifest_dir.join("..").join("..").join(".env"),
        // Current directory
        PathBuf::from(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file before anything else
    load_dotenv();

    // Parse CLI arguments
    let args = cli::parse();

    // Initialize logging
    let log_directive = args.log_level.as_deref().unwrap_or("nyaya=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "nyaya=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Nyaya v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load config
    let config = match args.config.as_deref() {
        Some(path) => nyaya_config::load_from_path(std::path::Path::new(path)),
        None => nyaya_config::load_config(),
    }
    .unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        nyaya_config::NyayaConfig::default()
    });
    tracing::info!("Config loaded (model: {})", config.model.name);

    // Generation client
    let gemini = match GeminiConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let system_prompt = config
        .assistant
        .system_prompt
        .clone()
        .unwrap_or_else(|| nyaya_chat::SYSTEM_PROMPT.to_string());
    let client = GeminiClient::new(
        gemini
            .with_model(config.model.name.clone())
            .with_max_tokens(config.model.max_tokens)
            .with_temperature(config.model.temperature)
            .with_system_prompt(system_prompt),
    );

    // Session store
    let data_dir = args
        .data_dir
        .map(PathBuf::from)
        .or_else(|| config.storage.data_dir.clone())
        .or_else(|| dirs::data_dir().map(|d| d.join("nyaya")));
    let Some(data_dir) = data_dir else {
        eprintln!("could not determine data directory; pass --data-dir");
        std::process::exit(1);
    };
    let store = SessionStore::open(data_dir.join("sessions.json"));

    let service = ChatService::new(store, Arc::new(client));

    if let Err(e) = repl::run(service).await {
        tracing::error!("fatal: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
