//! Server command implementation

use std::path::Path;

use anyhow::Result;
use surplus_server::{AppState, ServerConfig};

use super::Workspace;

pub async fn cmd_serve(
    ws: Workspace,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting Surplus web server...");
    println!("   Series: {}", ws.source.name());
    println!("   Config: {}", ws.config_source);
    println!("   Preferences: {}", ws.store.path().display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    // Parse allowed CORS origins from environment (comma-separated)
    let allowed_origins: Vec<String> = std::env::var("SURPLUS_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if !allowed_origins.is_empty() {
        println!("   CORS origins: {}", allowed_origins.join(", "));
    }
    println!();

    let state = AppState::new(ws.source, Box::new(ws.store), ws.config);
    let static_dir = static_dir.and_then(|p| p.to_str());

    surplus_server::serve(
        state,
        host,
        port,
        static_dir,
        ServerConfig { allowed_origins },
    )
    .await
}
