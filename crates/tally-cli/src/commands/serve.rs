//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    static_dir: Option<&Path>,
    api_keys: &str,
    allowed_origins: &str,
) -> Result<()> {
    println!("🚀 Starting Tally web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let config = server_config(no_auth, api_keys, allowed_origins);

    if config.require_auth {
        println!(
            "   🔑 API keys: {} configured (TALLY_API_KEYS)",
            config.api_keys.len()
        );
    } else {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
        if !no_auth {
            println!("      Set TALLY_API_KEYS to require a Bearer token");
        }
    }
    if !config.allowed_origins.is_empty() {
        println!(
            "   🌐 Allowed origins: {}",
            config.allowed_origins.join(", ")
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path)?;

    let static_dir_str = match static_dir {
        Some(p) => Some(
            p.to_str()
                .context("Static directory path must be valid UTF-8")?,
        ),
        None => None,
    };
    tally_server::serve_with_config(db, host, port, static_dir_str, config).await?;

    Ok(())
}

/// Auth is required once API keys are configured, unless `--no-auth` is given
pub fn server_config(
    no_auth: bool,
    api_keys: &str,
    allowed_origins: &str,
) -> tally_server::ServerConfig {
    let api_keys = tally_server::parse_list(api_keys);
    tally_server::ServerConfig {
        require_auth: !no_auth && !api_keys.is_empty(),
        allowed_origins: tally_server::parse_list(allowed_origins),
        api_keys,
    }
}
