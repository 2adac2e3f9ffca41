use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use skillsprint::{
    config::{Settings, build_state, create_app},
    event::EventConfig,
};
use tracing_subscriber::EnvFilter;

/// Serves the Skill Sprint website.
#[derive(Parser)]
#[clap(version, about)]
pub struct Serve {
    #[clap(long, env = "BIND_ADDR", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,
    #[clap(long, env = "DATABASE_URL", default_value = "skillsprint.sqlite")]
    database_url: String,
    /// Where uploaded payment screenshots are written (and served from).
    #[clap(long, env = "UPLOAD_DIR", default_value = "uploads")]
    upload_dir: PathBuf,
    /// TOML file with event settings; built-in defaults are used otherwise.
    #[clap(long, env = "SKILLSPRINT_CONFIG")]
    config: Option<PathBuf>,
    /// At least 64 bytes, used to encrypt the registration cookies.
    #[clap(long, env = "SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("skillsprint=info,tower_http=info")),
        )
        .init();

    let args = Serve::parse();

    let event = EventConfig::load(args.config.as_deref())
        .context("failed to load event configuration")?;
    let settings = Settings {
        database_url: args.database_url,
        upload_dir: args.upload_dir,
        secret_key: args.secret_key,
        event,
    };

    let state = build_state(&settings)
        .await
        .context("failed to set up application state")?;
    let app = create_app(state, Some(&settings.upload_dir));

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind to {}", args.bind))?;
    tracing::info!("Listening on http://{}", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
