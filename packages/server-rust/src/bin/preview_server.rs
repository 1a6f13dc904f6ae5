//! Development server serving the sample mail previews.

use std::sync::Arc;

use clap::Parser;
use mailview_core::Interceptors;
use mailview_server::{demo, NetworkConfig, NetworkModule, PreviewConfig, PreviewState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "preview-server", about = "Preview generated email in a browser")]
struct Args {
    /// Address to bind.
    #[arg(long, env = "MAILVIEW_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on; 0 picks a free port.
    #[arg(long, env = "MAILVIEW_PORT", default_value_t = 3000)]
    port: u16,

    /// Path prefix the previews are mounted under.
    #[arg(long, env = "MAILVIEW_MOUNT", default_value = "")]
    mount: String,

    /// Emit logs as JSON lines.
    #[arg(long, env = "MAILVIEW_LOG_JSON")]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let registry = Arc::new(demo::registry()?);
    let state = PreviewState::new(
        &PreviewConfig::new(args.mount),
        registry,
        Interceptors::new(),
    );

    let config = NetworkConfig {
        host: args.host,
        port: args.port,
        ..NetworkConfig::default()
    };

    let mut module = NetworkModule::new(config, state);
    let port = module.start().await?;
    info!(port, "Preview server ready");

    module
        .serve(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
}
