use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use invoice_extractor_core::config::{self, Config};
use invoice_extractor_core::config_file;
use invoice_extractor_openai::OpenAiClient;
use invoice_extractor_pdf_mupdf::MupdfBackend;
use invoice_extractor_web::{AppState, build_router};

#[derive(Parser, Debug)]
#[command(
    name = "invoice-extractor",
    version,
    about = "Extract structured invoice data from PDF uploads"
)]
struct Args {
    /// Read configuration from this TOML file instead of the default locations
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind (overrides config and INVOICE_EXTRACTOR_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config and INVOICE_EXTRACTOR_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Only read the first N pages of each PDF, 0 = all pages
    /// (overrides config and INVOICE_EXTRACTOR_MAX_PAGES)
    #[arg(long)]
    max_pages: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();

    let file = match &args.config {
        Some(path) => config_file::load_from_path(path)
            .with_context(|| format!("could not load config file {}", path.display()))?,
        None => config_file::load_config(),
    };
    let mut file = config::apply_env(file, |key| std::env::var(key).ok())?;

    let server = file.server.get_or_insert_with(Default::default);
    if let Some(host) = args.host {
        server.host = Some(host);
    }
    if let Some(port) = args.port {
        server.port = Some(port);
    }
    if let Some(max_pages) = args.max_pages {
        server.max_pages = Some(max_pages);
    }

    let config = Config::resolve(file)?;
    tracing::info!(?config, "configuration loaded");

    let model = OpenAiClient::new(&config.api_key)
        .with_model(&config.model)
        .with_base_url(&config.base_url)
        .with_timeout(config.timeout);

    let state = Arc::new(AppState {
        pdf: Arc::new(MupdfBackend::new().with_max_pages(config.max_pages)),
        model: Arc::new(model),
    });

    let app = build_router(state, config.max_upload_bytes);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("invoice_extractor=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down");
}
