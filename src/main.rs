//! pdf-insight-server - PDF question answering with SCORM export.
//!
//! Usage:
//!   OPENAI_API_KEY=sk-... pdf-insight-server [--bind ADDR:PORT]

use pdf_insight::config::Config;
use pdf_insight::server::{self, AppState};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pdf_insight=info,tower_http=warn"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

#[tokio::main]
async fn main() {
    // Parse simple args (no clap to keep the binary small)
    let args: Vec<String> = std::env::args().collect();
    let mut bind_arg: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" if i + 1 < args.len() => {
                bind_arg = Some(&args[i + 1]);
                i += 2;
            }
            "--help" | "-h" => {
                println!("pdf-insight-server - PDF question answering HTTP API");
                println!();
                println!("Usage: pdf-insight-server [--bind ADDR:PORT]");
                println!();
                println!("Environment variables:");
                println!("  OPENAI_API_KEY          Completion API key");
                println!("  PDF_INSIGHT_MODEL       Completion model (default: gpt-3.5-turbo)");
                println!("  PDF_INSIGHT_BIND        Bind address (default: 0.0.0.0:5000)");
                println!("  PDF_INSIGHT_LOGO        Branding image path (default: assets/logo.jpeg)");
                println!("  PDF_INSIGHT_OUTPUT_DIR  Archive output directory (default: temp dir)");
                std::process::exit(0);
            }
            _ => {
                i += 1;
            }
        }
    }

    init_tracing();

    let mut config = Config::from_env();
    if let Some(bind) = bind_arg {
        config.bind_addr = bind.to_string();
    }

    if config.api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set; completion calls will fail");
    }
    if !config.branding_path.is_file() {
        tracing::warn!(
            path = %config.branding_path.display(),
            "branding image not found; SCORM export will fail"
        );
    }

    let bind_addr = config.bind_addr.clone();
    let app = server::router(AppState::new(config));

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("failed to bind to {}: {}", bind_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("listening on {}", bind_addr);
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}
