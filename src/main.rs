use clap::Parser;
use dotenv::dotenv;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use nutri_assist::api;
use nutri_assist::config::AppConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on; overrides the PORT environment variable
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    // Weather and USDA credentials are mandatory; this aborts startup with
    // a clear message when either is missing
    let config = AppConfig::from_env()?;
    let port = args.port.unwrap_or(config.port);

    if config.gemini_api_key.is_none() {
        log::warn!("GEMINI_API_KEY not set; /consult and /chat will return errors");
    }

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;
    let app = api::create_api(&config);

    log::info!("Starting API server on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
