use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use storefront_workspace::{DesignServer, FileBackend};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storefront-server")]
#[command(about = "Design API for the storefront page builder", long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3030)]
    port: u16,

    /// Host to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory where design files are stored
    #[arg(long, default_value = "designs")]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("Starting storefront design server...");
    println!("Data directory: {:?}", args.data_dir);

    let backend = Arc::new(FileBackend::new(args.data_dir));
    let app = DesignServer::new(backend).router().layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_headers(Any)
            .allow_methods(Any),
    );

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    println!("HTTP listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
