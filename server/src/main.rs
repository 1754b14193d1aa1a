use anyhow::Result;
use axum::Router;
use clap::Parser;
use probsearch_server::{build_app, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "probsearch-server")]
#[command(about = "Serve TF-IDF search over a problem corpus", long_about = None)]
struct Args {
    /// Corpus file (JSON array, or JSON Lines with a .jsonl extension)
    #[arg(long, env = "CORPUS_PATH", default_value = "./corpus/all_problems.json")]
    corpus: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
    /// Directory of frontend assets served for unmatched paths
    #[arg(long)]
    static_dir: Option<PathBuf>,
    /// Upper bound on results per query
    #[arg(long, default_value_t = 100)]
    max_k: usize,
    /// Disable English stemming
    #[arg(long, default_value_t = false)]
    no_stemming: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = ServerConfig {
        corpus: args.corpus,
        static_dir: args.static_dir,
        max_k: args.max_k,
        stemming: !args.no_stemming,
    };
    let app: Router = build_app(&config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
