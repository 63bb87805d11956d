use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use devscope::{AnalysisCache, Config, GitHubClient, ProfileAnalyzer};

#[derive(Parser, Debug)]
#[command(name = "devscope")]
#[command(version = "0.1.0")]
#[command(about = "Analyze GitHub profiles for recruiting insights")]
struct Args {
    /// Address to bind the HTTP server to (overrides BIND_ADDR)
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Directory holding the browser UI assets
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("devscope=info".parse()?)
                .add_directive("tower_http=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;
    let bind_addr = args.bind.unwrap_or(config.bind_addr);

    if config.github_token.is_none() {
        tracing::warn!(
            "GITHUB_TOKEN not set; running against GitHub's unauthenticated quota (60 requests/hour)"
        );
    }

    let client = GitHubClient::new(&config)?;
    let cache = AnalysisCache::new(config.cache_ttl_secs);
    let analyzer = Arc::new(ProfileAnalyzer::new(Arc::new(client), cache));

    let app = devscope::server::router(analyzer, &args.static_dir);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
