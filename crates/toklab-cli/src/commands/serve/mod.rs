mod shutdown;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use toklab_api::config::{DEFAULT_ADDRESS, DEFAULT_STATIC_DIR};
use toklab_api::{create_router, AppState, ServerConfig};
use toklab_ratelimit::{ClientIdentity, RateLimitConfig, RateLimiter, DEFAULT_MAX_REQUESTS};

use super::models::ModelArgs;
use shutdown::shutdown_signal;

#[derive(Args)]
pub struct ServeCommand {
    /// Address to bind the server to
    #[arg(long, default_value = DEFAULT_ADDRESS, env = "TOKLAB_ADDRESS")]
    pub address: String,

    /// Requests per client admitted to /tokenize within one window
    #[arg(long, default_value_t = DEFAULT_MAX_REQUESTS, env = "TOKLAB_RATE_LIMIT")]
    pub rate_limit: u32,

    /// Length of the rate limit window in seconds
    #[arg(long, default_value_t = 60, env = "TOKLAB_RATE_WINDOW_SECS")]
    pub rate_window_secs: u64,

    /// How clients are told apart: peer, or forwarded when behind a trusted proxy
    #[arg(long, default_value = "peer", env = "TOKLAB_CLIENT_IDENTITY")]
    pub client_identity: ClientIdentity,

    /// Directory served at / (index.html) and /static
    #[arg(long, default_value = DEFAULT_STATIC_DIR, env = "TOKLAB_STATIC_DIR")]
    pub static_dir: PathBuf,

    /// Do not serve the API explorer at /swagger-ui
    #[arg(long, env = "TOKLAB_NO_SWAGGER_UI")]
    pub no_swagger_ui: bool,

    /// Load every model before accepting requests
    #[arg(long, env = "TOKLAB_WARM_UP")]
    pub warm_up: bool,

    #[command(flatten)]
    pub models: ModelArgs,
}

impl ServeCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run())
    }

    async fn run(self) -> anyhow::Result<()> {
        let comparison = Arc::new(self.models.build_comparison()?);
        if self.warm_up {
            info!("Loading models...");
            comparison.warm_up().await?;
        }

        let rate_config = RateLimitConfig::new(self.rate_limit)
            .with_window(Duration::from_secs(self.rate_window_secs))
            .with_identity(self.client_identity);
        info!(
            "Rate limit: {} requests per {:?} per client ({})",
            rate_config.max_requests, rate_config.window, rate_config.identity
        );
        let limiter = Arc::new(RateLimiter::new(rate_config));
        spawn_idle_client_purge(limiter.clone());

        let config = ServerConfig {
            address: self.address,
            static_dir: self.static_dir,
            swagger_ui: !self.no_swagger_ui,
        };
        if !config.index_file().is_file() {
            warn!(
                "{} not found, GET / will answer 404",
                config.index_file().display()
            );
        }

        let app = create_router(Arc::new(AppState::new(comparison)), limiter, &config);

        let listener = TcpListener::bind(&config.address)
            .await
            .with_context(|| format!("Failed to bind {}", config.address))?;
        info!("Toklab listening on http://{}", listener.local_addr()?);

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        info!("Server stopped");
        Ok(())
    }
}

/// Forget idle clients once per window so one-off clients do not pile up
fn spawn_idle_client_purge(limiter: Arc<RateLimiter>) {
    let period = limiter.config().window.max(Duration::from_secs(1));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = limiter.purge_idle();
            if purged > 0 {
                debug!(
                    "Purged {} idle clients, {} still tracked",
                    purged,
                    limiter.tracked_clients()
                );
            }
        }
    });
}
