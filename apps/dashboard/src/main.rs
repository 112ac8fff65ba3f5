//! Stitchtrack audit dashboard runtime.

#![forbid(unsafe_code)]

mod view;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use stitchtrack_application::{AuditDashboardController, LoadOutcome};
use stitchtrack_core::{AppError, SessionUser};
use stitchtrack_infrastructure::HttpDocumentStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Clone)]
struct DashboardConfig {
    store_base_url: String,
    store_auth_token: Option<String>,
    session_user: String,
    session_user_full_name: String,
    poll_interval_ms: u64,
    search: String,
}

impl DashboardConfig {
    fn load() -> Result<Self, AppError> {
        let store_base_url = required_env("STORE_BASE_URL")?;
        let store_auth_token = env::var("STORE_AUTH_TOKEN")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let session_user =
            env::var("SESSION_USER").unwrap_or_else(|_| "Administrator".to_owned());
        let session_user_full_name =
            env::var("SESSION_USER_FULL_NAME").unwrap_or_else(|_| session_user.clone());
        let poll_interval_ms = env::var("POLL_INTERVAL_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(30_000);
        let search = env::var("SEARCH").unwrap_or_default();

        Ok(Self {
            store_base_url,
            store_auth_token,
            session_user,
            session_user_full_name,
            poll_interval_ms,
            search,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = DashboardConfig::load()?;
    let base_url = Url::parse(&config.store_base_url)
        .map_err(|error| AppError::Validation(format!("invalid STORE_BASE_URL: {error}")))?;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

    let store = Arc::new(HttpDocumentStore::new(
        http_client,
        base_url,
        config.store_auth_token.clone(),
    ));
    let view = Arc::new(view::TracingDashboardView::new());
    let controller = AuditDashboardController::new(
        store.clone(),
        store.clone(),
        store,
        view,
        SessionUser::new(
            config.session_user.clone(),
            config.session_user_full_name.clone(),
        ),
    );

    info!(
        store = %config.store_base_url,
        session_user = %config.session_user,
        poll_interval_ms = config.poll_interval_ms,
        "stitchtrack-dashboard started"
    );

    loop {
        match controller.load_work_orders(config.search.as_str()).await {
            LoadOutcome::Rendered(count) => info!(count, "work order list refreshed"),
            LoadOutcome::Empty => info!("no work orders awaiting audit"),
            LoadOutcome::Failed => warn!("work order refresh failed; retrying next poll"),
            LoadOutcome::Superseded => {}
        }

        tokio::time::sleep(Duration::from_millis(config.poll_interval_ms)).await;
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
