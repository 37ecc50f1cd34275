use crate::api::{self, AppState, Stores};
use crate::components::forecast::{HolidayCalendar, HolidayTable, NoHolidays};
use crate::components::work_schedule::WorkSchedule;
use crate::config::Config;
use crate::error::{storage_error, AppResult, Error};
use crate::shutdown;
use crate::storage::RedisRepository;
use crate::utils::ids::UuidGenerator;
use redis::Client as RedisClient;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

async fn connect_redis(redis_url: &str) -> AppResult<RedisClient> {
    let client = RedisClient::open(redis_url)
        .map_err(|e| storage_error(&format!("Failed to create Redis client: {}", e)))?;
    RedisRepository::<WorkSchedule>::with_client(client.clone())
        .ping()
        .await?;
    Ok(client)
}

/// Pick the storage backend, falling back to memory when Redis is unreachable
pub async fn connect_stores(config: &Config) -> Stores {
    let Some(redis_url) = config.redis_url.as_deref() else {
        info!("REDIS_URL not set, using in-memory storage");
        return Stores::in_memory();
    };

    match connect_redis(redis_url).await {
        Ok(client) => {
            info!("Connected to Redis successfully");
            Stores::redis(client)
        }
        Err(e) => {
            error!("Failed to connect to Redis: {}", e);
            warn!("Using in-memory storage as fallback");
            Stores::in_memory()
        }
    }
}

fn load_holidays(config: &Config) -> AppResult<Arc<dyn HolidayCalendar>> {
    match &config.holidays_file {
        Some(path) => Ok(Arc::new(HolidayTable::load(path)?)),
        None => Ok(Arc::new(NoHolidays)),
    }
}

/// Wire the services together
pub async fn build_state(config: &Config) -> miette::Result<AppState> {
    let holidays = load_holidays(config)?;
    let stores = connect_stores(config).await;

    Ok(AppState::new(
        stores,
        Arc::new(UuidGenerator),
        holidays,
        config.default_hourly_rate,
    ))
}

/// Serve the API until a shutdown signal arrives
pub async fn start_server(config: Config) -> miette::Result<()> {
    let state = build_state(&config).await?;
    let app = api::router(state);

    let address = config.bind_address();
    let listener = TcpListener::bind(address.as_str()).await.map_err(Error::from)?;
    info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await
        .map_err(Error::from)?;

    info!("Server stopped");
    Ok(())
}
