use tracing::{error, info};
use viajes::config::AppConfig;
use viajes::db::init_pool;
use viajes::error::AppError;
use viajes::services::export::export_trips_json;
use viajes::services::trips::TripService;
use viajes::store::TripStore;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;
    let db = init_pool(&config.database_url).await?;

    if let Err(err) = sqlx::migrate!("./migrations").run(&db).await {
        error!("migration failed: {err:?}");
        return Err(AppError::Other(err.into()));
    }

    let service = TripService::new(db.clone());
    let mut store = TripStore::new(service);

    let trips = store.list_all().await;
    for trip in &trips {
        info!(
            "#{} {} -> {} [{}] departs {} arrives {}",
            trip.id,
            trip.origin,
            trip.destination,
            trip.status,
            trip.departure_time,
            trip.arrival_time
        );
    }

    if trips.is_empty() {
        info!("no trips to export");
    } else {
        let path = export_trips_json(&trips, &config.export_dir).await?;
        info!("wrote trip report to {}", path.display());
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,viajes=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
