use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wakens_api::{app, AppState};
use wakens_booking::HandoffStore;
use wakens_core::notify::NotificationDispatcher;
use wakens_core::repository::{BookingRepository, SensorReadingRepository};
use wakens_notify::{EmailDispatcher, NoopDispatcher};
use wakens_store::{
    DbClient, InMemoryBookingRepository, InMemorySensorRepository, PgBookingRepository,
    RedisSensorRepository,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wakens_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = wakens_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Wakens API on port {}", config.server.port);

    // Repository strategy is picked exactly once, here
    let (sensors, bookings): (Arc<dyn SensorReadingRepository>, Arc<dyn BookingRepository>) =
        match (&config.database, &config.redis) {
            (Some(database), Some(redis)) => {
                let db = DbClient::new(&database.url)
                    .await
                    .expect("Failed to connect to Postgres");
                db.migrate().await.expect("Failed to run migrations");

                let sensor_repo = RedisSensorRepository::new(&redis.url)
                    .await
                    .expect("Failed to connect to Redis");

                tracing::info!("Live stores connected");
                (
                    Arc::new(sensor_repo),
                    Arc::new(PgBookingRepository::new(db.pool.clone())),
                )
            }
            _ => {
                tracing::info!("Store credentials missing - running in demo mode with canned data");
                (
                    Arc::new(InMemorySensorRepository::with_demo_data().await),
                    Arc::new(InMemoryBookingRepository::with_demo_data()),
                )
            }
        };

    let dispatcher: Arc<dyn NotificationDispatcher> = match &config.email {
        Some(email) => Arc::new(EmailDispatcher::new(
            &email.api_url,
            &email.api_key,
            &email.from_address,
        )),
        None => {
            tracing::info!("No email provider configured - confirmations are log-only");
            Arc::new(NoopDispatcher)
        }
    };

    let handoff = Arc::new(HandoffStore::new(chrono::Duration::minutes(
        config.booking_rules.handoff_ttl_minutes,
    )));

    // Sweep confirmation handoffs that were never read
    let sweeper = Arc::clone(&handoff);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            interval.tick().await;
            let removed = sweeper.cleanup_expired();
            if removed > 0 {
                tracing::debug!("Swept {} expired confirmation handoffs", removed);
            }
        }
    });

    let app_state = AppState {
        sensors,
        bookings,
        dispatcher,
        handoff,
        booking_rules: config.booking_rules.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
