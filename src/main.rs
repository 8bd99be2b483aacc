use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sheet_roulette::config::{Settings, TopicSource};
use sheet_roulette::db::{self, SqliteStore};
use sheet_roulette::engine::SheetHandlerFactory;
use sheet_roulette::handlers;
use sheet_roulette::state::AppState;
use sheet_roulette::store::{SheetFileStore, TopicStore};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sheet_roulette=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let settings = Settings::load();
  tracing::info!("Using database: {}", settings.database_path.display());
  tracing::info!("Using sheets directory: {}", settings.sheets_dir.display());

  let pool = db::init_db(&settings.database_path).expect("Failed to initialize database");
  let store = Arc::new(SqliteStore::new(pool));

  let topics: Arc<dyn TopicStore> = match settings.topic_source {
    TopicSource::Database => store.clone(),
    TopicSource::Files => Arc::new(SheetFileStore::new(&settings.sheets_dir)),
  };
  tracing::info!("Topic source: {:?}", settings.topic_source);

  let factory = SheetHandlerFactory::new(topics, store, &settings.sheets_dir);
  let app = handlers::router(AppState::new(factory));

  let bind_addr = settings.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://{}", bind_addr);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
