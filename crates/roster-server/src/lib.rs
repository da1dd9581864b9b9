//! HTTP surface for the customer registry.
//!
//! Handlers translate between JSON and the core/store types; all decisions
//! about validity and uniqueness live in `roster-core` and `roster-store`.

pub mod error;
pub mod handlers;

use axum::routing::get;
use axum::Router;
use roster_store::error::StoreError;
use roster_store::{Database, Store};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Runs `f` on a fresh connection in the blocking pool.
    pub async fn with_store<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Store) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let store = db.open()?;
            f(&store)
        })
        .await
        .map_err(|err| StoreError::Task(err.to_string()))?
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/clientes",
            get(handlers::customers::list).post(handlers::customers::create),
        )
        .route("/clientes/:id", get(handlers::customers::show))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
