/// Ecoponto: A Collection Point Registry Library
///
/// This library provides the core functionality for a civic collection
/// point registry: organizations register a physical location together
/// with the recyclable item categories it accepts, backed by a REST API
/// storing points, the item catalog, and their associations in SQLite.
///
/// ### Modules
///
/// - `config`: Layered application configuration
/// - `db`: Database connection management
/// - `dto`: Request and response schema types validated at the boundary
/// - `errors`: The API error taxonomy
/// - `handlers`: Web API request handlers
/// - `models`: Data structures for items, points, and their associations
/// - `repo`: Repository layer for database operations
/// - `schema`: Database schema definitions
///
/// ### Web API
///
/// The library exposes a RESTful API using Axum with the following endpoints:
///
/// - `GET /items`: List the item catalog
/// - `GET /points`: List points, with optional `city`, `uf`, and `items` filters
/// - `GET /points/{id}`: Get a specific point with its resolved items
/// - `POST /points`: Register a new point with its item associations

/// Configuration module
pub mod config;

/// Database connection module
pub mod db;

/// Request/response schema module
pub mod dto;

/// API error taxonomy module
pub mod errors;

/// Web API handlers module
pub mod handlers;

/// Data models module
pub mod models;

/// Repository module for database operations
pub mod repo;

/// Database schema module
pub mod schema;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use db::DbPool;

/// Shared state injected into every handler
///
/// Holds the connection pool plus the config-derived strings the handlers
/// need to resolve stored image file names into absolute URLs. There is no
/// other cross-request mutable state.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool
    pub pool: Arc<DbPool>,

    /// Public base URL for uploaded/static assets
    pub uploads_url: Arc<str>,

    /// Image file name recorded when a registration omits one
    pub placeholder_image: Arc<str>,
}

impl AppState {
    /// Creates the application state from its parts
    pub fn new(pool: Arc<DbPool>, uploads_url: &str, placeholder_image: &str) -> Self {
        Self {
            pool,
            uploads_url: uploads_url.into(),
            placeholder_image: placeholder_image.into(),
        }
    }
}

/// Creates the application router with all routes
///
/// This function sets up the Axum router with all the API endpoints.
/// Route registration is explicit and takes the injected state, so there
/// is no hidden module-level router singleton.
///
/// ### Arguments
///
/// * `state` - The application state shared with all handlers
///
/// ### Returns
///
/// An Axum Router configured with all routes, permissive CORS for the
/// browser frontend, and the state attached
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Route for listing the item catalog
        .route("/items", get(handlers::list_items_handler))
        // Routes for registering and listing points
        .route(
            "/points",
            post(handlers::create_point_handler).get(handlers::list_points_handler),
        )
        // Route for getting a specific point by ID
        .route("/points/{id}", get(handlers::get_point_handler))
        // The frontend is served from another origin
        .layer(CorsLayer::permissive())
        // Add the shared state to the application
        .with_state(state)
}

/// Runs the embedded migrations
///
/// This function applies all database migrations to set up the schema and
/// seed the item catalog. It runs at server startup and in tests.
///
/// ### Arguments
///
/// * `conn` - A mutable reference to a SQLite connection
///
/// ### Panics
///
/// This function will panic if the migrations fail to run
pub fn run_migrations(conn: &mut diesel::SqliteConnection) {
    use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

    // Define the embedded migrations
    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    // Run all pending migrations
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::prelude::*;
    use diesel::SqliteConnection;

    /// Tests the run_migrations function
    ///
    /// This test verifies that:
    /// 1. Migrations can be run successfully
    /// 2. The expected tables are created in the database
    #[test]
    fn test_run_migrations() {
        // Create a connection to an in-memory database
        let mut conn = SqliteConnection::establish(":memory:").unwrap();

        // Run migrations
        run_migrations(&mut conn);

        // Verify that the tables were created by querying the schema
        for table in ["items", "points", "point_items"] {
            let result = diesel::sql_query(format!(
                "SELECT name FROM sqlite_master WHERE type='table' AND name='{table}'"
            ))
            .execute(&mut conn);
            assert!(result.is_ok());
        }

        // The catalog seed ran as part of the migrations
        let seeded: i64 = crate::schema::items::table
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(seeded, 6);
    }
}
