use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Enables foreign key enforcement on every pooled connection
///
/// SQLite scopes `PRAGMA foreign_keys` to a single connection, so the
/// pragma has to be reapplied whenever the pool opens a new one. The
/// `point_items` rows depend on it to reject dangling item references.
#[derive(Debug, Clone, Copy)]
struct ForeignKeyEnforcement;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ForeignKeyEnforcement {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn init_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(ForeignKeyEnforcement))
        .build(manager)
        .expect("Failed to create pool.")
}
