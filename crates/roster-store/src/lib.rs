pub mod db;
pub mod error;
pub mod migrate;
pub mod paths;
pub mod repo;

use crate::error::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = db::open(path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<()> {
        migrate::run_migrations(&self.conn)
    }

    pub fn schema_version(&self) -> Result<i64> {
        migrate::schema_version(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn customers(&self) -> repo::CustomersRepo<'_> {
        repo::CustomersRepo::new(&self.conn)
    }
}

/// Handle to an on-disk database that hands out one connection per caller.
///
/// Holds no connection itself, so it can be cloned freely across request
/// tasks; concurrent writers only meet inside SQLite.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Creates the file if needed, restricts its permissions, applies
    /// migrations, and returns the handle.
    pub fn init(path: impl Into<PathBuf>) -> Result<Self> {
        let database = Self { path: path.into() };
        let store = database.open()?;
        db::restrict_db_permissions(&database.path)?;
        store.migrate()?;
        Ok(database)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn open(&self) -> Result<Store> {
        Store::open(&self.path)
    }
}
