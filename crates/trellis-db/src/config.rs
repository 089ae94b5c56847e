//! Database connection configuration.

use std::env;

/// Where to find the trellis database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Full PostgreSQL connection URL.
    pub database_url: String,
}

impl DbConfig {
    /// Connection URL used when nothing else is configured.
    pub const DEFAULT_URL: &str = "postgresql://localhost:5432/trellis";

    /// Read `TRELLIS_DATABASE_URL`, falling back to [`Self::DEFAULT_URL`].
    pub fn from_env() -> Self {
        Self::new(env::var("TRELLIS_DATABASE_URL").unwrap_or_else(|_| Self::DEFAULT_URL.to_owned()))
    }

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// The database name, read from the URL's final path segment.
    ///
    /// `None` when the URL has no path component (a bare `host:port` still
    /// ends in a segment containing `:`).
    pub fn database_name(&self) -> Option<&str> {
        let tail = self.database_url.rsplit('/').next()?;
        (!tail.is_empty() && !tail.contains(':')).then_some(tail)
    }

    /// The same server's `postgres` maintenance database, for issuing
    /// `CREATE DATABASE` before the target database exists.
    pub fn maintenance_url(&self) -> String {
        match self.database_url.rfind('/') {
            Some(slash) => format!("{}/postgres", &self.database_url[..slash]),
            None => self.database_url.clone(),
        }
    }
}
