use std::env;

/// Database configuration.
///
/// Reads from the `GARDEN_DATABASE_URL` environment variable, falling back to
/// `postgresql://localhost:5432/garden` when unset.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Full PostgreSQL connection URL.
    pub database_url: String,
}

impl DbConfig {
    /// Environment variable holding the connection URL.
    pub const ENV_VAR: &str = "GARDEN_DATABASE_URL";

    /// The connection URL used when nothing else is configured.
    pub const DEFAULT_URL: &str = "postgresql://localhost:5432/garden";

    /// Build a config from the environment, falling back to [`Self::DEFAULT_URL`].
    pub fn from_env() -> Self {
        let database_url =
            env::var(Self::ENV_VAR).unwrap_or_else(|_| Self::DEFAULT_URL.to_owned());
        Self { database_url }
    }

    /// Build a config from an explicit URL (tests and CLI flags).
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Extract the database name from the URL.
    ///
    /// Query parameters are ignored. Returns `None` when the URL has no
    /// path component.
    pub fn database_name(&self) -> Option<&str> {
        let (path_start, path_end) = self.path_span()?;
        Some(&self.database_url[path_start..path_end]).filter(|name| !name.is_empty())
    }

    /// URL of the `postgres` maintenance database on the same server.
    ///
    /// Used to issue `CREATE DATABASE` when the target does not exist yet.
    pub fn maintenance_url(&self) -> String {
        match self.path_span() {
            Some((start, end)) => format!(
                "{}postgres{}",
                &self.database_url[..start],
                &self.database_url[end..]
            ),
            None => {
                let (base, query) = self.split_query();
                format!("{}/postgres{query}", base.trim_end_matches('/'))
            }
        }
    }

    /// Byte range of the database name: after the first `/` following the
    /// authority, up to the query string.
    fn path_span(&self) -> Option<(usize, usize)> {
        let (base, _) = self.split_query();
        let authority_start = base.find("://").map_or(0, |pos| pos + 3);
        let slash = authority_start + base[authority_start..].find('/')?;
        Some((slash + 1, base.len()))
    }

    /// Split off the query string, which keeps its leading `?`.
    fn split_query(&self) -> (&str, &str) {
        let url = self.database_url.as_str();
        url.find('?').map_or((url, ""), |pos| url.split_at(pos))
    }
}
