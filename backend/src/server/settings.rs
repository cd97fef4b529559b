//! Process settings loaded via OrthoConfig.
//!
//! Values come from `MARKETPLACE_*` environment variables, CLI flags or a
//! configuration file, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use marketplace::outbound::persistence::DEFAULT_MAX_CONNECTIONS;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MARKETPLACE")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one, listings live in process memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl ServerSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid MARKETPLACE_BIND_ADDR '{raw}': {err}"),
            )
        })
    }

    /// Configured pool size, falling back to the pool default.
    ///
    /// A pool needs at least one connection, so `0` is rejected.
    pub fn db_max_connections(&self) -> std::io::Result<u32> {
        match self.db_max_connections {
            None => Ok(DEFAULT_MAX_CONNECTIONS),
            Some(0) => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "MARKETPLACE_DB_MAX_CONNECTIONS must be at least 1",
            )),
            Some(size) => Ok(size),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("marketplace")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("MARKETPLACE_BIND_ADDR", None::<String>),
            ("MARKETPLACE_DATABASE_URL", None::<String>),
            ("MARKETPLACE_DB_MAX_CONNECTIONS", None::<String>),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid default")
        );
        assert!(settings.database_url.is_none());
        assert_eq!(
            settings.db_max_connections().expect("default pool size"),
            DEFAULT_MAX_CONNECTIONS
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("MARKETPLACE_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "MARKETPLACE_DATABASE_URL",
                Some("postgres://localhost/marketplace".to_owned()),
            ),
            ("MARKETPLACE_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("configured address").port(),
            9090
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/marketplace")
        );
        assert_eq!(settings.db_max_connections().expect("pool size"), 4);
    }

    #[rstest]
    fn malformed_bind_addr_is_rejected() {
        let settings = ServerSettings {
            bind_addr: Some("localhost".to_owned()),
            database_url: None,
            db_max_connections: None,
        };

        let err = settings.bind_addr().expect_err("host without port");
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[rstest]
    fn zero_pool_size_is_rejected() {
        let settings = ServerSettings {
            bind_addr: None,
            database_url: Some("postgres://localhost/marketplace".to_owned()),
            db_max_connections: Some(0),
        };

        let err = settings
            .db_max_connections()
            .expect_err("empty pool must be refused");
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
