//! Embedded PostgreSQL databases for adapter integration tests.
//!
//! One cluster is shared by the whole test binary. Every test receives its
//! own temporary database with the production migrations applied, so
//! suites never see each other's rows.

use std::time::Duration;

use marketplace::outbound::persistence::run_migrations;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Pin `PG_PASSWORD` so a data directory left by an earlier run still
/// accepts the password the next bootstrap generates.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster library spawns threads; the shared
        // cluster singleton serialises bootstrap.
        unsafe {
            std::env::set_var("PG_PASSWORD", "marketplace_embedded_test");
        }
    }
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= SHARED_CLUSTER_RETRIES => {
                return Err(format!(
                    "start cluster after {SHARED_CLUSTER_RETRIES} attempts: {error:?}"
                ));
            }
            Err(_) => {
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Create a migrated temporary database on the shared cluster.
///
/// The database is dropped when the returned handle goes out of scope.
pub fn provision_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster()?;
    let name = format!("test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|error| format!("create database: {error:?}"))?;
    run_migrations(database.url()).map_err(|error| error.to_string())?;
    Ok(database)
}
