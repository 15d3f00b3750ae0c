//! Explicit, idempotent store initialization and demo-data seeding.
//!
//! Invoked once by the server binary at startup. A second invocation is a
//! no-op: the default account is only created when absent and demo
//! measurements are only inserted into an empty store.

use chrono::{Duration, Utc};
use tracing::info;

use crate::api::TrayId;
use crate::db::models::NewMeasurement;
use crate::db::password::hash_password;
use crate::db::repository::{FullRepository, RepositoryResult};

/// Default demo account credentials.
pub const DEFAULT_USERNAME: &str = "testuser";
pub const DEFAULT_PASSWORD: &str = "password";

/// Ensure the default user exists and the store carries demo data.
pub async fn initialize(repo: &dyn FullRepository) -> RepositoryResult<()> {
    ensure_default_user(repo).await?;
    ensure_demo_data(repo).await?;
    Ok(())
}

async fn ensure_default_user(repo: &dyn FullRepository) -> RepositoryResult<()> {
    if repo.find_user(DEFAULT_USERNAME).await?.is_some() {
        return Ok(());
    }
    repo.create_user(DEFAULT_USERNAME, &hash_password(DEFAULT_PASSWORD))
        .await?;
    info!(username = DEFAULT_USERNAME, "created default demo user");
    Ok(())
}

/// Seed one demo series per tray when the measurement table is empty.
///
/// The values are deterministic growth ramps (one record per day, ending
/// today) so repeated restarts and tests observe identical data.
async fn ensure_demo_data(repo: &dyn FullRepository) -> RepositoryResult<()> {
    if repo.count_measurements().await? > 0 {
        return Ok(());
    }

    // (tray, days of history, starting weight, daily weight gain)
    let series: [(i64, i64, f64, f64); 3] = [
        (1, 9, 92.0, 5.5),
        (2, 7, 98.0, 6.0),
        (3, 11, 86.0, 5.0),
    ];

    let now = Utc::now();
    let mut inserted = 0usize;
    for (tray, days, base_weight, gain) in series {
        for day in 0..days {
            let progress = day as f64;
            repo.insert_measurement(&NewMeasurement {
                tray: TrayId::new(tray),
                length: 10.0 + tray as f64 + progress * 0.8,
                width: 2.0 + tray as f64 * 0.3 + progress * 0.15,
                area: 20.0 + tray as f64 * 4.0 + progress * 4.5,
                weight: base_weight + progress * gain,
                count: 150 + tray * 40 + day * 10,
                captured_at: Some(now - Duration::days(days - 1 - day)),
            })
            .await?;
            inserted += 1;
        }
    }

    info!(records = inserted, "seeded demo measurement data");
    Ok(())
}
