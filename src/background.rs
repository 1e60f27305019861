use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info, debug, info_span, Instrument};
use crate::state::AppState;
use crate::error::AppError;

/// Outcome of one maintenance pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceReport {
    pub stale_drafts: u64,
    pub expired_refresh_tokens: u64,
}

pub async fn start_maintenance_worker(state: Arc<AppState>) {
    let interval = Duration::from_secs(state.config.maintenance_interval_secs.max(1));
    info!("Starting maintenance worker (every {:?})...", interval);

    loop {
        sleep(interval).await;

        let span = info_span!("maintenance_pass");
        async {
            match run_maintenance_pass(&state).await {
                Ok(report) if report == MaintenanceReport::default() => debug!("Nothing to clean up"),
                Ok(report) => info!(
                    stale_drafts = report.stale_drafts,
                    expired_refresh_tokens = report.expired_refresh_tokens,
                    "Maintenance pass completed"
                ),
                Err(e) => error!("Maintenance pass failed: {:?}", e),
            }
        }
            .instrument(span)
            .await;
    }
}

/// Drops drafts untouched for `draft_ttl_hours` and refresh tokens past expiry.
pub async fn run_maintenance_pass(state: &AppState) -> Result<MaintenanceReport, AppError> {
    let now = Utc::now();
    let untouched_since = now - chrono::Duration::hours(state.config.draft_ttl_hours);

    let stale_drafts = state.draft_repo.delete_stale(untouched_since).await?;
    let expired_refresh_tokens = state.auth_repo.delete_expired(now).await?;

    Ok(MaintenanceReport { stale_drafts, expired_refresh_tokens })
}
