//! Report delivery seam
//!
//! The engine compiles monthly reports but never talks to mail/SMS
//! infrastructure itself; delivery goes through [`ReportNotifier`].
//! The default [`LogNotifier`] writes the report to the structured log,
//! which is enough for a single-venue deployment reading its own logs.

use async_trait::async_trait;
use shared::models::{InventoryRow, VenueProfile};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Report delivery failed: {0}")]
    Delivery(String),
}

/// Delivery channel for compiled monthly reports
#[async_trait]
pub trait ReportNotifier: Send + Sync {
    async fn send_monthly_report(
        &self,
        venue: &VenueProfile,
        month_label: &str,
        rows: &[InventoryRow],
    ) -> Result<(), NotifyError>;
}

/// Default notifier: emits the report summary to the log
pub struct LogNotifier;

#[async_trait]
impl ReportNotifier for LogNotifier {
    async fn send_monthly_report(
        &self,
        venue: &VenueProfile,
        month_label: &str,
        rows: &[InventoryRow],
    ) -> Result<(), NotifyError> {
        let grand_total: f64 = rows.iter().map(|r| r.total).sum();
        info!(
            target: "monthly_report",
            venue_id = %venue.id,
            venue_name = %venue.name,
            month = %month_label,
            rows = rows.len(),
            grand_total,
            recipient = venue.report_email.as_deref().unwrap_or("<none>"),
            "Monthly inventory report compiled"
        );
        Ok(())
    }
}
