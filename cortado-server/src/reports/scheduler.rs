//! 月度库存报表调度器
//!
//! 每月 1 号业务时区 00:05 触发，汇总上一个月的库存流水并交给
//! [`ReportNotifier`] 投递。报表只读台账，失败只记日志不重试，
//! 下个月照常触发。

use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::ledgers::LedgerStorage;
use crate::utils::time;

use super::notifier::ReportNotifier;

/// Minimum sleep between trigger computations, guards against clock
/// skew spinning the loop
const MIN_SLEEP: Duration = Duration::from_secs(60);

pub struct ReportScheduler {
    ledgers: LedgerStorage,
    notifier: Arc<dyn ReportNotifier>,
    shutdown: CancellationToken,
    tz: Tz,
    /// Minutes past midnight on the 1st when the report fires
    minute_offset: u32,
}

impl ReportScheduler {
    pub fn new(
        ledgers: LedgerStorage,
        notifier: Arc<dyn ReportNotifier>,
        shutdown: CancellationToken,
        tz: Tz,
        minute_offset: u32,
    ) -> Self {
        Self { ledgers, notifier, shutdown, tz, minute_offset }
    }

    /// Run until shutdown, firing on the 1st of each month
    pub async fn run(self) {
        info!(tz = %self.tz, minute_offset = self.minute_offset, "Report scheduler started");
        loop {
            let now = Utc::now().with_timezone(&self.tz);
            let wait = duration_until_next_trigger(now, self.minute_offset);
            debug!(seconds = wait.as_secs(), "Next monthly report scheduled");

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("Report scheduler stopped");
                    return;
                }
                _ = tokio::time::sleep(wait) => {
                    let fired_at = Utc::now().with_timezone(&self.tz);
                    let month_label = time::previous_month_label(fired_at);
                    self.run_once_for(&month_label).await;
                }
            }
        }
    }

    /// Compile and deliver reports for one month label
    ///
    /// Venues with no inventory that month are skipped. Returns the
    /// number of reports delivered.
    pub async fn run_once_for(&self, month_label: &str) -> usize {
        let venues = match self.ledgers.list_venues() {
            Ok(venues) => venues,
            Err(e) => {
                error!(error = %e, "Failed to list venues for monthly report");
                return 0;
            }
        };

        let mut delivered = 0;
        for venue in venues {
            let bucket = match self.ledgers.get_bucket(&venue.id, month_label) {
                Ok(bucket) => bucket,
                Err(e) => {
                    error!(venue_id = %venue.id, error = %e, "Failed to read inventory bucket");
                    continue;
                }
            };
            let rows = match bucket {
                Some(b) if !b.rows.is_empty() => b.rows,
                _ => {
                    debug!(venue_id = %venue.id, month = %month_label, "No inventory, report skipped");
                    continue;
                }
            };

            match self
                .notifier
                .send_monthly_report(&venue, month_label, &rows)
                .await
            {
                Ok(()) => {
                    delivered += 1;
                    info!(venue_id = %venue.id, month = %month_label, "Monthly report delivered");
                }
                Err(e) => {
                    error!(venue_id = %venue.id, month = %month_label, error = %e, "Monthly report delivery failed");
                }
            }
        }
        delivered
    }
}

/// Time until the 1st of next month at `00:minute_offset` business time
fn duration_until_next_trigger(now: DateTime<Tz>, minute_offset: u32) -> Duration {
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };

    let tz = now.timezone();
    // 午夜后几分钟可能落在 DST 缺口里，退而取最近的有效时刻
    let trigger = tz
        .with_ymd_and_hms(year, month, 1, 0, minute_offset, 0)
        .single()
        .or_else(|| tz.with_ymd_and_hms(year, month, 1, 0, minute_offset, 0).earliest())
        .or_else(|| tz.with_ymd_and_hms(year, month, 1, 1, minute_offset, 0).earliest());

    match trigger {
        Some(t) => {
            let delta = t.signed_duration_since(now);
            delta.to_std().unwrap_or(MIN_SLEEP).max(MIN_SLEEP)
        }
        None => MIN_SLEEP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledgers::{InventoryLedger, VenueRegistry};
    use crate::reports::notifier::NotifyError;
    use async_trait::async_trait;
    use chrono::Timelike;
    use chrono_tz::Asia::Kolkata;
    use shared::models::{InventoryRow, InventoryRowInput, VenueProfile};
    use std::sync::Mutex;

    #[test]
    fn trigger_lands_on_first_of_next_month() {
        let now = Kolkata.with_ymd_and_hms(2025, 3, 15, 10, 0, 0).unwrap();
        let wait = duration_until_next_trigger(now, 5);
        let fire = now + chrono::Duration::from_std(wait).unwrap();
        assert_eq!((fire.year(), fire.month(), fire.day()), (2025, 4, 1));
        assert_eq!((fire.hour(), fire.minute()), (0, 5));
    }

    #[test]
    fn trigger_wraps_december_into_january() {
        let now = Kolkata.with_ymd_and_hms(2025, 12, 31, 23, 50, 0).unwrap();
        let wait = duration_until_next_trigger(now, 5);
        let fire = now + chrono::Duration::from_std(wait).unwrap();
        assert_eq!((fire.year(), fire.month(), fire.day()), (2026, 1, 1));
    }

    #[test]
    fn imminent_trigger_still_waits_at_least_a_minute() {
        let now = Kolkata.with_ymd_and_hms(2025, 3, 31, 23, 59, 59).unwrap();
        let wait = duration_until_next_trigger(now, 0);
        assert!(wait >= MIN_SLEEP);
    }

    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String, usize)>>,
    }

    #[async_trait]
    impl ReportNotifier for RecordingNotifier {
        async fn send_monthly_report(
            &self,
            venue: &VenueProfile,
            month_label: &str,
            rows: &[InventoryRow],
        ) -> Result<(), NotifyError> {
            self.sent
                .lock()
                .unwrap()
                .push((venue.id.clone(), month_label.to_string(), rows.len()));
            Ok(())
        }
    }

    fn row_input() -> InventoryRowInput {
        InventoryRowInput {
            item: "Rice".to_string(),
            quantity: 10.0,
            unit: "kg".to_string(),
            amount: 800.0,
            tax_percent: 5.0,
            total: 840.0,
            date: "2025-02-20".to_string(),
            entered_by: "Meera".to_string(),
        }
    }

    #[tokio::test]
    async fn delivers_only_for_venues_with_inventory() {
        let storage = LedgerStorage::open_in_memory().unwrap();
        let venues = VenueRegistry::new(storage.clone());
        let inventory = InventoryLedger::new(storage.clone());
        venues.upsert_venue("v-1", "Cortado Cafe", None).unwrap();
        venues.upsert_venue("v-2", "Empty Cafe", None).unwrap();
        inventory
            .append_rows("v-1", "February 2025", vec![row_input(), row_input()])
            .unwrap();

        let notifier = Arc::new(RecordingNotifier { sent: Mutex::new(Vec::new()) });
        let scheduler = ReportScheduler::new(
            storage,
            notifier.clone(),
            CancellationToken::new(),
            Kolkata,
            5,
        );

        let delivered = scheduler.run_once_for("February 2025").await;
        assert_eq!(delivered, 1);
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], ("v-1".to_string(), "February 2025".to_string(), 2));
    }

    #[tokio::test]
    async fn month_with_no_data_delivers_nothing() {
        let storage = LedgerStorage::open_in_memory().unwrap();
        VenueRegistry::new(storage.clone())
            .upsert_venue("v-1", "Cortado Cafe", None)
            .unwrap();

        let notifier = Arc::new(RecordingNotifier { sent: Mutex::new(Vec::new()) });
        let scheduler = ReportScheduler::new(
            storage,
            notifier.clone(),
            CancellationToken::new(),
            Kolkata,
            5,
        );

        assert_eq!(scheduler.run_once_for("January 2025").await, 0);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }
}
