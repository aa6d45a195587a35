//! Sync service - one fetch → flatten → write → status run

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::batch_writer::{BatchWriter, WriteReport, DEFAULT_BATCH_SIZE, DEFAULT_SUCCESS_THRESHOLD_PERCENT};
use super::flatten::Flattener;
use super::layout::TagLayout;
use super::status::StatusRecorder;
use crate::domain::{DepotSource, TagPath, TagStore};
use crate::shared::SyncError;

/// Tunables of a sync run
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Root under which `Status/` and `Depots/` live
    pub base_path: TagPath,
    pub batch_size: usize,
    /// Minimum share of good writes for a run to count as successful
    pub success_threshold_percent: f64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            base_path: TagPath::new("[default]ChargePilot"),
            batch_size: DEFAULT_BATCH_SIZE,
            success_threshold_percent: DEFAULT_SUCCESS_THRESHOLD_PERCENT,
        }
    }
}

pub struct SyncService {
    source: Arc<dyn DepotSource>,
    flattener: Flattener,
    writer: BatchWriter,
    status: StatusRecorder,
    success_threshold_percent: f64,
}

impl SyncService {
    pub fn new(source: Arc<dyn DepotSource>, store: Arc<dyn TagStore>, settings: SyncSettings) -> Self {
        let layout = TagLayout::new(settings.base_path);
        Self {
            source,
            flattener: Flattener::new(layout.clone()),
            writer: BatchWriter::new(store.clone()).with_batch_size(settings.batch_size),
            status: StatusRecorder::new(store, layout),
            success_threshold_percent: settings.success_threshold_percent,
        }
    }

    /// Run one sync. Never fails; returns whether the run succeeded.
    pub async fn run(&self) -> bool {
        let span = info_span!("sync_run", run_id = %Uuid::new_v4());
        self.run_inner().instrument(span).await
    }

    async fn run_inner(&self) -> bool {
        let started = Instant::now();
        let now = Utc::now();
        info!("Start depot tag update");

        let outcome = match self.execute(now).await {
            Ok(report) => {
                self.status.record_success(now).await;
                info!(
                    "Successfully updated charging data ({} tags, {} batches)",
                    report.attempted, report.batches
                );
                "success"
            }
            Err(e @ SyncError::BelowThreshold { .. }) => {
                warn!("Completed with tag write issues: {}", e);
                self.status.record_failure(&e.to_string(), now).await;
                "partial"
            }
            Err(e) => {
                let message = format!("Error updating charging data: {}", e);
                error!("{}", message);
                self.status.record_failure(&message, now).await;
                "failed"
            }
        };

        metrics::counter!("depot_sync_runs_total", "outcome" => outcome).increment(1);
        metrics::histogram!("depot_sync_run_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        outcome == "success"
    }

    async fn execute(&self, now: DateTime<Utc>) -> Result<WriteReport, SyncError> {
        let document = self.source.fetch().await?;
        info!("Found {} depots to process", document.depot_info_list.len());

        let writes = self.flattener.flatten(&document, now);
        let report = self.writer.write_all(&writes).await;

        if !report.meets(self.success_threshold_percent) {
            return Err(SyncError::BelowThreshold {
                good: report.good,
                attempted: report.attempted,
                percent: report.success_percent(),
            });
        }
        Ok(report)
    }
}
