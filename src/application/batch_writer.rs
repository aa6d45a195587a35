//! Batch writer
//!
//! Writes the flattened tag list in fixed-size chunks. Bad per-item results
//! trigger a best-effort tag creation; a failing chunk call falls back to
//! writing each item of that chunk on its own. Nothing here aborts the run.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::{TagDefinition, TagStore, TagWrite};

pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_SUCCESS_THRESHOLD_PERCENT: f64 = 80.0;

/// Tally of one `write_all` pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub attempted: usize,
    pub good: usize,
    pub batches: usize,
    /// Chunks that had to be retried item by item
    pub fallback_batches: usize,
    pub create_attempts: usize,
}

impl WriteReport {
    pub fn bad(&self) -> usize {
        self.attempted - self.good
    }

    /// Share of good writes; an empty pass counts as fully successful
    pub fn success_percent(&self) -> f64 {
        if self.attempted == 0 {
            return 100.0;
        }
        self.good as f64 / self.attempted as f64 * 100.0
    }

    pub fn meets(&self, threshold_percent: f64) -> bool {
        self.success_percent() >= threshold_percent
    }
}

pub struct BatchWriter {
    store: Arc<dyn TagStore>,
    batch_size: usize,
}

impl BatchWriter {
    pub fn new(store: Arc<dyn TagStore>) -> Self {
        Self {
            store,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub async fn write_all(&self, writes: &[TagWrite]) -> WriteReport {
        let mut report = WriteReport {
            attempted: writes.len(),
            ..Default::default()
        };

        info!("Writing {} tags in batches of {}", writes.len(), self.batch_size);

        for (index, chunk) in writes.chunks(self.batch_size).enumerate() {
            let batch_no = index + 1;
            report.batches += 1;
            debug!(
                "Writing batch {}: items {}-{} of {}",
                batch_no,
                index * self.batch_size + 1,
                index * self.batch_size + chunk.len(),
                writes.len()
            );

            match self.store.write(chunk).await {
                Ok(qualities) => {
                    if qualities.len() != chunk.len() {
                        warn!(
                            "Batch {}: store returned {} results for {} tags",
                            batch_no,
                            qualities.len(),
                            chunk.len()
                        );
                    }

                    let mut batch_good = 0;
                    for (write, quality) in chunk.iter().zip(&qualities) {
                        if quality.is_good() {
                            batch_good += 1;
                        } else {
                            debug!("Creating missing tag: {} ({:?})", write.path, quality);
                            self.create_tag(write).await;
                            report.create_attempts += 1;
                        }
                    }
                    report.good += batch_good;

                    let batch_bad = chunk.len() - batch_good;
                    metrics::counter!("depot_sync_tag_writes_total", "quality" => "good")
                        .increment(batch_good as u64);
                    metrics::counter!("depot_sync_tag_writes_total", "quality" => "bad")
                        .increment(batch_bad as u64);

                    if batch_bad > 0 {
                        warn!(
                            "Batch {}: {} successful, {} with quality issues",
                            batch_no, batch_good, batch_bad
                        );
                    } else {
                        debug!("Batch {} completed successfully", batch_no);
                    }
                }
                Err(e) => {
                    error!("Error writing batch {}: {}", batch_no, e);
                    report.fallback_batches += 1;
                    metrics::counter!("depot_sync_batch_fallbacks_total").increment(1);
                    report.good += self.write_individually(chunk).await;
                }
            }
        }

        info!(
            "Batch write completed: {}/{} tags written, {} bad ({:.1}%)",
            report.good,
            report.attempted,
            report.bad(),
            report.success_percent()
        );

        report
    }

    /// Best-effort single-item writes; returns the number of good results
    async fn write_individually(&self, chunk: &[TagWrite]) -> usize {
        let mut good = 0;
        for write in chunk {
            match self.store.write(std::slice::from_ref(write)).await {
                Ok(qualities) if qualities.first().is_some_and(|q| q.is_good()) => good += 1,
                Ok(_) => debug!("Individual write returned bad quality: {}", write.path),
                Err(e) => debug!("Failed individual write: {}: {}", write.path, e),
            }
        }
        metrics::counter!("depot_sync_tag_writes_total", "quality" => "good").increment(good as u64);
        metrics::counter!("depot_sync_tag_writes_total", "quality" => "bad")
            .increment((chunk.len() - good) as u64);
        good
    }

    async fn create_tag(&self, write: &TagWrite) {
        create_missing_tag(self.store.as_ref(), write).await;
    }
}

/// Best-effort creation of the tag behind `write`, typed after its value.
/// Existing tags are left alone by the store.
pub(super) async fn create_missing_tag(store: &dyn TagStore, write: &TagWrite) {
    let (parent, name) = write.path.split_parent();
    let definition = TagDefinition {
        name: name.to_string(),
        data_type: write.value.data_type(),
    };

    metrics::counter!("depot_sync_tags_created_total").increment(1);
    match store.configure(&parent, &[definition]).await {
        Ok(()) => debug!("Tag creation attempted: {}", write.path),
        Err(e) => debug!("Tag creation failed for {}: {}", write.path, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TagDataType;
    use crate::test_support::{writes, ScriptedTagStore, WriteScript};

    #[tokio::test]
    async fn test_chunks_of_fifty() {
        let store = Arc::new(ScriptedTagStore::new());
        let writer = BatchWriter::new(store.clone());

        let report = writer.write_all(&writes(120)).await;

        assert_eq!(store.chunk_sizes(), vec![50, 50, 20]);
        assert_eq!(report.batches, 3);
        assert_eq!(report.good, 120);
        assert!(report.meets(DEFAULT_SUCCESS_THRESHOLD_PERCENT));
    }

    #[tokio::test]
    async fn test_order_is_preserved_within_chunks() {
        let store = Arc::new(ScriptedTagStore::new());
        let input = writes(7);
        BatchWriter::new(store.clone())
            .with_batch_size(3)
            .write_all(&input)
            .await;

        let flat: Vec<TagWrite> = store.write_calls().into_iter().flatten().collect();
        assert_eq!(flat, input);
        assert_eq!(store.chunk_sizes(), vec![3, 3, 1]);
    }

    #[tokio::test]
    async fn test_bad_results_trigger_tag_creation() {
        let store = Arc::new(ScriptedTagStore::with_script([WriteScript::BadFirst(10)]));
        let writer = BatchWriter::new(store.clone());

        let report = writer.write_all(&writes(120)).await;

        assert_eq!(report.good, 110);
        assert_eq!(report.create_attempts, 10);
        let configured = store.configured();
        assert_eq!(configured.len(), 10);
        assert_eq!(configured[0].0, "[default]T");
        assert_eq!(configured[0].1.name, "Tag0");
        assert_eq!(configured[0].1.data_type, TagDataType::Int8);
        // 110 / 120 = 91.7%
        assert!(report.meets(DEFAULT_SUCCESS_THRESHOLD_PERCENT));
    }

    #[tokio::test]
    async fn test_creation_failure_does_not_stop_the_run() {
        let store = Arc::new(ScriptedTagStore {
            fail_configure: true,
            ..ScriptedTagStore::with_script([WriteScript::BadFirst(50), WriteScript::BadFirst(5)])
        });
        let report = BatchWriter::new(store.clone()).write_all(&writes(120)).await;

        assert_eq!(store.chunk_sizes(), vec![50, 50, 20]);
        assert_eq!(report.good, 65);
        assert_eq!(report.create_attempts, 55);
        assert!(!report.meets(DEFAULT_SUCCESS_THRESHOLD_PERCENT));
    }

    #[tokio::test]
    async fn test_failed_batch_falls_back_to_single_writes() {
        // chunk 1 call fails, then its 3 single writes: good, call failure, bad
        let store = Arc::new(ScriptedTagStore::with_script([
            WriteScript::Fail,
            WriteScript::AllGood,
            WriteScript::Fail,
            WriteScript::BadFirst(1),
        ]));
        let report = BatchWriter::new(store.clone())
            .with_batch_size(3)
            .write_all(&writes(5))
            .await;

        assert_eq!(store.chunk_sizes(), vec![3, 1, 1, 1, 2]);
        assert_eq!(report.fallback_batches, 1);
        assert_eq!(report.good, 1 + 2);
        // fallback writes do not create tags
        assert_eq!(report.create_attempts, 0);
    }

    #[test]
    fn test_success_percent() {
        let report = WriteReport {
            attempted: 120,
            good: 96,
            ..Default::default()
        };
        assert_eq!(report.success_percent(), 80.0);
        assert!(report.meets(80.0));
        assert_eq!(report.bad(), 24);

        assert!(WriteReport::default().meets(80.0));
    }
}
