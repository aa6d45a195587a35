//! Application layer - the sync pipeline
//!
//! - **flatten**: depot document → ordered tag writes with summaries
//! - **batch_writer**: chunked writes with tag auto-creation and fallback
//! - **status**: run bookkeeping tags
//! - **sync**: one complete run
//! - **poller**: repeated runs until shutdown

pub mod batch_writer;
pub mod flatten;
pub mod layout;
pub mod poller;
pub mod status;
pub mod summary;
pub mod sync;

// Re-export key types for convenience
pub use batch_writer::{BatchWriter, WriteReport};
pub use flatten::Flattener;
pub use layout::TagLayout;
pub use poller::{PollStats, Poller};
pub use status::StatusRecorder;
pub use summary::{DepotSummary, StationSummary};
pub use sync::{SyncService, SyncSettings};
