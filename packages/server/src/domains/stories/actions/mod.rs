//! Story actions - entry-point functions called from the HTTP routes and the
//! scheduler.

mod review;
mod sync;

pub use review::{approve_story, list_stories, reject_story};
pub use sync::{sync_feedly, SyncReport, FEED_BATCH_SIZE};
