pub mod actions;
pub mod models;

pub use models::draft::{Draft, DraftStatus, NewDraft, DRAFTS_TABLE};
