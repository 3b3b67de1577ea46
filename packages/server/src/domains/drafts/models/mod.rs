pub mod draft;

pub use draft::{Draft, DraftStatus, NewDraft, DRAFTS_TABLE};
