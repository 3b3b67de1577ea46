//! Draft actions - save, review, publish and delete article drafts.

mod core;
mod publish;

pub use self::core::{approve_draft, delete_draft, list_drafts, save_draft, SaveDraftInput};
pub use publish::{publish_draft, section_term_id, to_wordpress_html, DEFAULT_CATEGORY_ID};
