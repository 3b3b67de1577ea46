// HTTP middleware and request extractors
pub mod editor;
pub mod signed_body;

pub use editor::*;
pub use signed_body::*;
