pub mod payload;
pub mod text;

pub use payload::*;
pub use text::*;
