pub mod press_release;

pub use press_release::*;
