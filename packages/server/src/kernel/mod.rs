//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;

pub use deps::{
    CloudinaryAssetHost, FeedlyFeedSource, NoopNotifier, ServerDeps, SupabaseStore,
    TelegramNotifier, Unconfigured, WordPressAdapter,
};
pub use test_dependencies::TestDependencies;
pub use traits::*;
