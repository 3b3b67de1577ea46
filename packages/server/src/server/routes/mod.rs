// HTTP routes
pub mod dashboard;
pub mod drafts;
pub mod feedly;
pub mod gateway;
pub mod generators;
pub mod health;
pub mod press_releases;
pub mod stories;
pub mod supabase_proxy;
pub mod wordpress;

pub use dashboard::*;
pub use drafts::*;
pub use feedly::*;
pub use gateway::*;
pub use generators::*;
pub use health::*;
pub use press_releases::*;
pub use stories::*;
pub use supabase_proxy::*;
pub use wordpress::*;
