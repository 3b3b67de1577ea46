// Business domains
pub mod articles;
pub mod dashboard;
pub mod drafts;
pub mod notifications;
pub mod press_releases;
pub mod stories;
pub mod wordpress;
