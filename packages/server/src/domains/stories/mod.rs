pub mod actions;
pub mod classify;
pub mod models;

pub use models::story::{NewStory, Story, StoryStatus, STORIES_TABLE};
