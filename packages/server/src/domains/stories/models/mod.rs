pub mod story;

pub use story::{NewStory, Story, StoryStatus, STORIES_TABLE};
