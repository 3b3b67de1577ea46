pub mod actions;
pub mod models;

pub use models::article::{NewWordPressArticle, WordPressArticle, WORDPRESS_ARTICLES_TABLE};
