pub mod actions;
pub mod models;

pub use models::press_release::{
    Attachment, ExternalLinks, PressRelease, PressReleaseStatus, PRESS_RELEASES_TABLE,
};
