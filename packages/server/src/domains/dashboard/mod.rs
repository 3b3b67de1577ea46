pub mod actions;

pub use actions::{load_counters, upload_asset, AssetUpload, Counters, UploadedAsset};
