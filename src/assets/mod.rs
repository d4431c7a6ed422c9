pub mod asset_copier;

pub use asset_copier::{copy_folder, copy_folder_with_progress, copy_tree, AssetCopier, AssetOutcome};
