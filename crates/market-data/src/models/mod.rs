//! Market data models
//!
//! - `asset` - Raw asset records as delivered by a source, and the change windows they report

mod asset;

pub use asset::{ChangeWindow, RawAssetRecord};
