//! Image descriptor produced by validation

use serde::{Deserialize, Serialize};

/// Format, pixel dimensions and byte size of an accepted upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub size_bytes: u64,
}
