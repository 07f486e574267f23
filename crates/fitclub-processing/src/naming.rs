//! Storage filenames for processed images.
//!
//! Format: `{kind}_{owner}_{YYYYmmddHHMMSS}_{hash8}.jpg`, where `hash8` is the
//! first 8 hex characters of SHA-256 over `"{owner}_{timestamp}"`. Two calls
//! with the same owner in the same UTC second produce the same name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{self, Display};
use std::str::FromStr;

/// What a processed image is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Profile,
    Thumbnail,
    Workout,
    Progress,
}

impl ImageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageKind::Profile => "profile",
            ImageKind::Thumbnail => "thumbnail",
            ImageKind::Workout => "workout",
            ImageKind::Progress => "progress",
        }
    }

    /// Default storage directory for this kind
    pub fn directory(self) -> &'static str {
        match self {
            ImageKind::Profile => "profiles",
            ImageKind::Thumbnail => "thumbnails",
            ImageKind::Workout => "workouts",
            ImageKind::Progress => "progress",
        }
    }
}

impl Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "profile" => Ok(ImageKind::Profile),
            "thumbnail" => Ok(ImageKind::Thumbnail),
            "workout" => Ok(ImageKind::Workout),
            "progress" => Ok(ImageKind::Progress),
            _ => Err(anyhow::anyhow!("Invalid image kind: {}", s)),
        }
    }
}

/// Generate a filename for `owner_id` using the current UTC time
pub fn generate_filename(owner_id: impl Display, kind: ImageKind) -> String {
    generate_filename_at(owner_id, kind, Utc::now())
}

/// Generate a filename for `owner_id` at a fixed instant
pub fn generate_filename_at(owner_id: impl Display, kind: ImageKind, at: DateTime<Utc>) -> String {
    let timestamp = at.format("%Y%m%d%H%M%S").to_string();
    let digest = Sha256::digest(format!("{}_{}", owner_id, timestamp).as_bytes());
    let short_hash = &hex::encode(digest)[..8];

    format!("{}_{}_{}_{}.jpg", kind, owner_id, timestamp, short_hash)
}
