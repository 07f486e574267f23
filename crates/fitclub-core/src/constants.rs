//! Defaults shared by configuration and the processing crate.

/// Maximum accepted upload size in megabytes.
pub const MAX_IMAGE_SIZE_MB: usize = 10;

/// Maximum accepted width or height in pixels.
pub const MAX_IMAGE_DIMENSION: u32 = 4000;

/// Label stamped on workout photos.
pub const WATERMARK_TEXT: &str = "FitFriendsClub";

/// Base directory used by the local storage backend.
pub const DEFAULT_STORAGE_PATH: &str = "uploads";

/// Font files tried, in order, before falling back to the built-in glyphs.
pub const DEFAULT_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];
