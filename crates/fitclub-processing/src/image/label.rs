//! Text labels drawn onto images
//!
//! Rendering text depends on fonts installed on the host, so transforms
//! receive a [`LabelRenderer`] instead of loading fonts themselves.

use crate::image::bitmap_font::BitmapLabelRenderer;
use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("No usable font found (tried: {0})")]
    FontUnavailable(String),

    #[error("Failed to render label: {0}")]
    Render(String),
}

/// Measures and draws single-line text labels
pub trait LabelRenderer: Send + Sync {
    /// Pixel extent `(width, height)` of `text`
    fn measure(&self, text: &str) -> Result<(u32, u32), LabelError>;

    /// Draw `text` with its top-left corner at `(x, y)`.
    ///
    /// Pixels are written with `color` as-is (including its alpha), so
    /// callers that want translucency draw onto a separate layer and
    /// composite it.
    fn draw(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x: i32,
        y: i32,
        color: Rgba<u8>,
    ) -> Result<(), LabelError>;
}

/// TrueType/OpenType renderer backed by `ab_glyph`
pub struct FontLabelRenderer {
    font: FontVec,
    scale: PxScale,
    source: PathBuf,
}

impl FontLabelRenderer {
    /// Load a font file at the given pixel height
    pub fn from_file(path: impl AsRef<Path>, px: f32) -> Result<Self, LabelError> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| LabelError::FontUnavailable(format!("{}: {}", path.display(), e)))?;
        let font = FontVec::try_from_vec(data)
            .map_err(|e| LabelError::FontUnavailable(format!("{}: {}", path.display(), e)))?;

        Ok(Self {
            font,
            scale: PxScale::from(px),
            source: path.to_path_buf(),
        })
    }

    /// First candidate that loads wins
    pub fn from_candidates<P: AsRef<Path>>(candidates: &[P], px: f32) -> Result<Self, LabelError> {
        let mut tried = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            match Self::from_file(candidate, px) {
                Ok(renderer) => return Ok(renderer),
                Err(e) => {
                    tracing::debug!(error = %e, "Font candidate rejected");
                    tried.push(candidate.as_ref().display().to_string());
                }
            }
        }

        Err(LabelError::FontUnavailable(if tried.is_empty() {
            "no candidates".to_string()
        } else {
            tried.join(", ")
        }))
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl LabelRenderer for FontLabelRenderer {
    fn measure(&self, text: &str) -> Result<(u32, u32), LabelError> {
        Ok(text_size(self.scale, &self.font, text))
    }

    fn draw(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x: i32,
        y: i32,
        color: Rgba<u8>,
    ) -> Result<(), LabelError> {
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, text);
        Ok(())
    }
}

/// Pick a label renderer for this host.
///
/// Tries each font path in order and falls back to the built-in bitmap font
/// when none can be loaded.
pub fn load_label_renderer<P: AsRef<Path>>(font_paths: &[P], px: f32) -> Arc<dyn LabelRenderer> {
    match FontLabelRenderer::from_candidates(font_paths, px) {
        Ok(renderer) => {
            tracing::info!(font = %renderer.source().display(), px = px, "Using font label renderer");
            Arc::new(renderer)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Falling back to bitmap label renderer");
            Arc::new(BitmapLabelRenderer::new(px))
        }
    }
}
