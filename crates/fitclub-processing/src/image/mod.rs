//! Image processing module
//!
//! - Stateless transforms (processor)
//! - Geometry helpers (resize)
//! - Text labels and the workout watermark (label, bitmap_font, watermark)

pub mod bitmap_font;
pub mod label;
pub mod processor;
pub mod resize;
pub mod watermark;

pub use processor::ImageProcessor;

// Re-export commonly used types
pub use bitmap_font::BitmapLabelRenderer;
pub use label::{load_label_renderer, FontLabelRenderer, LabelError, LabelRenderer};
pub use resize::Size;
pub use watermark::WatermarkStyle;
