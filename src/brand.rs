//! Brand mark loading with an explicit fallback result.
//!
//! The brand image is an optional asset: a load failure must never abort
//! document generation.  Resolution therefore returns a tagged
//! [`BrandMark`] instead of a `Result`, and the renderer picks the header
//! content from it.

use std::path::PathBuf;

use log::warn;

/// Where the brand image comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum BrandSource {
    /// Raw encoded image bytes (PNG or JPEG).
    Bytes(Vec<u8>),
    /// An image file on disk.
    Path(PathBuf),
}

impl BrandSource {
    /// Attempts to decode the image, degrading to
    /// [`BrandMark::Unavailable`] on any failure.
    pub fn resolve(&self) -> BrandMark {
        let decoded = match self {
            BrandSource::Bytes(bytes) => image::load_from_memory(bytes)
                .map_err(|err| format!("failed to decode brand mark bytes: {err}")),
            BrandSource::Path(path) => image::open(path)
                .map_err(|err| format!("failed to load brand mark {}: {err}", path.display())),
        };

        match decoded {
            Ok(image) => BrandMark::Loaded(image),
            Err(message) => {
                warn!("{message}; substituting text mark");
                BrandMark::Unavailable
            }
        }
    }
}

/// Outcome of resolving the brand image.
pub enum BrandMark {
    /// The decoded brand image, ready for the header region.
    Loaded(image::DynamicImage),
    /// The image could not be loaded; the header prints a text mark instead.
    Unavailable,
}

/// Branding configuration for a generation call.
#[derive(Clone, Debug)]
pub struct Branding {
    mark: Option<BrandSource>,
}

impl Branding {
    /// Branding with an explicit brand mark source.
    pub fn with_mark(source: BrandSource) -> Self {
        Self { mark: Some(source) }
    }

    /// Branding without any brand mark; the header always uses the text
    /// fallback.
    pub fn none() -> Self {
        Self { mark: None }
    }

    /// Resolves the configured source, if any.
    pub fn resolve(&self) -> BrandMark {
        match &self.mark {
            Some(source) => source.resolve(),
            None => BrandMark::Unavailable,
        }
    }
}

impl Default for Branding {
    /// Looks for `assets/logo.png` next to the crate manifest.
    fn default() -> Self {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/logo.png");
        Self::with_mark(BrandSource::Path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_degrades_to_unavailable() {
        let source = BrandSource::Path(PathBuf::from("does/not/exist.png"));
        assert!(matches!(source.resolve(), BrandMark::Unavailable));
    }

    #[test]
    fn undecodable_bytes_degrade_to_unavailable() {
        let source = BrandSource::Bytes(vec![0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(source.resolve(), BrandMark::Unavailable));
    }

    #[test]
    fn valid_png_bytes_resolve_to_loaded() {
        let mut bytes = std::io::Cursor::new(Vec::new());
        let pixels = image::ImageBuffer::from_pixel(4, 4, image::Rgb([26u8, 35, 126]));
        image::DynamicImage::ImageRgb8(pixels)
            .write_to(&mut bytes, image::ImageOutputFormat::Png)
            .unwrap();

        let source = BrandSource::Bytes(bytes.into_inner());
        assert!(matches!(source.resolve(), BrandMark::Loaded(_)));
    }

    #[test]
    fn no_mark_is_always_unavailable() {
        assert!(matches!(Branding::none().resolve(), BrandMark::Unavailable));
    }
}
