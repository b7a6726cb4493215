use std::cell::Cell;
use std::num::NonZeroU64;
use std::path::Path;

use thiserror::Error;

/// Texture load failures, carrying the underlying decoder cause.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("load failed: {path}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("unsupported channel count {components} in {path}")]
    UnsupportedFormat { path: String, components: u8 },
}

/// Decoded image owned by the scene, plus a lazily resolved backend handle.
///
/// The backend handle starts unset and is populated by a renderer the first
/// time the texture is used ([`set_backend_handle`](Texture::set_backend_handle));
/// it is resolved at most once per texture and reused afterwards.
#[derive(Debug)]
pub struct Texture {
    data: Vec<u8>,
    width: u32,
    height: u32,
    components: u8,
    backend_handle: Cell<Option<NonZeroU64>>,
}

impl Texture {
    /// Wraps already-decoded pixel data.
    ///
    /// `data.len()` must equal `width * height * components`, and
    /// `components` must be 1–4.
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32, components: u8) -> Texture {
        debug_assert!((1..=4).contains(&components));
        debug_assert_eq!(data.len() as u64, width as u64 * height as u64 * components as u64);
        Texture {
            data,
            width,
            height,
            components,
            backend_handle: Cell::new(None),
        }
    }

    /// Decodes an image file, keeping its native channel count (1–4).
    ///
    /// 16-bit-per-channel sources are converted down to 8 bits.
    pub fn load(path: &Path) -> Result<Texture, TextureError> {
        let img = image::open(path).map_err(|source| TextureError::Load {
            path: path.display().to_string(),
            source,
        })?;

        let components = img.color().channel_count();
        let (data, components) = match components {
            1 => (img.to_luma8().into_raw(), 1),
            2 => (img.to_luma_alpha8().into_raw(), 2),
            3 => (img.to_rgb8().into_raw(), 3),
            4 => (img.to_rgba8().into_raw(), 4),
            other => {
                return Err(TextureError::UnsupportedFormat {
                    path: path.display().to_string(),
                    components: other,
                });
            }
        };

        use image::GenericImageView;
        let (width, height) = img.dimensions();

        Ok(Texture::from_raw(data, width, height, components))
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel count, 1–4. Four channels means the image carries alpha.
    #[inline]
    pub fn components(&self) -> u8 {
        self.components
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.components == 4
    }

    /// The backend's identifier for this texture, if already resolved.
    #[inline]
    pub fn backend_handle(&self) -> Option<NonZeroU64> {
        self.backend_handle.get()
    }

    /// Records the backend identifier after upload. Callable once.
    #[inline]
    pub fn set_backend_handle(&self, handle: NonZeroU64) {
        debug_assert!(self.backend_handle.get().is_none(), "texture resolved twice");
        self.backend_handle.set(Some(handle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_texture_reports_alpha() {
        let rgba = Texture::from_raw(vec![0; 16], 2, 2, 4);
        assert!(rgba.has_alpha());
        let rgb = Texture::from_raw(vec![0; 12], 2, 2, 3);
        assert!(!rgb.has_alpha());
    }

    #[test]
    fn backend_handle_starts_unset() {
        let tex = Texture::from_raw(vec![0; 4], 1, 1, 4);
        assert!(tex.backend_handle().is_none());
        tex.set_backend_handle(NonZeroU64::new(7).unwrap());
        assert_eq!(tex.backend_handle().map(|h| h.get()), Some(7));
    }

    #[test]
    fn load_missing_file_reports_cause() {
        let err = Texture::load(Path::new("/nonexistent/vellum-test.png")).unwrap_err();
        assert!(matches!(err, TextureError::Load { .. }));
        assert!(err.to_string().contains("vellum-test.png"));
    }

    #[test]
    fn load_round_trips_rgba_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        let img = image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 128]));
        img.save(&path).unwrap();

        let tex = Texture::load(&path).unwrap();
        assert_eq!(tex.width(), 2);
        assert_eq!(tex.height(), 3);
        assert_eq!(tex.components(), 4);
        assert_eq!(tex.data().len(), 2 * 3 * 4);
        assert_eq!(&tex.data()[..4], &[10, 20, 30, 128]);
    }

    #[test]
    fn load_keeps_rgb_as_three_channels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opaque.png");
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([1, 2, 3]));
        img.save(&path).unwrap();

        let tex = Texture::load(&path).unwrap();
        assert_eq!(tex.components(), 3);
        assert!(!tex.has_alpha());
    }
}
