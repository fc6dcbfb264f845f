//! Decoded RGBA raster input.

use crate::error::{HeightfieldError, HeightfieldResult};

/// Rec. 709 luma weights for R, G, B.
const LUMA_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// An immutable decoded image: `width * height` RGBA8 pixels, row-major,
/// top row first.
///
/// Decoding file formats is left to the caller (or the `image` feature);
/// this type only holds the result.
///
/// # Example
///
/// ```
/// use mesh_heightfield::RasterImage;
///
/// let img = RasterImage::new(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255])?;
/// assert_eq!(img.luminance(0, 0), 0.0);
/// assert!((img.luminance(1, 0) - 255.0).abs() < 1e-9);
/// # Ok::<(), mesh_heightfield::HeightfieldError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Wrap an RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// Returns [`HeightfieldError::EmptyImage`] for a zero dimension and
    /// [`HeightfieldError::PixelBufferMismatch`] when the buffer length is
    /// not `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> HeightfieldResult<Self> {
        if width == 0 || height == 0 {
            return Err(HeightfieldError::EmptyImage { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(HeightfieldError::PixelBufferMismatch {
                expected,
                got: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    ///
    /// # Errors
    ///
    /// Returns [`HeightfieldError::EmptyImage`] for a zero dimension.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> [u8; 4],
    ) -> HeightfieldResult<Self> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    /// Decode PNG or JPEG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`HeightfieldError::Decode`] if the bytes are not a supported
    /// image, or [`HeightfieldError::EmptyImage`] for a zero-sized one.
    #[cfg(feature = "image")]
    pub fn decode(bytes: &[u8]) -> HeightfieldResult<Self> {
        let decoded = image::load_from_memory(bytes)?;
        Self::try_from(decoded.to_rgba8())
    }

    /// Image width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA value at `(x, y)`. Coordinates are clamped to the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let i = (y * self.width as usize + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Luminance at `(x, y)` on a 0..=255 scale. Alpha is ignored.
    #[must_use]
    pub fn luminance(&self, x: u32, y: u32) -> f64 {
        let [r, g, b, _] = self.pixel(x, y);
        LUMA_WEIGHTS[0].mul_add(
            f64::from(r),
            LUMA_WEIGHTS[1].mul_add(f64::from(g), LUMA_WEIGHTS[2] * f64::from(b)),
        )
    }
}

#[cfg(feature = "image")]
impl TryFrom<image::RgbaImage> for RasterImage {
    type Error = HeightfieldError;

    fn try_from(img: image::RgbaImage) -> HeightfieldResult<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }
}
