//! In-memory bitmaps decoded from uploaded image bytes

use std::fmt;
use std::io::Cursor;

use ::image::{DynamicImage, ImageDecoder, ImageReader, Limits};
use serde::Serialize;

use crate::domain::DomainError;

/// Interleaved channel order of a decoded bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    Bgr,
    Rgb,
}

/// An 8-bit, three channel bitmap owned by a single request
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    channel_order: ChannelOrder,
    pixels: Vec<u8>,
}

/// Largest bitmap an upload may decode to
pub const MAX_PIXELS: u64 = 25_000_000;

impl DecodedImage {
    /// Decode compressed image bytes (PNG, JPEG, BMP, WebP) into a BGR bitmap
    pub fn decode(bytes: &[u8]) -> Result<Self, DomainError> {
        Self::decode_with_limit(bytes, MAX_PIXELS)
    }

    /// Decode, refusing images whose header declares more than `max_pixels`
    pub fn decode_with_limit(bytes: &[u8], max_pixels: u64) -> Result<Self, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::decode("image is empty"));
        }

        let mut limits = Limits::default();
        limits.max_alloc = Some(MAX_PIXELS * 4);

        let mut reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| DomainError::decode(e.to_string()))?;
        reader.limits(limits);

        let decoder = reader
            .into_decoder()
            .map_err(|e| DomainError::decode(e.to_string()))?;

        let (width, height) = decoder.dimensions();
        if u64::from(width) * u64::from(height) > max_pixels {
            return Err(DomainError::decode(format!(
                "{}x{} image exceeds the {} pixel limit",
                width, height, max_pixels
            )));
        }

        let rgb = DynamicImage::from_decoder(decoder)
            .map_err(|e| DomainError::decode(e.to_string()))?
            .to_rgb8();

        let (width, height) = rgb.dimensions();
        let image = Self {
            width,
            height,
            channel_order: ChannelOrder::Rgb,
            pixels: rgb.into_raw(),
        };

        Ok(image.into_bgr())
    }

    /// Build a bitmap from raw interleaved pixels
    pub fn from_raw(
        width: u32,
        height: u32,
        channel_order: ChannelOrder,
        pixels: Vec<u8>,
    ) -> Result<Self, DomainError> {
        let expected = width as usize * height as usize * 3;

        if pixels.len() != expected {
            return Err(DomainError::decode(format!(
                "expected {} bytes for a {}x{} bitmap, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            channel_order,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Convert to RGB channel order (no-op when already RGB)
    pub fn into_rgb(self) -> Self {
        self.into_order(ChannelOrder::Rgb)
    }

    /// Convert to BGR channel order (no-op when already BGR)
    pub fn into_bgr(self) -> Self {
        self.into_order(ChannelOrder::Bgr)
    }

    fn into_order(mut self, order: ChannelOrder) -> Self {
        if self.channel_order != order {
            for pixel in self.pixels.chunks_exact_mut(3) {
                pixel.swap(0, 2);
            }
            self.channel_order = order;
        }
        self
    }
}

impl fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channel_order", &self.channel_order)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png_to_bgr() {
        let bytes = fixtures::png_bytes(2, 3, [10, 20, 30]);
        let image = DecodedImage::decode(&bytes).unwrap();

        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 3);
        assert_eq!(image.channel_order(), ChannelOrder::Bgr);
        assert_eq!(image.pixels().len(), 2 * 3 * 3);
        assert_eq!(&image.pixels()[..3], &[30, 20, 10]);
    }

    #[test]
    fn test_into_rgb_swaps_channels() {
        let bytes = fixtures::png_bytes(1, 1, [1, 2, 3]);
        let image = DecodedImage::decode(&bytes).unwrap().into_rgb();

        assert_eq!(image.channel_order(), ChannelOrder::Rgb);
        assert_eq!(image.pixels(), &[1, 2, 3]);
    }

    #[test]
    fn test_into_same_order_is_noop() {
        let image = DecodedImage::from_raw(1, 1, ChannelOrder::Rgb, vec![1, 2, 3]).unwrap();
        let image = image.into_rgb();
        assert_eq!(image.pixels(), &[1, 2, 3]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = DecodedImage::decode(b"definitely not an image");
        assert!(matches!(result, Err(DomainError::Decode { .. })));
    }

    #[test]
    fn test_decode_rejects_oversized_bitmap() {
        let bytes = fixtures::png_bytes(10, 10, [0, 0, 0]);

        let err = DecodedImage::decode_with_limit(&bytes, 99).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Image decode error: 10x10 image exceeds the 99 pixel limit"
        );
        assert!(DecodedImage::decode_with_limit(&bytes, 100).is_ok());
    }

    #[test]
    fn test_decode_empty_fails() {
        assert!(DecodedImage::decode(&[]).is_err());
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(DecodedImage::from_raw(2, 2, ChannelOrder::Bgr, vec![0; 11]).is_err());
        assert!(DecodedImage::from_raw(2, 2, ChannelOrder::Bgr, vec![0; 12]).is_ok());
    }

    #[test]
    fn test_debug_omits_pixels() {
        let image = DecodedImage::from_raw(1, 1, ChannelOrder::Bgr, vec![0; 3]).unwrap();
        let debug = format!("{:?}", image);
        assert!(debug.contains("bytes: 3"));
    }
}
