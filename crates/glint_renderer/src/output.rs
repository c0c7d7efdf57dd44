//! Rendered pixel storage and image file output.
//!
//! The buffer is addressed in sampling order: row 0 is the bottom of the
//! image (camera `t = 0`). Every writer flips rows so files start at the top.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ::image::{ImageFormat, Rgb, RgbImage};

use crate::{ConfigError, OutputError, RenderError};

/// Bytes per pixel (8-bit RGB).
pub const CHANNELS: usize = 3;

/// 8-bit RGB pixels, rows stored bottom-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zeroed buffer, reporting allocation failure instead of aborting.
    pub fn try_new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyImage { width, height }.into());
        }

        let bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(RenderError::Allocation { bytes: usize::MAX })?;

        let mut data = Vec::new();
        data.try_reserve_exact(bytes)
            .map_err(|_| RenderError::Allocation { bytes })?;
        data.resize(bytes, 0);

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes in one row.
    pub fn row_stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Raw bytes in storage order (bottom row first).
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Pixel at column `x` of storage row `row` (0 = bottom).
    pub fn pixel(&self, x: u32, row: u32) -> [u8; 3] {
        let idx = row as usize * self.row_stride() + x as usize * CHANNELS;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Rows in display order, top of the image first.
    pub fn rows_top_down(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.row_stride()).rev()
    }

    /// Mean channel value over the whole buffer, in [0, 255].
    pub fn mean(&self) -> f64 {
        let sum: u64 = self.data.iter().map(|&b| u64::from(b)).sum();
        sum as f64 / self.data.len() as f64
    }

    /// Convert to an `image` buffer in display orientation.
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut img = RgbImage::new(self.width, self.height);
        for (y, row) in self.rows_top_down().enumerate() {
            for (x, px) in row.chunks_exact(CHANNELS).enumerate() {
                img.put_pixel(x as u32, y as u32, Rgb([px[0], px[1], px[2]]));
            }
        }
        img
    }

    pub fn write_ppm<W: Write>(&self, out: W) -> Result<(), OutputError> {
        write_ppm(self, out)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        self.to_rgb_image()
            .save_with_format(path.as_ref(), ImageFormat::Png)?;
        Ok(())
    }

    /// Save to `path`, choosing the format from the extension (`ppm` or `png`).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "ppm" => {
                let file = File::create(path)?;
                self.write_ppm(BufWriter::new(file))
            }
            "png" => self.save_png(path),
            _ => Err(OutputError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Serialize as ASCII PPM (P3): header, then one `R G B` line per pixel,
/// top row first.
pub fn write_ppm<W: Write>(buffer: &PixelBuffer, mut out: W) -> Result<(), OutputError> {
    write!(out, "P3\n{} {}\n255\n", buffer.width, buffer.height)?;
    for row in buffer.rows_top_down() {
        for px in row.chunks_exact(CHANNELS) {
            writeln!(out, "{} {} {}", px[0], px[1], px[2])?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 buffer: bottom row red/green, top row blue/white.
    fn two_by_two() -> PixelBuffer {
        let mut buf = PixelBuffer::try_new(2, 2).unwrap();
        buf.as_bytes_mut()
            .copy_from_slice(&[255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255]);
        buf
    }

    #[test]
    fn test_new_buffer_is_black() {
        let buf = PixelBuffer::try_new(4, 3).unwrap();
        assert_eq!(buf.as_bytes().len(), 4 * 3 * 3);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(buf.row_stride(), 12);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            PixelBuffer::try_new(0, 10),
            Err(RenderError::Config(ConfigError::EmptyImage { width: 0, height: 10 }))
        ));
    }

    #[test]
    fn test_oversized_buffer_reports_allocation_failure() {
        // Fits in usize on 64-bit, but no allocator will grant it
        let result = PixelBuffer::try_new(u32::MAX, u32::MAX);
        assert!(matches!(result, Err(RenderError::Allocation { .. })));
    }

    #[test]
    fn test_ppm_header_and_row_flip() {
        let mut out = Vec::new();
        write_ppm(&two_by_two(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "P3\n2 2\n255\n0 0 255\n255 255 255\n255 0 0\n0 255 0\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_rgb_image_is_flipped() {
        let img = two_by_two().to_rgb_image();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 255]));
        assert_eq!(img.get_pixel(0, 1), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_pixel_accessor_uses_storage_rows() {
        let buf = two_by_two();
        assert_eq!(buf.pixel(1, 0), [0, 255, 0]);
        assert_eq!(buf.pixel(1, 1), [255, 255, 255]);
    }

    #[test]
    fn test_save_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let buf = two_by_two();

        let ppm = dir.path().join("out.ppm");
        buf.save(&ppm).unwrap();
        let text = std::fs::read_to_string(&ppm).unwrap();
        assert!(text.starts_with("P3\n2 2\n255\n"));

        let png = dir.path().join("out.PNG");
        buf.save(&png).unwrap();
        let decoded = ::image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded, buf.to_rgb_image());

        let err = buf.save(dir.path().join("out.bmp")).unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedFormat(_)));
    }
}
