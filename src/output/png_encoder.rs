//! PNG encoding of gauge bitmaps with the `png` crate.

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Encodes [`Framebuffer`]s as 8-bit RGBA PNG.
#[derive(Debug, Clone, Copy)]
pub struct PngEncoder {
    compression: png::Compression,
}

impl Default for PngEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PngEncoder {
    /// Encoder with default compression.
    #[must_use]
    pub fn new() -> Self {
        Self { compression: png::Compression::Default }
    }

    /// Set the compression level.
    #[must_use]
    pub fn compression(mut self, compression: png::Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Encode `fb` into `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PngEncoding`] if encoding or writing fails.
    pub fn encode<W: Write>(&self, fb: &Framebuffer, writer: W) -> Result<()> {
        let mut encoder = png::Encoder::new(writer, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(self.compression);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(fb.pixels())?;
        writer.finish()?;
        Ok(())
    }

    /// Encode `fb` to an in-memory PNG.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PngEncoding`] if encoding fails.
    pub fn to_bytes(&self, fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.encode(fb, &mut buffer)?;
        Ok(buffer)
    }

    /// Write `fb` to a PNG file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, fb: &Framebuffer, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.encode(fb, BufWriter::new(file))?;
        debug!("wrote {}x{} PNG to {}", fb.width(), fb.height(), path.display());
        Ok(())
    }
}
