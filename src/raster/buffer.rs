use crate::foundation::error::{MorphError, MorphResult};

/// Largest supported channel count (byte-per-channel RGBA).
pub const MAX_CHANNELS: u32 = 4;

/// A single-owner image: `width * height * channels` bytes, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Zero-filled buffer.
    pub fn new(width: u32, height: u32, channels: u32) -> MorphResult<Self> {
        let len = byte_len(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![0u8; len],
        })
    }

    /// Wrap existing bytes; `data.len()` must equal `width * height * channels`.
    pub fn from_vec(width: u32, height: u32, channels: u32, data: Vec<u8>) -> MorphResult<Self> {
        let expected = byte_len(width, height, channels)?;
        if data.len() != expected {
            return Err(MorphError::validation(format!(
                "pixel buffer expects {expected} bytes for {width}x{height}x{channels}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Buffer where every pixel equals `px`; the channel count is `px.len()`.
    pub fn filled(width: u32, height: u32, px: &[u8]) -> MorphResult<Self> {
        let channels = u32::try_from(px.len())
            .map_err(|_| MorphError::validation("pixel has too many channels"))?;
        let len = byte_len(width, height, channels)?;
        let data = if px.is_empty() {
            Vec::new()
        } else {
            px.repeat(len / px.len())
        };
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Zero-filled buffer with the same dimensions as `self`.
    pub fn zeroed_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: vec![0u8; self.data.len()],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per pixel.
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// `(width, height, channels)`.
    pub fn dims(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.channels)
    }

    /// `true` when width, height and channel count all match.
    pub fn same_dims_as(&self, other: &PixelBuffer) -> bool {
        self.dims() == other.dims()
    }

    /// `true` when the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw bytes, mutable.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Give up ownership of the bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Bytes in one row.
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// One row of pixels.
    ///
    /// # Panics
    /// If `row >= height`.
    pub fn row(&self, row: u32) -> &[u8] {
        let start = row as usize * self.row_len();
        &self.data[start..start + self.row_len()]
    }

    /// The channels of pixel `(row, col)`.
    ///
    /// # Panics
    /// If the pixel lies outside the buffer.
    pub fn pixel(&self, row: u32, col: u32) -> &[u8] {
        let idx = self.pixel_offset(row, col);
        &self.data[idx..idx + self.channels as usize]
    }

    /// The channels of pixel `(row, col)`, mutable.
    ///
    /// # Panics
    /// If the pixel lies outside the buffer.
    pub fn pixel_mut(&mut self, row: u32, col: u32) -> &mut [u8] {
        let idx = self.pixel_offset(row, col);
        let n = self.channels as usize;
        &mut self.data[idx..idx + n]
    }

    fn pixel_offset(&self, row: u32, col: u32) -> usize {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) outside {}x{} buffer",
            self.width,
            self.height
        );
        (row as usize * self.width as usize + col as usize) * self.channels as usize
    }
}

pub(crate) fn ensure_same_dims(a: &PixelBuffer, b: &PixelBuffer) -> MorphResult<()> {
    if a.same_dims_as(b) {
        Ok(())
    } else {
        Err(MorphError::DimensionMismatch {
            left: a.dims(),
            right: b.dims(),
        })
    }
}

fn byte_len(width: u32, height: u32, channels: u32) -> MorphResult<usize> {
    if channels > MAX_CHANNELS {
        return Err(MorphError::validation(format!(
            "pixel buffer supports at most {MAX_CHANNELS} channels, got {channels}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels as usize))
        .ok_or_else(|| MorphError::validation("pixel buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
