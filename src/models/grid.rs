/// Row-major 8-bit pixel grid with an arbitrary number of interleaved channels
///
/// Intensity and binary grids use one channel; histogram charts use three (RGB).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl Grid {
    /// Create a zero-filled grid with given dimensions
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self::filled(width, height, channels, 0)
    }

    /// Create a grid with every sample set to `value`
    pub fn filled(width: usize, height: usize, channels: usize, value: u8) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![value; width * height * channels],
        }
    }

    /// Wrap raw interleaved samples. Returns `None` if the buffer length
    /// doesn't match `width * height * channels`.
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height * channels {
            return None;
        }
        Some(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Get grid width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get grid height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Samples per pixel
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// True when the grid has no pixels
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the first channel at (x, y), 0 when out of bounds
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.index(x, y).map_or(0, |i| self.data[i])
    }

    /// All samples of the pixel at (x, y)
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        let start = self.index(x, y)?;
        Some(&self.data[start..start + self.channels])
    }

    /// Overwrite all samples of the pixel at (x, y)
    pub fn put_pixel(&mut self, x: usize, y: usize, value: &[u8]) {
        if value.len() != self.channels {
            return;
        }
        if let Some(start) = self.index(x, y) {
            self.data[start..start + self.channels].copy_from_slice(value);
        }
    }

    /// Get raw data as bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the grid and return its samples
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) * self.channels)
    }
}
