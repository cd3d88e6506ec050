//! Procedural height texture for the grid demo.

use crate::error::PipelineError;

/// Side length of the generated texture.
pub const HEIGHTFIELD_SIZE: u32 = 256;

/// A square single-channel texture of 8-bit heights, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightfield {
    size: u32,
    texels: Vec<u8>,
}

impl Heightfield {
    /// The "mexican hat" ripple: `(1 - d²)·exp(-d²/2)` with `d = 4·|(x, y)|`,
    /// mapped from `[-1, 1]` to `[1, 255]`.
    ///
    /// `size` must be at least 2 so the centre is off the first texel.
    pub fn ripple(size: u32) -> Result<Self, PipelineError> {
        if size < 2 {
            return Err(PipelineError::InvalidHeightfield(size));
        }
        Ok(Self::generate(size))
    }

    fn generate(size: u32) -> Self {
        let half = (size / 2) as f32;
        let mut texels = Vec::with_capacity(size as usize * size as usize);
        for row in 0..size {
            for col in 0..size {
                let x = (col as f32 - half) / half;
                let y = (row as f32 - half) / half;
                let d = x.hypot(y) * 4.0;
                let z = (1.0 - d * d) * (d * d / -2.0).exp();
                texels.push((z * 127.0 + 128.0).round().clamp(0.0, 255.0) as u8);
            }
        }
        Self { size, texels }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn texels(&self) -> &[u8] {
        &self.texels
    }

    /// Height at `(row, col)`, or `None` outside the texture.
    pub fn texel(&self, row: u32, col: u32) -> Option<u8> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.texels.get((row * self.size + col) as usize).copied()
    }
}

impl Default for Heightfield {
    fn default() -> Self {
        Self::generate(HEIGHTFIELD_SIZE)
    }
}
