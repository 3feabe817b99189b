pub mod walk;
#[cfg(test)]
mod tests;

pub use walk::{Walker, DIRECTIONS};

use crate::color;
use crate::generator::BoundedGenerator;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Where a [`FieldBuffer`] is in its lifecycle. Stages only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStage {
    /// Allocated and zeroed.
    Empty,
    /// Holds visit counts.
    Walked,
    /// Holds packed pixels.
    Colorized,
}

impl fmt::Display for FieldStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldStage::Empty => "empty",
            FieldStage::Walked => "walked",
            FieldStage::Colorized => "colorized",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    InvalidDimensions { width: usize, height: usize },
    TooManyCells { max: usize, actual: usize },
    OutOfOrder { expected: FieldStage, actual: FieldStage },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidDimensions { width, height } => {
                write!(f, "field dimensions must be positive (got {width}x{height})")
            }
            FieldError::TooManyCells { max, actual } => {
                write!(f, "field cell count ({actual}) exceeds supported maximum ({max})")
            }
            FieldError::OutOfOrder { expected, actual } => write!(
                f,
                "field buffer is {actual}, operation requires it to be {expected}"
            ),
        }
    }
}

impl Error for FieldError {}

/// Row-major packed `0x00RRGGBB` pixels, ready for a rendering surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl PixelGrid {
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    /// Unpacked `[r, g, b]` bytes in row-major order.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&p| color::unpack_rgb(p))
            .collect()
    }
}

/// Visit-count summary taken between walking and colorizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitSummary {
    pub total_visits: u64,
    pub max_visits: u32,
    pub unvisited_cells: usize,
    /// Cells at or beyond the colorizer's clamp.
    pub saturated_cells: usize,
}

/// Owned `width × height` grid that first holds visit counts and is then
/// overwritten in place with pixels.
#[derive(Clone, Debug)]
pub struct FieldBuffer {
    width: usize,
    height: usize,
    cells: Vec<u32>,
    stage: FieldStage,
}

impl FieldBuffer {
    pub const MAX_CELLS: usize = 1 << 26;

    pub fn try_new(width: usize, height: usize) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions { width, height });
        }
        let cell_count = width
            .checked_mul(height)
            .ok_or(FieldError::TooManyCells {
                max: Self::MAX_CELLS,
                actual: usize::MAX,
            })?;
        if cell_count > Self::MAX_CELLS {
            return Err(FieldError::TooManyCells {
                max: Self::MAX_CELLS,
                actual: cell_count,
            });
        }
        Ok(Self {
            width,
            height,
            cells: vec![0; cell_count],
            stage: FieldStage::Empty,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stage(&self) -> FieldStage {
        self.stage
    }

    fn expect_stage(&self, expected: FieldStage) -> Result<(), FieldError> {
        if self.stage != expected {
            return Err(FieldError::OutOfOrder {
                expected,
                actual: self.stage,
            });
        }
        Ok(())
    }

    /// Total walk length for a given density multiplier.
    ///
    /// `MAX_CELLS * u32::MAX` is below 2^58, so this cannot overflow.
    pub fn step_count(&self, steps_per_cell: u32) -> u64 {
        self.cells.len() as u64 * u64::from(steps_per_cell)
    }

    /// Walk `width * height * steps_per_cell` steps from the origin, drawing
    /// one direction per step. Returns the number of steps taken.
    pub fn walk<G: BoundedGenerator + ?Sized>(
        &mut self,
        generator: &mut G,
        steps_per_cell: u32,
    ) -> Result<u64, FieldError> {
        self.expect_stage(FieldStage::Empty)?;
        let steps = self.step_count(steps_per_cell);
        walk::diffuse(&mut self.cells, self.width, self.height, generator, steps);
        self.stage = FieldStage::Walked;
        tracing::trace!(steps, generator = generator.name(), "field walked");
        Ok(steps)
    }

    /// Visit counts. Only available once walked and before colorizing.
    pub fn counts(&self) -> Result<&[u32], FieldError> {
        self.expect_stage(FieldStage::Walked)?;
        Ok(&self.cells)
    }

    pub fn visit_summary(&self) -> Result<VisitSummary, FieldError> {
        let counts = self.counts()?;
        let mut summary = VisitSummary::default();
        for &c in counts {
            summary.total_visits += u64::from(c);
            summary.max_visits = summary.max_visits.max(c);
            if c == 0 {
                summary.unvisited_cells += 1;
            }
            if c >= color::CLAMP {
                summary.saturated_cells += 1;
            }
        }
        Ok(summary)
    }

    /// Replace every count with its packed color.
    pub fn colorize(&mut self) -> Result<(), FieldError> {
        self.expect_stage(FieldStage::Walked)?;
        color::colorize_in_place(&mut self.cells);
        self.stage = FieldStage::Colorized;
        tracing::trace!(cells = self.cells.len(), "field colorized");
        Ok(())
    }

    /// Hand the storage off as pixels. Consumes the buffer either way.
    pub fn into_pixels(self) -> Result<PixelGrid, FieldError> {
        self.expect_stage(FieldStage::Colorized)?;
        Ok(PixelGrid {
            width: self.width,
            height: self.height,
            pixels: self.cells,
        })
    }
}
