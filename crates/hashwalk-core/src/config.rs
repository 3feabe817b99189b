use crate::field::FieldBuffer;
use crate::generator::{GeneratorKind, DEFAULT_SEED};
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Everything needed to bind a renderer and size its field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// Walk length as a multiple of the cell count.
    pub steps_per_cell: u32,
    pub generator: GeneratorKind,
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            steps_per_cell: 40,
            generator: GeneratorKind::default(),
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderConfigError {
    ZeroWidth,
    ZeroHeight,
    ZeroStepsPerCell,
    TooManyCells { max: usize, actual: usize },
}

impl fmt::Display for RenderConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderConfigError::ZeroWidth => write!(f, "width must be positive"),
            RenderConfigError::ZeroHeight => write!(f, "height must be positive"),
            RenderConfigError::ZeroStepsPerCell => write!(f, "steps_per_cell must be positive"),
            RenderConfigError::TooManyCells { max, actual } => {
                write!(f, "width * height ({actual}) exceeds supported maximum ({max})")
            }
        }
    }
}

impl Error for RenderConfigError {}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), RenderConfigError> {
        if self.width == 0 {
            return Err(RenderConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(RenderConfigError::ZeroHeight);
        }
        if self.steps_per_cell == 0 {
            return Err(RenderConfigError::ZeroStepsPerCell);
        }
        let cells = self.width.saturating_mul(self.height);
        if cells > FieldBuffer::MAX_CELLS {
            return Err(RenderConfigError::TooManyCells {
                max: FieldBuffer::MAX_CELLS,
                actual: cells,
            });
        }
        Ok(())
    }

    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
