use crate::config::{RenderConfig, RenderConfigError};
use crate::field::{FieldBuffer, FieldError, PixelGrid, VisitSummary};
use crate::generator::BoundedGenerator;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use std::{error::Error, fmt};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderRequest {
    pub width: usize,
    pub height: usize,
}

impl RenderRequest {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderTimings {
    pub walk_us: u64,
    pub colorize_us: u64,
    pub total_us: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderReport {
    pub width: usize,
    pub height: usize,
    pub generator: String,
    pub steps_per_cell: u32,
    pub steps: u64,
    pub visits: VisitSummary,
    pub timings: RenderTimings,
}

/// A finished render: pixels for the surface plus what it took to make them.
#[derive(Clone, Debug)]
pub struct Rendered {
    pub pixels: PixelGrid,
    pub report: RenderReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    Unbound,
    Field(FieldError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Unbound => write!(f, "no generator bound to renderer"),
            RenderError::Field(e) => write!(f, "{}", e),
        }
    }
}

impl From<FieldError> for RenderError {
    fn from(err: FieldError) -> Self {
        RenderError::Field(err)
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RenderError::Field(e) => Some(e),
            RenderError::Unbound => None,
        }
    }
}

/// Runs render requests against one bound generator.
///
/// The generator's state carries over between renders, so repeated renders
/// continue its sequence rather than repeating the first image.
pub struct Renderer {
    generator: Option<Box<dyn BoundedGenerator>>,
    steps_per_cell: u32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("generator", &self.generator.as_ref().map(|g| g.name()))
            .field("steps_per_cell", &self.steps_per_cell)
            .finish()
    }
}

impl Renderer {
    pub const DEFAULT_STEPS_PER_CELL: u32 = 40;

    /// An unbound renderer; `render` fails until a generator is bound.
    pub fn new() -> Self {
        Self {
            generator: None,
            steps_per_cell: Self::DEFAULT_STEPS_PER_CELL,
        }
    }

    pub fn with_generator<G: BoundedGenerator + 'static>(generator: G) -> Self {
        Self {
            generator: Some(Box::new(generator)),
            ..Self::new()
        }
    }

    pub fn from_config(config: &RenderConfig) -> Result<Self, RenderConfigError> {
        config.validate()?;
        Ok(Self {
            generator: Some(config.generator.build(config.seed)),
            steps_per_cell: config.steps_per_cell,
        })
    }

    pub fn steps_per_cell(mut self, steps_per_cell: u32) -> Self {
        self.steps_per_cell = steps_per_cell;
        self
    }

    /// Bind a generator, returning the previously bound one with its state intact.
    pub fn bind(&mut self, generator: Box<dyn BoundedGenerator>) -> Option<Box<dyn BoundedGenerator>> {
        self.generator.replace(generator)
    }

    pub fn unbind(&mut self) -> Option<Box<dyn BoundedGenerator>> {
        self.generator.take()
    }

    pub fn is_bound(&self) -> bool {
        self.generator.is_some()
    }

    /// Allocate, walk, colorize and hand off one field.
    pub fn render(&mut self, request: RenderRequest) -> Result<Rendered, RenderError> {
        let total_start = Instant::now();
        let generator = self.generator.as_deref_mut().ok_or(RenderError::Unbound)?;
        let mut field = FieldBuffer::try_new(request.width, request.height)?;
        let generator_name = generator.name().to_string();
        tracing::debug!(
            width = request.width,
            height = request.height,
            generator = %generator_name,
            steps_per_cell = self.steps_per_cell,
            "render started"
        );

        let t0 = Instant::now();
        let steps = field.walk(generator, self.steps_per_cell)?;
        let walk_us = t0.elapsed().as_micros() as u64;
        let visits = field.visit_summary()?;

        let t1 = Instant::now();
        field.colorize()?;
        let colorize_us = t1.elapsed().as_micros() as u64;

        let pixels = field.into_pixels()?;
        let timings = RenderTimings {
            walk_us,
            colorize_us,
            total_us: total_start.elapsed().as_micros() as u64,
        };
        tracing::debug!(
            steps,
            max_visits = visits.max_visits,
            saturated = visits.saturated_cells,
            total_us = timings.total_us,
            "render finished"
        );

        Ok(Rendered {
            pixels,
            report: RenderReport {
                width: request.width,
                height: request.height,
                generator: generator_name,
                steps_per_cell: self.steps_per_cell,
                steps,
                visits,
                timings,
            },
        })
    }
}
