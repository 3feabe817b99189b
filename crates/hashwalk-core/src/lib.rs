//! Visual audit of bounded generators: drive a toroidal random walk with the
//! generator under test and color the resulting visit density.

pub mod color;
pub mod config;
pub mod field;
pub mod generator;
pub mod render;

pub use config::{RenderConfig, RenderConfigError};
pub use field::{FieldBuffer, FieldError, FieldStage, PixelGrid, VisitSummary, Walker};
pub use generator::{
    BoundedGenerator, ByteMixing, GeneratorKind, HashAdvance, RandBaseline, Scripted,
};
pub use render::{RenderError, RenderReport, RenderRequest, RenderTimings, Rendered, Renderer};
