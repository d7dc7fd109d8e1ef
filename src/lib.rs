//! gantt-grid: the date/time grid behind a Gantt diagram.
//!
//! `core` holds the time-to-pixel mapping, calendar ranges and header scale
//! formatting. `api` turns a grid into backend-agnostic render frames and
//! persists its configuration. `render` is the contract a host toolkit
//! implements to paint those frames.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{GridConfig, GridFrameBuilder, GridStyle, RenderParams};
pub use crate::core::{DateTimeGrid, DateTimeScaleFormatter, Range, Scale};
pub use error::{GanttError, GanttResult};
