#![deny(missing_docs)]
//! Element types, channel axes and errors shared by the chromata operators.

/// Channel axis resolution.
pub mod axis;

/// Element types and their float promotion rules.
pub mod dtype;

/// Error types for the image module.
pub mod error;

/// Element type conversions on whole arrays.
pub mod ops;

pub use crate::axis::{normalize_axis, ChannelAxis};
pub use crate::dtype::{DtypeKind, FloatDtype, ImageDtype};
pub use crate::error::ImageError;
