//! Filter operations
//!
//! This module provides the separable N-D Gaussian filter and the 1-D
//! correlation it is built on.

/// Border handling
mod border;
pub use border::BorderMode;

/// Gaussian smoothing of images
mod gaussian;
pub use gaussian::{gaussian, gaussian_into, GaussianOptions, Sigma};

/// Filter kernels
pub mod kernels;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
