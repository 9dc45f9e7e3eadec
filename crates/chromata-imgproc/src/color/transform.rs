use chromata_image::{ImageDtype, ImageError};
use ndarray::{Array, ArrayBase, Data, Dimension};

use super::pixel::{map_pixels, mat_vec, Matrix3};

/// A per-pixel transform between two three component colorspaces.
#[derive(Clone, Copy, Debug)]
pub enum ColorTransform {
    /// Leave the pixel unchanged.
    Identity,
    /// `out = matrix * (px + pre_offset) + post_offset`.
    Linear {
        /// The matrix contracted with the channel vector.
        matrix: Matrix3,
        /// Added to the input before the matrix.
        pre_offset: [f64; 3],
        /// Added to the result of the matrix.
        post_offset: [f64; 3],
    },
    /// A closed-form non linear function.
    Piecewise(fn([f64; 3]) -> [f64; 3]),
}

impl ColorTransform {
    /// A linear transform without offsets.
    pub fn linear(matrix: Matrix3) -> Self {
        ColorTransform::Linear {
            matrix,
            pre_offset: [0.0; 3],
            post_offset: [0.0; 3],
        }
    }

    /// Transform a single pixel.
    #[inline]
    pub fn apply_pixel(&self, px: [f64; 3]) -> [f64; 3] {
        match self {
            ColorTransform::Identity => px,
            ColorTransform::Linear {
                matrix,
                pre_offset,
                post_offset,
            } => {
                let shifted = [
                    px[0] + pre_offset[0],
                    px[1] + pre_offset[1],
                    px[2] + pre_offset[2],
                ];
                let out = mat_vec(matrix, shifted);
                [
                    out[0] + post_offset[0],
                    out[1] + post_offset[1],
                    out[2] + post_offset[2],
                ]
            }
            ColorTransform::Piecewise(f) => f(px),
        }
    }

    /// Transform every pixel of an image along its channel axis.
    ///
    /// Precondition: the channel axis must have exactly 3 channels.
    pub fn apply<T, S, D>(
        &self,
        image: &ArrayBase<S, D>,
        channel_axis: isize,
    ) -> Result<Array<T::Float, D>, ImageError>
    where
        T: ImageDtype,
        S: Data<Elem = T>,
        D: Dimension,
    {
        map_pixels(image, channel_axis, |px: [f64; 3]| self.apply_pixel(px))
    }
}
