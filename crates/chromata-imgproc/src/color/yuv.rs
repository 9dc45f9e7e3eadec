use chromata_image::{ImageDtype, ImageError};
use ndarray::{Array, ArrayBase, Data, Dimension};

use super::pixel::{invert, Matrix3};
use super::transform::ColorTransform;

/// RGB to YUV (Rec. 601 luma, analog PAL chroma).
#[rustfmt::skip]
pub const YUV_FROM_RGB: Matrix3 = [
    [0.299, 0.587, 0.114],
    [-0.14714119, -0.28886916, 0.43601035],
    [0.61497538, -0.51496512, -0.10001026],
];

/// RGB to YIQ (NTSC).
#[rustfmt::skip]
pub const YIQ_FROM_RGB: Matrix3 = [
    [0.299, 0.587, 0.114],
    [0.59590059, -0.27455667, -0.32134392],
    [0.21153661, -0.52273617, 0.31119955],
];

/// RGB to YPbPr (analog component video).
#[rustfmt::skip]
pub const YPBPR_FROM_RGB: Matrix3 = [
    [0.299, 0.587, 0.114],
    [-0.168736, -0.331264, 0.5],
    [0.5, -0.418688, -0.081312],
];

/// RGB to YCbCr, before the studio swing offsets.
#[rustfmt::skip]
pub const YCBCR_FROM_RGB: Matrix3 = [
    [65.481, 128.553, 24.966],
    [-37.797, -74.203, 112.0],
    [112.0, -93.786, -18.214],
];

/// RGB to YDbDr (SECAM).
#[rustfmt::skip]
pub const YDBDR_FROM_RGB: Matrix3 = [
    [0.299, 0.587, 0.114],
    [-0.45, -0.883, 1.333],
    [-1.333, 1.116, 0.217],
];

/// Offsets added to YCbCr so that Y lies in [16, 235] and Cb, Cr in [16, 240].
pub const YCBCR_OFFSET: [f64; 3] = [16.0, 128.0, 128.0];

/// The luma / chroma colorspaces derived linearly from RGB.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum LumaChroma {
    Yuv,
    Yiq,
    YPbPr,
    YCbCr,
    YDbDr,
}

impl LumaChroma {
    /// The matrix from RGB and the offset added after it.
    fn matrix(self) -> (Matrix3, [f64; 3]) {
        match self {
            LumaChroma::Yuv => (YUV_FROM_RGB, [0.0; 3]),
            LumaChroma::Yiq => (YIQ_FROM_RGB, [0.0; 3]),
            LumaChroma::YPbPr => (YPBPR_FROM_RGB, [0.0; 3]),
            LumaChroma::YCbCr => (YCBCR_FROM_RGB, YCBCR_OFFSET),
            LumaChroma::YDbDr => (YDBDR_FROM_RGB, [0.0; 3]),
        }
    }

    pub(crate) fn transform_from_rgb(self) -> ColorTransform {
        let (matrix, offset) = self.matrix();
        ColorTransform::Linear {
            matrix,
            pre_offset: [0.0; 3],
            post_offset: offset,
        }
    }

    pub(crate) fn transform_to_rgb(self) -> ColorTransform {
        let (matrix, offset) = self.matrix();
        ColorTransform::Linear {
            matrix: invert(&matrix),
            pre_offset: offset.map(|v| -v),
            post_offset: [0.0; 3],
        }
    }
}

macro_rules! luma_chroma_conversions {
    ($($space:ident, $name:literal, $from_rgb:ident, $to_rgb:ident;)*) => {$(
        #[doc = concat!("Convert an RGB image to a ", $name, " image.")]
        ///
        /// # Arguments
        ///
        /// * `image` - The input RGB image of any rank. Integer images are
        ///   rescaled to `[0, 1]` first.
        /// * `channel_axis` - The axis holding the R, G, B channels.
        ///
        /// Precondition: the channel axis must have exactly 3 channels.
        pub fn $from_rgb<T, S, D>(
            image: &ArrayBase<S, D>,
            channel_axis: isize,
        ) -> Result<Array<T::Float, D>, ImageError>
        where
            T: ImageDtype,
            S: Data<Elem = T>,
            D: Dimension,
        {
            LumaChroma::$space.transform_from_rgb().apply(image, channel_axis)
        }

        #[doc = concat!("Convert a ", $name, " image to an RGB image.")]
        ///
        /// # Arguments
        ///
        #[doc = concat!("* `image` - The input ", $name, " image of any rank.")]
        /// * `channel_axis` - The axis holding the luma and chroma channels.
        ///
        /// Precondition: the channel axis must have exactly 3 channels.
        pub fn $to_rgb<T, S, D>(
            image: &ArrayBase<S, D>,
            channel_axis: isize,
        ) -> Result<Array<T::Float, D>, ImageError>
        where
            T: ImageDtype,
            S: Data<Elem = T>,
            D: Dimension,
        {
            LumaChroma::$space.transform_to_rgb().apply(image, channel_axis)
        }
    )*};
}

luma_chroma_conversions! {
    Yuv, "YUV", yuv_from_rgb, rgb_from_yuv;
    Yiq, "YIQ", yiq_from_rgb, rgb_from_yiq;
    YPbPr, "YPbPr", ypbpr_from_rgb, rgb_from_ypbpr;
    YCbCr, "YCbCr", ycbcr_from_rgb, rgb_from_ycbcr;
    YDbDr, "YDbDr", ydbdr_from_rgb, rgb_from_ydbdr;
}
