use chromata_image::{ImageDtype, ImageError};
use ndarray::{Array, ArrayBase, Data, Dimension};

use super::pixel::{invert, map_pixels, mat_mul, mat_vec, Matrix3};
use super::transform::ColorTransform;

/// Linear sRGB (D65) to CIE XYZ.
#[rustfmt::skip]
pub const XYZ_FROM_RGB: Matrix3 = [
    [0.412453, 0.357580, 0.180423],
    [0.212671, 0.715160, 0.072169],
    [0.019334, 0.119193, 0.950227],
];

/// CIE XYZ to linear sRGB, the inverse of [`XYZ_FROM_RGB`].
#[rustfmt::skip]
pub const RGB_FROM_XYZ: Matrix3 = [
    [3.240481343200526, -1.5371515162713183, -0.49853632616888777],
    [-0.9692549499965681, 1.8759900014898907, 0.04155592655829283],
    [0.05564663913517714, -0.2040413383665112, 1.0573110696453443],
];

/// CIE 1931 RGB to CIE XYZ.
#[rustfmt::skip]
pub const XYZ_FROM_RGBCIE: Matrix3 = [
    [0.49 / 0.17697, 0.31 / 0.17697, 0.20 / 0.17697],
    [0.17697 / 0.17697, 0.81240 / 0.17697, 0.01063 / 0.17697],
    [0.00 / 0.17697, 0.01 / 0.17697, 0.99 / 0.17697],
];

/// sRGB to CIE 1931 RGB, applied to the companded values.
pub fn rgbcie_from_rgb_matrix() -> Matrix3 {
    mat_mul(&invert(&XYZ_FROM_RGBCIE), &XYZ_FROM_RGB)
}

/// CIE 1931 RGB to sRGB.
pub fn rgb_from_rgbcie_matrix() -> Matrix3 {
    mat_mul(&RGB_FROM_XYZ, &XYZ_FROM_RGBCIE)
}

/// Undo the sRGB transfer function.
#[inline]
pub(crate) fn srgb_to_linear(c: f64) -> f64 {
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

/// Apply the sRGB transfer function.
#[inline]
pub(crate) fn linear_to_srgb(c: f64) -> f64 {
    if c > 0.0031308 {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    } else {
        12.92 * c
    }
}

pub(crate) fn xyz_pixel_from_rgb([r, g, b]: [f64; 3]) -> [f64; 3] {
    mat_vec(
        &XYZ_FROM_RGB,
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b)],
    )
}

pub(crate) fn rgb_pixel_from_xyz(xyz: [f64; 3]) -> [f64; 3] {
    mat_vec(&RGB_FROM_XYZ, xyz).map(|c| linear_to_srgb(c).clamp(0.0, 1.0))
}

/// Convert an sRGB image to a CIE XYZ image.
///
/// The sRGB gamma is removed before the linear transform, the reference
/// white is D65.
///
/// # Arguments
///
/// * `image` - The input RGB image of any rank. Integer images are rescaled
///   to `[0, 1]` first.
/// * `channel_axis` - The axis holding the R, G, B channels.
///
/// Precondition: the channel axis must have exactly 3 channels.
///
/// # Example
///
/// ```
/// use chromata_imgproc::color::xyz_from_rgb;
/// use ndarray::array;
///
/// let rgb = array![[[1.0f64, 1.0, 1.0]]];
/// let xyz = xyz_from_rgb(&rgb, -1).unwrap();
///
/// assert!((xyz[[0, 0, 1]] - 1.0).abs() < 1e-6);
/// ```
pub fn xyz_from_rgb<T, S, D>(
    image: &ArrayBase<S, D>,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    map_pixels(image, channel_axis, xyz_pixel_from_rgb)
}

/// Convert a CIE XYZ image to an sRGB image.
///
/// Values outside of the sRGB gamut are clipped to `[0, 1]`.
///
/// # Arguments
///
/// * `image` - The input XYZ image of any rank.
/// * `channel_axis` - The axis holding the X, Y, Z channels.
///
/// Precondition: the channel axis must have exactly 3 channels.
pub fn rgb_from_xyz<T, S, D>(
    image: &ArrayBase<S, D>,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    map_pixels(image, channel_axis, rgb_pixel_from_xyz)
}

/// Convert an RGB image to a CIE 1931 RGB image.
///
/// # Arguments
///
/// * `image` - The input RGB image of any rank.
/// * `channel_axis` - The axis holding the R, G, B channels.
///
/// Precondition: the channel axis must have exactly 3 channels.
pub fn rgbcie_from_rgb<T, S, D>(
    image: &ArrayBase<S, D>,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    ColorTransform::linear(rgbcie_from_rgb_matrix()).apply(image, channel_axis)
}

/// Convert a CIE 1931 RGB image to an RGB image.
///
/// # Arguments
///
/// * `image` - The input RGB CIE image of any rank.
/// * `channel_axis` - The axis holding the R, G, B channels.
///
/// Precondition: the channel axis must have exactly 3 channels.
pub fn rgb_from_rgbcie<T, S, D>(
    image: &ArrayBase<S, D>,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    ColorTransform::linear(rgb_from_rgbcie_matrix()).apply(image, channel_axis)
}
