use chromata_image::{ImageDtype, ImageError};
use ndarray::{Array, ArrayBase, Data, Dimension};

use super::illuminant::{xyz_white_point, Illuminant, Observer};
use super::pixel::{epsilon, map_pixels};
use super::xyz::{rgb_pixel_from_xyz, xyz_pixel_from_rgb};

/// Chromaticity `(u'0, v'0)` of a reference white.
fn white_uv(white: &[f64; 3]) -> (f64, f64) {
    let denom = white[0] + 15.0 * white[1] + 3.0 * white[2];
    (4.0 * white[0] / denom, 9.0 * white[1] / denom)
}

/// `eps` guards the chromaticity denominators of black pixels.
pub(crate) fn luv_pixel_from_xyz([x, y, z]: [f64; 3], white: &[f64; 3], eps: f64) -> [f64; 3] {
    let yr = y / white[1];
    let l = if yr > 0.008856 {
        116.0 * yr.cbrt() - 16.0
    } else {
        903.3 * yr
    };

    let (u0, v0) = white_uv(white);
    let denom = x + 15.0 * y + 3.0 * z + eps;

    [
        l,
        13.0 * l * (4.0 * x / denom - u0),
        13.0 * l * (9.0 * y / denom - v0),
    ]
}

pub(crate) fn xyz_pixel_from_luv([l, u, v]: [f64; 3], white: &[f64; 3], eps: f64) -> [f64; 3] {
    let y = if l > 7.999625 {
        ((l + 16.0) / 116.0).powi(3)
    } else {
        l / 903.3
    } * white[1];

    let (u0, v0) = white_uv(white);
    let a = u0 + u / (13.0 * l + eps);
    let b = v0 + v / (13.0 * l + eps);
    let c = 3.0 * y * (5.0 * b - 3.0);

    let z = ((a - 4.0) * c - 15.0 * a * b * y) / (12.0 * b);
    let x = -(c / b + 3.0 * z);

    [x, y, z]
}

/// Convert a CIE XYZ image to a CIE Luv image.
///
/// # Arguments
///
/// * `image` - The input XYZ image of any rank.
/// * `illuminant` - The reference white illuminant.
/// * `observer` - The aperture angle of the observer.
/// * `channel_axis` - The axis holding the X, Y, Z channels.
///
/// Precondition: the channel axis must have exactly 3 channels.
///
/// # Example
///
/// ```
/// use chromata_imgproc::color::{luv_from_xyz, Illuminant, Observer};
/// use ndarray::array;
///
/// let xyz = array![[0.4124f64, 0.2126, 0.0193]];
/// let luv = luv_from_xyz(&xyz, Illuminant::D65, Observer::Two, -1).unwrap();
///
/// assert!((luv[[0, 1]] - 175.053).abs() < 1e-3);
/// ```
pub fn luv_from_xyz<T, S, D>(
    image: &ArrayBase<S, D>,
    illuminant: Illuminant,
    observer: Observer,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    let white = xyz_white_point(illuminant, observer);
    let eps = epsilon::<T::Float>();
    map_pixels(image, channel_axis, |xyz: [f64; 3]| {
        luv_pixel_from_xyz(xyz, &white, eps)
    })
}

/// Convert a CIE Luv image to a CIE XYZ image.
///
/// # Arguments
///
/// * `image` - The input Luv image of any rank.
/// * `illuminant` - The reference white illuminant.
/// * `observer` - The aperture angle of the observer.
/// * `channel_axis` - The axis holding the L, u, v channels.
///
/// Precondition: the channel axis must have exactly 3 channels.
pub fn xyz_from_luv<T, S, D>(
    image: &ArrayBase<S, D>,
    illuminant: Illuminant,
    observer: Observer,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    let white = xyz_white_point(illuminant, observer);
    let eps = epsilon::<T::Float>();
    map_pixels(image, channel_axis, |luv: [f64; 3]| {
        xyz_pixel_from_luv(luv, &white, eps)
    })
}

/// Convert an sRGB image to a CIE Luv image.
///
/// # Arguments
///
/// * `image` - The input RGB image of any rank. Integer images are rescaled
///   to `[0, 1]` first.
/// * `illuminant` - The reference white illuminant.
/// * `observer` - The aperture angle of the observer.
/// * `channel_axis` - The axis holding the R, G, B channels.
///
/// Precondition: the channel axis must have exactly 3 channels.
pub fn luv_from_rgb<T, S, D>(
    image: &ArrayBase<S, D>,
    illuminant: Illuminant,
    observer: Observer,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    let white = xyz_white_point(illuminant, observer);
    let eps = epsilon::<T::Float>();
    map_pixels(image, channel_axis, |rgb: [f64; 3]| {
        luv_pixel_from_xyz(xyz_pixel_from_rgb(rgb), &white, eps)
    })
}

/// Convert a CIE Luv image to an sRGB image.
///
/// The output is clipped to `[0, 1]`.
///
/// # Arguments
///
/// * `image` - The input Luv image of any rank.
/// * `illuminant` - The reference white illuminant.
/// * `observer` - The aperture angle of the observer.
/// * `channel_axis` - The axis holding the L, u, v channels.
///
/// Precondition: the channel axis must have exactly 3 channels.
pub fn rgb_from_luv<T, S, D>(
    image: &ArrayBase<S, D>,
    illuminant: Illuminant,
    observer: Observer,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    let white = xyz_white_point(illuminant, observer);
    let eps = epsilon::<T::Float>();
    map_pixels(image, channel_axis, |luv: [f64; 3]| {
        rgb_pixel_from_xyz(xyz_pixel_from_luv(luv, &white, eps))
    })
}
