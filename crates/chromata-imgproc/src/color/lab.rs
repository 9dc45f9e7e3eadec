use std::f64::consts::TAU;
use std::sync::atomic::{AtomicUsize, Ordering};

use chromata_image::{ImageDtype, ImageError};
use ndarray::{Array, ArrayBase, Data, Dimension};

use super::illuminant::{xyz_white_point, Illuminant, Observer};
use super::pixel::{map_pixels, map_pixels_passthrough};
use super::xyz::{rgb_pixel_from_xyz, xyz_pixel_from_rgb};

const LAB_THRESHOLD: f64 = 0.008856;
const LAB_INV_THRESHOLD: f64 = 0.2068966;

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_THRESHOLD {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

#[inline]
fn lab_f_inv(t: f64) -> f64 {
    if t > LAB_INV_THRESHOLD {
        t * t * t
    } else {
        (t - 16.0 / 116.0) / 7.787
    }
}

pub(crate) fn lab_pixel_from_xyz(xyz: [f64; 3], white: &[f64; 3]) -> [f64; 3] {
    let x = lab_f(xyz[0] / white[0]);
    let y = lab_f(xyz[1] / white[1]);
    let z = lab_f(xyz[2] / white[2]);

    [116.0 * y - 16.0, 500.0 * (x - y), 200.0 * (y - z)]
}

/// Returns the XYZ triple and whether a negative Z was clipped to zero.
pub(crate) fn xyz_pixel_from_lab([l, a, b]: [f64; 3], white: &[f64; 3]) -> ([f64; 3], bool) {
    let y = (l + 16.0) / 116.0;
    let x = a / 500.0 + y;
    let z = y - b / 200.0;

    let clipped = z < 0.0;
    let z = if clipped { 0.0 } else { z };

    (
        [
            lab_f_inv(x) * white[0],
            lab_f_inv(y) * white[1],
            lab_f_inv(z) * white[2],
        ],
        clipped,
    )
}

/// Lab to XYZ on a whole image, returning the number of clipped Z values.
fn xyz_from_lab_counted<T, S, D>(
    image: &ArrayBase<S, D>,
    white: [f64; 3],
    channel_axis: isize,
    to_rgb: bool,
) -> Result<(Array<T::Float, D>, usize), ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    let clipped = AtomicUsize::new(0);

    let out = map_pixels(image, channel_axis, |lab: [f64; 3]| {
        let (xyz, c) = xyz_pixel_from_lab(lab, &white);
        if c {
            clipped.fetch_add(1, Ordering::Relaxed);
        }
        if to_rgb {
            rgb_pixel_from_xyz(xyz)
        } else {
            xyz
        }
    })?;

    Ok((out, clipped.into_inner()))
}

/// Convert a CIE XYZ image to a CIE Lab image.
///
/// # Arguments
///
/// * `image` - The input XYZ image of any rank.
/// * `illuminant` - The reference white illuminant.
/// * `observer` - The aperture angle of the observer.
/// * `channel_axis` - The axis holding the X, Y, Z channels.
///
/// # Returns
///
/// The Lab image, L in `[0, 100]`.
///
/// Precondition: the channel axis must have exactly 3 channels.
///
/// # Example
///
/// ```
/// use chromata_imgproc::color::{lab_from_xyz, Illuminant, Observer};
/// use ndarray::array;
///
/// let white = array![[0.95047f64, 1.0, 1.08883]];
/// let lab = lab_from_xyz(&white, Illuminant::D65, Observer::Two, -1).unwrap();
///
/// assert!((lab[[0, 0]] - 100.0).abs() < 1e-9);
/// ```
pub fn lab_from_xyz<T, S, D>(
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
    map_pixels(image, channel_axis, |xyz: [f64; 3]| {
        lab_pixel_from_xyz(xyz, &white)
    })
}

/// Convert a CIE Lab image to a CIE XYZ image.
///
/// Lab values whose Z component would be negative are out of gamut: Z is
/// clipped to zero and the number of clipped values is logged as a warning.
///
/// # Arguments
///
/// * `image` - The input Lab image of any rank.
/// * `illuminant` - The reference white illuminant.
/// * `observer` - The aperture angle of the observer.
/// * `channel_axis` - The axis holding the L, a, b channels.
///
/// Precondition: the channel axis must have exactly 3 channels.
pub fn xyz_from_lab<T, S, D>(
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
    let (xyz, clipped) = xyz_from_lab_counted(image, white, channel_axis, false)?;
    if clipped > 0 {
        log::warn!(
            "Conversion from CIE-LAB to XYZ color space resulted in {} negative Z values that have been clipped to zero",
            clipped
        );
    }
    Ok(xyz)
}

/// Convert an sRGB image to a CIE Lab image.
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
pub fn lab_from_rgb<T, S, D>(
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
    map_pixels(image, channel_axis, |rgb: [f64; 3]| {
        lab_pixel_from_xyz(xyz_pixel_from_rgb(rgb), &white)
    })
}

/// Convert a CIE Lab image to an sRGB image.
///
/// The intermediate XYZ values are clipped as in [`xyz_from_lab`] and the
/// output is clipped to `[0, 1]`.
///
/// # Arguments
///
/// * `image` - The input Lab image of any rank.
/// * `illuminant` - The reference white illuminant.
/// * `observer` - The aperture angle of the observer.
/// * `channel_axis` - The axis holding the L, a, b channels.
///
/// Precondition: the channel axis must have exactly 3 channels.
pub fn rgb_from_lab<T, S, D>(
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
    let (rgb, clipped) = xyz_from_lab_counted(image, white, channel_axis, true)?;
    if clipped > 0 {
        log::warn!(
            "Conversion from CIE-LAB, via XYZ to sRGB color space resulted in {} negative Z values that have been clipped to zero",
            clipped
        );
    }
    Ok(rgb)
}

pub(crate) fn lch_pixel_from_lab([l, a, b]: [f64; 3]) -> [f64; 3] {
    let h = b.atan2(a);
    [l, a.hypot(b), if h < 0.0 { h + TAU } else { h }]
}

pub(crate) fn lab_pixel_from_lch([l, c, h]: [f64; 3]) -> [f64; 3] {
    [l, c * h.cos(), c * h.sin()]
}

/// Convert a CIE Lab image to a CIE LCh image.
///
/// The a and b channels are mapped to polar form: chroma `C = hypot(a, b)`
/// and hue `H = atan2(b, a)` in `[0, 2 pi)`. L is unchanged.
///
/// # Arguments
///
/// * `image` - The input Lab image of any rank.
/// * `channel_axis` - The axis holding the L, a, b channels. It needs at
///   least 3 channels, further channels are copied unchanged.
///
/// # Example
///
/// ```
/// use chromata_imgproc::color::lch_from_lab;
/// use ndarray::array;
///
/// let lab = array![50.0f64, 0.0, -10.0];
/// let lch = lch_from_lab(&lab, -1).unwrap();
///
/// assert!((lch[1] - 10.0).abs() < 1e-12);
/// assert!((lch[2] - 1.5 * std::f64::consts::PI).abs() < 1e-12);
/// ```
pub fn lch_from_lab<T, S, D>(
    image: &ArrayBase<S, D>,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    map_pixels_passthrough(image, channel_axis, lch_pixel_from_lab)
}

/// Convert a CIE LCh image to a CIE Lab image.
///
/// # Arguments
///
/// * `image` - The input LCh image of any rank, the hue in radians.
/// * `channel_axis` - The axis holding the L, C, h channels. It needs at
///   least 3 channels, further channels are copied unchanged.
pub fn lab_from_lch<T, S, D>(
    image: &ArrayBase<S, D>,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    map_pixels_passthrough(image, channel_axis, lab_pixel_from_lch)
}
