use chromata_image::{ImageDtype, ImageError};
use ndarray::{Array, ArrayBase, Data, Dimension};

use super::pixel::map_pixels;

/// Convert an RGBA image to an RGB image by alpha blending over a background.
///
/// Each output channel is `(1 - alpha) * background + alpha * rgb`, clipped
/// to `[0, 1]`.
///
/// # Arguments
///
/// * `image` - The input RGBA image of any rank.
/// * `background` - The RGB background color, white when `None`. Every
///   component must lie in `[0, 1]`.
/// * `channel_axis` - The axis holding the R, G, B, A channels.
///
/// Precondition: the channel axis must have exactly 4 channels.
///
/// # Example
///
/// ```
/// use chromata_imgproc::color::rgb_from_rgba;
/// use ndarray::array;
///
/// let rgba = array![[[0.0f64, 0.5, 1.0, 0.5]]];
/// let rgb = rgb_from_rgba(&rgba, None, -1).unwrap();
///
/// assert_eq!(rgb, array![[[0.5, 0.75, 1.0]]]);
/// ```
pub fn rgb_from_rgba<T, S, D>(
    image: &ArrayBase<S, D>,
    background: Option<[f64; 3]>,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    let bg = background.unwrap_or([1.0; 3]);
    if bg.iter().any(|c| !(0.0..=1.0).contains(c)) {
        return Err(ImageError::InvalidBackground(bg));
    }

    map_pixels(image, channel_axis, |[r, g, b, a]: [f64; 4]| {
        let blend = |c: f64, bg: f64| ((1.0 - a) * bg + a * c).clamp(0.0, 1.0);
        [blend(r, bg[0]), blend(g, bg[1]), blend(b, bg[2])]
    })
}
