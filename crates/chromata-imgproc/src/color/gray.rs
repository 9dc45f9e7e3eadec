use chromata_image::{normalize_axis, ImageDtype, ImageError};
use ndarray::{Array, ArrayBase, ArrayViewD, Axis, Data, Dimension, RemoveAxis};

use super::pixel::channel_index;
use crate::parallel;

/// Define the RGB weights for the grayscale conversion (Rec. 709 luminance).
const RW: f64 = 0.2125;
const GW: f64 = 0.7154;
const BW: f64 = 0.0721;

/// Alpha channel of an image produced by [`rgba_from_gray`].
#[derive(Clone, Debug, Default)]
pub enum Alpha<'a, T> {
    /// Fully opaque: the maximum of the dtype range (1.0 for floats, 255 for u8).
    #[default]
    Opaque,
    /// A constant alpha value, cast to the image dtype.
    Value(f64),
    /// A per-pixel alpha with the same shape as the image.
    Array(ArrayViewD<'a, T>),
}

/// Convert an RGB image to grayscale using the formula:
///
/// Y = 0.2125 * R + 0.7154 * G + 0.0721 * B
///
/// # Arguments
///
/// * `image` - The input RGB image of any rank.
/// * `channel_axis` - The axis holding the R, G, B channels.
///
/// # Returns
///
/// The luminance image, with the channel axis removed.
///
/// Precondition: the channel axis must have exactly 3 channels. RGBA input
/// is rejected, use [`super::rgb_from_rgba`] first.
///
/// # Example
///
/// ```
/// use chromata_imgproc::color::gray_from_rgb;
/// use ndarray::Array3;
///
/// let image = Array3::<f32>::ones((5, 4, 3));
///
/// let gray = gray_from_rgb(&image, -1).unwrap();
///
/// assert_eq!(gray.shape(), &[5, 4]);
/// ```
pub fn gray_from_rgb<T, S, D>(
    image: &ArrayBase<S, D>,
    channel_axis: isize,
) -> Result<Array<T::Float, D::Smaller>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: RemoveAxis,
{
    let axis = channel_index(image.shape(), channel_axis, 3)?;

    let mut dst = Array::<T::Float, D::Smaller>::zeros(image.raw_dim().remove_axis(Axis(axis)));

    parallel::par_reduce_lanes(image, &mut dst, axis, |src_pixel, dst_pixel| {
        let r = src_pixel[0].to_unit_float().as_f64();
        let g = src_pixel[1].to_unit_float().as_f64();
        let b = src_pixel[2].to_unit_float().as_f64();
        *dst_pixel = <T::Float as ImageDtype>::from_f64(RW * r + GW * g + BW * b);
    });

    Ok(dst)
}

/// Create an RGB representation of a gray-level image.
///
/// The gray values are repeated along a new channel axis. The output keeps
/// the dtype of the input.
///
/// # Arguments
///
/// * `image` - The input gray image of any rank.
/// * `channel_axis` - Position of the new channel axis in the output,
///   resolved against `image.ndim() + 1`.
///
/// # Example
///
/// ```
/// use chromata_imgproc::color::rgb_from_gray;
/// use ndarray::array;
///
/// let gray = array![[0u8, 128, 255]];
/// let rgb = rgb_from_gray(&gray, -1).unwrap();
///
/// assert_eq!(rgb.shape(), &[1, 3, 3]);
/// assert_eq!(rgb[[0, 1, 2]], 128);
/// ```
pub fn rgb_from_gray<T, S, D>(
    image: &ArrayBase<S, D>,
    channel_axis: isize,
) -> Result<Array<T, D::Larger>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    let axis = normalize_axis(channel_axis, image.ndim() + 1)?;
    let view = image.view();
    Ok(ndarray::stack(Axis(axis), &[view.clone(), view.clone(), view])?)
}

/// Create an RGBA representation of a gray-level image.
///
/// # Arguments
///
/// * `image` - The input gray image of any rank.
/// * `alpha` - The alpha channel, see [`Alpha`].
/// * `channel_axis` - Position of the new channel axis in the output,
///   resolved against `image.ndim() + 1`.
///
/// # Returns
///
/// The RGBA image with the input dtype. A scalar alpha that the dtype
/// cannot hold is cast anyway and a warning is logged.
///
/// # Errors
///
/// [`ImageError::InvalidAlphaShape`] if an alpha array does not match the
/// image shape.
pub fn rgba_from_gray<T, S, D>(
    image: &ArrayBase<S, D>,
    alpha: Alpha<'_, T>,
    channel_axis: isize,
) -> Result<Array<T, D::Larger>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    let axis = normalize_axis(channel_axis, image.ndim() + 1)?;

    let alpha = match alpha {
        Alpha::Opaque => Array::from_elem(image.raw_dim(), T::dtype_limits().1),
        Alpha::Value(value) => {
            if !T::can_hold(value) {
                log::warn!(
                    "alpha {} can't be safely cast to image dtype {}",
                    value,
                    T::NAME
                );
            }
            Array::from_elem(image.raw_dim(), T::from_f64(value))
        }
        Alpha::Array(values) => {
            if values.shape() != image.shape() {
                return Err(ImageError::InvalidAlphaShape);
            }
            values.into_dimensionality::<D>()?.to_owned()
        }
    };

    let view = image.view();
    Ok(ndarray::stack(
        Axis(axis),
        &[view.clone(), view.clone(), view, alpha.view()],
    )?)
}
