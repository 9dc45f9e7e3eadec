use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::dtype::ImageDtype;

/// Convert an image to its supported float type, rescaling integer data.
///
/// Unsigned integers map to `[0, 1]`, signed integers to `[-1, 1]` and
/// floating point data is copied unchanged.
///
/// # Arguments
///
/// * `image` - The input array of any rank.
///
/// # Returns
///
/// A new array with the same shape holding `T::Float` values.
///
/// Example:
///
/// ```
/// use chromata_image::ops::img_as_float;
/// use ndarray::array;
///
/// let image = array![[0u8, 51, 255]];
/// let out = img_as_float(&image);
///
/// assert_eq!(out, array![[0.0f32, 0.2, 1.0]]);
/// ```
pub fn img_as_float<T, S, D>(image: &ArrayBase<S, D>) -> Array<T::Float, D>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    image.mapv(ImageDtype::to_unit_float)
}

/// Convert an image to its supported float type.
///
/// # Arguments
///
/// * `image` - The input array of any rank.
/// * `preserve_range` - Keep the original values instead of rescaling
///   integer data with [`img_as_float`].
///
/// # Returns
///
/// A new array with the same shape holding `T::Float` values.
pub fn convert_to_float<T, S, D>(image: &ArrayBase<S, D>, preserve_range: bool) -> Array<T::Float, D>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    if preserve_range {
        image.mapv(ImageDtype::to_float)
    } else {
        img_as_float(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_img_as_float_unsigned() {
        let image = array![[0u16, 65535], [0, 0]];
        let out = img_as_float(&image);
        assert_eq!(out, array![[0.0f32, 1.0], [0.0, 0.0]]);
    }

    #[test]
    fn test_img_as_float_signed() {
        let image = array![-128i8, 0, 127];
        let out = img_as_float(&image);
        assert_eq!(out, array![-1.0f32, 0.0, 1.0]);
    }

    #[test]
    fn test_img_as_float_wide_integers() {
        let image = array![0u32, u32::MAX];
        let out: ndarray::Array1<f64> = img_as_float(&image);
        assert_eq!(out, array![0.0, 1.0]);
    }

    #[test]
    fn test_convert_to_float_preserve_range() {
        let image = array![[[10u8, 200, 255]]];
        let out = convert_to_float(&image, true);
        assert_eq!(out, array![[[10.0f32, 200.0, 255.0]]]);

        let floats = array![1.5f64, -3.0];
        assert_eq!(convert_to_float(&floats, false), floats);
    }
}
