use chromata_image::{ImageDtype, ImageError};
use ndarray::{Array, ArrayBase, Data, Dimension};

use super::pixel::map_pixels;

pub(crate) fn hsv_pixel_from_rgb([r, g, b]: [f64; 3]) -> [f64; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta == 0.0 {
        return [0.0, 0.0, max];
    }

    // ties resolve towards blue, then green
    let h = if b == max {
        4.0 + (r - g) / delta
    } else if g == max {
        2.0 + (b - r) / delta
    } else {
        (g - b) / delta
    };

    [(h / 6.0).rem_euclid(1.0), delta / max, max]
}

pub(crate) fn rgb_pixel_from_hsv([h, s, v]: [f64; 3]) -> [f64; 3] {
    let hi = (h * 6.0).floor();
    let f = h * 6.0 - hi;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    match hi.rem_euclid(6.0) as u8 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Convert an RGB image to an HSV image.
///
/// # Arguments
///
/// * `image` - The input RGB image of any rank. Integer images are rescaled
///   to `[0, 1]` first.
/// * `channel_axis` - The axis holding the R, G, B channels.
///
/// # Returns
///
/// The HSV image with the following channels:
///
/// * H: The hue as a fraction of a turn, in the range [0, 1).
/// * S: The saturation channel in the range [0, 1].
/// * V: The value channel, the maximum of R, G and B.
///
/// Precondition: the channel axis must have exactly 3 channels.
///
/// # Example
///
/// ```
/// use chromata_imgproc::color::hsv_from_rgb;
/// use ndarray::Array3;
///
/// let image = Array3::<f32>::zeros((5, 4, 3));
///
/// let hsv = hsv_from_rgb(&image, -1).unwrap();
///
/// assert_eq!(hsv.shape(), &[5, 4, 3]);
/// ```
pub fn hsv_from_rgb<T, S, D>(
    image: &ArrayBase<S, D>,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    map_pixels(image, channel_axis, hsv_pixel_from_rgb)
}

/// Convert an HSV image to an RGB image.
///
/// # Arguments
///
/// * `image` - The input HSV image of any rank, with all channels in `[0, 1]`.
/// * `channel_axis` - The axis holding the H, S, V channels.
///
/// Precondition: the channel axis must have exactly 3 channels.
pub fn rgb_from_hsv<T, S, D>(
    image: &ArrayBase<S, D>,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    map_pixels(image, channel_axis, rgb_pixel_from_hsv)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chromata_image::ImageError;
    use ndarray::{array, Array2, Array3};
    use rand::Rng;

    #[test]
    fn hsv_from_rgb() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = array![[
            [0.0f64, 128.0 / 255.0, 1.0],
            [1.0, 128.0 / 255.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.5, 0.5, 0.5],
            [0.0, 0.0, 0.0],
        ]];

        let hsv = super::hsv_from_rgb(&image, -1)?;

        #[rustfmt::skip]
        let expected = array![[
            [0.583006535947712, 1.0, 1.0],
            [0.0836601307189542, 1.0, 1.0],
            [0.0, 1.0, 1.0],
            [0.0, 0.0, 0.5],
            [0.0, 0.0, 0.0],
        ]];

        assert_abs_diff_eq!(hsv, expected, epsilon = 1e-9);

        Ok(())
    }

    #[test]
    fn hsv_negative_hue_wraps() {
        // magenta leaning to red: max is red, g < b
        let [h, s, v] = super::hsv_pixel_from_rgb([1.0, 0.0, 0.5]);
        assert_abs_diff_eq!(h, 1.0 - 0.5 / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s, 1.0);
        assert_abs_diff_eq!(v, 1.0);
    }

    #[test]
    fn hsv_roundtrip_channel_axis() -> Result<(), ImageError> {
        let mut rng = rand::rng();
        let rgb = Array3::<f64>::from_shape_fn((3, 8, 8), |_| rng.random::<f64>());

        for channel_axis in [0, -3] {
            let hsv = super::hsv_from_rgb(&rgb, channel_axis)?;
            let back = super::rgb_from_hsv(&hsv, channel_axis)?;
            assert_abs_diff_eq!(back, rgb, epsilon = 1e-9);
        }

        Ok(())
    }

    #[test]
    fn hsv_dtype() -> Result<(), ImageError> {
        let rgb = Array3::<f32>::from_elem((2, 2, 3), 0.25);
        let hsv: Array3<f32> = super::hsv_from_rgb(&rgb, -1)?;
        let rgb2: Array3<f32> = super::rgb_from_hsv(&hsv, -1)?;
        assert_abs_diff_eq!(rgb2, rgb, epsilon = 1e-6);

        let rgb8 = Array3::<u8>::from_elem((2, 2, 3), 255);
        let hsv8: Array3<f32> = super::hsv_from_rgb(&rgb8, -1)?;
        assert_abs_diff_eq!(hsv8[[0, 0, 2]], 1.0);
        Ok(())
    }

    #[test]
    fn hsv_error_grayscale() {
        let gray = Array2::<u8>::zeros((16, 16));
        assert!(super::hsv_from_rgb(&gray, -1).is_err());
        assert!(super::rgb_from_hsv(&gray, -1).is_err());
    }
}
