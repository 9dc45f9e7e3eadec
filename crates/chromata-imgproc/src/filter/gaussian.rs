use chromata_image::{
    normalize_axis, ops::convert_to_float, ChannelAxis, DtypeKind, ImageDtype, ImageError,
};
use ndarray::{Array, ArrayBase, Data, DataMut, Dimension};

use super::border::BorderMode;
use super::separable_filter::gaussian_filter;

/// Standard deviation of a Gaussian kernel.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Sigma {
    /// The same value along every filtered axis.
    Scalar(f64),
    /// One value per axis.
    PerAxis(Vec<f64>),
}

impl Default for Sigma {
    fn default() -> Self {
        Sigma::Scalar(1.0)
    }
}

impl From<f64> for Sigma {
    fn from(sigma: f64) -> Self {
        Sigma::Scalar(sigma)
    }
}

impl From<Vec<f64>> for Sigma {
    fn from(sigma: Vec<f64>) -> Self {
        Sigma::PerAxis(sigma)
    }
}

impl From<&[f64]> for Sigma {
    fn from(sigma: &[f64]) -> Self {
        Sigma::PerAxis(sigma.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Sigma {
    fn from(sigma: [f64; N]) -> Self {
        Sigma::PerAxis(sigma.to_vec())
    }
}

impl Sigma {
    fn check_non_negative(&self) -> Result<(), ImageError> {
        let values: &[f64] = match self {
            Sigma::Scalar(s) => std::slice::from_ref(s),
            Sigma::PerAxis(v) => v,
        };
        match values.iter().find(|&&s| s < 0.0) {
            Some(&s) => Err(ImageError::NegativeSigma(s)),
            None => Ok(()),
        }
    }

    /// One sigma per axis of an array of rank `ndim`.
    ///
    /// The channel axis, when there is one, gets a sigma of zero so that
    /// channels are never mixed.
    fn per_axis(&self, ndim: usize, channel_axis: Option<usize>) -> Result<Vec<f64>, ImageError> {
        let Some(channel) = channel_axis else {
            return match self {
                Sigma::Scalar(s) => Ok(vec![*s; ndim]),
                Sigma::PerAxis(v) if v.len() == ndim => Ok(v.clone()),
                Sigma::PerAxis(v) => Err(ImageError::InvalidSigmaLength {
                    expected: ndim,
                    actual: v.len(),
                }),
            };
        };

        let mut sigmas = match self {
            Sigma::Scalar(s) => vec![*s; ndim - 1],
            Sigma::PerAxis(v) => v.clone(),
        };
        if sigmas.len() == ndim - 1 {
            sigmas.insert(channel, 0.0);
        } else if sigmas.len() == ndim {
            sigmas[channel] = 0.0;
        } else {
            return Err(ImageError::InvalidSigmaLength {
                expected: ndim - 1,
                actual: sigmas.len(),
            });
        }
        Ok(sigmas)
    }
}

/// Parameters of [`gaussian`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaussianOptions {
    /// How the array borders are handled.
    pub mode: BorderMode,
    /// Value past the edges when `mode` is [`BorderMode::Constant`].
    pub cval: f64,
    /// Keep the original range of integer images instead of rescaling them
    /// to `[0, 1]` or `[-1, 1]`.
    pub preserve_range: bool,
    /// Truncate the kernel at this many standard deviations.
    pub truncate: f64,
    /// The axis holding the color channels, which is not filtered.
    pub channel_axis: ChannelAxis,
}

impl Default for GaussianOptions {
    fn default() -> Self {
        Self {
            mode: BorderMode::Nearest,
            cval: 0.0,
            preserve_range: false,
            truncate: 4.0,
            channel_axis: ChannelAxis::Unset,
        }
    }
}

impl GaussianOptions {
    /// Set the border mode.
    pub fn with_mode(mut self, mode: BorderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the fill value of [`BorderMode::Constant`].
    pub fn with_cval(mut self, cval: f64) -> Self {
        self.cval = cval;
        self
    }

    /// Keep the original range of integer images.
    pub fn with_preserve_range(mut self, preserve_range: bool) -> Self {
        self.preserve_range = preserve_range;
        self
    }

    /// Set the kernel truncation in standard deviations.
    pub fn with_truncate(mut self, truncate: f64) -> Self {
        self.truncate = truncate;
        self
    }

    /// Set the channel axis, `None` for grayscale images.
    pub fn with_channel_axis(mut self, channel_axis: impl Into<ChannelAxis>) -> Self {
        self.channel_axis = channel_axis.into();
        self
    }

    fn resolve_channel_axis(&self, shape: &[usize]) -> Result<Option<usize>, ImageError> {
        let axis = match self.channel_axis {
            ChannelAxis::Unset if shape.len() == 3 && shape[2] == 3 => {
                log::warn!(
                    "Automatic detection of the color channel is deprecated. \
                     Set the channel axis to -1 explicitly to silence this warning."
                );
                -1
            }
            ChannelAxis::Unset | ChannelAxis::Grayscale => return Ok(None),
            ChannelAxis::Axis(axis) => axis,
        };
        normalize_axis(axis, shape.len()).map(Some)
    }
}

/// Multi-dimensional Gaussian filter.
///
/// The image is converted to its float type first (see
/// [`convert_to_float`]), then smoothed along every axis but the channel
/// axis.
///
/// # Arguments
///
/// * `image` - The input image of any rank, grayscale or color.
/// * `sigma` - The standard deviation of the kernel, a scalar or one value per axis.
/// * `options` - Border handling, range and channel options.
///
/// # Returns
///
/// The filtered image in the float type of `T`.
///
/// # Example
///
/// ```
/// use chromata_imgproc::filter::{gaussian, GaussianOptions};
/// use ndarray::Array2;
///
/// let mut image = Array2::<f64>::zeros((3, 3));
/// image[[1, 1]] = 1.0;
///
/// let smooth = gaussian(&image, 0.4f64, &GaussianOptions::default()).unwrap();
///
/// assert!((smooth[[1, 1]] - 0.84496158).abs() < 1e-8);
/// ```
pub fn gaussian<T, S, D>(
    image: &ArrayBase<S, D>,
    sigma: impl Into<Sigma>,
    options: &GaussianOptions,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    let mut output = Array::<T::Float, D>::zeros(image.raw_dim());
    gaussian_into(image, sigma, &mut output, options)?;
    Ok(output)
}

/// Multi-dimensional Gaussian filter writing into a caller buffer.
///
/// Intermediate per-axis results are stored in the element type of
/// `output`, which must be a floating point type.
///
/// # Arguments
///
/// * `image` - The input image of any rank, grayscale or color.
/// * `sigma` - The standard deviation of the kernel, a scalar or one value per axis.
/// * `output` - The output array, same shape as `image`.
/// * `options` - Border handling, range and channel options.
pub fn gaussian_into<T, U, S1, S2, D>(
    image: &ArrayBase<S1, D>,
    sigma: impl Into<Sigma>,
    output: &mut ArrayBase<S2, D>,
    options: &GaussianOptions,
) -> Result<(), ImageError>
where
    T: ImageDtype,
    U: ImageDtype,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = U>,
    D: Dimension,
{
    let sigma = sigma.into();
    sigma.check_non_negative()?;

    if !options.truncate.is_finite() || options.truncate < 0.0 {
        return Err(ImageError::InvalidTruncate(options.truncate));
    }

    let channel_axis = options.resolve_channel_axis(image.shape())?;
    let sigmas = sigma.per_axis(image.ndim(), channel_axis)?;

    if U::KIND != DtypeKind::Float {
        return Err(ImageError::InvalidOutputDtype(U::NAME));
    }
    if image.shape() != output.shape() {
        return Err(ImageError::ShapeMismatch {
            expected: image.shape().to_vec(),
            actual: output.shape().to_vec(),
        });
    }

    let image = convert_to_float(image, options.preserve_range);

    gaussian_filter(
        &image,
        &sigmas,
        options.mode,
        options.cval,
        options.truncate,
        output,
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chromata_image::{ChannelAxis, ImageError};
    use ndarray::{Array2, Array3, Axis};

    use super::{GaussianOptions, Sigma};
    use crate::filter::BorderMode;

    fn impulse() -> Array2<f64> {
        let mut image = Array2::zeros((3, 3));
        image[[1, 1]] = 1.0;
        image
    }

    #[test]
    fn test_sigma_per_axis() -> Result<(), ImageError> {
        assert_eq!(Sigma::from(2.0f64).per_axis(3, None)?, vec![2.0; 3]);
        assert_eq!(Sigma::from(2.0f64).per_axis(3, Some(2))?, vec![2.0, 2.0, 0.0]);
        assert_eq!(Sigma::from([1.0, 2.0]).per_axis(3, Some(0))?, vec![0.0, 1.0, 2.0]);
        assert_eq!(Sigma::from(vec![1.0, 2.0, 3.0]).per_axis(3, Some(1))?, vec![1.0, 0.0, 3.0]);
        assert_eq!(
            Sigma::from([1.0, 2.0]).per_axis(3, None),
            Err(ImageError::InvalidSigmaLength {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            Sigma::from(&[1.0][..]).per_axis(3, Some(2)),
            Err(ImageError::InvalidSigmaLength {
                expected: 2,
                actual: 1
            })
        );
        Ok(())
    }

    #[test]
    fn test_gaussian_impulse() -> Result<(), ImageError> {
        let image = impulse();

        let out = super::gaussian(&image, 0.4f64, &GaussianOptions::default())?;
        assert_relative_eq!(out[[1, 1]], 0.84496158, epsilon = 1e-8);
        assert_relative_eq!(out[[0, 1]], 0.03712502, epsilon = 1e-8);
        assert_relative_eq!(out[[0, 0]], 0.00163116, epsilon = 1e-8);

        let out = super::gaussian(&image, 1.0f64, &GaussianOptions::default())?;
        assert_relative_eq!(out[[1, 1]], 0.15915589, epsilon = 1e-8);
        assert_relative_eq!(out[[1, 0]], 0.09653293, epsilon = 1e-8);
        assert_relative_eq!(out[[2, 2]], 0.05855018, epsilon = 1e-8);

        let options = GaussianOptions::default().with_mode(BorderMode::Reflect);
        let out = super::gaussian(&image, 1.0f64, &options)?;
        assert_relative_eq!(out[[1, 1]], 0.16630671, epsilon = 1e-8);
        assert_relative_eq!(out[[2, 1]], 0.12075024, epsilon = 1e-8);
        assert_relative_eq!(out[[0, 2]], 0.08767308, epsilon = 1e-8);
        Ok(())
    }

    #[test]
    fn test_negative_sigma() {
        let image = impulse();
        let options = GaussianOptions::default();
        assert_eq!(
            super::gaussian(&image, -1.0f64, &options),
            Err(ImageError::NegativeSigma(-1.0))
        );
        assert_eq!(
            super::gaussian(&image, [1.0f64, -0.5], &options),
            Err(ImageError::NegativeSigma(-0.5))
        );
    }

    #[test]
    fn test_invalid_truncate() {
        let image = impulse();
        for truncate in [-1.0, f64::NAN, f64::INFINITY] {
            let options = GaussianOptions::default().with_truncate(truncate);
            let res = super::gaussian(&image, 1.0f64, &options);
            assert!(matches!(res, Err(ImageError::InvalidTruncate(_))));
        }
    }

    #[test]
    fn test_integer_output_rejected() {
        let image = impulse();
        let mut output = Array2::<u8>::zeros((3, 3));
        let res = super::gaussian_into(&image, 1.0f64, &mut output, &GaussianOptions::default());
        assert_eq!(res, Err(ImageError::InvalidOutputDtype("u8")));
    }

    #[test]
    fn test_output_shape_mismatch() {
        let image = impulse();
        let mut output = Array2::<f32>::zeros((3, 4));
        let res = super::gaussian_into(&image, 1.0f64, &mut output, &GaussianOptions::default());
        assert!(matches!(res, Err(ImageError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_preserve_range() -> Result<(), ImageError> {
        let image = Array2::<u8>::from_elem((4, 4), 100);

        let out = super::gaussian(&image, 1.0f64, &GaussianOptions::default())?;
        assert_relative_eq!(out[[2, 2]], 100.0f32 / 255.0, epsilon = 1e-6);

        let options = GaussianOptions::default().with_preserve_range(true);
        let out = super::gaussian(&image, 1.0f64, &options)?;
        assert_relative_eq!(out[[2, 2]], 100.0f32, epsilon = 1e-4);
        Ok(())
    }

    #[test]
    fn test_channels_not_mixed() -> Result<(), ImageError> {
        let mut image = Array3::<f64>::zeros((3, 5, 5));
        image.index_axis_mut(Axis(0), 1).fill(1.0);

        let options = GaussianOptions::default().with_channel_axis(0isize);
        let out = super::gaussian(&image, 1.0f64, &options)?;
        assert!(out.index_axis(Axis(0), 0).iter().all(|&v| v == 0.0));
        assert!(out.index_axis(Axis(0), 2).iter().all(|&v| v == 0.0));
        assert_relative_eq!(out.index_axis(Axis(0), 1).sum(), 25.0, epsilon = 1e-9);

        // without a channel axis the planes bleed into each other
        let options = GaussianOptions::default().with_channel_axis(None::<isize>);
        let out = super::gaussian(&image, 1.0f64, &options)?;
        assert!(out.index_axis(Axis(0), 0).iter().all(|&v| v > 0.0));
        Ok(())
    }

    #[test]
    fn test_deprecated_channel_detection() -> Result<(), ImageError> {
        let image = Array3::<f64>::from_shape_fn((5, 5, 3), |(_, _, c)| c as f64);
        let options = GaussianOptions::default();
        assert_eq!(options.channel_axis, ChannelAxis::Unset);

        // (M, N, 3) is read as color and the channels stay separate
        let out = super::gaussian(&image, 1.0f64, &options)?;
        assert_relative_eq!(out, image, epsilon = 1e-12);

        // any other shape is filtered as a whole
        let image = Array3::<f64>::from_shape_fn((5, 5, 4), |(_, _, c)| c as f64);
        let out = super::gaussian(&image, 1.0f64, &options)?;
        assert!((out[[0, 0, 0]] - image[[0, 0, 0]]).abs() > 1e-3);
        Ok(())
    }

    #[test]
    fn test_gaussian_into_f32_output() -> Result<(), ImageError> {
        let image = impulse();
        let mut output = Array2::<f32>::zeros((3, 3));
        super::gaussian_into(&image, 0.4f64, &mut output, &GaussianOptions::default())?;
        assert_relative_eq!(output[[1, 1]], 0.84496158f32, epsilon = 1e-6);
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_options_serde() -> Result<(), serde_json::Error> {
        let json = r#"{"mode": "reflect", "truncate": 3.0, "channel_axis": {"axis": -1}}"#;
        let options: GaussianOptions = serde_json::from_str(json)?;
        assert_eq!(
            options,
            GaussianOptions::default()
                .with_mode(BorderMode::Reflect)
                .with_truncate(3.0)
                .with_channel_axis(-1isize)
        );

        let back: GaussianOptions = serde_json::from_str(&serde_json::to_string(&options)?)?;
        assert_eq!(back, options);

        assert_eq!(serde_json::from_str::<Sigma>("2.0")?, Sigma::Scalar(2.0));
        assert_eq!(
            serde_json::from_str::<Sigma>("[1.0, 2.0]")?,
            Sigma::PerAxis(vec![1.0, 2.0])
        );
        Ok(())
    }
}
