use chromata_image::{ImageDtype, ImageError};
use ndarray::{ArrayBase, Data, DataMut, Dimension};

use super::border::BorderMode;
use super::kernels::{gaussian_kernel_1d, gaussian_kernel_radius};
use crate::parallel;

/// Sigmas at or below this value leave their axis untouched.
const MIN_SIGMA: f64 = 1e-15;

fn check_shapes<S1, S2, D, T, U>(
    input: &ArrayBase<S1, D>,
    output: &ArrayBase<S2, D>,
) -> Result<(), ImageError>
where
    S1: Data<Elem = T>,
    S2: Data<Elem = U>,
    D: Dimension,
{
    if input.shape() != output.shape() {
        return Err(ImageError::ShapeMismatch {
            expected: input.shape().to_vec(),
            actual: output.shape().to_vec(),
        });
    }
    Ok(())
}

/// Correlate an array with a 1-D kernel along one axis.
///
/// The kernel is centered on each sample: `out[i] = sum_j w[j] * in[i + j - w.len() / 2]`,
/// samples outside of the array follow `mode`. Lanes are processed in parallel and
/// accumulated in `f64`.
///
/// # Arguments
///
/// * `input` - The input array of any rank.
/// * `weights` - The kernel.
/// * `axis` - The axis to correlate along.
/// * `mode` - How to extend the input beyond its edges.
/// * `cval` - The fill value of [`BorderMode::Constant`].
/// * `output` - The output array, same shape as `input`.
pub fn correlate1d<T, U, S1, S2, D>(
    input: &ArrayBase<S1, D>,
    weights: &[f64],
    axis: usize,
    mode: BorderMode,
    cval: f64,
    output: &mut ArrayBase<S2, D>,
) -> Result<(), ImageError>
where
    T: ImageDtype,
    U: ImageDtype,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = U>,
    D: Dimension,
{
    if axis >= input.ndim() {
        return Err(ImageError::AxisOutOfRange {
            axis: axis as isize,
            ndim: input.ndim(),
        });
    }
    check_shapes(input, output)?;

    let center = (weights.len() / 2) as isize;

    parallel::par_iter_lanes(input, output, axis, |src, mut dst| {
        let len = src.len();
        for (i, d) in dst.iter_mut().enumerate() {
            let acc = weights
                .iter()
                .enumerate()
                .map(|(j, &w)| {
                    let k = i as isize + j as isize - center;
                    let v = match mode.map_index(k, len) {
                        Some(k) => src[k].as_f64(),
                        None => cval,
                    };
                    w * v
                })
                .sum::<f64>();
            *d = U::from_f64(acc);
        }
    });

    Ok(())
}

/// Multi-dimensional Gaussian filter.
///
/// Applies a normalized 1-D Gaussian along every axis whose sigma exceeds
/// `1e-15`, one axis after the other. Intermediate results are stored in
/// the output type.
///
/// # Arguments
///
/// * `input` - The input array of any rank.
/// * `sigma` - The standard deviation of each axis, one per axis.
/// * `mode` - How to extend the input beyond its edges.
/// * `cval` - The fill value of [`BorderMode::Constant`].
/// * `truncate` - The kernel radius in standard deviations.
/// * `output` - The output array, same shape as `input`.
pub fn gaussian_filter<T, U, S1, S2, D>(
    input: &ArrayBase<S1, D>,
    sigma: &[f64],
    mode: BorderMode,
    cval: f64,
    truncate: f64,
    output: &mut ArrayBase<S2, D>,
) -> Result<(), ImageError>
where
    T: ImageDtype,
    U: ImageDtype,
    S1: Data<Elem = T>,
    S2: DataMut<Elem = U>,
    D: Dimension,
{
    if sigma.len() != input.ndim() {
        return Err(ImageError::InvalidSigmaLength {
            expected: input.ndim(),
            actual: sigma.len(),
        });
    }
    check_shapes(input, output)?;

    let axes = sigma
        .iter()
        .enumerate()
        .filter(|(_, &s)| s > MIN_SIGMA)
        .map(|(axis, &s)| (axis, gaussian_kernel_1d(s, gaussian_kernel_radius(s, truncate))))
        .collect::<Vec<_>>();

    let Some(((first_axis, first_weights), rest)) = axes.split_first() else {
        output.zip_mut_with(input, |o, &i| *o = U::from_f64(i.as_f64()));
        return Ok(());
    };

    correlate1d(input, first_weights, *first_axis, mode, cval, output)?;
    for (axis, weights) in rest {
        let tmp = output.to_owned();
        correlate1d(&tmp, weights, *axis, mode, cval, output)?;
    }

    Ok(())
}
