use chromata_image::{normalize_axis, FloatDtype, ImageDtype, ImageError};
use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::parallel;

/// A 3x3 matrix stored row major.
pub type Matrix3 = [[f64; 3]; 3];

/// Resolve the channel axis of `shape` and check its extent.
pub(crate) fn channel_index(
    shape: &[usize],
    channel_axis: isize,
    expected: usize,
) -> Result<usize, ImageError> {
    if shape.is_empty() {
        return Err(ImageError::MissingChannelAxis(Vec::new()));
    }
    let axis = normalize_axis(channel_axis, shape.len())?;
    if shape[axis] != expected {
        return Err(ImageError::InvalidChannelCount {
            expected,
            shape: shape.to_vec(),
        });
    }
    Ok(axis)
}

/// Apply a per-pixel function over the channel axis of an image.
///
/// Input values are normalized with `img_as_float` semantics and processed
/// in `f64`; results are stored in the supported float type of `T`. The
/// channel axis must have extent `CI` and has extent `CO` in the output.
pub(crate) fn map_pixels<T, S, D, F, const CI: usize, const CO: usize>(
    image: &ArrayBase<S, D>,
    channel_axis: isize,
    f: F,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
    F: Fn([f64; CI]) -> [f64; CO] + Send + Sync,
{
    let axis = channel_index(image.shape(), channel_axis, CI)?;

    let mut dim = image.raw_dim();
    dim[axis] = CO;
    let mut dst = Array::<T::Float, D>::zeros(dim);

    parallel::par_iter_lanes(image, &mut dst, axis, |src_pixel, mut dst_pixel| {
        let mut px = [0.0; CI];
        px.iter_mut()
            .zip(src_pixel.iter())
            .for_each(|(p, &v)| *p = v.to_unit_float().as_f64());

        dst_pixel
            .iter_mut()
            .zip(f(px))
            .for_each(|(d, v)| *d = <T::Float as ImageDtype>::from_f64(v));
    });

    Ok(dst)
}

/// Like [`map_pixels`] for three component transforms on images with at
/// least three channels; channels beyond the third are copied unchanged.
pub(crate) fn map_pixels_passthrough<T, S, D, F>(
    image: &ArrayBase<S, D>,
    channel_axis: isize,
    f: F,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
    F: Fn([f64; 3]) -> [f64; 3] + Send + Sync,
{
    if image.ndim() == 0 {
        return Err(ImageError::MissingChannelAxis(Vec::new()));
    }
    let axis = normalize_axis(channel_axis, image.ndim())?;
    if image.shape()[axis] < 3 {
        return Err(ImageError::InvalidChannelCount {
            expected: 3,
            shape: image.shape().to_vec(),
        });
    }

    let mut dst = Array::<T::Float, D>::zeros(image.raw_dim());

    parallel::par_iter_lanes(image, &mut dst, axis, |src_pixel, mut dst_pixel| {
        let px = [
            src_pixel[0].to_unit_float().as_f64(),
            src_pixel[1].to_unit_float().as_f64(),
            src_pixel[2].to_unit_float().as_f64(),
        ];
        let out = f(px);
        for (c, d) in dst_pixel.iter_mut().enumerate() {
            *d = match out.get(c) {
                Some(&v) => <T::Float as ImageDtype>::from_f64(v),
                None => src_pixel[c].to_unit_float(),
            };
        }
    });

    Ok(dst)
}

/// Machine epsilon of a float type, as `f64`.
pub(crate) fn epsilon<F: FloatDtype>() -> f64 {
    F::epsilon().as_f64()
}

/// Multiply a column vector by a matrix: `out[c] = sum_k m[c][k] * v[k]`.
#[inline]
pub(crate) fn mat_vec(m: &Matrix3, v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Multiply a row vector by a matrix: `out[c] = sum_k v[k] * m[k][c]`.
#[inline]
pub(crate) fn vec_mat(v: [f64; 3], m: &Matrix3) -> [f64; 3] {
    [
        v[0] * m[0][0] + v[1] * m[1][0] + v[2] * m[2][0],
        v[0] * m[0][1] + v[1] * m[1][1] + v[2] * m[2][1],
        v[0] * m[0][2] + v[1] * m[1][2] + v[2] * m[2][2],
    ]
}

pub(crate) fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Inverse of a 3x3 matrix by the adjugate.
///
/// Precondition: the matrix is not singular.
pub(crate) fn invert(m: &Matrix3) -> Matrix3 {
    let c0 = cross(m[1], m[2]);
    let c1 = cross(m[2], m[0]);
    let c2 = cross(m[0], m[1]);
    let inv_det = 1.0 / (m[0][0] * c0[0] + m[0][1] * c0[1] + m[0][2] * c0[2]);

    let mut out = [[0.0; 3]; 3];
    for (r, row) in out.iter_mut().enumerate() {
        row[0] = c0[r] * inv_det;
        row[1] = c1[r] * inv_det;
        row[2] = c2[r] * inv_det;
    }
    out
}

/// Matrix product `a * b`.
pub(crate) fn mat_mul(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let mut out = [[0.0; 3]; 3];
    for (r, row) in out.iter_mut().enumerate() {
        *row = vec_mat(a[r], b);
    }
    out
}
