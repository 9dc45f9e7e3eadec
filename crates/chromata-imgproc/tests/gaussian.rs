use approx::assert_abs_diff_eq;
use chromata_image::ImageError;
use chromata_imgproc::filter::{gaussian, gaussian_into, BorderMode, GaussianOptions};
use ndarray::{s, Array2, Array3, Array4, ArrayD, Axis, IxDyn};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn std_dev<D: ndarray::Dimension>(a: &ndarray::Array<f64, D>) -> f64 {
    let mean = a.mean().unwrap_or(0.0);
    (a.mapv(|v| (v - mean).powi(2)).sum() / a.len() as f64).sqrt()
}

#[test]
fn null_sigma_is_identity() -> Result<(), ImageError> {
    let mut a = Array2::<f64>::zeros((3, 3));
    a[[1, 1]] = 1.0;

    let out = gaussian(&a, 0.0f64, &GaussianOptions::default())?;
    assert_eq!(out, a);

    let out = gaussian(&a.mapv(|v| v as f32), 0.0f64, &GaussianOptions::default())?;
    assert_eq!(out, a.mapv(|v| v as f32));
    Ok(())
}

#[test]
fn energy_decreases() -> Result<(), ImageError> {
    let mut a = Array2::<f64>::zeros((3, 3));
    a[[1, 1]] = 1.0;

    let blurred = gaussian(&a, 2.0f64, &GaussianOptions::default())?;
    assert!(std_dev(&blurred) < std_dev(&a));

    // periodic borders keep the total intensity
    let options = GaussianOptions::default().with_mode(BorderMode::Wrap);
    let blurred = gaussian(&a, 2.0f64, &options)?;
    assert_abs_diff_eq!(blurred.sum(), 1.0, epsilon = 1e-9);
    Ok(())
}

#[test]
fn color_channels_are_filtered_independently() -> Result<(), ImageError> {
    let mut a = Array3::<f64>::zeros((5, 5, 3));
    a[[2, 2, 0]] = 1.0;
    a[[2, 2, 2]] = 0.5;
    let options = GaussianOptions::default().with_channel_axis(-1isize);

    let out = gaussian(&a, 1.0f64, &options)?;
    let red = gaussian(&a.index_axis(Axis(2), 0), 1.0f64, &GaussianOptions::default())?;

    assert_abs_diff_eq!(out.index_axis(Axis(2), 0), red.view(), epsilon = 1e-12);
    assert!(out.index_axis(Axis(2), 1).iter().all(|&v| v == 0.0));
    assert_abs_diff_eq!(
        out.index_axis(Axis(2), 2),
        (&red * 0.5).view(),
        epsilon = 1e-12
    );

    // the same with the channels in front
    let planar = a.view().permuted_axes([2, 0, 1]);
    let options = GaussianOptions::default().with_channel_axis(0isize);
    let out_planar = gaussian(&planar, 1.0f64, &options)?;
    assert_abs_diff_eq!(out_planar.permuted_axes([1, 2, 0]), out, epsilon = 1e-12);
    Ok(())
}

#[test]
fn three_columns_as_spatial_axis() -> Result<(), ImageError> {
    let mut a = Array3::<f64>::zeros((5, 5, 3));
    a[[2, 2, 1]] = 1.0;
    let options = GaussianOptions::default()
        .with_mode(BorderMode::Wrap)
        .with_channel_axis(None::<isize>);

    let out = gaussian(&a, 1.0f64, &options)?;
    // the last axis is smoothed too
    assert!(out[[2, 2, 0]] > 0.0);
    assert!(out[[2, 2, 2]] > 0.0);
    assert_abs_diff_eq!(out.sum(), 1.0, epsilon = 1e-9);

    // unset falls back to a color image for this shape
    let out = gaussian(&a, 1.0f64, &GaussianOptions::default())?;
    assert_eq!(out[[2, 2, 0]], 0.0);
    Ok(())
}

#[test]
fn four_dimensional_input() -> Result<(), ImageError> {
    let mut a = Array4::<f64>::zeros((5, 5, 5, 5));
    a[[2, 2, 2, 2]] = 1.0;

    let options = GaussianOptions::default().with_mode(BorderMode::Wrap);
    let out = gaussian(&a, 1.0f64, &options)?;
    assert_abs_diff_eq!(out.sum(), 1.0, epsilon = 1e-9);
    assert!(out.iter().all(|&v| v <= out[[2, 2, 2, 2]]));

    let dynamic = a.into_dyn();
    let out_dyn = gaussian(&dynamic, 1.0f64, &options)?;
    assert_abs_diff_eq!(out_dyn, out.into_dyn(), epsilon = 1e-15);
    Ok(())
}

#[test]
fn per_axis_sigma() -> Result<(), ImageError> {
    let mut a = Array2::<f64>::zeros((9, 9));
    a[[4, 4]] = 1.0;

    let out = gaussian(&a, [0.0, 2.0], &GaussianOptions::default())?;
    // nothing leaks to other rows
    assert!(out.slice(s![..4, ..]).iter().all(|&v| v == 0.0));
    assert!(out[[4, 0]] > 0.0);

    let res = gaussian(&a, [1.0, 1.0, 1.0], &GaussianOptions::default());
    assert_eq!(
        res,
        Err(ImageError::InvalidSigmaLength {
            expected: 2,
            actual: 3
        })
    );
    Ok(())
}

#[test]
fn u8_range() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(42);
    let a = Array2::from_shape_fn((8, 8), |_| rng.random_range(0..=255u8));

    let scaled = gaussian(&a, 1.0f64, &GaussianOptions::default())?;
    assert!(scaled.iter().all(|&v| (0.0..=1.0 + 1e-6).contains(&v)));

    let options = GaussianOptions::default().with_preserve_range(true);
    let kept = gaussian(&a, 1.0f64, &options)?;
    assert_abs_diff_eq!(kept / 255.0f32, scaled, epsilon = 1e-4);
    Ok(())
}

#[test]
fn constant_border() -> Result<(), ImageError> {
    let a = Array2::<f64>::ones((4, 4));

    let nearest = gaussian(&a, 1.0f64, &GaussianOptions::default())?;
    assert_abs_diff_eq!(nearest, a, epsilon = 1e-12);

    let options = GaussianOptions::default()
        .with_mode(BorderMode::Constant)
        .with_cval(0.0);
    let out = gaussian(&a, 1.0f64, &options)?;
    assert!(out[[0, 0]] < out[[1, 1]]);
    assert!(out.iter().all(|&v| v < 1.0));

    let options = options.with_cval(1.0);
    let out = gaussian(&a, 1.0f64, &options)?;
    assert_abs_diff_eq!(out, a, epsilon = 1e-12);
    Ok(())
}

#[test]
fn output_buffer() -> Result<(), ImageError> {
    let a = ArrayD::<f64>::from_shape_fn(IxDyn(&[6, 7]), |idx| (idx[0] * 7 + idx[1]) as f64);
    let expected = gaussian(&a, 1.5f64, &GaussianOptions::default())?;

    let mut out = ArrayD::<f32>::zeros(IxDyn(&[6, 7]));
    gaussian_into(&a, 1.5f64, &mut out, &GaussianOptions::default())?;
    assert_abs_diff_eq!(out.mapv(f64::from), expected, epsilon = 1e-4);

    let mut out = ArrayD::<u8>::zeros(IxDyn(&[6, 7]));
    let res = gaussian_into(&a, 1.5f64, &mut out, &GaussianOptions::default());
    assert_eq!(res, Err(ImageError::InvalidOutputDtype("u8")));
    Ok(())
}

#[test]
fn invalid_parameters() {
    let a = Array2::<f64>::zeros((3, 3));
    assert_eq!(
        gaussian(&a, -1.0f64, &GaussianOptions::default()),
        Err(ImageError::NegativeSigma(-1.0))
    );
    assert_eq!(
        gaussian(&a, [1.0, -0.5], &GaussianOptions::default()),
        Err(ImageError::NegativeSigma(-0.5))
    );

    let options = GaussianOptions::default().with_truncate(f64::NAN);
    assert!(matches!(
        gaussian(&a, 1.0f64, &options),
        Err(ImageError::InvalidTruncate(_))
    ));

    let options = GaussianOptions::default().with_channel_axis(2isize);
    assert_eq!(
        gaussian(&a, 1.0f64, &options),
        Err(ImageError::AxisOutOfRange { axis: 2, ndim: 2 })
    );
}
