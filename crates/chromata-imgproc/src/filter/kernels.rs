/// Radius of a truncated Gaussian kernel.
///
/// # Arguments
///
/// * `sigma` - The standard deviation of the Gaussian.
/// * `truncate` - The number of standard deviations kept on each side.
///
/// # Returns
///
/// `floor(truncate * sigma + 0.5)`.
pub fn gaussian_kernel_radius(sigma: f64, truncate: f64) -> usize {
    (truncate * sigma + 0.5).floor() as usize
}

/// Create a gaussian kernel.
///
/// # Arguments
///
/// * `sigma` - The sigma of the gaussian kernel.
/// * `radius` - The half width of the kernel, the kernel has `2 * radius + 1` taps.
///
/// # Returns
///
/// A vector of the kernel, normalized to unit sum.
pub fn gaussian_kernel_1d(sigma: f64, radius: usize) -> Vec<f64> {
    let sigma_sq = sigma * sigma;
    let r = radius as isize;

    // compute the kernel
    let mut kernel = (-r..=r)
        .map(|x| {
            let x = x as f64;
            (-(x * x) / (2.0 * sigma_sq)).exp()
        })
        .collect::<Vec<_>>();

    // normalize the kernel
    let norm = kernel.iter().sum::<f64>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    #[test]
    fn test_gaussian_kernel_radius() {
        assert_eq!(super::gaussian_kernel_radius(1.0, 4.0), 4);
        assert_eq!(super::gaussian_kernel_radius(0.4, 4.0), 2);
        assert_eq!(super::gaussian_kernel_radius(2.5, 3.0), 8);
        assert_eq!(super::gaussian_kernel_radius(1.0, 0.0), 0);
    }

    #[test]
    fn test_gaussian_kernel_1d() {
        let kernel = super::gaussian_kernel_1d(1.0, 2);
        assert_eq!(kernel.len(), 5);
        assert_relative_eq!(kernel.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(kernel[0], kernel[4]);
        assert_relative_eq!(kernel[1], kernel[3]);
        assert_relative_eq!(kernel[2], 0.40261995, epsilon = 1e-8);
        assert_relative_eq!(kernel[1], 0.24420134, epsilon = 1e-8);
        assert_relative_eq!(kernel[0], 0.05448868, epsilon = 1e-8);
    }

    #[test]
    fn test_gaussian_kernel_zero_radius() {
        assert_eq!(super::gaussian_kernel_1d(0.1, 0), vec![1.0]);
    }
}
