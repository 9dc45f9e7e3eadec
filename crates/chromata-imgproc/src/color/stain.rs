use chromata_image::{ImageDtype, ImageError};
use ndarray::{Array, ArrayBase, Data, Dimension};

use super::pixel::{cross, invert, map_pixels, vec_mat, Matrix3};

/// Optical densities are computed against this floor.
const LOG_FLOOR: f64 = 1e-6;

/// Immunohistochemistry stain vectors.
///
/// Each stain is described by the optical density of its dyes in RGB. When
/// only two dyes are known, the third vector is their cross product.
///
/// Reference: A. C. Ruifrok and D. A. Johnston, "Quantification of
/// histochemical staining by color deconvolution", Analytical and Quantitative
/// Cytology and Histology, 2001.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Stain {
    /// Hematoxylin, Eosin and DAB.
    Hed,
    /// Hematoxylin and DAB.
    Hdx,
    /// Feulgen and Light Green.
    Fgx,
    /// Giemsa: Methyl Blue and Eosin.
    Bex,
    /// FastRed, FastBlue and DAB.
    Rbd,
    /// Methyl Green and DAB.
    Gdx,
    /// Hematoxylin and AEC.
    Hax,
    /// Blue-Red-Orange, Masson's trichrome.
    Bro,
    /// Methyl Blue and Ponceau Fuchsin.
    Bpx,
    /// Alcian Blue and Hematoxylin.
    Ahx,
    /// Hematoxylin and PAS.
    Hpx,
}

impl Stain {
    /// All the stains.
    pub const ALL: [Stain; 11] = [
        Stain::Hed,
        Stain::Hdx,
        Stain::Fgx,
        Stain::Bex,
        Stain::Rbd,
        Stain::Gdx,
        Stain::Hax,
        Stain::Bro,
        Stain::Bpx,
        Stain::Ahx,
        Stain::Hpx,
    ];

    /// The stain to RGB matrix, one dye per row.
    pub fn rgb_from_stain(self) -> Matrix3 {
        let two = |a: [f64; 3], b: [f64; 3]| [a, b, cross(a, b)];
        match self {
            Stain::Hed => [[0.65, 0.70, 0.29], [0.07, 0.99, 0.11], [0.27, 0.57, 0.78]],
            Stain::Hdx => two([0.650, 0.704, 0.286], [0.268, 0.570, 0.776]),
            Stain::Fgx => two(
                [0.46420921, 0.83008335, 0.30827187],
                [0.94705542, 0.25373821, 0.19650764],
            ),
            Stain::Bex => two(
                [0.834750233, 0.513556283, 0.196330403],
                [0.092789, 0.954111, 0.283111],
            ),
            Stain::Rbd => [
                [0.21393921, 0.85112669, 0.47794022],
                [0.74890292, 0.60624161, 0.26731082],
                [0.268, 0.570, 0.776],
            ],
            Stain::Gdx => two([0.98003, 0.144316, 0.133146], [0.268, 0.570, 0.776]),
            Stain::Hax => two([0.650, 0.704, 0.286], [0.2743, 0.6796, 0.6803]),
            Stain::Bro => [
                [0.853033, 0.508733, 0.112656],
                [0.09289875, 0.8662008, 0.49098468],
                [0.10732849, 0.36765403, 0.9237484],
            ],
            Stain::Bpx => two(
                [0.7995107, 0.5913521, 0.10528667],
                [0.09997159, 0.73738605, 0.6680326],
            ),
            Stain::Ahx => two([0.874622, 0.457711, 0.158256], [0.552556, 0.7544, 0.353744]),
            Stain::Hpx => two([0.644211, 0.716556, 0.266844], [0.175411, 0.972178, 0.154589]),
        }
    }

    /// The RGB to stain matrix, the inverse of [`Stain::rgb_from_stain`].
    pub fn stain_from_rgb(self) -> Matrix3 {
        invert(&self.rgb_from_stain())
    }
}

/// Separate an RGB image into stain concentrations.
///
/// The RGB values are turned into optical densities and contracted with
/// `conv_matrix`, usually [`Stain::stain_from_rgb`]. Negative concentrations are
/// clipped to zero.
///
/// # Arguments
///
/// * `image` - The input RGB image of any rank. Integer images are rescaled
///   to `[0, 1]` first.
/// * `conv_matrix` - The RGB to stain matrix.
/// * `channel_axis` - The axis holding the R, G, B channels.
///
/// Precondition: the channel axis must have exactly 3 channels.
pub fn separate_stains<T, S, D>(
    image: &ArrayBase<S, D>,
    conv_matrix: &Matrix3,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    let log_adjust = LOG_FLOOR.ln();
    map_pixels(image, channel_axis, |rgb: [f64; 3]| {
        let density = rgb.map(|c| c.max(LOG_FLOOR).ln() / log_adjust);
        vec_mat(density, conv_matrix).map(|s| s.max(0.0))
    })
}

/// Combine stain concentrations into an RGB image.
///
/// The output is clipped to `[0, 1]`.
///
/// # Arguments
///
/// * `image` - The stain concentrations of any rank.
/// * `conv_matrix` - The stain to RGB matrix, usually [`Stain::rgb_from_stain`].
/// * `channel_axis` - The axis holding the stain channels.
///
/// Precondition: the channel axis must have exactly 3 channels.
pub fn combine_stains<T, S, D>(
    image: &ArrayBase<S, D>,
    conv_matrix: &Matrix3,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    let log_adjust = -LOG_FLOOR.ln();
    map_pixels(image, channel_axis, |stains: [f64; 3]| {
        let density = vec_mat(stains.map(|s| -s * log_adjust), conv_matrix);
        density.map(|d| d.exp().clamp(0.0, 1.0))
    })
}

/// Convert an RGB image to Hematoxylin-Eosin-DAB stain concentrations.
///
/// # Example
///
/// ```
/// use chromata_imgproc::color::{hed_from_rgb, rgb_from_hed};
/// use ndarray::Array3;
///
/// let hed = Array3::<f64>::from_elem((4, 4, 3), 0.1);
/// let rgb = rgb_from_hed(&hed, -1).unwrap();
/// let back = hed_from_rgb(&rgb, -1).unwrap();
///
/// assert!((back[[1, 2, 0]] - 0.1).abs() < 1e-9);
/// ```
pub fn hed_from_rgb<T, S, D>(
    image: &ArrayBase<S, D>,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    separate_stains(image, &Stain::Hed.stain_from_rgb(), channel_axis)
}

/// Convert Hematoxylin-Eosin-DAB stain concentrations to an RGB image.
pub fn rgb_from_hed<T, S, D>(
    image: &ArrayBase<S, D>,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    combine_stains(image, &Stain::Hed.rgb_from_stain(), channel_axis)
}
