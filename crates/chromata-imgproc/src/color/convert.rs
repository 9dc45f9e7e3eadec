use std::fmt;
use std::str::FromStr;

use chromata_image::{ImageDtype, ImageError};
use ndarray::{Array, ArrayBase, Data, Dimension};

use super::hsv::{hsv_pixel_from_rgb, rgb_pixel_from_hsv};
use super::pixel::map_pixels;
use super::transform::ColorTransform;
use super::xyz::{rgb_from_rgbcie_matrix, rgb_pixel_from_xyz, rgbcie_from_rgb_matrix, xyz_pixel_from_rgb};
use super::yuv::LumaChroma;

/// The colorspaces reachable through [`convert_colorspace`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Colorspace {
    /// sRGB.
    Rgb,
    /// Hue, saturation, value.
    Hsv,
    /// CIE 1931 RGB.
    RgbCie,
    /// CIE 1931 XYZ.
    Xyz,
    /// YUV.
    Yuv,
    /// YIQ.
    Yiq,
    /// YPbPr.
    YPbPr,
    /// YCbCr.
    YCbCr,
    /// YDbDr.
    YDbDr,
}

impl Colorspace {
    /// All the colorspaces.
    pub const ALL: [Colorspace; 9] = [
        Colorspace::Rgb,
        Colorspace::Hsv,
        Colorspace::RgbCie,
        Colorspace::Xyz,
        Colorspace::Yuv,
        Colorspace::Yiq,
        Colorspace::YPbPr,
        Colorspace::YCbCr,
        Colorspace::YDbDr,
    ];

    /// The canonical name of the colorspace.
    pub fn name(self) -> &'static str {
        match self {
            Colorspace::Rgb => "RGB",
            Colorspace::Hsv => "HSV",
            Colorspace::RgbCie => "RGB CIE",
            Colorspace::Xyz => "XYZ",
            Colorspace::Yuv => "YUV",
            Colorspace::Yiq => "YIQ",
            Colorspace::YPbPr => "YPbPr",
            Colorspace::YCbCr => "YCbCr",
            Colorspace::YDbDr => "YDbDr",
        }
    }

    /// The transform from sRGB into this colorspace.
    pub fn transform_from_rgb(self) -> ColorTransform {
        match self {
            Colorspace::Rgb => ColorTransform::Identity,
            Colorspace::Hsv => ColorTransform::Piecewise(hsv_pixel_from_rgb),
            Colorspace::RgbCie => ColorTransform::linear(rgbcie_from_rgb_matrix()),
            Colorspace::Xyz => ColorTransform::Piecewise(xyz_pixel_from_rgb),
            Colorspace::Yuv => LumaChroma::Yuv.transform_from_rgb(),
            Colorspace::Yiq => LumaChroma::Yiq.transform_from_rgb(),
            Colorspace::YPbPr => LumaChroma::YPbPr.transform_from_rgb(),
            Colorspace::YCbCr => LumaChroma::YCbCr.transform_from_rgb(),
            Colorspace::YDbDr => LumaChroma::YDbDr.transform_from_rgb(),
        }
    }

    /// The transform from this colorspace back to sRGB.
    pub fn transform_to_rgb(self) -> ColorTransform {
        match self {
            Colorspace::Rgb => ColorTransform::Identity,
            Colorspace::Hsv => ColorTransform::Piecewise(rgb_pixel_from_hsv),
            Colorspace::RgbCie => ColorTransform::linear(rgb_from_rgbcie_matrix()),
            Colorspace::Xyz => ColorTransform::Piecewise(rgb_pixel_from_xyz),
            Colorspace::Yuv => LumaChroma::Yuv.transform_to_rgb(),
            Colorspace::Yiq => LumaChroma::Yiq.transform_to_rgb(),
            Colorspace::YPbPr => LumaChroma::YPbPr.transform_to_rgb(),
            Colorspace::YCbCr => LumaChroma::YCbCr.transform_to_rgb(),
            Colorspace::YDbDr => LumaChroma::YDbDr.transform_to_rgb(),
        }
    }
}

impl fmt::Display for Colorspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colorspace {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colorspace::ALL
            .into_iter()
            .find(|space| space.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ImageError::UnknownColorspace {
                name: s.to_string(),
                valid: Colorspace::ALL
                    .iter()
                    .map(|space| space.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Convert an image between two colorspaces.
///
/// The image goes through sRGB: `from` is converted to RGB and RGB to `to`,
/// both stages applied to each pixel in a single pass.
///
/// # Arguments
///
/// * `image` - The input image of any rank. Integer images are rescaled to
///   `[0, 1]` first.
/// * `from` - The colorspace of the input.
/// * `to` - The colorspace of the output.
/// * `channel_axis` - The axis holding the color channels.
///
/// Precondition: the channel axis must have exactly 3 channels.
///
/// # Example
///
/// ```
/// use chromata_imgproc::color::{convert_colorspace, Colorspace};
/// use ndarray::array;
///
/// let rgb = array![[[1.0f32, 0.0, 0.0]]];
/// let from: Colorspace = "rgb".parse().unwrap();
/// let hsv = convert_colorspace(&rgb, from, Colorspace::Hsv, -1).unwrap();
///
/// assert_eq!(hsv, array![[[0.0f32, 1.0, 1.0]]]);
/// ```
pub fn convert_colorspace<T, S, D>(
    image: &ArrayBase<S, D>,
    from: Colorspace,
    to: Colorspace,
    channel_axis: isize,
) -> Result<Array<T::Float, D>, ImageError>
where
    T: ImageDtype,
    S: Data<Elem = T>,
    D: Dimension,
{
    let to_rgb = from.transform_to_rgb();
    let from_rgb = to.transform_from_rgb();
    map_pixels(image, channel_axis, |px: [f64; 3]| {
        from_rgb.apply_pixel(to_rgb.apply_pixel(px))
    })
}
