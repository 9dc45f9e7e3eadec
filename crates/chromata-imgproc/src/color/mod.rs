mod convert;
mod gray;
mod hsv;
mod illuminant;
mod lab;
mod luv;
mod pixel;
mod rgb;
mod stain;
mod transform;
mod xyz;
mod yuv;

pub use convert::{convert_colorspace, Colorspace};
pub use gray::{gray_from_rgb, rgb_from_gray, rgba_from_gray, Alpha};
pub use hsv::{hsv_from_rgb, rgb_from_hsv};
pub use illuminant::{parse_white_point, xyz_white_point, Illuminant, Observer};
pub use lab::{
    lab_from_lch, lab_from_rgb, lab_from_xyz, lch_from_lab, rgb_from_lab, xyz_from_lab,
};
pub use luv::{luv_from_rgb, luv_from_xyz, rgb_from_luv, xyz_from_luv};
pub use pixel::Matrix3;
pub use rgb::rgb_from_rgba;
pub use stain::{combine_stains, hed_from_rgb, rgb_from_hed, separate_stains, Stain};
pub use transform::ColorTransform;
pub use xyz::{
    rgb_from_rgbcie, rgb_from_rgbcie_matrix, rgb_from_xyz, rgbcie_from_rgb,
    rgbcie_from_rgb_matrix, xyz_from_rgb, RGB_FROM_XYZ, XYZ_FROM_RGB, XYZ_FROM_RGBCIE,
};
pub use yuv::{
    rgb_from_ycbcr, rgb_from_ydbdr, rgb_from_yiq, rgb_from_ypbpr, rgb_from_yuv, ycbcr_from_rgb,
    ydbdr_from_rgb, yiq_from_rgb, ypbpr_from_rgb, yuv_from_rgb, YCBCR_FROM_RGB, YCBCR_OFFSET,
    YDBDR_FROM_RGB, YIQ_FROM_RGB, YPBPR_FROM_RGB, YUV_FROM_RGB,
};
