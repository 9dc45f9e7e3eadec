use crate::error::ImageError;

/// Where the color channels of an image live.
///
/// Conversions take the channel axis as a plain `isize`. The Gaussian filter
/// keeps the distinction: `Unset` may trigger a deprecated auto-detection,
/// [`ChannelAxis::Grayscale`] states that every axis is spatial.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChannelAxis {
    /// No axis given by the caller.
    #[default]
    Unset,
    /// The image has no channel axis.
    Grayscale,
    /// The channels live on this axis, negative values count from the end.
    Axis(isize),
}

impl From<isize> for ChannelAxis {
    fn from(axis: isize) -> Self {
        ChannelAxis::Axis(axis)
    }
}

impl From<Option<isize>> for ChannelAxis {
    fn from(axis: Option<isize>) -> Self {
        match axis {
            Some(axis) => ChannelAxis::Axis(axis),
            None => ChannelAxis::Grayscale,
        }
    }
}

/// Resolve a possibly negative axis against an array rank.
///
/// # Arguments
///
/// * `axis` - The axis, in `[-ndim, ndim)`.
/// * `ndim` - The rank of the array.
///
/// # Returns
///
/// The axis as an index in `[0, ndim)`.
pub fn normalize_axis(axis: isize, ndim: usize) -> Result<usize, ImageError> {
    let n = ndim as isize;
    if axis < -n || axis >= n {
        return Err(ImageError::AxisOutOfRange { axis, ndim });
    }
    Ok(if axis < 0 { (axis + n) as usize } else { axis as usize })
}
