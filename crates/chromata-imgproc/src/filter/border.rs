use std::fmt;
use std::str::FromStr;

use chromata_image::ImageError;

/// How a filter extends the input beyond its edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BorderMode {
    /// Reflect about the edge, repeating the edge sample.
    ///
    /// Example: `d c b a | a b c d | d c b a`
    Reflect,

    /// Fill with a constant value.
    ///
    /// Example: `k k k k | a b c d | k k k k`
    Constant,

    /// Repeat the outermost sample.
    ///
    /// Example: `a a a a | a b c d | d d d d`
    #[default]
    Nearest,

    /// Reflect about the center of the edge sample.
    ///
    /// Example: `d c b | a b c d | c b a`
    Mirror,

    /// Wrap around to the opposite edge.
    ///
    /// Example: `a b c d | a b c d | a b c d`
    Wrap,
}

impl BorderMode {
    /// All the border modes.
    pub const ALL: [BorderMode; 5] = [
        BorderMode::Reflect,
        BorderMode::Constant,
        BorderMode::Nearest,
        BorderMode::Mirror,
        BorderMode::Wrap,
    ];

    /// The lowercase name of the mode.
    pub fn name(self) -> &'static str {
        match self {
            BorderMode::Reflect => "reflect",
            BorderMode::Constant => "constant",
            BorderMode::Nearest => "nearest",
            BorderMode::Mirror => "mirror",
            BorderMode::Wrap => "wrap",
        }
    }

    #[inline]
    fn reflect(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let period = 2 * len as isize;
        let i = i.rem_euclid(period);
        if i < len as isize {
            i as usize
        } else {
            (period - i - 1) as usize
        }
    }

    #[inline]
    fn mirror(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let period = 2 * len as isize - 2;
        let i = i.rem_euclid(period);
        if i < len as isize {
            i as usize
        } else {
            (period - i) as usize
        }
    }

    /// Maps index `i` to a valid index within `[0, len)` according to the mode.
    ///
    /// # Arguments
    ///
    /// * `i` - The (possibly out-of-range) coordinate index.
    /// * `len` - The valid length of the dimension, at least 1.
    ///
    /// # Returns
    ///
    /// The mapped index, or `None` when [`BorderMode::Constant`] falls outside
    /// of the input and the fill value applies.
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if (0..len as isize).contains(&i) {
            return Some(i as usize);
        }
        match self {
            BorderMode::Constant => None,
            BorderMode::Nearest => Some(i.clamp(0, len as isize - 1) as usize),
            BorderMode::Reflect => Some(Self::reflect(i, len)),
            BorderMode::Mirror => Some(Self::mirror(i, len)),
            BorderMode::Wrap => Some(i.rem_euclid(len as isize) as usize),
        }
    }
}

impl fmt::Display for BorderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BorderMode {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BorderMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ImageError::UnknownBorderMode(s.to_string()))
    }
}
