use std::fmt;
use std::str::FromStr;

use chromata_image::ImageError;

/// CIE standard illuminants used as the reference white of Lab and Luv.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Illuminant {
    /// Incandescent / tungsten.
    A,
    /// Obsolete direct sunlight at noon.
    B,
    /// Obsolete average / north sky daylight.
    C,
    /// Horizon light, ICC profile PCS.
    D50,
    /// Mid-morning / mid-afternoon daylight.
    D55,
    /// Noon daylight, television and sRGB color space.
    #[default]
    D65,
    /// North sky daylight.
    D75,
    /// Equal energy.
    E,
}

/// Aperture angle of the CIE standard observer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Observer {
    /// CIE 1931 2 degree observer.
    #[default]
    Two,
    /// CIE 1964 10 degree observer.
    Ten,
    /// CIE 2006 reference observer, used for the "R" white points.
    Reference,
}

impl Illuminant {
    /// All illuminants, in table order.
    pub const ALL: [Illuminant; 8] = [
        Illuminant::A,
        Illuminant::B,
        Illuminant::C,
        Illuminant::D50,
        Illuminant::D55,
        Illuminant::D65,
        Illuminant::D75,
        Illuminant::E,
    ];

    fn name(self) -> &'static str {
        match self {
            Illuminant::A => "A",
            Illuminant::B => "B",
            Illuminant::C => "C",
            Illuminant::D50 => "D50",
            Illuminant::D55 => "D55",
            Illuminant::D65 => "D65",
            Illuminant::D75 => "D75",
            Illuminant::E => "E",
        }
    }
}

impl Observer {
    fn name(self) -> &'static str {
        match self {
            Observer::Two => "2",
            Observer::Ten => "10",
            Observer::Reference => "R",
        }
    }
}

impl fmt::Display for Illuminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Illuminant {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Illuminant::ALL
            .into_iter()
            .find(|i| i.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ImageError::UnknownIlluminant {
                illuminant: s.to_string(),
                observer: String::new(),
            })
    }
}

impl FromStr for Observer {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Observer::Two, Observer::Ten, Observer::Reference]
            .into_iter()
            .find(|o| o.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ImageError::UnknownIlluminant {
                illuminant: String::new(),
                observer: s.to_string(),
            })
    }
}

/// Parse an illuminant and observer pair given by name.
///
/// Names are case insensitive, e.g. `("d65", "2")` or `("A", "R")`. The
/// error names both inputs.
pub fn parse_white_point(illuminant: &str, observer: &str) -> Result<(Illuminant, Observer), ImageError> {
    match (illuminant.parse::<Illuminant>(), observer.parse::<Observer>()) {
        (Ok(i), Ok(o)) => Ok((i, o)),
        _ => Err(ImageError::UnknownIlluminant {
            illuminant: illuminant.to_string(),
            observer: observer.to_string(),
        }),
    }
}

/// Get the reference white point of an illuminant and observer, in XYZ.
///
/// Illuminants A, B, C and D75 reuse the 2 degree values for the reference
/// observer.
///
/// # Example
///
/// ```
/// use chromata_imgproc::color::{xyz_white_point, Illuminant, Observer};
///
/// assert_eq!(xyz_white_point(Illuminant::D65, Observer::Two), [0.95047, 1.0, 1.08883]);
/// ```
pub fn xyz_white_point(illuminant: Illuminant, observer: Observer) -> [f64; 3] {
    use Illuminant::*;
    use Observer::*;

    match (illuminant, observer) {
        (A, Two | Reference) => [1.098466069456375, 1.0, 0.3558228003436005],
        (A, Ten) => [1.111420406956693, 1.0, 0.3519978321919493],
        (B, Two | Reference) => [0.9909274480248003, 1.0, 0.8531327322886154],
        (B, Ten) => [0.9917777147717607, 1.0, 0.8434930535866175],
        (C, Two | Reference) => [0.980705971659919, 1.0, 1.1822494939271255],
        (C, Ten) => [0.9728569189782166, 1.0, 1.1614480488951577],
        (D50, Two) => [0.9642119944211994, 1.0, 0.8251882845188288],
        (D50, Ten) => [0.9672062750333777, 1.0, 0.8142801513128616],
        (D50, Reference) => [0.9639501491621826, 1.0, 0.8241280285499208],
        (D55, Two) => [0.956797052643698, 1.0, 0.9214805860173273],
        (D55, Ten) => [0.9579665682254781, 1.0, 0.9092525159847462],
        (D55, Reference) => [0.9565317453467969, 1.0, 0.9202554587037198],
        (D65, Two) => [0.95047, 1.0, 1.08883],
        (D65, Ten) => [0.94809667673716, 1.0, 1.0730513595166162],
        (D65, Reference) => [0.9532057125493769, 1.0, 1.0853843816469158],
        (D75, Two | Reference) => [0.9497220898840717, 1.0, 1.226393520724154],
        (D75, Ten) => [0.9441713925645873, 1.0, 1.2064272211720228],
        (E, _) => [1.0, 1.0, 1.0],
    }
}
