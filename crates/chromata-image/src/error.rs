/// An error type for the image operators.
///
/// Every variant is a validation failure detected before any pixel is
/// written; operations never return partially filled outputs.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// The requested axis does not exist for an array of this rank.
    #[error("axis {axis} is out of bounds for array of dimension {ndim}")]
    AxisOutOfRange {
        /// The axis as given by the caller, possibly negative.
        axis: isize,
        /// The rank of the array.
        ndim: usize,
    },

    /// The extent of the channel axis does not match the colorspace.
    ///
    /// Raised for instance when an RGB-only conversion receives a 4-channel
    /// array, or a 2-D grayscale array whose last axis is not 3.
    #[error("the input array must have size {expected} along channel_axis, got shape {shape:?}")]
    InvalidChannelCount {
        /// Number of channels the conversion expects.
        expected: usize,
        /// Shape of the offending array.
        shape: Vec<usize>,
    },

    /// The operation needs a channel axis but the array has none.
    #[error("the input array has no channel axis (shape {0:?})")]
    MissingChannelAxis(Vec<usize>),

    /// Unknown illuminant or observer name.
    #[error("Unknown illuminant/observer combination (`{illuminant}`, `{observer}`)")]
    UnknownIlluminant {
        /// Illuminant name as given.
        illuminant: String,
        /// Observer name as given.
        observer: String,
    },

    /// Unknown colorspace name.
    #[error("`{name}` is not a valid colorspace, expected one of {valid}")]
    UnknownColorspace {
        /// Colorspace name as given.
        name: String,
        /// Comma separated list of the accepted names.
        valid: String,
    },

    /// Unknown border mode name.
    #[error("`{0}` is not a valid border mode, expected one of reflect, constant, nearest, mirror, wrap")]
    UnknownBorderMode(String),

    /// The alpha array does not have the same shape as the image.
    #[error("alpha.shape must match image.shape")]
    InvalidAlphaShape,

    /// The background color is not an RGB triple within `[0, 1]`.
    #[error("background RGB values must be floats between 0 and 1, got {0:?}")]
    InvalidBackground([f64; 3]),

    /// The caller supplied output buffer is not a floating point array.
    #[error("Provided output data type is not float ({0})")]
    InvalidOutputDtype(&'static str),

    /// A standard deviation is negative.
    #[error("Sigma values less than zero are not valid (got {0})")]
    NegativeSigma(f64),

    /// The per-axis sigma sequence does not fit the array rank.
    #[error("sigma must have {expected} elements, got {actual}")]
    InvalidSigmaLength {
        /// Number of values accepted for this array.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// The kernel truncation radius is negative or not finite.
    #[error("truncate must be a finite non-negative number, got {0}")]
    InvalidTruncate(f64),

    /// Two arrays that must share a shape do not.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// The reference shape.
        expected: Vec<usize>,
        /// The shape that was supplied.
        actual: Vec<usize>,
    },

    /// Error when shape is not valid.
    #[error("Invalid shape")]
    InvalidShape(#[from] ndarray::ShapeError),
}
