use std::fmt::Debug;

/// The numeric family of an element type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DtypeKind {
    /// Unsigned integers, normalized to `[0, 1]`.
    Unsigned,
    /// Signed integers, normalized to `[-1, 1]`.
    Signed,
    /// Floating point values, used as-is.
    Float,
}

/// Trait for image data types.
///
/// Send and Sync is required for ndarray::Zip::par_for_each
///
/// Every element type carries its *supported float type* as [`ImageDtype::Float`]:
/// the smallest floating type that represents it without loss, never below
/// single precision. Floating types map to themselves.
pub trait ImageDtype: Copy + Default + PartialOrd + Debug + Send + Sync + 'static {
    /// The floating type results are promoted to.
    type Float: FloatDtype;

    /// The numeric family of the type.
    const KIND: DtypeKind;

    /// Human readable name of the type, used in error messages.
    const NAME: &'static str;

    /// The intensity range of the type, `(-1, 1)` for floating types.
    fn dtype_limits() -> (Self, Self);

    /// Lossless widening to `f64` (up to the 53-bit mantissa for 64-bit integers).
    fn as_f64(self) -> f64;

    /// Convert from `f64`, saturating at the bounds of integer types.
    fn from_f64(val: f64) -> Self;

    /// Whether `val` converts to the type without loss.
    ///
    /// Integer types hold whole numbers within their range; floating types
    /// hold any value within their range.
    fn can_hold(val: f64) -> bool;

    /// Map the value onto the normalized float range of the type.
    ///
    /// Unsigned integers are divided by their maximum, signed integers are
    /// divided by their maximum and clamped at `-1`, floats pass through.
    fn to_unit_float(self) -> Self::Float;

    /// Cast the value to its float type without rescaling.
    fn to_float(self) -> Self::Float;
}

/// Floating point element types: `f32` and `f64`.
pub trait FloatDtype: ImageDtype<Float = Self> + num_traits::Float {}

macro_rules! impl_unsigned {
    ($($t:ty => $f:ty),* $(,)?) => {$(
        impl ImageDtype for $t {
            type Float = $f;
            const KIND: DtypeKind = DtypeKind::Unsigned;
            const NAME: &'static str = stringify!($t);

            fn dtype_limits() -> (Self, Self) {
                (<$t>::MIN, <$t>::MAX)
            }

            fn as_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(val: f64) -> Self {
                // `as` saturates and maps NaN to zero
                val as $t
            }

            fn can_hold(val: f64) -> bool {
                val.fract() == 0.0 && val >= <$t>::MIN as f64 && val <= <$t>::MAX as f64
            }

            fn to_unit_float(self) -> $f {
                (self as f64 / <$t>::MAX as f64) as $f
            }

            fn to_float(self) -> $f {
                self as $f
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty => $f:ty),* $(,)?) => {$(
        impl ImageDtype for $t {
            type Float = $f;
            const KIND: DtypeKind = DtypeKind::Signed;
            const NAME: &'static str = stringify!($t);

            fn dtype_limits() -> (Self, Self) {
                (<$t>::MIN, <$t>::MAX)
            }

            fn as_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(val: f64) -> Self {
                val as $t
            }

            fn can_hold(val: f64) -> bool {
                val.fract() == 0.0 && val >= <$t>::MIN as f64 && val <= <$t>::MAX as f64
            }

            fn to_unit_float(self) -> $f {
                (self as f64 / <$t>::MAX as f64).max(-1.0) as $f
            }

            fn to_float(self) -> $f {
                self as $f
            }
        }
    )*};
}

macro_rules! impl_float {
    ($($t:ty),* $(,)?) => {$(
        impl ImageDtype for $t {
            type Float = $t;
            const KIND: DtypeKind = DtypeKind::Float;
            const NAME: &'static str = stringify!($t);

            fn dtype_limits() -> (Self, Self) {
                (-1.0, 1.0)
            }

            fn as_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(val: f64) -> Self {
                val as $t
            }

            fn can_hold(val: f64) -> bool {
                !val.is_finite() || val.abs() <= <$t>::MAX as f64
            }

            fn to_unit_float(self) -> $t {
                self
            }

            fn to_float(self) -> $t {
                self
            }
        }

        impl FloatDtype for $t {}
    )*};
}

impl_unsigned!(u8 => f32, u16 => f32, u32 => f64, u64 => f64);
impl_signed!(i8 => f32, i16 => f32, i32 => f64, i64 => f64);
impl_float!(f32, f64);
