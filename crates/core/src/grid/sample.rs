//! Sample trait for generic grid values

use num_traits::{NumCast, Zero};
use std::fmt::Debug;

/// Trait for scalar types that can be reconstructed.
///
/// This trait bounds the types that can be used as marker and mask values,
/// ensuring they support ordering and the conversions the algorithms need.
pub trait Sample:
    Copy + Clone + Debug + PartialOrd + PartialEq + NumCast + Zero + Send + Sync + 'static
{
    /// Whether this type is a floating point type
    fn is_float() -> bool;

    /// Whether this value takes part in a total order (false only for NaN)
    fn is_orderable(&self) -> bool;

    /// Convert self to f64
    fn to_f64(self) -> Option<f64> {
        NumCast::from(self)
    }
}

macro_rules! impl_sample_int {
    ($t:ty) => {
        impl Sample for $t {
            fn is_float() -> bool {
                false
            }

            fn is_orderable(&self) -> bool {
                true
            }
        }
    };
}

macro_rules! impl_sample_float {
    ($t:ty) => {
        impl Sample for $t {
            fn is_float() -> bool {
                true
            }

            fn is_orderable(&self) -> bool {
                !self.is_nan()
            }
        }
    };
}

impl_sample_int!(i8);
impl_sample_int!(i16);
impl_sample_int!(i32);
impl_sample_int!(i64);
impl_sample_int!(u8);
impl_sample_int!(u16);
impl_sample_int!(u32);
impl_sample_int!(u64);
impl_sample_float!(f32);
impl_sample_float!(f64);

/// Narrow unsigned samples that are often kept in 32-bit words.
///
/// Image hosts store 8- and 16-bit pixels in `i32` buffers. The stored word
/// is a magnitude: only the low `BITS` bits are meaningful and the upper bits
/// must be masked off, never sign-extended.
pub trait PackedSample: Sample {
    /// Number of significant bits
    const BITS: u32;

    /// Decode a stored word, keeping only the low `BITS` bits
    fn from_word(word: i32) -> Self;

    /// Encode as a non-negative 32-bit word
    fn to_word(self) -> i32;
}

impl PackedSample for u8 {
    const BITS: u32 = 8;

    fn from_word(word: i32) -> Self {
        (word & 0xff) as u8
    }

    fn to_word(self) -> i32 {
        self.into()
    }
}

impl PackedSample for u16 {
    const BITS: u32 = 16;

    fn from_word(word: i32) -> Self {
        (word & 0xffff) as u16
    }

    fn to_word(self) -> i32 {
        self.into()
    }
}
