//! Conversions for values under test.
//!
//! Checks accept plain values and `Option`s alike; `None` is the absent value
//! that `not_null` rejects and `optional()` thunks skip.

use std::fmt;

/// A string-like value that may be absent.
pub trait TextSubject {
    fn into_text(self) -> Option<String>;
}

impl TextSubject for &str {
    fn into_text(self) -> Option<String> {
        Some(self.to_owned())
    }
}

impl TextSubject for String {
    fn into_text(self) -> Option<String> {
        Some(self)
    }
}

impl TextSubject for &String {
    fn into_text(self) -> Option<String> {
        Some(self.clone())
    }
}

impl<S: TextSubject> TextSubject for Option<S> {
    fn into_text(self) -> Option<String> {
        self.and_then(TextSubject::into_text)
    }
}

/// A primitive number compared through `f64`.
pub trait Numeric: Copy + fmt::Display + Send + Sync + 'static {
    fn to_f64(self) -> f64;
}

/// A number that may be absent.
pub trait NumericSubject {
    type Number: Numeric;

    fn into_number(self) -> Option<Self::Number>;
}

macro_rules! impl_numeric {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Numeric for $ty {
                #[inline]
                #[allow(trivial_numeric_casts)]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }

            impl NumericSubject for $ty {
                type Number = $ty;

                fn into_number(self) -> Option<$ty> {
                    Some(self)
                }
            }

            impl NumericSubject for Option<$ty> {
                type Number = $ty;

                fn into_number(self) -> Option<$ty> {
                    self
                }
            }
        )*
    };
}

impl_numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
