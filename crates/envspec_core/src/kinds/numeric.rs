//! Integer and floating-point variables.

use std::fmt;
use std::num::IntErrorKind;

use crate::error::ValueError;
use crate::kind::Kind;
use crate::schema::Schema;

/// A primitive number that can be read from a variable.
pub trait Number: Copy + PartialOrd + fmt::Display + Send + Sync + 'static {
    /// Type tag used in schemas and syntax errors, e.g. `u16`.
    const TYPE_NAME: &'static str;

    /// Parse a raw string, reporting overflow against the width of `Self`.
    fn parse_number(raw: &str) -> Result<Self, ValueError>;

    /// False for NaN and infinities.
    fn is_finite_number(self) -> bool;
}

macro_rules! impl_integer {
    ($($t:ty),*) => {$(
        impl Number for $t {
            const TYPE_NAME: &'static str = stringify!($t);

            fn parse_number(raw: &str) -> Result<Self, ValueError> {
                match raw.parse::<$t>() {
                    Ok(value) => Ok(value),
                    // Unsigned types reject a leading minus, even on zero.
                    Err(_) if is_negative_zero(raw) => Ok(0),
                    Err(e) => Err(match e.kind() {
                        IntErrorKind::PosOverflow => ValueError::TooHigh(format!(
                            "the largest {} value of {}",
                            Self::TYPE_NAME,
                            <$t>::MAX
                        )),
                        IntErrorKind::NegOverflow => too_small(Self::TYPE_NAME, <$t>::MIN),
                        _ if is_negative_integer(raw) => too_small(Self::TYPE_NAME, <$t>::MIN),
                        _ => ValueError::Syntax(Self::TYPE_NAME.to_string()),
                    }),
                }
            }

            fn is_finite_number(self) -> bool {
                true
            }
        }
    )*};
}

macro_rules! impl_float {
    ($($t:ty),*) => {$(
        impl Number for $t {
            const TYPE_NAME: &'static str = stringify!($t);

            fn parse_number(raw: &str) -> Result<Self, ValueError> {
                let value = raw
                    .parse::<$t>()
                    .map_err(|_| ValueError::Syntax(Self::TYPE_NAME.to_string()))?;

                if value.is_nan() || (value.is_infinite() && is_infinity_literal(raw)) {
                    return Err(ValueError::NonFinite);
                }

                // Finite input that rounds to infinity is out of range.
                if value == <$t>::INFINITY {
                    return Err(ValueError::TooHigh(format!(
                        "the largest {} value of {:e}",
                        Self::TYPE_NAME,
                        <$t>::MAX
                    )));
                }
                if value == <$t>::NEG_INFINITY {
                    return Err(ValueError::TooLow(format!(
                        "the smallest {} value of {:e}",
                        Self::TYPE_NAME,
                        <$t>::MIN
                    )));
                }

                Ok(value)
            }

            fn is_finite_number(self) -> bool {
                self.is_finite()
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float!(f32, f64);

fn too_small(type_name: &str, min: impl fmt::Display) -> ValueError {
    ValueError::TooLow(format!("the smallest {} value of {}", type_name, min))
}

fn is_negative_integer(raw: &str) -> bool {
    raw.strip_prefix('-')
        .map(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}

fn is_negative_zero(raw: &str) -> bool {
    raw.strip_prefix('-')
        .map(|digits| !digits.is_empty() && digits.bytes().all(|b| b == b'0'))
        .unwrap_or(false)
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// A numeric variable with optional inclusive bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Numeric<N: Number> {
    pub(crate) min: Option<N>,
    pub(crate) max: Option<N>,
}

impl<N: Number> Default for Numeric<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Number> Numeric<N> {
    pub fn new() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    pub fn min(&self) -> Option<N> {
        self.min
    }

    pub fn max(&self) -> Option<N> {
        self.max
    }
}

impl<N: Number> Kind for Numeric<N> {
    type Value = N;

    fn schema(&self) -> Schema {
        if self.min.is_none() && self.max.is_none() {
            return Schema::of_type(N::TYPE_NAME);
        }

        Schema::range(
            self.min.map(|v| v.to_string()),
            self.max.map(|v| v.to_string()),
        )
    }

    fn parse(&self, raw: &str) -> Result<N, ValueError> {
        N::parse_number(raw)
    }

    fn validate(&self, value: &N) -> Result<(), ValueError> {
        if !value.is_finite_number() {
            return Err(ValueError::NonFinite);
        }

        if let Some(min) = self.min {
            if *value < min {
                return Err(ValueError::TooLow(min.to_string()));
            }
        }

        if let Some(max) = self.max {
            if *value > max {
                return Err(ValueError::TooHigh(max.to_string()));
            }
        }

        Ok(())
    }

    fn render(&self, value: &N) -> String {
        value.to_string()
    }

    fn render_raw(&self, raw: &str) -> String {
        if raw.parse::<f64>().is_ok() {
            raw.to_string()
        } else {
            format!("'{}'", raw)
        }
    }
}
