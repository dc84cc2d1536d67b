//! Numbers and their canonical text.
//!
//! Integers are written as exact base-10 digits. Floats are written the way
//! ECMAScript's `Number::toString` writes them (the rule `JSON.stringify` and
//! RFC 8785 use), so independent implementations agree byte for byte:
//!
//! - shortest digit string that round-trips to the same `f64`, with ties
//!   between two shortest candidates going to the even digit
//! - `-0` is written as `0`
//! - plain decimal notation when the decimal exponent is in `[-6, 21)`
//! - otherwise `d[.ddd]e±n`
//!
//! NaN and the infinities have no text and are rejected.

use std::fmt;

use crate::error::EncodingError;

/// A number held by a [`Value`](crate::Value).
///
/// Integers keep their exact value. A `Float` may be non-finite in memory,
/// but such a number can never be canonicalized.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    /// Whether the number has a canonical text.
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Int(_) | Number::UInt(_) => true,
            Number::Float(f) => f.is_finite(),
        }
    }

    /// The exact integer value, if this is an integer variant.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Number::Int(i) => Some(*i as i128),
            Number::UInt(u) => Some(*u as i128),
            Number::Float(_) => None,
        }
    }

    /// Lossy conversion to `f64`.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(i) => *i as f64,
            Number::UInt(u) => *u as f64,
            Number::Float(f) => *f,
        }
    }

    /// Canonical text of this number.
    pub fn canonical(&self) -> Result<String, EncodingError> {
        let mut out = String::new();
        self.write_canonical(&mut out)?;
        Ok(out)
    }

    pub(crate) fn write_canonical(&self, out: &mut String) -> Result<(), EncodingError> {
        match self {
            Number::Int(i) => out.push_str(&i.to_string()),
            Number::UInt(u) => out.push_str(&u.to_string()),
            Number::Float(f) => {
                if !f.is_finite() {
                    return Err(EncodingError::NonFiniteNumber(*f));
                }
                write_float(out, *f);
            }
        }
        Ok(())
    }
}

/// Write a finite float in ECMAScript `Number::toString` form.
fn write_float(out: &mut String, x: f64) {
    if x == 0.0 {
        out.push('0');
        return;
    }
    let mut buffer = ryu_js::Buffer::new();
    out.push_str(buffer.format_finite(x));
}

/// Numbers are equal when they share a canonical text.
///
/// `Int(1) == Float(1.0)`, but `Int(2^60) != Float(2^60)` because the float
/// prints with rounded digits. Non-finite numbers are never equal.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_i128(), other.as_i128()) {
            return a == b;
        }
        match (self.canonical(), other.canonical()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{}", self.as_f64()),
        }
    }
}

macro_rules! from_exact {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(n: $t) -> Self {
                Number::Int(n as i64)
            }
        })*
    };
}

macro_rules! from_wide {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(n: $t) -> Self {
                match i64::try_from(n) {
                    Ok(i) => Number::Int(i),
                    Err(_) => Number::UInt(n as u64),
                }
            }
        })*
    };
}

from_exact!(i8, i16, i32, i64, u8, u16, u32);
from_wide!(u64, usize);

impl From<f32> for Number {
    fn from(n: f32) -> Self {
        Number::Float(f64::from(n))
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::Float(n)
    }
}
