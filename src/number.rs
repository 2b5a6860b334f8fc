use std::fmt;
use std::str;

/// A decoded JSON number.
///
/// One of three physical representations is chosen at construction and
/// never changes: signed 64-bit, unsigned 64-bit, or binary double. The
/// classification observers look through the representation where values
/// overlap, so `Number::from(1u64).is_int64()` holds.
#[derive(Clone, Copy, Debug)]
pub struct Number {
    repr: Repr,
}

#[derive(Clone, Copy, Debug)]
enum Repr {
    Int64(i64),
    Uint64(u64),
    Double(f64),
}

// Worst case is ryu's 24 bytes for a double; integers need at most 20.
pub(crate) const RENDER_LEN: usize = 32;

impl Number {
    /// Assemble a number from the parts accumulated by the parser: a
    /// decimal mantissa, an effective base-10 exponent (exponent digits
    /// minus the fraction length), and the sign.
    ///
    /// An exponent of zero yields an integer representation when the
    /// magnitude fits; everything else becomes a double.
    pub fn from_parts(negative: bool, mantissa: u64, exponent: i32) -> Self {
        let repr = if exponent == 0 {
            if !negative {
                Repr::Uint64(mantissa)
            } else if mantissa <= i64::MAX as u64 + 1 {
                Repr::Int64((mantissa as i64).wrapping_neg())
            } else {
                Repr::Double(-(mantissa as f64))
            }
        } else {
            Repr::Double(assemble_double(negative, mantissa, exponent))
        };

        Number { repr }
    }

    /// Returns `true` if the value fits losslessly in an `i64`.
    pub fn is_int64(&self) -> bool {
        match self.repr {
            Repr::Int64(_) => true,
            Repr::Uint64(n) => n <= i64::MAX as u64,
            Repr::Double(_) => false,
        }
    }

    /// Returns `true` if the value is non-negative and fits in a `u64`.
    pub fn is_uint64(&self) -> bool {
        match self.repr {
            Repr::Int64(n) => n >= 0,
            Repr::Uint64(_) => true,
            Repr::Double(_) => false,
        }
    }

    /// Returns `true` for every number: any stored value is representable
    /// as a double, possibly with rounding for 64-bit magnitudes.
    pub fn is_double(&self) -> bool {
        true
    }

    /// The value as an `i64`. Requires `is_int64()`.
    pub fn get_int64(&self) -> i64 {
        debug_assert!(self.is_int64());
        match self.repr {
            Repr::Int64(n) => n,
            Repr::Uint64(n) => n as i64,
            Repr::Double(n) => n as i64,
        }
    }

    /// The value as a `u64`. Requires `is_uint64()`.
    pub fn get_uint64(&self) -> u64 {
        debug_assert!(self.is_uint64());
        match self.repr {
            Repr::Int64(n) => n as u64,
            Repr::Uint64(n) => n,
            Repr::Double(n) => n as u64,
        }
    }

    /// The value as a double.
    pub fn get_double(&self) -> f64 {
        match self.repr {
            Repr::Int64(n) => n as f64,
            Repr::Uint64(n) => n as f64,
            Repr::Double(n) => n,
        }
    }

    /// Render the shortest canonical JSON literal for this number into
    /// `out`, returning the length used.
    ///
    /// Integers render in plain decimal via `itoa`; doubles render in the
    /// shortest form that round-trips via `ryu`. Non-finite doubles have
    /// no JSON literal and render as `null`.
    pub(crate) fn render(&self, out: &mut [u8; RENDER_LEN]) -> usize {
        match self.repr {
            Repr::Int64(n) => {
                let mut itoa = itoa::Buffer::new();
                let s = itoa.format(n);
                out[..s.len()].copy_from_slice(s.as_bytes());
                s.len()
            }
            Repr::Uint64(n) => {
                let mut itoa = itoa::Buffer::new();
                let s = itoa.format(n);
                out[..s.len()].copy_from_slice(s.as_bytes());
                s.len()
            }
            Repr::Double(n) => {
                if !n.is_finite() {
                    out[..4].copy_from_slice(b"null");
                    return 4;
                }
                let mut ryu = ryu::Buffer::new();
                let s = ryu.format_finite(n);
                out[..s.len()].copy_from_slice(s.as_bytes());
                s.len()
            }
        }
    }
}

/// Compute `mantissa * 10^exponent` correctly rounded.
///
/// The mantissa is exact in 64 bits, so formatting the pair back into
/// scientific notation and going through the standard library's float
/// parser gives the correctly rounded double without hand-rolling
/// Eisel-Lemire. Out-of-range exponents come back as infinity or zero,
/// which is what an unbounded literal means.
fn assemble_double(negative: bool, mantissa: u64, exponent: i32) -> f64 {
    let mut buf = [0u8; 40];
    let mut len = 0;

    {
        let mut itoa = itoa::Buffer::new();
        let digits = itoa.format(mantissa);
        buf[..digits.len()].copy_from_slice(digits.as_bytes());
        len += digits.len();
    }

    buf[len] = b'e';
    len += 1;

    {
        let mut itoa = itoa::Buffer::new();
        let digits = itoa.format(exponent);
        buf[len..len + digits.len()].copy_from_slice(digits.as_bytes());
        len += digits.len();
    }

    let text = str::from_utf8(&buf[..len]).expect("ascii digits");
    let magnitude: f64 = text.parse().expect("mantissa-exponent literal");

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Number) -> bool {
        use self::Repr::*;

        match (self.repr, other.repr) {
            (Double(a), Double(b)) => a == b,
            (Double(_), _) | (_, Double(_)) => false,
            // Both integral: compare values, not representations.
            (a, b) => as_i128(a) == as_i128(b),
        }
    }
}

fn as_i128(repr: Repr) -> i128 {
    match repr {
        Repr::Int64(n) => n as i128,
        Repr::Uint64(n) => n as i128,
        Repr::Double(_) => unreachable!(),
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = [0u8; RENDER_LEN];
        let len = self.render(&mut buf);
        f.write_str(str::from_utf8(&buf[..len]).expect("ascii literal"))
    }
}

macro_rules! impl_signed {
    ($( $t:ty ),*) => ($(
        impl From<$t> for Number {
            fn from(num: $t) -> Number {
                Number { repr: Repr::Int64(num as i64) }
            }
        }
    )*)
}

macro_rules! impl_unsigned {
    ($( $t:ty ),*) => ($(
        impl From<$t> for Number {
            fn from(num: $t) -> Number {
                Number { repr: Repr::Uint64(num as u64) }
            }
        }
    )*)
}

impl_signed!(isize, i8, i16, i32, i64);
impl_unsigned!(usize, u8, u16, u32, u64);

impl From<f64> for Number {
    fn from(float: f64) -> Number {
        Number {
            repr: Repr::Double(float),
        }
    }
}

impl From<f32> for Number {
    fn from(float: f32) -> Number {
        Number {
            repr: Repr::Double(float as f64),
        }
    }
}
