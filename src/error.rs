use thiserror::Error;

/// Errors produced while parsing serialized JSON or while assigning
/// between a value tree and user types.
///
/// Each variant has a stable numeric code (see [`Error::code`]) and
/// belongs to one of two coarse [`Condition`]s.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The input is not valid JSON.
    #[error("syntax error")]
    Syntax,

    /// Non-whitespace input remained after a complete document.
    #[error("extra data after document")]
    ExtraData,

    /// A number's mantissa overflowed 64 bits during accumulation.
    #[error("mantissa overflow")]
    MantissaOverflow,

    /// A number's exponent overflowed during accumulation.
    #[error("exponent overflow")]
    ExponentOverflow,

    /// Input nesting exceeded the configured maximum depth.
    #[error("maximum depth exceeded")]
    TooDeep,

    /// Expected a value of kind object.
    #[error("expected object")]
    ExpectedObject,

    /// Expected a value of kind array.
    #[error("expected array")]
    ExpectedArray,

    /// Expected a value of kind string.
    #[error("expected string")]
    ExpectedString,

    /// Expected a number representable as a signed integer.
    #[error("expected signed integer")]
    ExpectedSigned,

    /// Expected a number representable as an unsigned integer.
    #[error("expected unsigned integer")]
    ExpectedUnsigned,

    /// Expected a number representable as a double.
    #[error("expected floating point")]
    ExpectedFloating,

    /// Expected a value of kind boolean.
    #[error("expected boolean")]
    ExpectedBool,

    /// Expected a value of kind null.
    #[error("expected null")]
    ExpectedNull,

    /// An integer assignment would overflow the destination type.
    #[error("integer overflow")]
    IntegerOverflow,

    /// The key was not found in the object.
    #[error("key not found")]
    KeyNotFound,
}

/// Coarse grouping of [`Error`] codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// The input could not be parsed.
    ParseError,
    /// An assignment to or from a value failed.
    AssignError,
}

impl Error {
    /// Stable numeric code for this error. Codes start at 1 and never
    /// change between releases.
    pub fn code(self) -> u16 {
        match self {
            Error::Syntax => 1,
            Error::ExtraData => 2,
            Error::MantissaOverflow => 3,
            Error::ExponentOverflow => 4,
            Error::TooDeep => 5,
            Error::ExpectedObject => 6,
            Error::ExpectedArray => 7,
            Error::ExpectedString => 8,
            Error::ExpectedSigned => 9,
            Error::ExpectedUnsigned => 10,
            Error::ExpectedFloating => 11,
            Error::ExpectedBool => 12,
            Error::ExpectedNull => 13,
            Error::IntegerOverflow => 14,
            Error::KeyNotFound => 15,
        }
    }

    /// The condition this error belongs to.
    pub fn condition(self) -> Condition {
        match self {
            Error::Syntax
            | Error::ExtraData
            | Error::MantissaOverflow
            | Error::ExponentOverflow
            | Error::TooDeep => Condition::ParseError,
            _ => Condition::AssignError,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(Error::Syntax.code(), 1);
        assert_eq!(Error::TooDeep.code(), 5);
        assert_eq!(Error::KeyNotFound.code(), 15);
    }

    #[test]
    fn conditions() {
        assert_eq!(Error::ExtraData.condition(), Condition::ParseError);
        assert_eq!(Error::MantissaOverflow.condition(), Condition::ParseError);
        assert_eq!(Error::ExpectedArray.condition(), Condition::AssignError);
        assert_eq!(Error::IntegerOverflow.condition(), Condition::AssignError);
    }

    #[test]
    fn messages_are_ascii() {
        let all = [
            Error::Syntax,
            Error::ExtraData,
            Error::MantissaOverflow,
            Error::ExponentOverflow,
            Error::TooDeep,
            Error::ExpectedObject,
            Error::ExpectedArray,
            Error::ExpectedString,
            Error::ExpectedSigned,
            Error::ExpectedUnsigned,
            Error::ExpectedFloating,
            Error::ExpectedBool,
            Error::ExpectedNull,
            Error::IntegerOverflow,
            Error::KeyNotFound,
        ];

        for err in &all {
            assert!(err.to_string().is_ascii());
        }
    }
}
