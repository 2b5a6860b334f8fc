// Conversions between value trees and user types. The value type never
// enumerates user types; everything goes through the two trait axes
// below, plus plain `From` impls for the types JSON can represent
// directly.

use std::convert::TryFrom;

use crate::array::Array;
use crate::error::{Error, Result};
use crate::number::Number;
use crate::object::Object;
use crate::storage::default_storage;
use crate::string::JsonString;
use crate::value::JsonValue;

/// Types that can be turned into a JSON value.
pub trait ToJson {
    fn to_json(&self) -> JsonValue;
}

/// Types that can be extracted from a JSON value.
pub trait FromJson: Sized {
    fn from_json(value: &JsonValue) -> Result<Self>;
}

impl JsonValue {
    /// Extract a `T` from this value via its [`FromJson`]
    /// implementation.
    pub fn store<T: FromJson>(&self) -> Result<T> {
        T::from_json(self)
    }
}

// ----------------------------------------------------------------------
// From payloads into JsonValue.

impl From<Object> for JsonValue {
    fn from(obj: Object) -> JsonValue {
        JsonValue::Object(obj)
    }
}

impl From<Array> for JsonValue {
    fn from(arr: Array) -> JsonValue {
        JsonValue::Array(arr)
    }
}

impl From<JsonString> for JsonValue {
    fn from(s: JsonString) -> JsonValue {
        JsonValue::String(s)
    }
}

impl From<Number> for JsonValue {
    fn from(n: Number) -> JsonValue {
        JsonValue::Number(n, default_storage())
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> JsonValue {
        JsonValue::Boolean(b, default_storage())
    }
}

impl<'a> From<&'a str> for JsonValue {
    fn from(s: &'a str) -> JsonValue {
        JsonValue::String(JsonString::from(s))
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> JsonValue {
        JsonValue::String(JsonString::from(s))
    }
}

macro_rules! implement_number {
    ($( $t:ty ),*) => ($(
        impl From<$t> for JsonValue {
            fn from(num: $t) -> JsonValue {
                JsonValue::Number(Number::from(num), default_storage())
            }
        }
    )*)
}

implement_number!(isize, i8, i16, i32, i64, usize, u8, u16, u32, u64, f32, f64);

impl<T> From<Option<T>> for JsonValue
where
    T: Into<JsonValue>,
{
    fn from(value: Option<T>) -> JsonValue {
        match value {
            Some(value) => value.into(),
            None => JsonValue::new(),
        }
    }
}

impl<T> From<Vec<T>> for JsonValue
where
    T: Into<JsonValue>,
{
    fn from(values: Vec<T>) -> JsonValue {
        let mut arr = Array::new();
        for value in values {
            arr.push(value.into());
        }
        JsonValue::Array(arr)
    }
}

// ----------------------------------------------------------------------
// ToJson mirrors Into for borrowed data.

impl ToJson for bool {
    fn to_json(&self) -> JsonValue {
        JsonValue::from(*self)
    }
}

impl ToJson for str {
    fn to_json(&self) -> JsonValue {
        JsonValue::from(self)
    }
}

impl ToJson for String {
    fn to_json(&self) -> JsonValue {
        JsonValue::from(self.as_str())
    }
}

macro_rules! implement_to_json {
    ($( $t:ty ),*) => ($(
        impl ToJson for $t {
            fn to_json(&self) -> JsonValue {
                JsonValue::from(*self)
            }
        }
    )*)
}

implement_to_json!(isize, i8, i16, i32, i64, usize, u8, u16, u32, u64, f32, f64);

impl<T> ToJson for Option<T>
where
    T: ToJson,
{
    fn to_json(&self) -> JsonValue {
        match self {
            Some(value) => value.to_json(),
            None => JsonValue::new(),
        }
    }
}

impl<T> ToJson for Vec<T>
where
    T: ToJson,
{
    fn to_json(&self) -> JsonValue {
        let mut arr = Array::new();
        for value in self {
            arr.push(value.to_json());
        }
        JsonValue::Array(arr)
    }
}

// ----------------------------------------------------------------------
// FromJson.

impl FromJson for bool {
    fn from_json(value: &JsonValue) -> Result<bool> {
        value.get_bool()
    }
}

impl FromJson for String {
    fn from_json(value: &JsonValue) -> Result<String> {
        value.get_str().map(String::from)
    }
}

impl FromJson for f64 {
    fn from_json(value: &JsonValue) -> Result<f64> {
        value.get_f64()
    }
}

impl FromJson for f32 {
    fn from_json(value: &JsonValue) -> Result<f32> {
        value.get_f64().map(|n| n as f32)
    }
}

macro_rules! implement_from_json_signed {
    ($( $t:ty ),*) => ($(
        impl FromJson for $t {
            fn from_json(value: &JsonValue) -> Result<$t> {
                if value.is_int64() {
                    <$t>::try_from(value.get_i64()?).map_err(|_| Error::IntegerOverflow)
                } else if value.is_uint64() {
                    // An integer, just too large for the target.
                    Err(Error::IntegerOverflow)
                } else {
                    Err(Error::ExpectedSigned)
                }
            }
        }
    )*)
}

macro_rules! implement_from_json_unsigned {
    ($( $t:ty ),*) => ($(
        impl FromJson for $t {
            fn from_json(value: &JsonValue) -> Result<$t> {
                if value.is_uint64() {
                    <$t>::try_from(value.get_u64()?).map_err(|_| Error::IntegerOverflow)
                } else if value.is_int64() {
                    // A negative integer has no unsigned rendition.
                    Err(Error::IntegerOverflow)
                } else {
                    Err(Error::ExpectedUnsigned)
                }
            }
        }
    )*)
}

implement_from_json_signed!(isize, i8, i16, i32, i64);
implement_from_json_unsigned!(usize, u8, u16, u32, u64);

impl<T> FromJson for Option<T>
where
    T: FromJson,
{
    fn from_json(value: &JsonValue) -> Result<Option<T>> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_json(value).map(Some)
        }
    }
}

impl<T> FromJson for Vec<T>
where
    T: FromJson,
{
    fn from_json(value: &JsonValue) -> Result<Vec<T>> {
        match *value {
            JsonValue::Array(ref arr) => {
                let mut out = Vec::with_capacity(arr.len());
                for element in arr {
                    out.push(T::from_json(element)?);
                }
                Ok(out)
            }
            _ => Err(Error::ExpectedArray),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_value_conversions() {
        assert!(JsonValue::from(true).is_bool());
        assert!(JsonValue::from("s").is_string());
        assert!(JsonValue::from(1u8).is_number());
        assert!(JsonValue::from(2.5).is_number());
        assert!(JsonValue::from(None::<bool>).is_null());
        assert!(JsonValue::from(vec![1, 2, 3]).is_array());
    }

    #[test]
    fn store_scalars() {
        assert_eq!(JsonValue::from(42).store::<i64>(), Ok(42));
        assert_eq!(JsonValue::from(42).store::<u8>(), Ok(42));
        assert_eq!(JsonValue::from("hi").store::<String>(), Ok("hi".into()));
        assert_eq!(JsonValue::from(true).store::<bool>(), Ok(true));
        assert_eq!(JsonValue::from(0.5).store::<f64>(), Ok(0.5));
    }

    #[test]
    fn store_narrowing_overflow() {
        assert_eq!(JsonValue::from(300).store::<u8>(), Err(Error::IntegerOverflow));
        assert_eq!(JsonValue::from(-1).store::<u32>(), Err(Error::IntegerOverflow));
        assert_eq!(
            JsonValue::from(u64::MAX).store::<i64>(),
            Err(Error::IntegerOverflow)
        );
        assert_eq!(JsonValue::from(128).store::<i8>(), Err(Error::IntegerOverflow));
    }

    #[test]
    fn store_kind_mismatch() {
        assert_eq!(JsonValue::from("x").store::<i32>(), Err(Error::ExpectedSigned));
        assert_eq!(JsonValue::from(0.5).store::<u32>(), Err(Error::ExpectedUnsigned));
        assert_eq!(JsonValue::new().store::<String>(), Err(Error::ExpectedString));
        assert_eq!(
            JsonValue::from(1).store::<Vec<i32>>(),
            Err(Error::ExpectedArray)
        );
    }

    #[test]
    fn store_vec() {
        let value = JsonValue::from(vec![1, 2, 3]);
        assert_eq!(value.store::<Vec<i32>>(), Ok(vec![1, 2, 3]));

        let mixed = crate::parse(r#"[1,"two"]"#).unwrap();
        assert_eq!(mixed.store::<Vec<i32>>(), Err(Error::ExpectedSigned));
    }

    #[test]
    fn store_option() {
        assert_eq!(JsonValue::new().store::<Option<i32>>(), Ok(None));
        assert_eq!(JsonValue::from(5).store::<Option<i32>>(), Ok(Some(5)));
    }

    #[test]
    fn custom_type_roundtrip() {
        struct Point {
            x: i64,
            y: i64,
        }

        impl ToJson for Point {
            fn to_json(&self) -> JsonValue {
                let mut obj = Object::new();
                obj.insert("x", JsonValue::from(self.x));
                obj.insert("y", JsonValue::from(self.y));
                JsonValue::Object(obj)
            }
        }

        impl FromJson for Point {
            fn from_json(value: &JsonValue) -> Result<Point> {
                Ok(Point {
                    x: value.at("x")?.store()?,
                    y: value.at("y")?.store()?,
                })
            }
        }

        let point = Point { x: 3, y: -4 };
        let value = point.to_json();
        let back: Point = value.store().unwrap();
        assert_eq!((back.x, back.y), (3, -4));
    }
}
