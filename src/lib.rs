//! # JSON value trees in pluggable storage
//!
//! Parse and serialize JSON, with every node of the value tree allocated
//! from a memory resource you choose - arena-scoped, counted, or your
//! own. The value type stays monomorphic: resources are type-erased
//! behind the [`Storage`] trait and travel with each value as a counted
//! [`StoragePtr`] handle, so a whole tree can be dropped back into its
//! arena without the allocator infecting every signature.
//!
//! ```
//! let data = json_dom::parse(r#"
//!
//! {
//!     "code": 200,
//!     "success": true,
//!     "payload": {
//!         "features": [
//!             "pluggableStorage",
//!             "incrementalIO"
//!         ]
//!     }
//! }
//!
//! "#).unwrap();
//!
//! assert!(data["code"].is(200));
//! assert!(data["success"].is(true));
//! assert!(data["payload"]["features"][0].is("pluggableStorage"));
//! ```
//!
//! ## Incremental in, incremental out
//!
//! The parser is push-based and resumable: feed it bytes as they arrive,
//! in as many slices as you like, and finish with `write_eof`. The
//! serializer is pull-based and resumable: it fills the buffers you hand
//! it and suspends mid-token when they run out.
//!
//! ```
//! use json_dom::{Serializer, TreeParser};
//!
//! let mut parser = TreeParser::new();
//! parser.write_some(br#"{"k":"hel"#).unwrap();
//! parser.write_some(br#"loA"}"#).unwrap();
//! parser.write_eof().unwrap();
//!
//! let tree = parser.release();
//! assert!(tree["k"].is("helloA"));
//!
//! let mut out = [0u8; 8];
//! let mut serializer = Serializer::new(&tree);
//! let n = serializer.next(&mut out);
//! assert_eq!(&out[..n], br#"{"k":"he"#);
//! ```
//!
//! ## Building values
//!
//! ```
//! #[macro_use]
//! extern crate json_dom;
//!
//! fn main() {
//!     let data = object!{
//!         "a" => "bar",
//!         "b" => array![1, false, "foo"]
//!     };
//!
//!     assert_eq!(json_dom::stringify(data), r#"{"a":"bar","b":[1,false,"foo"]}"#);
//! }
//! ```
//!
//! Objects keep insertion order when iterated, while lookups stay O(1)
//! through a hash table on the side.

mod array;
mod error;
mod exchange;
mod number;
mod object;
mod parser;
mod serializer;
mod storage;
mod string;
mod tree;
mod value;

pub mod iterators;

pub use crate::array::Array;
pub use crate::error::{Condition, Error, Result};
pub use crate::exchange::{FromJson, ToJson};
pub use crate::iterators::{Visit, Walk};
pub use crate::number::Number;
pub use crate::object::{Object, ObjectNode};
pub use crate::parser::{Handler, Parser, DEFAULT_MAX_DEPTH};
pub use crate::serializer::Serializer;
pub use crate::storage::{
    default_storage, set_default_storage, GlobalStorage, Storage, StorageAdaptor, StoragePtr,
};
pub use crate::string::JsonString;
pub use crate::tree::TreeParser;
pub use crate::value::{JsonValue, Kind};

use std::fmt;

/// Parse a complete JSON document into a value tree bound to the default
/// resource.
pub fn parse(source: &str) -> Result<JsonValue> {
    parse_with_storage(source, default_storage())
}

/// Parse a complete JSON document into a value tree bound to `sp`.
pub fn parse_with_storage(source: &str, sp: StoragePtr) -> Result<JsonValue> {
    let mut parser = TreeParser::with_storage(sp);
    parser.write(source.as_bytes())?;
    parser.write_eof()?;
    Ok(parser.release())
}

/// Serialize a value (or anything convertible to one) to a JSON string.
pub fn stringify<T>(root: T) -> String
where
    T: Into<JsonValue>,
{
    serializer::to_text(&root.into())
}

/// Serialize a borrowed value tree to a JSON string.
pub fn stringify_ref(root: &JsonValue) -> String {
    serializer::to_text(root)
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&stringify_ref(self))
    }
}

/// Build a [`JsonValue::Array`] from a list of values.
///
/// ```
/// # #[macro_use] extern crate json_dom;
/// # fn main() {
/// let data = array!["foo", "bar", 100, true, json_dom::JsonValue::new()];
/// assert_eq!(json_dom::stringify(data), r#"["foo","bar",100,true,null]"#);
/// # }
/// ```
#[macro_export]
macro_rules! array {
    [] => ($crate::JsonValue::new_array());

    [ $( $item:expr ),* ] => ({
        let mut array = $crate::Array::new();

        $(
            array.push($item.into());
        )*

        $crate::JsonValue::Array(array)
    })
}

/// Build a [`JsonValue::Object`] from `key => value` pairs.
///
/// ```
/// # #[macro_use] extern crate json_dom;
/// # fn main() {
/// let data = object!{
///     "name" => "John Doe",
///     "age"  => 30
/// };
/// assert_eq!(
///     json_dom::stringify(data),
///     // Insertion order is preserved.
///     r#"{"name":"John Doe","age":30}"#
/// );
/// # }
/// ```
#[macro_export]
macro_rules! object {
    {} => ($crate::JsonValue::new_object());

    { $( $key:expr => $value:expr ),* } => ({
        let mut object = $crate::Object::new();

        $(
            object.insert_or_assign($key, $value.into());
        )*

        $crate::JsonValue::Object(object)
    })
}
