use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use crate::array::Array;
use crate::error::{Error, Result};
use crate::iterators::{Entries, EntriesMut, Members, MembersMut};
use crate::number::Number;
use crate::object::Object;
use crate::storage::{default_storage, StoragePtr};
use crate::string::JsonString;

/// The tag of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

/// A JSON value.
///
/// Every variant carries exactly one resource handle: the containers
/// embed their own, the scalars keep one in a side slot. The tag and the
/// payload can never disagree; switching variants drops the previous
/// payload first.
pub enum JsonValue {
    Object(Object),
    Array(Array),
    String(JsonString),
    Number(Number, StoragePtr),
    Boolean(bool, StoragePtr),
    Null(StoragePtr),
}

impl JsonValue {
    /// A null value bound to the default resource.
    pub fn new() -> Self {
        JsonValue::Null(default_storage())
    }

    /// A null value bound to `sp`.
    pub fn with_storage(sp: StoragePtr) -> Self {
        JsonValue::Null(sp)
    }

    /// An empty value of the given kind bound to `sp`.
    pub fn new_kind(kind: Kind, sp: StoragePtr) -> Self {
        match kind {
            Kind::Object => JsonValue::Object(Object::with_storage(sp)),
            Kind::Array => JsonValue::Array(Array::with_storage(sp)),
            Kind::String => JsonValue::String(JsonString::with_storage(sp)),
            Kind::Number => JsonValue::Number(Number::from(0), sp),
            Kind::Boolean => JsonValue::Boolean(false, sp),
            Kind::Null => JsonValue::Null(sp),
        }
    }

    /// An empty object bound to the default resource.
    pub fn new_object() -> Self {
        JsonValue::Object(Object::new())
    }

    /// An empty array bound to the default resource.
    pub fn new_array() -> Self {
        JsonValue::Array(Array::new())
    }

    pub fn kind(&self) -> Kind {
        match *self {
            JsonValue::Object(_) => Kind::Object,
            JsonValue::Array(_) => Kind::Array,
            JsonValue::String(_) => Kind::String,
            JsonValue::Number(..) => Kind::Number,
            JsonValue::Boolean(..) => Kind::Boolean,
            JsonValue::Null(_) => Kind::Null,
        }
    }

    /// The resource this value and its subtree allocate from.
    pub fn get_storage(&self) -> &StoragePtr {
        match *self {
            JsonValue::Object(ref obj) => obj.get_storage(),
            JsonValue::Array(ref arr) => arr.get_storage(),
            JsonValue::String(ref s) => s.get_storage(),
            JsonValue::Number(_, ref sp)
            | JsonValue::Boolean(_, ref sp)
            | JsonValue::Null(ref sp) => sp,
        }
    }

    pub fn is_object(&self) -> bool {
        self.kind() == Kind::Object
    }

    pub fn is_array(&self) -> bool {
        self.kind() == Kind::Array
    }

    pub fn is_string(&self) -> bool {
        self.kind() == Kind::String
    }

    pub fn is_number(&self) -> bool {
        self.kind() == Kind::Number
    }

    pub fn is_bool(&self) -> bool {
        self.kind() == Kind::Boolean
    }

    pub fn is_null(&self) -> bool {
        self.kind() == Kind::Null
    }

    /// Returns `true` if this is not an object or array.
    pub fn is_primitive(&self) -> bool {
        match self.kind() {
            Kind::Object | Kind::Array => false,
            _ => true,
        }
    }

    /// Returns `true` if this is an object or array.
    pub fn is_structured(&self) -> bool {
        !self.is_primitive()
    }

    /// Returns `true` if this is a number that fits losslessly in `i64`.
    pub fn is_int64(&self) -> bool {
        match *self {
            JsonValue::Number(ref n, _) => n.is_int64(),
            _ => false,
        }
    }

    /// Returns `true` if this is a non-negative number fitting in `u64`.
    pub fn is_uint64(&self) -> bool {
        match *self {
            JsonValue::Number(ref n, _) => n.is_uint64(),
            _ => false,
        }
    }

    /// Returns `true` for any number; same as [`JsonValue::is_number`].
    pub fn is_double(&self) -> bool {
        self.is_number()
    }

    // ------------------------------------------------------------------
    // Preconditioned accessors. Calling these with the wrong kind is a
    // contract violation, not a recoverable error.

    pub fn as_object(&self) -> &Object {
        match *self {
            JsonValue::Object(ref obj) => obj,
            _ => panic!("as_object called on {:?}", self.kind()),
        }
    }

    pub fn as_object_mut(&mut self) -> &mut Object {
        match *self {
            JsonValue::Object(ref mut obj) => obj,
            _ => panic!("as_object_mut called on {:?}", self.kind()),
        }
    }

    pub fn as_array(&self) -> &Array {
        match *self {
            JsonValue::Array(ref arr) => arr,
            _ => panic!("as_array called on {:?}", self.kind()),
        }
    }

    pub fn as_array_mut(&mut self) -> &mut Array {
        match *self {
            JsonValue::Array(ref mut arr) => arr,
            _ => panic!("as_array_mut called on {:?}", self.kind()),
        }
    }

    pub fn as_string(&self) -> &JsonString {
        match *self {
            JsonValue::String(ref s) => s,
            _ => panic!("as_string called on {:?}", self.kind()),
        }
    }

    pub fn as_string_mut(&mut self) -> &mut JsonString {
        match *self {
            JsonValue::String(ref mut s) => s,
            _ => panic!("as_string_mut called on {:?}", self.kind()),
        }
    }

    pub fn as_number(&self) -> &Number {
        match *self {
            JsonValue::Number(ref n, _) => n,
            _ => panic!("as_number called on {:?}", self.kind()),
        }
    }

    pub fn as_number_mut(&mut self) -> &mut Number {
        match *self {
            JsonValue::Number(ref mut n, _) => n,
            _ => panic!("as_number_mut called on {:?}", self.kind()),
        }
    }

    pub fn as_bool(&self) -> bool {
        match *self {
            JsonValue::Boolean(b, _) => b,
            _ => panic!("as_bool called on {:?}", self.kind()),
        }
    }

    pub fn as_bool_mut(&mut self) -> &mut bool {
        match *self {
            JsonValue::Boolean(ref mut b, _) => b,
            _ => panic!("as_bool_mut called on {:?}", self.kind()),
        }
    }

    // ------------------------------------------------------------------
    // Checked getters.

    pub fn get_i64(&self) -> Result<i64> {
        match *self {
            JsonValue::Number(ref n, _) if n.is_int64() => Ok(n.get_int64()),
            _ => Err(Error::ExpectedSigned),
        }
    }

    pub fn get_u64(&self) -> Result<u64> {
        match *self {
            JsonValue::Number(ref n, _) if n.is_uint64() => Ok(n.get_uint64()),
            _ => Err(Error::ExpectedUnsigned),
        }
    }

    pub fn get_f64(&self) -> Result<f64> {
        match *self {
            JsonValue::Number(ref n, _) => Ok(n.get_double()),
            _ => Err(Error::ExpectedFloating),
        }
    }

    pub fn get_bool(&self) -> Result<bool> {
        match *self {
            JsonValue::Boolean(b, _) => Ok(b),
            _ => Err(Error::ExpectedBool),
        }
    }

    pub fn get_str(&self) -> Result<&str> {
        match *self {
            JsonValue::String(ref s) => Ok(s.as_str()),
            _ => Err(Error::ExpectedString),
        }
    }

    // ------------------------------------------------------------------
    // Mutation.

    /// Replace the contents with an empty value of `kind`, preserving the
    /// resource.
    pub fn reset(&mut self, kind: Kind) {
        let sp = self.get_storage().clone();
        *self = JsonValue::new_kind(kind, sp);
    }

    /// Reset to an empty object and borrow it.
    pub fn emplace_object(&mut self) -> &mut Object {
        self.reset(Kind::Object);
        self.as_object_mut()
    }

    /// Reset to an empty array and borrow it.
    pub fn emplace_array(&mut self) -> &mut Array {
        self.reset(Kind::Array);
        self.as_array_mut()
    }

    /// Reset to an empty string and borrow it.
    pub fn emplace_string(&mut self) -> &mut JsonString {
        self.reset(Kind::String);
        self.as_string_mut()
    }

    /// Reset to the number zero and borrow it.
    pub fn emplace_number(&mut self) -> &mut Number {
        self.reset(Kind::Number);
        self.as_number_mut()
    }

    /// Reset to `false` and borrow it.
    pub fn emplace_bool(&mut self) -> &mut bool {
        self.reset(Kind::Boolean);
        self.as_bool_mut()
    }

    /// Reset to null.
    pub fn emplace_null(&mut self) {
        self.reset(Kind::Null);
    }

    /// Works on objects: insert `value` under `key`, overwriting any
    /// existing entry.
    pub fn insert<T>(&mut self, key: &str, value: T) -> Result<()>
    where
        T: Into<JsonValue>,
    {
        match *self {
            JsonValue::Object(ref mut obj) => {
                obj.insert_or_assign(key, value.into());
                Ok(())
            }
            _ => Err(Error::ExpectedObject),
        }
    }

    /// Works on arrays: append `value`.
    pub fn push<T>(&mut self, value: T) -> Result<()>
    where
        T: Into<JsonValue>,
    {
        match *self {
            JsonValue::Array(ref mut arr) => {
                arr.push(value.into());
                Ok(())
            }
            _ => Err(Error::ExpectedArray),
        }
    }

    /// Works on objects: borrow the value under `key`.
    pub fn at(&self, key: &str) -> Result<&JsonValue> {
        match *self {
            JsonValue::Object(ref obj) => obj.get(key).ok_or(Error::KeyNotFound),
            _ => Err(Error::ExpectedObject),
        }
    }

    /// Works on objects: mutably borrow the value under `key`.
    pub fn at_mut(&mut self, key: &str) -> Result<&mut JsonValue> {
        match *self {
            JsonValue::Object(ref mut obj) => obj.get_mut(key).ok_or(Error::KeyNotFound),
            _ => Err(Error::ExpectedObject),
        }
    }

    /// Number of elements for containers, zero for scalars.
    pub fn len(&self) -> usize {
        match *self {
            JsonValue::Object(ref obj) => obj.len(),
            JsonValue::Array(ref arr) => arr.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks whether the value equals `other` after conversion.
    pub fn is<T>(&self, other: T) -> bool
    where
        T: Into<JsonValue>,
    {
        *self == other.into()
    }

    /// Iterate the elements of an array value; empty for other kinds.
    pub fn members(&self) -> Members {
        match *self {
            JsonValue::Array(ref arr) => Members::Some(arr.iter()),
            _ => Members::None,
        }
    }

    /// Mutable variant of [`JsonValue::members`].
    pub fn members_mut(&mut self) -> MembersMut {
        match *self {
            JsonValue::Array(ref mut arr) => MembersMut::Some(arr.iter_mut()),
            _ => MembersMut::None,
        }
    }

    /// Iterate the entries of an object value; empty for other kinds.
    pub fn entries(&self) -> Entries {
        match *self {
            JsonValue::Object(ref obj) => Entries::Some(obj.iter()),
            _ => Entries::None,
        }
    }

    /// Mutable variant of [`JsonValue::entries`].
    pub fn entries_mut(&mut self) -> EntriesMut {
        match *self {
            JsonValue::Object(ref mut obj) => EntriesMut::Some(obj.iter_mut()),
            _ => EntriesMut::None,
        }
    }

    // ------------------------------------------------------------------
    // Cross-resource transfer.

    /// Deep copy of this value and its subtree, every node bound to `sp`.
    pub fn clone_in(&self, sp: StoragePtr) -> JsonValue {
        match *self {
            JsonValue::Object(ref obj) => JsonValue::Object(obj.clone_in(sp)),
            JsonValue::Array(ref arr) => JsonValue::Array(arr.clone_in(sp)),
            JsonValue::String(ref s) => JsonValue::String(s.clone_in(sp)),
            JsonValue::Number(n, _) => JsonValue::Number(n, sp),
            JsonValue::Boolean(b, _) => JsonValue::Boolean(b, sp),
            JsonValue::Null(_) => JsonValue::Null(sp),
        }
    }

    /// Move the contents of `other` into this value, keeping this value's
    /// resource. Equal resources transfer ownership in O(1); unequal
    /// resources deep-copy into this resource. Either way `other` is left
    /// null, still bound to its own resource.
    pub fn take_from(&mut self, other: &mut JsonValue) {
        if self.get_storage() == other.get_storage() {
            let sp = other.get_storage().clone();
            *self = mem::replace(other, JsonValue::Null(sp));
        } else {
            let sp = self.get_storage().clone();
            *self = other.clone_in(sp);
            other.reset(Kind::Null);
        }
    }
}

impl Default for JsonValue {
    fn default() -> Self {
        JsonValue::new()
    }
}

impl Clone for JsonValue {
    fn clone(&self) -> JsonValue {
        self.clone_in(self.get_storage().clone())
    }
}

impl PartialEq for JsonValue {
    fn eq(&self, other: &JsonValue) -> bool {
        match (self, other) {
            (JsonValue::Object(a), JsonValue::Object(b)) => a == b,
            (JsonValue::Array(a), JsonValue::Array(b)) => a == b,
            (JsonValue::String(a), JsonValue::String(b)) => a == b,
            (JsonValue::Number(a, _), JsonValue::Number(b, _)) => a == b,
            (JsonValue::Boolean(a, _), JsonValue::Boolean(b, _)) => a == b,
            (JsonValue::Null(_), JsonValue::Null(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            JsonValue::Object(ref obj) => fmt::Debug::fmt(obj, f),
            JsonValue::Array(ref arr) => fmt::Debug::fmt(arr, f),
            JsonValue::String(ref s) => fmt::Debug::fmt(s, f),
            JsonValue::Number(ref n, _) => fmt::Debug::fmt(n, f),
            JsonValue::Boolean(b, _) => fmt::Debug::fmt(&b, f),
            JsonValue::Null(_) => f.write_str("Null"),
        }
    }
}

/// Indexing an array by position. Any other kind, or an out-of-range
/// position, is a contract violation.
impl Index<usize> for JsonValue {
    type Output = JsonValue;

    fn index(&self, index: usize) -> &JsonValue {
        &self.as_array()[index]
    }
}

impl IndexMut<usize> for JsonValue {
    fn index_mut(&mut self, index: usize) -> &mut JsonValue {
        &mut self.as_array_mut()[index]
    }
}

/// Indexing an object by key. The key must be present; anything else is
/// a contract violation.
impl<'a> Index<&'a str> for JsonValue {
    type Output = JsonValue;

    fn index(&self, key: &str) -> &JsonValue {
        match self.as_object().get(key) {
            Some(value) => value,
            None => panic!("no key {:?} in object", key),
        }
    }
}

/// Mutable indexing by key. A null value is first promoted to an empty
/// object; a missing key is inserted as null. Any kind other than object
/// or null is a contract violation.
impl<'a> IndexMut<&'a str> for JsonValue {
    fn index_mut(&mut self, key: &str) -> &mut JsonValue {
        if self.is_null() {
            self.reset(Kind::Object);
        }

        let sp = self.get_storage().clone();
        let obj = self.as_object_mut();
        let (slot, _) = obj.insert(key, JsonValue::Null(sp));
        slot
    }
}
