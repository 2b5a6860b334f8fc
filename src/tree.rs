use smallvec::SmallVec;

use std::mem;

use crate::array::Array;
use crate::error::Result;
use crate::number::Number;
use crate::object::Object;
use crate::parser::{Handler, Parser, DEFAULT_MAX_DEPTH};
use crate::storage::{default_storage, StoragePtr};
use crate::string::JsonString;
use crate::value::JsonValue;

/// A parser that builds a [`JsonValue`] tree.
///
/// Couples the push machine with a handler that assembles containers on
/// a stack of insertion frames. Every node of the resulting tree is
/// bound to the parser's resource.
pub struct TreeParser {
    machine: Parser,
    builder: TreeBuilder,
}

impl TreeParser {
    /// A tree parser allocating from the default resource.
    pub fn new() -> Self {
        TreeParser::with_storage(default_storage())
    }

    /// A tree parser allocating every node from `sp`.
    pub fn with_storage(sp: StoragePtr) -> Self {
        TreeParser {
            machine: Parser::new(),
            builder: TreeBuilder::new(sp),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.machine.max_depth()
    }

    pub fn set_max_depth(&mut self, levels: usize) {
        self.machine.set_max_depth(levels);
    }

    /// Feed bytes; see [`Parser::write_some`].
    pub fn write_some(&mut self, buf: &[u8]) -> Result<usize> {
        self.machine.write_some(&mut self.builder, buf)
    }

    /// Feed bytes, rejecting trailing input; see [`Parser::write`].
    pub fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.machine.write(&mut self.builder, buf)
    }

    /// Signal end of input; see [`Parser::write_eof`].
    pub fn write_eof(&mut self) -> Result<()> {
        self.machine.write_eof(&mut self.builder)
    }

    pub fn is_done(&self) -> bool {
        self.machine.is_done()
    }

    /// Borrow the parsed tree; null until a document completed.
    pub fn get(&self) -> &JsonValue {
        &self.builder.root
    }

    /// Take the parsed tree out, resetting the parser for a new
    /// document.
    pub fn release(&mut self) -> JsonValue {
        self.machine.reset();
        let sp = self.builder.sp.clone();
        mem::replace(&mut self.builder.root, JsonValue::with_storage(sp))
    }
}

impl Default for TreeParser {
    fn default() -> Self {
        TreeParser::new()
    }
}

/// One container under construction, together with the key it will be
/// attached under once it closes.
enum Frame {
    Object(Object, Option<String>),
    Array(Array, Option<String>),
}

/// Handler building the tree.
///
/// Open containers live on the frame stack; a completed value is
/// attached to the frame on top, or becomes the root when the stack is
/// empty. The pending key is latched by `on_key_end` and consumed by the
/// next attachment.
struct TreeBuilder {
    root: JsonValue,
    stack: SmallVec<[Frame; DEFAULT_MAX_DEPTH]>,
    pending_key: Option<String>,
    key_buf: String,
    text_buf: String,
    sp: StoragePtr,
}

impl TreeBuilder {
    fn new(sp: StoragePtr) -> Self {
        TreeBuilder {
            root: JsonValue::with_storage(sp.clone()),
            stack: SmallVec::new(),
            pending_key: None,
            key_buf: String::new(),
            text_buf: String::new(),
            sp,
        }
    }

    fn attach(&mut self, value: JsonValue) {
        match self.stack.last_mut() {
            Some(Frame::Object(obj, _)) => {
                let key = self.pending_key.take().expect("a key precedes every member");
                // First occurrence of a duplicate key wins.
                obj.insert(&key, value);
            }
            Some(Frame::Array(arr, _)) => arr.push(value),
            None => self.root = value,
        }
    }
}

impl Handler for TreeBuilder {
    fn on_document_begin(&mut self) -> Result<()> {
        self.root = JsonValue::with_storage(self.sp.clone());
        self.stack.clear();
        self.pending_key = None;
        self.key_buf.clear();
        self.text_buf.clear();
        Ok(())
    }

    fn on_object_begin(&mut self) -> Result<()> {
        let key = self.pending_key.take();
        self.stack
            .push(Frame::Object(Object::with_storage(self.sp.clone()), key));
        Ok(())
    }

    fn on_object_end(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Object(obj, key)) => {
                self.pending_key = key;
                self.attach(JsonValue::Object(obj));
            }
            _ => unreachable!("machine balances container events"),
        }
        Ok(())
    }

    fn on_array_begin(&mut self) -> Result<()> {
        let key = self.pending_key.take();
        self.stack
            .push(Frame::Array(Array::with_storage(self.sp.clone()), key));
        Ok(())
    }

    fn on_array_end(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Array(arr, key)) => {
                self.pending_key = key;
                self.attach(JsonValue::Array(arr));
            }
            _ => unreachable!("machine balances container events"),
        }
        Ok(())
    }

    fn on_key_data(&mut self, fragment: &str) -> Result<()> {
        self.key_buf.push_str(fragment);
        Ok(())
    }

    fn on_key_end(&mut self, fragment: &str) -> Result<()> {
        self.key_buf.push_str(fragment);
        self.pending_key = Some(mem::take(&mut self.key_buf));
        Ok(())
    }

    fn on_string_data(&mut self, fragment: &str) -> Result<()> {
        self.text_buf.push_str(fragment);
        Ok(())
    }

    fn on_string_end(&mut self, fragment: &str) -> Result<()> {
        self.text_buf.push_str(fragment);
        let string = JsonString::from_str_in(&self.text_buf, self.sp.clone());
        self.text_buf.clear();
        self.attach(JsonValue::String(string));
        Ok(())
    }

    fn on_number(&mut self, number: Number) -> Result<()> {
        self.attach(JsonValue::Number(number, self.sp.clone()));
        Ok(())
    }

    fn on_bool(&mut self, value: bool) -> Result<()> {
        self.attach(JsonValue::Boolean(value, self.sp.clone()));
        Ok(())
    }

    fn on_null(&mut self) -> Result<()> {
        self.attach(JsonValue::Null(self.sp.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::value::Kind;

    #[test]
    fn builds_a_tree() {
        let mut parser = TreeParser::new();
        parser.write(br#"{"a":1,"b":[true,null,"x"]}"#).unwrap();
        parser.write_eof().unwrap();
        assert!(parser.is_done());

        let root = parser.release();
        assert_eq!(root.kind(), Kind::Object);
        assert!(root["a"].is(1));
        assert!(root["b"][0].is(true));
        assert!(root["b"][1].is_null());
        assert!(root["b"][2].is("x"));
    }

    #[test]
    fn chunked_input_builds_the_same_tree() {
        let source = br#"{"k":"hello","n":[1,2.5,-3]}"#;

        let mut whole = TreeParser::new();
        whole.write(source).unwrap();
        whole.write_eof().unwrap();

        let mut chunked = TreeParser::new();
        for chunk in source.chunks(3) {
            chunked.write_some(chunk).unwrap();
        }
        chunked.write_eof().unwrap();

        assert_eq!(whole.release(), chunked.release());
    }

    #[test]
    fn key_split_across_buffers() {
        let mut parser = TreeParser::new();
        parser.write_some(br#"{"long ke"#).unwrap();
        parser.write_some(br#"y":null}"#).unwrap();
        parser.write_eof().unwrap();

        let root = parser.release();
        assert!(root["long key"].is_null());
    }

    #[test]
    fn every_node_uses_the_parsers_storage() {
        let sp = default_storage();
        let mut parser = TreeParser::with_storage(sp.clone());
        parser.write(br#"{"a":[1,"s"],"b":{"c":true}}"#).unwrap();
        parser.write_eof().unwrap();

        let root = parser.release();
        assert_eq!(root.get_storage(), &sp);
        assert_eq!(root["a"].get_storage(), &sp);
        assert_eq!(root["a"][1].get_storage(), &sp);
        assert_eq!(root["b"]["c"].get_storage(), &sp);
    }

    #[test]
    fn duplicate_keys_keep_the_first_value() {
        let mut parser = TreeParser::new();
        parser.write(br#"{"a":1,"a":2}"#).unwrap();
        parser.write_eof().unwrap();

        let root = parser.release();
        assert_eq!(root.len(), 1);
        assert!(root["a"].is(1));
    }

    #[test]
    fn release_resets_for_reuse() {
        let mut parser = TreeParser::new();
        parser.write(b"[1]").unwrap();
        parser.write_eof().unwrap();
        let first = parser.release();
        assert_eq!(first.len(), 1);

        parser.write(b"true").unwrap();
        parser.write_eof().unwrap();
        assert!(parser.release().is(true));
    }

    #[test]
    fn depth_limit_matches_the_machine() {
        let mut parser = TreeParser::new();
        parser.set_max_depth(4);

        let err = parser.write(b"[[[[[1]]]]]").unwrap_err();
        assert_eq!(err, Error::TooDeep);
    }
}
