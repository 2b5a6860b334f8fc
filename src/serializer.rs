use tracing::trace;

use crate::iterators::{Visit, Walk};
use crate::number;
use crate::value::JsonValue;

/// A resumable writer converting a value tree to serialized JSON.
///
/// Each call to [`Serializer::next`] fills as much of the caller's
/// buffer as fits and suspends, even in the middle of a string escape or
/// a number literal. Output carries no insignificant whitespace, and
/// separators are attached to the token that follows them, so every
/// suspension point needs only the staging cursor to resume.
pub struct Serializer<'a> {
    walk: Walk<'a>,
    // Bytes of the token currently being emitted, drained across calls.
    stage: Vec<u8>,
    stage_pos: usize,
    // The next token at this position is preceded by a comma.
    need_comma: bool,
    done: bool,
}

impl<'a> Serializer<'a> {
    pub fn new(root: &'a JsonValue) -> Self {
        Serializer {
            walk: Walk::new(root),
            stage: Vec::new(),
            stage_pos: 0,
            need_comma: false,
            done: false,
        }
    }

    /// Returns `true` once the whole tree has been written out.
    pub fn is_done(&self) -> bool {
        self.done && self.stage_pos == self.stage.len()
    }

    /// Write up to `buf.len()` bytes of output, returning the count
    /// written. Returns 0 only when serialization is complete.
    pub fn next(&mut self, buf: &mut [u8]) -> usize {
        let mut written = 0;

        while written < buf.len() {
            if self.stage_pos < self.stage.len() {
                let pending = &self.stage[self.stage_pos..];
                let n = pending.len().min(buf.len() - written);
                buf[written..written + n].copy_from_slice(&pending[..n]);
                written += n;
                self.stage_pos += n;
                continue;
            }

            if self.done {
                break;
            }

            match self.walk.next() {
                Some(visit) => self.stage_token(&visit),
                None => {
                    self.done = true;
                    trace!(target: "json_dom::serializer", "document serialized");
                }
            }
        }

        written
    }

    /// Lay out the full byte sequence for one traversal step.
    fn stage_token(&mut self, visit: &Visit) {
        self.stage.clear();
        self.stage_pos = 0;

        if visit.end {
            self.stage.push(match *visit.value {
                JsonValue::Object(_) => b'}',
                _ => b']',
            });
            self.need_comma = true;
            return;
        }

        if self.need_comma {
            self.stage.push(b',');
        }

        if let Some(key) = visit.key {
            write_quoted(&mut self.stage, key);
            self.stage.push(b':');
        }

        match *visit.value {
            JsonValue::Object(_) => {
                self.stage.push(b'{');
                self.need_comma = false;
            }
            JsonValue::Array(_) => {
                self.stage.push(b'[');
                self.need_comma = false;
            }
            JsonValue::String(ref s) => {
                write_quoted(&mut self.stage, s.as_str());
                self.need_comma = true;
            }
            JsonValue::Number(ref n, _) => {
                let mut digits = [0u8; number::RENDER_LEN];
                let len = n.render(&mut digits);
                self.stage.extend_from_slice(&digits[..len]);
                self.need_comma = true;
            }
            JsonValue::Boolean(b, _) => {
                self.stage
                    .extend_from_slice(if b { b"true" } else { b"false" });
                self.need_comma = true;
            }
            JsonValue::Null(_) => {
                self.stage.extend_from_slice(b"null");
                self.need_comma = true;
            }
        }
    }
}

// Escaping symmetric with the parser: the two mandatory characters, the
// C0 range with short forms where JSON has them, everything else raw.
fn write_quoted(out: &mut Vec<u8>, text: &str) {
    out.push(b'"');

    for byte in text.bytes() {
        match byte {
            b'"' => out.extend_from_slice(b"\\\""),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x08 => out.extend_from_slice(b"\\b"),
            0x0C => out.extend_from_slice(b"\\f"),
            0x00..=0x1F => {
                const HEX: &[u8; 16] = b"0123456789abcdef";
                out.extend_from_slice(b"\\u00");
                out.push(HEX[(byte >> 4) as usize]);
                out.push(HEX[(byte & 0xF) as usize]);
            }
            _ => out.push(byte),
        }
    }

    out.push(b'"');
}

/// Serialize a whole tree into a `String`.
pub(crate) fn to_text(root: &JsonValue) -> String {
    let mut serializer = Serializer::new(root);
    let mut out = Vec::new();
    let mut buf = [0u8; 512];

    loop {
        let n = serializer.next(&mut buf);
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }

    // The serializer emits JSON text, which is UTF-8.
    unsafe { String::from_utf8_unchecked(out) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, stringify_ref};

    fn roundtrip(source: &str) -> String {
        stringify_ref(&parse(source).unwrap())
    }

    #[test]
    fn scalars() {
        assert_eq!(roundtrip("null"), "null");
        assert_eq!(roundtrip("true"), "true");
        assert_eq!(roundtrip("42"), "42");
        assert_eq!(roundtrip("-7"), "-7");
        assert_eq!(roundtrip("\"hi\""), "\"hi\"");
    }

    #[test]
    fn no_insignificant_whitespace() {
        assert_eq!(
            roundtrip(" { \"a\" : 1 , \"b\" : [ true , null , \"x\" ] } "),
            r#"{"a":1,"b":[true,null,"x"]}"#
        );
    }

    #[test]
    fn empty_containers() {
        assert_eq!(roundtrip("{}"), "{}");
        assert_eq!(roundtrip("[]"), "[]");
        assert_eq!(roundtrip("[[],{}]"), "[[],{}]");
    }

    #[test]
    fn escapes_are_emitted() {
        assert_eq!(roundtrip(r#""a\"b\\c\nd\te""#), r#""a\"b\\c\nd\te""#);
        // Short forms win over \u00XX.
        assert_eq!(roundtrip(r#""\b\f""#), r#""\b\f""#);
        // Other control characters fall back to \u00XX.
        assert_eq!(roundtrip(r#""\u0001""#), r#""\u0001""#);
        // Non-ASCII is written raw.
        assert_eq!(roundtrip("\"\u{e9}\""), "\"\u{e9}\"");
    }

    #[test]
    fn tiny_output_buffers_still_work() {
        let value = parse(r#"{"key":"a long enough string","n":12345.75}"#).unwrap();

        let mut serializer = Serializer::new(&value);
        let mut out = Vec::new();
        let mut buf = [0u8; 1];

        loop {
            let n = serializer.next(&mut buf);
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }

        assert!(serializer.is_done());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"{"key":"a long enough string","n":12345.75}"#
        );
    }

    #[test]
    fn buffer_counts_add_up() {
        let value = parse(r#"[1,2,3,"abc"]"#).unwrap();
        let expected = r#"[1,2,3,"abc"]"#;

        let mut serializer = Serializer::new(&value);
        let mut buf = [0u8; 5];
        let mut total = 0;

        loop {
            let n = serializer.next(&mut buf);
            if n == 0 {
                break;
            }
            total += n;
        }

        assert_eq!(total, expected.len());
    }
}
