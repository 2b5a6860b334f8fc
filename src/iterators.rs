use std::slice;

use smallvec::SmallVec;

use crate::object;
use crate::value::JsonValue;

pub use crate::object::{Iter as ObjectIter, IterMut as ObjectIterMut};

/// Iterator over the elements of an array value; empty for any other
/// kind.
pub enum Members<'a> {
    Some(slice::Iter<'a, JsonValue>),
    None,
}

/// Mutable variant of [`Members`].
pub enum MembersMut<'a> {
    Some(slice::IterMut<'a, JsonValue>),
    None,
}

/// Iterator over the entries of an object value in insertion order;
/// empty for any other kind.
pub enum Entries<'a> {
    Some(object::Iter<'a>),
    None,
}

/// Mutable variant of [`Entries`].
pub enum EntriesMut<'a> {
    Some(object::IterMut<'a>),
    None,
}

impl<'a> Iterator for Members<'a> {
    type Item = &'a JsonValue;

    fn next(&mut self) -> Option<&'a JsonValue> {
        match *self {
            Members::Some(ref mut iter) => iter.next(),
            Members::None => None,
        }
    }
}

impl<'a> Iterator for MembersMut<'a> {
    type Item = &'a mut JsonValue;

    fn next(&mut self) -> Option<&'a mut JsonValue> {
        match *self {
            MembersMut::Some(ref mut iter) => iter.next(),
            MembersMut::None => None,
        }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, &'a JsonValue);

    fn next(&mut self) -> Option<(&'a str, &'a JsonValue)> {
        match *self {
            Entries::Some(ref mut iter) => iter.next(),
            Entries::None => None,
        }
    }
}

impl<'a> Iterator for EntriesMut<'a> {
    type Item = (&'a str, &'a mut JsonValue);

    fn next(&mut self) -> Option<(&'a str, &'a mut JsonValue)> {
        match *self {
            EntriesMut::Some(ref mut iter) => iter.next(),
            EntriesMut::None => None,
        }
    }
}

/// One step of a depth-first traversal.
///
/// Containers are visited twice: once on the way in (`end == false`) and
/// once when all their children have been yielded (`end == true`), which
/// is the moment a serializer emits the closing bracket. `last` is set on
/// the final sibling at each depth.
pub struct Visit<'a> {
    pub depth: usize,
    pub key: Option<&'a str>,
    pub value: &'a JsonValue,
    pub last: bool,
    pub end: bool,
}

enum FrameIter<'a> {
    Array(slice::Iter<'a, JsonValue>),
    Object(object::Iter<'a>),
}

impl<'a> FrameIter<'a> {
    fn next_entry(&mut self) -> Option<(Option<&'a str>, &'a JsonValue, bool)> {
        match *self {
            FrameIter::Array(ref mut iter) => {
                let value = iter.next()?;
                Some((None, value, iter.len() == 0))
            }
            FrameIter::Object(ref mut iter) => {
                let (key, value) = iter.next()?;
                Some((Some(key), value, iter.len() == 0))
            }
        }
    }
}

struct Frame<'a> {
    value: &'a JsonValue,
    key: Option<&'a str>,
    depth: usize,
    last: bool,
    entries: FrameIter<'a>,
}

impl<'a> Frame<'a> {
    fn new(value: &'a JsonValue, key: Option<&'a str>, depth: usize, last: bool) -> Self {
        let entries = match *value {
            JsonValue::Array(ref arr) => FrameIter::Array(arr.iter()),
            JsonValue::Object(ref obj) => FrameIter::Object(obj.iter()),
            _ => unreachable!("only containers are framed"),
        };

        Frame {
            value,
            key,
            depth,
            last,
            entries,
        }
    }
}

/// A depth-first generator over a value tree.
///
/// Yields a [`Visit`] per node, with extra closing visits for
/// containers. The traversal never recurses; nesting lives on an
/// explicit stack that spills to the heap past its inline capacity.
pub struct Walk<'a> {
    stack: SmallVec<[Frame<'a>; 16]>,
    root: Option<&'a JsonValue>,
}

impl<'a> Walk<'a> {
    pub fn new(root: &'a JsonValue) -> Self {
        Walk {
            stack: SmallVec::new(),
            root: Some(root),
        }
    }
}

enum Step<'a> {
    Child(Option<&'a str>, &'a JsonValue, bool, usize),
    Close,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Visit<'a>> {
        if let Some(root) = self.root.take() {
            if root.is_structured() {
                self.stack.push(Frame::new(root, None, 0, true));
            }
            return Some(Visit {
                depth: 0,
                key: None,
                value: root,
                last: true,
                end: false,
            });
        }

        let step = {
            let frame = self.stack.last_mut()?;
            match frame.entries.next_entry() {
                Some((key, value, last)) => Step::Child(key, value, last, frame.depth + 1),
                None => Step::Close,
            }
        };

        match step {
            Step::Child(key, value, last, depth) => {
                if value.is_structured() {
                    self.stack.push(Frame::new(value, key, depth, last));
                }
                Some(Visit {
                    depth,
                    key,
                    value,
                    last,
                    end: false,
                })
            }
            Step::Close => {
                let frame = self.stack.pop()?;
                Some(Visit {
                    depth: frame.depth,
                    key: frame.key,
                    value: frame.value,
                    last: frame.last,
                    end: true,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    // Compact trace: one letter per visit, '(' ')' for container ends.
    fn trace(source: &str) -> String {
        let value = parse(source).unwrap();
        let mut out = String::new();

        for visit in Walk::new(&value) {
            if visit.end {
                out.push(')');
                continue;
            }
            out.push(match visit.value.kind() {
                crate::Kind::Object => '{',
                crate::Kind::Array => '[',
                crate::Kind::String => 's',
                crate::Kind::Number => 'n',
                crate::Kind::Boolean => 'b',
                crate::Kind::Null => '0',
            });
        }
        out
    }

    #[test]
    fn scalar_root_is_one_visit() {
        assert_eq!(trace("42"), "n");
        assert_eq!(trace("null"), "0");
    }

    #[test]
    fn containers_get_closing_visits() {
        assert_eq!(trace("[]"), "[)");
        assert_eq!(trace("[1,[2],3]"), "[n[n)n)");
        assert_eq!(trace(r#"{"a":1,"b":[true,null,"x"]}"#), "{n[b0s))");
    }

    #[test]
    fn keys_and_last_flags() {
        let value = parse(r#"{"a":1,"b":2}"#).unwrap();
        let visits: Vec<_> = Walk::new(&value).collect();

        // open, "a", "b", close
        assert_eq!(visits.len(), 4);
        assert_eq!(visits[1].key, Some("a"));
        assert!(!visits[1].last);
        assert_eq!(visits[2].key, Some("b"));
        assert!(visits[2].last);
        assert!(visits[3].end);
        assert_eq!(visits[3].depth, 0);
    }

    #[test]
    fn depth_tracks_nesting() {
        let value = parse("[[[1]]]").unwrap();
        let depths: Vec<_> = Walk::new(&value)
            .filter(|visit| !visit.end)
            .map(|visit| visit.depth)
            .collect();

        assert_eq!(depths, [0, 1, 2, 3]);
    }
}
