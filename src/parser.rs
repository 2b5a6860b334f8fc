// The push parser. Callers feed bytes in as many slices as they like;
// the machine suspends at any byte boundary and picks up where it left
// off on the next call. There is no recursion over the input structure:
// nesting lives in an explicit state stack, and every piece of transient
// lexing state (number parts, escape halves, a pending surrogate, an
// unfinished UTF-8 sequence) is a field on the parser, never a local.

use smallvec::SmallVec;
use tracing::trace;

use std::str;

use crate::error::{Error, Result};
use crate::number::Number;

/// Receiver for parse events.
///
/// Events arrive in source order. String and key content may be split
/// into any number of `*_data` fragments when the text straddles input
/// buffers; the `*_end` event carries the final fragment and marks
/// completion. Returning an error from any event halts the parse; the
/// error is sticky and is reported from every later call.
pub trait Handler {
    fn on_document_begin(&mut self) -> Result<()>;
    fn on_object_begin(&mut self) -> Result<()>;
    fn on_object_end(&mut self) -> Result<()>;
    fn on_array_begin(&mut self) -> Result<()>;
    fn on_array_end(&mut self) -> Result<()>;
    fn on_key_data(&mut self, fragment: &str) -> Result<()>;
    fn on_key_end(&mut self, fragment: &str) -> Result<()>;
    fn on_string_data(&mut self, fragment: &str) -> Result<()>;
    fn on_string_end(&mut self, fragment: &str) -> Result<()>;
    fn on_number(&mut self, number: Number) -> Result<()>;
    fn on_bool(&mut self, value: bool) -> Result<()>;
    fn on_null(&mut self) -> Result<()>;
}

/// Depth to which the state stack does not touch the heap.
const STACK_CAPACITY: usize = 64;

/// Default limit on input nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    /// Expecting a value.
    Value,
    /// After `{`: expecting `}` or the first key.
    ObjectFirst,
    /// After `,` in an object: expecting a key.
    ObjectKey,
    /// After a key: expecting `:`.
    ObjectColon,
    /// After a member value: expecting `,` or `}`.
    ObjectComma,
    /// After `[`: expecting `]` or the first element.
    ArrayFirst,
    /// After an element: expecting `,` or `]`.
    ArrayComma,
    /// Inside a quoted string or key.
    Str,
    /// After `\` inside a string.
    StrEscape,
    /// Collecting the four hex digits of `\uXXXX`.
    StrUnicode,
    /// After a high surrogate: expecting `\`.
    StrSurrogateEscape,
    /// After a high surrogate: expecting `u`.
    StrSurrogateU,
    /// Inside `true`, `false` or `null`.
    Lit,
    /// After `-`: expecting the first mantissa digit.
    NumStart,
    /// Consumed a leading zero.
    NumZero,
    /// Accumulating integer digits.
    NumMant,
    /// After `.`: expecting the first fraction digit.
    NumFrac0,
    /// Accumulating fraction digits.
    NumFrac,
    /// After `e`/`E`: expecting a sign or digit.
    NumExpSign,
    /// After an exponent sign: expecting a digit.
    NumExp0,
    /// Accumulating exponent digits.
    NumExp,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum LitKind {
    True,
    False,
    Null,
}

// Look up table marking the characters a string may contain in raw form.
const QU: bool = false; // double quote       0x22
const BS: bool = false; // backslash          0x5C
const CT: bool = false; // control character  0x00 ... 0x1F
const __: bool = true;

static ALLOWED: [bool; 256] = [
// 0   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
  CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, // 0
  CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, // 1
  __, __, QU, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
  __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 3
  __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
  __, __, __, __, __, __, __, __, __, __, __, __, BS, __, __, __, // 5
  __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6
  __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 7
  __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
  __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
  __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
  __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
  __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
  __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
  __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
  __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
];

#[inline]
fn is_ws(byte: u8) -> bool {
    byte == b' ' || byte == b'\t' || byte == b'\n' || byte == b'\r'
}

/// A resumable push parser for serialized JSON.
///
/// Feed input with [`Parser::write_some`] or [`Parser::write`] and
/// finish with [`Parser::write_eof`], which is required to finalize a
/// document ending in a number. Events are delivered to the [`Handler`]
/// passed to each call.
pub struct Parser {
    stack: SmallVec<[State; STACK_CAPACITY]>,
    failed: Option<Error>,
    begun: bool,
    depth: usize,
    max_depth: usize,

    // Decoded string bytes not yet handed to the handler. May end with
    // an incomplete UTF-8 sequence carried over between buffers.
    scratch: Vec<u8>,
    is_key: bool,

    // \uXXXX accumulation and a pending high surrogate.
    hex_acc: u32,
    hex_count: u8,
    high_surrogate: Option<u32>,

    // Literal progress.
    lit_kind: LitKind,
    lit_rest: &'static [u8],
    lit_pos: usize,

    // Number accumulation.
    n_mant: u64,
    n_exp: i32,
    n_frac: u32,
    n_neg: bool,
    n_exp_neg: bool,
}

impl Parser {
    pub fn new() -> Self {
        let mut stack = SmallVec::new();
        stack.push(State::Value);

        Parser {
            stack,
            failed: None,
            begun: false,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            scratch: Vec::new(),
            is_key: false,
            hex_acc: 0,
            hex_count: 0,
            high_surrogate: None,
            lit_kind: LitKind::Null,
            lit_rest: b"",
            lit_pos: 0,
            n_mant: 0,
            n_exp: 0,
            n_frac: 0,
            n_neg: false,
            n_exp_neg: false,
        }
    }

    /// Maximum allowed nesting of the input.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Change the nesting limit. Takes effect for subsequent input.
    pub fn set_max_depth(&mut self, levels: usize) {
        self.max_depth = levels;
    }

    /// Returns `true` once a complete document has been parsed and no
    /// trailing non-whitespace input has been seen.
    pub fn is_done(&self) -> bool {
        self.failed.is_none() && self.begun && self.stack.is_empty()
    }

    /// Restore the freshly-constructed state, keeping the configured
    /// maximum depth.
    pub fn reset(&mut self) {
        let max_depth = self.max_depth;
        *self = Parser::new();
        self.max_depth = max_depth;
    }

    /// Consume bytes from `buf`, emitting events into `handler`.
    ///
    /// Returns the number of bytes consumed, which is less than
    /// `buf.len()` only when the document completed before the end of
    /// the buffer.
    pub fn write_some<H: Handler>(&mut self, handler: &mut H, buf: &[u8]) -> Result<usize> {
        if let Some(err) = self.failed {
            return Err(err);
        }
        self.begin(handler)?;

        let mut i = 0;

        while i < buf.len() {
            let byte = buf[i];

            let state = match self.stack.last() {
                Some(&state) => state,
                None => {
                    // Document complete: consume trailing whitespace,
                    // stop at anything else.
                    if is_ws(byte) {
                        i += 1;
                        continue;
                    }
                    break;
                }
            };

            match state {
                State::Value => {
                    if is_ws(byte) {
                        i += 1;
                        continue;
                    }
                    i += 1;
                    match byte {
                        b'{' => {
                            self.open(handler, true)?;
                        }
                        b'[' => {
                            self.open(handler, false)?;
                        }
                        b'"' => {
                            self.set_state(State::Str);
                            self.scratch.clear();
                        }
                        b't' => self.begin_lit(LitKind::True, b"rue"),
                        b'f' => self.begin_lit(LitKind::False, b"alse"),
                        b'n' => self.begin_lit(LitKind::Null, b"ull"),
                        b'-' => {
                            self.begin_number(true);
                            self.set_state(State::NumStart);
                        }
                        b'0' => {
                            self.begin_number(false);
                            self.set_state(State::NumZero);
                        }
                        b'1'..=b'9' => {
                            self.begin_number(false);
                            self.n_mant = (byte - b'0') as u64;
                            self.set_state(State::NumMant);
                        }
                        _ => return Err(self.fail(Error::Syntax)),
                    }
                }

                State::ObjectFirst => {
                    if is_ws(byte) {
                        i += 1;
                        continue;
                    }
                    i += 1;
                    match byte {
                        b'}' => self.close(handler, true)?,
                        b'"' => self.begin_key(),
                        _ => return Err(self.fail(Error::Syntax)),
                    }
                }

                State::ObjectKey => {
                    if is_ws(byte) {
                        i += 1;
                        continue;
                    }
                    i += 1;
                    match byte {
                        b'"' => self.begin_key(),
                        _ => return Err(self.fail(Error::Syntax)),
                    }
                }

                State::ObjectColon => {
                    if is_ws(byte) {
                        i += 1;
                        continue;
                    }
                    i += 1;
                    match byte {
                        b':' => {
                            self.set_state(State::ObjectComma);
                            self.stack.push(State::Value);
                        }
                        _ => return Err(self.fail(Error::Syntax)),
                    }
                }

                State::ObjectComma => {
                    if is_ws(byte) {
                        i += 1;
                        continue;
                    }
                    i += 1;
                    match byte {
                        b',' => self.set_state(State::ObjectKey),
                        b'}' => self.close(handler, true)?,
                        _ => return Err(self.fail(Error::Syntax)),
                    }
                }

                State::ArrayFirst => {
                    if is_ws(byte) {
                        i += 1;
                        continue;
                    }
                    match byte {
                        b']' => {
                            i += 1;
                            self.close(handler, false)?;
                        }
                        _ => {
                            // Reprocess this byte as the first element.
                            self.set_state(State::ArrayComma);
                            self.stack.push(State::Value);
                        }
                    }
                }

                State::ArrayComma => {
                    if is_ws(byte) {
                        i += 1;
                        continue;
                    }
                    i += 1;
                    match byte {
                        b',' => self.stack.push(State::Value),
                        b']' => self.close(handler, false)?,
                        _ => return Err(self.fail(Error::Syntax)),
                    }
                }

                State::Str => {
                    // Fast path: copy the run of plain characters.
                    while i < buf.len() && ALLOWED[buf[i] as usize] {
                        self.scratch.push(buf[i]);
                        i += 1;
                    }
                    if i == buf.len() {
                        break;
                    }
                    let byte = buf[i];
                    i += 1;
                    match byte {
                        b'"' => self.finish_string(handler)?,
                        b'\\' => self.set_state(State::StrEscape),
                        _ => return Err(self.fail(Error::Syntax)),
                    }
                }

                State::StrEscape => {
                    i += 1;
                    let unescaped = match byte {
                        b'"' => b'"',
                        b'\\' => b'\\',
                        b'/' => b'/',
                        b'b' => 0x08,
                        b'f' => 0x0C,
                        b'n' => b'\n',
                        b'r' => b'\r',
                        b't' => b'\t',
                        b'u' => {
                            self.hex_acc = 0;
                            self.hex_count = 0;
                            self.set_state(State::StrUnicode);
                            continue;
                        }
                        _ => return Err(self.fail(Error::Syntax)),
                    };
                    self.scratch.push(unescaped);
                    self.set_state(State::Str);
                }

                State::StrUnicode => {
                    i += 1;
                    let digit = match byte {
                        b'0'..=b'9' => (byte - b'0') as u32,
                        b'a'..=b'f' => (byte + 10 - b'a') as u32,
                        b'A'..=b'F' => (byte + 10 - b'A') as u32,
                        _ => return Err(self.fail(Error::Syntax)),
                    };
                    self.hex_acc = self.hex_acc << 4 | digit;
                    self.hex_count += 1;

                    if self.hex_count == 4 {
                        self.finish_codepoint()?;
                    }
                }

                State::StrSurrogateEscape => {
                    i += 1;
                    match byte {
                        b'\\' => self.set_state(State::StrSurrogateU),
                        _ => return Err(self.fail(Error::Syntax)),
                    }
                }

                State::StrSurrogateU => {
                    i += 1;
                    match byte {
                        b'u' => {
                            self.hex_acc = 0;
                            self.hex_count = 0;
                            self.set_state(State::StrUnicode);
                        }
                        _ => return Err(self.fail(Error::Syntax)),
                    }
                }

                State::Lit => {
                    i += 1;
                    if byte != self.lit_rest[self.lit_pos] {
                        return Err(self.fail(Error::Syntax));
                    }
                    self.lit_pos += 1;
                    if self.lit_pos == self.lit_rest.len() {
                        self.stack.pop();
                        let result = match self.lit_kind {
                            LitKind::True => handler.on_bool(true),
                            LitKind::False => handler.on_bool(false),
                            LitKind::Null => handler.on_null(),
                        };
                        self.guard(result)?;
                    }
                }

                State::NumStart => {
                    i += 1;
                    match byte {
                        b'0' => self.set_state(State::NumZero),
                        b'1'..=b'9' => {
                            self.n_mant = (byte - b'0') as u64;
                            self.set_state(State::NumMant);
                        }
                        _ => return Err(self.fail(Error::Syntax)),
                    }
                }

                State::NumZero => match byte {
                    // Only a zero mantissa may begin with a zero.
                    b'0'..=b'9' => return Err(self.fail(Error::Syntax)),
                    b'.' => {
                        i += 1;
                        self.set_state(State::NumFrac0);
                    }
                    b'e' | b'E' => {
                        i += 1;
                        self.set_state(State::NumExpSign);
                    }
                    _ => self.finish_number(handler)?,
                },

                State::NumMant => match byte {
                    b'0'..=b'9' => {
                        i += 1;
                        self.push_mantissa(byte - b'0')?;
                    }
                    b'.' => {
                        i += 1;
                        self.set_state(State::NumFrac0);
                    }
                    b'e' | b'E' => {
                        i += 1;
                        self.set_state(State::NumExpSign);
                    }
                    _ => self.finish_number(handler)?,
                },

                State::NumFrac0 => match byte {
                    b'0'..=b'9' => {
                        i += 1;
                        self.push_mantissa(byte - b'0')?;
                        self.n_frac += 1;
                        self.set_state(State::NumFrac);
                    }
                    _ => return Err(self.fail(Error::Syntax)),
                },

                State::NumFrac => match byte {
                    b'0'..=b'9' => {
                        i += 1;
                        self.push_mantissa(byte - b'0')?;
                        self.n_frac += 1;
                    }
                    b'e' | b'E' => {
                        i += 1;
                        self.set_state(State::NumExpSign);
                    }
                    _ => self.finish_number(handler)?,
                },

                State::NumExpSign => match byte {
                    b'-' => {
                        i += 1;
                        self.n_exp_neg = true;
                        self.set_state(State::NumExp0);
                    }
                    b'+' => {
                        i += 1;
                        self.set_state(State::NumExp0);
                    }
                    b'0'..=b'9' => {
                        i += 1;
                        self.push_exponent(byte - b'0')?;
                        self.set_state(State::NumExp);
                    }
                    _ => return Err(self.fail(Error::Syntax)),
                },

                State::NumExp0 => match byte {
                    b'0'..=b'9' => {
                        i += 1;
                        self.push_exponent(byte - b'0')?;
                        self.set_state(State::NumExp);
                    }
                    _ => return Err(self.fail(Error::Syntax)),
                },

                State::NumExp => match byte {
                    b'0'..=b'9' => {
                        i += 1;
                        self.push_exponent(byte - b'0')?;
                    }
                    _ => self.finish_number(handler)?,
                },
            }
        }

        // Buffer exhausted mid-string: hand over what decoded cleanly.
        match self.stack.last() {
            Some(State::Str)
            | Some(State::StrEscape)
            | Some(State::StrUnicode)
            | Some(State::StrSurrogateEscape)
            | Some(State::StrSurrogateU) => self.emit_fragment(handler)?,
            _ => {}
        }

        Ok(i)
    }

    /// Like [`Parser::write_some`], but refuses trailing input: any
    /// unconsumed non-whitespace byte is an [`Error::ExtraData`].
    pub fn write<H: Handler>(&mut self, handler: &mut H, buf: &[u8]) -> Result<usize> {
        let consumed = self.write_some(handler, buf)?;
        if consumed < buf.len() {
            return Err(self.fail(Error::ExtraData));
        }
        Ok(consumed)
    }

    /// Signal the end of input. A document consisting of a bare number
    /// is only complete once this is called.
    pub fn write_eof<H: Handler>(&mut self, handler: &mut H) -> Result<()> {
        if let Some(err) = self.failed {
            return Err(err);
        }
        self.begin(handler)?;

        // A number at the top level is finalized by end of input.
        match self.stack.last() {
            Some(State::NumZero)
            | Some(State::NumMant)
            | Some(State::NumFrac)
            | Some(State::NumExp) => self.finish_number(handler)?,
            _ => {}
        }

        if self.stack.is_empty() {
            trace!(target: "json_dom::parser", "document complete");
            Ok(())
        } else {
            Err(self.fail(Error::Syntax))
        }
    }

    // ------------------------------------------------------------------

    fn begin<H: Handler>(&mut self, handler: &mut H) -> Result<()> {
        if !self.begun {
            self.begun = true;
            trace!(target: "json_dom::parser", "document begin");
            self.guard(handler.on_document_begin())?;
        }
        Ok(())
    }

    #[inline]
    fn set_state(&mut self, state: State) {
        *self.stack.last_mut().expect("state stack is never empty here") = state;
    }

    fn fail(&mut self, err: Error) -> Error {
        trace!(target: "json_dom::parser", error = %err, "parse failed");
        self.failed = Some(err);
        err
    }

    fn guard(&mut self, result: Result<()>) -> Result<()> {
        if let Err(err) = result {
            return Err(self.fail(err));
        }
        Ok(())
    }

    fn open<H: Handler>(&mut self, handler: &mut H, object: bool) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(self.fail(Error::TooDeep));
        }
        self.depth += 1;

        self.set_state(if object {
            State::ObjectFirst
        } else {
            State::ArrayFirst
        });
        self.guard(if object {
            handler.on_object_begin()
        } else {
            handler.on_array_begin()
        })
    }

    fn close<H: Handler>(&mut self, handler: &mut H, object: bool) -> Result<()> {
        self.depth -= 1;
        self.stack.pop();
        self.guard(if object {
            handler.on_object_end()
        } else {
            handler.on_array_end()
        })
    }

    fn begin_key(&mut self) {
        self.is_key = true;
        self.set_state(State::ObjectColon);
        self.stack.push(State::Str);
        self.scratch.clear();
    }

    fn begin_lit(&mut self, kind: LitKind, rest: &'static [u8]) {
        self.lit_kind = kind;
        self.lit_rest = rest;
        self.lit_pos = 0;
        self.set_state(State::Lit);
    }

    fn begin_number(&mut self, negative: bool) {
        self.n_mant = 0;
        self.n_exp = 0;
        self.n_frac = 0;
        self.n_neg = negative;
        self.n_exp_neg = false;
    }

    #[inline]
    fn push_mantissa(&mut self, digit: u8) -> Result<()> {
        match self
            .n_mant
            .checked_mul(10)
            .and_then(|m| m.checked_add(digit as u64))
        {
            Some(mant) => {
                self.n_mant = mant;
                Ok(())
            }
            None => Err(self.fail(Error::MantissaOverflow)),
        }
    }

    #[inline]
    fn push_exponent(&mut self, digit: u8) -> Result<()> {
        match self
            .n_exp
            .checked_mul(10)
            .and_then(|e| e.checked_add(digit as i32))
        {
            Some(exp) => {
                self.n_exp = exp;
                Ok(())
            }
            None => Err(self.fail(Error::ExponentOverflow)),
        }
    }

    fn finish_number<H: Handler>(&mut self, handler: &mut H) -> Result<()> {
        let exp = if self.n_exp_neg {
            -(self.n_exp as i64)
        } else {
            self.n_exp as i64
        } - self.n_frac as i64;

        // Exponents beyond i32 only shift the value further into
        // infinity or zero; clamping preserves that.
        let exp = exp.max(i32::MIN as i64).min(i32::MAX as i64) as i32;

        let number = Number::from_parts(self.n_neg, self.n_mant, exp);
        self.stack.pop();
        self.guard(handler.on_number(number))
    }

    /// Decode a completed `\uXXXX` group, handling surrogate pairs.
    fn finish_codepoint(&mut self) -> Result<()> {
        let code = self.hex_acc;

        match code {
            0xD800..=0xDBFF => {
                if self.high_surrogate.is_some() {
                    return Err(self.fail(Error::Syntax));
                }
                self.high_surrogate = Some(code);
                self.set_state(State::StrSurrogateEscape);
            }
            0xDC00..=0xDFFF => match self.high_surrogate.take() {
                Some(high) => {
                    let code = 0x10000 + (((high - 0xD800) << 10) | (code - 0xDC00));
                    self.push_codepoint(code);
                    self.set_state(State::Str);
                }
                None => return Err(self.fail(Error::Syntax)),
            },
            _ => {
                if self.high_surrogate.is_some() {
                    return Err(self.fail(Error::Syntax));
                }
                self.push_codepoint(code);
                self.set_state(State::Str);
            }
        }
        Ok(())
    }

    fn push_codepoint(&mut self, codepoint: u32) {
        match codepoint {
            0x0000..=0x007F => self.scratch.push(codepoint as u8),
            0x0080..=0x07FF => self.scratch.extend_from_slice(&[
                (((codepoint >> 6) as u8) & 0x1F) | 0xC0,
                ((codepoint as u8) & 0x3F) | 0x80,
            ]),
            0x0800..=0xFFFF => self.scratch.extend_from_slice(&[
                (((codepoint >> 12) as u8) & 0x0F) | 0xE0,
                (((codepoint >> 6) as u8) & 0x3F) | 0x80,
                ((codepoint as u8) & 0x3F) | 0x80,
            ]),
            _ => self.scratch.extend_from_slice(&[
                (((codepoint >> 18) as u8) & 0x07) | 0xF0,
                (((codepoint >> 12) as u8) & 0x3F) | 0x80,
                (((codepoint >> 6) as u8) & 0x3F) | 0x80,
                ((codepoint as u8) & 0x3F) | 0x80,
            ]),
        }
    }

    /// Closing quote: the whole buffered text must decode, then the end
    /// event fires and the string state pops.
    fn finish_string<H: Handler>(&mut self, handler: &mut H) -> Result<()> {
        if str::from_utf8(&self.scratch).is_err() {
            return Err(self.fail(Error::Syntax));
        }

        let is_key = self.is_key;
        self.is_key = false;
        self.stack.pop();

        let result = {
            // Validated just above.
            let fragment = unsafe { str::from_utf8_unchecked(&self.scratch) };
            if is_key {
                handler.on_key_end(fragment)
            } else {
                handler.on_string_end(fragment)
            }
        };
        self.scratch.clear();
        self.guard(result)
    }

    /// Buffer boundary inside a string: emit the decodable prefix as a
    /// data fragment and keep any trailing incomplete UTF-8 sequence for
    /// the next buffer.
    fn emit_fragment<H: Handler>(&mut self, handler: &mut H) -> Result<()> {
        if self.scratch.is_empty() {
            return Ok(());
        }

        let valid = match str::from_utf8(&self.scratch) {
            Ok(_) => self.scratch.len(),
            Err(err) if err.error_len().is_none() => err.valid_up_to(),
            Err(_) => return Err(self.fail(Error::Syntax)),
        };

        if valid == 0 {
            return Ok(());
        }

        let result = {
            // Validated just above.
            let fragment = unsafe { str::from_utf8_unchecked(&self.scratch[..valid]) };
            if self.is_key {
                handler.on_key_data(fragment)
            } else {
                handler.on_string_data(fragment)
            }
        };
        self.scratch.drain(..valid);
        self.guard(result)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new()
    }
}
