extern crate json_dom;

use json_dom::{parse, stringify_ref, Error, Serializer, TreeParser};

// A value string split mid-word across two buffers.
#[test]
fn two_chunk_feed() {
    let mut parser = TreeParser::new();
    parser.write_some(br#"{"k":"hel"#).unwrap();
    parser.write_some(br#"loA"}"#).unwrap();
    parser.write_eof().unwrap();
    assert!(parser.is_done());

    let tree = parser.release();
    assert!(tree["k"].is("helloA"));
}

#[test]
fn every_split_point_parses_identically() {
    let source = r#"{"text":"aéb","nums":[0,-1,2.5,1e3],"flag":true,"none":null}"#.as_bytes();
    let expected = parse(std::str::from_utf8(source).unwrap()).unwrap();

    for split in 1..source.len() {
        let mut parser = TreeParser::new();
        parser.write_some(&source[..split]).unwrap();
        parser.write_some(&source[split..]).unwrap();
        parser.write_eof().unwrap();

        assert_eq!(parser.release(), expected, "split at byte {}", split);
    }
}

#[test]
fn byte_at_a_time_feed() {
    let source = br#"{"a":[1,{"b":"c"},null]}"#;

    let mut parser = TreeParser::new();
    for byte in source.iter() {
        parser.write_some(std::slice::from_ref(byte)).unwrap();
    }
    parser.write_eof().unwrap();

    let expected = parse(std::str::from_utf8(source).unwrap()).unwrap();
    assert_eq!(parser.release(), expected);
}

#[test]
fn depth_at_limit_parses() {
    let mut parser = TreeParser::new();
    parser.set_max_depth(32);

    let source = format!("{}1{}", "[".repeat(32), "]".repeat(32));
    parser.write(source.as_bytes()).unwrap();
    parser.write_eof().unwrap();
    assert!(parser.is_done());
}

// The 33rd opening bracket breaks a 32-deep limit.
#[test]
fn depth_past_limit_is_too_deep() {
    let mut parser = TreeParser::new();
    parser.set_max_depth(32);

    let err = parser.write("[".repeat(33).as_bytes()).unwrap_err();
    assert_eq!(err, Error::TooDeep);
}

#[test]
fn mantissa_boundaries() {
    assert!(parse("18446744073709551615").unwrap().is(u64::MAX));
    assert_eq!(parse("18446744073709551616"), Err(Error::MantissaOverflow));
}

#[test]
fn empty_input_is_syntax() {
    let mut parser = TreeParser::new();
    assert_eq!(parser.write_eof(), Err(Error::Syntax));
}

#[test]
fn extra_data_after_document() {
    assert_eq!(parse(r#"{"a":1}{}"#), Err(Error::ExtraData));
}

#[test]
fn write_some_leaves_trailing_bytes() {
    let mut parser = TreeParser::new();
    let consumed = parser.write_some(br#"{"a":1}   {"b":2}"#).unwrap();

    // The first document plus trailing whitespace.
    assert_eq!(consumed, 10);
    assert!(parser.is_done());
    assert!(parser.get()["a"].is(1));
}

#[test]
fn errors_are_sticky() {
    let mut parser = TreeParser::new();
    assert_eq!(parser.write(b"[1,,]"), Err(Error::Syntax));
    assert_eq!(parser.write(b"true"), Err(Error::Syntax));
    assert_eq!(parser.write_eof(), Err(Error::Syntax));
}

#[test]
fn serializer_output_is_identical_for_any_buffer_size() {
    let tree = parse(r#"{"k":"a fairly long string with \"escapes\" and é",
                        "list":[1,2.75,-3,true,null],
                        "nest":{"empty":{},"arr":[]}}"#)
        .unwrap();
    let expected = stringify_ref(&tree);

    for size in [1usize, 2, 3, 7, 64].iter() {
        let mut serializer = Serializer::new(&tree);
        let mut out = Vec::new();
        let mut buf = vec![0u8; *size];

        loop {
            let n = serializer.next(&mut buf);
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }

        assert!(serializer.is_done());
        assert_eq!(String::from_utf8(out).unwrap(), expected, "buffer size {}", size);
    }
}

#[test]
fn serialize_then_reparse_is_identity() {
    let source = r#"{"a":1,"b":[true,null,"x"]}"#;
    let tree = parse(source).unwrap();
    let text = stringify_ref(&tree);

    assert_eq!(text, source);
    assert_eq!(parse(&text).unwrap(), tree);
}
