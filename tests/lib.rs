#[macro_use(array, object)]
extern crate json_dom;

use json_dom::{parse, stringify, stringify_ref, Error, JsonValue, Kind};

#[test]
fn stringify_null() {
    assert_eq!(stringify(JsonValue::new()), "null");
}

#[test]
fn stringify_option_none() {
    let foo: Option<String> = None;
    assert_eq!(stringify(foo), "null");
}

#[test]
fn stringify_option_integer() {
    let foo = Some(100);
    assert_eq!(stringify(foo), "100");
}

#[test]
fn stringify_str_slice() {
    assert_eq!(stringify("Foo"), "\"Foo\"");
}

#[test]
fn stringify_string() {
    assert_eq!(stringify("Foo".to_string()), "\"Foo\"");
}

#[test]
fn stringify_number() {
    assert_eq!(stringify(3.14), "3.14");
}

#[test]
fn stringify_integer() {
    assert_eq!(stringify(42), "42");
}

#[test]
fn stringify_true() {
    assert_eq!(stringify(true), "true");
}

#[test]
fn stringify_false() {
    assert_eq!(stringify(false), "false");
}

#[test]
fn stringify_array() {
    assert_eq!(stringify(array![10, false, JsonValue::new()]), "[10,false,null]");
}

#[test]
fn stringify_vec() {
    let data = vec![1, 2, 3];
    assert_eq!(stringify(data), "[1,2,3]");
}

#[test]
fn stringify_object() {
    let object = object!{
        "name" => "Maciej",
        "age" => 30
    };

    assert_eq!(stringify(object), "{\"name\":\"Maciej\",\"age\":30}");
}

#[test]
fn parse_true() {
    assert!(parse("true").unwrap().is(true));
}

#[test]
fn parse_false() {
    assert!(parse("false").unwrap().is(false));
}

#[test]
fn parse_null() {
    assert!(parse("null").unwrap().is_null());
}

#[test]
fn parse_number() {
    assert!(parse("12345").unwrap().is(12345));
}

#[test]
fn parse_float() {
    assert!(parse("18.2").unwrap().is(18.2));
}

#[test]
fn parse_string() {
    assert!(parse(r#""text""#).unwrap().is("text"));
}

#[test]
fn parse_array() {
    let value = parse(r#"[10, "foo", true, null]"#).unwrap();

    assert_eq!(value.kind(), Kind::Array);
    assert!(value[0].is(10));
    assert!(value[1].is("foo"));
    assert!(value[2].is(true));
    assert!(value[3].is_null());
}

#[test]
fn parse_object() {
    let value = parse(r#"

    {
        "foo": "bar",
        "num": 36
    }

    "#).unwrap();

    assert_eq!(value.kind(), Kind::Object);
    assert!(value["foo"].is("bar"));
    assert!(value["num"].is(36));
}

#[test]
fn parse_nested() {
    let value = parse(r#"{"a":{"b":[{"c":null}]}}"#).unwrap();
    assert!(value["a"]["b"][0]["c"].is_null());
}

#[test]
fn parse_error_is_syntax() {
    assert_eq!(parse("10 20"), Err(Error::ExtraData));
    assert_eq!(parse("[1"), Err(Error::Syntax));
    assert_eq!(parse(""), Err(Error::Syntax));
    assert_eq!(parse("nul"), Err(Error::Syntax));
}

// A small mixed document survives a byte-exact round trip.
#[test]
fn exact_round_trip() {
    let source = r#"{"a":1,"b":[true,null,"x"]}"#;
    let tree = parse(source).unwrap();

    assert_eq!(tree["a"].kind(), Kind::Number);
    assert_eq!(tree["b"].kind(), Kind::Array);
    assert_eq!(tree["b"].len(), 3);
    assert_eq!(stringify_ref(&tree), source);
}

// -0.0 parses as a number and renders the same way every time.
#[test]
fn negative_zero_is_stable() {
    let value = parse("-0.0").unwrap();
    assert_eq!(value.kind(), Kind::Number);

    let first = stringify_ref(&value);
    assert_eq!(first, "-0.0");
    assert_eq!(stringify_ref(&parse(&first).unwrap()), first);
}

#[test]
fn unicode_escapes() {
    assert!(parse(r#""\u0041""#).unwrap().is("A"));
    assert!(parse(r#""\u00e9""#).unwrap().is("\u{e9}"));
    // A surrogate pair combining into one scalar.
    assert!(parse(r#""\ud83d\udd25""#).unwrap().is("\u{1f525}"));
}

#[test]
fn deep_value_access() {
    let mut value = JsonValue::new();
    value["settings"]["theme"] = JsonValue::from("dark");

    assert!(value.is_object());
    assert!(value["settings"]["theme"].is("dark"));
}

#[test]
fn value_push_and_insert() {
    let mut value = JsonValue::new_array();
    value.push(10).unwrap();
    value.push("foo").unwrap();
    value.push(false).unwrap();

    assert_eq!(stringify_ref(&value), "[10,\"foo\",false]");
    assert_eq!(JsonValue::new().push(1), Err(Error::ExpectedArray));
}

#[test]
fn display_matches_stringify() {
    let value = parse(r#"{"x":[1,2]}"#).unwrap();
    assert_eq!(value.to_string(), stringify_ref(&value));
}

#[test]
fn error_surface() {
    let err = parse("[").unwrap_err();
    assert_eq!(err.code(), 1);
    assert_eq!(err.condition(), json_dom::Condition::ParseError);
    assert_eq!(err.to_string(), "syntax error");
}

#[test]
fn entries_iterate_in_insertion_order() {
    let value = parse(r#"{"z":1,"a":2,"m":3}"#).unwrap();
    let keys: Vec<&str> = value.entries().map(|(key, _)| key).collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn members_iterate_arrays() {
    let value = parse("[1,2,3]").unwrap();
    let sum: i64 = value.members().map(|v| v.get_i64().unwrap()).sum();
    assert_eq!(sum, 6);
}
