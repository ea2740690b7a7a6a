//! Snapshot tests for Python-style `repr` output.
//!
//! Review changes: `cargo insta review`

use pycoll::prelude::*;
use pycoll::tuple;

#[derive(Clone, NamedTuple)]
struct Color {
    name: String,
    hex: String,
}

#[test]
fn sequences() {
    insta::assert_snapshot!(List::from(vec![1, 2, 3]).repr(), @"[1, 2, 3]");
    insta::assert_snapshot!(List::<i32>::new().repr(), @"[]");
    insta::assert_snapshot!(tuple![1].repr(), @"(1,)");
    insta::assert_snapshot!(tuple![1, "a", 2.5, true].repr(), @"(1, 'a', 2.5, True)");
    insta::assert_snapshot!(Deque::from(vec!["x", "y"]).repr(), @"deque(['x', 'y'])");
    insta::assert_snapshot!(ByteArray::from(b"a'b".to_vec()).repr(), @r#"bytearray(b"a'b")"#);
}

#[test]
fn mappings() {
    let d = Dict::from([("a", 1), ("b", 2)]);
    insta::assert_snapshot!(d.repr(), @"{'a': 1, 'b': 2}");

    let c: Counter<char> = "hello".chars().collect();
    insta::assert_snapshot!(c.repr(), @"Counter({'l': 2, 'h': 1, 'e': 1, 'o': 1})");

    let cm = ChainMap::from_maps(vec![Dict::from([("k", 1)]), Dict::from([("k", 0)])]);
    insta::assert_snapshot!(cm.repr(), @"ChainMap({'k': 1}, {'k': 0})");
}

#[test]
fn sets() {
    insta::assert_snapshot!(Set::<i32>::new().repr(), @"set()");
    insta::assert_snapshot!(FrozenSet::from([7]).repr(), @"frozenset({7})");
}

#[test]
fn scalars_and_values() {
    let v = Value::List(vec![
        Value::None,
        Value::Float(1.0),
        Value::Float(f64::NAN),
        Value::from("it's"),
        Value::Bytes(vec![0, b'A']),
    ]);
    insta::assert_snapshot!(v.repr(), @r#"[None, 1.0, nan, "it's", b'\x00A']"#);
}

#[test]
fn named_tuples() {
    let c = Color {
        name: "teal".to_string(),
        hex: "#008080".to_string(),
    };
    insta::assert_snapshot!(c.repr(), @"Color(name='teal', hex='#008080')");

    let ty = NamedTupleType::new("Pair", &["left", "right"]).unwrap();
    let rec = ty.make(vec![Value::Int(1), Value::None]).unwrap();
    insta::assert_snapshot!(rec.repr(), @"Pair(left=1, right=None)");
}

#[test]
fn repr_config() {
    let l = List::from(vec!["a", "b", "c", "d"]);
    let cfg = ReprConfig::new().with_quote_style(QuoteStyle::Double).with_max_items(2);
    insta::assert_snapshot!(l.repr_with(&cfg), @r#"["a", "b", ...]"#);

    let f = List::from(vec![1.0, 2.5]);
    let cfg = ReprConfig::new().with_float_precision(2);
    insta::assert_snapshot!(f.repr_with(&cfg), @"[1.00, 2.50]");
}
