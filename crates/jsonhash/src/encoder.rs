//! Canonical string encoding used as the digest pre-image.
//!
//! Keys are sorted, no whitespace is emitted, and strings only get their
//! double quotes escaped. The output is hashed as an opaque string; it is not
//! guaranteed to be valid JSON for strings containing control characters or
//! backslashes.

use crate::value::{JsonObject, JsonValue};

/// Encodes an object map with its keys sorted.
pub fn json_string(map: &JsonObject) -> String {
    let mut out = String::new();
    write_object(map, &mut out);
    out
}

/// Encodes a single value.
pub fn encode_value(value: &JsonValue) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

/// Formats a number the way ECMAScript's `Number.prototype.toString` does.
///
/// Integral values carry no fractional part, `-0` prints as `0`, and
/// magnitudes outside `[1e-6, 1e21)` use exponent notation.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

fn write_object(map: &JsonObject, out: &mut String) {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();

    out.push('{');
    for (i, key) in keys.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('"');
        out.push_str(key);
        out.push_str("\":");
        write_value(&map[key.as_str()], out);
    }
    out.push('}');
}

fn write_value(value: &JsonValue, out: &mut String) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        JsonValue::Number(n) => out.push_str(&format_number(*n)),
        JsonValue::String(s) => {
            out.push('"');
            out.push_str(&s.replace('"', "\\\""));
            out.push('"');
        }
        JsonValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out);
            }
            out.push(']');
        }
        JsonValue::Object(map) => write_object(map, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: serde_json::Value) -> JsonObject {
        match JsonValue::try_from(value).unwrap() {
            JsonValue::Object(map) => map,
            other => panic!("expected object, got {}", other.kind()),
        }
    }

    #[test]
    fn encodes_primitives() {
        assert_eq!(json_string(&object(json!({"a": 1}))), r#"{"a":1}"#);
        assert_eq!(json_string(&object(json!({"a": "b"}))), r#"{"a":"b"}"#);
        assert_eq!(json_string(&object(json!({"a": true}))), r#"{"a":true}"#);
        assert_eq!(json_string(&object(json!({"a": false}))), r#"{"a":false}"#);
        assert_eq!(json_string(&object(json!({"a": 1.0}))), r#"{"a":1}"#);
        assert_eq!(json_string(&object(json!({"a": null}))), r#"{"a":null}"#);
    }

    #[test]
    fn encodes_nested_values() {
        assert_eq!(json_string(&object(json!({"a": [1, 2]}))), r#"{"a":[1,2]}"#);
        assert_eq!(
            json_string(&object(json!({"a": {"b": 1}}))),
            r#"{"a":{"b":1}}"#
        );
        assert_eq!(
            encode_value(&JsonValue::try_from(json!([1, 2, null, 3])).unwrap()),
            "[1,2,null,3]"
        );
    }

    #[test]
    fn sorts_keys() {
        let map = object(json!({"c": true, "a": "value", "b": 1.0}));
        assert_eq!(json_string(&map), r#"{"a":"value","b":1,"c":true}"#);
    }

    #[test]
    fn escapes_only_double_quotes() {
        let map = object(json!({"a": "say \"hi\"\n\\"}));
        assert_eq!(json_string(&map), "{\"a\":\"say \\\"hi\\\"\n\\\"}");
    }

    #[test]
    fn formats_numbers_like_ecmascript() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.001), "1.001");
        assert_eq!(format_number(0.00001), "0.00001");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(9839089403.1235), "9839089403.1235");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }
}
