use jsonhash::{
    encoder::json_string, ApplyConfig, HashAlgorithm, HashConfig, Hasher, JsonObject, JsonValue,
};
use serde_json::json;

fn value(json: serde_json::Value) -> JsonValue {
    JsonValue::try_from(json).unwrap()
}

fn object(json: serde_json::Value) -> JsonObject {
    value(json).as_object().unwrap().clone()
}

fn hash_of(json: serde_json::Value) -> String {
    let hashed = Hasher::default()
        .apply(&value(json), &ApplyConfig::default())
        .unwrap();
    hashed.hash().unwrap().to_string()
}

#[test]
fn string_digest_matches_reference() {
    let hasher = Hasher::default();
    assert_eq!(
        hasher.calc_hash_str(r#"{"key":"value"}"#),
        "5Dq88zdSRIOcAS-WM_lYYt"
    );
}

#[test]
fn raw_sha256_digest_matches_test_vector() {
    assert_eq!(
        hex::encode(HashAlgorithm::Sha256.digest(b"abc")),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn single_field_objects() {
    assert_eq!(hash_of(json!({"key": "value"})), "5Dq88zdSRIOcAS-WM_lYYt");
    assert_eq!(hash_of(json!({"key": 1})), "t4HVsGBJblqznOBwy6IeLt");
    assert_eq!(hash_of(json!({"key": 1.0})), "t4HVsGBJblqznOBwy6IeLt");
    assert_eq!(hash_of(json!({"key": true})), "dNkCrIe79x2dPyf5fywwYO");
    assert_eq!(hash_of(json!({"key": null})), "BZwS6bAVtKxSW0AW5y8ANk");
    assert_eq!(hash_of(json!({"key": 1.001})), "pNvZsN9V0G-im49qKrb2fo");
    assert_eq!(hash_of(json!({})), "RBNvo1WzZ4oRRq0W9-hknp");
}

#[test]
fn arrays_keep_null_elements() {
    let hasher = Hasher::default();
    assert_eq!(
        hash_of(json!({"key": [1, 2, null, 3]})),
        hasher.calc_hash_str(r#"{"key":[1,2,null,3]}"#)
    );
    assert_eq!(
        hash_of(json!({"key": [1, 2, null, 3]})),
        "TJBZ_lVlkDw6WlF8esM0I5"
    );
}

#[test]
fn arrays_of_primitives_objects_and_arrays() {
    assert_eq!(
        hash_of(json!({"key": ["value", 1.0, true]})),
        "nbNb1YfpgqnPfyFTyCQ5YF"
    );
    assert_eq!(
        hash_of(json!({
            "array": ["key", 1.0, true, {"key1": "value1"}, {"key0": "value0"}]
        })),
        "13h_Z0wZCF4SQsTyMyq5dV"
    );
    assert_eq!(
        hash_of(json!({"array": [{"key": "value"}]})),
        "zYcZBAUGLgR0ygMxi0V5ZT"
    );
    assert_eq!(
        hash_of(json!({"array": [["key", 1.0, true], "hello"]})),
        "1X_6COC1sP5ECuHvKtVoDT"
    );
}

#[test]
fn nested_objects_use_child_hashes() {
    let hashed = Hasher::default()
        .apply(
            &value(json!({"key": "value", "child": {"key": "value"}})),
            &ApplyConfig::default(),
        )
        .unwrap();
    assert_eq!(
        hashed.get("child").unwrap().hash(),
        Some("5Dq88zdSRIOcAS-WM_lYYt")
    );
    assert_eq!(
        hashed.hash(),
        Some(
            Hasher::default()
                .calc_hash_str(r#"{"child":"5Dq88zdSRIOcAS-WM_lYYt","key":"value"}"#)
                .as_str()
        )
    );
    assert_eq!(hashed.hash(), Some("eCtLaaM-rNYbRt2E8GrcPf"));
}

#[test]
fn two_levels_of_nesting() {
    let hashed = Hasher::default()
        .apply(
            &value(json!({
                "_hash": "",
                "key": "value",
                "child": {
                    "_hash": "",
                    "key": "value",
                    "grandChild": {"_hash": "", "key": "value"}
                }
            })),
            &ApplyConfig::default(),
        )
        .unwrap();
    let child = hashed.get("child").unwrap();
    assert_eq!(
        child.get("grandChild").unwrap().hash(),
        Some("5Dq88zdSRIOcAS-WM_lYYt")
    );
    assert_eq!(child.hash(), Some("zeHiSP-g7VulWhK0JpJG1V"));
    assert_eq!(hashed.hash(), Some("vz-ZEDRa70tmg4W_PsCDNz"));
}

#[test]
fn numeric_string_keys_sort_lexicographically() {
    let mut json = value(json!({
        "1270537611": "mxK7Q1zeVB1httPrYsn0ow",
        "522965": "PAue6PJ83JBmIqoElcDmot",
        "_hash": ""
    }));
    Hasher::default().apply_in_place(&mut json, true, false).unwrap();
    assert_eq!(json.hash(), Some("W4CAuZT_tIicr6crbn6LA8"));
}

#[test]
fn quotes_in_strings_are_escaped() {
    let map = object(json!({"key": "say \"hi\""}));
    assert_eq!(json_string(&map), r#"{"key":"say \"hi\""}"#);
    assert_eq!(hash_of(json!({"key": "say \"hi\""})), "7-QOByTWOQFsiaKnUBF8EP");
}

#[test]
fn layered_document_matches_reference_output() {
    let json: JsonValue = serde_json::from_str(include_str!("fixtures/layers.json")).unwrap();
    let hashed = Hasher::default()
        .apply(&json, &ApplyConfig::default())
        .unwrap();
    assert_eq!(
        serde_json::to_string_pretty(&hashed).unwrap(),
        include_str!("fixtures/layers_hashed.json")
    );
}

#[test]
fn hash_length_and_algorithm_are_configurable() {
    let config = HashConfig {
        hash_length: 30,
        hash_algorithm: HashAlgorithm::Sha512,
        ..HashConfig::default()
    };
    let hasher = Hasher::new(config);
    let hashed = hasher
        .apply(&value(json!({"key": "value"})), &ApplyConfig::default())
        .unwrap();
    assert_eq!(hashed.hash(), Some("AhP4mGArakid4l8g2NMsPb89b-4Pvk"));
    hasher.validate(&hashed).unwrap();
}

#[test]
fn shortcuts_use_default_configuration() {
    let mut x = value(json!({"a": {"b": 1}}));
    let copy = jsonhash::hashed(&x).unwrap();
    assert_eq!(x, value(json!({"a": {"b": 1}})));
    assert_eq!(copy.hash(), Some("aGyCrR_fCrzMa6oP_6N50z"));
    assert_eq!(copy.get("a").unwrap().hash(), Some("647TzLUCMJO1b0kKRlAeiN"));

    jsonhash::hash_in_place(&mut x).unwrap();
    assert_eq!(x, copy);
}
