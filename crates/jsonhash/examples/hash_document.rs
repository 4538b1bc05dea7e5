use jsonhash::{ApplyConfig, Hasher, JsonValue};

fn main() {
    let text = r#"{
        "name": "Set width of UE to 1111",
        "filter": {
            "columnFilters": [
                {"type": "string", "column": "articleType", "operator": "startsWith", "search": "UE"}
            ],
            "operator": "and"
        },
        "actions": [{"column": "w", "setValue": 1111}]
    }"#;

    let json: JsonValue = serde_json::from_str(text).expect("valid JSON");
    let hasher = Hasher::default();

    match hasher.apply(&json, &ApplyConfig::default()) {
        Ok(hashed) => {
            println!("{}", serde_json::to_string_pretty(&hashed).expect("serializable"));
        }
        Err(err) => {
            eprintln!("hashing failed: {}", err);
            std::process::exit(1);
        }
    }
}
