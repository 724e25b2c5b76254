use rdietlogger::models::item_id::{RawItemId, normalize_ids};
use serde_json::json;

#[test]
fn every_representation_of_42_is_the_same_id() {
    let values = [json!(42), json!(42.0), json!("42")];

    for v in &values {
        let raw = RawItemId::from_json(v).expect("scalar id");
        assert_eq!(raw.normalize(), Some(42), "value {v}");
    }
}

#[test]
fn untagged_deserialization_picks_the_matching_variant() {
    let ids: Vec<RawItemId> = serde_json::from_str(r#"[7, -3, 2.5, " 9 "]"#).expect("json");

    assert_eq!(ids[0], RawItemId::Unsigned(7));
    assert_eq!(ids[1], RawItemId::Signed(-3));
    assert_eq!(ids[2], RawItemId::Float(2.5));
    assert_eq!(ids[3], RawItemId::Text(" 9 ".to_string()));
}

#[test]
fn invalid_ids_are_dropped_not_fatal() {
    let raw = vec![
        RawItemId::Signed(-1),
        RawItemId::Float(1.5),
        RawItemId::Float(f64::NAN),
        RawItemId::Float(f64::INFINITY),
        // 2^64 would saturate to u64::MAX
        RawItemId::Float(2f64.powi(64)),
        RawItemId::Text("abc".into()),
        RawItemId::Text("-4".into()),
        RawItemId::Unsigned(3),
        RawItemId::Float(3.0),
    ];

    let ids = normalize_ids(&raw);
    assert_eq!(ids.len(), 1);
    assert!(ids.contains(&3));
}

#[test]
fn entries_are_read_by_id_key() {
    let row = json!({"id": "12", "name": "Sunflower", "total_quantity": 1});
    let obj = row.as_object().expect("object");
    assert_eq!(
        RawItemId::from_entry(obj).and_then(|r| r.normalize()),
        Some(12)
    );

    let no_id = json!({"name": "Sunflower"});
    assert!(RawItemId::from_entry(no_id.as_object().expect("object")).is_none());

    assert!(RawItemId::from_json(&json!(null)).is_none());
    assert!(RawItemId::from_json(&json!(true)).is_none());
}
