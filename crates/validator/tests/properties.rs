//! Property tests for the validation loop.

use proptest::prelude::*;
use serde_json::{Map, Value, json};
use treecheck_validator::MapValidator;

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9$ ]{0,8}".prop_map(Value::String),
    ]
}

fn arb_tree() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,3}", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn empty_schema_reports_nothing(data in arb_tree()) {
        let errors = MapValidator::new().validate(&data, &json!([])).unwrap();
        prop_assert!(errors.is_empty());
    }

    #[test]
    fn first_failure_is_kept(data in arb_tree(), field in "[a-z]{1,3}") {
        let schema = json!([
            {"field": field, "rule": "alwaysInvalid", "message": "first"},
            {"field": field, "rule": "alwaysInvalid", "message": "second"},
            {"field": field, "rule": [], "message": "third"},
        ]);
        let errors = MapValidator::new().validate(&data, &schema).unwrap();
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(errors.get(&field), Some("first"));
    }

    #[test]
    fn wildcard_reaches_every_branch(names in prop::collection::btree_map("[a-z]{1,4}", "[a-z]{1,6}", 0..8)) {
        let branches: Map<String, Value> = names
            .iter()
            .map(|(lang, name)| (lang.clone(), json!({"name": name, "note": "x"})))
            .collect();
        let data = json!({"lang": branches});
        let schema = json!([{"field": ["lang", "*", "name"], "rule": "alwaysInvalid", "message": "m"}]);

        let errors = MapValidator::new().validate(&data, &schema).unwrap();
        let expected: Vec<String> = names.keys().map(|lang| format!("lang.{lang}.name")).collect();
        prop_assert_eq!(errors.keys().map(str::to_owned).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn passing_rules_record_nothing(data in arb_tree(), field in "[a-z]{1,3}") {
        let schema = json!([
            {"field": field, "rule": "alwaysValid", "message": "m"},
            {"field": [field, "*"], "rule": ["nullable", "alwaysValid"], "message": "m"},
        ]);
        let errors = MapValidator::new().validate(&data, &schema).unwrap();
        prop_assert!(errors.is_empty());
    }

    #[test]
    fn too_deep_wildcard_matches_nothing(names in prop::collection::btree_map("[a-z]{1,4}", "[a-z]{1,6}", 0..8)) {
        let data = json!({"lang": names});
        let schema = json!([{"field": ["lang", "*", "name"], "rule": "alwaysInvalid", "message": "m"}]);
        let errors = MapValidator::new().validate(&data, &schema).unwrap();
        prop_assert!(errors.is_empty());
    }
}
