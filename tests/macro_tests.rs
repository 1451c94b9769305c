use record_json::{
    from_str, json, json_enum, record, to_string, Category, Error, JsonMap, Number, Record,
    Reflect, Value, View,
};

#[test]
fn test_json_macro_booleans() {
    let true_val = json!(true);
    assert_eq!(true_val, Value::Bool(true));

    let false_val = json!(false);
    assert_eq!(false_val, Value::Bool(false));
}

#[test]
fn test_json_macro_numbers() {
    let int_val = json!(42);
    assert_eq!(int_val, Value::Number(Number::Unsigned(42)));

    let float_val = json!(3.5);
    assert_eq!(float_val, Value::Number(Number::Float(3.5)));

    let negative_val = json!(-123);
    assert_eq!(negative_val, Value::Number(Number::Signed(-123)));
}

#[test]
fn test_json_macro_strings() {
    let string_val = json!("hello world");
    assert_eq!(string_val, Value::String("hello world".to_string()));

    let empty_string = json!("");
    assert_eq!(empty_string, Value::String(String::new()));
}

#[test]
fn test_json_macro_arrays() {
    let empty_array = json!([]);
    assert_eq!(empty_array, Value::Array(vec![]));

    let mixed_array = json!([1, "hello", true, (-2), 0.5]);
    assert_eq!(
        mixed_array,
        Value::Array(vec![
            Value::Number(Number::Unsigned(1)),
            Value::String("hello".to_string()),
            Value::Bool(true),
            Value::Number(Number::Signed(-2)),
            Value::Number(Number::Float(0.5)),
        ])
    );
}

#[test]
fn test_json_macro_nested() {
    let nested = json!({
        "user": {
            "id": 123,
            "name": "Bob",
            "active": true
        },
        "tags": ["admin", "developer"],
        "count": 42
    });

    match nested {
        Value::Object(ref obj) => {
            assert_eq!(obj.len(), 3);
            assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["user", "tags", "count"]);

            if let Some(Value::Object(user)) = obj.get("user") {
                assert_eq!(user.get("id"), Some(&Value::Number(Number::Unsigned(123))));
                assert_eq!(user.get("name"), Some(&Value::String("Bob".to_string())));
                assert_eq!(user.get("active"), Some(&Value::Bool(true)));
            } else {
                panic!("Expected user to be an object");
            }

            if let Some(Value::Array(tags)) = obj.get("tags") {
                assert_eq!(tags.len(), 2);
                assert_eq!(tags[1], Value::String("developer".to_string()));
            } else {
                panic!("Expected tags to be an array");
            }
        }
        _ => panic!("Expected object"),
    }
}

#[test]
fn test_json_macro_empty_object() {
    assert_eq!(json!({}), Value::Object(JsonMap::new()));
    assert!(!json!({}).is_valid());
}

#[test]
fn test_value_methods() {
    let bool_val = json!(true);
    assert_eq!(bool_val.as_bool(), Some(true));
    assert_eq!(bool_val.as_str(), None);

    let str_val = json!("hello");
    assert_eq!(str_val.as_str(), Some("hello"));

    let array_val = json!([1, 2, 3]);
    assert!(array_val.is_array());
    assert_eq!(array_val.as_array().map(Vec::len), Some(3));

    let obj_val = json!({ "key": "value" });
    assert!(obj_val.is_object());
    assert_eq!(obj_val["key"].as_str(), Some("value"));
    assert_eq!(obj_val["missing"], Value::Empty);
}

#[derive(Default, Debug, PartialEq)]
struct Inventory {
    owner: String,
    slots: Vec<u16>,
    weight: f32,
}

record!(Inventory {
    owner,
    slots,
    weight,
});

#[test]
fn test_record_macro_field_list() {
    assert_eq!(Inventory::field_names(), &["owner", "slots", "weight"]);
    assert_eq!(Inventory::field_count(), 3);
    assert_eq!(Inventory::default().category(), Category::Record);
}

#[test]
fn test_record_macro_view() {
    let inventory = Inventory {
        owner: "ana".to_string(),
        slots: vec![4, 5],
        weight: 1.5,
    };

    match inventory.view() {
        View::Record { names, fields } => {
            assert_eq!(names.len(), fields.len());
            let categories: Vec<_> = fields.iter().map(|f| f.category()).collect();
            assert_eq!(
                categories,
                vec![Category::Text, Category::Sequence, Category::Primitive]
            );
        }
        _ => panic!("Expected record view"),
    }
}

#[test]
fn test_record_field_order_drives_output() {
    #[derive(Default)]
    struct Reversed {
        first: u8,
        second: u8,
    }

    // listed order, not declaration order, is what gets written
    record!(Reversed { second, first });

    let text = to_string(&Reversed {
        first: 1,
        second: 2,
    })
    .unwrap();
    assert_eq!(text, "{\n\t\"second\": 2,\n\t\"first\": 1,\n}");
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(u8)]
enum Level {
    #[default]
    Low = 1,
    High = 200,
}

json_enum!(Level as u8 { Low, High });

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(i64)]
enum Offset {
    #[default]
    Zero = 0,
    Back = -5_000_000_000,
}

json_enum!(Offset as i64 { Zero, Back });

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(u64)]
enum Mask {
    #[default]
    Clear = 0,
    All = u64::MAX,
}

json_enum!(Mask as u64 { Clear, All });

#[test]
fn test_json_enum_primitive() {
    assert_eq!(Level::High.category(), Category::Primitive);
    assert_eq!(to_string(&Level::High).unwrap(), "200");
    assert_eq!(from_str::<Level>("1").unwrap(), Level::Low);
    assert_eq!(to_string(&Offset::Back).unwrap(), "-5000000000");
    assert_eq!(from_str::<Offset>("-5000000000").unwrap(), Offset::Back);
}

#[test]
fn test_json_enum_rejects_unknown() {
    assert_eq!(
        from_str::<Level>("7").unwrap_err(),
        Error::unknown_variant("Level", 7)
    );
    assert!(matches!(
        from_str::<Level>("-1").unwrap_err(),
        Error::TypeMismatch { .. }
    ));
}

#[test]
fn test_json_enum_wide_unsigned_discriminant() {
    assert_eq!(to_string(&Mask::All).unwrap(), "18446744073709551615");
    assert_eq!(from_str::<Mask>("18446744073709551615").unwrap(), Mask::All);

    let err = from_str::<Mask>("18446744073709551614").unwrap_err();
    assert_eq!(err, Error::unknown_variant("Mask", u64::MAX - 1));
    assert_eq!(
        err.to_string(),
        "18446744073709551614 is not a discriminant of Mask"
    );
}
