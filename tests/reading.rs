use rstest::rstest;

use jsonfrag::{Document, Error};

const NAMES: &str = r#"{
    "Name": "The Doctor",
    "Age": 1200,
    "Planet of Origin": "Gallifrey",
    "Fugitive": true
}"#;

const ALIASES: &str = r#"{"Aliases":["John Smith","Theta Sigma"]}"#;

const QUIZ: &str = r#"{
    "quiz": {
        "sport": {
            "q1": {
                "question": "Which one is a correct team name in the NBA?",
                "options": ["New York Bulls", "Los Angeles Kings", "Houston Rockets"],
                "answer": "Houston Rockets"
            }
        },
        "maths": {
            "q1": {
                "question": "5 + 7 = ?",
                "options": [10, 11, 12, 13],
                "answer": "12"
            }
        }
    }
}"#;

#[rstest]
fn scalar_roots_coerce_to_their_types() {
    let doc = Document::parse(NAMES).unwrap();
    assert_eq!(doc.get("Name").to::<String>(), "The Doctor");
    assert_eq!(doc.get("Age").to::<i64>(), 1200);
    assert_eq!(doc.get("Planet of Origin").to::<String>(), "Gallifrey");
    assert!(doc.get("Fugitive").to::<bool>());
}

#[rstest]
fn array_roots_index_by_position() {
    let doc = Document::parse(ALIASES).unwrap();
    let aliases = doc.get("Aliases");
    assert!(aliases.valid());
    assert!(aliases.is_array());

    assert_eq!(aliases.at(0).unwrap().to::<String>(), "John Smith");
    assert_eq!(aliases.at(1).unwrap().to::<String>(), "Theta Sigma");
    assert!(!aliases.at(2).unwrap().valid());
}

#[rstest]
fn deep_chained_access() {
    let doc = Document::parse(QUIZ).unwrap();
    let third_option = doc
        .get("quiz")
        .get("maths")
        .unwrap()
        .get("q1")
        .unwrap()
        .get("options")
        .unwrap()
        .at(2)
        .unwrap();
    assert!(third_option.valid());
    assert_eq!(third_option.to::<i64>(), 12);
}

#[rstest]
fn positional_and_key_access_agree() {
    let doc = Document::parse(QUIZ).unwrap();

    let by_key = doc
        .get("quiz")
        .get("sport")
        .unwrap()
        .get("q1")
        .unwrap()
        .get("question")
        .unwrap();
    let mixed = doc
        .at(0)
        .get("sport")
        .unwrap()
        .get("q1")
        .unwrap()
        .get("question")
        .unwrap();

    assert!(by_key.valid());
    assert!(mixed.valid());
    assert_eq!(by_key.to::<String>(), mixed.to::<String>());
    assert_eq!(by_key, mixed);
}

#[rstest]
fn repeated_indexing_is_idempotent() {
    let doc = Document::parse(ALIASES).unwrap();
    let first = doc.get("Aliases").at(0).unwrap();
    let second = doc.get("Aliases").at(0).unwrap();
    assert_eq!(first.to::<String>(), second.to::<String>());
    assert_eq!(first, second);
}

#[rstest]
fn empty_array_is_valid_but_has_no_children() {
    let doc = Document::parse(r#"{"a":[]}"#).unwrap();
    let array = doc.get("a");
    assert!(array.valid());
    assert!(!array.is_array());
    assert!(!array.at(0).unwrap().valid());
}

#[rstest]
fn invalid_markers_propagate_through_chains() {
    let doc = Document::parse(NAMES).unwrap();
    let missing = doc.get("Nowhere");
    assert!(!missing.valid());
    assert!(!missing.at(0).unwrap().valid());
    assert!(!missing.get("anything").unwrap().valid());
    assert!(!missing.get("anything").unwrap().at(3).unwrap().valid());
}

#[rstest]
fn unterminated_array_fails_construction() {
    assert!(matches!(
        Document::parse(r#"{"a":[1,2"#),
        Err(Error::Malformed(_))
    ));
}

#[rstest]
fn arrays_of_objects_support_key_and_position() {
    let doc = Document::parse(
        r#"{"users":[
            {"userId":"1","firstName":"Krish","lastName":"Lee"},
            {"userId":"2","firstName":"Racks","lastName":"Jacson"}
        ]}"#,
    )
    .unwrap();
    let users = doc.get("users");

    let first = users.at(0).unwrap();
    assert_eq!(first.get("firstName").unwrap().to::<String>(), "Krish");

    let second = users.at(1).unwrap();
    assert_eq!(second.get("lastName").unwrap().to::<String>(), "Jacson");

    // Positional pair access inside a dereferenced element.
    let pair = second.at(0).unwrap();
    assert_eq!(pair.key(), Some("userId"));
    assert_eq!(pair.to::<String>(), "2");

    assert!(!users.at(2).unwrap().valid());
    assert!(!first.get("userId").unwrap().at(0).unwrap().valid());
}

#[rstest]
fn single_element_arrays() {
    let doc = Document::parse(r#"{"a":[1],"b":[{"c":7}]}"#).unwrap();

    let scalar = doc.get("a").at(0).unwrap();
    assert_eq!(scalar.to::<i64>(), 1);
    assert!(!doc.get("a").at(1).unwrap().valid());

    let object = doc.get("b").at(0).unwrap();
    assert!(object.valid());
    assert_eq!(object.get("c").unwrap().to::<i64>(), 7);
}

#[rstest]
fn key_lookup_does_not_reach_into_nested_arrays() {
    let doc = Document::parse(r#"{"outer":{"list":[{"hidden":1}]}}"#).unwrap();
    let outer = doc.get("outer");
    assert!(outer.get("list").unwrap().valid());
    assert!(!outer.get("hidden").unwrap().valid());
}

#[rstest]
fn equality_tracks_validity_and_content() {
    let doc = Document::parse(NAMES).unwrap();
    let other = Document::parse(NAMES).unwrap();

    assert_eq!(doc.get("Name"), other.get("Name"));
    assert_ne!(doc.get("Name"), other.get("Age"));

    // All invalid fragments are equally invalid; a valid one never matches.
    assert_eq!(doc.get("missing"), other.get("also missing"));
    assert_ne!(doc.get("Name"), other.get("missing"));
}
