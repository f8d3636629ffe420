use roster_domain::activity::{Activity, Catalog};

const SEED: &str = r#"{
  "Chess Club": {
    "description": "Learn strategies and compete in chess tournaments",
    "schedule": "Fridays, 3:30 PM - 5:00 PM",
    "max_participants": 12,
    "participants": ["michael@mergington.edu", "daniel@mergington.edu"]
  },
  "Art Studio": {
    "description": "Express creativity through painting and drawing",
    "schedule": "Thursdays, 3:30 PM - 5:00 PM",
    "max_participants": 18
  }
}"#;

#[test]
fn deserialize_preserves_document_order() {
    let catalog: Catalog = serde_json::from_str(SEED).unwrap();

    assert_eq!(catalog.names().collect::<Vec<_>>(), ["Chess Club", "Art Studio"]);
    let chess = catalog.get("Chess Club").unwrap();
    assert_eq!(chess.max_participants, 12);
    assert_eq!(chess.participants.len(), 2);
    assert!(catalog.get("Art Studio").unwrap().participants.is_empty());
}

#[test]
fn serialize_emits_object_in_catalog_order() {
    let catalog = Catalog::new()
        .with("Swimming Club", Activity::new("Swim", "Tue", 15).with_participants(["james@x"]))
        .with("Art Studio", Activity::new("Art", "Thu", 18));

    let text = serde_json::to_string(&catalog).unwrap();
    let swim = text.find("Swimming Club").unwrap();
    let art = text.find("Art Studio").unwrap();
    assert!(swim < art);
    assert!(text.starts_with("{\"Swimming Club\":{\"description\":\"Swim\""));

    let back: Catalog = serde_json::from_str(&text).unwrap();
    assert_eq!(back, catalog);
}

#[test]
fn repeated_names_are_kept_for_validation() {
    let raw = r#"{"A": {"description": "", "schedule": "", "max_participants": 1},
                  "A": {"description": "", "schedule": "", "max_participants": 2}}"#;
    let catalog: Catalog = serde_json::from_str(raw).unwrap();
    assert_eq!(catalog.len(), 2);
}

#[test]
fn non_object_is_rejected() {
    assert!(serde_json::from_str::<Catalog>("[]").is_err());
}
