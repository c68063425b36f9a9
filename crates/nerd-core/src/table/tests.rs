use super::*;
use serde_json::json;

fn setup() -> (Arc<Database>, Table<Card>, Table<Topic>) {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let cards = Table::<Card>::new(Arc::clone(&db));
    let topics = Table::<Topic>::new(Arc::clone(&db));
    (db, cards, topics)
}

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

#[test]
fn test_card_insert_then_get_one() {
    let (_db, cards, _topics) = setup();
    let id = cards
        .insert(&doc(json!({
            "title": "Borrowing",
            "question": "How many mutable borrows may coexist?",
            "answer": "One"
        })))
        .unwrap();

    let fetched = cards.get_one(id).unwrap();
    assert_eq!(fetched["id"], json!(id));
    assert_eq!(fetched["title"], "Borrowing");
    assert_eq!(fetched["question"], "How many mutable borrows may coexist?");
    assert_eq!(fetched["answer"], "One");
    assert_eq!(fetched["topic"], json!(0));
}

#[test]
fn test_card_answer_present_only_when_supplied() {
    let (_db, cards, _topics) = setup();
    let without = cards
        .insert(&doc(json!({"title": "t", "question": "q"})))
        .unwrap();
    let with_null = cards
        .insert(&doc(json!({"title": "t", "question": "q", "answer": null})))
        .unwrap();
    let with_empty = cards
        .insert(&doc(json!({"title": "t", "question": "q", "answer": ""})))
        .unwrap();

    assert!(!cards.get_one(without).unwrap().contains_key("answer"));
    assert!(!cards.get_one(with_null).unwrap().contains_key("answer"));
    assert_eq!(cards.get_one(with_empty).unwrap()["answer"], "");
}

#[test]
fn test_card_validation_persists_nothing() {
    let (db, cards, _topics) = setup();
    let invalid = [
        json!({"question": "q"}),
        json!({"title": "t", "question": ""}),
        json!({"title": "", "question": "q"}),
        json!({"title": 3, "question": "q"}),
        json!({"title": "t", "question": "q", "answer": 5}),
        json!({"title": "t", "question": "q", "topic": "zero"}),
    ];

    for input in invalid {
        let err = cards.insert(&doc(input.clone())).unwrap_err();
        assert!(
            matches!(err, NerdError::Validation { .. }),
            "{} gave {:?}",
            input,
            err
        );
    }
    assert_eq!(db.count_rows("card").unwrap(), 0);
}

#[test]
fn test_card_with_unknown_topic_is_storage_error() {
    let (db, cards, _topics) = setup();
    let err = cards
        .insert(&doc(json!({"title": "t", "question": "q", "topic": 99})))
        .unwrap_err();
    assert!(matches!(err, NerdError::Storage { .. }));
    assert!(err.to_string().contains("FOREIGN KEY"));
    assert_eq!(db.count_rows("card").unwrap(), 0);
}

#[test]
fn test_list_returns_shallow_documents() {
    let (_db, cards, _topics) = setup();
    for n in 0..3 {
        cards
            .insert(&doc(json!({
                "title": format!("card {}", n),
                "question": "q",
                "answer": "a"
            })))
            .unwrap();
    }

    let listed = cards.list(&Filter::new()).unwrap();
    assert_eq!(listed.len(), 3);
    for item in &listed {
        let mut keys: Vec<_> = item.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["id", "title"]);
    }
}

#[test]
fn test_card_list_filters_by_topic() {
    let (_db, cards, topics) = setup();
    let science = topics.insert(&doc(json!({"name": "Science"}))).unwrap();
    cards
        .insert(&doc(json!({"title": "default", "question": "q"})))
        .unwrap();
    let in_science = cards
        .insert(&doc(json!({"title": "atoms", "question": "q", "topic": science})))
        .unwrap();

    let filter = Filter::from([("topic".to_string(), science.to_string())]);
    let listed = cards.list(&filter).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], json!(in_science));

    let filter = Filter::from([("topic".to_string(), "1 OR 1=1".to_string())]);
    assert!(matches!(
        cards.list(&filter),
        Err(NerdError::Validation { .. })
    ));
}

#[test]
fn test_topic_ignores_filters() {
    let (_db, _cards, topics) = setup();
    let filter = Filter::from([("name".to_string(), "nothing".to_string())]);
    assert_eq!(topics.list(&filter).unwrap().len(), 1);
}

#[test]
fn test_missing_ids_are_not_found_and_remove_is_idempotent() {
    let (_db, cards, _topics) = setup();
    assert!(matches!(
        cards.get_one(12),
        Err(NerdError::NotFound { ref id, .. }) if id == "12"
    ));

    let id = cards
        .insert(&doc(json!({"title": "t", "question": "q"})))
        .unwrap();
    cards.remove(id).unwrap();
    cards.remove(id).unwrap();
    cards.remove(4242).unwrap();
    assert!(matches!(cards.get_one(id), Err(NerdError::NotFound { .. })));
}

#[test]
fn test_update_replaces_every_field() {
    let (_db, cards, topics) = setup();
    let science = topics.insert(&doc(json!({"name": "Science"}))).unwrap();
    let id = cards
        .insert(&doc(json!({
            "title": "old",
            "question": "old q",
            "answer": "old a",
            "topic": science
        })))
        .unwrap();

    cards
        .update(id, &doc(json!({"title": "new", "question": "new q"})))
        .unwrap();

    let fetched = cards.get_one(id).unwrap();
    assert_eq!(fetched["title"], "new");
    assert_eq!(fetched["question"], "new q");
    assert!(!fetched.contains_key("answer"));
    assert_eq!(fetched["topic"], json!(0));
}

#[test]
fn test_update_validates_and_reports_missing_rows() {
    let (_db, cards, _topics) = setup();
    let id = cards
        .insert(&doc(json!({"title": "t", "question": "q"})))
        .unwrap();

    assert!(matches!(
        cards.update(id, &doc(json!({"title": "t"}))),
        Err(NerdError::Validation { .. })
    ));
    assert_eq!(cards.get_one(id).unwrap()["question"], "q");

    assert!(matches!(
        cards.update(id + 100, &doc(json!({"title": "t", "question": "q"}))),
        Err(NerdError::NotFound { .. })
    ));
}

#[test]
fn test_default_topic_is_listed_first() {
    let (_db, _cards, topics) = setup();
    let id = topics.insert(&doc(json!({"name": "Science"}))).unwrap();
    assert_eq!(id, 1);

    let listed = topics.list(&Filter::new()).unwrap();
    assert_eq!(
        Value::from(listed),
        json!([{"id": 0, "name": "Default"}, {"id": 1, "name": "Science"}])
    );
}

#[test]
fn test_topic_rename_and_delete_keep_cards() {
    let (_db, cards, topics) = setup();
    let history = topics.insert(&doc(json!({"name": "History"}))).unwrap();
    let card = cards
        .insert(&doc(json!({"title": "t", "question": "q", "topic": history})))
        .unwrap();

    topics
        .update(history, &doc(json!({"name": "Ancient History"})))
        .unwrap();
    assert_eq!(topics.get_one(history).unwrap()["name"], "Ancient History");

    topics.remove(history).unwrap();
    assert_eq!(cards.get_one(card).unwrap()["topic"], json!(0));
}

#[test]
fn test_works_through_trait_object() {
    let (db, _cards, _topics) = setup();
    let table: Arc<dyn ResourceTable> = Arc::new(Table::<Topic>::new(db));
    assert_eq!(table.kind(), "topic");
    assert!(matches!(
        table.insert(&doc(json!({"name": ""}))),
        Err(NerdError::Validation { .. })
    ));
}
