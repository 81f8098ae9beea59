//! Integration tests for the person repository.
//!
//! Covers create/read/update/delete against a real SQLite file, including the
//! name-pair uniqueness rule and last-name ordering.

use people_db::test_fixtures::TestDatabase;
use people_db::{Error, NoteInput, NoteRepository, PersonInput, PersonRepository};

#[tokio::test]
async fn test_create_then_read_one() {
    let test_db = TestDatabase::new().await;

    let created = test_db
        .db
        .people
        .create(PersonInput::new("Doug", "Farrell"))
        .await
        .expect("create should succeed");

    assert!(created.person_id > 0);
    assert_eq!(created.fname, "Doug");
    assert_eq!(created.lname, "Farrell");
    assert!(created.notes.is_empty());

    let fetched = test_db.db.people.read_one(created.person_id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_duplicate_is_conflict_and_leaves_storage_unchanged() {
    let test_db = TestDatabase::new().await;
    let people = &test_db.db.people;

    people
        .create(PersonInput::new("Doug", "Farrell"))
        .await
        .unwrap();

    let result = people.create(PersonInput::new("Doug", "Farrell")).await;
    match result {
        Err(Error::PersonExists { fname, lname }) => {
            assert_eq!(fname, "Doug");
            assert_eq!(lname, "Farrell");
        }
        other => panic!("Expected PersonExists, got {:?}", other),
    }

    assert_eq!(test_db.count("person").await, 1);
}

#[tokio::test]
async fn test_same_last_name_different_first_name_is_allowed() {
    let test_db = TestDatabase::new().await;
    let people = &test_db.db.people;

    people
        .create(PersonInput::new("Doug", "Farrell"))
        .await
        .unwrap();
    people
        .create(PersonInput::new("Jane", "Farrell"))
        .await
        .unwrap();

    assert_eq!(test_db.count("person").await, 2);
}

#[tokio::test]
async fn test_create_rejects_invalid_names() {
    let test_db = TestDatabase::new().await;
    let people = &test_db.db.people;

    let blank = people.create(PersonInput::new("  ", "Farrell")).await;
    assert!(matches!(blank, Err(Error::InvalidInput(_))));

    let too_long = people
        .create(PersonInput::new("Doug", "x".repeat(33)))
        .await;
    assert!(matches!(too_long, Err(Error::InvalidInput(_))));

    assert_eq!(test_db.count("person").await, 0);
}

#[tokio::test]
async fn test_read_one_missing_is_not_found() {
    let test_db = TestDatabase::new().await;

    let result = test_db.db.people.read_one(999).await;
    assert!(matches!(result, Err(Error::PersonNotFound(999))));
}

#[tokio::test]
async fn test_read_all_sorted_by_last_name_regardless_of_insertion_order() {
    let test_db = TestDatabase::new().await;
    let people = &test_db.db.people;

    for (fname, lname) in [("Bunny", "Easter"), ("Doug", "Farrell"), ("Kent", "Brockman")] {
        people.create(PersonInput::new(fname, lname)).await.unwrap();
    }

    let all = people.read_all().await.unwrap();
    let last_names: Vec<&str> = all.iter().map(|p| p.lname.as_str()).collect();
    assert_eq!(last_names, vec!["Brockman", "Easter", "Farrell"]);
}

#[tokio::test]
async fn test_read_all_includes_notes_newest_first() {
    let test_db = TestDatabase::seeded().await;

    let all = test_db.db.people.read_all().await.unwrap();
    assert_eq!(all.len(), 3);

    let doug = all.iter().find(|p| p.lname == "Farrell").unwrap();
    let contents: Vec<&str> = doug.notes.iter().map(|n| n.content.as_str()).collect();
    assert_eq!(
        contents,
        vec![
            "Well, sort of useful",
            "This could be useful",
            "Cool, a mini-blogging application!",
        ]
    );
    assert!(doug.notes.iter().all(|n| n.person_id == doug.person_id));
}

#[tokio::test]
async fn test_read_one_person_without_notes() {
    let test_db = TestDatabase::seeded().await;
    let people = &test_db.db.people;

    let lonely = people
        .create(PersonInput::new("Lonely", "Person"))
        .await
        .unwrap();

    let fetched = people.read_one(lonely.person_id).await.unwrap();
    assert!(fetched.notes.is_empty());
}

#[tokio::test]
async fn test_update_preserves_id_and_notes_and_advances_timestamp() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    let created = db
        .people
        .create(PersonInput::new("Doug", "Farrell"))
        .await
        .unwrap();
    let note = db
        .notes
        .create(created.person_id, NoteInput::new("hello"))
        .await
        .unwrap();

    let updated = db
        .people
        .update(created.person_id, PersonInput::new("Douglas", "Farrell"))
        .await
        .unwrap();

    assert_eq!(updated.person_id, created.person_id);
    assert_eq!(updated.fname, "Douglas");
    assert!(updated.timestamp >= created.timestamp);
    assert_eq!(updated.notes.len(), 1);
    assert_eq!(updated.notes[0].note_id, note.note_id);
    assert_eq!(test_db.count("note").await, 1);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let test_db = TestDatabase::new().await;

    let result = test_db
        .db
        .people
        .update(42, PersonInput::new("Doug", "Farrell"))
        .await;
    assert!(matches!(result, Err(Error::PersonNotFound(42))));
}

#[tokio::test]
async fn test_update_to_own_name_is_allowed() {
    let test_db = TestDatabase::new().await;
    let people = &test_db.db.people;

    let created = people
        .create(PersonInput::new("Doug", "Farrell"))
        .await
        .unwrap();
    let updated = people
        .update(created.person_id, PersonInput::new("Doug", "Farrell"))
        .await
        .unwrap();

    assert_eq!(updated.person_id, created.person_id);
}

#[tokio::test]
async fn test_update_to_another_persons_name_is_conflict() {
    let test_db = TestDatabase::new().await;
    let people = &test_db.db.people;

    people
        .create(PersonInput::new("Doug", "Farrell"))
        .await
        .unwrap();
    let kent = people
        .create(PersonInput::new("Kent", "Brockman"))
        .await
        .unwrap();

    let result = people
        .update(kent.person_id, PersonInput::new("Doug", "Farrell"))
        .await;
    assert!(matches!(result, Err(Error::PersonExists { .. })));

    let unchanged = people.read_one(kent.person_id).await.unwrap();
    assert_eq!(unchanged.fname, "Kent");
}

#[tokio::test]
async fn test_delete_then_read_is_not_found() {
    let test_db = TestDatabase::new().await;
    let people = &test_db.db.people;

    let created = people
        .create(PersonInput::new("Doug", "Farrell"))
        .await
        .unwrap();
    people.delete(created.person_id).await.unwrap();

    assert_eq!(test_db.count("person").await, 0);
    assert!(matches!(
        people.read_one(created.person_id).await,
        Err(Error::PersonNotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let test_db = TestDatabase::new().await;

    let result = test_db.db.people.delete(7).await;
    assert!(matches!(result, Err(Error::PersonNotFound(7))));
}
