use forum::models::{Advertisement, AdvertisementForm, Topic, TopicForm};
use forum::prelude::*;
use pretty_assertions::assert_eq;
use test_log::test;

mod common;
use common::*;

fn topic_form(title: &str, description: &str) -> TopicForm {
    TopicForm {
        title: title.to_string(),
        description: description.to_string(),
    }
}

#[test]
fn create_and_find_topic() {
    let conn = sqlite_connection();
    let topic = Topic::create(
        &conn,
        &topic_form("JS Frameworks", "There is a lot of them out there!"),
    )
    .unwrap();

    let found = Topic::find(&conn, topic.id().unwrap()).unwrap().unwrap();
    assert_eq!(found, topic);
    assert_eq!(Topic::all(&conn).unwrap(), vec![topic]);
}

#[test]
fn missing_topic_is_none() {
    let conn = sqlite_connection();
    assert!(Topic::find(&conn, 42).unwrap().is_none());
}

#[test]
fn short_title_is_rejected() {
    let conn = sqlite_connection();
    let err = Topic::create(&conn, &topic_form("a", "There is a lot of them out there!")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validation error: Topic.title must be at least 5 characters"
    );
    assert_eq!(Topic::count(&conn).unwrap(), 0);
}

#[test]
fn update_topic() {
    let conn = sqlite_connection();
    let mut topic = create_topic(&conn, "JS Frameworks", "There is a lot of them out there!");

    topic
        .update(&conn, &topic_form("Rust Frameworks", "Fewer of them, but growing."))
        .unwrap();
    let found = Topic::find(&conn, topic.id().unwrap()).unwrap().unwrap();
    assert_eq!(found.title, "Rust Frameworks");
    assert_eq!(found.description, "Fewer of them, but growing.");
    assert!(found.updated_at >= found.created_at);
}

#[test]
fn invalid_update_leaves_topic_alone() {
    let conn = sqlite_connection();
    let mut topic = create_topic(&conn, "JS Frameworks", "There is a lot of them out there!");

    assert!(topic.update(&conn, &topic_form("JS", "short")).is_err());
    let found = Topic::find(&conn, topic.id().unwrap()).unwrap().unwrap();
    assert_eq!(found.title, "JS Frameworks");
}

#[test]
fn destroy_topic() {
    let conn = sqlite_connection();
    let topic = create_topic(&conn, "JS Frameworks", "There is a lot of them out there!");
    create_topic(&conn, "Rust Frameworks", "Fewer of them, but growing.");

    topic.delete(&conn).unwrap();
    assert_eq!(Topic::count(&conn).unwrap(), 1);
}

#[test]
fn advertisement_lifecycle() {
    let conn = sqlite_connection();
    let mut ad = Advertisement::create(
        &conn,
        &AdvertisementForm {
            title: "Buy a roadster".to_string(),
            description: "Space-rated convertible, one careful owner.".to_string(),
        },
    )
    .unwrap();
    assert_eq!(Advertisement::all(&conn).unwrap().len(), 1);

    let err = ad
        .update(
            &conn,
            &AdvertisementForm {
                title: "B".to_string(),
                description: "too short".to_string(),
            },
        )
        .unwrap_err();
    let validation = err.validation().unwrap();
    assert_eq!(
        validation.messages().collect::<Vec<_>>(),
        vec![
            "Advertisement.description must be at least 10 characters",
            "Advertisement.title must be at least 2 characters",
        ]
    );

    ad.delete(&conn).unwrap();
    assert_eq!(Advertisement::count(&conn).unwrap(), 0);
    assert!(Advertisement::find(&conn, ad.id().unwrap()).unwrap().is_none());
}
