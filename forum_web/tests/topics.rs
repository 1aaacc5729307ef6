use axum::http::StatusCode;
use forum::models::{Advertisement, Topic};
use forum::prelude::*;
use pretty_assertions::assert_eq;

mod common;
use common::*;

fn setup() -> (TestApp, Topic) {
    let app = TestApp::new();
    let topic = create_topic(&app.conn(), "JS Frameworks", "There is a lot of them");
    (app, topic)
}

#[tokio::test]
async fn index_lists_topics() {
    let (app, _topic) = setup();
    let response = app.server.get("/topics").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(body.contains("Topics"));
    assert!(body.contains("JS Frameworks"));
}

#[tokio::test]
async fn new_renders_form() {
    let (app, _topic) = setup();
    let response = app.server.get("/topics/new").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("New Topic"));
}

#[tokio::test]
async fn create_redirects_to_topic() {
    let (app, _topic) = setup();
    let response = app
        .server
        .post("/topics/create")
        .form(&[
            ("title", "blink-182 songs"),
            ("description", "What's your favorite blink-182 song?"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    let topics = Topic::all(&app.conn()).unwrap();
    let created = topics
        .iter()
        .find(|t| t.title == "blink-182 songs")
        .unwrap();
    assert_eq!(created.description, "What's your favorite blink-182 song?");
    assert_eq!(location(&response), format!("/topics/{}", created.id));
}

#[tokio::test]
async fn create_with_invalid_fields_shows_form_again() {
    let (app, _topic) = setup();
    let response = app
        .server
        .post("/topics/create")
        .form(&[("title", "a"), ("description", "b")])
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text();
    assert!(body.contains("New Topic"));
    assert!(body.contains("Topic.title must be at least 5 characters"));
    assert!(body.contains("Topic.description must be at least 10 characters"));
    let topics = Topic::all(&app.conn()).unwrap();
    assert!(topics.iter().all(|t| t.title != "a"));
}

#[tokio::test]
async fn show_renders_topic() {
    let (app, topic) = setup();
    let response = app.server.get(&format!("/topics/{}", topic.id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("JS Frameworks"));
}

#[tokio::test]
async fn unknown_topic_is_not_found() {
    let (app, _topic) = setup();
    let response = app.server.get("/topics/9999").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let response = app.server.post("/topics/9999/destroy").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn destroy_deletes_one_topic() {
    let (app, topic) = setup();
    let before = Topic::count(&app.conn()).unwrap();
    assert_eq!(before, 1);

    let response = app
        .server
        .post(&format!("/topics/{}/destroy", topic.id))
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(Topic::count(&app.conn()).unwrap(), before - 1);
}

#[tokio::test]
async fn edit_renders_form_with_values() {
    let (app, topic) = setup();
    let response = app.server.get(&format!("/topics/{}/edit", topic.id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(body.contains("Edit Topic"));
    assert!(body.contains("JS Frameworks"));
}

#[tokio::test]
async fn update_changes_topic() {
    let (app, topic) = setup();
    let response = app
        .server
        .post(&format!("/topics/{}/update", topic.id))
        .form(&[
            ("title", "JavaScript Frameworks"),
            ("description", "There are a lot of them"),
        ])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    let found = Topic::find(&app.conn(), topic.id().unwrap()).unwrap().unwrap();
    assert_eq!(found.title, "JavaScript Frameworks");

    let response = app
        .server
        .post(&format!("/topics/{}/update", topic.id))
        .form(&[("title", "JS"), ("description", "There are a lot of them")])
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains("Edit Topic"));
    let found = Topic::find(&app.conn(), topic.id().unwrap()).unwrap().unwrap();
    assert_eq!(found.title, "JavaScript Frameworks");
}

#[tokio::test]
async fn advertisement_crud() {
    let app = TestApp::new();
    let response = app
        .server
        .post("/advertisements/create")
        .form(&[
            ("title", "Rocket rides"),
            ("description", "Weekly launches to low orbit."),
        ])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    let ads = Advertisement::all(&app.conn()).unwrap();
    assert_eq!(ads.len(), 1);
    let id = ads[0].id;

    let body = app.server.get("/advertisements").await.text();
    assert!(body.contains("Advertisements"));
    assert!(body.contains("Rocket rides"));
    let body = app.server.get(&format!("/advertisements/{id}/edit")).await.text();
    assert!(body.contains("Edit Advertisement"));

    let response = app
        .server
        .post("/advertisements/create")
        .form(&[("title", "R"), ("description", "short")])
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(Advertisement::count(&app.conn()).unwrap(), 1);

    let response = app
        .server
        .post(&format!("/advertisements/{id}/destroy"))
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(Advertisement::count(&app.conn()).unwrap(), 0);
}
