use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderValue, StatusCode};
use forum::models::Post;
use forum::prelude::*;
use axum_test::TestServer;
use forum_web::{create_app, AppState, Config};
use pretty_assertions::assert_eq;

mod common;
use common::*;

#[tokio::test]
async fn fake_auth_sets_session_cookie() {
    let app = TestApp::new();
    let response = app
        .server
        .get("/auth/fake")
        .add_query_params(&[("role", "admin"), ("userId", "1"), ("email", "admin@example.com")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    let cookie = response.header(SET_COOKIE);
    assert!(cookie
        .to_str()
        .unwrap()
        .starts_with("forum_session=role=admin&userId=1&email=admin%40example.com;"));

    let response = app
        .server
        .post("/auth/fake")
        .form(&[("role", "member"), ("email", "")])
        .await;
    assert!(response
        .header(SET_COOKIE)
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));
}

#[tokio::test]
async fn home_shows_signed_in_user() {
    let app = TestApp::new();
    let user = create_user(&app.conn(), "member@example.com");
    let (name, value) = signed_in(&user);
    let body = app.server.get("/").add_header(name, value).await.text();
    assert!(body.contains("Signed in as member@example.com"));
}

#[tokio::test]
async fn fake_auth_is_off_by_default() {
    let db = TempDatabase::new();
    let state = AppState::connect(db.spec(), Config::default()).unwrap();
    let server = TestServer::new(create_app(state)).unwrap();
    let response = server.get("/auth/fake").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_ascii_email_survives_the_session_cookie() {
    let app = TestApp::new();
    let conn = app.conn();
    let user = create_user(&conn, "jose@example.com");
    let topic = create_topic(&conn, "Winter Games", "Post your Winter Games stories.");
    let user_id = user.id().unwrap().to_string();

    let response = app
        .server
        .get("/auth/fake")
        .add_query_params(&[("role", "member"), ("userId", user_id.as_str()), ("email", "jos\u{e9}@example.com")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    let set_cookie = response.header(SET_COOKIE).to_str().unwrap().to_string();
    let cookie = set_cookie.split(';').next().unwrap().to_string();

    let body = app
        .server
        .get("/")
        .add_header(COOKIE, HeaderValue::from_str(&cookie).unwrap())
        .await
        .text();
    assert!(body.contains("Signed in as jos\u{e9}@example.com"));

    let response = app
        .server
        .post(&format!("/topics/{}/posts/create", topic.id))
        .add_header(COOKIE, HeaderValue::from_str(&cookie).unwrap())
        .form(&[("title", "Snowball Fighting"), ("body", "So much snow and so few hands.")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(Post::count(&conn).unwrap(), 1);
}
