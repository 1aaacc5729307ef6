#![allow(dead_code)] // each test file uses a different subset
use axum::http::header::{COOKIE, LOCATION};
use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestResponse, TestServer};
use forum::db::Connection;
use forum::models::User;
use forum::prelude::*;
use forum_web::session::Identity;
use forum_web::{create_app, AppState, Config};

pub use forum_test_helper::*;

/// A server over its own temporary database, with `/auth/fake` on.
pub struct TestApp {
    pub server: TestServer,
    pub db: TempDatabase,
}

impl TestApp {
    pub fn new() -> Self {
        let db = TempDatabase::new();
        let config = Config {
            pool_size: 2,
            fake_auth: true,
            ..Config::default()
        };
        let state = AppState::connect(db.spec(), config).unwrap();
        let server = TestServer::new(create_app(state)).unwrap();
        TestApp { server, db }
    }

    pub fn conn(&self) -> Connection {
        self.db.connect()
    }
}

/// A `Cookie` header signing in as `user`.
pub fn signed_in(user: &User) -> (HeaderName, HeaderValue) {
    session(&Identity {
        user_id: user.id().unwrap(),
        role: user.role,
        email: user.email.clone(),
    })
}

/// A `Cookie` header carrying `identity`, whether or not its user exists.
pub fn session(identity: &Identity) -> (HeaderName, HeaderValue) {
    let cookie = format!("forum_session={}", identity.encode());
    (COOKIE, HeaderValue::from_str(&cookie).unwrap())
}

pub fn location(response: &TestResponse) -> String {
    response.header(LOCATION).to_str().unwrap().to_string()
}
