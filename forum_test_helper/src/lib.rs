//! Test helpers to set up forum databases.
//!
//! Every helper builds a fresh database with the forum schema already
//! migrated, so tests never share state.
#![deny(missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};

use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use forum::models::{NewPost, NewUser, Post, Role, Topic, TopicForm, User};
use forum::schema;
use forum_core::db::sqlite::{self, SQLiteBackend};
use forum_core::db::{connect, Backend, Connection, ConnectionSpec};
use tempfile::TempDir;

pub use forum_core::db::{BackendConnection, ConnectionMethods};

/// bcrypt cost used for test users. The minimum bcrypt accepts.
pub const TEST_HASH_COST: u32 = 4;

/// Password given to every fixture user.
pub const TEST_PASSWORD: &str = "secret-password";

static EMAIL_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Initialise `env_logger` for tests. Safe to call repeatedly.
pub fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Populate the database schema.
pub fn setup_db(conn: &mut Connection) {
    let applied = schema::migrations().migrate(conn).unwrap();
    log::info!("applied {applied} migrations");
}

/// Create a migrated in-memory sqlite [`Connection`].
pub fn sqlite_connection() -> Connection {
    init_logging();
    log::info!("connecting to sqlite memory database..");
    let mut conn = SQLiteBackend::new()
        .connect(":memory:")
        .expect("Could not connect sqlite backend");
    setup_db(&mut conn);
    conn
}

/// A migrated sqlite database in a temporary directory. Unlike an
/// in-memory database it can be opened by several connections, which
/// a connection pool needs.
///
/// The directory is removed when this is dropped.
pub struct TempDatabase {
    dir: TempDir,
    spec: ConnectionSpec,
}

impl TempDatabase {
    /// Create and migrate the database.
    pub fn new() -> Self {
        init_logging();
        let dir = tempfile::tempdir().expect("Could not create temp dir");
        let path = dir.path().join("forum.db");
        let spec = ConnectionSpec::new(sqlite::BACKEND_NAME, path.to_string_lossy());
        log::info!("new db is `{}`", spec.conn_str);
        let mut conn = connect(&spec).expect("Could not connect sqlite backend");
        setup_db(&mut conn);
        TempDatabase { dir, spec }
    }

    /// Connection spec pointing at the database file.
    pub fn spec(&self) -> ConnectionSpec {
        self.spec.clone()
    }

    /// Directory holding the database file.
    pub fn dir(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// Open a new connection to the database.
    pub fn connect(&self) -> Connection {
        connect(&self.spec).expect("Could not connect sqlite backend")
    }
}

impl Default for TempDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// A fake email address, unique within the test process.
pub fn random_email() -> String {
    let n = EMAIL_COUNTER.fetch_add(1, Ordering::Relaxed);
    let email: String = SafeEmail().fake();
    format!("{n}.{email}")
}

/// Create a user with `role` and [`TEST_PASSWORD`].
pub fn create_user_with_role(conn: &impl ConnectionMethods, email: &str, role: Role) -> User {
    let new_user = NewUser {
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        role,
    };
    User::create_with_cost(conn, &new_user, TEST_HASH_COST).unwrap()
}

/// Create a member.
pub fn create_user(conn: &impl ConnectionMethods, email: &str) -> User {
    create_user_with_role(conn, email, Role::Member)
}

/// Create an admin with a random email.
pub fn create_admin(conn: &impl ConnectionMethods) -> User {
    create_user_with_role(conn, &random_email(), Role::Admin)
}

/// Create a topic.
pub fn create_topic(conn: &impl ConnectionMethods, title: &str, description: &str) -> Topic {
    let form = TopicForm {
        title: title.to_string(),
        description: description.to_string(),
    };
    Topic::create(conn, &form).unwrap()
}

/// Create a post in `topic` written by `user`.
pub fn create_post(conn: &mut Connection, topic: &Topic, user: &User, title: &str) -> Post {
    let new_post = NewPost {
        title: title.to_string(),
        body: "Rode a tesla roadster all the way there.".to_string(),
        topic_id: Some(topic.id.unwrap()),
        user_id: Some(user.id.unwrap()),
    };
    Post::create(conn, &new_post).unwrap()
}

/// A user, a topic and a post by that user in that topic.
pub struct Scene {
    /// Author of `post`.
    pub user: User,
    /// Topic holding `post`.
    pub topic: Topic,
    /// The post.
    pub post: Post,
}

impl Scene {
    /// Build the scene in `conn`.
    pub fn build(conn: &mut Connection) -> Scene {
        let user = create_user(conn, "starman@tesla.com");
        let topic = create_topic(
            conn,
            "Expeditions to Alpha Centauri",
            "A compilation of reports from recent visits to the star system.",
        );
        let post = create_post(conn, &topic, &user, "My first visit to Proxima Centauri b");
        Scene { user, topic, post }
    }
}
