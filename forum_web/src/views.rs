//! HTML pages. Every value taken from the database or a request is
//! passed through [`escape`].

use std::fmt::Write;

use axum::http::StatusCode;
use axum::response::Html;
use forum::models::{Advertisement, Comment, Favorite, Flair, Post, Topic};
use forum::ValidationError;

use crate::session::Identity;

/// Escape text for use in HTML content and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body>\n<nav><a href=\"/topics\">Topics</a> | <a href=\"/advertisements\">Advertisements</a></nav>\n\
         <main>\n{}</main>\n</body>\n</html>\n",
        escape(title),
        body
    ))
}

fn errors_list(errors: Option<&ValidationError>) -> String {
    let Some(errors) = errors else {
        return String::new();
    };
    let mut out = String::from("<ul class=\"errors\">\n");
    for message in errors.messages() {
        let _ = writeln!(out, "<li>{}</li>", escape(message));
    }
    out.push_str("</ul>\n");
    out
}

/// One input of a form. Long fields render as a textarea.
struct Field<'a> {
    name: &'a str,
    label: &'a str,
    value: &'a str,
    long: bool,
}

fn form(action: &str, fields: &[Field<'_>], submit: &str) -> String {
    let mut out = format!("<form action=\"{}\" method=\"post\">\n", escape(action));
    for field in fields {
        let _ = writeln!(out, "<label for=\"{0}\">{1}</label>", field.name, field.label);
        if field.long {
            let _ = writeln!(
                out,
                "<textarea id=\"{0}\" name=\"{0}\">{1}</textarea>",
                field.name,
                escape(field.value)
            );
        } else {
            let _ = writeln!(
                out,
                "<input id=\"{0}\" name=\"{0}\" type=\"text\" value=\"{1}\">",
                field.name,
                escape(field.value)
            );
        }
    }
    let _ = writeln!(out, "<button type=\"submit\">{submit}</button>\n</form>");
    out
}

fn button(action: &str, label: &str) -> String {
    format!(
        "<form action=\"{}\" method=\"post\" class=\"inline\"><button type=\"submit\">{}</button></form>\n",
        escape(action),
        label
    )
}

pub fn error_page(status: StatusCode) -> Html<String> {
    let reason = status.canonical_reason().unwrap_or("Error");
    layout(reason, &format!("<h1>{}</h1>\n", escape(reason)))
}

pub fn home(identity: Option<&Identity>) -> Html<String> {
    let mut body = String::from("<h1>Welcome to the forum</h1>\n");
    if let Some(identity) = identity {
        let _ = writeln!(body, "<p>Signed in as {}</p>", escape(&identity.email));
    }
    layout("Forum", &body)
}

pub mod topics {
    use super::*;
    use forum::models::TopicForm;

    pub fn index(topics: &[Topic]) -> Html<String> {
        let mut body = String::from("<h1>Topics</h1>\n<a href=\"/topics/new\">New Topic</a>\n<ul>\n");
        for topic in topics {
            let _ = writeln!(
                body,
                "<li><a href=\"/topics/{}\">{}</a></li>",
                topic.id,
                escape(&topic.title)
            );
        }
        body.push_str("</ul>\n");
        layout("Topics", &body)
    }

    pub fn new(form: &TopicForm, errors: Option<&ValidationError>) -> Html<String> {
        let body = format!(
            "<h1>New Topic</h1>\n{}{}",
            errors_list(errors),
            topic_form("/topics/create", form)
        );
        layout("New Topic", &body)
    }

    pub fn edit(id: i64, form: &TopicForm, errors: Option<&ValidationError>) -> Html<String> {
        let body = format!(
            "<h1>Edit Topic</h1>\n{}{}",
            errors_list(errors),
            topic_form(&format!("/topics/{id}/update"), form)
        );
        layout("Edit Topic", &body)
    }

    fn topic_form(action: &str, form: &TopicForm) -> String {
        super::form(
            action,
            &[
                Field {
                    name: "title",
                    label: "Title",
                    value: &form.title,
                    long: false,
                },
                Field {
                    name: "description",
                    label: "Description",
                    value: &form.description,
                    long: true,
                },
            ],
            "Save",
        )
    }

    pub fn show(topic: &Topic, posts: &[Post]) -> Html<String> {
        let id = topic.id;
        let mut body = format!(
            "<h1>{}</h1>\n<p>{}</p>\n<a href=\"/topics/{id}/edit\">Edit</a>\n{}",
            escape(&topic.title),
            escape(&topic.description),
            button(&format!("/topics/{id}/destroy"), "Delete"),
        );
        let _ = writeln!(
            body,
            "<h2>Posts</h2>\n<a href=\"/topics/{}/posts/new\">New Post</a>\n<ul>",
            topic.id
        );
        for post in posts {
            let _ = writeln!(
                body,
                "<li><a href=\"/topics/{}/posts/{}\">{}</a></li>",
                topic.id,
                post.id,
                escape(&post.title)
            );
        }
        body.push_str("</ul>\n");
        layout(&topic.title, &body)
    }
}

pub mod advertisements {
    use super::*;
    use forum::models::AdvertisementForm;

    pub fn index(ads: &[Advertisement]) -> Html<String> {
        let mut body = String::from(
            "<h1>Advertisements</h1>\n<a href=\"/advertisements/new\">New Advertisement</a>\n<ul>\n",
        );
        for ad in ads {
            let _ = writeln!(
                body,
                "<li><a href=\"/advertisements/{}\">{}</a></li>",
                ad.id,
                escape(&ad.title)
            );
        }
        body.push_str("</ul>\n");
        layout("Advertisements", &body)
    }

    pub fn new(form: &AdvertisementForm, errors: Option<&ValidationError>) -> Html<String> {
        let body = format!(
            "<h1>New Advertisement</h1>\n{}{}",
            errors_list(errors),
            ad_form("/advertisements/create", form)
        );
        layout("New Advertisement", &body)
    }

    pub fn edit(id: i64, form: &AdvertisementForm, errors: Option<&ValidationError>) -> Html<String> {
        let body = format!(
            "<h1>Edit Advertisement</h1>\n{}{}",
            errors_list(errors),
            ad_form(&format!("/advertisements/{id}/update"), form)
        );
        layout("Edit Advertisement", &body)
    }

    fn ad_form(action: &str, form: &AdvertisementForm) -> String {
        super::form(
            action,
            &[
                Field {
                    name: "title",
                    label: "Title",
                    value: &form.title,
                    long: false,
                },
                Field {
                    name: "description",
                    label: "Description",
                    value: &form.description,
                    long: true,
                },
            ],
            "Save",
        )
    }

    pub fn show(ad: &Advertisement) -> Html<String> {
        let id = ad.id;
        let body = format!(
            "<h1>{}</h1>\n<p>{}</p>\n<a href=\"/advertisements/{id}/edit\">Edit</a>\n{}",
            escape(&ad.title),
            escape(&ad.description),
            button(&format!("/advertisements/{id}/destroy"), "Delete"),
        );
        layout(&ad.title, &body)
    }
}

pub mod posts {
    use super::*;
    use forum::models::PostForm;

    pub fn new(topic: &Topic, form: &PostForm, errors: Option<&ValidationError>) -> Html<String> {
        let body = format!(
            "<h1>New Post</h1>\n<p>in {}</p>\n{}{}",
            escape(&topic.title),
            errors_list(errors),
            post_form(&format!("/topics/{}/posts/create", topic.id), form)
        );
        layout("New Post", &body)
    }

    pub fn edit(post: &Post, form: &PostForm, errors: Option<&ValidationError>) -> Html<String> {
        let body = format!(
            "<h1>Edit Post</h1>\n{}{}",
            errors_list(errors),
            post_form(
                &format!("/topics/{}/posts/{}/update", post.topic_id(), post.id),
                form
            )
        );
        layout("Edit Post", &body)
    }

    fn post_form(action: &str, form: &PostForm) -> String {
        super::form(
            action,
            &[
                Field {
                    name: "title",
                    label: "Title",
                    value: &form.title,
                    long: false,
                },
                Field {
                    name: "body",
                    label: "Body",
                    value: &form.body,
                    long: true,
                },
            ],
            "Save",
        )
    }

    /// Everything the post page shows.
    pub struct PostPage {
        pub topic: Topic,
        pub post: Post,
        pub points: i64,
        pub comments: Vec<Comment>,
        pub flairs: Vec<Flair>,
        /// The signed-in user's favorite of this post.
        pub favorite: Option<Favorite>,
    }

    pub fn show(
        page: &PostPage,
        identity: Option<&Identity>,
        comment_errors: Option<&ValidationError>,
        comment_body: &str,
    ) -> Html<String> {
        let post = &page.post;
        let base = format!("/topics/{}/posts/{}", post.topic_id(), post.id);
        let mut body = format!(
            "<h1>{}</h1>\n<p>in <a href=\"/topics/{}\">{}</a></p>\n<p>{}</p>\n",
            escape(&post.title),
            page.topic.id,
            escape(&page.topic.title),
            escape(&post.body),
        );
        for flair in &page.flairs {
            let _ = writeln!(
                body,
                "<span class=\"flair\" style=\"background-color: {}\">{}</span>",
                escape(&flair.color),
                escape(&flair.name)
            );
        }
        let _ = writeln!(body, "<p class=\"points\">Points: {}</p>", page.points);

        if identity.is_some() {
            body.push_str(&button(&format!("{base}/votes/upvote"), "Upvote"));
            body.push_str(&button(&format!("{base}/votes/downvote"), "Downvote"));
            match &page.favorite {
                Some(favorite) => body.push_str(&button(
                    &format!("{base}/favorites/{}/destroy", favorite.id),
                    "Unfavorite",
                )),
                None => body.push_str(&button(&format!("{base}/favorites/create"), "Favorite")),
            }
            let _ = writeln!(body, "<a href=\"{base}/edit\">Edit</a>");
            body.push_str(&button(&format!("{base}/destroy"), "Delete"));
        }

        body.push_str("<h2>Comments</h2>\n<ul>\n");
        for comment in &page.comments {
            let _ = write!(body, "<li>{}", escape(&comment.body));
            if identity.is_some() {
                body.push_str(&button(
                    &format!("{base}/comments/{}/destroy", comment.id),
                    "Delete",
                ));
            }
            body.push_str("</li>\n");
        }
        body.push_str("</ul>\n");

        if identity.is_some() {
            body.push_str(&errors_list(comment_errors));
            body.push_str(&super::form(
                &format!("{base}/comments/create"),
                &[Field {
                    name: "body",
                    label: "Comment",
                    value: comment_body,
                    long: true,
                }],
                "Comment",
            ));
        }
        layout(&post.title, &body)
    }
}
