#![allow(dead_code)]
use bitacora_core::{NewPost, Post, PostId};
use time::{Duration, OffsetDateTime};
use time::macros::datetime;

/// Fixed creation instant shared by fixtures.
pub const EPOCH: OffsetDateTime = datetime!(2024-01-15 10:30 UTC);

/// Builds a post created `minutes` after [`EPOCH`].
pub fn post_at(title: &str, minutes: i64) -> Post {
    Post::create(
        PostId::generate(),
        NewPost::new(title, format!("{} description", title)),
        EPOCH + Duration::minutes(minutes),
    )
}
