//! Posts as seen by the site: a transient copy of what the content API owns.

use signal_api_types::{PostCreateRequest, PostResponse};
use time::PrimitiveDateTime;

use super::error::DomainError;
use super::types::parse_naive_timestamp;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    /// Formatted text as authored; may contain HTML.
    pub content: String,
    pub author: String,
    pub created_at: PrimitiveDateTime,
    pub image_url: Option<String>,
}

impl TryFrom<PostResponse> for Post {
    type Error = DomainError;

    fn try_from(value: PostResponse) -> Result<Self, Self::Error> {
        let created_at = parse_naive_timestamp(&value.created_at)?;
        Ok(Self {
            id: value.id,
            title: value.title,
            content: value.content,
            author: value.author,
            created_at,
            image_url: value.image_url.and_then(blank_to_none),
        })
    }
}

/// Fields of a post about to be submitted. Construction enforces the
/// required-field checks that run before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    content: String,
    author: String,
    image_url: Option<String>,
}

impl NewPost {
    pub fn new(
        title: &str,
        content: &str,
        author: &str,
        image_url: Option<&str>,
    ) -> Result<Self, DomainError> {
        let title = title.trim();
        let author = author.trim();
        if title.is_empty() || author.is_empty() || content.trim().is_empty() {
            return Err(DomainError::validation(REQUIRED_FIELDS_MESSAGE));
        }

        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
            author: author.to_string(),
            image_url: image_url.map(str::to_string).and_then(blank_to_none),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

impl From<&NewPost> for PostCreateRequest {
    fn from(post: &NewPost) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
            image_url: post.image_url.clone(),
        }
    }
}

/// Remove the post with `id`, leaving every other entry in place.
/// Returns whether anything was removed.
pub fn remove_by_id(posts: &mut Vec<Post>, id: &str) -> bool {
    let before = posts.len();
    posts.retain(|post| post.id != id);
    posts.len() != before
}

fn blank_to_none(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: format!("title {id}"),
            content: "body".to_string(),
            author: "ann".to_string(),
            created_at: datetime!(2025-01-01 00:00),
            image_url: None,
        }
    }

    #[test]
    fn new_post_requires_title_content_and_author() {
        for (title, content, author) in [("", "c", "a"), ("t", "  ", "a"), ("t", "c", "")] {
            let err = NewPost::new(title, content, author, None).expect_err("missing field");
            assert_eq!(err.message(), REQUIRED_FIELDS_MESSAGE);
        }
    }

    #[test]
    fn new_post_drops_blank_image() {
        let post = NewPost::new(" Title ", "<p>x</p>", "Ann", Some("   ")).expect("valid");
        assert_eq!(post.title(), "Title");
        assert_eq!(post.image_url(), None);

        let request = PostCreateRequest::from(&post);
        assert_eq!(request.image_url, None);
        assert_eq!(request.content, "<p>x</p>");
    }

    #[test]
    fn converts_wire_post() {
        let wire = PostResponse {
            id: "p1".into(),
            title: "Hello".into(),
            content: "<b>hi</b>".into(),
            author: "Ann".into(),
            created_at: "2025-02-03T04:05:06.7".into(),
            image_url: Some(String::new()),
        };
        let post = Post::try_from(wire).expect("valid post");
        assert_eq!(post.created_at, datetime!(2025-02-03 04:05:06.7));
        assert_eq!(post.image_url, None);
    }

    #[test]
    fn remove_by_id_removes_exactly_one_entry() {
        let mut posts = vec![post("a"), post("b"), post("c")];
        assert!(remove_by_id(&mut posts, "b"));
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert!(!remove_by_id(&mut posts, "missing"));
        assert_eq!(posts.len(), 2);
    }
}
