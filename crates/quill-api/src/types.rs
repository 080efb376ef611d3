//! Blog API types.

use serde::Deserialize;

/// Post author.
#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Post tag.
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

/// Reader comment on a post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub username: String,
    pub text: String,
    /// ISO 8601 timestamp as sent by the server.
    pub created_at: String,
}

/// Blog post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub title: String,
    /// Raw, unsanitized HTML body.
    pub content: String,
    pub created_at: String,
    pub author: Author,
    pub slug: String,
    #[serde(default)]
    pub cover_photo: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Paging metadata of a listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    #[serde(default)]
    pub has_next_page: Option<bool>,
    #[serde(default)]
    pub has_prev_page: Option<bool>,
}

impl Pagination {
    /// Whether a later page exists, derived from the counters when the server
    /// omits the flag.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.has_next_page.unwrap_or(self.page < self.total_pages)
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.has_prev_page.unwrap_or(self.page > 1)
    }
}

/// One page of a post listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PostsPage {
    pub data: Vec<Post>,
    pub pagination: Pagination,
}

/// One page of a post's comments.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentsPage {
    pub data: Vec<Comment>,
    pub pagination: Pagination,
}

/// Title and slug of a post, as returned by the recent-posts endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Unpaged `{"data": [...]}` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct DataList<T> {
    pub(crate) data: Vec<T>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_deserialize_post() {
        let json = r#"{
            "id": 7,
            "title": "Hello",
            "content": "<p>Hi</p>",
            "createdAt": "2024-05-01T10:00:00.000Z",
            "author": {"id": 1, "name": "Sam", "email": "sam@example.com"},
            "slug": "hello",
            "coverPhoto": "/img/hello.png",
            "tags": [{"id": 2, "name": "Rust", "slug": "rust"}],
            "comments": [
                {"id": 3, "username": "kim", "text": "Nice", "createdAt": "2024-05-02T08:00:00.000Z"}
            ]
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.created_at, "2024-05-01T10:00:00.000Z");
        assert_eq!(post.author.name, "Sam");
        assert_eq!(post.cover_photo, "/img/hello.png");
        assert_eq!(post.tags[0].slug, "rust");
        assert_eq!(post.comments[0].username, "kim");
    }

    #[test]
    fn test_deserialize_post_optional_fields() {
        let json = r#"{
            "id": 1,
            "title": "Bare",
            "content": "",
            "createdAt": "2024-01-01",
            "author": {"id": 1, "name": "Sam"},
            "slug": "bare"
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.cover_photo, "");
        assert!(post.tags.is_empty());
        assert!(post.comments.is_empty());
    }

    #[test]
    fn test_pagination_flags() {
        let json = r#"{"page": 2, "totalPages": 3, "totalItems": 15}"#;
        let pagination: Pagination = serde_json::from_str(json).unwrap();
        assert!(pagination.has_next());
        assert!(pagination.has_prev());

        let json = r#"{"page": 3, "totalPages": 3, "totalItems": 15, "hasNextPage": false}"#;
        let pagination: Pagination = serde_json::from_str(json).unwrap();
        assert!(!pagination.has_next());
    }

    #[test]
    fn test_deserialize_posts_page() {
        let json = r#"{
            "data": [],
            "pagination": {"page": 1, "totalPages": 0, "totalItems": 0}
        }"#;
        let page: PostsPage = serde_json::from_str(json).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total_items, 0);
        assert!(!page.pagination.has_prev());
    }

    #[test]
    fn test_deserialize_comments_page() {
        let json = r#"{
            "data": [
                {"id": 9, "username": "kim", "text": "Great read", "createdAt": "2024-05-02T08:00:00.000Z"}
            ],
            "pagination": {"page": 1, "totalPages": 4, "totalItems": 18}
        }"#;
        let page: CommentsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.data[0].text, "Great read");
        assert_eq!(page.pagination.total_pages, 4);
        assert!(page.pagination.has_next());
    }

    #[test]
    fn test_deserialize_tag_list() {
        let json = r#"{"data": [{"id": 1, "name": "Rust", "slug": "rust"}, {"id": 2, "name": "Web", "slug": "web"}]}"#;
        let list: DataList<Tag> = serde_json::from_str(json).unwrap();
        let slugs: Vec<_> = list.data.iter().map(|tag| tag.slug.as_str()).collect();
        assert_eq!(slugs, vec!["rust", "web"]);
    }

    #[test]
    fn test_deserialize_recent_posts_ignores_extra_fields() {
        let json = r#"{"data": [
            {"id": 3, "title": "Newest", "slug": "newest", "createdAt": "2024-06-01T00:00:00.000Z", "content": "<p>x</p>"},
            {"title": "Older", "slug": "older"}
        ]}"#;
        let list: DataList<PostSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(list.data[0].slug, "newest");
        assert_eq!(list.data[0].created_at.as_deref(), Some("2024-06-01T00:00:00.000Z"));
        assert_eq!(list.data[1].created_at, None);
    }
}
