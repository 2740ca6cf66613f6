use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::posts::repo_types::PostRow;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub category_ids: Vec<i64>,
}

/// Partial update. `category_ids` omitted leaves the association set
/// unchanged; present replaces the whole set, so `[]` clears it.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub published: Option<bool>,
    pub category_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize)]
pub struct AuthorSummary {
    pub id: i64,
    pub name: String,
    pub profile_image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PostCounts {
    pub comments: i64,
    pub likes: i64,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub published: bool,
    pub location: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub author: AuthorSummary,
    pub categories: Vec<CategorySummary>,
    pub counts: PostCounts,
}

impl PostResponse {
    pub fn from_row(row: PostRow, categories: Vec<CategorySummary>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            image_url: row.image_url,
            published: row.published,
            location: row.location,
            created_at: row.created_at,
            updated_at: row.updated_at,
            author: AuthorSummary {
                id: row.author_id,
                name: row.author_name,
                profile_image: row.author_profile_image,
            },
            categories,
            counts: PostCounts {
                comments: row.comment_count,
                likes: row.like_count,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub category_id: Option<i64>,
}

fn default_page() -> i64 {
    1
}
fn default_limit() -> i64 {
    10
}

#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

impl PageMeta {
    pub fn new(total_items: i64, page: i64, limit: i64) -> Self {
        Self {
            current_page: page,
            total_pages: (total_items + limit - 1) / limit,
            total_items,
            items_per_page: limit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_meta_rounds_total_pages_up() {
        let meta = PageMeta::new(25, 2, 10);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.total_items, 25);
        assert_eq!(meta.items_per_page, 10);
    }

    #[test]
    fn page_meta_exact_multiple() {
        assert_eq!(PageMeta::new(30, 1, 10).total_pages, 3);
    }

    #[test]
    fn page_meta_empty_result() {
        assert_eq!(PageMeta::new(0, 1, 10).total_pages, 0);
    }

    #[test]
    fn list_query_defaults() {
        let q: ListPostsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 10);
        assert!(q.category_id.is_none());
    }
}
