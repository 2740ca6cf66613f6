use sqlx::PgPool;

use crate::categories::Category;

pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
        .fetch_all(db)
        .await
}
