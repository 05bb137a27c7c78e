//! The `resumes` table: one row per processed upload, plus substring search.

use sqlx::SqlitePool;

use crate::models::StoredResume;

/// Creates the resumes table when absent. Runs once at startup.
pub async fn init_db(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS resumes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            filename TEXT NOT NULL,
            content TEXT NOT NULL,
            skills TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Inserts a processed resume and returns its row id.
/// No dedup at this layer: re-submitting a document adds another row.
pub async fn insert_resume(
    pool: &SqlitePool,
    filename: &str,
    content: &str,
    skills: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO resumes (filename, content, skills) VALUES (?, ?, ?)")
        .bind(filename)
        .bind(content)
        .bind(skills)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Case-sensitive substring search over extracted content and skills,
/// ordered by row id. Uses `instr` rather than LIKE: SQLite LIKE is
/// case-insensitive by default and would also need `%`/`_` escaping.
pub async fn search_resumes(
    pool: &SqlitePool,
    query: &str,
) -> Result<Vec<StoredResume>, sqlx::Error> {
    sqlx::query_as::<_, StoredResume>(
        "SELECT id, filename, content, skills FROM resumes \
         WHERE instr(content, ?1) > 0 OR instr(skills, ?1) > 0 \
         ORDER BY id",
    )
    .bind(query)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn test_pool() -> SqlitePool {
        // Single connection: each in-memory SQLite connection is its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_db(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_insert_returns_sequential_row_ids() {
        let pool = test_pool().await;
        let first = insert_resume(&pool, "a.pdf", "text a", "[]").await.unwrap();
        let second = insert_resume(&pool, "b.pdf", "text b", "[]").await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn test_search_matches_content_substring() {
        let pool = test_pool().await;
        insert_resume(&pool, "a.pdf", "Jane Doe, systems programmer", "[]")
            .await
            .unwrap();
        insert_resume(&pool, "b.pdf", "John Smith, accountant", "[]")
            .await
            .unwrap();

        let rows = search_resumes(&pool, "systems").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].filename, "a.pdf");
    }

    #[tokio::test]
    async fn test_search_matches_serialized_skills() {
        let pool = test_pool().await;
        insert_resume(&pool, "a.pdf", "resume text", r#"["Python","Flask"]"#)
            .await
            .unwrap();
        insert_resume(&pool, "b.pdf", "resume text", r#"["Rust"]"#)
            .await
            .unwrap();

        let rows = search_resumes(&pool, "Python").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].filename, "a.pdf");
    }

    #[tokio::test]
    async fn test_search_is_case_sensitive() {
        let pool = test_pool().await;
        insert_resume(&pool, "a.pdf", "resume text", r#"["Python"]"#)
            .await
            .unwrap();

        assert!(search_resumes(&pool, "python").await.unwrap().is_empty());
        assert_eq!(search_resumes(&pool, "Python").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_results_ordered_by_id() {
        let pool = test_pool().await;
        insert_resume(&pool, "first.pdf", "shared marker", "[]")
            .await
            .unwrap();
        insert_resume(&pool, "second.pdf", "shared marker", "[]")
            .await
            .unwrap();

        let rows = search_resumes(&pool, "shared marker").await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_search_without_match_is_empty_not_error() {
        let pool = test_pool().await;
        insert_resume(&pool, "a.pdf", "resume text", "[]").await.unwrap();

        assert!(search_resumes(&pool, "no such thing").await.unwrap().is_empty());
    }
}
