use anyhow::Result;
use shared::{Category, Vote};
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:votes.db";

/// DbConnection manages the shared vote list held in SQLite
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // The unique key over the vote tuple is what suppresses duplicate
        // writes: a repeated POST for the same (participant, attraction,
        // category) becomes a no-op instead of a second row.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS votes (
                participant TEXT NOT NULL,
                attraction_id TEXT NOT NULL,
                category TEXT NOT NULL,
                UNIQUE(participant, attraction_id, category)
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Insert a vote. Returns false when the identical vote already existed
    /// and the write was suppressed.
    pub async fn insert_vote(&self, vote: &Vote) -> Result<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO votes (participant, attraction_id, category) VALUES (?, ?, ?)",
        )
        .bind(&vote.participant)
        .bind(&vote.attraction_id)
        .bind(vote.category.as_str())
        .execute(&*self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a vote by its full tuple. Returns true if a row was removed.
    pub async fn delete_vote(&self, vote: &Vote) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM votes WHERE participant = ? AND attraction_id = ? AND category = ?",
        )
        .bind(&vote.participant)
        .bind(&vote.attraction_id)
        .bind(vote.category.as_str())
        .execute(&*self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List every stored vote in insertion order
    pub async fn list_votes(&self) -> Result<Vec<Vote>> {
        let rows = sqlx::query("SELECT participant, attraction_id, category FROM votes ORDER BY rowid")
            .fetch_all(&*self.pool)
            .await?;

        let mut votes = Vec::with_capacity(rows.len());
        for row in rows {
            let category_text: String = row.get("category");
            let category = Category::parse(&category_text)
                .ok_or_else(|| anyhow::anyhow!("unknown category in votes table: {}", category_text))?;
            votes.push(Vote {
                participant: row.get("participant"),
                attraction_id: row.get("attraction_id"),
                category,
            });
        }
        Ok(votes)
    }
}
