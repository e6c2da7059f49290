use crate::db::models::Book;
use crate::db::schema::{MYSQL_INIT, SELECT_BOOKS, UPSERT_BOOK};
use futures::TryStreamExt;
use sqlx::{Connection, MySqlConnection};
use tracing::{debug, warn};

/// Owns the one connection used for the whole run.
pub struct BooksStorage {
    conn: MySqlConnection,
}

impl BooksStorage {
    pub fn new(conn: MySqlConnection) -> Self {
        Self { conn }
    }

    /// Create the `books` table if it does not exist yet.
    pub async fn init_schema(&mut self) -> Result<(), sqlx::Error> {
        sqlx::query(MYSQL_INIT).execute(&mut self.conn).await?;
        Ok(())
    }

    /// Insert or replace a single row by primary key.
    pub async fn upsert(&mut self, id: i32, title: &str) -> Result<(), sqlx::Error> {
        let result = sqlx::query(UPSERT_BOOK)
            .bind(id)
            .bind(title)
            .execute(&mut self.conn)
            .await?;
        debug!(id, rows_affected = result.rows_affected(), "upserted book");
        Ok(())
    }

    /// Stream every row, in whatever order the server returns them.
    pub async fn list(&mut self) -> Result<Vec<Book>, sqlx::Error> {
        let mut rows = sqlx::query_as::<_, Book>(SELECT_BOOKS).fetch(&mut self.conn);
        let mut books = Vec::new();
        while let Some(book) = rows.try_next().await? {
            books.push(book);
        }
        Ok(books)
    }

    /// Gracefully end the session. Failures are logged, not returned.
    pub async fn close(self) {
        if let Err(e) = self.conn.close().await {
            warn!(error = %e, "failed to close database connection cleanly");
        }
    }
}
