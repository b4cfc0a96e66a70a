//! Book record operations via direct SQLx.
//!
//! Each method is a single statement, so SQLite applies it atomically.
//! Nothing here validates input; callers go through the catalog.

use crate::error::{Error, Result};
use crate::model::{Book, BookId, NewBook};

impl super::Db {
    /// All books, oldest first.
    pub async fn list_books(&self) -> Result<Vec<Book>> {
        let rows: Vec<BookRow> =
            sqlx::query_as("SELECT id, title, author, rating FROM books ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    /// Every stored title, in no particular order.
    pub async fn list_titles(&self) -> Result<Vec<String>> {
        let titles = sqlx::query_scalar("SELECT title FROM books")
            .fetch_all(&self.pool)
            .await?;
        Ok(titles)
    }

    /// Insert a validated book. Returns the stored record with its new ID.
    ///
    /// A title that slipped past validation (e.g. two concurrent adds) still
    /// hits the UNIQUE constraint and is reported as [`Error::DuplicateTitle`].
    pub async fn insert_book(&self, new: &NewBook) -> Result<Book> {
        let row: BookRow = sqlx::query_as(
            "INSERT INTO books (title, author, rating) VALUES (?, ?, ?)
             RETURNING id, title, author, rating",
        )
        .bind(&new.title)
        .bind(&new.author)
        .bind(new.rating)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                Error::DuplicateTitle(new.title.clone())
            }
            other => Error::Database(other),
        })?;
        Ok(row.into())
    }

    /// Get a book by ID.
    pub async fn get_book(&self, id: BookId) -> Result<Option<Book>> {
        let row: Option<BookRow> =
            sqlx::query_as("SELECT id, title, author, rating FROM books WHERE id = ?")
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Book::from))
    }

    /// Get a book by its (unique) title.
    pub async fn find_book_by_title(&self, title: &str) -> Result<Option<Book>> {
        let row: Option<BookRow> =
            sqlx::query_as("SELECT id, title, author, rating FROM books WHERE title = ?")
                .bind(title)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Book::from))
    }

    /// Set a book's rating. Returns false if no book has that ID.
    pub async fn update_rating(&self, id: BookId, rating: f64) -> Result<bool> {
        let rows_affected = sqlx::query("UPDATE books SET rating = ? WHERE id = ?")
            .bind(rating)
            .bind(id.0)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows_affected > 0)
    }

    /// Delete the book matching both author and title exactly.
    /// Returns the number of rows removed (0 or 1).
    pub async fn delete_book(&self, author: &str, title: &str) -> Result<u64> {
        let rows_affected = sqlx::query("DELETE FROM books WHERE author = ? AND title = ?")
            .bind(author)
            .bind(title)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows_affected)
    }
}

/// Internal row type for sqlx::FromRow.
#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    rating: f64,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: BookId(row.id),
            title: row.title,
            author: row.author,
            rating: row.rating,
        }
    }
}
