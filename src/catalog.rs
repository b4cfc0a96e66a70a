//! Catalog operations: add, list, edit rating, delete.
//!
//! Combines validation, the pending-edit queue and the record store. Nothing
//! in here knows about HTTP; the web layer is a thin adapter over [`Catalog`].

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{Instrument as _, debug, info};

use crate::db::Db;
use crate::error::{Error, Result};
use crate::model::{Book, BookId};
use crate::pending::PendingEdits;
use crate::telemetry::book as book_telemetry;
use crate::validation::{validate_new_book, validate_rating_update};

/// Everything the edit view needs to pre-fill its form.
#[derive(Debug, Clone, Serialize)]
pub struct EditForm {
    pub author: String,
    /// Rating as it arrived in the request. Display only.
    pub rating: String,
    pub title: String,
    /// ID of the stored book with this title, if there is one.
    pub book_id: Option<BookId>,
    pub books: Vec<Book>,
}

/// Explicit handle to the store and the pending-edit queue.
pub struct Catalog {
    db: Arc<Db>,
    pending: PendingEdits,
}

impl Catalog {
    pub fn new(db: Arc<Db>) -> Self {
        Self {
            db,
            pending: PendingEdits::new(),
        }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn pending(&self) -> &PendingEdits {
        &self.pending
    }

    /// All stored books, oldest first.
    pub async fn list_books(&self) -> Result<Vec<Book>> {
        observe("list", None, self.db.list_books()).await
    }

    /// Validate and store a new book.
    ///
    /// Fails without touching the store on invalid input, a duplicate title,
    /// or an out-of-range rating.
    pub async fn add_book(
        &self,
        title: Option<&str>,
        author: Option<&str>,
        rating: Option<&str>,
    ) -> Result<Book> {
        observe("add", title, async {
            let titles = self.db.list_titles().await?;
            let new = validate_new_book(title, author, rating, titles.iter().map(String::as_str))?;
            let book = self.db.insert_book(&new).await?;
            info!(id = %book.id, title = %book.title, "book added");
            Ok::<_, Error>(book)
        })
        .await
    }

    /// First half of a rating edit: remember which title is being edited.
    ///
    /// `author` and `rating` are echoed back into the form and not checked.
    pub async fn select_edit(&self, author: &str, rating: &str, title: &str) -> Result<EditForm> {
        observe("edit_select", Some(title), async {
            let book_id = self.db.find_book_by_title(title).await?.map(|b| b.id);
            let books = self.db.list_books().await?;
            self.pending.enqueue(title);
            debug!(pending = self.pending.len(), "edit queued");
            Ok::<_, Error>(EditForm {
                author: author.to_string(),
                rating: rating.to_string(),
                title: title.to_string(),
                book_id,
                books,
            })
        })
        .await
    }

    /// Second half of a rating edit: apply the new rating.
    ///
    /// With a `book_id` the book is targeted directly. Without one, the front
    /// of the pending queue names the book. The queued title is consumed once
    /// the edit is resolved: applied, or its book confirmed missing. An invalid
    /// rating or a store failure leaves the queue untouched.
    pub async fn commit_edit(
        &self,
        raw_rating: Option<&str>,
        book_id: Option<BookId>,
    ) -> Result<Book> {
        observe("edit_commit", None, async {
            let rating = validate_rating_update(raw_rating)?;

            let book = match book_id {
                Some(id) => self
                    .db
                    .get_book(id)
                    .await?
                    .ok_or_else(|| Error::NotFound(format!("no book with id {id}")))?,
                None => {
                    let title = self
                        .pending
                        .front()
                        .ok_or_else(|| Error::NotFound("no edit pending".to_string()))?;
                    match self.db.find_book_by_title(&title).await? {
                        Some(book) => book,
                        None => {
                            self.pending.remove(&title);
                            return Err(Error::NotFound(title));
                        }
                    }
                }
            };

            let updated = self.db.update_rating(book.id, rating).await?;
            self.pending.remove(&book.title);
            if !updated {
                return Err(Error::NotFound(book.title));
            }

            info!(
                id = %book.id,
                title = %book.title,
                from = book.rating,
                to = rating,
                "rating updated"
            );
            Ok::<_, Error>(Book { rating, ..book })
        })
        .await
    }

    /// Delete the book matching both author and title.
    ///
    /// Deleting a book that does not exist is not an error; the returned
    /// count is 0.
    pub async fn delete_book(&self, author: &str, title: &str) -> Result<u64> {
        observe("delete", Some(title), async {
            let removed = self.db.delete_book(author, title).await?;
            if removed == 0 {
                debug!(author, title, "delete matched nothing");
            } else {
                info!(author, title, "book deleted");
            }
            Ok::<_, Error>(removed)
        })
        .await
    }
}

/// Run one operation inside its span and record the outcome.
async fn observe<T, F>(operation: &'static str, title: Option<&str>, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let span = book_telemetry::start_book_span(operation, title);
    let started = Instant::now();
    let result = fut.instrument(span.clone()).await;
    book_telemetry::record_outcome(&span, operation, started, &result);
    result
}
