//! Server-side HTML views.
//!
//! Pages are minijinja templates from `templates/`, compiled into the binary.
//! Templates ending in `.html` are autoescaped; text bound for a URL path goes
//! through the `path_segment` filter.

use std::sync::LazyLock;

use minijinja::{Environment, context};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::catalog::EditForm;
use crate::error::Result;
use crate::model::{Book, MAX_RATING, MIN_RATING};

/// Everything outside the RFC 3986 unreserved set is encoded, `/` included.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

static VIEWS: LazyLock<Environment<'static>> = LazyLock::new(environment);

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_loader(|name| Ok(template_source(name).map(str::to_string)));
    env.add_filter("rating", format_rating);
    env.add_filter("path_segment", encode_segment);
    env.add_global("min_rating", MIN_RATING);
    env.add_global("max_rating", MAX_RATING);
    env
}

fn template_source(name: &str) -> Option<&'static str> {
    match name {
        "base.html" => Some(include_str!("../../templates/base.html")),
        "index.html" => Some(include_str!("../../templates/index.html")),
        "add.html" => Some(include_str!("../../templates/add.html")),
        "edit.html" => Some(include_str!("../../templates/edit.html")),
        _ => None,
    }
}

/// The home page: every book with edit and delete links.
pub fn index_page(books: &[Book]) -> Result<String> {
    let page = VIEWS
        .get_template("index.html")?
        .render(context! { books => books })?;
    Ok(page)
}

/// The form for adding a new book.
pub fn add_page() -> Result<String> {
    Ok(VIEWS.get_template("add.html")?.render(context! {})?)
}

/// The form for changing one book's rating.
pub fn edit_page(form: &EditForm) -> Result<String> {
    Ok(VIEWS.get_template("edit.html")?.render(form)?)
}

/// Ratings print without a trailing ".0" when whole.
pub fn format_rating(rating: f64) -> String {
    if rating.fract() == 0.0 {
        format!("{rating:.0}")
    } else {
        rating.to_string()
    }
}

/// Percent-encode text for use as a single URL path segment.
pub fn encode_segment(text: &str) -> String {
    utf8_percent_encode(text, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookId;

    fn book(title: &str, author: &str, rating: f64) -> Book {
        Book {
            id: BookId(1),
            title: title.to_string(),
            author: author.to_string(),
            rating,
        }
    }

    fn edit_form(book_id: Option<BookId>) -> EditForm {
        EditForm {
            author: "Frank Herbert".to_string(),
            rating: "95".to_string(),
            title: "Dune".to_string(),
            book_id,
            books: vec![book("Dune", "Frank Herbert", 95.0)],
        }
    }

    #[test]
    fn autoescapes_user_text() {
        let page = index_page(&[book("<b>Tom & Jerry</b>", "\"Q\"", 5.0)]).unwrap();
        assert!(!page.contains("<b>"));
        assert!(page.contains("&lt;b&gt;Tom &amp; Jerry&lt;"));
        assert!(page.contains("&quot;Q&quot;"));
    }

    #[test]
    fn encodes_path_segments() {
        assert_eq!(encode_segment("Frank Herbert"), "Frank%20Herbert");
        assert_eq!(encode_segment("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(encode_segment("é"), "%C3%A9");
        assert_eq!(encode_segment("A-z_0.~"), "A-z_0.~");
    }

    #[test]
    fn index_links_use_encoded_segments() {
        let page = index_page(&[book("Dune", "Frank Herbert", 95.0)]).unwrap();
        assert!(page.contains("Dune - Frank Herbert - 95/100"));
        assert!(page.contains("href=\"/edit/Frank%20Herbert/95/Dune\""));
        assert!(page.contains("href=\"/delete/Frank%20Herbert/Dune\""));
    }

    #[test]
    fn empty_index_says_so() {
        assert!(index_page(&[]).unwrap().contains("Library is empty."));
    }

    #[test]
    fn add_page_carries_rating_bounds() {
        let page = add_page().unwrap();
        assert!(page.contains("name=\"book_rating\""));
        assert!(page.contains("min=\"0\" max=\"100\""));
        assert!(page.contains("<title>Add Book</title>"));
    }

    #[test]
    fn edit_page_embeds_book_id_only_when_known() {
        let page = edit_page(&edit_form(Some(BookId(7)))).unwrap();
        assert!(page.contains("name=\"book_id\" type=\"hidden\" value=\"7\""));
        assert!(page.contains("Book Name: Dune"));
        assert!(page.contains("<li>Dune - Frank Herbert - 95/100</li>"));

        let page = edit_page(&edit_form(None)).unwrap();
        assert!(!page.contains("book_id"));
    }

    #[test]
    fn whole_ratings_drop_the_fraction() {
        assert_eq!(format_rating(88.0), "88");
        assert_eq!(format_rating(88.5), "88.5");
    }
}
