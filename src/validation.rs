//! Data-entry rules for new books and rating updates.
//!
//! Pure functions: nothing here touches the store. Checks run in a fixed
//! order (input shape, then duplicate title, then rating range) so the
//! reported error never depends on how existing titles are ordered.

use crate::error::{Error, Result};
use crate::model::{NewBook, rating_in_range};

/// Parse a raw rating field. Surrounding whitespace is ignored.
pub fn parse_rating(raw: Option<&str>) -> Result<f64> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(Error::InvalidInput("rating is required".to_string()));
    }
    match raw.parse::<f64>() {
        Ok(rating) if !rating.is_nan() => Ok(rating),
        _ => Err(Error::InvalidInput(format!("rating {raw:?} is not a number"))),
    }
}

/// Validate a proposed new book against the titles already in the store.
pub fn validate_new_book<'a, I>(
    title: Option<&str>,
    author: Option<&str>,
    rating: Option<&str>,
    existing_titles: I,
) -> Result<NewBook>
where
    I: IntoIterator<Item = &'a str>,
{
    let title = required_field("title", title)?;
    let author = required_field("author", author)?;
    let rating = parse_rating(rating)?;

    if existing_titles.into_iter().any(|existing| existing == title) {
        return Err(Error::DuplicateTitle(title.to_string()));
    }
    if !rating_in_range(rating) {
        return Err(Error::RatingOutOfRange(rating));
    }

    Ok(NewBook {
        title: title.to_string(),
        author: author.to_string(),
        rating,
    })
}

/// Validate a replacement rating for an existing book.
pub fn validate_rating_update(raw: Option<&str>) -> Result<f64> {
    let rating = parse_rating(raw)?;
    if !rating_in_range(rating) {
        return Err(Error::RatingOutOfRange(rating));
    }
    Ok(rating)
}

fn required_field<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::InvalidInput(format!("{name} is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn accepts_valid_book_and_trims_fields() {
        let book = validate_new_book(Some(" Dune "), Some("Frank Herbert"), Some("95"), NONE)
            .unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.rating, 95.0);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert_eq!(validate_rating_update(Some("0")).unwrap(), 0.0);
        assert_eq!(validate_rating_update(Some("100")).unwrap(), 100.0);
        assert_eq!(validate_rating_update(Some("42.5")).unwrap(), 42.5);
    }

    #[test]
    fn missing_or_blank_fields_are_invalid_input() {
        for (title, author, rating) in [
            (None, Some("a"), Some("1")),
            (Some(""), Some("a"), Some("1")),
            (Some("t"), None, Some("1")),
            (Some("t"), Some("   "), Some("1")),
            (Some("t"), Some("a"), None),
        ] {
            let err = validate_new_book(title, author, rating, NONE).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "got {err:?}");
        }
    }

    #[test]
    fn non_numeric_ratings_are_invalid_input() {
        for raw in ["abc", "9five", "NaN", ""] {
            assert!(matches!(
                validate_rating_update(Some(raw)),
                Err(Error::InvalidInput(_))
            ));
            assert!(matches!(
                validate_new_book(Some("t"), Some("a"), Some(raw), NONE),
                Err(Error::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn out_of_range_ratings_are_rejected() {
        for raw in ["-0.1", "100.01", "1e9", "-inf"] {
            assert!(matches!(
                validate_rating_update(Some(raw)),
                Err(Error::RatingOutOfRange(_))
            ));
            assert!(matches!(
                validate_new_book(Some("t"), Some("a"), Some(raw), NONE),
                Err(Error::RatingOutOfRange(_))
            ));
        }
    }

    #[test]
    fn duplicate_wins_over_range_regardless_of_order() {
        let orders: [&[&str]; 2] = [&["Dune", "Emma"], &["Emma", "Dune"]];
        for existing in orders {
            let err = validate_new_book(
                Some("Dune"),
                Some("Someone"),
                Some("500"),
                existing.iter().copied(),
            )
            .unwrap_err();
            assert!(matches!(err, Error::DuplicateTitle(ref t) if t == "Dune"));
        }
    }

    #[test]
    fn out_of_range_is_reported_even_with_unrelated_titles() {
        let err = validate_new_book(Some("New"), Some("a"), Some("101"), ["Dune"]).unwrap_err();
        assert!(matches!(err, Error::RatingOutOfRange(r) if r == 101.0));
    }
}
