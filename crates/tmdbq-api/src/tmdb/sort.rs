//! Movie list sorting by field and direction.

use std::cmp::Ordering;

use anyhow::{Result, bail};
use chrono::NaiveDate;

use super::types::Movie;

/// Valid sort field tokens, in the order reported to the user.
const SORT_FIELDS: [&str; 5] = ["date", "otitle", "title", "average", "votes"];

/// Valid sort order tokens.
const SORT_ORDERS: [&str; 2] = ["asc", "desc"];

/// Sort field selector.
#[derive(Debug, Clone, Copy)]
enum SortField {
    /// Release date, calendar-aware; unparsable dates compare lowest.
    Date,
    /// Original title, lexicographic.
    OriginalTitle,
    /// Localized title, lexicographic.
    Title,
    /// Vote average, numeric.
    Average,
    /// Vote count, numeric.
    Votes,
}

impl SortField {
    fn parse(token: &str) -> Result<Self> {
        match token {
            "date" => Ok(Self::Date),
            "otitle" => Ok(Self::OriginalTitle),
            "title" => Ok(Self::Title),
            "average" => Ok(Self::Average),
            "votes" => Ok(Self::Votes),
            _ => bail!(
                "validation error: sort field parameter must be one of: {:?}",
                SORT_FIELDS
            ),
        }
    }

    fn compare(self, a: &Movie, b: &Movie) -> Ordering {
        match self {
            Self::Date => parse_date(&a.release_date).cmp(&parse_date(&b.release_date)),
            Self::OriginalTitle => a.original_title.cmp(&b.original_title),
            Self::Title => a.title.cmp(&b.title),
            Self::Average => a.vote_average.total_cmp(&b.vote_average),
            Self::Votes => a.vote_count.cmp(&b.vote_count),
        }
    }
}

/// `None` (unparsable) compares below every real date.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Sorts movies in place by a `"<field>,<order>"` spec.
///
/// The descending comparator is the reversal of the ascending one, not a
/// second implementation; ties keep the underlying sort's stable order.
///
/// # Errors
///
/// Returns a validation error for a malformed spec, an unknown field
/// (listing the valid fields), or an unknown order (listing `asc`/`desc`).
pub fn sort_by_field(movies: &mut [Movie], spec: &str) -> Result<()> {
    let spec = spec.trim_matches(|c| c == '"' || c == ',').trim();
    let parts: Vec<&str> = spec.split(',').collect();
    if parts.len() != 2 {
        bail!(r#"sort format: expected "field,order", e.g. "average,desc" or "date,asc""#);
    }
    let field = SortField::parse(parts.first().copied().unwrap_or_default())?;
    let order = parts.get(1).copied().unwrap_or_default();
    if !SORT_ORDERS.contains(&order) {
        bail!(
            "validation error: order parameter must be one of: {:?}",
            SORT_ORDERS
        );
    }
    let descending = order == "desc";
    movies.sort_by(|a, b| {
        let ordering = field.compare(a, b);
        if descending { ordering.reverse() } else { ordering }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    /// Three movies with pairwise-distinct values on every sortable field.
    fn sample() -> Vec<Movie> {
        vec![
            Movie {
                id: 1,
                original_title: String::from("L'Aube de l'Aventure"),
                release_date: String::from("2023-01-01"),
                title: String::from("Epic Journey Begins"),
                vote_average: 8.5,
                vote_count: 100,
            },
            Movie {
                id: 2,
                original_title: String::from("Rise of the Heroes"),
                release_date: String::from("2023-02-01"),
                title: String::from("Rise of the Heroes"),
                vote_average: 7.0,
                vote_count: 50,
            },
            Movie {
                id: 3,
                original_title: String::from("O Confronto Final"),
                release_date: String::from("2023-03-01"),
                title: String::from("Clash of Titans"),
                vote_average: 9.0,
                vote_count: 200,
            },
        ]
    }

    fn ids_after(spec: &str) -> Vec<u64> {
        let mut movies = sample();
        sort_by_field(&mut movies, spec).unwrap();
        movies.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_sort_by_each_field_both_orders() {
        // Arrange
        let cases = [
            ("date,asc", vec![1, 2, 3]),
            ("date,desc", vec![3, 2, 1]),
            ("otitle,asc", vec![1, 3, 2]),
            ("otitle,desc", vec![2, 3, 1]),
            ("title,asc", vec![3, 1, 2]),
            ("title,desc", vec![2, 1, 3]),
            ("average,asc", vec![2, 1, 3]),
            ("average,desc", vec![3, 1, 2]),
            ("votes,asc", vec![2, 1, 3]),
            ("votes,desc", vec![3, 1, 2]),
        ];

        for (spec, want) in cases {
            // Act & Assert
            assert_eq!(ids_after(spec), want, "spec: {spec}");
        }
    }

    #[test]
    fn test_descending_reverses_ascending() {
        // Arrange & Act
        let asc = ids_after("average,asc");
        let mut desc = ids_after("average,desc");

        // Assert: distinct averages, so desc is exactly asc reversed
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_unparsable_date_sorts_lowest() {
        // Arrange
        let mut movies = sample();
        movies.get_mut(2).unwrap().release_date = String::new();

        // Act
        sort_by_field(&mut movies, "date,asc").unwrap();

        // Assert: the dateless entry leads in ascending order
        assert_eq!(movies.first().unwrap().id, 3);
    }

    #[test]
    fn test_invalid_specs() {
        let cases = [
            "invalid,asc",  // unknown field
            "title,invalid", // unknown order
            "too,big,value",
            "toosmallvalue",
            "",
        ];
        for spec in cases {
            // Arrange
            let mut movies = sample();

            // Act & Assert
            assert!(sort_by_field(&mut movies, spec).is_err(), "spec: {spec}");
        }
    }

    #[test]
    fn test_unknown_field_lists_valid_fields() {
        // Arrange
        let mut movies = sample();

        // Act
        let err = sort_by_field(&mut movies, "invalid,asc")
            .unwrap_err()
            .to_string();

        // Assert
        for field in SORT_FIELDS {
            assert!(err.contains(field), "missing field in error: {field}");
        }
    }

    #[test]
    fn test_unknown_order_lists_valid_orders() {
        // Arrange
        let mut movies = sample();

        // Act
        let err = sort_by_field(&mut movies, "title,upward")
            .unwrap_err()
            .to_string();

        // Assert
        assert!(err.contains("asc"));
        assert!(err.contains("desc"));
    }
}
