//! CSV export of a user's lists.

use crate::domain::{ListScope, UserId};
use crate::models::list::{WatchedItem, WatchlistItem};
use thiserror::Error;

/// Suggested download name for exports.
pub const EXPORT_FILENAME: &str = "movie-watch-list.csv";

pub const CSV_HEADER: [&str; 7] = [
    "title",
    "year",
    "director",
    "list",
    "order",
    "watchedDate",
    "review",
];

const WATCHLIST_LABEL: &str = "Watch List";
const WATCHED_LABEL: &str = "Watched";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<anyhow::Error> for ExportError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait ExportService: Send + Sync {
    /// Renders the selected lists as CSV text, header first.
    async fn export_csv(&self, user: UserId, scope: ListScope) -> Result<String, ExportError>;
}

/// Calendar date part of a stored timestamp.
fn export_date(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp).map_or_else(
        |_| timestamp.chars().take(10).collect(),
        |dt| dt.date_naive().format("%Y-%m-%d").to_string(),
    )
}

/// Writes watchlist rows (in list order) followed by watched rows.
///
/// Unset fields are written as empty strings.
pub fn render_csv(
    watchlist: &[WatchlistItem],
    watched: &[WatchedItem],
) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for item in watchlist {
        let order = item.order.to_string();
        writer.write_record([
            item.movie.title.as_str(),
            item.movie.year.as_str(),
            item.movie.director.as_str(),
            WATCHLIST_LABEL,
            order.as_str(),
            "",
            "",
        ])?;
    }

    for item in watched {
        let date = export_date(&item.watched_date);
        writer.write_record([
            item.movie.title.as_str(),
            item.movie.year.as_str(),
            item.movie.director.as_str(),
            WATCHED_LABEL,
            "",
            date.as_str(),
            item.review.as_deref().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Csv(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movie::Movie;

    fn movie(id: i32, title: &str) -> Movie {
        Movie {
            id,
            imdb_id: format!("tt{id:07}"),
            title: title.to_string(),
            year: "1999".to_string(),
            director: "Lana Wachowski, Lilly Wachowski".to_string(),
            poster: String::new(),
            plot: String::new(),
            runtime: None,
            genre: None,
            actors: None,
        }
    }

    #[test]
    fn header_only_when_empty() {
        let csv = render_csv(&[], &[]).unwrap();
        assert_eq!(csv, "title,year,director,list,order,watchedDate,review\n");
    }

    #[test]
    fn watched_row_uses_empty_strings_for_unset_fields() {
        let watched = vec![WatchedItem {
            movie: movie(1, "The Matrix"),
            watched_date: "2024-03-05T10:00:00.000000Z".to_string(),
            review: None,
            rating: None,
        }];

        let csv = render_csv(&[], &watched).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "The Matrix,1999,\"Lana Wachowski, Lilly Wachowski\",Watched,,2024-03-05,"
        );
        assert!(!csv.contains("null"));
    }

    #[test]
    fn watchlist_rows_come_first_with_order() {
        let watchlist = vec![WatchlistItem {
            movie: movie(2, "Heat"),
            order: 1,
            added_at: "2024-01-01T00:00:00Z".to_string(),
        }];
        let watched = vec![WatchedItem {
            movie: movie(1, "Alien"),
            watched_date: "2024-02-02T00:00:00Z".to_string(),
            review: Some("tense, \"great\"".to_string()),
            rating: Some(9),
        }];

        let csv = render_csv(&watchlist, &watched).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Heat,1999,"));
        assert!(lines[1].ends_with(",Watch List,1,,"));
        assert!(lines[2].ends_with(",Watched,,2024-02-02,\"tense, \"\"great\"\"\""));
    }

    #[test]
    fn export_date_falls_back_to_prefix() {
        assert_eq!(export_date("2024-03-05T23:59:59+00:00"), "2024-03-05");
        assert_eq!(export_date("2024-03-05 garbage"), "2024-03-05");
    }
}
