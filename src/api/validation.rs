use super::ApiError;
use crate::domain::{ListScope, MovieId, REVIEW_MAX_CHARS, Review};

const MAX_EXTERNAL_ID_LEN: usize = 32;

pub fn validate_movie_id(id: i64) -> Result<MovieId, ApiError> {
    match i32::try_from(id) {
        Ok(id) if id > 0 => Ok(MovieId::new(id)),
        _ => Err(ApiError::validation("Invalid movie ID")),
    }
}

/// Parses a movie id taken from the path.
pub fn parse_movie_id(raw: &str) -> Result<MovieId, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::validation("Invalid movie ID"))
        .and_then(validate_movie_id)
}

/// Reads `movieIds` out of a reorder body. It must be an array of movie ids.
pub fn parse_movie_ids(body: &serde_json::Value) -> Result<Vec<MovieId>, ApiError> {
    let Some(ids) = body.get("movieIds").and_then(serde_json::Value::as_array) else {
        return Err(ApiError::validation("movieIds must be an array"));
    };

    ids.iter()
        .map(|v| {
            v.as_i64()
                .ok_or_else(|| ApiError::validation("Invalid movie ID"))
                .and_then(validate_movie_id)
        })
        .collect()
}

pub fn validate_external_id(id: &str) -> Result<&str, ApiError> {
    let trimmed = id.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_EXTERNAL_ID_LEN {
        return Err(ApiError::validation("Invalid movie ID"));
    }

    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::validation("Invalid movie ID"));
    }

    Ok(trimmed)
}

pub fn validate_search_query(query: Option<&str>) -> Result<&str, ApiError> {
    let trimmed = query.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Search query cannot be empty"));
    }
    Ok(trimmed)
}

pub fn validate_review(review: &str) -> Result<Review, ApiError> {
    Review::parse(review).map_err(|_| {
        ApiError::validation(format!(
            "Review must not exceed {REVIEW_MAX_CHARS} characters"
        ))
    })
}

pub fn validate_optional_review(review: Option<&str>) -> Result<Option<Review>, ApiError> {
    review.map(validate_review).transpose()
}

pub fn validate_position(position: i32) -> Result<i32, ApiError> {
    if position < 1 {
        return Err(ApiError::validation(format!(
            "Invalid position: {position}. Position must be a positive integer"
        )));
    }
    Ok(position)
}

pub fn parse_list_scope(raw: Option<&str>) -> Result<ListScope, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(ListScope::default()),
        Some(s) if s.eq_ignore_ascii_case("watched") => Ok(ListScope::Watched),
        Some(s) if s.eq_ignore_ascii_case("watchlist") => Ok(ListScope::Watchlist),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(ListScope::All),
        Some(s) => Err(ApiError::validation(format!(
            "Invalid list: {s}. Expected watched, watchlist or all"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_movie_id() {
        assert_eq!(parse_movie_id("7").unwrap(), MovieId::new(7));
        assert!(parse_movie_id("0").is_err());
        assert!(parse_movie_id("-3").is_err());
        assert!(parse_movie_id("abc").is_err());
        assert!(parse_movie_id("99999999999").is_err());
    }

    #[test]
    fn test_parse_movie_ids() {
        let ids = parse_movie_ids(&json!({"movieIds": [3, 1, 2]})).unwrap();
        assert_eq!(ids, vec![MovieId::new(3), MovieId::new(1), MovieId::new(2)]);

        let err = parse_movie_ids(&json!({"movieIds": "1,2"})).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: movieIds must be an array");

        assert!(parse_movie_ids(&json!({})).is_err());
        assert!(parse_movie_ids(&json!({"movieIds": [1, "x"]})).is_err());
        assert!(parse_movie_ids(&json!({"movieIds": []})).unwrap().is_empty());
    }

    #[test]
    fn test_validate_external_id() {
        assert_eq!(validate_external_id(" tt0133093 ").unwrap(), "tt0133093");
        assert!(validate_external_id("").is_err());
        assert!(validate_external_id("tt01/../x").is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query(Some("  heat  ")).unwrap(), "heat");
        assert!(validate_search_query(Some("   ")).is_err());
        assert!(validate_search_query(None).is_err());
    }

    #[test]
    fn test_validate_review() {
        assert!(validate_review(&"a".repeat(140)).is_ok());
        let err = validate_review(&"a".repeat(141)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Review must not exceed 140 characters"
        );
        assert_eq!(validate_optional_review(None).unwrap(), None);
    }

    #[test]
    fn test_parse_list_scope() {
        assert_eq!(parse_list_scope(None).unwrap(), ListScope::Watched);
        assert_eq!(parse_list_scope(Some("ALL")).unwrap(), ListScope::All);
        assert_eq!(
            parse_list_scope(Some("watchlist")).unwrap(),
            ListScope::Watchlist
        );
        assert!(parse_list_scope(Some("favourites")).is_err());
    }

    #[test]
    fn test_validate_position() {
        assert!(validate_position(1).is_ok());
        assert!(validate_position(0).is_err());
    }
}
