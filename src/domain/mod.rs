//! Domain types for the watchlist with strong typing.
//!
//! Newtype identifiers keep movie ids and user ids from being mixed up, and
//! [`Review`] carries the review length rule so that every path that stores a
//! review goes through the same check.

pub mod ordering;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum review length, counted in characters rather than bytes.
pub const REVIEW_MAX_CHARS: usize = 140;

/// Accepted watched-list rating values.
pub const RATING_RANGE: std::ops::RangeInclusive<i32> = 1..=10;

/// Username of the seeded single user.
pub const DEFAULT_USERNAME: &str = "shared";

/// Internal (surrogate) identifier of a stored movie.
///
/// This is the numeric id the list endpoints take, not the provider's
/// external id.
///
/// # Examples
///
/// ```rust
/// use cinema::domain::MovieId;
///
/// let id = MovieId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MovieId(i32);

impl MovieId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MovieId> for i32 {
    fn from(id: MovieId) -> Self {
        id.0
    }
}

impl From<i32> for MovieId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for MovieId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// Owner of list entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// The seeded user every request runs as while authentication is stubbed.
    pub const DEFAULT: Self = Self(1);

    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("Review must not exceed {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// A watched-list review of at most [`REVIEW_MAX_CHARS`] characters.
///
/// # Examples
///
/// ```rust
/// use cinema::domain::Review;
///
/// assert!(Review::parse("great").is_ok());
/// assert!(Review::parse(&"x".repeat(141)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Review(String);

impl Review {
    pub fn parse(text: &str) -> Result<Self, ReviewError> {
        let actual = text.chars().count();
        if actual > REVIEW_MAX_CHARS {
            return Err(ReviewError::TooLong {
                max: REVIEW_MAX_CHARS,
                actual,
            });
        }
        Ok(Self(text.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Review {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Which of a user's lists an operation or export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListScope {
    Watchlist,
    #[default]
    Watched,
    All,
}

impl ListScope {
    #[must_use]
    pub const fn includes_watchlist(&self) -> bool {
        matches!(self, Self::Watchlist | Self::All)
    }

    #[must_use]
    pub const fn includes_watched(&self) -> bool {
        matches!(self, Self::Watched | Self::All)
    }
}
