use reqwest::StatusCode;
use thiserror::Error;

/// What the client was trying to do when a call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Search,
    LoadMovie,
    LoadWatchlist,
    LoadWatchedList,
    AddToWatchlist,
    RemoveFromWatchlist,
    Reorder,
    MoveToWatched,
    AddToWatched,
    UpdateReview,
    RemoveFromWatched,
    Export,
}

impl Action {
    /// Message shown to the user when this action fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Search => "Could not search for movies",
            Self::LoadMovie => "Could not load movie details",
            Self::LoadWatchlist => "Could not load your watch list",
            Self::LoadWatchedList => "Could not load your watched list",
            Self::AddToWatchlist => "Could not add movie to your watch list",
            Self::RemoveFromWatchlist => "Could not remove movie from your watch list",
            Self::Reorder => "Could not update your watch list order",
            Self::MoveToWatched => "Could not move movie to your watched list",
            Self::AddToWatched => "Could not add movie to your watched list",
            Self::UpdateReview => "Could not save your review",
            Self::RemoveFromWatched => "Could not remove movie from your watched list",
            Self::Export => "Could not export your lists",
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{}: {message}", .action.failure_message())]
    Server {
        action: Action,
        status: StatusCode,
        message: String,
    },

    /// The request never produced a usable response.
    #[error("{}: {source}", .action.failure_message())]
    Transport {
        action: Action,
        #[source]
        source: reqwest::Error,
    },

    /// Rejected locally before any request was sent.
    #[error("{}: {message}", .action.failure_message())]
    Invalid { action: Action, message: String },
}

impl ClientError {
    pub fn server(action: Action, status: StatusCode, message: impl Into<String>) -> Self {
        Self::Server {
            action,
            status,
            message: message.into(),
        }
    }

    pub fn invalid(action: Action, message: impl Into<String>) -> Self {
        Self::Invalid {
            action,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::Server { action, .. }
            | Self::Transport { action, .. }
            | Self::Invalid { action, .. } => *action,
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Invalid { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(StatusCode::NOT_FOUND))
    }
}
