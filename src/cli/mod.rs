//! CLI module - Command-line interface for cinema
//!
//! `serve` and `init` work locally. Every other command talks to a running
//! server through the list cache.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::ListScope;

/// cinema - keep track of the movies you want to watch
#[derive(Parser)]
#[command(name = "cinema")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    Init,

    /// Search for movies by title
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Show details for a movie
    #[command(alias = "i")]
    Show {
        /// IMDb id, e.g. tt0133093
        imdb_id: String,
    },

    /// Add a movie to the watch list
    #[command(alias = "a")]
    Add {
        /// IMDb id, e.g. tt0133093
        imdb_id: String,
    },

    /// Show the watch list in order
    #[command(alias = "ls", alias = "l")]
    List,

    /// Show the watched list
    Watched,

    /// Move a watch list entry from one position to another
    Reorder {
        /// Current position (1-based)
        from: i32,
        /// New position (1-based)
        to: i32,
    },

    /// Mark a watch list movie as watched
    Watch {
        /// Movie ID
        movie_id: i32,
        /// Optional review (up to 140 characters)
        #[arg(long)]
        review: Option<String>,
    },

    /// Write or replace the review of a watched movie
    Review {
        /// Movie ID
        movie_id: i32,
        /// Review text (up to 140 characters)
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Remove a movie from the watch list
    #[command(alias = "rm", alias = "r")]
    Remove {
        /// Movie ID
        movie_id: i32,
        /// Remove from the watched list instead
        #[arg(long)]
        watched: bool,
    },

    /// Export lists as CSV
    Export {
        /// Which list to export
        #[arg(long, value_enum, default_value_t = ListArg::Watched)]
        list: ListArg,
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListArg {
    Watchlist,
    Watched,
    All,
}

impl From<ListArg> for ListScope {
    fn from(arg: ListArg) -> Self {
        match arg {
            ListArg::Watchlist => Self::Watchlist,
            ListArg::Watched => Self::Watched,
            ListArg::All => Self::All,
        }
    }
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_watch_with_review() {
        let cli = Cli::try_parse_from(["cinema", "watch", "3", "--review", "great"]).unwrap();
        match cli.command {
            Some(Commands::Watch { movie_id, review }) => {
                assert_eq!(movie_id, 3);
                assert_eq!(review.as_deref(), Some("great"));
            }
            _ => panic!("expected watch command"),
        }
    }

    #[test]
    fn export_defaults_to_watched() {
        let cli = Cli::try_parse_from(["cinema", "export"]).unwrap();
        match cli.command {
            Some(Commands::Export { list, output }) => {
                assert_eq!(ListScope::from(list), ListScope::Watched);
                assert!(output.is_none());
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn remove_watched_flag() {
        let cli = Cli::try_parse_from(["cinema", "rm", "7", "--watched"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Remove {
                movie_id: 7,
                watched: true
            })
        ));
    }
}
