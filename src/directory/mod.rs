/// Data structures and traits for TV show directory lookups.
///
/// This module provides the `Show` and `Episode` records surfaced by a show
/// directory, as well as the `ShowDirectory` trait implemented by directory
/// clients.
mod tvmaze;
mod tvmaze_types;

pub use tvmaze::TvMazeDirectory;

use std::fmt;
use thiserror::Error;

/// Image shown on cards for shows the directory has no artwork for.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://tinyurl.com/missing-tv";

/// Errors that can occur during directory requests.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The request could not be completed (transport error, timeout or
    /// non-success status)
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The response body was not the expected JSON document
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// A television series as surfaced by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    /// Directory identifier of the show
    pub id: u64,
    /// Display name
    pub name: String,
    /// Summary as delivered by the directory (may contain HTML)
    pub summary: String,
    /// URL of the medium sized poster, or the placeholder image
    pub image: String,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    /// Directory identifier of the episode
    pub id: u64,
    /// Episode title
    pub name: String,
    /// Season number this episode belongs to
    pub season: u32,
    /// Episode number within the season, `None` for specials
    pub number: Option<u32>,
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(number) => write!(
                f,
                "{} (season {}, episode {})",
                self.name, self.season, number
            ),
            None => write!(f, "{} (season {}, special)", self.name, self.season),
        }
    }
}

/// Trait for show directories that can be searched and queried for episodes.
///
/// Implementors of this trait fetch their records from a remote service such
/// as TVMaze. Requests are never retried; failures are reported to the caller.
pub trait ShowDirectory {
    /// Searches the directory for shows matching a free-text term.
    ///
    /// # Arguments
    ///
    /// * `term` - The search term, passed through to the directory unchanged
    ///
    /// # Returns
    ///
    /// The matching shows in the order the directory ranked them
    fn search_shows(&self, term: &str) -> Result<Vec<Show>, DirectoryError>;

    /// Fetches the episode list of a show.
    ///
    /// # Arguments
    ///
    /// * `show_id` - The directory identifier of the show
    fn get_episodes(&self, show_id: u64) -> Result<Vec<Episode>, DirectoryError>;
}
