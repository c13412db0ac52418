//! ShowFinder - Search a TV show directory and list a show's episodes
//!
//! This library provides a small search widget: it queries the TVMaze show
//! directory, paints result cards into a host page, and on demand lists the
//! episodes of a selected show.

pub mod config;
pub mod directory;
pub mod events;
pub mod markup;
pub mod page;
pub mod widget;

use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

// Re-export error types
pub use directory::DirectoryError;
pub use markup::MarkupError;
pub use page::PageError;
pub use widget::WidgetError;

// Re-export the types most callers need
pub use config::{DirectoryConfig, RenderPolicy, WidgetConfig};
pub use directory::{Episode, PLACEHOLDER_IMAGE_URL, Show, ShowDirectory, TvMazeDirectory};
pub use events::{SubmitEvent, UiEvent, dispatch};
pub use page::{CardView, Page, Visibility};
pub use widget::{Flow, RenderOutcome, ShowFinder, Ticket};

/// Progress event emitted while the widget flows run
///
/// These events allow library users to track progress and provide feedback
/// while requests are in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A search request is about to be sent
    SearchStarted { term: String },

    /// Search results were rendered
    ShowsFound { count: usize },

    /// An episode request for the show is about to be sent
    EpisodesRequested { show_id: u64 },

    /// The show's episodes were rendered
    EpisodesFound { show_id: u64, count: usize },

    /// A response was dropped because a newer request of its flow exists
    StaleResponseDiscarded { ticket: Ticket },
}

/// Top-level error type for ShowFinder operations
#[derive(Debug, Error)]
pub enum ShowFinderError {
    /// Error during a directory request
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Error while running a widget flow
    #[error("Widget error: {0}")]
    Widget(#[from] WidgetError),

    /// Error while rendering markup
    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Creates a widget backed by the TVMaze directory
///
/// # Examples
///
/// ```no_run
/// use show_finder::{DirectoryConfig, Page, WidgetConfig, open_finder};
///
/// let mut finder = open_finder(DirectoryConfig::default(), WidgetConfig::default()).unwrap();
/// let mut page = Page::new();
/// page.set_search_term("batman");
/// finder.submit_search(&mut page, |_| {}).unwrap();
///
/// for card in page.cards().unwrap() {
///     println!("{} ({})", card.name, card.show_id);
/// }
/// ```
pub fn open_finder(
    directory_config: DirectoryConfig,
    widget_config: WidgetConfig,
) -> Result<ShowFinder<TvMazeDirectory>, ShowFinderError> {
    let directory = TvMazeDirectory::with_config(directory_config)?;
    Ok(ShowFinder::with_config(directory, widget_config))
}

/// Writes the page as a standalone HTML document
pub fn export_document(page: &Page, path: &Path) -> Result<(), ShowFinderError> {
    let html = markup::render_document(page)?;
    fs::write(path, html)?;
    Ok(())
}
