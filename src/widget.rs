//! Show search widget
//!
//! The widget owns a show directory and drives the two user flows against a
//! host `Page`: submitting a search and opening a show's episode list. Each
//! flow is split into a begin step, which issues a ticket, and a finish step,
//! which renders a response. Overlapping requests of one flow can therefore
//! finish in any order; the configured `RenderPolicy` decides whether a
//! superseded response is still rendered.

use crate::ProgressEvent;
use crate::config::{RenderPolicy, WidgetConfig};
use crate::directory::{DirectoryError, Episode, Show, ShowDirectory};
use crate::markup::{MarkupError, render_episode_item, render_show_card};
use crate::page::{Page, PageError};
use log::{debug, warn};
use thiserror::Error;

/// Errors that can occur while running a widget flow
#[derive(Debug, Error)]
pub enum WidgetError {
    /// The directory request failed
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Markup could not be rendered
    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),

    /// The page could not be queried
    #[error("Page error: {0}")]
    Page(#[from] PageError),
}

/// The two user-triggered flows of the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Search,
    Episodes,
}

/// Identifies one request within a flow
///
/// Sequence numbers increase monotonically per flow, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub flow: Flow,
    pub sequence: u64,
}

/// What a finish step did to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The response was rendered with this many entries
    Rendered { count: usize },
    /// The response was superseded and left the page untouched
    Discarded,
}

/// The show search widget
pub struct ShowFinder<D: ShowDirectory> {
    directory: D,
    config: WidgetConfig,
    latest_search: u64,
    latest_episodes: u64,
}

impl<D: ShowDirectory> ShowFinder<D> {
    /// Creates a widget with the default configuration
    pub fn new(directory: D) -> Self {
        Self::with_config(directory, WidgetConfig::default())
    }

    /// Creates a widget with a custom configuration
    pub fn with_config(directory: D, config: WidgetConfig) -> Self {
        Self {
            directory,
            config,
            latest_search: 0,
            latest_episodes: 0,
        }
    }

    /// The directory the widget queries
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Handles a search form submission
    ///
    /// Reads the term from the page's search input, searches the directory,
    /// hides the episode panel and replaces the result cards. If the request
    /// fails the page is left unchanged and the error is returned.
    pub fn submit_search<F>(
        &mut self,
        page: &mut Page,
        mut progress_callback: F,
    ) -> Result<RenderOutcome, WidgetError>
    where
        F: FnMut(ProgressEvent),
    {
        let term = page.search_term().to_string();
        progress_callback(ProgressEvent::SearchStarted { term: term.clone() });

        let ticket = self.begin_search();
        let shows = self.directory.search_shows(&term).inspect_err(|e| {
            warn!("Search for '{}' failed: {}", term, e);
        })?;

        self.finish_search(page, ticket, &shows, progress_callback)
    }

    /// Handles a click on the `trigger`-th "Episodes" button of the results
    ///
    /// Resolves the enclosing card's show id, fetches the episodes, replaces
    /// the episode list and reveals the episode panel. If the card cannot be
    /// resolved or the request fails the page is left unchanged.
    pub fn click_episodes<F>(
        &mut self,
        page: &mut Page,
        trigger: usize,
        mut progress_callback: F,
    ) -> Result<RenderOutcome, WidgetError>
    where
        F: FnMut(ProgressEvent),
    {
        let show_id = page.show_id_for_trigger(trigger)?;
        progress_callback(ProgressEvent::EpisodesRequested { show_id });

        let ticket = self.begin_episodes();
        let episodes = self.directory.get_episodes(show_id).inspect_err(|e| {
            warn!("Fetching episodes of show {} failed: {}", show_id, e);
        })?;

        self.finish_episodes(page, ticket, show_id, &episodes, progress_callback)
    }

    /// Issues the ticket for a new search request
    pub fn begin_search(&mut self) -> Ticket {
        self.latest_search += 1;
        Ticket {
            flow: Flow::Search,
            sequence: self.latest_search,
        }
    }

    /// Issues the ticket for a new episode request
    pub fn begin_episodes(&mut self) -> Ticket {
        self.latest_episodes += 1;
        Ticket {
            flow: Flow::Episodes,
            sequence: self.latest_episodes,
        }
    }

    /// Renders a search response
    ///
    /// All cards are rendered before the page is touched, so a rendering
    /// failure leaves the page as it was.
    pub fn finish_search<F>(
        &self,
        page: &mut Page,
        ticket: Ticket,
        shows: &[Show],
        mut progress_callback: F,
    ) -> Result<RenderOutcome, WidgetError>
    where
        F: FnMut(ProgressEvent),
    {
        if self.is_stale(ticket) {
            progress_callback(ProgressEvent::StaleResponseDiscarded { ticket });
            return Ok(RenderOutcome::Discarded);
        }

        let cards = shows
            .iter()
            .map(render_show_card)
            .collect::<Result<Vec<_>, _>>()?;

        page.hide_episodes_area();
        let results = page.results_mut();
        results.empty();
        for card in cards {
            results.append(card);
        }

        debug!("Rendered {} show card(s) for {:?}", shows.len(), ticket);
        progress_callback(ProgressEvent::ShowsFound { count: shows.len() });

        Ok(RenderOutcome::Rendered { count: shows.len() })
    }

    /// Renders an episode response and reveals the episode panel
    pub fn finish_episodes<F>(
        &self,
        page: &mut Page,
        ticket: Ticket,
        show_id: u64,
        episodes: &[Episode],
        mut progress_callback: F,
    ) -> Result<RenderOutcome, WidgetError>
    where
        F: FnMut(ProgressEvent),
    {
        if self.is_stale(ticket) {
            progress_callback(ProgressEvent::StaleResponseDiscarded { ticket });
            return Ok(RenderOutcome::Discarded);
        }

        let items = episodes
            .iter()
            .map(render_episode_item)
            .collect::<Result<Vec<_>, _>>()?;

        let list = page.episodes_list_mut();
        list.empty();
        for item in items {
            list.append(item);
        }
        page.show_episodes_area();

        debug!("Rendered {} episode(s) for {:?}", episodes.len(), ticket);
        progress_callback(ProgressEvent::EpisodesFound {
            show_id,
            count: episodes.len(),
        });

        Ok(RenderOutcome::Rendered {
            count: episodes.len(),
        })
    }

    fn is_stale(&self, ticket: Ticket) -> bool {
        let latest = match ticket.flow {
            Flow::Search => self.latest_search,
            Flow::Episodes => self.latest_episodes,
        };
        self.config.render_policy == RenderPolicy::DiscardStale && ticket.sequence != latest
    }
}
