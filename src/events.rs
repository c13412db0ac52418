//! Event wiring between the host page and the widget flows.

use crate::ProgressEvent;
use crate::directory::ShowDirectory;
use crate::page::Page;
use crate::widget::{RenderOutcome, ShowFinder, WidgetError};

/// Submission of the search form
///
/// Submitting a form navigates away by default; the widget handles the
/// submission in place and prevents that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the form's default navigation
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A user interaction with the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The search form was submitted
    SearchSubmitted(SubmitEvent),
    /// The "Episodes" trigger at this position of the results was clicked
    EpisodesClicked { trigger: usize },
}

/// Routes a page event to the matching widget flow
pub fn dispatch<D, F>(
    finder: &mut ShowFinder<D>,
    page: &mut Page,
    event: &mut UiEvent,
    progress_callback: F,
) -> Result<RenderOutcome, WidgetError>
where
    D: ShowDirectory,
    F: FnMut(ProgressEvent),
{
    match event {
        UiEvent::SearchSubmitted(submit) => {
            submit.prevent_default();
            finder.submit_search(page, progress_callback)
        }
        UiEvent::EpisodesClicked { trigger } => {
            finder.click_episodes(page, *trigger, progress_callback)
        }
    }
}
