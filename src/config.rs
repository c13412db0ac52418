//! Configuration for the show directory client and the widget.

use crate::directory::PLACEHOLDER_IMAGE_URL;
use std::time::Duration;

/// Base URL of the public TVMaze API
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Configuration for the directory HTTP client
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Base URL requests are issued against (default: TVMaze)
    pub base_url: String,
    /// Request timeout (default: 30 seconds)
    pub timeout: Duration,
    /// Image URL used for shows without artwork
    pub placeholder_image: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            placeholder_image: PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }
}

/// How responses of overlapping requests within one flow are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPolicy {
    /// Every response is rendered; whichever finishes last owns the page
    #[default]
    LastWriteWins,
    /// Responses of requests superseded by a newer one are dropped
    DiscardStale,
}

/// Configuration for the widget
#[derive(Debug, Clone, Copy, Default)]
pub struct WidgetConfig {
    pub render_policy: RenderPolicy,
}
