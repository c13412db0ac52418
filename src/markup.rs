//! Markup construction module
//!
//! Cards, episode items and the host document are built from compiled
//! templates. Every interpolated value goes through HTML escaping, and show
//! summaries are reduced to plain text before they are inserted, so directory
//! data can never inject markup into the page.

use crate::directory::{Episode, Show};
use crate::page::{Page, Visibility};
use askama::Template;
use thiserror::Error;

/// Errors that can occur while rendering markup
#[derive(Debug, Error)]
pub enum MarkupError {
    /// A template failed to render
    #[error("Failed to render template: {0}")]
    Render(#[from] askama::Error),
}

#[derive(Template)]
#[template(
    source = r#"<div data-show-id="{{ id }}" class="Show col-md-12 col-lg-6 mb-4">
  <div class="media">
    <img src="{{ image }}" alt="{{ name }}" class="w-25 me-3">
    <div class="media-body">
      <h5 class="text-primary">{{ name }}</h5>
      <div><small>{{ summary }}</small></div>
      <button class="btn btn-outline-light btn-sm Show-getEpisodes">Episodes</button>
    </div>
  </div>
</div>"#,
    ext = "html"
)]
struct ShowCardTemplate<'a> {
    id: u64,
    name: &'a str,
    image: &'a str,
    summary: String,
}

#[derive(Template)]
#[template(source = "<li>{{ label }}</li>", ext = "html")]
struct EpisodeItemTemplate {
    label: String,
}

#[derive(Template)]
#[template(
    source = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>TV Show Search</title>
</head>
<body>
  <main class="container">
    <h1>TV Show Search</h1>
    <form id="searchForm" class="form-inline">
      <input id="searchForm-term" class="form-control" placeholder="Show name" value="{{ term }}">
      <button class="btn btn-primary">Go!</button>
    </form>
    <div class="row mt-3" id="showsList">{{ results|safe }}</div>
    <section id="episodesArea"{% if hidden %} style="display: none"{% endif %}>
      <h2>Episodes</h2>
      <ul id="episodesList">{{ episodes|safe }}</ul>
    </section>
  </main>
</body>
</html>
"#,
    ext = "html"
)]
struct DocumentTemplate<'a> {
    term: &'a str,
    results: &'a str,
    episodes: &'a str,
    hidden: bool,
}

/// Converts an HTML-bearing summary to trimmed plain text
pub fn summary_text(summary: &str) -> String {
    nanohtml2text::html2text(summary).trim().to_string()
}

/// Renders the result card for a single show
///
/// The card carries the show id in its `data-show-id` attribute so that a
/// click on its "Episodes" trigger can be resolved back to the show.
pub fn render_show_card(show: &Show) -> Result<String, MarkupError> {
    let card = ShowCardTemplate {
        id: show.id,
        name: &show.name,
        image: &show.image,
        summary: summary_text(&show.summary),
    };
    Ok(card.render()?)
}

/// Renders the list item for a single episode
pub fn render_episode_item(episode: &Episode) -> Result<String, MarkupError> {
    let item = EpisodeItemTemplate {
        label: episode.to_string(),
    };
    Ok(item.render()?)
}

/// Renders the complete host document with the page's current content
pub fn render_document(page: &Page) -> Result<String, MarkupError> {
    let results = page.results().html();
    let episodes = page.episodes_list().html();
    let document = DocumentTemplate {
        term: page.search_term(),
        results: &results,
        episodes: &episodes,
        hidden: page.episodes_area() == Visibility::Hidden,
    };
    Ok(document.render()?)
}
