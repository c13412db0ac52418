//! Host page module
//!
//! This module models the page the widget paints into: a search input, the
//! results container, and the episode panel with its episode list. The
//! regions exist from the start; the widget only replaces their content and
//! toggles the panel's visibility. Containers hold rendered markup, and all
//! lookups are answered by querying that markup with CSS selectors.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Errors that can occur while querying the page
#[derive(Debug, Error)]
pub enum PageError {
    /// A CSS selector could not be parsed
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// No "Episodes" trigger exists at the given position
    #[error("No episodes trigger at position {0}")]
    TriggerNotFound(usize),

    /// The trigger is not enclosed by a show card carrying an id
    #[error("Episodes trigger at position {0} has no enclosing show card")]
    CardNotFound(usize),

    /// The card's `data-show-id` attribute is not a valid id
    #[error("Invalid show id '{0}'")]
    InvalidShowId(String),
}

/// Visibility of a page panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Shown,
}

/// A page region whose content is replaced as a whole
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    fragments: Vec<String>,
}

impl Container {
    /// Removes all content
    pub fn empty(&mut self) {
        self.fragments.clear();
    }

    /// Appends a rendered fragment
    pub fn append(&mut self, fragment: String) {
        self.fragments.push(fragment);
    }

    /// Number of fragments appended since the last `empty`
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// The container's content as a single markup string
    pub fn html(&self) -> String {
        self.fragments.join("\n")
    }

    fn parse(&self) -> Html {
        Html::parse_fragment(&self.html())
    }
}

/// A show card as read back from the results container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub show_id: u64,
    pub name: String,
    pub image: String,
    pub summary: String,
}

/// The host page with the regions the widget writes into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    search_term: String,
    results: Container,
    episodes_list: Container,
    episodes_area: Visibility,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// Creates an empty page with the episode panel hidden
    pub fn new() -> Self {
        Self {
            search_term: String::new(),
            results: Container::default(),
            episodes_list: Container::default(),
            episodes_area: Visibility::Hidden,
        }
    }

    /// Current text of the search input
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Replaces the text of the search input
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn results(&self) -> &Container {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut Container {
        &mut self.results
    }

    pub fn episodes_list(&self) -> &Container {
        &self.episodes_list
    }

    pub fn episodes_list_mut(&mut self) -> &mut Container {
        &mut self.episodes_list
    }

    /// Visibility of the episode panel
    pub fn episodes_area(&self) -> Visibility {
        self.episodes_area
    }

    pub fn hide_episodes_area(&mut self) {
        self.episodes_area = Visibility::Hidden;
    }

    pub fn show_episodes_area(&mut self) {
        self.episodes_area = Visibility::Shown;
    }

    /// Reads back all show cards from the results container
    ///
    /// Elements without a parseable `data-show-id` are skipped.
    pub fn cards(&self) -> Result<Vec<CardView>, PageError> {
        let card_selector = selector(".Show[data-show-id]")?;
        let heading_selector = selector("h5")?;
        let image_selector = selector("img")?;
        let summary_selector = selector("small")?;

        let fragment = self.results.parse();
        let cards = fragment
            .select(&card_selector)
            .filter_map(|card| {
                let show_id = card.value().attr("data-show-id")?.parse().ok()?;
                Some(CardView {
                    show_id,
                    name: first_text(&card, &heading_selector),
                    image: card
                        .select(&image_selector)
                        .next()
                        .and_then(|img| img.value().attr("src"))
                        .unwrap_or_default()
                        .to_string(),
                    summary: first_text(&card, &summary_selector),
                })
            })
            .collect();

        Ok(cards)
    }

    /// Number of "Episodes" triggers currently rendered
    pub fn trigger_count(&self) -> Result<usize, PageError> {
        let trigger_selector = selector(".Show-getEpisodes")?;
        Ok(self.results.parse().select(&trigger_selector).count())
    }

    /// Resolves the show id of the card enclosing the `index`-th "Episodes" trigger
    pub fn show_id_for_trigger(&self, index: usize) -> Result<u64, PageError> {
        let trigger_selector = selector(".Show-getEpisodes")?;
        let fragment = self.results.parse();

        let trigger = fragment
            .select(&trigger_selector)
            .nth(index)
            .ok_or(PageError::TriggerNotFound(index))?;

        let card = trigger
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().classes().any(|class| class == "Show"))
            .ok_or(PageError::CardNotFound(index))?;

        let raw_id = card
            .value()
            .attr("data-show-id")
            .ok_or(PageError::CardNotFound(index))?;

        raw_id
            .parse()
            .map_err(|_| PageError::InvalidShowId(raw_id.to_string()))
    }

    /// Reads back the text of every item in the episode list
    pub fn episode_lines(&self) -> Result<Vec<String>, PageError> {
        let item_selector = selector("li")?;
        let fragment = self.episodes_list.parse();
        Ok(fragment
            .select(&item_selector)
            .map(|item| item.text().collect::<String>().trim().to_string())
            .collect())
    }
}

fn selector(css: &str) -> Result<Selector, PageError> {
    Selector::parse(css).map_err(|e| PageError::InvalidSelector {
        selector: css.to_string(),
        reason: format!("{:?}", e),
    })
}

fn first_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: &str = r#"<div data-show-id="7" class="Show">
  <img src="https://example.com/7.jpg" alt="Seven">
  <h5> Seven </h5>
  <div><small>Lucky number</small></div>
  <button class="Show-getEpisodes">Episodes</button>
</div>"#;

    #[test]
    fn test_new_page_starts_hidden_and_empty() {
        let page = Page::new();
        assert_eq!(page.episodes_area(), Visibility::Hidden);
        assert!(page.results().is_empty());
        assert!(page.episodes_list().is_empty());
    }

    #[test]
    fn test_container_empty_and_append() {
        let mut container = Container::default();
        container.append("<li>a</li>".to_string());
        container.append("<li>b</li>".to_string());
        assert_eq!(container.len(), 2);
        container.empty();
        assert!(container.is_empty());
        assert_eq!(container.html(), "");
    }

    #[test]
    fn test_cards_read_back() {
        let mut page = Page::new();
        page.results_mut().append(CARD.to_string());

        let cards = page.cards().unwrap();
        assert_eq!(
            cards,
            vec![CardView {
                show_id: 7,
                name: "Seven".to_string(),
                image: "https://example.com/7.jpg".to_string(),
                summary: "Lucky number".to_string(),
            }]
        );
    }

    #[test]
    fn test_show_id_for_trigger_finds_enclosing_card() {
        let mut page = Page::new();
        page.results_mut().append(CARD.replace("\"7\"", "\"3\""));
        page.results_mut().append(CARD.to_string());

        assert_eq!(page.trigger_count().unwrap(), 2);
        assert_eq!(page.show_id_for_trigger(0).unwrap(), 3);
        assert_eq!(page.show_id_for_trigger(1).unwrap(), 7);
        assert!(matches!(
            page.show_id_for_trigger(2),
            Err(PageError::TriggerNotFound(2))
        ));
    }

    #[test]
    fn test_trigger_outside_card_is_rejected() {
        let mut page = Page::new();
        page.results_mut()
            .append(r#"<button class="Show-getEpisodes">Episodes</button>"#.to_string());

        assert!(matches!(
            page.show_id_for_trigger(0),
            Err(PageError::CardNotFound(0))
        ));
    }

    #[test]
    fn test_episode_lines() {
        let mut page = Page::new();
        page.episodes_list_mut()
            .append("<li>\n  Pilot (season 1, episode 1)\n</li>".to_string());
        assert_eq!(
            page.episode_lines().unwrap(),
            vec!["Pilot (season 1, episode 1)".to_string()]
        );
    }
}
