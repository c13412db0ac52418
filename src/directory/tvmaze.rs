/// TVMaze show directory implementation.
use super::tvmaze_types::{TvMazeEpisode, TvMazeSearchResult, TvMazeShow};
use super::{DirectoryError, Episode, Show, ShowDirectory};
use crate::config::DirectoryConfig;
use log::debug;
use serde::de::DeserializeOwned;

/// Show directory backed by the TVMaze API.
///
/// This directory queries https://api.tvmaze.com (or the configured base URL)
/// using the show search and episode list endpoints.
pub struct TvMazeDirectory {
    client: reqwest::blocking::Client,
    base_url: String,
    placeholder_image: String,
}

impl TvMazeDirectory {
    /// Creates a new TVMaze directory with the default configuration.
    pub fn new() -> Result<Self, DirectoryError> {
        Self::with_config(DirectoryConfig::default())
    }

    /// Creates a new TVMaze directory with a custom configuration.
    pub fn with_config(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DirectoryError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            placeholder_image: config.placeholder_image,
        })
    }

    /// Converts a TVMaze show to our internal Show structure.
    ///
    /// Shows without a medium poster get the placeholder image.
    fn convert_show(tvmaze_show: TvMazeShow, placeholder_image: &str) -> Show {
        Show {
            id: tvmaze_show.id,
            name: tvmaze_show.name,
            summary: tvmaze_show.summary.unwrap_or_default(),
            image: tvmaze_show
                .image
                .and_then(|image| image.medium)
                .unwrap_or_else(|| placeholder_image.to_string()),
        }
    }

    /// Converts a TVMaze episode to our internal Episode structure.
    fn convert_episode(tvmaze_episode: TvMazeEpisode) -> Episode {
        Episode {
            id: tvmaze_episode.id,
            name: tvmaze_episode.name.unwrap_or_else(|| "Unknown".to_string()),
            season: tvmaze_episode.season,
            number: tvmaze_episode.number,
        }
    }

    /// Performs a GET request and decodes the JSON body.
    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, DirectoryError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| DirectoryError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DirectoryError::RequestError(format!(
                "HTTP {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json()
            .map_err(|e| DirectoryError::ParseError(e.to_string()))
    }
}

impl ShowDirectory for TvMazeDirectory {
    fn search_shows(&self, term: &str) -> Result<Vec<Show>, DirectoryError> {
        let results: Vec<TvMazeSearchResult> =
            self.get_json("/search/shows", &[("q", term)])?;

        Ok(results
            .into_iter()
            .map(|result| Self::convert_show(result.show, &self.placeholder_image))
            .collect())
    }

    fn get_episodes(&self, show_id: u64) -> Result<Vec<Episode>, DirectoryError> {
        let episodes: Vec<TvMazeEpisode> =
            self.get_json(&format!("/shows/{}/episodes", show_id), &[])?;

        Ok(episodes.into_iter().map(Self::convert_episode).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::PLACEHOLDER_IMAGE_URL;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // The blocking client must be built and dropped outside the async runtime.
    fn directory_for(base_url: String) -> TvMazeDirectory {
        TvMazeDirectory::with_config(DirectoryConfig {
            base_url,
            timeout: Duration::from_secs(5),
            ..DirectoryConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_convert_show_without_image_uses_placeholder() {
        let show: TvMazeShow = serde_json::from_value(json!({
            "id": 1,
            "name": "Batman",
            "summary": "<p>desc</p>",
            "image": null
        }))
        .unwrap();

        let show = TvMazeDirectory::convert_show(show, PLACEHOLDER_IMAGE_URL);
        assert_eq!(show.image, PLACEHOLDER_IMAGE_URL);
        assert_eq!(show.summary, "<p>desc</p>");
    }

    #[test]
    fn test_convert_show_with_image_uses_medium() {
        let show: TvMazeShow = serde_json::from_value(json!({
            "id": 975,
            "name": "Batman",
            "summary": null,
            "image": {
                "medium": "https://static.tvmaze.com/medium/6.jpg",
                "original": "https://static.tvmaze.com/original/6.jpg"
            }
        }))
        .unwrap();

        let show = TvMazeDirectory::convert_show(show, PLACEHOLDER_IMAGE_URL);
        assert_eq!(show.image, "https://static.tvmaze.com/medium/6.jpg");
        assert_eq!(show.summary, "");
    }

    #[test]
    fn test_convert_episode_drops_extra_fields() {
        let episode: TvMazeEpisode = serde_json::from_value(json!({
            "id": 10,
            "url": "https://www.tvmaze.com/episodes/10/pilot",
            "name": "Pilot",
            "season": 1,
            "number": 1,
            "airdate": "1966-01-12",
            "summary": "<p>Riddle me this.</p>"
        }))
        .unwrap();

        assert_eq!(
            TvMazeDirectory::convert_episode(episode),
            Episode {
                id: 10,
                name: "Pilot".to_string(),
                season: 1,
                number: Some(1),
            }
        );
    }

    #[test]
    fn test_convert_show_without_medium_uses_placeholder() {
        let show: TvMazeShow = serde_json::from_value(json!({
            "id": 2,
            "name": "Batman Beyond",
            "summary": "<p>Neo-Gotham.</p>",
            "image": {
                "original": "https://static.tvmaze.com/original/2.jpg"
            }
        }))
        .unwrap();

        let show = TvMazeDirectory::convert_show(show, PLACEHOLDER_IMAGE_URL);
        assert_eq!(show.image, PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_convert_episode_without_name_or_number() {
        let episode: TvMazeEpisode = serde_json::from_value(json!({
            "id": 12,
            "name": null,
            "season": 3,
            "number": null
        }))
        .unwrap();

        assert_eq!(
            TvMazeDirectory::convert_episode(episode),
            Episode {
                id: 12,
                name: "Unknown".to_string(),
                season: 3,
                number: None,
            }
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_search_shows_sends_term_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/shows"))
            .and(query_param("q", "batman"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "score": 0.9,
                    "show": {
                        "id": 1,
                        "name": "Batman",
                        "summary": "<p>desc</p>",
                        "image": null
                    }
                }
            ])))
            .mount(&server)
            .await;

        let base_url = server.uri();
        let shows =
            tokio::task::spawn_blocking(move || directory_for(base_url).search_shows("batman"))
                .await
                .unwrap()
                .unwrap();

        assert_eq!(
            shows,
            vec![Show {
                id: 1,
                name: "Batman".to_string(),
                summary: "<p>desc</p>".to_string(),
                image: PLACEHOLDER_IMAGE_URL.to_string(),
            }]
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_get_episodes_uses_show_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shows/1/episodes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 10, "name": "Pilot", "season": 1, "number": 1},
                {"id": 11, "name": "Second", "season": 1, "number": 2}
            ])))
            .mount(&server)
            .await;

        let base_url = server.uri();
        let episodes =
            tokio::task::spawn_blocking(move || directory_for(base_url).get_episodes(1))
                .await
                .unwrap()
                .unwrap();

        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[1].name, "Second");
        assert_eq!(episodes[1].number, Some(2));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_get_episodes_keeps_untitled_episodes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shows/5/episodes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 10, "name": "Pilot", "season": 1, "number": 1},
                {"id": 11, "name": null, "season": 1, "number": 2},
                {"id": 12, "name": "Reunion", "season": 1, "number": null}
            ])))
            .mount(&server)
            .await;

        let base_url = server.uri();
        let episodes =
            tokio::task::spawn_blocking(move || directory_for(base_url).get_episodes(5))
                .await
                .unwrap()
                .unwrap();

        let lines: Vec<String> = episodes.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "Pilot (season 1, episode 1)".to_string(),
                "Unknown (season 1, episode 2)".to_string(),
                "Reunion (season 1, special)".to_string(),
            ]
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_non_success_status_is_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shows/404/episodes"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let base_url = server.uri();
        let result =
            tokio::task::spawn_blocking(move || directory_for(base_url).get_episodes(404))
                .await
                .unwrap();

        assert!(matches!(result, Err(DirectoryError::RequestError(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_non_json_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/shows"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let base_url = server.uri();
        let result =
            tokio::task::spawn_blocking(move || directory_for(base_url).search_shows("x"))
                .await
                .unwrap();

        assert!(matches!(result, Err(DirectoryError::ParseError(_))));
    }
}
