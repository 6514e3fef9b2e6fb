use reel_sync_config::ProviderConfig;
use reel_sync_models::ProviderReview;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Endpoint response schemas. Every payload is decoded into one of these at
/// this boundary; missing fields default instead of failing the whole page.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<u16>,
    #[serde(default)]
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverPage {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreTag {
    pub id: u16,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewPage {
    #[serde(default)]
    pub results: Vec<WireReview>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireReview {
    pub id: String,
    pub author: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoPage {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backdrop {
    pub file_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub backdrops: Vec<Backdrop>,
}

/// Movie detail with the appended sub-responses requested by `get_movie`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub revenue: Option<u64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreTag>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub credits: Option<Credits>,
    #[serde(default)]
    pub reviews: Option<ReviewPage>,
    #[serde(default)]
    pub videos: Option<VideoPage>,
    #[serde(default)]
    pub images: Option<ImageSet>,
}

impl MovieDetail {
    /// Name of the first crew member credited as director.
    pub fn director(&self) -> &str {
        self.credits
            .as_ref()
            .and_then(|c| {
                c.crew
                    .iter()
                    .find(|m| m.job.as_deref() == Some("Director"))
            })
            .map(|m| m.name.as_str())
            .unwrap_or("Unknown Director")
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }

    /// Provider-supplied reviews for this movie, ready for the vote overlay.
    pub fn provider_reviews(&self) -> Vec<ProviderReview> {
        self.reviews
            .as_ref()
            .map(|page| {
                page.results
                    .iter()
                    .map(|r| ProviderReview {
                        id: r.id.clone(),
                        author: r.author.clone(),
                        content: r.content.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn first_trailer(&self) -> Option<&Video> {
        self.videos
            .as_ref()
            .and_then(|v| v.results.iter().find(|v| v.kind.as_deref() == Some("Trailer")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonPage {
    #[serde(default)]
    pub results: Vec<Person>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonCredits {
    #[serde(default)]
    pub cast: Vec<MovieSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingWindow {
    Day,
    Week,
}

impl TrendingWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendingWindow::Day => "day",
            TrendingWindow::Week => "week",
        }
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

/// Fetch one movie with credits, reviews, videos and images appended.
pub async fn get_movie(
    client: &Client,
    config: &ProviderConfig,
    id: u64,
) -> Result<MovieDetail, ProviderError> {
    let url = format!("{}/movie/{}", config.base_url, id);
    let response = client
        .get(&url)
        .query(&[
            ("api_key", config.api_key.as_str()),
            ("append_to_response", "credits,reviews,videos,images"),
        ])
        .send()
        .await?;
    decode(response).await
}

/// Discover movies matching every genre in `genre_ids`, one page at a time.
/// Pages are 1-based; the id list is comma-joined per the provider contract.
pub async fn discover_by_genres(
    client: &Client,
    config: &ProviderConfig,
    genre_ids: &[u16],
    page: u32,
) -> Result<DiscoverPage, ProviderError> {
    let with_genres = genre_ids
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let url = format!("{}/discover/movie", config.base_url);
    let response = client
        .get(&url)
        .query(&[
            ("api_key", config.api_key.as_str()),
            ("with_genres", with_genres.as_str()),
            ("page", page.to_string().as_str()),
        ])
        .send()
        .await?;
    decode(response).await
}

pub async fn get_trending(
    client: &Client,
    config: &ProviderConfig,
    window: TrendingWindow,
) -> Result<DiscoverPage, ProviderError> {
    let url = format!("{}/trending/movie/{}", config.base_url, window.as_str());
    let response = client
        .get(&url)
        .query(&[("api_key", config.api_key.as_str())])
        .send()
        .await?;
    decode(response).await
}

pub async fn get_upcoming(
    client: &Client,
    config: &ProviderConfig,
) -> Result<DiscoverPage, ProviderError> {
    let url = format!("{}/movie/upcoming", config.base_url);
    let response = client
        .get(&url)
        .query(&[("api_key", config.api_key.as_str())])
        .send()
        .await?;
    decode(response).await
}

pub async fn get_person(
    client: &Client,
    config: &ProviderConfig,
    id: u64,
) -> Result<Person, ProviderError> {
    let url = format!("{}/person/{}", config.base_url, id);
    let response = client
        .get(&url)
        .query(&[("api_key", config.api_key.as_str())])
        .send()
        .await?;
    decode(response).await
}

pub async fn get_person_credits(
    client: &Client,
    config: &ProviderConfig,
    id: u64,
) -> Result<PersonCredits, ProviderError> {
    let url = format!("{}/person/{}/movie_credits", config.base_url, id);
    let response = client
        .get(&url)
        .query(&[("api_key", config.api_key.as_str())])
        .send()
        .await?;
    decode(response).await
}

pub async fn get_popular_people(
    client: &Client,
    config: &ProviderConfig,
) -> Result<PersonPage, ProviderError> {
    let url = format!("{}/person/popular", config.base_url);
    let response = client
        .get(&url)
        .query(&[("api_key", config.api_key.as_str())])
        .send()
        .await?;
    decode(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_detail_decodes_with_appended_sections() {
        let raw = r#"{
            "id": 603,
            "title": "The Matrix",
            "genres": [{"id": 878, "name": "Science Fiction"}],
            "credits": {
                "cast": [{"id": 1, "name": "Keanu Reeves"}],
                "crew": [
                    {"name": "Bill Pope", "job": "Director of Photography"},
                    {"name": "Lana Wachowski", "job": "Director"}
                ]
            },
            "reviews": {"results": [{"id": "r1", "author": "ada", "content": "whoa"}]},
            "videos": {"results": [{"key": "abc", "type": "Trailer"}]}
        }"#;
        let detail: MovieDetail = serde_json::from_str(raw).unwrap();
        assert_eq!(detail.director(), "Lana Wachowski");
        assert_eq!(detail.genre_names(), vec!["Science Fiction"]);
        assert_eq!(detail.provider_reviews().len(), 1);
        assert_eq!(detail.first_trailer().unwrap().key, "abc");
    }

    #[test]
    fn test_director_falls_back_when_crew_has_none() {
        let detail: MovieDetail =
            serde_json::from_str(r#"{"id": 1, "title": "Untitled"}"#).unwrap();
        assert_eq!(detail.director(), "Unknown Director");
        assert!(detail.provider_reviews().is_empty());
    }

    #[test]
    fn test_discover_page_defaults_missing_fields() {
        let page: DiscoverPage =
            serde_json::from_str(r#"{"results": [{"id": 5, "title": "Dune"}]}"#).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.results[0].title, "Dune");
        assert!(page.results[0].genre_ids.is_empty());
    }

    #[test]
    fn test_trending_window_paths() {
        assert_eq!(TrendingWindow::Day.as_str(), "day");
        assert_eq!(TrendingWindow::Week.as_str(), "week");
    }
}
