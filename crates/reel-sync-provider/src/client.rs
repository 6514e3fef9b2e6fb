use std::sync::Arc;

use async_trait::async_trait;
use reel_sync_config::ProviderConfig;
use reqwest::Client;
use tracing::debug;

use crate::api;
use crate::api::{DiscoverPage, MovieDetail, Person, PersonCredits, PersonPage, TrendingWindow};
use crate::error::ProviderError;
use crate::traits::CatalogSource;

/// HTTP client for the content catalog. All access goes through the typed
/// request functions in `api`; configuration is injected here.
#[derive(Clone)]
pub struct CatalogClient {
    client: Arc<Client>,
    config: ProviderConfig,
}

impl CatalogClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: Arc::new(Client::new()),
            config,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn movie(&self, id: u64) -> Result<MovieDetail, ProviderError> {
        debug!(movie_id = id, "fetching movie detail");
        api::get_movie(&self.client, &self.config, id).await
    }

    async fn person(&self, id: u64) -> Result<Person, ProviderError> {
        api::get_person(&self.client, &self.config, id).await
    }

    async fn person_credits(&self, id: u64) -> Result<PersonCredits, ProviderError> {
        api::get_person_credits(&self.client, &self.config, id).await
    }

    async fn popular_people(&self) -> Result<PersonPage, ProviderError> {
        api::get_popular_people(&self.client, &self.config).await
    }

    async fn discover_by_genres(
        &self,
        genre_ids: &[u16],
        page: u32,
    ) -> Result<DiscoverPage, ProviderError> {
        debug!(?genre_ids, page, "discovering movies by genre");
        api::discover_by_genres(&self.client, &self.config, genre_ids, page).await
    }

    async fn trending(&self, window: TrendingWindow) -> Result<DiscoverPage, ProviderError> {
        api::get_trending(&self.client, &self.config, window).await
    }

    async fn upcoming(&self) -> Result<DiscoverPage, ProviderError> {
        api::get_upcoming(&self.client, &self.config).await
    }

    fn poster_url(&self, path: &str) -> String {
        let base = self.config.image_base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}
