use async_trait::async_trait;

use crate::api::{DiscoverPage, MovieDetail, Person, PersonCredits, PersonPage, TrendingWindow};
use crate::error::ProviderError;

/// Read-only view of the content catalog. The core consumes the catalog
/// through this trait so tests can substitute a scripted implementation.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn movie(&self, id: u64) -> Result<MovieDetail, ProviderError>;

    async fn person(&self, id: u64) -> Result<Person, ProviderError>;

    async fn person_credits(&self, id: u64) -> Result<PersonCredits, ProviderError>;

    async fn popular_people(&self) -> Result<PersonPage, ProviderError>;

    /// One page of movies matching every genre id; pages are 1-based.
    async fn discover_by_genres(
        &self,
        genre_ids: &[u16],
        page: u32,
    ) -> Result<DiscoverPage, ProviderError>;

    async fn trending(&self, window: TrendingWindow) -> Result<DiscoverPage, ProviderError>;

    async fn upcoming(&self) -> Result<DiscoverPage, ProviderError>;

    /// Absolute image URL for a provider-relative poster path.
    fn poster_url(&self, path: &str) -> String;
}
