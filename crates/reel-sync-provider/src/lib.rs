pub mod api;
pub mod client;
pub mod error;
pub mod traits;

pub use api::{
    CastMember, Credits, DiscoverPage, GenreTag, MovieDetail, MovieSummary, Person, PersonCredits,
    PersonPage, TrendingWindow, Video,
};
pub use client::CatalogClient;
pub use error::ProviderError;
pub use traits::CatalogSource;
