use std::sync::{Arc, Mutex};

use reel_sync_config::RecommendationConfig;
use reel_sync_models::{genre_id, GenrePreference, RecommendationItem, UserProfile};
use reel_sync_provider::{CatalogSource, DiscoverPage};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::sync::CollectionSync;

#[derive(Debug, Clone, Copy)]
pub struct RecommendationOptions {
    /// Items shown before the first "show more".
    pub initial_visible: usize,
    /// How many more each "show more" reveals.
    pub show_more_step: usize,
}

impl Default for RecommendationOptions {
    fn default() -> Self {
        Self {
            initial_visible: 6,
            show_more_step: 9,
        }
    }
}

impl From<&RecommendationConfig> for RecommendationOptions {
    fn from(config: &RecommendationConfig) -> Self {
        Self {
            initial_visible: config.initial_visible,
            show_more_step: config.show_more_step,
        }
    }
}

#[derive(Default)]
struct EngineState {
    // Monotonic fetch generation; a completion from an older generation is
    // discarded on arrival (last write wins).
    generation: u64,
    genre_ids: Vec<u16>,
    fetched: Vec<RecommendationItem>,
    visible: usize,
    last_page: u32,
    total_pages: u32,
}

struct RefreshTicket {
    generation: u64,
    genre_ids: Vec<u16>,
}

/// Derives the ranked recommendation set from the user's genre preferences.
/// "Show more" reveals already-fetched results first and only reaches for
/// the next provider page once the fetched set is exhausted.
pub struct RecommendationEngine {
    catalog: Arc<dyn CatalogSource>,
    options: RecommendationOptions,
    state: Mutex<EngineState>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<dyn CatalogSource>, options: RecommendationOptions) -> Self {
        Self {
            catalog,
            options,
            state: Mutex::new(EngineState::default()),
        }
    }

    /// Recompute recommendations for `preferences`. Unmapped genre names
    /// are dropped; an empty mapped id set skips the provider call
    /// entirely. A provider failure degrades to an empty set.
    pub async fn refresh(&self, preferences: &GenrePreference) {
        let ticket = self.begin(preferences);
        self.finish(ticket).await;
    }

    // Claims the next generation synchronously, so overlapping refreshes
    // resolve in the order they were requested, not the order their
    // fetches complete.
    fn begin(&self, preferences: &GenrePreference) -> RefreshTicket {
        let mut genre_ids: Vec<u16> = preferences.iter().filter_map(genre_id).collect();
        genre_ids.sort_unstable();
        let mut state = self.state.lock().unwrap();
        state.generation += 1;
        state.genre_ids = genre_ids.clone();
        RefreshTicket {
            generation: state.generation,
            genre_ids,
        }
    }

    async fn finish(&self, ticket: RefreshTicket) {
        if ticket.genre_ids.is_empty() {
            debug!("no mapped genres; skipping discovery call");
            self.apply(ticket.generation, Vec::new(), 0, 0);
            return;
        }
        match self.catalog.discover_by_genres(&ticket.genre_ids, 1).await {
            Ok(page) => {
                let fetched_page = page.page;
                let total_pages = page.total_pages;
                let items = self.items_from(page);
                self.apply(ticket.generation, items, fetched_page, total_pages);
            }
            Err(e) => {
                warn!(error = %e, "recommendation fetch failed; degrading to empty set");
                self.apply(ticket.generation, Vec::new(), 0, 0);
            }
        }
    }

    fn apply(
        &self,
        generation: u64,
        items: Vec<RecommendationItem>,
        last_page: u32,
        total_pages: u32,
    ) {
        let mut state = self.state.lock().unwrap();
        if state.generation != generation {
            debug!(generation, "discarding stale recommendation fetch");
            return;
        }
        state.fetched = items;
        state.visible = self.options.initial_visible;
        state.last_page = last_page;
        state.total_pages = total_pages;
    }

    fn items_from(&self, page: DiscoverPage) -> Vec<RecommendationItem> {
        page.results
            .into_iter()
            .map(|movie| RecommendationItem {
                movie_id: movie.id.to_string(),
                title: movie.title,
                poster_path: movie
                    .poster_path
                    .as_deref()
                    .map(|p| self.catalog.poster_url(p)),
            })
            .collect()
    }

    /// Reveal the next batch. Already-fetched items are shown first; when
    /// they run out and the provider reported further pages, the next page
    /// is fetched and appended. A stale page result is discarded.
    pub async fn show_more(&self) {
        let next_fetch = {
            let mut state = self.state.lock().unwrap();
            state.visible += self.options.show_more_step;
            if state.visible >= state.fetched.len()
                && state.last_page < state.total_pages
                && !state.genre_ids.is_empty()
            {
                Some((
                    state.generation,
                    state.genre_ids.clone(),
                    state.last_page + 1,
                ))
            } else {
                None
            }
        };

        let Some((generation, genre_ids, page)) = next_fetch else {
            return;
        };
        match self.catalog.discover_by_genres(&genre_ids, page).await {
            Ok(result) => {
                let fetched_page = result.page.max(page);
                let total_pages = result.total_pages;
                let items = self.items_from(result);
                let mut state = self.state.lock().unwrap();
                if state.generation != generation {
                    debug!(generation, "discarding stale page fetch");
                    return;
                }
                state.fetched.extend(items);
                state.last_page = fetched_page;
                state.total_pages = total_pages;
            }
            Err(e) => {
                warn!(error = %e, page, "next-page fetch failed; keeping current set");
            }
        }
    }

    /// The currently revealed slice of the recommendation set.
    pub fn visible(&self) -> Vec<RecommendationItem> {
        let state = self.state.lock().unwrap();
        let count = state.visible.min(state.fetched.len());
        state.fetched[..count].to_vec()
    }

    /// Everything fetched so far, shown or not.
    pub fn all(&self) -> Vec<RecommendationItem> {
        self.state.lock().unwrap().fetched.clone()
    }

    /// Recompute whenever the profile's preference set changes. The first
    /// refresh runs against the profile's current state.
    pub fn bind(self: &Arc<Self>, mut profile: CollectionSync<UserProfile>) -> JoinHandle<()> {
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            let mut last: Option<GenrePreference> = None;
            loop {
                let preferences = profile
                    .current()
                    .first()
                    .map(|p| p.preferences.clone())
                    .unwrap_or_default();
                if last.as_ref() != Some(&preferences) {
                    let ticket = engine.begin(&preferences);
                    let worker = Arc::clone(&engine);
                    tokio::spawn(async move { worker.finish(ticket).await });
                    last = Some(preferences);
                }
                if !profile.changed().await {
                    break;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reel_sync_provider::{
        DiscoverPage, MovieDetail, MovieSummary, Person, PersonCredits, PersonPage, ProviderError,
        TrendingWindow,
    };
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Scripted catalog: records discovery calls, synthesizes deterministic
    /// pages, and can hold one call open to order completions in tests.
    struct ScriptedCatalog {
        calls: Mutex<Vec<(String, u32)>>,
        page_size: usize,
        total_pages: u32,
        fail: bool,
        gate: Mutex<Option<Arc<Notify>>>,
    }

    impl ScriptedCatalog {
        fn new(page_size: usize, total_pages: u32) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                page_size,
                total_pages,
                fail: false,
                gate: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(0, 0)
            }
        }

        fn hold_next_call(&self) -> Arc<Notify> {
            let gate = Arc::new(Notify::new());
            *self.gate.lock().unwrap() = Some(gate.clone());
            gate
        }

        fn calls(&self) -> Vec<(String, u32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogSource for ScriptedCatalog {
        async fn movie(&self, _id: u64) -> Result<MovieDetail, ProviderError> {
            Err(ProviderError::Status {
                status: 501,
                body: "not scripted".into(),
            })
        }

        async fn person(&self, _id: u64) -> Result<Person, ProviderError> {
            Err(ProviderError::Status {
                status: 501,
                body: "not scripted".into(),
            })
        }

        async fn person_credits(&self, _id: u64) -> Result<PersonCredits, ProviderError> {
            Err(ProviderError::Status {
                status: 501,
                body: "not scripted".into(),
            })
        }

        async fn popular_people(&self) -> Result<PersonPage, ProviderError> {
            Err(ProviderError::Status {
                status: 501,
                body: "not scripted".into(),
            })
        }

        async fn discover_by_genres(
            &self,
            genre_ids: &[u16],
            page: u32,
        ) -> Result<DiscoverPage, ProviderError> {
            let joined = genre_ids
                .iter()
                .map(u16::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let gate = self.gate.lock().unwrap().take();
            self.calls.lock().unwrap().push((joined.clone(), page));
            if let Some(gate) = gate {
                gate.notified().await;
            }
            if self.fail {
                return Err(ProviderError::Status {
                    status: 429,
                    body: "rate limited".into(),
                });
            }
            let results = (0..self.page_size)
                .map(|i| MovieSummary {
                    id: u64::from(page) * 1000 + i as u64,
                    title: format!("g{joined}-p{page}-{i}"),
                    poster_path: Some(format!("/p{page}-{i}.jpg")),
                    backdrop_path: None,
                    release_date: None,
                    vote_average: None,
                    genre_ids: genre_ids.to_vec(),
                    overview: None,
                })
                .collect();
            Ok(DiscoverPage {
                page,
                results,
                total_pages: self.total_pages,
                total_results: self.page_size as u32 * self.total_pages,
            })
        }

        async fn trending(&self, _window: TrendingWindow) -> Result<DiscoverPage, ProviderError> {
            Err(ProviderError::Status {
                status: 501,
                body: "not scripted".into(),
            })
        }

        async fn upcoming(&self) -> Result<DiscoverPage, ProviderError> {
            Err(ProviderError::Status {
                status: 501,
                body: "not scripted".into(),
            })
        }

        fn poster_url(&self, path: &str) -> String {
            format!("https://images.test{path}")
        }
    }

    fn engine(catalog: Arc<ScriptedCatalog>) -> RecommendationEngine {
        RecommendationEngine::new(catalog, RecommendationOptions::default())
    }

    #[tokio::test]
    async fn test_maps_genres_and_issues_one_discovery_call() {
        let catalog = Arc::new(ScriptedCatalog::new(20, 1));
        let engine = engine(catalog.clone());

        engine
            .refresh(&GenrePreference::from_names(["Horror", "Comedy"]))
            .await;

        assert_eq!(catalog.calls(), vec![("27,35".to_string(), 1)]);
        assert_eq!(engine.visible().len(), 6);
        assert_eq!(engine.all().len(), 20);
        assert_eq!(
            engine.visible()[0].poster_path.as_deref(),
            Some("https://images.test/p1-0.jpg")
        );
    }

    #[tokio::test]
    async fn test_empty_preference_set_issues_no_call() {
        let catalog = Arc::new(ScriptedCatalog::new(20, 1));
        let engine = engine(catalog.clone());

        engine.refresh(&GenrePreference::new()).await;

        assert!(catalog.calls().is_empty());
        assert!(engine.visible().is_empty());
    }

    #[tokio::test]
    async fn test_unmapped_genre_names_are_filtered_out() {
        let catalog = Arc::new(ScriptedCatalog::new(5, 1));
        let engine = engine(catalog.clone());

        engine
            .refresh(&GenrePreference::from_names(["Horror", "Polka"]))
            .await;

        assert_eq!(catalog.calls(), vec![("27".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_show_more_reveals_fetched_items_without_refetching() {
        let catalog = Arc::new(ScriptedCatalog::new(20, 1));
        let engine = engine(catalog.clone());

        engine
            .refresh(&GenrePreference::from_names(["Drama"]))
            .await;
        assert_eq!(engine.visible().len(), 6);

        engine.show_more().await;
        assert_eq!(engine.visible().len(), 15);
        // Reveal only: still the single page-1 call.
        assert_eq!(catalog.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_show_more_fetches_next_page_on_exhaustion() {
        let catalog = Arc::new(ScriptedCatalog::new(8, 2));
        let engine = engine(catalog.clone());

        engine
            .refresh(&GenrePreference::from_names(["Drama"]))
            .await;
        assert_eq!(engine.all().len(), 8);

        engine.show_more().await;
        assert_eq!(
            catalog.calls(),
            vec![("18".to_string(), 1), ("18".to_string(), 2)]
        );
        assert_eq!(engine.all().len(), 16);
        assert_eq!(engine.visible().len(), 15);
    }

    #[tokio::test]
    async fn test_overlapping_refreshes_resolve_to_the_latest() {
        let catalog = Arc::new(ScriptedCatalog::new(10, 1));
        let engine = Arc::new(RecommendationEngine::new(
            catalog.clone(),
            RecommendationOptions::default(),
        ));

        // First refresh blocks inside the provider until released.
        let gate = catalog.hold_next_call();
        let slow = {
            let engine = engine.clone();
            tokio::spawn(async move {
                engine
                    .refresh(&GenrePreference::from_names(["Horror"]))
                    .await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Second refresh completes while the first is still in flight.
        engine
            .refresh(&GenrePreference::from_names(["Comedy"]))
            .await;
        gate.notify_one();
        slow.await.unwrap();

        // The earlier fetch's late arrival must not clobber the newer set.
        let visible = engine.visible();
        assert!(!visible.is_empty());
        assert!(visible.iter().all(|item| item.title.starts_with("g35-")));
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_to_empty_set() {
        let catalog = Arc::new(ScriptedCatalog::failing());
        let engine = engine(catalog.clone());

        engine
            .refresh(&GenrePreference::from_names(["Horror"]))
            .await;

        assert_eq!(catalog.calls().len(), 1);
        assert!(engine.visible().is_empty());
    }
}
