//! Walks one user session end to end over the in-process store: rate a
//! couple of movies, write and edit a review, manage the watchlist, and
//! vote on provider reviews. Run with `TMDB_API_KEY` set to also exercise
//! live recommendations.

use std::sync::Arc;
use std::time::Duration;

use reel_sync_config::ProviderConfig;
use reel_sync_core::{overlay, UserSession};
use reel_sync_models::{AuthenticatedUser, GenrePreference, ProviderReview, UserProfile, WatchlistEntry};
use reel_sync_provider::CatalogClient;
use reel_sync_store::MemoryStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let api_key = std::env::var("TMDB_API_KEY").unwrap_or_default();
    let store = Arc::new(MemoryStore::new());
    let catalog = Arc::new(CatalogClient::new(ProviderConfig::new(api_key)));
    let user = AuthenticatedUser::new("demo-user", Some("Demo".to_string()));
    let session = UserSession::new(store, catalog, Some(user));

    session
        .activity()
        .submit_rating("603", "The Matrix", Some("/matrix.jpg"), 9)
        .await?;
    session
        .activity()
        .submit_rating("603", "The Matrix", Some("/matrix.jpg"), 10)
        .await?;
    let review_id = session
        .activity()
        .submit_review(Some("The Matrix"), "Still holds up.")
        .await?;
    session
        .activity()
        .edit_review(&review_id, "Still holds up, every single time.")
        .await?;

    session
        .watchlist()
        .add(&WatchlistEntry {
            id: String::new(),
            movie_id: "335984".into(),
            title: "Blade Runner 2049".into(),
            genres: vec!["Science Fiction".into(), "Drama".into()],
            poster_path: Some("/br2049.jpg".into()),
            release_date: Some("2017-10-06".into()),
        })
        .await?;

    session
        .profile()
        .save(&UserProfile {
            username: Some("demo".into()),
            profile_picture: None,
            preferences: GenrePreference::from_names(["Science Fiction", "Thriller"]),
        })
        .await?;

    // Let the snapshots and the preference-driven refresh land.
    tokio::time::sleep(Duration::from_millis(200)).await;

    for rating in session.activity().ratings().iter() {
        println!("rated   {} -> {}/10", rating.title, rating.score);
    }
    for review in session.activity().reviews().iter() {
        println!("review  [{}] {}", review.author, review.content);
    }
    for entry in session.watchlist().entries().iter() {
        println!("watch   {} ({})", entry.title, entry.genres.join(", "));
    }
    let recommendations = session.recommendations().visible();
    if recommendations.is_empty() {
        println!("recs    none (set TMDB_API_KEY for live recommendations)");
    } else {
        for item in recommendations {
            println!("recs    {}", item.title);
        }
    }

    // View-local vote overlay over provider reviews; nothing is persisted.
    let provider_reviews = vec![
        ProviderReview {
            id: "r1".into(),
            author: "critic".into(),
            content: "A landmark.".into(),
        },
        ProviderReview {
            id: "r2".into(),
            author: "casual".into(),
            content: "Too long.".into(),
        },
    ];
    let voted = overlay::upvote(&overlay::with_votes(&provider_reviews), 0);
    for review in &voted {
        println!(
            "vote    {}: +{} / -{}",
            review.author, review.likes, review.dislikes
        );
    }

    Ok(())
}
