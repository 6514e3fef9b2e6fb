use reel_sync_models::ProviderReview;

/// A provider review with the view-local vote tally layered on. The
/// counters live only in this snapshot: nothing is persisted, other users
/// never see them, and a reload starts from zero again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotedReview {
    pub id: String,
    pub author: String,
    pub content: String,
    pub likes: u32,
    pub dislikes: u32,
}

impl From<&ProviderReview> for VotedReview {
    fn from(review: &ProviderReview) -> Self {
        Self {
            id: review.id.clone(),
            author: review.author.clone(),
            content: review.content.clone(),
            likes: 0,
            dislikes: 0,
        }
    }
}

/// Zeroed vote overlay for a movie's provider reviews.
pub fn with_votes(reviews: &[ProviderReview]) -> Vec<VotedReview> {
    reviews.iter().map(VotedReview::from).collect()
}

/// New sequence with `likes` incremented at `index`; every other element
/// is untouched. Out-of-range indices yield an unchanged copy.
pub fn upvote(reviews: &[VotedReview], index: usize) -> Vec<VotedReview> {
    reviews
        .iter()
        .enumerate()
        .map(|(i, review)| {
            let mut review = review.clone();
            if i == index {
                review.likes += 1;
            }
            review
        })
        .collect()
}

/// New sequence with `dislikes` incremented at `index`.
pub fn downvote(reviews: &[VotedReview], index: usize) -> Vec<VotedReview> {
    reviews
        .iter()
        .enumerate()
        .map(|(i, review)| {
            let mut review = review.clone();
            if i == index {
                review.dislikes += 1;
            }
            review
        })
        .collect()
}
