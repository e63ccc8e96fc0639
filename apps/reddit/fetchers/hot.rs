use crate::error::FetchError;
use crate::fetchers::validate_request;
use crate::models::posts::PostRecord;
use crate::reddit_api::PostSource;
use tracing::{error, info, instrument};

pub struct HotPostFetcher<'a, S: PostSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: PostSource + ?Sized> HotPostFetcher<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Hot posts for every subreddit, in subreddit order then listing order.
    /// An `Ok` with no records means nothing was found; any failure drops the
    /// records collected so far.
    #[instrument(skip(self))]
    pub async fn download_hot_posts(
        &self,
        subreddits: &[String],
        limit: u32,
    ) -> Result<Vec<PostRecord>, FetchError> {
        let result = self.collect(subreddits, limit).await;
        if let Err(e) = &result {
            error!("Failed to download hot posts: {}", e);
        }
        result
    }

    async fn collect(
        &self,
        subreddits: &[String],
        limit: u32,
    ) -> Result<Vec<PostRecord>, FetchError> {
        validate_request(subreddits, limit)?;

        let mut hot_posts = Vec::new();
        for subreddit in subreddits {
            info!("Downloading {} hot posts from r/{}...", limit, subreddit);

            let submissions = self.source.hot(subreddit, limit).await?;
            let post_count = submissions.len();
            hot_posts.extend(
                submissions
                    .into_iter()
                    .map(|submission| PostRecord::from_submission(submission, subreddit, None)),
            );

            info!(
                "Successfully downloaded {} posts from {}!",
                post_count, subreddit
            );
        }

        Ok(hot_posts)
    }
}
