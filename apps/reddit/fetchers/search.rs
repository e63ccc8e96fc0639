use crate::error::FetchError;
use crate::fetchers::validate_request;
use crate::models::posts::PostRecord;
use crate::reddit_api::PostSource;
use tracing::{error, info, instrument};

pub struct SearchFetcher<'a, S: PostSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: PostSource + ?Sized> SearchFetcher<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Relevance-ranked matches for `query` in every subreddit. Each record
    /// carries the query in `search_query`.
    #[instrument(skip(self))]
    pub async fn search_posts(
        &self,
        query: &str,
        subreddits: &[String],
        limit: u32,
    ) -> Result<Vec<PostRecord>, FetchError> {
        let result = self.collect(query, subreddits, limit).await;
        if let Err(e) = &result {
            error!("Failed to download keyword posts: {}", e);
        }
        result
    }

    async fn collect(
        &self,
        query: &str,
        subreddits: &[String],
        limit: u32,
    ) -> Result<Vec<PostRecord>, FetchError> {
        if query.is_empty() {
            return Err(FetchError::InvalidInput(
                "Query must be a non-empty string".to_string(),
            ));
        }
        validate_request(subreddits, limit)?;

        let mut keyword_posts = Vec::new();
        for subreddit in subreddits {
            info!(
                "Downloading {} keyword posts from r/{}...",
                limit, subreddit
            );

            let submissions = self.source.search(subreddit, query, limit).await?;
            let post_count = submissions.len();
            keyword_posts.extend(submissions.into_iter().map(|submission| {
                PostRecord::from_submission(submission, subreddit, Some(query))
            }));

            info!(
                "Successfully downloaded {} posts from {}!",
                post_count, subreddit
            );
        }

        Ok(keyword_posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::fake::FakeSource;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_every_record_carries_query_and_requested_subreddit() {
        let mut source = FakeSource::default();
        source.search.insert("OpenAI".into(), FakeSource::submissions("OpenAI", 2));
        source
            .search
            .insert("Artificial".into(), FakeSource::submissions("Artificial", 3));

        let posts = SearchFetcher::new(&source)
            .search_posts("GPT-4", &names(&["OpenAI", "Artificial"]), 10)
            .await
            .unwrap();

        assert_eq!(posts.len(), 5);
        assert!(posts.iter().all(|p| p.search_query.as_deref() == Some("GPT-4")));
        assert_eq!(posts[0].subreddit, "OpenAI");
        assert_eq!(posts[4].subreddit, "Artificial");
        assert_eq!(
            *source.calls.lock().unwrap(),
            ["search:OpenAI:GPT-4", "search:Artificial:GPT-4"]
        );
    }

    #[tokio::test]
    async fn test_limit_caps_each_subreddit() {
        let mut source = FakeSource::default();
        source.search.insert("a".into(), FakeSource::submissions("a", 6));
        source.search.insert("b".into(), FakeSource::submissions("b", 6));

        let posts = SearchFetcher::new(&source)
            .search_posts("rust", &names(&["a", "b"]), 2)
            .await
            .unwrap();

        assert_eq!(posts.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_before_any_call() {
        let source = FakeSource::default();

        let result = SearchFetcher::new(&source)
            .search_posts("", &names(&["OpenAI"]), 10)
            .await;

        assert!(matches!(result, Err(FetchError::InvalidInput(_))));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_shared_validation_applies_to_search() {
        let source = FakeSource::default();
        let fetcher = SearchFetcher::new(&source);

        assert!(matches!(
            fetcher.search_posts("q", &[], 1).await,
            Err(FetchError::InvalidInput(_))
        ));
        assert!(matches!(
            fetcher.search_posts("q", &names(&["ok"]), 0).await,
            Err(FetchError::InvalidInput(_))
        ));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_api_failure_is_returned() {
        let mut source = FakeSource::default();
        source.failing.push("OpenAI".into());

        let result = SearchFetcher::new(&source)
            .search_posts("GPT-4", &names(&["OpenAI"]), 10)
            .await;

        assert!(matches!(result, Err(FetchError::Api(_))));
    }
}
