use crate::error::{RedditError, Result};
use crate::models::account::{Me, TokenResponse};
use crate::models::listing::Listing;
use crate::models::posts::Submission;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

pub const AUTH_BASE_URL: &str = "https://www.reddit.com";
pub const API_BASE_URL: &str = "https://oauth.reddit.com";

const DEFAULT_USER_AGENT: &str = concat!("reddit-harvester/", env!("CARGO_PKG_VERSION"), " (reqwest)");

/// Reddit caps a single listing page at 100 children.
const MAX_PAGE_SIZE: u32 = 100;

/// Script-app credentials. Every field may be missing; login then fails at
/// the token endpoint rather than here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub user_agent: Option<String>,
}

/// The two read operations the harvester consumes.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Up to `limit` posts from the subreddit's hot listing.
    async fn hot(&self, subreddit: &str, limit: u32) -> Result<Vec<Submission>>;

    /// Up to `limit` posts matching `query` inside the subreddit, by relevance.
    async fn search(&self, subreddit: &str, query: &str, limit: u32) -> Result<Vec<Submission>>;
}

/// Authenticated Reddit OAuth client.
pub struct RedditApi {
    client: Client,
    api_base: Url,
    access_token: String,
}

impl RedditApi {
    pub async fn login(credentials: &Credentials) -> Result<Self> {
        Self::login_with_endpoints(credentials, AUTH_BASE_URL, API_BASE_URL).await
    }

    /// Password-grant login against explicit base URLs.
    #[instrument(skip(credentials), fields(username = ?credentials.username))]
    pub async fn login_with_endpoints(
        credentials: &Credentials,
        auth_base: &str,
        api_base: &str,
    ) -> Result<Self> {
        let api_base = Url::parse(api_base.trim_end_matches('/'))
            .map_err(|e| RedditError::Network(format!("invalid API base URL {api_base}: {e}")))?;
        if api_base.cannot_be_a_base() {
            return Err(RedditError::Network(format!("invalid API base URL {api_base}")));
        }

        let client = Client::builder()
            .default_headers(Self::default_headers(credentials.user_agent.as_deref()))
            .build()?;

        let url = format!("{}/api/v1/access_token", auth_base.trim_end_matches('/'));
        let form = [
            ("grant_type", "password"),
            ("username", credentials.username.as_deref().unwrap_or_default()),
            ("password", credentials.password.as_deref().unwrap_or_default()),
        ];

        let response = client
            .post(&url)
            .basic_auth(
                credentials.client_id.as_deref().unwrap_or_default(),
                credentials.client_secret.as_deref(),
            )
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(RedditError::Auth(format!("HTTP {status}: {body}")));
        }
        let token: TokenResponse = Self::check_status(response).await?.json().await?;

        debug!(scope = ?token.scope, expires_in = ?token.expires_in, "Token endpoint answered");

        let access_token = match (token.access_token, token.error) {
            (Some(access_token), _) if !access_token.is_empty() => access_token,
            (_, Some(error)) => return Err(RedditError::Auth(error)),
            _ => {
                return Err(RedditError::Auth(
                    "token response carried no access token".to_string(),
                ));
            }
        };

        info!("Reddit API authenticated successfully");

        Ok(Self {
            client,
            api_base,
            access_token,
        })
    }

    fn default_headers(user_agent: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let value = user_agent
            .filter(|ua| !ua.is_empty())
            .and_then(|ua| HeaderValue::from_str(ua).ok())
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(USER_AGENT, value);
        headers
    }

    /// Identity of the authenticated account.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<Me> {
        let url = self.endpoint(&["api", "v1", "me"])?;
        self.get(url, &[]).await
    }

    /// Appends `segments` to the API base, percent-encoding each one so a
    /// name can never change which endpoint is hit.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| RedditError::Network(format!("{} cannot carry a path", self.api_base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T>(&self, url: Url, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!(url = %url, "Fetching data from endpoint");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        let body = Self::check_status(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RedditError::Api {
            status: status.as_u16(),
            message: body,
        })
    }

    /// Follows the `after` cursor until `limit` links were collected, the
    /// cursor runs out, or a page comes back empty.
    async fn fetch_listing(
        &self,
        endpoint: Url,
        params: &[(&str, String)],
        limit: u32,
    ) -> Result<Vec<Submission>> {
        let limit = limit as usize;
        let mut submissions = Vec::with_capacity(limit.min(MAX_PAGE_SIZE as usize));
        let mut after: Option<String> = None;

        while submissions.len() < limit {
            let remaining = limit - submissions.len();
            let page_size = remaining.min(MAX_PAGE_SIZE as usize);

            let mut query: Vec<(&str, String)> = params.to_vec();
            query.push(("limit", page_size.to_string()));
            query.push(("raw_json", "1".to_string()));
            if let Some(cursor) = &after {
                query.push(("after", cursor.clone()));
            }

            let listing: Listing<Submission> = self.get(endpoint.clone(), &query).await?;
            let (mut page, next) = listing.into_links();
            debug!(
                endpoint = %endpoint.path(),
                fetched = page.len(),
                after = ?next,
                "Fetched listing page"
            );

            if page.is_empty() {
                break;
            }
            page.truncate(remaining);
            submissions.extend(page);

            match next {
                Some(cursor) => after = Some(cursor),
                None => break,
            }
        }

        Ok(submissions)
    }
}

#[async_trait]
impl PostSource for RedditApi {
    #[instrument(skip(self))]
    async fn hot(&self, subreddit: &str, limit: u32) -> Result<Vec<Submission>> {
        let endpoint = self.endpoint(&["r", subreddit, "hot"])?;
        self.fetch_listing(endpoint, &[], limit).await
    }

    #[instrument(skip(self))]
    async fn search(&self, subreddit: &str, query: &str, limit: u32) -> Result<Vec<Submission>> {
        let endpoint = self.endpoint(&["r", subreddit, "search"])?;
        let params = [
            ("q", query.to_string()),
            ("restrict_sr", "on".to_string()),
            ("sort", "relevance".to_string()),
            ("t", "all".to_string()),
        ];
        self.fetch_listing(endpoint, &params, limit).await
    }
}
