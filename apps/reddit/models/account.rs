use serde::Deserialize;

/// Body of `/api/v1/access_token`. Reddit reports bad credentials with a 200
/// and an `error` field instead of a token.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Me {
    pub name: String,
    pub id: Option<String>,
}
