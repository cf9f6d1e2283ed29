//! HTTP lookup against the Unsplash API.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use pagesmith_traits::{ImageLookup, MediaError};
use regex::{NoExpand, Regex};
use serde_json::Value;

/// Base URL generation sources embed in their placeholders.
pub const UNSPLASH_API_BASE: &str = "https://api.unsplash.com";

/// Environment variable holding the API access key.
pub const ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";

static CLIENT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"client_id=[^&]+").expect("client_id pattern"));

/// Resolves `photos/random` placeholders to the URL of a concrete photo.
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    client: reqwest::Client,
    access_key: String,
    api_base: String,
}

impl UnsplashClient {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_key: access_key.into(),
            api_base: UNSPLASH_API_BASE.to_string(),
        }
    }

    /// Reads the access key from `UNSPLASH_ACCESS_KEY`.
    pub fn from_env() -> Result<Self, MediaError> {
        match std::env::var(ACCESS_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(MediaError::MissingAccessKey),
        }
    }

    /// Sends requests to `api_base` instead of the public API host.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// The URL actually requested for `placeholder`: the real access key
    /// replaces whatever `client_id` the placeholder carries.
    pub fn request_url(&self, placeholder: &str) -> String {
        let url = match placeholder.strip_prefix(UNSPLASH_API_BASE) {
            Some(rest) => format!("{}{}", self.api_base, rest),
            None => placeholder.to_string(),
        };
        let client_id = format!("client_id={}", self.access_key);
        CLIENT_ID.replace(&url, NoExpand(&client_id)).into_owned()
    }
}

/// Picks the image URL out of a `photos/random` response body.
fn image_url(body: &Value) -> Option<&str> {
    let urls = body.get("urls")?;
    ["regular", "small"]
        .iter()
        .filter_map(|size| urls.get(*size).and_then(Value::as_str))
        .find(|url| !url.is_empty())
}

#[async_trait]
impl ImageLookup for UnsplashClient {
    async fn lookup(&self, url: &str) -> Result<String, MediaError> {
        let request_error = |e: reqwest::Error| MediaError::Request {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self
            .client
            .get(self.request_url(url))
            .header("Accept-Version", "v1")
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(request_error)?;
        image_url(&body)
            .map(str::to_string)
            .ok_or_else(|| MediaError::NoImage(url.to_string()))
    }

    fn name(&self) -> &'static str {
        "UnsplashClient"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_url_swaps_client_id() {
        let client = UnsplashClient::new("real-key");
        assert_eq!(
            client.request_url(
                "https://api.unsplash.com/photos/random?query=forest&client_id=PLACEHOLDER&orientation=landscape"
            ),
            "https://api.unsplash.com/photos/random?query=forest&client_id=real-key&orientation=landscape"
        );
    }

    #[test]
    fn test_request_url_uses_api_base() {
        let client = UnsplashClient::new("k").with_api_base("http://localhost:9000/");
        assert_eq!(
            client.request_url("https://api.unsplash.com/photos/random?client_id=x"),
            "http://localhost:9000/photos/random?client_id=k"
        );
    }

    #[test]
    fn test_request_url_without_client_id() {
        let client = UnsplashClient::new("k");
        assert_eq!(
            client.request_url("https://api.unsplash.com/photos/random?query=sky"),
            "https://api.unsplash.com/photos/random?query=sky"
        );
    }

    #[test]
    fn test_image_url_prefers_regular() {
        let body = json!({ "urls": { "small": "s.jpg", "regular": "r.jpg" } });
        assert_eq!(image_url(&body), Some("r.jpg"));

        let body = json!({ "urls": { "small": "s.jpg" } });
        assert_eq!(image_url(&body), Some("s.jpg"));

        assert_eq!(image_url(&json!({ "errors": ["Rate Limit Exceeded"] })), None);
    }
}
