// Catalog API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, JSON decoding, and
// status-to-error mapping. Endpoint groups (products, taxonomy) are
// implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Header json-server uses to report the unpaginated match count.
pub(crate) const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// json-server and most Express backends answer errors with `{ "message": ... }`
/// or `{ "error": ... }`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Async client for the storefront catalog API.
///
/// All methods return decoded payloads; non-success statuses surface as
/// [`Error::Api`] and undecodable bodies as [`Error::Deserialization`].
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the API root (e.g. `http://localhost:8080`); resource
    /// segments such as `products` are appended to it.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Normalise the base path to end in `/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments (e.g. `["products", "7"]`) to the base URL.
    ///
    /// Each segment is percent-encoded on its own, so a `/`, `?` or `#`
    /// inside an id stays part of that one segment. Bare `.` and `..` segments
    /// are dropped by `url`, so callers reject them first.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let (_, value) = Self::handle_response(resp).await?;
        Ok(value)
    }

    /// GET with query parameters, also returning the response headers
    /// (paginated endpoints carry their total count there).
    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &[&str],
        params: &[(&str, String)],
    ) -> Result<(HeaderMap, T), Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        let (_, value) = Self::handle_response(resp).await?;
        Ok(value)
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self.http.patch(url).json(body).send().await?;
        let (_, value) = Self::handle_response(resp).await?;
        Ok(value)
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<(HeaderMap, T), Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let headers = resp.headers().clone();
        let body = resp.text().await?;
        trace!(bytes = body.len(), "response body received");

        let value = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })?;
        Ok((headers, value))
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Read the total-count header, if present and numeric.
pub(crate) fn total_count(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn base_url_gets_trailing_slash() {
        let client =
            CatalogClient::from_reqwest("http://localhost:8080/api", reqwest::Client::new())
                .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");
        assert_eq!(
            client.url(&["products", "7"]).unwrap().as_str(),
            "http://localhost:8080/api/products/7"
        );
    }

    #[test]
    fn segments_are_encoded_one_by_one() {
        let client =
            CatalogClient::from_reqwest("http://localhost:8080", reqwest::Client::new()).unwrap();
        assert_eq!(
            client.url(&["products", "a/b?x=1#y"]).unwrap().as_str(),
            "http://localhost:8080/products/a%2Fb%3Fx=1%23y"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = CatalogClient::from_reqwest("not a url", reqwest::Client::new());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn total_count_parses_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(total_count(&headers), None);
        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from_static("57"));
        assert_eq!(total_count(&headers), Some(57));
        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from_static("many"));
        assert_eq!(total_count(&headers), None);
    }
}
