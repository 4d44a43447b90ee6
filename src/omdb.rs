//! OMDb title-lookup client.
//!
//! Performs exactly one outbound request per lookup: no caching, no
//! batching, no retries, no rate limiting. A negative match is ordinary
//! control flow ([`Lookup::NotFound`]); only transport-level faults (bad
//! status, undecodable body, connection errors) become [`Error::Upstream`].

use serde::Deserialize;

use moviweb_core::{Error, Result};

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct OmdbClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }

    /// Look up a title. The `title` must already be trimmed and non-empty;
    /// handlers validate before calling.
    pub async fn lookup(&self, title: &str) -> Result<Lookup> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("t", title), ("apikey", &self.api_key)])
            .send()
            .await
            .map_err(|e| Error::upstream("omdb", format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(Error::upstream("omdb", format!("status {status}")));
        }

        let body: OmdbResponse = resp
            .json()
            .await
            .map_err(|e| Error::upstream("omdb", format!("parse error: {e}")))?;

        if !body.response.eq_ignore_ascii_case("true") {
            tracing::debug!(title, "OMDb reported no match");
            return Ok(Lookup::NotFound);
        }

        Ok(Lookup::Found(TitleMetadata {
            title: body.title.unwrap_or_else(|| title.to_string()),
            director: body.director.as_deref().and_then(clean_field),
            year: body.year.as_deref().and_then(parse_year),
            poster_url: body.poster.as_deref().and_then(clean_field),
        }))
    }
}

// ---------------------------------------------------------------------------
// Lookup outcome
// ---------------------------------------------------------------------------

/// Result of a title lookup that reached the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The service matched the title; fields are normalized.
    Found(TitleMetadata),
    /// The service answered but reported no match.
    NotFound,
}

/// Normalized metadata for a matched title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMetadata {
    pub title: String,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub poster_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    /// "True" on a match, "False" otherwise.
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

/// Map the service's `"N/A"` placeholder (and empty strings) to `None`.
fn clean_field(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "N/A" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a year only when the raw value is entirely a decimal numeral.
///
/// Ranges like "2010–2012" and placeholders like "N/A" stay unset.
fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        trimmed.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_plain_numeral() {
        assert_eq!(parse_year("1999"), Some(1999));
        assert_eq!(parse_year(" 2010 "), Some(2010));
    }

    #[test]
    fn year_placeholder_and_ranges_unset() {
        assert_eq!(parse_year("N/A"), None);
        assert_eq!(parse_year("2010–2012"), None);
        assert_eq!(parse_year("2010-"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn clean_field_drops_placeholder() {
        assert_eq!(clean_field("N/A"), None);
        assert_eq!(clean_field("  "), None);
        assert_eq!(
            clean_field("Christopher Nolan"),
            Some("Christopher Nolan".to_string())
        );
    }

    #[test]
    fn response_deserializes_negative_match() {
        let json = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let body: OmdbResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.response, "False");
        assert!(body.title.is_none());
    }

    #[test]
    fn response_deserializes_match() {
        let json = r#"{
            "Title": "Inception",
            "Year": "2010",
            "Director": "Christopher Nolan",
            "Poster": "https://example.com/p.jpg",
            "Response": "True"
        }"#;
        let body: OmdbResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.title.as_deref(), Some("Inception"));
        assert_eq!(body.year.as_deref().and_then(parse_year), Some(2010));
    }
}
