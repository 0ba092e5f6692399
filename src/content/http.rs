//! REST client for the site's content endpoints
//!
//! Endpoints:
//!
//! | Call | Request |
//! |---|---|
//! | list media | `GET /api/media?limit=N&sort=-createdAt&page=P` |
//! | upload | `POST /api/media` multipart `file` + `_payload` `{alt}` |
//! | delete media | `DELETE /api/media/{id}` |
//! | focal point | `PATCH /api/media/{id}` `{focalX, focalY}` |
//! | shows | `GET/POST /api/runway-shows`, `PATCH/DELETE /api/runway-shows/{id}` |
//! | exhibitions | `GET/POST /api/exhibitions`, `PATCH/DELETE /api/exhibitions/{id}` |
//!
//! Ids are sent as percent-encoded path segments. Non-2xx answers become
//! [`ContentError::Status`] carrying the first message from the response body.

use std::time::Duration;
use reqwest::{Method, Url};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use super::schema::{self, RawDoc, RawExhibition, RawMedia, RawPage, RawShow};
use super::{
    ContentApi, ContentError, Exhibition, ExhibitionDraft, ExhibitionPatch, MediaPage, RecordId,
    Result, RunwayShow, ShowDraft, ShowPatch, ValidationError,
};
use crate::config::ApiConfig;
use crate::focal::FocalPoint;
use crate::media::{CompressedImage, MediaId, MediaItem};

const MEDIA: &str = "media";
const SHOWS: &str = "runway-shows";
const EXHIBITIONS: &str = "exhibitions";

/// Blocking HTTP implementation of [`ContentApi`]
#[derive(Debug, Clone)]
pub struct HttpContentApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
    fetch_limit: u32,
}

impl HttpContentApi {
    /// Build a client from the API section of the configuration
    ///
    /// # Errors
    ///
    /// Returns `ContentError::InvalidBaseUrl` if the configured URL cannot
    /// hold a path, or `ContentError::Http` if the TLS backend cannot be
    /// initialised.
    pub fn new(config: &ApiConfig, fetch_limit: u32) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ContentError::InvalidBaseUrl(config.base_url.clone()))?;
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
            token: config.token.clone().filter(|token| !token.is_empty()),
            fetch_limit: fetch_limit.max(1),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// `{base_url}/api/{segments}`, each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // checked in `new`: the base URL always has a path
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    /// Listing endpoint for `collection` with its query parameters
    fn listing(&self, collection: &str, page: u32, sort: Option<&str>) -> Url {
        let mut url = self.endpoint(&[collection]);
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("limit", &self.fetch_limit.to_string())
                .append_pair("page", &page.to_string());
            match sort {
                Some(sort) => query.append_pair("sort", sort),
                None => query.append_pair("depth", "0"),
            };
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "content request");
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn send(builder: RequestBuilder) -> Result<Response> {
        let response = builder.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        let message = schema::error_message(&body).unwrap_or_else(|| {
            status.canonical_reason().unwrap_or("request failed").to_string()
        });
        Err(ContentError::Status {
            status: status.as_u16(),
            message,
        })
    }

    fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        Ok(Self::send(self.request(Method::GET, url))?.json()?)
    }

    fn list_all<R, T>(&self, collection: &str, validate: fn(R) -> std::result::Result<T, ValidationError>) -> Result<Vec<T>>
    where
        R: DeserializeOwned,
    {
        let mut records = Vec::new();
        let mut page = 1;
        loop {
            let raw: RawPage<R> = self.fetch(self.listing(collection, page, None))?;
            for doc in raw.docs {
                records.push(validate(doc)?);
            }
            if !raw.has_next_page {
                return Ok(records);
            }
            page += 1;
        }
    }

    fn send_doc<R, B>(&self, method: Method, url: Url, body: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let response = Self::send(self.request(method, url).json(body))?;
        let envelope: RawDoc<R> = response.json()?;
        Ok(envelope.doc)
    }

    fn delete(&self, collection: &str, id: &str) -> Result<()> {
        Self::send(self.request(Method::DELETE, self.endpoint(&[collection, id])))?;
        Ok(())
    }
}

impl ContentApi for HttpContentApi {
    fn list_media(&self, page: u32) -> Result<MediaPage> {
        let raw: RawPage<RawMedia> = self.fetch(self.listing(MEDIA, page, Some("-createdAt")))?;
        let docs = raw
            .docs
            .into_iter()
            .map(RawMedia::validate)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(MediaPage {
            docs,
            has_next_page: raw.has_next_page,
        })
    }

    fn upload_media(&self, upload: &CompressedImage) -> Result<MediaItem> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)?;
        let payload = json!({ "alt": upload.alt }).to_string();
        let form = Form::new().part("file", part).text("_payload", payload);

        let response = Self::send(self.request(Method::POST, self.endpoint(&[MEDIA])).multipart(form))?;
        let envelope: RawDoc<RawMedia> = response.json()?;
        Ok(envelope.doc.validate()?)
    }

    fn delete_media(&self, id: &MediaId) -> Result<()> {
        self.delete(MEDIA, id.as_str())
    }

    fn update_focal_point(&self, id: &MediaId, point: FocalPoint) -> Result<()> {
        let body = json!({ "focalX": point.x(), "focalY": point.y() });
        let url = self.endpoint(&[MEDIA, id.as_str()]);
        Self::send(self.request(Method::PATCH, url).json(&body))?;
        Ok(())
    }

    fn list_shows(&self) -> Result<Vec<RunwayShow>> {
        self.list_all(SHOWS, RawShow::validate)
    }

    fn create_show(&self, draft: &ShowDraft) -> Result<RunwayShow> {
        let draft = draft.clone().normalize()?;
        let raw: RawShow = self.send_doc(Method::POST, self.endpoint(&[SHOWS]), &draft)?;
        Ok(raw.validate()?)
    }

    fn update_show(&self, id: &RecordId, patch: &ShowPatch) -> Result<RunwayShow> {
        let raw: RawShow = self.send_doc(Method::PATCH, self.endpoint(&[SHOWS, id.as_str()]), patch)?;
        Ok(raw.validate()?)
    }

    fn delete_show(&self, id: &RecordId) -> Result<()> {
        self.delete(SHOWS, id.as_str())
    }

    fn list_exhibitions(&self) -> Result<Vec<Exhibition>> {
        self.list_all(EXHIBITIONS, RawExhibition::validate)
    }

    fn create_exhibition(&self, draft: &ExhibitionDraft) -> Result<Exhibition> {
        let draft = draft.clone().normalize()?;
        let raw: RawExhibition = self.send_doc(Method::POST, self.endpoint(&[EXHIBITIONS]), &draft)?;
        Ok(raw.validate()?)
    }

    fn update_exhibition(&self, id: &RecordId, patch: &ExhibitionPatch) -> Result<Exhibition> {
        let url = self.endpoint(&[EXHIBITIONS, id.as_str()]);
        let raw: RawExhibition = self.send_doc(Method::PATCH, url, patch)?;
        Ok(raw.validate()?)
    }

    fn delete_exhibition(&self, id: &RecordId) -> Result<()> {
        self.delete(EXHIBITIONS, id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            token: Some(String::new()),
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn test_new_normalizes_base_url() {
        let api = HttpContentApi::new(&config("https://studio.example/"), 100).unwrap();
        assert_eq!(api.base_url(), "https://studio.example");
        assert!(api.token.is_none());
    }

    #[test]
    fn test_fetch_limit_never_zero() {
        let api = HttpContentApi::new(&config("http://localhost:3000"), 0).unwrap();
        assert_eq!(api.fetch_limit, 1);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(matches!(
            HttpContentApi::new(&config("studio.example"), 100),
            Err(ContentError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            HttpContentApi::new(&config("mailto:studio@atelier.example"), 100),
            Err(ContentError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_ids_are_encoded_path_segments() {
        let api = HttpContentApi::new(&config("https://studio.example/site/"), 100).unwrap();
        assert_eq!(
            api.endpoint(&[MEDIA, "42"]).as_str(),
            "https://studio.example/site/api/media/42"
        );
        assert_eq!(
            api.endpoint(&[SHOWS, "../media?x=1#top"]).as_str(),
            "https://studio.example/site/api/runway-shows/..%2Fmedia%3Fx=1%23top"
        );
    }

    #[test]
    fn test_listing_query() {
        let api = HttpContentApi::new(&config("http://localhost:3000"), 24).unwrap();
        assert_eq!(
            api.listing(MEDIA, 2, Some("-createdAt")).as_str(),
            "http://localhost:3000/api/media?limit=24&page=2&sort=-createdAt"
        );
        assert_eq!(
            api.listing(EXHIBITIONS, 1, None).as_str(),
            "http://localhost:3000/api/exhibitions?limit=24&page=1&depth=0"
        );
    }

    #[test]
    fn test_unreachable_server_is_http_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let api = HttpContentApi::new(&config(&format!("http://127.0.0.1:{port}")), 100).unwrap();
        assert!(matches!(api.list_media(1), Err(ContentError::Http(_))));
    }
}
