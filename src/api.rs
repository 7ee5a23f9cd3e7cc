//! Resource client: every server call the core makes goes through here.
//!
//! Requests are issued as `crux_http` commands with the session's bearer
//! token attached. The gallery API wraps every payload in a
//! `{ "success": … }` envelope and that flag alone decides success, so
//! response bodies are parsed regardless of HTTP status. Handlers receive
//! `Err` for transport failures, unparsable bodies and `success: false`
//! alike; the error log is the only place failures surface.

use crux_core::Command;
use crux_http::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::events::Event;
use crate::types::{Album, Image};
use crate::{Effect, HttpCmd, HttpResult};

/// Base URL prefixed to every endpoint.
///
/// NOTE: dummy prefix required because `crux_http` requires absolute URLs
/// and rejects relative paths (`RelativeUrlWithoutBase`). The shell strips
/// it again before handing the request to `fetch()`.
pub const BASE_URL: &str = "https://relative";

/// Build a full URL for an endpoint.
///
/// # Example
///
/// ```
/// use gallery_ui_core::api::build_url;
///
/// assert_eq!(build_url("/albums"), "https://relative/albums");
/// ```
pub fn build_url(endpoint: &str) -> String {
    format!("{BASE_URL}{endpoint}")
}

/// Entry-scoped path under an endpoint.
///
/// # Example
///
/// ```
/// use gallery_ui_core::api::item_path;
///
/// assert_eq!(item_path("/albums", 7), "/albums/7");
/// ```
pub fn item_path(endpoint: &str, id: u32) -> String {
    format!("{endpoint}/{id}")
}

/// Verbs the gallery API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
    Patch,
}

/// Request body handed to the client by a list's input handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Pre-serialized JSON, sent with an explicit JSON content type.
    Json(String),
    /// Multipart form data; the form owns content type and boundary.
    Multipart(MultipartForm),
}

// Nothing here needs per-request boundaries; a fixed one keeps the
// encoding deterministic.
const MULTIPART_BOUNDARY: &str = "gallery-ui-core-boundary";

/// A single-file `multipart/form-data` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartForm {
    field: String,
    file_name: String,
    content: Vec<u8>,
}

impl MultipartForm {
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            content,
        }
    }

    /// Content type carrying the boundary, for the request header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}")
    }

    /// Encode the single file part between boundary delimiters.
    pub fn encode(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(self.content.len() + 256);
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                escape_part_name(&self.field),
                escape_part_name(&self.file_name)
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(&self.content);
        body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
        body
    }
}

/// Part names land in a quoted string inside the part header; escape the
/// characters that would break it, the way browser form encoding does
/// (`"`, CR and LF become percent escapes).
fn escape_part_name(raw: &str) -> String {
    raw.replace('\r', "%0D").replace('\n', "%0A").replace('"', "%22")
}

/// Response envelope for calls that return entries.
pub trait Envelope: DeserializeOwned {
    type Item;

    fn success(&self) -> bool;
    fn into_items(self) -> Vec<Self::Item>;
}

/// Envelope of `GET`/`POST` on the albums endpoint.
#[derive(Debug, Deserialize)]
pub struct AlbumsEnvelope {
    success: bool,
    #[serde(default)]
    albums: Vec<Album>,
}

impl Envelope for AlbumsEnvelope {
    type Item = Album;

    fn success(&self) -> bool {
        self.success
    }

    fn into_items(self) -> Vec<Album> {
        self.albums
    }
}

/// Envelope of `GET`/`POST` on an image list endpoint.
#[derive(Debug, Deserialize)]
pub struct ImagesEnvelope {
    success: bool,
    #[serde(default)]
    images: Vec<Image>,
}

impl Envelope for ImagesEnvelope {
    type Item = Image;

    fn success(&self) -> bool {
        self.success
    }

    fn into_items(self) -> Vec<Image> {
        self.images
    }
}

/// Acknowledgement envelope of `DELETE` and `PATCH`; extra fields such as
/// the deleted id are ignored.
#[derive(Debug, Deserialize)]
struct AckEnvelope {
    success: bool,
}

/// Issue a request whose response carries entries (listing and creation)
/// and hand the parsed outcome to `make_event`.
pub fn request_items<E, F>(
    method: Method,
    endpoint: &str,
    token: &str,
    body: Option<RequestBody>,
    make_event: F,
) -> Command<Effect, Event>
where
    E: Envelope + 'static,
    F: Fn(Result<Vec<E::Item>, String>) -> Event + Send + 'static,
{
    let context = endpoint.to_string();
    send(method, endpoint, token, body, move |result| {
        let outcome = parse_body::<E>(&context, result).and_then(|envelope| {
            if envelope.success() {
                Ok(envelope.into_items())
            } else {
                Err(format!("{context}: server reported failure"))
            }
        });
        match &outcome {
            Ok(items) => log::debug!("{context}: received {} entries", items.len()),
            Err(e) => log::error!("request failed: {e}"),
        }
        make_event(outcome)
    })
}

/// Issue a request answered by a bare acknowledgement (deletes, renames).
pub fn request_ack<F>(
    method: Method,
    endpoint: &str,
    token: &str,
    body: Option<RequestBody>,
    make_event: F,
) -> Command<Effect, Event>
where
    F: Fn(Result<(), String>) -> Event + Send + 'static,
{
    let context = endpoint.to_string();
    send(method, endpoint, token, body, move |result| {
        let outcome = parse_body::<AckEnvelope>(&context, result).and_then(|envelope| {
            if envelope.success {
                Ok(())
            } else {
                Err(format!("{context}: server reported failure"))
            }
        });
        match &outcome {
            Ok(()) => log::debug!("{context}: acknowledged"),
            Err(e) => log::error!("request failed: {e}"),
        }
        make_event(outcome)
    })
}

fn send<F>(
    method: Method,
    endpoint: &str,
    token: &str,
    body: Option<RequestBody>,
    make_event: F,
) -> Command<Effect, Event>
where
    F: Fn(HttpResult<Response<Vec<u8>>>) -> Event + Send + 'static,
{
    let url = build_url(endpoint);
    let mut request = match method {
        Method::Get => HttpCmd::get(url),
        Method::Post => HttpCmd::post(url),
        Method::Delete => HttpCmd::delete(url),
        Method::Patch => HttpCmd::patch(url),
    };

    request = request.header("Authorization", format!("Bearer {token}"));

    request = match body {
        // JSON content type is only set for JSON bodies, matching the
        // server's expectations for the multipart case.
        Some(RequestBody::Json(json)) => request
            .header("Content-Type", "application/json")
            .body_string(json),
        Some(RequestBody::Multipart(form)) => request
            .header("Content-Type", form.content_type())
            .body_bytes(form.encode()),
        None => request,
    };

    request.build().then_send(make_event)
}

/// Parse the response body as JSON without consulting the HTTP status;
/// the envelope decides.
fn parse_body<T: DeserializeOwned>(
    context: &str,
    result: HttpResult<Response<Vec<u8>>>,
) -> Result<T, String> {
    match result {
        Ok(mut response) => match response.take_body() {
            Some(body) => serde_json::from_slice(&body)
                .map_err(|e| format!("{context}: cannot parse response: {e}")),
            None => Err(format!("{context}: empty response body")),
        },
        Err(e) => Err(format!("{context}: {e}")),
    }
}

// Note: parse_body is not unit-tested directly because crux_http::Response
// has a private constructor. Envelope and body handling are covered below;
// the request flow is exercised through the update handler tests.
