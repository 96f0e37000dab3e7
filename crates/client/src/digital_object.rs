//! REST API client for Digital Object records.
//!
//! Wraps the repository-scoped `/repositories/{repo}/digital_objects`
//! endpoints: id listing, paged listing, fetch, create, badge update
//! and delete. Success responses with a known shape are decoded into
//! typed envelopes; fetched records are passed through as verbatim
//! JSON. Service errors are carried untouched in
//! [`DigitalObjectError::Service`] so callers see exactly what the
//! backend said.

use serde::Deserialize;
use serde_json::{Map, Value};

use aspace_core::file_version::FileVersion;
use aspace_core::record::{self, RecordError};
use aspace_core::types::DbId;

use crate::session::Session;

/// Client for the Digital Object endpoints of one backend.
pub struct DigitalObjectApi {
    session: Session,
}

/// Page selection for [`DigitalObjectApi::list_page`].
///
/// Defaults to the first page of ten records. No bounds are checked
/// client-side; an out-of-range page yields an empty result set per
/// service semantics.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

/// Paging envelope returned by the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct PageEnvelope {
    pub first_page: u32,
    pub last_page: u32,
    pub this_page: u32,
    /// Total matching records across all pages.
    pub total: u64,
    /// Records on this page, verbatim.
    #[serde(default)]
    pub results: Vec<Value>,
}

/// Envelope returned after a create or update.
#[derive(Debug, Deserialize)]
pub struct SaveResponse {
    /// `"Created"` or `"Updated"`.
    pub status: String,
    /// Server-assigned numeric id.
    pub id: DbId,
    /// Optimistic-concurrency counter, incremented on each update.
    pub lock_version: i64,
    pub stale: Option<bool>,
    /// Canonical URI of the record.
    pub uri: String,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Envelope returned after a delete.
#[derive(Debug, Deserialize)]
pub struct DeleteResponse {
    /// `"Deleted"`.
    pub status: String,
    pub id: DbId,
}

/// Errors from the Digital Object API layer.
#[derive(Debug, thiserror::Error)]
pub enum DigitalObjectError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status; the decoded error
    /// payload is carried verbatim.
    #[error("service error ({status}): {payload}")]
    Service {
        /// HTTP status code.
        status: u16,
        /// The backend's JSON error payload, uninterpreted.
        payload: Value,
    },

    /// The record targeted by a read-modify-write does not exist.
    #[error("digital object {object_id} not found in repository {repo_id}")]
    NotFound { repo_id: DbId, object_id: DbId },

    /// A fetched or assembled record payload could not be manipulated.
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl DigitalObjectApi {
    /// Create a client on top of an authenticated session.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// The underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// List the ids of every Digital Object in a repository.
    ///
    /// One call, no pagination (`all_ids=true`).
    pub async fn list_ids(&self, repo_id: DbId) -> Result<Vec<DbId>, DigitalObjectError> {
        let path = format!("{}?all_ids=true", collection_path(repo_id));
        parse_response(self.session.get(&path).await?).await
    }

    /// Fetch one page of Digital Objects.
    pub async fn list_page(
        &self,
        repo_id: DbId,
        paging: Pagination,
    ) -> Result<PageEnvelope, DigitalObjectError> {
        let path = format!(
            "{}?page={}&page_size={}",
            collection_path(repo_id),
            paging.page,
            paging.page_size
        );
        parse_response(self.session.get(&path).await?).await
    }

    /// Fetch one Digital Object by id, as verbatim JSON.
    pub async fn get(&self, repo_id: DbId, object_id: DbId) -> Result<Value, DigitalObjectError> {
        parse_response(self.session.get(&record_path(repo_id, object_id)).await?).await
    }

    /// Create a Digital Object from the default template.
    ///
    /// `overrides` are shallow-merged onto the template, then `title`
    /// is forced (an override's `title` loses to the argument), then
    /// `file_versions` are appended in order. The template's
    /// `digital_object_id` is a fresh UUID, generated before the merge,
    /// so an override may replace it.
    pub async fn create(
        &self,
        title: &str,
        repo_id: DbId,
        overrides: &Map<String, Value>,
        file_versions: &[FileVersion],
    ) -> Result<SaveResponse, DigitalObjectError> {
        let body = record::build_digital_object(title, overrides, file_versions)?;

        tracing::debug!(repo_id, title, "Creating digital object");

        parse_response(self.session.post_json(&collection_path(repo_id), &body).await?).await
    }

    /// Attach a badge image to an existing Digital Object.
    ///
    /// Fetches the current record, appends an embedded
    /// non-representative [`FileVersion`] for `badge_uri`, and posts
    /// the whole record back. This read-modify-write is not atomic:
    /// `lock_version` is neither checked nor propagated, so concurrent
    /// writers can lose updates.
    pub async fn add_badge(
        &self,
        repo_id: DbId,
        object_id: DbId,
        badge_uri: &str,
    ) -> Result<SaveResponse, DigitalObjectError> {
        let mut current = match self.get(repo_id, object_id).await {
            Ok(record) => record,
            Err(DigitalObjectError::Service { status: 404, .. }) => {
                return Err(DigitalObjectError::NotFound { repo_id, object_id });
            }
            Err(e) => return Err(e),
        };

        record::attach_badge(&mut current, badge_uri)?;

        tracing::debug!(repo_id, object_id, badge_uri, "Adding badge to digital object");

        parse_response(
            self.session
                .post_json(&record_path(repo_id, object_id), &current)
                .await?,
        )
        .await
    }

    /// Delete a Digital Object by id.
    pub async fn delete(
        &self,
        repo_id: DbId,
        object_id: DbId,
    ) -> Result<DeleteResponse, DigitalObjectError> {
        tracing::debug!(repo_id, object_id, "Deleting digital object");

        parse_response(self.session.delete(&record_path(repo_id, object_id)).await?).await
    }
}

// ---- path and response helpers ----

fn collection_path(repo_id: DbId) -> String {
    format!("/repositories/{repo_id}/digital_objects")
}

fn record_path(repo_id: DbId, object_id: DbId) -> String {
    format!("/repositories/{repo_id}/digital_objects/{object_id}")
}

/// Decode a successful response into `T`, or turn a non-2xx response
/// into [`DigitalObjectError::Service`] carrying the backend's payload.
async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, DigitalObjectError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DigitalObjectError::Service {
            status: status.as_u16(),
            payload: error_payload(&body),
        });
    }
    Ok(response.json::<T>().await?)
}

/// Decode an error body as JSON, wrapping non-JSON bodies so the
/// payload is always an object with an `error` key.
fn error_payload(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| serde_json::json!({ "error": body }))
}
