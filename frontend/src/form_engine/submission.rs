//! Save pipeline: serialize the record, write it once, interpret the reply.
//!
//! The pipeline is split into `begin` and `complete` so that a UI can release
//! its borrow of the form while the request is outstanding.

use super::field_state::FormRecord;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Shown in the alert region after any failed save
pub const SAVE_ERROR_ALERT: &str = "An error occurred during save.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMethod {
    Create,
    Update,
}

impl WriteMethod {
    pub fn as_http(self) -> &'static str {
        match self {
            Self::Create => "POST",
            Self::Update => "PUT",
        }
    }
}

/// A single outbound JSON write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRequest {
    pub method: WriteMethod,
    pub path: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request could not be built: {0}")]
    Request(String),
}

/// Carries write requests to the server
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: WriteRequest) -> Result<HttpResponse, TransportError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("a save is already in progress")]
    AlreadyInFlight,
    #[error("failed to serialize record: {0}")]
    Serialization(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("server rejected the save with status {status}")]
    Rejected { status: u16 },
    #[error("server response could not be read: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionStatus<R> {
    Idle,
    InFlight,
    Succeeded(R),
    Failed(SubmissionError),
}

impl<R> SubmissionStatus<R> {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    pub fn alert(&self) -> Option<&'static str> {
        match self {
            Self::Failed(_) => Some(SAVE_ERROR_ALERT),
            _ => None,
        }
    }
}

/// A write that has been issued and not yet resolved
#[derive(Debug)]
pub struct PendingSubmission<R> {
    generation: u64,
    submitted: R,
    request: WriteRequest,
}

impl<R> PendingSubmission<R> {
    pub fn request(&self) -> &WriteRequest {
        &self.request
    }
}

#[derive(Debug)]
pub struct SubmissionPipeline<R> {
    status: SubmissionStatus<R>,
    generation: u64,
}

impl<R: FormRecord> SubmissionPipeline<R> {
    pub fn new() -> Self {
        Self {
            status: SubmissionStatus::Idle,
            generation: 0,
        }
    }

    pub fn status(&self) -> &SubmissionStatus<R> {
        &self.status
    }

    /// Start a save of `record`; refuses while another save is outstanding
    pub fn begin(&mut self, record: &R) -> Result<PendingSubmission<R>, SubmissionError> {
        if self.status.is_in_flight() {
            log::warn!("ignoring submit while a save to {} is in flight", R::COLLECTION);
            return Err(SubmissionError::AlreadyInFlight);
        }
        self.status = SubmissionStatus::Idle;

        let request = match build_request(record) {
            Ok(request) => request,
            Err(err) => {
                log::error!("could not prepare save: {}", err);
                self.status = SubmissionStatus::Failed(err.clone());
                return Err(err);
            }
        };

        log::info!("saving record: {} {}", request.method.as_http(), request.path);
        self.status = SubmissionStatus::InFlight;
        Ok(PendingSubmission {
            generation: self.generation,
            submitted: record.clone(),
            request,
        })
    }

    /// Resolve `pending` with the transport outcome.
    ///
    /// Returns `None` when the pending save belongs to an earlier generation of
    /// the form, in which case nothing is changed.
    pub fn complete(
        &mut self,
        pending: PendingSubmission<R>,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Option<Result<R, SubmissionError>> {
        if pending.generation != self.generation || !self.status.is_in_flight() {
            log::debug!("discarding stale save outcome for {}", pending.request.path);
            return None;
        }

        let result = interpret(&pending.submitted, outcome);
        self.status = match &result {
            Ok(saved) => {
                log::info!("saved record {:?}", saved.identifier());
                SubmissionStatus::Succeeded(saved.clone())
            }
            Err(err) => {
                log::warn!("save failed: {}", err);
                SubmissionStatus::Failed(err.clone())
            }
        };
        Some(result)
    }

    /// Forget any outstanding save; its completion will be discarded
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.status = SubmissionStatus::Idle;
    }
}

impl<R: FormRecord> Default for SubmissionPipeline<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn build_request<R: FormRecord>(record: &R) -> Result<WriteRequest, SubmissionError> {
    let body = serde_json::to_string(record)
        .map_err(|e| SubmissionError::Serialization(e.to_string()))?;
    let method = if record.identifier().is_some() {
        WriteMethod::Update
    } else {
        WriteMethod::Create
    };
    Ok(WriteRequest {
        method,
        path: record.resource_path(),
        body,
    })
}

fn interpret<R: FormRecord>(
    submitted: &R,
    outcome: Result<HttpResponse, TransportError>,
) -> Result<R, SubmissionError> {
    let response = outcome?;
    if !response.is_success() {
        return Err(SubmissionError::Rejected {
            status: response.status,
        });
    }
    finalize(submitted, &response.body)
}

/// Overlay the fields the server echoed back onto the submitted record
fn finalize<R: FormRecord>(submitted: &R, body: &str) -> Result<R, SubmissionError> {
    if body.trim().is_empty() {
        return Ok(submitted.clone());
    }

    let saved = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(saved)) => saved,
        Ok(_) => {
            return Err(SubmissionError::MalformedResponse(
                "expected a JSON object".to_string(),
            ))
        }
        Err(e) => return Err(SubmissionError::MalformedResponse(e.to_string())),
    };

    let mut merged = serde_json::to_value(submitted)
        .map_err(|e| SubmissionError::Serialization(e.to_string()))?;
    if let Value::Object(fields) = &mut merged {
        fields.extend(saved);
    }
    serde_json::from_value(merged).map_err(|e| SubmissionError::MalformedResponse(e.to_string()))
}
