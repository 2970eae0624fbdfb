//! Roadmap backend client — the only place that talks HTTP.
//!
//! `RoadmapApi` is the seam the controller depends on; `HttpRoadmapApi` is the
//! reqwest implementation. No retries: every failure goes straight back to the
//! caller, who decides what to show.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::models::assessment::ReadinessAssessment;
use crate::models::resume::ResumeFile;
use crate::models::roadmap::Roadmap;

pub mod wire;

use wire::{
    AssessRequest, AssessResponse, ExtractSkillsRequest, ExtractSkillsResponse,
    ManualSessionRequest, RoadmapRequest, RoadmapResponse, SessionResponse,
};

pub const UPLOAD_RESUME_PATH: &str = "/upload-resume";
pub const EXTRACT_SKILLS_PATH: &str = "/extract-skills";
pub const MANUAL_SESSION_PATH: &str = "/create-manual-session";
pub const ASSESS_READINESS_PATH: &str = "/assess-target-role-readiness";
pub const GENERATE_ROADMAP_PATH: &str = "/generate-roadmap";

/// Longest response body kept in a `Decode` error.
const MAX_ERROR_BODY: usize = 512;

/// Operations the backend exposes. Implement this to swap transports without
/// touching the controller.
#[async_trait]
pub trait RoadmapApi: Send + Sync {
    /// Returns the new session id.
    async fn upload_resume(&self, file: &ResumeFile) -> Result<String, ClientError>;

    async fn extract_skills(&self, session_id: &str) -> Result<Vec<String>, ClientError>;

    /// Returns the new session id.
    async fn create_manual_session(&self, skills: &[String]) -> Result<String, ClientError>;

    async fn assess_readiness(
        &self,
        request: &AssessRequest,
    ) -> Result<ReadinessAssessment, ClientError>;

    async fn generate_roadmap(&self, request: &RoadmapRequest) -> Result<Roadmap, ClientError>;
}

#[derive(Clone)]
pub struct HttpRoadmapApi {
    client: Client,
    base_url: String,
}

impl HttpRoadmapApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!("POST {path}");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        read_envelope(path, response).await
    }
}

/// Reads a JSON envelope regardless of status; the backend reports its own
/// failures as `{success: false, error}` with 4xx/5xx codes.
async fn read_envelope<T: DeserializeOwned>(
    path: &str,
    response: Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| {
        warn!("{path} returned unreadable body (status {status}): {e}");
        let mut body = body;
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|i| body.is_char_boundary(*i))
                .unwrap_or(0);
            body.truncate(cut);
        }
        ClientError::Decode {
            status: status.as_u16(),
            body,
        }
    })
}

fn server_failure(error: Option<String>, fallback: &str) -> ClientError {
    ClientError::Server(
        error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string()),
    )
}

fn session_from(response: SessionResponse, fallback: &str) -> Result<String, ClientError> {
    match response {
        SessionResponse {
            success: true,
            session_id: Some(id),
            ..
        } if !id.is_empty() => Ok(id),
        SessionResponse { error, .. } => Err(server_failure(error, fallback)),
    }
}

#[async_trait]
impl RoadmapApi for HttpRoadmapApi {
    async fn upload_resume(&self, file: &ResumeFile) -> Result<String, ClientError> {
        let part = multipart::Part::bytes(file.content.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(file.mime_type())?;
        let form = multipart::Form::new().part("resume", part);

        debug!("POST {UPLOAD_RESUME_PATH} ({} bytes)", file.content.len());
        let response = self
            .client
            .post(self.url(UPLOAD_RESUME_PATH))
            .multipart(form)
            .send()
            .await?;

        let envelope: SessionResponse = read_envelope(UPLOAD_RESUME_PATH, response).await?;
        session_from(envelope, "Upload failed")
    }

    async fn extract_skills(&self, session_id: &str) -> Result<Vec<String>, ClientError> {
        let envelope: ExtractSkillsResponse = self
            .post_json(EXTRACT_SKILLS_PATH, &ExtractSkillsRequest { session_id })
            .await?;

        if envelope.success {
            Ok(envelope.skills)
        } else {
            Err(server_failure(envelope.error, "Failed to extract skills"))
        }
    }

    async fn create_manual_session(&self, skills: &[String]) -> Result<String, ClientError> {
        let request = ManualSessionRequest {
            skills: skills.join(" "),
        };
        let envelope: SessionResponse = self.post_json(MANUAL_SESSION_PATH, &request).await?;
        session_from(envelope, "Failed to create session for manual skills!")
    }

    async fn assess_readiness(
        &self,
        request: &AssessRequest,
    ) -> Result<ReadinessAssessment, ClientError> {
        let envelope: AssessResponse = self.post_json(ASSESS_READINESS_PATH, request).await?;

        if !envelope.success {
            return Err(server_failure(
                envelope.error,
                "Failed to assess role readiness",
            ));
        }

        let role = envelope
            .assessment
            .or(envelope.role_readiness)
            .map(|r| r.role_assessment);
        let industry = envelope.industry_evaluation;

        if role.is_none() && industry.is_none() {
            return Err(ClientError::Decode {
                status: 200,
                body: "success without an assessment payload".to_string(),
            });
        }

        Ok(ReadinessAssessment { role, industry })
    }

    async fn generate_roadmap(&self, request: &RoadmapRequest) -> Result<Roadmap, ClientError> {
        let envelope: RoadmapResponse = self.post_json(GENERATE_ROADMAP_PATH, request).await?;

        if !envelope.success {
            return Err(server_failure(envelope.error, "Roadmap generation failed"));
        }

        Ok(Roadmap {
            phases: envelope.roadmap,
            resources: envelope.resources,
            time_estimates: envelope.time_estimates,
        })
    }
}
