//! Request and response bodies exchanged with the roadmap backend.

use serde::{Deserialize, Serialize};

use crate::models::assessment::{IndustryEvaluation, RoleReadiness};
use crate::models::roadmap::{RoadmapPhase, TimeEstimates};
use crate::models::role::TargetRole;

// ────────────────────────────────────────────────────────────────────────────
// Requests
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ExtractSkillsRequest<'a> {
    pub session_id: &'a str,
}

/// Manual sessions carry the skill list as one space-joined string.
#[derive(Debug, Clone, Serialize)]
pub struct ManualSessionRequest {
    pub skills: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub skills: Vec<String>,
    pub target_role: TargetRole,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapRequest {
    pub skills: Vec<String>,
    pub role: TargetRole,
    pub session_id: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Responses
// ────────────────────────────────────────────────────────────────────────────
//
// Every response shares the `{success, error}` envelope; the backend also
// uses it for 4xx/5xx answers.

#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssessResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub assessment: Option<RoleReadiness>,
    #[serde(default)]
    pub role_readiness: Option<RoleReadiness>,
    #[serde(default)]
    pub industry_evaluation: Option<IndustryEvaluation>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RoadmapResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub roadmap: Vec<RoadmapPhase>,
    #[serde(default)]
    pub resources: Option<String>,
    #[serde(default)]
    pub time_estimates: Option<TimeEstimates>,
    #[serde(default)]
    pub error: Option<String>,
}
