use serde::Serialize;

use crate::errors::Notice;
use crate::models::role::TargetRole;
use crate::session::SessionContext;

/// Progress through one session, furthest point reached first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    NoSession,
    Uploading,
    SessionActive,
    SkillsPresent,
    RoleSelected,
    AssessmentComplete,
    RoadmapGenerated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Pending,
    Uploaded,
    /// Backend answered `success: false`.
    Rejected,
    /// The request never completed.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadView {
    pub file_name: String,
    pub status: UploadStatus,
}

impl UploadView {
    /// File label as shown next to the upload area.
    pub fn label(&self) -> String {
        match self.status {
            UploadStatus::Pending => self.file_name.clone(),
            UploadStatus::Uploaded => format!("✅ {}", self.file_name),
            UploadStatus::Rejected => format!("❌ {}", self.file_name),
            UploadStatus::Failed => format!("❌ Error uploading {}", self.file_name),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.status {
            UploadStatus::Pending => "pending",
            UploadStatus::Uploaded => "success",
            UploadStatus::Rejected | UploadStatus::Failed => "failure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentView {
    pub role: TargetRole,
    pub html: String,
}

/// Point-in-time copy of everything the page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub stage: Stage,
    pub session: Option<SessionContext>,
    pub upload: Option<UploadView>,
    pub skills: Vec<String>,
    pub selected_role: Option<TargetRole>,
    pub assessing: bool,
    pub assessment: Option<AssessmentView>,
    pub assessment_error: Option<String>,
    pub generate_enabled: bool,
    pub loading: bool,
    pub roadmap_html: Option<String>,
    pub notices: Vec<Notice>,
}
