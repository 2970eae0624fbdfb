//! Session-scoped roadmap controller.
//!
//! One `RoadmapController` lives for one run. It owns the `SessionContext`,
//! the skill list and every piece of view state; each public operation makes
//! at most one backend round trip (roadmap generation may first create a
//! manual session) and then updates the view.
//!
//! Operations take `&self` and may overlap. The state mutex is never held
//! across an `.await`; responses are applied only if their request token is
//! still current for that action.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::api::wire::{AssessRequest, RoadmapRequest};
use crate::api::RoadmapApi;
use crate::errors::{ClientError, ErrorCategory, Notice};
use crate::models::resume::ResumeFile;
use crate::models::role::TargetRole;
use crate::render::roadmap::render_roadmap;
use crate::render::AssessmentRenderer;
use crate::session::SessionContext;
use crate::skills::{AddOutcome, SkillList};

pub mod requests;
pub mod view;

use requests::{Action, RequestTracker};
use view::{AssessmentView, Stage, UploadStatus, UploadView, ViewState};

#[derive(Debug, Default)]
struct ControllerState {
    session: Option<SessionContext>,
    skills: SkillList,
    upload: Option<UploadView>,
    uploading: bool,
    role: Option<TargetRole>,
    assessing: bool,
    assessment: Option<AssessmentView>,
    assessment_error: Option<String>,
    generate_enabled: bool,
    generating: bool,
    roadmap_html: Option<String>,
    notices: Vec<Notice>,
}

impl ControllerState {
    /// Every stage past `SkillsPresent` needs at least one skill.
    fn stage(&self) -> Stage {
        if !self.skills.is_empty() {
            if self.roadmap_html.is_some() && self.assessment.is_some() {
                Stage::RoadmapGenerated
            } else if self.assessment.is_some() {
                Stage::AssessmentComplete
            } else if self.role.is_some() {
                Stage::RoleSelected
            } else {
                Stage::SkillsPresent
            }
        } else if self.session.is_some() {
            Stage::SessionActive
        } else if self.uploading {
            Stage::Uploading
        } else {
            Stage::NoSession
        }
    }

    fn clear_assessment(&mut self) {
        self.assessment = None;
        self.assessment_error = None;
        self.generate_enabled = false;
    }
}

pub struct RoadmapController {
    api: Arc<dyn RoadmapApi>,
    renderer: Arc<dyn AssessmentRenderer>,
    requests: RequestTracker,
    state: Mutex<ControllerState>,
}

impl RoadmapController {
    pub fn new(api: Arc<dyn RoadmapApi>, renderer: Arc<dyn AssessmentRenderer>) -> Self {
        Self {
            api,
            renderer,
            requests: RequestTracker::new(),
            state: Mutex::new(ControllerState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Read side
    // ────────────────────────────────────────────────────────────────────────

    pub fn stage(&self) -> Stage {
        self.state().stage()
    }

    pub fn session_id(&self) -> Option<String> {
        self.state().session.as_ref().map(|s| s.session_id.clone())
    }

    pub fn skills(&self) -> Vec<String> {
        self.state().skills.as_slice().to_vec()
    }

    pub fn view(&self) -> ViewState {
        let state = self.state();
        ViewState {
            stage: state.stage(),
            session: state.session.clone(),
            upload: state.upload.clone(),
            skills: state.skills.as_slice().to_vec(),
            selected_role: state.role,
            assessing: state.assessing,
            assessment: state.assessment.clone(),
            assessment_error: state.assessment_error.clone(),
            generate_enabled: state.generate_enabled,
            loading: state.generating,
            roadmap_html: state.roadmap_html.clone(),
            notices: state.notices.clone(),
        }
    }

    /// Drains pending notices; the caller shows each once.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state().notices)
    }

    fn notify(&self, notice: Notice) {
        debug!("notice ({:?}): {}", notice.kind, notice.text);
        self.state().notices.push(notice);
    }

    /// Records a validation failure as a warning and hands it back.
    fn reject(&self, message: &str) -> ClientError {
        self.notify(Notice::warning(message));
        ClientError::Validation(message.to_string())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Upload & session
    // ────────────────────────────────────────────────────────────────────────

    /// File chosen through the picker.
    pub async fn select_resume(&self, file: ResumeFile) -> Result<(), ClientError> {
        self.upload(file).await
    }

    /// Files dropped onto the upload area; only the first is used and an
    /// empty drop does nothing.
    pub async fn drop_resumes(&self, files: Vec<ResumeFile>) -> Result<(), ClientError> {
        match files.into_iter().next() {
            Some(file) => self.upload(file).await,
            None => Ok(()),
        }
    }

    async fn upload(&self, file: ResumeFile) -> Result<(), ClientError> {
        if let Err(e) = file.validate() {
            self.notify(Notice::warning(e.user_message("Upload failed")));
            return Err(e);
        }

        let token = {
            let mut state = self.state();
            state.upload = Some(UploadView {
                file_name: file.file_name.clone(),
                status: UploadStatus::Pending,
            });
            state.uploading = true;
            // A pending manual-session sync must not overwrite the upload's session.
            self.requests.supersede(Action::Session);
            self.requests.begin(Action::Upload)
        };

        info!("Uploading resume {}", file.file_name);
        let result = self.api.upload_resume(&file).await;

        let mut state = self.state();
        if !self.requests.is_current(token) {
            debug!("Discarding stale upload response for {}", file.file_name);
            return Err(ClientError::Superseded);
        }
        state.uploading = false;

        match result {
            Ok(session_id) => {
                info!("Resume uploaded, session {session_id}");
                state.session = Some(SessionContext::adopt(session_id));
                state.upload = Some(UploadView {
                    file_name: file.file_name,
                    status: UploadStatus::Uploaded,
                });
                state
                    .notices
                    .push(Notice::success("Resume uploaded successfully!"));
                Ok(())
            }
            Err(e) => {
                warn!("Resume upload failed: {e}");
                let status = match e.category() {
                    ErrorCategory::Server => UploadStatus::Rejected,
                    _ => UploadStatus::Failed,
                };
                state.upload = Some(UploadView {
                    file_name: file.file_name,
                    status,
                });
                state.notices.push(Notice::warning(
                    e.user_message("Error uploading resume. Please try again."),
                ));
                Err(e)
            }
        }
    }

    /// Creates (or re-creates) a manual session from the current skill list.
    /// An uploaded session is never replaced by a manual one.
    async fn sync_manual_session(&self) -> Result<(), ClientError> {
        let (token, skills) = {
            let state = self.state();
            (
                self.requests.begin(Action::Session),
                state.skills.as_slice().to_vec(),
            )
        };

        debug!("Creating manual session from {} skills", skills.len());
        let result = self.api.create_manual_session(&skills).await;

        let mut state = self.state();
        if !self.requests.is_current(token) {
            debug!("Discarding stale manual session response");
            return Err(ClientError::Superseded);
        }
        if state.session.as_ref().is_some_and(|s| !s.is_manual()) {
            debug!("Keeping uploaded session over manual session response");
            return Ok(());
        }

        match result {
            Ok(session_id) => {
                info!("Manual session {session_id} created");
                state.session = Some(SessionContext::adopt(session_id));
                state
                    .notices
                    .push(Notice::success("Manual skills session created!"));
                Ok(())
            }
            Err(e) => {
                warn!("Manual session creation failed: {e}");
                Err(e)
            }
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Skills
    // ────────────────────────────────────────────────────────────────────────

    /// Adds whitespace-delimited skills. Creates a manual session when skills
    /// were added and no session exists yet.
    pub async fn add_skills(&self, input: &str) -> Result<AddOutcome, ClientError> {
        if input.trim().is_empty() {
            return Err(self.reject("Please enter a skill."));
        }

        let (outcome, needs_session) = {
            let mut state = self.state();
            let outcome = state.skills.add_input(input);
            for duplicate in &outcome.duplicates {
                state.notices.push(Notice::warning(format!(
                    "Skill \"{duplicate}\" already added!"
                )));
            }
            let needs_session = !outcome.added.is_empty() && state.session.is_none();
            (outcome, needs_session)
        };

        if needs_session {
            // Skills stay in the list even if the session cannot be created;
            // roadmap generation retries on demand.
            if let Err(e) = self.sync_manual_session().await {
                debug!("Deferred manual session creation: {e}");
            }
        }

        Ok(outcome)
    }

    /// Removes the tag at `index`. A manual session is re-created from the
    /// remaining skills. Removing the last skill drops a manual session and
    /// the assessment.
    pub async fn remove_skill(&self, index: usize) -> Result<String, ClientError> {
        let (removed, resync) = {
            let mut state = self.state();
            let Some(removed) = state.skills.remove_at(index) else {
                drop(state);
                return Err(self.reject("That skill is no longer in the list."));
            };
            let manual = state.session.as_ref().is_some_and(SessionContext::is_manual);
            if state.skills.is_empty() {
                // Nothing left to assess or plan for.
                self.requests.supersede(Action::Assess);
                state.assessing = false;
                state.clear_assessment();
                if manual {
                    self.requests.supersede(Action::Session);
                    state.session = None;
                }
            }
            (removed, manual && !state.skills.is_empty())
        };

        debug!("Removed skill {removed}");
        if resync {
            if let Err(e) = self.sync_manual_session().await {
                warn!("Could not refresh manual session after removing {removed}: {e}");
            }
        }
        Ok(removed)
    }

    /// Replaces the skill list with what the backend extracts from the
    /// session's resume.
    pub async fn extract_skills(&self) -> Result<usize, ClientError> {
        let Some(session_id) = self.session_id() else {
            self.notify(Notice::warning(
                ClientError::MissingSession.user_message(""),
            ));
            return Err(ClientError::MissingSession);
        };

        let token = self.requests.begin(Action::Extract);
        info!("Extracting skills for session {session_id}");
        let result = self.api.extract_skills(&session_id).await;

        let mut state = self.state();
        if !self.requests.is_current(token) {
            debug!("Discarding stale skill extraction response");
            return Err(ClientError::Superseded);
        }

        match result {
            Ok(skills) => {
                let count = skills.len();
                state.skills.replace_all(&skills);
                state.notices.push(Notice::success(format!(
                    "Extracted {count} skills from your resume!"
                )));
                Ok(count)
            }
            Err(e) => {
                warn!("Skill extraction failed: {e}");
                state.notices.push(Notice::warning(
                    e.user_message("Error extracting skills. Please try again."),
                ));
                Err(e)
            }
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Readiness assessment
    // ────────────────────────────────────────────────────────────────────────

    /// Selects a target role by slug and assesses readiness for it. Invalid
    /// slugs and an empty skill list are rejected without a request.
    pub async fn select_role(&self, value: &str) -> Result<(), ClientError> {
        let role = match value.parse::<TargetRole>() {
            Ok(role) => role,
            Err(e) => {
                debug!("Rejected role selection: {e}");
                {
                    let mut state = self.state();
                    self.requests.supersede(Action::Assess);
                    state.role = None;
                    state.assessing = false;
                    state.clear_assessment();
                }
                return Err(self.reject("Please select a valid job role."));
            }
        };

        let (token, request) = {
            let mut state = self.state();
            state.role = Some(role);
            state.clear_assessment();
            if state.skills.is_empty() {
                self.requests.supersede(Action::Assess);
                state.assessing = false;
                drop(state);
                return Err(self.reject(
                    "Please add some skills first to see your role readiness assessment.",
                ));
            }
            state.assessing = true;
            let request = AssessRequest {
                session_id: state.session.as_ref().map(|s| s.session_id.clone()),
                skills: state.skills.as_slice().to_vec(),
                target_role: role,
            };
            (self.requests.begin(Action::Assess), request)
        };

        info!(
            "Assessing readiness for {role} with {} skills",
            request.skills.len()
        );
        let result = self.api.assess_readiness(&request).await;

        let mut state = self.state();
        if !self.requests.is_current(token) {
            debug!("Discarding stale assessment for {role}");
            return Err(ClientError::Superseded);
        }
        state.assessing = false;

        match result {
            Ok(assessment) => {
                let html = self.renderer.render(role, &assessment);
                debug!(
                    "Rendered {role} assessment with {} view",
                    self.renderer.name()
                );
                state.assessment = Some(AssessmentView { role, html });
                state.generate_enabled = true;
                state
                    .notices
                    .push(Notice::success("Role readiness assessment complete!"));
                Ok(())
            }
            Err(e) => {
                warn!("Readiness assessment for {role} failed: {e}");
                let message =
                    e.user_message("Error assessing role readiness. Please try again.");
                state.assessment_error = Some(message.clone());
                state.generate_enabled = false;
                state.notices.push(Notice::warning(message));
                Err(e)
            }
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Roadmap
    // ────────────────────────────────────────────────────────────────────────

    /// Generates and renders the learning roadmap. Requires a role, a
    /// non-empty skill list and a completed assessment; creates a manual
    /// session first if none exists. On failure the previous roadmap view is
    /// left as it was.
    pub async fn generate_roadmap(&self) -> Result<(), ClientError> {
        // Claim the in-flight slot before any await so a second call is
        // turned away instead of racing the on-demand session.
        let claimed = {
            let mut state = self.state();
            let claimed = match state.role {
                None => Err("Please select a target job role."),
                Some(_) if state.skills.is_empty() => Err("Please add some skills first!"),
                Some(_) if state.generating => Err("A roadmap is already being generated."),
                Some(_) if !state.generate_enabled => {
                    Err("Please complete the role readiness assessment first.")
                }
                Some(role) => Ok(role),
            };
            if claimed.is_ok() {
                state.generating = true;
                state.generate_enabled = false;
            }
            claimed
        };
        let role = claimed.map_err(|message| self.reject(message))?;

        if self.session_id().is_none() {
            info!("No session yet, creating manual session before roadmap generation");
            if let Err(e) = self.sync_manual_session().await {
                debug!("On-demand manual session failed: {e}");
            }
        }

        let (token, request) = {
            let mut state = self.state();
            let Some(session_id) = state.session.as_ref().map(|s| s.session_id.clone()) else {
                state.generating = false;
                state.generate_enabled = state.assessment.is_some();
                drop(state);
                return Err(self.reject("Failed to create session for manual skills!"));
            };
            let request = RoadmapRequest {
                skills: state.skills.as_slice().to_vec(),
                role,
                session_id,
            };
            (self.requests.begin(Action::Roadmap), request)
        };

        info!("Generating {role} roadmap for session {}", request.session_id);
        let result = self.api.generate_roadmap(&request).await;

        let mut state = self.state();
        if !self.requests.is_current(token) {
            debug!("Discarding stale roadmap response");
            return Err(ClientError::Superseded);
        }
        state.generating = false;
        state.generate_enabled = state.assessment.is_some();

        match result {
            Ok(roadmap) if roadmap.phases.is_empty() => {
                warn!("Backend returned an empty roadmap");
                state
                    .notices
                    .push(Notice::warning("No roadmap generated. Please try again."));
                Ok(())
            }
            Ok(roadmap) => {
                info!("Roadmap generated with {} phases", roadmap.phases.len());
                state.roadmap_html = Some(render_roadmap(&roadmap));
                Ok(())
            }
            Err(e) => {
                warn!("Roadmap generation failed: {e}");
                let message = match &e {
                    ClientError::Server(msg) => format!("Error: {msg}"),
                    other => format!("Network error: {other}"),
                };
                state.notices.push(Notice::warning(message));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests;
