use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::*;
use crate::errors::NoticeKind;
use crate::models::assessment::{ReadinessAssessment, RoleAssessment};
use crate::models::roadmap::{Course, Roadmap, RoadmapItem, RoadmapPhase};
use crate::render::page::render_page;
use crate::render::BreakdownRenderer;

/// In-memory backend that records every call it receives.
#[derive(Default)]
struct FakeApi {
    calls: Mutex<Vec<&'static str>>,
    manual_requests: Mutex<Vec<Vec<String>>>,
    manual_counter: AtomicUsize,
    upload_error: Option<String>,
    upload_unreachable: bool,
    /// Number of manual-session requests to fail before succeeding.
    manual_failures: AtomicUsize,
    manual_delay: Option<Duration>,
    extracted: Vec<String>,
    assess_error: Option<String>,
    assess_delays: HashMap<TargetRole, Duration>,
    roadmap_error: Mutex<Option<String>>,
    empty_roadmap: bool,
}

impl FakeApi {
    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }
}

#[async_trait]
impl RoadmapApi for FakeApi {
    async fn upload_resume(&self, _file: &ResumeFile) -> Result<String, ClientError> {
        self.record("upload");
        if self.upload_unreachable {
            return Err(ClientError::Decode {
                status: 502,
                body: "bad gateway".into(),
            });
        }
        match &self.upload_error {
            Some(msg) => Err(ClientError::Server(msg.clone())),
            None => Ok("session_1700000000".to_string()),
        }
    }

    async fn extract_skills(&self, _session_id: &str) -> Result<Vec<String>, ClientError> {
        self.record("extract");
        Ok(self.extracted.clone())
    }

    async fn create_manual_session(&self, skills: &[String]) -> Result<String, ClientError> {
        self.record("manual");
        self.manual_requests.lock().unwrap().push(skills.to_vec());
        if let Some(delay) = self.manual_delay {
            tokio::time::sleep(delay).await;
        }
        let failing = self
            .manual_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(ClientError::Server("Could not create session".into()));
        }
        let n = self.manual_counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("manual_session_{n}"))
    }

    async fn assess_readiness(
        &self,
        request: &AssessRequest,
    ) -> Result<ReadinessAssessment, ClientError> {
        self.record("assess");
        if let Some(delay) = self.assess_delays.get(&request.target_role) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(msg) = &self.assess_error {
            return Err(ClientError::Server(msg.clone()));
        }
        Ok(ReadinessAssessment {
            role: Some(RoleAssessment {
                role_name: request.target_role.slug().to_string(),
                readiness_score: 0.7,
                readiness_label: "Workable with targeted upskilling".into(),
                missing_skills: vec![],
                quick_win_recommendations: vec![],
            }),
            industry: None,
        })
    }

    async fn generate_roadmap(&self, request: &RoadmapRequest) -> Result<Roadmap, ClientError> {
        self.record("roadmap");
        if let Some(msg) = self.roadmap_error.lock().unwrap().clone() {
            return Err(ClientError::Server(msg));
        }
        let phases = if self.empty_roadmap {
            vec![]
        } else {
            vec![RoadmapPhase {
                phase: "Foundations".into(),
                phase_time_frame: None,
                phase_total_hours: None,
                skills: request
                    .skills
                    .iter()
                    .map(|s| RoadmapItem {
                        skill: s.clone(),
                        est_hours: Some(10.0),
                        course: Course {
                            title: "X".into(),
                            url: Some("x.com".into()),
                            reason: Some("r".into()),
                            ..Course::default()
                        },
                    })
                    .collect(),
            }]
        };
        Ok(Roadmap {
            phases,
            resources: None,
            time_estimates: None,
        })
    }
}

fn controller(api: FakeApi) -> (Arc<FakeApi>, RoadmapController) {
    let api = Arc::new(api);
    let controller = RoadmapController::new(api.clone(), Arc::new(BreakdownRenderer));
    (api, controller)
}

fn warnings(controller: &RoadmapController) -> Vec<String> {
    controller
        .take_notices()
        .into_iter()
        .filter(|n| n.kind == NoticeKind::Warning)
        .map(|n| n.text)
        .collect()
}

#[tokio::test]
async fn test_duplicate_skill_any_case_is_single_tag() {
    let (api, c) = controller(FakeApi::default());
    c.add_skills("Python").await.unwrap();
    let outcome = c.add_skills("python").await.unwrap();

    assert_eq!(c.skills(), vec!["Python"]);
    assert_eq!(outcome.duplicates, ["python"]);
    assert_eq!(warnings(&c), vec!["Skill \"python\" already added!"]);
    // Only the first add needed a session.
    assert_eq!(api.count("manual"), 1);
}

#[tokio::test]
async fn test_empty_input_is_rejected_without_request() {
    let (api, c) = controller(FakeApi::default());
    let err = c.add_skills("   ").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_manual_session_created_on_first_skills() {
    let (api, c) = controller(FakeApi::default());
    c.add_skills("rust go").await.unwrap();

    assert_eq!(c.session_id().as_deref(), Some("manual_session_1"));
    assert_eq!(
        api.manual_requests.lock().unwrap()[0],
        vec!["rust".to_string(), "go".to_string()]
    );
    assert_eq!(c.stage(), Stage::SkillsPresent);
}

#[tokio::test]
async fn test_remove_skill_keeps_order_and_resyncs_manual_session() {
    let (api, c) = controller(FakeApi::default());
    c.add_skills("a b c").await.unwrap();

    assert_eq!(c.remove_skill(1).await.unwrap(), "b");
    assert_eq!(c.skills(), vec!["a", "c"]);
    assert_eq!(api.count("manual"), 2);
    assert_eq!(
        api.manual_requests.lock().unwrap()[1],
        vec!["a".to_string(), "c".to_string()]
    );
    assert_eq!(c.session_id().as_deref(), Some("manual_session_2"));
}

#[tokio::test]
async fn test_removing_last_manual_skill_drops_session() {
    let (api, c) = controller(FakeApi::default());
    c.add_skills("solo").await.unwrap();
    c.remove_skill(0).await.unwrap();

    assert!(c.skills().is_empty());
    assert!(c.session_id().is_none());
    assert_eq!(api.count("manual"), 1);
    assert_eq!(c.stage(), Stage::NoSession);
}

#[tokio::test]
async fn test_removing_every_skill_after_assessment_resets_progress() {
    let (api, c) = controller(FakeApi::default());
    c.add_skills("python").await.unwrap();
    c.select_role("data-scientist").await.unwrap();
    assert_eq!(c.stage(), Stage::AssessmentComplete);

    c.remove_skill(0).await.unwrap();
    let view = c.view();
    assert_eq!(view.stage, Stage::NoSession);
    assert!(view.assessment.is_none());
    assert!(!view.generate_enabled);
    assert!(view.session.is_none());
    assert!(render_page(&view).contains(r#"<button id="generate-roadmap" disabled>"#));

    c.take_notices();
    assert!(c.generate_roadmap().await.is_err());
    assert_eq!(warnings(&c), vec!["Please add some skills first!"]);
    assert_eq!(api.count("roadmap"), 0);
}

#[tokio::test]
async fn test_uploaded_session_survives_removing_every_skill() {
    let (_api, c) = controller(FakeApi {
        extracted: vec!["Python".into()],
        ..FakeApi::default()
    });
    c.select_resume(ResumeFile::new("cv.pdf", "pdf")).await.unwrap();
    c.extract_skills().await.unwrap();
    c.select_role("data-scientist").await.unwrap();
    c.remove_skill(0).await.unwrap();

    assert_eq!(c.stage(), Stage::SessionActive);
    assert_eq!(c.session_id().as_deref(), Some("session_1700000000"));
    assert!(!c.view().generate_enabled);
}

#[tokio::test]
async fn test_remove_skill_from_uploaded_session_does_not_resync() {
    let (api, c) = controller(FakeApi {
        extracted: vec!["Python".into(), "SQL".into()],
        ..FakeApi::default()
    });
    c.select_resume(ResumeFile::new("cv.pdf", "pdf")).await.unwrap();
    c.extract_skills().await.unwrap();
    c.remove_skill(0).await.unwrap();

    assert_eq!(c.skills(), vec!["SQL"]);
    assert_eq!(api.count("manual"), 0);
    assert_eq!(c.session_id().as_deref(), Some("session_1700000000"));
}

#[tokio::test]
async fn test_remove_out_of_range_is_validation_error() {
    let (_api, c) = controller(FakeApi::default());
    assert!(matches!(
        c.remove_skill(3).await,
        Err(ClientError::Validation(_))
    ));
}

#[tokio::test]
async fn test_upload_success_sets_session_and_styling() {
    let (_api, c) = controller(FakeApi::default());
    c.select_resume(ResumeFile::new("cv.pdf", "pdf")).await.unwrap();

    let view = c.view();
    assert_eq!(view.stage, Stage::SessionActive);
    let upload = view.upload.unwrap();
    assert_eq!(upload.label(), "✅ cv.pdf");
    assert_eq!(upload.css_class(), "success");
    assert_eq!(
        c.take_notices(),
        vec![Notice::success("Resume uploaded successfully!")]
    );
}

#[tokio::test]
async fn test_failed_upload_leaves_no_session_and_controls_disabled() {
    let (api, c) = controller(FakeApi {
        upload_error: Some("Could not extract text from resume".into()),
        ..FakeApi::default()
    });
    let err = c
        .select_resume(ResumeFile::new("cv.pdf", "pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Server(_)));

    let view = c.view();
    assert!(view.session.is_none());
    assert!(!view.generate_enabled);
    assert_eq!(view.stage, Stage::NoSession);
    assert_eq!(view.upload.unwrap().label(), "❌ cv.pdf");
    assert_eq!(warnings(&c), vec!["Could not extract text from resume"]);

    // Session-dependent actions stay unavailable.
    assert!(matches!(
        c.extract_skills().await,
        Err(ClientError::MissingSession)
    ));
    assert!(c.generate_roadmap().await.is_err());
    assert_eq!(api.calls(), vec!["upload"]);
}

#[tokio::test]
async fn test_unreachable_upload_shows_error_label() {
    let (_api, c) = controller(FakeApi {
        upload_unreachable: true,
        ..FakeApi::default()
    });
    assert!(c.select_resume(ResumeFile::new("cv.pdf", "x")).await.is_err());
    assert_eq!(
        c.view().upload.unwrap().label(),
        "❌ Error uploading cv.pdf"
    );
    assert_eq!(
        warnings(&c),
        vec!["Error uploading resume. Please try again."]
    );
}

#[tokio::test]
async fn test_unsupported_file_never_reaches_backend() {
    let (api, c) = controller(FakeApi::default());
    assert!(c.select_resume(ResumeFile::new("cv.png", "x")).await.is_err());
    assert!(api.calls().is_empty());
    assert!(c.view().upload.is_none());
}

#[tokio::test]
async fn test_drop_uses_first_file_and_ignores_empty_drop() {
    let (api, c) = controller(FakeApi::default());
    c.drop_resumes(vec![]).await.unwrap();
    assert!(api.calls().is_empty());

    c.drop_resumes(vec![
        ResumeFile::new("first.pdf", "1"),
        ResumeFile::new("second.pdf", "2"),
    ])
    .await
    .unwrap();
    assert_eq!(api.count("upload"), 1);
    assert_eq!(c.view().upload.unwrap().file_name, "first.pdf");
}

#[tokio::test]
async fn test_extract_replaces_skill_list() {
    let (_api, c) = controller(FakeApi {
        extracted: vec!["Python".into(), "SQL".into(), "python".into()],
        ..FakeApi::default()
    });
    c.select_resume(ResumeFile::new("cv.pdf", "pdf")).await.unwrap();
    c.take_notices();

    assert_eq!(c.extract_skills().await.unwrap(), 3);
    assert_eq!(c.skills(), vec!["Python", "SQL"]);
    assert_eq!(
        c.take_notices(),
        vec![Notice::success("Extracted 3 skills from your resume!")]
    );
}

#[tokio::test]
async fn test_invalid_role_never_issues_request() {
    let (api, c) = controller(FakeApi::default());
    c.add_skills("python").await.unwrap();
    let before = api.calls().len();

    let err = c.select_role("astronaut").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(api.calls().len(), before);

    let view = c.view();
    assert!(view.selected_role.is_none());
    assert!(!view.generate_enabled);
    assert!(warnings(&c).contains(&"Please select a valid job role.".to_string()));
}

#[tokio::test]
async fn test_role_without_skills_is_rejected() {
    let (api, c) = controller(FakeApi::default());
    assert!(c.select_role("data-scientist").await.is_err());
    assert_eq!(api.count("assess"), 0);
    assert!(!c.view().generate_enabled);
}

#[tokio::test]
async fn test_assessment_success_enables_roadmap() {
    let (_api, c) = controller(FakeApi::default());
    c.add_skills("python sql").await.unwrap();
    c.select_role("data-scientist").await.unwrap();

    let view = c.view();
    assert_eq!(view.stage, Stage::AssessmentComplete);
    assert!(view.generate_enabled);
    let assessment = view.assessment.unwrap();
    assert_eq!(assessment.role, TargetRole::DataScientist);
    assert!(assessment.html.contains("Data Scientist"));
    assert!(assessment.html.contains("70%"));
}

#[tokio::test]
async fn test_assessment_failure_shows_inline_error() {
    let (_api, c) = controller(FakeApi {
        assess_error: Some("Unknown role: data-scientist".into()),
        ..FakeApi::default()
    });
    c.add_skills("python").await.unwrap();
    assert!(c.select_role("data-scientist").await.is_err());

    let view = c.view();
    assert!(!view.generate_enabled);
    assert!(view.assessment.is_none());
    assert_eq!(
        view.assessment_error.as_deref(),
        Some("Unknown role: data-scientist")
    );
    assert_eq!(view.stage, Stage::RoleSelected);
}

#[tokio::test(start_paused = true)]
async fn test_stale_assessment_does_not_overwrite_newer_one() {
    let mut delays = HashMap::new();
    delays.insert(TargetRole::DataScientist, Duration::from_millis(500));
    let (api, c) = controller(FakeApi {
        assess_delays: delays,
        ..FakeApi::default()
    });
    c.add_skills("python").await.unwrap();

    let (slow, fast) = tokio::join!(
        c.select_role("data-scientist"),
        c.select_role("ml-engineer")
    );

    assert!(matches!(slow, Err(ClientError::Superseded)));
    assert!(fast.is_ok());
    assert_eq!(api.count("assess"), 2);
    let view = c.view();
    assert_eq!(view.selected_role, Some(TargetRole::MlEngineer));
    assert_eq!(view.assessment.unwrap().role, TargetRole::MlEngineer);
    assert!(!view.assessing);
}

#[tokio::test]
async fn test_roadmap_blocked_without_skills_regardless_of_role() {
    let (api, c) = controller(FakeApi::default());
    let _ = c.select_role("data-scientist").await;
    let err = c.generate_roadmap().await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(ref m) if m == "Please add some skills first!"));
    assert_eq!(api.count("roadmap"), 0);
}

#[tokio::test]
async fn test_roadmap_requires_role() {
    let (api, c) = controller(FakeApi::default());
    c.add_skills("python").await.unwrap();
    assert!(c.generate_roadmap().await.is_err());
    assert_eq!(api.count("roadmap"), 0);
}

#[tokio::test]
async fn test_full_flow_renders_roadmap() {
    let (api, c) = controller(FakeApi::default());
    c.add_skills("Python").await.unwrap();
    c.select_role("data-scientist").await.unwrap();
    c.generate_roadmap().await.unwrap();

    let view = c.view();
    assert_eq!(view.stage, Stage::RoadmapGenerated);
    assert!(view.generate_enabled);
    assert!(!view.loading);
    let html = view.roadmap_html.unwrap();
    assert!(html.contains(r#"<h3 class="phase-header">Foundations</h3>"#));
    assert!(html.contains("(~10h)"));
    assert!(html.contains(r#"href="https://x.com""#));
    assert_eq!(api.calls(), vec!["manual", "assess", "roadmap"]);
}

#[tokio::test]
async fn test_roadmap_creates_session_on_demand() {
    let (api, c) = controller(FakeApi {
        manual_failures: AtomicUsize::new(1),
        ..FakeApi::default()
    });
    // The eager session attempt fails; the skill stays in the list.
    c.add_skills("python").await.unwrap();
    assert!(c.session_id().is_none());
    c.select_role("ml-engineer").await.unwrap();

    c.generate_roadmap().await.unwrap();
    assert_eq!(c.session_id().as_deref(), Some("manual_session_1"));
    assert_eq!(api.calls(), vec!["manual", "assess", "manual", "roadmap"]);
}

#[tokio::test]
async fn test_roadmap_aborts_when_session_cannot_be_created() {
    let (api, c) = controller(FakeApi {
        manual_failures: AtomicUsize::new(2),
        ..FakeApi::default()
    });
    c.add_skills("python").await.unwrap();
    c.select_role("ml-engineer").await.unwrap();

    let err = c.generate_roadmap().await.unwrap_err();
    assert!(
        matches!(err, ClientError::Validation(ref m) if m == "Failed to create session for manual skills!")
    );
    assert_eq!(api.count("manual"), 2);
    assert_eq!(api.count("roadmap"), 0);
    assert!(c.view().generate_enabled);
}

#[tokio::test(start_paused = true)]
async fn test_second_roadmap_request_waits_out_on_demand_session() {
    let (api, c) = controller(FakeApi {
        manual_failures: AtomicUsize::new(1),
        manual_delay: Some(Duration::from_millis(50)),
        ..FakeApi::default()
    });
    c.add_skills("python").await.unwrap();
    assert!(c.session_id().is_none());
    c.select_role("ml-engineer").await.unwrap();
    c.take_notices();

    let (first, second) = tokio::join!(c.generate_roadmap(), c.generate_roadmap());

    assert!(first.is_ok());
    assert!(
        matches!(second, Err(ClientError::Validation(ref m)) if m == "A roadmap is already being generated.")
    );
    assert_eq!(warnings(&c), vec!["A roadmap is already being generated."]);
    assert_eq!(api.calls(), vec!["manual", "assess", "manual", "roadmap"]);
    assert_eq!(c.session_id().as_deref(), Some("manual_session_1"));
    assert!(c.view().generate_enabled);
}

#[tokio::test]
async fn test_roadmap_failure_keeps_previous_view() {
    let (api, c) = controller(FakeApi::default());
    c.add_skills("python").await.unwrap();
    c.select_role("data-scientist").await.unwrap();
    c.generate_roadmap().await.unwrap();
    let before = c.view().roadmap_html;
    assert!(before.is_some());

    *api.roadmap_error.lock().unwrap() = Some("Session file not found".into());
    c.take_notices();
    assert!(c.generate_roadmap().await.is_err());

    let view = c.view();
    assert_eq!(view.roadmap_html, before);
    assert!(view.generate_enabled);
    assert!(!view.loading);
    assert_eq!(warnings(&c), vec!["Error: Session file not found"]);

    // Same transition can be retried once the backend recovers.
    *api.roadmap_error.lock().unwrap() = None;
    c.generate_roadmap().await.unwrap();
    assert_eq!(api.count("roadmap"), 3);
}

#[tokio::test]
async fn test_empty_roadmap_warns_without_rendering() {
    let (_api, c) = controller(FakeApi {
        empty_roadmap: true,
        ..FakeApi::default()
    });
    c.add_skills("python").await.unwrap();
    c.select_role("product-manager").await.unwrap();
    c.take_notices();
    c.generate_roadmap().await.unwrap();

    assert!(c.view().roadmap_html.is_none());
    assert_eq!(
        warnings(&c),
        vec!["No roadmap generated. Please try again."]
    );
}

#[tokio::test]
async fn test_reupload_replaces_manual_session() {
    let (_api, c) = controller(FakeApi::default());
    c.add_skills("python").await.unwrap();
    assert!(c.view().session.unwrap().is_manual());

    c.select_resume(ResumeFile::new("cv.docx", "doc")).await.unwrap();
    assert_eq!(c.session_id().as_deref(), Some("session_1700000000"));
}
