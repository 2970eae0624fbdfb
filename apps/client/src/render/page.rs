use std::fmt::Write;

use crate::controller::view::{UploadView, ViewState};
use crate::errors::Notice;
use crate::models::role::TargetRole;
use crate::render::escape_html;

pub fn render_upload(upload: &UploadView) -> String {
    format!(
        r#"<div id="file-info" class="{}"><span id="file-name">{}</span></div>"#,
        upload.css_class(),
        escape_html(&upload.label())
    )
}

/// Skill tags, each with its remove control addressed by position.
pub fn render_skills(skills: &[String]) -> String {
    let mut html = String::from(r#"<ul id="skills-list">"#);
    for (index, skill) in skills.iter().enumerate() {
        let _ = write!(
            html,
            r#"<li class="skill-tag"><span>{}</span><button class="skill-remove" data-index="{index}" aria-label="Remove skill">×</button></li>"#,
            escape_html(skill)
        );
    }
    html.push_str("</ul>");
    html
}

pub fn render_role_select(selected: Option<TargetRole>) -> String {
    let mut html = String::from(
        r#"<select id="job-role"><option value="">Select a target role</option>"#,
    );
    for role in TargetRole::ALL {
        let marker = if selected == Some(role) { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{}"{marker}>{}</option>"#,
            role.slug(),
            escape_html(&role.display_name())
        );
    }
    html.push_str("</select>");
    html
}

pub fn render_notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|n| {
            format!(
                r#"<div class="notice {}">{}</div>"#,
                n.kind.css_class(),
                escape_html(&n.text)
            )
        })
        .collect()
}

/// Whole page for the current view. The previous roadmap is hidden, not
/// discarded, while a new one is loading.
pub fn render_page(view: &ViewState) -> String {
    let mut body = String::new();

    body.push_str(&render_notices(&view.notices));

    body.push_str(r#"<section class="section" id="upload-area">"#);
    if let Some(upload) = &view.upload {
        body.push_str(&render_upload(upload));
    }
    body.push_str("</section>");

    body.push_str(r#"<section class="section" id="skills">"#);
    body.push_str(&render_skills(&view.skills));
    body.push_str("</section>");

    body.push_str(r#"<section class="section" id="role">"#);
    body.push_str(&render_role_select(view.selected_role));
    if view.assessing {
        if let Some(role) = view.selected_role {
            let _ = write!(
                body,
                r#"<div class="loading">🔄 Assessing readiness for {}...</div>"#,
                escape_html(&role.display_name())
            );
        }
    }
    if let Some(assessment) = &view.assessment {
        let _ = write!(
            body,
            r#"<div id="readiness-results">{}</div>"#,
            assessment.html
        );
    } else if let Some(error) = &view.assessment_error {
        let _ = write!(
            body,
            r#"<div id="readiness-results" class="error">{}</div>"#,
            escape_html(error)
        );
    }
    let disabled = if view.generate_enabled { "" } else { " disabled" };
    let _ = write!(
        body,
        r#"<button id="generate-roadmap"{disabled}>✨ Generate My Learning Roadmap</button>"#
    );
    body.push_str("</section>");

    if view.loading {
        body.push_str(r#"<div id="loading">Generating your roadmap...</div>"#);
    } else if let Some(roadmap) = &view.roadmap_html {
        body.push_str(r#"<section class="section" id="roadmap">"#);
        body.push_str(roadmap);
        body.push_str("</section>");
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>Career Pathfinder Roadmap</title></head><body>{body}</body></html>\n"
    )
}
