//! Readiness assessment views.
//!
//! The controller holds an `Arc<dyn AssessmentRenderer>`, chosen at startup
//! from `ASSESSMENT_VIEW`.

use std::fmt::Write;

use crate::models::assessment::{
    readiness_class, score_class, to_percent, CategoryBreakdown, IndustryEvaluation,
    ReadinessAssessment, Recommendation, RoleAssessment,
};
use crate::models::role::TargetRole;
use crate::render::escape_html;

pub trait AssessmentRenderer: Send + Sync {
    fn name(&self) -> &'static str;

    fn render(&self, role: TargetRole, assessment: &ReadinessAssessment) -> String;
}

/// Full textual breakdown: category scores, present/missing skills,
/// recommendations, strengths and next steps.
pub struct BreakdownRenderer;

/// Headline score and label only.
pub struct SummaryRenderer;

impl AssessmentRenderer for BreakdownRenderer {
    fn name(&self) -> &'static str {
        "breakdown"
    }

    fn render(&self, role: TargetRole, assessment: &ReadinessAssessment) -> String {
        let mut html = String::new();
        let _ = write!(
            html,
            r#"<h3 class="selected-role">{}</h3>"#,
            escape_html(&role.display_name())
        );
        if let Some(role_assessment) = &assessment.role {
            html.push_str(&render_role_assessment(role_assessment));
        }
        if let Some(industry) = &assessment.industry {
            html.push_str(&render_industry_evaluation(industry));
        }
        html
    }
}

impl AssessmentRenderer for SummaryRenderer {
    fn name(&self) -> &'static str {
        "summary"
    }

    fn render(&self, role: TargetRole, assessment: &ReadinessAssessment) -> String {
        let percent = assessment.score_percent().unwrap_or(0);
        let label = assessment.label().unwrap_or_default();
        format!(
            r#"<div class="readiness-summary"><h3 class="selected-role">{}</h3><div class="industry-overall-score {}">{}%</div><div class="readiness-label {}">{}</div></div>"#,
            escape_html(&role.display_name()),
            score_class(percent),
            percent,
            readiness_class(label),
            escape_html(label)
        )
    }
}

/// Resolves an `ASSESSMENT_VIEW` value. Unknown names fall back to the
/// breakdown view.
pub fn renderer_for(name: &str) -> Box<dyn AssessmentRenderer> {
    match name.trim().to_ascii_lowercase().as_str() {
        "summary" => Box::new(SummaryRenderer),
        _ => Box::new(BreakdownRenderer),
    }
}

fn render_role_assessment(assessment: &RoleAssessment) -> String {
    let percent = to_percent(assessment.readiness_score);
    let mut html = String::from(r#"<div class="role-assessment">"#);
    let _ = write!(
        html,
        r#"<div class="readiness-score {}">{}%</div><div class="readiness-label {}">{}</div>"#,
        score_class(percent),
        percent,
        readiness_class(&assessment.readiness_label),
        escape_html(&assessment.readiness_label)
    );

    if !assessment.missing_skills.is_empty() {
        html.push_str(r#"<ul class="missing-skills">"#);
        for missing in &assessment.missing_skills {
            let _ = write!(
                html,
                r#"<li class="missing-skill {}">{} <span class="skill-gap">(level {} → {})</span></li>"#,
                escape_html(&missing.importance),
                escape_html(&missing.skill),
                missing.current_level,
                missing.target_level
            );
        }
        html.push_str("</ul>");
    }

    if !assessment.quick_win_recommendations.is_empty() {
        html.push_str(r#"<div class="quick-wins"><h4>Quick Wins</h4><ul>"#);
        for tip in &assessment.quick_win_recommendations {
            let _ = write!(html, "<li>{}</li>", escape_html(tip));
        }
        html.push_str("</ul></div>");
    }

    html.push_str("</div>");
    html
}

fn render_industry_evaluation(evaluation: &IndustryEvaluation) -> String {
    let overall = to_percent(evaluation.overall_score);
    let class = score_class(overall);
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<div class="industry-overview"><h4>Overall Industry Readiness</h4><div class="industry-overall-score {class}">{overall}%</div><div class="industry-readiness-level {class}">{}</div></div>"#,
        escape_html(&evaluation.readiness_level)
    );

    html.push_str(r#"<div class="skill-breakdown">"#);
    for category in &evaluation.breakdown {
        html.push_str(&render_category(category));
    }
    html.push_str("</div>");

    if !evaluation.recommendations.is_empty() {
        html.push_str(
            r#"<div class="recommendations-section"><h4>🎯 Priority Recommendations</h4>"#,
        );
        for rec in &evaluation.recommendations {
            html.push_str(&render_recommendation(rec));
        }
        html.push_str("</div>");
    }

    if !evaluation.strengths.is_empty() {
        html.push_str(r#"<div class="strengths-section"><h4>💪 Your Strengths</h4>"#);
        for strength in &evaluation.strengths {
            let _ = write!(
                html,
                r#"<div class="strength-item">{}</div>"#,
                escape_html(strength)
            );
        }
        html.push_str("</div>");
    }

    if let Some(next_steps) = evaluation.next_steps.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(
            html,
            r#"<div class="next-steps"><strong>🗺️ Next Steps:</strong> {}</div>"#,
            escape_html(next_steps)
        );
    }

    html
}

fn render_category(category: &CategoryBreakdown) -> String {
    let percent = to_percent(category.score);
    let mut html = String::from(r#"<div class="skill-category">"#);
    let _ = write!(
        html,
        r#"<div class="category-header"><div class="category-title">{}</div><div class="category-score {}">{}%</div></div>"#,
        escape_html(&category.category),
        score_class(percent),
        percent
    );

    html.push_str(&skill_tags(
        "skills-present",
        "✅ Present Skills:",
        "present",
        &category.present_skills,
    ));
    html.push_str(&skill_tags(
        "skills-missing",
        "❌ Missing Skills:",
        "missing",
        &category.missing_critical,
    ));

    let _ = write!(
        html,
        r#"<div class="category-notes">{}</div></div>"#,
        escape_html(&category.notes)
    );
    html
}

fn skill_tags(section: &str, label: &str, tag_class: &str, skills: &[String]) -> String {
    if skills.is_empty() {
        return String::new();
    }
    let tags: String = skills
        .iter()
        .map(|s| format!(r#"<span class="skill-tag {tag_class}">{}</span>"#, escape_html(s)))
        .collect();
    format!(
        r#"<div class="{section}"><div class="skills-label">{label}</div><div class="skills-list">{tags}</div></div>"#
    )
}

fn render_recommendation(rec: &Recommendation) -> String {
    let priority = match &rec.priority {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    };
    format!(
        r#"<div class="recommendation-item"><div class="rec-priority">Priority {}</div><div class="rec-skill">{}</div><div class="rec-action">{}</div><div class="rec-timeline">Timeline: {} | {}</div></div>"#,
        escape_html(&priority),
        escape_html(&rec.skill),
        escape_html(&rec.action),
        escape_html(&rec.timeline),
        escape_html(&rec.impact)
    )
}
