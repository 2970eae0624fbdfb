use std::fmt::Write;

use crate::models::roadmap::{format_hours, Course, Roadmap, RoadmapItem, TimeEstimates};
use crate::render::escape_html;

const DEFAULT_WEEKLY_HOURS: f64 = 8.0;

/// Renders resources, time estimates and phases in server order.
pub fn render_roadmap(roadmap: &Roadmap) -> String {
    let mut html = String::from(r#"<div id="roadmap-container">"#);

    if let Some(estimates) = &roadmap.time_estimates {
        html.push_str(&render_time_estimates(estimates));
    }

    html.push_str(r#"<ol id="roadmap-list">"#);
    for phase in &roadmap.phases {
        let _ = write!(
            html,
            r#"<h3 class="phase-header">{}</h3>"#,
            escape_html(&phase.phase)
        );
        if let Some(frame) = phase.phase_time_frame.as_deref().filter(|f| !f.is_empty()) {
            let _ = write!(
                html,
                r#"<div class="phase-time-info">{}</div>"#,
                escape_html(frame)
            );
        }
        for item in &phase.skills {
            html.push_str(&render_item(item));
        }
    }
    html.push_str("</ol>");

    let resources = roadmap
        .resources
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or("No resources provided.");
    let _ = write!(
        html,
        r#"<div id="resources-container"><h3>Resources</h3><p id="resources">{}</p></div>"#,
        escape_html(resources)
    );

    html.push_str("</div>");
    html
}

fn render_time_estimates(estimates: &TimeEstimates) -> String {
    let frame = estimates
        .overall_time_frame
        .as_deref()
        .unwrap_or("Time estimates not available");
    format!(
        r#"<div id="time-estimates-container"><div id="overall-time-frame">{}</div><div id="total-hours">Base time: {}h</div><div id="buffered-hours">With buffer: {}h</div><div id="weekly-commitment">Weekly commitment: {}h</div></div>"#,
        escape_html(frame),
        format_hours(estimates.overall_total_hours.unwrap_or(0.0)),
        format_hours(estimates.overall_buffered_hours.unwrap_or(0.0)),
        format_hours(estimates.weekly_hours.unwrap_or(DEFAULT_WEEKLY_HOURS)),
    )
}

fn render_item(item: &RoadmapItem) -> String {
    let mut html = String::from(r#"<li class="roadmap-item">"#);
    let _ = write!(
        html,
        r#"<span class="skill-name">{}</span>"#,
        escape_html(&item.skill)
    );
    if let Some(hours) = item.est_hours.filter(|h| *h > 0.0) {
        let _ = write!(
            html,
            r#" <span class="skill-hours">(~{}h)</span>"#,
            format_hours(hours)
        );
    }
    if item.course.has_title() {
        html.push_str(&render_course(&item.course));
    }
    html.push_str("</li>");
    html
}

fn render_course(course: &Course) -> String {
    let title = escape_html(&course.title);
    let target = match course.absolute_url() {
        Some(url) => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{title}</a>"#,
            escape_html(&url)
        ),
        None => title,
    };
    let reason = course.reason.as_deref().unwrap_or_default();
    format!(
        r#"<div class="course-info"><p><strong>Course: </strong>{target} ({})</p><p><strong>Why: </strong>{}</p></div>"#,
        escape_html(course.time_info()),
        escape_html(reason)
    )
}
