use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub phase: String,
    #[serde(default)]
    pub phase_time_frame: Option<String>,
    #[serde(default, deserialize_with = "lenient_hours")]
    pub phase_total_hours: Option<f64>,
    #[serde(default)]
    pub skills: Vec<RoadmapItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub skill: String,
    #[serde(default, deserialize_with = "lenient_hours")]
    pub est_hours: Option<f64>,
    #[serde(default)]
    pub course: Course,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default = "not_available")]
    pub title: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Default for Course {
    fn default() -> Self {
        Self {
            title: not_available(),
            platform: None,
            duration: None,
            url: None,
            reason: None,
        }
    }
}

/// Hour figures come from generated text and sometimes arrive as strings
/// ("15", "12.5"). Anything that is not a number is treated as unknown.
fn lenient_hours<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|h| h.is_finite()),
        _ => None,
    }))
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

fn is_present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != NOT_AVAILABLE)
}

impl Course {
    pub fn has_title(&self) -> bool {
        let title = self.title.trim();
        !title.is_empty() && title != NOT_AVAILABLE
    }

    /// Absolute link target, or `None` when the backend gave no usable URL.
    pub fn absolute_url(&self) -> Option<String> {
        is_present(&self.url).map(|url| {
            if url.starts_with("http://") || url.starts_with("https://") {
                url.to_string()
            } else {
                format!("https://{url}")
            }
        })
    }

    /// Duration when known, else platform, else "Self-paced".
    pub fn time_info(&self) -> &str {
        is_present(&self.duration)
            .or_else(|| is_present(&self.platform))
            .unwrap_or("Self-paced")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEstimates {
    #[serde(default)]
    pub overall_time_frame: Option<String>,
    #[serde(default, deserialize_with = "lenient_hours")]
    pub overall_total_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient_hours")]
    pub overall_buffered_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient_hours")]
    pub weekly_hours: Option<f64>,
}

/// Successful roadmap result.
#[derive(Debug, Clone, PartialEq)]
pub struct Roadmap {
    pub phases: Vec<RoadmapPhase>,
    pub resources: Option<String>,
    pub time_estimates: Option<TimeEstimates>,
}

/// Formats an hour figure without a trailing ".0".
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as i64)
    } else {
        format!("{hours:.1}")
    }
}
