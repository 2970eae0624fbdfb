use serde::{Deserialize, Serialize};

/// Per-role result as produced by the readiness agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAssessment {
    #[serde(default)]
    pub role_name: String,
    #[serde(default)]
    pub readiness_score: f64, // 0.0 – 1.0
    #[serde(default)]
    pub readiness_label: String,
    #[serde(default)]
    pub missing_skills: Vec<MissingSkill>,
    #[serde(default)]
    pub quick_win_recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSkill {
    pub skill: String,
    #[serde(default)]
    pub current_level: u8,
    #[serde(default)]
    pub target_level: u8,
    #[serde(default)]
    pub gap_degree: u8,
    #[serde(default)]
    pub importance: String, // "must" | "nice"
}

/// `{target_role, role_assessment}` wrapper used by both `assessment` and
/// `role_readiness` response keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleReadiness {
    #[serde(default)]
    pub target_role: Option<String>,
    pub role_assessment: RoleAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryEvaluation {
    pub overall_score: f64, // 0.0 – 1.0
    #[serde(default)]
    pub readiness_level: String,
    #[serde(default)]
    pub breakdown: Vec<CategoryBreakdown>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub next_steps: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub score: f64,
    #[serde(default)]
    pub present_skills: Vec<String>,
    #[serde(default)]
    pub missing_critical: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub priority: serde_json::Value, // number or text, rendered as-is
    pub skill: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub impact: String,
}

/// Normalised readiness result, whichever keys the backend answered with.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessAssessment {
    pub role: Option<RoleAssessment>,
    pub industry: Option<IndustryEvaluation>,
}

impl ReadinessAssessment {
    /// Headline score as a rounded percentage, preferring the industry view.
    pub fn score_percent(&self) -> Option<u32> {
        self.industry
            .as_ref()
            .map(|i| i.overall_score)
            .or_else(|| self.role.as_ref().map(|r| r.readiness_score))
            .map(to_percent)
    }

    pub fn label(&self) -> Option<&str> {
        self.industry
            .as_ref()
            .map(|i| i.readiness_level.as_str())
            .or_else(|| self.role.as_ref().map(|r| r.readiness_label.as_str()))
    }
}

pub fn to_percent(fraction: f64) -> u32 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u32
}

/// CSS bucket for a percentage score.
pub fn score_class(percent: u32) -> &'static str {
    if percent >= 80 {
        "high"
    } else if percent >= 60 {
        "medium"
    } else {
        "low"
    }
}

/// CSS bucket for a readiness label such as "Workable with targeted upskilling".
pub fn readiness_class(label: &str) -> &'static str {
    if label.contains("Ready") {
        "ready"
    } else if label.contains("Workable") {
        "workable"
    } else {
        "needs-foundation"
    }
}
