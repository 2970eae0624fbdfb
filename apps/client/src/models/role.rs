use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Career roles the backend can assess readiness for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetRole {
    DataScientist,
    MlEngineer,
    AiEngineer,
    CloudArchitect,
    DevopsEngineer,
    FullStackDeveloper,
    CybersecurityAnalyst,
    ProductManager,
}

impl TargetRole {
    pub const ALL: [TargetRole; 8] = [
        TargetRole::DataScientist,
        TargetRole::MlEngineer,
        TargetRole::AiEngineer,
        TargetRole::CloudArchitect,
        TargetRole::DevopsEngineer,
        TargetRole::FullStackDeveloper,
        TargetRole::CybersecurityAnalyst,
        TargetRole::ProductManager,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            TargetRole::DataScientist => "data-scientist",
            TargetRole::MlEngineer => "ml-engineer",
            TargetRole::AiEngineer => "ai-engineer",
            TargetRole::CloudArchitect => "cloud-architect",
            TargetRole::DevopsEngineer => "devops-engineer",
            TargetRole::FullStackDeveloper => "full-stack-developer",
            TargetRole::CybersecurityAnalyst => "cybersecurity-analyst",
            TargetRole::ProductManager => "product-manager",
        }
    }

    /// "full-stack-developer" → "Full Stack Developer".
    pub fn display_name(self) -> String {
        title_case_slug(self.slug())
    }
}

impl fmt::Display for TargetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown target role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for TargetRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TargetRole::ALL
            .into_iter()
            .find(|role| role.slug() == wanted)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

pub fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
