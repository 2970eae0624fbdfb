//! Ordered skill list with case-insensitive de-duplication.

use serde::Serialize;

/// Result of feeding one line of user input into the list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub added: Vec<String>,
    /// Tokens rejected because an equal skill (ignoring case) already existed,
    /// including earlier tokens of the same input.
    pub duplicates: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SkillList {
    skills: Vec<String>,
}

impl SkillList {
    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    fn contains(&self, skill: &str) -> bool {
        let wanted = skill.trim().to_lowercase();
        self.skills.iter().any(|s| s.to_lowercase() == wanted)
    }

    /// Splits `input` on whitespace and appends each new token in order.
    pub fn add_input(&mut self, input: &str) -> AddOutcome {
        let mut outcome = AddOutcome::default();
        for token in input.split_whitespace() {
            if self.push(token) {
                outcome.added.push(token.to_string());
            } else {
                outcome.duplicates.push(token.to_string());
            }
        }
        outcome
    }

    /// Appends one skill unless blank or already present. Returns whether it
    /// was added.
    pub fn push(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.contains(skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    /// Removes the entry at `index`, leaving the rest in order.
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        (index < self.skills.len()).then(|| self.skills.remove(index))
    }

    /// Replaces the whole list, keeping first occurrences only.
    pub fn replace_all<I, S>(&mut self, skills: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.skills.clear();
        for skill in skills {
            self.push(skill.as_ref());
        }
    }
}
