use std::fmt;

use super::session::{StepId, WizardSession};

pub const SKILLS_DELIMITER: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSection {
    pub title: &'static str,
    pub entries: Vec<ReviewEntry>,
}

/// Read-only summary shown on the final step. The password is never included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewView {
    pub sections: Vec<ReviewSection>,
    /// Embeddable image reference, for hosts that can display it.
    pub profile_picture: Option<String>,
}

impl ReviewView {
    pub fn value(&self, label: &str) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|section| section.entries.iter())
            .find(|entry| entry.label == label)
            .map(|entry| entry.value.as_str())
    }

    pub fn skills_line(&self) -> &str {
        self.value("Skills").unwrap_or("")
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for section in &self.sections {
            lines.push(format!("== {} ==", section.title));
            for entry in &section.entries {
                lines.push(format!("{}: {}", entry.label, entry.value));
            }
        }
        lines
    }
}

impl fmt::Display for ReviewView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

fn entry(label: &'static str, value: impl Into<String>) -> ReviewEntry {
    ReviewEntry {
        label,
        value: value.into(),
    }
}

/// Projects a session into its review summary.
pub fn render(session: &WizardSession) -> ReviewView {
    let picture = session.profile.profile_picture.as_ref();
    let picture_summary = match picture {
        Some(picture) => format!(
            "{} ({} bytes)",
            picture.mime().unwrap_or("image"),
            picture.size_bytes()
        ),
        None => "(none)".to_string(),
    };

    ReviewView {
        sections: vec![
            ReviewSection {
                title: StepId::Personal.title(),
                entries: vec![
                    entry("Name", session.personal.full_name.as_str()),
                    entry("Email", session.personal.email.as_str()),
                    entry("Phone", session.personal.phone.as_str()),
                ],
            },
            ReviewSection {
                title: StepId::Account.title(),
                entries: vec![entry("Username", session.account.username.as_str())],
            },
            ReviewSection {
                title: StepId::Profile.title(),
                entries: vec![
                    entry("Bio", session.profile.bio.as_str()),
                    entry("Skills", session.profile.skills.joined(SKILLS_DELIMITER)),
                    entry("Profile Picture", picture_summary),
                ],
            },
        ],
        profile_picture: picture.map(|picture| picture.data_url().to_string()),
    }
}
