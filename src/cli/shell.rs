use std::path::Path;

use dialoguer::theme::ColorfulTheme;
use tracing::debug;

use crate::cli::{io, output};
use crate::config::ConfigManager;
use crate::errors::CliError;
use crate::storage::{JsonFileStore, KeyValueStore};
use crate::wizard::{Field, StepId, SubmitResult, Transition, Wizard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Edit(Field),
    AddSkill,
    RemoveSkill,
    Next,
    Back,
    Submit,
    ToggleTheme,
    Restart,
    Quit,
}

impl Action {
    fn label(self) -> String {
        match self {
            Action::Edit(Field::ProfilePicture) => "Choose profile picture".into(),
            Action::Edit(field) => format!("Edit {}", field.label().to_lowercase()),
            Action::AddSkill => "Add skill".into(),
            Action::RemoveSkill => "Remove skill".into(),
            Action::Next => "Next".into(),
            Action::Back => "Back".into(),
            Action::Submit => "Submit".into(),
            Action::ToggleTheme => "Toggle theme".into(),
            Action::Restart => "Start over".into(),
            Action::Quit => "Quit (progress is saved)".into(),
        }
    }
}

fn actions_for(step: StepId) -> Vec<Action> {
    let mut actions: Vec<Action> = Field::for_step(step)
        .iter()
        .filter(|field| **field != Field::Skills)
        .map(|field| Action::Edit(*field))
        .collect();
    if step == StepId::Profile {
        actions.extend([Action::AddSkill, Action::RemoveSkill]);
    }
    if step.is_last() {
        actions.push(Action::Submit);
    } else {
        actions.push(Action::Next);
    }
    if step.previous().is_some() {
        actions.push(Action::Back);
    }
    actions.extend([Action::ToggleTheme, Action::Restart, Action::Quit]);
    actions
}

/// Runs the interactive wizard against the file-backed store.
pub fn run_cli() -> Result<(), CliError> {
    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    let store = JsonFileStore::new(config.store_dir(manager.base_dir()))?;
    debug!(root = %store.root().display(), "opened wizard store");

    let mut wizard = Wizard::start(store, &config);
    output::set_theme(wizard.theme());
    let theme = ColorfulTheme::default();

    loop {
        if let Some(confirmation) = wizard.confirmation() {
            output::success(format!(
                "Submitted at {} (reference {})",
                confirmation.submitted_at.format("%Y-%m-%d %H:%M UTC"),
                confirmation.id
            ));
            let items = vec![Action::Restart.label(), "Quit".to_string()];
            match io::choose(&theme, "What next?", &items)? {
                0 => wizard.restart(),
                _ => return Ok(()),
            }
            continue;
        }

        let step = wizard.current_step();
        render_step(&wizard);

        let actions = actions_for(step);
        let labels: Vec<String> = actions.iter().map(|action| action.label()).collect();
        let picked = actions[io::choose(&theme, "Action", &labels)?];

        match picked {
            Action::Edit(field) => edit_field(&mut wizard, &theme, field)?,
            Action::AddSkill => {
                let skill = io::prompt_text(&theme, "Skill", "")?;
                if !wizard.add_skill(&skill) {
                    output::warning("Skill cannot be blank.");
                }
            }
            Action::RemoveSkill => {
                let tags = wizard.session().profile.skills.as_slice().to_vec();
                if tags.is_empty() {
                    output::info("No skills to remove.");
                } else {
                    let index = io::choose(&theme, "Remove which skill?", &tags)?;
                    wizard.remove_skill(index);
                }
            }
            Action::Next => {
                if let Some(to) = step.next() {
                    if let Transition::Blocked(_) = wizard.next(step, to) {
                        output::error("Please fix the highlighted fields.");
                    }
                }
            }
            Action::Back => {
                if let Some(to) = step.previous() {
                    wizard.prev(step, to);
                }
            }
            Action::Submit => match wizard.submit() {
                SubmitResult::Submitted(_) | SubmitResult::AlreadySubmitted(_) => {}
                SubmitResult::NotOnFinalStep { current } => {
                    output::warning(format!("Finish the remaining steps first ({current})."));
                }
            },
            Action::ToggleTheme => output::set_theme(wizard.toggle_theme()),
            Action::Restart => {
                wizard.restart();
                output::info("Started over.");
            }
            Action::Quit => return Ok(()),
        }
    }
}

fn render_step<S: KeyValueStore>(wizard: &Wizard<S>) {
    let step = wizard.current_step();
    output::section(format!("{} ({:.0}%)", step, wizard.progress() * 100.0));

    let session = wizard.session();
    match step {
        StepId::Personal => {
            output::info(format!("Full name: {}", session.personal.full_name));
            output::info(format!("Email: {}", session.personal.email));
            output::info(format!("Phone: {}", session.personal.phone));
        }
        StepId::Account => {
            output::info(format!("Username: {}", session.account.username));
            output::info(format!(
                "Password: {} ({})",
                "*".repeat(session.account.password.chars().count()),
                wizard.password_strength().label()
            ));
        }
        StepId::Profile => {
            let picture = session
                .profile
                .profile_picture
                .as_ref()
                .map(|picture| format!("{} bytes", picture.size_bytes()))
                .unwrap_or_else(|| "(none)".into());
            output::info(format!("Profile picture: {}", picture));
            output::info(format!("Bio ({}): {}", wizard.bio_counter(), session.profile.bio));
            output::info(format!("Skills: {}", session.profile.skills.joined(", ")));
        }
        StepId::Review => {
            if let Some(review) = wizard.review() {
                for line in review.lines() {
                    output::info(line);
                }
            }
        }
    }

    for field in Field::for_step(step) {
        let message = wizard.errors().error(*field);
        if !message.is_empty() {
            output::warning(format!("{}: {}", field.label(), message));
        }
    }
}

fn edit_field<S: KeyValueStore>(
    wizard: &mut Wizard<S>,
    theme: &ColorfulTheme,
    field: Field,
) -> Result<(), CliError> {
    let session = wizard.session().clone();
    match field {
        Field::FullName => wizard.set_full_name(io::prompt_text(
            theme,
            field.label(),
            &session.personal.full_name,
        )?),
        Field::Email => {
            wizard.set_email(io::prompt_text(theme, field.label(), &session.personal.email)?)
        }
        Field::Phone => {
            wizard.set_phone(io::prompt_text(theme, field.label(), &session.personal.phone)?)
        }
        Field::Username => wizard.set_username(io::prompt_text(
            theme,
            field.label(),
            &session.account.username,
        )?),
        Field::Password => wizard.set_password(io::prompt_secret(theme, field.label())?),
        Field::ConfirmPassword => {
            wizard.set_confirm_password(io::prompt_secret(theme, field.label())?)
        }
        Field::Bio => wizard.set_bio(io::prompt_text(theme, field.label(), &session.profile.bio)?),
        Field::ProfilePicture => {
            let raw = io::prompt_text(theme, "Image path (blank to clear)", "")?;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                wizard.set_profile_picture(None);
            } else if let Err(err) = wizard.load_profile_picture(Path::new(trimmed)) {
                output::error(err);
            }
        }
        Field::Skills => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_step_offers_skill_actions_and_no_submit() {
        let actions = actions_for(StepId::Profile);
        assert!(actions.contains(&Action::AddSkill));
        assert!(actions.contains(&Action::RemoveSkill));
        assert!(actions.contains(&Action::Next));
        assert!(!actions.contains(&Action::Submit));
        assert!(!actions.contains(&Action::Edit(Field::Skills)));
    }

    #[test]
    fn first_step_has_no_back_and_last_step_submits() {
        assert!(!actions_for(StepId::Personal).contains(&Action::Back));
        let review = actions_for(StepId::Review);
        assert!(review.contains(&Action::Submit));
        assert!(review.contains(&Action::Back));
        assert!(!review.contains(&Action::Next));
    }
}
