//! Multi-step sign-up wizard.
//!
//! [`Wizard`] owns the single [`WizardSession`] and its persistence handle and
//! exposes one method per user action. Each method runs synchronously; hosts
//! dispatch actions one at a time and render from the accessors.

pub mod navigator;
pub mod persistence;
pub mod review;
pub mod session;
pub mod skills;
pub mod submission;
pub mod validation;

use std::path::Path;

use tracing::{info, warn};

use crate::config::Config;
use crate::errors::Result;
use crate::storage::KeyValueStore;

pub use navigator::Transition;
pub use persistence::{PersistenceAdapter, Snapshot, Theme};
pub use review::ReviewView;
pub use session::{ProfilePicture, StepId, WizardSession};
pub use skills::SkillSet;
pub use submission::{Confirmation, SubmitResult};
pub use validation::{Field, PasswordStrength, StepData, ValidationResult};

pub struct Wizard<S: KeyValueStore> {
    session: WizardSession,
    confirm_password: String,
    persistence: PersistenceAdapter<S>,
    theme: Theme,
    errors: ValidationResult,
    review: Option<ReviewView>,
    confirmation: Option<Confirmation>,
}

impl<S: KeyValueStore> Wizard<S> {
    /// Starts a session with the default store keys.
    pub fn new(store: S) -> Self {
        Self::from_adapter(PersistenceAdapter::new(store))
    }

    /// Starts a session using the keys named in `config`.
    pub fn start(store: S, config: &Config) -> Self {
        Self::from_adapter(PersistenceAdapter::with_config(store, config))
    }

    fn from_adapter(persistence: PersistenceAdapter<S>) -> Self {
        let session = match persistence.load() {
            Some(session) => {
                info!(
                    skills = session.profile.skills.len(),
                    "resumed saved session"
                );
                session
            }
            None => WizardSession::new(),
        };
        let theme = persistence.load_theme();
        Self {
            session,
            confirm_password: String::new(),
            persistence,
            theme,
            errors: ValidationResult::default(),
            review: None,
            confirmation: None,
        }
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn current_step(&self) -> StepId {
        self.session.current_step
    }

    pub fn progress(&self) -> f32 {
        navigator::progress(self.session.current_step)
    }

    pub fn step_indicators(&self) -> [bool; StepId::COUNT as usize] {
        navigator::step_indicators(self.session.current_step)
    }

    /// Errors from the most recent forward attempt.
    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn confirm_password(&self) -> &str {
        &self.confirm_password
    }

    pub fn is_completed(&self) -> bool {
        self.confirmation.is_some()
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    /// Summary rendered when the final step was entered.
    pub fn review(&self) -> Option<&ReviewView> {
        self.review.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    pub fn into_store(self) -> S {
        self.persistence.into_store()
    }

    /// Runs the rules for `step` against the live inputs without navigating.
    pub fn validate(&self, step: StepId) -> ValidationResult {
        validation::validate(step, StepData::new(&self.session, &self.confirm_password))
    }

    pub fn password_strength(&self) -> PasswordStrength {
        validation::password_strength(&self.session.account.password)
    }

    pub fn bio_counter(&self) -> String {
        self.session.profile.bio_counter()
    }

    pub fn set_full_name(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.session.personal.full_name = value.into();
        }
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.session.personal.email = value.into();
        }
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.session.personal.phone = value.into();
        }
    }

    pub fn set_username(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.session.account.username = value.into();
        }
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.session.account.password = value.into();
        }
    }

    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.confirm_password = value.into();
        }
    }

    /// Updates the bio and saves the whole session.
    pub fn set_bio(&mut self, value: impl Into<String>) {
        if self.editable() {
            self.session.profile.bio = value.into();
            self.persistence.save(&self.session);
        }
    }

    pub fn set_profile_picture(&mut self, picture: Option<ProfilePicture>) {
        if self.editable() {
            self.session.profile.profile_picture = picture;
        }
    }

    /// Reads an image file into the profile picture field.
    ///
    /// An unreadable file is an error; an oversized one is accepted here and
    /// reported by validation when leaving the profile step. Once submitted,
    /// the file is not read.
    pub fn load_profile_picture(&mut self, path: &Path) -> Result<()> {
        if !self.editable() {
            return Ok(());
        }
        let picture = ProfilePicture::from_file(path)?;
        self.set_profile_picture(Some(picture));
        Ok(())
    }

    /// Adds a skill tag and saves. Blank input is ignored.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        if !self.editable() || !self.session.profile.skills.add(skill) {
            return false;
        }
        self.persistence.save(&self.session);
        true
    }

    /// Removes the tag at `index` and saves.
    pub fn remove_skill(&mut self, index: usize) -> Option<String> {
        if !self.editable() {
            return None;
        }
        let removed = self.session.profile.skills.remove(index)?;
        self.persistence.save(&self.session);
        Some(removed)
    }

    /// Forward move requested by the control shown on `from`.
    ///
    /// On success the session is saved and, when `to` is the final step, the
    /// review is rendered. On failure only the displayed errors change.
    pub fn next(&mut self, from: StepId, to: StepId) -> Transition {
        if !self.editable() {
            return Transition::Ignored;
        }
        let (transition, result) =
            navigator::go_next(&mut self.session, &self.confirm_password, from, to);
        match &transition {
            Transition::Advanced { to, .. } => {
                self.errors = result;
                self.persistence.save(&self.session);
                if to.is_last() {
                    self.review = Some(self.render_review());
                }
            }
            Transition::Blocked(_) => self.errors = result,
            Transition::Retreated { .. } | Transition::Ignored => {}
        }
        transition
    }

    /// Backward move requested by the control shown on `from`.
    pub fn prev(&mut self, from: StepId, to: StepId) -> Transition {
        if !self.editable() {
            return Transition::Ignored;
        }
        let transition = navigator::go_prev(&mut self.session, from, to);
        if transition.moved() && !to.is_last() {
            self.review = None;
        }
        transition
    }

    /// Finalizes the session from the last step and erases the snapshot.
    pub fn submit(&mut self) -> SubmitResult {
        let result = submission::submit(&self.session, self.confirmation.as_ref());
        match &result {
            SubmitResult::Submitted(confirmation) => {
                info!(id = %confirmation.id, "session submitted");
                self.persistence.clear();
                self.reset_in_memory();
                self.confirmation = Some(confirmation.clone());
            }
            SubmitResult::NotOnFinalStep { current } => {
                warn!(step = current.number(), "submit requested before the final step");
            }
            SubmitResult::AlreadySubmitted(_) => {}
        }
        result
    }

    /// Returns to an empty first step and erases the snapshot.
    pub fn restart(&mut self) {
        self.persistence.clear();
        self.reset_in_memory();
        self.confirmation = None;
        info!("session restarted");
    }

    /// Flips the theme and stores the preference.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.persistence.save_theme(self.theme);
        self.theme
    }

    fn editable(&self) -> bool {
        self.confirmation.is_none()
    }

    fn reset_in_memory(&mut self) {
        self.session = WizardSession::new();
        self.confirm_password.clear();
        self.errors = ValidationResult::default();
        self.review = None;
    }

    // Review reads what was just persisted; the live session is only used
    // when the store could not hand the snapshot back.
    fn render_review(&self) -> ReviewView {
        match self.persistence.load() {
            Some(persisted) => review::render(&persisted),
            None => {
                warn!("no persisted snapshot for review, rendering live session");
                review::render(&self.session)
            }
        }
    }
}
