//! Snapshot persistence for the in-progress session and the theme preference.
//!
//! Failures never leave this module: unreadable snapshots behave like "no
//! snapshot", and failed writes are logged and dropped.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{Config, DEFAULT_SNAPSHOT_KEY, DEFAULT_THEME_KEY};
use crate::storage::KeyValueStore;

use super::session::{
    AccountInfo, PersonalInfo, ProfileInfo, ProfilePicture, StepId, WizardSession,
};
use super::skills::SkillSet;

/// Stored shape of a session. Every field tolerates being absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    /// Text-encoded image, empty when no picture was chosen.
    #[serde(default)]
    pub profile_pic: Option<String>,
}

impl Snapshot {
    /// Captures everything except the current step.
    pub fn capture(session: &WizardSession) -> Self {
        Self {
            full_name: Some(session.personal.full_name.clone()),
            email: Some(session.personal.email.clone()),
            phone: Some(session.personal.phone.clone()),
            username: Some(session.account.username.clone()),
            password: Some(session.account.password.clone()),
            bio: Some(session.profile.bio.clone()),
            skills: Some(session.profile.skills.as_slice().to_vec()),
            profile_pic: Some(
                session
                    .profile
                    .profile_picture
                    .as_ref()
                    .map(|picture| picture.data_url().to_string())
                    .unwrap_or_default(),
            ),
        }
    }

    /// Rebuilds a session positioned at the first step.
    pub fn into_session(self) -> WizardSession {
        let profile_picture = self
            .profile_pic
            .filter(|url| !url.is_empty())
            .map(ProfilePicture::from_data_url);
        WizardSession {
            personal: PersonalInfo {
                full_name: self.full_name.unwrap_or_default(),
                email: self.email.unwrap_or_default(),
                phone: self.phone.unwrap_or_default(),
            },
            account: AccountInfo {
                username: self.username.unwrap_or_default(),
                password: self.password.unwrap_or_default(),
            },
            profile: ProfileInfo {
                bio: self.bio.unwrap_or_default(),
                skills: SkillSet::from(self.skills.unwrap_or_default()),
                profile_picture,
            },
            current_step: StepId::FIRST,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than `"dark"` reads as the light theme.
    pub fn parse(raw: &str) -> Self {
        if raw == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Reads and writes the wizard's entries in a [`KeyValueStore`].
pub struct PersistenceAdapter<S: KeyValueStore> {
    store: S,
    snapshot_key: String,
    theme_key: String,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            snapshot_key: DEFAULT_SNAPSHOT_KEY.into(),
            theme_key: DEFAULT_THEME_KEY.into(),
        }
    }

    pub fn with_config(store: S, config: &Config) -> Self {
        Self {
            store,
            snapshot_key: config.snapshot_key.clone(),
            theme_key: config.theme_key.clone(),
        }
    }

    pub fn save(&mut self, session: &WizardSession) {
        let snapshot = Snapshot::capture(session);
        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialize session snapshot");
                return;
            }
        };
        match self.store.set(&self.snapshot_key, &json) {
            Ok(()) => debug!(key = %self.snapshot_key, "session snapshot saved"),
            Err(err) => warn!(key = %self.snapshot_key, error = %err, "failed to save session snapshot"),
        }
    }

    /// Returns the stored session, or `None` when nothing usable is stored.
    pub fn load(&self) -> Option<WizardSession> {
        let raw = match self.store.get(&self.snapshot_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key = %self.snapshot_key, error = %err, "failed to read session snapshot");
                return None;
            }
        };
        match serde_json::from_str::<Option<Snapshot>>(&raw) {
            Ok(snapshot) => snapshot.map(Snapshot::into_session),
            Err(err) => {
                warn!(key = %self.snapshot_key, error = %err, "ignoring malformed session snapshot");
                None
            }
        }
    }

    pub fn clear(&mut self) {
        if let Err(err) = self.store.remove(&self.snapshot_key) {
            warn!(key = %self.snapshot_key, error = %err, "failed to clear session snapshot");
        }
    }

    pub fn has_snapshot(&self) -> bool {
        matches!(self.store.get(&self.snapshot_key), Ok(Some(_)))
    }

    pub fn load_theme(&self) -> Theme {
        match self.store.get(&self.theme_key) {
            Ok(Some(raw)) => Theme::parse(raw.trim()),
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!(key = %self.theme_key, error = %err, "failed to read theme preference");
                Theme::default()
            }
        }
    }

    pub fn save_theme(&mut self, theme: Theme) {
        if let Err(err) = self.store.set(&self.theme_key, theme.as_str()) {
            warn!(key = %self.theme_key, error = %err, "failed to save theme preference");
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Result, WizardError};
    use crate::storage::MemoryStore;

    fn filled_session() -> WizardSession {
        let mut session = WizardSession::new();
        session.personal.full_name = "Ann Lee".into();
        session.personal.email = "a@b.com".into();
        session.personal.phone = "5551234567".into();
        session.account.username = "annlee".into();
        session.account.password = "abcd123!".into();
        session.profile.bio = "Builds things".into();
        session.profile.skills.add("Rust");
        session.profile.skills.add("Go");
        session.profile.skills.add("Rust");
        session.profile.profile_picture = Some(ProfilePicture::from_bytes("image/png", b"\x89PNG"));
        session.current_step = StepId::Profile;
        session
    }

    #[test]
    fn load_after_save_matches_everything_but_the_step() {
        let mut adapter = PersistenceAdapter::new(MemoryStore::new());
        let session = filled_session();
        adapter.save(&session);

        let loaded = adapter.load().expect("snapshot");
        assert!(loaded.same_data_as(&session));
        assert_eq!(loaded.current_step, StepId::Personal);
    }

    #[test]
    fn snapshot_uses_the_documented_field_names() {
        let mut adapter = PersistenceAdapter::new(MemoryStore::new());
        adapter.save(&WizardSession::new());
        let raw = adapter.store().get("formData").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        for key in [
            "fullName", "email", "phone", "username", "password", "bio", "skills", "profilePic",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["profilePic"], "");
        assert!(value.get("currentStep").is_none());
    }

    #[test]
    fn missing_and_null_fields_default() {
        let mut store = MemoryStore::new();
        store
            .set("formData", r#"{"fullName":"Ann","skills":null,"profilePic":null}"#)
            .unwrap();
        let adapter = PersistenceAdapter::new(store);

        let loaded = adapter.load().expect("snapshot");
        assert_eq!(loaded.personal.full_name, "Ann");
        assert_eq!(loaded.personal.email, "");
        assert!(loaded.profile.skills.is_empty());
        assert!(loaded.profile.profile_picture.is_none());
    }

    #[test]
    fn malformed_or_null_snapshot_reads_as_absent() {
        for raw in ["{not json", "null", "[1,2,3]"] {
            let mut store = MemoryStore::new();
            store.set("formData", raw).unwrap();
            assert_eq!(PersistenceAdapter::new(store).load(), None, "raw {raw:?}");
        }
    }

    #[test]
    fn clear_removes_snapshot_and_is_idempotent() {
        let mut adapter = PersistenceAdapter::new(MemoryStore::new());
        adapter.save(&filled_session());
        assert!(adapter.has_snapshot());

        adapter.clear();
        adapter.clear();
        assert!(!adapter.has_snapshot());
        assert_eq!(adapter.load(), None);
    }

    #[test]
    fn theme_defaults_to_light_and_survives_clear() {
        let mut adapter = PersistenceAdapter::new(MemoryStore::new());
        assert_eq!(adapter.load_theme(), Theme::Light);

        adapter.save_theme(Theme::Dark);
        adapter.clear();
        assert_eq!(adapter.load_theme(), Theme::Dark);
        assert_eq!(adapter.store().get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(Theme::parse("solarized"), Theme::Light);
    }

    #[test]
    fn custom_keys_from_config() {
        let config = Config {
            snapshot_key: "draft".into(),
            theme_key: "look".into(),
            data_dir: None,
        };
        let mut adapter = PersistenceAdapter::with_config(MemoryStore::new(), &config);
        adapter.save(&filled_session());
        adapter.save_theme(Theme::Dark);
        assert!(adapter.store().get("draft").unwrap().is_some());
        assert!(adapter.store().get("formData").unwrap().is_none());
        assert_eq!(adapter.store().get("look").unwrap().as_deref(), Some("dark"));
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(WizardError::StorageError("unavailable".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(WizardError::StorageError("read-only".into()))
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(WizardError::StorageError("read-only".into()))
        }
    }

    #[test]
    fn store_failures_never_propagate() {
        let mut adapter = PersistenceAdapter::new(BrokenStore);
        adapter.save(&filled_session());
        adapter.clear();
        adapter.save_theme(Theme::Dark);
        assert_eq!(adapter.load(), None);
        assert_eq!(adapter.load_theme(), Theme::Light);
    }
}
