use std::{fmt, fs, path::Path};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::errors::{Result, WizardError};

use super::skills::SkillSet;

/// Largest accepted profile picture, in raw bytes.
pub const MAX_PICTURE_BYTES: u64 = 2 * 1024 * 1024;
/// Longest accepted bio, in characters.
pub const BIO_LIMIT: usize = 250;

/// Pages of the wizard, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum StepId {
    #[default]
    Personal = 1,
    Account = 2,
    Profile = 3,
    Review = 4,
}

impl StepId {
    pub const COUNT: u8 = 4;
    pub const FIRST: StepId = StepId::Personal;
    pub const LAST: StepId = StepId::Review;

    pub fn all() -> [StepId; 4] {
        [
            StepId::Personal,
            StepId::Account,
            StepId::Profile,
            StepId::Review,
        ]
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Result<Self> {
        match number {
            1 => Ok(StepId::Personal),
            2 => Ok(StepId::Account),
            3 => Ok(StepId::Profile),
            4 => Ok(StepId::Review),
            other => Err(WizardError::InvalidStep(other)),
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1).ok()
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number().checked_sub(1)?).ok()
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    pub fn title(self) -> &'static str {
        match self {
            StepId::Personal => "Personal Information",
            StepId::Account => "Account Setup",
            StepId::Profile => "Profile Details",
            StepId::Review => "Review & Submit",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}: {}", self.number(), self.title())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountInfo {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileInfo {
    pub bio: String,
    pub skills: SkillSet,
    pub profile_picture: Option<ProfilePicture>,
}

impl ProfileInfo {
    /// Character counter shown under the bio field, e.g. `"12/250"`.
    pub fn bio_counter(&self) -> String {
        format!("{}/{}", self.bio.chars().count(), BIO_LIMIT)
    }
}

/// Image selected for the profile, held as an embeddable data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePicture {
    data_url: String,
    size_bytes: u64,
}

impl ProfilePicture {
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self {
            data_url: format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
            size_bytes: bytes.len() as u64,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|err| {
            WizardError::InvalidPicture(format!("`{}`: {}", path.display(), err))
        })?;
        Ok(Self::from_bytes(mime_for(path), &bytes))
    }

    /// Rebuilds a picture from a stored data URL. The size is recovered from
    /// the base64 payload; anything undecodable counts as zero bytes.
    pub fn from_data_url(data_url: impl Into<String>) -> Self {
        let data_url = data_url.into();
        let size_bytes = data_url
            .split_once(";base64,")
            .and_then(|(_, payload)| STANDARD.decode(payload).ok())
            .map(|raw| raw.len() as u64)
            .unwrap_or(0);
        Self {
            data_url,
            size_bytes,
        }
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn mime(&self) -> Option<&str> {
        self.data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(';'))
            .map(|(mime, _)| mime)
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// The single mutable aggregate for one in-progress submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardSession {
    pub personal: PersonalInfo,
    pub account: AccountInfo,
    pub profile: ProfileInfo,
    pub current_step: StepId,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same data, ignoring where the user currently is.
    pub fn same_data_as(&self, other: &WizardSession) -> bool {
        self.personal == other.personal
            && self.account == other.account
            && self.profile == other.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_numbers_round_trip_and_reject_out_of_range() {
        for step in StepId::all() {
            assert_eq!(StepId::from_number(step.number()).unwrap(), step);
        }
        assert!(matches!(
            StepId::from_number(0),
            Err(WizardError::InvalidStep(0))
        ));
        assert!(matches!(
            StepId::from_number(5),
            Err(WizardError::InvalidStep(5))
        ));
    }

    #[test]
    fn step_neighbours_stop_at_the_ends() {
        assert_eq!(StepId::Personal.previous(), None);
        assert_eq!(StepId::Personal.next(), Some(StepId::Account));
        assert_eq!(StepId::Review.next(), None);
        assert_eq!(StepId::Review.previous(), Some(StepId::Profile));
        assert_eq!(StepId::Account.to_string(), "Step 2: Account Setup");
    }

    #[test]
    fn picture_from_bytes_builds_data_url() {
        let picture = ProfilePicture::from_bytes("image/png", b"abc");
        assert_eq!(picture.data_url(), "data:image/png;base64,YWJj");
        assert_eq!(picture.size_bytes(), 3);
        assert_eq!(picture.mime(), Some("image/png"));
    }

    #[test]
    fn picture_from_data_url_recovers_size() {
        let original = ProfilePicture::from_bytes("image/jpeg", &[7u8; 1000]);
        let restored = ProfilePicture::from_data_url(original.data_url());
        assert_eq!(restored, original);

        let garbage = ProfilePicture::from_data_url("blob:not-an-image");
        assert_eq!(garbage.size_bytes(), 0);
        assert_eq!(garbage.mime(), None);
    }

    #[test]
    fn picture_from_file_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.JPG");
        fs::write(&path, [1u8, 2, 3, 4]).unwrap();

        let picture = ProfilePicture::from_file(&path).unwrap();
        assert_eq!(picture.mime(), Some("image/jpeg"));
        assert_eq!(picture.size_bytes(), 4);

        let missing = ProfilePicture::from_file(&dir.path().join("nope.png"));
        assert!(matches!(missing, Err(WizardError::InvalidPicture(_))));
    }

    #[test]
    fn bio_counter_counts_characters() {
        let profile = ProfileInfo {
            bio: "héllo".into(),
            ..ProfileInfo::default()
        };
        assert_eq!(profile.bio_counter(), "5/250");
    }
}
