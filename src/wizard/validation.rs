//! Per-step field rules.
//!
//! Every rule yields exactly one message for its field; passing fields carry
//! an empty string so the presentation layer can clear stale errors.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::session::{StepId, WizardSession, BIO_LIMIT, MAX_PICTURE_BYTES};

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z\s]{2,}$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static USERNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{4,}$").unwrap());
static PASSWORD_CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9!@#$%^&*]{8,}$").unwrap());

/// Specials that satisfy the "needs a special character" rule. `*` is allowed
/// in a password but does not count towards this requirement.
const REQUIRED_SPECIALS: &[char] = &['!', '@', '#', '$', '%', '^', '&'];
const STRENGTH_SPECIALS: &[char] = &['!', '@', '#', '$', '%', '^', '&', '*'];

pub const NAME_MESSAGE: &str = "Enter a valid name";
pub const EMAIL_MESSAGE: &str = "Enter a valid email";
pub const PHONE_MESSAGE: &str = "Enter a 10-digit phone number";
pub const USERNAME_MESSAGE: &str = "Username must be at least 4 characters";
pub const PASSWORD_MESSAGE: &str =
    "Password must be at least 8 characters and include letters, numbers, and special characters";
pub const CONFIRM_MESSAGE: &str = "Passwords do not match";
pub const PICTURE_MESSAGE: &str = "Image must be less than 2MB";
pub const BIO_MESSAGE: &str = "Bio must be 250 characters or less";
pub const SKILLS_MESSAGE: &str = "Select at least one skill";

/// Stable identifiers of the validated inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FullName,
    Email,
    Phone,
    Username,
    Password,
    ConfirmPassword,
    ProfilePicture,
    Bio,
    Skills,
}

impl Field {
    pub fn id(self) -> &'static str {
        match self {
            Field::FullName => "full-name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Username => "username",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm-password",
            Field::ProfilePicture => "profile-pic",
            Field::Bio => "bio",
            Field::Skills => "skills",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Full name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Username => "Username",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm password",
            Field::ProfilePicture => "Profile picture",
            Field::Bio => "Bio",
            Field::Skills => "Skills",
        }
    }

    /// Fields owned by `step`, in display order.
    pub fn for_step(step: StepId) -> &'static [Field] {
        match step {
            StepId::Personal => &[Field::FullName, Field::Email, Field::Phone],
            StepId::Account => &[Field::Username, Field::Password, Field::ConfirmPassword],
            StepId::Profile => &[Field::ProfilePicture, Field::Bio, Field::Skills],
            StepId::Review => &[],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Inputs a step is validated against.
///
/// The password confirmation is form input only; it never becomes part of
/// the session or its snapshot.
#[derive(Debug, Clone, Copy)]
pub struct StepData<'a> {
    pub session: &'a WizardSession,
    pub confirm_password: &'a str,
}

impl<'a> StepData<'a> {
    pub fn new(session: &'a WizardSession, confirm_password: &'a str) -> Self {
        Self {
            session,
            confirm_password,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub ok: bool,
    pub field_errors: BTreeMap<Field, String>,
}

impl ValidationResult {
    fn from_checks(checks: Vec<(Field, bool, &'static str)>) -> Self {
        let mut ok = true;
        let mut field_errors = BTreeMap::new();
        for (field, passed, message) in checks {
            ok &= passed;
            let text = if passed { String::new() } else { message.to_string() };
            field_errors.insert(field, text);
        }
        Self { ok, field_errors }
    }

    fn passing() -> Self {
        Self {
            ok: true,
            field_errors: BTreeMap::new(),
        }
    }

    /// Message for `field`, or `""` when it passed or was not checked.
    pub fn error(&self, field: Field) -> &str {
        self.field_errors
            .get(&field)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn failing_fields(&self) -> Vec<Field> {
        self.field_errors
            .iter()
            .filter(|(_, message)| !message.is_empty())
            .map(|(field, _)| *field)
            .collect()
    }
}

/// Checks the fields owned by `step`. Pure: no side effects, same input same
/// output. Steps without rules are trivially valid.
pub fn validate(step: StepId, data: StepData<'_>) -> ValidationResult {
    let session = data.session;
    match step {
        StepId::Personal => {
            let personal = &session.personal;
            ValidationResult::from_checks(vec![
                (Field::FullName, NAME_RE.is_match(&personal.full_name), NAME_MESSAGE),
                (Field::Email, EMAIL_RE.is_match(&personal.email), EMAIL_MESSAGE),
                (Field::Phone, PHONE_RE.is_match(&personal.phone), PHONE_MESSAGE),
            ])
        }
        StepId::Account => {
            let account = &session.account;
            ValidationResult::from_checks(vec![
                (
                    Field::Username,
                    USERNAME_RE.is_match(&account.username),
                    USERNAME_MESSAGE,
                ),
                (
                    Field::Password,
                    is_valid_password(&account.password),
                    PASSWORD_MESSAGE,
                ),
                (
                    Field::ConfirmPassword,
                    account.password == data.confirm_password,
                    CONFIRM_MESSAGE,
                ),
            ])
        }
        StepId::Profile => {
            let profile = &session.profile;
            let picture_ok = profile
                .profile_picture
                .as_ref()
                .map_or(true, |picture| picture.size_bytes() <= MAX_PICTURE_BYTES);
            ValidationResult::from_checks(vec![
                (Field::ProfilePicture, picture_ok, PICTURE_MESSAGE),
                (
                    Field::Bio,
                    profile.bio.chars().count() <= BIO_LIMIT,
                    BIO_MESSAGE,
                ),
                (Field::Skills, !profile.skills.is_empty(), SKILLS_MESSAGE),
            ])
        }
        StepId::Review => ValidationResult::passing(),
    }
}

fn is_valid_password(password: &str) -> bool {
    PASSWORD_CHARSET_RE.is_match(password)
        && password.chars().any(|ch| ch.is_ascii_alphabetic())
        && password.chars().any(|ch| ch.is_ascii_digit())
        && password.chars().any(|ch| REQUIRED_SPECIALS.contains(&ch))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn label(self) -> &'static str {
        match self {
            PasswordStrength::Weak => "Weak",
            PasswordStrength::Medium => "Medium",
            PasswordStrength::Strong => "Strong",
        }
    }
}

/// Display-only strength meter; never gates navigation.
pub fn password_strength(password: &str) -> PasswordStrength {
    let score = [
        password.chars().count() >= 8,
        password.chars().any(|ch| ch.is_ascii_uppercase()),
        password.chars().any(|ch| ch.is_ascii_digit()),
        password.chars().any(|ch| STRENGTH_SPECIALS.contains(&ch)),
    ]
    .iter()
    .filter(|passed| **passed)
    .count();

    match score {
        0 | 1 => PasswordStrength::Weak,
        2 | 3 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    }
}
