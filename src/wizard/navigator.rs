//! Step state machine. Forward moves are gated by the validation of every
//! step they leave behind; backward moves are not.

use tracing::{debug, info};

use super::session::{StepId, WizardSession};
use super::validation::{validate, StepData, ValidationResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Advanced { from: StepId, to: StepId },
    Retreated { from: StepId, to: StepId },
    /// Validation of a step being left failed; the step did not change.
    Blocked(ValidationResult),
    /// The request did not come from the live current step, or a forward
    /// request did not point forward.
    Ignored,
}

impl Transition {
    pub fn moved(&self) -> bool {
        matches!(
            self,
            Transition::Advanced { .. } | Transition::Retreated { .. }
        )
    }
}

/// Attempts a forward move requested by the control on step `from`.
///
/// The target is supplied by the caller and may lie more than one step
/// ahead; every step in `from..to` must then pass, and the first failing
/// one blocks the move. Targets at or behind `from` are ignored.
pub fn go_next(
    session: &mut WizardSession,
    confirm_password: &str,
    from: StepId,
    to: StepId,
) -> (Transition, ValidationResult) {
    let current = session.current_step;
    if from != current {
        debug!(%from, %current, "ignoring next request from a stale step");
        return (Transition::Ignored, ValidationResult::default());
    }
    if to <= current {
        debug!(%from, %to, "ignoring next request that does not move forward");
        return (Transition::Ignored, ValidationResult::default());
    }

    let mut left = None;
    for step in StepId::all()
        .into_iter()
        .filter(|step| *step >= current && *step < to)
    {
        let result = validate(step, StepData::new(session, confirm_password));
        if !result.ok {
            debug!(%step, failing = ?result.failing_fields(), "next blocked by validation");
            return (Transition::Blocked(result.clone()), result);
        }
        left.get_or_insert(result);
    }

    session.current_step = to;
    info!(from = current.number(), to = to.number(), "advanced step");
    (
        Transition::Advanced { from: current, to },
        left.unwrap_or_default(),
    )
}

/// Moves backward (or anywhere) without validation.
pub fn go_prev(session: &mut WizardSession, from: StepId, to: StepId) -> Transition {
    let current = session.current_step;
    if from != current {
        debug!(%from, %current, "ignoring previous request from a stale step");
        return Transition::Ignored;
    }
    session.current_step = to;
    info!(from = current.number(), to = to.number(), "moved back");
    Transition::Retreated { from: current, to }
}

/// Display-only progress, from 0.0 on the first step to 1.0 on the last.
pub fn progress(step: StepId) -> f32 {
    f32::from(step.number() - 1) / f32::from(StepId::COUNT - 1)
}

/// Which step indicators are lit: every step up to and including `step`.
pub fn step_indicators(step: StepId) -> [bool; StepId::COUNT as usize] {
    let mut lit = [false; StepId::COUNT as usize];
    for (index, slot) in lit.iter_mut().enumerate() {
        *slot = index < usize::from(step.number());
    }
    lit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::validation::Field;

    fn valid_personal() -> WizardSession {
        let mut session = WizardSession::new();
        session.personal.full_name = "Ann Lee".into();
        session.personal.email = "a@b.com".into();
        session.personal.phone = "5551234567".into();
        session
    }

    #[test]
    fn next_advances_when_current_step_is_valid() {
        let mut session = valid_personal();
        let (transition, result) = go_next(&mut session, "", StepId::Personal, StepId::Account);
        assert_eq!(
            transition,
            Transition::Advanced {
                from: StepId::Personal,
                to: StepId::Account
            }
        );
        assert!(result.ok);
        assert_eq!(session.current_step, StepId::Account);
    }

    #[test]
    fn blocked_next_never_moves() {
        let mut session = WizardSession::new();
        for _ in 0..3 {
            let (transition, result) =
                go_next(&mut session, "", StepId::Personal, StepId::Account);
            assert!(matches!(transition, Transition::Blocked(_)));
            assert!(!transition.moved());
            assert_eq!(result.error(Field::Phone), crate::wizard::validation::PHONE_MESSAGE);
            assert_eq!(session.current_step, StepId::Personal);
        }
    }

    #[test]
    fn requests_from_other_steps_are_ignored() {
        let mut session = valid_personal();
        let (transition, _) = go_next(&mut session, "", StepId::Profile, StepId::Review);
        assert_eq!(transition, Transition::Ignored);
        assert_eq!(session.current_step, StepId::Personal);

        assert_eq!(
            go_prev(&mut session, StepId::Account, StepId::Personal),
            Transition::Ignored
        );
    }

    #[test]
    fn prev_is_unconditional() {
        let mut session = WizardSession::new();
        session.current_step = StepId::Profile;
        let transition = go_prev(&mut session, StepId::Profile, StepId::Account);
        assert!(transition.moved());
        assert_eq!(session.current_step, StepId::Account);
    }

    #[test]
    fn skipping_over_an_invalid_step_is_blocked() {
        let mut session = valid_personal();
        let (transition, result) = go_next(&mut session, "", StepId::Personal, StepId::Review);
        assert!(matches!(transition, Transition::Blocked(_)));
        assert_eq!(
            result.error(Field::Username),
            crate::wizard::validation::USERNAME_MESSAGE
        );
        assert_eq!(session.current_step, StepId::Personal);
    }

    #[test]
    fn skipping_over_valid_steps_reaches_the_target() {
        let mut session = valid_personal();
        session.account.username = "annlee".into();
        session.account.password = "abcd123!".into();
        let (transition, result) =
            go_next(&mut session, "abcd123!", StepId::Personal, StepId::Profile);
        assert_eq!(
            transition,
            Transition::Advanced {
                from: StepId::Personal,
                to: StepId::Profile
            }
        );
        assert_eq!(result.field_errors.len(), 3);
        assert!(result.error(Field::FullName).is_empty());
        assert_eq!(session.current_step, StepId::Profile);
    }

    #[test]
    fn next_towards_an_earlier_step_is_ignored() {
        let mut session = valid_personal();
        session.current_step = StepId::Account;
        for to in [StepId::Account, StepId::Personal] {
            let (transition, _) = go_next(&mut session, "", StepId::Account, to);
            assert_eq!(transition, Transition::Ignored);
            assert_eq!(session.current_step, StepId::Account);
        }
    }

    #[test]
    fn progress_and_indicators_follow_the_step() {
        assert_eq!(progress(StepId::Personal), 0.0);
        assert!((progress(StepId::Account) - 1.0 / 3.0).abs() < f32::EPSILON);
        assert_eq!(progress(StepId::Review), 1.0);
        assert_eq!(step_indicators(StepId::Personal), [true, false, false, false]);
        assert_eq!(step_indicators(StepId::Profile), [true, true, true, false]);
    }
}
