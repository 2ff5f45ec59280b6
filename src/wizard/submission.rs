use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::session::{StepId, WizardSession};

/// Receipt handed back by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

impl Confirmation {
    fn issue() -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    Submitted(Confirmation),
    /// A submission already completed; nothing further happened.
    AlreadySubmitted(Confirmation),
    /// Submission is only reachable from the final step.
    NotOnFinalStep { current: StepId },
}

impl SubmitResult {
    pub fn confirmation(&self) -> Option<&Confirmation> {
        match self {
            SubmitResult::Submitted(confirmation)
            | SubmitResult::AlreadySubmitted(confirmation) => Some(confirmation),
            SubmitResult::NotOnFinalStep { .. } => None,
        }
    }
}

/// Decides the outcome of a submit request. Does not touch storage; the
/// caller clears the snapshot when this returns [`SubmitResult::Submitted`].
///
/// No field rules are re-run here: every step was gated on the way forward.
pub fn submit(session: &WizardSession, previous: Option<&Confirmation>) -> SubmitResult {
    if let Some(confirmation) = previous {
        return SubmitResult::AlreadySubmitted(confirmation.clone());
    }
    if !session.current_step.is_last() {
        return SubmitResult::NotOnFinalStep {
            current: session.current_step,
        };
    }
    SubmitResult::Submitted(Confirmation::issue())
}
