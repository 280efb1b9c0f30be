//! Three-step registration wizard.
//!
//! The wizard is an explicit finite-state machine separate from any rendering
//! concern. Steps are gated on local validity: step 1 collects a contact
//! identifier (phone number or Ayushman Bharat card), step 2 personal details,
//! step 3 family members and terms consent. A successful final `advance()`
//! emits one "Registration Successful!" notification, clears the draft and
//! enters the terminal `Submitted` state; a new wizard instance is required to
//! register again.
//!
//! Field edits through [`RegistrationWizard::draft_mut`] never fail and never
//! change the current step. Validation happens only on `advance()`, at every
//! step, and a violated precondition leaves the wizard untouched.

use crate::error::{RegistrationError, RegistrationResult};
use crate::notify::NotificationSink;
use nabha_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Language a registered user wants the platform to speak to them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredLanguage {
    Punjabi,
    Hindi,
    English,
}

impl PreferredLanguage {
    /// Native-script label shown in the language picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Punjabi => "ਪੰਜਾਬੀ (Punjabi)",
            Self::Hindi => "हिंदी (Hindi)",
            Self::English => "English",
        }
    }
}

impl std::fmt::Display for PreferredLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            Self::Punjabi => "punjabi",
            Self::Hindi => "hindi",
            Self::English => "english",
        };
        write!(f, "{token}")
    }
}

impl std::str::FromStr for PreferredLanguage {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "punjabi" => Ok(Self::Punjabi),
            "hindi" => Ok(Self::Hindi),
            "english" => Ok(Self::English),
            other => Err(RegistrationError::UnknownLanguage(other.to_owned())),
        }
    }
}

/// A family member managed from the registering user's account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub name: NonEmptyText,
    pub relationship: NonEmptyText,
}

/// Step 1: how the user identifies themselves. At least one of the two fields
/// must be populated before the wizard advances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub phone_number: String,
    pub ayushman_card_id: String,
}

/// Step 2: personal details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub first_name: String,
    pub last_name: String,
    pub preferred_language: Option<PreferredLanguage>,
}

/// Step 3: family profile and terms consent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consent {
    pub family_members: Vec<FamilyMember>,
    pub agreed_to_terms: bool,
}

/// Everything the user has entered so far. Owned exclusively by the wizard;
/// cleared on submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub contact: ContactDetails,
    pub identity: Identity,
    pub consent: Consent,
}

/// Wizard position. Transitions move one step at a time, never skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Step 1: contact identity.
    Contact,
    /// Step 2: personal information.
    Personal,
    /// Step 3: family and consent.
    FamilyAndConsent,
    /// Terminal state. No further transitions are accepted.
    Submitted,
}

impl WizardStep {
    /// Form step number shown to the user. `Submitted` reports the final step.
    pub fn number(&self) -> u8 {
        match self {
            Self::Contact => 1,
            Self::Personal => 2,
            Self::FamilyAndConsent | Self::Submitted => 3,
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submitted => write!(f, "submitted"),
            step => write!(f, "step {}", step.number()),
        }
    }
}

/// Drives a [`RegistrationDraft`] through the three form steps to submission.
pub struct RegistrationWizard {
    step: WizardStep,
    draft: RegistrationDraft,
    sink: Arc<dyn NotificationSink>,
}

impl RegistrationWizard {
    /// Create a wizard at step 1 with an empty draft.
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            step: WizardStep::Contact,
            draft: RegistrationDraft::default(),
            sink,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    /// Mutable access to the draft. Edits always succeed and never change the
    /// current step.
    pub fn draft_mut(&mut self) -> &mut RegistrationDraft {
        &mut self.draft
    }

    /// Move forward one step, enforcing the current step's precondition.
    ///
    /// On the final step this submits the registration: one
    /// "Registration Successful!" notification is emitted, the draft is
    /// cleared and the wizard enters [`WizardStep::Submitted`].
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::MissingField` naming the step and field if
    /// a precondition is not met, or `RegistrationError::InvalidTransition`
    /// after submission. Either way the wizard is left unchanged.
    pub fn advance(&mut self) -> RegistrationResult<WizardStep> {
        match self.step {
            WizardStep::Contact => {
                self.require_contact()?;
                self.step = WizardStep::Personal;
            }
            WizardStep::Personal => {
                self.require_identity()?;
                self.step = WizardStep::FamilyAndConsent;
            }
            WizardStep::FamilyAndConsent => {
                if !self.draft.consent.agreed_to_terms {
                    return Err(RegistrationError::MissingField {
                        step: 3,
                        field: "agreed_to_terms",
                    });
                }
                self.submit();
            }
            WizardStep::Submitted => {
                return Err(RegistrationError::InvalidTransition(
                    "registration already submitted",
                ));
            }
        }

        Ok(self.step)
    }

    /// Move back one step.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::InvalidTransition` at step 1 and after
    /// submission.
    pub fn retreat(&mut self) -> RegistrationResult<WizardStep> {
        self.step = match self.step {
            WizardStep::Contact => {
                return Err(RegistrationError::InvalidTransition(
                    "already at the first step",
                ));
            }
            WizardStep::Personal => WizardStep::Contact,
            WizardStep::FamilyAndConsent => WizardStep::Personal,
            WizardStep::Submitted => {
                return Err(RegistrationError::InvalidTransition(
                    "registration already submitted",
                ));
            }
        };

        Ok(self.step)
    }

    fn require_contact(&self) -> RegistrationResult<()> {
        let contact = &self.draft.contact;
        if contact.phone_number.trim().is_empty() && contact.ayushman_card_id.trim().is_empty() {
            return Err(RegistrationError::MissingField {
                step: 1,
                field: "phone_number or ayushman_card_id",
            });
        }
        Ok(())
    }

    fn require_identity(&self) -> RegistrationResult<()> {
        let identity = &self.draft.identity;
        if identity.first_name.trim().is_empty() {
            return Err(RegistrationError::MissingField {
                step: 2,
                field: "first_name",
            });
        }
        if identity.last_name.trim().is_empty() {
            return Err(RegistrationError::MissingField {
                step: 2,
                field: "last_name",
            });
        }
        if identity.preferred_language.is_none() {
            return Err(RegistrationError::MissingField {
                step: 2,
                field: "preferred_language",
            });
        }
        Ok(())
    }

    fn submit(&mut self) {
        tracing::info!(
            first_name = %self.draft.identity.first_name,
            last_name = %self.draft.identity.last_name,
            family_members = self.draft.consent.family_members.len(),
            "registration submitted"
        );
        self.sink.notify(
            "Registration Successful!",
            "Welcome to Nabha Health. You can now access all our services.",
        );
        self.draft = RegistrationDraft::default();
        self.step = WizardStep::Submitted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingSink;

    fn wizard_with_sink() -> (RegistrationWizard, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        (RegistrationWizard::new(sink.clone()), sink)
    }

    fn fill_to_final_step(wizard: &mut RegistrationWizard) {
        wizard.draft_mut().contact.phone_number = "+911234567890".into();
        wizard.advance().expect("step 1 should pass");
        let identity = &mut wizard.draft_mut().identity;
        identity.first_name = "Ram".into();
        identity.last_name = "Singh".into();
        identity.preferred_language = Some(PreferredLanguage::Hindi);
        wizard.advance().expect("step 2 should pass");
    }

    #[test]
    fn advance_requires_phone_or_ayushman_card() {
        let (mut wizard, _) = wizard_with_sink();

        let err = wizard.advance().expect_err("empty contact should fail");
        assert_eq!(
            err,
            RegistrationError::MissingField {
                step: 1,
                field: "phone_number or ayushman_card_id",
            }
        );
        assert_eq!(wizard.step(), WizardStep::Contact);

        wizard.draft_mut().contact.ayushman_card_id = "PMJAY-1234-5678".into();
        assert_eq!(wizard.advance().unwrap(), WizardStep::Personal);
    }

    #[test]
    fn step_two_names_each_missing_field() {
        let (mut wizard, _) = wizard_with_sink();
        wizard.draft_mut().contact.phone_number = "+911234567890".into();
        wizard.advance().unwrap();

        let err = wizard.advance().expect_err("empty identity should fail");
        assert_eq!(
            err,
            RegistrationError::MissingField {
                step: 2,
                field: "first_name",
            }
        );

        wizard.draft_mut().identity.first_name = "Ram".into();
        let err = wizard.advance().expect_err("missing last name should fail");
        assert_eq!(
            err,
            RegistrationError::MissingField {
                step: 2,
                field: "last_name",
            }
        );

        wizard.draft_mut().identity.last_name = "Singh".into();
        let err = wizard.advance().expect_err("missing language should fail");
        assert_eq!(
            err,
            RegistrationError::MissingField {
                step: 2,
                field: "preferred_language",
            }
        );
        assert_eq!(wizard.step(), WizardStep::Personal);
    }

    #[test]
    fn final_step_requires_terms_consent() {
        let (mut wizard, sink) = wizard_with_sink();
        fill_to_final_step(&mut wizard);

        let err = wizard.advance().expect_err("unagreed terms should fail");
        assert_eq!(
            err,
            RegistrationError::MissingField {
                step: 3,
                field: "agreed_to_terms",
            }
        );
        assert_eq!(wizard.step(), WizardStep::FamilyAndConsent);
        assert!(sink.delivered().is_empty());
    }

    #[test]
    fn full_registration_notifies_exactly_once_and_clears_draft() {
        let (mut wizard, sink) = wizard_with_sink();
        fill_to_final_step(&mut wizard);
        wizard.draft_mut().consent.agreed_to_terms = true;

        assert_eq!(wizard.advance().unwrap(), WizardStep::Submitted);

        let delivered = sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].0, "Registration Successful!");
        assert_eq!(wizard.draft(), &RegistrationDraft::default());
    }

    #[test]
    fn no_transitions_after_submission() {
        let (mut wizard, sink) = wizard_with_sink();
        fill_to_final_step(&mut wizard);
        wizard.draft_mut().consent.agreed_to_terms = true;
        wizard.advance().unwrap();

        assert!(matches!(
            wizard.advance(),
            Err(RegistrationError::InvalidTransition(_))
        ));
        assert!(matches!(
            wizard.retreat(),
            Err(RegistrationError::InvalidTransition(_))
        ));
        assert_eq!(sink.delivered().len(), 1, "submit must notify only once");
    }

    #[test]
    fn retreat_at_first_step_fails_and_keeps_state() {
        let (mut wizard, _) = wizard_with_sink();
        wizard.draft_mut().contact.phone_number = "+911234567890".into();

        assert!(matches!(
            wizard.retreat(),
            Err(RegistrationError::InvalidTransition(_))
        ));
        assert_eq!(wizard.step(), WizardStep::Contact);
        assert_eq!(wizard.draft().contact.phone_number, "+911234567890");
    }

    #[test]
    fn retreat_steps_back_without_losing_edits() {
        let (mut wizard, _) = wizard_with_sink();
        fill_to_final_step(&mut wizard);

        assert_eq!(wizard.retreat().unwrap(), WizardStep::Personal);
        assert_eq!(wizard.retreat().unwrap(), WizardStep::Contact);
        assert_eq!(wizard.draft().identity.first_name, "Ram");
    }

    #[test]
    fn family_members_are_kept_in_insertion_order() {
        let (mut wizard, _) = wizard_with_sink();
        fill_to_final_step(&mut wizard);

        let members = &mut wizard.draft_mut().consent.family_members;
        members.push(FamilyMember {
            name: NonEmptyText::new("Gurpreet Kaur").unwrap(),
            relationship: NonEmptyText::new("Mother").unwrap(),
        });
        members.push(FamilyMember {
            name: NonEmptyText::new("Arjun Singh").unwrap(),
            relationship: NonEmptyText::new("Son").unwrap(),
        });

        let names: Vec<_> = wizard
            .draft()
            .consent
            .family_members
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, ["Gurpreet Kaur", "Arjun Singh"]);
    }

    #[test]
    fn language_parses_case_insensitively() {
        assert_eq!(
            "Hindi".parse::<PreferredLanguage>().unwrap(),
            PreferredLanguage::Hindi
        );
        assert!(matches!(
            "french".parse::<PreferredLanguage>(),
            Err(RegistrationError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn language_serialises_lowercase() {
        let s = serde_json::to_string(&PreferredLanguage::Punjabi).unwrap();
        assert_eq!(s, "\"punjabi\"");
    }
}
