//! # Nabha Health core
//!
//! Core domain logic for the Nabha Health rural healthcare platform:
//! - a three-step registration wizard with per-step validation
//! - a simulated report analysis pipeline with a cancellable fixed delay
//! - doctor directory search and consultation booking
//! - a community volunteer help desk and a health alert feed
//!
//! **No UI concerns**: rendering, routing and toast delivery belong to the
//! caller. Core components report user-facing events through the
//! [`NotificationSink`] seam, and all reference data (doctors, volunteers,
//! NGOs, alerts) is injected at construction.

pub mod alerts;
pub mod analysis;
pub mod config;
pub mod constants;
pub mod directory;
pub mod error;
pub mod notify;
pub mod registration;
pub mod rules;
pub mod sample;
pub mod volunteer;

pub use analysis::{
    AnalysisResult, FileRef, PipelineState, ReportAnalysisPipeline, RiskLevel, UploadedReport,
};
pub use config::CoreConfig;
pub use error::{
    AnalysisError, ConfigError, DirectoryError, HelpError, RegistrationError,
};
pub use notify::{NotificationSink, RecordingSink, TracingSink};
pub use registration::{
    PreferredLanguage, RegistrationDraft, RegistrationWizard, WizardStep,
};
pub use rules::{AnalysisRuleProvider, RuleVerdict, StaticRuleTable};
