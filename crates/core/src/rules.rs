//! Report analysis rules.
//!
//! The pipeline does not know how results are produced; it asks an injected
//! [`AnalysisRuleProvider`]. The prototype ships a static table that ignores
//! the file entirely and always returns the same blood-test verdict, so a real
//! analyser can later replace it without touching pipeline control flow.

use crate::analysis::{AnalysisResult, FileRef, RiskLevel};
use crate::error::PipelineResult;

/// What a rule provider concluded about one accepted report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleVerdict {
    /// Human-readable report classification, e.g. "Blood Test Report".
    pub declared_type: String,
    pub analysis: AnalysisResult,
}

/// Produces an analysis verdict for an accepted report.
///
/// Implementations may inspect the file reference but never its bytes.
pub trait AnalysisRuleProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns `AnalysisError::RuleEvaluation` when no verdict can be
    /// produced; the pipeline surfaces this as a failed run.
    fn analyse(&self, file: &FileRef) -> PipelineResult<RuleVerdict>;
}

/// Fixed rule table with the prototype's canned blood-test verdict.
#[derive(Debug, Clone)]
pub struct StaticRuleTable {
    verdict: RuleVerdict,
}

impl StaticRuleTable {
    /// A table that answers every report with the given verdict.
    pub fn new(verdict: RuleVerdict) -> Self {
        Self { verdict }
    }
}

impl Default for StaticRuleTable {
    fn default() -> Self {
        Self::new(RuleVerdict {
            declared_type: "Blood Test Report".to_string(),
            analysis: AnalysisResult {
                risk_level: RiskLevel::Medium,
                findings: vec![
                    "Blood sugar slightly elevated (125 mg/dL)".to_string(),
                    "Cholesterol within normal range".to_string(),
                    "Hemoglobin levels good".to_string(),
                ],
                recommendations: vec![
                    "Reduce sugar intake in diet".to_string(),
                    "Take 30-minute walks daily".to_string(),
                    "Follow up in 2 weeks".to_string(),
                ],
                alerts: vec![
                    "Pre-diabetic condition detected".to_string(),
                    "Monitor blood sugar regularly".to_string(),
                ],
            },
        })
    }
}

impl AnalysisRuleProvider for StaticRuleTable {
    fn analyse(&self, _file: &FileRef) -> PipelineResult<RuleVerdict> {
        Ok(self.verdict.clone())
    }
}
