//! Simulated report analysis pipeline.
//!
//! The pipeline accepts one uploaded file reference at a time, validates its
//! format and size synchronously, then "analyses" it by waiting a fixed delay
//! before attaching a structured result from the injected rule provider. The
//! delay models a remote analysis call and is a cancellable tokio timer task:
//! a newer `submit` aborts any in-flight run, and a superseded run's result is
//! never applied (last-submit-wins).
//!
//! The pipeline never reads file bytes. The caller supplies a [`FileRef`] with
//! a name, byte size and extension.

use crate::error::{AnalysisError, PipelineResult};
use crate::notify::NotificationSink;
use crate::rules::AnalysisRuleProvider;
use crate::CoreConfig;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Reference to an uploaded file. The core does not read file bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub size_bytes: u64,
    pub extension: String,
}

impl FileRef {
    pub fn new(
        name: impl Into<String>,
        size_bytes: u64,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            extension: extension.into(),
        }
    }

    /// Build a reference from a file name, taking the extension from the text
    /// after the last `.`. A name with no dot yields an empty extension, which
    /// the pipeline rejects as unsupported.
    pub fn from_name(name: impl Into<String>, size_bytes: u64) -> Self {
        let name = name.into();
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_owned())
            .unwrap_or_default();
        Self {
            name,
            size_bytes,
            extension,
        }
    }
}

/// Overall risk classification of an analysed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Structured outcome of one analysis run.
///
/// `findings`, `recommendations` and `alerts` keep generation order, which is
/// also display order. Empty `alerts` means there is nothing to warn about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub risk_level: RiskLevel,
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub alerts: Vec<String>,
}

/// An accepted upload, with its analysis once the pipeline has completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedReport {
    pub file_name: String,
    pub declared_type: String,
    pub analysis: Option<AnalysisResult>,
}

/// Read-only snapshot of the pipeline for the caller to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Analyzing,
    Completed(UploadedReport),
    Failed(String),
}

struct PipelineInner {
    /// Bumped on every accepted submission. A completion only applies if its
    /// generation still matches, so an aborted run that slipped past its
    /// abort cannot overwrite a newer submission.
    generation: u64,
    state: PipelineState,
}

/// Drives one report at a time from acceptance to analysis.
///
/// `submit` must be called from within a tokio runtime; the completion timer
/// runs as a spawned task. One pipeline instance serves one user session, and
/// at most one completion is pending at any time.
pub struct ReportAnalysisPipeline {
    inner: Arc<Mutex<PipelineInner>>,
    rules: Arc<dyn AnalysisRuleProvider>,
    sink: Arc<dyn NotificationSink>,
    analysis_delay: Duration,
    max_report_bytes: u64,
    pending: Option<JoinHandle<()>>,
}

impl ReportAnalysisPipeline {
    pub fn new(
        config: &CoreConfig,
        rules: Arc<dyn AnalysisRuleProvider>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PipelineInner {
                generation: 0,
                state: PipelineState::Idle,
            })),
            rules,
            sink,
            analysis_delay: config.analysis_delay(),
            max_report_bytes: config.max_report_bytes(),
            pending: None,
        }
    }

    /// Accept a file reference for analysis.
    ///
    /// Validation is synchronous: an unsupported extension or an oversized
    /// file is rejected without touching pipeline state. On acceptance the
    /// pipeline enters `Analyzing`, any prior report is discarded, and any
    /// in-flight run is cancelled.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::UnsupportedFormat` or
    /// `AnalysisError::FileTooLarge`.
    pub fn submit(&mut self, file: FileRef) -> PipelineResult<()> {
        let extension = file.extension.to_ascii_lowercase();
        if !crate::constants::ALLOWED_REPORT_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AnalysisError::UnsupportedFormat {
                extension: file.extension.clone(),
            });
        }
        if file.size_bytes > self.max_report_bytes {
            return Err(AnalysisError::FileTooLarge {
                size_bytes: file.size_bytes,
                limit_bytes: self.max_report_bytes,
            });
        }

        if let Some(previous) = self.pending.take() {
            previous.abort();
        }

        let generation = {
            let mut inner = lock(&self.inner);
            inner.generation += 1;
            inner.state = PipelineState::Analyzing;
            inner.generation
        };

        tracing::info!(file = %file.name, size_bytes = file.size_bytes, "report accepted for analysis");

        let inner = Arc::clone(&self.inner);
        let rules = Arc::clone(&self.rules);
        let sink = Arc::clone(&self.sink);
        let delay = self.analysis_delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let verdict = rules.analyse(&file);

            let notify_completion = {
                let mut inner = lock(&inner);
                if inner.generation != generation {
                    // Superseded by a newer submission; discard silently.
                    return;
                }

                match verdict {
                    Ok(verdict) => {
                        inner.state = PipelineState::Completed(UploadedReport {
                            file_name: file.name,
                            declared_type: verdict.declared_type,
                            analysis: Some(verdict.analysis),
                        });
                        true
                    }
                    Err(err) => {
                        tracing::warn!(file = %file.name, error = %err, "report analysis failed");
                        inner.state = PipelineState::Failed(err.to_string());
                        false
                    }
                }
            };

            // A sink may re-enter the pipeline, so deliver outside the state lock.
            if notify_completion {
                sink.notify(
                    "Report Analysis Complete",
                    "Your health report has been analyzed. Check the results below.",
                );
            }
        }));

        Ok(())
    }

    /// Current pipeline snapshot.
    pub fn current_state(&self) -> PipelineState {
        lock(&self.inner).state.clone()
    }
}

impl Drop for ReportAnalysisPipeline {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

fn lock(inner: &Mutex<PipelineInner>) -> MutexGuard<'_, PipelineInner> {
    match inner.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingSink;
    use crate::rules::{RuleVerdict, StaticRuleTable};

    fn pipeline_with_sink() -> (ReportAnalysisPipeline, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let pipeline = ReportAnalysisPipeline::new(
            &CoreConfig::default(),
            Arc::new(StaticRuleTable::default()),
            sink.clone(),
        );
        (pipeline, sink)
    }

    async fn past_the_delay() {
        tokio::time::sleep(Duration::from_millis(3_001)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn accepted_report_completes_after_the_fixed_delay() {
        let (mut pipeline, sink) = pipeline_with_sink();

        pipeline
            .submit(FileRef::new("report.png", 500_000, "png"))
            .expect("png within limit should be accepted");
        assert_eq!(pipeline.current_state(), PipelineState::Analyzing);

        past_the_delay().await;

        match pipeline.current_state() {
            PipelineState::Completed(report) => {
                assert_eq!(report.file_name, "report.png");
                assert_eq!(report.declared_type, "Blood Test Report");
                let analysis = report.analysis.expect("analysis should be attached");
                assert_eq!(analysis.risk_level, RiskLevel::Medium);
                assert_eq!(analysis.alerts.len(), 2);
            }
            other => panic!("expected completed state, got {other:?}"),
        }

        let delivered = sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].0, "Report Analysis Complete");
    }

    #[tokio::test(start_paused = true)]
    async fn unsupported_extension_is_rejected_synchronously() {
        let (mut pipeline, sink) = pipeline_with_sink();

        let err = pipeline
            .submit(FileRef::new("malware.exe", 1_000, "exe"))
            .expect_err("exe should be rejected");
        assert_eq!(
            err,
            AnalysisError::UnsupportedFormat {
                extension: "exe".into(),
            }
        );
        assert_eq!(pipeline.current_state(), PipelineState::Idle);
        assert!(sink.delivered().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn oversized_report_is_rejected_synchronously() {
        let (mut pipeline, _) = pipeline_with_sink();

        let eleven_mib = 11 * 1024 * 1024;
        let err = pipeline
            .submit(FileRef::new("big.pdf", eleven_mib, "pdf"))
            .expect_err("11 MiB should be rejected");
        assert_eq!(
            err,
            AnalysisError::FileTooLarge {
                size_bytes: eleven_mib,
                limit_bytes: 10 * 1024 * 1024,
            }
        );
        assert_eq!(pipeline.current_state(), PipelineState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn extension_comparison_is_case_insensitive() {
        let (mut pipeline, _) = pipeline_with_sink();

        pipeline
            .submit(FileRef::new("scan.JPG", 2_048, "JPG"))
            .expect("uppercase extension should be accepted");
        assert_eq!(pipeline.current_state(), PipelineState::Analyzing);
    }

    #[tokio::test(start_paused = true)]
    async fn later_submission_supersedes_an_in_flight_run() {
        let (mut pipeline, sink) = pipeline_with_sink();

        pipeline
            .submit(FileRef::new("first.pdf", 1_000, "pdf"))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        pipeline
            .submit(FileRef::new("second.png", 1_000, "png"))
            .unwrap();

        // Long enough for both delays to have elapsed.
        tokio::time::sleep(Duration::from_millis(10_000)).await;

        match pipeline.current_state() {
            PipelineState::Completed(report) => {
                assert_eq!(report.file_name, "second.png", "first.pdf must never surface");
            }
            other => panic!("expected completed state, got {other:?}"),
        }
        assert_eq!(sink.delivered().len(), 1, "only the winning run may notify");
    }

    #[tokio::test(start_paused = true)]
    async fn resubmitting_while_idle_replaces_the_previous_report() {
        let (mut pipeline, _) = pipeline_with_sink();

        pipeline
            .submit(FileRef::new("old.pdf", 1_000, "pdf"))
            .unwrap();
        past_the_delay().await;
        pipeline
            .submit(FileRef::new("new.jpeg", 1_000, "jpeg"))
            .unwrap();
        assert_eq!(pipeline.current_state(), PipelineState::Analyzing);
        past_the_delay().await;

        match pipeline.current_state() {
            PipelineState::Completed(report) => assert_eq!(report.file_name, "new.jpeg"),
            other => panic!("expected completed state, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rule_provider_failure_surfaces_as_failed_state() {
        struct FailingRules;

        impl AnalysisRuleProvider for FailingRules {
            fn analyse(&self, _file: &FileRef) -> PipelineResult<RuleVerdict> {
                Err(AnalysisError::RuleEvaluation("model unavailable".into()))
            }
        }

        let sink = Arc::new(RecordingSink::new());
        let mut pipeline = ReportAnalysisPipeline::new(
            &CoreConfig::default(),
            Arc::new(FailingRules),
            sink.clone(),
        );

        pipeline
            .submit(FileRef::new("report.pdf", 1_000, "pdf"))
            .unwrap();
        past_the_delay().await;

        assert_eq!(
            pipeline.current_state(),
            PipelineState::Failed("analysis failed: model unavailable".into())
        );
        assert!(sink.delivered().is_empty(), "failed runs must not notify");
    }

    #[tokio::test(start_paused = true)]
    async fn sink_can_read_pipeline_state_during_notification() {
        type SharedPipeline = Arc<Mutex<Option<ReportAnalysisPipeline>>>;

        struct ReentrantSink {
            pipeline: SharedPipeline,
            seen: Mutex<Option<PipelineState>>,
        }

        impl NotificationSink for ReentrantSink {
            fn notify(&self, _title: &str, _body: &str) {
                let guard = self.pipeline.lock().unwrap();
                if let Some(pipeline) = guard.as_ref() {
                    *self.seen.lock().unwrap() = Some(pipeline.current_state());
                }
            }
        }

        let shared: SharedPipeline = Arc::new(Mutex::new(None));
        let sink = Arc::new(ReentrantSink {
            pipeline: Arc::clone(&shared),
            seen: Mutex::new(None),
        });

        let mut pipeline = ReportAnalysisPipeline::new(
            &CoreConfig::default(),
            Arc::new(StaticRuleTable::default()),
            sink.clone(),
        );
        pipeline
            .submit(FileRef::new("report.pdf", 1_000, "pdf"))
            .unwrap();
        *shared.lock().unwrap() = Some(pipeline);

        past_the_delay().await;

        let seen = sink.seen.lock().unwrap().clone();
        match seen {
            Some(PipelineState::Completed(report)) => {
                assert_eq!(report.file_name, "report.pdf");
            }
            other => panic!("sink should observe the completed state, got {other:?}"),
        }
    }

    #[test]
    fn file_ref_derives_extension_from_name() {
        let file = FileRef::from_name("results.final.PDF", 42);
        assert_eq!(file.extension, "PDF");

        let file = FileRef::from_name("no-extension", 42);
        assert_eq!(file.extension, "");
    }

    #[test]
    fn risk_level_serialises_lowercase() {
        let s = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(s, "\"medium\"");
    }
}
