//! Run Analysis use case
//!
//! Executes one task: fans the record out to the analysis branches its
//! kind requires, joins the results, and shapes them into the task
//! output. A failing or unreachable classifier never fails the task;
//! its branch degrades to the heuristic fallback scorer. Every other
//! branch failure fails the task.

use crate::config::OrchestratorParams;
use crate::ports::audit::{AuditAction, AuditEvent, AuditSink};
use crate::ports::compliance_checker::{ComplianceChecker, ComplianceError};
use crate::ports::insight_classifier::InsightClassifier;
use crate::ports::progress::{AnalysisBranch, AnalysisProgressNotifier, NoProgress};
use esg_domain::{
    AgentTask, AnalysisReport, CategoryInsight, ComplianceSummary, DomainError, EsgCategory,
    EsgRecord, FallbackScorer, TaskKind, TaskOutput, ValidationEngine, ValidationResult,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can occur while analyzing a task
#[derive(Error, Debug)]
pub enum RunAnalysisError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Compliance check failed: {0}")]
    Compliance(#[from] ComplianceError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RunAnalysisError {
    /// Check if this failure was caused by the submitted record rather
    /// than the pipeline
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RunAnalysisError::Domain(e) if e.is_invalid_input())
    }
}

/// What one branch of the analysis produced
enum BranchResult {
    Insight {
        category: EsgCategory,
        insight: CategoryInsight,
        used_fallback: bool,
    },
    Compliance(ComplianceSummary),
    Validation(ValidationResult),
}

/// Use case for analyzing a single task
pub struct RunAnalysisUseCase<C: InsightClassifier + 'static> {
    classifier: Arc<C>,
    checker: Arc<dyn ComplianceChecker>,
    engine: Arc<ValidationEngine>,
    fallback: FallbackScorer,
    audit: Arc<dyn AuditSink>,
    params: OrchestratorParams,
}

impl<C: InsightClassifier + 'static> RunAnalysisUseCase<C> {
    /// The fallback scorer is derived from the engine's schema so that
    /// heuristic coverage and completeness scoring agree on what a full
    /// disclosure looks like.
    pub fn new(
        classifier: Arc<C>,
        checker: Arc<dyn ComplianceChecker>,
        engine: Arc<ValidationEngine>,
        audit: Arc<dyn AuditSink>,
        params: OrchestratorParams,
    ) -> Self {
        let fallback = FallbackScorer::with_schema(engine.schema().clone());
        Self {
            classifier,
            checker,
            engine,
            fallback,
            audit,
            params,
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, task: &AgentTask) -> Result<TaskOutput, RunAnalysisError> {
        self.execute_with_progress(task, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        task: &AgentTask,
        progress: &dyn AnalysisProgressNotifier,
    ) -> Result<TaskOutput, RunAnalysisError> {
        if task.payload.is_empty() {
            return Err(DomainError::EmptyRecord.into());
        }
        if let Some(field) = task.payload.first_non_finite() {
            return Err(DomainError::NonFiniteValue(field).into());
        }

        match task.kind {
            TaskKind::DataAnalysis | TaskKind::ReportGeneration => {
                let report = self.full_analysis(task, progress).await?;
                Ok(TaskOutput::Analysis(report))
            }
            TaskKind::ComplianceCheck => {
                progress.on_task_start(&task.id, task.kind, 1);
                let summary =
                    match check_all_frameworks(self.checker.as_ref(), &task.payload).await {
                        Ok(summary) => {
                            progress.on_branch_complete(&task.id, AnalysisBranch::Compliance, true);
                            summary
                        }
                        Err(e) => {
                            progress.on_branch_complete(&task.id, AnalysisBranch::Compliance, false);
                            return Err(e.into());
                        }
                    };
                Ok(TaskOutput::Compliance(summary))
            }
            TaskKind::Validation => {
                progress.on_task_start(&task.id, task.kind, 1);
                let result = match self.engine.validate(&task.payload) {
                    Ok(result) => {
                        progress.on_branch_complete(&task.id, AnalysisBranch::Validation, true);
                        result
                    }
                    Err(e) => {
                        progress.on_branch_complete(&task.id, AnalysisBranch::Validation, false);
                        return Err(e.into());
                    }
                };
                Ok(TaskOutput::Validation(result))
            }
        }
    }

    /// Fan out to all five branches, join, aggregate
    async fn full_analysis(
        &self,
        task: &AgentTask,
        progress: &dyn AnalysisProgressNotifier,
    ) -> Result<AnalysisReport, RunAnalysisError> {
        info!("Starting full analysis for task {}", task.id);
        progress.on_task_start(&task.id, task.kind, 5);

        let mut join_set = JoinSet::new();

        for category in EsgCategory::all() {
            let classifier = Arc::clone(&self.classifier);
            let fallback = self.fallback.clone();
            let record = task.payload.clone();
            let patience = self.params.classifier_timeout;

            join_set.spawn(async move {
                let (insight, used_fallback) = classify_with_fallback(
                    classifier.as_ref(),
                    &fallback,
                    category,
                    &record,
                    patience,
                )
                .await;
                let result = Ok(BranchResult::Insight {
                    category,
                    insight,
                    used_fallback,
                });
                (AnalysisBranch::Insight(category), result)
            });
        }

        {
            let checker = Arc::clone(&self.checker);
            let record = task.payload.clone();
            join_set.spawn(async move {
                let result = check_all_frameworks(checker.as_ref(), &record)
                    .await
                    .map(BranchResult::Compliance)
                    .map_err(RunAnalysisError::from);
                (AnalysisBranch::Compliance, result)
            });
        }

        {
            let engine = Arc::clone(&self.engine);
            let record = task.payload.clone();
            join_set.spawn(async move {
                let result = engine
                    .validate(&record)
                    .map(BranchResult::Validation)
                    .map_err(RunAnalysisError::from);
                (AnalysisBranch::Validation, result)
            });
        }

        let mut environmental = None;
        let mut social = None;
        let mut governance = None;
        let mut compliance = None;
        let mut validation = None;

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((branch, Ok(result))) => {
                    debug!("Branch {} finished for task {}", branch, task.id);
                    progress.on_branch_complete(&task.id, branch, true);
                    match result {
                        BranchResult::Insight {
                            category,
                            insight,
                            used_fallback,
                        } => {
                            if used_fallback {
                                warn!(
                                    "Classifier unavailable for {} on task {}, using heuristic fallback",
                                    category, task.id
                                );
                                progress.on_fallback(&task.id, category);
                                self.audit.record(
                                    AuditEvent::for_task(
                                        AuditAction::FallbackUsed,
                                        &task.id,
                                        task.kind,
                                    )
                                    .with_detail(category.as_str()),
                                );
                            }
                            match category {
                                EsgCategory::Environmental => environmental = Some(insight),
                                EsgCategory::Social => social = Some(insight),
                                EsgCategory::Governance => governance = Some(insight),
                            }
                        }
                        BranchResult::Compliance(summary) => compliance = Some(summary),
                        BranchResult::Validation(result) => validation = Some(result),
                    }
                }
                Ok((branch, Err(e))) => {
                    warn!("Branch {} failed for task {}: {}", branch, task.id, e);
                    progress.on_branch_complete(&task.id, branch, false);
                    // Dropping the join set aborts the remaining branches
                    return Err(e);
                }
                Err(e) => {
                    warn!("Branch join error for task {}: {}", task.id, e);
                    return Err(RunAnalysisError::Internal(e.to_string()));
                }
            }
        }

        let (Some(environmental), Some(social), Some(governance), Some(compliance), Some(validation)) =
            (environmental, social, governance, compliance, validation)
        else {
            return Err(RunAnalysisError::Internal(
                "a branch finished without reporting a result".to_string(),
            ));
        };

        Ok(AnalysisReport::aggregate(
            &self.params.score_weights,
            environmental,
            social,
            governance,
            compliance,
            validation,
        ))
    }
}

/// Evaluate every configured framework against the record and fold the
/// results into one summary.
async fn check_all_frameworks(
    checker: &dyn ComplianceChecker,
    record: &EsgRecord,
) -> Result<ComplianceSummary, ComplianceError> {
    let frameworks = checker.frameworks();
    let mut results = Vec::with_capacity(frameworks.len());
    for framework in frameworks {
        results.push(checker.check(record, &framework).await?);
    }
    Ok(ComplianceSummary::from_results(results))
}

/// Call the classifier with a deadline. Any failure, including a
/// garbled response, means the backend is unavailable and the heuristic
/// scorer answers instead; the flag reports whether that happened.
async fn classify_with_fallback<C: InsightClassifier + ?Sized>(
    classifier: &C,
    fallback: &FallbackScorer,
    category: EsgCategory,
    record: &EsgRecord,
    patience: Duration,
) -> (CategoryInsight, bool) {
    match tokio::time::timeout(patience, classifier.classify(category, record)).await {
        Ok(Ok(insight)) => (insight, false),
        Ok(Err(e)) => {
            debug!("Classifier failed for {category}: {e}");
            (fallback.score(category, record), true)
        }
        Err(_) => {
            debug!("Classifier timed out for {category} after {patience:?}");
            (fallback.score(category, record), true)
        }
    }
}
