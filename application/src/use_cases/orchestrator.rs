//! Analysis Orchestrator
//!
//! Long-lived front end for the Run Analysis use case. Submitted tasks
//! are registered, pushed onto a bounded intake queue, and dispatched to
//! a bounded pool of workers. The task registry is the single source of
//! truth for task state; the dispatcher and its workers only ever move
//! tasks forward through their lifecycle.

use crate::config::OrchestratorParams;
use crate::ports::audit::{AuditAction, AuditEvent, AuditSink};
use crate::ports::insight_classifier::InsightClassifier;
use crate::ports::progress::AnalysisProgressNotifier;
use crate::registry::{RegistryStats, TaskRegistry};
use crate::use_cases::run_analysis::RunAnalysisUseCase;
use esg_domain::{AgentTask, DomainError, EsgRecord, TaskId, TaskKind, TaskPriority, TaskStatus};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How often `wait_for` re-checks the registry
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Errors that can occur while submitting to or controlling the pipeline
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Invalid input: {0}")]
    InvalidInput(DomainError),

    #[error("Invalid orchestrator parameters: {0}")]
    InvalidParams(DomainError),

    #[error("Task queue is full, task {0} was rejected")]
    QueueFull(TaskId),

    #[error("A task with id {0} already exists")]
    DuplicateTask(TaskId),

    #[error("Orchestrator has shut down")]
    ShutDown,
}

/// Task pipeline: intake queue, worker pool, registry
///
/// Dropping the orchestrator cancels the dispatcher; call
/// [`AnalysisOrchestrator::shutdown`] instead to let in-flight analyses
/// finish and to fail whatever is still queued.
pub struct AnalysisOrchestrator {
    registry: Arc<TaskRegistry>,
    audit: Arc<dyn AuditSink>,
    queue: mpsc::Sender<TaskId>,
    cancellation_token: CancellationToken,
    dispatcher: Mutex<Option<JoinHandle<()>>>,
}

impl AnalysisOrchestrator {
    /// Validate the parameters and spawn the dispatcher.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start<C: InsightClassifier + 'static>(
        use_case: RunAnalysisUseCase<C>,
        progress: Arc<dyn AnalysisProgressNotifier>,
        audit: Arc<dyn AuditSink>,
        params: &OrchestratorParams,
    ) -> Result<Self, OrchestratorError> {
        params.validate().map_err(OrchestratorError::InvalidParams)?;

        let registry = Arc::new(TaskRegistry::new());
        let (queue, intake) = mpsc::channel(params.queue_capacity);
        let cancellation_token = CancellationToken::new();

        let dispatcher = tokio::spawn(dispatch_loop(
            Arc::new(use_case),
            Arc::clone(&registry),
            progress,
            Arc::clone(&audit),
            params.max_concurrent_tasks,
            cancellation_token.clone(),
            intake,
        ));
        info!(
            "Orchestrator started: {} worker slots, queue depth {}",
            params.max_concurrent_tasks, params.queue_capacity
        );

        Ok(Self {
            registry,
            audit,
            queue,
            cancellation_token,
            dispatcher: Mutex::new(Some(dispatcher)),
        })
    }

    /// Submit a record for the given kind of task, returning the new
    /// task's id
    pub fn submit(&self, payload: EsgRecord, kind: TaskKind) -> Result<TaskId, OrchestratorError> {
        self.submit_task(AgentTask::new(kind, payload))
    }

    /// Submit a record for a full analysis
    pub fn submit_analysis(&self, payload: EsgRecord) -> Result<TaskId, OrchestratorError> {
        self.submit(payload, TaskKind::DataAnalysis)
    }

    /// Submit a record with an explicit priority hint
    pub fn submit_with_priority(
        &self,
        payload: EsgRecord,
        kind: TaskKind,
        priority: TaskPriority,
    ) -> Result<TaskId, OrchestratorError> {
        self.submit_task(AgentTask::new(kind, payload).with_priority(priority))
    }

    /// Submit a pre-built task, e.g. one carrying an explicit id.
    ///
    /// Malformed records are rejected here, before any task is
    /// registered, so rejected submissions leave no trace in the
    /// registry.
    pub fn submit_task(&self, task: AgentTask) -> Result<TaskId, OrchestratorError> {
        if task.payload.is_empty() {
            return Err(OrchestratorError::InvalidInput(DomainError::EmptyRecord));
        }
        if let Some(field) = task.payload.first_non_finite() {
            return Err(OrchestratorError::InvalidInput(DomainError::NonFiniteValue(
                field,
            )));
        }

        let id = task.id.clone();
        let kind = task.kind;
        if !self.registry.register(task) {
            return Err(OrchestratorError::DuplicateTask(id));
        }
        self.audit
            .record(AuditEvent::for_task(AuditAction::TaskSubmitted, &id, kind));

        match self.queue.try_send(id.clone()) {
            Ok(()) => {
                debug!("Task {} queued ({})", id, kind);
                Ok(id)
            }
            Err(TrySendError::Full(_)) => {
                warn!("Task queue is full, rejecting task {}", id);
                self.registry.fail(&id, "Task queue is full");
                self.audit.record(
                    AuditEvent::for_task(AuditAction::TaskFailed, &id, kind)
                        .with_detail("queue full"),
                );
                Err(OrchestratorError::QueueFull(id))
            }
            Err(TrySendError::Closed(_)) => {
                self.registry.fail(&id, "Orchestrator has shut down");
                self.audit.record(
                    AuditEvent::for_task(AuditAction::TaskFailed, &id, kind)
                        .with_detail("submitted after shutdown"),
                );
                Err(OrchestratorError::ShutDown)
            }
        }
    }

    /// Current status of a task
    pub fn status(&self, id: &TaskId) -> Option<TaskStatus> {
        self.registry.status(id)
    }

    /// Snapshot of a task, including its result once completed
    pub fn get_task(&self, id: &TaskId) -> Option<AgentTask> {
        self.registry.get(id)
    }

    /// Snapshots of all known tasks, newest first
    pub fn list_tasks(&self) -> Vec<AgentTask> {
        self.registry.tasks()
    }

    /// Number of tasks the registry holds
    pub fn task_count(&self) -> usize {
        self.registry.task_count()
    }

    /// Counts of tasks by status
    pub fn stats(&self) -> RegistryStats {
        self.registry.stats()
    }

    /// Wait until a task reaches a terminal status and return it.
    ///
    /// Returns `None` for an id the registry has never seen.
    pub async fn wait_for(&self, id: &TaskId) -> Option<AgentTask> {
        loop {
            match self.registry.get(id) {
                None => return None,
                Some(task) if task.status.is_terminal() => return Some(task),
                Some(_) => tokio::time::sleep(WAIT_POLL_INTERVAL).await,
            }
        }
    }

    /// Stop accepting work and wait for the pipeline to wind down.
    ///
    /// In-flight analyses run to completion (bounded by the classifier
    /// timeout); tasks still waiting in the queue are failed.
    pub async fn shutdown(&self) {
        info!("Shutting down orchestrator");
        self.cancellation_token.cancel();
        let handle = {
            let mut dispatcher = self
                .dispatcher
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            dispatcher.take()
        };
        if let Some(handle) = handle {
            if handle.await.is_err() {
                warn!("Dispatcher ended with a join error");
            }
        }
    }
}

impl Drop for AnalysisOrchestrator {
    fn drop(&mut self) {
        self.cancellation_token.cancel();
    }
}

/// Pull task ids off the intake queue and hand each to a worker once a
/// slot is free. Runs until cancelled or until every sender is gone.
async fn dispatch_loop<C: InsightClassifier + 'static>(
    use_case: Arc<RunAnalysisUseCase<C>>,
    registry: Arc<TaskRegistry>,
    progress: Arc<dyn AnalysisProgressNotifier>,
    audit: Arc<dyn AuditSink>,
    max_concurrent: usize,
    cancellation_token: CancellationToken,
    mut intake: mpsc::Receiver<TaskId>,
) {
    let semaphore = Arc::new(Semaphore::new(max_concurrent));
    let mut workers: JoinSet<()> = JoinSet::new();

    loop {
        let task_id = tokio::select! {
            biased;
            _ = cancellation_token.cancelled() => break,
            next = intake.recv() => match next {
                Some(task_id) => task_id,
                None => break,
            },
        };

        let permit = tokio::select! {
            biased;
            _ = cancellation_token.cancelled() => {
                fail_undispatched(&registry, &audit, &progress, &task_id);
                break;
            }
            permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => break,
            },
        };

        // Reap workers that already finished
        while workers.try_join_next().is_some() {}

        let use_case = Arc::clone(&use_case);
        let registry = Arc::clone(&registry);
        let progress = Arc::clone(&progress);
        let audit = Arc::clone(&audit);
        workers.spawn(async move {
            run_one(use_case, registry, progress, audit, task_id).await;
            drop(permit);
        });
    }

    // Graceful wind-down: fail whatever never got dispatched, then let
    // the running workers finish.
    intake.close();
    while let Ok(task_id) = intake.try_recv() {
        fail_undispatched(&registry, &audit, &progress, &task_id);
    }
    while workers.join_next().await.is_some() {}
    info!("Orchestrator dispatcher stopped");
}

fn fail_undispatched(
    registry: &TaskRegistry,
    audit: &Arc<dyn AuditSink>,
    progress: &Arc<dyn AnalysisProgressNotifier>,
    task_id: &TaskId,
) {
    if registry.fail(task_id, "Orchestrator shut down before the task was dispatched") {
        if let Some(task) = registry.get(task_id) {
            audit.record(
                AuditEvent::for_task(AuditAction::TaskFailed, task_id, task.kind)
                    .with_detail("shutdown before dispatch"),
            );
        }
        progress.on_task_complete(task_id, TaskStatus::Failed);
    }
}

/// Run one task through the use case and record the outcome
async fn run_one<C: InsightClassifier + 'static>(
    use_case: Arc<RunAnalysisUseCase<C>>,
    registry: Arc<TaskRegistry>,
    progress: Arc<dyn AnalysisProgressNotifier>,
    audit: Arc<dyn AuditSink>,
    task_id: TaskId,
) {
    if !registry.begin(&task_id) {
        warn!("Task {} is not dispatchable, skipping", task_id);
        return;
    }
    let Some(task) = registry.get(&task_id) else {
        warn!("Task {} vanished from the registry", task_id);
        return;
    };
    audit.record(AuditEvent::for_task(
        AuditAction::TaskStarted,
        &task_id,
        task.kind,
    ));
    debug!("Dispatching task {} ({})", task_id, task.kind);

    match use_case.execute_with_progress(&task, progress.as_ref()).await {
        Ok(output) => {
            let event = AuditEvent::for_task(AuditAction::TaskCompleted, &task_id, task.kind)
                .with_detail(format!("score {:.1}", output.headline_score()));
            if !registry.complete(&task_id, output) {
                warn!("Task {} could not record its result", task_id);
            }
            audit.record(event);
            progress.on_task_complete(&task_id, TaskStatus::Completed);
        }
        Err(e) => {
            warn!("Task {} failed: {}", task_id, e);
            registry.fail(&task_id, e.to_string());
            audit.record(
                AuditEvent::for_task(AuditAction::TaskFailed, &task_id, task.kind)
                    .with_detail(e.to_string()),
            );
            progress.on_task_complete(&task_id, TaskStatus::Failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::compliance_checker::{ComplianceChecker, ComplianceError};
    use crate::ports::insight_classifier::ClassifierError;
    use crate::ports::progress::NoProgress;
    use async_trait::async_trait;
    use esg_domain::{
        CategoryInsight, ComplianceResult, EsgCategory, FrameworkRules, ValidationEngine,
    };

    struct StubClassifier {
        delay: Duration,
    }

    #[async_trait]
    impl InsightClassifier for StubClassifier {
        async fn classify(
            &self,
            _category: EsgCategory,
            _record: &EsgRecord,
        ) -> Result<CategoryInsight, ClassifierError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(CategoryInsight::new(75.0, 90.0))
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    struct StubChecker;

    #[async_trait]
    impl ComplianceChecker for StubChecker {
        async fn check(
            &self,
            record: &EsgRecord,
            framework: &str,
        ) -> Result<ComplianceResult, ComplianceError> {
            match framework {
                "GRI" => Ok(FrameworkRules::gri().evaluate(record)),
                other => Err(ComplianceError::UnknownFramework(other.to_string())),
            }
        }

        fn frameworks(&self) -> Vec<String> {
            vec!["GRI".to_string()]
        }
    }

    #[derive(Default)]
    struct RecordingAudit {
        events: Mutex<Vec<AuditAction>>,
    }

    impl AuditSink for RecordingAudit {
        fn record(&self, event: AuditEvent) {
            self.events.lock().unwrap().push(event.action);
        }
    }

    fn orchestrator(
        delay: Duration,
        params: OrchestratorParams,
        audit: Arc<dyn AuditSink>,
    ) -> AnalysisOrchestrator {
        let use_case = RunAnalysisUseCase::new(
            Arc::new(StubClassifier { delay }),
            Arc::new(StubChecker),
            Arc::new(ValidationEngine::default()),
            Arc::clone(&audit),
            params.clone(),
        );
        AnalysisOrchestrator::start(use_case, Arc::new(NoProgress), audit, &params).unwrap()
    }

    fn sample_record() -> EsgRecord {
        EsgRecord::new()
            .with_field(EsgCategory::Environmental, "emissions", 125_000.0)
            .with_field(EsgCategory::Social, "employee_count", 5_200.0)
            .with_field(EsgCategory::Governance, "board_size", 11.0)
            .with_period_end(chrono::Utc::now().date_naive())
    }

    #[tokio::test]
    async fn test_submit_and_complete() {
        let audit = Arc::new(RecordingAudit::default());
        let orch = orchestrator(
            Duration::ZERO,
            OrchestratorParams::default(),
            Arc::clone(&audit) as Arc<dyn AuditSink>,
        );

        let id = orch.submit_analysis(sample_record()).unwrap();
        let task = orch.wait_for(&id).await.unwrap();

        assert_eq!(task.status, TaskStatus::Completed);
        assert!(task.result.unwrap().as_analysis().is_some());

        let actions = audit.events.lock().unwrap().clone();
        assert_eq!(
            actions,
            vec![
                AuditAction::TaskSubmitted,
                AuditAction::TaskStarted,
                AuditAction::TaskCompleted,
            ]
        );
    }

    #[tokio::test]
    async fn test_many_tasks_all_complete() {
        let params = OrchestratorParams::default().with_max_concurrent_tasks(2);
        let orch = orchestrator(Duration::ZERO, params, Arc::new(crate::ports::audit::NoAudit));

        let ids: Vec<TaskId> = (0..10)
            .map(|_| orch.submit(sample_record(), TaskKind::Validation).unwrap())
            .collect();

        for id in &ids {
            let task = orch.wait_for(id).await.unwrap();
            assert_eq!(task.status, TaskStatus::Completed);
        }
        assert_eq!(orch.stats().completed, 10);
    }

    #[tokio::test]
    async fn test_queue_full_fails_the_rejected_task() {
        let params = OrchestratorParams::default()
            .with_queue_capacity(1)
            .with_max_concurrent_tasks(1);
        let orch = orchestrator(
            Duration::from_secs(5),
            params,
            Arc::new(crate::ports::audit::NoAudit),
        );

        // The single worker slot is busy for seconds, so the queue must
        // overflow within a handful of submissions.
        let mut rejected = None;
        for _ in 0..5 {
            match orch.submit(sample_record(), TaskKind::DataAnalysis) {
                Ok(_) => {}
                Err(OrchestratorError::QueueFull(id)) => {
                    rejected = Some(id);
                    break;
                }
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        let id = rejected.expect("queue should have filled");
        let task = orch.get_task(&id).unwrap();
        assert_eq!(task.status, TaskStatus::Failed);
        assert!(task.error.unwrap().contains("queue"));
    }

    #[tokio::test]
    async fn test_submit_after_shutdown_is_rejected() {
        let orch = orchestrator(
            Duration::ZERO,
            OrchestratorParams::default(),
            Arc::new(crate::ports::audit::NoAudit),
        );

        let id = orch.submit(sample_record(), TaskKind::ComplianceCheck).unwrap();
        orch.wait_for(&id).await.unwrap();
        orch.shutdown().await;

        let err = orch
            .submit(sample_record(), TaskKind::ComplianceCheck)
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::ShutDown));
        // The rejected task is still recorded, as failed
        assert_eq!(orch.stats().failed, 1);
        assert_eq!(orch.stats().completed, 1);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let orch = orchestrator(
            Duration::ZERO,
            OrchestratorParams::default(),
            Arc::new(crate::ports::audit::NoAudit),
        );

        let first = AgentTask::new(TaskKind::Validation, sample_record())
            .with_id("task-fixed");
        let second = AgentTask::new(TaskKind::Validation, sample_record())
            .with_id("task-fixed");

        orch.submit_task(first).unwrap();
        let err = orch.submit_task(second).unwrap_err();
        assert!(matches!(err, OrchestratorError::DuplicateTask(_)));
    }

    #[tokio::test]
    async fn test_wait_for_unknown_id() {
        let orch = orchestrator(
            Duration::ZERO,
            OrchestratorParams::default(),
            Arc::new(crate::ports::audit::NoAudit),
        );
        assert!(orch.wait_for(&TaskId::new("task-nope")).await.is_none());
    }

    #[tokio::test]
    async fn test_priority_hint_is_preserved() {
        let orch = orchestrator(
            Duration::ZERO,
            OrchestratorParams::default(),
            Arc::new(crate::ports::audit::NoAudit),
        );

        let id = orch
            .submit_with_priority(sample_record(), TaskKind::Validation, TaskPriority::Critical)
            .unwrap();

        let done = orch.wait_for(&id).await.unwrap();
        assert_eq!(done.priority, TaskPriority::Critical);
    }

    #[tokio::test]
    async fn test_invalid_params_refuse_to_start() {
        let params = OrchestratorParams::default().with_queue_capacity(0);
        let use_case = RunAnalysisUseCase::new(
            Arc::new(StubClassifier { delay: Duration::ZERO }),
            Arc::new(StubChecker),
            Arc::new(ValidationEngine::default()),
            Arc::new(crate::ports::audit::NoAudit),
            params.clone(),
        );
        let result = AnalysisOrchestrator::start(
            use_case,
            Arc::new(NoProgress),
            Arc::new(crate::ports::audit::NoAudit),
            &params,
        );
        assert!(matches!(result, Err(OrchestratorError::InvalidParams(_))));
    }

    #[tokio::test]
    async fn test_invalid_input_creates_no_task() {
        let orch = orchestrator(
            Duration::ZERO,
            OrchestratorParams::default(),
            Arc::new(crate::ports::audit::NoAudit),
        );

        let err = orch.submit_analysis(EsgRecord::new()).unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::InvalidInput(DomainError::EmptyRecord)
        ));

        let record =
            EsgRecord::new().with_field(EsgCategory::Environmental, "emissions", f64::NAN);
        let err = orch.submit(record, TaskKind::Validation).unwrap_err();
        assert!(matches!(err, OrchestratorError::InvalidInput(_)));

        assert_eq!(orch.task_count(), 0);
        assert!(orch.list_tasks().is_empty());
    }
}
