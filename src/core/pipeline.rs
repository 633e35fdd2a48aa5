//! Sequential step runner with per-step failure policy.
//!
//! Steps are declarative records consumed in order. A failing `Abort`
//! step stops the run and the remaining steps are reported as skipped.
//! A failing `Fallback` step prints its notice and runs the alternate
//! command exactly once; only if that also fails does the run fail.

use serde::Serialize;

use crate::executor::{CommandExecutor, CommandSpec};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnFailure {
    /// Failure is fatal; nothing after this step runs.
    Abort,
    /// Print `notice` to stdout, then run `command` once.
    Fallback {
        command: CommandSpec,
        notice: String,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub command: CommandSpec,
    pub on_failure: OnFailure,
}

impl Step {
    pub fn abort_on_failure(id: impl Into<String>, command: CommandSpec) -> Self {
        Self {
            id: id.into(),
            command,
            on_failure: OnFailure::Abort,
        }
    }

    pub fn with_fallback(
        id: impl Into<String>,
        command: CommandSpec,
        fallback: CommandSpec,
        notice: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            command,
            on_failure: OnFailure::Fallback {
                command: fallback,
                notice: notice.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Success,
    /// Primary command failed but the fallback succeeded.
    Recovered,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub id: String,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepReport {
    fn success(id: &str) -> Self {
        Self {
            id: id.to_string(),
            status: StepStatus::Success,
            exit_code: Some(0),
            fallback_exit_code: None,
            warnings: Vec::new(),
            error: None,
        }
    }

    fn skipped(id: &str, failed_step: &str) -> Self {
        Self {
            id: id.to_string(),
            status: StepStatus::Skipped,
            exit_code: None,
            fallback_exit_code: None,
            warnings: vec![format!("Skipped because '{}' did not succeed", failed_step)],
            error: None,
        }
    }

    /// Exit code that should surface to the caller for this step.
    /// For a failed fallback step that is the fallback's code.
    fn effective_exit_code(&self) -> Option<i32> {
        self.fallback_exit_code.or(self.exit_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total_steps: usize,
    pub succeeded: usize,
    pub recovered: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub steps: Vec<StepReport>,
    pub status: RunStatus,
    pub summary: RunSummary,
}

impl RunReport {
    /// 0 on success, otherwise the exit code of whichever command last
    /// failed (spawn failures surface as -1).
    pub fn exit_code(&self) -> i32 {
        if self.status == RunStatus::Success {
            return 0;
        }
        self.steps
            .iter()
            .rev()
            .find(|s| s.status == StepStatus::Failed)
            .and_then(|s| s.effective_exit_code())
            .unwrap_or(1)
    }
}

pub fn run(steps: &[Step], executor: &dyn CommandExecutor) -> RunReport {
    let mut reports: Vec<StepReport> = Vec::with_capacity(steps.len());
    let mut failed_step: Option<String> = None;

    for step in steps {
        if let Some(ref failed) = failed_step {
            reports.push(StepReport::skipped(&step.id, failed));
            continue;
        }

        let status = executor.run(&step.command);
        if status.success {
            reports.push(StepReport::success(&step.id));
            continue;
        }

        match &step.on_failure {
            OnFailure::Abort => {
                reports.push(StepReport {
                    id: step.id.clone(),
                    status: StepStatus::Failed,
                    exit_code: Some(status.exit_code),
                    fallback_exit_code: None,
                    warnings: Vec::new(),
                    error: status.error,
                });
                failed_step = Some(step.id.clone());
            }
            OnFailure::Fallback { command, notice } => {
                println!("{}", notice);
                log_status!("launch", "'{}' failed (exit {}), trying fallback", step.command, status.exit_code);

                let fallback = executor.run(command);
                if fallback.success {
                    reports.push(StepReport {
                        id: step.id.clone(),
                        status: StepStatus::Recovered,
                        exit_code: Some(status.exit_code),
                        fallback_exit_code: Some(0),
                        warnings: Vec::new(),
                        error: None,
                    });
                } else {
                    reports.push(StepReport {
                        id: step.id.clone(),
                        status: StepStatus::Failed,
                        exit_code: Some(status.exit_code),
                        fallback_exit_code: Some(fallback.exit_code),
                        warnings: Vec::new(),
                        error: fallback.error,
                    });
                    failed_step = Some(step.id.clone());
                }
            }
        }
    }

    let status = if reports.iter().any(|s| s.status == StepStatus::Failed) {
        RunStatus::Failed
    } else {
        RunStatus::Success
    };
    let summary = build_summary(&reports);

    RunReport {
        steps: reports,
        status,
        summary,
    }
}

fn build_summary(reports: &[StepReport]) -> RunSummary {
    let count = |wanted: StepStatus| reports.iter().filter(|r| r.status == wanted).count();

    RunSummary {
        total_steps: reports.len(),
        succeeded: count(StepStatus::Success),
        recovered: count(StepStatus::Recovered),
        failed: count(StepStatus::Failed),
        skipped: count(StepStatus::Skipped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ExecStatus;
    use std::cell::RefCell;

    /// Executor that fails the commands whose rendered argv is listed,
    /// recording every invocation in order.
    struct ScriptedExecutor {
        failures: Vec<String>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedExecutor {
        fn new(failures: &[&str]) -> Self {
            Self {
                failures: failures.iter().map(|s| s.to_string()).collect(),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl CommandExecutor for ScriptedExecutor {
        fn run(&self, spec: &CommandSpec) -> ExecStatus {
            let rendered = spec.to_string();
            self.calls.borrow_mut().push(rendered.clone());
            if self.failures.contains(&rendered) {
                ExecStatus::failed(1)
            } else {
                ExecStatus::ok()
            }
        }
    }

    fn sample_steps() -> Vec<Step> {
        vec![
            Step::abort_on_failure("first", CommandSpec::new("a", &[], ".")),
            Step::abort_on_failure("second", CommandSpec::new("b", &[], ".")),
            Step::with_fallback(
                "main",
                CommandSpec::new("c", &["primary"], "."),
                CommandSpec::new("c", &["alternate"], "."),
                "falling back",
            ),
        ]
    }

    #[test]
    fn all_steps_succeed() {
        let executor = ScriptedExecutor::new(&[]);
        let report = run(&sample_steps(), &executor);

        assert_eq!(report.status, RunStatus::Success);
        assert_eq!(report.exit_code(), 0);
        assert_eq!(executor.calls(), vec!["a", "b", "c primary"]);
        assert_eq!(report.summary.succeeded, 3);
    }

    #[test]
    fn abort_step_failure_skips_everything_after() {
        let executor = ScriptedExecutor::new(&["a"]);
        let report = run(&sample_steps(), &executor);

        assert_eq!(report.status, RunStatus::Failed);
        assert_eq!(executor.calls(), vec!["a"]);
        assert_eq!(report.steps[0].status, StepStatus::Failed);
        assert_eq!(report.steps[1].status, StepStatus::Skipped);
        assert_eq!(report.steps[2].status, StepStatus::Skipped);
        assert_eq!(
            report.steps[1].warnings,
            vec!["Skipped because 'first' did not succeed"]
        );
    }

    #[test]
    fn fallback_runs_exactly_once_on_primary_failure() {
        let executor = ScriptedExecutor::new(&["c primary"]);
        let report = run(&sample_steps(), &executor);

        assert_eq!(report.status, RunStatus::Success);
        assert_eq!(report.exit_code(), 0);
        assert_eq!(executor.calls(), vec!["a", "b", "c primary", "c alternate"]);
        assert_eq!(report.steps[2].status, StepStatus::Recovered);
        assert_eq!(report.summary.recovered, 1);
    }

    #[test]
    fn fallback_never_invoked_when_primary_succeeds() {
        let executor = ScriptedExecutor::new(&[]);
        run(&sample_steps(), &executor);
        assert!(!executor.calls().contains(&"c alternate".to_string()));
    }

    #[test]
    fn failing_fallback_fails_the_run_with_its_exit_code() {
        let executor = ScriptedExecutor::new(&["c primary", "c alternate"]);
        let report = run(&sample_steps(), &executor);

        assert_eq!(report.status, RunStatus::Failed);
        assert_eq!(report.steps[2].status, StepStatus::Failed);
        assert_eq!(report.steps[2].fallback_exit_code, Some(1));
        assert_eq!(report.exit_code(), 1);
        // nothing runs after the failed fallback
        assert_eq!(executor.calls().len(), 4);
    }
}
