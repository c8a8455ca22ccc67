// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline coordinator
//!
//! Dispatch model: a single coordinating task walks the planned waves in
//! declaration order. Singleton waves are awaited inline; parallel waves
//! spawn one task per member, bounded by a semaphore, and are joined
//! completely before the next wave. Results are buffered per wave and
//! appended by the coordinator's single appending path, so the log is
//! always in declaration order.

use crate::error::ValidationError;
use crate::plan::plan_waves;
use chrono::Utc;
use convoy_adapters::{
    InvokeError, InvokeRequest, Invoker, NotifyAdapter, PipelineNotice,
};
use convoy_core::{
    Artifact, BuildContext, CancelToken, CoordinatorConfig, OverallStatus, PipelineResult,
    StageResult,
};
use convoy_runbook::{interpolate, PipelineDef, RunDirective, StageDef};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::Instant;

/// Check a pipeline definition independent of any context
pub fn validate_definition(pipeline: &PipelineDef) -> Result<(), ValidationError> {
    if pipeline.stages.is_empty() {
        return Err(ValidationError::EmptyPipeline(pipeline.name.clone()));
    }
    let mut seen = HashSet::new();
    for stage in &pipeline.stages {
        if !seen.insert(stage.name.as_str()) {
            return Err(ValidationError::DuplicateStage(stage.name.clone()));
        }
    }
    Ok(())
}

/// A stage ready to dispatch: everything interpolated, nothing borrowed
struct PreparedStage {
    idx: usize,
    name: String,
    request: InvokeRequest,
    artifacts: Vec<Artifact>,
    deadline: Instant,
    cancel: CancelToken,
}

/// Runs pipeline definitions against a build context
pub struct Coordinator<I, N> {
    invoker: Arc<I>,
    notify: N,
    config: CoordinatorConfig,
}

impl<I, N> Coordinator<I, N>
where
    I: Invoker,
    N: NotifyAdapter,
{
    pub fn new(invoker: I, notify: N, config: CoordinatorConfig) -> Self {
        Self {
            invoker: Arc::new(invoker),
            notify,
            config,
        }
    }

    /// Execute the pipeline
    ///
    /// Returns `Err` only for validation problems detected before any
    /// stage runs; once execution starts, every failure is reported
    /// through the per-stage log of the returned [`PipelineResult`].
    pub async fn run(
        &self,
        ctx: &BuildContext,
        pipeline: &PipelineDef,
        cancel: CancelToken,
    ) -> Result<PipelineResult, ValidationError> {
        self.validate(ctx, pipeline)?;

        let started_at = Utc::now();
        let started = Instant::now();
        let overall_deadline = started + self.config.overall_timeout;

        tracing::info!(
            pipeline = %pipeline.name,
            stages = pipeline.stages.len(),
            "pipeline started"
        );

        let waves = plan_waves(&pipeline.stages);
        let semaphore = Arc::new(Semaphore::new(self.config.max_parallel_stages.max(1)));
        let mut slots: Vec<Option<StageResult>> = Vec::new();
        slots.resize_with(pipeline.stages.len(), || None);

        // Set once the main portion has ended by failure, deadline, or
        // cancellation; always-run stages dispatched after that point run
        // under the grace period instead of the overall deadline.
        let mut halted = false;
        let mut grace_deadline: Option<Instant> = None;

        for wave in &waves {
            let mut prepared: Vec<PreparedStage> = Vec::new();

            for &idx in &wave.members {
                let stage = &pipeline.stages[idx];

                let condition_met = match stage.condition.evaluate(ctx) {
                    Ok(met) => met,
                    Err(missing) => {
                        slots[idx] = Some(StageResult::failed(
                            &stage.name,
                            Vec::new(),
                            Duration::ZERO,
                            missing.to_string(),
                        ));
                        continue;
                    }
                };
                if !condition_met {
                    tracing::debug!(stage = %stage.name, "condition false, skipping");
                    slots[idx] = Some(StageResult::skipped(&stage.name));
                    continue;
                }

                if cancel.is_cancelled() || Instant::now() >= overall_deadline {
                    halted = true;
                }
                if halted && !stage.always_run {
                    slots[idx] = Some(StageResult::skipped(&stage.name));
                    continue;
                }

                let deadline = if stage.always_run && halted {
                    *grace_deadline.get_or_insert_with(|| {
                        Instant::now() + self.config.always_run_grace_period
                    })
                } else {
                    overall_deadline
                };
                // Always-run stages must finish their cleanup even after
                // the run itself was cancelled.
                let stage_cancel = if stage.always_run {
                    CancelToken::new()
                } else {
                    cancel.clone()
                };

                prepared.push(self.prepare(idx, stage, ctx, deadline, stage_cancel));
            }

            let completed = if wave.is_parallel() {
                self.run_parallel(prepared, Arc::clone(&semaphore)).await
            } else {
                let mut completed = Vec::new();
                for p in prepared {
                    let idx = p.idx;
                    let result =
                        execute_stage(Arc::clone(&self.invoker), p, Arc::clone(&semaphore)).await;
                    completed.push((idx, result));
                }
                completed
            };

            // Single appending path: buffered wave results land in
            // declaration order regardless of completion order.
            for (idx, result) in completed {
                let stage = &pipeline.stages[idx];
                if result.is_failed() && !stage.always_run && self.config.fail_fast {
                    halted = true;
                }
                slots[idx] = Some(result);
            }
        }

        let stages: Vec<StageResult> = slots.into_iter().flatten().collect();
        let overall_status = overall_status(&pipeline.stages, &stages);
        let result = PipelineResult {
            pipeline: pipeline.name.clone(),
            overall_status,
            stages,
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            pipeline = %pipeline.name,
            status = %result.overall_status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pipeline finished"
        );

        self.send_notice(&result).await;
        Ok(result)
    }

    fn validate(&self, ctx: &BuildContext, pipeline: &PipelineDef) -> Result<(), ValidationError> {
        validate_definition(pipeline)?;
        for input in &pipeline.inputs {
            if !ctx.contains(input) {
                return Err(ValidationError::MissingInput(input.clone()));
            }
        }
        for stage in &pipeline.stages {
            for var in stage.required_vars() {
                if !ctx.contains(&var) {
                    return Err(ValidationError::MissingVariable {
                        stage: stage.name.clone(),
                        var,
                    });
                }
            }
        }
        Ok(())
    }

    fn prepare(
        &self,
        idx: usize,
        stage: &StageDef,
        ctx: &BuildContext,
        deadline: Instant,
        cancel: CancelToken,
    ) -> PreparedStage {
        let vars = ctx.as_map();

        let mut request = match &stage.run {
            RunDirective::Shell(command) => InvokeRequest::shell(interpolate(command, vars)),
            RunDirective::Exec { program, args } => InvokeRequest::exec(
                interpolate(program, vars),
                args.iter().map(|a| interpolate(a, vars)).collect(),
            ),
        };
        if let Some(workdir) = &stage.workdir {
            request = request.with_cwd(interpolate(workdir, vars));
        }
        if !stage.env.is_empty() {
            request = request.with_env(
                stage
                    .env
                    .iter()
                    .map(|(k, v)| (k.clone(), interpolate(v, vars)))
                    .collect(),
            );
        }

        let artifacts = stage
            .artifacts
            .iter()
            .map(|a| Artifact {
                path: interpolate(&a.path, vars),
                retention: a.retention,
            })
            .collect();

        PreparedStage {
            idx,
            name: stage.name.clone(),
            request,
            artifacts,
            deadline,
            cancel,
        }
    }

    async fn run_parallel(
        &self,
        prepared: Vec<PreparedStage>,
        semaphore: Arc<Semaphore>,
    ) -> Vec<(usize, StageResult)> {
        let mut handles = Vec::new();
        for p in prepared {
            let invoker = Arc::clone(&self.invoker);
            let semaphore = Arc::clone(&semaphore);
            let idx = p.idx;
            let name = p.name.clone();
            handles.push((idx, name, tokio::spawn(execute_stage(invoker, p, semaphore))));
        }

        let mut completed = Vec::new();
        for (idx, name, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(stage = %name, error = %e, "stage task aborted");
                    StageResult::failed(name, Vec::new(), Duration::ZERO, "stage task aborted")
                }
            };
            completed.push((idx, result));
        }
        completed
    }

    async fn send_notice(&self, result: &PipelineResult) {
        let executed = result
            .stages
            .iter()
            .filter(|s| !s.is_skipped())
            .count();
        let message = match result.overall_status {
            OverallStatus::Success => format!(
                "pipeline {} succeeded ({} of {} stages executed)",
                result.pipeline,
                executed,
                result.stages.len()
            ),
            OverallStatus::Failed => {
                let failed: Vec<&str> = result
                    .stages
                    .iter()
                    .filter(|s| s.is_failed())
                    .map(|s| s.stage_name.as_str())
                    .collect();
                format!(
                    "pipeline {} failed (failed stages: {})",
                    result.pipeline,
                    failed.join(", ")
                )
            }
        };

        let notice = PipelineNotice::new(&result.pipeline, result.overall_status, message);
        if let Err(e) = self.notify.send(&notice).await {
            tracing::warn!(pipeline = %result.pipeline, error = %e, "notification failed");
        }
    }
}

/// Run one prepared stage to completion
async fn execute_stage<I: Invoker>(
    invoker: Arc<I>,
    prepared: PreparedStage,
    semaphore: Arc<Semaphore>,
) -> StageResult {
    let PreparedStage {
        name,
        request,
        artifacts,
        deadline,
        cancel,
        ..
    } = prepared;

    tracing::info!(stage = %name, command = %request.command_line(), "stage started");
    let started = std::time::Instant::now();

    // Permit acquisition counts against the deadline: a stage stuck in
    // the queue past the deadline is a timeout, not a free pass.
    let work = async {
        let _permit = semaphore.acquire_owned().await.ok();
        invoker.invoke(request, &cancel).await
    };

    let outcome = tokio::time::timeout_at(deadline, work).await;
    let duration = started.elapsed();
    let elapsed_ms = duration.as_millis() as u64;

    match outcome {
        Ok(Ok(out)) if out.success() => {
            tracing::info!(stage = %name, elapsed_ms, "stage succeeded");
            StageResult::success(name, artifacts, duration)
        }
        Ok(Ok(out)) => {
            tracing::warn!(
                stage = %name,
                exit_code = out.exit_code,
                stderr = %out.stderr,
                elapsed_ms,
                "stage failed"
            );
            StageResult::failed(
                name,
                artifacts,
                duration,
                format!("exit code {}", out.exit_code),
            )
        }
        Ok(Err(InvokeError::Cancelled)) => {
            tracing::warn!(stage = %name, elapsed_ms, "stage cancelled");
            StageResult::failed(name, Vec::new(), duration, "cancelled")
        }
        Ok(Err(e)) => {
            tracing::error!(stage = %name, error = %e, elapsed_ms, "stage could not run");
            StageResult::failed(name, Vec::new(), duration, e.to_string())
        }
        Err(_) => {
            tracing::warn!(stage = %name, elapsed_ms, "stage timed out");
            StageResult::failed(name, Vec::new(), duration, "timeout")
        }
    }
}

fn overall_status(defs: &[StageDef], results: &[StageResult]) -> OverallStatus {
    let failed = defs.iter().zip(results).any(|(def, result)| {
        result.is_failed() && (!def.always_run || def.required)
    });
    if failed {
        OverallStatus::Failed
    } else {
        OverallStatus::Success
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
