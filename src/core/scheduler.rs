//! Turns due preventive tasks into work orders.

use crate::core::desk::OrderIntake;
use crate::core::preventive::{PreventiveTaskRepository, next_due_date};
use crate::errors::{AppError, AppResult};
use crate::models::checklist::from_template;
use crate::models::{NewWorkOrder, OperationResult, PreventiveTask};
use crate::utils::date::today;
use chrono::NaiveDate;
use serde::Serialize;

pub const PREVENTIVE_REQUESTER: &str = "Automatic System";
pub const PREVENTIVE_TAG: &str = "[PREVENTIVE]";

/// Outcome of one sweep.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepReport {
    /// Active tasks looked at.
    pub checked: usize,
    /// Ids of the work orders created.
    pub generated: Vec<String>,
    /// `(task id, reason)` for every task that could not be processed.
    pub failures: Vec<(String, String)>,
}

pub struct RecurrenceScheduler<'a, O: OrderIntake + ?Sized> {
    intake: &'a mut O,
    tasks: &'a mut PreventiveTaskRepository,
}

impl<'a, O: OrderIntake + ?Sized> RecurrenceScheduler<'a, O> {
    pub fn new(intake: &'a mut O, tasks: &'a mut PreventiveTaskRepository) -> Self {
        Self { intake, tasks }
    }

    pub fn sweep(&mut self) -> SweepReport {
        self.sweep_on(today())
    }

    /// Generate one work order for every active task due on or before
    /// `today`. A failing task is recorded and the sweep moves on.
    pub fn sweep_on(&mut self, today: NaiveDate) -> SweepReport {
        let mut report = SweepReport::default();
        let active = self.tasks.get_active();
        report.checked = active.len();

        for task in &active {
            if task.next_due_date.trim().is_empty() {
                continue;
            }
            let Some(due) = task.due_date() else {
                tracing::warn!(
                    task = %task.id,
                    value = %task.next_due_date,
                    "unreadable next due date, task skipped"
                );
                report
                    .failures
                    .push((task.id.clone(), format!("invalid due date '{}'", task.next_due_date)));
                continue;
            };
            if due > today {
                continue;
            }

            match self.generate(task, today, advance_schedule(task, due, today)) {
                Ok(order_id) => {
                    tracing::info!(task = %task.id, order = %order_id, "preventive work order generated");
                    report.generated.push(order_id);
                }
                Err(e) => {
                    tracing::error!(task = %task.id, error = %e, "preventive generation failed");
                    report.failures.push((task.id.clone(), e.to_string()));
                }
            }
        }

        tracing::info!(
            checked = report.checked,
            generated = report.generated.len(),
            failed = report.failures.len(),
            "sweep finished"
        );
        report
    }

    /// Generate a work order for `task_id` right away, whatever its due date.
    pub fn generate_for_task(&mut self, task_id: &str) -> OperationResult {
        let result = self
            .tasks
            .get_by_id(task_id)
            .ok_or_else(|| AppError::not_found("Preventive task", task_id))
            .and_then(|task| {
                let today = today();
                let next = next_due_date(task.frequency(), None, today);
                self.generate(&task, today, next)
            })
            .map(|order_id| {
                OperationResult::ok(
                    Some(order_id.clone()),
                    format!("Work order {order_id} generated from preventive task {task_id}"),
                )
            });
        OperationResult::from_result("generate preventive work order", result)
    }

    fn generate(
        &mut self,
        task: &PreventiveTask,
        today: NaiveDate,
        next_due: NaiveDate,
    ) -> AppResult<String> {
        let created = self.intake.open_order(work_order_for(task));
        if !created.success {
            return Err(AppError::Other(created.message));
        }
        let order_id = created
            .id
            .ok_or_else(|| AppError::Other("work order created without an id".into()))?;
        self.tasks.record_execution(&task.id, today, next_due)?;
        Ok(order_id)
    }
}

/// Next due date after an execution of `task` scheduled on `due`.
///
/// One period is added to the due date; when that still is not in the
/// future the schedule restarts from `today`, so missed periods are not
/// caught up.
pub fn advance_schedule(task: &PreventiveTask, due: NaiveDate, today: NaiveDate) -> NaiveDate {
    let frequency = task.frequency();
    let stepped = frequency.advance(due);
    if stepped > today {
        stepped
    } else {
        next_due_date(frequency, None, today)
    }
}

/// The work order synthesized from a preventive task.
pub fn work_order_for(task: &PreventiveTask) -> NewWorkOrder {
    NewWorkOrder {
        sector: task.sector.clone(),
        location: task.location.clone(),
        description: format!("{PREVENTIVE_TAG} {}", task.description),
        priority: Some(task.priority),
        requester: PREVENTIVE_REQUESTER.to_string(),
        photo_url: None,
        photo: None,
        checklist: from_template(&task.checklist_template),
        notes: format!(
            "Generated from preventive task {}. Frequency: {}",
            task.id,
            task.frequency().as_str()
        ),
    }
}
