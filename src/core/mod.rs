//! Domain logic: repositories, intake, scheduling and reports.

pub mod desk;
pub mod diagnostics;
pub mod ids;
pub mod preventive;
pub mod scheduler;
pub mod stats;
pub mod work_orders;

pub use desk::{NotificationSettings, OrderIntake, WorkOrderDesk};
pub use diagnostics::{Diagnostics, diagnose};
pub use preventive::{PreventiveTaskRepository, next_due_date};
pub use scheduler::{RecurrenceScheduler, SweepReport};
pub use stats::Statistics;
pub use work_orders::WorkOrderRepository;
