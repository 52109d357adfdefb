pub mod checklist;
pub mod frequency;
pub mod operation;
pub mod preventive_task;
pub mod priority;
pub mod status;
pub mod work_order;

pub use checklist::ChecklistItem;
pub use frequency::Frequency;
pub use operation::OperationResult;
pub use preventive_task::{NewPreventiveTask, PreventiveTask, PreventiveTaskSchema};
pub use priority::Priority;
pub use status::Status;
pub use work_order::{NewWorkOrder, WorkOrder, WorkOrderChanges, WorkOrderSchema};
