pub mod plan;
pub mod result;

pub use plan::{ActionStep, PlanOutline, StepOutline, TaskPlan};
pub use result::{ChainResult, ExtractResult, TaskResult};
