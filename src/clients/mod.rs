pub mod scheduler_api;

pub use scheduler_api::{HttpSchedulerApi, SchedulerApi};
