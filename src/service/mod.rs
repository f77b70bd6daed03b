pub mod scheduler_service;
pub mod selectors;
pub mod store;
