pub mod application;
pub mod appointment;
pub mod form;
pub mod interviewer_list;
pub mod persistence;
pub mod view;
pub mod visual_mode;
