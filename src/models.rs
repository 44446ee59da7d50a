pub mod announcement;
pub mod auth;
pub mod component;
pub mod dashboard;
pub mod order;
