pub mod announcement_service;
pub mod auth;
pub mod cep_service;
pub mod component_service;
pub mod customer_service;
pub mod dashboard_service;
pub mod order_service;
