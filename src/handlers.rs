pub mod announcements;
pub mod auth;
pub mod cep;
pub mod components;
pub mod dashboard;
pub mod orders;
pub mod users;
