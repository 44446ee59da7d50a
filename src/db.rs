pub mod user_repo;
pub use user_repo::UserRepository;
pub mod component_repo;
pub use component_repo::ComponentRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod announcement_repo;
pub use announcement_repo::AnnouncementRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
