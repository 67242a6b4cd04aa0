//! Repositories for database operations

pub mod order;
pub mod perfume;
pub mod user;

// Re-export for convenience
pub use order::OrderRepository;
pub use perfume::PerfumeRepository;
pub use user::UserRepository;
