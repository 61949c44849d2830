//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod connection_repo;
pub mod message_repo;
pub mod notification_repo;
pub mod profile_repo;
pub mod session_repo;
pub mod user_repo;

pub use connection_repo::ConnectionRepo;
pub use message_repo::MessageRepo;
pub use notification_repo::NotificationRepo;
pub use profile_repo::ProfileRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
