/*
 * Responsibility
 * - Petitioner persistence behind the `UserStore` trait
 * - Postgres (sqlx) for deployments, in-memory for development/tests
 */
pub mod error;
pub mod memory;
pub mod user_repo;

pub use memory::InMemoryUserStore;
pub use user_repo::{PgUserStore, ProfileUpdate, UserRecord, UserStore};
