//! Diesel/PostgreSQL persistence adapters for the domain's driven ports.

mod diesel_connection_repository;
mod diesel_skill_repository;
mod diesel_user_repository;
mod diesel_user_skill_repository;
mod models;
mod pool;
mod schema;

pub use diesel_connection_repository::DieselConnectionRepository;
pub use diesel_skill_repository::DieselSkillRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_user_skill_repository::DieselUserSkillRepository;
pub use pool::{DbConnection, DbPool, PoolConfig, PoolError};
