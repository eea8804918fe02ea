//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound persistence
//! adapters; driving ports (`*Command`/`*Query`) are implemented by domain
//! services and consumed by inbound adapters.

mod connection_repository;
mod connections_command;
mod connections_query;
mod profiles_command;
mod profiles_query;
mod skill_repository;
mod user_repository;
mod user_skill_repository;

#[cfg(test)]
pub use connection_repository::MockConnectionRequestRepository;
pub use connection_repository::{
    ConnectionRepositoryError, ConnectionRequestRepository, NewConnectionRequest,
};
#[cfg(test)]
pub use connections_command::MockConnectionsCommand;
pub use connections_command::{
    ConnectionResponseOutcome, ConnectionsCommand, SendConnectionRequest, SentConnectionRequest,
};
#[cfg(test)]
pub use connections_query::MockConnectionsQuery;
pub use connections_query::{ConnectionRequestView, ConnectionsQuery};
#[cfg(test)]
pub use profiles_command::MockProfilesCommand;
pub use profiles_command::{ProfileUpdateOutcome, ProfilesCommand, UpdateSkillsRequest};
#[cfg(test)]
pub use profiles_query::MockProfilesQuery;
pub use profiles_query::ProfilesQuery;
#[cfg(test)]
pub use skill_repository::MockSkillRepository;
pub use skill_repository::{SkillRepository, SkillRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use user_skill_repository::MockUserSkillRepository;
pub use user_skill_repository::{UserSkillRepository, UserSkillRepositoryError};
