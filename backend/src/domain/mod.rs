//! Domain layer: models, errors, ports, and services for the
//! skill-exchange core.

mod connection;
mod connection_service;
mod error;
pub mod ports;
mod profile;
mod profile_service;
mod projection;
mod skill;
mod user;

pub use connection::{
    ConnectionRequest, ConnectionRequestId, MAX_REQUEST_MESSAGE_CHARS, RequestDecision,
    RequestStatus, RequestStatusParseError,
};
pub use connection_service::ConnectionService;
pub use error::{DomainError, ErrorCode};
pub use profile::{PlatformStats, ProfileChanges, ProfileSearchFilter, ProfileSummary};
pub use profile_service::ProfileService;
pub use skill::{
    DEFAULT_SKILL_CATEGORY, Skill, SkillDirection, SkillDirectionParseError, SkillId,
    skill_name_key,
};
pub use user::{Availability, AvailabilityParseError, User, UserId};
