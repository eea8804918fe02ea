//! SkillSwap backend library.
//!
//! A skill-exchange platform core: members hold public profiles listing
//! skills offered and wanted, discover each other through rating-ranked
//! search, and negotiate peer-to-peer connections through a bilateral
//! request ledger.
//!
//! The crate follows a hexagonal layout: [`domain`] holds models, ports,
//! and services; [`inbound`] adapts HTTP requests onto the driving ports;
//! [`outbound`] implements the driven ports against PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use doc::ApiDoc;
