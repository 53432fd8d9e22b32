//! Read-only access to the mission crew roster.

pub mod domain;
pub mod repository;

pub use domain::{CrewMember, MemberSelector};
pub use repository::{CrewError, CrewSource, JsonCrewFile};
