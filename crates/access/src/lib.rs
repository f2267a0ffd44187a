//! # Praxis Access
//!
//! Role-based access control for the practice session.
//!
//! ## Components
//!
//! - `RoleMatrix` - builtin clinical role table and management hierarchy
//! - `AccessPolicy` - effective-permission evaluation and route gating

pub mod policy;
pub mod role_matrix;

pub use policy::{AccessDecision, AccessPolicy, AccessRequirements};
pub use role_matrix::{RoleMatrix, ROLE_HIERARCHY};
