//! CLI Commands

pub mod check;
pub mod manage;
pub mod roles;

pub use check::CheckCommand;
pub use manage::ManageCommand;
pub use roles::RolesCommand;
