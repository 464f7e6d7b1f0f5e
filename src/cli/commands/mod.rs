//! CLI command implementations.

pub mod boot;
pub mod link;
pub mod login;
pub mod logout;
pub mod profile;
pub mod register;
pub mod share;
