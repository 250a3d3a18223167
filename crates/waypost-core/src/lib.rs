//! Waypost Core Types and Definitions
//!
//! This crate provides the foundational types for the Waypost marker
//! machinery. It includes:
//!
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Positions**: Declarative anchor-position specs and the factor
//!   resolver ([`position`] module)
//! - **Dynamic coordinates**: Coordinate pairs computed on read rather than
//!   at construction time ([`dynamic`] module)

pub mod dynamic;
pub mod geometry;
pub mod position;
