//! Kudos - peer recognition web application
//!
//! Layered hexagonal architecture:
//! - `domain` - entities, value objects, ports and core services
//! - `application` - use cases orchestrating the domain
//! - `infrastructure` - configuration, security primitives, persistence
//! - `adapters` - HTTP surface (handlers, middleware, templates)

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
