//! Graph inspection core: domain model and pure services for dependency
//! graph traversal over one analysis snapshot.

pub mod domain;
pub mod services;
