//! OVM-specific collaborators: the well-known pseudo-contract registry
//! (spec.md §6) and the State-Manager bridge (spec.md §4.5).

pub mod bridge;
pub mod contracts;
