//! Descriptor types owned by the client API.

pub mod types;
