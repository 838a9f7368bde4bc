//! Inference gateway: routes a task identifier plus a numeric feature vector
//! to one of the pre-trained models loaded at startup and returns a
//! normalized prediction. Artifacts are produced out-of-band and read once;
//! the request path performs no I/O.

pub mod artifact;
pub mod config;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod registry;
pub mod routes;
pub mod task;
pub mod validate;
