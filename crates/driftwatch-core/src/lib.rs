//! driftwatch-core
//!
//! Pure domain types and the side-effect-free pieces of the drift pipeline:
//! stack filtering, batching, and resource identifier normalisation.
//! No AWS SDK dependency — this is the shared vocabulary of the driftwatch system.

pub mod arn;
pub mod batch;
pub mod error;
pub mod filter;
pub mod models;

pub use crate::arn::{normalize, Arn};
pub use crate::batch::batch;
pub use crate::error::{ArnError, CoreError};
pub use crate::filter::StackFilter;
