//! Input/output helpers.
//!
//! - sample file ingest (`ingest`)
//! - CSV exports of results and generated samples (`export`)
//! - JSON fit summary read/write (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
