//! palantiri: fair bounded pool of exclusive-use resource handles.
//!
//! A `PalantiriPool` owns a fixed set of opaque handles ("palantiri") and
//! mediates concurrent access to them: `acquire` suspends until a handle is
//! free, `release` returns it. Admission is bounded by a fair semaphore and
//! each handle's availability flag is flipped with a per-entry
//! compare-and-set, so no lock ever spans an acquire or release.

mod error;
mod palantir;

pub mod gazing;
pub mod pool;

pub use error::PoolError;
pub use gazing::{GazingConfig, GazingReport, run_gazing};
pub use palantir::{Palantir, PalantirId};
pub use pool::{PalantiriPool, PoolSnapshot};
