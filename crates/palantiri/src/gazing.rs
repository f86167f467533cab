//! Gazing simulation: a population of concurrent gazers driving one pool.
//!
//! Each gazer loops acquire / gaze / release against a shared
//! [`PalantiriPool`], touching nothing but the pool's public surface. The
//! report says how much gazing happened and whether exclusivity ever
//! broke; a correct pool always reports zero violations.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::palantir::PalantirId;
use crate::pool::PalantiriPool;

/// Configuration for one simulation run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GazingConfig {
    /// Number of concurrent gazer tasks.
    pub gazers: usize,
    /// Acquire/release iterations per gazer.
    pub iterations: usize,
    /// How long a gazer holds a palantir per iteration.
    pub gaze_millis: u64,
}

impl Default for GazingConfig {
    fn default() -> Self {
        Self {
            gazers: 4,
            iterations: 10,
            gaze_millis: 1,
        }
    }
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct GazingReport {
    /// Gazes completed across all gazers.
    pub total_gazes: usize,
    /// Gazes completed by each gazer, indexed by gazer number.
    pub gazes_per_gazer: Vec<usize>,
    /// Times a palantir was observed held by two gazers at once.
    pub exclusivity_violations: usize,
}

/// Run the simulation to completion and report.
///
/// Spawns one task per gazer; every task runs its full iteration count, so
/// under the pool's fair gate no gazer starves even when gazers outnumber
/// palantiri.
pub async fn run_gazing(pool: Arc<PalantiriPool>, config: GazingConfig) -> GazingReport {
    tracing::debug!(
        gazers = config.gazers,
        iterations = config.iterations,
        capacity = pool.capacity(),
        "Starting gazing simulation"
    );

    let holders: Arc<DashMap<PalantirId, usize>> = Arc::new(DashMap::new());
    let violations = Arc::new(AtomicUsize::new(0));

    let mut gazer_tasks = Vec::with_capacity(config.gazers);
    for gazer in 0..config.gazers {
        let pool = Arc::clone(&pool);
        let holders = Arc::clone(&holders);
        let violations = Arc::clone(&violations);

        gazer_tasks.push(tokio::spawn(async move {
            let mut gazes = 0usize;
            for _ in 0..config.iterations {
                let palantir = pool.acquire().await;
                if holders.insert(palantir.id(), gazer).is_some() {
                    violations.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(palantir = %palantir.id(), gazer, "Palantir already held");
                }

                tokio::time::sleep(Duration::from_millis(config.gaze_millis)).await;

                holders.remove(&palantir.id());
                pool.release(&palantir);
                gazes += 1;
            }
            gazes
        }));
    }

    let mut gazes_per_gazer = Vec::with_capacity(config.gazers);
    for (gazer, result) in futures::future::join_all(gazer_tasks)
        .await
        .into_iter()
        .enumerate()
    {
        match result {
            Ok(gazes) => gazes_per_gazer.push(gazes),
            Err(error) => {
                tracing::error!(gazer, error = %error, "Gazer task failed");
                gazes_per_gazer.push(0);
            }
        }
    }

    let report = GazingReport {
        total_gazes: gazes_per_gazer.iter().sum(),
        gazes_per_gazer,
        exclusivity_violations: violations.load(Ordering::Relaxed),
    };
    tracing::debug!(
        total_gazes = report.total_gazes,
        violations = report.exclusivity_violations,
        "Gazing simulation finished"
    );
    report
}
