//! Fixed-size worker pool over the 26 subfolder jobs.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{mpsc, Mutex, PoisonError};
use std::time::Instant;

use super::{Mirror, MirrorOutcome, MirrorReport};
use crate::config::JobCount;
use crate::url_model::{subfolder_letters, subfolder_url};

/// Mirrors `<base_url>/A/` … `<base_url>/Z/` into `local_root` using `jobs`
/// worker threads, and blocks until all 26 jobs have returned.
///
/// A failing subfolder never stops its siblings; every outcome ends up in the
/// returned report. Completion order across workers is unspecified.
pub fn mirror_all(
    base_url: &str,
    jobs: JobCount,
    local_root: &Path,
    mirror: &dyn Mirror,
) -> MirrorReport {
    let work: Mutex<VecDeque<char>> = Mutex::new(subfolder_letters().collect());
    let count = work.lock().unwrap_or_else(PoisonError::into_inner).len();
    let num_workers = jobs.get().min(count);
    let (tx, rx) = mpsc::channel::<(char, MirrorOutcome)>();

    tracing::debug!(jobs = count, workers = num_workers, "dispatching mirror jobs");

    std::thread::scope(|s| {
        for worker in 0..num_workers {
            let tx = tx.clone();
            let work = &work;
            s.spawn(move || loop {
                let letter = match work
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front()
                {
                    Some(l) => l,
                    None => break,
                };
                let url = subfolder_url(base_url, letter);
                tracing::debug!(worker, %letter, %url, "mirror job started");
                let started = Instant::now();
                let outcome = mirror.mirror(&url, local_root);
                tracing::debug!(
                    worker,
                    %letter,
                    ?outcome,
                    secs = started.elapsed().as_secs_f64(),
                    "mirror job finished"
                );
                let _ = tx.send((letter, outcome));
            });
        }
    });
    drop(tx);

    MirrorReport::from_outcomes(rx.into_iter().collect())
}
