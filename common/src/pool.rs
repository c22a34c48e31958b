use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{anyhow, Result};
use crossbeam::channel;
use log::debug;

/// Runs `num_jobs` independent jobs on a bounded pool of scoped worker threads.
///
/// Job numbers are handed out through a bounded queue. `on_complete` is invoked on the calling
/// thread as each job finishes, in completion order. The call returns once every worker has
/// joined, with the results in job order. The first failing job stops any further jobs from
/// starting and its error is returned. Jobs that are already running are not interrupted.
pub fn run_scoped<T, F, C>(
    num_workers: usize,
    num_jobs: usize,
    job: F,
    mut on_complete: C,
) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync,
    C: FnMut(usize, &T),
{
    if num_jobs == 0 {
        return Ok(Vec::new());
    }

    let num_workers = num_workers.clamp(1, num_jobs);
    let cancelled = AtomicBool::new(false);
    let (job_tx, job_rx) = channel::bounded::<usize>(num_workers);
    let (result_tx, result_rx) = channel::unbounded::<(usize, Result<T>)>();

    let collected = crossbeam::scope(|s| {
        let cancelled = &cancelled;
        let job = &job;

        for worker_num in 0..num_workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();

            s.spawn(move |_| {
                debug!("Starting worker: {}", worker_num);

                while let Ok(job_num) = job_rx.recv() {
                    if cancelled.load(Ordering::SeqCst) {
                        continue;
                    }

                    let result = job(job_num);
                    if result.is_err() {
                        cancelled.store(true, Ordering::SeqCst);
                    }

                    if result_tx.send((job_num, result)).is_err() {
                        break;
                    }
                }
            });
        }

        drop(job_rx);
        drop(result_tx);

        s.spawn(move |_| {
            for job_num in 0..num_jobs {
                if cancelled.load(Ordering::SeqCst) || job_tx.send(job_num).is_err() {
                    break;
                }
            }
        });

        let mut results = Vec::with_capacity(num_jobs);
        let mut first_error = None;

        for (job_num, result) in result_rx.iter() {
            match result {
                Ok(value) if first_error.is_none() => {
                    on_complete(job_num, &value);
                    results.push((job_num, value));
                }
                Ok(_) => {}
                Err(err) => {
                    if first_error.is_none() {
                        first_error = Some(err.context(format!("Job {} failed", job_num)));
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(results),
        }
    })
    .map_err(|_| anyhow!("A worker thread panicked"))?;

    let mut results = collected?;

    if results.len() != num_jobs {
        return Err(anyhow!(
            "Expected {} job results but received {}",
            num_jobs,
            results.len()
        ));
    }

    results.sort_by_key(|(job_num, _)| *job_num);

    Ok(results.into_iter().map(|(_, value)| value).collect())
}
