use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};

/// A running interval task. Stopping (or dropping) the handle wakes the
/// worker right away and waits for it to finish its current run.
pub struct PollHandle {
    label: String,
    stop: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .map(|worker| !worker.is_finished())
            .unwrap_or(false)
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                eprintln!("Poll task {} panicked", self.label);
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Runs `task` now and then once per `interval` on a background thread until
/// the returned handle is stopped. A failing run is logged and the loop goes
/// on.
pub fn start_polling<F>(label: &str, interval: Duration, mut task: F) -> Result<PollHandle>
where
    F: FnMut() -> Result<()> + Send + 'static,
{
    let (stop, stopped) = mpsc::channel::<()>();
    let worker_label = label.to_string();
    let worker = thread::Builder::new()
        .name(format!("poll-{label}"))
        .spawn(move || loop {
            if let Err(error) = task() {
                eprintln!("Poll task {worker_label} failed: {error:?}");
            }
            match stopped.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        })
        .with_context(|| format!("failed to spawn poll worker for {label}"))?;

    Ok(PollHandle {
        label: label.to_string(),
        stop: Some(stop),
        worker: Some(worker),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn task_repeats_until_stopped() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let handle = start_polling("repeat", Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while runs.load(Ordering::SeqCst) < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(handle.is_running());
        handle.stop();

        let after_stop = runs.load(Ordering::SeqCst);
        assert!(after_stop >= 3);
        thread::sleep(Duration::from_millis(40));
        assert_eq!(runs.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn stop_does_not_wait_for_the_interval() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let handle = start_polling("slow", Duration::from_secs(3600), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();
        assert_eq!(handle.label(), "slow");

        let started = Instant::now();
        while runs.load(Ordering::SeqCst) == 0 && started.elapsed() < Duration::from_secs(5) {
            thread::sleep(Duration::from_millis(5));
        }
        handle.stop();
        assert!(started.elapsed() < Duration::from_secs(60));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failing_runs_keep_polling() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let handle = start_polling("failing", Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("fetch failed")
        })
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while runs.load(Ordering::SeqCst) < 2 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        drop(handle);
        assert!(runs.load(Ordering::SeqCst) >= 2);
    }
}
