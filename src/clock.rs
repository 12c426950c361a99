use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;

use crate::error::{GameError, GameResult};

/// Counts whole seconds on its own thread. The game loop only ever reads it.
pub struct Clock {
    seconds: Arc<AtomicU64>,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Clock {
    pub fn start() -> GameResult<Self> {
        let seconds = Arc::new(AtomicU64::new(0));
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let counter = Arc::clone(&seconds);

        let handle = thread::Builder::new()
            .name("clock".into())
            .spawn(move || {
                // Either a message or a dropped sender means stop.
                while let Err(RecvTimeoutError::Timeout) = stop_rx.recv_timeout(Duration::from_secs(1)) {
                    counter.fetch_add(1, Ordering::Relaxed);
                }
                debug!("Clock task stopped");
            })
            .map_err(|source| GameError::TaskSpawn { task: "clock", source })?;

        debug!("Clock task started");
        Ok(Clock { seconds, stop_tx: Some(stop_tx), handle: Some(handle) })
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.seconds.load(Ordering::Relaxed)
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Signals the clock thread and waits for it to finish.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Formats seconds as zero-padded `MM:SS`.
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(9), "00:09");
        assert_eq!(format_elapsed(61), "01:01");
        assert_eq!(format_elapsed(600), "10:00");
        assert_eq!(format_elapsed(3599), "59:59");
    }

    #[test]
    fn stopping_does_not_wait_for_the_next_tick() {
        let mut clock = Clock::start().unwrap();
        assert_eq!(clock.elapsed_secs(), 0);

        let started = Instant::now();
        clock.stop();

        assert!(!clock.is_running());
        assert!(started.elapsed() < Duration::from_millis(900));
    }

    #[test]
    fn ticks_once_per_second() {
        let clock = Clock::start().unwrap();
        thread::sleep(Duration::from_millis(1500));

        assert!(clock.elapsed_secs() >= 1);
    }
}
