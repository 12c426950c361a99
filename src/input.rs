use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, trace, warn};

use crate::config::INPUT_POLL_INTERVAL_MS;
use crate::error::{GameError, GameResult};
use crate::snake::Direction;

const EMPTY_SLOT: u8 = 0;
const UP_SLOT: u8 = 1;
const DOWN_SLOT: u8 = 2;
const LEFT_SLOT: u8 = 3;
const RIGHT_SLOT: u8 = 4;

/// Anything that can hand out key presses, typically the terminal.
pub trait KeySource: Send {
    /// Waits at most `timeout` for the next key press.
    fn next_key(&mut self, timeout: Duration) -> crossterm::Result<Option<KeyEvent>>;
}

/// Single-slot, latest-wins channel between the input task and the game loop.
///
/// A write replaces whatever the loop has not read yet. Reads never block.
pub struct InputChannel {
    key: AtomicU8,
    quit: AtomicBool,
}

impl InputChannel {
    pub fn new() -> Self {
        InputChannel { key: AtomicU8::new(EMPTY_SLOT), quit: AtomicBool::new(false) }
    }

    pub fn send(&self, direction: Direction) {
        let byte = match direction {
            Direction::Up => UP_SLOT,
            Direction::Down => DOWN_SLOT,
            Direction::Left => LEFT_SLOT,
            Direction::Right => RIGHT_SLOT,
        };
        self.key.store(byte, Ordering::Release);
    }

    /// Takes the latest direction, if one arrived since the last call.
    pub fn try_recv(&self) -> Option<Direction> {
        match self.key.swap(EMPTY_SLOT, Ordering::AcqRel) {
            EMPTY_SLOT => None,
            UP_SLOT => Some(Direction::Up),
            DOWN_SLOT => Some(Direction::Down),
            LEFT_SLOT => Some(Direction::Left),
            RIGHT_SLOT => Some(Direction::Right),
            other => unreachable!("input slot holds {}, only `send` writes it", other),
        }
    }

    pub fn request_quit(&self) {
        self.quit.store(true, Ordering::Release);
    }

    pub fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::Acquire)
    }
}

/// Owns the thread that reads the keyboard and feeds an `InputChannel`.
pub struct InputTask {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputTask {
    pub fn spawn<S: KeySource + 'static>(mut source: S, channel: Arc<InputChannel>) -> GameResult<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let poll_interval = Duration::from_millis(INPUT_POLL_INTERVAL_MS);

        let handle = thread::Builder::new()
            .name("input".into())
            .spawn(move || {
                while !stop_flag.load(Ordering::Acquire) {
                    match source.next_key(poll_interval) {
                        Ok(Some(ev)) => forward_key(&channel, &ev),
                        Ok(None) => {}
                        Err(e) => {
                            warn!("Keyboard read failed: {}", e);
                            thread::sleep(poll_interval);
                        }
                    }
                }
                debug!("Input task stopped");
            })
            .map_err(|source| GameError::TaskSpawn { task: "input", source })?;

        debug!("Input task started");
        Ok(InputTask { stop, handle: Some(handle) })
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Signals the input thread and waits for its current read to time out.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for InputTask {
    fn drop(&mut self) {
        self.stop();
    }
}

// The only place keys are filtered: non-direction keys never reach the slot.
fn forward_key(channel: &InputChannel, ev: &KeyEvent) {
    if is_ctrl_c(ev) || ev.code == KeyCode::Esc {
        debug!("Quit requested");
        channel.request_quit();
        return;
    }

    match ev.code {
        KeyCode::Char(ch) => match Direction::from_key(ch) {
            Some(direction) => channel.send(direction),
            None => trace!("Ignoring key {:?}", ch),
        },
        other => trace!("Ignoring key {:?}", other),
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

/// Key source that replays a fixed script, then stays idle.
#[cfg(test)]
pub struct ScriptedKeys {
    script: std::collections::VecDeque<crossterm::Result<Option<KeyEvent>>>,
}

#[cfg(test)]
impl ScriptedKeys {
    pub fn new(script: Vec<crossterm::Result<Option<KeyEvent>>>) -> Self {
        ScriptedKeys { script: script.into_iter().collect() }
    }
}

#[cfg(test)]
impl KeySource for ScriptedKeys {
    fn next_key(&mut self, timeout: Duration) -> crossterm::Result<Option<KeyEvent>> {
        match self.script.pop_front() {
            Some(step) => step,
            None => {
                thread::sleep(timeout);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use std::io;
    use std::time::Instant;

    fn key(ch: char) -> crossterm::Result<Option<KeyEvent>> {
        Ok(Some(KeyEvent { code: KeyCode::Char(ch), modifiers: KeyModifiers::NONE }))
    }

    #[test]
    fn empty_channel_reads_nothing() {
        let channel = InputChannel::new();

        assert_eq!(channel.try_recv(), None);
        assert!(!channel.quit_requested());
    }

    #[test]
    fn every_direction_survives_the_slot() {
        let channel = InputChannel::new();

        for direction in [Up, Down, Left, Right].iter() {
            channel.send(*direction);
            assert_eq!(channel.try_recv(), Some(*direction));
        }
    }

    #[test]
    fn latest_write_wins() {
        let channel = InputChannel::new();
        channel.send(Up);
        channel.send(Left);

        assert_eq!(channel.try_recv(), Some(Left));
        assert_eq!(channel.try_recv(), None);
    }

    #[test]
    fn task_forwards_only_direction_keys() {
        let channel = Arc::new(InputChannel::new());
        let source = ScriptedKeys::new(vec![key('w'), key('x'), key('s'), key('q'), key('1')]);
        let mut task = InputTask::spawn(source, Arc::clone(&channel)).unwrap();

        thread::sleep(Duration::from_millis(200));
        task.stop();

        assert_eq!(channel.try_recv(), Some(Down));
        assert!(!channel.quit_requested());
    }

    #[test]
    fn read_errors_are_absorbed() {
        let channel = Arc::new(InputChannel::new());
        let failure = Err(crossterm::ErrorKind::IoError(io::Error::new(io::ErrorKind::Other, "tty gone")));
        let source = ScriptedKeys::new(vec![failure, key('a')]);
        let mut task = InputTask::spawn(source, Arc::clone(&channel)).unwrap();

        thread::sleep(Duration::from_millis(300));
        task.stop();

        assert_eq!(channel.try_recv(), Some(Left));
    }

    #[test]
    fn ctrl_c_requests_quit() {
        let channel = Arc::new(InputChannel::new());
        let ctrl_c = Ok(Some(KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }));
        let source = ScriptedKeys::new(vec![ctrl_c]);
        let mut task = InputTask::spawn(source, Arc::clone(&channel)).unwrap();

        thread::sleep(Duration::from_millis(200));
        task.stop();

        assert!(channel.quit_requested());
        assert_eq!(channel.try_recv(), None);
    }

    #[test]
    fn stop_returns_while_the_keyboard_is_idle() {
        let channel = Arc::new(InputChannel::new());
        let mut task = InputTask::spawn(ScriptedKeys::new(vec![]), channel).unwrap();
        assert!(task.is_running());

        let started = Instant::now();
        task.stop();

        assert!(!task.is_running());
        assert!(started.elapsed() < Duration::from_millis(500));
    }
}
