use std::io::{Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};
use log::warn;

use crate::input::KeySource;

/// One full screen: the board grid plus the status lines under it.
pub struct Frame {
    pub grid: Vec<Vec<char>>,
    pub score: u32,
    pub elapsed: String,
}

/// Where frames go. Each frame replaces the previous one in full.
pub trait FrameSink {
    fn setup(&mut self) -> crossterm::Result<()> {
        Ok(())
    }

    fn draw_frame(&mut self, frame: &Frame) -> crossterm::Result<()>;

    fn restore(&mut self) -> crossterm::Result<()> {
        Ok(())
    }
}

/// Terminal display sink: alternate screen, raw mode, hidden cursor.
pub struct TermManager {
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), active: false }
    }
}

impl FrameSink for TermManager {
    fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    fn restore(&mut self) -> crossterm::Result<()> {
        if !self.active {
            return Ok(());
        }

        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    fn draw_frame(&mut self, frame: &Frame) -> crossterm::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;

        // Raw mode does not translate '\n', so every line is positioned explicitly
        for (y, row) in frame.grid.iter().enumerate() {
            let line: String = row.iter().collect();
            queue!(self.stdout, cursor::MoveTo(0, y as u16), style::Print(line))?;
        }

        let status_y = frame.grid.len() as u16;
        queue!(
            self.stdout,
            cursor::MoveTo(0, status_y),
            style::Print(format!("Score: {}", frame.score)),
            cursor::MoveTo(0, status_y + 1),
            style::Print(format!("Time: {}", frame.elapsed)),
            cursor::MoveTo(0, status_y + 2),
            style::Print("WASD to move, Esc or CTRL+C to quit")
        )?;

        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Could not restore the terminal: {}", e);
        }
    }
}

/// Raw keyboard source backed by crossterm's event queue.
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self, timeout: Duration) -> crossterm::Result<Option<KeyEvent>> {
        if poll(timeout)? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }

        Ok(None)
    }
}
