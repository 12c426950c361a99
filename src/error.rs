use std::{error::Error, fmt, io};

/// Failures that stop the game before the first frame is drawn.
///
/// Anything that goes wrong once the loop is running (a failed render, a bad read from
/// the keyboard) is logged and absorbed instead of being turned into one of these.
#[derive(Debug)]
pub enum GameError {
    /// The input or clock thread could not be started.
    TaskSpawn { task: &'static str, source: io::Error },
    /// The terminal could not be put into (or queried for) game mode.
    Terminal(crossterm::ErrorKind),
}

pub type GameResult<T> = Result<T, GameError>;

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::TaskSpawn { task, source } => {
                write!(f, "could not start the {} task: {}", task, source)
            }
            GameError::Terminal(e) => write!(f, "terminal setup failed: {}", e),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GameError::TaskSpawn { source, .. } => Some(source),
            GameError::Terminal(e) => Some(e),
        }
    }
}

impl From<crossterm::ErrorKind> for GameError {
    fn from(e: crossterm::ErrorKind) -> Self {
        GameError::Terminal(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_spawn_names_the_task() {
        let err = GameError::TaskSpawn {
            task: "clock",
            source: io::Error::new(io::ErrorKind::Other, "no threads left"),
        };

        assert_eq!(err.to_string(), "could not start the clock task: no threads left");
        assert!(err.source().is_some());
    }
}
