use std::io::{BufRead, ErrorKind};

use tracing::warn;

use super::{command::Command, wire};

/// Anything that yields decoded commands: a serial link, stdin, a script.
pub trait CommandSource {
    /// Next command, or `None` once the source is exhausted.
    fn next_command(&mut self) -> Option<Command>;
}

/// Reads wire-format lines from any `BufRead`, skipping lines that fail to
/// decode.
pub struct LineCommandSource<R> {
    reader: R,
    line: Vec<u8>,
    rejected: u64,
}

impl<R: BufRead> LineCommandSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            rejected: 0,
        }
    }

    /// Number of lines dropped because they did not decode.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}

impl<R: BufRead> CommandSource for LineCommandSource<R> {
    fn next_command(&mut self) -> Option<Command> {
        loop {
            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => return None,
                Ok(_) => {
                    let Ok(text) = std::str::from_utf8(&self.line) else {
                        self.rejected += 1;
                        warn!("dropping controller line: not valid UTF-8");
                        continue;
                    };
                    match wire::parse_line(text) {
                        Ok(command) => return Some(command),
                        Err(wire::WireError::Empty) => continue,
                        Err(err) => {
                            self.rejected += 1;
                            warn!("dropping controller line: {}", err);
                        }
                    }
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    warn!("command source read failed: {}", err);
                    return None;
                }
            }
        }
    }
}
