use std::collections::VecDeque;
use std::io::{stdin, IsTerminal, Read};

use console::Term;

/// Blocking single-byte input channel consumed by the `IN` instruction.
pub trait ByteSource {
    /// Block until one byte is available and return it.
    fn read_byte(&mut self) -> u8;
}

/// Default input channel: one byte from stdin, or an unbuffered terminal
/// character when stdin is interactive.
pub struct Terminal;

impl ByteSource for Terminal {
    fn read_byte(&mut self) -> u8 {
        if stdin().is_terminal() {
            let cons = Term::stdout();
            let ch = cons.read_char().expect("failed to read terminal input");
            ch as u8
        } else {
            let mut buf = [0; 1];
            stdin()
                .read_exact(&mut buf)
                .expect("input channel closed before `IN` was satisfied");
            buf[0]
        }
    }
}

/// Scripted input channel fed from a fixed queue of bytes.
///
/// Useful for tests and non-interactive harnesses. Draining the queue and
/// reading again is a usage error, as the channel can no longer block.
pub struct ByteQueue {
    bytes: VecDeque<u8>,
}

impl ByteQueue {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().collect(),
        }
    }
}

impl ByteSource for ByteQueue {
    fn read_byte(&mut self) -> u8 {
        self.bytes
            .pop_front()
            .expect("byte queue exhausted before `IN` was satisfied")
    }
}
