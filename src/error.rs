use std::error::Error;
use std::fmt;

use crate::runtime::Snapshot;

/// Terminal error raised out of the execution loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The program counter was incremented past the top of addressable
    /// memory. Carries the processor state at the moment of the fault.
    Fault { state: Snapshot },
    /// The byte fetched at `pc` has no entry in the opcode table.
    UnknownOpcode { opcode: u8, pc: u16 },
}

impl Error for RunError {}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fault { state } => {
                write!(f, "Program counter overran addressable memory.")?;
                write!(f, "\n    {}", state)?;
            }
            Self::UnknownOpcode { opcode, pc } => {
                write!(
                    f,
                    "Unknown opcode 0x{:02x} at address 0x{:04x}.",
                    opcode, pc
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_opcode_display() {
        let error = RunError::UnknownOpcode {
            opcode: 0xfd,
            pc: 0x0102,
        };
        assert_eq!(
            error.to_string(),
            "Unknown opcode 0xfd at address 0x0102."
        );
    }
}
