// Running
mod runtime;
pub use runtime::{RunState, Snapshot};

// Backing store
mod memory;
pub use memory::MEMORY_MAX;

// I/O channels
mod channel;
pub use channel::{ByteQueue, ByteSource, Terminal};

mod error;
pub use error::RunError;
