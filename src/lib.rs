//! SWD write-path driver for ARM debug probes.
//!
//! This crate turns logical register writes (a Debug Port register, an
//! Access Port register, a 32-bit word in target memory) into correctly
//! sequenced, correctly acknowledged SWD wire transactions, retrying busy
//! acknowledges up to a fixed budget.
//!
//! **Note:**
//! The raw wire transaction (request byte, turnaround, acknowledge, data
//! phase) is not driven here. The probe hardware provides it by
//! implementing [`SwdTransfer`]; this crate owns everything above that
//! seam: request encoding, AP bank selection, posted-write flushing and the
//! retry policy.
//!
//! # Limitations
//!
//! * Write path only. Reads other than the RDBUFF acknowledge flush are not
//!   implemented.
//! * One target per wire: no SWD multi-drop support.
//! * No target reset or connect sequencing; the wire is assumed up.

#![forbid(unsafe_code)]

pub mod registers;
pub mod swd;
mod transfer;

pub use swd::{SwdHost, SwdWriteError};
pub use transfer::{Ack, SwdTransfer};
