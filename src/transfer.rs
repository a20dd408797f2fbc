//! Boundary to the raw SWD transfer primitive.
//!
//! The probe hardware (bit-banged GPIO, an FTDI engine, a PIO block, ...)
//! owns the physical SWCLK/SWDIO timing. This module only defines the seam
//! this crate drives it through and the acknowledge codes it hands back.

/// Acknowledge returned by a single SWD transaction.
///
/// The target answers every request with a 3-bit code on SWDIO. The raw
/// transfer primitive decodes that code into this enumeration exactly once;
/// the rest of the crate never sees the wire bits again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// Transaction accepted, data phase completed.
    Ok,
    /// Target busy, the identical transaction may be retried.
    Wait,
    /// Target reports a fault (sticky error flag, parity failure).
    Fault,
    /// Any other bit pattern. 0b111 usually means the target never drove
    /// the line at all.
    Protocol(u8),
}

impl Ack {
    // Ack bits, LSB first on the wire.
    const OK: u8 = 0b001;
    const WAIT: u8 = 0b010;
    const FAULT: u8 = 0b100;

    /// Decodes the raw 3-bit acknowledge field.
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            Self::OK => Ack::Ok,
            Self::WAIT => Ack::Wait,
            Self::FAULT => Ack::Fault,
            other => Ack::Protocol(other),
        }
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, Ack::Ok)
    }
}

/// One raw SWD transaction: request byte, turnaround, 3-bit acknowledge,
/// then 32 data bits plus parity when the acknowledge permits it.
///
/// `data` carries the little-endian word for write requests and is `None`
/// for read requests. Read-back data stays inside the implementation: the
/// write path only ever reads `RDBUFF` to collect a posted acknowledge, and
/// discards the word.
///
/// Implementations perform no retries of their own; [`SwdHost`] owns the
/// retry policy.
///
/// [`SwdHost`]: crate::SwdHost
pub trait SwdTransfer {
    fn transfer(&mut self, request: u8, data: Option<[u8; 4]>) -> Ack;
}
