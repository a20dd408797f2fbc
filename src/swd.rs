use std::sync::{Arc, Mutex};

use crate::registers::{
    AP_CSW, AP_DRW, AP_TAR, APBANKSEL, CSW_SIZE32, CSW_VALUE, DP_RDBUFF, DP_SELECT,
};
use crate::transfer::{Ack, SwdTransfer};

/// Wait-acknowledge retry budget for a single transaction.
const MAX_SWD_RETRY: usize = 10;

/// Error returned by the write operations.
///
/// Wait exhaustion, a fault acknowledge and a malformed acknowledge all
/// collapse into this single error. The caller's only recourse is to
/// re-issue the whole logical write (or reset the target), so no
/// distinction is surfaced.
#[derive(Debug, thiserror::Error)]
#[error("Swd write not acknowledged.")]
pub struct SwdWriteError;

/// Register reference for the request phase: debug port or access port,
/// with the register's A[3:2] select in address bits 3:2.
#[derive(Debug, Clone, Copy)]
enum SwdAddr {
    Dp(u8),
    Ap(u8),
}

/// SWD request byte.
/// Timing Sequence: [Start(1), APnDP, RnW, A[2:3], Parity, Stop(0), Park(1)]
/// LSB Format: [Park(1), Stop(0), Parity, A[3:2], RnW, APnDP, Start(1)]
#[bitfield_struct::bitfield(u8, order = Lsb)]
struct SwdRequest {
    #[bits(default = true)]
    start: bool,
    is_ap: bool,
    is_read: bool,
    #[bits(2)]
    addr: u8,
    parity: bool,
    #[bits(default = false)]
    _stop: bool,
    #[bits(default = true)]
    park: bool,
}

/// Build SWD request packet (lsb 8 bits)
fn build_request(is_read: bool, addr: SwdAddr) -> u8 {
    let (is_ap, adr) = match addr {
        SwdAddr::Dp(adr) => (false, adr),
        SwdAddr::Ap(adr) => (true, adr),
    };
    let request = SwdRequest::new()
        .with_is_ap(is_ap)
        .with_is_read(is_read)
        .with_addr(adr >> 2 & 0b11);

    // The parity check is made over the APnDP, RnW and A[2:3] bits. If, of these four bits:
    // • the number of bits set to 1 is odd, then the parity bit is set to 1
    // • the number of bits set to 1 is even, then the parity bit is set to 0.
    let parity = (u8::from(request) >> 1 & 0x0F).count_ones() & 1 != 0;
    request.with_parity(parity).into()
}

fn check_ok(ack: Ack) -> Result<(), SwdWriteError> {
    if ack.is_ok() { Ok(()) } else { Err(SwdWriteError) }
}

/// Serial Wire Debug (SWD) write-path driver
/// Implements the ARM Debug Interface v5 write sequencing on top of a raw
/// transfer primitive
pub struct SwdHost<T> {
    /// Thread-safe handle to the raw transfer primitive driving the wire
    mtx: Arc<Mutex<T>>,
}

impl<T: SwdTransfer> SwdHost<T> {
    pub fn new(mtx: Arc<Mutex<T>>) -> Self {
        Self { mtx }
    }

    /// Re-issues one transaction while the target answers WAIT, up to
    /// [`MAX_SWD_RETRY`] attempts with no delay in between. Returns the
    /// first other acknowledge, or the last WAIT once the budget is spent.
    fn transfer_retry(port: &mut T, request: u8, data: Option<[u8; 4]>) -> Ack {
        let mut ack = Ack::Wait;
        for _ in 0..MAX_SWD_RETRY {
            ack = port.transfer(request, data);
            if ack != Ack::Wait {
                return ack;
            }
        }
        log::trace!("Swd transfer {request:#04x} still waiting after {MAX_SWD_RETRY} attempts");
        ack
    }

    /// Performs SWD write operation to the specified debug port register
    pub fn write_dp(&self, adr: u8, value: u32) -> Result<(), SwdWriteError> {
        let mut port = self.mtx.lock().unwrap();
        Self::write_dp_inner(&mut port, adr, value)
    }

    fn write_dp_inner(port: &mut T, adr: u8, value: u32) -> Result<(), SwdWriteError> {
        let request = build_request(false, SwdAddr::Dp(adr));
        check_ok(Self::transfer_retry(port, request, Some(value.to_le_bytes())))
    }

    /// Performs SWD write operation to the specified access port register
    ///
    /// # Arguments
    /// * `adr` - packs the AP instance in bits 31:24, the register bank in
    ///   bits 7:4 and the register select in bits 3:2
    /// * `value` - 32-bit value to write
    ///
    /// # Protocol Details
    /// The bank is selected through DP SELECT on every call; nothing is
    /// assumed about a previous selection. AP writes are posted, so the
    /// write is followed by a DP RDBUFF read that collects the pending
    /// acknowledge. A successful call is exactly 3 wire transactions.
    pub fn write_ap(&self, adr: u32, value: u32) -> Result<(), SwdWriteError> {
        let mut port = self.mtx.lock().unwrap();
        Self::write_ap_inner(&mut port, adr, value)
    }

    fn write_ap_inner(port: &mut T, adr: u32, value: u32) -> Result<(), SwdWriteError> {
        let apsel = adr & 0xff00_0000;
        let bank_sel = adr & APBANKSEL;
        Self::write_dp_inner(port, DP_SELECT, apsel | bank_sel)?;

        let request = build_request(false, SwdAddr::Ap(adr as u8));
        check_ok(Self::transfer_retry(port, request, Some(value.to_le_bytes())))?;

        Self::read_rdbuff(port)
    }

    /// Collects (and clears) the posted result of the previous AP access
    /// through DP RDBUFF. The word itself is discarded.
    fn read_rdbuff(port: &mut T) -> Result<(), SwdWriteError> {
        let request = build_request(true, SwdAddr::Dp(DP_RDBUFF));
        check_ok(Self::transfer_retry(port, request, None))
    }

    /// Writes one 32-bit word to target memory.
    ///
    /// Asserts the CSW base configuration (32-bit size, single address
    /// auto-increment, debug-master access) before every word, then runs
    /// the TAR/DRW sequence. A successful call is exactly 6 wire
    /// transactions. On the first step that is not acknowledged the whole
    /// operation aborts; registers already written are not rolled back.
    pub fn write_word(&self, addr: u32, value: u32) -> Result<(), SwdWriteError> {
        let mut port = self.mtx.lock().unwrap();
        if Self::write_ap_inner(&mut port, AP_CSW, CSW_VALUE | CSW_SIZE32).is_err() {
            log::trace!("write_word({addr:#010x}): CSW setup not acknowledged");
            return Err(SwdWriteError);
        }
        Self::write_data(&mut port, addr, value)
    }

    /// TAR/DRW fast path. TAR and DRW live in the same AP bank as CSW, so
    /// the SELECT issued for the CSW write is still current and is not
    /// re-issued here. Callers must not interleave other AP access between
    /// the CSW write and this sequence.
    fn write_data(port: &mut T, addr: u32, value: u32) -> Result<(), SwdWriteError> {
        let request = build_request(false, SwdAddr::Ap(AP_TAR as u8));
        check_ok(Self::transfer_retry(port, request, Some(addr.to_le_bytes())))?;

        let request = build_request(false, SwdAddr::Ap(AP_DRW as u8));
        check_ok(Self::transfer_retry(port, request, Some(value.to_le_bytes())))?;

        Self::read_rdbuff(port)
    }
}
