//! ARM Debug Interface v5 register addresses used by the write path.
//!
//! Addresses are the A[3:2] byte offsets as they appear in the request
//! phase. AP addresses additionally carry the bank select in bits 7:4 and
//! `APSEL` in bits 31:24, split off by [`SwdHost::write_ap`].
//!
//! [`SwdHost::write_ap`]: crate::SwdHost::write_ap

/// DP ABORT register (write-only).
pub const DP_ABORT: u8 = 0x00;
/// DP CTRL/STAT register.
pub const DP_CTRL_STAT: u8 = 0x04;
/// DP SELECT register, holds `APSEL` and the AP bank select.
pub const DP_SELECT: u8 = 0x08;
/// DP RDBUFF register (read-only). Reading it drains the posted result of
/// the previous AP access.
pub const DP_RDBUFF: u8 = 0x0C;

/// MEM-AP Control/Status Word register.
pub const AP_CSW: u32 = 0x00;
/// MEM-AP Transfer Address Register.
pub const AP_TAR: u32 = 0x04;
/// MEM-AP Data Read/Write register.
pub const AP_DRW: u32 = 0x0C;

/// Bank select bits within an AP address, written to DP SELECT[7:4].
pub const APBANKSEL: u32 = 0x0000_00F0;

// CSW fields.
pub const CSW_SIZE32: u32 = 0x0000_0002;
pub const CSW_SADDRINC: u32 = 0x0000_0010;
pub const CSW_DBGSTAT: u32 = 0x0000_0040;
pub const CSW_RESERVED: u32 = 0x0100_0000;
pub const CSW_HPROT: u32 = 0x0200_0000;
pub const CSW_MSTRDBG: u32 = 0x2000_0000;

/// CSW base value asserted before every memory word write: debug-master
/// access, HPROT data access, single auto-increment. Only the size field is
/// OR'd in per use.
pub const CSW_VALUE: u32 =
    CSW_RESERVED | CSW_MSTRDBG | CSW_HPROT | CSW_DBGSTAT | CSW_SADDRINC;
