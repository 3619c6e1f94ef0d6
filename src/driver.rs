//!
//! The single seam through which the vendor driver is invoked.
//!
//! NI-488.2 reports the outcome of a call through per-thread registers (`ibsta`,
//! `iberr`, `ibcnt`) that the next call overwrites. Implementations of [`Driver`]
//! read them right after the native call returns and hand them back as one
//! [`Registers`] value, so callers never observe a stale register.
//!

use crate::{flags::Status, Ud};

/// Snapshot of the driver's outcome registers for exactly one call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Registers {
    /// `ibsta`
    pub status: Status,
    /// `iberr`, meaningful only when `status` has `ERR` set
    pub error: i32,
    /// `ibcnt`, bytes actually transferred by the call
    pub count: usize,
}

impl Registers {
    pub fn new(status: Status, error: i32, count: usize) -> Self {
        Self {
            status,
            error,
            count,
        }
    }

    pub fn failed(&self) -> bool {
        self.status.is_err()
    }
}

/// Calls of the NI-488.2 API used by this crate.
///
/// Every method blocks until the driver returns. Arguments are passed through unchanged;
/// validation happens before a method is reached.
pub trait Driver {
    /// `ibdev`: open a device descriptor
    fn ibdev(
        &self,
        board: i32,
        pad: i32,
        sad: i32,
        tmo: i32,
        eot: i32,
        eos: i32,
    ) -> (Ud, Registers);

    /// `ibclr`: send the device clear message
    fn ibclr(&self, ud: Ud) -> Registers;

    /// `ibonl`: place the descriptor online (`true`) or take it offline
    fn ibonl(&self, ud: Ud, online: bool) -> Registers;

    /// `ibask`: query a configuration option
    fn ibask(&self, ud: Ud, option: i32) -> (i32, Registers);

    /// `ibconfig`: change a configuration option
    fn ibconfig(&self, ud: Ud, option: i32, value: i32) -> Registers;

    /// `ibrd`: read at most `buf.len()` bytes; `count` holds how many arrived
    fn ibrd(&self, ud: Ud, buf: &mut [u8]) -> Registers;

    /// `ibwrt`: write `buf`; `count` holds how many bytes were sent
    fn ibwrt(&self, ud: Ud, buf: &[u8]) -> Registers;

    /// `ibrsp`: serial poll, returning the response byte
    fn ibrsp(&self, ud: Ud) -> (u8, Registers);

    /// `ibtrg`: send the group execute trigger message
    fn ibtrg(&self, ud: Ud) -> Registers;

    /// `ibwait`: wait for any event in `mask`
    fn ibwait(&self, ud: Ud, mask: Status) -> Registers;
}

impl<D: Driver + ?Sized> Driver for &D {
    fn ibdev(
        &self,
        board: i32,
        pad: i32,
        sad: i32,
        tmo: i32,
        eot: i32,
        eos: i32,
    ) -> (Ud, Registers) {
        (**self).ibdev(board, pad, sad, tmo, eot, eos)
    }
    fn ibclr(&self, ud: Ud) -> Registers {
        (**self).ibclr(ud)
    }
    fn ibonl(&self, ud: Ud, online: bool) -> Registers {
        (**self).ibonl(ud, online)
    }
    fn ibask(&self, ud: Ud, option: i32) -> (i32, Registers) {
        (**self).ibask(ud, option)
    }
    fn ibconfig(&self, ud: Ud, option: i32, value: i32) -> Registers {
        (**self).ibconfig(ud, option, value)
    }
    fn ibrd(&self, ud: Ud, buf: &mut [u8]) -> Registers {
        (**self).ibrd(ud, buf)
    }
    fn ibwrt(&self, ud: Ud, buf: &[u8]) -> Registers {
        (**self).ibwrt(ud, buf)
    }
    fn ibrsp(&self, ud: Ud) -> (u8, Registers) {
        (**self).ibrsp(ud)
    }
    fn ibtrg(&self, ud: Ud) -> Registers {
        (**self).ibtrg(ud)
    }
    fn ibwait(&self, ud: Ud, mask: Status) -> Registers {
        (**self).ibwait(ud, mask)
    }
}
