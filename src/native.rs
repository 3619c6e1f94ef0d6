//!
//! Native NI-488.2 entry points.
//!
//! The library to link against is chosen by the build script: `ni4882` on Windows,
//! `gpibapi` elsewhere. Set `LIB_NI4882_PATH` to the directory holding it if it is
//! not on the default search path.
//!

use std::ffi::{c_char, c_int, c_ulong, c_void};

use crate::{
    driver::{Driver, Registers},
    flags::Status,
    Ud,
};

#[allow(non_snake_case)]
extern "system" {
    fn ibdev(
        board_id: c_int,
        pad: c_int,
        sad: c_int,
        tmo: c_int,
        eot: c_int,
        eos: c_int,
    ) -> c_int;
    fn ibclr(ud: c_int) -> c_ulong;
    fn ibonl(ud: c_int, v: c_int) -> c_ulong;
    fn ibask(ud: c_int, option: c_int, v: *mut c_int) -> c_ulong;
    fn ibconfig(ud: c_int, option: c_int, v: c_int) -> c_ulong;
    fn ibrd(ud: c_int, buf: *mut c_void, cnt: usize) -> c_ulong;
    fn ibwrt(ud: c_int, buf: *const c_void, cnt: usize) -> c_ulong;
    fn ibrsp(ud: c_int, spr: *mut c_char) -> c_ulong;
    fn ibtrg(ud: c_int) -> c_ulong;
    fn ibwait(ud: c_int, mask: c_int) -> c_ulong;

    fn ThreadIbsta() -> c_ulong;
    fn ThreadIberr() -> c_ulong;
    fn ThreadIbcntl() -> c_ulong;
}

/// Reads the calling thread's outcome registers.
///
/// # Safety
/// Must run on the thread that issued the call, before any other driver call.
unsafe fn capture() -> Registers {
    Registers::new(
        Status::from(ThreadIbsta() as u16),
        ThreadIberr() as i32,
        ThreadIbcntl() as usize,
    )
}

/// Call a driver function and capture the registers it left behind
macro_rules! ni_call {
    ($f:ident($($arg:expr),* $(,)?)) => {{
        // SAFETY: arguments are plain integers or pointers into live Rust buffers
        // sized by the accompanying count; registers are read before returning.
        let (ret, regs) = unsafe {
            let ret = $f($($arg),*);
            (ret, capture())
        };
        log::trace!(
            concat!(stringify!($f), ": ibsta {:#06x}, iberr {}, ibcnt {}"),
            regs.status.bits(),
            regs.error,
            regs.count
        );
        (ret, regs)
    }};
}

/// The installed NI-488.2 driver
#[derive(Debug, Default, Clone, Copy)]
pub struct Ni4882;

impl Driver for Ni4882 {
    fn ibdev(
        &self,
        board: i32,
        pad: i32,
        sad: i32,
        tmo: i32,
        eot: i32,
        eos: i32,
    ) -> (Ud, Registers) {
        let (ud, regs) = ni_call!(ibdev(board, pad, sad, tmo, eot, eos));
        (Ud::from_raw(ud), regs)
    }

    fn ibclr(&self, ud: Ud) -> Registers {
        ni_call!(ibclr(ud.as_raw())).1
    }

    fn ibonl(&self, ud: Ud, online: bool) -> Registers {
        ni_call!(ibonl(ud.as_raw(), online as c_int)).1
    }

    fn ibask(&self, ud: Ud, option: i32) -> (i32, Registers) {
        let mut value: c_int = 0;
        let (_, regs) = ni_call!(ibask(ud.as_raw(), option, &mut value as *mut _));
        (value, regs)
    }

    fn ibconfig(&self, ud: Ud, option: i32, value: i32) -> Registers {
        ni_call!(ibconfig(ud.as_raw(), option, value)).1
    }

    fn ibrd(&self, ud: Ud, buf: &mut [u8]) -> Registers {
        ni_call!(ibrd(ud.as_raw(), buf.as_mut_ptr() as *mut c_void, buf.len())).1
    }

    fn ibwrt(&self, ud: Ud, buf: &[u8]) -> Registers {
        ni_call!(ibwrt(ud.as_raw(), buf.as_ptr() as *const c_void, buf.len())).1
    }

    fn ibrsp(&self, ud: Ud) -> (u8, Registers) {
        let mut spr: c_char = 0;
        let (_, regs) = ni_call!(ibrsp(ud.as_raw(), &mut spr as *mut _));
        (spr as u8, regs)
    }

    fn ibtrg(&self, ud: Ud) -> Registers {
        ni_call!(ibtrg(ud.as_raw())).1
    }

    fn ibwait(&self, ud: Ud, mask: Status) -> Registers {
        ni_call!(ibwait(ud.as_raw(), mask.bits() as c_int)).1
    }
}
