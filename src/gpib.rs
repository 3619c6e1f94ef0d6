use bytes::{Bytes, BytesMut};

use crate::{
    driver::{Driver, Registers},
    enums::ConfigOption,
    flags::{PollByte, Status},
    Error, Result, Ud,
};

/// Outcome of one driver call.
///
/// `status` is always the register captured right after the call. `result` is `Err`
/// exactly when that status has [`Status::ERR`] set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<T> {
    pub status: Status,
    pub result: Result<T>,
}

impl<T> Reply<T> {
    fn from_registers(op: &str, regs: Registers, value: T) -> Self {
        log::debug!("{}: {}", op, regs.status);
        let result = if regs.failed() {
            let err = Error(regs.error);
            log::log!(failure_level(regs.status), "{} failed: {}", op, err);
            Err(err)
        } else {
            Ok(value)
        };
        Self {
            status: regs.status,
            result,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        Reply {
            status: self.status,
            result: self.result.map(f),
        }
    }
}

/// Timeouts are routine outcomes of waits and reads, everything else is worth a warning
fn failure_level(status: Status) -> log::Level {
    if status.contains(Status::TIMO) {
        log::Level::Debug
    } else {
        log::Level::Warn
    }
}

/// Typed NI-488.2 operations over a [`Driver`].
///
/// Holds no state besides the driver; descriptors stay with the caller.
#[derive(Debug, Default, Clone)]
pub struct Gpib<D> {
    driver: D,
}

impl<D: Driver> Gpib<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Opens and initializes a device descriptor (`ibdev`).
    ///
    /// `tmo` takes a [`Timeout`](crate::enums::Timeout) code, `eos` an
    /// [`Eos`](crate::flags::Eos) value, `eot` enables EOI on the last byte written.
    pub fn open(&self, board: i32, pad: i32, sad: i32, tmo: i32, eot: i32, eos: i32) -> Reply<Ud> {
        let (ud, regs) = self.driver.ibdev(board, pad, sad, tmo, eot, eos);
        Reply::from_registers("ibdev", regs, ud)
    }

    /// Sends the selected device clear message (`ibclr`)
    pub fn clear(&self, ud: Ud) -> Reply<()> {
        let regs = self.driver.ibclr(ud);
        Reply::from_registers("ibclr", regs, ())
    }

    /// Places the descriptor online or takes it offline (`ibonl`).
    ///
    /// Offline invalidates the descriptor.
    pub fn online(&self, ud: Ud, online: bool) -> Reply<()> {
        let regs = self.driver.ibonl(ud, online);
        Reply::from_registers("ibonl", regs, ())
    }

    /// Reads the current value of a configuration option (`ibask`)
    pub fn config(&self, ud: Ud, option: ConfigOption) -> Reply<i32> {
        let (value, regs) = self.driver.ibask(ud, option.into());
        Reply::from_registers("ibask", regs, value)
    }

    /// Changes a configuration option (`ibconfig`)
    pub fn set_config(&self, ud: Ud, option: ConfigOption, value: i32) -> Reply<()> {
        let regs = self.driver.ibconfig(ud, option.into(), value);
        Reply::from_registers("ibconfig", regs, ())
    }

    /// Reads up to `max` bytes (`ibrd`).
    ///
    /// The reading stops at `max` bytes or when END is received. Only the bytes the
    /// driver reports as transferred are returned, never the unwritten rest of the buffer.
    pub fn read(&self, ud: Ud, max: usize) -> Reply<Bytes> {
        let mut buf = BytesMut::zeroed(max);
        let regs = self.driver.ibrd(ud, &mut buf);
        buf.truncate(regs.count.min(max));
        log::trace!("ibrd: {} of {} bytes", buf.len(), max);
        Reply::from_registers("ibrd", regs, buf.freeze())
    }

    /// Writes `data` as is (`ibwrt`), returning the number of bytes sent
    pub fn write(&self, ud: Ud, data: &[u8]) -> Reply<usize> {
        let regs = self.driver.ibwrt(ud, data);
        Reply::from_registers("ibwrt", regs, regs.count)
    }

    /// Conducts a serial poll (`ibrsp`)
    pub fn serial_poll(&self, ud: Ud) -> Reply<PollByte> {
        let (spr, regs) = self.driver.ibrsp(ud);
        Reply::from_registers("ibrsp", regs, PollByte::from(spr))
    }

    /// Sends the group execute trigger message (`ibtrg`)
    pub fn trigger(&self, ud: Ud) -> Reply<()> {
        let regs = self.driver.ibtrg(ud);
        Reply::from_registers("ibtrg", regs, ())
    }

    /// Waits until any event in `mask` occurs or the descriptor's timeout elapses (`ibwait`).
    ///
    /// Include [`Status::TIMO`] in the mask to bound the wait by the configured timeout.
    pub fn wait(&self, ud: Ud, mask: Status) -> Reply<()> {
        let regs = self.driver.ibwait(ud, mask);
        Reply::from_registers("ibwait", regs, ())
    }
}
