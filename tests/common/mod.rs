#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use ni4882::{
    driver::{Driver, Registers},
    flags::Status,
    Ud,
};

pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// Driver call as seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Dev(i32, i32, i32, i32, i32, i32),
    Clr(Ud),
    Onl(Ud, bool),
    Ask(Ud, i32),
    Config(Ud, i32, i32),
    Rd(Ud, usize),
    Wrt(Ud, Vec<u8>),
    Rsp(Ud),
    Trg(Ud),
    Wait(Ud, Status),
}

/// Registers of a successful call
pub fn ok() -> Registers {
    Registers::new(Status::CMPL, 0, 0)
}

/// Registers of a failed call with the given `iberr`
pub fn fail(code: i32) -> Registers {
    Registers::new(Status::ERR | Status::CMPL, code, 0)
}

/// Scripted driver recording every call it receives
pub struct MockDriver {
    pub calls: RefCell<Vec<Call>>,
    pub regs: Cell<Registers>,
    /// Bytes delivered by `ibrd`
    pub incoming: RefCell<Vec<u8>>,
    /// Caps the count reported by `ibwrt`
    pub write_limit: Cell<Option<usize>>,
    pub ud: Cell<i32>,
    pub ask_value: Cell<i32>,
    pub spr: Cell<u8>,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            regs: Cell::new(ok()),
            incoming: RefCell::new(Vec::new()),
            write_limit: Cell::new(None),
            ud: Cell::new(32000),
            ask_value: Cell::new(0),
            spr: Cell::new(0),
        }
    }
}

impl MockDriver {
    pub fn failing(code: i32) -> Self {
        let m = Self::default();
        m.regs.set(fail(code));
        m
    }

    pub fn with_incoming(data: &[u8]) -> Self {
        let m = Self::default();
        m.incoming.replace(data.to_vec());
        m
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn with_count(&self, count: usize) -> Registers {
        Registers {
            count,
            ..self.regs.get()
        }
    }
}

impl Driver for MockDriver {
    fn ibdev(
        &self,
        board: i32,
        pad: i32,
        sad: i32,
        tmo: i32,
        eot: i32,
        eos: i32,
    ) -> (Ud, Registers) {
        self.record(Call::Dev(board, pad, sad, tmo, eot, eos));
        let regs = self.regs.get();
        let ud = if regs.failed() { -1 } else { self.ud.get() };
        (Ud::from_raw(ud), regs)
    }

    fn ibclr(&self, ud: Ud) -> Registers {
        self.record(Call::Clr(ud));
        self.regs.get()
    }

    fn ibonl(&self, ud: Ud, online: bool) -> Registers {
        self.record(Call::Onl(ud, online));
        self.regs.get()
    }

    fn ibask(&self, ud: Ud, option: i32) -> (i32, Registers) {
        self.record(Call::Ask(ud, option));
        (self.ask_value.get(), self.regs.get())
    }

    fn ibconfig(&self, ud: Ud, option: i32, value: i32) -> Registers {
        self.record(Call::Config(ud, option, value));
        self.regs.get()
    }

    fn ibrd(&self, ud: Ud, buf: &mut [u8]) -> Registers {
        self.record(Call::Rd(ud, buf.len()));
        // leave garbage past the transferred bytes
        buf.fill(0xEE);
        let incoming = self.incoming.borrow();
        let n = incoming.len().min(buf.len());
        buf[..n].copy_from_slice(&incoming[..n]);
        self.with_count(n)
    }

    fn ibwrt(&self, ud: Ud, buf: &[u8]) -> Registers {
        self.record(Call::Wrt(ud, buf.to_vec()));
        let n = self.write_limit.get().map_or(buf.len(), |l| l.min(buf.len()));
        self.with_count(n)
    }

    fn ibrsp(&self, ud: Ud) -> (u8, Registers) {
        self.record(Call::Rsp(ud));
        (self.spr.get(), self.regs.get())
    }

    fn ibtrg(&self, ud: Ud) -> Registers {
        self.record(Call::Trg(ud));
        self.regs.get()
    }

    fn ibwait(&self, ud: Ud, mask: Status) -> Registers {
        self.record(Call::Wait(ud, mask));
        self.regs.get()
    }
}
