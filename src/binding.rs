//!
//! Marshaling between the calling environment and [`Gpib`].
//!
//! Each exposed function checks its arguments, calls the driver once and encodes the
//! outcome. Two failure classes never mix:
//!
//! * malformed calls (arity, types, unknown mnemonics) fail with [`ArgError`] before
//!   the driver is reached;
//! * driver failures are ordinary results: a `nil` in place of the payload, the
//!   decoded status table and the resolved error message.
//!
//! | function  | arguments                               | results                   |
//! |-----------|-----------------------------------------|---------------------------|
//! | ibdev     | board, pad, sad, tmo, eot, eos          | ud, status, err           |
//! | ibclr     | ud                                      | status, err               |
//! | ibonl     | ud, online                              | status, err               |
//! | ibask     | ud, option                              | value, status, err        |
//! | ibconfig  | ud, option, value                       | status, err               |
//! | ibrd      | ud, count \[, "charTable" \| "binTable"\] | data, status, err         |
//! | ibwrt     | ud, data                                | count, status, err        |
//! | ibrsp     | ud                                      | poll, status, err         |
//! | ibtrg     | ud                                      | status, err               |
//! | ibwait    | ud, event \| {events}                   | status, err               |
//!

use std::str::FromStr;

use bytes::Bytes;
use thiserror::Error;

use crate::{
    driver::Driver,
    enums::ConfigOption,
    flags::Status,
    value::Value,
    Gpib, Reply, Ud,
};

pub use crate::VERSION;

/// Malformed call, detected before the driver is invoked
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgError {
    #[error("Wrong number of arguments (expected {expected}, got {found}).")]
    Arity { expected: &'static str, found: usize },
    #[error("bad argument #{position} ({expected} expected, got {found})")]
    Type {
        position: usize,
        expected: &'static str,
        found: String,
    },
    #[error("bad argument #{position} (value {value} out of range)")]
    Range { position: usize, value: i64 },
    #[error("unknown configuration option \"{0}\"")]
    UnknownOption(String),
    #[error("unknown event mnemonic \"{0}\"")]
    UnknownEvent(String),
    #[error("event mask must name at least one event")]
    EmptyWaitMask,
    #[error("Optional 3rd argument must be either \"charTable\" or \"binTable\", got \"{0}\".")]
    InvalidReadMode(String),
    #[error("no function named \"{0}\"")]
    UnknownFunction(String),
}

pub type ArgResult<T> = std::result::Result<T, ArgError>;

/// Largest byte count a single `ibrd` may request; `ibcntl` cannot report more
pub const MAX_READ: usize = i32::MAX as usize;

/// Shape of the data returned by `ibrd`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReadMode {
    /// One byte string
    #[default]
    Text,
    /// Table of 1-character strings indexed from 1
    CharTable,
    /// Table of byte values (0-255) indexed from 1
    BinTable,
}

impl FromStr for ReadMode {
    type Err = ArgError;
    fn from_str(s: &str) -> ArgResult<Self> {
        match s {
            "charTable" => Ok(Self::CharTable),
            "binTable" => Ok(Self::BinTable),
            _ => Err(ArgError::InvalidReadMode(s.to_owned())),
        }
    }
}

impl ReadMode {
    pub fn shape(&self, data: Bytes) -> Value {
        match self {
            Self::Text => Value::Bytes(data),
            Self::CharTable => {
                Value::indexed(data.iter().map(|b| Value::Str(char::from(*b).to_string())))
            }
            Self::BinTable => Value::indexed(data.iter().map(|b| Value::Int(i64::from(*b)))),
        }
    }
}

/// Positional argument access with 1-based positions in error messages
struct Args<'a>(&'a [Value]);

impl<'a> Args<'a> {
    fn exact(args: &'a [Value], n: usize, expected: &'static str) -> ArgResult<Self> {
        Self::between(args, n, n, expected)
    }

    fn between(
        args: &'a [Value],
        min: usize,
        max: usize,
        expected: &'static str,
    ) -> ArgResult<Self> {
        if (min..=max).contains(&args.len()) {
            Ok(Self(args))
        } else {
            Err(ArgError::Arity {
                expected,
                found: args.len(),
            })
        }
    }

    fn get(&self, position: usize) -> Option<&'a Value> {
        self.0.get(position - 1)
    }

    fn type_error(&self, position: usize, expected: &'static str) -> ArgError {
        ArgError::Type {
            position,
            expected,
            found: self
                .get(position)
                .map_or("no value", |v| v.type_name())
                .to_owned(),
        }
    }

    fn integer(&self, position: usize) -> ArgResult<i64> {
        match self.get(position) {
            Some(Value::Int(i)) => Ok(*i),
            _ => Err(self.type_error(position, "integer")),
        }
    }

    fn int32(&self, position: usize) -> ArgResult<i32> {
        let value = self.integer(position)?;
        i32::try_from(value).map_err(|_| ArgError::Range { position, value })
    }

    fn ud(&self, position: usize) -> ArgResult<Ud> {
        self.int32(position).map(Ud::from_raw)
    }

    fn count(&self, position: usize) -> ArgResult<usize> {
        let value = self.integer(position)?;
        usize::try_from(value)
            .ok()
            .filter(|n| *n <= MAX_READ)
            .ok_or(ArgError::Range { position, value })
    }

    fn string(&self, position: usize) -> ArgResult<&'a str> {
        match self.get(position) {
            Some(Value::Str(s)) => Ok(s.as_str()),
            _ => Err(self.type_error(position, "string")),
        }
    }

    fn bytes(&self, position: usize) -> ArgResult<&'a [u8]> {
        match self.get(position) {
            Some(Value::Str(s)) => Ok(s.as_bytes()),
            Some(Value::Bytes(b)) => Ok(&b[..]),
            _ => Err(self.type_error(position, "string")),
        }
    }

    fn boolean(&self, position: usize) -> ArgResult<bool> {
        match self.get(position) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::Int(i)) => Ok(*i != 0),
            _ => Err(self.type_error(position, "boolean")),
        }
    }

    fn option(&self, position: usize) -> ArgResult<ConfigOption> {
        let name = self.string(position)?;
        ConfigOption::from_name(name).ok_or_else(|| ArgError::UnknownOption(name.to_owned()))
    }

    /// A single event mnemonic or a collection of them, OR-combined
    fn event_mask(&self, position: usize) -> ArgResult<Status> {
        let names: Vec<&str> = match self.get(position) {
            Some(Value::Str(s)) => vec![s.as_str()],
            Some(Value::List(items)) => items
                .iter()
                .map(|v| match v {
                    Value::Str(s) => Ok(s.as_str()),
                    other => Err(ArgError::Type {
                        position,
                        expected: "event name",
                        found: other.type_name().to_owned(),
                    }),
                })
                .collect::<ArgResult<_>>()?,
            _ => return Err(self.type_error(position, "event name or sequence of event names")),
        };
        if names.is_empty() {
            return Err(ArgError::EmptyWaitMask);
        }
        Status::event_mask(names).map_err(|name| ArgError::UnknownEvent(name.to_owned()))
    }
}

fn status_value(status: Status) -> Value {
    status.decode().into()
}

fn error_value<T>(reply: &Reply<T>) -> Value {
    match &reply.result {
        Ok(_) => Value::Nil,
        Err(e) => Value::Str(e.mnemonic().to_owned()),
    }
}

/// `payload | nil, status, err | nil`
fn encode_with<T>(reply: Reply<T>, payload: impl FnOnce(T) -> Value) -> Vec<Value> {
    let status = status_value(reply.status);
    let err = error_value(&reply);
    let payload = reply.result.map_or(Value::Nil, payload);
    vec![payload, status, err]
}

/// `status, err | nil`
fn encode_status(reply: Reply<()>) -> Vec<Value> {
    vec![status_value(reply.status), error_value(&reply)]
}

pub fn ibdev<D: Driver>(gpib: &Gpib<D>, args: &[Value]) -> ArgResult<Vec<Value>> {
    let a = Args::exact(args, 6, "6")?;
    let (board, pad, sad) = (a.int32(1)?, a.int32(2)?, a.int32(3)?);
    let (tmo, eot, eos) = (a.int32(4)?, a.int32(5)?, a.int32(6)?);
    let reply = gpib.open(board, pad, sad, tmo, eot, eos);
    Ok(encode_with(reply, |ud| Value::Int(ud.as_raw().into())))
}

pub fn ibclr<D: Driver>(gpib: &Gpib<D>, args: &[Value]) -> ArgResult<Vec<Value>> {
    let a = Args::exact(args, 1, "1")?;
    Ok(encode_status(gpib.clear(a.ud(1)?)))
}

pub fn ibonl<D: Driver>(gpib: &Gpib<D>, args: &[Value]) -> ArgResult<Vec<Value>> {
    let a = Args::exact(args, 2, "2")?;
    let (ud, online) = (a.ud(1)?, a.boolean(2)?);
    Ok(encode_status(gpib.online(ud, online)))
}

pub fn ibask<D: Driver>(gpib: &Gpib<D>, args: &[Value]) -> ArgResult<Vec<Value>> {
    let a = Args::exact(args, 2, "2")?;
    let (ud, option) = (a.ud(1)?, a.option(2)?);
    Ok(encode_with(gpib.config(ud, option), |v| Value::Int(v.into())))
}

pub fn ibconfig<D: Driver>(gpib: &Gpib<D>, args: &[Value]) -> ArgResult<Vec<Value>> {
    let a = Args::exact(args, 3, "3")?;
    let (ud, option, value) = (a.ud(1)?, a.option(2)?, a.int32(3)?);
    Ok(encode_status(gpib.set_config(ud, option, value)))
}

pub fn ibrd<D: Driver>(gpib: &Gpib<D>, args: &[Value]) -> ArgResult<Vec<Value>> {
    let a = Args::between(args, 2, 3, "2 or 3")?;
    let (ud, count) = (a.ud(1)?, a.count(2)?);
    let mode = match a.get(3) {
        Some(_) => a.string(3)?.parse::<ReadMode>()?,
        None => ReadMode::Text,
    };
    log::trace!("ibrd: {} bytes as {:?}", count, mode);
    Ok(encode_with(gpib.read(ud, count), |data| mode.shape(data)))
}

pub fn ibwrt<D: Driver>(gpib: &Gpib<D>, args: &[Value]) -> ArgResult<Vec<Value>> {
    let a = Args::exact(args, 2, "2")?;
    let (ud, data) = (a.ud(1)?, a.bytes(2)?);
    Ok(encode_with(gpib.write(ud, data), |n| Value::Int(n as i64)))
}

pub fn ibrsp<D: Driver>(gpib: &Gpib<D>, args: &[Value]) -> ArgResult<Vec<Value>> {
    let a = Args::exact(args, 1, "1")?;
    Ok(encode_with(gpib.serial_poll(a.ud(1)?), |spr| spr.decode().into()))
}

pub fn ibtrg<D: Driver>(gpib: &Gpib<D>, args: &[Value]) -> ArgResult<Vec<Value>> {
    let a = Args::exact(args, 1, "1")?;
    Ok(encode_status(gpib.trigger(a.ud(1)?)))
}

pub fn ibwait<D: Driver>(gpib: &Gpib<D>, args: &[Value]) -> ArgResult<Vec<Value>> {
    let a = Args::exact(args, 2, "2")?;
    let (ud, mask) = (a.ud(1)?, a.event_mask(2)?);
    log::trace!("ibwait: mask {}", mask);
    Ok(encode_status(gpib.wait(ud, mask)))
}

/// Entry point of an exposed function
pub type Handler<D> = fn(&Gpib<D>, &[Value]) -> ArgResult<Vec<Value>>;

/// Registration table of every exposed function, in definition order
pub fn functions<D: Driver>() -> [(&'static str, Handler<D>); 10] {
    [
        ("ibclr", ibclr::<D> as Handler<D>),
        ("ibdev", ibdev::<D> as Handler<D>),
        ("ibrd", ibrd::<D> as Handler<D>),
        ("ibwrt", ibwrt::<D> as Handler<D>),
        ("ibonl", ibonl::<D> as Handler<D>),
        ("ibask", ibask::<D> as Handler<D>),
        ("ibconfig", ibconfig::<D> as Handler<D>),
        ("ibrsp", ibrsp::<D> as Handler<D>),
        ("ibtrg", ibtrg::<D> as Handler<D>),
        ("ibwait", ibwait::<D> as Handler<D>),
    ]
}

pub fn lookup<D: Driver>(name: &str) -> Option<Handler<D>> {
    functions::<D>()
        .into_iter()
        .find_map(|(n, h)| (n == name).then_some(h))
}

/// Call an exposed function by name
pub fn call<D: Driver>(gpib: &Gpib<D>, name: &str, args: &[Value]) -> ArgResult<Vec<Value>> {
    let handler = lookup::<D>(name).ok_or_else(|| ArgError::UnknownFunction(name.to_owned()))?;
    handler(gpib, args)
}
