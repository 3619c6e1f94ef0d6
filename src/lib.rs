//!
//! Bindings for the NI-488.2 GPIB (IEEE-488) driver
//!
//! The crate sits between a calling environment and the vendor driver. It decodes
//! the driver's status word into named flags, resolves `iberr` codes into short
//! mnemonic messages and shapes transferred data, while the driver does all bus work.
//!
//! # Layers
//! * [`Driver`](driver::Driver) is the only place the vendor library is called. Each
//!   call hands back the `ibsta`/`iberr`/`ibcnt` registers it produced as one
//!   [`Registers`](driver::Registers) value.
//! * [`Gpib`] offers typed operations over any driver; every result is a [`Reply`],
//!   which carries the decoded status whether or not the call failed.
//! * [`binding`] validates loosely typed arguments ([`value::Value`]) and encodes
//!   results back; the `python` feature exposes it as the `ni4882` Python module
//!   (`py-convert` builds the Python conversions alone, without the vendor library).
//!
//! # Requirements
//! The `driver` feature links the installed NI-488.2 library (`ni4882` on Windows,
//! `gpibapi` elsewhere). Set `LIB_NI4882_PATH` to the directory holding it if it is not
//! on the default search path. Without the feature the crate builds and can be
//! driven by any [`Driver`](driver::Driver) implementation.
//!
//! # Example
//! ```ignore
//! use ni4882::{enums::Timeout, flags::Eos, native::Ni4882, Gpib};
//! let gpib = Gpib::new(Ni4882);
//! let dev = gpib.open(0, 22, 0, Timeout::T10s.into(), 1, Eos::disabled().into()).result?;
//! gpib.write(dev, b"*IDN?\n").result?;
//! let idn = gpib.read(dev, 256).result?;
//! eprintln!("{}", String::from_utf8_lossy(&idn));
//! # Ok::<(), ni4882::Error>(())
//! ```

pub mod binding;
pub mod driver;
pub mod enums;
pub mod flags;
mod gpib;
#[cfg(feature = "driver")]
pub mod native;
#[cfg(feature = "py-convert")]
mod python;
mod session;
pub mod value;

pub use gpib::{Gpib, Reply};
pub use session::Ud;

/// Version string reported to the calling environment
pub const VERSION: &str = concat!("ni4882 v", env!("CARGO_PKG_VERSION"));

/// Failure reported by the driver through `iberr`.
///
/// Holds the raw code, so values outside [`ErrorCode`](enums::ErrorCode) survive unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Error(pub i32);

impl Error {
    pub fn kind(&self) -> Option<enums::ErrorCode> {
        enums::ErrorCode::try_from(self.0).ok()
    }

    /// `"<MNEMONIC>: <description>"`, or the undocumented placeholder
    pub fn mnemonic(&self) -> &'static str {
        enums::error::mnemonic(self.0)
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl From<enums::ErrorCode> for Error {
    fn from(s: enums::ErrorCode) -> Self {
        Self(s.into())
    }
}

impl From<Error> for i32 {
    fn from(s: Error) -> Self {
        s.0
    }
}

pub type Result<T> = std::result::Result<T, Error>;
