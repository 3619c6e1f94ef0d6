//!
//! Bit registers of the NI-488.2 driver: the 16-bit status word (`ibsta`),
//! the 8-bit serial poll response and the end-of-string mode bits.
//!
//! Decoded views are ordered maps from mnemonic to `bool`, listed in ascending bit order.
//!

use bitflags::bitflags;
use indexmap::IndexMap;
use std::fmt::Display;

/// Ordered mnemonic -> bit state view of a register
pub type FlagMap = IndexMap<&'static str, bool>;

bitflags! {
    /// Status word returned by every driver call and mirrored in `ibsta`.
    ///
    /// Bits 9 and 10 are reserved and never reported.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u16 {
        /// Device clear state
        const DCAS = 1 << 0;
        /// Device trigger state
        const DTAS = 1 << 1;
        /// Listener
        const LACS = 1 << 2;
        /// Talker
        const TACS = 1 << 3;
        /// Attention is asserted
        const ATN = 1 << 4;
        /// Controller-In-Charge
        const CIC = 1 << 5;
        /// Remote state
        const REM = 1 << 6;
        /// Lockout state
        const LOK = 1 << 7;
        /// I/O completed
        const CMPL = 1 << 8;
        /// Device requesting service
        const RQS = 1 << 11;
        /// SRQ interrupt received
        const SRQI = 1 << 12;
        /// END or EOS detected
        const END = 1 << 13;
        /// Timeout
        const TIMO = 1 << 14;
        /// Error detected, see `iberr`
        const ERR = 1 << 15;
    }
}

impl Status {
    /// `true` when the driver reported a failure for the call this status belongs to
    pub fn is_err(&self) -> bool {
        self.contains(Self::ERR)
    }

    /// Map every named bit to its state, reserved positions omitted
    pub fn decode(&self) -> FlagMap {
        Self::all()
            .iter_names()
            .map(|(name, flag)| (name, self.contains(flag)))
            .collect()
    }

    /// Resolve an event mnemonic usable in a wait mask.
    ///
    /// Every named bit except `ERR` is accepted; the match is exact.
    pub fn from_event_name(name: &str) -> Option<Self> {
        Self::from_name(name).filter(|s| !s.contains(Self::ERR))
    }

    /// OR-combine a sequence of event mnemonics into one mask.
    ///
    /// Returns the first name that cannot be resolved as the error value.
    pub fn event_mask<'a, I>(names: I) -> std::result::Result<Self, &'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().try_fold(Self::empty(), |mask, name| {
            Self::from_event_name(name).map(|bit| mask | bit).ok_or(name)
        })
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<u16> for Status {
    fn from(bits: u16) -> Self {
        Self::from_bits_truncate(bits)
    }
}

fn write_names<'a>(
    f: &mut std::fmt::Formatter<'_>,
    names: impl Iterator<Item = &'a str>,
) -> std::fmt::Result {
    let mut first = true;
    for name in names {
        if !first {
            f.write_str(" | ")?;
        }
        f.write_str(name)?;
        first = false;
    }
    if first {
        f.write_str("(none)")?;
    }
    Ok(())
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_names(f, self.iter_names().map(|(name, _)| name))
    }
}

bitflags! {
    /// Serial poll response byte.
    ///
    /// Bit meanings are defined by the device, so bits only carry positional names.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PollByte: u8 {
        const B0 = 1 << 0;
        const B1 = 1 << 1;
        const B2 = 1 << 2;
        const B3 = 1 << 3;
        const B4 = 1 << 4;
        const B5 = 1 << 5;
        const B6 = 1 << 6;
        const B7 = 1 << 7;
    }
}

impl PollByte {
    /// Map the eight positional names to their state
    pub fn decode(&self) -> FlagMap {
        Self::all()
            .iter_names()
            .map(|(name, flag)| (name, self.contains(flag)))
            .collect()
    }

    /// IEEE 488.2 request service bit
    pub fn rqs(&self) -> bool {
        self.contains(Self::B6)
    }
}

impl Default for PollByte {
    fn default() -> Self {
        Self::empty()
    }
}

impl Display for PollByte {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_names(f, self.iter_names().map(|(name, _)| name))
    }
}

impl From<u8> for PollByte {
    fn from(bits: u8) -> Self {
        Self::from_bits_retain(bits)
    }
}

bitflags! {
    /// End-of-string handling, combined with the EOS character in the low byte
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EosMode: i32 {
        /// Terminate reads on the EOS character
        const REOS = 0x0400;
        /// Assert EOI with the EOS character on writes
        const XEOS = 0x0800;
        /// Compare all 8 bits of the EOS character
        const BIN = 0x1000;
    }
}

impl Default for EosMode {
    fn default() -> Self {
        Self::empty()
    }
}

/// EOS configuration passed to [`Gpib::open`](crate::Gpib::open) or `IbcEOS*` options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Eos {
    pub mode: EosMode,
    pub character: u8,
}

impl Eos {
    pub fn new(mode: EosMode, character: u8) -> Self {
        Self { mode, character }
    }

    /// No end-of-string handling
    pub fn disabled() -> Self {
        Self::default()
    }
}

impl From<Eos> for i32 {
    fn from(eos: Eos) -> Self {
        eos.mode.bits() | eos.character as i32
    }
}
