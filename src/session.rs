use std::fmt::Display;

/// Unit descriptor of an open board or device session.
///
/// Only valid between a successful [`Gpib::open`](crate::Gpib::open) and taking the
/// descriptor offline. The caller owns it; nothing in this crate keeps a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ud(i32);

impl Ud {
    /// Value `ibdev` returns on failure
    pub const INVALID: Self = Self(-1);

    pub fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub fn as_raw(&self) -> i32 {
        self.0
    }
}

impl From<Ud> for i32 {
    fn from(ud: Ud) -> Self {
        ud.0
    }
}

impl Display for Ud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ud{}", self.0)
    }
}
