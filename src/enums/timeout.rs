use std::time::Duration;

consts_to_enum! {
    #[repr(i32)]
    /// Timeout codes for the `tmo` argument of `ibdev` and the `IbcTMO` option
    pub enum Timeout {
        TNONE   0   "Infinite timeout (disabled)"
        T10us   1   "Timeout of 10 us"
        T30us   2   "Timeout of 30 us"
        T100us  3   "Timeout of 100 us"
        T300us  4   "Timeout of 300 us"
        T1ms    5   "Timeout of 1 ms"
        T3ms    6   "Timeout of 3 ms"
        T10ms   7   "Timeout of 10 ms"
        T30ms   8   "Timeout of 30 ms"
        T100ms  9   "Timeout of 100 ms"
        T300ms  10  "Timeout of 300 ms"
        T1s     11  "Timeout of 1 s"
        T3s     12  "Timeout of 3 s"
        T10s    13  "Timeout of 10 s"
        T30s    14  "Timeout of 30 s"
        T100s   15  "Timeout of 100 s"
        T300s   16  "Timeout of 300 s"
        T1000s  17  "Timeout of 1000 s"
    }
}

impl Timeout {
    /// Nominal duration, `None` for [`Timeout::TNONE`]
    pub fn duration(&self) -> Option<Duration> {
        let micros: u64 = match self {
            Self::TNONE => return None,
            Self::T10us => 10,
            Self::T30us => 30,
            Self::T100us => 100,
            Self::T300us => 300,
            Self::T1ms => 1_000,
            Self::T3ms => 3_000,
            Self::T10ms => 10_000,
            Self::T30ms => 30_000,
            Self::T100ms => 100_000,
            Self::T300ms => 300_000,
            Self::T1s => 1_000_000,
            Self::T3s => 3_000_000,
            Self::T10s => 10_000_000,
            Self::T30s => 30_000_000,
            Self::T100s => 100_000_000,
            Self::T300s => 300_000_000,
            Self::T1000s => 1_000_000_000,
        };
        Some(Duration::from_micros(micros))
    }

    /// Smallest code whose nominal duration is at least `d`
    pub fn at_least(d: Duration) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.duration().is_some_and(|x| x >= d))
            .unwrap_or(Self::T1000s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_up() {
        assert_eq!(Timeout::at_least(Duration::from_millis(2)), Timeout::T3ms);
        assert_eq!(Timeout::at_least(Duration::from_secs(1)), Timeout::T1s);
        assert_eq!(Timeout::at_least(Duration::from_secs(5000)), Timeout::T1000s);
        assert_eq!(i32::from(Timeout::T10s), 13);
    }
}
