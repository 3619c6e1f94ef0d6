//! Error codes reported in `iberr` when [`Status::ERR`](crate::flags::Status::ERR) is set.

consts_to_enum! {
    #[repr(i32)]
    /// Driver error code.
    ///
    /// `Display` yields the resolved `"<MNEMONIC>: <description>"` form.
    pub enum ErrorCode {
        EDVR    0   "System error"
        ECIC    1   "Function requires GPIB board to be CIC"
        ENOL    2   "Write function detected no Listeners"
        EADR    3   "Interface board not addressed correctly"
        EARG    4   "Invalid argument to function call"
        ESAC    5   "Function requires GPIB board to be SAC"
        EABO    6   "I/O operation aborted"
        ENEB    7   "Non-existent interface board"
        EDMA    8   "Error performing DMA"
        EOIP    10  "I/O operation started before previous operation completed"
        ECAP    11  "No capability for intended operation"
        EFSO    12  "File system operation error"
        EBUS    14  "Command error during device call"
        ESTB    15  "Serial poll status byte lost"
        ESRQ    16  "SRQ remains asserted"
        ETAB    20  "The return buffer is full"
        ELCK    21  "Address or board is locked"
        EARM    22  "The ibnotify Callback failed to rearm"
        EHDL    23  "The input handle is invalid"
        EWIP    26  "Wait already in progress on input ud"
        ERST    27  "The event notification was cancelled due to a reset of the interface"
        EPWR    28  "The system or board has lost power or gone to standby"
    }
}

/// Returned for codes outside the table
pub const UNDOCUMENTED: &str = "E???: Undocumented error";

/// Resolve a raw `iberr` value to its fixed message. Never fails.
pub fn mnemonic(code: i32) -> &'static str {
    ErrorCode::try_from(code).map_or(UNDOCUMENTED, |c| c.message())
}
