//! Configuration options accepted by `ibask` and `ibconfig`.

consts_to_enum! {
    #[repr(i32)]
    /// Option selector, resolved by exact mnemonic match before the driver is called
    pub enum ConfigOption {
        IbcPAD              0x0001  "Primary address"
        IbcSAD              0x0002  "Secondary address"
        IbcTMO              0x0003  "Timeout value"
        IbcEOT              0x0004  "Assert EOI with the last data byte"
        IbcPPC              0x0005  "Parallel poll configure"
        IbcREADDR           0x0006  "Repeat addressing"
        IbcAUTOPOLL         0x0007  "Automatic serial polling"
        IbcCICPROT          0x0008  "CIC protocol"
        IbcSC               0x000A  "Board is system controller"
        IbcSRE              0x000B  "Assert REN when system controller"
        IbcEOSrd            0x000C  "Terminate reads on EOS"
        IbcEOSwrt           0x000D  "Assert EOI with the EOS character"
        IbcEOScmp           0x000E  "Compare all 8 bits of the EOS character"
        IbcEOSchar          0x000F  "EOS character"
        IbcPP2              0x0010  "Parallel poll mode"
        IbcTIMING           0x0011  "Bus handshake timing"
        IbcReadAdjust       0x0013  "Byte swapping on reads"
        IbcWriteAdjust      0x0014  "Byte swapping on writes"
        IbcSendLLO          0x0017  "Send local lockout on device calls"
        IbcSPollTime        0x0018  "Serial poll timeout"
        IbcPPollTime        0x0019  "Parallel poll duration"
        IbcEndBitIsNormal   0x001A  "Set END on EOS reception"
        IbcUnAddr           0x001B  "Unaddress after device calls"
        IbcHSCableLength    0x001F  "High-speed cable length"
        IbcIst              0x0020  "Individual status bit"
        IbcRsv              0x0021  "Request service status byte"
    }
}
