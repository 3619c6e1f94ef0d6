//!
//! Fixed mnemonic tables of the NI-488.2 API.
//!
//! Every table is an immutable enum whose discriminants are the vendor codes;
//! name lookups are linear scans over [`ALL`](ErrorCode::ALL).
//!

macro_rules! consts_to_enum {
    {
        #[repr($repr:ident)]
        $(#[$metas:meta])*
        pub enum $enum_id:ident {
            $($variant:ident $value:literal $des:literal)*
        }
    } => {
        $(#[$metas])*
        #[repr($repr)]
        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        #[derive(
            num_enum::TryFromPrimitive, num_enum::IntoPrimitive,
            Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash,
        )]
        pub enum $enum_id {
            $(
                #[doc=$des]
                $variant = $value
            ),*
        }

        impl $enum_id {
            /// Every entry of the table, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Mnemonic as spelled in the vendor headers
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            pub fn description(&self) -> &'static str {
                match self {
                    $(Self::$variant => $des),*
                }
            }

            /// `"<MNEMONIC>: <description>"`
            pub fn message(&self) -> &'static str {
                match self {
                    $(Self::$variant => concat!(stringify!($variant), ": ", $des)),*
                }
            }

            /// Exact, case-sensitive lookup by mnemonic
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|x| x.name() == name)
            }
        }

        impl ::std::fmt::Display for $enum_id {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.message())
            }
        }
    };
}

pub mod error;
pub mod option;
pub mod timeout;

pub use error::ErrorCode;
pub use option::ConfigOption;
pub use timeout::Timeout;
