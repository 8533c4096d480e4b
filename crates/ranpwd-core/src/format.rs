//! Output kinds and their static properties.
//!
//! A [`Format`] names both the character class and, where it matters, the
//! case. Case-specific kinds are separate variants rather than a fold applied
//! afterwards, because their rejection rules differ: lower-case ASCII throws
//! uppercase letters away instead of lowering them.

use std::str::FromStr;

use crate::error::Error;

/// Case modifier requested alongside a base format (`--lower` / `--upper`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    Lower,
    Upper,
}

impl std::fmt::Display for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lower => write!(f, "lower"),
            Self::Upper => write!(f, "upper"),
        }
    }
}

/// Selectable output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// Any printable ASCII character (0x21–0x7e).
    #[default]
    Ascii,
    /// Printable ASCII without uppercase letters.
    LowerAscii,
    /// Printable ASCII without lowercase letters.
    UpperAscii,
    /// Letters and digits.
    Alnum,
    /// Lowercase letters and digits.
    LowerAlnum,
    /// Uppercase letters and digits.
    UpperAlnum,
    /// Letters only.
    Alpha,
    /// Lowercase letters only.
    LowerAlpha,
    /// Uppercase letters only.
    UpperAlpha,
    /// Lowercase hexadecimal digits.
    Hex,
    /// Uppercase hexadecimal digits.
    UpperHex,
    /// Decimal digits.
    Decimal,
    /// Octal digits.
    Octal,
    /// Binary digits, low bit of each byte first.
    Binary,
    /// Dotted IPv4 suffix (e.g. `37.201`).
    Ip,
    /// Locally administered unicast MAC address, lowercase.
    Mac,
    /// Locally administered unicast MAC address, uppercase.
    UpperMac,
    /// Version 4 UUID, lowercase.
    Uuid,
    /// Version 4 UUID, uppercase.
    UpperUuid,
}

/// How a format is wrapped when decoration is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    /// Prefixed with a radix marker (`0x`, `0`), no suffix.
    Prefix(&'static str),
    /// Handled by the encoder itself (decimal drops its leading zeros).
    Inline,
    /// Wrapped in double quotes with `"`, `'` and `\` escaped.
    Quoted,
}

impl Decoration {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Prefix(p) => p,
            Self::Inline => "",
            Self::Quoted => "\"",
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Quoted => "\"",
            Self::Prefix(_) | Self::Inline => "",
        }
    }

    /// Whether characters emitted inside the decoration need C escaping.
    pub fn escapes(self) -> bool {
        matches!(self, Self::Quoted)
    }
}

impl Format {
    /// Every format, in declaration order.
    pub const ALL: [Format; 19] = [
        Self::Ascii,
        Self::LowerAscii,
        Self::UpperAscii,
        Self::Alnum,
        Self::LowerAlnum,
        Self::UpperAlnum,
        Self::Alpha,
        Self::LowerAlpha,
        Self::UpperAlpha,
        Self::Hex,
        Self::UpperHex,
        Self::Decimal,
        Self::Octal,
        Self::Binary,
        Self::Ip,
        Self::Mac,
        Self::UpperMac,
        Self::Uuid,
        Self::UpperUuid,
    ];

    /// Canonical short name, accepted back by [`Format::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::LowerAscii => "lc-ascii",
            Self::UpperAscii => "uc-ascii",
            Self::Alnum => "alphanum",
            Self::LowerAlnum => "lc-alphanum",
            Self::UpperAlnum => "uc-alphanum",
            Self::Alpha => "alpha",
            Self::LowerAlpha => "lc-alpha",
            Self::UpperAlpha => "uc-alpha",
            Self::Hex => "hex",
            Self::UpperHex => "uc-hex",
            Self::Decimal => "decimal",
            Self::Octal => "octal",
            Self::Binary => "binary",
            Self::Ip => "ip",
            Self::Mac => "mac",
            Self::UpperMac => "uc-mac",
            Self::Uuid => "uuid",
            Self::UpperUuid => "uc-uuid",
        }
    }

    /// Select the case-specific variant of a base format.
    ///
    /// Only the base kinds (`Ascii`, `Alnum`, `Alpha`, `Hex`, `Mac`, `Uuid`)
    /// react. Hex, MAC and UUID are already lowercase, so `Lower` leaves them
    /// alone. Formats that are already case-specific or have no letters are
    /// returned unchanged.
    pub fn with_case(self, case: Case) -> Self {
        match (self, case) {
            (Self::Ascii, Case::Lower) => Self::LowerAscii,
            (Self::Ascii, Case::Upper) => Self::UpperAscii,
            (Self::Alnum, Case::Lower) => Self::LowerAlnum,
            (Self::Alnum, Case::Upper) => Self::UpperAlnum,
            (Self::Alpha, Case::Lower) => Self::LowerAlpha,
            (Self::Alpha, Case::Upper) => Self::UpperAlpha,
            (Self::Hex, Case::Upper) => Self::UpperHex,
            (Self::Mac, Case::Upper) => Self::UpperMac,
            (Self::Uuid, Case::Upper) => Self::UpperUuid,
            (other, _) => other,
        }
    }

    /// Unit count used when the caller gives no explicit length.
    pub fn default_length(self) -> usize {
        match self {
            Self::Ip => 2,
            Self::Mac | Self::UpperMac => 6,
            Self::Uuid | Self::UpperUuid => 1,
            _ => 8,
        }
    }

    pub fn decoration(self) -> Decoration {
        match self {
            Self::Hex | Self::UpperHex => Decoration::Prefix("0x"),
            Self::Octal => Decoration::Prefix("0"),
            Self::Decimal => Decoration::Inline,
            _ => Decoration::Quoted,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(format) = Self::ALL.iter().find(|f| f.name() == s) {
            return Ok(*format);
        }
        match s {
            "alnum" => Ok(Self::Alnum),
            "hexadecimal" => Ok(Self::Hex),
            "mac-address" => Ok(Self::Mac),
            "guid" => Ok(Self::Uuid),
            "uc-guid" => Ok(Self::UpperUuid),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}
