pub mod generate;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches};
use ranpwd_core::{Case, Config, Format};

/// One output-format switch on the command line.
pub struct FormatFlag {
    pub id: &'static str,
    pub short: Option<char>,
    pub long: Option<&'static str>,
    pub alias: Option<&'static str>,
    pub help: &'static str,
    pub format: Format,
    /// Whether giving this flag also sets the default length to the
    /// format's own default (IP 2, MAC 6, UUID 1).
    pub sets_length: bool,
}

const fn flag(
    id: &'static str,
    short: Option<char>,
    long: Option<&'static str>,
    help: &'static str,
    format: Format,
) -> FormatFlag {
    FormatFlag {
        id,
        short,
        long,
        alias: None,
        help,
        format,
        sets_length: false,
    }
}

/// Format switches. When several are given, the one that appears last on the
/// command line wins.
pub const FORMAT_FLAGS: &[FormatFlag] = &[
    flag("ascii", None, Some("ascii"), "Any printable ASCII characters (default)", Format::Ascii),
    flag("alphanum", Some('a'), Some("alphanum"), "Alphanumeric", Format::Alnum),
    flag("lc_alphanum", Some('l'), Some("lc-alphanum"), "Lower case alphanumeric", Format::LowerAlnum),
    flag("uc_alphanum", Some('u'), Some("uc-alphanum"), "Upper case alphanumeric", Format::UpperAlnum),
    flag("alpha", Some('A'), Some("alpha"), "Alphabetic", Format::Alpha),
    flag("lc_alpha", Some('L'), Some("lc-alpha"), "Lower case alphabetic", Format::LowerAlpha),
    flag("uc_alpha", Some('U'), Some("uc-alpha"), "Upper case alphabetic", Format::UpperAlpha),
    flag("hexadecimal", Some('x'), Some("hexadecimal"), "Lower case hexadecimal number", Format::Hex),
    flag("uc_hexadecimal", Some('X'), None, "Upper case hexadecimal number", Format::UpperHex),
    flag("decimal", Some('d'), Some("decimal"), "Decimal number", Format::Decimal),
    flag("octal", Some('o'), Some("octal"), "Octal number", Format::Octal),
    flag("binary", Some('b'), Some("binary"), "Binary number", Format::Binary),
    FormatFlag {
        sets_length: true,
        ..flag("ip", Some('i'), Some("ip"), "IP address suffix (default length 2)", Format::Ip)
    },
    FormatFlag {
        sets_length: true,
        ..flag(
            "mac_address",
            Some('m'),
            Some("mac-address"),
            "Ethernet MAC address (default length 6)",
            Format::Mac,
        )
    },
    FormatFlag {
        sets_length: true,
        ..flag("uc_mac_address", Some('M'), None, "Upper case Ethernet MAC address", Format::UpperMac)
    },
    FormatFlag {
        alias: Some("guid"),
        sets_length: true,
        ..flag("uuid", Some('g'), Some("uuid"), "UUID/GUID (default length 1)", Format::Uuid)
    },
    FormatFlag {
        alias: Some("uc-guid"),
        sets_length: true,
        ..flag("uc_uuid", Some('G'), Some("uc-uuid"), "Upper case UUID/GUID", Format::UpperUuid)
    },
];

/// clap arguments for every entry in [`FORMAT_FLAGS`].
pub fn format_args() -> impl Iterator<Item = Arg> {
    FORMAT_FLAGS.iter().map(|flag| {
        let mut arg = Arg::new(flag.id)
            .help(flag.help)
            .action(ArgAction::SetTrue);
        if let Some(short) = flag.short {
            arg = arg.short(short);
        }
        if let Some(long) = flag.long {
            arg = arg.long(long);
        }
        if let Some(alias) = flag.alias {
            arg = arg.alias(alias);
        }
        arg
    })
}

/// The flag among `flags` given last on the command line.
fn last_given<'a>(
    matches: &ArgMatches,
    flags: impl Iterator<Item = &'a FormatFlag>,
) -> Option<&'a FormatFlag> {
    flags
        .filter(|flag| matches.value_source(flag.id) == Some(ValueSource::CommandLine))
        .filter_map(|flag| {
            let index = matches.indices_of(flag.id)?.max()?;
            Some((index, flag))
        })
        .max_by_key(|(index, _)| *index)
        .map(|(_, flag)| flag)
}

/// Pick the format flag given last on the command line, or ASCII if none.
pub fn last_format(matches: &ArgMatches) -> Format {
    last_given(matches, FORMAT_FLAGS.iter())
        .map(|flag| flag.format)
        .unwrap_or_default()
}

/// Default length set by the last `-i`/`-m`/`-M`/`-g`/`-G` flag, if any.
///
/// The other format flags leave it alone, so `-i -x` prints 2 hex digits.
pub fn last_default_length(matches: &ArgMatches) -> Option<usize> {
    last_given(matches, FORMAT_FLAGS.iter().filter(|flag| flag.sets_length))
        .map(|flag| flag.format.default_length())
}

/// Everything the command line decided, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub format: Format,
    pub case: Option<Case>,
    /// Length used when no positional length is given; `None` means 8.
    pub default_length: Option<usize>,
    pub lengths: Vec<i64>,
    pub decorate: bool,
    pub secure: bool,
}

impl GenerateOptions {
    /// Validate into a core [`Config`].
    ///
    /// The case modifier picks the case-specific variant. Every positional
    /// length must be at least 1; the last one wins.
    pub fn to_config(&self) -> ranpwd_core::Result<Config> {
        let format = match self.case {
            Some(case) => self.format.with_case(case),
            None => self.format,
        };
        let default_length = self.default_length.unwrap_or(Format::Ascii.default_length());
        let mut config = Config::new(format)
            .with_length(default_length as i64)?
            .decorated(self.decorate)
            .secure(self.secure);
        for &length in &self.lengths {
            config = config.with_length(length)?;
        }
        Ok(config)
    }
}

/// Level label used in diagnostics, e.g. `ranpwd: warning: ...`.
pub fn level_label(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "error",
        log::Level::Warn => "warning",
        log::Level::Info => "info",
        log::Level::Debug => "debug",
        log::Level::Trace => "trace",
    }
}
