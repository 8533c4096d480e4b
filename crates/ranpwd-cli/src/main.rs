//! CLI for ranpwd — random passwords, numbers and identifiers from the OS entropy device.

mod commands;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, FromArgMatches, Parser};
use ranpwd_core::{Case, EntropyConfig};

const PROGRAM: &str = "ranpwd";

// Format switches (`-a`, `-x`, `-g`, ...) are added from
// `commands::FORMAT_FLAGS` by `cli()` and resolved from the matches.
#[derive(Parser)]
#[command(name = "ranpwd")]
#[command(about = "ranpwd — random passwords, numbers and identifiers from the OS entropy device")]
#[command(version = ranpwd_core::VERSION)]
#[command(args_override_self = true)]
struct Cli {
    /// Upper case variant of the selected format
    #[arg(long, overrides_with = "lower")]
    upper: bool,

    /// Lower case variant of the selected format
    #[arg(long, overrides_with = "upper")]
    lower: bool,

    /// C language constant (0x prefix, leading 0, or quoted string)
    #[arg(short = 'c', long)]
    decorate: bool,

    /// Slower but more secure: read the blocking entropy device
    #[arg(short = 's', long)]
    secure: bool,

    /// Read entropy from this device instead of the platform default
    #[arg(long, hide = true, value_name = "PATH")]
    device: Option<PathBuf>,

    /// Output length; its unit depends on the format (last one wins)
    #[arg(value_name = "LENGTH", allow_negative_numbers = true)]
    lengths: Vec<i64>,
}

impl Cli {
    fn case(&self) -> Option<Case> {
        if self.upper {
            Some(Case::Upper)
        } else if self.lower {
            Some(Case::Lower)
        } else {
            None
        }
    }

    fn entropy_config(&self) -> EntropyConfig {
        match &self.device {
            Some(path) => EntropyConfig::with_device(path),
            None => EntropyConfig::default(),
        }
    }
}

fn cli() -> clap::Command {
    Cli::command().args(commands::format_args())
}

fn parse_options(
    matches: &clap::ArgMatches,
) -> Result<(commands::GenerateOptions, EntropyConfig), clap::Error> {
    let cli = Cli::from_arg_matches(matches)?;
    let options = commands::GenerateOptions {
        format: commands::last_format(matches),
        case: cli.case(),
        default_length: commands::last_default_length(matches),
        lengths: cli.lengths.clone(),
        decorate: cli.decorate,
        secure: cli.secure,
    };
    Ok((options, cli.entropy_config()))
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{PROGRAM}: {}: {}",
                commands::level_label(record.level()),
                record.args()
            )
        })
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let matches = cli().get_matches();
    let (options, entropy_config) = match parse_options(&matches) {
        Ok(parsed) => parsed,
        Err(e) => e.exit(),
    };

    match commands::generate::run(&options, &entropy_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{PROGRAM}: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranpwd_core::Format;

    fn parse(args: &[&str]) -> commands::GenerateOptions {
        let argv = std::iter::once(PROGRAM).chain(args.iter().copied());
        let matches = cli().try_get_matches_from(argv).unwrap();
        parse_options(&matches).unwrap().0
    }

    #[test]
    fn test_cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn test_no_flags_is_ascii() {
        let opts = parse(&[]);
        assert_eq!(opts.format, Format::Ascii);
        assert_eq!(opts.to_config().unwrap().length(), 8);
    }

    #[test]
    fn test_short_flags() {
        assert_eq!(parse(&["-a"]).format, Format::Alnum);
        assert_eq!(parse(&["-A"]).format, Format::Alpha);
        assert_eq!(parse(&["-x"]).format, Format::Hex);
        assert_eq!(parse(&["-X"]).format, Format::UpperHex);
        assert_eq!(parse(&["-M"]).format, Format::UpperMac);
        assert_eq!(parse(&["-G"]).format, Format::UpperUuid);
    }

    #[test]
    fn test_uuid_aliases() {
        assert_eq!(parse(&["--guid"]).format, Format::Uuid);
        assert_eq!(parse(&["--uc-guid"]).format, Format::UpperUuid);
    }

    #[test]
    fn test_last_format_flag_wins() {
        assert_eq!(parse(&["-x", "-d"]).format, Format::Decimal);
        assert_eq!(parse(&["-d", "-x"]).format, Format::Hex);
        assert_eq!(parse(&["--mac-address", "--ascii"]).format, Format::Ascii);
    }

    #[test]
    fn test_repeated_format_flag_uses_last_occurrence() {
        assert_eq!(parse(&["-d", "-x", "-d"]).format, Format::Decimal);
        assert_eq!(parse(&["-x", "-d", "-x"]).format, Format::Hex);
        assert_eq!(parse(&["-a", "-a"]).format, Format::Alnum);
    }

    #[test]
    fn test_repeated_switches_accepted() {
        let opts = parse(&["-c", "-c", "-s", "-s"]);
        assert!(opts.decorate);
        assert!(opts.secure);
    }

    #[test]
    fn test_repeated_case_modifier_uses_last_occurrence() {
        assert_eq!(parse(&["--upper", "--lower", "--upper"]).case, Some(Case::Upper));
        assert_eq!(parse(&["--lower", "--upper", "--lower"]).case, Some(Case::Lower));
    }

    #[test]
    fn test_length_setting_flag_keeps_length_across_format_change() {
        let config = parse(&["-i", "-x"]).to_config().unwrap();
        assert_eq!(config.format(), Format::Hex);
        assert_eq!(config.length(), 2);

        assert_eq!(parse(&["-m", "-g"]).to_config().unwrap().length(), 1);
        assert_eq!(parse(&["-g", "-a", "-m"]).to_config().unwrap().length(), 6);
        assert_eq!(parse(&["-x"]).to_config().unwrap().length(), 8);
        assert_eq!(parse(&["-i", "-x", "5"]).to_config().unwrap().length(), 5);
    }

    #[test]
    fn test_last_case_modifier_wins() {
        let opts = parse(&["--alphanum", "--upper", "--lower"]);
        assert_eq!(opts.case, Some(Case::Lower));
        assert_eq!(opts.to_config().unwrap().format(), Format::LowerAlnum);
    }

    #[test]
    fn test_upper_hex_via_modifier() {
        let opts = parse(&["--hexadecimal", "--upper", "16"]);
        let config = opts.to_config().unwrap();
        assert_eq!(config.format(), Format::UpperHex);
        assert_eq!(config.length(), 16);
    }

    #[test]
    fn test_decorate_and_secure() {
        let opts = parse(&["-c", "-s", "-o"]);
        assert!(opts.decorate);
        assert!(opts.secure);
        assert_eq!(opts.format, Format::Octal);
    }

    #[test]
    fn test_lengths_collected_in_order() {
        assert_eq!(parse(&["-d", "4", "12"]).lengths, vec![4, 12]);
    }

    #[test]
    fn test_negative_length_parses_then_fails_validation() {
        let opts = parse(&["-1"]);
        assert!(opts.to_config().is_err());
    }

    #[test]
    fn test_non_numeric_length_rejected_by_parser() {
        let argv = [PROGRAM, "abc"];
        assert!(cli().try_get_matches_from(argv).is_err());
    }
}
