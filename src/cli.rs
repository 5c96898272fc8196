use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Batch modification of Excel (*.xlsx) files.
///
/// Writes one value into every non-empty cell of a range on the active sheet.
#[derive(Parser, Debug, Default)]
#[command(version, about)]
pub struct Args {
    /// Excel (.xlsx) file path [default: <program>.xlsx next to the executable]
    #[arg(short = 'p', value_name = "FILE")]
    pub path: Option<PathBuf>,

    /// Content to write [default: clipboard text]
    #[arg(short = 'c', value_name = "TEXT", allow_hyphen_values = true)]
    pub content: Option<String>,

    /// Starting cell, format Row:Column [default: 2:5]
    #[arg(short = 's', value_name = "POS", allow_hyphen_values = true)]
    pub start: Option<String>,

    /// Ending cell, format Row:Column [default: :5]
    #[arg(short = 'e', value_name = "POS", allow_hyphen_values = true)]
    pub end: Option<String>,

    /// Write into <name>_Copy.xlsx and leave the original untouched
    #[arg(long)]
    pub copy: bool,

    /// Create a JSON configuration template (skipped if it already exists)
    #[arg(long)]
    pub cc: bool,

    /// JSON configuration file [default: <program>.json next to the executable]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show dialogs: confirm before writing, report the result
    #[arg(short = 't')]
    pub tip: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

/// Long flags historically spelled with a single dash.
const LEGACY_LONG: [&str; 3] = ["copy", "cc", "config"];

/// Flags whose next argument is a value and must not be rewritten.
const TAKES_VALUE: [&str; 6] = ["-p", "-c", "-s", "-e", "--config", "-config"];

/// Rewrite `-copy`, `-cc` and `-config` into their `--` forms so clap can parse them.
///
/// A token directly after a value-taking flag is passed through as is, so
/// `-c -cc` still writes the text "-cc".
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut value_next = false;
    for arg in args {
        if value_next {
            value_next = false;
            out.push(arg);
            continue;
        }
        let rewritten = match arg.to_str() {
            Some(s) => {
                value_next = TAKES_VALUE.contains(&s);
                legacy_to_long(s).map(OsString::from)
            }
            None => None,
        };
        out.push(rewritten.unwrap_or(arg));
    }
    out
}

fn legacy_to_long(arg: &str) -> Option<String> {
    let body = arg.strip_prefix('-')?;
    if body.starts_with('-') {
        return None;
    }
    let name = body.split('=').next().unwrap_or(body);
    if LEGACY_LONG.contains(&name) {
        Some(format!("-{}", arg))
    } else {
        None
    }
}

impl Args {
    pub fn parse_normalized() -> Self {
        Args::parse_from(normalize_legacy_flags(std::env::args_os()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let raw = std::iter::once("batch-excel")
            .chain(args.iter().copied())
            .map(OsString::from);
        Args::try_parse_from(normalize_legacy_flags(raw)).unwrap()
    }

    #[test]
    fn short_flags() {
        let args = parse(&["-p", "book.xlsx", "-c", "done", "-s", "3:1", "-e", ":", "-t"]);
        assert_eq!(args.path, Some(PathBuf::from("book.xlsx")));
        assert_eq!(args.content.as_deref(), Some("done"));
        assert_eq!(args.start.as_deref(), Some("3:1"));
        assert_eq!(args.end.as_deref(), Some(":"));
        assert!(args.tip);
        assert!(!args.copy);
    }

    #[test]
    fn single_dash_long_flags() {
        let args = parse(&["-copy", "-cc", "-config", "conf.json"]);
        assert!(args.copy);
        assert!(args.cc);
        assert_eq!(args.config, Some(PathBuf::from("conf.json")));

        let args = parse(&["-config=other.json"]);
        assert_eq!(args.config, Some(PathBuf::from("other.json")));
    }

    #[test]
    fn double_dash_long_flags() {
        let args = parse(&["--copy", "--config", "conf.json"]);
        assert!(args.copy);
        assert_eq!(args.config, Some(PathBuf::from("conf.json")));
    }

    #[test]
    fn values_are_not_rewritten() {
        let args = parse(&["-c", "-cc", "-s", "-1:"]);
        assert_eq!(args.content.as_deref(), Some("-cc"));
        assert_eq!(args.start.as_deref(), Some("-1:"));
        assert!(!args.cc);
    }

    #[test]
    fn unset_values_stay_empty() {
        let args = parse(&[]);
        assert!(args.path.is_none());
        assert!(args.content.is_none());
        assert!(args.start.is_none());
        assert!(args.end.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(parse(&["-vv"]).verbose, 2);
    }
}
