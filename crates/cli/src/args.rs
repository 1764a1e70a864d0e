//! CLI argument definitions via clap derive.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use kagi_core::ConfigOverrides;

/// Long flags that may be written Go-style with a single dash, and whether they take a value.
const SINGLE_DASH_FLAGS: &[(&str, bool)] =
    &[("kagi_api_key", true), ("cache_dir", true), ("config", true), ("verbose", false), ("help", false)];

/// Command-line arguments for `kagi`.
#[derive(Debug, Parser)]
#[command(name = "kagi", about = "Ask Kagi FastGPT a question from the command line", version)]
pub struct Cli {
    /// API key to use with the Kagi FastGPT API [default: $KAGI_API_KEY].
    #[arg(long = "kagi_api_key", visible_alias = "kagi-api-key", value_name = "KEY")]
    pub kagi_api_key: Option<String>,

    /// Directory to cache answers in. If not set, answers are not cached.
    #[arg(long = "cache_dir", visible_alias = "cache-dir", value_name = "DIR")]
    pub cache_dir: Option<String>,

    /// Log the request before it is sent.
    #[arg(long)]
    pub verbose: bool,

    /// TOML config file [default: $KAGI_CONFIG_FILE].
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Query text. Read from standard input when omitted.
    #[arg(value_name = "QUERY", trailing_var_arg = true, allow_hyphen_values = true)]
    pub query: Vec<String>,
}

impl Cli {
    /// Configuration values set on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_key: self.kagi_api_key.clone(),
            cache_dir: self.cache_dir.as_ref().map(PathBuf::from),
            config_file: self.config.clone(),
        }
    }
}

/// Rewrite Go-style `-flag` / `-flag=value` long flags to `--flag`.
///
/// Only known flags are rewritten, and only before the first positional
/// argument or `--`, so query words are passed through untouched.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut iter = args.into_iter().map(Into::into);
    let mut out: Vec<OsString> = iter.next().into_iter().collect();
    let mut expect_value = false;

    for arg in iter.by_ref() {
        if expect_value {
            expect_value = false;
            out.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            out.push(arg);
            break;
        };

        if text == "--" {
            out.push(arg);
            break;
        }

        if let Some(long) = text.strip_prefix("--") {
            expect_value = takes_separate_value(long);
            out.push(arg);
        } else if let Some(short) = text.strip_prefix('-')
            && !short.is_empty()
        {
            if is_known_flag(short) {
                expect_value = takes_separate_value(short);
                out.push(format!("-{text}").into());
            } else {
                out.push(arg);
            }
        } else {
            out.push(arg);
            break;
        }
    }

    out.extend(iter);
    out
}

fn flag_name(flag: &str) -> &str {
    flag.split_once('=').map_or(flag, |(name, _)| name)
}

fn is_known_flag(flag: &str) -> bool {
    let name = flag_name(flag).replace('-', "_");
    SINGLE_DASH_FLAGS.iter().any(|(known, _)| *known == name)
}

fn takes_separate_value(flag: &str) -> bool {
    if flag.contains('=') {
        return false;
    }
    let name = flag.replace('-', "_");
    SINGLE_DASH_FLAGS.iter().any(|(known, takes_value)| *known == name && *takes_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(args: &[&str]) -> Vec<String> {
        normalize_flags(args.iter().copied())
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(normalize_flags(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_go_style_flags_rewritten() {
        assert_eq!(
            normalize(&["kagi", "-kagi_api_key", "k", "-cache_dir=/tmp/c", "-verbose", "what", "is", "rust"]),
            vec!["kagi", "--kagi_api_key", "k", "--cache_dir=/tmp/c", "--verbose", "what", "is", "rust"]
        );
    }

    #[test]
    fn test_go_style_dashed_aliases_rewritten() {
        assert_eq!(
            normalize(&["kagi", "-cache-dir", "/tmp/c", "-kagi-api-key=k", "q"]),
            vec!["kagi", "--cache-dir", "/tmp/c", "--kagi-api-key=k", "q"]
        );

        let cli = parse(&["kagi", "-cache-dir", "/tmp/c", "-kagi-api-key", "k", "what", "is", "rust"]);
        assert_eq!(cli.cache_dir.as_deref(), Some("/tmp/c"));
        assert_eq!(cli.kagi_api_key.as_deref(), Some("k"));
        assert_eq!(cli.query, vec!["what", "is", "rust"]);
    }

    #[test]
    fn test_query_words_untouched() {
        assert_eq!(
            normalize(&["kagi", "explain", "-verbose", "flags"]),
            vec!["kagi", "explain", "-verbose", "flags"]
        );
        assert_eq!(normalize(&["kagi", "--", "-verbose"]), vec!["kagi", "--", "-verbose"]);
    }

    #[test]
    fn test_flag_values_not_rewritten() {
        assert_eq!(
            normalize(&["kagi", "-cache_dir", "-verbose", "q"]),
            vec!["kagi", "--cache_dir", "-verbose", "q"]
        );
        assert_eq!(normalize(&["kagi", "--cache-dir", "-verbose", "q"]), vec!["kagi", "--cache-dir", "-verbose", "q"]);
    }

    #[test]
    fn test_unknown_single_dash_passed_through() {
        assert_eq!(normalize(&["kagi", "-V"]), vec!["kagi", "-V"]);
        assert_eq!(normalize(&["kagi", "-bogus", "q"]), vec!["kagi", "-bogus", "q"]);
    }

    #[test]
    fn test_parse_positional_query() {
        let cli = parse(&["kagi", "-verbose", "capital", "of", "France"]);
        assert!(cli.verbose);
        assert_eq!(cli.query, vec!["capital", "of", "France"]);
        assert!(cli.kagi_api_key.is_none());
        assert!(cli.cache_dir.is_none());
    }

    #[test]
    fn test_parse_hyphen_words_after_query() {
        let cli = parse(&["kagi", "what", "does", "-rf", "do"]);
        assert_eq!(cli.query, vec!["what", "does", "-rf", "do"]);
    }

    #[test]
    fn test_parse_no_query() {
        let cli = parse(&["kagi", "-kagi_api_key", "secret"]);
        assert!(cli.query.is_empty());
        assert_eq!(cli.kagi_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_overrides() {
        let cli = parse(&["kagi", "-cache_dir", "", "--config", "kagi.toml", "q"]);
        let overrides = cli.overrides();
        assert_eq!(overrides.cache_dir, Some(PathBuf::new()));
        assert_eq!(overrides.config_file, Some(PathBuf::from("kagi.toml")));
        assert!(overrides.api_key.is_none());
    }

    #[test]
    fn test_unknown_flag_is_error() {
        let result = Cli::try_parse_from(normalize_flags(["kagi", "--bogus", "q"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_help_is_not_an_error_stream() {
        let err = Cli::try_parse_from(normalize_flags(["kagi", "-help"])).unwrap_err();
        assert!(!err.use_stderr());
    }
}
