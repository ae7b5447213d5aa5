//! CLI argument definitions using clap derive macros.

use clap::Parser;

use zotero_examples_core::library::DEFAULT_SEARCH_TERM;
use zotero_examples_core::{DEFAULT_BASE_URL, WalkthroughOptions, WriteMode};

/// Walk through the main read and write operations of a Zotero library.
///
/// Credentials come from ZOTERO_LIBRARY_ID, ZOTERO_API_KEY and
/// ZOTERO_LIBRARY_TYPE (default "user"), optionally set in a .env file.
#[derive(Parser, Debug)]
#[command(name = "zotero-examples")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Search term for the quick-search example
    #[arg(short, long, default_value = DEFAULT_SEARCH_TERM)]
    pub search: String,

    /// Collection key for the collection example (first top-level collection if omitted)
    #[arg(long, value_name = "KEY")]
    pub collection: Option<String>,

    /// Run the write examples without asking
    #[arg(long, conflicts_with = "no_write")]
    pub write: bool,

    /// Skip the write examples without asking
    #[arg(long)]
    pub no_write: bool,

    /// Keep the created example item instead of deleting it
    #[arg(long)]
    pub keep: bool,

    /// Zotero API base URL
    #[arg(long, env = "ZOTERO_BASE_URL", default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,
}

impl Args {
    /// Write gating selected by `--write` / `--no-write`.
    pub fn write_mode(&self) -> WriteMode {
        if self.write {
            WriteMode::Always
        } else if self.no_write {
            WriteMode::Never
        } else {
            WriteMode::Ask
        }
    }

    /// Walkthrough settings from the parsed flags.
    pub fn walkthrough_options(&self) -> WalkthroughOptions {
        WalkthroughOptions {
            search_term: self.search.clone(),
            collection_key: self.collection.clone(),
            write_mode: self.write_mode(),
            keep_created: self.keep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["zotero-examples"]).unwrap();
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert_eq!(args.search, "medicine");
        assert_eq!(args.collection, None);
        assert_eq!(args.write_mode(), WriteMode::Ask);
        assert!(!args.keep);
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["zotero-examples", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_search_flag_overrides_term() {
        let args = Args::try_parse_from(["zotero-examples", "-s", "test"]).unwrap();
        assert_eq!(args.walkthrough_options().search_term, "test");
    }

    #[test]
    fn test_cli_collection_flag() {
        let args = Args::try_parse_from(["zotero-examples", "--collection", "COL001"]).unwrap();
        assert_eq!(
            args.walkthrough_options().collection_key.as_deref(),
            Some("COL001")
        );
    }

    #[test]
    fn test_cli_write_modes() {
        let args = Args::try_parse_from(["zotero-examples", "--write", "--keep"]).unwrap();
        let options = args.walkthrough_options();
        assert_eq!(options.write_mode, WriteMode::Always);
        assert!(options.keep_created);

        let args = Args::try_parse_from(["zotero-examples", "--no-write"]).unwrap();
        assert_eq!(args.write_mode(), WriteMode::Never);
    }

    #[test]
    fn test_cli_write_and_no_write_conflict() {
        let result = Args::try_parse_from(["zotero-examples", "--write", "--no-write"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let result = Args::try_parse_from(["zotero-examples", "--invalid-flag"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let result = Args::try_parse_from(["zotero-examples", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
