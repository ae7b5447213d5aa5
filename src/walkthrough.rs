//! Runs the read examples and then the prompt-gated write examples.
//!
//! This is the only layer that prints or prompts. It drives a [`Library`]
//! façade, renders each result through [`crate::output`] and asks before any
//! call that changes the remote library.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, info};

use crate::client::{ClientError, ZoteroClient};
use crate::library::{CreateOutcome, DEFAULT_SEARCH_TERM, EXAMPLE_TAG, Library};
use crate::output;
use crate::prompt::confirm;

/// Errors that stop a walkthrough.
#[derive(Debug, Error)]
pub enum WalkthroughError {
    /// A remote call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Writing output or reading an answer failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// How the write examples are gated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Ask on the console before each write step.
    #[default]
    Ask,
    /// Run the write examples without asking.
    Always,
    /// Skip the write examples.
    Never,
}

/// Walkthrough settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkthroughOptions {
    pub search_term: String,
    /// Collection to list; the first top-level one when `None`.
    pub collection_key: Option<String>,
    pub write_mode: WriteMode,
    /// Never delete the item created by the write examples.
    pub keep_created: bool,
}

impl Default for WalkthroughOptions {
    fn default() -> Self {
        Self {
            search_term: DEFAULT_SEARCH_TERM.to_string(),
            collection_key: None,
            write_mode: WriteMode::default(),
            keep_created: false,
        }
    }
}

/// What the write examples did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkthroughReport {
    /// Key of the created example item.
    pub created_key: Option<String>,
    pub tagged: bool,
    pub deleted: bool,
}

/// Runs every example in order.
///
/// # Errors
///
/// Stops at the first [`ClientError`] or console I/O error. A rejected item
/// creation is printed and is not an error.
pub async fn run<C, R, W>(
    library: &mut Library<C>,
    options: &WalkthroughOptions,
    input: &mut R,
    out: &mut W,
) -> Result<WalkthroughReport, WalkthroughError>
where
    C: ZoteroClient,
    R: BufRead,
    W: Write,
{
    run_read_examples(library, options, out).await?;

    writeln!(out, "\n--- Write examples ---")?;
    let report = run_write_examples(library, options, input, out).await?;

    writeln!(out, "\nDone!")?;
    info!(?report, "Walkthrough finished");
    Ok(report)
}

/// Runs the read-only examples.
///
/// # Errors
///
/// Stops at the first [`ClientError`] or console I/O error.
pub async fn run_read_examples<C, W>(
    library: &mut Library<C>,
    options: &WalkthroughOptions,
    out: &mut W,
) -> Result<(), WalkthroughError>
where
    C: ZoteroClient,
    W: Write,
{
    let items = library.recent_items().await?;
    output::write_recent_items(out, &items)?;

    let collections = library.top_collections().await?;
    output::write_collections(out, &collections)?;

    let results = library.search(&options.search_term).await?;
    output::write_search_results(out, &options.search_term, &results)?;

    let tags = library.tags().await?;
    output::write_tags(out, &tags)?;

    let listing = library
        .collection_items(options.collection_key.as_deref())
        .await?;
    output::write_collection_items(out, listing.collection_name(), &listing.items)?;

    Ok(())
}

/// Runs create, tag and delete, gated by `options.write_mode`.
///
/// # Errors
///
/// Stops at the first [`ClientError`] or console I/O error.
pub async fn run_write_examples<C, R, W>(
    library: &mut Library<C>,
    options: &WalkthroughOptions,
    input: &mut R,
    out: &mut W,
) -> Result<WalkthroughReport, WalkthroughError>
where
    C: ZoteroClient,
    R: BufRead,
    W: Write,
{
    let mut report = WalkthroughReport::default();

    let proceed = match options.write_mode {
        WriteMode::Never => false,
        WriteMode::Always => true,
        WriteMode::Ask => confirm(input, out, "Also run the write examples?")?,
    };
    if !proceed {
        debug!("Write examples skipped");
        return Ok(report);
    }

    let key = match library.create_example_item().await? {
        CreateOutcome::Created { key } => {
            output::write_created(out, &key)?;
            key
        }
        CreateOutcome::Failed { failed } => {
            output::write_create_failed(out, &failed)?;
            return Ok(report);
        }
    };
    report.created_key = Some(key.clone());

    library.add_example_tag(&key).await?;
    output::write_tag_added(out, EXAMPLE_TAG, &key)?;
    report.tagged = true;

    let delete = if options.keep_created {
        false
    } else {
        match options.write_mode {
            WriteMode::Ask => confirm(input, out, "Delete the test item again?")?,
            WriteMode::Always => true,
            WriteMode::Never => false,
        }
    };
    if delete {
        library.delete_item(&key).await?;
        output::write_trashed(out, &key)?;
        report.deleted = true;
    }

    Ok(report)
}
