//! Console rendering for walkthrough results.
//!
//! Every section is a `=== header ===` line followed by one indented line
//! per result. Rendering goes through any [`Write`] so output is testable.

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde_json::Value;

use crate::library::RECENT_ITEMS_LIMIT;
use crate::model::{Collection, Item, Tag};

/// Placeholder for items without a title.
pub const UNTITLED: &str = "(untitled)";

fn title_or_placeholder(item: &Item) -> &str {
    item.title().unwrap_or(UNTITLED)
}

/// Writes a section header, preceded by a blank line unless it is the first.
pub fn write_header<W: Write>(out: &mut W, first: bool, header: &str) -> io::Result<()> {
    if !first {
        writeln!(out)?;
    }
    writeln!(out, "=== {header} ===")
}

/// Recent items: `[itemType] title`.
pub fn write_recent_items<W: Write>(out: &mut W, items: &[Item]) -> io::Result<()> {
    write_header(out, true, &format!("Latest {RECENT_ITEMS_LIMIT} items"))?;
    for item in items {
        writeln!(
            out,
            "  [{}] {}",
            item.data.item_type,
            title_or_placeholder(item)
        )?;
    }
    Ok(())
}

/// Collections: `name  (key=..., items=...)`.
pub fn write_collections<W: Write>(out: &mut W, collections: &[Collection]) -> io::Result<()> {
    write_header(out, false, "Collections")?;
    for collection in collections {
        writeln!(
            out,
            "  {}  (key={}, items={})",
            collection.name(),
            collection.data.key,
            collection.num_items()
        )?;
    }
    Ok(())
}

/// Search results, one title per line.
pub fn write_search_results<W: Write>(out: &mut W, term: &str, items: &[Item]) -> io::Result<()> {
    write_header(out, false, &format!("Search results for '{term}'"))?;
    for item in items {
        writeln!(out, "  {}", title_or_placeholder(item))?;
    }
    Ok(())
}

/// Tags as a bullet list.
pub fn write_tags<W: Write>(out: &mut W, tags: &[Tag]) -> io::Result<()> {
    write_header(out, false, "Tags")?;
    for tag in tags {
        writeln!(out, "  - {}", tag.tag)?;
    }
    Ok(())
}

/// Items of a collection, or a notice when the library has none.
pub fn write_collection_items<W: Write>(
    out: &mut W,
    collection_name: Option<&str>,
    items: &[Item],
) -> io::Result<()> {
    let Some(name) = collection_name else {
        return write_header(out, false, "No collections found");
    };
    write_header(out, false, &format!("Items in collection '{name}'"))?;
    for item in items {
        writeln!(out, "  {}", title_or_placeholder(item))?;
    }
    Ok(())
}

pub fn write_created<W: Write>(out: &mut W, key: &str) -> io::Result<()> {
    write_header(out, false, &format!("Item created (key={key})"))
}

/// Creation failure with the server's failure map rendered as JSON.
pub fn write_create_failed<W: Write>(
    out: &mut W,
    failed: &BTreeMap<String, Value>,
) -> io::Result<()> {
    let detail = serde_json::to_string(failed).unwrap_or_else(|_| format!("{failed:?}"));
    write_header(out, false, &format!("Creating item failed: {detail}"))
}

pub fn write_tag_added<W: Write>(out: &mut W, tag: &str, item_key: &str) -> io::Result<()> {
    write_header(out, false, &format!("Tag '{tag}' added to {item_key}"))
}

pub fn write_trashed<W: Write>(out: &mut W, item_key: &str) -> io::Result<()> {
    write_header(out, false, &format!("Item {item_key} moved to trash"))
}
