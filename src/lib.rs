//! Zotero Examples Core Library
//!
//! A guided tour of a Zotero library through the Zotero Web API: recent
//! items, collections, quick search, tags, collection contents, and a
//! create/tag/trash round trip on a throwaway item.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Library identity and credentials
//! - [`model`] - Items, collections, tags and write responses
//! - [`client`] - The [`ZoteroClient`] capability and its HTTP implementation
//! - [`library`] - The [`Library`] façade with one method per example
//! - [`output`] - Console rendering of results
//! - [`prompt`] - Yes/no confirmation
//! - [`walkthrough`] - Sequencing of read and prompt-gated write examples

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod library;
pub mod model;
pub mod output;
pub mod prompt;
pub mod walkthrough;

mod user_agent;

// Re-export commonly used types
pub use client::{ClientError, DEFAULT_BASE_URL, ZoteroClient, ZoteroHttpClient};
pub use config::{ConfigError, LibraryConfig, LibraryType};
pub use library::{CollectionListing, CreateOutcome, Library};
pub use model::{Collection, CreateResponse, Item, ItemData, ItemTemplate, Tag};
pub use walkthrough::{WalkthroughError, WalkthroughOptions, WalkthroughReport, WriteMode};
