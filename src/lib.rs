//! # Method Lineage - Per-Method Change History Mining
//!
//! Mines the evolution of individual methods inside a Java source file
//! across a git history, producing per method a chronological list of
//! commits that meaningfully changed it along with a classification of how
//! it changed (parameters, return type, modifiers, exceptions, body,
//! annotations, signature, rename/move, introduction, deletion).
//!
//! ## Overview
//!
//! The engine walks a file's first-parent commit lineage (following renames
//! backward), extracts structural method snapshots from each revision with
//! tree-sitter, re-identifies every tracked method in the next revision
//! (exact structural match first, fuzzy cross-file search second), and runs
//! a set of independent change detectors over each aligned snapshot pair.
//! Comparisons are purely syntactic; fuzzy decisions use Jaro-Winkler
//! similarity with a Levenshtein tie-break.
//!
//! ## Modules
//!
//! - [`similarity`]: Jaro-Winkler and Levenshtein primitives
//! - [`extractor`]: structural method extraction with a content-keyed parse cache
//! - [`git`]: repository access (commit lineage, revision content, tree diffs)
//! - [`matcher`]: method re-identification across revisions and files
//! - [`classify`]: per-axis change detection and the label vocabulary
//! - [`history`]: the commit-by-commit history assembler
//! - [`files`]: source file discovery glue
//! - [`config`]: thresholds and options with TOML/env loading
//! - [`error`]: error types
//!
//! ## Usage Example
//!
//! ```no_run
//! use method_lineage::extractor::MethodExtractor;
//! use method_lineage::git::GitRepository;
//! use method_lineage::history::{compute_method_histories, HistoryOptions};
//!
//! fn main() -> anyhow::Result<()> {
//!     let repo = GitRepository::open("/path/to/repo")?;
//!     let extractor = MethodExtractor::new();
//!     let histories = compute_method_histories(
//!         &repo,
//!         &extractor,
//!         "src/main/java/com/example/Service.java",
//!         &HistoryOptions::default(),
//!     )?;
//!     for history in histories {
//!         println!("{}: {} events", history.identity.name, history.events.len());
//!     }
//!     Ok(())
//! }
//! ```

/// Per-axis change detection and the change label vocabulary
pub mod classify;

/// Similarity thresholds and runtime options
pub mod config;

/// Error types and utilities
pub mod error;

/// Structural method extraction from Java source
pub mod extractor;

/// Source file discovery under a repository root
pub mod files;

/// Git repository access
pub mod git;

/// Commit-by-commit history assembly
pub mod history;

/// Method re-identification across revisions
pub mod matcher;

/// Jaro-Winkler and Levenshtein similarity primitives
pub mod similarity;
