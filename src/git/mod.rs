//! Git repository access for the history walk
//!
//! Thin accessor over libgit2: commit lineage for a tracked path (first
//! parent only, renames followed backward), file content at arbitrary
//! commits, and tree diffs between commit pairs.

mod repo;

pub use repo::{CommitMeta, GitRepository};
