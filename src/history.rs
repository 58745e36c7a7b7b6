//! Per-method history assembly over a tracked file's commit lineage.
//!
//! For every method present in the file's latest revision, walks the commit
//! sequence oldest to newest, re-identifies the method at each step, and
//! classifies what changed. Processing is strictly sequential per request:
//! each step's baseline is the previous step's resolved snapshot, and the
//! tracked path may retarget mid-walk when a rename or move is confirmed.

use crate::classify::{classify_transition, ChangeKind};
use crate::config::Config;
use crate::error::LineageError;
use crate::extractor::{MethodExtractor, MethodIdentity, MethodSnapshot};
use crate::git::{CommitMeta, GitRepository};
use crate::matcher::{find_in_methods, resolve_in_commit, ResolvedMethod};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// One recorded transition of a tracked method
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
    /// The newer commit of the transition pair
    pub commit: CommitMeta,
    /// Labels collected for this transition, in detection order
    pub changes: Vec<ChangeKind>,
}

/// A method's identity at the latest revision plus its chronological events
#[derive(Debug, Clone, Serialize)]
pub struct MethodHistory {
    pub identity: MethodIdentity,
    /// Line span of the method in the latest revision
    pub start_line: usize,
    pub end_line: usize,
    /// Events oldest to newest
    pub events: Vec<ChangeEvent>,
}

/// Per-request options for the history walk
#[derive(Default)]
pub struct HistoryOptions {
    pub config: Config,
    /// Checked once per commit pair; a long history multiplies parse work
    /// linearly with commit count times method count, so callers can bail
    /// out.
    pub cancel: Option<CancellationToken>,
}

/// Compute the change timeline of every method present in `file_path` at the
/// repository tip.
///
/// Fails when the repository cannot be read or the tip file is empty or
/// missing; a single unparseable historical revision only degrades that
/// revision (the method appears absent there) without aborting the walk.
/// Output is deterministic for immutable repository state.
pub fn compute_method_histories(
    repo: &GitRepository,
    extractor: &MethodExtractor,
    file_path: &str,
    options: &HistoryOptions,
) -> Result<Vec<MethodHistory>, LineageError> {
    let tip_content = repo.read_file(file_path)?;
    if tip_content.trim().is_empty() {
        return Err(LineageError::EmptyTipFile(file_path.to_string()));
    }

    let methods = extractor.extract_methods(&tip_content);
    let commits = repo.commits_touching(file_path)?;
    tracing::info!(
        "Tracking {} methods in '{}' across {} commits",
        methods.len(),
        file_path,
        commits.len()
    );

    let mut histories = Vec::with_capacity(methods.len());
    for target in methods.iter() {
        histories.push(track_method(repo, extractor, target, &commits, options)?);
    }
    Ok(histories)
}

/// Walk commit pairs (older, newer) in ascending order for one method.
fn track_method(
    repo: &GitRepository,
    extractor: &MethodExtractor,
    target: &MethodSnapshot,
    commits: &[CommitMeta],
    options: &HistoryOptions,
) -> Result<MethodHistory, LineageError> {
    let identity = target.identity();
    let mut events = Vec::new();

    if commits.len() >= 2 {
        // The oldest commit seeds the baseline; its recorded path is the
        // name the file had before any renames we followed backward.
        let mut tracked_path = commits[0].path.clone();
        let oldest_content = repo.read_file_at_commit(&tracked_path, &commits[0].id)?;
        let oldest_methods = extractor.extract_methods(&oldest_content);
        let mut baseline: Option<MethodSnapshot> =
            find_in_methods(&oldest_methods, &identity).cloned();

        for pair in commits.windows(2) {
            if options.cancel.as_ref().is_some_and(|c| c.is_cancelled()) {
                return Err(LineageError::Cancelled);
            }
            let (older, newer) = (&pair[0], &pair[1]);

            let modified = repo.modified_paths_between(&older.id, &newer.id)?;
            let resolved = resolve_in_commit(
                repo,
                extractor,
                &identity,
                baseline.as_ref(),
                &tracked_path,
                &newer.id,
                &modified,
                &options.config,
            )?;

            let current = match resolved {
                ResolvedMethod::Moved {
                    path,
                    snapshot,
                    source_gone,
                } => {
                    // A confirmed relocation is its own event; the transition
                    // is not re-processed through the per-axis classifier.
                    let label = if source_gone {
                        ChangeKind::FileRenamed
                    } else {
                        ChangeKind::MoveFromFile
                    };
                    tracing::debug!(
                        "Method '{}' relocated to '{}' at {}",
                        identity.name,
                        path,
                        newer.id
                    );
                    events.push(ChangeEvent {
                        commit: newer.clone(),
                        changes: vec![label],
                    });
                    tracked_path = path;
                    baseline = Some(snapshot);
                    continue;
                }
                ResolvedMethod::Same(snapshot) => Some(snapshot),
                ResolvedMethod::Absent => None,
            };

            let changes =
                classify_transition(baseline.as_ref(), current.as_ref(), &options.config.thresholds);

            let is_addition = baseline.is_none() && current.is_some();
            let is_modification = baseline.is_some() && !changes.is_empty();
            if is_addition || is_modification {
                events.push(ChangeEvent {
                    commit: newer.clone(),
                    changes,
                });
            }

            // Roll the baseline forward regardless; every step compares
            // against the immediately preceding state.
            baseline = current;
        }
    }

    Ok(MethodHistory {
        identity,
        start_line: target.start_line,
        end_line: target.end_line,
        events,
    })
}
