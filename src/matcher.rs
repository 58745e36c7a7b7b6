//! Re-identification of a tracked method in the next revision.
//!
//! Two-tier resolution: an exact structural (name, parameter-list) match in
//! the tracked path first, then a fuzzy cross-file scan over the commit's
//! modified source files. The exact tier keeps the common persists-in-place
//! case cheap; the fuzzy tier only runs when the method vanished from its
//! file.

use crate::config::Config;
use crate::error::RepoError;
use crate::extractor::{MethodExtractor, MethodIdentity, MethodSnapshot};
use crate::git::GitRepository;
use crate::similarity::jaro_winkler;

/// Where a tracked method ended up at one commit
#[derive(Debug, Clone)]
pub enum ResolvedMethod {
    /// Same identity found in the tracked path
    Same(MethodSnapshot),
    /// Found in a different file via signature + body similarity
    Moved {
        path: String,
        snapshot: MethodSnapshot,
        /// True when the tracked path no longer exists at this commit,
        /// i.e. the whole file was renamed rather than the method moving
        /// out of a surviving file.
        source_gone: bool,
    },
    /// Not present anywhere we looked; candidate for deletion
    Absent,
}

/// First exact (name, parameter-list) match, else the first method with the
/// same name. Declaration order breaks ties both ways, so duplicate
/// identities bind to the earliest declaration.
///
/// The same-name fallback is what keeps a method aligned across its own
/// signature edits: adding a parameter changes the identity key, and
/// without the fallback every parameter change would surface as a
/// delete-plus-introduce instead of a `Parameter Change`.
pub fn find_in_methods<'a>(
    methods: &'a [MethodSnapshot],
    identity: &MethodIdentity,
) -> Option<&'a MethodSnapshot> {
    methods
        .iter()
        .find(|m| m.name == identity.name && m.params == identity.params)
        .or_else(|| methods.iter().find(|m| m.name == identity.name))
}

/// Locate `identity` at `commit_id`, starting from the tracked path and
/// falling back to a fuzzy search across the commit's modified files.
///
/// The fuzzy tier requires exact signature equality on raw pre-body text
/// (no normalization; reformatting defeats it on purpose, the exact tier
/// already covers reformatted-in-place methods) plus body similarity at or
/// above the configured move threshold. The first candidate in iteration
/// order wins.
pub fn resolve_in_commit(
    repo: &GitRepository,
    extractor: &MethodExtractor,
    identity: &MethodIdentity,
    baseline: Option<&MethodSnapshot>,
    tracked_path: &str,
    commit_id: &str,
    modified_paths: &[String],
    config: &Config,
) -> Result<ResolvedMethod, RepoError> {
    let content = repo.read_file_at_commit(tracked_path, commit_id)?;
    let methods = extractor.extract_methods(&content);
    if let Some(found) = find_in_methods(&methods, identity) {
        return Ok(ResolvedMethod::Same(found.clone()));
    }

    // No structural match locally; hunt across the commit's other files.
    let Some(baseline) = baseline else {
        return Ok(ResolvedMethod::Absent);
    };
    if baseline.signature.is_empty() || baseline.body.is_empty() {
        return Ok(ResolvedMethod::Absent);
    }

    for path in modified_paths {
        if path == tracked_path || !path.ends_with(&config.source_extension) {
            continue;
        }
        let candidate_content = match repo.read_file_at_commit(path, commit_id) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!("Skipping unreadable candidate '{}': {}", path, err);
                continue;
            }
        };
        if candidate_content.is_empty() {
            continue;
        }
        for candidate in extractor.extract_methods(&candidate_content).iter() {
            if candidate.signature != baseline.signature {
                continue;
            }
            let similarity = jaro_winkler(&baseline.body, &candidate.body);
            if similarity >= config.thresholds.move_body_similarity {
                tracing::debug!(
                    "Method '{}' matched in '{}' with body similarity {:.2}",
                    identity.name,
                    path,
                    similarity
                );
                return Ok(ResolvedMethod::Moved {
                    path: path.clone(),
                    snapshot: candidate.clone(),
                    source_gone: content.is_empty(),
                });
            }
        }
    }

    Ok(ResolvedMethod::Absent)
}
