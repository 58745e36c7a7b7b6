//! Change classification between two structural snapshots of a method.
//!
//! Each axis is an independent pure check contributing at most one label;
//! the classifier composes them in table order with no dispatch machinery.
//! Exact structural comparison decides the cheap axes, Jaro-Winkler (with a
//! Levenshtein tie-break for signatures) decides the fuzzy ones.

use crate::config::Thresholds;
use crate::extractor::MethodSnapshot;
use crate::similarity::{jaro_winkler, levenshtein};
use serde::Serialize;
use std::fmt;

/// Fixed vocabulary of change labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeKind {
    #[serde(rename = "Parameter Change")]
    ParameterChange,
    #[serde(rename = "Return Type Change")]
    ReturnTypeChange,
    #[serde(rename = "Modifier Change")]
    ModifierChange,
    #[serde(rename = "Exceptions Change")]
    ExceptionsChange,
    #[serde(rename = "Body Change")]
    BodyChange,
    #[serde(rename = "Annotation Change")]
    AnnotationChange,
    #[serde(rename = "Signature Change")]
    SignatureChange,
    #[serde(rename = "File Renamed")]
    FileRenamed,
    #[serde(rename = "MoveFromFile")]
    MoveFromFile,
    Introduced,
    Deleted,
    MultiChange,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::ParameterChange => "Parameter Change",
            ChangeKind::ReturnTypeChange => "Return Type Change",
            ChangeKind::ModifierChange => "Modifier Change",
            ChangeKind::ExceptionsChange => "Exceptions Change",
            ChangeKind::BodyChange => "Body Change",
            ChangeKind::AnnotationChange => "Annotation Change",
            ChangeKind::SignatureChange => "Signature Change",
            ChangeKind::FileRenamed => "File Renamed",
            ChangeKind::MoveFromFile => "MoveFromFile",
            ChangeKind::Introduced => "Introduced",
            ChangeKind::Deleted => "Deleted",
            ChangeKind::MultiChange => "MultiChange",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count or any positional descriptor text differs
pub fn parameters_changed(old: &MethodSnapshot, new: &MethodSnapshot) -> bool {
    old.params.len() != new.params.len()
        || old.params.iter().zip(&new.params).any(|(a, b)| a != b)
}

/// Return-type text differs; empty is a valid value (constructors)
pub fn return_type_changed(old: &MethodSnapshot, new: &MethodSnapshot) -> bool {
    old.return_type != new.return_type
}

/// Modifier-list text (annotations included) differs
pub fn modifiers_changed(old: &MethodSnapshot, new: &MethodSnapshot) -> bool {
    old.modifiers_text != new.modifiers_text
}

/// Throws-clause text differs
pub fn exceptions_changed(old: &MethodSnapshot, new: &MethodSnapshot) -> bool {
    old.throws_text != new.throws_text
}

/// Body similarity falls below the body threshold
pub fn body_changed(old: &MethodSnapshot, new: &MethodSnapshot, thresholds: &Thresholds) -> bool {
    jaro_winkler(&old.body, &new.body) < thresholds.body_similarity
}

/// Ordered annotation list differs
pub fn annotations_changed(old: &MethodSnapshot, new: &MethodSnapshot) -> bool {
    old.annotations != new.annotations
}

/// Composite signature rule over raw pre-body text.
///
/// Exact match is no change; similarity at or above the signature threshold
/// is no change; inside the borderline band a small edit distance is treated
/// as formatting noise. Anything else is a signature change.
pub fn signature_changed(old_sig: &str, new_sig: &str, thresholds: &Thresholds) -> bool {
    if old_sig == new_sig {
        return false;
    }
    let similarity = jaro_winkler(old_sig, new_sig);
    if similarity >= thresholds.signature_similarity {
        return false;
    }
    if similarity >= thresholds.signature_review_floor
        && levenshtein(old_sig, new_sig) < thresholds.signature_noise_edits
    {
        return false;
    }
    true
}

/// Classify one transition of a tracked method between consecutive commits.
///
/// Runs the per-axis checks when both snapshots exist, then appends the
/// derived composite labels: `Introduced`, `Deleted`, and `MultiChange`
/// whenever more than one label was collected.
pub fn classify_transition(
    old: Option<&MethodSnapshot>,
    new: Option<&MethodSnapshot>,
    thresholds: &Thresholds,
) -> Vec<ChangeKind> {
    let mut changes = Vec::new();

    if let (Some(old), Some(new)) = (old, new) {
        if parameters_changed(old, new) {
            changes.push(ChangeKind::ParameterChange);
        }
        if return_type_changed(old, new) {
            changes.push(ChangeKind::ReturnTypeChange);
        }
        if modifiers_changed(old, new) {
            changes.push(ChangeKind::ModifierChange);
        }
        if exceptions_changed(old, new) {
            changes.push(ChangeKind::ExceptionsChange);
        }
        if body_changed(old, new, thresholds) {
            changes.push(ChangeKind::BodyChange);
        }
        if annotations_changed(old, new) {
            changes.push(ChangeKind::AnnotationChange);
        }
        if signature_changed(&old.signature, &new.signature, thresholds) {
            changes.push(ChangeKind::SignatureChange);
        }
    }

    if old.is_none() && new.is_some() {
        changes.push(ChangeKind::Introduced);
    }
    if old.is_some() && new.is_none() {
        changes.push(ChangeKind::Deleted);
    }
    if changes.len() > 1 {
        changes.push(ChangeKind::MultiChange);
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::MethodExtractor;

    fn snapshot(fragment: &str) -> MethodSnapshot {
        MethodExtractor::new()
            .extract_fragment(fragment)
            .expect("test fragment parses")
    }

    #[test]
    fn test_identical_snapshots_yield_no_labels() {
        let m = snapshot("public int add(int a, int b) { return a + b; }");
        let changes = classify_transition(Some(&m), Some(&m), &Thresholds::default());
        assert!(changes.is_empty());
    }

    #[test]
    fn test_parameter_and_signature_change_with_multichange() {
        let old = snapshot("void run() {}");
        let new = snapshot("void run(int x) {}");
        let changes = classify_transition(Some(&old), Some(&new), &Thresholds::default());
        assert_eq!(
            changes,
            vec![
                ChangeKind::ParameterChange,
                ChangeKind::SignatureChange,
                ChangeKind::MultiChange
            ]
        );
    }

    #[test]
    fn test_body_change_only() {
        let old = snapshot("int f() { return compute(1); }");
        let new = snapshot("int f() { return lookupTableEntirelyDifferent(42, 43, 44); }");
        let changes = classify_transition(Some(&old), Some(&new), &Thresholds::default());
        assert_eq!(changes, vec![ChangeKind::BodyChange]);
    }

    #[test]
    fn test_return_type_change() {
        let old = snapshot("int f() { return 1; }");
        let new = snapshot("long f() { return 1; }");
        let changes = classify_transition(Some(&old), Some(&new), &Thresholds::default());
        assert!(changes.contains(&ChangeKind::ReturnTypeChange));
    }

    #[test]
    fn test_modifier_change() {
        let old = snapshot("public void f() { g(); }");
        let new = snapshot("private void f() { g(); }");
        let changes = classify_transition(Some(&old), Some(&new), &Thresholds::default());
        assert!(changes.contains(&ChangeKind::ModifierChange));
    }

    #[test]
    fn test_exceptions_change() {
        let old = snapshot("void f() { g(); }");
        let new = snapshot("void f() throws java.io.IOException { g(); }");
        let changes = classify_transition(Some(&old), Some(&new), &Thresholds::default());
        assert!(changes.contains(&ChangeKind::ExceptionsChange));
    }

    #[test]
    fn test_annotation_change() {
        let old = snapshot("@Deprecated void f() { g(); }");
        let new = snapshot("void f() { g(); }");
        let changes = classify_transition(Some(&old), Some(&new), &Thresholds::default());
        assert!(changes.contains(&ChangeKind::AnnotationChange));
        assert!(changes.contains(&ChangeKind::ModifierChange));
    }

    #[test]
    fn test_introduced_and_deleted() {
        let m = snapshot("void f() { g(); }");
        assert_eq!(
            classify_transition(None, Some(&m), &Thresholds::default()),
            vec![ChangeKind::Introduced]
        );
        assert_eq!(
            classify_transition(Some(&m), None, &Thresholds::default()),
            vec![ChangeKind::Deleted]
        );
        assert!(classify_transition(None, None, &Thresholds::default()).is_empty());
    }

    #[test]
    fn test_signature_exact_match_no_label() {
        let th = Thresholds::default();
        assert!(!signature_changed("int add(int a, int b)", "int add(int a, int b)", &th));
    }

    #[test]
    fn test_signature_high_similarity_tolerated() {
        let th = Thresholds::default();
        // One extra space survives the 0.95 similarity gate.
        assert!(!signature_changed(
            "public int addNumbersTogether(int a, int b)",
            "public int addNumbersTogether(int a,  int b)",
            &th
        ));
    }

    #[test]
    fn test_signature_borderline_small_edit_is_noise() {
        let th = Thresholds::default();
        // Similarity 0.944 lands inside the [0.85, 0.95) review band (the
        // leading-case difference forfeits the prefix boost); one edit is
        // under the noise limit, so no label.
        assert!(!signature_changed("void reset()", "Void reset()", &th));
    }

    #[test]
    fn test_signature_borderline_large_edit_flagged() {
        let th = Thresholds::default();
        // Similarity ~0.87 lands inside the review band, but the added
        // parameter costs well more than the noise limit of edits.
        assert!(signature_changed(
            "void merge(int a)",
            "Void merge(int a, int b)",
            &th
        ));
    }

    #[test]
    fn test_signature_real_change_flagged() {
        let th = Thresholds::default();
        assert!(signature_changed("void run()", "void run(int x)", &th));
        assert!(signature_changed("int f(int a)", "String g(long b)", &th));
    }

    #[test]
    fn test_change_kind_serializes_to_vocabulary() {
        let json = serde_json::to_string(&ChangeKind::ParameterChange).unwrap();
        assert_eq!(json, "\"Parameter Change\"");
        let json = serde_json::to_string(&ChangeKind::MoveFromFile).unwrap();
        assert_eq!(json, "\"MoveFromFile\"");
        assert_eq!(ChangeKind::FileRenamed.to_string(), "File Renamed");
    }
}
