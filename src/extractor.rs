//! Structural method extraction from Java source text.
//!
//! Parsing is purely syntactic (tree-sitter, no binding or type resolution).
//! Every extraction result is cached process-wide, keyed by a SHA-256
//! fingerprint of the full input text, since the history walk re-reads the
//! same revisions repeatedly. Unparseable input yields an empty sequence
//! rather than an error; callers treat "method not found" and "file
//! unparseable" identically.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tree_sitter::{Node, Parser};

/// Key used to re-associate a method's snapshots across revisions.
///
/// Not guaranteed unique within a file (overloads differing only by body,
/// accidental duplicates); lookups bind to the first method in declaration
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MethodIdentity {
    /// Simple method name
    pub name: String,
    /// Ordered parameter descriptor texts, e.g. `["int a", "String b"]`
    pub params: Vec<String>,
}

/// Parsed, field-level representation of one method declaration at one
/// revision. Immutable value; produced fresh per (file revision, method).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSnapshot {
    /// Simple method name
    pub name: String,
    /// Ordered parameter descriptor texts (type + name)
    pub params: Vec<String>,
    /// Raw text of the modifier list, annotations included; empty if none
    pub modifiers_text: String,
    /// Ordered annotation texts
    pub annotations: Vec<String>,
    /// Return type text; empty for constructors
    pub return_type: String,
    /// Signature substring from the `throws` keyword onward; empty if absent
    pub throws_text: String,
    /// Everything before the first `{` of the block, trimmed
    pub signature: String,
    /// Text strictly between the outermost braces, trimmed
    pub body: String,
    /// Full declaration text, exactly as it appears in the source
    pub block: String,
    /// Character span within the original input
    pub start_byte: usize,
    pub end_byte: usize,
    /// 1-based line span within the original input
    pub start_line: usize,
    pub end_line: usize,
}

impl MethodSnapshot {
    /// The (name, parameter-list) key for cross-revision matching
    pub fn identity(&self) -> MethodIdentity {
        MethodIdentity {
            name: self.name.clone(),
            params: self.params.clone(),
        }
    }
}

/// Method extractor with a process-wide parse cache.
///
/// The cache is safe to share across concurrent history requests; entries
/// are immutable once inserted, so readers never need coordination beyond
/// the lock itself.
#[derive(Default)]
pub struct MethodExtractor {
    cache: RwLock<HashMap<String, Arc<Vec<MethodSnapshot>>>>,
}

impl MethodExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract all method and constructor declarations from a full source
    /// file, in declaration order. Repeated calls with identical text return
    /// the cached sequence.
    pub fn extract_methods(&self, source: &str) -> Arc<Vec<MethodSnapshot>> {
        if source.is_empty() {
            return Arc::new(Vec::new());
        }
        let key = fingerprint(source);
        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(hit) = cache.get(&key) {
                return Arc::clone(hit);
            }
        }

        let methods = Arc::new(parse_source(source, 0));
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        cache.entry(key).or_insert_with(|| Arc::clone(&methods));
        methods
    }

    /// Extract the first declaration from an isolated method fragment (a
    /// block produced by a previous extraction). The fragment is wrapped in
    /// a synthetic class so the grammar accepts it; reported offsets stay
    /// relative to the original fragment.
    pub fn extract_fragment(&self, fragment: &str) -> Option<MethodSnapshot> {
        if fragment.trim().is_empty() {
            return None;
        }
        // The prefix contains no newline, so line numbers are unaffected.
        const PREFIX: &str = "class __Fragment { ";
        let wrapped = format!("{PREFIX}{fragment} }}");
        parse_source(&wrapped, PREFIX.len()).into_iter().next()
    }

    /// Number of distinct inputs currently cached
    pub fn cached_revisions(&self) -> usize {
        self.cache.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn parse_source(source: &str, base_offset: usize) -> Vec<MethodSnapshot> {
    let mut parser = Parser::new();
    if parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .is_err()
    {
        tracing::warn!("Java grammar rejected by tree-sitter, returning no methods");
        return Vec::new();
    }

    let Some(tree) = parser.parse(source, None) else {
        tracing::debug!("Source text did not produce a syntax tree");
        return Vec::new();
    };

    let mut methods = Vec::new();
    collect_methods(tree.root_node(), source, base_offset, &mut methods);
    methods
}

/// Walk the tree collecting method and constructor declarations in source
/// order. Does not descend into a found declaration, so declarations nested
/// inside a method body are not separately recorded.
fn collect_methods(node: Node, source: &str, base_offset: usize, out: &mut Vec<MethodSnapshot>) {
    if matches!(node.kind(), "method_declaration" | "constructor_declaration") {
        out.push(snapshot_of(node, source, base_offset));
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_methods(child, source, base_offset, out);
    }
}

fn snapshot_of(node: Node, source: &str, base_offset: usize) -> MethodSnapshot {
    let text = |n: Node| n.utf8_text(source.as_bytes()).unwrap_or("").to_string();

    let name = node.child_by_field_name("name").map(&text).unwrap_or_default();

    let mut params = Vec::new();
    if let Some(param_list) = node.child_by_field_name("parameters") {
        let mut cursor = param_list.walk();
        for child in param_list.named_children(&mut cursor) {
            if matches!(
                child.kind(),
                "formal_parameter" | "spread_parameter" | "receiver_parameter"
            ) {
                params.push(text(child).trim().to_string());
            }
        }
    }

    let mut modifiers_text = String::new();
    let mut annotations = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "modifiers" {
            modifiers_text = text(child).trim().to_string();
            let mut inner = child.walk();
            for m in child.children(&mut inner) {
                if matches!(m.kind(), "marker_annotation" | "annotation") {
                    annotations.push(text(m).trim().to_string());
                }
            }
            break;
        }
    }

    // Constructors carry no type field; empty is a valid return-type value.
    let return_type = node.child_by_field_name("type").map(&text).unwrap_or_default();

    let block = source[node.start_byte()..node.end_byte()].to_string();
    let signature = signature_of(&block).to_string();
    let body = body_of(&block).to_string();
    let throws_text = throws_of(&signature);

    MethodSnapshot {
        name,
        params,
        modifiers_text,
        annotations,
        return_type,
        throws_text,
        signature,
        body,
        block,
        start_byte: node.start_byte().saturating_sub(base_offset),
        end_byte: node.end_byte().saturating_sub(base_offset),
        start_line: node.start_position().row + 1,
        end_line: node.end_position().row + 1,
    }
}

/// Everything before the first `{` of a method block, trimmed; the whole
/// block if it has no body.
pub fn signature_of(block: &str) -> &str {
    match block.find('{') {
        Some(open) => block[..open].trim(),
        None => block.trim(),
    }
}

/// Text strictly between the outermost braces of a method block, trimmed.
pub fn body_of(block: &str) -> &str {
    if let (Some(open), Some(close)) = (block.find('{'), block.rfind('}'))
        && close > open
    {
        return block[open + 1..close].trim();
    }
    ""
}

/// Signature substring from the `throws` keyword onward, trimmed; empty when
/// the signature declares no exceptions. The keyword scan is ASCII
/// case-insensitive and runs over the original bytes, so non-ASCII text
/// earlier in the signature cannot shift the cut point.
pub fn throws_of(signature: &str) -> String {
    let hit = signature
        .as_bytes()
        .windows(6)
        .position(|w| w.eq_ignore_ascii_case(b"throws"));
    match hit {
        // "throws" is ASCII, so a byte hit is always a char boundary.
        Some(idx) => signature.get(idx..).map(str::trim).unwrap_or("").to_string(),
        None => String::new(),
    }
}
