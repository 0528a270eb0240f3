//! Pre-commit configuration file parser
//!
//! Walks the YAML tree for the top-level `repos` sequence and extracts each
//! entry's `repo` URL and pinned `rev`, keeping the exact byte range of the
//! revision scalar so updates can be spliced into the original text.

use thiserror::Error;
use tracing::warn;

use crate::parser::types::{PreCommitConfig, RepoEntry};

/// Error type for configuration parsing
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to parse the file structure
    #[error("Failed to parse file: {0}")]
    ParseFailed(String),

    /// Tree-sitter related error
    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),
}

/// Parser for `.pre-commit-config.yaml` files
pub struct PreCommitParser;

impl PreCommitParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse the configuration text into repository entries.
    ///
    /// YAML tree structure for a pre-commit config:
    /// ```text
    /// stream
    ///   document
    ///     block_node
    ///       block_mapping
    ///         block_mapping_pair          <- "repos: ..."
    ///           flow_node                 <- key: "repos"
    ///           block_node
    ///             block_sequence          <- list of entries
    ///               block_sequence_item
    ///                 block_node
    ///                   block_mapping     <- TARGET: repo/rev/hooks keys
    /// ```
    pub fn parse(&self, content: &str) -> Result<PreCommitConfig, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        let language = tree_sitter_yaml::LANGUAGE;
        parser.set_language(&language.into()).map_err(|e| {
            warn!("Failed to set YAML language for tree-sitter: {}", e);
            ParseError::TreeSitter(e.to_string())
        })?;

        let tree = parser.parse(content, None).ok_or_else(|| {
            warn!("Failed to parse YAML content");
            ParseError::ParseFailed("Failed to parse YAML".to_string())
        })?;

        let mut repos = Vec::new();
        self.find_repos_section(tree.root_node(), content, &mut repos);

        Ok(PreCommitConfig { repos })
    }

    /// Find the top-level `repos` key and collect entries from its value.
    fn find_repos_section(
        &self,
        node: tree_sitter::Node,
        content: &str,
        results: &mut Vec<RepoEntry>,
    ) {
        if node.kind() == "block_mapping_pair"
            && let Some(key_node) = node.child_by_field_name("key")
            && self.scalar_value(key_node, content).0 == "repos"
            && let Some(value_node) = node.child_by_field_name("value")
        {
            self.collect_entries(value_node, content, results);
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.find_repos_section(child, content, results);
        }
    }

    /// Collect one entry per mapping that carries a `repo` key.
    ///
    /// The `hooks` sub-mappings inside an entry never carry a `repo` key, so
    /// recursion stops at the first mapping that does.
    fn collect_entries(
        &self,
        node: tree_sitter::Node,
        content: &str,
        results: &mut Vec<RepoEntry>,
    ) {
        if node.kind() == "block_mapping"
            && let Some(entry) = self.entry_from_mapping(node, content)
        {
            results.push(entry);
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.collect_entries(child, content, results);
        }
    }

    /// Build a [`RepoEntry`] from a mapping's `repo` and `rev` pairs.
    ///
    /// Returns `None` when the mapping has no `repo` key. A missing `rev`
    /// yields an empty revision (validation decides whether that is
    /// acceptable; sentinel entries have none).
    fn entry_from_mapping(
        &self,
        mapping: tree_sitter::Node,
        content: &str,
    ) -> Option<RepoEntry> {
        let mut url = None;
        let mut rev = None;

        let mut cursor = mapping.walk();
        for pair in mapping.children(&mut cursor) {
            if pair.kind() == "block_mapping_pair"
                && let Some(key_node) = pair.child_by_field_name("key")
                && let Some(value_node) = pair.child_by_field_name("value")
            {
                match self.scalar_value(key_node, content).0.as_str() {
                    "repo" => url = Some(self.scalar_value(value_node, content).0),
                    "rev" => rev = Some(self.scalar_value(value_node, content)),
                    _ => {}
                }
            }
        }

        let url = url?;
        let (rev, rev_start, rev_end) = rev.unwrap_or_default();

        Some(RepoEntry {
            url,
            rev,
            rev_start,
            rev_end,
        })
    }

    /// Text of a scalar node together with its byte range, surrounding
    /// quotes excluded from both.
    fn scalar_value(&self, node: tree_sitter::Node, content: &str) -> (String, usize, usize) {
        let start = node.start_byte();
        let end = node.end_byte();
        let text = &content[start..end];

        for quote in ['"', '\''] {
            if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
                return (text[1..text.len() - 1].to_string(), start + 1, end - 1);
            }
        }

        (text.to_string(), start, end)
    }
}

impl Default for PreCommitParser {
    fn default() -> Self {
        Self::new()
    }
}
