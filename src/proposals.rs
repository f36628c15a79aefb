//! Proposal file discovery.
//!
//! A proposal is a markdown file named `mip-<n>.md` or the unnumbered
//! placeholder `mip-x.md`. Matching is case-insensitive over the whole name.
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Exact name of the placeholder awaiting a number.
pub const PLACEHOLDER_FILE_NAME: &str = "mip-x.md";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalKind {
    Placeholder,
    Numbered(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalFile {
    pub file_name: String,
    pub kind: ProposalKind,
}

fn proposal_name_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^mip-(\d+|x)\.md$").expect("regex for proposal file names")
    })
}

/// Classify a file name, returning `None` when it is not a proposal.
///
/// Numbers too large for `u64` are treated as non-proposals.
pub fn parse_proposal_name(name: &str) -> Option<ProposalFile> {
    let caps = proposal_name_regex().captures(name)?;
    let token = caps.get(1)?.as_str();
    let kind = if token.eq_ignore_ascii_case("x") {
        ProposalKind::Placeholder
    } else {
        match token.parse::<u64>() {
            Ok(number) => ProposalKind::Numbered(number),
            Err(err) => {
                tracing::warn!(file = name, error = %err, "skipping unparseable MIP number");
                return None;
            }
        }
    };
    Some(ProposalFile {
        file_name: name.to_string(),
        kind,
    })
}

/// List proposal entries in `dir`, sorted by file name.
///
/// Every entry type counts, so a directory named `mip-3.md` still claims 3.
pub fn scan_proposals(dir: &Path) -> Result<Vec<ProposalFile>> {
    let entries = fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))?;
    let mut proposals = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in {}", dir.display()))?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if let Some(proposal) = parse_proposal_name(&name) {
            proposals.push(proposal);
        }
    }
    proposals.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    tracing::debug!(
        dir = %dir.display(),
        count = proposals.len(),
        "scanned proposal files"
    );
    Ok(proposals)
}

/// Next free number: one past the highest numbered proposal, or 1.
pub fn next_number(proposals: &[ProposalFile]) -> Result<u64> {
    let highest = proposals
        .iter()
        .filter_map(|proposal| match proposal.kind {
            ProposalKind::Numbered(number) => Some(number),
            ProposalKind::Placeholder => None,
        })
        .max();
    match highest {
        None => Ok(1),
        Some(number) => number
            .checked_add(1)
            .ok_or_else(|| anyhow!("MIP number {number} has no successor")),
    }
}

/// File name for a numbered proposal.
pub fn numbered_file_name(number: u64) -> String {
    format!("mip-{number}.md")
}

#[cfg(test)]
#[path = "proposals_tests.rs"]
mod tests;
