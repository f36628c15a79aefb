//! Renumbering the placeholder proposal.
//!
//! A run scans the proposals directory, picks the next number, rewrites every
//! `mip-x` reference in the placeholder to `MIP-<n>`, moves it to
//! `mip-<n>.md` and stages both paths. Missing inputs are reported as
//! outcomes rather than errors so callers can exit cleanly.
use crate::config::RenumberConfig;
use crate::git;
use crate::proposals::{self, PLACEHOLDER_FILE_NAME};
use crate::util;
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Rename work derived from the current directory contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub number: u64,
    pub old_path: PathBuf,
    pub new_path: PathBuf,
}

/// Result of planning before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    NoProposals,
    NoPlaceholder { number: u64 },
    Ready(RenamePlan),
}

/// Machine-readable summary of a run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RenumberReport {
    pub status: RenumberStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_path: Option<String>,
    pub replacements: usize,
    pub staged: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RenumberStatus {
    NoProposals,
    NoPlaceholder,
    Renamed,
}

impl RenumberReport {
    /// One-line human summary.
    pub fn message(&self) -> String {
        match self.status {
            RenumberStatus::NoProposals => "No MIP files found.".to_string(),
            RenumberStatus::NoPlaceholder => format!("No {PLACEHOLDER_FILE_NAME} file found."),
            RenumberStatus::Renamed => {
                let verb = if self.dry_run { "Would rename" } else { "Renamed" };
                format!(
                    "{verb} {} -> {} ({} reference(s) updated)",
                    self.old_path.as_deref().unwrap_or(PLACEHOLDER_FILE_NAME),
                    self.new_path.as_deref().unwrap_or_default(),
                    self.replacements
                )
            }
        }
    }

    fn empty(status: RenumberStatus, number: Option<u64>, dry_run: bool) -> Self {
        Self {
            status,
            number,
            old_path: None,
            new_path: None,
            replacements: 0,
            staged: false,
            dry_run,
        }
    }
}

fn placeholder_ref_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)mip-x").expect("regex for placeholder references"))
}

/// Replace every case-insensitive `mip-x` with `MIP-<number>`.
pub fn rewrite_content(content: &str, number: u64) -> (String, usize) {
    let pattern = placeholder_ref_regex();
    let replacements = pattern.find_iter(content).count();
    let replacement = format!("MIP-{number}");
    let rewritten = pattern
        .replace_all(content, regex::NoExpand(replacement.as_str()))
        .into_owned();
    (rewritten, replacements)
}

/// Inspect `mips_dir` and decide what a run would do.
pub fn plan_renumber(mips_dir: &Path) -> Result<PlanOutcome> {
    let proposals = proposals::scan_proposals(mips_dir)?;
    if proposals.is_empty() {
        return Ok(PlanOutcome::NoProposals);
    }
    let number = proposals::next_number(&proposals)?;
    let old_path = mips_dir.join(PLACEHOLDER_FILE_NAME);
    if !old_path.is_file() {
        return Ok(PlanOutcome::NoPlaceholder { number });
    }
    let new_path = mips_dir.join(proposals::numbered_file_name(number));
    Ok(PlanOutcome::Ready(RenamePlan {
        number,
        old_path,
        new_path,
    }))
}

/// Write the rewritten proposal under its new name and remove the placeholder.
///
/// Returns the number of rewritten references.
pub fn apply_plan(plan: &RenamePlan) -> Result<usize> {
    let (rewritten, replacements) = rewritten_placeholder(plan)?;
    ensure_target_free(plan)?;
    util::write_new_file_atomic(&plan.new_path, &rewritten)?;
    fs::remove_file(&plan.old_path)
        .with_context(|| format!("remove {}", plan.old_path.display()))?;
    Ok(replacements)
}

/// Fail when something already occupies the numbered path.
pub fn ensure_target_free(plan: &RenamePlan) -> Result<()> {
    if fs::symlink_metadata(&plan.new_path).is_ok() {
        return Err(anyhow!("{} already exists", plan.new_path.display()));
    }
    Ok(())
}

fn rewritten_placeholder(plan: &RenamePlan) -> Result<(String, usize)> {
    let content = fs::read_to_string(&plan.old_path)
        .with_context(|| format!("read {}", plan.old_path.display()))?;
    Ok(rewrite_content(&content, plan.number))
}

/// Run the full rename-and-stage step described by `config`.
pub fn run(config: &RenumberConfig) -> Result<RenumberReport> {
    let plan = match plan_renumber(&config.mips_dir)? {
        PlanOutcome::NoProposals => {
            tracing::info!(dir = %config.mips_dir.display(), "no proposal files");
            return Ok(RenumberReport::empty(
                RenumberStatus::NoProposals,
                None,
                config.dry_run,
            ));
        }
        PlanOutcome::NoPlaceholder { number } => {
            tracing::info!(dir = %config.mips_dir.display(), next = number, "no placeholder");
            return Ok(RenumberReport::empty(
                RenumberStatus::NoPlaceholder,
                Some(number),
                config.dry_run,
            ));
        }
        PlanOutcome::Ready(plan) => plan,
    };

    let replacements = if config.dry_run {
        let (_, replacements) = rewritten_placeholder(&plan)?;
        ensure_target_free(&plan)?;
        replacements
    } else {
        apply_plan(&plan)?
    };
    tracing::info!(
        number = plan.number,
        replacements,
        dry_run = config.dry_run,
        new_path = %plan.new_path.display(),
        "renamed placeholder"
    );

    let paths = [plan.old_path.as_path(), plan.new_path.as_path()];
    let staged = config.stage && !config.dry_run;
    if staged {
        git::stage_paths(&config.repo_root, &config.git_program, &paths).with_context(|| {
            format!(
                "renamed to {} but staging failed; run git add by hand",
                util::display_path(&plan.new_path, &config.repo_root)
            )
        })?;
    } else if config.stage {
        tracing::info!(
            command = %git::render_add_command(&config.git_program, &paths),
            "dry run: skipping staging"
        );
    }

    Ok(RenumberReport {
        status: RenumberStatus::Renamed,
        number: Some(plan.number),
        old_path: Some(util::display_path(&plan.old_path, &config.repo_root)),
        new_path: Some(util::display_path(&plan.new_path, &config.repo_root)),
        replacements,
        staged,
        dry_run: config.dry_run,
    })
}

#[cfg(test)]
#[path = "renumber_tests.rs"]
mod tests;
