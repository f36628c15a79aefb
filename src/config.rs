//! Run configuration resolved from CLI flags and the environment.
//!
//! Paths are made absolute up front so every later step (scan, rename,
//! staging) sees the same directory regardless of the process cwd.
use crate::cli::{RootArgs, GIT_PROGRAM_ENV};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_GIT_PROGRAM: &str = "git";

/// Fully resolved settings for a single renumber run.
#[derive(Debug, Clone)]
pub struct RenumberConfig {
    pub repo_root: PathBuf,
    pub mips_dir: PathBuf,
    pub git_program: String,
    pub stage: bool,
    pub dry_run: bool,
}

impl RenumberConfig {
    pub fn from_args(args: &RootArgs) -> Result<Self> {
        let cwd = env::current_dir().context("resolve current directory")?;
        let git_override = env::var(GIT_PROGRAM_ENV).ok();
        Ok(Self::resolve(args, &cwd, git_override))
    }

    fn resolve(args: &RootArgs, cwd: &Path, git_override: Option<String>) -> Self {
        let repo_root = match &args.repo_root {
            Some(root) => absolutize(root, cwd),
            None => cwd.to_path_buf(),
        };
        let mips_dir = absolutize(&args.mips_dir, &repo_root);
        let git_program = args
            .git
            .clone()
            .or(git_override.filter(|value| !value.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_GIT_PROGRAM.to_string());
        Self {
            repo_root,
            mips_dir,
            git_program,
            stage: !args.no_stage,
            dry_run: args.dry_run,
        }
    }
}

fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> RootArgs {
        let mut full = vec!["mip-renumber"];
        full.extend_from_slice(argv);
        RootArgs::try_parse_from(full).expect("parse args")
    }

    #[test]
    fn mips_dir_is_relative_to_repo_root() {
        let args = parse(&["--repo-root", "repo"]);
        let config = RenumberConfig::resolve(&args, Path::new("/work"), None);
        assert_eq!(config.repo_root, PathBuf::from("/work/repo"));
        assert_eq!(config.mips_dir, PathBuf::from("/work/repo/MIPs"));
        assert_eq!(config.git_program, "git");
        assert!(config.stage);
    }

    #[test]
    fn absolute_mips_dir_is_kept() {
        let args = parse(&["--mips-dir", "/elsewhere/MIPs", "--no-stage"]);
        let config = RenumberConfig::resolve(&args, Path::new("/work"), None);
        assert_eq!(config.repo_root, PathBuf::from("/work"));
        assert_eq!(config.mips_dir, PathBuf::from("/elsewhere/MIPs"));
        assert!(!config.stage);
    }

    #[test]
    fn git_flag_wins_over_environment() {
        let args = parse(&["--git", "/opt/git"]);
        let config =
            RenumberConfig::resolve(&args, Path::new("/work"), Some("/env/git".to_string()));
        assert_eq!(config.git_program, "/opt/git");

        let args = parse(&[]);
        let config =
            RenumberConfig::resolve(&args, Path::new("/work"), Some("/env/git".to_string()));
        assert_eq!(config.git_program, "/env/git");

        let config = RenumberConfig::resolve(&args, Path::new("/work"), Some("  ".to_string()));
        assert_eq!(config.git_program, "git");
    }
}
