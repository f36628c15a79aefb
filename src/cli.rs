//! CLI argument parsing for the MIP renumber step.
use clap::Parser;
use std::path::PathBuf;

/// Proposals directory name, relative to the repository root.
pub const DEFAULT_MIPS_DIR: &str = "MIPs";

/// Environment variable that overrides the git program.
pub const GIT_PROGRAM_ENV: &str = "MIP_RENUMBER_GIT";

#[derive(Parser, Debug)]
#[command(
    name = "mip-renumber",
    version,
    about = "Rename mip-x.md to the next MIP number and stage the rename",
    after_help = "Examples:\n  mip-renumber\n  mip-renumber --repo-root ../improvement-proposals --dry-run\n  mip-renumber --mips-dir docs/MIPs --no-stage --json"
)]
pub struct RootArgs {
    /// Repository root used as the git working directory (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub repo_root: Option<PathBuf>,

    /// Directory holding the proposal files, relative to the repository root
    #[arg(long, value_name = "DIR", default_value = DEFAULT_MIPS_DIR)]
    pub mips_dir: PathBuf,

    /// Git program used for staging (default: $MIP_RENUMBER_GIT or git)
    #[arg(long, value_name = "PROGRAM")]
    pub git: Option<String>,

    /// Rename and rewrite without running git add
    #[arg(long)]
    pub no_stage: bool,

    /// Report what would change without touching files or the index
    #[arg(long)]
    pub dry_run: bool,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,

    /// Emit debug logging on stderr
    #[arg(long)]
    pub verbose: bool,
}
