//! Staging renamed proposals with git.
use anyhow::{anyhow, Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Resolve the configured git program to an executable path.
pub fn resolve_git(program: &str) -> Result<PathBuf> {
    which::which(program).with_context(|| format!("locate git program {program}"))
}

/// Argument vector for `git add`; paths are passed verbatim after `--`.
pub fn add_args(paths: &[&Path]) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["add".into(), "--".into()];
    args.extend(paths.iter().map(|path| path.as_os_str().to_os_string()));
    args
}

/// Shell-quoted rendering of the staging command for logs and dry runs.
pub fn render_add_command(program: &str, paths: &[&Path]) -> String {
    let mut words = vec![program.to_string()];
    words.extend(
        add_args(paths)
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned()),
    );
    shell_words::join(words)
}

/// Run `git add -- <paths>` inside `repo_root`.
///
/// A path that no longer exists on disk is staged as a deletion.
pub fn stage_paths(repo_root: &Path, program: &str, paths: &[&Path]) -> Result<()> {
    let git = resolve_git(program)?;
    tracing::debug!(
        command = %render_add_command(program, paths),
        cwd = %repo_root.display(),
        "staging proposal rename"
    );
    let output = Command::new(&git)
        .args(add_args(paths))
        .current_dir(repo_root)
        .output()
        .with_context(|| format!("run {}", git.display()))?;
    check_status(&output)
}

fn check_status(output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = match stderr.trim().lines().next() {
        Some(line) if !line.is_empty() => line.to_string(),
        _ => format!("status {}", output.status),
    };
    Err(anyhow!("git add failed: {detail}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_args_separate_paths_from_options() {
        let args = add_args(&[Path::new("MIPs/mip-x.md"), Path::new("MIPs/mip-2.md")]);
        let rendered: Vec<String> = args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        assert_eq!(rendered, vec!["add", "--", "MIPs/mip-x.md", "MIPs/mip-2.md"]);
    }

    #[test]
    fn rendered_command_quotes_spaces() {
        let rendered = render_add_command("git", &[Path::new("my MIPs/mip-x.md")]);
        assert_eq!(rendered, "git add -- 'my MIPs/mip-x.md'");
    }

    #[test]
    fn missing_git_program_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = stage_paths(
            dir.path(),
            "definitely-not-a-git-binary-on-path",
            &[Path::new("mip-1.md")],
        )
        .unwrap_err();
        assert!(err.to_string().contains("locate git program"));
    }
}
