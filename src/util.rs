//! Path, file and error helpers shared by the renumber steps.
use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::path::Path;

/// Render `path` relative to `base` when it lives underneath it.
pub fn display_path(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
        _ => path.display().to_string(),
    }
}

/// Write `text` to a sibling temp file, then move it into place.
///
/// Fails if `dest` already exists.
pub fn write_new_file_atomic(dest: &Path, text: &str) -> Result<()> {
    let parent = dest
        .parent()
        .ok_or_else(|| anyhow!("{} has no parent directory", dest.display()))?;
    let mut tmp = tempfile::Builder::new()
        .prefix(".mip-renumber")
        .suffix(".tmp")
        .tempfile_in(parent)
        .with_context(|| format!("create temp file in {}", parent.display()))?;
    tmp.write_all(text.as_bytes())
        .with_context(|| format!("write temp file for {}", dest.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("sync temp file for {}", dest.display()))?;
    tmp.persist_noclobber(dest)
        .map_err(|err| err.error)
        .with_context(|| format!("publish {}", dest.display()))?;
    Ok(())
}

pub fn error_chain_message(err: &anyhow::Error) -> String {
    err.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_path_strips_base() {
        let base = Path::new("/repo");
        assert_eq!(display_path(Path::new("/repo/MIPs/mip-1.md"), base), "MIPs/mip-1.md");
        assert_eq!(display_path(Path::new("/other/mip-1.md"), base), "/other/mip-1.md");
        assert_eq!(display_path(base, base), "/repo");
    }

    #[test]
    fn atomic_write_refuses_existing_destination() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("mip-1.md");
        write_new_file_atomic(&dest, "first").expect("first write");
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "first");

        assert!(write_new_file_atomic(&dest, "second").is_err());
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "first");
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn error_chain_joins_contexts() {
        let err = anyhow!("root cause").context("outer");
        assert_eq!(error_chain_message(&err), "outer: root cause");
    }
}
