use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use walkdir::WalkDir;

/// One loaded documentation file.
pub struct DocFile {
    pub path: PathBuf,
    pub text: String,
}

/// Lazy, single-pass walk of markdown files under `root`, in the order the
/// directory walker yields them. The emitted module's declaration order
/// follows this order, so entries are deliberately not sorted. Walk errors
/// are surfaced, not skipped.
pub fn markdown_files(root: &Path) -> impl Iterator<Item = walkdir::Result<PathBuf>> {
    WalkDir::new(root).into_iter().filter_map(|entry| match entry {
        Ok(e) if e.file_type().is_file() && is_markdown(e.path()) => Some(Ok(e.into_path())),
        Ok(_) => None,
        Err(e) => Some(Err(e)),
    })
}

fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md" | "mdx")
    )
}

/// Read every markdown file under `root`. A missing directory or unreadable
/// file is fatal.
pub fn load_docs(root: &Path) -> Result<Vec<DocFile>> {
    let mut docs = Vec::new();
    for entry in markdown_files(root) {
        let path = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        docs.push(DocFile { path, text });
    }
    info!("Loaded {} markdown files from {}", docs.len(), root.display());
    Ok(docs)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_markdown_and_mdx_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "# A").unwrap();
        fs::write(dir.path().join("b.txt"), "not docs").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.mdx"), "# C").unwrap();

        let mut names: Vec<String> = markdown_files(dir.path())
            .map(|p| p.unwrap().file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["a.md", "c.mdx"]);
    }

    #[test]
    fn load_docs_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "# Title\nbody").unwrap();
        let docs = load_docs(dir.path()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text, "# Title\nbody");
    }

    #[test]
    fn missing_directory_is_fatal() {
        assert!(load_docs(Path::new("no/such/docs/dir")).is_err());
    }
}
