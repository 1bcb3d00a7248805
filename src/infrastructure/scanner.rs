//! Filesystem scanning for Word documents.
//!
//! Resolves a user-supplied path into the sorted list of `.docx` files to
//! evaluate: a single validated file, or a directory scan (optionally
//! recursive). Sorting keeps batch output order deterministic.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Scanner for locating `.docx` documents under a path.
pub struct DocumentScanner {
    extensions: Vec<String>,
}

impl DocumentScanner {
    pub fn new() -> Self {
        Self {
            extensions: vec!["docx".to_string()],
        }
    }

    /// Resolve `path` to the documents it denotes.
    ///
    /// A file path must carry a matching extension; a directory is scanned
    /// for matching files, recursively when requested.
    pub fn scan(&self, path: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        if path.is_file() {
            if self.matches(path) {
                Ok(vec![path.to_path_buf()])
            } else {
                bail!(
                    "File must have one of these extensions: {}: {}",
                    self.extensions.join(", "),
                    path.display()
                );
            }
        } else if path.is_dir() {
            let mut documents = Vec::new();
            self.scan_directory(path, recursive, &mut documents)?;
            documents.sort();
            Ok(documents)
        } else {
            bail!("Path not found: {}", path.display());
        }
    }

    fn scan_directory(
        &self,
        dir: &Path,
        recursive: bool,
        documents: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;

        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to read directory entry in {}", dir.display()))?
                .path();

            if path.is_dir() {
                if recursive {
                    self.scan_directory(&path, recursive, documents)?;
                }
            } else if self.matches(&path) {
                documents.push(path);
            }
        }

        Ok(())
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
            })
    }
}

impl Default for DocumentScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::write(path, b"stub").unwrap();
    }

    #[test]
    fn single_file_must_match_extension() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("report.docx");
        let txt = dir.path().join("notes.txt");
        touch(&doc);
        touch(&txt);

        let scanner = DocumentScanner::new();
        assert_eq!(scanner.scan(&doc, false).unwrap(), vec![doc]);
        assert!(scanner.scan(&txt, false).is_err());
    }

    #[test]
    fn directory_scan_is_sorted_and_shallow_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("nested");
        std::fs::create_dir(&sub).unwrap();
        touch(&dir.path().join("b.docx"));
        touch(&dir.path().join("a.docx"));
        touch(&dir.path().join("skip.pdf"));
        touch(&sub.join("c.docx"));

        let scanner = DocumentScanner::new();
        let shallow = scanner.scan(dir.path(), false).unwrap();
        assert_eq!(
            shallow,
            vec![dir.path().join("a.docx"), dir.path().join("b.docx")]
        );

        let deep = scanner.scan(dir.path(), true).unwrap();
        assert_eq!(deep.len(), 3);
        assert!(deep.contains(&sub.join("c.docx")));
    }

    #[test]
    fn missing_path_is_an_error() {
        let scanner = DocumentScanner::new();
        assert!(scanner.scan(Path::new("/no/such/path"), false).is_err());
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("REPORT.DOCX");
        touch(&doc);
        let found = DocumentScanner::new().scan(dir.path(), false).unwrap();
        assert_eq!(found, vec![doc]);
    }
}
