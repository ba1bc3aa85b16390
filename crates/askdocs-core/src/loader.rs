//! Loads plain-text documents from a directory tree.
//!
//! Stands in for the upstream extraction service when running locally: every
//! `.txt`/`.md` file becomes one `Document` whose id is its path relative to
//! the root.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::Document;

const TEXT_EXTENSIONS: &[&str] = &["txt", "md"];

pub struct DocumentLoader {
    owner_id: String,
    limit: Option<usize>,
}

impl DocumentLoader {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self { owner_id: owner_id.into(), limit: None }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn load_directory(&self, root: &Path) -> Result<Vec<Document>> {
        if !root.is_dir() {
            return Err(Error::NotFound(format!("document directory {}", root.display())));
        }
        let mut files = list_text_files(root);
        if let Some(limit) = self.limit {
            if files.len() > limit {
                files.truncate(limit);
                info!(limit, "limited to first files");
            }
        }
        let mut documents = Vec::with_capacity(files.len());
        for file_path in &files {
            let text = read_file_content(file_path)?;
            let id = file_path.strip_prefix(root).unwrap_or(file_path).to_string_lossy().to_string();
            let filename = file_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| id.clone());
            debug!(%id, bytes = text.len(), "loaded document");
            documents.push(Document::new(id, self.owner_id.clone(), filename, text));
        }
        info!(count = documents.len(), root = %root.display(), "loaded documents");
        Ok(documents)
    }
}

fn read_file_content(file_path: &Path) -> Result<String> {
    match fs::read_to_string(file_path) {
        Ok(content) => Ok(content),
        Err(_) => Ok(String::from_utf8_lossy(&fs::read(file_path)?).to_string()),
    }
}

fn list_text_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
        let path = entry.path();
        let is_text = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| TEXT_EXTENSIONS.iter().any(|t| t.eq_ignore_ascii_case(ext)));
        if is_text {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files
}
