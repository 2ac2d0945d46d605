//! Wizard string extraction service
//!
//! Walks a directory tree for wizard definition files, pulls every
//! translatable leaf out of each one and assembles the generated stub.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, trace};
use walkdir::WalkDir;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{DomainError, ExtractionRecord, NameMatcher, OutputDocument, TreeNode};
use crate::infrastructure::traits::FileSystem;

/// What to look for and how to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Which files to read
    pub file_name: NameMatcher,
    /// Which map keys mark a translatable leaf
    pub key: NameMatcher,
    /// Translation context of every generated marker
    pub context: String,
    /// Visit directory entries in file name order
    pub sort_entries: bool,
    /// Descend into symlinked directories
    pub follow_links: bool,
}

impl From<&Settings> for ExtractOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            file_name: NameMatcher::exact(settings.file_name.clone()),
            key: NameMatcher::prefix(settings.key_prefix.clone()),
            context: settings.context.clone(),
            sort_entries: settings.sort_entries,
            follow_links: settings.follow_links,
        }
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

/// Counts for one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Matching files parsed
    pub files: usize,
    /// Records emitted across all files
    pub records: usize,
}

/// Result of building a document.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub document: OutputDocument,
    /// Files read, in visit order
    pub sources: Vec<PathBuf>,
    pub summary: BuildSummary,
}

/// Service for turning wizard definitions into a translation stub.
pub struct ExtractionService {
    fs: Arc<dyn FileSystem>,
}

impl ExtractionService {
    /// Create a new extraction service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Find every file under `root` whose name matches.
    ///
    /// A symlink to a file counts as that file. Any walk error
    /// (unreadable directory, broken entry) is fatal.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn scan(&self, root: &Path, options: &ExtractOptions) -> ApplicationResult<Vec<PathBuf>> {
        if !self.fs.is_dir(root) {
            return Err(ApplicationError::RootNotFound(root.to_path_buf()));
        }

        let mut walker = WalkDir::new(root).follow_links(options.follow_links);
        if options.sort_entries {
            walker = walker.sort_by_file_name();
        }

        let mut found = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    return Err(io::Error::from(e)).with_path_context("walk directory", &path);
                }
            };

            // Symlinks to files are read; directory links are only entered with follow_links
            let file_type = entry.file_type();
            let is_file =
                file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }
            let matches = entry
                .file_name()
                .to_str()
                .map(|name| options.file_name.matches(name))
                .unwrap_or(false);
            if matches {
                debug!("scan: found {}", entry.path().display());
                found.push(entry.into_path());
            }
        }

        debug!("scan: {} matching files", found.len());
        Ok(found)
    }

    /// Extract records from one file, numbering them from `next_index`.
    ///
    /// `next_index` is advanced past the last record emitted.
    pub fn extract_file(
        &self,
        path: &Path,
        options: &ExtractOptions,
        next_index: &mut usize,
    ) -> ApplicationResult<Vec<ExtractionRecord>> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read wizard file", path)?;
        let tree = TreeNode::parse(&content).map_err(|e| DomainError::parse(path, &e))?;

        let records: Vec<ExtractionRecord> = tree
            .extract_matching(|key| options.key.matches(key))
            .map(|(key, value)| {
                let record = ExtractionRecord {
                    key: key.to_string(),
                    value: value.clone(),
                    source: path.to_path_buf(),
                    index: *next_index,
                };
                *next_index += 1;
                record
            })
            .collect();

        debug!(
            "extract_file: {} records from {}",
            records.len(),
            path.display()
        );
        Ok(records)
    }

    /// Build the complete stub for every matching file under `root`.
    ///
    /// The record index is global to the run. Nothing is written here; a
    /// parse failure in any file aborts the whole build.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn build_document(
        &self,
        root: &Path,
        options: &ExtractOptions,
    ) -> ApplicationResult<BuildOutput> {
        let sources = self.scan(root, options)?;
        let mut document = OutputDocument::new(options.context.clone());
        let mut next_index = 0;

        for source in &sources {
            for record in self.extract_file(source, options, &mut next_index)? {
                trace!("record a{}: {}", record.index, record.key);
                document.push(&record);
            }
        }

        let summary = BuildSummary {
            files: sources.len(),
            records: document.len(),
        };
        info!(
            "build_document: {} records from {} files",
            summary.records, summary.files
        );
        Ok(BuildOutput {
            document,
            sources,
            summary,
        })
    }

    /// Replace `target` with the rendered document in a single step.
    #[instrument(skip_all, fields(target = %target.display()))]
    pub fn write_document(&self, target: &Path, document: &OutputDocument) -> ApplicationResult<()> {
        self.fs
            .write_atomic(target, &document.render())
            .map_err(|source| ApplicationError::OutputFailed {
                path: target.to_path_buf(),
                source,
            })?;
        info!("write_document: wrote {} lines", document.len());
        Ok(())
    }

    /// Compare `target` with the rendered document without touching it.
    ///
    /// A missing or different target is reported as stale.
    #[instrument(skip_all, fields(target = %target.display()))]
    pub fn check_document(&self, target: &Path, document: &OutputDocument) -> ApplicationResult<()> {
        if !self.fs.exists(target) {
            debug!("check_document: target missing");
            return Err(ApplicationError::Stale(target.to_path_buf()));
        }
        let current = self
            .fs
            .read_to_string(target)
            .with_path_context("read target", target)?;
        if current != document.render() {
            debug!("check_document: content differs");
            return Err(ApplicationError::Stale(target.to_path_buf()));
        }
        Ok(())
    }

    /// Build from `root` and write to `target`.
    pub fn run(
        &self,
        root: &Path,
        target: &Path,
        options: &ExtractOptions,
    ) -> ApplicationResult<BuildSummary> {
        let output = self.build_document(root, options)?;
        self.write_document(target, &output.document)?;
        Ok(output.summary)
    }
}
