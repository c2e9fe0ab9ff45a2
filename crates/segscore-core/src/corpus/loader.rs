//! Corpus loading from files and directories

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{CorpusFormat, SampleStream};
use crate::error::{EvalError, EvalResult};
use crate::sample::{DEFAULT_SPLIT_TAG, TokenSample};

/// Opens corpus files as lazy sample streams
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    /// Fixed format; `None` infers it from each file's extension
    format: Option<CorpusFormat>,
    split_tag: String,
}

impl CorpusLoader {
    pub fn new() -> Self {
        Self {
            format: None,
            split_tag: DEFAULT_SPLIT_TAG.to_string(),
        }
    }

    pub fn with_format(mut self, format: CorpusFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_split_tag(mut self, split_tag: impl Into<String>) -> Self {
        self.split_tag = split_tag.into();
        self
    }

    /// Open a corpus file, or every corpus file below a directory
    ///
    /// Directory entries are visited in path order; only `.txt`, `.tok`,
    /// `.jsonl` and `.json` files are read. Files are opened one at a time
    /// as the stream advances. Entries that cannot be walked, such as a
    /// dangling link, surface as `Io` errors at their position in the stream.
    pub fn open(&self, path: impl AsRef<Path>) -> EvalResult<CorpusStream> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EvalError::io_with_path(
                std::io::Error::new(std::io::ErrorKind::NotFound, "corpus not found"),
                path.display().to_string(),
            ));
        }

        let files: VecDeque<EvalResult<PathBuf>> = if path.is_dir() {
            WalkDir::new(path)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) if Self::is_corpus_file(entry.path()) => Some(Ok(entry.into_path())),
                    Ok(_) => None,
                    Err(e) => Some(Err(walk_error(e))),
                })
                .collect()
        } else {
            VecDeque::from([Ok(path.to_path_buf())])
        };

        if files.is_empty() {
            tracing::warn!("No corpus files found under {:?}", path);
        } else {
            tracing::debug!(files = files.len(), "Opened corpus {:?}", path);
        }

        Ok(CorpusStream {
            files,
            current: None,
            format: self.format,
            split_tag: self.split_tag.clone(),
        })
    }

    fn is_corpus_file(path: &Path) -> bool {
        if !path.is_file() {
            return false;
        }

        matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("txt") | Some("tok") | Some("jsonl") | Some("json")
        )
    }
}

fn walk_error(e: walkdir::Error) -> EvalError {
    tracing::warn!("Failed to walk corpus entry: {}", e);
    EvalError::Io {
        message: e.to_string(),
        path: e.path().map(|p| p.display().to_string()),
    }
}

impl Default for CorpusLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy stream over one or more corpus files
pub struct CorpusStream {
    files: VecDeque<EvalResult<PathBuf>>,
    current: Option<(PathBuf, SampleStream<BufReader<File>>)>,
    format: Option<CorpusFormat>,
    split_tag: String,
}

impl CorpusStream {
    /// Files not yet opened, counting unwalkable entries
    pub fn remaining_files(&self) -> usize {
        self.files.len()
    }
}

impl Iterator for CorpusStream {
    type Item = EvalResult<TokenSample>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((path, stream)) = &mut self.current {
                match stream.next() {
                    Some(Err(EvalError::Io { message, path: None })) => {
                        return Some(Err(EvalError::Io {
                            message,
                            path: Some(path.display().to_string()),
                        }));
                    }
                    Some(item) => return Some(item),
                    None => self.current = None,
                }
            }

            let path = match self.files.pop_front()? {
                Ok(path) => path,
                Err(e) => return Some(Err(e)),
            };
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(e) => return Some(Err(EvalError::io_with_path(e, path.display().to_string()))),
            };
            let format = self.format.unwrap_or_else(|| CorpusFormat::from_path(&path));
            tracing::debug!(format = %format, "Reading corpus file {:?}", path);

            let stream = SampleStream::new(BufReader::new(file), format, self.split_tag.clone());
            self.current = Some((path, stream));
        }
    }
}
