//! Discovery of the lookup table source.
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

/// File name of the lookup table export, also the suffix embedded resources are matched on
pub const LOOKUP_FILE_NAME: &str = "lookuptables.csv";

/// Directory next to the executable that may hold [`LOOKUP_FILE_NAME`]
pub const LOOKUP_DIR_NAME: &str = "Lookups";

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to open lookup source {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("unable to determine the application directory: {0}")]
    AppDir(#[source] io::Error),
}

/// A resource compiled into the host application, e.g. via `include_bytes!`
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedResource {
    pub name: &'static str,
    pub contents: &'static [u8],
}

/// Where a lookup source was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOrigin {
    Embedded(String),
    File(PathBuf),
}

impl Display for SourceOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded(name) => write!(f, "embedded resource {name}"),
            Self::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

/// An opened lookup source
pub struct LookupSource {
    origin: SourceOrigin,
    reader: Box<dyn BufRead + Send>,
}

impl LookupSource {
    pub fn new(origin: SourceOrigin, reader: impl BufRead + Send + 'static) -> Self {
        Self {
            origin,
            reader: Box::new(reader),
        }
    }

    pub fn origin(&self) -> &SourceOrigin {
        &self.origin
    }

    pub(crate) fn into_parts(self) -> (SourceOrigin, Box<dyn BufRead + Send>) {
        (self.origin, self.reader)
    }
}

impl std::fmt::Debug for LookupSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupSource")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Locates the lookup table source for a [`LookupRegistry`](crate::LookupRegistry).
///
/// `Ok(None)` means no source exists, which loads as zero tables.
pub trait SourceLocator: std::fmt::Debug + Send + Sync {
    fn locate(&self) -> Result<Option<LookupSource>, SourceError>;
}

/// The default search: an embedded resource whose name ends in [`LOOKUP_FILE_NAME`], then
/// `<app dir>/Lookups/lookuptables.csv`, then `<app dir>/lookuptables.csv`.
#[derive(Debug, Clone)]
pub struct AppDirLocator {
    app_dir: PathBuf,
    resources: Vec<EmbeddedResource>,
}

impl AppDirLocator {
    pub fn new(app_dir: impl Into<PathBuf>) -> Self {
        Self {
            app_dir: app_dir.into(),
            resources: vec![],
        }
    }

    /// Search relative to the directory of the running executable
    pub fn for_current_exe() -> Result<Self, SourceError> {
        let exe = std::env::current_exe().map_err(SourceError::AppDir)?;
        let dir = exe.parent().ok_or_else(|| {
            SourceError::AppDir(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} has no parent directory", exe.display()),
            ))
        })?;
        Ok(Self::new(dir))
    }

    pub fn with_resource(mut self, resource: EmbeddedResource) -> Self {
        self.resources.push(resource);
        self
    }

    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    /// The file locations searched, in order
    pub fn candidate_paths(&self) -> [PathBuf; 2] {
        [
            self.app_dir.join(LOOKUP_DIR_NAME).join(LOOKUP_FILE_NAME),
            self.app_dir.join(LOOKUP_FILE_NAME),
        ]
    }
}

impl SourceLocator for AppDirLocator {
    fn locate(&self) -> Result<Option<LookupSource>, SourceError> {
        if let Some(resource) = self
            .resources
            .iter()
            .find(|r| ends_with_ignore_ascii_case(r.name, LOOKUP_FILE_NAME))
        {
            return Ok(Some(LookupSource::new(
                SourceOrigin::Embedded(resource.name.to_string()),
                Cursor::new(resource.contents),
            )));
        }

        for path in self.candidate_paths() {
            if path.is_file() {
                return open_file(path).map(Some);
            }
        }

        Ok(None)
    }
}

/// A single explicitly configured file; a missing file is treated as no source.
#[derive(Debug, Clone)]
pub struct FileLocator {
    path: PathBuf,
}

impl FileLocator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SourceLocator for FileLocator {
    fn locate(&self) -> Result<Option<LookupSource>, SourceError> {
        match open_file(self.path.clone()) {
            Ok(source) => Ok(Some(source)),
            Err(SourceError::Open { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn open_file(path: PathBuf) -> Result<LookupSource, SourceError> {
    match File::open(&path) {
        Ok(file) => Ok(LookupSource::new(
            SourceOrigin::File(path),
            BufReader::new(file),
        )),
        Err(source) => Err(SourceError::Open { path, source }),
    }
}

fn ends_with_ignore_ascii_case(name: &str, suffix: &str) -> bool {
    name.len()
        .checked_sub(suffix.len())
        .and_then(|start| name.get(start..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}
