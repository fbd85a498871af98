//! Mock system implementation for testing

use super::System;
use std::collections::{HashMap, HashSet, VecDeque};
use std::env::VarError;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// In-memory implementation of System trait for testing
///
/// `MockSystem` provides an in-memory filesystem and environment plus a
/// scripted terminal: input lines are queued up front and everything the
/// program shows is captured for assertions. Reading past the scripted
/// input fails with `UnexpectedEof`, which is what breaks the otherwise
/// infinite prompt retry loops inside tests.
///
/// # Example
/// ```
/// use toggl_commit::system::{MockSystem, System};
/// use std::path::Path;
///
/// let system = MockSystem::new()
///     .with_env("HOME", "/home/user")
///     .with_file("/test/file.txt", b"Hello, world!")
///     .with_input(&["42"]);
///
/// assert_eq!(system.env_var("HOME").unwrap(), "/home/user");
/// assert!(system.exists(Path::new("/test/file.txt")));
/// assert_eq!(system.read_line("> ").unwrap(), "42");
/// ```
#[derive(Clone)]
pub struct MockSystem {
    state: Arc<RwLock<MockSystemState>>,
}

struct MockSystemState {
    env_vars: HashMap<String, String>,
    current_dir: PathBuf,
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
    input: VecDeque<String>,
    shown: Vec<String>,
    reads: usize,
}

impl MockSystem {
    /// Create a new `MockSystem` with default state
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockSystemState {
                env_vars: HashMap::new(),
                current_dir: PathBuf::from("/"),
                files: HashMap::new(),
                dirs: HashSet::from([PathBuf::from("/")]),
                input: VecDeque::new(),
                shown: Vec::new(),
                reads: 0,
            })),
        }
    }

    /// Set an environment variable (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_env(self, key: &str, value: &str) -> Self {
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            state.env_vars.insert(key.to_owned(), value.to_owned());
        }
        self
    }

    /// Set the current working directory (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_current_dir<P: AsRef<Path>>(self, dir: P) -> Self {
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            state.current_dir = dir.as_ref().to_path_buf();
        }
        self
    }

    /// Add a file with contents (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_file<P: AsRef<Path>>(self, path: P, contents: &[u8]) -> Self {
        let path_buf = path.as_ref().to_path_buf();
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            if let Some(parent) = path_buf.parent() {
                Self::ensure_parent_dirs(&mut state.dirs, parent);
            }
            state.files.insert(path_buf, contents.to_vec());
        }
        self
    }

    /// Add a directory (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_dir<P: AsRef<Path>>(self, path: P) -> Self {
        let path_buf = path.as_ref().to_path_buf();
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            Self::ensure_parent_dirs(&mut state.dirs, &path_buf);
            state.dirs.insert(path_buf);
        }
        self
    }

    /// Queue operator input lines (builder pattern)
    ///
    /// Lines are consumed in order by `read_line` and `read_secret`.
    #[must_use]
    #[inline]
    pub fn with_input(self, lines: &[&str]) -> Self {
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            state.input.extend(lines.iter().map(|&l| l.to_owned()));
        }
        self
    }

    /// All lines shown to the operator so far
    #[must_use]
    #[inline]
    pub fn shown_lines(&self) -> Vec<String> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.shown.clone()
    }

    /// Number of input lines consumed so far
    #[must_use]
    #[inline]
    pub fn reads(&self) -> usize {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.reads
    }

    /// File contents as a string, if the file exists
    #[must_use]
    #[inline]
    pub fn file_string<P: AsRef<Path>>(&self, path: P) -> Option<String> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state
            .files
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    #[inline]
    fn ensure_parent_dirs(dirs: &mut HashSet<PathBuf>, path: &Path) {
        let mut current = path;
        dirs.insert(current.to_path_buf());
        while let Some(parent) = current.parent() {
            dirs.insert(parent.to_path_buf());
            current = parent;
        }
    }

    #[inline]
    fn pop_input(&self) -> io::Result<String> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.reads += 1;
        state.input.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "scripted input exhausted")
        })
    }
}

impl Default for MockSystem {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl System for MockSystem {
    #[inline]
    fn env_var(&self, key: &str) -> Result<String, VarError> {
        let state = self.state.read().map_err(|_| VarError::NotPresent)?;
        state.env_vars.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[inline]
    fn current_dir(&self) -> io::Result<PathBuf> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        Ok(state.current_dir.clone())
    }

    #[inline]
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state
            .files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("{}", path.display()))
            })
    }

    #[inline]
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !state.dirs.contains(parent)
        {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent directory missing: {}", parent.display()),
            ));
        }
        state.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    #[inline]
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        Self::ensure_parent_dirs(&mut state.dirs, path);
        Ok(())
    }

    #[inline]
    fn exists(&self, path: &Path) -> bool {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    #[inline]
    fn show(&self, line: &str) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.shown.push(line.to_owned());
    }

    #[inline]
    fn read_line(&self, _prompt: &str) -> io::Result<String> {
        self.pop_input()
    }

    #[inline]
    fn read_secret(&self, _prompt: &str) -> io::Result<String> {
        self.pop_input()
    }
}
