//! Tree fixtures shared by the dirmirror integration tests

use async_trait::async_trait;
use dirmirror_io::LocalFileSystem;
use dirmirror_types::{Entry, Error, FileSystem, Result};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;
use walkdir::WalkDir;

/// One node of a snapshotted tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Regular file with its contents
    File(Vec<u8>),
    /// Directory
    Directory,
}

/// Relative path to node, ordered by path
pub type TreeSnapshot = BTreeMap<PathBuf, Node>;

/// Declarative description of a directory tree
///
/// Parent directories of files are created implicitly.
#[derive(Debug, Clone, Default)]
pub struct TreeSpec {
    nodes: Vec<(PathBuf, Node)>,
}

impl TreeSpec {
    /// Start an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given contents
    pub fn file(mut self, path: impl Into<PathBuf>, contents: impl AsRef<[u8]>) -> Self {
        self.nodes
            .push((path.into(), Node::File(contents.as_ref().to_vec())));
        self
    }

    /// Add a directory
    pub fn dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.nodes.push((path.into(), Node::Directory));
        self
    }

    /// Create the tree below `root`, which must already exist
    pub fn materialize(&self, root: &Path) {
        for (path, node) in &self.nodes {
            let full_path = root.join(path);
            match node {
                Node::Directory => {
                    fs::create_dir_all(&full_path).expect("Failed to create fixture directory");
                }
                Node::File(contents) => {
                    if let Some(parent) = full_path.parent() {
                        fs::create_dir_all(parent).expect("Failed to create fixture parent");
                    }
                    fs::write(&full_path, contents).expect("Failed to write fixture file");
                }
            }
        }
    }
}

/// Capture every file and directory below `root`
pub fn snapshot_tree(root: &Path) -> TreeSnapshot {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            let entry = entry.expect("Failed to walk tree");
            let relative = entry
                .path()
                .strip_prefix(root)
                .expect("Walked outside the root")
                .to_path_buf();
            let node = if entry.file_type().is_dir() {
                Node::Directory
            } else {
                Node::File(fs::read(entry.path()).expect("Failed to read snapshot file"))
            };
            (relative, node)
        })
        .collect()
}

/// Paths and kinds only, with file sizes instead of contents
pub fn shape_of(snapshot: &TreeSnapshot) -> BTreeMap<PathBuf, Option<usize>> {
    snapshot
        .iter()
        .map(|(path, node)| {
            let size = match node {
                Node::File(contents) => Some(contents.len()),
                Node::Directory => None,
            };
            (path.clone(), size)
        })
        .collect()
}

/// A source and a destination directory inside one temporary directory
#[derive(Debug)]
pub struct MirrorFixture {
    _temp_dir: TempDir,
    /// Source root
    pub source: PathBuf,
    /// Destination root
    pub dest: PathBuf,
}

impl MirrorFixture {
    /// Create both roots and populate them
    pub fn new(source: &TreeSpec, dest: &TreeSpec) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let source_root = temp_dir.path().join("source");
        let dest_root = temp_dir.path().join("dest");
        fs::create_dir(&source_root).expect("Failed to create source root");
        fs::create_dir(&dest_root).expect("Failed to create dest root");

        source.materialize(&source_root);
        dest.materialize(&dest_root);

        Self {
            _temp_dir: temp_dir,
            source: source_root,
            dest: dest_root,
        }
    }

    /// Snapshot of the source tree
    pub fn source_snapshot(&self) -> TreeSnapshot {
        snapshot_tree(&self.source)
    }

    /// Snapshot of the destination tree
    pub fn dest_snapshot(&self) -> TreeSnapshot {
        snapshot_tree(&self.dest)
    }
}

/// Local filesystem whose listings come back in a seed-dependent order
#[derive(Debug, Clone, Copy)]
pub struct ShuffledFileSystem {
    inner: LocalFileSystem,
    seed: u64,
}

impl ShuffledFileSystem {
    /// Create a wrapper that permutes listings deterministically from `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            inner: LocalFileSystem::new(),
            seed,
        }
    }

    fn shuffle(&self, entries: &mut [Entry]) {
        // xorshift64; zero is a fixed point so nudge it
        let mut state = self.seed | 1;
        for i in (1..entries.len()).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let j = (state % (i as u64 + 1)) as usize;
            entries.swap(i, j);
        }
    }
}

#[async_trait]
impl FileSystem for ShuffledFileSystem {
    async fn list_directory(&self, path: &Path) -> Result<Vec<Entry>> {
        let mut entries = self.inner.list_directory(path).await?;
        self.shuffle(&mut entries);
        Ok(entries)
    }

    async fn stat_file(&self, path: &Path) -> Result<Entry> {
        self.inner.stat_file(path).await
    }

    async fn read_file_contents(&self, path: &Path) -> Result<Vec<u8>> {
        self.inner.read_file_contents(path).await
    }

    async fn write_file_contents(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.inner.write_file_contents(path, contents).await
    }

    async fn create_directory(&self, path: &Path) -> Result<()> {
        self.inner.create_directory(path).await
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        self.inner.remove_file(path).await
    }

    async fn remove_directory_recursive(&self, path: &Path) -> Result<()> {
        self.inner.remove_directory_recursive(path).await
    }

    async fn set_modified(&self, path: &Path, modified: SystemTime) -> Result<()> {
        self.inner.set_modified(path, modified).await
    }
}

/// Local filesystem that refuses to write files with one particular name
#[derive(Debug, Clone)]
pub struct FailingWriteFileSystem {
    inner: LocalFileSystem,
    file_name: OsString,
}

impl FailingWriteFileSystem {
    /// Fail every write whose final path component is `file_name`
    pub fn new(file_name: impl Into<OsString>) -> Self {
        Self {
            inner: LocalFileSystem::new(),
            file_name: file_name.into(),
        }
    }
}

#[async_trait]
impl FileSystem for FailingWriteFileSystem {
    async fn list_directory(&self, path: &Path) -> Result<Vec<Entry>> {
        self.inner.list_directory(path).await
    }

    async fn stat_file(&self, path: &Path) -> Result<Entry> {
        self.inner.stat_file(path).await
    }

    async fn read_file_contents(&self, path: &Path) -> Result<Vec<u8>> {
        self.inner.read_file_contents(path).await
    }

    async fn write_file_contents(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if path.file_name() == Some(self.file_name.as_os_str()) {
            return Err(Error::write_failure(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "injected failure"),
            ));
        }
        self.inner.write_file_contents(path, contents).await
    }

    async fn create_directory(&self, path: &Path) -> Result<()> {
        self.inner.create_directory(path).await
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        self.inner.remove_file(path).await
    }

    async fn remove_directory_recursive(&self, path: &Path) -> Result<()> {
        self.inner.remove_directory_recursive(path).await
    }

    async fn set_modified(&self, path: &Path, modified: SystemTime) -> Result<()> {
        self.inner.set_modified(path, modified).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_spec_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        TreeSpec::new()
            .file("a/b/c.txt", "c")
            .dir("empty")
            .materialize(temp_dir.path());

        let snapshot = snapshot_tree(temp_dir.path());
        let paths: Vec<_> = snapshot.keys().cloned().collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("a"),
                PathBuf::from("a/b"),
                PathBuf::from("a/b/c.txt"),
                PathBuf::from("empty"),
            ]
        );
        assert_eq!(snapshot[Path::new("a/b/c.txt")], Node::File(b"c".to_vec()));
    }

    #[tokio::test]
    async fn test_shuffle_keeps_entries() {
        let temp_dir = TempDir::new().unwrap();
        let mut tree = TreeSpec::new();
        for i in 0..12 {
            tree = tree.file(format!("f{i:02}"), "x");
        }
        tree.materialize(temp_dir.path());

        let mut shuffled = ShuffledFileSystem::new(7)
            .list_directory(temp_dir.path())
            .await
            .unwrap();
        assert_eq!(shuffled.len(), 12);

        dirmirror_types::sort_entries(&mut shuffled);
        assert_eq!(shuffled[0].name, "f00");
        assert_eq!(shuffled[11].name, "f11");
    }
}
