use std::io;
use std::path::Path;

/// The filesystem side effects of expansion and saving.
pub trait Filesystem {
    fn exists(&self, path: &Path) -> bool;

    /// Creates `path` and any missing parents. Not an error if it already exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Writes `contents` to `path`, replacing any existing file.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}
