// "Has this session already seen the intro" marker.
// Read once at mount, written once when the intro completes.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::Result;

pub trait SessionStore {
    fn has_seen_intro(&self) -> bool;
    fn mark_intro_seen(&mut self) -> Result<()>;
}

/// Process-lifetime marker.
#[derive(Debug, Default, Clone)]
pub struct MemorySession {
    seen: bool,
}

impl MemorySession {
    pub fn new(seen: bool) -> Self {
        Self { seen }
    }
}

impl SessionStore for MemorySession {
    fn has_seen_intro(&self) -> bool {
        self.seen
    }

    fn mark_intro_seen(&mut self) -> Result<()> {
        self.seen = true;
        Ok(())
    }
}

/// Marker file; its existence means "seen". Survives process restarts until
/// the file is deleted, which is how the demo scopes a session.
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Forget the marker (start a new session).
    pub fn reset(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SessionStore for FileSession {
    fn has_seen_intro(&self) -> bool {
        self.path.is_file()
    }

    fn mark_intro_seen(&mut self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(&self.path, b"true")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_session_flips_once_marked() {
        let mut s = MemorySession::default();
        assert!(!s.has_seen_intro());
        s.mark_intro_seen().unwrap();
        assert!(s.has_seen_intro());
    }

    #[test]
    fn file_session_round_trips_through_disk() {
        let path = std::env::temp_dir().join(format!("cursor-reveal-test-{}.seen", std::process::id()));
        let mut s = FileSession::new(&path);
        s.reset().unwrap();
        assert!(!s.has_seen_intro());
        s.mark_intro_seen().unwrap();
        assert!(FileSession::new(&path).has_seen_intro());
        s.reset().unwrap();
        assert!(!s.has_seen_intro());
    }
}
