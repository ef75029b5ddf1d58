//! [`TestWorkspace`] builder for mapping and env-file scenarios.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Default file names inside a [`TestWorkspace`].
pub const MAPPING_FILE: &str = "map.json";
pub const ENV_FILE: &str = ".env";

/// A temporary directory with helpers for writing and inspecting the files
/// an envchanter run touches.
///
/// # Example
///
/// ```rust,no_run
/// use envchanter_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new()
///     .with_mapping(&[("A", "/app/a")])
///     .with_env("A=1\n");
/// assert_eq!(ws.read_env(), "A=1\n");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("TestWorkspace::new: failed to create temp dir"),
        }
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the mapping file.
    pub fn mapping_path(&self) -> PathBuf {
        self.root().join(MAPPING_FILE)
    }

    /// Path of the env-file.
    pub fn env_path(&self) -> PathBuf {
        self.root().join(ENV_FILE)
    }

    /// Write the mapping file as a JSON object of the given pairs.
    pub fn with_mapping(self, pairs: &[(&str, &str)]) -> Self {
        let map: BTreeMap<&str, &str> = pairs.iter().copied().collect();
        let json = serde_json::to_string_pretty(&map)
            .expect("TestWorkspace::with_mapping: failed to encode mapping");
        self.with_raw_mapping(&json)
    }

    /// Write arbitrary text as the mapping file.
    pub fn with_raw_mapping(self, content: &str) -> Self {
        fs::write(self.mapping_path(), content)
            .expect("TestWorkspace::with_raw_mapping: failed to write mapping");
        self
    }

    /// Write the env-file.
    pub fn with_env(self, content: &str) -> Self {
        fs::write(self.env_path(), content).expect("TestWorkspace::with_env: failed to write env");
        self
    }

    /// Read the env-file.
    ///
    /// # Panics
    /// Panics if the env-file does not exist.
    pub fn read_env(&self) -> String {
        fs::read_to_string(self.env_path())
            .unwrap_or_else(|e| panic!("env-file not readable at {:?}: {}", self.env_path(), e))
    }

    /// Whether the env-file exists.
    pub fn env_exists(&self) -> bool {
        self.env_path().exists()
    }

    /// Permission bits of the env-file.
    #[cfg(unix)]
    pub fn env_mode(&self) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(self.env_path())
            .expect("TestWorkspace::env_mode: env-file missing")
            .permissions()
            .mode()
            & 0o777
    }
}
