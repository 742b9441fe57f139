/// # Local Cache
///
/// Folder where exported recipes, profiles and installed packages live.
///
/// ## Cache Structure
///
/// ```text
/// ~/.cpprecipe/ (or $CPPRECIPE_HOME)
/// ├── export/    # exported recipes: export/<name>/<version>/
/// ├── p/         # packages: p/<name>/<version>/package
/// └── profiles/  # build profiles, default.toml is picked up automatically
/// ```
///
/// ## Example Usage
///
/// ```rust,no_run
/// use cpprecipe::cache::RecipeCache;
///
/// let cache = RecipeCache::new()?;
/// cache.ensure_dirs()?;
///
/// let folder = cache.package_folder("cppsharp", "1.0.0");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::cache::CacheError;

/// Environment variable overriding the cache root
pub const HOME_ENV: &str = "CPPRECIPE_HOME";

pub struct RecipeCache {
    /// Root directory of the cache
    root: PathBuf,
}

impl RecipeCache {
    /// Create a cache rooted at `$CPPRECIPE_HOME`, or `~/.cpprecipe`
    pub fn new() -> Result<Self, CacheError> {
        let root = Self::default_cache_dir()?;
        Ok(Self { root })
    }

    /// Create a cache with a custom root directory
    ///
    /// ```rust,no_run
    /// use cpprecipe::cache::RecipeCache;
    /// let cache = RecipeCache::with_root(std::env::temp_dir().join("cpprecipe_cache")).unwrap();
    /// ```
    pub fn with_root<P: AsRef<Path>>(root: P) -> Result<Self, CacheError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            return Err(CacheError::InvalidPath(format!(
                "Cache root must be absolute: {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    fn default_cache_dir() -> Result<PathBuf, CacheError> {
        // Relative overrides are resolved against CWD
        if let Some(v) = std::env::var_os(HOME_ENV) {
            let p = PathBuf::from(v);
            let abs = if p.is_absolute() {
                p
            } else {
                std::env::current_dir()?.join(p)
            };
            return Ok(abs);
        }

        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| CacheError::CacheDirNotFound)?;

        Ok(PathBuf::from(home).join(".cpprecipe"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn export_root(&self) -> PathBuf {
        self.root.join("export")
    }

    pub fn packages_root(&self) -> PathBuf {
        self.root.join("p")
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    /// Profile used when none is given on the command line
    pub fn default_profile(&self) -> PathBuf {
        self.profiles_dir().join("default.toml")
    }

    /// Folder an exported recipe is written to
    pub fn export_dir(&self, name: &str, version: &str) -> PathBuf {
        self.export_root().join(name).join(version)
    }

    /// Root of a package reference, also where its dependency files point
    pub fn package_root(&self, name: &str, version: &str) -> PathBuf {
        self.packages_root().join(name).join(version)
    }

    /// Install prefix used by `package()`
    pub fn package_folder(&self, name: &str, version: &str) -> PathBuf {
        self.package_root(name, version).join("package")
    }

    pub fn ensure_dirs(&self) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(self.export_root())?;
        std::fs::create_dir_all(self.packages_root())?;
        std::fs::create_dir_all(self.profiles_dir())?;
        Ok(())
    }

    /// Remove the whole cache
    pub fn clear_all(&self) -> Result<(), CacheError> {
        if self.root.exists() {
            std::fs::remove_dir_all(&self.root)?;
        }
        Ok(())
    }

    /// Clear one cache directory (`export`, `p` or `profiles`)
    pub fn clear_dir(&self, dir: &str) -> Result<(), CacheError> {
        let path = match dir {
            "export" => self.export_root(),
            "p" => self.packages_root(),
            "profiles" => self.profiles_dir(),
            _ => {
                return Err(CacheError::InvalidPath(format!(
                    "Unknown cache directory: {}",
                    dir
                )));
            }
        };

        if path.exists() {
            std::fs::remove_dir_all(&path)?;
            std::fs::create_dir_all(&path)?;
        }

        Ok(())
    }

    /// Total size and number of files in the cache
    pub fn stats(&self) -> Result<CacheStats, CacheError> {
        let mut stats = CacheStats::default();
        if !self.root.exists() {
            return Ok(stats);
        }

        for entry in WalkDir::new(&self.root) {
            let entry = entry?;
            if entry.file_type().is_file() {
                stats.file_count += 1;
                stats.total_size += entry.metadata()?.len();
            }
        }

        Ok(stats)
    }
}

#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    /// Total size in bytes
    pub total_size: u64,
    pub file_count: usize,
}

impl CacheStats {
    /// Size with a binary unit, e.g. `1.50 KB`
    pub fn format_size(&self) -> String {
        const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
        let exp = match self.total_size {
            0 => 0,
            n => (n.ilog2() / 10).min(UNITS.len() as u32 - 1),
        };
        let size = self.total_size as f64 / 1024f64.powi(exp as i32);
        format!("{:.2} {}", size, UNITS[exp as usize])
    }
}
