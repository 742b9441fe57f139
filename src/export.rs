/// # Recipe Export
///
/// Copies the recipe into the local cache so it can be built later without
/// the project checkout:
///
/// ```text
/// <cache>/export/<name>/<version>/
/// ├── CMakeLists.txt   # exports
/// ├── sources.tgz      # exports_sources
/// ├── manifest.txt     # timestamp, then `path: sha256` lines
/// └── metadata.json    # reference, revision, recipe identity
/// ```
///
/// The recipe revision is the SHA-256 of the manifest body, so exporting the
/// same files twice yields the same revision.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::Utc;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tar::{Builder as TarBuilder, Header};

use crate::cache::RecipeCache;
use crate::errors::{RecipeError, Result};
use crate::recipe::Recipe;
use crate::utils::{PrintOp, Utils};

pub const MANIFEST_FILE: &str = "manifest.txt";
pub const SOURCES_ARCHIVE: &str = "sources.tgz";
pub const METADATA_FILE: &str = "metadata.json";
/// Prefix of source entries in the manifest
pub const SOURCE_PREFIX: &str = "export_source";

/// File checksums of an export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    /// UNIX time of the export
    pub timestamp: i64,
    /// `relative/path -> sha256`, sorted by path
    pub entries: BTreeMap<String, String>,
}

impl Manifest {
    /// Sorted `path: sha256` lines
    pub fn body(&self) -> String {
        self.entries
            .iter()
            .map(|(path, hash)| format!("{}: {}\n", path, hash))
            .collect()
    }

    pub fn revision(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.body().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn to_text(&self) -> String {
        format!("{}\n{}", self.timestamp, self.body())
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let timestamp = lines
            .next()
            .and_then(|l| l.trim().parse().ok())
            .ok_or_else(|| RecipeError::InvalidManifest("missing timestamp".to_string()))?;
        let mut entries = BTreeMap::new();
        for line in lines.filter(|l| !l.trim().is_empty()) {
            let (path, hash) = line.rsplit_once(": ").ok_or_else(|| {
                RecipeError::InvalidManifest(format!("malformed line: {}", line))
            })?;
            entries.insert(path.to_string(), hash.to_string());
        }
        Ok(Manifest { timestamp, entries })
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }
}

/// Outcome of [`export_recipe`]
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub folder: PathBuf,
    pub revision: String,
    /// Revision of the export this one replaced
    pub previous_revision: Option<String>,
    pub exports: Vec<PathBuf>,
    pub sources: Vec<PathBuf>,
}

impl ExportResult {
    pub fn unchanged(&self) -> bool {
        self.previous_revision.as_deref() == Some(self.revision.as_str())
    }
}

#[derive(Serialize)]
struct ExportMetadata<'a> {
    reference: String,
    revision: &'a str,
    exported_at: String,
    recipe: &'a Recipe,
}

fn file_sha256(path: &Path) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(fs::read(path)?);
    Ok(format!("{:x}", hasher.finalize()))
}

fn manifest_key(rel: &Path) -> String {
    Utils::cmake_path(rel)
}

/// Export the recipe of `project_root` into the cache
pub fn export_recipe(
    recipe: &Recipe,
    project_root: &Path,
    cache: &RecipeCache,
) -> Result<ExportResult> {
    if !project_root.is_dir() {
        return Err(RecipeError::InvalidDirectory(format!(
            "{} is not a directory",
            project_root.display()
        )));
    }
    let output = recipe.output();
    let folder = cache.export_dir(&recipe.name, &recipe.version);

    let manifest_path = folder.join(MANIFEST_FILE);
    let previous_revision = if manifest_path.exists() {
        match Manifest::load(&manifest_path) {
            Ok(previous) => Some(previous.revision()),
            Err(e) => {
                output.warning(format!(
                    "ignoring unreadable manifest {}: {}",
                    manifest_path.display(),
                    e
                ));
                None
            }
        }
    } else {
        None
    };

    // Built next to the final folder and moved in only once complete
    fs::create_dir_all(cache.export_root())?;
    let staging = tempfile::TempDir::new_in(cache.export_root())?;
    let stage = staging.path();

    let mut manifest = Manifest {
        timestamp: Utc::now().timestamp(),
        entries: BTreeMap::new(),
    };

    let exports = recipe.exports.resolve(project_root)?;
    for pattern in &exports.unmatched {
        output.warning(format!("exports pattern '{}' matched no files", pattern));
    }
    for rel in &exports.files {
        let src = project_root.join(rel);
        let dst = stage.join(rel);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        Utils::print_status(
            output,
            &folder.join(rel),
            &manifest_key(rel),
            PrintOp::Copy {
                from: manifest_key(rel),
                to: format!("export/{}", manifest_key(rel)),
            },
        );
        fs::copy(&src, &dst)?;
        manifest.entries.insert(manifest_key(rel), file_sha256(&src)?);
    }

    let sources = recipe.exports_sources.resolve(project_root)?;
    for pattern in &sources.unmatched {
        output.warning(format!("exports_sources pattern '{}' matched no files", pattern));
    }
    write_sources_archive(project_root, &sources.files, stage)?;
    for rel in &sources.files {
        manifest.entries.insert(
            format!("{}/{}", SOURCE_PREFIX, manifest_key(rel)),
            file_sha256(&project_root.join(rel))?,
        );
    }

    let revision = manifest.revision();
    fs::write(stage.join(MANIFEST_FILE), manifest.to_text())?;

    let metadata = ExportMetadata {
        reference: recipe.reference(),
        revision: &revision,
        exported_at: Utc::now().to_rfc3339(),
        recipe,
    };
    fs::write(
        stage.join(METADATA_FILE),
        serde_json::to_string_pretty(&metadata)?,
    )?;

    replace_dir(stage, &folder, &cache.export_root())?;

    Ok(ExportResult {
        folder,
        revision,
        previous_revision,
        exports: exports.files,
        sources: sources.files,
    })
}

/// Move the finished `stage` to `folder`, retiring any previous content
/// into a scratch directory under `scratch_root` first.
fn replace_dir(stage: &Path, folder: &Path, scratch_root: &Path) -> Result<()> {
    if let Some(parent) = folder.parent() {
        fs::create_dir_all(parent)?;
    }
    let retired = tempfile::TempDir::new_in(scratch_root)?;
    if folder.exists() {
        fs::rename(folder, retired.path().join("old"))?;
    }
    fs::rename(stage, folder)?;
    Ok(())
}

/// Pack `files` (relative to `root`) into `<folder>/sources.tgz`.
///
/// Headers carry no timestamps or owners so equal inputs give equal archives.
fn write_sources_archive(root: &Path, files: &[PathBuf], folder: &Path) -> Result<PathBuf> {
    let tmp = tempfile::NamedTempFile::new_in(folder)?;
    {
        let enc = GzEncoder::new(tmp.as_file(), Compression::default());
        let mut tar = TarBuilder::new(enc);
        for rel in files {
            let data = fs::read(root.join(rel))?;
            let mut header = Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_mtime(0);
            header.set_uid(0);
            header.set_gid(0);
            tar.append_data(&mut header, rel, data.as_slice())?;
        }
        let enc = tar.into_inner()?;
        enc.finish()?;
    }
    let archive = folder.join(SOURCES_ARCHIVE);
    tmp.persist(&archive).map_err(|e| e.error)?;
    Ok(archive)
}

/// Unpack an exported `sources.tgz` into `dest`
pub fn unpack_sources(export_folder: &Path, dest: &Path) -> Result<()> {
    let file = File::open(export_folder.join(SOURCES_ARCHIVE))?;
    let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(file));
    fs::create_dir_all(dest)?;
    archive.unpack(dest)?;
    Ok(())
}
