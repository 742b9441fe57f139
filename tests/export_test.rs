use std::fs;
use std::path::Path;
use tempfile::TempDir;

use cpprecipe::cache::RecipeCache;
use cpprecipe::export::{export_recipe, unpack_sources, Manifest, MANIFEST_FILE, METADATA_FILE, SOURCES_ARCHIVE};
use cpprecipe::recipe::Recipe;
use cpprecipe::types::ExportFileSet;

fn write_project(root: &Path) {
    fs::write(
        root.join("CMakeLists.txt"),
        "project(CppSharp VERSION 1.0.0 DESCRIPTION \"Template\")\n",
    )
    .unwrap();
    fs::create_dir_all(root.join("src").join("core")).unwrap();
    fs::write(root.join("src").join("main.cpp"), "int main() {}\n").unwrap();
    fs::write(root.join("src").join("core").join("pool.hpp"), "#pragma once\n").unwrap();
    fs::create_dir_all(root.join("cmake")).unwrap();
    fs::write(root.join("cmake").join("warnings.cmake"), "# warnings\n").unwrap();
    fs::write(root.join("LICENSE"), "MIT\n").unwrap();
    // build output must never be exported
    fs::create_dir_all(root.join("build")).unwrap();
    fs::write(root.join("build").join("junk.o"), "obj").unwrap();
}

#[test]
fn test_export_layout_and_manifest() {
    let project = TempDir::new().unwrap();
    let cache_dir = TempDir::new().unwrap();
    write_project(project.path());
    let cache = RecipeCache::with_root(cache_dir.path()).unwrap();
    let recipe = Recipe::load(project.path()).unwrap();

    let result = export_recipe(&recipe, project.path(), &cache).unwrap();
    assert_eq!(result.folder, cache.export_dir("cppsharp", "1.0.0"));
    assert!(result.folder.join("CMakeLists.txt").is_file());
    assert!(result.folder.join(SOURCES_ARCHIVE).is_file());
    assert!(result.folder.join(METADATA_FILE).is_file());
    assert!(result.previous_revision.is_none());

    let manifest = Manifest::load(&result.folder.join(MANIFEST_FILE)).unwrap();
    let keys: Vec<&str> = manifest.entries.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "CMakeLists.txt",
            "export_source/CMakeLists.txt",
            "export_source/LICENSE",
            "export_source/cmake/warnings.cmake",
            "export_source/src/core/pool.hpp",
            "export_source/src/main.cpp",
        ]
    );
    assert_eq!(manifest.revision(), result.revision);

    let metadata: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(result.folder.join(METADATA_FILE)).unwrap()).unwrap();
    assert_eq!(metadata["reference"], "cppsharp/1.0.0");
    assert_eq!(metadata["revision"], result.revision.as_str());
    assert_eq!(metadata["recipe"]["license"], "MIT");
}

#[test]
fn test_sources_archive_round_trip() {
    let project = TempDir::new().unwrap();
    let cache_dir = TempDir::new().unwrap();
    write_project(project.path());
    let cache = RecipeCache::with_root(cache_dir.path()).unwrap();
    let recipe = Recipe::load(project.path()).unwrap();
    let result = export_recipe(&recipe, project.path(), &cache).unwrap();

    let dest = cache_dir.path().join("unpacked");
    unpack_sources(&result.folder, &dest).unwrap();
    assert_eq!(
        fs::read_to_string(dest.join("src").join("core").join("pool.hpp")).unwrap(),
        "#pragma once\n"
    );
    assert!(dest.join("LICENSE").is_file());
    assert!(!dest.join("build").exists());
    assert!(!dest.join("README.md").exists());
}

#[test]
fn test_revision_tracks_content() {
    let project = TempDir::new().unwrap();
    let cache_dir = TempDir::new().unwrap();
    write_project(project.path());
    let cache = RecipeCache::with_root(cache_dir.path()).unwrap();
    let recipe = Recipe::load(project.path()).unwrap();

    let first = export_recipe(&recipe, project.path(), &cache).unwrap();
    let second = export_recipe(&recipe, project.path(), &cache).unwrap();
    assert_eq!(first.revision, second.revision);
    assert!(second.unchanged());

    fs::write(project.path().join("src").join("main.cpp"), "int main() { return 1; }\n").unwrap();
    let third = export_recipe(&recipe, project.path(), &cache).unwrap();
    assert_ne!(third.revision, second.revision);
    assert!(!third.unchanged());
    assert_eq!(third.previous_revision.as_deref(), Some(second.revision.as_str()));
}

#[test]
fn test_failed_export_keeps_previous_export() {
    let project = TempDir::new().unwrap();
    let cache_dir = TempDir::new().unwrap();
    write_project(project.path());
    let cache = RecipeCache::with_root(cache_dir.path()).unwrap();
    let mut recipe = Recipe::load(project.path()).unwrap();
    let first = export_recipe(&recipe, project.path(), &cache).unwrap();

    recipe.exports_sources = ExportFileSet::new(["src/["]);
    assert!(export_recipe(&recipe, project.path(), &cache).is_err());

    let manifest = Manifest::load(&first.folder.join(MANIFEST_FILE)).unwrap();
    assert_eq!(manifest.revision(), first.revision);
    assert!(first.folder.join(SOURCES_ARCHIVE).is_file());
    let leftovers: Vec<_> = fs::read_dir(cache.export_root())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("cppsharp")]);
}

#[test]
fn test_corrupt_previous_manifest_is_replaced() {
    let project = TempDir::new().unwrap();
    let cache_dir = TempDir::new().unwrap();
    write_project(project.path());
    let cache = RecipeCache::with_root(cache_dir.path()).unwrap();
    let recipe = Recipe::load(project.path()).unwrap();
    let first = export_recipe(&recipe, project.path(), &cache).unwrap();

    fs::write(first.folder.join(MANIFEST_FILE), "not a manifest").unwrap();
    let second = export_recipe(&recipe, project.path(), &cache).unwrap();
    assert!(second.previous_revision.is_none());
    assert_eq!(second.revision, first.revision);
    let manifest = Manifest::load(&second.folder.join(MANIFEST_FILE)).unwrap();
    assert_eq!(manifest.revision(), second.revision);
}
