//! Keeps `tests/unit/` a one-to-one mirror of `src/`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Crate roots and module files carry no behavior of their own
    fn is_structural(relative: &str) -> bool {
        let file_name = relative.rsplit('/').next().unwrap_or(relative);
        matches!(file_name, "main.rs" | "lib.rs" | "mod.rs")
    }

    /// Every `.rs` file below `dir`, relative to `base`, with `/` separators
    fn rust_files(dir: &Path, base: &Path) -> io::Result<BTreeSet<String>> {
        let mut files = BTreeSet::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                files.extend(rust_files(&path, base)?);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                let relative = path
                    .strip_prefix(base)
                    .map_err(|e| io::Error::other(e.to_string()))?;
                files.insert(relative.to_string_lossy().replace('\\', "/"));
            }
        }
        Ok(files)
    }

    fn behavioral_files(dir: &str) -> BTreeSet<String> {
        let root = Path::new(dir);
        rust_files(root, root)
            .expect("Failed to scan directory")
            .into_iter()
            .filter(|relative| !is_structural(relative))
            .collect()
    }

    #[test]
    fn test_every_source_file_has_unit_tests() {
        let sources = behavioral_files("src");
        let tests = behavioral_files("tests/unit");

        let missing: Vec<&String> = sources.difference(&tests).collect();
        assert!(
            missing.is_empty(),
            "Source files without a tests/unit counterpart: {missing:?}"
        );
    }

    #[test]
    fn test_every_unit_test_has_a_source_file() {
        let sources = behavioral_files("src");
        let tests = behavioral_files("tests/unit");

        let orphaned: Vec<&String> = tests.difference(&sources).collect();
        assert!(
            orphaned.is_empty(),
            "Unit test files whose source file no longer exists: {orphaned:?}"
        );
    }

    #[test]
    fn test_every_test_file_declares_tests() {
        let empty: Vec<String> = behavioral_files("tests")
            .into_iter()
            .filter(|relative| {
                let content = fs::read_to_string(Path::new("tests").join(relative))
                    .expect("Failed to read test file");
                !content.contains("#[test]")
            })
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function: {empty:?}"
        );
    }
}
