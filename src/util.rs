use std::fs;
use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::error::StoreError;

/// Write a file atomically: temp file in the same directory, then rename.
/// Readers never observe a half-written snapshot.
pub fn atomic_write_str(path: &Path, content: &str) -> Result<(), StoreError> {
    let dir = path
        .parent()
        .ok_or_else(|| StoreError::Io(format!("{} has no parent directory", path.display())))?;
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    std::io::Write::write_all(&mut tmp, content.as_bytes())?;
    tmp.persist(path)
        .map_err(|e| StoreError::Io(format!("Failed to persist {}: {}", path.display(), e)))?;
    Ok(())
}

/// Normalize a first name for heuristic comparison: NFC so composed and
/// decomposed spellings ("Frída" typed either way) compare equal, then
/// lowercase, then trim.
pub fn normalize_first_name(name: &str) -> String {
    name.nfc().collect::<String>().trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_handles_decomposed_unicode() {
        // "Frída" typed with a combining acute accent vs. the precomposed form
        assert_eq!(normalize_first_name("Fri\u{0301}da"), "fr\u{00ED}da");
        assert_eq!(
            normalize_first_name("FR\u{00CD}DA"),
            normalize_first_name("FRI\u{0301}DA")
        );
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_first_name("  Thea "), "thea");
    }

    #[test]
    fn atomic_write_creates_parent_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        atomic_write_str(&path, "one").unwrap();
        atomic_write_str(&path, "two").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
    }
}
