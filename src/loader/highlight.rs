use log::debug;
use std::path::Path;

use crate::domain::{FeatureSet, HighlightSet};
use crate::error::{MapError, Result};

/// Parse a visited list
///
/// Accepts either a JSON array of ids or plain text with one id per line
/// (blank lines and `#` comments ignored).
pub fn parse_highlights(contents: &str) -> Result<HighlightSet> {
    let trimmed = contents.trim_start();
    if trimmed.starts_with('[') {
        let ids: Vec<String> = serde_json::from_str(trimmed)?;
        return Ok(ids.into_iter().collect());
    }

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect())
}

/// Load a visited list, logging ids that match no loaded feature
pub fn load_highlights(path: &Path, features: &FeatureSet) -> Result<HighlightSet> {
    let contents = std::fs::read_to_string(path).map_err(|e| MapError::io(path, e))?;
    let highlights = parse_highlights(&contents)?;

    for id in highlights.iter().filter(|id| !features.contains(id)) {
        debug!("Visited id {:?} matches no feature", id);
    }

    Ok(highlights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_json_list() {
        let set = parse_highlights(r#"  ["FRA", "JPN", "FRA"]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("JPN"));
    }

    #[test]
    fn test_parse_text_list() {
        let set = parse_highlights("# trips\nFRA\n\n  PER  \n").unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("PER"));
        assert!(!set.contains("# trips"));
    }

    #[test]
    fn test_parse_bad_json() {
        assert!(matches!(
            parse_highlights("[1, 2"),
            Err(MapError::Json(_))
        ));
    }

    #[test]
    fn test_load_highlights_keeps_unknown_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("visited.txt");
        fs::write(&path, "XXX\n").unwrap();

        let set = load_highlights(&path, &FeatureSet::default()).unwrap();
        assert!(set.contains("XXX"));
    }
}
