//! Pattern configuration loading.
//!
//! The file format is a JSON array of records:
//!
//! ```json
//! [
//!   {
//!     "template": "N1 V(causes|leads to) N2",
//!     "from_id": "N1",
//!     "indicator": "V",
//!     "to_id": "N2",
//!     "link_type": "CAUSE_EFFECT"
//!   }
//! ]
//! ```
//!
//! Every record compiles through the same `Pattern::compile` path as inline
//! patterns. Loading is all-or-nothing: the first bad record fails the whole
//! file, at construction time.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::compiler::Pattern;
use crate::LinkType;
use crate::error::{ConfigurationError, LoadError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PatternRecord {
    template: String,
    from_id: String,
    indicator: String,
    to_id: String,
    link_type: String,
}

pub(crate) fn load_patterns(path: &Path) -> Result<Vec<Pattern>, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let records: Vec<PatternRecord> =
        serde_json::from_str(&raw).map_err(|source| LoadError::Json { path: path.to_path_buf(), source })?;

    let patterns: Vec<Pattern> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            compile_record(record).map_err(|source| LoadError::Record { path: path.to_path_buf(), index, source })
        })
        .collect::<Result<_, _>>()?;

    debug!(path = %path.display(), count = patterns.len(), "loaded pattern file");
    Ok(patterns)
}

fn compile_record(record: &PatternRecord) -> Result<Pattern, ConfigurationError> {
    let link_type: LinkType = record.link_type.parse()?;
    Pattern::compile(&record.template, &record.from_id, &record.indicator, &record.to_id, link_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_a_valid_file() {
        let file = write_config(
            r#"[
                {"template": "N1 V N2", "from_id": "N1", "indicator": "V", "to_id": "N2", "link_type": "ACTION"},
                {"template": "N1 I(and|as well as) N2", "from_id": "N1", "indicator": "I", "to_id": "N2", "link_type": "SEQUENTIAL_AND"}
            ]"#,
        );
        let patterns = load_patterns(file.path()).unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].link_type(), LinkType::Action);
        assert_eq!(patterns[1].template(), "N1 I(and|as well as) N2");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_patterns(Path::new("/nonexistent/patterns.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn invalid_json_is_a_json_error() {
        let file = write_config("[{ not json");
        let err = load_patterns(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn unknown_field_is_a_schema_violation() {
        let file = write_config(
            r#"[{"template": "N1 V N2", "from_id": "N1", "indicator": "V", "to_id": "N2", "link_type": "ACTION", "extra": 1}]"#,
        );
        let err = load_patterns(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn unknown_link_type_fails_the_record() {
        let file = write_config(
            r#"[{"template": "N1 V N2", "from_id": "N1", "indicator": "V", "to_id": "N2", "link_type": "FRIENDSHIP"}]"#,
        );
        let err = load_patterns(file.path()).unwrap_err();
        match err {
            LoadError::Record { index, source, .. } => {
                assert_eq!(index, 0);
                assert!(matches!(source, ConfigurationError::UnknownLinkType { ref name } if name == "FRIENDSHIP"));
            }
            other => panic!("expected Record error, got {other:?}"),
        }
    }

    #[test]
    fn bad_template_fails_the_record_with_its_index() {
        let file = write_config(
            r#"[
                {"template": "N1 V N2", "from_id": "N1", "indicator": "V", "to_id": "N2", "link_type": "ACTION"},
                {"template": "N V N", "from_id": "N", "indicator": "V", "to_id": "N", "link_type": "ACTION"}
            ]"#,
        );
        let err = load_patterns(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Record { index: 1, .. }));
    }
}
