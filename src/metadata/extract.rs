use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CycleError;
use crate::process::{CommandRunner, CommandSpec};

use super::model::{Field, MetadataRecord, UNKNOWN};

/// One row of the extraction table: which analyzer label feeds which field.
struct FieldRule {
    field: Field,
    /// Label as printed by the analyzer (its vocabulary, not ours).
    label: &'static str,
    default: &'static str,
}

#[rustfmt::skip]
const FIELD_TABLE: [FieldRule; Field::COUNT] = [
    FieldRule { field: Field::Title, label: "Title", default: UNKNOWN },
    FieldRule { field: Field::Artist, label: "Performer", default: UNKNOWN },
    FieldRule { field: Field::Album, label: "Album", default: UNKNOWN },
    FieldRule { field: Field::Codec, label: "Format", default: UNKNOWN },
    FieldRule { field: Field::FileSize, label: "File size", default: UNKNOWN },
    FieldRule { field: Field::Date, label: "Recorded date", default: UNKNOWN },
    FieldRule { field: Field::BitDepth, label: "Bit depth", default: UNKNOWN },
    FieldRule { field: Field::BitRate, label: "Bit rate", default: UNKNOWN },
    FieldRule { field: Field::SamplingRate, label: "Sampling rate", default: UNKNOWN },
    FieldRule { field: Field::Duration, label: "Duration", default: UNKNOWN },
    FieldRule { field: Field::Url, label: "URL", default: UNKNOWN },
    FieldRule { field: Field::TrackPosition, label: "Track name/Position", default: UNKNOWN },
    FieldRule { field: Field::TrackTotal, label: "Track name/Total", default: UNKNOWN },
];

struct CompiledRule {
    field: Field,
    pattern: Regex,
    default: &'static str,
}

/// `Label   : value` on a single line. The value must start with a
/// non-blank character, so a line with an empty value never matches.
/// This departs from "first labeled line wins": `Album : ` followed later by
/// `Album : Later` yields `Later`, not an empty value.
static COMPILED_TABLE: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    FIELD_TABLE
        .iter()
        .map(|rule| CompiledRule {
            field: rule.field,
            pattern: Regex::new(&format!(
                r"(?m)^{}[ \t]*:[ \t]*(\S.*)$",
                regex::escape(rule.label)
            ))
            .expect("field table patterns are valid regexes"),
            default: rule.default,
        })
        .collect()
});

/// Turn analyzer text into a record. For each field the first matching line
/// wins; fields with no matching line get their table default.
pub fn parse_analyzer_output(text: &str) -> MetadataRecord {
    MetadataRecord::from_fn(|field| {
        COMPILED_TABLE
            .iter()
            .find(|r| r.field == field)
            .map(|rule| rule.value_in(text))
            .unwrap_or_else(|| UNKNOWN.to_string())
    })
}

impl CompiledRule {
    fn value_in(&self, text: &str) -> String {
        self.pattern
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| self.default.to_string())
    }
}

/// Runs the external analyzer on a track and parses what it prints.
pub struct MetadataExtractor<'a> {
    runner: &'a dyn CommandRunner,
    analyzer: CommandSpec,
}

impl<'a> MetadataExtractor<'a> {
    /// `analyzer` is the base command; the track path is appended per call.
    pub fn new(runner: &'a dyn CommandRunner, analyzer: CommandSpec) -> Self {
        Self { runner, analyzer }
    }

    pub fn extract(&self, path: &Path) -> Result<MetadataRecord, CycleError> {
        if !path.is_file() {
            return Err(CycleError::FileNotFound(path.to_path_buf()));
        }

        let cmd = self.analyzer.clone().path_arg(path);
        let out = self
            .runner
            .capture(&cmd)
            .map_err(|e| CycleError::AnalysisFailure(e.to_string()))?;

        if !out.success {
            tracing::warn!(command = %cmd, reason = %out.failure_reason(), "analyzer failed");
            return Err(CycleError::AnalysisFailure(out.failure_reason()));
        }

        let record = parse_analyzer_output(&out.stdout);
        tracing::debug!(
            path = %path.display(),
            known = record.iter().filter(|(f, _)| record.is_known(*f)).count(),
            "extracted metadata"
        );
        Ok(record)
    }
}
