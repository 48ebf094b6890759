use super::*;
use crate::error::CycleError;
use crate::process::CommandSpec;
use crate::process::fake::{FakeRunner, Reply};
use std::fs;
use tempfile::tempdir;

const FLAC_REPORT: &str = "\
General
Complete name                            : /music/Jane Doe/Dawn/01 Sunrise.flac
Format                                   : FLAC
Format/Info                              : Free Lossless Audio Codec
File size                                : 24.1 MiB
Duration                                 : 4 min 12 s
Overall bit rate mode                    : Variable
Overall bit rate                         : 802 kb/s
Album                                    : Dawn
Track name                               : Sunrise
Track name/Position                      : 1
Track name/Total                         : 10
Performer                                : Jane Doe
Recorded date                            : 2019
Title                                    : Sunrise

Audio
Format                                   : FLAC
Duration                                 : 4 min 12 s
Bit rate mode                            : Variable
Bit rate                                 : 802 kb/s
Channel(s)                               : 2 channels
Sampling rate                            : 44.1 kHz
Bit depth                                : 16 bits
";

#[test]
fn full_report_populates_every_mapped_field() {
    let r = parse_analyzer_output(FLAC_REPORT);
    assert_eq!(r.get(Field::Title), "Sunrise");
    assert_eq!(r.get(Field::Artist), "Jane Doe");
    assert_eq!(r.get(Field::Album), "Dawn");
    assert_eq!(r.get(Field::Codec), "FLAC");
    assert_eq!(r.get(Field::FileSize), "24.1 MiB");
    assert_eq!(r.get(Field::Date), "2019");
    assert_eq!(r.get(Field::BitDepth), "16 bits");
    assert_eq!(r.get(Field::BitRate), "802 kb/s");
    assert_eq!(r.get(Field::SamplingRate), "44.1 kHz");
    assert_eq!(r.get(Field::Duration), "4 min 12 s");
    assert_eq!(r.get(Field::TrackPosition), "1");
    assert_eq!(r.get(Field::TrackTotal), "10");
    // No URL line in the report.
    assert_eq!(r.get(Field::Url), UNKNOWN);
}

#[test]
fn labels_only_match_exactly() {
    // "Overall bit rate" and "Format/Info" must not feed Bit rate / Codec.
    let text = "Overall bit rate : 900 kb/s\nFormat/Info : Free Lossless\nTrack name : Sunrise\n";
    let r = parse_analyzer_output(text);
    assert_eq!(r.get(Field::BitRate), UNKNOWN);
    assert_eq!(r.get(Field::Codec), UNKNOWN);
    assert_eq!(r.get(Field::Title), UNKNOWN);
    assert_eq!(r.get(Field::TrackPosition), UNKNOWN);
}

#[test]
fn first_matching_line_wins() {
    let text = "Format : MPEG Audio\nFormat : Layer 3\n";
    assert_eq!(parse_analyzer_output(text).get(Field::Codec), "MPEG Audio");
}

#[test]
fn sunrise_scenario_defaults_missing_album() {
    let text = "Title        : Sunrise\nPerformer    : Jane Doe\n";
    let r = parse_analyzer_output(text);
    assert_eq!(r.get(Field::Title), "Sunrise");
    assert_eq!(r.get(Field::Artist), "Jane Doe");
    assert_eq!(r.get(Field::Album), "Unknown");
}

#[test]
fn empty_output_yields_all_unknown() {
    let r = parse_analyzer_output("");
    assert_eq!(r, MetadataRecord::default());
    assert!(r.iter().all(|(_, v)| v == UNKNOWN));
    assert_eq!(r.iter().count(), 13);
}

#[test]
fn values_are_trimmed_and_crlf_tolerated() {
    let text = "Title   :   Spaced Out   \r\nAlbum : Windows Rip\r\n";
    let r = parse_analyzer_output(text);
    assert_eq!(r.get(Field::Title), "Spaced Out");
    assert_eq!(r.get(Field::Album), "Windows Rip");
}

#[test]
fn blank_value_does_not_swallow_next_line() {
    let text = "Album :\nPerformer : Jane Doe\n";
    let r = parse_analyzer_output(text);
    assert_eq!(r.get(Field::Album), UNKNOWN);
    assert_eq!(r.get(Field::Artist), "Jane Doe");
}

#[test]
fn blank_labeled_line_is_skipped_for_a_later_value() {
    let r = parse_analyzer_output("Album : \nAlbum : Later\n");
    assert_eq!(r.get(Field::Album), "Later");
}

#[test]
fn parsing_is_deterministic() {
    let a = parse_analyzer_output(FLAC_REPORT);
    let b = parse_analyzer_output(&FLAC_REPORT.to_string());
    assert_eq!(a, b);
}

#[test]
fn extract_rejects_missing_file_without_running_analyzer() {
    let runner = FakeRunner::default();
    let extractor = MetadataExtractor::new(&runner, CommandSpec::new("mediainfo"));

    let err = extractor
        .extract(std::path::Path::new("/definitely/not/here.flac"))
        .unwrap_err();
    assert!(matches!(err, CycleError::FileNotFound(_)));
    assert_eq!(runner.call_count(), 0);
}

#[test]
fn extract_rejects_directories() {
    let dir = tempdir().unwrap();
    let runner = FakeRunner::default();
    let extractor = MetadataExtractor::new(&runner, CommandSpec::new("mediainfo"));
    assert!(matches!(
        extractor.extract(dir.path()),
        Err(CycleError::FileNotFound(_))
    ));
}

#[test]
fn extract_appends_track_path_and_parses_stdout() {
    let dir = tempdir().unwrap();
    let track = dir.path().join("01 Sunrise.flac");
    fs::write(&track, b"not real audio").unwrap();

    let runner = FakeRunner::new([Reply::ok(FLAC_REPORT)]);
    let extractor = MetadataExtractor::new(&runner, CommandSpec::new("mediainfo"));

    let record = extractor.extract(&track).unwrap();
    assert_eq!(record.get(Field::Title), "Sunrise");

    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], CommandSpec::new("mediainfo").path_arg(&track));
}

#[test]
fn non_zero_exit_is_analysis_failure() {
    let dir = tempdir().unwrap();
    let track = dir.path().join("broken.mp3");
    fs::write(&track, b"junk").unwrap();

    let runner = FakeRunner::new([Reply::exit(1, "unable to open")]);
    let extractor = MetadataExtractor::new(&runner, CommandSpec::new("mediainfo"));

    match extractor.extract(&track) {
        Err(CycleError::AnalysisFailure(msg)) => assert!(msg.contains("unable to open")),
        other => panic!("expected AnalysisFailure, got {other:?}"),
    }
}

#[test]
fn launch_failure_is_analysis_failure() {
    let dir = tempdir().unwrap();
    let track = dir.path().join("a.ogg");
    fs::write(&track, b"junk").unwrap();

    let runner = FakeRunner::new([Reply::SpawnFailure]);
    let extractor = MetadataExtractor::new(&runner, CommandSpec::new("mediainfo"));
    assert!(matches!(
        extractor.extract(&track),
        Err(CycleError::AnalysisFailure(_))
    ));
}
