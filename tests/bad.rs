use std::path::Path;

use gherkin::{ErrorKind, Feature, FileParseError, GherkinEnv};

fn load_feature<P: AsRef<Path>>(path: P) -> Result<Feature, FileParseError> {
    Feature::parse_path(path.as_ref(), GherkinEnv::default())
}

fn parsing_error(result: Result<Feature, FileParseError>) -> gherkin::Error {
    match result {
        Ok(feature) => panic!("expected a parse error, got {:?}", feature),
        Err(FileParseError::Reading { .. }) => panic!("expected a parse error, got a read error"),
        Err(FileParseError::Parsing(error)) => error,
    }
}

#[test]
fn inconsistent_cell_count() {
    let error = parsing_error(load_feature(
        "./tests/fixtures/data/bad/inconsistent_cell_count.feature",
    ));
    assert_eq!(error.kind, ErrorKind::MalformedTable);
    assert_eq!(error.line, 5);
}

#[test]
fn invalid_language() {
    let error = parsing_error(load_feature(
        "./tests/fixtures/data/bad/invalid_language.feature",
    ));
    assert_eq!(error.kind, ErrorKind::LanguageNotSupported);
}

#[test]
fn multiple_parser_errors() {
    // Parsing fails fast: a file with more than one problem only ever
    // reports the first one it trips over.
    let error = parsing_error(load_feature(
        "./tests/fixtures/data/bad/multiple_parser_errors.feature",
    ));
    assert_eq!(error.kind, ErrorKind::BackgroundAfterScenario);
}

#[test]
fn not_gherkin() {
    let error = parsing_error(load_feature("./tests/fixtures/data/bad/not_gherkin.feature"));
    assert_eq!(error.kind, ErrorKind::NoFeature);
}

#[test]
fn single_parser_error() {
    let error = parsing_error(load_feature(
        "./tests/fixtures/data/bad/single_parser_error.feature",
    ));
    assert_eq!(error.kind, ErrorKind::ExamplesOutsideOutline);
    assert!(error.reason.is_some());
}

#[test]
fn unexpected_eof() {
    let error = parsing_error(load_feature(
        "./tests/fixtures/data/bad/unexpected_eof.feature",
    ));
    assert_eq!(error.kind, ErrorKind::BadDocStringIndent);
}

#[test]
fn whitespace_in_tags() {
    let error = parsing_error(load_feature(
        "./tests/fixtures/data/bad/whitespace_in_tags.feature",
    ));
    assert_eq!(error.kind, ErrorKind::BadTag);
}

#[test]
fn missing_file_is_a_reading_error() {
    let error = load_feature("./tests/fixtures/data/bad/does_not_exist.feature").unwrap_err();
    assert!(matches!(error, FileParseError::Reading { .. }));
}
