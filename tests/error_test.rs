use std::io;
use std::path::PathBuf;

use maquette::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::Io(_) => (),
        _ => panic!("Expected Io variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::Config("invalid manifest".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid manifest.");

    let err = Error::UnknownFlag {
        file: PathBuf::from("api/settings.py"),
        line: 12,
        path: "api.channels".to_string(),
    };
    assert_eq!(err.to_string(), "api/settings.py:12: unknown flag 'api.channels'");

    let err = Error::ConflictingImplication {
        cause: "api.wagtail".to_string(),
        implied: "front.enable".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "flag 'front.enable' is implied by 'api.wagtail' but was explicitly disabled"
    );
}
