//! The process-wide subscriber can be installed only once.

use cmdh::{GlobalArgs, RunParameters, Session, StartupError};
use std::fs;
use tempfile::TempDir;

#[test]
fn second_global_start_is_refused() {
    let dir = TempDir::new().unwrap_or_else(|e| panic!("create temp dir: {e}"));
    let log = dir.path().join("run.log");
    let args = GlobalArgs {
        config: Some(dir.path().join("absent.toml")),
        logfile: Some(log.clone()),
        ..GlobalArgs::default()
    };

    let session = Session::start(&args, RunParameters::new()).unwrap_or_else(|e| panic!("start: {e}"));
    session.finish();

    let again = GlobalArgs {
        logfile: Some(dir.path().join("second.log")),
        ..args
    };
    let err = Session::start(&again, RunParameters::new())
        .err()
        .unwrap_or_else(|| panic!("second install must fail"));
    assert!(matches!(err, StartupError::LoggerInstalled));

    let text = fs::read_to_string(&log).unwrap_or_else(|e| panic!("read log: {e}"));
    assert_eq!(text.lines().count(), 7, "{text}");
    assert!(text.lines().last().is_some_and(|l| l.contains(" [INFO] - Elapsed time: ")));
}
