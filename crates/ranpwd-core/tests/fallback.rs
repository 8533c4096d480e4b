//! The only recovered failure: a missing non-secure device degrades to the
//! seeded generator and says so through the `log` facade.
//!
//! Kept in its own test binary because it installs a global logger.

use std::sync::Mutex;

use ranpwd_core::{Config, Entropy, EntropyConfig, EntropySource, Format, SourceKind, generate};

static RECORDS: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());

struct Capture;

impl log::Log for Capture {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        RECORDS
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture;

#[test]
fn missing_device_warns_and_still_generates() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(log::LevelFilter::Trace);

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("urandom");
    let mut entropy = Entropy::open(&EntropyConfig::with_device(&missing), false).unwrap();
    assert_eq!(entropy.kind(), SourceKind::Fallback);

    let out = generate(&Config::new(Format::Ascii), &mut entropy).unwrap();
    assert_eq!(out.len(), 8);

    let records = RECORDS.lock().unwrap();
    let warning = records
        .iter()
        .find(|(level, _)| *level == log::Level::Warn)
        .expect("no warning logged");
    assert!(warning.1.contains("urandom"), "warning: {}", warning.1);
    assert!(warning.1.contains("time-seeded"), "warning: {}", warning.1);
}
