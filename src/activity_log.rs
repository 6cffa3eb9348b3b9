//! Append-only activity log.
//!
//! Every request outcome (success or failure) is recorded as one line:
//!
//! ```text
//! 2024-05-01 14:03:22 - Login successful: user: alice
//! ```
//!
//! Writes are best-effort: a failure to append is reported through the
//! process logger and otherwise ignored, so a full disk or missing file
//! never fails the request that triggered the entry.

use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

pub struct ActivityLog {
    file: Mutex<File>,
}

impl ActivityLog {
    /// Opens (creating if necessary) the log file in append mode.
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends a single `timestamp - action: details` line.
    pub fn record(&self, action: &str, details: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("{} - {}: {}\n", timestamp, action, details);

        let mut file = match self.file.lock() {
            Ok(file) => file,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = file.write_all(line.as_bytes()) {
            log::warn!("failed to append to activity log: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_record_appends_timestamped_lines() {
        let path = std::env::temp_dir().join("taskhub-activity-log-test.log");
        let _ = fs::remove_file(&path);

        let activity = ActivityLog::open(&path).unwrap();
        activity.record("Login successful", "user: alice");
        activity.record("Login failed", "user: bob");

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("- Login successful: user: alice"));
        assert!(lines[1].ends_with("- Login failed: user: bob"));
        // Timestamp prefix: "YYYY-MM-DD HH:MM:SS - ..."
        assert_eq!(lines[0].as_bytes()[4], b'-');
        assert_eq!(lines[0].as_bytes()[10], b' ');

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_open_appends_to_existing_file() {
        let path = std::env::temp_dir().join("taskhub-activity-log-append.log");
        let _ = fs::remove_file(&path);

        {
            let activity = ActivityLog::open(&path).unwrap();
            activity.record("First", "one");
        }
        {
            let activity = ActivityLog::open(&path).unwrap();
            activity.record("Second", "two");
        }

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);

        let _ = fs::remove_file(&path);
    }
}
