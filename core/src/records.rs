//! Single-pass line producers over flat reference files.
//!
//! [`RecordRange`] and [`Grep`] are plain lazy iterators. [`LineFeed`] runs any
//! such iterator on its own thread behind a bounded channel so the caller can
//! start consuming before the scan finishes. Dropping the feed disconnects the
//! channel, the producer stops at its next send, and the file it owns is
//! closed before `drop` returns.

use crossbeam_channel::{bounded, Receiver};
use regex::Regex;
use std::io;
use std::thread::{self, JoinHandle};

/// Prefix shared by every dictionary record's first line.
pub const RECORD_MARKER: &str = "$$T";

/// Lines buffered between a producer and its consumer.
pub const FEED_CAPACITY: usize = 10;

/// Start marker for the dictionary record `key`, e.g. `$$T0004982`.
pub fn record_marker(key: u32) -> String {
    format!("{RECORD_MARKER}{key:07}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Seeking,
    Inside,
    Done,
}

/// Lines strictly between the start marker of one record and the next marker.
pub struct RecordRange<I> {
    lines: I,
    start: String,
    state: Scan,
}

pub fn extract_record<I>(lines: I, key: u32) -> RecordRange<I::IntoIter>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    RecordRange { lines: lines.into_iter(), start: record_marker(key), state: Scan::Seeking }
}

impl<I> Iterator for RecordRange<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.state != Scan::Done {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.state = Scan::Done;
                    return Some(Err(e));
                }
                None => {
                    self.state = Scan::Done;
                    return None;
                }
            };
            match self.state {
                Scan::Seeking if line.starts_with(&self.start) => self.state = Scan::Inside,
                Scan::Inside if line.starts_with(RECORD_MARKER) => self.state = Scan::Done,
                Scan::Inside => return Some(Ok(line)),
                _ => {}
            }
        }
        None
    }
}

/// Lines matching a pattern, in file order.
pub struct Grep<I> {
    lines: I,
    pattern: Regex,
    failed: bool,
}

pub fn grep<I>(lines: I, pattern: Regex) -> Grep<I::IntoIter>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    Grep { lines: lines.into_iter(), pattern, failed: false }
}

impl<I> Iterator for Grep<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for line in self.lines.by_ref() {
            match line {
                Ok(line) if self.pattern.is_match(&line) => return Some(Ok(line)),
                Ok(_) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

/// A line producer running on a background thread.
pub struct LineFeed {
    rx: Option<Receiver<io::Result<String>>>,
    producer: Option<JoinHandle<()>>,
}

impl LineFeed {
    pub fn spawn<P>(producer: P) -> Self
    where
        P: Iterator<Item = io::Result<String>> + Send + 'static,
    {
        let (tx, rx) = bounded(FEED_CAPACITY);
        let handle = thread::spawn(move || {
            for item in producer {
                let failed = item.is_err();
                if tx.send(item).is_err() || failed {
                    break;
                }
            }
        });
        Self { rx: Some(rx), producer: Some(handle) }
    }
}

impl Iterator for LineFeed {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rx.as_ref()?.recv().ok()
    }
}

impl Drop for LineFeed {
    fn drop(&mut self) {
        drop(self.rx.take());
        if let Some(handle) = self.producer.take() {
            if handle.join().is_err() {
                tracing::warn!("line producer panicked");
            }
        }
    }
}
