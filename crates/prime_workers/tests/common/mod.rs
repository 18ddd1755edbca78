#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// In-memory sink that many worker threads can write to.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.inner.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Number of odd primes below `bound`, counted independently of the
/// partitioner.
pub fn odd_primes_below(bound: u64) -> u64 {
    (3..bound)
        .filter(|n| n % 2 == 1)
        .filter(|&n| (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0))
        .count() as u64
}

/// Parsed form of a `<Thread|Process> <id> computed <count> prime numbers in <ms> milliseconds.` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub kind: String,
    pub worker_id: usize,
    pub prime_count: u64,
    pub elapsed_ms: u128,
}

pub fn parse_report_line(line: &str) -> Option<ReportLine> {
    let words: Vec<&str> = line.split(' ').collect();
    match words.as_slice() {
        [kind, id, "computed", count, "prime", "numbers", "in", ms, "milliseconds."] => {
            Some(ReportLine {
                kind: kind.to_string(),
                worker_id: id.parse().ok()?,
                prime_count: count.parse().ok()?,
                elapsed_ms: ms.parse().ok()?,
            })
        }
        _ => None,
    }
}
