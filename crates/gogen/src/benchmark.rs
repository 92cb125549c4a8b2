//! bcrypt cost benchmarking.
//!
//! [`benchmark_costs`] returns a lazy iterator: each call to `next` hashes
//! and verifies the password at the next cost and yields one
//! [`BenchmarkRow`]. Rows are produced in strictly ascending cost order,
//! serially, so a caller can print each one as soon as it is measured.
//! A failure at one cost is recorded in that row and the sweep carries on.

use std::fmt;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::hash::bcrypt;

/// Outcome of hashing and verifying at one cost factor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkRow {
    pub cost: u32,
    /// Wall-clock time for hash + verify, or why the measurement failed.
    pub elapsed: Result<Duration, String>,
}

impl BenchmarkRow {
    pub fn is_error(&self) -> bool {
        self.elapsed.is_err()
    }
}

/// Markdown table header for benchmark output.
pub const TABLE_HEADER: &str = "| Cost Factor  | Estimated Time    |\n|--------------|-------------------|";

impl fmt::Display for BenchmarkRow {
    /// Renders one markdown table row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elapsed = match &self.elapsed {
            Ok(d) => format!("{d:?}"),
            Err(_) => "Error".to_string(),
        };
        write!(f, "| {:<12} | {:<17} |", self.cost, elapsed)
    }
}

/// Streaming sweep over a range of bcrypt costs.
#[derive(Debug)]
pub struct CostBenchmark<'a> {
    password: &'a str,
    next: u32,
    max: u32,
    finished: bool,
}

impl Iterator for CostBenchmark<'_> {
    type Item = BenchmarkRow;

    fn next(&mut self) -> Option<BenchmarkRow> {
        if self.finished || self.next > self.max {
            return None;
        }
        let cost = self.next;
        match self.next.checked_add(1) {
            Some(n) => self.next = n,
            None => self.finished = true,
        }
        Some(measure(self.password, cost))
    }
}

/// Benchmark every cost in `min_cost..=max_cost`, ascending.
///
/// An empty range yields no rows. Costs outside bcrypt's accepted range
/// produce error rows rather than stopping the sweep.
pub fn benchmark_costs(password: &str, min_cost: u32, max_cost: u32) -> CostBenchmark<'_> {
    CostBenchmark {
        password,
        next: min_cost,
        max: max_cost,
        finished: false,
    }
}

fn measure(password: &str, cost: u32) -> BenchmarkRow {
    let start = Instant::now();
    let outcome = bcrypt::hash_password(password, cost).and_then(|record| {
        bcrypt::verify_bcrypt(password, &record).map(|ok| (ok, start.elapsed()))
    });

    let elapsed = match outcome {
        Ok((true, elapsed)) => Ok(elapsed),
        Ok((false, _)) => Err("hash did not verify".to_string()),
        Err(e) => Err(e.to_string()),
    };
    if let Err(reason) = &elapsed {
        log::warn!("benchmark at cost {cost} failed: {reason}");
    } else {
        log::debug!("benchmark at cost {cost} done");
    }

    BenchmarkRow { cost, elapsed }
}

/// Collected rows of a finished sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchmarkReport {
    pub rows: Vec<BenchmarkRow>,
}

impl FromIterator<BenchmarkRow> for BenchmarkReport {
    fn from_iter<I: IntoIterator<Item = BenchmarkRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TABLE_HEADER}")?;
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Write the header, then each row as it is measured, flushing per row.
///
/// Returns the collected report once the sweep is done.
pub fn stream_table<W: Write>(
    out: &mut W,
    rows: impl Iterator<Item = BenchmarkRow>,
) -> io::Result<BenchmarkReport> {
    writeln!(out, "{TABLE_HEADER}")?;
    out.flush()?;

    let mut report = BenchmarkReport::default();
    for row in rows {
        writeln!(out, "{row}")?;
        out.flush()?;
        report.rows.push(row);
    }
    Ok(report)
}
