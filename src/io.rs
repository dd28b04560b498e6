//! Instance files and result reports.
//!
//! ## Instance format
//! Plain whitespace-separated text: the first two tokens are the machine and
//! job counts, followed by `machines * jobs` nonnegative processing times in
//! machine-major order. Line breaks are insignificant beyond error
//! reporting.
//!
//! ```text
//! 2 3
//! 5 2 4
//! 3 1 6
//! ```
//!
//! ## Reports
//! One solve produces one [`Report`], serialized as pretty JSON: the final
//! order, the full completion grid, the makespan and the evaluation and
//! timing counters. Chart-oriented consumers read these files directly.

use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::neh::{Schedule, Stats};
use crate::table::ProcTimes;
use crate::{Discipline, Error, Time};

/// Read a processing-time table from a text file.
pub fn read_instance<T>(path: &Path) -> Result<ProcTimes<T>, Error>
where
    T: Time + FromStr,
{
    parse_instance(File::open(path)?)
}

/// Parse a processing-time table from any reader.
///
/// ## Example
/// ```
/// use flowshop::io::parse_instance;
///
/// let text = "2 3\n5 2 4\n3 1 6\n";
/// let jobs = parse_instance::<u32, _>(text.as_bytes()).unwrap();
///
/// assert_eq!(jobs.machines(), 2);
/// assert_eq!(jobs.jobs(), 3);
/// assert_eq!(jobs.job_cost(2), 10);
/// ```
pub fn parse_instance<T, R>(mut reader: R) -> Result<ProcTimes<T>, Error>
where
    T: Time + FromStr,
    R: Read,
{
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let mut tokens = text
        .lines()
        .enumerate()
        .flat_map(|(i, line)| line.split_whitespace().map(move |tok| (i + 1, tok)));

    let machines = next_dim(&mut tokens, 0)?;
    let jobs = next_dim(&mut tokens, 1)?;
    if machines == 0 || jobs == 0 {
        return Err(Error::Empty);
    }

    let expected = machines * jobs;
    let mut cells = Vec::with_capacity(expected);
    for _ in 0..expected {
        let (line, tok) = tokens.next().ok_or(Error::Truncated {
            expected,
            found: cells.len(),
        })?;
        let t = tok.parse::<T>().map_err(|_| Error::Parse {
            line,
            token: tok.to_string(),
        })?;
        cells.push(t);
    }

    ProcTimes::new(machines, jobs, cells)
}

fn next_dim<'a, I>(tokens: &mut I, found: usize) -> Result<usize, Error>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let (line, tok) = tokens.next().ok_or(Error::Truncated { expected: 2, found })?;
    tok.parse::<usize>().map_err(|_| Error::Parse {
        line,
        token: tok.to_string(),
    })
}

/// Everything one solve hands to the recording layer.
#[derive(Clone, Debug, Serialize)]
pub struct Report<T> {
    /// dataset the solve ran on, usually the instance file stem
    pub dataset: String,
    /// discipline the makespan was evaluated under
    pub discipline: Discipline,
    /// makespan of the final order
    pub c_max: T,
    /// final job order, a permutation of `0..jobs`
    pub order: Vec<usize>,
    /// makespan evaluations issued by the search
    pub evaluations: u64,
    /// wall clock of the construction in milliseconds
    pub elapsed_ms: u128,
    /// completion time of every (machine, position) under the final order
    pub completion: Vec<Vec<T>>,
}

impl<T: Time> Report<T> {
    /// Assemble a report from the outputs of one solve.
    pub fn new(
        dataset: impl Into<String>,
        discipline: Discipline,
        schedule: &Schedule<T>,
        stats: &Stats,
    ) -> Self {
        Self {
            dataset: dataset.into(),
            discipline,
            c_max: schedule.c_max,
            order: schedule.order.clone(),
            evaluations: stats.evaluations,
            elapsed_ms: stats.elapsed.as_millis(),
            completion: (0..schedule.comp.machines())
                .map(|r| schedule.comp.row(r).to_vec())
                .collect(),
        }
    }
}

impl<T: Time + Serialize> Report<T> {
    /// Write the report as pretty JSON into `dir` and return the file path.
    ///
    /// The file is named `<dataset>-<discipline>.json`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, Error> {
        let path = dir.join(format!("{}-{}.json", self.dataset, self.discipline));
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(path)
    }
}
