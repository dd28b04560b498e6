//! Batch sweeps across datasets and disciplines.
//!
//! One solve is one dataset evaluated under one discipline. Solves are
//! independent and single-threaded, so a sweep runs the datasets of each
//! discipline in parallel on the rayon pool and joins them before the next
//! discipline starts. Every solve owns its tables, its sequence and its own
//! seeded random generator; nothing is shared between workers.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::io::{read_instance, Report};
use crate::neh;
use crate::{Discipline, Error};

/// One batch request: which datasets, which disciplines and the base seed
/// the per-solve generators derive from.
#[derive(Clone, Debug)]
pub struct BatchRun {
    /// instance files to solve
    pub datasets: Vec<PathBuf>,
    /// disciplines to sweep, in order
    pub disciplines: Vec<Discipline>,
    /// base of the per-solve RNG seeds
    pub seed: u64,
}

/// Outcome of one dataset under one discipline.
///
/// A failed solve carries its error instead of aborting the sweep, so one
/// malformed dataset never takes its siblings down.
#[derive(Debug)]
pub struct Solve {
    /// the instance file
    pub dataset: PathBuf,
    /// the discipline it was solved under
    pub discipline: Discipline,
    /// the report, or why the dataset was skipped
    pub outcome: Result<Report<u32>, Error>,
}

/// Solve every dataset under every requested discipline.
///
/// Results come back grouped by discipline, datasets in request order
/// within each group. Each solve is seeded with `run.seed` plus its index
/// in the sweep, so concurrent solves never contend on shared random state
/// and a repeated run reproduces every solve exactly.
pub fn run(run: &BatchRun) -> Vec<Solve> {
    let mut solves = Vec::with_capacity(run.datasets.len() * run.disciplines.len());

    for (d, &discipline) in run.disciplines.iter().enumerate() {
        let base = run.seed.wrapping_add((d * run.datasets.len()) as u64);

        // the collect is the per-discipline join
        let mut batch: Vec<Solve> = run
            .datasets
            .par_iter()
            .enumerate()
            .map(|(i, path)| Solve {
                dataset: path.clone(),
                discipline,
                outcome: solve_one(path, discipline, base.wrapping_add(i as u64)),
            })
            .collect();

        solves.append(&mut batch);
    }

    solves
}

/// Load one dataset and run the constructive search once.
pub fn solve_one(path: &Path, discipline: Discipline, seed: u64) -> Result<Report<u32>, Error> {
    let jobs = read_instance::<u32>(path)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let (schedule, stats) = neh::construct(&jobs, discipline, &mut rng);
    Ok(Report::new(dataset_name(path), discipline, &schedule, &stats))
}

fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_names_drop_directories_and_extensions() {
        assert_eq!(dataset_name(Path::new("DataFiles/1.txt")), "1");
        assert_eq!(dataset_name(Path::new("taillard_20x5.txt")), "taillard_20x5");
    }

    #[test]
    fn missing_dataset_is_an_io_error() {
        let err = solve_one(Path::new("no-such-instance.txt"), Discipline::Permutation, 0)
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
