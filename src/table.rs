//! Processing-time and completion-time grids.
//!
//! Both grids are machine-major: row `r` holds machine `r`, column `j` (or
//! column position `c` for completion times) holds job `j`. Cells live in a
//! single contiguous row-major buffer.

use crate::{Error, Time};

/// Immutable grid of processing times.
///
/// `at(r, j)` is the processing time of job `j` on machine `r`. The grid is
/// validated once at construction and read-only for the whole solve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcTimes<T> {
    machines: usize,
    jobs: usize,
    cells: Vec<T>,
}

impl<T: Time> ProcTimes<T> {
    /// Build a table from a machine-major cell buffer.
    ///
    /// ## Errors
    /// [`Error::Empty`] for zero machines or jobs, [`Error::Truncated`] if
    /// `cells.len() != machines * jobs` and [`Error::Negative`] if any cell
    /// is below zero.
    ///
    /// ## Example
    /// ```
    /// use flowshop::table::ProcTimes;
    ///
    /// let jobs = ProcTimes::new(2, 3, vec![5, 2, 4, 3, 1, 6]).unwrap();
    /// assert_eq!(jobs.at(1, 2), 6);
    /// assert_eq!(jobs.job_cost(0), 8);
    /// ```
    pub fn new(machines: usize, jobs: usize, cells: Vec<T>) -> Result<Self, Error> {
        if machines == 0 || jobs == 0 {
            return Err(Error::Empty);
        }

        let expected = machines * jobs;
        if cells.len() != expected {
            return Err(Error::Truncated {
                expected,
                found: cells.len(),
            });
        }

        if let Some(i) = cells.iter().position(|&t| t < T::zero()) {
            return Err(Error::Negative {
                machine: i / jobs,
                job: i % jobs,
            });
        }

        Ok(Self {
            machines,
            jobs,
            cells,
        })
    }

    /// Number of machines (rows).
    pub fn machines(&self) -> usize {
        self.machines
    }

    /// Number of jobs (columns).
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Processing time of `job` on `machine`.
    #[inline]
    pub fn at(&self, machine: usize, job: usize) -> T {
        debug_assert!(machine < self.machines && job < self.jobs);
        self.cells[machine * self.jobs + job]
    }

    /// Total processing time of `job` across all machines, the cost the
    /// insertion search ranks jobs by.
    pub fn job_cost(&self, job: usize) -> T {
        (0..self.machines).fold(T::zero(), |total, r| total + self.at(r, job))
    }
}

/// Mutable scratch grid of completion times.
///
/// Shaped like the [`ProcTimes`] it evaluates and recomputed in place on
/// every makespan evaluation. Only the first `used` columns are meaningful
/// after evaluating a partial order of `used` jobs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionTimes<T> {
    machines: usize,
    jobs: usize,
    cells: Vec<T>,
}

impl<T: Time> CompletionTimes<T> {
    /// Zeroed grid of the given shape.
    pub fn zeroed(machines: usize, jobs: usize) -> Self {
        Self {
            machines,
            jobs,
            cells: vec![T::zero(); machines * jobs],
        }
    }

    /// Zeroed grid with the same shape as `table`.
    pub fn for_table(table: &ProcTimes<T>) -> Self {
        Self::zeroed(table.machines(), table.jobs())
    }

    /// Number of machines (rows).
    pub fn machines(&self) -> usize {
        self.machines
    }

    /// Number of job positions (columns).
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Completion time at `machine` for the job at position `pos`.
    #[inline]
    pub fn at(&self, machine: usize, pos: usize) -> T {
        debug_assert!(machine < self.machines && pos < self.jobs);
        self.cells[machine * self.jobs + pos]
    }

    #[inline]
    pub(crate) fn set(&mut self, machine: usize, pos: usize, t: T) {
        debug_assert!(machine < self.machines && pos < self.jobs);
        self.cells[machine * self.jobs + pos] = t;
    }

    /// Completion times of one machine across all positions.
    pub fn row(&self, machine: usize) -> &[T] {
        let start = machine * self.jobs;
        &self.cells[start..start + self.jobs]
    }

    /// Reset every cell to zero.
    pub fn clear(&mut self) {
        self.cells.fill(T::zero());
    }

    /// Makespan of the first `used` positions: the completion time on the
    /// last machine of the job at position `used - 1`.
    pub fn makespan(&self, used: usize) -> T {
        debug_assert!(used > 0 && used <= self.jobs);
        self.at(self.machines - 1, used - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case::no_machines(0, 3, vec![])]
    #[case::no_jobs(2, 0, vec![])]
    fn empty_shapes_are_rejected(
        #[case] machines: usize,
        #[case] jobs: usize,
        #[case] cells: Vec<u32>,
    ) {
        assert!(matches!(
            ProcTimes::new(machines, jobs, cells),
            Err(Error::Empty)
        ));
    }

    #[test]
    fn cell_count_must_match_shape() {
        let err = ProcTimes::new(2, 3, vec![1u32; 5]).unwrap_err();
        assert!(matches!(
            err,
            Error::Truncated {
                expected: 6,
                found: 5
            }
        ));
    }

    #[test]
    fn negative_cells_are_rejected() {
        let err = ProcTimes::new(2, 2, vec![1i32, 2, -3, 4]).unwrap_err();
        assert!(matches!(err, Error::Negative { machine: 1, job: 0 }));
    }

    #[test]
    fn machine_major_indexing() {
        let jobs = ProcTimes::new(2, 3, vec![5u32, 2, 4, 3, 1, 6]).unwrap();
        assert_eq!(jobs.at(0, 0), 5);
        assert_eq!(jobs.at(0, 2), 4);
        assert_eq!(jobs.at(1, 0), 3);
        assert_eq!(jobs.at(1, 2), 6);
    }

    #[rstest]
    #[case(0, 8)]
    #[case(1, 3)]
    #[case(2, 10)]
    fn job_costs_sum_columns(#[case] job: usize, #[case] expected: u32) {
        let jobs = ProcTimes::new(2, 3, vec![5, 2, 4, 3, 1, 6]).unwrap();
        assert_eq!(jobs.job_cost(job), expected);
    }

    #[test]
    fn completion_grid_roundtrip() {
        let mut comp: CompletionTimes<u32> = CompletionTimes::zeroed(2, 3);
        comp.set(0, 1, 7);
        comp.set(1, 2, 14);

        assert_eq!(comp.at(0, 1), 7);
        assert_eq!(comp.row(1), &[0, 0, 14]);
        assert_eq!(comp.makespan(3), 14);

        comp.clear();
        assert_eq!(comp.row(0), &[0, 0, 0]);
        assert_eq!(comp.row(1), &[0, 0, 0]);
    }
}
