//! Job ranking and the insertion sequence under construction.

use std::cmp::Reverse;

use itertools::Itertools;

use crate::table::ProcTimes;
use crate::Time;

/// Rank all jobs by non-increasing total processing time.
///
/// Returns `(job, total)` pairs. The sort is stable, so jobs with equal
/// totals keep their original index order.
///
/// ## Example
/// ```
/// use flowshop::seq::rank_jobs;
/// use flowshop::table::ProcTimes;
///
/// let jobs = ProcTimes::new(2, 3, vec![5, 2, 4, 3, 1, 6]).unwrap();
/// assert_eq!(rank_jobs(&jobs), vec![(2, 10), (0, 8), (1, 3)]);
/// ```
pub fn rank_jobs<T: Time>(jobs: &ProcTimes<T>) -> Vec<(usize, T)> {
    (0..jobs.jobs())
        .map(|j| (j, jobs.job_cost(j)))
        .sorted_by_key(|&(_, total)| Reverse(total))
        .collect()
}

/// Job order under construction.
///
/// Holds the working order and the best order recorded for the current
/// insertion step. The cursor tracks the position of the most recently
/// appended job as it is tested at earlier positions via adjacent
/// transpositions. Positions past `len` are logically absent and never read.
#[derive(Clone, Debug)]
pub struct Sequence {
    current: Vec<usize>,
    best: Vec<usize>,
    len: usize,
    cursor: usize,
}

impl Sequence {
    /// Empty sequence able to hold `capacity` jobs.
    pub fn new(capacity: usize) -> Self {
        Self {
            current: vec![0; capacity],
            best: vec![0; capacity],
            len: 0,
            cursor: 0,
        }
    }

    /// Maximum number of jobs.
    pub fn capacity(&self) -> usize {
        self.current.len()
    }

    /// Number of jobs inserted so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True before the first job is inserted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True once every job has been inserted.
    pub fn is_complete(&self) -> bool {
        self.len == self.capacity()
    }

    /// Position of the most recently appended job.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The working order.
    pub fn order(&self) -> &[usize] {
        &self.current[..self.len]
    }

    /// The best order recorded by [`Sequence::save_best`].
    pub fn best(&self) -> &[usize] {
        &self.best[..self.len]
    }

    /// Append a job at the end of the working order and move the cursor onto
    /// it.
    ///
    /// Panics if the sequence is already complete; inserting past capacity
    /// is a caller bug, not an input condition.
    pub fn push(&mut self, job: usize) {
        assert!(self.len < self.capacity(), "sequence is full");
        self.current[self.len] = job;
        self.cursor = self.len;
        self.len += 1;
    }

    /// Swap the cursored job with its left neighbor: one adjacent
    /// transposition toward the front.
    ///
    /// Panics if the cursor is already at the front.
    pub fn shift_left(&mut self) {
        assert!(self.cursor > 0, "cursor is at the front");
        self.current.swap(self.cursor, self.cursor - 1);
        self.cursor -= 1;
    }

    /// Record the working order as the best of the current step.
    pub fn save_best(&mut self) {
        self.best[..self.len].copy_from_slice(&self.current[..self.len]);
    }

    /// Overwrite the working order from the recorded best.
    pub fn restore_best(&mut self) {
        self.current[..self.len].copy_from_slice(&self.best[..self.len]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case::distinct(vec![5, 2, 4, 3, 1, 6], vec![(2, 10), (0, 8), (1, 3)])]
    #[case::tied(vec![3, 1, 3, 1, 3, 1], vec![(0, 4), (1, 4), (2, 4)])]
    #[case::tied_tail(vec![2, 5, 2, 2, 0, 2], vec![(1, 5), (0, 4), (2, 4)])]
    fn ranking_is_stable(#[case] cells: Vec<u32>, #[case] expected: Vec<(usize, u32)>) {
        let jobs = ProcTimes::new(2, cells.len() / 2, cells).unwrap();
        assert_eq!(rank_jobs(&jobs), expected);
    }

    #[test]
    fn push_tracks_cursor_and_len() {
        let mut seq = Sequence::new(3);
        assert!(seq.is_empty());

        seq.push(2);
        assert_eq!(seq.order(), &[2]);
        assert_eq!(seq.cursor(), 0);

        seq.push(0);
        assert_eq!(seq.order(), &[2, 0]);
        assert_eq!(seq.cursor(), 1);
        assert!(!seq.is_complete());

        seq.push(1);
        assert!(seq.is_complete());
    }

    #[test]
    fn shift_left_transposes_toward_front() {
        let mut seq = Sequence::new(3);
        seq.push(2);
        seq.push(0);
        seq.push(1);

        seq.shift_left();
        assert_eq!(seq.order(), &[2, 1, 0]);
        assert_eq!(seq.cursor(), 1);

        seq.shift_left();
        assert_eq!(seq.order(), &[1, 2, 0]);
        assert_eq!(seq.cursor(), 0);
    }

    #[test]
    fn best_snapshot_survives_further_shifts() {
        let mut seq = Sequence::new(3);
        seq.push(2);
        seq.push(0);
        seq.push(1);

        seq.shift_left();
        seq.save_best();
        assert_eq!(seq.best(), &[2, 1, 0]);

        seq.shift_left();
        assert_eq!(seq.order(), &[1, 2, 0]);

        seq.restore_best();
        assert_eq!(seq.order(), &[2, 1, 0]);
    }

    #[test]
    #[should_panic(expected = "sequence is full")]
    fn push_past_capacity_panics() {
        let mut seq = Sequence::new(1);
        seq.push(0);
        seq.push(1);
    }

    #[test]
    #[should_panic(expected = "cursor is at the front")]
    fn shift_at_front_panics() {
        let mut seq = Sequence::new(2);
        seq.push(0);
        seq.shift_left();
    }
}
