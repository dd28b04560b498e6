//! # Unconstrained permutation flow shop
//! Evaluation of job orders for the `F|perm|C_max` problem.
//!
//! ## Recurrence
//! With `C[r][c]` the completion time of the job at position `c` on machine
//! `r` and `p(r, c)` its processing time there:
//!
//! ```text
//! C[r][c] = max(C[r][c-1], C[r-1][c]) + p(r, c)
//! ```
//!
//! where a missing neighbor (first row or first column) contributes zero.
//! The makespan is the bottom-right cell of the evaluated column range.
//!
//! The grid is filled column by column, rows top to bottom, so both
//! neighbors of a cell are already final when the cell is computed. Runs in
//! `O(m * k)` for `m` machines and `k` evaluated positions.

use std::cmp::max;

use crate::table::{CompletionTimes, ProcTimes};
use crate::Time;

/// Makespan of the first `order.len()` positions of `order`.
///
/// Fills `comp` so that afterwards `comp.makespan(order.len())` equals the
/// returned value. Shapes and order indices must have been validated by the
/// caller (see [`Discipline::makespan`](crate::Discipline::makespan)).
///
/// ## Example
/// ```
/// use flowshop::fs;
/// use flowshop::table::{CompletionTimes, ProcTimes};
///
/// let jobs = ProcTimes::new(2, 3, vec![5, 2, 4, 3, 1, 6]).unwrap();
/// let mut comp = CompletionTimes::for_table(&jobs);
///
/// // partial order: job 2 first, then job 0
/// assert_eq!(fs::c_max(&jobs, &mut comp, &[2, 0]), 13);
/// // the other insertion position is worse
/// assert_eq!(fs::c_max(&jobs, &mut comp, &[0, 2]), 15);
/// ```
pub fn c_max<T: Time>(jobs: &ProcTimes<T>, comp: &mut CompletionTimes<T>, order: &[usize]) -> T {
    debug_assert_eq!(jobs.machines(), comp.machines());
    debug_assert_eq!(jobs.jobs(), comp.jobs());
    debug_assert!(!order.is_empty() && order.len() <= jobs.jobs());

    comp.clear();

    let m = jobs.machines();
    for (c, &job) in order.iter().enumerate() {
        for r in 0..m {
            let base = match (r, c) {
                (0, 0) => T::zero(),
                (0, _) => comp.at(0, c - 1),
                (_, 0) => comp.at(r - 1, 0),
                _ => max(comp.at(r, c - 1), comp.at(r - 1, c)),
            };
            comp.set(r, c, base + jobs.at(r, job));
        }
    }

    comp.makespan(order.len())
}

/// Makespan of the natural column order `0, 1, .., jobs - 1`.
pub fn c_max_full<T: Time>(jobs: &ProcTimes<T>, comp: &mut CompletionTimes<T>) -> T {
    let order = (0..jobs.jobs()).collect::<Vec<_>>();
    c_max(jobs, comp, &order)
}
