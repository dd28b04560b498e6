//! # No-wait flow shop
//! Evaluation of job orders for the `F|nwt,perm|C_max` problem.
//!
//! A job must start on machine `r + 1` the instant it finishes on machine
//! `r`. Whenever a job would arrive *before* the downstream machine is free,
//! its earlier operations must be pushed forward so that the whole chain
//! runs back to back. That correction is applied lazily: the
//! cells of the current column written so far are incremented in place by
//! the detected gap before the current cell is computed. This is the one
//! place where scheduling a later operation retroactively changes cells that
//! were already written.
//!
//! After a column is complete the zero-wait invariant holds exactly:
//! `C[r][c] - C[r-1][c] == p(r, c)` for every machine `r > 0`.

use crate::table::{CompletionTimes, ProcTimes};
use crate::Time;

/// Makespan of the first `order.len()` positions of `order` under the
/// no-wait discipline.
///
/// Fills `comp` so that afterwards `comp.makespan(order.len())` equals the
/// returned value. Shapes and order indices must have been validated by the
/// caller (see [`Discipline::makespan`](crate::Discipline::makespan)).
///
/// ## Example
/// ```
/// use flowshop::fsnw;
/// use flowshop::table::{CompletionTimes, ProcTimes};
///
/// let jobs = ProcTimes::new(2, 3, vec![5, 2, 4, 3, 1, 6]).unwrap();
/// let mut comp = CompletionTimes::for_table(&jobs);
///
/// assert_eq!(fsnw::c_max(&jobs, &mut comp, &[0, 1, 2]), 18);
///
/// // zero-wait: each operation starts the instant the previous one ends
/// for c in 0..3 {
///     assert_eq!(comp.at(1, c) - comp.at(0, c), jobs.at(1, [0, 1, 2][c]));
/// }
/// ```
pub fn c_max<T: Time>(jobs: &ProcTimes<T>, comp: &mut CompletionTimes<T>, order: &[usize]) -> T {
    debug_assert_eq!(jobs.machines(), comp.machines());
    debug_assert_eq!(jobs.jobs(), comp.jobs());
    debug_assert!(!order.is_empty() && order.len() <= jobs.jobs());

    comp.clear();

    let m = jobs.machines();
    for (c, &job) in order.iter().enumerate() {
        for r in 0..m {
            let p = jobs.at(r, job);
            let t = if r == 0 {
                if c == 0 {
                    p
                } else {
                    comp.at(0, c - 1) + p
                }
            } else if c == 0 {
                comp.at(r - 1, 0) + p
            } else {
                let up = comp.at(r - 1, c);
                let left = comp.at(r, c - 1);
                // machine r was still busy when the job would arrive: push
                // the job's earlier operations forward to close the gap
                if up < left {
                    delay_column(comp, c, r, left - up);
                }
                comp.at(r - 1, c) + p
            };
            comp.set(r, c, t);
        }
    }

    comp.makespan(order.len())
}

/// Makespan of the natural column order `0, 1, .., jobs - 1`.
pub fn c_max_full<T: Time>(jobs: &ProcTimes<T>, comp: &mut CompletionTimes<T>) -> T {
    let order = (0..jobs.jobs()).collect::<Vec<_>>();
    c_max(jobs, comp, &order)
}

/// Increment the completion times already written in column `col`, rows
/// `0..row`, by `diff`. Row `row - 1` is corrected too, so the caller reads
/// the shifted value when it continues the recurrence.
fn delay_column<T: Time>(comp: &mut CompletionTimes<T>, col: usize, row: usize, diff: T) {
    for r in 0..row {
        let t = comp.at(r, col) + diff;
        comp.set(r, col, t);
    }
}
