//! # Blocking flow shop
//! Evaluation of job orders for the `F|block,perm|C_max` problem.
//!
//! There are no buffers between machines: a finished job blocks its machine
//! until the next machine has handed its own job downstream. `C[r][c]` is
//! therefore the time the job at position `c` *leaves* machine `r`, which may
//! be later than the time it finishes processing there.
//!
//! ## Recurrence
//! ```text
//! C[0][c]   = max(C[0][c-1] + p(0, c), C[1][c-1])        departure from row 0
//! C[r][c]   = max(C[r-1][c] + p(r, c), C[r+1][c-1])      interior rows
//! C[m-1][c] = C[m-2][c] + p(m-1, c)                      last row never blocks
//! ```
//!
//! with the first column degenerating to a plain cascade. The look at row
//! `r + 1` of the previous column is safe because columns are filled left to
//! right, rows top to bottom: column `c - 1` is complete before any cell of
//! column `c` is computed.

use std::cmp::max;

use crate::table::{CompletionTimes, ProcTimes};
use crate::Time;

/// Makespan of the first `order.len()` positions of `order` under the
/// blocking discipline.
///
/// Fills `comp` so that afterwards `comp.makespan(order.len())` equals the
/// returned value. Shapes and order indices must have been validated by the
/// caller (see [`Discipline::makespan`](crate::Discipline::makespan)).
///
/// ## Example
/// ```
/// use flowshop::fsb;
/// use flowshop::table::{CompletionTimes, ProcTimes};
///
/// let jobs = ProcTimes::new(2, 3, vec![5, 2, 4, 3, 1, 6]).unwrap();
/// let mut comp = CompletionTimes::for_table(&jobs);
///
/// // blocking can only lengthen the unconstrained schedule (17)
/// assert_eq!(fsb::c_max(&jobs, &mut comp, &[0, 1, 2]), 18);
/// ```
pub fn c_max<T: Time>(jobs: &ProcTimes<T>, comp: &mut CompletionTimes<T>, order: &[usize]) -> T {
    debug_assert_eq!(jobs.machines(), comp.machines());
    debug_assert_eq!(jobs.jobs(), comp.jobs());
    debug_assert!(!order.is_empty() && order.len() <= jobs.jobs());

    comp.clear();

    let m = jobs.machines();
    let last = m - 1;

    for (c, &job) in order.iter().enumerate() {
        for r in 0..m {
            let p = jobs.at(r, job);
            let t = if c == 0 {
                // no predecessor job, plain cascade down the first column
                if r == 0 {
                    p
                } else {
                    comp.at(r - 1, 0) + p
                }
            } else if m == 1 {
                comp.at(0, c - 1) + p
            } else if r == 0 {
                max(comp.at(0, c - 1) + p, comp.at(1, c - 1))
            } else if r == last {
                comp.at(r - 1, c) + p
            } else {
                max(comp.at(r - 1, c) + p, comp.at(r + 1, c - 1))
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
