//! # Permutation flow shop scheduling
//! All jobs pass through the same machines in the same order and the goal is
//! to find a job permutation with a small makespan `C_max`. The crate covers
//! three disciplines of the flow shop:
//!
//! ## Scheduling problems
//!
//! ### `F|perm|C_max`
//! The unconstrained permutation flow shop: a finished job may wait in an
//! unbounded buffer in front of the next machine. Evaluated by
//! [`fs::c_max`](crate::fs::c_max).
//!
//! ### `F|block,perm|C_max`
//! The blocking flow shop: there are no buffers, so a finished job occupies
//! its machine until the next machine is free to take it. Evaluated by
//! [`fsb::c_max`](crate::fsb::c_max).
//!
//! ### `F|nwt,perm|C_max`
//! The no-wait flow shop: a job must start on the next machine the instant
//! it finishes the previous one. Evaluated by
//! [`fsnw::c_max`](crate::fsnw::c_max).
//!
//! All three problems are NP-hard for three or more machines, so the crate
//! searches for near-optimal permutations with the constructive NEH
//! insertion heuristic in [`neh::construct`](crate::neh::construct) and runs
//! whole dataset sweeps in parallel via [`batch::run`](crate::batch::run).

use std::fmt;
use std::str::FromStr;

use fixedbitset::FixedBitSet;
use num_traits::PrimInt;
use serde::{Deserialize, Serialize};

pub mod batch;
pub mod fs;
pub mod fsb;
pub mod fsnw;
pub mod io;
pub mod neh;
pub mod seq;
pub mod table;

use table::{CompletionTimes, ProcTimes};

/// Discrete time axis of all scheduling problems in this crate.
///
/// Implemented for every primitive integer type. [`Time::inf`] is a sentinel
/// strictly greater than any feasible completion time; the insertion search
/// uses it as the not-yet-evaluated best fitness.
pub trait Time: PrimInt {
    /// Sentinel value greater than any feasible makespan.
    #[inline]
    fn inf() -> Self {
        Self::max_value()
    }

    /// True iff `self` is the [`Time::inf`] sentinel.
    #[inline]
    fn is_inf(&self) -> bool {
        *self == Self::max_value()
    }
}

impl<T: PrimInt> Time for T {}

/// Scheduling discipline of the flow shop.
///
/// The discipline selects which recurrence evaluates a job order; the
/// insertion search itself is discipline-agnostic.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Discipline {
    /// Unconstrained permutation flow shop, `F|perm|C_max`.
    Permutation,
    /// Blocking flow shop, `F|block,perm|C_max`.
    Blocking,
    /// No-wait flow shop, `F|nwt,perm|C_max`.
    NoWait,
}

impl Discipline {
    /// All disciplines, in the order batch sweeps run them.
    pub const ALL: [Discipline; 3] = [
        Discipline::Permutation,
        Discipline::Blocking,
        Discipline::NoWait,
    ];

    /// Makespan of the first `order.len()` positions of `order`.
    ///
    /// Fills `comp` column by column so that afterwards
    /// `comp.makespan(order.len())` equals the returned value.
    ///
    /// ## Errors
    /// [`Error::ShapeMismatch`] if `comp` does not match the shape of `jobs`,
    /// and [`Error::EmptyOrder`] / [`Error::OrderTooLong`] /
    /// [`Error::JobOutOfRange`] / [`Error::DuplicateJob`] for orders that are
    /// not a prefix of a permutation of the job set.
    ///
    /// ## Example
    /// ```
    /// use flowshop::table::{CompletionTimes, ProcTimes};
    /// use flowshop::Discipline;
    ///
    /// // 2 machines, 3 jobs, machine-major cells
    /// let jobs = ProcTimes::new(2, 3, vec![5, 2, 4, 3, 1, 6]).unwrap();
    /// let mut comp = CompletionTimes::for_table(&jobs);
    ///
    /// let c_max = Discipline::Permutation
    ///     .makespan(&jobs, &mut comp, &[2, 0, 1])
    ///     .unwrap();
    ///
    /// assert_eq!(c_max, 14);
    /// assert!(Discipline::Permutation.makespan(&jobs, &mut comp, &[0, 0]).is_err());
    /// ```
    pub fn makespan<T: Time>(
        self,
        jobs: &ProcTimes<T>,
        comp: &mut CompletionTimes<T>,
        order: &[usize],
    ) -> Result<T, Error> {
        check_shape(jobs, comp)?;
        check_order(order, jobs.jobs())?;
        Ok(self.eval(jobs, comp, order))
    }

    /// Makespan of the natural column order `0, 1, .., jobs - 1`.
    pub fn makespan_full<T: Time>(
        self,
        jobs: &ProcTimes<T>,
        comp: &mut CompletionTimes<T>,
    ) -> Result<T, Error> {
        check_shape(jobs, comp)?;
        Ok(match self {
            Discipline::Permutation => fs::c_max_full(jobs, comp),
            Discipline::Blocking => fsb::c_max_full(jobs, comp),
            Discipline::NoWait => fsnw::c_max_full(jobs, comp),
        })
    }

    /// Dispatch to the discipline's recurrence. Callers must have validated
    /// `comp` and `order` against `jobs`.
    pub(crate) fn eval<T: Time>(
        self,
        jobs: &ProcTimes<T>,
        comp: &mut CompletionTimes<T>,
        order: &[usize],
    ) -> T {
        match self {
            Discipline::Permutation => fs::c_max(jobs, comp, order),
            Discipline::Blocking => fsb::c_max(jobs, comp, order),
            Discipline::NoWait => fsnw::c_max(jobs, comp, order),
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Discipline::Permutation => "permutation",
            Discipline::Blocking => "blocking",
            Discipline::NoWait => "no-wait",
        };
        f.write_str(name)
    }
}

impl FromStr for Discipline {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permutation" | "plain" | "fs" => Ok(Discipline::Permutation),
            "blocking" | "fsb" => Ok(Discipline::Blocking),
            "no-wait" | "nowait" | "fsnw" => Ok(Discipline::NoWait),
            _ => Err(Error::UnknownDiscipline {
                name: s.to_string(),
            }),
        }
    }
}

/// Everything that can go wrong at the crate boundary.
///
/// Input-validity problems (malformed instance files, inconsistent grids)
/// and caller precondition violations (bad job orders, shape mismatches)
/// both surface as `Err` values so a batch sweep can skip one dataset
/// without aborting its siblings.
#[derive(Debug)]
pub enum Error {
    /// Reading an instance or writing a report failed.
    Io(std::io::Error),
    /// Serializing a report failed.
    Json(serde_json::Error),
    /// A token of an instance file is not a valid value.
    Parse { line: usize, token: String },
    /// The cell grid ended early.
    Truncated { expected: usize, found: usize },
    /// A processing time is negative.
    Negative { machine: usize, job: usize },
    /// The instance declares zero machines or zero jobs.
    Empty,
    /// Completion grid shape differs from the processing-time grid.
    ShapeMismatch {
        machines: usize,
        jobs: usize,
        comp_machines: usize,
        comp_jobs: usize,
    },
    /// A job order with no positions was given.
    EmptyOrder,
    /// A job order holds more positions than there are jobs.
    OrderTooLong { len: usize, jobs: usize },
    /// A job order references a job outside `0..jobs`.
    JobOutOfRange { job: usize, jobs: usize },
    /// A job order lists the same job twice.
    DuplicateJob { job: usize },
    /// A discipline name did not parse.
    UnknownDiscipline { name: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "i/o error: {e}"),
            Error::Json(e) => write!(f, "report serialization failed: {e}"),
            Error::Parse { line, token } => {
                write!(f, "line {line}: cannot parse {token:?} as a time value")
            }
            Error::Truncated { expected, found } => {
                write!(
                    f,
                    "instance ended early: expected {expected} cells, found {found}"
                )
            }
            Error::Negative { machine, job } => {
                write!(
                    f,
                    "negative processing time for job {job} on machine {machine}"
                )
            }
            Error::Empty => write!(f, "instance has no machines or no jobs"),
            Error::ShapeMismatch {
                machines,
                jobs,
                comp_machines,
                comp_jobs,
            } => write!(
                f,
                "completion grid is {comp_machines}x{comp_jobs} but the instance is {machines}x{jobs}",
            ),
            Error::EmptyOrder => write!(f, "job order is empty"),
            Error::OrderTooLong { len, jobs } => {
                write!(
                    f,
                    "job order has {len} positions but only {jobs} jobs exist"
                )
            }
            Error::JobOutOfRange { job, jobs } => {
                write!(f, "job index {job} is outside 0..{jobs}")
            }
            Error::DuplicateJob { job } => write!(f, "job {job} appears twice in the order"),
            Error::UnknownDiscipline { name } => {
                write!(
                    f,
                    "unknown discipline {name:?} (expected permutation, blocking or no-wait)"
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

fn check_shape<T: Time>(jobs: &ProcTimes<T>, comp: &CompletionTimes<T>) -> Result<(), Error> {
    if jobs.machines() != comp.machines() || jobs.jobs() != comp.jobs() {
        return Err(Error::ShapeMismatch {
            machines: jobs.machines(),
            jobs: jobs.jobs(),
            comp_machines: comp.machines(),
            comp_jobs: comp.jobs(),
        });
    }
    Ok(())
}

fn check_order(order: &[usize], jobs: usize) -> Result<(), Error> {
    if order.is_empty() {
        return Err(Error::EmptyOrder);
    }
    if order.len() > jobs {
        return Err(Error::OrderTooLong {
            len: order.len(),
            jobs,
        });
    }

    let mut seen = FixedBitSet::with_capacity(jobs);
    for &job in order {
        if job >= jobs {
            return Err(Error::JobOutOfRange { job, jobs });
        }
        if seen.put(job) {
            return Err(Error::DuplicateJob { job });
        }
    }
    Ok(())
}
