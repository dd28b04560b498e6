use std::fs;
use std::path::PathBuf;

use flowshop::batch::{self, BatchRun};
use flowshop::{Discipline, Error};

struct TempDir(PathBuf);

impl TempDir {
    fn new(tag: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("flowshop-{tag}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.0.join(name);
        fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[test]
fn sweep_covers_every_dataset_and_discipline() {
    let dir = TempDir::new("sweep");
    let run = BatchRun {
        datasets: vec![
            dir.file("a.txt", "2 3\n5 2 4\n3 1 6\n"),
            dir.file("b.txt", "2 2\n1 2\n3 4\n"),
        ],
        disciplines: Discipline::ALL.to_vec(),
        seed: 0,
    };

    let solves = batch::run(&run);
    assert_eq!(solves.len(), 6);

    // grouped by discipline, datasets in request order
    let disciplines: Vec<_> = solves.iter().map(|s| s.discipline).collect();
    assert_eq!(
        disciplines,
        vec![
            Discipline::Permutation,
            Discipline::Permutation,
            Discipline::Blocking,
            Discipline::Blocking,
            Discipline::NoWait,
            Discipline::NoWait,
        ]
    );

    for solve in &solves {
        let report = solve.outcome.as_ref().unwrap();
        assert_eq!(report.discipline, solve.discipline);
        assert!(report.c_max > 0);
    }
}

#[test]
fn malformed_dataset_is_skipped_not_fatal() {
    let dir = TempDir::new("skip");
    let run = BatchRun {
        datasets: vec![
            dir.file("good.txt", "2 2\n1 2\n3 4\n"),
            dir.file("bad.txt", "2 2\n1 2\n3 x\n"),
            dir.0.join("missing.txt"),
        ],
        disciplines: vec![Discipline::Permutation],
        seed: 7,
    };

    let solves = batch::run(&run);
    assert_eq!(solves.len(), 3);

    assert!(solves[0].outcome.is_ok());
    assert!(matches!(solves[1].outcome, Err(Error::Parse { .. })));
    assert!(matches!(solves[2].outcome, Err(Error::Io(_))));
}

#[test]
fn repeated_sweeps_reproduce_every_solve() {
    let dir = TempDir::new("repro");
    let run = BatchRun {
        datasets: vec![dir.file("a.txt", "2 3\n5 2 4\n3 1 6\n")],
        disciplines: Discipline::ALL.to_vec(),
        seed: 42,
    };

    let first = batch::run(&run);
    let second = batch::run(&run);

    for (a, b) in first.iter().zip(&second) {
        let (a, b) = (a.outcome.as_ref().unwrap(), b.outcome.as_ref().unwrap());
        assert_eq!(a.order, b.order);
        assert_eq!(a.c_max, b.c_max);
    }
}

#[test]
fn reports_land_next_to_each_other() {
    let data = TempDir::new("reports-in");
    let out = TempDir::new("reports-out");

    let run = BatchRun {
        datasets: vec![data.file("taillard-0.txt", "2 3\n5 2 4\n3 1 6\n")],
        disciplines: vec![Discipline::Permutation, Discipline::Blocking],
        seed: 0,
    };

    for solve in batch::run(&run) {
        let report = solve.outcome.unwrap();
        let path = report.write_to(&out.0).unwrap();
        assert!(path.ends_with(format!("taillard-0-{}.json", report.discipline)));

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["dataset"], "taillard-0");
        assert_eq!(value["c_max"], report.c_max);
    }
}
