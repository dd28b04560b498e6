use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgMatches, Command};

use flowshop::batch::{self, BatchRun};
use flowshop::io::read_instance;
use flowshop::table::CompletionTimes;
use flowshop::Discipline;

fn cli() -> Command {
    Command::new("flowshop")
        .about("Permutation flow shop scheduling with NEH construction")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Run the NEH construction over instance files")
                .arg(
                    arg!(<FILES> ... "Instance files to solve")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-d --discipline [DISCIPLINE] "permutation, blocking, no-wait or all")
                        .default_value("all"),
                )
                .arg(
                    arg!(-s --seed [SEED] "Base seed for the tie-break generators")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(-o --out [DIR] "Directory to write JSON reports into")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("perm")
                .about("Evaluate one explicit job order on one instance")
                .arg(arg!(<FILE> "Instance file").value_parser(clap::value_parser!(PathBuf)))
                .arg(arg!(<ORDER> "Comma separated job indices, 0-based"))
                .arg(
                    arg!(-d --discipline [DISCIPLINE] "permutation, blocking or no-wait")
                        .default_value("permutation"),
                ),
        )
}

fn main() -> Result<()> {
    match cli().get_matches().subcommand() {
        Some(("solve", matches)) => solve(matches),
        Some(("perm", matches)) => perm(matches),
        Some((command, _)) => Err(anyhow!("unknown command {command}")),
        None => Err(anyhow!("no command given")),
    }
}

fn solve(matches: &ArgMatches) -> Result<()> {
    let datasets: Vec<PathBuf> = matches
        .get_many::<PathBuf>("FILES")
        .expect("FILES is required")
        .cloned()
        .collect();
    let disciplines = parse_disciplines(
        matches
            .get_one::<String>("discipline")
            .map(String::as_str)
            .unwrap_or("all"),
    )?;
    let seed = matches.get_one::<u64>("seed").copied().unwrap_or(0);
    let out = matches.get_one::<PathBuf>("out").cloned();

    if let Some(dir) = &out {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create report directory {}", dir.display()))?;
    }

    for (d, &discipline) in disciplines.iter().enumerate() {
        println!("starting {discipline} over {} instance(s)", datasets.len());

        let run = BatchRun {
            datasets: datasets.clone(),
            disciplines: vec![discipline],
            seed: seed.wrapping_add((d * datasets.len()) as u64),
        };

        for solve in batch::run(&run) {
            match solve.outcome {
                Ok(report) => {
                    println!(
                        "  {}: C_max {} ({} evaluations, {} ms)",
                        report.dataset, report.c_max, report.evaluations, report.elapsed_ms
                    );
                    if let Some(dir) = &out {
                        let path = report.write_to(dir).with_context(|| {
                            format!("cannot write report for {}", report.dataset)
                        })?;
                        println!("  report written to {}", path.display());
                    }
                }
                Err(err) => {
                    eprintln!("  {}: skipped: {err}", solve.dataset.display());
                }
            }
        }

        println!("{discipline} completed");
    }

    Ok(())
}

fn perm(matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<PathBuf>("FILE")
        .expect("FILE is required");
    let discipline: Discipline = matches
        .get_one::<String>("discipline")
        .map(String::as_str)
        .unwrap_or("permutation")
        .parse()?;
    let order = parse_order(
        matches
            .get_one::<String>("ORDER")
            .expect("ORDER is required"),
    )?;

    let jobs = read_instance::<u32>(path)
        .with_context(|| format!("cannot read instance {}", path.display()))?;
    let mut comp = CompletionTimes::for_table(&jobs);

    let c_max = discipline.makespan(&jobs, &mut comp, &order)?;
    println!("C_max of the given order under {discipline}: {c_max}");

    Ok(())
}

fn parse_disciplines(name: &str) -> Result<Vec<Discipline>> {
    if name == "all" {
        return Ok(Discipline::ALL.to_vec());
    }
    Ok(vec![name.parse()?])
}

fn parse_order(text: &str) -> Result<Vec<usize>> {
    text.split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<usize>()
                .with_context(|| format!("bad job index {tok:?} in order"))
        })
        .collect()
}
