use std::path::PathBuf;

use clap::Parser;
use division_elimination::{Division, Result, Standings};

/// Report which competitors of a division can no longer finish first.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Standings file: the number of competitors, then one line per competitor with
    /// name, wins, losses, remaining games and games left against each competitor.
    file: PathBuf,

    /// Only report these competitors (repeatable).
    #[arg(long = "team")]
    teams: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));
    let args = Args::parse();

    let standings = Standings::read(&args.file)?;
    log::info!(
        "loaded {} competitors from {}",
        standings.len(),
        args.file.display()
    );
    let division = Division::new(standings);
    let teams: Vec<String> = if args.teams.is_empty() {
        division.competitors().cloned().collect()
    } else {
        args.teams
    };

    for team in &teams {
        match division.certificate(team.as_str())? {
            Some(certificate) => {
                println!(
                    "{} is eliminated by the subset R = {{ {} }}",
                    team,
                    certificate.join(" ")
                );
            }
            None => println!("{team} is not eliminated"),
        }
    }
    Ok(())
}
