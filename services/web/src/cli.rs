use crate::server;
use clap::{Args, Parser, Subcommand};
use mars_mission::config::AppConfig;
use mars_mission::crew::{CrewSource, JsonCrewFile};
use mars_mission::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mars-mission",
    about = "Serve the Mars mission site or inspect its crew roster",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the crew roster the site would display
    Crew(CrewArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
struct CrewArgs {
    /// Roster file to read instead of the configured one
    #[arg(long)]
    roster: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Crew(args) => print_crew(args),
    }
}

fn print_crew(args: CrewArgs) -> Result<(), AppError> {
    let path = match args.roster {
        Some(path) => path,
        None => AppConfig::load()?.storage.roster_path,
    };
    let roster = JsonCrewFile::new(path);
    let crew = roster.load_crew()?;

    println!("Crew roster ({})", roster.path().display());
    if crew.is_empty() {
        println!("- no crew members listed");
    }
    for (idx, member) in crew.iter().enumerate() {
        let age = member
            .age
            .map(|age| format!(", {age} y.o."))
            .unwrap_or_default();
        println!(
            "{:>2}. {} | {}{}",
            idx + 1,
            member.full_name(),
            member.position,
            age
        );
    }

    Ok(())
}
