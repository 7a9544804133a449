use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use weathergate_core::{Config, CurrentConditions, UserStore, WeatherFetcher, WeatherstackClient};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathergate", version, about = "Credential-gated weather report")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weatherstack API key.
    Configure,

    /// Print the current-weather report for the city named in the input file.
    Report {
        /// Input file: username, password, city and units on four lines.
        #[arg(long, default_value = "input.txt")]
        input: PathBuf,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Report { input } => report(&input).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("weatherstack API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("API key saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// The three values the report flow needs from the input file.
#[derive(Debug, PartialEq, Eq)]
struct RunInput {
    username: String,
    password: String,
    city: String,
}

/// Lines 0-2 carry username, password and city; line 3 must exist but is
/// not used here. Fewer than four lines means the file is invalid.
fn parse_input(contents: &str) -> Option<RunInput> {
    let lines: Vec<&str> = contents.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    if lines.len() < 4 {
        return None;
    }

    Some(RunInput {
        username: lines[0].to_string(),
        password: lines[1].to_string(),
        city: lines[2].to_string(),
    })
}

async fn report(input: &Path) -> Result<()> {
    let contents = match fs::read_to_string(input) {
        Ok(c) => c,
        Err(err) => {
            println!("Could not read input file {}: {err}", input.display());
            return Ok(());
        }
    };

    let Some(run) = parse_input(&contents) else {
        println!("Invalid input file {}: expected at least 4 lines.", input.display());
        return Ok(());
    };

    let mut store = UserStore::load_default()?;
    if let Err(err) = store.add_user(&run.username, &run.password) {
        // Reported, not retried; the run continues against the in-memory store.
        eprintln!("Could not save credentials: {err}");
    }

    if !store.authenticate(&run.username, &run.password) {
        println!("Authentication failed for user: {}", run.username);
        return Ok(());
    }

    println!("Authentication successful for user: {}", run.username);
    println!("Welcome, {}!", run.username);
    println!();

    let config = Config::load()?;
    let api_key = config.resolve_api_key()?;
    let client = WeatherstackClient::new(api_key)?;

    let body = match client.fetch_current(&run.city).await {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(%err, "weather fetch failed");
            println!("No weather data available for {}.", run.city);
            return Ok(());
        }
    };

    print_report(&CurrentConditions::from_response(&body));
    Ok(())
}

fn print_report(r: &CurrentConditions) {
    println!("The weather in {} at {} is currently:", r.location, r.localtime);
    println!(
        "{} with a temperature of {}°C and a feels like temperature of {}°C.",
        r.description, r.temperature_c, r.feels_like_c
    );
    println!("There is a {} wind going through at {}km/h", r.wind_direction, r.wind_speed_kmh);
    println!(
        "The amount of precipitation predicted is {}mm with a humidity of {}g.m^-3",
        r.precip_mm, r.humidity
    );
    println!(
        "The pressure in the area is {} pascals. The visibility around you is {}km",
        r.pressure_mb, r.visibility_km
    );
    println!("With {}% of the sky under cloud.", r.cloud_cover_pct);
    println!("The UV radiation level right now is {}", r.uv_label);
    println!();
}
