//! Developer CLI for TopperNav room data.
//!
//! # Responsibility
//! - Import a room CSV into a database file, once.
//! - Run room searches and guidance from a given position.

use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use toppernav_core::db::open_db;
use toppernav_core::{
    default_log_level, import_if_empty_from_path, init_logging, GeoPoint, ImportOutcome,
    NavigationConfig, RoomFinder, SqliteRoomRepository,
};

#[derive(Debug, Parser)]
#[command(name = "toppernav", about = "Offline room lookup tooling", version)]
struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, value_name = "path", default_value = "toppernav.sqlite3")]
    db: PathBuf,
    /// Absolute directory for rolling log files.
    #[arg(long, global = true, value_name = "dir")]
    log_dir: Option<String>,
    /// JSON file overriding navigation defaults.
    #[arg(long, global = true, value_name = "path")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the room CSV when the database is empty.
    Import {
        #[arg(value_name = "csv")]
        csv: PathBuf,
    },
    /// Search by building code, room number or both.
    Search {
        query: String,
        #[command(flatten)]
        position: OptionalPosition,
    },
    /// Distance, direction and ETA to one room.
    Navigate {
        building: String,
        room: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long, allow_hyphen_values = true)]
        alt: Option<f64>,
    },
    /// List building codes.
    Buildings,
}

#[derive(Debug, Args)]
struct OptionalPosition {
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lng: Option<f64>,
}

impl OptionalPosition {
    fn point(&self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.lat?, self.lng?)).filter(GeoPoint::is_valid)
    }
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("toppernav: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(default_log_level(), log_dir)?;
    }
    let config = match cli.config.as_ref() {
        Some(path) => NavigationConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => NavigationConfig::default(),
    };

    let mut conn = open_db(&cli.db)?;
    let mut repo = SqliteRoomRepository::new(&mut conn);

    match cli.command {
        Command::Import { csv } => match import_if_empty_from_path(&mut repo, &csv)? {
            ImportOutcome::Imported(report) => {
                println!(
                    "imported rooms={} written={} skipped={}",
                    report.final_count,
                    report.records_written,
                    report.skipped.len()
                );
                for skipped in &report.skipped {
                    println!("  line {}: {}", skipped.line_number, skipped.reason);
                }
            }
            ImportOutcome::AlreadyPopulated { existing } => {
                println!("already populated rooms={existing}");
            }
            ImportOutcome::SourceUnavailable { reason } => {
                return Err(format!("dataset unavailable: {reason}").into());
            }
        },
        Command::Search { query, position } => {
            let finder = RoomFinder::with_config(repo, config);
            for hit in finder.search(&query, position.point())? {
                match hit.direction {
                    Some(direction) => println!(
                        "{}\tfloor={}\t{:.0} m\t{:.0}°\t{}",
                        hit.room.label(),
                        display_floor(hit.room.floor),
                        direction.distance_meters,
                        direction.bearing_degrees,
                        direction.cardinal
                    ),
                    None => println!(
                        "{}\tfloor={}",
                        hit.room.label(),
                        display_floor(hit.room.floor)
                    ),
                }
            }
        }
        Command::Navigate {
            building,
            room,
            lat,
            lng,
            alt,
        } => {
            let finder = RoomFinder::with_config(repo, config);
            let destination = finder
                .find(&building, &room)?
                .ok_or_else(|| format!("room `{building} {room}` not found"))?;
            let user = checked_position(lat, lng)?;
            let guidance = finder.guidance(user, alt, &destination);
            println!("{}", guidance.status);
            println!("bearing={:.1}", guidance.direction.bearing_degrees);
            println!("eta_minutes={}", guidance.eta_minutes);
            if let Some(advice) = guidance.floor_advice {
                println!("{advice}");
            }
            if !finder.is_on_campus(user) {
                println!("warning: position is outside the campus bounds");
            }
        }
        Command::Buildings => {
            let finder = RoomFinder::with_config(repo, config);
            for building in finder.buildings()? {
                println!("{building}");
            }
        }
    }

    Ok(())
}

fn display_floor(floor: Option<i32>) -> String {
    floor.map_or_else(|| "-".to_string(), |floor| floor.to_string())
}

fn checked_position(lat: f64, lng: f64) -> Result<GeoPoint, String> {
    let user = GeoPoint::new(lat, lng);
    if !user.is_valid() {
        return Err(format!("invalid user position ({lat}, {lng})"));
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::{checked_position, OptionalPosition};

    #[test]
    fn navigate_rejects_out_of_range_or_non_finite_position() {
        assert!(checked_position(91.0, -86.45).is_err());
        assert!(checked_position(36.97, 180.5).is_err());
        assert!(checked_position(f64::NAN, -86.45).is_err());
        assert!(checked_position(36.97, f64::INFINITY).is_err());
    }

    #[test]
    fn navigate_accepts_campus_position() {
        let user = checked_position(36.9855, -86.4551).unwrap();
        assert_eq!(user.lat, 36.9855);
        assert_eq!(user.lng, -86.4551);
    }

    #[test]
    fn search_position_ignores_invalid_coordinates() {
        let invalid = OptionalPosition {
            lat: Some(120.0),
            lng: Some(-86.45),
        };
        assert!(invalid.point().is_none());
        let partial = OptionalPosition {
            lat: Some(36.97),
            lng: None,
        };
        assert!(partial.point().is_none());
    }
}
