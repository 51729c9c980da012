use clap::{Args, Parser, Subcommand};
use geojson::GeoJson;
use line_measure::{
    annotation::build_with,
    config::{read_config_json, EngineConfig},
    draw::MemoryDrawBackend,
    geodesy::length,
    surface::MemorySurface,
    Coordinate, Line, LineController,
};
use log::debug;
use std::fs::File;
use std::process::ExitCode;

fn init_logging() {
    if let Ok(path) = std::env::var("LINE_MEASURE_LOG") {
        match File::create(&path) {
            Ok(file) => {
                env_logger::Builder::from_default_env()
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Failed to create log file {}: {}", path, e);
                env_logger::Builder::from_default_env().init();
            }
        }
    } else {
        env_logger::Builder::from_default_env().init();
    }
}

fn read_points_csv(path: &str) -> std::io::Result<Vec<Coordinate>> {
    let contents = std::fs::read_to_string(path)?;
    let mut pts = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let c = line.parse::<Coordinate>().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("line {}: {}", idx + 1, e),
            )
        })?;
        pts.push(c);
    }
    Ok(pts)
}

/// Measure a polyline and label its segment bearings.
#[derive(Parser)]
#[command(name = "line_measure_cli", version)]
struct Cli {
    /// Engine configuration JSON file
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct LineInput {
    /// Line vertices as lng,lat
    #[arg(allow_hyphen_values = true)]
    points: Vec<Coordinate>,
    /// CSV file of lng,lat rows, used instead of POINTS
    #[arg(long, conflicts_with = "points")]
    file: Option<String>,
}

impl LineInput {
    fn coordinates(&self) -> std::io::Result<Vec<Coordinate>> {
        match &self.file {
            Some(path) => read_points_csv(path),
            None => Ok(self.points.clone()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the geodesic length of a line in kilometers.
    Length(LineInput),
    /// Print the initial bearing of every segment.
    Bearings(LineInput),
    /// Set the line on an in-memory map and print its info and labels.
    Annotate {
        #[command(flatten)]
        input: LineInput,
        /// Write the label overlay as GeoJSON to this file
        #[arg(long)]
        output: Option<String>,
    },
}

fn load_config(path: Option<&str>) -> std::io::Result<EngineConfig> {
    match path {
        Some(path) => read_config_json(path),
        None => Ok(EngineConfig::default()),
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = load_config(cli.config.as_deref())
        .map_err(|e| format!("Error reading config: {}", e))?;
    debug!("bearing convention {:?}", config.bearing);
    match cli.command {
        Commands::Length(input) => {
            let pts = input.coordinates().map_err(|e| e.to_string())?;
            println!("Length: {:.3} km", length(&Line::new(pts)));
        }
        Commands::Bearings(input) => {
            let pts = input.coordinates().map_err(|e| e.to_string())?;
            let annotations = build_with(&Line::new(pts), config.bearing);
            if annotations.is_empty() {
                println!("Not enough points to calculate bearings.");
            }
            for a in annotations {
                if a.degenerate {
                    println!("Segment {}: {} (zero length)", a.segment + 1, a.label);
                } else {
                    println!("Segment {}: {}", a.segment + 1, a.label);
                }
            }
        }
        Commands::Annotate { input, output } => {
            let pts = input.coordinates().map_err(|e| e.to_string())?;
            let mut controller = LineController::new(
                MemoryDrawBackend::new(),
                MemorySurface::new(config.initial_view),
                &config,
            );
            controller
                .set_line_programmatically(&pts)
                .map_err(|e| format!("Invalid line: {}", e))?;
            print!("{}", controller.summary());
            for a in controller.annotations() {
                println!("{} at {:.6},{:.6}", a.label, a.position.lon, a.position.lat);
            }
            if let Some(path) = output {
                let data = controller
                    .surface()
                    .source_data(&config.overlay.id)
                    .cloned()
                    .ok_or_else(|| "overlay source missing".to_string())?;
                std::fs::write(&path, GeoJson::FeatureCollection(data).to_string())
                    .map_err(|e| format!("Error writing {}: {}", path, e))?;
                println!("Wrote {}", path);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
