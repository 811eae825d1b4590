#[macro_use]
extern crate log;
extern crate simplelog;

use clap::{Parser, ValueEnum};
use grid_seer::config::Config;
use grid_seer::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::error::Error;
use std::fs::{self, File};
use std::path::Path;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LoggingLevel {
    // can't use simplelog::Level because it doesn't derive ValueEnum
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Prints the field of view for a viewer on a map.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to a text map: '#' for walls, '.' for floor, '@' for the viewer
    #[clap(long, value_name = "PATH")]
    map: Option<String>,

    /// Viewer location, defaults to the '@' in the map or the center
    #[clap(long, value_name = "X,Y")]
    viewer: Option<String>,

    /// Also print where a ray walked toward this location stops
    #[clap(long, value_name = "X,Y")]
    target: Option<String>,

    /// Seed used for random maps
    #[clap(long, default_value_t = 1)]
    seed: u64,

    /// Chance that a cell in a random map is a wall, defaults to the config file or 0.15
    #[clap(long)]
    density: Option<f64>,

    /// Random map width
    #[clap(long, default_value_t = 40)]
    width: i32,

    /// Random map height
    #[clap(long, default_value_t = 30)]
    height: i32,

    /// Print a RON report instead of a picture
    #[clap(long)]
    ron: bool,

    /// Logging verbosity, defaults to the config file or info
    #[clap(long, value_enum, value_name = "NAME")]
    log_level: Option<LoggingLevel>,

    /// Path to log file, defaults to the config file or grid-seer.log
    #[clap(long, value_name = "PATH")]
    log_path: Option<String>,

    /// Path to the config file
    #[clap(long, value_name = "PATH", default_value_t = String::from("config.toml"))]
    config: String,
}

#[derive(Serialize)]
struct Report {
    viewer: Point,
    visible: Vec<Point>,
    borders: Vec<Border>,
    ray_end: Option<Point>,
}

fn to_filter(level: LoggingLevel) -> LevelFilter {
    match level {
        LoggingLevel::Error => LevelFilter::Error,
        LoggingLevel::Warn => LevelFilter::Warn,
        LoggingLevel::Info => LevelFilter::Info,
        LoggingLevel::Debug => LevelFilter::Debug,
        LoggingLevel::Trace => LevelFilter::Trace,
    }
}

fn init_logging(options: &Args, config: &Config) -> Result<(), Box<dyn Error>> {
    // See https://docs.rs/simplelog/0.12.1/simplelog/struct.ConfigBuilder.html
    let log_level = match options.log_level {
        Some(level) => to_filter(level),
        None => LevelFilter::from_str(&config.str_value("log_level", "info"))?,
    };
    let log_path = match &options.log_path {
        Some(path) => path.clone(),
        None => config.str_value("log_path", "grid-seer.log"),
    };
    let logger_config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off) // file names and line numbers
        .set_target_level(LevelFilter::Off) // don't log exe name
        .set_thread_level(LevelFilter::Off) // don't log thread IDs
        .build();
    WriteLogger::init(log_level, logger_config, File::create(&log_path)?)?;
    Ok(())
}

fn parse_point(text: &str) -> Result<Point, Box<dyn Error>> {
    match text.split_once(',') {
        Some((x, y)) => Ok(Point::new(x.trim().parse()?, y.trim().parse()?)),
        None => Err(format!("expected X,Y but found '{text}'").into()),
    }
}

fn map_size(width: i32, height: i32) -> Result<Size, Box<dyn Error>> {
    if width <= 0 || height <= 0 {
        return Err(format!("map size should be positive not {width}x{height}").into());
    }
    Ok(Size::new(width, height))
}

fn load_map(options: &Args, config: &Config) -> Result<TextMap, Box<dyn Error>> {
    match &options.map {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let map = TextMap::parse(&text)?;
            info!("loaded {path} with size {}", map.size());
            Ok(map)
        }
        None => {
            let density = options.density.unwrap_or_else(|| config.float_value("density", 0.15));
            if !(0.0..=1.0).contains(&density) {
                return Err(format!("density should be within [0, 1] not {density}").into());
            }
            let size = map_size(options.width, options.height)?;
            let mut rng = SmallRng::seed_from_u64(options.seed);
            info!("generating {size} map with seed {} and density {density}", options.seed);
            Ok(TextMap::random(size, density, &mut rng))
        }
    }
}

fn render(seer: &Seer, map: &TextMap) -> String {
    let viewer = seer.viewer();
    let size = map.size();
    let mut result = String::with_capacity(((size.width + 1) * size.height) as usize);
    for y in 0..size.height {
        for x in 0..size.width {
            let loc = Point::new(x, y);
            let ch = if loc == viewer {
                '@'
            } else if !seer.cached_visibility(loc).is_visible() {
                '?'
            } else if map.is_cell_blocking_vision(loc) {
                '#'
            } else {
                '.'
            };
            result.push(ch);
        }
        result.push('\n');
    }
    result
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = Args::parse();
    let config = Config::load(Path::new(&options.config), "grid-seer");
    init_logging(&options, &config)?;

    let local = chrono::Local::now();
    info!(
        "started up on {} with version {} ----------------------------",
        local.to_rfc2822(),
        env!("CARGO_PKG_VERSION")
    );
    if let Some(err) = config.error() {
        info!("using default config: {err}");
    }

    let mut map = load_map(&options, &config)?;
    let viewer = match &options.viewer {
        Some(text) => parse_point(text)?,
        None => map
            .viewer()
            .unwrap_or_else(|| Point::new(map.size().width / 2, map.size().height / 2)),
    };
    if !map.size().contains(viewer) {
        return Err(format!("viewer {viewer} is outside the {} map", map.size()).into());
    }
    map.set_viewer(viewer);

    let mut seer = Seer::new(viewer);
    seer.compute_full_vision_cache(&map);
    let ray_end = match &options.target {
        Some(text) => Some(seer.ray_end(&map, parse_point(text)?)),
        None => None,
    };

    if options.ron {
        let report = Report {
            viewer,
            visible: seer.visible_cells().collect(),
            borders: seer.visible_borders().collect(),
            ray_end,
        };
        println!("{}", ron::ser::to_string_pretty(&report, ron::ser::PrettyConfig::default())?);
    } else {
        print!("{}", render(&seer, &map));
        if let Some(end) = ray_end {
            println!("ray end: {end}");
        }
    }
    Ok(())
}
