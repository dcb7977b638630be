//! CLI tool for spritetab - shows how a sprite sheet would be cut into tiles
//!
//! Usage:
//!   spritetab_cli <width> <height>             # Geometry and tile positions
//!   spritetab_cli <width> <height> <duration>  # Also tile start times
//!
//! Output is JSON on stdout. Exits with status 1 when the sheet holds no
//! whole tile.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::io::{self, Write};

use serde::Serialize;
use spritetab::geometry::SpriteGeometry;
use spritetab::timeline::{format_timestamp, index_to_time};

#[derive(Serialize)]
struct TileReport {
    index: u32,
    time: f64,
    label: String,
    x_pct: f64,
    y_pct: f64,
}

#[derive(Serialize)]
struct SheetReport {
    width: f64,
    height: f64,
    duration: f64,
    columns: u32,
    rows: u32,
    tile_count: u32,
    background_size_pct: f64,
    tiles: Vec<TileReport>,
}

fn parse_arg(args: &[String], i: usize, name: &str) -> f64 {
    match args[i].parse::<f64>() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid {} '{}': {}", name, args[i], e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: spritetab_cli <width> <height> [duration]");
        std::process::exit(1);
    }

    let width = parse_arg(&args, 1, "width");
    let height = parse_arg(&args, 2, "height");
    let duration = if args.len() > 3 {
        parse_arg(&args, 3, "duration")
    } else {
        0.0
    };

    let Some(geometry) = SpriteGeometry::resolve_default(width, height) else {
        eprintln!("No sprites: {}x{} holds no whole tile", width, height);
        std::process::exit(1);
    };

    let tiles = (0..geometry.tile_count)
        .map(|index| {
            let time = index_to_time(index, duration, geometry.tile_count);
            let (x_pct, y_pct) = geometry.background_position_pct(index);
            TileReport {
                index,
                time,
                label: format_timestamp(time),
                x_pct,
                y_pct,
            }
        })
        .collect();

    let report = SheetReport {
        width,
        height,
        duration,
        columns: geometry.columns,
        rows: geometry.rows,
        tile_count: geometry.tile_count,
        background_size_pct: geometry.background_size_pct(),
        tiles,
    };

    let json = match serde_json::to_string_pretty(&report) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };
    io::stdout().write_all(json.as_bytes()).unwrap();
    println!();
}
