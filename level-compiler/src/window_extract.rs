use std::io::{self, Write};

use itertools::iproduct;
use thiserror::Error;
use util::{TileMapping, Window};

use crate::tmx_load::Map;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Cell ({x}, {y}) of level '{level}' lies outside its {width}x{height} map")]
pub struct IndexError {
    pub level: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Reads the window from the first tile layer, row by row. Every stored id is
/// shifted down by one before it goes through the mapping, so mapping keys
/// refer to the shifted value.
pub fn extract_window(
    map: &Map,
    level: &str,
    window: Window,
    mapping: &TileMapping,
) -> Result<Vec<i64>, IndexError> {
    let tiles = map.first_layer().map_or(&[][..], |layer| &layer.tiles[..]);

    iproduct!(0..window.height, 0..window.width)
        .map(|(y, x)| -> Result<i64, IndexError> {
            let index = y as usize * map.width as usize + x as usize;
            let stored = tiles
                .get(index)
                .filter(|_| map.contains(x, y))
                .ok_or_else(|| IndexError {
                    level: level.to_owned(),
                    x,
                    y,
                    width: map.width,
                    height: map.height,
                })?;

            Ok(mapping.translate(i64::from(*stored) - 1))
        })
        .collect()
}

pub fn write_level(out: &mut impl Write, level: &str, values: &[i64]) -> io::Result<()> {
    write!(out, "\t {level}: {{ map: [")?;
    for value in values {
        write!(out, "{value},")?;
    }
    writeln!(out, "] }},")
}
