use std::{
    io::{self, Write},
    path::Path,
};

use log::{debug, info, warn};
use thiserror::Error;
use util::{TileMapping, Window};

mod tmx_load;
mod window_extract;

pub use tmx_load::{load_map, Layer, Map, ParseError};
pub use window_extract::{extract_window, write_level, IndexError};

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error("Failed to write compiled levels")]
    Io(#[from] io::Error),
}

#[derive(Clone, Debug)]
pub struct CompileOptions {
    pub window: Window,
    pub mapping: TileMapping,
    pub var_name: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            window: Window::SCREEN,
            mapping: TileMapping::new(),
            var_name: "levels".to_owned(),
        }
    }
}

/// The key a level is emitted under: its file name without directory or
/// extension.
pub fn level_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Loads one map and returns its name together with the window values.
pub fn compile_level(
    path: impl AsRef<Path>,
    options: &CompileOptions,
) -> Result<(String, Vec<i64>), CompileError> {
    let path = path.as_ref();
    let name = level_name(path);

    info!("Compiling level '{}' from {}", name, path.display());

    let map = load_map(path)?;
    debug!(
        "Level '{}' is {}x{} with {} tile layer(s)",
        name,
        map.width,
        map.height,
        map.layers.len()
    );
    if map.layers.len() > 1 {
        warn!(
            "Level '{}' has {} tile layers, only the first one is compiled",
            name,
            map.layers.len()
        );
    }

    let values = extract_window(&map, &name, options.window, &options.mapping)?;
    Ok((name, values))
}

/// Writes every level into one object literal, in the order given. Each
/// entry goes out as soon as its map is compiled; the first failure stops
/// the run.
pub fn compile_levels<P: AsRef<Path>>(
    paths: &[P],
    options: &CompileOptions,
    out: &mut impl Write,
) -> Result<(), CompileError> {
    writeln!(out, "var {}={{", options.var_name)?;

    for path in paths {
        let (name, values) = compile_level(path, options)?;
        write_level(out, &name, &values)?;
    }

    writeln!(out, "}}")?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_name_strips_directory_and_extension() {
        assert_eq!(level_name(Path::new("levels/intro.tmx")), "intro");
        assert_eq!(level_name(Path::new("/abs/path/cave_2.tmx")), "cave_2");
        assert_eq!(level_name(Path::new("plain")), "plain");
    }

    #[test]
    fn default_options_use_the_screen_window() {
        let options = CompileOptions::default();

        assert_eq!(options.window, Window::new(20, 14));
        assert!(options.mapping.is_empty());
        assert_eq!(options.var_name, "levels");
    }

    #[test]
    fn no_levels_still_writes_the_object() {
        let mut out = Vec::new();

        compile_levels::<&Path>(&[], &CompileOptions::default(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "var levels={\n}\n");
    }
}
