use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use level_compiler::{compile_levels, CompileOptions};
use util::{TileMapping, Window};

/// Compile Tiled maps into a `levels` object for the game client
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Tiled map files (.tmx), emitted in the order given
    #[arg(required = true, value_name = "INFILE")]
    infiles: Vec<PathBuf>,

    /// Width of the compiled window, in tiles
    #[arg(long, default_value_t = Window::SCREEN.width)]
    screen_width: u32,

    /// Height of the compiled window, in tiles
    #[arg(long, default_value_t = Window::SCREEN.height)]
    screen_height: u32,

    /// Replace a tile value (after the 1-based id is shifted to 0-based)
    #[arg(
        long = "map",
        value_name = "FROM=TO",
        value_parser = parse_mapping_entry,
        allow_hyphen_values = true
    )]
    mapping: Vec<(i64, i64)>,

    /// Name of the generated variable
    #[arg(long, default_value = "levels")]
    var_name: String,
}

impl Args {
    fn options(&self) -> CompileOptions {
        CompileOptions {
            window: Window::new(self.screen_width, self.screen_height),
            mapping: self.mapping.iter().copied().collect::<TileMapping>(),
            var_name: self.var_name.clone(),
        }
    }
}

fn parse_mapping_entry(s: &str) -> Result<(i64, i64), String> {
    let (from, to) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FROM=TO, got '{s}'"))?;
    let from = from
        .trim()
        .parse()
        .map_err(|e| format!("invalid tile value '{from}': {e}"))?;
    let to = to
        .trim()
        .parse()
        .map_err(|e| format!("invalid tile value '{to}': {e}"))?;
    Ok((from, to))
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            // stderr gone, nothing left to report to
            err.print().ok();
            std::process::exit(code);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    compile_levels(&args.infiles, &args.options(), &mut out)
        .context("Failed to compile levels")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_entries_parse() {
        assert_eq!(parse_mapping_entry("4=100"), Ok((4, 100)));
        assert_eq!(parse_mapping_entry("-1 = 0"), Ok((-1, 0)));
        assert!(parse_mapping_entry("4").is_err());
        assert!(parse_mapping_entry("a=1").is_err());
    }

    #[test]
    fn no_input_files_is_an_error() {
        let err = Args::try_parse_from(["mapcompile"]).unwrap_err();

        assert!(err.use_stderr());
    }

    #[test]
    fn defaults_reproduce_the_screen_window() {
        let args = Args::try_parse_from(["mapcompile", "a.tmx", "b.tmx"]).unwrap();
        let options = args.options();

        assert_eq!(args.infiles, vec![PathBuf::from("a.tmx"), PathBuf::from("b.tmx")]);
        assert_eq!(options.window, Window::SCREEN);
        assert!(options.mapping.is_empty());
        assert_eq!(options.var_name, "levels");
    }

    #[test]
    fn flags_fill_the_options() {
        let args = Args::try_parse_from([
            "mapcompile",
            "--screen-width",
            "8",
            "--screen-height",
            "6",
            "--map",
            "3=7",
            "--map",
            "-1=0",
            "--var-name",
            "rooms",
            "a.tmx",
        ])
        .unwrap();
        let options = args.options();

        assert_eq!(options.window, Window::new(8, 6));
        assert_eq!(options.mapping.translate(3), 7);
        assert_eq!(options.mapping.translate(-1), 0);
        assert_eq!(options.var_name, "rooms");
    }
}
