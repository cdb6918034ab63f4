use std::path::{Path, PathBuf};

use anyhow::anyhow;
use thiserror::Error;
use tiled::{Loader, TileLayer};
use xml_dom::level2::{Node, NodeType};

const FLIPPED_HORIZONTALLY: u32 = 0x8000_0000;
const FLIPPED_VERTICALLY: u32 = 0x4000_0000;
const FLIPPED_DIAGONALLY: u32 = 0x2000_0000;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to load map from '{path}'")]
    Tiled {
        path: PathBuf,
        #[source]
        source: tiled::Error,
    },
    #[error("Failed to read tileset first ids from '{path}'")]
    FirstGids {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("Map '{path}' is infinite, only fixed size maps can be compiled")]
    Infinite { path: PathBuf },
    #[error("Map '{path}' has no tile layer")]
    NoTileLayer { path: PathBuf },
}

/// A single tile plane. Tiles are global tile ids exactly as stored in the
/// map file, flip flags included (0 is an empty cell), row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    pub tiles: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    pub width: u32,
    pub height: u32,
    pub layers: Vec<Layer>,
}

impl Map {
    pub fn first_layer(&self) -> Option<&Layer> {
        self.layers.first()
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }
}

pub fn load_map(path: impl AsRef<Path>) -> Result<Map, ParseError> {
    let path = path.as_ref();

    let mut loader = Loader::new();
    let map = loader
        .load_tmx_map(path)
        .map_err(|source| ParseError::Tiled {
            path: path.to_owned(),
            source,
        })?;

    if map.infinite() {
        return Err(ParseError::Infinite {
            path: path.to_owned(),
        });
    }

    let first_gids = declared_first_gids(path)
        .and_then(|first_gids| {
            if first_gids.len() == map.tilesets().len() {
                Ok(first_gids)
            } else {
                Err(anyhow!(
                    "found {} <tileset> elements, expected {}",
                    first_gids.len(),
                    map.tilesets().len()
                ))
            }
        })
        .map_err(|source| ParseError::FirstGids {
            path: path.to_owned(),
            source,
        })?;

    let layers: Vec<_> = map
        .layers()
        .filter_map(|x| x.as_tile_layer())
        .map(|layer| Layer {
            tiles: extract_gids(&layer, map.width, map.height, &first_gids),
        })
        .collect();

    if layers.is_empty() {
        return Err(ParseError::NoTileLayer {
            path: path.to_owned(),
        });
    }

    Ok(Map {
        width: map.width,
        height: map.height,
        layers,
    })
}

// tiled only hands out tileset-local ids, so the firstgid of every <tileset>
// is read back from the document, in the same order tiled lists them
fn declared_first_gids(path: &Path) -> Result<Vec<u32>, anyhow::Error> {
    let xml = std::fs::read_to_string(path)?;
    let dom = xml_dom::parser::read_xml(&xml)?;

    let root = dom
        .child_nodes()
        .into_iter()
        .find(|n| n.node_type() == NodeType::Element && n.local_name() == "map")
        .ok_or_else(|| anyhow!("no <map> element"))?;

    root.child_nodes()
        .iter()
        .filter(|n| n.node_type() == NodeType::Element && n.local_name() == "tileset")
        .map(|tileset| -> Result<u32, anyhow::Error> {
            let first_gid = tileset
                .attributes()
                .iter()
                .find(|(name, _)| name.local_name() == "firstgid")
                .and_then(|(_, value)| value.first_child())
                .and_then(|text| text.node_value())
                .ok_or_else(|| anyhow!("<tileset> without a firstgid"))?;
            Ok(first_gid.trim().parse()?)
        })
        .collect()
}

fn extract_gids(layer: &TileLayer, width: u32, height: u32, first_gids: &[u32]) -> Vec<u32> {
    let mut tiles = Vec::with_capacity(width as usize * height as usize);

    for y in 0..height {
        for x in 0..width {
            let gid = match layer.get_tile(x as i32, y as i32) {
                Some(tile) => {
                    let mut gid = first_gids[tile.tileset_index()] + tile.id();
                    if tile.flip_h {
                        gid |= FLIPPED_HORIZONTALLY;
                    }
                    if tile.flip_v {
                        gid |= FLIPPED_VERTICALLY;
                    }
                    if tile.flip_d {
                        gid |= FLIPPED_DIAGONALLY;
                    }
                    gid
                }
                None => 0,
            };
            tiles.push(gid);
        }
    }

    tiles
}
