// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The tile grid: how an image is carved into rectangles, how a tile
//! index maps to a pixel rectangle, and the order tiles are handed to
//! workers.
//!
//! The one invariant everything downstream leans on: the rectangles
//! of all tiles partition the image exactly.  Each pixel belongs to
//! one tile and one tile only, so tile rasters can be assembled into
//! the shared buffer without any locking.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A tile's position in the tile grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tile {
    /// Column in the tile grid.
    pub i: usize,
    /// Row in the tile grid.
    pub j: usize,
}

/// A rectangle of image pixels: origin plus dimensions, already
/// clipped to the image bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelRect {
    /// Leftmost pixel column.
    pub x: usize,
    /// Topmost pixel row.
    pub y: usize,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl PixelRect {
    /// The number of pixels inside the rectangle.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True for a degenerate rectangle with no pixels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An ordered run of tile indices dispatched to one worker as a unit.
pub type TileBatch = Vec<usize>;

/// The order in which tiles are dispatched.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TileOrder {
    /// Row-major grid order.  Deterministic; use for golden-image
    /// comparisons.
    Sequential,
    /// A seeded Fisher-Yates shuffle of the grid order.  Expensive
    /// tiles cluster along the fractal boundary, and shuffling keeps
    /// them from all landing on the same worker back to back.  The
    /// same seed always yields the same order.
    Shuffled {
        /// Shuffle seed.
        seed: u64,
    },
}

/// The partition of an image into tiles.
#[derive(Clone, Debug)]
pub struct TileGrid {
    /// Number of tile columns.
    pub width_tiles: usize,
    /// Number of tile rows.
    pub height_tiles: usize,
    image_width: usize,
    image_height: usize,
    tile_width: usize,
    tile_height: usize,
}

impl TileGrid {
    /// Lays a grid of `tile_width` x `tile_height` tiles over a
    /// `width` x `height` image, rounding the tile counts up so the
    /// rightmost column and bottom row cover any remainder.
    pub fn new(width: usize, height: usize, tile_width: usize, tile_height: usize) -> TileGrid {
        TileGrid {
            width_tiles: (width + tile_width - 1) / tile_width,
            height_tiles: (height + tile_height - 1) / tile_height,
            image_width: width,
            image_height: height,
            tile_width,
            tile_height,
        }
    }

    /// The total number of tiles.
    pub fn len(&self) -> usize {
        self.width_tiles * self.height_tiles
    }

    /// True when the grid holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The tile at a linear grid index.
    pub fn tile(&self, index: usize) -> Tile {
        Tile {
            i: index % self.width_tiles,
            j: index / self.width_tiles,
        }
    }

    /// The pixel rectangle a tile covers, clipped to the image.  Edge
    /// tiles come back narrower or shorter when the image dimensions
    /// are not multiples of the tile dimensions.
    pub fn rect(&self, tile: Tile) -> PixelRect {
        let x = tile.i * self.tile_width;
        let y = tile.j * self.tile_height;
        PixelRect {
            x,
            y,
            width: self.tile_width.min(self.image_width - x),
            height: self.tile_height.min(self.image_height - y),
        }
    }

    /// Every tile index once, in dispatch order.
    pub fn dispatch_order(&self, order: &TileOrder) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        if let TileOrder::Shuffled { seed } = *order {
            let mut rng = StdRng::seed_from_u64(seed);
            indices.shuffle(&mut rng);
        }
        indices
    }
}
