// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel compositor, the tile rasterizer, and the parallel tile
//! scheduler.
//!
//! A render produces a flat row-major `Vec<Rgb>` of `width * height`
//! linear-light pixels.  Workers never touch that buffer: each worker
//! rasterizes whole tiles into tile-local vectors and hands the
//! finished patches back through its join handle, and the
//! orchestrating thread blits them into place.  Tile rectangles are
//! disjoint and cover the image exactly, so every pixel is written
//! exactly once and the result is independent of which worker drew
//! which tile, in which order.

use std::sync::{Arc, Mutex};

use itertools::iproduct;

use color::Rgb;
use config::RenderConfig;
use escape::escape_count;
use tiles::{PixelRect, TileBatch, TileGrid};

/// Shades one output pixel: evaluates every subpixel sample, shades
/// it, and folds the samples into a filter-weighted average.
pub fn shade_pixel(px: usize, py: usize, config: &RenderConfig) -> Rgb {
    let center_x = px as f32 + 0.5;
    let center_y = py as f32 + 0.5;

    let mut accum = Rgb::BLACK;
    for (offset, weight) in config.samples.iter() {
        // Map the sample position to window space.
        let c = config.window.point_at(
            (center_x + offset.x) / config.width as f32,
            (center_y + offset.y) / config.height as f32,
        );

        // Evaluate the Mandelbrot set under the sample, shade it, and
        // accumulate the weighted sum.
        let count = escape_count(c, config.iterations);
        accum = accum + config.shader.shade(count, config.iterations) * weight;
    }

    // Clamp the low end to zero.  A pixel that hits the set with a
    // single sample sitting in a negative filter lobe can accumulate
    // below zero.
    accum.clamp_negative() * config.samples.inv_weight_sum()
}

/// Rasterizes one clipped tile rectangle into a row-major pixel
/// vector of `rect.len()` entries.
pub fn rasterize_tile(rect: PixelRect, config: &RenderConfig) -> Vec<Rgb> {
    let mut pixels = Vec::with_capacity(rect.len());
    for (ty, tx) in iproduct!(0..rect.height, 0..rect.width) {
        pixels.push(shade_pixel(rect.x + tx, rect.y + ty, config));
    }
    pixels
}

/// Copies a finished tile raster into its rectangle of the image
/// buffer, row by row.
fn blit(rect: &PixelRect, pixels: &[Rgb], buffer: &mut [Rgb], image_width: usize) {
    for row in 0..rect.height {
        let src = &pixels[row * rect.width..(row + 1) * rect.width];
        let dst = (rect.y + row) * image_width + rect.x;
        buffer[dst..dst + rect.width].copy_from_slice(src);
    }
}

/// Renders the configured image across a fixed pool of worker
/// threads.
///
/// The tile indices are put in dispatch order, chunked into batches,
/// and drained from a shared queue by the workers; a worker
/// rasterizes each batch sequentially and returns its patches when
/// the queue runs dry.  Joining the scoped handles is the completion
/// rendezvous, after which the patches are blitted into the buffer.
pub fn render(config: &RenderConfig) -> Vec<Rgb> {
    let grid = TileGrid::new(
        config.width,
        config.height,
        config.tile_width,
        config.tile_height,
    );
    let batches: Vec<TileBatch> = grid
        .dispatch_order(&config.tile_order)
        .chunks(config.tiles_per_batch)
        .map(|chunk| chunk.to_vec())
        .collect();
    let queue = Arc::new(Mutex::new(batches.into_iter()));

    let mut buffer = vec![Rgb::BLACK; config.width * config.height];
    let grid = &grid;

    ::crossbeam::scope(|spawner| {
        let handles: Vec<_> = (0..config.threads)
            .map(|_| {
                let queue = queue.clone();
                spawner.spawn(move |_| {
                    let mut patches: Vec<(PixelRect, Vec<Rgb>)> = vec![];
                    loop {
                        let batch = { queue.lock().unwrap().next() };
                        match batch {
                            Some(batch) => {
                                for index in batch {
                                    let rect = grid.rect(grid.tile(index));
                                    patches.push((rect, rasterize_tile(rect, config)));
                                }
                            }
                            None => {
                                break;
                            }
                        }
                    }
                    patches
                })
            })
            .collect();

        for handle in handles {
            for (rect, pixels) in handle.join().unwrap() {
                blit(&rect, &pixels, &mut buffer, config.width);
            }
        }
    })
    .unwrap();

    buffer
}

/// The single-threaded reference path: same tiles, same dispatch
/// order, no pool.  Tests pin the threaded renderer against it.
pub fn render_single(config: &RenderConfig) -> Vec<Rgb> {
    let grid = TileGrid::new(
        config.width,
        config.height,
        config.tile_width,
        config.tile_height,
    );
    let mut buffer = vec![Rgb::BLACK; config.width * config.height];

    for index in grid.dispatch_order(&config.tile_order) {
        let rect = grid.rect(grid.tile(index));
        let pixels = rasterize_tile(rect, config);
        blit(&rect, &pixels, &mut buffer, config.width);
    }

    buffer
}
