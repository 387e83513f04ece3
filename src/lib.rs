#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Supersampled Mandelbrot renderer
//!
//! Renders a still image of the Mandelbrot set over an arbitrary
//! window of the complex plane.  Each output pixel is supersampled
//! with a Halton(2,3) low-discrepancy point set and reconstructed
//! with a Mitchell-Netravali filter, which gives smooth antialiased
//! edges along the fractal boundary instead of the usual stair-steps.
//!
//! The image is carved into rectangular tiles which are dispatched,
//! in seeded-shuffled batches, to a fixed pool of worker threads.
//! Tiles near the fractal boundary cost far more than interior or
//! exterior tiles, so the shuffle keeps any one worker from drawing
//! a run of expensive tiles.  Every tile covers a disjoint pixel
//! rectangle, so the finished buffer never depends on which worker
//! got which tile.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
extern crate num;
extern crate num_cpus;
extern crate rand;

pub mod color;
pub mod config;
pub mod diagnostics;
pub mod escape;
pub mod output;
pub mod render;
pub mod sampling;
pub mod tiles;
pub mod window;

pub use color::{Rgb, Shader};
pub use config::{ConfigError, RenderConfig, RenderOptions};
pub use render::{render, render_single};
pub use tiles::TileOrder;
pub use window::Window;
