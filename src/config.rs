// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render configuration.  The raw invocation parameters arrive as
//! plain scalars in a `RenderOptions`; `RenderConfig::new` is the one
//! gate where they are validated and frozen.  Past that gate the
//! render is total: nothing in the hot path can fail, divide by zero,
//! or produce a NaN from a degenerate setup.

use color::Shader;
use sampling::SampleTable;
use tiles::TileOrder;
use window::Window;

/// Iteration caps at or below this would make the gradient shader
/// divide by zero.
const MIN_ITERATIONS: u32 = 22;

/// A configuration the renderer refuses to start from.
#[derive(Debug, Fail, PartialEq)]
pub enum ConfigError {
    /// Image width or height is zero.
    #[fail(display = "image dimensions must be positive, got {}x{}", width, height)]
    EmptyImage {
        /// Requested image width.
        width: usize,
        /// Requested image height.
        height: usize,
    },
    /// Tile width or height is zero.
    #[fail(display = "tile dimensions must be positive, got {}x{}", width, height)]
    EmptyTile {
        /// Requested tile width.
        width: usize,
        /// Requested tile height.
        height: usize,
    },
    /// A tile dimension exceeds the matching image dimension.
    #[fail(display = "tiles of {}x{} do not fit a {}x{} image",
           tile_width, tile_height, width, height)]
    TileLargerThanImage {
        /// Requested tile width.
        tile_width: usize,
        /// Requested tile height.
        tile_height: usize,
        /// Requested image width.
        width: usize,
        /// Requested image height.
        height: usize,
    },
    /// The worker pool would have no workers.
    #[fail(display = "thread count must be at least one")]
    NoThreads,
    /// Batches would carry no tiles, so the queue could never drain.
    #[fail(display = "tiles per batch must be at least one")]
    EmptyBatch,
    /// The sample table would be empty.
    #[fail(display = "sample count must be at least one")]
    NoSamples,
    /// The filter support is zero or negative.
    #[fail(display = "filter size must be positive, got {}", size)]
    BadFilterSize {
        /// Requested filter support width.
        size: f32,
    },
    /// The iteration cap is too small for the gradient's knee.
    #[fail(display = "iteration cap must be at least {}, got {}", min, cap)]
    IterationCapTooLow {
        /// Smallest accepted cap.
        min: u32,
        /// Requested cap.
        cap: u32,
    },
    /// The plane window has no area.
    #[fail(display = "window extent must be positive, got {}x{}", width, height)]
    EmptyWindow {
        /// Requested window width.
        width: f32,
        /// Requested window height.
        height: f32,
    },
    /// The sample weights cancel out, leaving nothing to normalize by.
    #[fail(display = "sample weights sum to zero or worse; adjust sample count or filter size")]
    DegenerateFilter,
}

/// The plain-scalar invocation parameters, exactly as a CLI or a
/// caller supplies them.  `Default` carries this renderer's stock
/// zoomed-in view.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Output image width in pixels.
    pub width: usize,
    /// Output image height in pixels.
    pub height: usize,
    /// Tile width in pixels.
    pub tile_width: usize,
    /// Tile height in pixels.
    pub tile_height: usize,
    /// Subpixel samples per pixel.
    pub samples: usize,
    /// Reconstruction filter support width, in pixels.
    pub filter_size: f32,
    /// Escape-iteration cap.
    pub iterations: u32,
    /// The visible rectangle of the complex plane.
    pub window: Window,
    /// Color-mapping strategy.
    pub shader: Shader,
    /// Worker-pool size.
    pub threads: usize,
    /// Tiles handed to a worker per dispatch.
    pub tiles_per_batch: usize,
    /// Tile dispatch order.
    pub tile_order: TileOrder,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            width: 675,
            height: 250,
            tile_width: 16,
            tile_height: 16,
            samples: 1024,
            filter_size: 2.0,
            iterations: 256,
            window: Window::new(-0.4, -0.683, 0.265, 0.1),
            shader: Shader::Gradient,
            threads: ::num_cpus::get(),
            tiles_per_batch: 27,
            tile_order: TileOrder::Shuffled { seed: 0 },
        }
    }
}

/// A validated configuration, immutable for the lifetime of a render
/// and shared by reference across all worker threads.  The sample
/// table, including the cached reciprocal weight sum, is computed
/// here once.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Output image width in pixels.
    pub width: usize,
    /// Output image height in pixels.
    pub height: usize,
    /// Tile width in pixels.
    pub tile_width: usize,
    /// Tile height in pixels.
    pub tile_height: usize,
    /// Escape-iteration cap.
    pub iterations: u32,
    /// The visible rectangle of the complex plane.
    pub window: Window,
    /// Precomputed per-sample offsets and weights.
    pub samples: SampleTable,
    /// Color-mapping strategy.
    pub shader: Shader,
    /// Worker-pool size.
    pub threads: usize,
    /// Tiles handed to a worker per dispatch.
    pub tiles_per_batch: usize,
    /// Tile dispatch order.
    pub tile_order: TileOrder,
}

impl RenderConfig {
    /// Validates the options and freezes them into a configuration,
    /// building the sample table along the way.
    pub fn new(options: RenderOptions) -> Result<RenderConfig, ConfigError> {
        if options.width == 0 || options.height == 0 {
            return Err(ConfigError::EmptyImage {
                width: options.width,
                height: options.height,
            });
        }
        if options.tile_width == 0 || options.tile_height == 0 {
            return Err(ConfigError::EmptyTile {
                width: options.tile_width,
                height: options.tile_height,
            });
        }
        if options.tile_width > options.width || options.tile_height > options.height {
            return Err(ConfigError::TileLargerThanImage {
                tile_width: options.tile_width,
                tile_height: options.tile_height,
                width: options.width,
                height: options.height,
            });
        }
        if options.threads == 0 {
            return Err(ConfigError::NoThreads);
        }
        if options.tiles_per_batch == 0 {
            return Err(ConfigError::EmptyBatch);
        }
        if options.samples == 0 {
            return Err(ConfigError::NoSamples);
        }
        if !(options.filter_size > 0.0) {
            return Err(ConfigError::BadFilterSize {
                size: options.filter_size,
            });
        }
        if options.iterations < MIN_ITERATIONS {
            return Err(ConfigError::IterationCapTooLow {
                min: MIN_ITERATIONS,
                cap: options.iterations,
            });
        }
        if !(options.window.width > 0.0) || !(options.window.height > 0.0) {
            return Err(ConfigError::EmptyWindow {
                width: options.window.width,
                height: options.window.height,
            });
        }

        let samples = SampleTable::halton_mitchell(options.samples, options.filter_size);
        if !samples.inv_weight_sum().is_finite() {
            return Err(ConfigError::DegenerateFilter);
        }

        Ok(RenderConfig {
            width: options.width,
            height: options.height,
            tile_width: options.tile_width,
            tile_height: options.tile_height,
            iterations: options.iterations,
            window: options.window,
            samples,
            shader: options.shader,
            threads: options.threads,
            tiles_per_batch: options.tiles_per_batch,
            tile_order: options.tile_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_options_validate() {
        let config = RenderConfig::new(RenderOptions::default()).unwrap();
        assert_eq!(config.samples.len(), 1024);
        assert!(config.samples.inv_weight_sum().is_finite());
    }

    #[test]
    fn zero_image_is_rejected() {
        let options = RenderOptions {
            width: 0,
            ..RenderOptions::default()
        };
        assert_eq!(
            RenderConfig::new(options).unwrap_err(),
            ConfigError::EmptyImage {
                width: 0,
                height: 250
            }
        );
    }

    #[test]
    fn zero_tile_is_rejected() {
        let options = RenderOptions {
            tile_height: 0,
            ..RenderOptions::default()
        };
        assert_eq!(
            RenderConfig::new(options).unwrap_err(),
            ConfigError::EmptyTile {
                width: 16,
                height: 0
            }
        );
    }

    #[test]
    fn oversized_tile_is_rejected() {
        let options = RenderOptions {
            tile_height: 512,
            ..RenderOptions::default()
        };
        assert!(RenderConfig::new(options).is_err());
    }

    #[test]
    fn empty_pool_and_empty_batch_are_rejected() {
        let options = RenderOptions {
            threads: 0,
            ..RenderOptions::default()
        };
        assert_eq!(RenderConfig::new(options).unwrap_err(), ConfigError::NoThreads);

        let options = RenderOptions {
            tiles_per_batch: 0,
            ..RenderOptions::default()
        };
        assert_eq!(RenderConfig::new(options).unwrap_err(), ConfigError::EmptyBatch);
    }

    #[test]
    fn empty_sample_list_is_rejected() {
        let options = RenderOptions {
            samples: 0,
            ..RenderOptions::default()
        };
        assert_eq!(RenderConfig::new(options).unwrap_err(), ConfigError::NoSamples);
    }

    #[test]
    fn bad_filter_size_is_rejected() {
        for &size in &[0.0f32, -1.0] {
            let options = RenderOptions {
                filter_size: size,
                ..RenderOptions::default()
            };
            assert_eq!(
                RenderConfig::new(options).unwrap_err(),
                ConfigError::BadFilterSize { size }
            );
        }
    }

    #[test]
    fn tiny_iteration_cap_is_rejected() {
        let options = RenderOptions {
            iterations: 21,
            ..RenderOptions::default()
        };
        assert_eq!(
            RenderConfig::new(options).unwrap_err(),
            ConfigError::IterationCapTooLow { min: 22, cap: 21 }
        );
    }

    #[test]
    fn empty_window_is_rejected() {
        let options = RenderOptions {
            window: Window::new(0.0, 0.0, 0.0, 1.0),
            ..RenderOptions::default()
        };
        assert!(RenderConfig::new(options).is_err());
    }

    #[test]
    fn errors_render_their_messages() {
        let message = format!(
            "{}",
            ConfigError::EmptyImage {
                width: 0,
                height: 250
            }
        );
        assert!(message.contains("0x250"));
    }
}
