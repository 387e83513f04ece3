// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Subpixel sampling: the Halton low-discrepancy sequence that places
//! the samples, and the Mitchell-Netravali filter that weights them.
//!
//! Both are pure functions of their arguments.  A render computes the
//! full `(offset, weight)` table once, up front, and every tile on
//! every thread reads the same table.

/// A subpixel sample position, in pixel-relative units.  An offset of
/// `(0, 0)` is the pixel center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SampleOffset {
    /// Horizontal offset from the pixel center.
    pub x: f32,
    /// Vertical offset from the pixel center.
    pub y: f32,
}

impl SampleOffset {
    /// The `index`th sample offset: a Halton(2,3) point recentered
    /// from `[0,1)` to `[-0.5,0.5)` per axis and scaled to the
    /// filter's support width.
    pub fn centered(index: usize, filter_size: f32) -> SampleOffset {
        let p = halton23(index);
        SampleOffset {
            x: (p.x - 0.5) * filter_size,
            y: (p.y - 0.5) * filter_size,
        }
    }
}

/// The radix-inverse (van der Corput) value of `index` in the given
/// base, in `[0,1)`.  Successive indices fill the unit interval far
/// more evenly than uniform random draws do.
pub fn halton(index: usize, base: usize) -> f32 {
    let mut result = 0.0f32;
    let mut f = 1.0f32 / base as f32;
    let mut i = index;

    while i > 0 {
        result += f * (i % base) as f32;
        i /= base;
        f /= base as f32;
    }

    result
}

/// The `index`th point of the standard Halton(2,3) 2D sequence.
pub fn halton23(index: usize) -> SampleOffset {
    SampleOffset {
        x: halton(index, 2),
        y: halton(index, 3),
    }
}

/// The 1D Mitchell-Netravali kernel at `x`, with `x` scaled by two
/// and folded to its absolute value.  The kernel has support
/// `|2x| < 2` and is exactly zero outside it; its negative lobes are
/// what give the reconstruction its sharpness.  `b = c = 1/3` is the
/// canonical "Mitchell" parameterization.
pub fn mitchell(x: f32, b: f32, c: f32) -> f32 {
    let x = (2.0f32 * x).abs();

    if x < 1.0 {
        (1.0 / 6.0)
            * ((12.0 - 9.0 * b - 6.0 * c) * x * x * x
                + (-18.0 + 12.0 * b + 6.0 * c) * x * x
                + (6.0 - 2.0 * b))
    } else if x < 2.0 {
        (1.0 / 6.0)
            * ((-b - 6.0 * c) * x * x * x
                + (6.0 * b + 30.0 * c) * x * x
                + (-12.0 * b - 48.0 * c) * x
                + (8.0 * b + 24.0 * c))
    } else {
        0.0
    }
}

/// The separable 2D Mitchell weight of a sample offset, where
/// `half_width` is half the filter's square support width.
pub fn mitchell_weight(offset: SampleOffset, half_width: f32) -> f32 {
    let one_over_width = 1.0 / half_width;
    let one_third = 1.0 / 3.0;

    let mitchell_x = mitchell(offset.x * one_over_width, one_third, one_third);
    let mitchell_y = mitchell(offset.y * one_over_width, one_third, one_third);

    mitchell_x * mitchell_y
}

/// The precomputed per-sample offsets and filter weights for one
/// render, with the reciprocal of the weight sum cached so the
/// compositor can normalize with a multiply.  Weights are signed.
#[derive(Clone, Debug)]
pub struct SampleTable {
    offsets: Vec<SampleOffset>,
    weights: Vec<f32>,
    inv_weight_sum: f32,
}

impl SampleTable {
    /// Builds the standard table: `count` Halton(2,3) offsets spread
    /// over the filter support, each weighted by the 2D Mitchell
    /// kernel.
    pub fn halton_mitchell(count: usize, filter_size: f32) -> SampleTable {
        let offsets: Vec<SampleOffset> = (0..count)
            .map(|i| SampleOffset::centered(i, filter_size))
            .collect();
        let weights: Vec<f32> = offsets
            .iter()
            .map(|&offset| mitchell_weight(offset, filter_size * 0.5))
            .collect();
        SampleTable::from_parts(offsets, weights)
    }

    /// Builds a table from explicit offsets and weights.  The two
    /// lists are paired one-to-one; extra entries on either side are
    /// dropped.
    pub fn from_parts(offsets: Vec<SampleOffset>, weights: Vec<f32>) -> SampleTable {
        let len = offsets.len().min(weights.len());
        let mut offsets = offsets;
        let mut weights = weights;
        offsets.truncate(len);
        weights.truncate(len);

        let weight_sum: f32 = weights.iter().sum();
        SampleTable {
            offsets,
            weights,
            inv_weight_sum: 1.0 / weight_sum,
        }
    }

    /// The number of samples per pixel.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// True when the table holds no samples at all.  Such a table is
    /// rejected at configuration time; see `ConfigError`.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The cached reciprocal of the sample weight sum.  Not finite
    /// when the weights cancel or the table is empty.
    pub fn inv_weight_sum(&self) -> f32 {
        self.inv_weight_sum
    }

    /// The `(offset, weight)` pairs, in sample order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (SampleOffset, f32)> + 'a {
        self.offsets
            .iter()
            .cloned()
            .zip(self.weights.iter().cloned())
    }
}
