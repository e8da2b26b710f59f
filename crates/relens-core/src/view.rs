//! Image views over caller-owned pixel buffers.
//!
//! A view is a non-owning window: base slice, dimensions, storage
//! descriptor and aspect ratio. [`ImageViewR`] is read-only and is what the
//! interpolators sample from; [`ImageViewW`] is write-only and is what the
//! transform driver fills. The buffers themselves are allocated and owned by
//! the caller; a view's lifetime is bounded by the borrow.
//!
//! Pixel iterators ([`PixelIterR`], [`PixelIterW`]) carry a running buffer
//! offset so inner loops advance by one addition instead of recomputing
//! `(y * line_step + x * step)` per pixel.
//!
//! For row-parallel rendering, [`ImageViewW::par_for_each_row`] hands every
//! worker a [`RowW`] that can only touch its own scanline: interleaved
//! buffers split into line chunks, planar buffers into one row chunk per
//! channel plane, so no two workers ever alias.

use rayon::prelude::*;

use crate::channel::ChannelStorage;
use crate::error::{Error, Result};
use crate::storage::{LayoutInfo, Storage};
use crate::tuple::ColourTuple;

/// Read-only view over a caller-owned pixel buffer.
#[derive(Debug, Clone, Copy)]
pub struct ImageViewR<'a, T: ChannelStorage> {
    data: &'a [T],
    width: usize,
    height: usize,
    storage: Storage,
    layout: LayoutInfo,
    aspect_ratio: f64,
}

impl<'a, T: ChannelStorage> ImageViewR<'a, T> {
    /// Creates a reader view over `data`.
    ///
    /// # Errors
    ///
    /// Fails when width or height is zero, when the storage descriptor's
    /// channel depth does not match `T`, or when the buffer is shorter than
    /// the described image.
    pub fn new(data: &'a [T], width: usize, height: usize, storage: Storage) -> Result<Self> {
        LayoutInfo::check_dimensions(width, height)?;
        if storage.channel_bits() != T::BITS {
            return Err(Error::storage_mismatch(storage.channel_bits(), T::BITS));
        }
        let layout = LayoutInfo::new(storage, width, height);
        if data.len() < layout.len() {
            return Err(Error::buffer_too_small(layout.len(), data.len()));
        }
        Ok(Self {
            data,
            width,
            height,
            storage,
            layout,
            aspect_ratio: width as f64 / height as f64,
        })
    }

    /// View width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// View height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// View dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The storage descriptor.
    #[inline]
    pub fn storage(&self) -> Storage {
        self.storage
    }

    /// Number of channels per pixel.
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.layout.channel_count
    }

    /// The aspect ratio; defaults to `width / height`.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Overrides the aspect ratio (for non-square sensor pixels).
    #[inline]
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Raw channel value of channel index `chan` at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `(x, y)` and `chan` are in range.
    #[inline]
    pub fn px(&self, chan: usize, x: usize, y: usize) -> T {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        debug_assert!(chan < self.layout.channel_count, "channel out of range");
        self.data[self.layout.px_offs(x, y) + self.layout.chan_offs[chan]]
    }

    /// Checked variant of [`px`](Self::px); `None` when out of bounds.
    #[inline]
    pub fn get_px(&self, chan: usize, x: usize, y: usize) -> Option<T> {
        if x < self.width && y < self.height && chan < self.layout.channel_count {
            Some(self.px(chan, x, y))
        } else {
            None
        }
    }

    /// Scanline iterator positioned at `(x, y)`.
    #[inline]
    pub fn iter(&self, x: usize, y: usize) -> PixelIterR<'a, T> {
        PixelIterR {
            data: self.data,
            offs: self.layout.px_offs(x, y),
            step: self.layout.step,
            line_step: self.layout.line_step,
            chan_offs: self.layout.chan_offs,
        }
    }
}

/// Cheap reading cursor into an image buffer.
#[derive(Debug, Clone, Copy)]
pub struct PixelIterR<'a, T: ChannelStorage> {
    data: &'a [T],
    offs: usize,
    step: usize,
    line_step: usize,
    chan_offs: [usize; 4],
}

impl<T: ChannelStorage> PixelIterR<'_, T> {
    /// Reads channel index `chan` at the current position.
    #[inline]
    pub fn get(&self, chan: usize) -> T {
        self.data[self.offs + self.chan_offs[chan]]
    }

    /// Advances one pixel in x.
    #[inline]
    pub fn next_x(&mut self) {
        self.offs += self.step;
    }

    /// Moves back one pixel in x.
    #[inline]
    pub fn prev_x(&mut self) {
        self.offs -= self.step;
    }

    /// Advances one line in y.
    #[inline]
    pub fn next_y(&mut self) {
        self.offs += self.line_step;
    }

    /// Moves back one line in y.
    #[inline]
    pub fn prev_y(&mut self) {
        self.offs -= self.line_step;
    }
}

/// Write-only view over a caller-owned pixel buffer.
#[derive(Debug)]
pub struct ImageViewW<'a, T: ChannelStorage> {
    data: &'a mut [T],
    width: usize,
    height: usize,
    storage: Storage,
    layout: LayoutInfo,
    aspect_ratio: f64,
}

impl<'a, T: ChannelStorage> ImageViewW<'a, T> {
    /// Creates a writer view over `data`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ImageViewR::new`].
    pub fn new(data: &'a mut [T], width: usize, height: usize, storage: Storage) -> Result<Self> {
        LayoutInfo::check_dimensions(width, height)?;
        if storage.channel_bits() != T::BITS {
            return Err(Error::storage_mismatch(storage.channel_bits(), T::BITS));
        }
        let layout = LayoutInfo::new(storage, width, height);
        if data.len() < layout.len() {
            return Err(Error::buffer_too_small(layout.len(), data.len()));
        }
        Ok(Self {
            data,
            width,
            height,
            storage,
            layout,
            aspect_ratio: width as f64 / height as f64,
        })
    }

    /// View width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// View height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// View dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The storage descriptor.
    #[inline]
    pub fn storage(&self) -> Storage {
        self.storage
    }

    /// Number of channels per pixel.
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.layout.channel_count
    }

    /// The aspect ratio; defaults to `width / height`.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Overrides the aspect ratio (for non-square sensor pixels).
    #[inline]
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Writes channel index `chan` at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `(x, y)` and `chan` are in range.
    #[inline]
    pub fn set(&mut self, chan: usize, x: usize, y: usize, val: T) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        debug_assert!(chan < self.layout.channel_count, "channel out of range");
        let offs = self.layout.px_offs(x, y) + self.layout.chan_offs[chan];
        self.data[offs] = val;
    }

    /// Writing cursor positioned at `(x, y)`.
    #[inline]
    pub fn iter_mut(&mut self, x: usize, y: usize) -> PixelIterW<'_, T> {
        PixelIterW {
            data: &mut *self.data,
            offs: self.layout.px_offs(x, y),
            step: self.layout.step,
            line_step: self.layout.line_step,
            chan_offs: self.layout.chan_offs,
        }
    }

    /// Calls `f` once per row, top to bottom, with a writer restricted to
    /// that row.
    pub fn for_each_row<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, &mut RowW<'_, T>),
    {
        let (w, h) = (self.width, self.height);
        let layout = self.layout;
        let data = &mut self.data[..layout.len()];

        if !self.storage.is_planar() {
            for (y, row) in data.chunks_exact_mut(layout.line_step).enumerate() {
                let mut rw = RowW::Interleaved {
                    row,
                    step: layout.step,
                    chan_offs: layout.chan_offs,
                };
                f(y, &mut rw);
            }
        } else {
            let plane = w * h;
            match layout.channel_count {
                3 => {
                    let (r, rest) = data.split_at_mut(plane);
                    let (g, b) = rest.split_at_mut(plane);
                    for (y, ((r, g), b)) in r
                        .chunks_exact_mut(w)
                        .zip(g.chunks_exact_mut(w))
                        .zip(b.chunks_exact_mut(w))
                        .enumerate()
                    {
                        let mut rw = RowW::Planar {
                            planes: [r, g, b, Default::default()],
                        };
                        f(y, &mut rw);
                    }
                }
                _ => {
                    let (r, rest) = data.split_at_mut(plane);
                    let (g, rest) = rest.split_at_mut(plane);
                    let (b, a) = rest.split_at_mut(plane);
                    for (y, ((r, g), (b, a))) in r
                        .chunks_exact_mut(w)
                        .zip(g.chunks_exact_mut(w))
                        .zip(b.chunks_exact_mut(w).zip(a.chunks_exact_mut(w)))
                        .enumerate()
                    {
                        let mut rw = RowW::Planar {
                            planes: [r, g, b, a],
                        };
                        f(y, &mut rw);
                    }
                }
            }
        }
    }

    /// Parallel version of [`for_each_row`](Self::for_each_row).
    ///
    /// Rows are distributed over the rayon thread pool; each worker owns its
    /// scanline exclusively.
    pub fn par_for_each_row<F>(&mut self, f: F)
    where
        F: Fn(usize, &mut RowW<'_, T>) + Send + Sync,
    {
        let (w, h) = (self.width, self.height);
        let layout = self.layout;
        let data = &mut self.data[..layout.len()];

        if !self.storage.is_planar() {
            data.par_chunks_exact_mut(layout.line_step)
                .enumerate()
                .for_each(|(y, row)| {
                    let mut rw = RowW::Interleaved {
                        row,
                        step: layout.step,
                        chan_offs: layout.chan_offs,
                    };
                    f(y, &mut rw);
                });
        } else {
            let plane = w * h;
            match layout.channel_count {
                3 => {
                    let (r, rest) = data.split_at_mut(plane);
                    let (g, b) = rest.split_at_mut(plane);
                    r.par_chunks_exact_mut(w)
                        .zip(g.par_chunks_exact_mut(w))
                        .zip(b.par_chunks_exact_mut(w))
                        .enumerate()
                        .for_each(|(y, ((r, g), b))| {
                            let mut rw = RowW::Planar {
                                planes: [r, g, b, Default::default()],
                            };
                            f(y, &mut rw);
                        });
                }
                _ => {
                    let (r, rest) = data.split_at_mut(plane);
                    let (g, rest) = rest.split_at_mut(plane);
                    let (b, a) = rest.split_at_mut(plane);
                    r.par_chunks_exact_mut(w)
                        .zip(g.par_chunks_exact_mut(w))
                        .zip(b.par_chunks_exact_mut(w).zip(a.par_chunks_exact_mut(w)))
                        .enumerate()
                        .for_each(|(y, ((r, g), (b, a)))| {
                            let mut rw = RowW::Planar {
                                planes: [r, g, b, a],
                            };
                            f(y, &mut rw);
                        });
                }
            }
        }
    }
}

/// Cheap writing cursor into an image buffer.
#[derive(Debug)]
pub struct PixelIterW<'a, T: ChannelStorage> {
    data: &'a mut [T],
    offs: usize,
    step: usize,
    line_step: usize,
    chan_offs: [usize; 4],
}

impl<T: ChannelStorage> PixelIterW<'_, T> {
    /// Writes channel index `chan` at the current position.
    #[inline]
    pub fn set(&mut self, chan: usize, val: T) {
        self.data[self.offs + self.chan_offs[chan]] = val;
    }

    /// Writes a whole colour tuple at the current position, applying the
    /// `+0.5` truncating cast per channel.
    #[inline]
    pub fn set_tuple<const N: usize>(&mut self, values: &ColourTuple<N>) {
        for (chan, v) in values.values.iter().enumerate() {
            self.set(chan, T::from_f64(*v));
        }
    }

    /// Advances one pixel in x.
    #[inline]
    pub fn next_x(&mut self) {
        self.offs += self.step;
    }

    /// Moves back one pixel in x.
    #[inline]
    pub fn prev_x(&mut self) {
        self.offs -= self.step;
    }

    /// Advances one line in y.
    #[inline]
    pub fn next_y(&mut self) {
        self.offs += self.line_step;
    }

    /// Moves back one line in y.
    #[inline]
    pub fn prev_y(&mut self) {
        self.offs -= self.line_step;
    }
}

/// Write access restricted to a single output row.
///
/// Handed out by [`ImageViewW::for_each_row`] and
/// [`ImageViewW::par_for_each_row`]; the planar variant holds one row slice
/// per channel plane.
#[derive(Debug)]
pub enum RowW<'r, T: ChannelStorage> {
    /// One contiguous scanline of an interleaved buffer.
    Interleaved {
        /// The row slice.
        row: &'r mut [T],
        /// Offset between adjacent pixels.
        step: usize,
        /// Per-channel offsets within a pixel.
        chan_offs: [usize; 4],
    },
    /// Matching row slices of each channel plane.
    Planar {
        /// Row slice per plane; unused entries are empty.
        planes: [&'r mut [T]; 4],
    },
}

impl<T: ChannelStorage> RowW<'_, T> {
    /// Writes channel index `chan` at column `x`.
    #[inline]
    pub fn set(&mut self, x: usize, chan: usize, val: T) {
        match self {
            RowW::Interleaved {
                row,
                step,
                chan_offs,
            } => row[x * *step + chan_offs[chan]] = val,
            RowW::Planar { planes } => planes[chan][x] = val,
        }
    }

    /// Writes a whole colour tuple at column `x`, applying the `+0.5`
    /// truncating cast per channel.
    #[inline]
    pub fn set_tuple<const N: usize>(&mut self, x: usize, values: &ColourTuple<N>) {
        for (chan, v) in values.values.iter().enumerate() {
            self.set(x, chan, T::from_f64(*v));
        }
    }
}
