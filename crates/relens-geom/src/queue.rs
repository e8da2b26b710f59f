//! Correction queues.
//!
//! A queue is an ordered, owning sequence of models of one kind. Models are
//! applied in insertion order (left-to-right composition); cloning a queue
//! deep-clones every model. Three queues are kept independently:
//!
//! - the **subpixel queue** maps a destination coordinate to per-channel
//!   source coordinates,
//! - the **pixel queue** maps it to a single monochrome coordinate (which
//!   also seeds the subpixel queue and serves as the colour evaluation
//!   point),
//! - the **colour queue** accumulates per-channel multiplicative gains.

use relens_core::{ColourTuple, CoordTuple, CoordTupleMono};

use crate::model::{ColourModel, PixelModel, SubpixelModel};

/// Ordered composition of subpixel geometric models.
#[derive(Clone, Default)]
pub struct SubpixelQueue {
    models: Vec<Box<dyn SubpixelModel>>,
}

impl SubpixelQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a model; returns a borrow for in-place tuning.
    pub fn add_model(&mut self, model: impl SubpixelModel + 'static) -> &mut dyn SubpixelModel {
        self.models.push(Box::new(model));
        self.models.last_mut().unwrap().as_mut()
    }

    /// Removes all models.
    pub fn clear(&mut self) {
        self.models.clear();
    }

    /// Number of models in the queue.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns `true` when no models are queued.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Maps a destination coordinate to per-channel source coordinates.
    pub fn src_coords<const N: usize>(&self, dst_x: f64, dst_y: f64) -> CoordTuple<N> {
        let mut coords = CoordTuple::splat(dst_x, dst_y);
        for model in &self.models {
            model.src_coords(&mut coords.x, &mut coords.y);
        }
        coords
    }

    /// Like [`src_coords`](Self::src_coords), seeded from a pixel-queue
    /// result.
    pub fn src_coords_from<const N: usize>(&self, seed: &CoordTupleMono) -> CoordTuple<N> {
        self.src_coords(seed.x[0], seed.y[0])
    }
}

impl std::fmt::Debug for SubpixelQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubpixelQueue")
            .field("models", &self.models.len())
            .finish()
    }
}

/// Ordered composition of monochrome geometric models.
#[derive(Clone, Default)]
pub struct PixelQueue {
    models: Vec<Box<dyn PixelModel>>,
}

impl PixelQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a model; returns a borrow for in-place tuning.
    pub fn add_model(&mut self, model: impl PixelModel + 'static) -> &mut dyn PixelModel {
        self.models.push(Box::new(model));
        self.models.last_mut().unwrap().as_mut()
    }

    /// Removes all models.
    pub fn clear(&mut self) {
        self.models.clear();
    }

    /// Number of models in the queue.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns `true` when no models are queued.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Maps a destination coordinate to the monochrome source coordinate.
    pub fn src_coords(&self, dst_x: f64, dst_y: f64) -> CoordTupleMono {
        let mut coords = CoordTupleMono::splat(dst_x, dst_y);
        for model in &self.models {
            model.src_coords(&mut coords.x[0], &mut coords.y[0]);
        }
        coords
    }
}

impl std::fmt::Debug for PixelQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelQueue")
            .field("models", &self.models.len())
            .finish()
    }
}

/// Ordered composition of colour correction models.
#[derive(Clone, Default)]
pub struct ColourQueue {
    models: Vec<Box<dyn ColourModel>>,
}

impl ColourQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a model; returns a borrow for in-place tuning.
    pub fn add_model(&mut self, model: impl ColourModel + 'static) -> &mut dyn ColourModel {
        self.models.push(Box::new(model));
        self.models.last_mut().unwrap().as_mut()
    }

    /// Removes all models.
    pub fn clear(&mut self) {
        self.models.clear();
    }

    /// Number of models in the queue.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns `true` when no models are queued.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Accumulated per-channel gains at the evaluation point `(x, y)`.
    ///
    /// Starts from unit gains; an empty queue is the identity.
    pub fn correction_factors<const N: usize>(&self, x: f64, y: f64) -> ColourTuple<N> {
        let mut factors = ColourTuple::unit();
        let mut tmp = ColourTuple::<N>::unit();
        for model in &self.models {
            model.factors(x, y, &mut tmp.values);
            factors *= tmp;
        }
        factors
    }
}

impl std::fmt::Debug for ColourQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColourQueue")
            .field("models", &self.models.len())
            .finish()
    }
}
