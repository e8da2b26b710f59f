//! The image transform driver.
//!
//! [`Transform`] bundles a reader view, a writer view, an interpolation
//! choice and the three correction queues, and runs the reverse-mapping
//! loop: for every output pixel the destination coordinate is normalised,
//! pushed through the pixel queue (monochrome) and the subpixel queue
//! (per channel), sampled from the source, multiplied by the colour-queue
//! gains, clamped to the storage range and written out.
//!
//! Rows carry no shared state, so the loop parallelises over scanlines
//! (rayon, default-on `parallel` feature). The queues are frozen for the
//! duration of a [`run`](Transform::run); every output pixel is written
//! exactly once and the source buffer is never touched.

use relens_core::{ChannelStorage, ImageViewR, ImageViewW, RowW};
use relens_geom::{ColourQueue, PixelQueue, SubpixelQueue};
use tracing::debug;

use crate::error::{OpsError, OpsResult};
use crate::interp::{Interpolation, Interpolator};
use crate::scale::{AutoScaler, ScaleMode};

/// A configured image transformation.
///
/// The queues are public so the caller composes the correction stack in
/// place:
///
/// ```
/// use relens_core::{ImageViewR, ImageViewW, Storage};
/// use relens_geom::{CoordParams, Ptlens, Vignetting};
/// use relens_ops::{Interpolation, Transform};
///
/// let src = vec![128u8; 64 * 48 * 3];
/// let mut dst = vec![0u8; 64 * 48 * 3];
/// let reader = ImageViewR::new(&src, 64, 48, Storage::Rgb8Inter).unwrap();
/// let writer = ImageViewW::new(&mut dst, 64, 48, Storage::Rgb8Inter).unwrap();
///
/// let mut transform = Transform::new(reader, writer, Interpolation::Bilinear).unwrap();
/// let coord = CoordParams::for_aspect(64.0 / 48.0);
/// transform.subpixel_queue.add_model(Ptlens::new(0.0, 0.02, 0.0, coord));
/// transform.colour_queue.add_model(Vignetting::new(0.3, 0.0, 0.0, coord));
/// transform.run().unwrap();
/// ```
pub struct Transform<'r, 'w, T: ChannelStorage> {
    reader: ImageViewR<'r, T>,
    writer: ImageViewW<'w, T>,
    interpolation: Interpolation,
    /// Per-channel geometric models (chromatic aberration capable).
    pub subpixel_queue: SubpixelQueue,
    /// Monochrome geometric models; also feeds the colour evaluation point.
    pub pixel_queue: PixelQueue,
    /// Per-channel gain models (vignetting, balance).
    pub colour_queue: ColourQueue,
}

impl<'r, 'w, T: ChannelStorage> Transform<'r, 'w, T> {
    /// Creates a transform over a reader/writer pair.
    ///
    /// Reader and writer dimensions may differ; the output loop runs over
    /// the writer and differing sizes amount to a rescale.
    ///
    /// # Errors
    ///
    /// Fails when the channel counts of reader and writer differ (no such
    /// conversion is implemented) or the interpolation parameters are
    /// invalid.
    pub fn new(
        reader: ImageViewR<'r, T>,
        writer: ImageViewW<'w, T>,
        interpolation: Interpolation,
    ) -> OpsResult<Self> {
        interpolation.validate()?;
        if reader.channel_count() != writer.channel_count() {
            return Err(OpsError::Unsupported(format!(
                "channel count conversion {} -> {}",
                reader.channel_count(),
                writer.channel_count()
            )));
        }
        Ok(Self {
            reader,
            writer,
            interpolation,
            subpixel_queue: SubpixelQueue::new(),
            pixel_queue: PixelQueue::new(),
            colour_queue: ColourQueue::new(),
        })
    }

    /// Computes the auto-scale factor for the configured queues.
    ///
    /// The result is meant to be consumed as a
    /// [`Scaler`](relens_geom::Scaler) applied ahead of the queued models.
    ///
    /// # Errors
    ///
    /// Propagates auto-scale search failures.
    pub fn auto_scale(&self, mode: ScaleMode) -> OpsResult<f64> {
        let scaler = AutoScaler::new(
            &self.subpixel_queue,
            &self.pixel_queue,
            self.writer.aspect_ratio(),
        );
        match self.reader.channel_count() {
            3 => scaler.scale::<3>(mode),
            _ => scaler.scale::<4>(mode),
        }
    }

    /// Runs the transformation, writing every output pixel exactly once.
    ///
    /// # Errors
    ///
    /// Configuration errors only; the pixel loop itself is total.
    pub fn run(&mut self) -> OpsResult<()> {
        debug!(
            src = ?self.reader.dimensions(),
            dst = ?self.writer.dimensions(),
            interpolation = ?self.interpolation,
            subpixel_models = self.subpixel_queue.len(),
            pixel_models = self.pixel_queue.len(),
            colour_models = self.colour_queue.len(),
            "transform start"
        );
        match self.reader.channel_count() {
            3 => self.run_channels::<3>(),
            _ => self.run_channels::<4>(),
        }
    }

    fn run_channels<const N: usize>(&mut self) -> OpsResult<()> {
        let interp = Interpolator::new(self.reader, self.interpolation)?;
        let (out_w, out_h) = self.writer.dimensions();
        let aspect = self.writer.aspect_ratio();

        // dx = aspect * (2*ix - (W-1)) / (W-1), dy = (2*iy - (H-1)) / (H-1);
        // single-pixel axes degenerate to the centre coordinate.
        let x_step = if out_w > 1 {
            2.0 * aspect / (out_w as f64 - 1.0)
        } else {
            0.0
        };
        let x_origin = if out_w > 1 { -aspect } else { 0.0 };
        let y_step = if out_h > 1 { 2.0 / (out_h as f64 - 1.0) } else { 0.0 };
        let y_origin = if out_h > 1 { -1.0 } else { 0.0 };

        let subpixel = &self.subpixel_queue;
        let pixel = &self.pixel_queue;
        let colour = &self.colour_queue;

        let render_row = move |iy: usize, row: &mut RowW<'_, T>| {
            let dy = y_origin + y_step * iy as f64;
            for ix in 0..out_w {
                let dx = x_origin + x_step * ix as f64;

                let mono = pixel.src_coords(dx, dy);
                let coords = subpixel.src_coords_from::<N>(&mono);
                let mut values = interp.px_vals(&coords);
                let gains = colour.correction_factors::<N>(mono.x[0], mono.y[0]);

                for chan in 0..N {
                    values.values[chan] =
                        (values.values[chan] * gains.values[chan]).clamp(T::MIN, T::MAX);
                }
                row.set_tuple(ix, &values);
            }
        };

        #[cfg(feature = "parallel")]
        self.writer.par_for_each_row(render_row);
        #[cfg(not(feature = "parallel"))]
        self.writer.for_each_row(render_row);

        debug!("transform done");
        Ok(())
    }
}

impl<T: ChannelStorage> std::fmt::Debug for Transform<'_, '_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transform")
            .field("reader", &self.reader.dimensions())
            .field("writer", &self.writer.dimensions())
            .field("interpolation", &self.interpolation)
            .field("subpixel_queue", &self.subpixel_queue)
            .field("pixel_queue", &self.pixel_queue)
            .field("colour_queue", &self.colour_queue)
            .finish()
    }
}
