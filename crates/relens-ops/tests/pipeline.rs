//! End-to-end pipeline tests: full transforms over small buffers with
//! known expected outputs.

use relens_core::{Channel, ChannelStorage, ImageViewR, ImageViewW, Storage};
use relens_geom::{ColourBalance, CoordParams, GeometryConvert, Projection, Ptlens, Scaler, Vignetting};
use relens_ops::{Interpolation, ScaleMode, Transform};

/// Deterministic pseudo-random channel values.
fn mix(i: usize) -> u64 {
    (i as u64)
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

/// Runs an empty-queue nearest-neighbour transform and checks the output is
/// bit-identical to the source.
fn assert_identity_roundtrip<T>(storage: Storage, width: usize, height: usize)
where
    T: ChannelStorage + PartialEq,
{
    let len = width * height * storage.channel_count();
    let src: Vec<T> = (0..len).map(|i| T::from_f64((mix(i) % 200) as f64)).collect();
    let mut dst = vec![T::default(); len];

    let reader = ImageViewR::new(&src, width, height, storage).unwrap();
    let writer = ImageViewW::new(&mut dst, width, height, storage).unwrap();
    let mut transform = Transform::new(reader, writer, Interpolation::Nearest).unwrap();
    transform.run().unwrap();
    drop(transform);

    assert!(src == dst, "identity transform altered {storage:?} buffer");
}

#[test]
fn identity_is_bit_exact_across_storages() {
    // Non-square on purpose: the x normalisation must invert exactly for
    // any frame shape.
    assert_identity_roundtrip::<u8>(Storage::Rgb8Inter, 7, 5);
    assert_identity_roundtrip::<u8>(Storage::Rgb8Planar, 7, 5);
    assert_identity_roundtrip::<u8>(Storage::Rgba8Inter, 5, 7);
    assert_identity_roundtrip::<u8>(Storage::Rgba8Planar, 6, 4);
    assert_identity_roundtrip::<u16>(Storage::Rgb16Inter, 7, 5);
    assert_identity_roundtrip::<u16>(Storage::Rgba16Planar, 5, 5);
    assert_identity_roundtrip::<u32>(Storage::Rgb32Inter, 4, 6);
    assert_identity_roundtrip::<u32>(Storage::Rgba32Planar, 3, 3);
}

#[test]
fn uniform_rgb_identity_centre_pixel() {
    // 3x3 RGB, all pixels (10, 20, 30): identity keeps every pixel.
    let src: Vec<u8> = std::iter::repeat([10u8, 20, 30]).take(9).flatten().collect();
    let mut dst = vec![0u8; 27];
    let reader = ImageViewR::new(&src, 3, 3, Storage::Rgb8Inter).unwrap();
    let writer = ImageViewW::new(&mut dst, 3, 3, Storage::Rgb8Inter).unwrap();
    let mut transform = Transform::new(reader, writer, Interpolation::Nearest).unwrap();
    transform.run().unwrap();
    drop(transform);

    let centre = (3 + 1) * 3; // pixel (1, 1)
    assert_eq!(&dst[centre..centre + 3], &[10, 20, 30]);
    assert_eq!(src, dst);
}

#[test]
fn ptlens_with_unit_d_is_identity_under_bilinear() {
    // 5x5 checkerboard; (a, b, c) = 0 leaves d = 1, a pure identity.
    let mut src = Vec::with_capacity(75);
    for i in 0..25 {
        let v = if i % 2 == 0 { 0u8 } else { 255 };
        src.extend_from_slice(&[v, v, v]);
    }
    let mut dst = vec![0u8; 75];
    let reader = ImageViewR::new(&src, 5, 5, Storage::Rgb8Inter).unwrap();
    let writer = ImageViewW::new(&mut dst, 5, 5, Storage::Rgb8Inter).unwrap();
    let mut transform = Transform::new(reader, writer, Interpolation::Bilinear).unwrap();
    transform
        .subpixel_queue
        .add_model(Ptlens::new(0.0, 0.0, 0.0, CoordParams::default()));
    transform.run().unwrap();
    drop(transform);

    assert_eq!(src, dst);
}

#[test]
fn unit_gains_leave_values_unchanged() {
    let src: Vec<u8> = (0..48).map(|i| (mix(i) % 256) as u8).collect();
    let mut dst = vec![0u8; 48];
    let reader = ImageViewR::new(&src, 4, 4, Storage::Rgb8Inter).unwrap();
    let writer = ImageViewW::new(&mut dst, 4, 4, Storage::Rgb8Inter).unwrap();
    let mut transform = Transform::new(reader, writer, Interpolation::Nearest).unwrap();
    transform
        .colour_queue
        .add_model(ColourBalance::new(1.0, 1.0, 1.0));
    transform.run().unwrap();
    drop(transform);

    assert_eq!(src, dst);
}

#[test]
fn vignetting_attenuates_towards_corners() {
    // 11x11 uniform 200, correction gain 1 / (1 + 0.5 r^2), nearest.
    let src = vec![200u8; 11 * 11 * 3];
    let mut dst = vec![0u8; 11 * 11 * 3];
    let reader = ImageViewR::new(&src, 11, 11, Storage::Rgb8Inter).unwrap();
    let writer = ImageViewW::new(&mut dst, 11, 11, Storage::Rgb8Inter).unwrap();
    let mut transform = Transform::new(reader, writer, Interpolation::Nearest).unwrap();
    transform
        .colour_queue
        .add_model(Vignetting::new(0.5, 0.0, 0.0, CoordParams::default()));
    transform.run().unwrap();
    drop(transform);

    let px = |x: usize, y: usize| dst[(y * 11 + x) * 3];
    // Centre: r = 0, untouched.
    assert_eq!(px(5, 5), 200);
    // Corner: r^2 = 2, gain 1/2.
    assert_eq!(px(0, 0), 100);
    assert_eq!(px(10, 10), 100);
    // Edge midpoint: r^2 = 1, gain 1/1.5 -> 133.33 -> 133.
    assert_eq!(px(0, 5), 133);
    // Attenuation grows monotonically towards the corner along the row.
    assert!(px(0, 0) < px(2, 0));
    assert!(px(2, 0) < px(5, 0));
}

#[test]
fn per_channel_d_shifts_red_and_blue_but_not_green() {
    // 2x2: black, red, green, blue. Per-channel d scales red outward and
    // blue inward; green keeps d = 1 and must match the identity output.
    let src: Vec<u8> = vec![
        0, 0, 0, 255, 0, 0, //
        0, 255, 0, 0, 0, 255,
    ];

    let run = |with_chroma: bool| -> Vec<u8> {
        let mut dst = vec![0u8; 12];
        let reader = ImageViewR::new(&src, 2, 2, Storage::Rgb8Inter).unwrap();
        let writer = ImageViewW::new(&mut dst, 2, 2, Storage::Rgb8Inter).unwrap();
        let mut transform = Transform::new(reader, writer, Interpolation::Bilinear).unwrap();
        let mut model = Ptlens::new(0.0, 0.0, 0.0, CoordParams::default());
        if with_chroma {
            model.set_channel_params(Channel::Red, 0.0, 0.0, 0.0, 1.01);
            model.set_channel_params(Channel::Blue, 0.0, 0.0, 0.0, 0.99);
        }
        transform.subpixel_queue.add_model(model);
        transform.run().unwrap();
        drop(transform);
        dst
    };

    let identity = run(false);
    let chroma = run(true);
    assert_eq!(identity, src);

    // Green channel bit-identical to the identity rendering.
    for i in 0..4 {
        assert_eq!(chroma[i * 3 + 1], identity[i * 3 + 1]);
    }
    // Red samples beyond the frame corner: the red pixel dims.
    // 255 * 0.995 * 0.995 = 252.45 -> 252.
    assert_eq!(chroma[3], 252); // red of pixel (1, 0)
    // Blue samples short of the corner: same attenuation on the blue pixel.
    assert_eq!(chroma[11], 252); // blue of pixel (1, 1)
}

#[test]
fn projection_conversion_matches_closed_form() {
    // 100x100 labelled grid, rectilinear capture rendered as equidistant
    // fisheye, f = 50mm, crop 1. The mapping is purely radial with
    // src_r = f_norm * tan(dst_r / f_norm); nearest-neighbour output must
    // match direct evaluation of that formula except where a sample sits on
    // a rounding boundary.
    let w = 100usize;
    let label = |x: usize, y: usize| ((x * 7 + y * 13) % 251) as u8;
    let mut src = vec![0u8; w * w * 3];
    for y in 0..w {
        for x in 0..w {
            let v = label(x, y);
            let at = (y * w + x) * 3;
            src[at] = v;
            src[at + 1] = v;
            src[at + 2] = v;
        }
    }
    let mut dst = vec![0u8; w * w * 3];
    let reader = ImageViewR::new(&src, w, w, Storage::Rgb8Inter).unwrap();
    let writer = ImageViewW::new(&mut dst, w, w, Storage::Rgb8Inter).unwrap();
    let mut transform = Transform::new(reader, writer, Interpolation::Nearest).unwrap();
    transform.pixel_queue.add_model(
        GeometryConvert::new(
            Projection::Rectilinear,
            Projection::FisheyeEquidistant,
            50.0,
            CoordParams::default(),
        )
        .unwrap(),
    );
    transform.run().unwrap();
    drop(transform);

    let norm_f = 50.0 * 2.0 * (2.0f64).sqrt() / 43.26661530556787;
    let half = (w as f64 - 1.0) / 2.0;
    let mut checked = 0;
    for iy in (0..w).step_by(7) {
        for ix in (0..w).step_by(7) {
            let dx = (ix as f64 - half) / half;
            let dy = (iy as f64 - half) / half;
            let r = (dx * dx + dy * dy).sqrt();
            let ratio = if r == 0.0 {
                1.0
            } else {
                norm_f * (r / norm_f).tan() / r
            };
            let px = dx * ratio * half + half;
            let py = dy * ratio * half + half;

            // Skip samples too close to a nearest-neighbour boundary.
            let fx = (px + 0.5) - (px + 0.5).floor();
            let fy = (py + 0.5) - (py + 0.5).floor();
            let margin = 1e-6;
            if fx < margin || fx > 1.0 - margin || fy < margin || fy > 1.0 - margin {
                continue;
            }

            let ex = (px + 0.5).floor() as isize;
            let ey = (py + 0.5).floor() as isize;
            let expected = if ex >= 0 && ey >= 0 && (ex as usize) < w && (ey as usize) < w {
                label(ex as usize, ey as usize)
            } else {
                0
            };
            assert_eq!(
                dst[(iy * w + ix) * 3],
                expected,
                "mismatch at output ({ix}, {iy})"
            );
            checked += 1;
        }
    }
    assert!(checked > 150, "too few comparable samples ({checked})");
}

#[test]
fn autoscale_fit_leaves_no_null_pixels() {
    // Strong barrel distortion pushes the corners out; a fit-mode pre-scale
    // must bring every sample back inside the source frame.
    let src = vec![30000u16; 10 * 10 * 4];
    let mut dst = vec![0u16; 10 * 10 * 4];

    let k = {
        let reader = ImageViewR::new(&src, 10, 10, Storage::Rgba16Inter).unwrap();
        let mut probe = vec![0u16; 10 * 10 * 4];
        let writer = ImageViewW::new(&mut probe, 10, 10, Storage::Rgba16Inter).unwrap();
        let mut transform = Transform::new(reader, writer, Interpolation::Bilinear).unwrap();
        transform
            .subpixel_queue
            .add_model(Ptlens::new(0.0, 0.1, 0.0, CoordParams::default()));
        transform.auto_scale(ScaleMode::Fit).unwrap()
    };
    assert!(k > 0.0 && k < 1.0);

    let reader = ImageViewR::new(&src, 10, 10, Storage::Rgba16Inter).unwrap();
    let writer = ImageViewW::new(&mut dst, 10, 10, Storage::Rgba16Inter).unwrap();
    let mut transform = Transform::new(reader, writer, Interpolation::Bilinear).unwrap();
    transform.subpixel_queue.add_model(Scaler::new(k).unwrap());
    transform
        .subpixel_queue
        .add_model(Ptlens::new(0.0, 0.1, 0.0, CoordParams::default()));
    transform.run().unwrap();
    drop(transform);

    assert!(dst.iter().all(|v| *v != 0), "found null output pixels");
}

#[test]
fn writer_dimensions_drive_a_rescale() {
    // 4x4 labelled source into a 2x2 output: the loop runs over writer
    // dimensions, so the output picks the source corners.
    let mut src = vec![0u8; 4 * 4 * 3];
    for y in 0..4 {
        for x in 0..4 {
            src[(y * 4 + x) * 3] = (y * 4 + x) as u8 * 10;
        }
    }
    let mut dst = vec![0u8; 2 * 2 * 3];
    let reader = ImageViewR::new(&src, 4, 4, Storage::Rgb8Inter).unwrap();
    let writer = ImageViewW::new(&mut dst, 2, 2, Storage::Rgb8Inter).unwrap();
    let mut transform = Transform::new(reader, writer, Interpolation::Nearest).unwrap();
    transform.run().unwrap();
    drop(transform);

    assert_eq!(dst[0], 0); // (0,0)
    assert_eq!(dst[3], 30); // (3,0)
    assert_eq!(dst[6], 120); // (0,3)
    assert_eq!(dst[9], 150); // (3,3)
}

#[test]
fn layout_conversion_preserves_values() {
    // Interleaved source rendered into a planar writer, identity pipeline.
    let src: Vec<u8> = (0..27).map(|i| (mix(i) % 256) as u8).collect();
    let mut dst = vec![0u8; 27];
    let reader = ImageViewR::new(&src, 3, 3, Storage::Rgb8Inter).unwrap();
    let writer = ImageViewW::new(&mut dst, 3, 3, Storage::Rgb8Planar).unwrap();
    let mut transform = Transform::new(reader, writer, Interpolation::Nearest).unwrap();
    transform.run().unwrap();
    drop(transform);

    let planar = ImageViewR::new(&dst, 3, 3, Storage::Rgb8Planar).unwrap();
    let inter = ImageViewR::new(&src, 3, 3, Storage::Rgb8Inter).unwrap();
    for y in 0..3 {
        for x in 0..3 {
            for c in 0..3 {
                assert_eq!(planar.px(c, x, y), inter.px(c, x, y));
            }
        }
    }
}
