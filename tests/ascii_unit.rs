//! Unit tests for the conversion engine stages.
//!
//! These tests exercise each stage on small synthetic images:
//! - Preprocessing filters and linear adjustment
//! - Grid planning and cell boundaries
//! - Per-cell analysis and direction detection
//! - Character mapping

use ascii_wallpaper::ascii::*;
use ascii_wallpaper::{ConfigError, ConvertError, RasterImage, ValidationError};

fn gray_image(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> RasterImage {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = f(x, y);
            data.extend_from_slice(&[v, v, v]);
        }
    }
    RasterImage::from_rgb(width, height, data).unwrap()
}

fn cell_6x12() -> CellMetrics {
    CellMetrics::new(6.0, 12.0).unwrap()
}

fn fixed(
    image_width: u32,
    image_height: u32,
    columns: Option<u32>,
    rows: Option<u32>,
    keep_aspect: bool,
) -> GridRequest {
    GridRequest {
        image_width,
        image_height,
        cell: cell_6x12(),
        sizing: Sizing::Fixed { columns, rows },
        keep_aspect,
        aspect_correction: None,
    }
}

fn dense(
    image_width: u32,
    image_height: u32,
    target: (Option<u32>, Option<u32>),
    density_factor: f32,
    keep_aspect: bool,
) -> GridRequest {
    GridRequest {
        image_width,
        image_height,
        cell: cell_6x12(),
        sizing: Sizing::HighDensity {
            target_width: target.0,
            target_height: target.1,
            density_factor,
        },
        keep_aspect,
        aspect_correction: None,
    }
}

// ==================== Preprocessing Tests ====================

#[test]
fn test_adjust_identity() {
    let img = gray_image(4, 4, |x, y| (x * 40 + y * 10) as u8);
    let out = preprocess(&img, PreprocessMode::None, 1.0, 1.0);
    assert_eq!(out, img);
}

#[test]
fn test_adjust_brightness_and_contrast_formula() {
    let img = gray_image(1, 1, |_, _| 100);

    // (100 - 128) * 1 + 128 * 1.5 = 164
    let out = adjust(&img, 1.5, 1.0);
    assert_eq!(out.rgb(0, 0), [164, 164, 164]);

    // (100 - 128) * 2 + 128 = 72
    let out = adjust(&img, 1.0, 2.0);
    assert_eq!(out.rgb(0, 0), [72, 72, 72]);
}

#[test]
fn test_adjust_clamps() {
    let img = gray_image(2, 1, |x, _| if x == 0 { 5 } else { 250 });
    let out = adjust(&img, 1.0, 2.0);
    assert_eq!(out.rgb(0, 0), [0, 0, 0]);
    assert_eq!(out.rgb(1, 0), [255, 255, 255]);
}

#[test]
fn test_adjust_preserves_alpha() {
    let img = RasterImage::from_rgba(1, 1, vec![100, 100, 100, 42]).unwrap();
    let out = adjust(&img, 2.0, 1.0);
    assert_eq!(out.data(), &[228, 228, 228, 42]);
}

#[test]
fn test_preprocess_does_not_touch_input() {
    let img = gray_image(4, 4, |x, _| (x * 60) as u8);
    let copy = img.clone();
    let _ = preprocess(&img, PreprocessMode::Sharpen, 1.5, 1.5);
    assert_eq!(img, copy);
}

#[test]
fn test_edge_map_flat_image_is_black() {
    let img = RasterImage::filled(6, 6, [120, 80, 40]).unwrap();
    let out = edge_map(&img);
    assert!(out.data().iter().all(|&v| v == 0));
}

#[test]
fn test_edge_map_highlights_step() {
    let img = gray_image(8, 4, |x, _| if x < 4 { 0 } else { 200 });
    let out = edge_map(&img);

    // strongest response normalized to 255, on the step
    assert_eq!(out.rgb(3, 1), [255, 255, 255]);
    assert_eq!(out.rgb(4, 1), [255, 255, 255]);
    // far from the step nothing changes
    assert_eq!(out.rgb(0, 1), [0, 0, 0]);
    assert_eq!(out.rgb(7, 1), [0, 0, 0]);
}

#[test]
fn test_edge_map_is_monochrome() {
    let mut data = Vec::new();
    for i in 0..16u8 {
        data.extend_from_slice(&[i * 15, 255 - i * 10, i * 3]);
    }
    let img = RasterImage::from_rgb(4, 4, data).unwrap();
    let out = edge_map(&img);
    for px in out.data().chunks_exact(3) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }
}

#[test]
fn test_sharpen_flat_unchanged() {
    let img = RasterImage::filled(5, 5, [90, 90, 90]).unwrap();
    assert_eq!(sharpen(&img, SHARPEN_AMOUNT), img);
}

#[test]
fn test_sharpen_increases_step_contrast() {
    let img = gray_image(6, 3, |x, _| if x < 3 { 50 } else { 150 });
    let out = sharpen(&img, SHARPEN_AMOUNT);
    assert!(out.rgb(2, 1)[0] < 50, "dark side should get darker");
    assert!(out.rgb(3, 1)[0] > 150, "bright side should get brighter");
    assert_eq!(out.rgb(0, 1)[0], 50);
}

#[test]
fn test_contrast_stretch_full_range() {
    let img = gray_image(5, 1, |x, _| (50 + x * 25) as u8);
    let out = stretch_histogram(&img);
    assert_eq!(out.rgb(0, 0), [0, 0, 0]);
    assert_eq!(out.rgb(4, 0), [255, 255, 255]);
    assert_eq!(out.rgb(2, 0), [128, 128, 128]);
}

#[test]
fn test_contrast_stretch_flat_unchanged() {
    let img = RasterImage::filled(3, 3, [70, 70, 70]).unwrap();
    assert_eq!(stretch_histogram(&img), img);
}

#[test]
fn test_unknown_preprocess_mode() {
    assert!(matches!(
        "blur".parse::<PreprocessMode>(),
        Err(ConfigError::UnknownPreprocessMode(_))
    ));
}

// ==================== Grid Planning Tests ====================

#[test]
fn test_fixed_dimensions() {
    let p = plan(&fixed(640, 480, Some(80), Some(24), false)).unwrap();
    assert_eq!((p.cols, p.rows), (80, 24));
    assert!((p.sample_region_w - 8.0).abs() < 1e-9);
    assert!((p.sample_region_h - 20.0).abs() < 1e-9);
}

#[test]
fn test_fixed_defaults() {
    let p = plan(&fixed(640, 480, None, None, false)).unwrap();
    assert_eq!((p.cols, p.rows), (DEFAULT_COLUMNS, DEFAULT_ROWS));

    let p = plan(&fixed(640, 480, Some(30), None, false)).unwrap();
    assert_eq!((p.cols, p.rows), (30, DEFAULT_ROWS));
}

#[test]
fn test_aspect_correction_two_to_one() {
    // A = 6 / 12 = 0.5; rows = cols / 2 * A
    let p = plan(&fixed(200, 100, Some(80), None, true)).unwrap();
    assert_eq!(p.cols, 80);
    assert_eq!(p.rows, 20);
}

#[test]
fn test_aspect_derives_columns_from_rows() {
    let p = plan(&fixed(200, 100, None, Some(20), true)).unwrap();
    assert_eq!((p.cols, p.rows), (80, 20));
}

#[test]
fn test_aspect_with_both_dimensions_keeps_them() {
    let p = plan(&fixed(200, 100, Some(33), Some(7), true)).unwrap();
    assert_eq!((p.cols, p.rows), (33, 7));
}

#[test]
fn test_aspect_override() {
    let mut req = fixed(100, 100, Some(50), None, true);
    req.aspect_correction = Some(1.0);
    assert_eq!(plan(&req).unwrap().rows, 50);
}

#[test]
fn test_high_density_counts() {
    // 600 / 6 = 100 columns, 480 / 12 = 40 rows
    let p = plan(&dense(1000, 1000, (Some(600), Some(480)), 1.0, false)).unwrap();
    assert_eq!((p.cols, p.rows), (100, 40));
}

#[test]
fn test_high_density_scaling() {
    let single = plan(&dense(800, 600, (Some(1000), Some(700)), 1.0, false)).unwrap();
    let double = plan(&dense(800, 600, (Some(1000), Some(700)), 2.0, false)).unwrap();
    assert!(double.cols.abs_diff(single.cols * 2) <= 1);
    assert!(double.rows.abs_diff(single.rows * 2) <= 1);

    let single = plan(&dense(800, 600, (None, None), 1.0, true)).unwrap();
    let double = plan(&dense(800, 600, (None, None), 2.0, true)).unwrap();
    assert!(double.cols.abs_diff(single.cols * 2) <= 1);
    assert!(double.rows.abs_diff(single.rows * 2) <= 1);
}

#[test]
fn test_high_density_keep_aspect_overrides_rows() {
    // cols = 600 / 6 = 100; rows from aspect = 100 * (100 / 200) * 0.5 = 25
    let p = plan(&dense(200, 100, (Some(600), Some(1200)), 1.0, true)).unwrap();
    assert_eq!((p.cols, p.rows), (100, 25));
}

#[test]
fn test_high_density_targets_default_to_image() {
    let p = plan(&dense(120, 96, (None, None), 1.0, false)).unwrap();
    assert_eq!((p.cols, p.rows), (20, 8));
}

#[test]
fn test_non_positive_density_is_config_error() {
    for d in [0.0, -1.0, f32::NAN] {
        assert!(matches!(
            plan(&dense(100, 100, (None, None), d, false)),
            Err(ConvertError::Config(ConfigError::NonPositiveDensity(_)))
        ));
    }
}

#[test]
fn test_empty_grid_is_validation_error() {
    assert!(matches!(
        plan(&fixed(100, 100, Some(0), Some(10), false)),
        Err(ConvertError::Validation(ValidationError::EmptyGrid { .. }))
    ));
    // a very wide strip rounds to zero rows
    assert!(matches!(
        plan(&fixed(1000, 1, Some(10), None, true)),
        Err(ConvertError::Validation(ValidationError::EmptyGrid { rows: 0, cols: 10 }))
    ));
    // target smaller than a single glyph
    assert!(matches!(
        plan(&dense(100, 100, (Some(3), Some(3)), 1.0, false)),
        Err(ConvertError::Validation(ValidationError::EmptyGrid { .. }))
    ));
}

#[test]
fn test_empty_image_is_validation_error() {
    assert!(matches!(
        plan(&fixed(0, 100, Some(10), Some(10), false)),
        Err(ConvertError::Validation(ValidationError::EmptyImage { .. }))
    ));
}

#[test]
fn test_plan_is_deterministic() {
    let req = dense(1920, 1080, (Some(1920), Some(1080)), 1.7, true);
    assert_eq!(plan(&req).unwrap(), plan(&req).unwrap());
}

#[test]
fn test_font_size_metrics() {
    let m = CellMetrics::from_font_size(10.0).unwrap();
    assert!((m.width() - 6.0).abs() < 1e-6);
    assert!((m.height() - 10.0).abs() < 1e-6);
    assert!((m.aspect_correction() - 0.6).abs() < 1e-6);
}

// ==================== Cell Region Tests ====================

#[test]
fn test_four_by_four_into_two_by_two() {
    let p = GridPlan::new(4, 4, 2, 2).unwrap();
    assert_eq!(p.column_span(0), 0..2);
    assert_eq!(p.column_span(1), 2..4);
    assert_eq!(p.row_span(0), 0..2);
    assert_eq!(p.row_span(1), 2..4);
    assert_eq!(cell_rect(&p, 1, 0), PixelRect { x0: 0, y0: 2, x1: 2, y1: 4 });
}

#[test]
fn test_every_pixel_counted_once() {
    let (w, h) = (10u32, 7u32);
    let p = GridPlan::new(w, h, 3, 3).unwrap();
    let mut hits = vec![0u32; (w * h) as usize];
    for r in 0..p.rows {
        for c in 0..p.cols {
            let rect = cell_rect(&p, r, c);
            for y in rect.y0..rect.y1 {
                for x in rect.x0..rect.x1 {
                    hits[(y * w + x) as usize] += 1;
                }
            }
        }
    }
    assert!(hits.iter().all(|&n| n == 1), "hits: {:?}", hits);
}

// ==================== Cell Analysis Tests ====================

fn directional() -> AnalyzeOptions {
    AnalyzeOptions {
        directional: true,
        ..Default::default()
    }
}

#[test]
fn test_uniform_image_has_no_direction() {
    let img = RasterImage::filled(12, 12, [90, 140, 200]).unwrap();
    let p = GridPlan::new(12, 12, 3, 4).unwrap();
    let samples = analyze(&img, &p, &directional()).unwrap();
    assert_eq!(samples.len(), 12);
    assert!(samples.iter().all(|s| s.direction == Direction::None));
    assert!(samples.iter().all(|s| s.intensity == samples[0].intensity));
}

#[test]
fn test_intensity_is_mean_luma() {
    let img = gray_image(2, 2, |x, y| if (x + y) % 2 == 0 { 0 } else { 255 });
    let p = GridPlan::new(2, 2, 1, 1).unwrap();
    let s = analyze(&img, &p, &AnalyzeOptions::default()).unwrap();
    assert!((s[0].intensity - 0.5).abs() < 1e-6);
}

#[test]
fn test_color_is_mean_rgb() {
    let img = RasterImage::from_rgb(2, 1, vec![255, 0, 0, 0, 0, 255]).unwrap();
    let p = GridPlan::new(2, 1, 1, 1).unwrap();
    let opts = AnalyzeOptions {
        color: true,
        ..Default::default()
    };
    let s = analyze(&img, &p, &opts).unwrap();
    assert_eq!(s[0].color, Some(Rgb::new(128, 0, 128)));
}

#[test]
fn test_vertical_step_is_horizontal_gradient() {
    let img = gray_image(8, 8, |x, _| if x < 4 { 0 } else { 200 });
    let p = GridPlan::new(8, 8, 1, 1).unwrap();
    let s = analyze(&img, &p, &directional()).unwrap();
    assert_eq!(s[0].direction, Direction::Horizontal);
}

#[test]
fn test_horizontal_step_is_vertical_gradient() {
    let img = gray_image(8, 8, |_, y| if y < 4 { 200 } else { 0 });
    let p = GridPlan::new(8, 8, 1, 1).unwrap();
    let s = analyze(&img, &p, &directional()).unwrap();
    assert_eq!(s[0].direction, Direction::Vertical);
}

#[test]
fn test_diagonal_ramps() {
    let p = GridPlan::new(8, 8, 1, 1).unwrap();

    let forward = gray_image(8, 8, |x, y| (15 * (x + y)) as u8);
    let s = analyze(&forward, &p, &directional()).unwrap();
    assert_eq!(s[0].direction, Direction::DiagForward);

    let back = gray_image(8, 8, |x, y| (105 + 15 * x as i32 - 15 * y as i32) as u8);
    let s = analyze(&back, &p, &directional()).unwrap();
    assert_eq!(s[0].direction, Direction::DiagBack);
}

#[test]
fn test_threshold_suppresses_weak_edges() {
    let img = gray_image(8, 8, |x, _| if x < 4 { 100 } else { 104 });
    let p = GridPlan::new(8, 8, 1, 1).unwrap();
    let s = analyze(&img, &p, &directional()).unwrap();
    assert_eq!(s[0].direction, Direction::None);

    let opts = AnalyzeOptions {
        directional: true,
        gradient_threshold: 0.5,
        ..Default::default()
    };
    let s = analyze(&img, &p, &opts).unwrap();
    assert_eq!(s[0].direction, Direction::Horizontal);
}

#[test]
fn test_direction_skipped_when_disabled() {
    let img = gray_image(8, 8, |x, _| if x < 4 { 0 } else { 200 });
    let p = GridPlan::new(8, 8, 1, 1).unwrap();
    let s = analyze(&img, &p, &AnalyzeOptions::default()).unwrap();
    assert_eq!(s[0].direction, Direction::None);
}

#[test]
fn test_cells_are_independent() {
    // the step sits exactly on the cell boundary, so neither cell sees it
    let img = gray_image(8, 4, |x, _| if x < 4 { 0 } else { 200 });
    let p = GridPlan::new(8, 4, 2, 1).unwrap();
    let s = analyze(&img, &p, &directional()).unwrap();
    assert_eq!(s[0].direction, Direction::None);
    assert_eq!(s[1].direction, Direction::None);
    assert_eq!(s[0].intensity, 0.0);
    assert!((s[1].intensity - 200.0 / 255.0).abs() < 1e-6);
}

// ==================== Character Mapping Tests ====================

#[test]
fn test_four_glyph_ramp_scenario() {
    let ramp = CharacterRamp::new("@#. ").unwrap();
    assert_eq!(map_glyph(0.0, Direction::None, &ramp, false, false), '@');
    assert_eq!(map_glyph(1.0, Direction::None, &ramp, false, false), ' ');
    assert_eq!(map_glyph(0.5, Direction::None, &ramp, false, false), '#');
}

#[test]
fn test_mapping_is_monotonic() {
    for set in CharSet::ALL {
        let levels = set.ramp().unwrap().len();
        let mut last = 0;
        for step in 0..=1000 {
            let idx = ramp_index(step as f32 / 1000.0, levels, false);
            assert!(idx >= last, "{}: index dropped at step {}", set, step);
            last = idx;
        }
        assert_eq!(last, levels - 1);
    }
}

#[test]
fn test_invert_symmetry() {
    for levels in [1usize, 2, 4, 10, 70] {
        for step in 0..=200 {
            let i = step as f32 / 200.0;
            assert_eq!(ramp_index(i, levels, true), ramp_index(1.0 - i, levels, false));
        }
    }
}

#[test]
fn test_lightest_only_at_full_intensity() {
    assert_eq!(ramp_index(0.9999, 4, false), 2);
    assert_eq!(ramp_index(1.0, 4, false), 3);
}

#[test]
fn test_map_to_chars_standard() {
    let ramp = CharSet::Standard.ramp().unwrap();
    let chars = map_to_chars(&[0.0, 1.0], &ramp, false);
    assert_eq!(chars, vec!['@', ' ']);
    let chars = map_to_chars(&[0.0, 1.0], &ramp, true);
    assert_eq!(chars, vec![' ', '@']);
}
