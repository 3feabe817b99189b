use super::*;
use crate::color::density_color;
use crate::generator::{GeneratorKind, HashAdvance, Scripted, DEFAULT_SEED};

const STEPS_PER_CELL: u32 = 40;

fn walked(width: usize, height: usize, gen: &mut dyn BoundedGenerator) -> FieldBuffer {
    let mut field = FieldBuffer::try_new(width, height).unwrap();
    field.walk(gen, STEPS_PER_CELL).unwrap();
    field
}

#[test]
fn scripted_square_loop_matches_hand_trace() {
    let mut gen = Scripted::new(vec![0, 0, 2, 2, 1, 1, 3, 3]);
    let field = walked(4, 4, &mut gen);
    #[rustfmt::skip]
    let expected: Vec<u32> = vec![
        80, 80, 80, 0,
        80,  0, 80, 0,
        80, 80, 80, 0,
         0,  0,  0, 0,
    ];
    assert_eq!(field.counts().unwrap(), expected.as_slice());
}

#[test]
fn scripted_diagonal_wraps_through_far_corner() {
    let mut gen = Scripted::new(vec![1, 3]);
    let field = walked(4, 4, &mut gen);
    #[rustfmt::skip]
    let expected: Vec<u32> = vec![
        80,  0,  0, 80,
        80, 80,  0,  0,
         0, 80, 80,  0,
         0,  0, 80, 80,
    ];
    assert_eq!(field.counts().unwrap(), expected.as_slice());
}

#[test]
fn every_step_lands_in_exactly_one_cell() {
    for kind in GeneratorKind::ALL {
        let mut gen = kind.build(DEFAULT_SEED);
        let field = walked(37, 23, gen.as_mut());
        let total: u64 = field.counts().unwrap().iter().map(|&c| u64::from(c)).sum();
        assert_eq!(total, 37 * 23 * 40, "{kind} lost or duplicated steps");
        assert_eq!(field.visit_summary().unwrap().total_visits, total);
    }
}

#[test]
fn same_seed_gives_identical_counts_and_pixels() {
    let mut a = HashAdvance::mum(DEFAULT_SEED);
    let mut b = HashAdvance::mum(DEFAULT_SEED);
    let mut fa = walked(64, 48, &mut a);
    let mut fb = walked(64, 48, &mut b);
    assert_eq!(fa.counts().unwrap(), fb.counts().unwrap());

    fa.colorize().unwrap();
    fb.colorize().unwrap();
    assert_eq!(fa.into_pixels().unwrap(), fb.into_pixels().unwrap());
}

#[test]
fn continuing_a_generator_changes_the_field() {
    let mut gen = HashAdvance::mum(DEFAULT_SEED);
    let first = walked(32, 32, &mut gen);
    let second = walked(32, 32, &mut gen);
    assert_ne!(first.counts().unwrap(), second.counts().unwrap());
}

#[test]
fn colorized_cells_come_from_clamped_counts() {
    let mut gen = Scripted::new(vec![0, 1]);
    let mut field = walked(2, 1, &mut gen);
    // 80 steps bouncing between the two cells of a 2x1 torus
    assert_eq!(field.counts().unwrap(), &[40, 40]);
    field.colorize().unwrap();
    let grid = field.into_pixels().unwrap();
    assert_eq!((grid.width, grid.height), (2, 1));
    assert_eq!(grid.pixels, vec![density_color(40); 2]);
}

#[test]
fn hot_single_cell_saturates() {
    let mut gen = Scripted::new(vec![0]);
    let field = walked(1, 1, &mut gen);
    let summary = field.visit_summary().unwrap();
    assert_eq!(summary.max_visits, 40);
    assert_eq!(summary.saturated_cells, 0);

    let mut gen = Scripted::new(vec![2]);
    let mut hot = FieldBuffer::try_new(1, 1).unwrap();
    hot.walk(&mut gen, 1000).unwrap();
    let summary = hot.visit_summary().unwrap();
    assert_eq!(summary.max_visits, 1000);
    assert_eq!(summary.saturated_cells, 1);
    hot.colorize().unwrap();
    assert_eq!(hot.into_pixels().unwrap().get(0, 0), density_color(255));
}

#[test]
fn summary_counts_unvisited_cells() {
    let mut gen = Scripted::new(vec![0, 0, 2, 2, 1, 1, 3, 3]);
    let field = walked(4, 4, &mut gen);
    let summary = field.visit_summary().unwrap();
    assert_eq!(summary.unvisited_cells, 8);
    assert_eq!(summary.max_visits, 80);
}

#[test]
fn rejects_zero_dimensions() {
    assert_eq!(
        FieldBuffer::try_new(0, 10).unwrap_err(),
        FieldError::InvalidDimensions { width: 0, height: 10 }
    );
    assert_eq!(
        FieldBuffer::try_new(10, 0).unwrap_err(),
        FieldError::InvalidDimensions { width: 10, height: 0 }
    );
}

#[test]
fn rejects_oversized_fields() {
    let err = FieldBuffer::try_new(FieldBuffer::MAX_CELLS, 2).unwrap_err();
    assert!(matches!(err, FieldError::TooManyCells { .. }));
    let err = FieldBuffer::try_new(usize::MAX, 2).unwrap_err();
    assert!(matches!(err, FieldError::TooManyCells { .. }));
}

#[test]
fn new_buffer_is_empty_and_zeroed() {
    let mut field = FieldBuffer::try_new(3, 2).unwrap();
    assert_eq!(field.stage(), FieldStage::Empty);
    let mut gen = Scripted::new(vec![0]);
    field.walk(&mut gen, 0).unwrap();
    assert_eq!(field.counts().unwrap(), &[0; 6]);
}

#[test]
fn stages_cannot_be_skipped() {
    let mut field = FieldBuffer::try_new(2, 2).unwrap();
    assert_eq!(
        field.colorize().unwrap_err(),
        FieldError::OutOfOrder {
            expected: FieldStage::Walked,
            actual: FieldStage::Empty,
        }
    );
    assert!(field.counts().is_err());
    assert!(field.clone().into_pixels().is_err());

    let mut gen = Scripted::new(vec![3]);
    field.walk(&mut gen, 1).unwrap();
    assert_eq!(field.stage(), FieldStage::Walked);
    assert!(field.walk(&mut gen, 1).is_err());
    assert!(field.clone().into_pixels().is_err());

    field.colorize().unwrap();
    assert_eq!(field.stage(), FieldStage::Colorized);
    assert!(field.counts().is_err());
    assert!(field.colorize().is_err());
    assert_eq!(field.into_pixels().unwrap().pixels.len(), 4);
}

#[test]
fn failed_transition_leaves_buffer_untouched() {
    let mut gen = Scripted::new(vec![0, 2]);
    let mut field = walked(3, 3, &mut gen);
    let before = field.counts().unwrap().to_vec();
    assert!(field.walk(&mut gen, 5).is_err());
    assert_eq!(field.counts().unwrap(), before.as_slice());
}

#[test]
fn step_count_scales_with_density() {
    let field = FieldBuffer::try_new(1, 1).unwrap();
    assert_eq!(field.step_count(40), 40);
    let big = FieldBuffer::try_new(1024, 768).unwrap();
    assert_eq!(big.step_count(40), 1024 * 768 * 40);
    assert_eq!(big.step_count(u32::MAX), 1024 * 768 * u64::from(u32::MAX));
}

#[test]
fn largest_walk_fits_in_u64() {
    let max = (FieldBuffer::MAX_CELLS as u64).checked_mul(u64::from(u32::MAX));
    assert!(max.is_some());
}

#[test]
fn pixel_grid_unpacks_row_major_bytes() {
    let grid = PixelGrid {
        width: 2,
        height: 1,
        pixels: vec![0x0011_2233, 0x0044_5566],
    };
    assert_eq!(grid.get(1, 0), 0x0044_5566);
    assert_eq!(grid.to_rgb_bytes(), vec![0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
}

#[test]
fn error_messages_name_the_problem() {
    let msg = FieldError::OutOfOrder {
        expected: FieldStage::Colorized,
        actual: FieldStage::Walked,
    }
    .to_string();
    assert_eq!(msg, "field buffer is walked, operation requires it to be colorized");
    assert!(FieldError::InvalidDimensions { width: 0, height: 3 }
        .to_string()
        .contains("0x3"));
}
