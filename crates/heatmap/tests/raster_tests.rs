//! Tests for block rasterization and the row flip.

use std::cell::Cell;

use heatmap::{
    block_rect, greyscale, rasterize, red_blue, BlockRect, Color, ColorScale, HeatMap,
    HeatMapError, HeatMapResult,
};
use test_utils::{create_indexed_grid, create_random_grid};

// ============================================================================
// block_rect tests
// ============================================================================

#[test]
fn test_block_rect_bottom_row() {
    // Row 0 of a 2-row map sits in the lower half.
    assert_eq!(block_rect(0, 0, 2, 10), Some(BlockRect { x: 0..10, y: 10..20 }));
}

#[test]
fn test_block_rect_top_row() {
    assert_eq!(block_rect(0, 1, 2, 10), Some(BlockRect { x: 0..10, y: 0..10 }));
}

#[test]
fn test_block_rect_columns() {
    assert_eq!(block_rect(2, 0, 1, 4), Some(BlockRect { x: 8..12, y: 0..4 }));
}

#[test]
fn test_block_rect_row_past_top() {
    // Rows are numbered 0..height; one past the top has no rectangle.
    assert_eq!(block_rect(0, 2, 2, 10), None);
    assert_eq!(block_rect(3, usize::MAX, 2, 10), None);
}

#[test]
fn test_block_rect_coordinate_overflow() {
    assert_eq!(block_rect(usize::MAX, 0, 1, 2), None);
    assert_eq!(block_rect(0, 0, usize::MAX, 2), None);
    assert_eq!(
        block_rect(0, 0, 1, usize::MAX),
        Some(BlockRect { x: 0..usize::MAX, y: 0..usize::MAX })
    );
}

#[test]
fn test_block_rects_tile_the_image() {
    let (w, h, bs) = (4, 3, 5);
    let mut covered = vec![0u8; w * bs * h * bs];
    for i in 0..w {
        for j in 0..h {
            let rect = block_rect(i, j, h, bs).unwrap();
            for y in rect.y.clone() {
                for x in rect.x.clone() {
                    covered[y * w * bs + x] += 1;
                }
            }
        }
    }
    assert!(covered.iter().all(|&n| n == 1));
}

// ============================================================================
// rasterize tests
// ============================================================================

#[test]
fn test_rasterize_dimensions() {
    let h = HeatMap::new(3, 2, test_utils::sample_3x2()).unwrap();
    let buffer = rasterize(&h, 7, &greyscale).unwrap();

    assert_eq!(buffer.width(), 21);
    assert_eq!(buffer.height(), 14);
    assert_eq!(buffer.as_bytes().len(), 21 * 14 * 4);
}

#[test]
fn test_rasterize_row_zero_at_bottom() {
    // One column: bottom cell black, top cell white.
    let h = HeatMap::new(1, 2, vec![vec![0.0, 1.0]]).unwrap();
    let buffer = rasterize(&h, 3, &greyscale).unwrap();

    for x in 0..3 {
        for y in 0..3 {
            assert_eq!(buffer.get(x, y), Some(Color::WHITE), "top at ({}, {})", x, y);
        }
        for y in 3..6 {
            assert_eq!(buffer.get(x, y), Some(Color::BLACK), "bottom at ({}, {})", x, y);
        }
    }
}

#[test]
fn test_rasterize_every_block_matches_its_cell() {
    let (w, h, bs) = (4, 3, 2);
    let map = HeatMap::new(w, h, create_indexed_grid(w, h)).unwrap();
    let buffer = rasterize(&map, bs, &ColorScale::Greyscale).unwrap();

    for i in 0..w {
        for j in 0..h {
            let expected = greyscale(map.get(i, j).unwrap()).unwrap();
            let rect = block_rect(i, j, h, bs).unwrap();
            for y in rect.y.clone() {
                for x in rect.x.clone() {
                    assert_eq!(buffer.get(x, y), Some(expected));
                }
            }
        }
    }
}

#[test]
fn test_rasterize_block_size_one() {
    let map = HeatMap::new(2, 2, vec![vec![0.0, 0.5], vec![1.0, 0.5]]).unwrap();
    let buffer = rasterize(&map, 1, &red_blue).unwrap();

    // Top row is row 1 of the map.
    assert_eq!(buffer.get(0, 0), Some(Color::BLACK));
    assert_eq!(buffer.get(1, 0), Some(Color::BLACK));
    assert_eq!(buffer.get(0, 1), Some(Color::RED));
    assert_eq!(buffer.get(1, 1), Some(Color::BLUE));
    assert_eq!(buffer.get(2, 0), None);
}

#[test]
fn test_rasterize_all_pixels_opaque() {
    let map = HeatMap::new(5, 4, create_random_grid(5, 4, 9)).unwrap();
    let buffer = rasterize(&map, 3, &red_blue).unwrap();
    assert!(buffer.colors().all(|c| c.a == 255));
}

#[test]
fn test_rasterize_zero_block_size() {
    let map = HeatMap::new(3, 2, test_utils::sample_3x2()).unwrap();
    assert!(matches!(
        rasterize(&map, 0, &greyscale),
        Err(HeatMapError::InvalidBlockSize(0))
    ));
}

#[test]
fn test_rasterize_overflowing_size() {
    let map = HeatMap::new(2, 1, vec![vec![0.0], vec![1.0]]).unwrap();
    assert!(matches!(
        rasterize(&map, usize::MAX, &greyscale),
        Err(HeatMapError::ImageTooLarge { .. })
    ));
}

#[test]
fn test_rasterize_mapper_error_aborts() {
    let calls = Cell::new(0);
    let failing = |v: f32| -> HeatMapResult<Color> {
        calls.set(calls.get() + 1);
        if v > 0.4 {
            Err(HeatMapError::ValueOutOfRange { value: v })
        } else {
            greyscale(v)
        }
    };

    let map = HeatMap::new(3, 2, test_utils::sample_3x2()).unwrap();
    let err = rasterize(&map, 2, &failing).unwrap_err();

    assert!(matches!(err, HeatMapError::ValueOutOfRange { value } if value == 0.5));
    // 0.5 is the last cell visited, so every cell was mapped once.
    assert_eq!(calls.get(), 6);
}

#[test]
fn test_rasterize_stops_at_first_error() {
    let calls = Cell::new(0);
    let failing = |_: f32| -> HeatMapResult<Color> {
        calls.set(calls.get() + 1);
        Err(HeatMapError::ValueOutOfRange { value: -1.0 })
    };

    let map = HeatMap::new(3, 2, test_utils::sample_3x2()).unwrap();
    assert!(rasterize(&map, 2, &failing).is_err());
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_rasterize_same_map_twice() {
    let map = HeatMap::new(3, 2, test_utils::sample_3x2()).unwrap();
    let grey = rasterize(&map, 4, &greyscale).unwrap();
    let rb = rasterize(&map, 4, &red_blue).unwrap();

    assert_eq!((grey.width(), grey.height()), (rb.width(), rb.height()));
    assert_ne!(grey, rb);
    assert_eq!(rasterize(&map, 4, &greyscale).unwrap(), grey);
}
