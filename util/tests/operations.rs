use tempmask_util::*;

/// Stacks single-row frames into a `(T, 1, W)` float mask
fn stack(frames: &[&[f32]]) -> MaskBatch<f32> {
    let width = frames[0].len();
    let values = frames.iter().flat_map(|f| f.iter().copied()).collect();
    MaskBatch::new(vec![frames.len(), 1, width], values).unwrap()
}

/// A single track as a `(T, 1, 1)` mask
fn track<T: MaskElement>(values: &[T]) -> MaskBatch<T> {
    MaskBatch::new(vec![values.len(), 1, 1], values.to_vec()).unwrap()
}

fn fill(max_gap_frames: i64, min_duration: i64) -> FillGapsOptions {
    FillGapsOptions { max_gap_frames, min_duration, debug_output: false }
}

fn union(radius: i64, mode: FusionMode, threshold: i64) -> UnionOptions {
    UnionOptions { radius, mode, threshold }
}

fn bits(n: usize, pattern: u32) -> Vec<bool> {
    (0..n).map(|i| (pattern >> i) & 1 == 1).collect()
}

#[test]
fn unbounded_gap_is_not_filled() {
    let mask = track(&[0u8, 1, 0, 0, 0, 0]);
    let out = fill_gaps(&mask, &fill(3, 1)).unwrap();
    assert_eq!(out, mask);
}

#[test]
fn bounded_gap_is_filled_with_preceding_value() {
    let mask = track(&[0.4f32, 0.0, 0.0, 0.9]);
    let out = fill_gaps(&mask, &fill(2, 1)).unwrap();
    assert_eq!(out.values(), &[0.4, 0.4, 0.4, 0.9]);
}

#[test]
fn filled_integers_are_copied_verbatim() {
    let mask = track(&[5i32, 0, 9, 0, 0, 0, 2]);
    let out = fill_gaps(&mask, &fill(1, 1)).unwrap();
    assert_eq!(out.values(), &[5, 5, 9, 0, 0, 0, 2]);
}

#[test]
fn bool_masks_stay_bool() {
    let mask = track(&[true, false, true, false]);
    let out = fill_gaps(&mask, &fill(1, 1)).unwrap();
    assert_eq!(out.values(), &[true, true, true, false]);
}

#[test]
fn short_segments_are_removed_before_filling() {
    // the lone frame at 3 would otherwise bridge two 1-frame gaps
    let mask = track(&[1u8, 1, 0, 1, 0, 1, 1]);
    let out = fill_gaps(&mask, &fill(1, 2)).unwrap();
    assert_eq!(out.values(), &[1, 1, 0, 0, 0, 1, 1]);
    let out = fill_gaps(&mask, &fill(3, 2)).unwrap();
    assert_eq!(out.values(), &[1, 1, 1, 1, 1, 1, 1]);
}

#[test]
fn zero_max_gap_returns_prefiltered_input() {
    let mask = track(&[1.0f64, 0.0, 1.0, 1.0, 0.0, -2.0, 1.0]);
    let out = fill_gaps(&mask, &fill(0, 1)).unwrap();
    assert_eq!(out.values(), &[1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0]);
    let out = fill_gaps(&mask, &fill(0, 2)).unwrap();
    assert_eq!(out.values(), &[0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn fill_gaps_is_monotonic_in_max_gap() {
    for pattern in 0u32..256 {
        let mask = MaskBatch::new(vec![8, 1, 1], bits(8, pattern)).unwrap();
        for min_duration in 1..=3 {
            let mut previous = 0;
            for max_gap in 0..=8 {
                let count = fill_gaps(&mask, &fill(max_gap, min_duration)).unwrap().active_count();
                assert!(count >= previous, "pattern {:08b} min_duration {} max_gap {}", pattern, min_duration, max_gap);
                previous = count;
            }
        }
    }
}

#[test]
fn single_frame_flicker_is_removed() {
    let mask = stack(&[
        &[0.0, 0.0, 0.0, 0.0],
        &[1.0, 0.0, 0.0, 0.0],
        &[0.0, 0.0, 0.0, 0.0],
    ]);
    let opts = RemoveShortOptions { min_duration: 2, min_area_pixels: 0 };
    let out = remove_short_objects(&mask, &opts).unwrap();
    assert_eq!(out.active_count(), 0);
}

#[test]
fn large_object_survives_filters() {
    let mask = stack(&[
        &[0.0, 0.0, 0.0, 0.0],
        &[1.0, 1.0, 1.0, 1.0],
        &[1.0, 1.0, 1.0, 1.0],
        &[0.0, 0.0, 0.0, 0.0],
    ]);
    let opts = RemoveShortOptions { min_duration: 2, min_area_pixels: 1 };
    let out = remove_short_objects(&mask, &opts).unwrap();
    assert_eq!(out, mask);
}

#[test]
fn block_lasting_two_frames_survives() {
    // (T=2, H=3, W=3) with a 2x2 block in the corner
    let frame = [1u8, 1, 0, 1, 1, 0, 0, 0, 0];
    let values = frame.iter().chain(frame.iter()).copied().collect();
    let mask = MaskBatch::new(vec![2, 3, 3], values).unwrap();
    let opts = RemoveShortOptions { min_duration: 2, min_area_pixels: 1 };
    assert_eq!(remove_short_objects(&mask, &opts).unwrap(), mask);
}

#[test]
fn small_connected_component_removed() {
    let mask = stack(&[
        &[0.0, 0.0, 0.0, 0.0],
        &[0.0, 0.0, 1.0, 0.0],
        &[0.0, 0.0, 0.0, 0.0],
        &[0.0, 0.0, 0.0, 0.0],
    ]);
    let opts = RemoveShortOptions { min_duration: 1, min_area_pixels: 5 };
    let out = remove_short_objects(&mask, &opts).unwrap();
    assert_eq!(out.active_count(), 0);
}

#[test]
fn duration_threshold_boundary() {
    let mask = track(&[0i64, 1, 1, 1, 0, 1, 1, 0]);
    let opts = RemoveShortOptions { min_duration: 3, min_area_pixels: 0 };
    let out = remove_short_objects(&mask, &opts).unwrap();
    assert_eq!(out.values(), &[0, 1, 1, 1, 0, 0, 0, 0]);
}

#[test]
fn area_threshold_boundary() {
    // single frame (H=3, W=5): a diagonal 3-pixel component and a 2-pixel one
    let values = vec![
        1u8, 0, 0, 0, 1,
        0, 1, 0, 0, 1,
        0, 0, 1, 0, 0,
    ];
    let mask = MaskBatch::new(vec![3, 5], values).unwrap();
    let opts = RemoveShortOptions { min_duration: 1, min_area_pixels: 3 };
    let out = remove_short_objects(&mask, &opts).unwrap();
    assert_eq!(out.values(), &[
        1, 0, 0, 0, 0,
        0, 1, 0, 0, 0,
        0, 0, 1, 0, 0,
    ]);
    let opts = RemoveShortOptions { min_duration: 1, min_area_pixels: 4 };
    assert_eq!(remove_short_objects(&mask, &opts).unwrap().active_count(), 0);
}

#[test]
fn area_pruning_runs_before_duration_pruning() {
    // pixel 2 stays in a large component on both frames; pixel 0 lasts two
    // frames but is isolated on the second one
    let mask = stack(&[
        &[1.0, 1.0, 1.0, 0.0, 0.0],
        &[1.0, 0.0, 1.0, 1.0, 0.0],
    ]);
    let opts = RemoveShortOptions { min_duration: 2, min_area_pixels: 2 };
    let out = remove_short_objects(&mask, &opts).unwrap();
    assert_eq!(out.values(), &[
        0.0, 0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0, 0.0,
    ]);
}

#[test]
fn remove_short_outputs_zero_one() {
    let mask = track(&[0.3f32, 0.7, 0.0]);
    let opts = RemoveShortOptions { min_duration: 2, min_area_pixels: 0 };
    assert_eq!(remove_short_objects(&mask, &opts).unwrap().values(), &[1.0, 1.0, 0.0]);
}

#[test]
fn zero_radius_union_is_identity() {
    let mask = track(&[1u16, 0, 0, 1, 1, 0]);
    for mode in [FusionMode::Or, FusionMode::Majority] {
        assert_eq!(temporal_union(&mask, &union(0, mode, 3)).unwrap(), mask);
    }
}

#[test]
fn or_union_spans_the_window() {
    let mask = track(&[0i8, 0, 0, 0, 1, 0, 0, 0, 0]);
    let out = temporal_union(&mask, &union(2, FusionMode::Or, 1)).unwrap();
    assert_eq!(out.values(), &[0, 0, 1, 1, 1, 1, 1, 0, 0]);
}

#[test]
fn majority_threshold_is_clamped() {
    for pattern in 0u32..128 {
        let mask = MaskBatch::new(vec![7, 1, 1], bits(7, pattern)).unwrap();
        let capped = temporal_union(&mask, &union(1, FusionMode::Majority, 50)).unwrap();
        let exact = temporal_union(&mask, &union(1, FusionMode::Majority, 3)).unwrap();
        assert_eq!(capped, exact, "pattern {:07b}", pattern);
    }
}

#[test]
fn majority_is_biased_at_the_edges() {
    // a fully active track fails the vote wherever the window hangs over an end
    let mask = track(&[1u8; 5]);
    let out = temporal_union(&mask, &union(2, FusionMode::Majority, 5)).unwrap();
    assert_eq!(out.values(), &[0, 0, 1, 0, 0]);
    let out = temporal_union(&mask, &union(1, FusionMode::Majority, 3)).unwrap();
    assert_eq!(out.values(), &[0, 1, 1, 1, 0]);
}

#[test]
fn batches_are_independent() {
    // (B=2, T=3, H=1, W=1)
    let mask = MaskBatch::new(vec![2, 3, 1, 1], vec![1u8, 0, 1, 0, 0, 0]).unwrap();
    let out = fill_gaps(&mask, &fill(1, 1)).unwrap();
    assert_eq!(out.values(), &[1, 1, 1, 0, 0, 0]);
}

#[test]
fn output_shape_matches_input() {
    let dims_list = [vec![4, 5], vec![3, 4, 5], vec![2, 3, 4, 5], vec![1, 1, 1, 1], vec![0, 2, 2]];
    for dims in dims_list.iter() {
        let len = dims.iter().product();
        let mask = MaskBatch::new(dims.clone(), vec![1.0f32; len]).unwrap();
        assert_eq!(fill_gaps(&mask, &FillGapsOptions::default()).unwrap().dims(), &dims[..]);
        assert_eq!(remove_short_objects(&mask, &RemoveShortOptions::default()).unwrap().dims(), &dims[..]);
        assert_eq!(temporal_union(&mask, &UnionOptions::default()).unwrap().dims(), &dims[..]);
    }
}

#[test]
fn unsupported_rank_fails() {
    let mask = MaskBatch::new(vec![6], vec![true; 6]).unwrap();
    assert!(matches!(fill_gaps(&mask, &FillGapsOptions::default()), Err(MaskError::Shape { rank: 1 })));
    let mask = MaskBatch::new(vec![1, 1, 1, 1, 2], vec![true; 2]).unwrap();
    assert!(matches!(temporal_union(&mask, &UnionOptions::default()), Err(MaskError::Shape { rank: 5 })));
}

#[test]
fn invalid_parameters_fail_before_shape_checks() {
    let mask = MaskBatch::new(vec![6], vec![true; 6]).unwrap();
    match fill_gaps(&mask, &fill(-1, 1)) {
        Err(MaskError::Validation { param, .. }) => assert_eq!(param, "max_gap_frames"),
        other => panic!("unexpected {:?}", other),
    }
    let opts = RemoveShortOptions { min_duration: 0, min_area_pixels: 0 };
    assert!(matches!(remove_short_objects(&mask, &opts), Err(MaskError::Validation { param: "min_duration", .. })));
}

#[test]
fn any_mask_dispatches_by_kind() {
    let bytes: Vec<u8> = vec![1, 0, 0, 1];
    let mask = AnyMask::from_le_bytes("uint8".parse().unwrap(), vec![4, 1, 1], &bytes).unwrap();
    let out = mask.fill_gaps(&fill(2, 1)).unwrap();
    assert_eq!(out.kind(), ElementKind::U8);
    assert_eq!(out.to_le_bytes().unwrap(), vec![1, 1, 1, 1]);
    let out = mask.temporal_union(&union(1, "MAJORITY".parse().unwrap(), 2)).unwrap();
    assert_eq!(out.to_le_bytes().unwrap(), vec![0, 0, 0, 0]);
    let out = mask.remove_short_objects(&RemoveShortOptions { min_duration: 1, min_area_pixels: 1 }).unwrap();
    assert_eq!(out, mask);
}

#[test]
fn input_is_not_modified() {
    let mask = track(&[1u8, 0, 1]);
    let copy = mask.clone();
    let _ = fill_gaps(&mask, &fill(1, 1)).unwrap();
    let _ = temporal_union(&mask, &union(1, FusionMode::Or, 1)).unwrap();
    assert_eq!(mask, copy);
}
