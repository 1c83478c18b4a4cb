use ndarray::{Array3, ArrayViewMut2, Axis, Zip};
use ndarray::parallel::prelude::*;

use crate::label::label_components;

///
/// Removes 8-connected components smaller than `min_area_pixels` from a
/// single plane, in place. Returns the number of components removed.
///
/// Empty planes and a zero threshold are left untouched without labeling.
///
pub fn prune_plane(mut plane: ArrayViewMut2<bool>, min_area_pixels: usize) -> usize {
    if min_area_pixels == 0 || !plane.iter().any(|&a| a) {
        return 0;
    }
    let components = label_components(plane.view());
    Zip::from(&mut plane)
        .and(&components.labels)
        .for_each(|a, &label| {
            if label != 0 && components.area(label) < min_area_pixels {
                *a = false;
            }
        });
    components.areas.iter().filter(|&&area| area < min_area_pixels).count()
}

///
/// Area pruning over a `(B*T, H, W)` stack of planes
///
/// Planes are independent and processed in parallel. Returns the total
/// number of components removed.
///
pub fn prune_area(planes: &mut Array3<bool>, min_area_pixels: usize) -> usize {
    if min_area_pixels == 0 {
        return 0;
    }
    planes.axis_iter_mut(Axis(0))
        .into_par_iter()
        .map(|plane| prune_plane(plane, min_area_pixels))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn plane(rows: &[&[u8]]) -> Array2<bool> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let values = rows.iter().flat_map(|r| r.iter().map(|&v| v != 0)).collect();
        Array2::from_shape_vec((height, width), values).unwrap()
    }

    #[test]
    fn area_threshold_boundary() {
        // a 4-pixel component and a 3-pixel component
        let mut p = plane(&[
            &[1, 1, 0, 0, 0],
            &[1, 1, 0, 1, 0],
            &[0, 0, 0, 1, 1],
        ]);
        let removed = prune_plane(p.view_mut(), 4);
        assert_eq!(removed, 1);
        assert_eq!(p, plane(&[
            &[1, 1, 0, 0, 0],
            &[1, 1, 0, 0, 0],
            &[0, 0, 0, 0, 0],
        ]));
    }

    #[test]
    fn zero_threshold_passes_through() {
        let original = plane(&[&[1, 0, 1]]);
        let mut p = original.clone();
        assert_eq!(prune_plane(p.view_mut(), 0), 0);
        assert_eq!(p, original);
    }

    #[test]
    fn planes_are_pruned_independently() {
        // plane 0 has a single pixel, plane 1 a 2x2 block
        let values = vec![
            false, true, false, false,
            true, true, true, true,
        ];
        let mut planes = Array3::from_shape_vec((2, 2, 2), values).unwrap();
        let removed = prune_area(&mut planes, 2);
        assert_eq!(removed, 1);
        assert_eq!(planes.iter().filter(|&&a| a).count(), 4);
        assert!(planes.index_axis(Axis(0), 1).iter().all(|&a| a));
    }
}
