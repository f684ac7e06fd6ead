//! Pairwise overlap between two sets of temporal segments.
//!
//! Segments are `[start, end]` rows with inclusive bounds, so a single-frame
//! segment has length 1. Both functions return a dense `[m, n]` matrix indexed
//! by (target row, test row).

use ndarray::{Array2, ArrayView2, Axis};

use crate::error::{ClipError, Result};

/// Scalar usable as a segment bound: frame indices or timestamps.
pub trait Bound: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! impl_bound {
    ($($t:ty),*) => {
        $(impl Bound for $t {
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        })*
    };
}

impl_bound!(i32, i64, u32, u64, usize, f32, f64);

/// Inclusive `[start, end]` segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> i64 {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0
    }
}

/// Stack intervals into the `[n, 2]` layout expected by [`intersection_length`] and [`iou`].
pub fn intervals_to_array(intervals: &[Interval]) -> Array2<i64> {
    let mut arr = Array2::zeros((intervals.len(), 2));
    for (mut row, interval) in arr.axis_iter_mut(Axis(0)).zip(intervals) {
        row[0] = interval.start;
        row[1] = interval.end;
    }
    arr
}

fn check_segments<T: Bound>(name: &'static str, segments: &ArrayView2<T>) -> Result<()> {
    if segments.ncols() != 2 {
        return Err(ClipError::InvalidShape {
            name,
            shape: segments.shape().to_vec(),
        });
    }
    for (row, segment) in segments.axis_iter(Axis(0)).enumerate() {
        let (start, end) = (segment[0].to_f64(), segment[1].to_f64());
        if !(start.is_finite() && end.is_finite() && start <= end) {
            return Err(ClipError::InvalidInterval {
                name,
                row,
                start,
                end,
            });
        }
    }
    Ok(())
}

#[inline]
fn intersection(t_start: f64, t_end: f64, s_start: f64, s_end: f64) -> f64 {
    (t_end.min(s_end) - t_start.max(s_start) + 1.0).max(0.0)
}

/// Length of the overlap between every target and every test segment.
///
/// Disjoint segments give exactly `0.0`.
pub fn intersection_length<T: Bound>(
    target_segments: ArrayView2<T>,
    test_segments: ArrayView2<T>,
) -> Result<Array2<f64>> {
    check_segments("target", &target_segments)?;
    check_segments("test", &test_segments)?;

    let (m, n) = (target_segments.nrows(), test_segments.nrows());
    let mut overlap = Array2::zeros((m, n));
    for (i, target) in target_segments.axis_iter(Axis(0)).enumerate() {
        let (t_start, t_end) = (target[0].to_f64(), target[1].to_f64());
        for (j, test) in test_segments.axis_iter(Axis(0)).enumerate() {
            overlap[[i, j]] = intersection(t_start, t_end, test[0].to_f64(), test[1].to_f64());
        }
    }
    Ok(overlap)
}

/// Temporal intersection over union between every target and every test segment.
///
/// Values are in `[0, 1]`; identical segments give `1.0`.
pub fn iou<T: Bound>(
    target_segments: ArrayView2<T>,
    test_segments: ArrayView2<T>,
) -> Result<Array2<f64>> {
    check_segments("target", &target_segments)?;
    check_segments("test", &test_segments)?;

    let (m, n) = (target_segments.nrows(), test_segments.nrows());
    let mut ratios = Array2::zeros((m, n));
    for (i, target) in target_segments.axis_iter(Axis(0)).enumerate() {
        let (t_start, t_end) = (target[0].to_f64(), target[1].to_f64());
        let target_len = t_end - t_start + 1.0;
        for (j, test) in test_segments.axis_iter(Axis(0)).enumerate() {
            let (s_start, s_end) = (test[0].to_f64(), test[1].to_f64());
            let inter = intersection(t_start, t_end, s_start, s_end);
            // union >= max(len) >= 1 once both rows passed check_segments
            let union = (s_end - s_start + 1.0) + target_len - inter;
            ratios[[i, j]] = inter / union;
        }
    }
    Ok(ratios)
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array2};

    use super::*;

    #[test]
    fn test_intersection_length_inclusive_bounds() {
        let target = array![[1, 16], [10, 10]];
        let test = array![[1, 16], [17, 32], [8, 12]];
        let overlap = intersection_length(target.view(), test.view()).unwrap();

        assert_eq!(overlap.shape(), &[2, 3]);
        assert_eq!(overlap, array![[16.0, 0.0, 5.0], [1.0, 0.0, 1.0]]);
    }

    #[test]
    fn test_intersection_is_transposed_when_swapped() {
        let a = array![[1, 20], [30, 45], [5, 9]];
        let b = array![[3, 33], [40, 60]];
        let ab = intersection_length(a.view(), b.view()).unwrap();
        let ba = intersection_length(b.view(), a.view()).unwrap();

        assert_eq!(ab, ba.t());
    }

    #[test]
    fn test_disjoint_segments() {
        let target = array![[1, 5]];
        let test = array![[6, 10], [100, 200]];

        let overlap = intersection_length(target.view(), test.view()).unwrap();
        let ratios = iou(target.view(), test.view()).unwrap();
        assert!(overlap.iter().all(|&v| v == 0.0));
        assert!(ratios.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_identical_segments() {
        let segments = array![[3, 18], [7, 7]];
        let overlap = intersection_length(segments.view(), segments.view()).unwrap();
        let ratios = iou(segments.view(), segments.view()).unwrap();

        assert_eq!(overlap[[0, 0]], 16.0);
        assert_eq!(overlap[[1, 1]], 1.0);
        assert_eq!(ratios[[0, 0]], 1.0);
        assert_eq!(ratios[[1, 1]], 1.0);
    }

    #[test]
    fn test_iou_partial_overlap() {
        // intersection [9, 16] = 8, union 16 + 16 - 8 = 24
        let target = array![[1, 16]];
        let test = array![[9, 24]];
        let ratios = iou(target.view(), test.view()).unwrap();
        assert!((ratios[[0, 0]] - 8.0 / 24.0).abs() < 1e-12);
    }

    #[test]
    fn test_real_valued_bounds() {
        let target = array![[0.5, 2.5]];
        let test = array![[1.5, 4.0]];
        let overlap = intersection_length(target.view(), test.view()).unwrap();
        assert!((overlap[[0, 0]] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_wrong_column_count_is_rejected() {
        let target = Array2::<i64>::zeros((2, 3));
        let test = array![[1, 2]];
        let err = intersection_length(target.view(), test.view()).unwrap_err();
        assert!(matches!(err, ClipError::InvalidShape { name: "target", .. }));

        let err = iou(test.view(), target.view()).unwrap_err();
        assert!(matches!(err, ClipError::InvalidShape { name: "test", .. }));
    }

    #[test]
    fn test_reversed_interval_is_rejected() {
        let target = array![[1, 5], [9, 2]];
        let test = array![[1, 2]];
        let err = iou(target.view(), test.view()).unwrap_err();
        assert!(matches!(err, ClipError::InvalidInterval { row: 1, .. }));
    }

    #[test]
    fn test_non_finite_bound_is_rejected() {
        let target = array![[f64::NAN, 5.0]];
        let test = array![[1.0, 4.0]];
        let err = iou(target.view(), test.view()).unwrap_err();
        assert!(matches!(err, ClipError::InvalidInterval { name: "target", row: 0, .. }));

        let err = intersection_length(test.view(), target.view()).unwrap_err();
        assert!(matches!(err, ClipError::InvalidInterval { name: "test", .. }));

        let open = array![[0.0, f64::INFINITY]];
        assert!(intersection_length(open.view(), test.view()).is_err());
    }

    #[test]
    fn test_empty_inputs_keep_shape() {
        let target = Array2::<i64>::zeros((0, 2));
        let test = array![[1, 16], [17, 32]];
        let overlap = intersection_length(target.view(), test.view()).unwrap();
        assert_eq!(overlap.shape(), &[0, 2]);
    }

    #[test]
    fn test_intervals_to_array() {
        let arr = intervals_to_array(&[Interval::new(1, 16), Interval::new(17, 32)]);
        assert_eq!(arr, array![[1, 16], [17, 32]]);
        assert_eq!(Interval::new(4, 4).len(), 1);
    }
}
