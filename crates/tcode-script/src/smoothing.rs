//! Gap smoothing

use tcode_model::{Column, Millis};

/// Close small gaps between consecutive intervals
///
/// Walks intervals in their current order. Whenever the next onset is less than
/// `tolerance` after the current offset (overlaps included), the next onset is
/// snapped to the current offset. Returns the number of onsets moved.
pub fn smooth_column(column: &mut Column, tolerance: Millis) -> usize {
    let mut moved = 0;
    let mut previous_offset: Option<Millis> = None;
    for interval in column.intervals_mut() {
        if let Some(offset) = previous_offset {
            if interval.onset() < offset.saturating_add(tolerance) && interval.onset() != offset {
                interval.set_onset(offset);
                moved += 1;
            }
        }
        previous_offset = Some(interval.offset());
    }
    tracing::debug!(column = column.name(), moved, tolerance, "smoothed column");
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcode_test_utils::spans;

    fn onsets(column: &Column) -> Vec<Millis> {
        column.intervals().iter().map(|iv| iv.onset()).collect()
    }

    #[test]
    fn small_gaps_close() {
        let mut col = spans("c", "x", &[(0, 100), (120, 200), (300, 400)]);
        assert_eq!(smooth_column(&mut col, 33), 1);
        assert_eq!(onsets(&col), vec![0, 100, 300]);
    }

    #[test]
    fn gap_equal_to_tolerance_stays() {
        let mut col = spans("c", "x", &[(0, 100), (133, 200)]);
        assert_eq!(smooth_column(&mut col, 33), 0);
        assert_eq!(onsets(&col), vec![0, 133]);
    }

    #[test]
    fn overlaps_snap_forward() {
        let mut col = spans("c", "x", &[(0, 100), (90, 200)]);
        assert_eq!(smooth_column(&mut col, 33), 1);
        assert_eq!(onsets(&col), vec![0, 100]);
    }

    #[test]
    fn touching_intervals_untouched() {
        let mut col = spans("c", "x", &[(0, 100), (100, 200)]);
        assert_eq!(smooth_column(&mut col, 33), 0);
    }
}
