//! Cut-point planner: choose chunk boundaries that prefer silence.
//!
//! Pure function over `(duration, silence onsets, max chunk, window)`.
//! Walks fixed-length targets through the recording and snaps each one to
//! the closest silence onset within ±window, falling back to a hard cut
//! when none is near. The result always partitions `[0, duration]`.

/// Maximum slack over `max_chunk` before a chosen cut is clamped back.
const CHUNK_SLACK: f64 = 1.1;

/// Plan the ordered cut points partitioning `[0, duration]`.
///
/// Invariants on the result: starts at `0`, ends at `duration`, strictly
/// increasing, and no adjacent pair is farther apart than
/// `max_chunk * 1.1`. `silence_onsets` must be sorted ascending (as the
/// silence detector returns them); duplicates are harmless.
pub fn plan_cut_points(
    duration: f64,
    silence_onsets: &[f64],
    max_chunk: f64,
    window: f64,
) -> Vec<f64> {
    // A non-positive chunk length can never advance the target; fall back
    // to one chunk spanning the whole input.
    if max_chunk <= 0.0 {
        return if duration > 0.0 {
            vec![0.0, duration]
        } else {
            vec![0.0]
        };
    }

    let mut points = vec![0.0];
    let mut target = max_chunk;

    while target < duration {
        let from = target - window;
        let to = target + window;
        let last = points[points.len() - 1];

        // Closest onset to the target wins; on exact ties the scan keeps
        // the earlier onset (strict < comparison over an ascending list).
        // Onsets at or before the previous point are never candidates:
        // with window < max_chunk none exist in the search interval, and
        // a wider window must not re-select an already-passed onset and
        // stall the walk.
        let mut nearest: Option<f64> = None;
        for &onset in silence_onsets.iter() {
            if onset <= last || onset < from || onset > to {
                continue;
            }
            match nearest {
                Some(best) if (onset - target).abs() < (best - target).abs() => {
                    nearest = Some(onset);
                }
                None => nearest = Some(onset),
                _ => {}
            }
        }

        let mut cut = nearest.unwrap_or(target);

        // Clamp runaway growth. By construction the cut stays within
        // max_chunk + window of the previous point, but the guard holds the
        // hard bound if parameters ever allow more drift.
        if cut - last > max_chunk * CHUNK_SLACK {
            cut = last + max_chunk;
        }

        if cut >= duration {
            break;
        }

        points.push(cut);
        target = cut + max_chunk;
    }

    if points[points.len() - 1] < duration {
        points.push(duration);
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(points: &[f64], duration: f64, max_chunk: f64) {
        assert_eq!(points[0], 0.0);
        assert_eq!(points[points.len() - 1], duration);
        for pair in points.windows(2) {
            assert!(pair[1] > pair[0], "not strictly increasing: {:?}", points);
            assert!(
                pair[1] - pair[0] <= max_chunk * CHUNK_SLACK + 1e-9,
                "chunk too long: {:?}",
                points
            );
        }
    }

    #[test]
    fn short_input_yields_single_chunk() {
        assert_eq!(plan_cut_points(500.0, &[], 1200.0, 180.0), vec![0.0, 500.0]);
    }

    #[test]
    fn no_silence_means_hard_cuts_on_targets() {
        assert_eq!(
            plan_cut_points(3000.0, &[], 1200.0, 180.0),
            vec![0.0, 1200.0, 2400.0, 3000.0]
        );
    }

    #[test]
    fn snaps_to_nearby_silence_and_replans_from_it() {
        assert_eq!(
            plan_cut_points(3000.0, &[1150.0], 1200.0, 180.0),
            vec![0.0, 1150.0, 2350.0, 3000.0]
        );
    }

    #[test]
    fn prefers_closest_onset_in_window() {
        // Both onsets are in [1020, 1380]; 1190 is closer to the 1200 target.
        let points = plan_cut_points(3000.0, &[1100.0, 1190.0], 1200.0, 180.0);
        assert_eq!(points[1], 1190.0);
    }

    #[test]
    fn exact_tie_keeps_earlier_onset() {
        // 1150 and 1250 are both 50s from the target; the scan keeps 1150.
        let points = plan_cut_points(3000.0, &[1150.0, 1250.0], 1200.0, 180.0);
        assert_eq!(points[1], 1150.0);
    }

    #[test]
    fn onsets_outside_window_are_ignored() {
        let points = plan_cut_points(3000.0, &[100.0, 1019.0, 1381.0, 2900.0], 1200.0, 180.0);
        assert_eq!(points, vec![0.0, 1200.0, 2400.0, 3000.0]);
    }

    #[test]
    fn clamp_guard_bounds_chunk_growth() {
        // Onset 1350 is in the window but 1350s from the previous point,
        // above the 1320s hard bound, so the cut is clamped to 1200.
        let points = plan_cut_points(5000.0, &[1350.0], 1200.0, 180.0);
        assert_eq!(points[1], 1200.0);
        assert_invariants(&points, 5000.0, 1200.0);
    }

    #[test]
    fn duration_equal_to_max_chunk() {
        assert_eq!(plan_cut_points(1200.0, &[], 1200.0, 180.0), vec![0.0, 1200.0]);
    }

    #[test]
    fn cut_at_or_past_the_end_is_dropped() {
        // The onset at 2505 wins the last search window but lies past the
        // end of the recording; the true end is appended exactly once.
        let points = plan_cut_points(2500.0, &[2505.0], 1200.0, 180.0);
        assert_eq!(points, vec![0.0, 1200.0, 2500.0]);
    }

    #[test]
    fn snapped_cut_just_before_the_end_stays_distinct() {
        let points = plan_cut_points(2500.0, &[2495.0], 1200.0, 180.0);
        assert_eq!(points, vec![0.0, 1200.0, 2495.0, 2500.0]);
        assert_invariants(&points, 2500.0, 1200.0);
    }

    #[test]
    fn invariants_hold_for_dense_and_duplicate_onsets() {
        let onsets: Vec<f64> = (0..600).map(|i| (i / 2) as f64 * 10.0).collect();
        let points = plan_cut_points(2995.0, &onsets, 1200.0, 180.0);
        assert_invariants(&points, 2995.0, 1200.0);
    }

    #[test]
    fn invariants_hold_across_durations() {
        for d in [1.0, 650.0, 1201.0, 2400.0, 7321.5, 36000.0] {
            let points = plan_cut_points(d, &[300.0, 1100.0, 1150.0, 2399.0, 9000.0], 1200.0, 180.0);
            assert_invariants(&points, d, 1200.0);
        }
    }

    #[test]
    fn terminates_when_window_exceeds_max_chunk() {
        // A window wider than max_chunk reaches back past the previous cut;
        // the onset at 5 must be consumed once, not re-selected forever.
        let points = plan_cut_points(1000.0, &[5.0], 100.0, 1300.0);
        assert_eq!(points[1], 5.0);
        assert_invariants(&points, 1000.0, 100.0);
    }

    #[test]
    fn terminates_with_onsets_at_and_before_previous_cut() {
        let points = plan_cut_points(1000.0, &[0.0, 50.0, 50.0], 100.0, 1300.0);
        assert_invariants(&points, 1000.0, 100.0);
    }

    #[test]
    fn zero_max_chunk_collapses_to_single_chunk() {
        assert_eq!(plan_cut_points(1000.0, &[], 0.0, 180.0), vec![0.0, 1000.0]);
        assert_eq!(
            plan_cut_points(1000.0, &[300.0], -5.0, 180.0),
            vec![0.0, 1000.0]
        );
    }

    #[test]
    fn terminates_within_expected_iteration_bound() {
        let points = plan_cut_points(360_000.0, &[], 1200.0, 180.0);
        assert_eq!(points.len(), 301);
        assert_invariants(&points, 360_000.0, 1200.0);
    }
}
