//! Scaling Module
//! Pure helpers shared by every chart type: coercion, min/max scaling,
//! fixed-step downsampling and the heatmap color ramp.

use crate::charts::{Color, SeriesData};

/// Default cap on plotted points.
pub const DEFAULT_MAX_POINTS: usize = 500;
/// Default vertical inset in pixels.
pub const DEFAULT_PADDING: f64 = 20.0;

/// Missing and non-finite samples plot as zero.
pub fn coerce(sample: Option<f64>) -> f64 {
    match sample {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Minimum and maximum of a slice, `None` when empty.
pub fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}

/// Position of `value` between `min` and `max`, in `0.0..=1.0`.
///
/// A flat range counts as width 1, so every value of a flat series lands on 0.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    let t = if !range.is_finite() {
        // Halve first so extreme magnitudes don't overflow the subtraction.
        (value / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
    } else if range == 0.0 {
        value - min
    } else {
        (value - min) / range
    };
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Map values to pixel rows: the maximum lands at `padding`, the minimum at
/// `height - padding`.
pub fn scale(values: &[f64], height: f64, padding: f64) -> Vec<f64> {
    let Some((min, max)) = value_range(values) else {
        return Vec::new();
    };
    let band = height - padding * 2.0;

    values
        .iter()
        .map(|&v| padding + (1.0 - normalize(v, min, max)) * band)
        .collect()
}

/// Evenly spread x positions from 0 to `width`.
pub fn x_positions(count: usize, width: f64) -> Vec<f64> {
    let step = width / count.saturating_sub(1).max(1) as f64;
    (0..count).map(|i| step * i as f64).collect()
}

/// Aligned, coerced and bounded plotting input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Normalized {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Align labels with values and subsample to at most `max_points`.
///
/// The step is `floor(len / max_points)` (at least 1). Output never exceeds
/// `max_points`; with `keep_last` the final sample replaces the last slot
/// when the stride would otherwise skip it. Just over the cap the step stays
/// 1, so everything between the cap and the final sample is dropped and the
/// plotted tail jumps.
pub fn downsample(data: &SeriesData, max_points: usize, keep_last: bool) -> Normalized {
    let len = data.len();
    if len == 0 {
        return Normalized::default();
    }

    let max_points = max_points.max(1);
    let step = (len / max_points).max(1);
    let mut indices: Vec<usize> = (0..len).step_by(step).take(max_points).collect();

    if keep_last && indices.last() != Some(&(len - 1)) {
        if indices.len() < max_points {
            indices.push(len - 1);
        } else if let Some(last) = indices.last_mut() {
            *last = len - 1;
        }
    }

    Normalized {
        labels: indices
            .iter()
            .map(|&i| data.labels.get(i).map(|l| l.to_string()).unwrap_or_default())
            .collect(),
        values: indices
            .iter()
            .map(|&i| coerce(data.series.get(i).copied().flatten()))
            .collect(),
    }
}

/// Heatmap ramp: red fades out and green fades in as `t` goes 0 to 1.
pub fn heat_color(t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    Color::rgb(
        (255.0 * (1.0 - t)).round() as u8,
        (255.0 * t).round() as u8,
        150,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(len: usize) -> SeriesData {
        SeriesData::from_values(
            (0..len).map(|i| format!("t{}", i)),
            (0..len).map(|i| i as f64),
        )
    }

    #[test]
    fn test_coerce() {
        assert_eq!(coerce(Some(2.5)), 2.5);
        assert_eq!(coerce(None), 0.0);
        assert_eq!(coerce(Some(f64::NAN)), 0.0);
        assert_eq!(coerce(Some(f64::INFINITY)), 0.0);
    }

    #[test]
    fn test_scale_orientation() {
        let ys = scale(&[10.0, 15.0, 5.0], 150.0, 20.0);
        assert_eq!(ys, vec![75.0, 20.0, 130.0]);
    }

    #[test]
    fn test_scale_flat_series() {
        let ys = scale(&[7.0, 7.0, 7.0], 100.0, 20.0);
        assert!(ys.iter().all(|&y| y == ys[0]));
        assert_eq!(ys[0], 80.0);
    }

    #[test]
    fn test_scale_extreme_magnitudes_stay_in_band() {
        let ys = scale(&[-f64::MAX, 0.0, f64::MAX], 100.0, 10.0);
        assert_eq!(ys[0], 90.0);
        assert_eq!(ys[2], 10.0);
        assert!(ys[1] > 10.0 && ys[1] < 90.0);
    }

    #[test]
    fn test_scale_empty() {
        assert!(scale(&[], 100.0, 20.0).is_empty());
    }

    #[test]
    fn test_x_positions() {
        assert_eq!(x_positions(3, 100.0), vec![0.0, 50.0, 100.0]);
        assert_eq!(x_positions(1, 100.0), vec![0.0]);
        assert!(x_positions(0, 100.0).is_empty());
    }

    #[test]
    fn test_downsample_short_series_untouched() {
        let out = downsample(&series(10), 500, true);
        assert_eq!(out.len(), 10);
        assert_eq!(out.labels[9], "t9");
    }

    #[test]
    fn test_downsample_is_bounded() {
        for len in [501, 999, 1000, 1001, 4321] {
            for keep_last in [false, true] {
                let out = downsample(&series(len), 500, keep_last);
                assert!(out.len() <= 500, "len {} produced {}", len, out.len());
                assert!(!out.is_empty());
            }
        }
    }

    #[test]
    fn test_downsample_fixed_step_keeps_pairs() {
        let out = downsample(&series(1000), 100, false);
        assert_eq!(out.len(), 100);
        for (label, value) in out.labels.iter().zip(&out.values) {
            assert_eq!(label, &format!("t{}", *value as usize));
        }
        assert_eq!(out.values[1], 10.0);
        assert_eq!(*out.values.last().unwrap(), 990.0);
    }

    #[test]
    fn test_downsample_keep_last() {
        let out = downsample(&series(1005), 100, true);
        assert_eq!(out.len(), 100);
        assert_eq!(*out.values.last().unwrap(), 1004.0);
        assert_eq!(out.labels.last().map(String::as_str), Some("t1004"));
    }

    #[test]
    fn test_downsample_keep_last_just_over_cap() {
        let out = downsample(&series(999), 500, true);
        assert_eq!(out.len(), 500);
        assert_eq!(out.values[497..], [497.0, 498.0, 998.0]);
    }

    #[test]
    fn test_downsample_aligns_mismatched_lengths() {
        let data = SeriesData::new(["a", "b", "c"], [Some(1.0), None]);
        let out = downsample(&data, 500, true);
        assert_eq!(out.labels, vec!["a", "b", "c"]);
        assert_eq!(out.values, vec![1.0, 0.0, 0.0]);

        let data = SeriesData::new(["a"], [Some(1.0), Some(2.0)]);
        let out = downsample(&data, 500, true);
        assert_eq!(out.labels, vec!["a", ""]);
        assert_eq!(out.values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_downsample_zero_cap_still_plots_one_point() {
        let out = downsample(&series(10), 0, false);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_heat_color_is_monotonic() {
        let low = heat_color(0.0);
        let mid = heat_color(0.5);
        let high = heat_color(1.0);
        assert_eq!(low, Color::rgb(255, 0, 150));
        assert_eq!(high, Color::rgb(0, 255, 150));
        assert!(low.r > mid.r && mid.r > high.r);
        assert!(low.g < mid.g && mid.g < high.g);
    }
}
