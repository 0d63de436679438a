//! Robust point estimates and the log-log scaling fit

use std::cmp::Ordering;

/// Position of the median in a list of `len` sorted values
pub fn median_index(len: usize) -> usize {
    len / 2
}

/// Middle element of the sorted values
///
/// Missing values sort after every present value (worst case), so they shift
/// the median upwards instead of being dropped from the count. Even-length
/// inputs take the upper middle element.
pub fn median_of<T>(values: impl IntoIterator<Item = Option<T>>) -> Option<T>
where
    T: PartialOrd + Copy,
{
    let mut values: Vec<Option<T>> = values.into_iter().collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    values[median_index(values.len())]
}

/// Median of the present values, averaging the two middle ones
///
/// Used across configurations of one sample, where a failed size should not
/// hide the sizes that did run. Non-finite values are dropped too.
pub fn present_median(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let mut present: Vec<f64> = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = present.len() / 2;
    if present.len() % 2 == 0 {
        Some((present[mid - 1] + present[mid]) / 2.0)
    } else {
        Some(present[mid])
    }
}

/// Ordinary least squares slope of log(time) on log(size)
///
/// Only points with a positive size and a finite positive time take part.
/// Fewer than two such points, or all points at one size, leave the slope
/// undefined.
pub fn fit_scaling_exponent(points: &[(u64, Option<f64>)]) -> Option<f64> {
    let logs: Vec<(f64, f64)> = points
        .iter()
        .filter_map(|(size, time)| match time {
            Some(t) if *size > 0 && t.is_finite() && *t > 0.0 => {
                Some(((*size as f64).ln(), t.ln()))
            }
            _ => None,
        })
        .collect();

    if logs.len() < 2 {
        return None;
    }

    let n = logs.len() as f64;
    let mean_x = logs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = logs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let sxx: f64 = logs.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    let sxy: f64 = logs
        .iter()
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();

    if sxx == 0.0 {
        return None;
    }
    Some(sxy / sxx)
}
