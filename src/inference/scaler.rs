use ndarray::{Array2, Axis};

/// Min-max scaling with a single min/max taken over the whole matrix.
///
/// For a one-row matrix the range is that row's own values, so a feature
/// normalizes relative to the other features of the same player. When every
/// value is equal the denominator falls back to 1.0 and the result is all zeros.
pub fn min_max_global(matrix: &Array2<f64>) -> Array2<f64> {
    if matrix.is_empty() {
        return matrix.clone();
    }

    let min = matrix.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = matrix.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let denom = range_or_one(min, max);

    matrix.mapv(|x| (x - min) / denom)
}

/// Min-max scaling fitted independently on every column.
///
/// Constant columns scale to zero.
pub fn min_max_per_column(matrix: &Array2<f64>) -> Array2<f64> {
    let mut scaled = matrix.clone();

    for mut column in scaled.axis_iter_mut(Axis(1)) {
        let min = column.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = column.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let denom = range_or_one(min, max);
        column.mapv_inplace(|x| (x - min) / denom);
    }

    scaled
}

fn range_or_one(min: f64, max: f64) -> f64 {
    if max != min {
        max - min
    } else {
        1.0
    }
}
