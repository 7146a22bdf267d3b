#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_value: f64,
    pub r_squared: f64,
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sum = 0f64;
    for &v in values {
        sum += v;
    }
    sum / values.len() as f64
}

pub fn min_f64(values: &[f64]) -> f64 {
    let mut min = f64::INFINITY;
    for &v in values {
        if v < min {
            min = v;
        }
    }
    if min.is_finite() { min } else { 0.0 }
}

pub fn max_f64(values: &[f64]) -> f64 {
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if v > max {
            max = v;
        }
    }
    if max.is_finite() { max } else { 0.0 }
}

/// Mean of the `n` smallest values (all of them when fewer than `n`).
pub fn mean_of_lowest(values: &[f64], n: usize) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let k = n.min(sorted.len());
    mean(&sorted[..k])
}

/// Ordinary least squares of `ys` on `xs` from the running sums of x, y, xy, x², y².
///
/// Returns `None` with fewer than two points or when every `x` is the same.
/// A constant `ys` series yields a flat fit with `r_value = 0`.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }

    let mut sx = 0f64;
    let mut sy = 0f64;
    let mut sxy = 0f64;
    let mut sxx = 0f64;
    let mut syy = 0f64;
    for i in 0..n {
        let (x, y) = (xs[i], ys[i]);
        sx += x;
        sy += y;
        sxy += x * y;
        sxx += x * x;
        syy += y * y;
    }

    let nf = n as f64;
    let cov = nf * sxy - sx * sy;
    let var_x = nf * sxx - sx * sx;
    let var_y = nf * syy - sy * sy;
    if var_x <= 0.0 {
        return None;
    }

    let constant_y = ys[..n].iter().all(|&y| y == ys[0]);
    let (slope, r_value) = if constant_y || var_y <= 0.0 {
        (0.0, 0.0)
    } else {
        let r = cov / (var_x * var_y).sqrt();
        (cov / var_x, r.clamp(-1.0, 1.0))
    };
    let intercept = (sy - slope * sx) / nf;

    Some(LinearFit {
        slope,
        intercept,
        r_value,
        r_squared: r_value * r_value,
    })
}

#[cfg(test)]
#[path = "../tests/src_inline/stats.rs"]
mod tests;
