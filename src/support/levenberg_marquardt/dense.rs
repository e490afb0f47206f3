/// Solves the square system `A·x = b` by Gaussian elimination with partial
/// pivoting.
///
/// Returns `None` if a pivot is negligible relative to the largest entry of
/// `A`, or if the solution is not finite.
pub(super) fn solve_dense<const N: usize>(mut a: [[f64; N]; N], mut b: [f64; N]) -> Option<[f64; N]> {
    let scale = a
        .iter()
        .flatten()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if !scale.is_finite() || scale == 0.0 {
        return None;
    }
    let tiny = scale * 1e-14;

    for col in 0..N {
        let pivot_row = (col..N)
            .max_by(|&r, &s| a[r][col].abs().total_cmp(&a[s][col].abs()))
            .unwrap_or(col);
        if a[pivot_row][col].abs() <= tiny {
            return None;
        }

        a.swap(pivot_row, col);
        b.swap(pivot_row, col);

        let pivot = a[col][col];
        for r in (col + 1)..N {
            let factor = a[r][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            a[r][col] = 0.0;
            for c in (col + 1)..N {
                a[r][c] -= factor * a[col][c];
            }
            b[r] -= factor * b[col];
        }
    }

    let mut x = [0.0; N];
    for i in (0..N).rev() {
        let rhs = b[i] - ((i + 1)..N).map(|j| a[i][j] * x[j]).sum::<f64>();
        x[i] = rhs / a[i][i];
    }

    x.iter().all(|xi| xi.is_finite()).then_some(x)
}
