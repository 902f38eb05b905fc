
/// This module contains the dense linear algebra routines used by the
/// reference estimators. We made the choice not to use a LAPACK binding since
/// it introduces unsafe code and a significantly larger bundle size, and the
/// systems solved here are of the size of the feature dimension.
pub mod linalg {
    use crate::Float;
    use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};

    /// This function returns the index of the row holding the largest pivot
    /// candidate in column `col`, searching from row `col` downwards.
    fn pivot_row<F: Float>(system: &Array2<F>, col: usize) -> usize {
        let mut best = col;
        for i in (col + 1)..system.nrows() {
            let candidate = num_traits::Float::abs(system[[i, col]]);
            if candidate > num_traits::Float::abs(system[[best, col]]) {
                best = i;
            }
        }
        best
    }

    /// This function reduces an augmented system `[A | B]` to `[I | A^-1 B]`
    /// with Gauss-Jordan elimination and partial pivoting. A pivot is deemed
    /// null relative to the largest entry of `A`, so that the outcome does not
    /// depend on the scale of the system.
    fn gauss_jordan<F: 'static + Float>(system: &mut Array2<F>) -> Result<(), &'static str> {
        let size = system.nrows();
        let width = system.ncols();
        let max_abs = system
            .slice(s![.., ..size])
            .fold(F::zero(), |acc, &x| {
                num_traits::Float::max(acc, num_traits::Float::abs(x))
            });
        let eps = max_abs * F::epsilon() * F::cast(size.max(1));

        for col in 0..size {
            let best = pivot_row(system, col);
            if num_traits::Float::abs(system[[best, col]]) <= eps {
                return Err("Infinitely many solutions or singular matrix");
            }
            if best != col {
                for k in 0..width {
                    system.swap([col, k], [best, k]);
                }
            }

            let pivot = system[[col, col]];
            system.row_mut(col).mapv_inplace(|x| x / pivot);

            for i in 0..size {
                if i == col {
                    continue;
                }
                let factor = system[[i, col]];
                if factor == F::zero() {
                    continue;
                }
                for k in col..width {
                    let delta = factor * system[[col, k]];
                    system[[i, k]] -= delta;
                }
            }
        }
        Ok(())
    }

    /// This function solves the linear system `A x = b` using Gaussian
    /// elimination with partial pivoting.
    pub fn solve_lin_sys<F: 'static + Float>(
        A: ArrayView2<F>,
        b: ArrayView1<F>,
    ) -> Result<Array1<F>, &'static str> {
        let size = b.len();
        if A.nrows() != size || A.ncols() != size {
            return Err("Dimension mismatch in linear system");
        }

        // Concatenation
        let mut system = Array2::<F>::zeros((size, size + 1));
        for i in 0..size {
            for j in 0..(size + 1) {
                system[[i, j]] = if j == size { b[i] } else { A[[i, j]] };
            }
        }

        gauss_jordan(&mut system)?;
        Ok(system.column(size).to_owned())
    }

    /// This function computes the inverse of a square matrix.
    pub fn invert<F: 'static + Float>(A: ArrayView2<F>) -> Result<Array2<F>, &'static str> {
        let size = A.nrows();
        if A.ncols() != size {
            return Err("Cannot invert a non-square matrix");
        }

        let mut system = Array2::<F>::zeros((size, 2 * size));
        for i in 0..size {
            for j in 0..size {
                system[[i, j]] = A[[i, j]];
            }
            system[[i, size + i]] = F::one();
        }

        gauss_jordan(&mut system)?;
        Ok(system.slice(s![.., size..]).to_owned())
    }

    /// This function computes the lower-triangular Cholesky factor `L` of a
    /// symmetric positive-definite matrix, such that `A = L L^T`.
    pub fn cholesky<F: 'static + Float>(A: ArrayView2<F>) -> Result<Array2<F>, &'static str> {
        let size = A.nrows();
        if A.ncols() != size {
            return Err("Cholesky factorization requires a square matrix");
        }

        let mut L = Array2::<F>::zeros((size, size));
        for j in 0..size {
            let mut diag = A[[j, j]];
            for k in 0..j {
                diag -= L[[j, k]].powi(2);
            }
            if diag <= F::zero() {
                return Err("Matrix is not positive definite");
            }
            L[[j, j]] = diag.sqrt();

            for i in (j + 1)..size {
                let mut value = A[[i, j]];
                for k in 0..j {
                    value -= L[[i, k]] * L[[j, k]];
                }
                L[[i, j]] = value / L[[j, j]];
            }
        }
        Ok(L)
    }
}

/// This module contains helpers functions to efficiently write tests.
pub mod test_helpers {
    use crate::Float;
    use approx::AbsDiffEq;
    use ndarray::prelude::*;
    use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    pub fn assert_array_all_close<F>(x: ArrayView1<F>, y: ArrayView1<F>, delta: F)
    where
        F: Float + AbsDiffEq<Epsilon = F>,
    {
        assert_eq!(x.len(), y.len());
        for i in 0..x.len() {
            if x[i].abs_diff_ne(&y[i], delta) {
                panic!("x: {}, y: {} ; with precision level {}", x[i], y[i], delta);
            }
        }
    }

    pub fn assert_array2d_all_close<F>(x: ArrayView2<F>, y: ArrayView2<F>, delta: F)
    where
        F: Float + AbsDiffEq<Epsilon = F>,
    {
        assert_eq!(x.shape()[0], y.shape()[0]);
        assert_eq!(x.shape()[1], y.shape()[1]);
        for i in 0..x.shape()[0] {
            for j in 0..x.shape()[1] {
                if x[[i, j]].abs_diff_ne(&y[[i, j]], delta) {
                    panic!(
                        "x: {}, y: {} ; with precision level {}",
                        x[[i, j]],
                        y[[i, j]],
                        delta
                    );
                }
            }
        }
    }

    pub fn fill_random_vector(capacity: usize, seed: u64) -> Vec<f64> {
        let mut r = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0., 1.).unwrap();

        let mut data_x: Vec<f64> = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            data_x.push(normal.sample(&mut r));
        }
        data_x
    }

    /// Generates a design matrix, the true weights and targets `X w + noise`,
    /// where the noise has standard deviation `noise_std`.
    pub fn generate_random_data(
        n_samples: usize,
        n_features: usize,
        noise_std: f64,
    ) -> (Array2<f64>, Array1<f64>, Array1<f64>) {
        let data_x = fill_random_vector(n_samples * n_features, 42);
        let data_w = fill_random_vector(n_features, 43);
        let data_e = fill_random_vector(n_samples, 44);
        let X = Array2::from_shape_vec((n_samples, n_features).f(), data_x).unwrap();
        let true_w = Array1::from_shape_vec(n_features, data_w).unwrap();
        let noise = Array1::from_shape_vec(n_samples, data_e).unwrap() * noise_std;
        let t = X.dot(&true_w) + noise;

        (X, true_w, t)
    }
}
