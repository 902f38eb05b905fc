use ndarray::{ArrayBase, ArrayView1, ArrayView2, Axis, Data, Dimension, Ix1, Ix2};

use crate::error::ShapeOrTypeError;


/// This function checks that a feature matrix is a two-dimensional array and,
/// when the model has fixed its feature dimensionality, that it has exactly
/// `n_features` columns. On success, it returns a two-dimensional view of `X`.
pub fn check_input<F, S, D>(
    X: &ArrayBase<S, D>,
    n_features: Option<usize>,
) -> Result<ArrayView2<'_, F>, ShapeOrTypeError>
where
    S: Data<Elem = F>,
    D: Dimension,
{
    if X.ndim() != 2 {
        return Err(ShapeOrTypeError::InputRank(X.ndim()));
    }
    let X = X
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| ShapeOrTypeError::InputRank(X.ndim()))?;

    if let Some(expected) = n_features {
        let found = X.len_of(Axis(1));
        if found != expected {
            return Err(ShapeOrTypeError::FeatureCount { expected, found });
        }
    }
    Ok(X)
}

/// This function checks that a target is a one-dimensional array. Its length
/// is not compared to the number of samples of the feature matrix: concrete
/// estimators are responsible for that check.
pub fn check_target<F, S, D>(t: &ArrayBase<S, D>) -> Result<ArrayView1<'_, F>, ShapeOrTypeError>
where
    S: Data<Elem = F>,
    D: Dimension,
{
    if t.ndim() != 1 {
        return Err(ShapeOrTypeError::TargetRank(t.ndim()));
    }
    t.view()
        .into_dimensionality::<Ix1>()
        .map_err(|_| ShapeOrTypeError::TargetRank(t.ndim()))
}
