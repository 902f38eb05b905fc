use approx::assert_relative_eq;
use ndarray::{array, s, Array1, Array2};

use super::*;
use crate::capability::Capability;
use crate::error::{EstimatorError, RegressorError, ShapeOrTypeError};
use crate::helpers::test_helpers::{
    assert_array2d_all_close, assert_array_all_close, generate_random_data,
};
use crate::options::Options;
use crate::regressor::{Dispatch, Regressor};

#[test]
fn test_linear_regression_recovers_coefficients() {
    let (X, true_w, t) = generate_random_data(20, 3, 0.);
    let mut model = LinearRegression::new();
    model.ml(&X, &t).unwrap();

    assert_array_all_close(model.coefficients().unwrap(), true_w.view(), 1e-8);
    assert_relative_eq!(model.variance().unwrap(), 0., epsilon = 1e-12);

    let y = model.predict(&X, &Options::new()).unwrap();
    assert_array_all_close(y.view(), t.view(), 1e-8);
}

#[test]
fn test_linear_regression_noise_variance() {
    let (X, _, t) = generate_random_data(500, 2, 0.5);
    let mut model = LinearRegression::new();
    model.ml(&X, &t).unwrap();

    let variance = model.variance().unwrap();
    assert!(variance > 0.15 && variance < 0.35, "variance {}", variance);
}

#[test]
fn test_linear_regression_f32() {
    let X = array![[1f32, 0.], [0., 1.], [1., 1.]];
    let t = array![1f32, 2., 3.];
    let mut model = LinearRegression::<f32>::new();
    model.ml(&X, &t).unwrap();
    assert_array_all_close(model.coefficients().unwrap(), array![1f32, 2.].view(), 1e-5);
}

#[test]
fn test_linear_regression_capabilities() {
    let mut model = LinearRegression::<f64>::new();
    let capabilities = model.capabilities();
    assert_eq!(capabilities.len(), 2);
    assert!(capabilities.contains(Capability::Ml));
    assert!(capabilities.contains(Capability::Predict));

    let (X, _, t) = generate_random_data(10, 3, 0.1);
    assert_eq!(model.map(&X, &t).unwrap_err().to_string(), "map unsupported");
    assert_eq!(model.bayes(&X, &t).unwrap_err().to_string(), "bayes unsupported");
    assert!(model.coefficients().is_none());
}

#[test]
fn test_predict_before_fit() {
    let model = LinearRegression::<f64>::new();
    let X = Array2::<f64>::zeros((4, 2));
    match model.predict(&X, &Options::new()) {
        Err(RegressorError::Estimator(EstimatorError::NotFitted)) => {}
        other => panic!("expected a not fitted error, got {:?}", other),
    }
}

#[test]
fn test_sample_size_mismatch() {
    let (X, _, t) = generate_random_data(20, 3, 0.1);
    let t = t.slice(s![..19]);

    let mut model = LinearRegression::new();
    match model.ml(&X, &t) {
        Err(RegressorError::Estimator(EstimatorError::SampleSizeMismatch {
            expected: 20,
            found: 19,
        })) => {}
        other => panic!("expected a sample size error, got {:?}", other),
    }
    assert!(model.coefficients().is_none());
    assert_eq!(model.n_features(), None);
}

#[test]
fn test_feature_count_fixed_after_fit() {
    let (X, _, t) = generate_random_data(10, 3, 0.1);
    let mut model = LinearRegression::new();
    assert_eq!(model.n_features(), None);
    model.ml(&X, &t).unwrap();
    assert_eq!(model.n_features(), Some(3));

    let X4 = Array2::<f64>::ones((10, 4));
    match model.predict(&X4, &Options::new()) {
        Err(RegressorError::ShapeOrType(ShapeOrTypeError::FeatureCount {
            expected: 3,
            found: 4,
        })) => {}
        other => panic!("expected a feature count error, got {:?}", other),
    }
    assert!(model.ml(&X4, &t).unwrap_err().is_shape_or_type());
}

#[test]
fn test_singular_design() {
    let X = array![[1., 1.], [2., 2.], [3., 3.]];
    let t = array![1., 2., 3.];
    let mut model = LinearRegression::new();
    match model.ml(&X, &t) {
        Err(RegressorError::Estimator(EstimatorError::SingularSystem(_))) => {}
        other => panic!("expected a singular system error, got {:?}", other),
    }
}

#[test]
fn test_small_scale_features() {
    let X = array![[1e-9, 0.], [0., 1e-9], [1e-9, 1e-9]];
    let t = array![1., 2., 3.];

    let mut linear = LinearRegression::new();
    linear.ml(&X, &t).unwrap();
    let w = linear.coefficients().unwrap().mapv(|w| w * 1e-9);
    assert_array_all_close(w.view(), array![1., 2.].view(), 1e-6);
    let y = linear.predict(&X, &Options::new()).unwrap();
    assert_array_all_close(y.view(), t.view(), 1e-6);

    let params = BayesianRegression::params().alpha(1e-30);
    let mut bayesian = BayesianRegression::new(params).unwrap();
    bayesian.bayes(&X, &t).unwrap();
    let mean = bayesian.posterior_mean().unwrap().mapv(|w| w * 1e-9);
    assert_array_all_close(mean.view(), array![1., 2.].view(), 1e-6);

    let X = array![[1e-4f32, 0.], [0., 1e-4], [1e-4, 1e-4]];
    let t = array![1f32, 2., 3.];
    let mut linear = LinearRegression::<f32>::new();
    linear.ml(&X, &t).unwrap();
    let w = linear.coefficients().unwrap().mapv(|w| w * 1e-4);
    assert_array_all_close(w.view(), array![1f32, 2.].view(), 1e-3);
}

#[test]
fn test_ridge_closed_form() {
    let X = array![[1.], [1.]];
    let t = array![1., 1.];
    let mut model = RidgeRegression::new(RidgeRegression::params().alpha(2.)).unwrap();
    model.map(&X, &t).unwrap();
    assert_relative_eq!(model.coefficients().unwrap()[0], 0.5, epsilon = 1e-12);
    assert_eq!(model.alpha(), 2.);
}

#[test]
fn test_ridge_without_regularization_matches_ml() {
    let (X, _, t) = generate_random_data(30, 4, 0.3);

    let mut linear = LinearRegression::new();
    linear.ml(&X, &t).unwrap();
    let mut ridge = RidgeRegression::new(RidgeRegression::params().alpha(0.)).unwrap();
    ridge.map(&X, &t).unwrap();

    assert_array_all_close(
        ridge.coefficients().unwrap(),
        linear.coefficients().unwrap(),
        1e-8,
    );
}

#[test]
fn test_ridge_shrinks_coefficients() {
    let (X, _, t) = generate_random_data(30, 4, 0.3);

    let mut linear = LinearRegression::new();
    linear.ml(&X, &t).unwrap();
    let mut ridge = RidgeRegression::new(RidgeRegression::params().alpha(50.)).unwrap();
    ridge.map(&X, &t).unwrap();

    let norm = |w: ndarray::ArrayView1<f64>| w.dot(&w);
    assert!(norm(ridge.coefficients().unwrap()) < norm(linear.coefficients().unwrap()));

    let y = ridge.predict(&X, &Options::new()).unwrap();
    assert_eq!(y.len(), 30);
    assert!(ridge.ml(&X, &t).unwrap_err().is_capability());
}

#[test]
fn test_ridge_params_validation() {
    match RidgeRegression::new(RidgeRegression::params().alpha(-1.)) {
        Err(EstimatorError::InvalidAlpha(alpha)) => assert_eq!(alpha, -1.),
        other => panic!("expected an invalid alpha error, got {:?}", other),
    }
    assert!(RidgeRegression::new(RidgeRegression::params().alpha(f64::NAN)).is_err());
    assert!(RidgeRegression::<f64>::params().check().is_ok());
    assert_eq!(RidgeRegression::params().alpha(3.).check_unwrap().alpha(), 3.);
}

#[test]
fn test_bayesian_closed_form() {
    let X = array![[1.], [1.]];
    let t = array![1., 1.];
    let mut model = BayesianRegression::new(BayesianRegression::params()).unwrap();
    model.bayes(&X, &t).unwrap();

    assert_relative_eq!(model.posterior_mean().unwrap()[0], 2. / 3., epsilon = 1e-12);
    assert_relative_eq!(
        model.posterior_covariance().unwrap()[[0, 0]],
        1. / 3.,
        epsilon = 1e-12
    );

    let std = model.predictive_std(&array![[1.], [0.]]).unwrap();
    assert_relative_eq!(std[0], (1f64 + 1. / 3.).sqrt(), epsilon = 1e-12);
    assert_relative_eq!(std[1], 1., epsilon = 1e-12);
}

#[test]
fn test_bayesian_sequential_update_matches_batch() {
    let (X, _, t) = generate_random_data(20, 3, 0.2);
    let params = BayesianRegression::params().alpha(0.5).beta(10.);

    let mut batch = BayesianRegression::new(params.clone()).unwrap();
    batch.bayes(&X, &t).unwrap();

    let mut sequential = BayesianRegression::new(params).unwrap();
    sequential
        .bayes(&X.slice(s![..10, ..]), &t.slice(s![..10]))
        .unwrap();
    sequential
        .bayes(&X.slice(s![10.., ..]), &t.slice(s![10..]))
        .unwrap();

    assert_array_all_close(
        sequential.posterior_mean().unwrap(),
        batch.posterior_mean().unwrap(),
        1e-8,
    );
    assert_array2d_all_close(
        sequential.posterior_covariance().unwrap(),
        batch.posterior_covariance().unwrap(),
        1e-8,
    );
}

#[test]
fn test_empirical_bayes_estimates_noise_precision() {
    let (X, true_w, t) = generate_random_data(200, 3, 0.1);
    let mut model = BayesianRegression::new(BayesianRegression::params()).unwrap();
    model.empirical_bayes(&X, &t, &Options::new()).unwrap();

    let beta = model.beta();
    assert!(beta > 50. && beta < 200., "beta {}", beta);
    assert!(model.alpha().is_finite() && model.alpha() > 0.);
    assert_array_all_close(model.posterior_mean().unwrap(), true_w.view(), 0.05);
}

#[test]
fn test_empirical_bayes_options() {
    let (X, _, t) = generate_random_data(50, 3, 0.1);
    let mut model = BayesianRegression::new(BayesianRegression::params()).unwrap();
    let options = Options::new().with("max_iterations", 1).with("tolerance", 0.);
    model.empirical_bayes(&X, &t, &options).unwrap();
    assert!(model.beta() > 1.);

    let mut model = BayesianRegression::new(BayesianRegression::params()).unwrap();
    let options = Options::new().with("tolerance", "small");
    match model.empirical_bayes(&X, &t, &options) {
        Err(RegressorError::Estimator(EstimatorError::InvalidOption { key, .. })) => {
            assert_eq!(key, "tolerance")
        }
        other => panic!("expected an invalid option error, got {:?}", other),
    }
    assert!(model.posterior_mean().is_none());
    assert_eq!(model.beta(), 1.);

    let options = Options::new().with("max_iterations", 0);
    assert!(model.empirical_bayes(&X, &t, &options).is_err());
}

#[test]
fn test_bayesian_sampled_prediction() {
    let (X, _, t) = generate_random_data(10, 2, 0.5);
    let mut model = BayesianRegression::new(BayesianRegression::params()).unwrap();
    model.bayes(&X, &t).unwrap();

    let options = Options::new().with("sample", true).with("seed", 7);
    let first = model.predict(&X, &options).unwrap();
    let second = model.predict(&X, &options).unwrap();
    let mean = model.predict(&X, &Options::new()).unwrap();

    assert_eq!(first, second);
    assert_ne!(first, mean);
    assert_eq!(first.len(), 10);

    let unseeded = model
        .predict(&X, &Options::new().with("sample", true))
        .unwrap();
    assert_eq!(unseeded.len(), 10);
}

#[test]
fn test_bayesian_capabilities() {
    let mut model = BayesianRegression::<f64>::new(BayesianRegression::params()).unwrap();
    let capabilities = model.capabilities();
    assert_eq!(capabilities.to_string(), "{bayes, empirical_bayes, predict}");

    let (X, _, t) = generate_random_data(10, 2, 0.5);
    assert_eq!(model.ml(&X, &t).unwrap_err().to_string(), "ml unsupported");
    assert_eq!(model.map(&X, &t).unwrap_err().to_string(), "map unsupported");
    assert!(model.posterior_mean().is_none());
    assert!(model.predictive_std(&X).is_err());
}

#[test]
fn test_bayesian_params_validation() {
    let params = BayesianRegression::<f64>::params;
    assert!(matches!(
        BayesianRegression::new(params().alpha(0.)),
        Err(EstimatorError::InvalidAlpha(_))
    ));
    assert!(matches!(
        BayesianRegression::new(params().beta(-2.)),
        Err(EstimatorError::InvalidBeta(_))
    ));
    assert!(matches!(
        BayesianRegression::new(params().tolerance(-1.)),
        Err(EstimatorError::InvalidTolerance(_))
    ));
    assert!(matches!(
        BayesianRegression::new(params().max_iterations(0)),
        Err(EstimatorError::InvalidMaxIterations(0))
    ));
}

#[test]
fn test_heterogeneous_models_behind_trait_objects() {
    let (X, _, t) = generate_random_data(15, 2, 0.2);
    let mut models: Vec<Box<dyn Regressor<f64>>> = vec![
        Box::new(LinearRegression::new()),
        Box::new(RidgeRegression::new(RidgeRegression::params()).unwrap()),
        Box::new(BayesianRegression::new(BayesianRegression::params()).unwrap()),
    ];

    for model in models.iter_mut() {
        let capabilities = model.capabilities();
        let fitted = if capabilities.contains(Capability::Ml) {
            model.ml(&X, &t)
        } else if capabilities.contains(Capability::Map) {
            model.map(&X, &t)
        } else {
            model.bayes(&X, &t)
        };
        fitted.unwrap();

        let y: Array1<f64> = model.predict(&X, &Options::new()).unwrap();
        assert_eq!(y.len(), 15);
    }
}
