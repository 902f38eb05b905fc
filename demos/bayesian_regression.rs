extern crate bayesreg;

use bayesreg::{
    estimators::{BayesianRegression, LinearRegression, RidgeRegression},
    helpers::test_helpers::generate_random_data,
    Dispatch, Options, Regressor,
};

fn main() {
    let (x, true_w, t) = generate_random_data(100, 5, 0.3);

    // Maximum likelihood
    let mut linear = LinearRegression::new();
    linear.ml(&x, &t).unwrap();
    println!("ML coefficients: {}", linear.coefficients().unwrap());

    // Maximum a posteriori
    let mut ridge = RidgeRegression::new(RidgeRegression::params().alpha(10.)).unwrap();
    ridge.map(&x, &t).unwrap();
    println!("MAP coefficients: {}", ridge.coefficients().unwrap());

    // Evidence maximization
    let params = BayesianRegression::params().verbose(true);
    let mut bayesian = BayesianRegression::new(params).unwrap();
    let options = Options::new().with("max_iterations", 50);
    bayesian.empirical_bayes(&x, &t, &options).unwrap();
    println!(
        "Posterior mean: {}, alpha: {:.4}, beta: {:.4}",
        bayesian.posterior_mean().unwrap(),
        bayesian.alpha(),
        bayesian.beta()
    );
    println!("True coefficients: {}", true_w);

    let std = bayesian.predictive_std(&x).unwrap();
    println!("Mean predictive std: {:.4}", std.mean().unwrap());

    // Unsupported capabilities fail before touching the model
    match linear.bayes(&x, &t) {
        Err(err) => println!("LinearRegression {}: {}", linear.capabilities(), err),
        Ok(_) => unreachable!(),
    }
}
