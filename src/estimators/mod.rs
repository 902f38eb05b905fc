//! Reference regressors of the toolkit.
//!
//! Each model implements the capabilities it supports and records the feature
//! dimensionality of its first successful estimation, after which inputs with
//! a different number of columns are rejected by the dispatch layer.

#[cfg(test)]
mod tests;

pub mod bayesian;
pub mod estimators;
pub mod hyperparams;
pub mod param_guard;

pub use bayesian::BayesianRegression;
pub use estimators::{LinearRegression, RidgeRegression};
pub use hyperparams::{BayesianParams, BayesianValidParams, RidgeParams, RidgeValidParams};
pub use param_guard::ParamGuard;
