use ndarray::{Array1, ArrayBase, ArrayView1, ArrayView2, Data, Dimension};

use crate::capability::{Capabilities, Capability};
use crate::error::{CapabilityError, Result};
use crate::options::Options;
use crate::validation::{check_input, check_target};
use crate::Float;


/// Maximum likelihood estimation of the parameters
pub trait MaximumLikelihood<F: Float> {
    fn fit_ml(&mut self, X: ArrayView2<F>, t: ArrayView1<F>) -> Result<()>;
}

/// Maximum a posteriori estimation of the parameters
pub trait MaximumAPosteriori<F: Float> {
    fn fit_map(&mut self, X: ArrayView2<F>, t: ArrayView1<F>) -> Result<()>;
}

/// Bayesian estimation of the posterior distribution of the parameters
pub trait Bayesian<F: Float> {
    fn fit_bayes(&mut self, X: ArrayView2<F>, t: ArrayView1<F>) -> Result<()>;
}

/// Empirical Bayes estimation of the hyperparameters, aka evidence
/// approximation, type 2 maximum likelihood and generalized maximum likelihood
pub trait EmpiricalBayes<F: Float> {
    fn fit_empirical_bayes(
        &mut self,
        X: ArrayView2<F>,
        t: ArrayView1<F>,
        options: &Options,
    ) -> Result<()>;
}

/// Prediction of the outputs of a model, one per row of `X`
pub trait Predict<F: Float> {
    fn predict_values(&self, X: ArrayView2<F>, options: &Options) -> Result<Array1<F>>;
}

/// Regressor trait
///
/// Every regression model implements this trait and declares which
/// capabilities it supports by overriding the matching accessor to return
/// `Some(self)`. A model that does not override an accessor does not support
/// the capability, and the corresponding [`Dispatch`] operation fails with a
/// [`CapabilityError`].
///
/// The inputs handed to a capability implementation have already been
/// validated: `X` is two-dimensional with `n_features` columns when the model
/// reports a fixed feature count, and `t` is one-dimensional. Checking that
/// `t` has as many samples as `X` is left to the implementation.
pub trait Regressor<F: Float> {
    /// The feature dimensionality the model is bound to, if any.
    fn n_features(&self) -> Option<usize> {
        None
    }

    fn maximum_likelihood(&mut self) -> Option<&mut dyn MaximumLikelihood<F>> {
        None
    }

    fn maximum_a_posteriori(&mut self) -> Option<&mut dyn MaximumAPosteriori<F>> {
        None
    }

    fn bayesian(&mut self) -> Option<&mut dyn Bayesian<F>> {
        None
    }

    fn empirical_bayes_estimator(&mut self) -> Option<&mut dyn EmpiricalBayes<F>> {
        None
    }

    fn predictor(&self) -> Option<&dyn Predict<F>> {
        None
    }

    /// Collects the capabilities exposed by the accessors above.
    fn capabilities(&mut self) -> Capabilities {
        let mut capabilities = Capabilities::none();
        if self.maximum_likelihood().is_some() {
            capabilities.insert(Capability::Ml);
        }
        if self.maximum_a_posteriori().is_some() {
            capabilities.insert(Capability::Map);
        }
        if self.bayesian().is_some() {
            capabilities.insert(Capability::Bayes);
        }
        if self.empirical_bayes_estimator().is_some() {
            capabilities.insert(Capability::EmpiricalBayes);
        }
        if self.predictor().is_some() {
            capabilities.insert(Capability::Predict);
        }
        capabilities
    }
}

/// Dispatch trait
///
/// The five entry points shared by every [`Regressor`]. Each one validates its
/// arguments, looks the capability up, and forwards to the concrete
/// implementation. Validation and the capability check both happen before the
/// model is touched, so a failing call leaves the model unchanged.
pub trait Dispatch<F: Float>: Regressor<F> {
    /// Maximum likelihood estimation of the parameters.
    fn ml<S1, D1, S2, D2>(&mut self, X: &ArrayBase<S1, D1>, t: &ArrayBase<S2, D2>) -> Result<()>
    where
        S1: Data<Elem = F>,
        D1: Dimension,
        S2: Data<Elem = F>,
        D2: Dimension,
    {
        let X = check_input(X, self.n_features())?;
        let t = check_target(t)?;
        match self.maximum_likelihood() {
            Some(estimator) => estimator.fit_ml(X, t),
            None => Err(CapabilityError(Capability::Ml).into()),
        }
    }

    /// Maximum a posteriori estimation of the parameters.
    fn map<S1, D1, S2, D2>(&mut self, X: &ArrayBase<S1, D1>, t: &ArrayBase<S2, D2>) -> Result<()>
    where
        S1: Data<Elem = F>,
        D1: Dimension,
        S2: Data<Elem = F>,
        D2: Dimension,
    {
        let X = check_input(X, self.n_features())?;
        let t = check_target(t)?;
        match self.maximum_a_posteriori() {
            Some(estimator) => estimator.fit_map(X, t),
            None => Err(CapabilityError(Capability::Map).into()),
        }
    }

    /// Bayesian estimation of the parameters.
    fn bayes<S1, D1, S2, D2>(
        &mut self,
        X: &ArrayBase<S1, D1>,
        t: &ArrayBase<S2, D2>,
    ) -> Result<()>
    where
        S1: Data<Elem = F>,
        D1: Dimension,
        S2: Data<Elem = F>,
        D2: Dimension,
    {
        let X = check_input(X, self.n_features())?;
        let t = check_target(t)?;
        match self.bayesian() {
            Some(estimator) => estimator.fit_bayes(X, t),
            None => Err(CapabilityError(Capability::Bayes).into()),
        }
    }

    /// Empirical Bayes estimation of the hyperparameters. `options` is handed
    /// to the model untouched.
    fn empirical_bayes<S1, D1, S2, D2>(
        &mut self,
        X: &ArrayBase<S1, D1>,
        t: &ArrayBase<S2, D2>,
        options: &Options,
    ) -> Result<()>
    where
        S1: Data<Elem = F>,
        D1: Dimension,
        S2: Data<Elem = F>,
        D2: Dimension,
    {
        let X = check_input(X, self.n_features())?;
        let t = check_target(t)?;
        match self.empirical_bayes_estimator() {
            Some(estimator) => estimator.fit_empirical_bayes(X, t, options),
            None => Err(CapabilityError(Capability::EmpiricalBayes).into()),
        }
    }

    /// Predicts the output of each sample of `X`.
    fn predict<S, D>(&self, X: &ArrayBase<S, D>, options: &Options) -> Result<Array1<F>>
    where
        S: Data<Elem = F>,
        D: Dimension,
    {
        let X = check_input(X, self.n_features())?;
        match self.predictor() {
            Some(predictor) => predictor.predict_values(X, options),
            None => Err(CapabilityError(Capability::Predict).into()),
        }
    }
}

impl<F: Float, R: Regressor<F> + ?Sized> Dispatch<F> for R {}
