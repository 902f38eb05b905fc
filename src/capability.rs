use std::fmt;

/// An estimation or prediction mode a regressor may or may not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    /// Maximum likelihood estimation of the parameters
    Ml,
    /// Maximum a posteriori estimation of the parameters
    Map,
    /// Full Bayesian estimation of the posterior distribution
    Bayes,
    /// Empirical Bayes estimation of the hyperparameters, also known as
    /// evidence approximation or type 2 maximum likelihood
    EmpiricalBayes,
    /// Prediction of the outputs of a fitted model
    Predict,
}

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::Ml,
        Capability::Map,
        Capability::Bayes,
        Capability::EmpiricalBayes,
        Capability::Predict,
    ];

    /// Name of the operation dispatching to this capability.
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Ml => "ml",
            Capability::Map => "map",
            Capability::Bayes => "bayes",
            Capability::EmpiricalBayes => "empirical_bayes",
            Capability::Predict => "predict",
        }
    }

    fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability descriptor
///
/// The set of capabilities a regressor exposes. It is built from the
/// capability accessors of [`Regressor`](crate::regressor::Regressor), so it
/// always agrees with what dispatch will find.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Capabilities(u8);

impl Capabilities {
    /// The empty descriptor.
    pub fn none() -> Self {
        Capabilities(0)
    }

    pub fn with(mut self, capability: Capability) -> Self {
        self.insert(capability);
        self
    }

    pub fn insert(&mut self, capability: Capability) {
        self.0 |= capability.bit();
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates over the supported capabilities in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL
            .into_iter()
            .filter(move |capability| self.contains(*capability))
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Capabilities::none(), |caps, capability| caps.with(capability))
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|capability| capability.name()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
