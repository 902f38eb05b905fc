#![allow(non_snake_case)]

use ndarray::ScalarOperand;

use num_traits::{AsPrimitive, FromPrimitive, NumAssignOps, NumCast, Signed};

use std::cmp::PartialOrd;
use std::fmt;
use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

/// Float point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point
/// number and implement them for 32bit and 64bit float points. Every feature
/// matrix and target vector handled by a regressor holds elements of this type,
/// which is how the "numeric array" part of the input contract is enforced.
/// Ref: https://github.com/rust-ml/linfa/blob/master/src/dataset/mod.rs#L36
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + AsPrimitive<usize>
    + for<'a> AddAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

pub mod capability;
pub mod error;
pub mod estimators;
pub mod helpers;
pub mod options;
pub mod regressor;
pub mod validation;

pub use capability::{Capabilities, Capability};
pub use error::{CapabilityError, EstimatorError, RegressorError, Result, ShapeOrTypeError};
pub use options::Options;
pub use regressor::{
    Bayesian, Dispatch, EmpiricalBayes, MaximumAPosteriori, MaximumLikelihood, Predict, Regressor,
};
