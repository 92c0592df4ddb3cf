//! Mamdani fuzzy inference over small discretized universes, and the classic
//! restaurant tipping system built on it.
//!
//! ```
//! let tip = fuzzy_tip::compute_tip(5., 5.)?;
//!
//! assert!((10. ..=20.).contains(&tip));
//! # Ok::<(), fuzzy_tip::FuzzyError>(())
//! ```

mod dsl;
mod error;
mod inference;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod present;
mod report;
mod rules;
mod terms;
mod tipping;
mod variable;

pub use dsl::Expr;
pub use error::{FuzzyError, Result};
pub use inference::{MamdaniInference, ZeroAggregate};
pub use math::interp_membership;
pub use membership::{gaussmf, trapmf, trimf, Shape};
pub use ops::{AndOp, DefuzzificationOp, ImplicationOp, OrOp, ProductionLink};
pub use outputs::{Activation, Outputs};
pub use present::{JsonPresenter, Presenter, TextPresenter};
pub use report::{RuleReport, TermReport, TipReport, VariableReport};
pub use rules::{Rule, Rules};
pub use terms::{Key, Membership, Terms};
pub use tipping::{compute_tip, Food, Quality, Service, Tip, TipSystem};
pub use variable::{Degrees, Universe, Variable};
