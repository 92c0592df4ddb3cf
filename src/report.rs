use std::fmt;

use serde::Serialize;

use crate::dsl::Expr;
use crate::error::Result;
use crate::membership::Shape;
use crate::outputs::Activation;
use crate::terms::Key;
use crate::variable::Variable;

/// Everything computed for one pair of inputs, ready to be drawn
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TipReport {
    pub food_quality: f64,
    pub service_quality: f64,
    pub tip_percentage: f64,
    /// Aggregated membership at `tip_percentage`
    pub tip_membership: f64,
    pub method: String,
    pub inputs: Vec<VariableReport>,
    pub tip: VariableReport,
    pub rules: Vec<RuleReport>,
    pub aggregated: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VariableReport {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<f64>,
    pub universe: Vec<f64>,
    pub terms: Vec<TermReport>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TermReport {
    pub name: String,
    pub shape: Shape,
    pub membership: Vec<f64>,
    /// Degree of the variable's input in this term
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RuleReport {
    pub premise: String,
    pub consequence: String,
    pub strength: f64,
    pub membership: Vec<f64>,
}

impl VariableReport {
    pub(crate) fn new<K>(variable: &Variable<K>, input: Option<f64>) -> Result<Self>
    where
        K: Key + fmt::Debug + fmt::Display,
    {
        let terms = variable
            .terms()
            .map(|(term, membership)| -> Result<TermReport> {
                Ok(TermReport {
                    name: term.to_string(),
                    shape: *membership.shape(),
                    membership: membership.values().to_vec(),
                    degree: input.map(|x| variable.degree(term, x)).transpose()?,
                })
            })
            .collect::<Result<_>>()?;

        Ok(Self { name: variable.name(), input, universe: variable.universe().points().to_vec(), terms })
    }
}

impl RuleReport {
    pub(crate) fn new<T: fmt::Display, K: Copy + fmt::Display>(premise: &Expr<T>, activation: &Activation<K>) -> Self {
        Self {
            premise: premise.to_string(),
            consequence: activation.consequence().to_string(),
            strength: activation.strength(),
            membership: activation.membership().to_vec(),
        }
    }
}
