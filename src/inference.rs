use std::fmt;

use tracing::{debug, warn};

use crate::error::{FuzzyError, Result};
use crate::math::interp;
use crate::ops::*;
use crate::outputs::{Activation, Outputs};
use crate::rules::Rules;
use crate::terms::Key;
use crate::variable::Variable;

/// What to do when every rule output is zero and the aggregated membership
/// has no area to defuzzificate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ZeroAggregate {
    /// Fall back to the middle of the output universe
    #[default]
    Midpoint,
    /// Report `FuzzyError::DegenerateAggregate`
    Error,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MamdaniInference {
    and_op: AndOp,
    or_op: OrOp,
    imp_op: ImplicationOp,
    prod_link: ProductionLink,
    defuzz_op: DefuzzificationOp,
    zero_aggregate: ZeroAggregate,
}

impl MamdaniInference {
    pub fn new(
        and_op: AndOp,
        or_op: OrOp,
        imp_op: ImplicationOp,
        prod_link: ProductionLink,
        defuzz_op: DefuzzificationOp,
    ) -> Self {
        Self { and_op, or_op, imp_op, prod_link, defuzz_op, zero_aggregate: ZeroAggregate::default() }
    }

    pub fn with_defuzzification(self, defuzz_op: DefuzzificationOp) -> Self {
        Self { defuzz_op, ..self }
    }

    pub fn with_zero_aggregate(self, zero_aggregate: ZeroAggregate) -> Self {
        Self { zero_aggregate, ..self }
    }

    pub fn defuzzification(&self) -> DefuzzificationOp {
        self.defuzz_op
    }

    /// Evaluates `rules` against the fuzzified inputs and defuzzificates the result
    /// over `output`.
    ///
    /// `degree` returns the membership degree of an input proposition.
    pub fn eval<T, K>(&self, rules: &Rules<T, K>, degree: impl Fn(&T) -> f64, output: &Variable<K>) -> Result<Outputs<K>>
    where
        K: Key + fmt::Debug,
    {
        let universe = output.universe().points();

        // Compute Fuzzy Implication
        let mut activations = Vec::with_capacity(rules.len());

        for rule in rules.iter() {
            let strength = rule.premise.eval(&degree, self.and_op, self.or_op);
            let consequence = output.membership(rule.consequence)?;

            debug!(variable = output.name(), term = ?rule.consequence, strength, "rule fired");

            activations.push(Activation {
                consequence: rule.consequence,
                strength,
                membership: self.imp_op.call(strength, consequence.values()),
            });
        }

        // Aggregate Collected Memberships
        // Start from the first rule output: a zero curve absorbs min and prod
        let mut memberships = activations.iter().map(|activation| activation.membership.iter().copied());
        let aggregated = match memberships.next() {
            Some(first) => memberships.fold(first.collect(), |aggregated: Vec<f64>, membership| {
                self.prod_link.call(aggregated, membership).collect()
            }),
            None => vec![0.; universe.len()],
        };

        // Defuzzificate
        let crisp = match self.defuzz_op.call(universe, &aggregated) {
            Ok(crisp) => crisp,
            Err(FuzzyError::DegenerateAggregate) if self.zero_aggregate == ZeroAggregate::Midpoint => {
                let midpoint = output.universe().midpoint();

                warn!(variable = output.name(), midpoint, "no rule fired, using the universe midpoint");

                midpoint
            },
            Err(err) => return Err(err),
        };
        let crisp_membership = interp(crisp, universe, &aggregated);

        debug!(variable = output.name(), method = %self.defuzz_op, crisp, "defuzzificated");

        Ok(Outputs::new(activations, aggregated, crisp, crisp_membership))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::Expr;
    use crate::membership::Shape;
    use crate::terms::Terms;
    use crate::variable::Universe;

    #[derive(Clone, Copy, Debug, Eq, PartialEq, Key)]
    enum Level {
        Low,
        High,
    }

    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum Input {
        Cold,
        Hot,
    }

    fn fan() -> (Variable<Level>, Rules<Input, Level>) {
        let terms = Terms::new()
            .with(Level::Low, Shape::triangular(0., 0., 5.).unwrap())
            .with(Level::High, Shape::triangular(5., 10., 10.).unwrap());
        let fan = Variable::new("fan", Universe::new(0. ..=10., 1.).unwrap(), terms);
        let mut rules = Rules::with_capacity(2);

        rules.add(Expr::Is(Input::Cold), Level::Low);
        rules.add(Expr::Is(Input::Hot), Level::High);

        (fan, rules)
    }

    #[test]
    fn test_eval_clips_and_aggregates() {
        let (fan, rules) = fan();
        let degree = |input: &Input| match input {
            Input::Cold => 0.2,
            Input::Hot => 0.6,
        };
        let outputs = MamdaniInference::default().eval(&rules, degree, &fan).unwrap();
        let [low, high] = outputs.activations() else { panic!("expected two activations") };

        assert_eq!(low.strength(), 0.2);
        assert_eq!(low.membership()[..6], [0.2, 0.2, 0.2, 0.2, 0.2, 0.]);
        assert_eq!(high.membership()[5..], [0., 0.2, 0.4, 0.6, 0.6, 0.6]);

        for (i, value) in outputs.aggregated_membership().iter().enumerate() {
            assert_eq!(*value, f64::max(low.membership()[i], high.membership()[i]));
        }

        assert!(outputs.defuzzificated() > 5.);
    }

    #[test]
    fn test_zero_aggregate_policy() {
        let (fan, rules) = fan();
        let model = MamdaniInference::default();
        let outputs = model.eval(&rules, |_| 0., &fan).unwrap();

        assert_eq!(outputs.defuzzificated(), 5.);
        assert_eq!(outputs.defuzzificated_membership(), 0.);
        assert!(outputs.aggregated_membership().iter().all(|m| *m == 0.));

        let strict = model.with_zero_aggregate(ZeroAggregate::Error);

        assert_eq!(strict.eval(&rules, |_| 0., &fan), Err(FuzzyError::DegenerateAggregate));
    }

    #[test]
    fn test_scaling_implication() {
        let (fan, rules) = fan();
        let model = MamdaniInference::new(
            AndOp::Min,
            OrOp::Max,
            ImplicationOp::Scale,
            ProductionLink::Max,
            DefuzzificationOp::Centroid,
        );
        let outputs = model.eval(&rules, |_| 0.5, &fan).unwrap();

        assert_eq!(outputs.activations()[0].membership()[..3], [0.5, 0.4, 0.3]);
        // Both rules fire equally over mirrored shapes
        assert!((outputs.defuzzificated() - 5.).abs() < 1e-12);
    }

    #[test]
    fn test_non_max_production_links() {
        let terms = Terms::new()
            .with(Level::Low, Shape::triangular(0., 0., 10.).unwrap())
            .with(Level::High, Shape::triangular(0., 10., 10.).unwrap());
        let (_, rules) = fan();
        let fan = Variable::new("fan", Universe::new(0. ..=10., 1.).unwrap(), terms);

        for prod_link in [ProductionLink::Min, ProductionLink::Prod] {
            let model =
                MamdaniInference::new(AndOp::Min, OrOp::Max, ImplicationOp::Clip, prod_link, DefuzzificationOp::Centroid)
                    .with_zero_aggregate(ZeroAggregate::Error);
            let outputs = model.eval(&rules, |_| 1., &fan).unwrap();
            let [low, high] = outputs.activations() else { panic!("expected two activations") };

            for (i, value) in outputs.aggregated_membership().iter().enumerate() {
                assert_eq!(*value, prod_link.apply(low.membership()[i], high.membership()[i]));
            }

            assert!(outputs.aggregated_membership()[5] > 0.);
            assert!((outputs.defuzzificated() - 5.).abs() < 1e-12, "{prod_link:?}");
        }
    }

    #[test]
    fn test_single_rule_aggregate_is_its_output() {
        let (fan, _) = fan();
        let mut rules = Rules::new();

        rules.add(Expr::Is(Input::Hot), Level::High);

        let model = MamdaniInference::default().with_zero_aggregate(ZeroAggregate::Error);
        let outputs = model.eval(&rules, |_| 0.6, &fan).unwrap();

        assert_eq!(outputs.aggregated_membership(), outputs.activations()[0].membership());
    }

    #[test]
    fn test_missing_consequence_term() {
        let terms = Terms::new().with(Level::Low, Shape::triangular(0., 0., 5.).unwrap());
        let fan = Variable::new("fan", Universe::new(0. ..=10., 1.).unwrap(), terms);
        let mut rules = Rules::new();

        rules.add(Expr::Is(Input::Hot), Level::High);

        assert_eq!(
            MamdaniInference::default().eval(&rules, |_| 1., &fan),
            Err(FuzzyError::MissingTerm("fan.High".into()))
        );
    }
}
