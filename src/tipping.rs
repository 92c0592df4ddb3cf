use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::inference::MamdaniInference;
use crate::membership::Shape;
use crate::outputs::Outputs;
use crate::report::{RuleReport, TipReport, VariableReport};
use crate::rules::Rules;
use crate::terms::{Key, Terms};
use crate::variable::{Universe, Variable};

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Food {
    Rancid,
    Delicious,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Service {
    Poor,
    Good,
    Excellent,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Tip {
    Cheap,
    Average,
    Generous,
}

/// A proposition about one of the two inputs
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Quality {
    Food(Food),
    Service(Service),
}

impl From<Food> for Quality {
    fn from(f: Food) -> Self {
        Self::Food(f)
    }
}

impl From<Service> for Quality {
    fn from(s: Service) -> Self {
        Self::Service(s)
    }
}

impl fmt::Display for Food {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rancid => "rancid",
            Self::Delicious => "delicious",
        })
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Poor => "poor",
            Self::Good => "good",
            Self::Excellent => "excellent",
        })
    }
}

impl fmt::Display for Tip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cheap => "cheap",
            Self::Average => "average",
            Self::Generous => "generous",
        })
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Food(food) => write!(f, "food is {food}"),
            Self::Service(service) => write!(f, "service is {service}"),
        }
    }
}

/// The tipping problem: food and service quality on 0..=10 decide a tip
/// percentage on 0..=30.
pub struct TipSystem {
    food: Variable<Food>,
    service: Variable<Service>,
    tip: Variable<Tip>,
    rules: Rules<Quality, Tip>,
    model: MamdaniInference,
}

impl TipSystem {
    pub fn new() -> Result<Self> {
        Self::with_model(MamdaniInference::default())
    }

    pub fn with_model(model: MamdaniInference) -> Result<Self> {
        let quality = Universe::new(0. ..=10., 1.)?;

        let food = Variable::new(
            "food",
            quality.clone(),
            Terms::new()
                .with(Food::Rancid, Shape::trapezoidal(0., 0., 3., 6.)?)
                .with(Food::Delicious, Shape::trapezoidal(4., 7., 10., 10.)?),
        );
        let service = Variable::new(
            "service",
            quality,
            Terms::new()
                .with(Service::Poor, Shape::gaussian(0., 1.7)?)
                .with(Service::Good, Shape::gaussian(5., 1.7)?)
                .with(Service::Excellent, Shape::gaussian(10., 1.7)?),
        );
        let tip = Variable::new(
            "tip",
            Universe::new(0. ..=30., 1.)?,
            Terms::new()
                .with(Tip::Cheap, Shape::triangular(0., 5., 10.)?)
                .with(Tip::Average, Shape::triangular(10., 15., 20.)?)
                .with(Tip::Generous, Shape::triangular(20., 25., 30.)?),
        );

        let mut rules: Rules<Quality, Tip> = Rules::with_capacity(3);

        rules.add(service.is(Service::Poor).or(food.is(Food::Rancid)), Tip::Cheap);
        rules.add(service.is(Service::Good), Tip::Average);
        rules.add(service.is(Service::Excellent).or(food.is(Food::Delicious)), Tip::Generous);

        Ok(Self { food, service, tip, rules, model })
    }

    pub fn food(&self) -> &Variable<Food> {
        &self.food
    }

    pub fn service(&self) -> &Variable<Service> {
        &self.service
    }

    pub fn tip(&self) -> &Variable<Tip> {
        &self.tip
    }

    pub fn model(&self) -> &MamdaniInference {
        &self.model
    }

    /// Runs the whole pipeline for one pair of inputs
    pub fn infer(&self, food_quality: f64, service_quality: f64) -> Result<Outputs<Tip>> {
        let food = self.food.fuzzify(food_quality)?;
        let service = self.service.fuzzify(service_quality)?;

        debug!(
            rancid = food.get(Food::Rancid),
            delicious = food.get(Food::Delicious),
            poor = service.get(Service::Poor),
            good = service.get(Service::Good),
            excellent = service.get(Service::Excellent),
            "fuzzificated inputs"
        );

        let degree = |quality: &Quality| match *quality {
            Quality::Food(term) => food.get(term),
            Quality::Service(term) => service.get(term),
        };

        self.model.eval(&self.rules, degree, &self.tip)
    }

    pub fn compute_tip(&self, food_quality: f64, service_quality: f64) -> Result<f64> {
        Ok(self.infer(food_quality, service_quality)?.defuzzificated())
    }

    /// Like `compute_tip`, keeping every intermediate curve for display
    pub fn compute_tip_verbose(&self, food_quality: f64, service_quality: f64) -> Result<TipReport> {
        let outputs = self.infer(food_quality, service_quality)?;
        let rules = self
            .rules
            .iter()
            .zip(outputs.activations())
            .map(|(rule, activation)| RuleReport::new(rule.premise(), activation))
            .collect();

        Ok(TipReport {
            food_quality,
            service_quality,
            tip_percentage: outputs.defuzzificated(),
            tip_membership: outputs.defuzzificated_membership(),
            method: self.model.defuzzification().to_string(),
            inputs: vec![
                VariableReport::new(&self.food, Some(food_quality))?,
                VariableReport::new(&self.service, Some(service_quality))?,
            ],
            tip: VariableReport::new(&self.tip, None)?,
            rules,
            aggregated: outputs.aggregated_membership().to_vec(),
        })
    }
}

/// Tip percentage for the given food and service quality
pub fn compute_tip(food_quality: f64, service_quality: f64) -> Result<f64> {
    TipSystem::new()?.compute_tip(food_quality, service_quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FuzzyError;
    use crate::ops::DefuzzificationOp;

    #[test]
    fn test_average_food_and_service() {
        let tip = compute_tip(5., 5.).unwrap();

        assert!((10. ..=20.).contains(&tip), "{tip}");
        assert!((tip - 15.).abs() < 1e-9, "{tip}");
    }

    #[test]
    fn test_best_food_and_service() {
        let system = TipSystem::new().unwrap();
        let average = system.compute_tip(5., 5.).unwrap();
        let tip = system.compute_tip(10., 10.).unwrap();

        assert!((20. ..=30.).contains(&tip), "{tip}");
        assert!(tip > average + 5.);
    }

    #[test]
    fn test_worst_food_and_service() {
        let system = TipSystem::new().unwrap();
        let average = system.compute_tip(5., 5.).unwrap();
        let tip = system.compute_tip(0., 0.).unwrap();

        assert!((0. ..=10.).contains(&tip), "{tip}");
        assert!(tip < average - 5.);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let system = TipSystem::new().unwrap();
        let first = system.compute_tip(6.5, 9.8).unwrap();

        for _ in 0..10 {
            assert_eq!(system.compute_tip(6.5, 9.8).unwrap().to_bits(), first.to_bits());
        }
        assert_eq!(compute_tip(6.5, 9.8).unwrap().to_bits(), first.to_bits());
    }

    #[test]
    fn test_rule_strengths() {
        let outputs = TipSystem::new().unwrap().infer(5., 5.).unwrap();
        let strengths: Vec<_> = outputs.activations().iter().map(|a| (a.consequence(), a.strength())).collect();

        // rancid and delicious are both 1/3 at 5, good peaks at 5
        assert_eq!(strengths, vec![(Tip::Cheap, 1. / 3.), (Tip::Average, 1.), (Tip::Generous, 1. / 3.)]);
    }

    #[test]
    fn test_off_grid_and_out_of_range_inputs() {
        let system = TipSystem::new().unwrap();

        assert_eq!(system.compute_tip(-3., 14.).unwrap(), system.compute_tip(0., 10.).unwrap());
        assert!(matches!(system.compute_tip(f64::NAN, 5.), Err(FuzzyError::NonFiniteInput(_))));

        let tip = system.compute_tip(7.3, 2.25).unwrap();
        assert!((0. ..=30.).contains(&tip));
    }

    #[test]
    fn test_verbose_report() {
        let system = TipSystem::new().unwrap();
        let report = system.compute_tip_verbose(5., 5.).unwrap();

        assert_eq!(report.tip_percentage, system.compute_tip(5., 5.).unwrap());
        assert_eq!(report.method, "centroid");
        assert_eq!(report.inputs.len(), 2);
        assert_eq!(report.inputs[0].terms.len(), 2);
        assert_eq!(report.inputs[1].terms.len(), 3);
        assert_eq!(report.tip.universe.len(), 31);
        assert_eq!(report.aggregated.len(), 31);
        assert_eq!(report.rules[0].premise, "service is poor OR food is rancid");
        assert_eq!(report.rules[1].consequence, "average");
        assert!(report.tip_membership > 0.);
    }

    #[test]
    fn test_alternative_defuzzification() {
        let model = MamdaniInference::default().with_defuzzification(DefuzzificationOp::Mom);
        let tip = TipSystem::with_model(model).unwrap().compute_tip(5., 5.).unwrap();

        assert_eq!(tip, 15.);
    }
}
