/// Output curve of a single rule after implication
#[derive(Clone, Debug, PartialEq)]
pub struct Activation<K> {
    pub(crate) consequence: K,
    pub(crate) strength: f64,
    pub(crate) membership: Vec<f64>,
}

impl<K: Copy> Activation<K> {
    pub fn consequence(&self) -> K {
        self.consequence
    }

    /// Firing strength of the rule premise
    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn membership(&self) -> &[f64] {
        &self.membership
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outputs<K> {
    activations: Vec<Activation<K>>,
    aggregated: Vec<f64>,
    crisp: f64,
    crisp_membership: f64,
}

impl<K> Outputs<K> {
    pub(crate) fn new(activations: Vec<Activation<K>>, aggregated: Vec<f64>, crisp: f64, crisp_membership: f64) -> Self {
        Self { activations, aggregated, crisp, crisp_membership }
    }

    /// Rule outputs in rule order
    pub fn activations(&self) -> &[Activation<K>] {
        &self.activations
    }

    pub fn aggregated_membership(&self) -> &[f64] {
        &self.aggregated
    }

    pub fn defuzzificated(&self) -> f64 {
        self.crisp
    }

    /// Height of the aggregated membership at the defuzzificated value
    pub fn defuzzificated_membership(&self) -> f64 {
        self.crisp_membership
    }
}
