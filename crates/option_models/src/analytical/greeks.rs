//! Greek sensitivities bundle.

/// First and second order Greeks of one contract snapshot.
///
/// Vega, Rho, Epsilon, Theta, Veta, Vomma, Vera and Ultima are per 1%;
/// every other field is per unit. Produced by
/// [`BlackScholesEngine::greeks`](super::BlackScholesEngine::greeks).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// Δ·S/V
    pub lambda: f64,
    /// −∂V/∂T
    pub theta: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂r
    pub rho: f64,
    /// ∂V/∂g
    pub epsilon: f64,
    /// −∂Δ/∂T
    pub charm: f64,
    /// ∂Δ/∂σ
    pub vanna: f64,
    /// −∂Vega/∂T
    pub veta: f64,
    /// ∂Vega/∂σ
    pub vomma: f64,
    /// ∂Rho/∂σ
    pub vera: f64,
    /// ∂Γ/∂S
    pub speed: f64,
    /// −∂Γ/∂T
    pub color: f64,
    /// ∂Γ/∂σ
    pub zomma: f64,
    /// ∂Vomma/∂σ
    pub ultima: f64,
}

impl Greeks {
    /// Named values in display order, first order then second order.
    pub fn entries(&self) -> [(&'static str, f64); 16] {
        [
            ("delta", self.delta),
            ("gamma", self.gamma),
            ("lambda", self.lambda),
            ("theta", self.theta),
            ("vega", self.vega),
            ("rho", self.rho),
            ("epsilon", self.epsilon),
            ("charm", self.charm),
            ("vanna", self.vanna),
            ("veta", self.veta),
            ("vomma", self.vomma),
            ("vera", self.vera),
            ("speed", self.speed),
            ("color", self.color),
            ("zomma", self.zomma),
            ("ultima", self.ultima),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_order_and_values() {
        let g = Greeks {
            delta: 0.5,
            ultima: -1.0,
            ..Greeks::default()
        };
        let entries = g.entries();
        assert_eq!(entries[0], ("delta", 0.5));
        assert_eq!(entries[15], ("ultima", -1.0));
        assert!(entries[1..15].iter().all(|(_, v)| *v == 0.0));
    }
}
