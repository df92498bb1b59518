// ============================================================================
// Régression linéaire (moindres carrés ordinaires)
// ============================================================================
// y = intercept + slope * x, une seule variable explicative
//
// Formules :
// - slope     = Σ(x - x̄)(y - ȳ) / Σ(x - x̄)²
// - intercept = ȳ - slope * x̄
//
// Si toutes les abscisses sont identiques (Σ(x - x̄)² = 0), la solution de
// norme minimale est une droite horizontale : slope = 0, intercept = ȳ.
// ============================================================================

use crate::error::{PredictError, Result};

/// Modèle linéaire ajusté
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegression {
    slope: f64,
    intercept: f64,
}

impl LinearRegression {
    /// Ajuste la droite sur les couples (x, y)
    ///
    /// CONCEPT RUST : slices
    /// - &[f64] accepte un Vec, un tableau ou une portion sans copie
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(PredictError::Fit(format!(
                "feature and target lengths differ ({} vs {})",
                x.len(),
                y.len()
            )));
        }
        if x.is_empty() {
            return Err(PredictError::Fit("no samples to fit".to_string()));
        }

        let n = x.len() as f64;
        let x_mean = x.iter().sum::<f64>() / n;
        let y_mean = y.iter().sum::<f64>() / n;

        let (sxy, sxx) = x
            .iter()
            .zip(y)
            .fold((0.0, 0.0), |(sxy, sxx), (&xi, &yi)| {
                let dx = xi - x_mean;
                (sxy + dx * (yi - y_mean), sxx + dx * dx)
            });

        let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
        let intercept = y_mean - slope * x_mean;

        if !slope.is_finite() || !intercept.is_finite() {
            return Err(PredictError::Fit(format!(
                "non-finite coefficients (slope={}, intercept={})",
                slope, intercept
            )));
        }

        Ok(Self { slope, intercept })
    }

    /// Évalue la droite en x
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [5.0, 7.0, 9.0, 11.0];
        let model = LinearRegression::fit(&x, &y).unwrap();

        assert!((model.slope() - 2.0).abs() < 1e-12);
        assert!((model.intercept() - 5.0).abs() < 1e-12);
        assert!((model.predict(10.0) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_noisy_line_least_squares() {
        // Calcul à la main : Σdxdy = 8.5, Σdx² = 10, x̄ = 2, ȳ = 2.9
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 2.0, 3.5, 3.5, 4.5];
        let model = LinearRegression::fit(&x, &y).unwrap();

        assert!((model.slope() - 0.85).abs() < 1e-12);
        assert!((model.intercept() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_endpoints_match_coefficients() {
        let x = [0.0, 2.0, 5.0, 9.0];
        let y = [3.0, 4.5, 2.0, 8.0];
        let model = LinearRegression::fit(&x, &y).unwrap();

        assert_eq!(model.predict(0.0), model.intercept());
        assert!((model.predict(9.0) - (model.intercept() + 9.0 * model.slope())).abs() < 1e-12);
    }

    #[test]
    fn test_single_point_is_flat() {
        let model = LinearRegression::fit(&[0.0], &[42.0]).unwrap();
        assert_eq!(model.slope(), 0.0);
        assert_eq!(model.predict(100.0), 42.0);
    }

    #[test]
    fn test_zero_variance_feature_uses_mean() {
        let model = LinearRegression::fit(&[3.0, 3.0, 3.0], &[1.0, 2.0, 6.0]).unwrap();
        assert_eq!(model.slope(), 0.0);
        assert_eq!(model.predict(-7.0), 3.0);
    }

    #[test]
    fn test_empty_input_is_fit_error() {
        let err = LinearRegression::fit(&[], &[]).unwrap_err();
        assert!(matches!(err, PredictError::Fit(_)));
    }

    #[test]
    fn test_length_mismatch_is_fit_error() {
        let err = LinearRegression::fit(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, PredictError::Fit(_)));
    }
}
