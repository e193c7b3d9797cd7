//! Binomial p-value scoring.

use crate::error::{Result, ScoreError};
use crate::marginals::RowMarginals;
use statrs::function::beta::checked_beta_reg;

/// Scores one edge as `P(X <= nij)` for `X ~ Binomial(n.., mean_prior_probability)`.
pub fn p_value_score(nij: f64, m: &RowMarginals) -> Result<f64> {
    binomial_cdf(nij, m.total, m.mean_prior_probability)
}

/// Binomial cumulative distribution `P(X <= k)` with `n` trials.
///
/// `k` is floored. `n` may be fractional: the CDF is evaluated through the
/// regularized incomplete beta function, `I_{1-p}(n - k, k + 1)`, which
/// agrees with the discrete sum for integral `n`.
pub fn binomial_cdf(k: f64, n: f64, p: f64) -> Result<f64> {
    let k = k.floor();
    if k < 0.0 {
        return Ok(0.0);
    }
    if k >= n || p <= 0.0 {
        return Ok(1.0);
    }
    if p >= 1.0 {
        return Ok(0.0);
    }

    let cdf = checked_beta_reg(n - k, k + 1.0, 1.0 - p)
        .map_err(|e| ScoreError::Numeric(e.to_string()))?;
    Ok(cdf.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn test_fair_coin() {
        // P(X <= 2), X ~ Bin(4, 0.5) = (1 + 4 + 6) / 16
        let cdf = binomial_cdf(2.0, 4.0, 0.5).unwrap();
        assert!((cdf - 11.0 / 16.0).abs() < TOL);

        let cdf = binomial_cdf(0.0, 3.0, 0.5).unwrap();
        assert!((cdf - 0.125).abs() < TOL);
    }

    #[test]
    fn test_fractional_k_is_floored() {
        let floored = binomial_cdf(2.0, 4.0, 0.5).unwrap();
        let fractional = binomial_cdf(2.7, 4.0, 0.5).unwrap();
        assert!((floored - fractional).abs() < TOL);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(binomial_cdf(5.0, 5.0, 0.3).unwrap(), 1.0);
        assert_eq!(binomial_cdf(9.0, 5.0, 0.3).unwrap(), 1.0);
        assert_eq!(binomial_cdf(-1.0, 5.0, 0.3).unwrap(), 0.0);
        assert_eq!(binomial_cdf(2.0, 5.0, 0.0).unwrap(), 1.0);
        assert_eq!(binomial_cdf(2.0, 5.0, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_skewed_probability() {
        // P(X <= 1), X ~ Bin(3, 0.2) = 0.8^3 + 3 * 0.2 * 0.8^2
        let expected = 0.512 + 3.0 * 0.2 * 0.64;
        let cdf = binomial_cdf(1.0, 3.0, 0.2).unwrap();
        assert!((cdf - expected).abs() < TOL);
    }
}
