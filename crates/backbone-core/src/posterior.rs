//! Beta-Binomial posterior scoring.
//!
//! The observed weight `nij` is compared with its expectation under
//! independence (`ni. * n.j / n..`). The prior probability of an edge is a
//! Beta distribution matched to the mean and variance of that expectation;
//! the posterior after observing `nij` gives the variance of the weight,
//! which is propagated into the score with the delta method.

use crate::marginals::RowMarginals;
use serde::Serialize;

/// Intermediate quantities of the posterior score for one edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PosteriorStats {
    /// `n.. / (ni. * n.j)`, the inverse of the expected weight.
    pub kappa: f64,
    pub var_prior_probability: f64,
    /// Derivative term of the score with respect to the marginals.
    pub d: f64,
    /// Absent when the prior variance is zero, which happens when a single
    /// node carries the whole table weight on one side.
    pub beta: Option<BetaPosterior>,
}

/// Moment-matched Beta prior, its posterior, and the propagated variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BetaPosterior {
    pub alpha_prior: f64,
    pub beta_prior: f64,
    pub alpha_post: f64,
    pub beta_post: f64,
    pub expected_pij: f64,
    pub variance_nij: f64,
    pub variance_cij: f64,
    pub sdev_cij: f64,
}

/// Scores one edge. Returns the score in (-1, 1) and its intermediates.
pub fn posterior_score(nij: f64, m: &RowMarginals) -> (f64, PosteriorStats) {
    let RowMarginals { ni, nj, total, .. } = *m;
    let mean = m.mean_prior_probability;

    let kappa = total / (ni * nj);
    let score = ((kappa * nij) - 1.0) / ((kappa * nij) + 1.0);

    let var_prior_probability = (1.0 / total.powi(2))
        * (ni * nj * (total - ni) * (total - nj))
        / (total.powi(2) * (total - 1.0));

    let d = (1.0 / (ni * nj)) - (total * ((ni + nj) / (ni * nj).powi(2)));

    let beta = if var_prior_probability > 0.0 {
        let alpha_prior =
            ((mean.powi(2) / var_prior_probability) * (1.0 - mean)) - mean;
        let beta_prior =
            (mean / var_prior_probability) * (1.0 - mean.powi(2)) - (1.0 - mean);

        let alpha_post = alpha_prior + nij;
        let beta_post = total - nij + beta_prior;

        let expected_pij = alpha_post / (alpha_post + beta_post);
        let variance_nij = expected_pij * (1.0 - expected_pij) * total;

        let variance_cij = variance_nij
            * ((2.0 * (kappa + (nij * d))) / ((kappa * nij) + 1.0).powi(2)).powi(2);

        Some(BetaPosterior {
            alpha_prior,
            beta_prior,
            alpha_post,
            beta_post,
            expected_pij,
            variance_nij,
            variance_cij,
            sdev_cij: variance_cij.sqrt(),
        })
    } else {
        None
    };

    (
        score,
        PosteriorStats {
            kappa,
            var_prior_probability,
            d,
            beta,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn marginals(ni: f64, nj: f64, total: f64) -> RowMarginals {
        RowMarginals {
            ni,
            nj,
            total,
            mean_prior_probability: ((ni * nj) / total) * (1.0 / total),
        }
    }

    #[test]
    fn test_score_matches_kappa() {
        // ni. = 15, n.j = 10, n.. = 16
        let (score, stats) = posterior_score(10.0, &marginals(15.0, 10.0, 16.0));

        assert!((stats.kappa - 16.0 / 150.0).abs() < TOL);
        let kn = stats.kappa * 10.0;
        assert!((score - (kn - 1.0) / (kn + 1.0)).abs() < TOL);
    }

    #[test]
    fn test_expected_weight_scores_zero() {
        // nij equal to ni. * n.j / n.. gives kappa * nij = 1.
        let (score, _) = posterior_score(5.0, &marginals(10.0, 10.0, 20.0));
        assert!(score.abs() < TOL);
    }

    #[test]
    fn test_prior_variance_and_moments() {
        let m = marginals(15.0, 10.0, 16.0);
        let (_, stats) = posterior_score(10.0, &m);

        let expected_var = (1.0 / 256.0) * (15.0 * 10.0 * 1.0 * 6.0) / (256.0 * 15.0);
        assert!((stats.var_prior_probability - expected_var).abs() < TOL);

        let beta = stats.beta.expect("prior variance is positive");
        let mean = m.mean_prior_probability;
        let alpha_prior = (mean * mean / expected_var) * (1.0 - mean) - mean;
        assert!((beta.alpha_prior - alpha_prior).abs() < 1e-6);
        assert!((beta.alpha_post - (alpha_prior + 10.0)).abs() < 1e-6);
        assert!(
            (beta.expected_pij - beta.alpha_post / (beta.alpha_post + beta.beta_post)).abs() < TOL
        );
        assert!((beta.sdev_cij * beta.sdev_cij - beta.variance_cij).abs() < TOL);
        assert!(beta.variance_nij > 0.0);
    }

    #[test]
    fn test_delta_term() {
        let (_, stats) = posterior_score(1.0, &marginals(1.0, 6.0, 16.0));
        let expected = (1.0 / 6.0) - 16.0 * (7.0 / 36.0);
        assert!((stats.d - expected).abs() < TOL);
    }

    #[test]
    fn test_zero_prior_variance_has_no_beta_block() {
        // Source carries the full table weight: n.. - ni. = 0.
        let (score, stats) = posterior_score(5.0, &marginals(10.0, 5.0, 10.0));

        assert_eq!(stats.var_prior_probability, 0.0);
        assert!(stats.beta.is_none());
        assert!(score.abs() < TOL);
    }
}
