//! Per-alternative utility aggregation, following the Keane-Wolpin flow
//! utility decomposition: a wage alternative's shock multiplies the wage,
//! the non-pecuniary term is additive, and the continuation value enters
//! discounted.

/// Flow utility of one alternative under one shock draw:
/// `wage * draw + nonpec`.
#[inline]
pub fn flow_utility(wage: f64, nonpec: f64, draw: f64) -> f64 {
    wage * draw + nonpec
}

/// Total value of choosing an alternative now and behaving optimally after:
/// flow utility plus the discounted continuation value.
#[inline]
pub fn value_function(wage: f64, nonpec: f64, continuation_value: f64, draw: f64, delta: f64) -> f64 {
    flow_utility(wage, nonpec, draw) + delta * continuation_value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_utility_is_wage_times_draw_plus_nonpec() {
        assert_eq!(flow_utility(100.0, 5.0, 2.0), 205.0);
        assert_eq!(flow_utility(1.0, -4000.0, 3.5), -3996.5);
    }

    #[test]
    fn value_function_discounts_continuation() {
        let value = value_function(10.0, 1.0, 100.0, 1.0, 0.5);
        assert_eq!(value, 10.0 + 1.0 + 50.0);
    }

    #[test]
    fn zero_delta_ignores_continuation() {
        let with_large = value_function(10.0, 0.0, 1e9, 1.0, 0.0);
        let with_small = value_function(10.0, 0.0, 0.0, 1.0, 0.0);
        assert_eq!(with_large, with_small);
    }
}
