//! Internal Rate of Return (IRR) by bisection
//!
//! Used to report the effective annual rate of a contribution plan

use log::debug;

use crate::config::IrrSettings;

/// Solve for the monthly rate that makes the NPV of `cashflows` zero.
///
/// Bisects over the configured bracket. Returns None when the NPV does not
/// strictly change sign across the bracket, or when the root falls outside
/// the accepted domain.
pub fn monthly_irr(cashflows: &[f64], settings: &IrrSettings) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    let mut low = settings.bracket_low;
    let mut high = settings.bracket_high;
    let mut f_low = npv_sign_value(cashflows, low);
    let f_high = npv_sign_value(cashflows, high);

    let opposite = (f_low < 0.0 && f_high > 0.0) || (f_low > 0.0 && f_high < 0.0);
    if !opposite {
        debug!("irr: no sign change over [{low}, {high}] (f_low={f_low}, f_high={f_high})");
        return None;
    }

    let mut root = None;
    for _ in 0..settings.max_iterations {
        let mid = (low + high) / 2.0;
        if npv_at_rate(cashflows, mid).abs() < settings.tolerance {
            root = Some(mid);
            break;
        }

        let f_mid = npv_sign_value(cashflows, mid);
        if f_mid * f_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            f_low = f_mid;
        }
    }

    let root = root.unwrap_or((low + high) / 2.0);
    if root > settings.domain_low && root < settings.domain_high {
        Some(root)
    } else {
        debug!("irr: root {root} outside ({}, {})", settings.domain_low, settings.domain_high);
        None
    }
}

/// Annual rate implied by a monthly rate, compounded
pub fn annualize_monthly(rate: f64) -> f64 {
    (1.0 + rate).powi(12) - 1.0
}

/// Effective annual IRR for monthly cashflows, or None if no root was found
pub fn annual_irr(cashflows: &[f64], settings: &IrrSettings) -> Option<f64> {
    monthly_irr(cashflows, settings)
        .map(annualize_monthly)
        .filter(|r| r.is_finite())
}

/// Calculate NPV at a given periodic rate
pub fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// NPV scaled by (1 + rate)^N, i.e. the value of the flows at the last period.
///
/// Same sign as the NPV for any rate above -1, but finite near -1 where the
/// plain discount factors overflow.
fn npv_sign_value(cashflows: &[f64], rate: f64) -> f64 {
    let last = cashflows.len().saturating_sub(1);
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf * (1.0 + rate).powi((last - t) as i32))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_simple_irr() {
        // 1000 in, 1100 back after 12 months
        let mut cashflows = vec![-1000.0];
        cashflows.extend(vec![0.0; 11]);
        cashflows.push(1100.0);

        let irr = annual_irr(&cashflows, &IrrSettings::default()).unwrap();
        assert_abs_diff_eq!(irr, 0.10, epsilon = 1e-4);
    }

    #[test]
    fn test_level_contributions() {
        // 100 a month for 24 months, worth 2500 at the end
        let mut cashflows = vec![-100.0; 24];
        cashflows.push(2500.0);

        let monthly = monthly_irr(&cashflows, &IrrSettings::default()).unwrap();
        assert!(monthly > 0.0);
        assert!(npv_at_rate(&cashflows, monthly).abs() < 1e-4);
    }

    #[test]
    fn test_no_sign_change_has_no_root() {
        let settings = IrrSettings::default();
        assert_eq!(monthly_irr(&[0.0; 13], &settings), None);
        assert_eq!(monthly_irr(&[-100.0, -100.0, -100.0], &settings), None);
        assert_eq!(monthly_irr(&[], &settings), None);
    }

    #[test]
    fn test_root_outside_domain_is_rejected() {
        // total loss: 1000 in, 1 back a year later, monthly rate near -0.44
        let mut cashflows = vec![-1000.0];
        cashflows.extend(vec![0.0; 11]);
        cashflows.push(1.0);
        let narrow = IrrSettings {
            domain_low: -0.1,
            ..IrrSettings::default()
        };
        assert!(monthly_irr(&cashflows, &IrrSettings::default()).is_some());
        assert_eq!(monthly_irr(&cashflows, &narrow), None);
    }

    #[test]
    fn test_long_horizon_near_minus_one_stays_finite() {
        // 10 years of monthly flows: plain discounting at -0.999 overflows
        let mut cashflows = vec![-1000.0];
        cashflows.extend(vec![0.0; 119]);
        cashflows.push(2000.0);

        let irr = annual_irr(&cashflows, &IrrSettings::default()).unwrap();
        assert_abs_diff_eq!(irr, 2f64.powf(0.1) - 1.0, epsilon = 1e-4);
    }
}
