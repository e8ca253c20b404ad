//! Form validation that runs before any engine is invoked

use serde::{Deserialize, Serialize};

use crate::debt::{Loan, YearMonth};
use crate::error::{ValidationError, ValidationErrors};
use crate::mortgage::MortgageInputs;
use crate::rental::RentalInputs;

/// A loan as entered on the form, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanDraft {
    pub name: String,
    pub principal: f64,

    /// Annual rate as a decimal
    pub annual_rate: f64,
    pub min_payment: f64,
    pub extra_payment: f64,
    pub start_date: Option<YearMonth>,
}

impl LoanDraft {
    fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            "a loan".to_string()
        } else {
            self.name.clone()
        }
    }

    fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.principal == 0.0
    }
}

/// Check every rule on every draft and build engine loans if all pass.
///
/// Errors are collected rather than stopping at the first one, so a form can
/// show them all at once.
pub fn validate_loans(drafts: &[LoanDraft]) -> Result<Vec<Loan>, ValidationErrors> {
    let mut errors = Vec::new();

    if drafts.iter().all(LoanDraft::is_blank) {
        errors.push(ValidationError::NoLoans);
    }

    for draft in drafts {
        let loan = draft.display_name();

        if draft.principal.is_nan() || draft.principal <= 0.0 {
            errors.push(ValidationError::NonPositivePrincipal { loan: loan.clone() });
        }
        if draft.annual_rate < 0.0 || draft.annual_rate.is_nan() {
            errors.push(ValidationError::NegativeRate { loan: loan.clone() });
        }
        if draft.min_payment.is_nan() || draft.min_payment <= 0.0 {
            errors.push(ValidationError::NonPositiveMinPayment { loan: loan.clone() });
        }
        if draft.start_date.is_none() {
            errors.push(ValidationError::MissingStartDate { loan: loan.clone() });
        }

        let first_month_interest = draft.principal * draft.annual_rate / 12.0;
        if draft.min_payment + draft.extra_payment < first_month_interest {
            errors.push(ValidationError::PaymentBelowInterest { loan });
        }
    }

    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }

    Ok(drafts
        .iter()
        .filter_map(|d| {
            d.start_date.map(|start| {
                Loan::new(
                    d.name.clone(),
                    d.principal,
                    d.annual_rate,
                    d.min_payment,
                    d.extra_payment.max(0.0),
                    start,
                )
            })
        })
        .collect())
}

/// First failing mortgage rule, if any
pub fn validate_mortgage(input: &MortgageInputs) -> Result<(), ValidationError> {
    if input.price.is_nan() || input.price <= 0.0 {
        return Err(ValidationError::NonPositivePrice);
    }
    if input.down_payment < 0.0 {
        return Err(ValidationError::NegativeDownPayment);
    }
    if input.down_payment >= input.price {
        return Err(ValidationError::DownPaymentTooLarge);
    }
    if input.term_years == 0 {
        return Err(ValidationError::NonPositiveTerm);
    }
    if input.annual_rate_pct.is_nan() || input.annual_rate_pct <= 0.0 {
        return Err(ValidationError::NonPositiveRate);
    }
    if input.interest_only_years > input.term_years {
        return Err(ValidationError::InterestOnlyExceedsTerm);
    }
    Ok(())
}

/// First failing rental rule, if any
pub fn validate_rental(input: &RentalInputs) -> Result<(), ValidationError> {
    let costs = [
        input.utilities,
        input.maintenance,
        input.property_tax,
        input.insurance,
        input.loan_payment,
    ];

    if input.rent.is_nan() || input.vacancy_pct.is_nan() || costs.iter().any(|v| v.is_nan()) {
        return Err(ValidationError::NotANumber);
    }
    if input.rent <= 0.0 {
        return Err(ValidationError::NonPositiveRent);
    }
    if input.vacancy_pct < 0.0 {
        return Err(ValidationError::NegativeVacancy);
    }
    if costs.iter().any(|&v| v < 0.0) {
        return Err(ValidationError::NegativeAmount);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, principal: f64, rate: f64, min: f64, extra: f64) -> LoanDraft {
        LoanDraft {
            name: name.to_string(),
            principal,
            annual_rate: rate,
            min_payment: min,
            extra_payment: extra,
            start_date: YearMonth::new(2024, 1),
        }
    }

    #[test]
    fn test_valid_drafts_become_loans() {
        let loans = validate_loans(&[draft("Car", 10_000.0, 0.05, 300.0, 50.0)]).unwrap();
        assert_eq!(loans.len(), 1);
        assert_eq!(loans[0].name, "Car");
        assert_eq!(loans[0].scheduled_payment(), 350.0);
    }

    #[test]
    fn test_all_blank_is_rejected() {
        let errors = validate_loans(&[LoanDraft::default(), LoanDraft::default()]).unwrap_err();
        assert!(errors.contains(&ValidationError::NoLoans));
    }

    #[test]
    fn test_collects_every_violation() {
        let mut bad = draft("", -1.0, -0.01, 0.0, 0.0);
        bad.start_date = None;

        let errors = validate_loans(&[bad]).unwrap_err();
        let loan = "a loan".to_string();
        assert!(errors.contains(&ValidationError::NonPositivePrincipal { loan: loan.clone() }));
        assert!(errors.contains(&ValidationError::NegativeRate { loan: loan.clone() }));
        assert!(errors.contains(&ValidationError::NonPositiveMinPayment { loan: loan.clone() }));
        assert!(errors.contains(&ValidationError::MissingStartDate { loan }));
    }

    #[test]
    fn test_payment_must_cover_first_month_interest() {
        // 12_000 * 12% / 12 = 120 a month of interest
        let errors = validate_loans(&[draft("Card", 12_000.0, 0.12, 100.0, 10.0)]).unwrap_err();
        assert_eq!(
            errors.errors(),
            [ValidationError::PaymentBelowInterest { loan: "Card".to_string() }]
        );
        assert!(validate_loans(&[draft("Card", 12_000.0, 0.12, 100.0, 21.0)]).is_ok());
    }

    #[test]
    fn test_mortgage_rules() {
        let ok = MortgageInputs {
            price: 3_000_000.0,
            down_payment: 150_000.0,
            term_years: 30,
            annual_rate_pct: 4.0,
            interest_only_years: 10,
        };
        assert!(validate_mortgage(&ok).is_ok());

        let too_much_down = MortgageInputs { down_payment: 3_000_000.0, ..ok.clone() };
        assert_eq!(validate_mortgage(&too_much_down), Err(ValidationError::DownPaymentTooLarge));

        let long_io = MortgageInputs { interest_only_years: 31, ..ok.clone() };
        assert_eq!(validate_mortgage(&long_io), Err(ValidationError::InterestOnlyExceedsTerm));

        let free_money = MortgageInputs { annual_rate_pct: 0.0, ..ok };
        assert_eq!(validate_mortgage(&free_money), Err(ValidationError::NonPositiveRate));
    }

    #[test]
    fn test_rental_rules() {
        let ok = RentalInputs {
            rent: 9_000.0,
            vacancy_pct: 5.0,
            utilities: 500.0,
            maintenance: 400.0,
            property_tax: 12_000.0,
            insurance: 3_600.0,
            loan_payment: 4_000.0,
        };
        assert!(validate_rental(&ok).is_ok());
        assert_eq!(
            validate_rental(&RentalInputs { rent: 0.0, ..ok.clone() }),
            Err(ValidationError::NonPositiveRent)
        );
        assert_eq!(
            validate_rental(&RentalInputs { insurance: -1.0, ..ok.clone() }),
            Err(ValidationError::NegativeAmount)
        );
        assert_eq!(
            validate_rental(&RentalInputs { vacancy_pct: f64::NAN, ..ok }),
            Err(ValidationError::NotANumber)
        );
    }
}
