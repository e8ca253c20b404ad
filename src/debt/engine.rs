//! Month-by-month multi-loan payoff simulation

use log::{debug, warn};

use super::loan::{Loan, YearMonth};
use super::result::{BalanceSample, DebtPlanResult, DebtSummary, LoanPayoff, YearlyDebtRow};
use super::strategy::{LoanComparator, RepaymentStrategy};
use crate::config::DebtLimits;

/// Payoff simulator with a fixed monthly budget
#[derive(Debug, Clone, Default)]
pub struct DebtEngine {
    limits: DebtLimits,
}

/// Totals for one simulated month
#[derive(Debug, Clone, Copy)]
struct MonthOutcome {
    opening_balance: f64,
    interest: f64,
}

impl DebtEngine {
    pub fn new(limits: DebtLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &DebtLimits {
        &self.limits
    }

    /// Simulate paying off `loans` under `strategy`.
    ///
    /// The caller's loans are cloned, never mutated. The monthly budget is the
    /// sum of every loan's scheduled payment and stays fixed after payoffs, so
    /// each payoff frees capacity for the loans that remain. Reaching the
    /// month cap is not an error: the partial plan comes back with
    /// `hit_month_cap` set.
    pub fn simulate(&self, loans: &[Loan], strategy: RepaymentStrategy) -> DebtPlanResult {
        let Some(start) = loans.iter().map(|l| l.start_date).min() else {
            return DebtPlanResult::empty(strategy);
        };

        let comparator = strategy.comparator();
        let budget: f64 = loans.iter().map(Loan::scheduled_payment).sum();

        let mut active: Vec<Loan> = loans.to_vec();
        active.sort_by(comparator);

        let mut current = start;
        let mut months = 0u32;
        let mut total_interest = 0.0;
        let mut graph = Vec::new();
        let mut table = Vec::new();
        let mut payoffs = Vec::new();

        while !active.is_empty() && months < self.limits.max_months {
            let outcome = pay_month(&mut active, comparator, budget);
            total_interest += outcome.interest;

            graph.push(BalanceSample {
                month: current,
                balance: outcome.opening_balance,
            });

            if current.is_december() {
                debug!(
                    "debt year {} closed: balance {:.2}, december interest {:.2}",
                    current.year(),
                    outcome.opening_balance,
                    outcome.interest
                );
                table.push(YearlyDebtRow {
                    year: current.year(),
                    balance: outcome.opening_balance,
                    interest: outcome.interest,
                });
            }

            let epsilon = self.limits.payoff_epsilon;
            active.retain(|loan| {
                let open = loan.principal > epsilon;
                if !open {
                    payoffs.push(LoanPayoff {
                        name: loan.name.clone(),
                        month: current,
                    });
                }
                open
            });

            current = current.next();
            months += 1;
        }

        let hit_month_cap = !active.is_empty();
        if hit_month_cap {
            warn!(
                "debt plan did not converge within {} months; {} loan(s) still open",
                self.limits.max_months,
                active.len()
            );
        }

        DebtPlanResult {
            loans: loans.to_vec(),
            strategy,
            start: Some(start),
            summary: DebtSummary {
                monthly_payment: budget,
                total_interest: round_cents(total_interest),
                debt_free_date: Some(current),
                months,
                years: months / 12,
                remaining_months: months % 12,
                hit_month_cap,
            },
            graph,
            table,
            payoffs,
        }
    }
}

/// Simulate with the default limits
pub fn simulate(loans: &[Loan], strategy: RepaymentStrategy) -> DebtPlanResult {
    DebtEngine::default().simulate(loans, strategy)
}

/// Apply one month of interest and payments to the active loans.
///
/// The loans are re-ranked first, since balances change every month. Pass one
/// gives each loan its scheduled payment, clipped to what is left of the
/// budget and to what clears the loan. Pass two hands whatever the first pass
/// did not consume to the loans in rank order, so capacity freed by paid-off
/// loans goes to the top-ranked loan first.
fn pay_month(active: &mut [Loan], comparator: LoanComparator, budget: f64) -> MonthOutcome {
    let opening_balance: f64 = active.iter().map(|l| l.principal).sum();

    active.sort_by(comparator);

    let mut payment_left = budget;
    let mut interest_total = 0.0;
    let mut owed = Vec::with_capacity(active.len());

    for loan in active.iter_mut() {
        if loan.principal <= 0.0 {
            owed.push(0.0);
            continue;
        }

        let interest = loan.monthly_interest();
        interest_total += interest;

        let payment = loan
            .scheduled_payment()
            .min(payment_left)
            .min(loan.principal + interest)
            .max(0.0);
        let principal_paid = (payment - interest).max(0.0);

        loan.principal -= principal_paid;
        payment_left -= payment;

        // interest the scheduled payment did not cover is still owed this month
        owed.push((interest - payment).max(0.0));
    }

    for (loan, unpaid_interest) in active.iter_mut().zip(owed) {
        if payment_left <= 0.0 {
            break;
        }
        let outstanding = loan.principal + unpaid_interest;
        if outstanding <= 0.0 {
            continue;
        }

        let payment = payment_left.min(outstanding);
        loan.principal -= (payment - unpaid_interest).max(0.0);
        payment_left -= payment;
    }

    MonthOutcome {
        opening_balance,
        interest: interest_total,
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn loan(name: &str, principal: f64, rate: f64, min: f64, extra: f64) -> Loan {
        Loan::new(name, principal, rate, min, extra, ym(2024, 1))
    }

    fn payoff_names(result: &DebtPlanResult) -> Vec<&str> {
        result.payoffs.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_empty_loan_list_returns_immediately() {
        let result = simulate(&[], RepaymentStrategy::Snowball);
        assert_eq!(result.summary.months, 0);
        assert!(result.graph.is_empty());
        assert!(result.table.is_empty());
        assert_eq!(result.summary.debt_free_date, None);
        assert!(!result.summary.hit_month_cap);
    }

    #[test]
    fn test_zero_rate_loan_pays_down_linearly() {
        let loans = [loan("Phone", 1000.0, 0.0, 100.0, 0.0)];
        let result = simulate(&loans, RepaymentStrategy::Snowball);

        assert_eq!(result.summary.months, 10);
        assert_eq!(result.summary.years, 0);
        assert_eq!(result.summary.remaining_months, 10);
        assert_eq!(result.summary.total_interest, 0.0);
        assert_eq!(result.summary.monthly_payment, 100.0);
        assert_eq!(result.summary.debt_free_date, Some(ym(2024, 11)));
        assert_eq!(result.graph.len(), 10);
        assert_abs_diff_eq!(result.graph[0].balance, 1000.0);
        assert_abs_diff_eq!(result.graph[9].balance, 100.0, epsilon = 1e-9);
        assert_eq!(result.graph[0].month, ym(2024, 1));
        assert!(result.table.is_empty());
    }

    #[test]
    fn test_caller_loans_are_not_mutated() {
        let loans = vec![loan("Car", 5000.0, 0.06, 200.0, 50.0)];
        let before = loans.clone();
        let result = simulate(&loans, RepaymentStrategy::Avalanche);
        assert_eq!(loans, before);
        assert_eq!(result.loans, before);
    }

    #[test]
    fn test_starts_at_earliest_start_date() {
        let mut late = loan("Late", 500.0, 0.0, 100.0, 0.0);
        late.start_date = ym(2025, 6);
        let mut early = loan("Early", 500.0, 0.0, 100.0, 0.0);
        early.start_date = ym(2024, 11);

        let result = simulate(&[late, early], RepaymentStrategy::Snowball);
        assert_eq!(result.start, Some(ym(2024, 11)));
        assert_eq!(result.graph[0].month, ym(2024, 11));
    }

    #[test]
    fn test_table_rows_only_on_december() {
        let mut l = loan("Card", 1000.0, 0.0, 100.0, 0.0);
        l.start_date = ym(2024, 11);
        let result = simulate(&[l], RepaymentStrategy::Snowball);

        assert_eq!(result.table.len(), 1);
        assert_eq!(result.table[0].year, 2024);
        assert_abs_diff_eq!(result.table[0].balance, 900.0, epsilon = 1e-9);
    }

    #[test]
    fn test_table_interest_is_december_only() {
        let loans = [loan("Loan", 10_000.0, 0.12, 500.0, 0.0)];
        let result = simulate(&loans, RepaymentStrategy::Snowball);

        let december = &result.graph[11];
        assert_eq!(december.month, ym(2024, 12));
        assert_eq!(result.table[0].interest, december.balance * (0.12 / 12.0));

        let table_interest: f64 = result.table.iter().map(|r| r.interest).sum();
        assert!(result.summary.total_interest > table_interest * 2.0);
    }

    #[test]
    fn test_total_interest_rounded_to_cents() {
        let loans = [loan("Loan", 1234.56, 0.0799, 77.0, 0.0)];
        let result = simulate(&loans, RepaymentStrategy::Snowball);
        let cents = result.summary.total_interest * 100.0;
        assert_abs_diff_eq!(cents, cents.round(), epsilon = 1e-6);
    }

    #[test]
    fn test_freed_capacity_follows_strategy() {
        // C clears in month one and frees 100 a month for whichever loan ranks first
        let loans = [
            loan("A", 500.0, 0.10, 50.0, 0.0),
            loan("B", 1000.0, 0.20, 50.0, 0.0),
            loan("C", 100.0, 0.0, 100.0, 0.0),
        ];

        let snowball = simulate(&loans, RepaymentStrategy::Snowball);
        let avalanche = simulate(&loans, RepaymentStrategy::Avalanche);

        assert_eq!(payoff_names(&snowball), ["C", "A", "B"]);
        assert_eq!(payoff_names(&avalanche), ["C", "B", "A"]);
        assert!(avalanche.summary.total_interest < snowball.summary.total_interest);
        assert_eq!(snowball.summary.monthly_payment, 200.0);
    }

    #[test]
    fn test_budget_unchanged_without_payoffs() {
        // before any payoff each loan pays exactly its own minimum plus extra
        let loans = [
            loan("A", 10_000.0, 0.0, 100.0, 20.0),
            loan("B", 20_000.0, 0.0, 200.0, 0.0),
        ];
        let result = simulate(&loans, RepaymentStrategy::Avalanche);
        assert_abs_diff_eq!(result.graph[1].balance, 30_000.0 - 320.0, epsilon = 1e-9);
    }

    #[test]
    fn test_payoff_month_leftover_flows_to_next_loan() {
        let loans = [
            loan("Small", 30.0, 0.0, 100.0, 0.0),
            loan("Big", 1000.0, 0.0, 100.0, 0.0),
        ];
        let result = simulate(&loans, RepaymentStrategy::Snowball);
        // Small needs 30 of its 100; the other 70 goes to Big in the same month
        assert_abs_diff_eq!(result.graph[1].balance, 1030.0 - 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_interest_only_payment_hits_month_cap() {
        let loans = [loan("Stuck", 12_000.0, 0.12, 120.0, 0.0)];
        let result = simulate(&loans, RepaymentStrategy::Snowball);

        assert_eq!(result.summary.months, 600);
        assert_eq!(result.summary.years, 50);
        assert!(result.summary.hit_month_cap);
        assert!(!result.is_debt_free());
        assert_eq!(result.graph.len(), 600);
        assert!(result.payoffs.is_empty());
    }

    #[test]
    fn test_custom_month_cap() {
        let engine = DebtEngine::new(DebtLimits {
            max_months: 12,
            ..Default::default()
        });
        let result = engine.simulate(&[loan("Long", 10_000.0, 0.05, 100.0, 0.0)], RepaymentStrategy::Snowball);
        assert_eq!(result.summary.months, 12);
        assert!(result.summary.hit_month_cap);
        assert_eq!(result.summary.debt_free_date, Some(ym(2025, 1)));
    }

    #[test]
    fn test_plan_round_trips_through_json_value() {
        let loans = [
            loan("A", 3210.45, 0.0735, 120.0, 15.5),
            loan("B", 987.65, 0.1999, 45.0, 0.0),
        ];
        let result = simulate(&loans, RepaymentStrategy::Avalanche);

        let value = serde_json::to_value(&result).unwrap();
        let back: DebtPlanResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);

        let text = serde_json::to_string(&result).unwrap();
        let back: DebtPlanResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, result);
    }

    fn arb_loan() -> impl Strategy<Value = Loan> {
        (100.0..50_000.0f64, 0.0..0.30f64, 1.01..3.0f64, 0.0..200.0f64, 0u32..12).prop_map(
            |(principal, rate, cover, extra, month_offset)| {
                let interest = principal * rate / 12.0;
                let min = (interest * cover).max(10.0);
                let mut start = ym(2024, 1);
                for _ in 0..month_offset {
                    start = start.next();
                }
                Loan::new("loan", principal, rate, min, extra, start)
            },
        )
    }

    proptest! {
        #[test]
        fn prop_terminates_within_cap(loans in proptest::collection::vec(arb_loan(), 1..5), avalanche in any::<bool>()) {
            let strategy = if avalanche { RepaymentStrategy::Avalanche } else { RepaymentStrategy::Snowball };
            let result = simulate(&loans, strategy);
            prop_assert!(result.summary.months <= 600);
            prop_assert_eq!(result.graph.len() as u32, result.summary.months);
        }

        #[test]
        fn prop_total_balance_never_increases(loans in proptest::collection::vec(arb_loan(), 1..5), avalanche in any::<bool>()) {
            let strategy = if avalanche { RepaymentStrategy::Avalanche } else { RepaymentStrategy::Snowball };
            let result = simulate(&loans, strategy);
            for pair in result.graph.windows(2) {
                prop_assert!(pair[1].balance <= pair[0].balance + 1e-9);
            }
        }
    }
}
