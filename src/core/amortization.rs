//! Mortgage amortization math.
//!
//! Pure and synchronous: loan inputs in, a monthly payment (or a validation error)
//! out. Payments are rounded to cents for display; the unrounded value is only
//! used internally while building a schedule.

use crate::errors::{Error, Result};
use serde::Serialize;

/// Longest schedule we are willing to build (100 years of monthly payments).
const MAX_SCHEDULE_PERIODS: usize = 1200;

/// Validated loan parameters. Built per calculation and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanInputs {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: f64,
}

impl LoanInputs {
    /// Validates raw numbers.
    ///
    /// Requires finite values, `principal > 0`, `term_years > 0` and
    /// `annual_rate_percent >= 0`.
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: f64) -> Result<Self> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(Error::invalid("principal", "must be a number greater than zero"));
        }
        if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
            return Err(Error::invalid("interest rate", "must be zero or a positive number"));
        }
        if !term_years.is_finite() || term_years <= 0.0 {
            return Err(Error::invalid("loan term", "must be a number of years greater than zero"));
        }
        Ok(Self {
            principal,
            annual_rate_percent,
            term_years,
        })
    }

    /// Parses form input; blank or non-numeric fields are rejected.
    pub fn parse(principal: &str, annual_rate_percent: &str, term_years: &str) -> Result<Self> {
        Self::new(
            parse_field("principal", principal)?,
            parse_field("interest rate", annual_rate_percent)?,
            parse_field("loan term", term_years)?,
        )
    }

    /// Total number of monthly periods, `term_years * 12`.
    #[must_use]
    pub fn periods(&self) -> f64 {
        self.term_years * 12.0
    }

    /// Monthly rate as a decimal, `(annual% / 100) / 12`.
    #[must_use]
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    /// Unrounded level payment.
    ///
    /// `P·r / (1 − (1+r)^−n)` evaluated through `ln_1p`/`exp_m1`, so tiny rates do
    /// not cancel to zero and large `r·n` does not overflow.
    fn exact_payment(&self) -> f64 {
        let n = self.periods();
        let r = self.monthly_rate();
        if r <= 0.0 {
            return self.principal / n;
        }
        let discount = -(-n * r.ln_1p()).exp_m1();
        if discount <= 0.0 {
            // r underflowed against n; the loan is effectively interest-free
            return self.principal / n;
        }
        self.principal * r / discount
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::invalid(field, format!("'{}' is not a number", raw.trim())))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid(field, "must be a finite number"))
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A monthly payment rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyPayment {
    pub amount: f64,
}

/// Computes the level monthly payment for a fixed-rate loan.
///
/// Zero-rate loans are paid off straight-line (`principal / n`); otherwise the
/// standard formula `P·r·(1+r)^n / ((1+r)^n − 1)` applies.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for invalid inputs, and when the inputs are so
/// extreme that the payment is not a positive finite amount of cents.
pub fn compute_monthly_payment(
    principal: f64,
    annual_rate_percent: f64,
    term_years: f64,
) -> Result<MonthlyPayment> {
    payment_for(&LoanInputs::new(principal, annual_rate_percent, term_years)?)
}

/// Same as [`compute_monthly_payment`] for raw text fields.
pub fn compute_from_input(
    principal: &str,
    annual_rate_percent: &str,
    term_years: &str,
) -> Result<MonthlyPayment> {
    payment_for(&LoanInputs::parse(principal, annual_rate_percent, term_years)?)
}

/// Computes the rounded payment for already-validated inputs.
pub fn payment_for(inputs: &LoanInputs) -> Result<MonthlyPayment> {
    let amount = round_cents(inputs.exact_payment());
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::invalid(
            "loan",
            "these values do not produce a payable monthly amount",
        ));
    }
    Ok(MonthlyPayment { amount })
}

/// One month of an amortization schedule, in cents-rounded dollars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmortizationRow {
    /// 1-based month number
    pub period: usize,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    /// Balance left after this payment
    pub remaining: f64,
}

/// Totals over the life of the loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanSummary {
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// Builds the month-by-month schedule. The term is rounded to whole months and the
/// last payment absorbs any residue so the final balance is exactly zero.
pub fn amortization_schedule(inputs: &LoanInputs) -> Result<Vec<AmortizationRow>> {
    let periods_f = inputs.periods().round();
    if periods_f < 1.0 {
        return Err(Error::invalid("loan term", "must cover at least one month"));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let periods = periods_f as usize;
    if periods > MAX_SCHEDULE_PERIODS {
        return Err(Error::invalid("loan term", "must be 100 years or less"));
    }

    let whole_months = LoanInputs {
        term_years: periods_f / 12.0,
        ..*inputs
    };
    let payment = whole_months.exact_payment();
    if !payment.is_finite() || payment <= 0.0 {
        return Err(Error::invalid(
            "loan",
            "these values do not produce a payable monthly amount",
        ));
    }

    let rate = inputs.monthly_rate();
    let mut balance = inputs.principal;
    let mut rows = Vec::with_capacity(periods);
    for period in 1..=periods {
        let interest = balance * rate;
        let (principal_part, this_payment) = if period == periods {
            (balance, balance + interest)
        } else {
            (payment - interest, payment)
        };
        balance -= principal_part;
        rows.push(AmortizationRow {
            period,
            payment: round_cents(this_payment),
            principal: round_cents(principal_part),
            interest: round_cents(interest),
            remaining: round_cents(balance.max(0.0)),
        });
    }
    Ok(rows)
}

/// Summarizes a loan: rounded monthly payment, total paid and total interest.
pub fn loan_summary(inputs: &LoanInputs) -> Result<LoanSummary> {
    let monthly = payment_for(inputs)?;
    let schedule = amortization_schedule(inputs)?;
    let total_paid: f64 = schedule.iter().map(|row| row.payment).sum();
    Ok(LoanSummary {
        monthly_payment: monthly.amount,
        total_paid: round_cents(total_paid),
        total_interest: round_cents(total_paid - inputs.principal),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_standard_thirty_year_loan() {
        let payment = compute_monthly_payment(300_000.0, 6.0, 30.0).unwrap();
        assert_eq!(payment.amount, 1798.65);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let payment = compute_monthly_payment(100_000.0, 0.0, 10.0).unwrap();
        assert_eq!(payment.amount, 833.33);

        let payment = compute_monthly_payment(120_000.0, 0.0, 10.0).unwrap();
        assert_eq!(payment.amount, 1000.0);
    }

    #[test]
    fn test_results_are_positive_and_finite() {
        for (p, r, t) in [
            (1_000.0, 0.0, 1.0),
            (250_000.0, 3.25, 15.0),
            (750_000.0, 7.5, 30.0),
            (50_000.0, 0.01, 40.0),
            (2_000_000.0, 12.0, 5.0),
        ] {
            let payment = compute_monthly_payment(p, r, t).unwrap();
            assert!(payment.amount.is_finite());
            assert!(payment.amount > 0.0);
        }
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        for (p, r, t) in [
            (0.0, 6.0, 30.0),
            (-5.0, 6.0, 30.0),
            (300_000.0, -1.0, 30.0),
            (300_000.0, 6.0, 0.0),
            (f64::NAN, 6.0, 30.0),
            (300_000.0, f64::INFINITY, 30.0),
        ] {
            let result = compute_monthly_payment(p, r, t);
            assert!(
                matches!(result, Err(Error::InvalidInput { .. })),
                "expected rejection for ({p}, {r}, {t})"
            );
        }
    }

    #[test]
    fn test_text_input_parsing() {
        let payment = compute_from_input(" 300000 ", "6", "30").unwrap();
        assert_eq!(payment.amount, 1798.65);

        for (p, r, t) in [("abc", "6", "30"), ("", "6", "30"), ("300000", "inf", "30")] {
            assert!(matches!(
                compute_from_input(p, r, t),
                Err(Error::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_extreme_inputs_never_yield_nan() {
        // (1 + r)^n would overflow to infinity here; the payment is just the interest
        let payment = compute_monthly_payment(100_000.0, 1.0e6, 1.0e6).unwrap();
        assert!(payment.amount.is_finite());
        assert!((payment.amount - 83_333_333.33).abs() < 0.01);

        // Rounds to zero cents
        let result = compute_monthly_payment(0.001, 0.0, 30.0);
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
    }

    #[test]
    fn test_near_zero_rate_matches_straight_line() {
        for rate in [1.0e-10, 1.0e-14, 1.0e-300] {
            let payment = compute_monthly_payment(100_000.0, rate, 10.0).unwrap();
            assert_eq!(payment.amount, 833.33, "rate {rate}");
        }
    }

    #[test]
    fn test_huge_rate_pays_interest_only() {
        let payment = compute_monthly_payment(100_000.0, 1000.0, 100.0).unwrap();
        assert_eq!(payment.amount, 83_333.33);

        let inputs = LoanInputs::new(100_000.0, 1000.0, 100.0).unwrap();
        let schedule = amortization_schedule(&inputs).unwrap();
        assert!(schedule.iter().all(|row| row.payment.is_finite()));
        assert_eq!(schedule.last().unwrap().remaining, 0.0);
    }

    #[test]
    fn test_near_zero_rate_schedule() {
        let inputs = LoanInputs::new(12_000.0, 1.0e-12, 1.0).unwrap();
        let schedule = amortization_schedule(&inputs).unwrap();
        assert!(schedule.iter().all(|row| row.payment == 1000.0));
        assert_eq!(schedule.last().unwrap().remaining, 0.0);
    }

    #[test]
    fn test_schedule_pays_off_loan() {
        let inputs = LoanInputs::new(300_000.0, 6.0, 30.0).unwrap();
        let schedule = amortization_schedule(&inputs).unwrap();
        assert_eq!(schedule.len(), 360);
        assert_eq!(schedule[0].interest, 1500.0);
        assert_eq!(schedule[0].payment, 1798.65);
        assert_eq!(schedule.last().unwrap().remaining, 0.0);

        let principal_paid: f64 = schedule.iter().map(|row| row.principal).sum();
        assert!((principal_paid - 300_000.0).abs() < 1.0);
    }

    #[test]
    fn test_zero_rate_schedule_has_no_interest() {
        let inputs = LoanInputs::new(12_000.0, 0.0, 1.0).unwrap();
        let schedule = amortization_schedule(&inputs).unwrap();
        assert_eq!(schedule.len(), 12);
        assert!(schedule.iter().all(|row| row.interest == 0.0));
        assert!(schedule.iter().all(|row| row.payment == 1000.0));
    }

    #[test]
    fn test_loan_summary() {
        let inputs = LoanInputs::new(300_000.0, 6.0, 30.0).unwrap();
        let summary = loan_summary(&inputs).unwrap();
        assert_eq!(summary.monthly_payment, 1798.65);
        // 360 payments of ~1798.65 less the principal
        assert!((summary.total_interest - 347_514.0).abs() < 10.0);
        assert!((summary.total_paid - summary.total_interest - 300_000.0).abs() < 0.01);
    }

    #[test]
    fn test_schedule_rejects_absurd_terms() {
        let inputs = LoanInputs::new(100_000.0, 5.0, 500.0).unwrap();
        assert!(matches!(
            amortization_schedule(&inputs),
            Err(Error::InvalidInput { .. })
        ));
    }
}
