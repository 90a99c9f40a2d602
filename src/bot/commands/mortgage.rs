//! Mortgage calculator commands - `mortgage` and `schedule`.
//!
//! Both are pure calculations; nothing here talks to a backend.

/// Schedule replies list one line per year; Discord caps a message at 2000 characters.
const MAX_SCHEDULE_LINES: usize = 30;

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::MAX_SCHEDULE_LINES;
    use crate::{
        bot::BotData,
        core::amortization::{self, LoanInputs},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Calculates the monthly payment for a fixed-rate mortgage.
    #[poise::command(slash_command, prefix_command)]
    pub async fn mortgage(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Loan amount in dollars"] principal: f64,
        #[description = "Annual interest rate in percent, e.g. 6.5"] rate: f64,
        #[description = "Loan term in years"] years: f64,
    ) -> Result<()> {
        let inputs = LoanInputs::new(principal, rate, years)?;
        let payment = amortization::payment_for(&inputs)?;

        let mut reply = format!(
            "🏠 **Monthly payment: ${:.2}**\n${principal:.2} at {rate}% over {years} years",
            payment.amount
        );
        // Fractional terms still get a payment; the totals need whole months
        if let Ok(summary) = amortization::loan_summary(&inputs) {
            write!(
                reply,
                "\nTotal paid: ${:.2} • Total interest: ${:.2}",
                summary.total_paid, summary.total_interest
            )?;
        }

        ctx.say(reply).await?;
        Ok(())
    }

    /// Shows the remaining balance at the end of each year of the loan.
    #[poise::command(slash_command, prefix_command)]
    pub async fn schedule(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Loan amount in dollars"] principal: f64,
        #[description = "Annual interest rate in percent, e.g. 6.5"] rate: f64,
        #[description = "Loan term in years"] years: f64,
    ) -> Result<()> {
        let inputs = LoanInputs::new(principal, rate, years)?;
        let rows = amortization::amortization_schedule(&inputs)?;

        let mut year_principal = 0.0;
        let mut year_interest = 0.0;
        let mut lines = Vec::new();
        for row in &rows {
            year_principal += row.principal;
            year_interest += row.interest;
            if row.period % 12 == 0 || row.period == rows.len() {
                lines.push(format!(
                    "{:>4} {year_principal:>12.2} {year_interest:>12.2} {:>12.2}",
                    row.period.div_ceil(12),
                    row.remaining
                ));
                year_principal = 0.0;
                year_interest = 0.0;
            }
        }

        let mut reply = String::from("📅 **Amortization schedule**\n```\n");
        writeln!(reply, "Year    Principal     Interest      Balance")?;
        for line in lines.iter().take(MAX_SCHEDULE_LINES) {
            writeln!(reply, "{line}")?;
        }
        if lines.len() > MAX_SCHEDULE_LINES {
            writeln!(reply, "... {} more years", lines.len() - MAX_SCHEDULE_LINES)?;
        }
        reply.push_str("```");

        ctx.say(reply).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
