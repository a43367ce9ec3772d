use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::state::Installment;
use crate::types::LoanId;
use uuid::Uuid;

use super::amortization::{installment_amount, validate_terms};

/// one scheduled repayment period
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledInstallment {
    /// 1-based position within the schedule
    pub index: u32,
    pub due_date: NaiveDate,
    pub amount_due: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
}

/// amortization schedule for a loan
#[derive(Debug, Clone)]
pub struct Schedule {
    pub principal: Money,
    pub annual_rate: Rate,
    pub tenor_months: u32,
    pub start_date: NaiveDate,
    pub installment: Money,
    pub periods: Vec<ScheduledInstallment>,
    pub total_payment: Money,
    pub total_interest: Money,
}

impl Schedule {
    /// generate the repayment schedule
    ///
    /// deterministic: the same terms always produce the same schedule. every
    /// period owes the EMI; the final period's split is adjusted so the
    /// principal portions sum exactly to the original principal and the
    /// amounts due sum exactly to EMI x tenor.
    pub fn generate(
        principal: Money,
        annual_rate: Rate,
        tenor_months: u32,
        start_date: NaiveDate,
    ) -> Result<Self> {
        validate_terms(principal, annual_rate, tenor_months)?;

        let emi = installment_amount(principal, annual_rate, tenor_months)?;
        let monthly_rate = annual_rate.monthly_rate().as_decimal();
        let total_payment = emi * Decimal::from(tenor_months);

        let mut periods = Vec::with_capacity(tenor_months as usize);
        let mut balance = principal;

        for i in 1..=tenor_months {
            let due_date = add_months_clamped(start_date, i)?;
            let is_last = i == tenor_months;

            let (amount_due, principal_portion, interest_portion) = if is_last {
                // final period absorbs rounding residue: the amount keeps the
                // schedule sum at EMI x tenor, the principal portion clears
                // the remaining balance, and the interest split takes the
                // leftover cents.
                let amount = total_payment - emi * Decimal::from(tenor_months - 1);
                (amount, balance, amount - balance)
            } else {
                let interest = Money::from_decimal(balance.as_decimal() * monthly_rate);
                (emi, emi - interest, interest)
            };

            let ending_balance = (balance - principal_portion).max(Money::ZERO);

            periods.push(ScheduledInstallment {
                index: i,
                due_date,
                amount_due,
                principal_portion,
                interest_portion,
                ending_balance,
            });

            balance = ending_balance;
        }

        let total_interest = total_payment - principal;

        Ok(Self {
            principal,
            annual_rate,
            tenor_months,
            start_date,
            installment: emi,
            periods,
            total_payment,
            total_interest,
        })
    }

    /// materialize schedule rows as fresh ledger installment records
    pub fn to_installments(&self, loan_id: LoanId) -> Vec<Installment> {
        self.periods
            .iter()
            .map(|p| Installment {
                installment_id: Uuid::new_v4(),
                loan_id,
                index: p.index,
                due_date: p.due_date,
                amount_due: p.amount_due,
                amount_paid: Money::ZERO,
                penalty_applied: Money::ZERO,
                paid_at: None,
            })
            .collect()
    }
}

/// due date `months` months after `start`
///
/// the due day follows the start day, clamped to the length of the target
/// month (a loan started on the 31st rolls to Feb 28/29, never an invalid
/// date). when the start day is the last day of its own month, every due
/// date lands on the last day of its month.
pub fn add_months_clamped(start: NaiveDate, months: u32) -> Result<NaiveDate> {
    let total = start.month0() as i64 + months as i64;
    let year = start.year() + (total / 12) as i32;
    let month = (total % 12) as u32 + 1;

    let last_day = days_in_month(year, month);
    let start_is_eom = start.day() == days_in_month(start.year(), start.month());

    let day = if start_is_eom {
        last_day
    } else {
        start.day().min(last_day)
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| LedgerError::InvalidDate {
        message: format!("no such date: {year}-{month:02}-{day:02}"),
    })
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_schedule_shape_and_round_trip() {
        let schedule = Schedule::generate(
            Money::from_major(13_800),
            Rate::from_decimal(dec!(0.24)),
            6,
            date(2024, 1, 15),
        )
        .unwrap();

        assert_eq!(schedule.periods.len(), 6);
        assert_eq!(schedule.installment, Money::from_str_exact("2463.66").unwrap());

        // sum of amounts due reconciles to EMI x tenor exactly
        let sum = schedule
            .periods
            .iter()
            .map(|p| p.amount_due)
            .fold(Money::ZERO, |acc, x| acc + x);
        assert_eq!(sum, Money::from_str_exact("14781.96").unwrap());
        assert_eq!(sum, schedule.installment * dec!(6));
        assert_eq!(schedule.total_payment, sum);
        assert_eq!(schedule.total_interest, Money::from_str_exact("981.96").unwrap());
    }

    #[test]
    fn test_principal_portions_reconcile_exactly() {
        let principal = Money::from_major(13_800);
        let schedule = Schedule::generate(
            principal,
            Rate::from_decimal(dec!(0.24)),
            6,
            date(2024, 1, 15),
        )
        .unwrap();

        let principal_sum = schedule
            .periods
            .iter()
            .map(|p| p.principal_portion)
            .fold(Money::ZERO, |acc, x| acc + x);
        assert_eq!(principal_sum, principal);

        let last = schedule.periods.last().unwrap();
        assert_eq!(last.ending_balance, Money::ZERO);
        assert_eq!(last.principal_portion, Money::from_str_exact("2415.34").unwrap());
        assert_eq!(last.interest_portion, Money::from_str_exact("48.32").unwrap());
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let schedule =
            Schedule::generate(Money::from_major(13_800), Rate::ZERO, 6, date(2024, 3, 5)).unwrap();

        for p in &schedule.periods {
            assert_eq!(p.amount_due, Money::from_major(2_300));
            assert_eq!(p.interest_portion, Money::ZERO);
        }
    }

    #[test]
    fn test_zero_rate_uneven_residue() {
        // 1000 / 3 does not divide evenly; the final period's split carries
        // the residue so the principal column still reconciles
        let principal = Money::from_major(1_000);
        let schedule = Schedule::generate(principal, Rate::ZERO, 3, date(2024, 3, 5)).unwrap();

        let sum = schedule
            .periods
            .iter()
            .map(|p| p.amount_due)
            .fold(Money::ZERO, |acc, x| acc + x);
        assert_eq!(sum, schedule.installment * dec!(3));

        let principal_sum = schedule
            .periods
            .iter()
            .map(|p| p.principal_portion)
            .fold(Money::ZERO, |acc, x| acc + x);
        assert_eq!(principal_sum, principal);
        assert_eq!(schedule.periods.last().unwrap().ending_balance, Money::ZERO);
    }

    #[test]
    fn test_due_dates_follow_start_day() {
        let schedule = Schedule::generate(
            Money::from_major(10_000),
            Rate::from_decimal(dec!(0.24)),
            4,
            date(2024, 1, 15),
        )
        .unwrap();

        let dates: Vec<NaiveDate> = schedule.periods.iter().map(|p| p.due_date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 2, 15), date(2024, 3, 15), date(2024, 4, 15), date(2024, 5, 15)]
        );
    }

    #[test]
    fn test_day_31_clamps_to_short_months() {
        // non-leap february: the 31st clamps to the 28th, not an error
        let schedule = Schedule::generate(
            Money::from_major(10_000),
            Rate::from_decimal(dec!(0.24)),
            3,
            date(2022, 12, 31),
        )
        .unwrap();

        let dates: Vec<NaiveDate> = schedule.periods.iter().map(|p| p.due_date).collect();
        assert_eq!(dates, vec![date(2023, 1, 31), date(2023, 2, 28), date(2023, 3, 31)]);
    }

    #[test]
    fn test_leap_february_clamps_to_29() {
        assert_eq!(add_months_clamped(date(2024, 1, 31), 1).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_end_of_month_start_sticks_to_month_end() {
        // april 30 is the last day of its month, so every due date lands on
        // the last day of its month rather than a fixed day number
        let schedule = Schedule::generate(
            Money::from_major(10_000),
            Rate::from_decimal(dec!(0.24)),
            3,
            date(2024, 4, 30),
        )
        .unwrap();

        let dates: Vec<NaiveDate> = schedule.periods.iter().map(|p| p.due_date).collect();
        assert_eq!(dates, vec![date(2024, 5, 31), date(2024, 6, 30), date(2024, 7, 31)]);
    }

    #[test]
    fn test_year_rollover() {
        assert_eq!(add_months_clamped(date(2024, 11, 15), 3).unwrap(), date(2025, 2, 15));
        assert_eq!(add_months_clamped(date(2024, 12, 5), 1).unwrap(), date(2025, 1, 5));
    }

    #[test]
    fn test_to_installments_carries_schedule() {
        let loan_id = Uuid::new_v4();
        let schedule = Schedule::generate(
            Money::from_major(13_800),
            Rate::from_decimal(dec!(0.24)),
            6,
            date(2024, 1, 15),
        )
        .unwrap();

        let installments = schedule.to_installments(loan_id);
        assert_eq!(installments.len(), 6);
        for (inst, period) in installments.iter().zip(&schedule.periods) {
            assert_eq!(inst.loan_id, loan_id);
            assert_eq!(inst.index, period.index);
            assert_eq!(inst.due_date, period.due_date);
            assert_eq!(inst.amount_due, period.amount_due);
            assert_eq!(inst.amount_paid, Money::ZERO);
            assert_eq!(inst.penalty_applied, Money::ZERO);
        }
    }

    #[test]
    fn test_generator_rejects_invalid_terms() {
        let err = Schedule::generate(
            Money::ZERO,
            Rate::from_decimal(dec!(0.24)),
            6,
            date(2024, 1, 15),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidPrincipal { .. }));
    }
}
