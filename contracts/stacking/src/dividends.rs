//! Pure accounting arithmetic for fixed-term deposits.
//!
//! Nothing in here touches storage, so the same functions back both the
//! contract entry points and the off-chain reference model.

use crate::errors::ContractError;

/// Denominator for every percentage expressed in basis points.
pub const PERCENT_DIVIDER: i128 = 10_000;

/// One plan day, in seconds.
pub const TIME_STEP: u64 = 86_400;

/// Reference year used for pro-rata accrual.
pub const ONE_YEAR: u64 = 365 * TIME_STEP;

/// Share of principal kept when a deposit is withdrawn before `finish`.
pub const EARLY_WITHDRAW_PENALTY: i128 = 300;

/// Outcome of closing a deposit at a given instant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Settlement {
    /// Tokens sent back to the depositor.
    pub payout: i128,
    /// Dividends drawn from the admin pool (zero on early exit).
    pub dividends: i128,
    /// Principal forfeited to the admin pool (zero at maturity).
    pub penalty: i128,
    /// Closed before `finish`.
    pub early: bool,
}

impl Settlement {
    pub fn is_early(&self) -> bool {
        self.early
    }
}

/// Smallest accepted deposit: 0.001 of a whole token, never below one unit.
pub fn min_amount_for_decimals(decimals: u32) -> Result<i128, ContractError> {
    let one_token = 10i128
        .checked_pow(decimals)
        .ok_or(ContractError::MathOverflow)?;
    Ok((one_token / 1_000).max(1))
}

/// Timestamp at which a deposit made at `start` on a `days`-long plan matures.
pub fn finish_time(start: u64, days: u64) -> Result<u64, ContractError> {
    days.checked_mul(TIME_STEP)
        .and_then(|span| start.checked_add(span))
        .ok_or(ContractError::MathOverflow)
}

/// Seconds of accrual a deposit has earned at `now`.
///
/// Accrual stops at `finish`, and a taken deposit has nothing left to earn.
pub fn accrual_elapsed(start: u64, finish: u64, now: u64, is_taken: bool) -> u64 {
    if is_taken {
        return 0;
    }
    now.min(finish).saturating_sub(start)
}

/// `amount * percent / PERCENT_DIVIDER * elapsed / ONE_YEAR`, floored at each
/// division.
pub fn compute_dividends(amount: i128, percent: u32, elapsed: u64) -> Result<i128, ContractError> {
    amount
        .checked_mul(i128::from(percent))
        .map(|yearly| yearly / PERCENT_DIVIDER)
        .and_then(|yearly| yearly.checked_mul(i128::from(elapsed)))
        .map(|accrued| accrued / i128::from(ONE_YEAR))
        .ok_or(ContractError::MathOverflow)
}

/// `EARLY_WITHDRAW_PENALTY` of `amount`, rounded up so any positive deposit
/// forfeits at least one unit.
pub fn early_withdraw_penalty(amount: i128) -> Result<i128, ContractError> {
    if amount <= 0 {
        return Ok(0);
    }
    amount
        .checked_mul(EARLY_WITHDRAW_PENALTY)
        .and_then(|scaled| scaled.checked_add(PERCENT_DIVIDER - 1))
        .map(|scaled| scaled / PERCENT_DIVIDER)
        .ok_or(ContractError::MathOverflow)
}

/// Close an untaken deposit at `now`.
///
/// At or after `finish` the depositor receives principal plus the full
/// accrued dividend. Before `finish` the accrued dividend is forfeited and a
/// penalty is kept out of principal.
pub fn settle(
    amount: i128,
    percent: u32,
    start: u64,
    finish: u64,
    now: u64,
) -> Result<Settlement, ContractError> {
    if now >= finish {
        let elapsed = accrual_elapsed(start, finish, now, false);
        let dividends = compute_dividends(amount, percent, elapsed)?;
        let payout = amount
            .checked_add(dividends)
            .ok_or(ContractError::MathOverflow)?;
        return Ok(Settlement {
            payout,
            dividends,
            penalty: 0,
            early: false,
        });
    }

    let penalty = early_withdraw_penalty(amount)?;
    let payout = amount
        .checked_sub(penalty)
        .ok_or(ContractError::MathOverflow)?;
    Ok(Settlement {
        payout,
        dividends: 0,
        penalty,
        early: true,
    })
}
