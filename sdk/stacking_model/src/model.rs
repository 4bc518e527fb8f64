use std::collections::BTreeMap;

use stacking::{dividends, plans::PLAN_TABLE, ContractError, Deposit, DepositInfo, Plan, UserInfo};

use crate::error::ModelError;

/// One depositor's record and deposit history.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModelUser {
    pub checkpoint: u64,
    pub seed_income: i128,
    pub withdrawn: i128,
    pub total_deposited: i128,
    pub deposits: Vec<Deposit>,
}

impl ModelUser {
    fn new(checkpoint: u64) -> Self {
        ModelUser {
            checkpoint,
            seed_income: 0,
            withdrawn: 0,
            total_deposited: 0,
            deposits: Vec::new(),
        }
    }
}

/// The full ledger state plus the token wallets it moves funds between.
///
/// Every mutating method validates and computes the complete new state first
/// and commits only when nothing failed, so a rejected call leaves the model
/// untouched.
#[derive(Clone, Debug)]
pub struct StackingModel<A: Ord + Clone> {
    now: u64,
    owner: Option<A>,
    min_amount: i128,
    plans: Vec<Plan>,
    wallets: BTreeMap<A, i128>,
    users: BTreeMap<A, ModelUser>,
    total_stacked: i128,
    admin_tokens: i128,
    reserve: i128,
}

impl<A: Ord + Clone> StackingModel<A> {
    /// A freshly initialized ledger for a token with `decimals` decimals.
    pub fn new(owner: A, decimals: u32, now: u64) -> Result<Self, ModelError> {
        Ok(StackingModel {
            now,
            owner: Some(owner),
            min_amount: dividends::min_amount_for_decimals(decimals)?,
            plans: PLAN_TABLE.to_vec(),
            wallets: BTreeMap::new(),
            users: BTreeMap::new(),
            total_stacked: 0,
            admin_tokens: 0,
            reserve: 0,
        })
    }

    // ── Clock and wallets ───────────────────────────────────────────────────

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn set_time(&mut self, now: u64) {
        self.now = now;
    }

    pub fn advance(&mut self, seconds: u64) {
        self.now = self.now.saturating_add(seconds);
    }

    /// Credit `amount` to a wallet outside the ledger.
    pub fn mint(&mut self, account: &A, amount: i128) {
        let balance = self.wallets.entry(account.clone()).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    pub fn balance_of(&self, account: &A) -> i128 {
        self.wallets.get(account).copied().unwrap_or(0)
    }

    fn debited(&self, account: &A, amount: i128) -> Result<i128, ModelError> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(ModelError::InsufficientFunds {
                needed: amount,
                available,
            });
        }
        Ok(available - amount)
    }

    fn credited(&self, account: &A, amount: i128) -> Result<i128, ModelError> {
        self.balance_of(account)
            .checked_add(amount)
            .ok_or(ModelError::Rejected(ContractError::MathOverflow))
    }

    // ── Operations ──────────────────────────────────────────────────────────

    pub fn deposit_tokens(&mut self, user: &A, plan: u32, amount: i128) -> Result<u32, ModelError> {
        let plan_info = self.get_plan_info(plan)?;
        if amount < self.min_amount {
            return Err(ContractError::BelowMinimumDeposit.into());
        }

        let finish = dividends::finish_time(self.now, plan_info.time)?;
        let mut record = self
            .users
            .get(user)
            .cloned()
            .unwrap_or_else(|| ModelUser::new(self.now));
        let deposit_id =
            u32::try_from(record.deposits.len()).map_err(|_| ContractError::MathOverflow)?;
        record.total_deposited = record
            .total_deposited
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        let total_stacked = self
            .total_stacked
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        let reserve = self
            .reserve
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        let wallet = self.debited(user, amount)?;

        record.deposits.push(Deposit {
            plan,
            percent: plan_info.percent,
            amount,
            start: self.now,
            finish,
            is_taken: false,
        });
        self.users.insert(user.clone(), record);
        self.wallets.insert(user.clone(), wallet);
        self.total_stacked = total_stacked;
        self.reserve = reserve;

        Ok(deposit_id)
    }

    pub fn withdraw(&mut self, user: &A, deposit_id: u32) -> Result<i128, ModelError> {
        let mut record = self
            .users
            .get(user)
            .cloned()
            .ok_or(ContractError::InvalidDepositId)?;
        let index = deposit_id as usize;
        let deposit = record
            .deposits
            .get(index)
            .cloned()
            .ok_or(ContractError::InvalidDepositId)?;
        if deposit.is_taken {
            return Err(ContractError::DepositAlreadyTaken.into());
        }

        let settlement = dividends::settle(
            deposit.amount,
            deposit.percent,
            deposit.start,
            deposit.finish,
            self.now,
        )?;
        if self.admin_tokens < settlement.dividends {
            return Err(ContractError::InsufficientRewards.into());
        }
        let admin_tokens = self
            .admin_tokens
            .checked_sub(settlement.dividends)
            .and_then(|pool| pool.checked_add(settlement.penalty))
            .ok_or(ContractError::MathOverflow)?;
        let total_stacked = self
            .total_stacked
            .checked_sub(deposit.amount)
            .ok_or(ContractError::MathOverflow)?;
        let reserve = self
            .reserve
            .checked_sub(settlement.payout)
            .ok_or(ContractError::MathOverflow)?;
        record.withdrawn = record
            .withdrawn
            .checked_add(settlement.payout)
            .ok_or(ContractError::MathOverflow)?;
        record.checkpoint = self.now;
        record.deposits[index].is_taken = true;
        let wallet = self.credited(user, settlement.payout)?;

        self.users.insert(user.clone(), record);
        self.wallets.insert(user.clone(), wallet);
        self.admin_tokens = admin_tokens;
        self.total_stacked = total_stacked;
        self.reserve = reserve;

        Ok(settlement.payout)
    }

    pub fn add_tokens(&mut self, from: &A, amount: i128) -> Result<(), ModelError> {
        if amount < 0 {
            return Err(ContractError::InvalidAmount.into());
        }
        let admin_tokens = self
            .admin_tokens
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        let reserve = self
            .reserve
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        let wallet = self.debited(from, amount)?;

        self.wallets.insert(from.clone(), wallet);
        self.admin_tokens = admin_tokens;
        self.reserve = reserve;

        Ok(())
    }

    pub fn withdraw_tokens(&mut self, caller: &A, amount: i128) -> Result<(), ModelError> {
        self.require_owner(caller)?;
        if amount < 0 {
            return Err(ContractError::InvalidAmount.into());
        }
        if amount > self.admin_tokens {
            return Err(ContractError::ExceedsAdminTokens.into());
        }
        let wallet = self.credited(caller, amount)?;

        self.wallets.insert(caller.clone(), wallet);
        self.admin_tokens -= amount;
        self.reserve -= amount;

        Ok(())
    }

    pub fn transfer_ownership(&mut self, caller: &A, new_owner: A) -> Result<(), ModelError> {
        self.require_owner(caller)?;
        self.owner = Some(new_owner);
        Ok(())
    }

    pub fn renounce_ownership(&mut self, caller: &A) -> Result<(), ModelError> {
        self.require_owner(caller)?;
        self.owner = None;
        Ok(())
    }

    fn require_owner(&self, caller: &A) -> Result<(), ModelError> {
        match &self.owner {
            Some(owner) if owner == caller => Ok(()),
            _ => Err(ContractError::Unauthorized.into()),
        }
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn get_plan_info(&self, plan: u32) -> Result<Plan, ModelError> {
        self.plans
            .get(plan as usize)
            .cloned()
            .ok_or(ModelError::Rejected(ContractError::InvalidPlan))
    }

    fn deposit(&self, user: &A, deposit_id: u32) -> Result<&Deposit, ModelError> {
        self.users
            .get(user)
            .and_then(|record| record.deposits.get(deposit_id as usize))
            .ok_or(ModelError::Rejected(ContractError::InvalidDepositId))
    }

    pub fn get_user_deposit_info(&self, user: &A, deposit_id: u32) -> Result<DepositInfo, ModelError> {
        self.deposit(user, deposit_id)
            .map(|deposit| DepositInfo::from(deposit.clone()))
    }

    pub fn get_user_dividends(&self, user: &A, deposit_id: u32) -> Result<i128, ModelError> {
        let deposit = self.deposit(user, deposit_id)?;
        let elapsed =
            dividends::accrual_elapsed(deposit.start, deposit.finish, self.now, deposit.is_taken);
        Ok(dividends::compute_dividends(
            deposit.amount,
            deposit.percent,
            elapsed,
        )?)
    }

    pub fn get_user_total_deposits(&self, user: &A) -> i128 {
        self.users
            .get(user)
            .map(|record| record.total_deposited)
            .unwrap_or(0)
    }

    pub fn get_user_amount_of_deposits(&self, user: &A) -> u32 {
        self.users
            .get(user)
            .map(|record| record.deposits.len() as u32)
            .unwrap_or(0)
    }

    pub fn users(&self, user: &A) -> UserInfo {
        let record = self.users.get(user);
        UserInfo {
            checkpoint: record.map(|r| r.checkpoint).unwrap_or(0),
            seed_income: record.map(|r| r.seed_income).unwrap_or(0),
            withdrawn: record.map(|r| r.withdrawn).unwrap_or(0),
        }
    }

    pub fn user(&self, user: &A) -> Option<&ModelUser> {
        self.users.get(user)
    }

    pub fn get_contract_balance(&self) -> i128 {
        self.reserve
    }

    pub fn total_stacked(&self) -> i128 {
        self.total_stacked
    }

    pub fn admin_tokens(&self) -> i128 {
        self.admin_tokens
    }

    pub fn owner(&self) -> Option<&A> {
        self.owner.as_ref()
    }

    pub fn min_amount(&self) -> i128 {
        self.min_amount
    }

    /// Check the ledger's accounting invariants.
    ///
    /// Open deposits sum to `total_stacked`, and the reserve is exactly
    /// principal plus the admin pool.
    pub fn invariants_hold(&self) -> bool {
        let open: i128 = self
            .users
            .values()
            .flat_map(|record| record.deposits.iter())
            .filter(|deposit| !deposit.is_taken)
            .map(|deposit| deposit.amount)
            .sum();
        open == self.total_stacked
            && self.total_stacked.checked_add(self.admin_tokens) == Some(self.reserve)
            && self.admin_tokens >= 0
    }
}
