//! # Genesis Executor
//!
//! Applies a validated payload as a single unit:
//!
//! 1. Register the hub metadata of the bridged denom
//! 2. Credit every genesis account
//! 3. Settle the rollapp's pending sale plan (only with a genesis transfer)
//! 4. Bind the canonical channel and flip the gate
//!
//! All steps write into one [`CacheStore`] scope. The scope reaches the
//! parent store only after step 4 succeeds.

use tracing::debug;

use crate::adapters::{CacheStore, ChannelGate};
use crate::algorithms::{bridged_denom, hub_denom_metadata};
use crate::domain::{ChannelId, GenesisBridgeError, RollappId, ValidatedPayload};
use crate::ports::{DenomRegistry, KeyValueStore, Ledger, RollappRegistry, SaleEngine};

/// Channel a payload is applied to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenesisTarget {
    /// Hub port the payload arrived on.
    pub port: String,
    /// Hub channel the payload arrived on.
    pub channel_id: ChannelId,
    /// Rollapp bound to the channel.
    pub rollapp_id: RollappId,
}

/// Summary of an applied genesis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenesisReceipt {
    /// Hub denom of the rollapp token.
    pub bridged_denom: String,
    /// Number of genesis accounts credited.
    pub accounts_funded: usize,
    /// Sale plan settled during genesis.
    pub settled_plan: Option<u64>,
}

/// Executes validated payloads against the collaborators.
pub struct GenesisExecutor<'a, RR, DR, LG, SE> {
    rollapps: &'a RR,
    denoms: &'a DR,
    ledger: &'a LG,
    sales: &'a SE,
    gate: &'a ChannelGate,
}

impl<'a, RR, DR, LG, SE> GenesisExecutor<'a, RR, DR, LG, SE>
where
    RR: RollappRegistry,
    DR: DenomRegistry,
    LG: Ledger,
    SE: SaleEngine,
{
    /// Create an executor over borrowed collaborators.
    pub fn new(
        rollapps: &'a RR,
        denoms: &'a DR,
        ledger: &'a LG,
        sales: &'a SE,
        gate: &'a ChannelGate,
    ) -> Self {
        Self {
            rollapps,
            denoms,
            ledger,
            sales,
            gate,
        }
    }

    /// Apply `validated` to `target`, committing into `store` only on success.
    pub fn execute(
        &self,
        store: &mut dyn KeyValueStore,
        target: &GenesisTarget,
        validated: &ValidatedPayload,
    ) -> Result<GenesisReceipt, GenesisBridgeError> {
        let mut scope = CacheStore::new(store);
        match self.apply(&mut scope, target, validated) {
            Ok(receipt) => {
                debug!(
                    channel_id = %target.channel_id,
                    writes = scope.pending_writes(),
                    "[qc-18] Committing genesis scope"
                );
                scope.commit()?;
                Ok(receipt)
            }
            Err(e) => {
                debug!(
                    channel_id = %target.channel_id,
                    writes = scope.pending_writes(),
                    code = e.code(),
                    "[qc-18] Discarding genesis scope"
                );
                scope.discard();
                Err(e)
            }
        }
    }

    fn apply(
        &self,
        scope: &mut CacheStore<'_>,
        target: &GenesisTarget,
        validated: &ValidatedPayload,
    ) -> Result<GenesisReceipt, GenesisBridgeError> {
        let payload = validated.payload();
        let denom = bridged_denom(
            &target.port,
            &target.channel_id,
            &payload.genesis_info.native_denom.base,
        );

        self.denoms
            .register(scope, &hub_denom_metadata(&payload.native_denom, &denom))?;
        debug!(channel_id = %target.channel_id, denom = %denom, "[qc-18] Denom registered");

        for account in validated.genesis_accounts() {
            self.ledger
                .credit(scope, &account.address, &denom, account.amount)?;
        }
        debug!(
            channel_id = %target.channel_id,
            accounts = validated.genesis_accounts().len(),
            total = %validated.genesis_accounts_total(),
            "[qc-18] Genesis accounts credited"
        );

        let mut settled_plan = None;
        if validated.has_transfer() {
            if let Some(plan) = self.sales.pending_plan(scope, &target.rollapp_id)? {
                let funded = self.ledger.balance(scope, &plan.holding_account, &denom)?;
                self.sales.settle(scope, plan.plan_id, &denom, funded)?;
                debug!(
                    rollapp_id = %target.rollapp_id,
                    plan_id = plan.plan_id,
                    funded = %funded,
                    "[qc-18] Sale plan settled"
                );
                settled_plan = Some(plan.plan_id);
            }
        }

        self.rollapps
            .bind_channel(scope, &target.rollapp_id, &target.channel_id)?;
        self.gate
            .mark_bridged(scope, &target.channel_id, &target.rollapp_id)?;

        Ok(GenesisReceipt {
            bridged_denom: denom,
            accounts_funded: validated.genesis_accounts().len(),
            settled_plan,
        })
    }
}
