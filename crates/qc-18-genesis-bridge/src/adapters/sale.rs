//! # Sale Engine Adapter
//!
//! Store-backed sale plans. Pricing and bonding-curve logic live in the sale
//! subsystem; this adapter only tracks plans and their settlement.

use primitive_types::U256;

use crate::domain::{GenesisBridgeError, SalePlan};
use crate::ports::{KeyValueStore, SaleEngine};

use super::store::{read_record, write_record};

const PLAN_PREFIX: &str = "sale/plan/";
const ROLLAPP_PREFIX: &str = "sale/rollapp/";
const NEXT_PLAN_ID_KEY: &[u8] = b"sale/next_plan_id";

fn plan_key(plan_id: u64) -> Vec<u8> {
    format!("{PLAN_PREFIX}{plan_id:020}").into_bytes()
}

fn rollapp_key(rollapp_id: &str) -> Vec<u8> {
    format!("{ROLLAPP_PREFIX}{rollapp_id}").into_bytes()
}

/// Sale engine over a key-value store.
#[derive(Clone, Debug, Default)]
pub struct KvSaleEngine;

impl KvSaleEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self
    }

    /// Create a plan for `rollapp_id`. One plan per rollapp.
    pub fn create_plan(
        &self,
        store: &mut dyn KeyValueStore,
        rollapp_id: &str,
        holding_account: &str,
        total_allocation: U256,
    ) -> Result<SalePlan, GenesisBridgeError> {
        if store.exists(&rollapp_key(rollapp_id))? {
            return Err(GenesisBridgeError::SettlementFailure(format!(
                "rollapp {rollapp_id} already has a plan"
            )));
        }

        let plan_id = read_record::<u64>(store, NEXT_PLAN_ID_KEY)?.unwrap_or(1);
        let plan = SalePlan {
            plan_id,
            rollapp_id: rollapp_id.to_string(),
            holding_account: holding_account.to_string(),
            total_allocation,
            settled_denom: None,
        };

        write_record(store, &plan_key(plan_id), &plan)?;
        write_record(store, &rollapp_key(rollapp_id), &plan_id)?;
        write_record(store, NEXT_PLAN_ID_KEY, &(plan_id + 1))?;
        Ok(plan)
    }

    /// Plan by id.
    pub fn plan(
        &self,
        store: &dyn KeyValueStore,
        plan_id: u64,
    ) -> Result<Option<SalePlan>, GenesisBridgeError> {
        read_record(store, &plan_key(plan_id))
    }
}

impl SaleEngine for KvSaleEngine {
    fn pending_plan(
        &self,
        store: &dyn KeyValueStore,
        rollapp_id: &str,
    ) -> Result<Option<SalePlan>, GenesisBridgeError> {
        let Some(plan_id) = read_record::<u64>(store, &rollapp_key(rollapp_id))? else {
            return Ok(None);
        };
        Ok(self.plan(store, plan_id)?.filter(|plan| !plan.is_settled()))
    }

    fn settle(
        &self,
        store: &mut dyn KeyValueStore,
        plan_id: u64,
        denom: &str,
        funded: U256,
    ) -> Result<(), GenesisBridgeError> {
        let mut plan = self
            .plan(store, plan_id)?
            .ok_or_else(|| {
                GenesisBridgeError::SettlementFailure(format!("plan {plan_id} not found"))
            })?;

        if let Some(settled) = &plan.settled_denom {
            return Err(GenesisBridgeError::SettlementFailure(format!(
                "plan {plan_id} already settled in {settled}"
            )));
        }
        if funded < plan.total_allocation {
            return Err(GenesisBridgeError::SettlementFailure(format!(
                "plan {plan_id} holds {funded}, needs {}",
                plan.total_allocation
            )));
        }

        plan.settled_denom = Some(denom.to_string());
        write_record(store, &plan_key(plan_id), &plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemoryKVStore;

    #[test]
    fn test_create_plan_assigns_ids() {
        let mut store = InMemoryKVStore::new();
        let engine = KvSaleEngine::new();

        let first = engine
            .create_plan(&mut store, "rollapp_1-1", "ethm1plan", U256::from(10u64))
            .unwrap();
        let second = engine
            .create_plan(&mut store, "rollapp_2-1", "ethm1plan", U256::from(10u64))
            .unwrap();
        assert_eq!(first.plan_id, 1);
        assert_eq!(second.plan_id, 2);
        assert!(engine
            .create_plan(&mut store, "rollapp_1-1", "ethm1plan", U256::one())
            .is_err());
    }

    #[test]
    fn test_settle_plan() {
        let mut store = InMemoryKVStore::new();
        let engine = KvSaleEngine::new();
        let plan = engine
            .create_plan(&mut store, "rollapp_1-1", "ethm1plan", U256::from(10u64))
            .unwrap();

        assert_eq!(
            engine.pending_plan(&store, "rollapp_1-1").unwrap(),
            Some(plan.clone())
        );
        engine
            .settle(&mut store, plan.plan_id, "ibc/ABC", U256::from(10u64))
            .unwrap();

        assert_eq!(engine.pending_plan(&store, "rollapp_1-1").unwrap(), None);
        let settled = engine.plan(&store, plan.plan_id).unwrap().unwrap();
        assert_eq!(settled.settled_denom.as_deref(), Some("ibc/ABC"));
    }

    #[test]
    fn test_settle_underfunded() {
        let mut store = InMemoryKVStore::new();
        let engine = KvSaleEngine::new();
        let plan = engine
            .create_plan(&mut store, "rollapp_1-1", "ethm1plan", U256::from(10u64))
            .unwrap();

        let err = engine
            .settle(&mut store, plan.plan_id, "ibc/ABC", U256::from(9u64))
            .unwrap_err();
        assert_eq!(err.code(), "settlement_failure");
        assert!(engine.pending_plan(&store, "rollapp_1-1").unwrap().is_some());
    }

    #[test]
    fn test_settle_twice() {
        let mut store = InMemoryKVStore::new();
        let engine = KvSaleEngine::new();
        let plan = engine
            .create_plan(&mut store, "rollapp_1-1", "ethm1plan", U256::one())
            .unwrap();
        engine
            .settle(&mut store, plan.plan_id, "ibc/ABC", U256::one())
            .unwrap();
        assert!(engine
            .settle(&mut store, plan.plan_id, "ibc/ABC", U256::one())
            .is_err());
    }

    #[test]
    fn test_no_plan() {
        let store = InMemoryKVStore::new();
        assert_eq!(
            KvSaleEngine::new().pending_plan(&store, "rollapp_1-1").unwrap(),
            None
        );
    }
}
