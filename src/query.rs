// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! GraphQL query surface
//!
//! Each field maps onto one [`EnergyAggregator`] entry point. The aggregator is
//! shared through schema data as an `Arc<EnergyAggregator>`.

use async_graphql::{Context, EmptyMutation, EmptySubscription, Error, Object, Result, Schema};
use std::sync::Arc;
use tracing::info;

use crate::aggregator::EnergyAggregator;
use crate::config::constants::query::DEFAULT_BLOCK_PAGE_LIMIT;
use crate::types::Transaction;

/// Fixed answer of the liveness query
pub const HELLO_MESSAGE: &str = "Hi there, good luck with the assignment!";

/// Schema served by the API
pub type EnergyscanSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Builds the schema with `aggregator` attached as shared data
pub fn build_schema(aggregator: Arc<EnergyAggregator>) -> EnergyscanSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(aggregator)
        .finish()
}

/// Negative GraphQL integers are treated as zero
fn non_negative(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}

#[derive(Debug, Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Liveness check
    async fn hello(&self) -> &'static str {
        HELLO_MESSAGE
    }

    /// Transactions of a block with their energy cost, paginated
    async fn energy_consumption_for_block(
        &self,
        ctx: &Context<'_>,
        block_hash: String,
        #[graphql(default = 50)] limit: Option<i32>,
        #[graphql(default = 0)] offset: Option<i32>,
    ) -> Result<Vec<Transaction>> {
        let aggregator = ctx.data::<Arc<EnergyAggregator>>()?;
        info!(block_hash = %block_hash, ?limit, ?offset, "energyConsumptionForBlock");

        // An explicit null falls back to the same window as an omitted argument
        let limit = limit.map_or(DEFAULT_BLOCK_PAGE_LIMIT, non_negative);
        let offset = offset.map_or(0, non_negative);
        let transactions = aggregator
            .fetch_block_transactions(&block_hash, limit, offset)
            .await?;
        Ok(transactions)
    }

    /// Total energy of each of the last `days` UTC days, today first
    async fn total_energy_consumption_per_day(
        &self,
        ctx: &Context<'_>,
        days: i32,
    ) -> Result<Vec<f64>> {
        let aggregator = ctx.data::<Arc<EnergyAggregator>>()?;
        info!(days, "totalEnergyConsumptionPerDay");

        Ok(aggregator
            .total_energy_consumption_per_day(non_negative(days))
            .await)
    }

    /// Total energy of every transaction of an address
    async fn total_energy_consumption_by_address(
        &self,
        ctx: &Context<'_>,
        address: String,
    ) -> Result<f64> {
        let aggregator = ctx.data::<Arc<EnergyAggregator>>()?;
        info!(address = %address, "totalEnergyConsumptionByAddress");

        aggregator
            .total_energy_consumption_by_address(&address)
            .await
            .map_err(|e| {
                Error::new(format!(
                    "Failed to calculate total energy consumption for address: {e}"
                ))
            })
    }
}
