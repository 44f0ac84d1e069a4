// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Day-level operations: block lists by date and per-day energy rollups

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn, Instrument};

use super::EnergyAggregator;
use crate::cache::CacheKey;
use crate::config::constants::{concurrency, MILLIS_PER_DAY};
use crate::errors::AggregationError;
use crate::tracing::spans;
use crate::types::BlockRef;

/// UTC midnights of `today` and the `days - 1` days before it, in epoch millis
///
/// Day 0 is `today`; the list runs backward one day per entry.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use energyscan::day_starts;
///
/// let today = NaiveDate::from_ymd_opt(2023, 11, 15).unwrap();
/// assert_eq!(
///     day_starts(today, 2),
///     vec![1_700_006_400_000, 1_699_920_000_000]
/// );
/// ```
pub fn day_starts(today: NaiveDate, days: usize) -> Vec<i64> {
    let midnight = today.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
    (0..days)
        .map(|offset| midnight - offset as i64 * MILLIS_PER_DAY)
        .collect()
}

fn iso_date(date_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(date_millis)
        .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
        .unwrap_or_else(|| date_millis.to_string())
}

impl EnergyAggregator {
    /// Lists the blocks mined on the UTC day starting at `date_millis`
    ///
    /// The raw upstream list is cached under `blocksByDate:<millis>` and served
    /// from there on later calls.
    ///
    /// # Errors
    ///
    /// - [`AggregationError::BlocksByDate`] when the upstream call fails
    /// - [`AggregationError::InvalidUpstreamShape`] when upstream does not
    ///   answer with a list of blocks
    pub async fn fetch_block_data_by_date(
        &self,
        date_millis: i64,
    ) -> Result<Vec<BlockRef>, AggregationError> {
        self.load_blocks_by_date(date_millis)
            .instrument(spans::fetch_block_data_by_date(date_millis))
            .await
    }

    /// Energy totals for the last `days` UTC days, today first
    ///
    /// See [`total_energy_consumption_per_day_from`](Self::total_energy_consumption_per_day_from).
    pub async fn total_energy_consumption_per_day(&self, days: usize) -> Vec<f64> {
        let today = Utc::now().date_naive();
        self.total_energy_consumption_per_day_from(today, days).await
    }

    /// Energy totals for `today` and the `days - 1` UTC days before it
    ///
    /// Up to 5 days are processed at once; the result is always in request
    /// order `[today, yesterday, ...]`. Each day is served from
    /// `totalEnergyConsumption:<millis>` when present (a cached `0` counts).
    /// Otherwise its blocks are listed and summed, and the total is cached. A
    /// day that fails is logged, counted, cached as `0`, and reported as `0`.
    /// This never fails.
    pub async fn total_energy_consumption_per_day_from(
        &self,
        today: NaiveDate,
        days: usize,
    ) -> Vec<f64> {
        let starts = day_starts(today, days);

        stream::iter(starts.into_iter().map(|date_millis| {
            self.day_total(date_millis)
                .instrument(spans::total_energy_consumption_for_day(date_millis))
        }))
        .buffered(concurrency::DAYS)
        .collect::<Vec<f64>>()
        .instrument(spans::total_energy_consumption_per_day(days))
        .await
    }

    async fn day_total(&self, date_millis: i64) -> f64 {
        let key = CacheKey::TotalEnergyConsumption(date_millis);
        if let Some(total) = self.cached::<f64>(&key).await {
            debug!(date_millis, total, "Day total served from cache");
            return total;
        }

        let total = match self.compute_day_total(date_millis).await {
            Ok(total) => total,
            Err(e) => {
                self.failures.record_day();
                warn!(date_millis, error = %e, "Error processing date, recording zero");
                0.0
            }
        };

        self.store(key, &total).await;
        total
    }

    async fn compute_day_total(&self, date_millis: i64) -> Result<f64, AggregationError> {
        let blocks = self.fetch_block_data_by_date(date_millis).await?;
        if blocks.is_empty() {
            info!(date_millis, "No blocks found for date");
            return Ok(0.0);
        }
        Ok(self.total_energy_consumption(&blocks).await)
    }

    async fn load_blocks_by_date(&self, date_millis: i64) -> Result<Vec<BlockRef>, AggregationError> {
        let key = CacheKey::BlocksByDate(date_millis);
        if let Some(blocks) = self.cached::<Vec<BlockRef>>(&key).await {
            return Ok(blocks);
        }

        let raw = self
            .source
            .blocks_for_date(date_millis)
            .await
            .map_err(|source| AggregationError::BlocksByDate {
                date_millis,
                source,
            })?;

        if !raw.is_array() {
            return Err(AggregationError::invalid_shape(
                date_millis,
                "No blocks data returned for the given date.",
            ));
        }

        let blocks: Vec<BlockRef> = serde_json::from_value(raw.clone()).map_err(|e| {
            AggregationError::invalid_shape(date_millis, format!("Malformed block list: {e}"))
        })?;

        info!(
            count = blocks.len(),
            date = %iso_date(date_millis),
            "Fetched blocks for date"
        );

        self.store(key, &raw).await;
        Ok(blocks)
    }
}
