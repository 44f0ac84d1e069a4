// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for the GraphQL surface
//!
//! Queries run directly against the schema, and once through the HTTP router
//! to check the served paths.

mod helpers;

use std::sync::Arc;

use energyscan::{build_schema, energy_cost, serve_api, EnergyscanSchema, HELLO_MESSAGE};
use helpers::{aggregator_with, numbered_txs, raw_block, MockBlockSource};
use serde_json::{json, Value};
use tokio::net::TcpListener;

fn schema_over(source: MockBlockSource) -> EnergyscanSchema {
    let (aggregator, _, _) = aggregator_with(source);
    build_schema(Arc::new(aggregator))
}

async fn execute(schema: &EnergyscanSchema, query: &str) -> Value {
    let response = schema.execute(query).await;
    assert!(
        response.errors.is_empty(),
        "Unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().unwrap()
}

async fn execute_err(schema: &EnergyscanSchema, query: &str) -> String {
    let response = schema.execute(query).await;
    assert_eq!(response.errors.len(), 1, "Expected exactly one error");
    response.errors[0].message.clone()
}

#[tokio::test]
async fn test_hello() {
    let schema = schema_over(MockBlockSource::new());

    let data = execute(&schema, "{ hello }").await;

    assert_eq!(data, json!({ "hello": HELLO_MESSAGE }));
}

#[tokio::test]
async fn test_energy_consumption_for_block() {
    let schema = schema_over(
        MockBlockSource::new().with_block(raw_block("abc", Some(1000), &[("t0", 250)])),
    );

    let data = execute(
        &schema,
        r#"{ energyConsumptionForBlock(blockHash: "abc", limit: 50, offset: 0) { hash energyCost } }"#,
    )
    .await;

    assert_eq!(
        data,
        json!({ "energyConsumptionForBlock": [{ "hash": "t0", "energyCost": 1140.0 }] })
    );
}

#[tokio::test]
async fn test_energy_consumption_for_block_default_limit() {
    let transactions: Vec<(String, u64)> = (0..60).map(|i| (format!("t{i}"), 10)).collect();
    let pairs: Vec<(&str, u64)> = transactions
        .iter()
        .map(|(hash, size)| (hash.as_str(), *size))
        .collect();
    let schema = schema_over(MockBlockSource::new().with_block(raw_block("big", None, &pairs)));

    let data = execute(
        &schema,
        r#"{ energyConsumptionForBlock(blockHash: "big") { hash } }"#,
    )
    .await;

    let page = data["energyConsumptionForBlock"].as_array().unwrap();
    assert_eq!(page.len(), 50);
    assert_eq!(page[0]["hash"], "t0");
}

#[tokio::test]
async fn test_energy_consumption_for_block_null_window_uses_defaults() {
    let transactions: Vec<(String, u64)> = (0..60).map(|i| (format!("t{i}"), 10)).collect();
    let pairs: Vec<(&str, u64)> = transactions
        .iter()
        .map(|(hash, size)| (hash.as_str(), *size))
        .collect();
    let schema = schema_over(MockBlockSource::new().with_block(raw_block("big", None, &pairs)));

    let data = execute(
        &schema,
        r#"{ energyConsumptionForBlock(blockHash: "big", limit: null, offset: null) { hash } }"#,
    )
    .await;

    let page = data["energyConsumptionForBlock"].as_array().unwrap();
    assert_eq!(page.len(), 50);
    assert_eq!(page[0]["hash"], "t0");
}

#[tokio::test]
async fn test_energy_consumption_for_block_negative_window_clamped() {
    let schema = schema_over(
        MockBlockSource::new().with_block(raw_block("abc", None, &[("t0", 1), ("t1", 2)])),
    );

    let data = execute(
        &schema,
        r#"{ energyConsumptionForBlock(blockHash: "abc", offset: -3) { hash } }"#,
    )
    .await;
    assert_eq!(
        data,
        json!({ "energyConsumptionForBlock": [{ "hash": "t0" }, { "hash": "t1" }] })
    );

    let data = execute(
        &schema,
        r#"{ energyConsumptionForBlock(blockHash: "abc", limit: -1) { hash } }"#,
    )
    .await;
    assert_eq!(data, json!({ "energyConsumptionForBlock": [] }));
}

#[tokio::test]
async fn test_energy_consumption_for_block_upstream_error() {
    let schema = schema_over(MockBlockSource::new().with_failing_block("broken"));

    let message = execute_err(
        &schema,
        r#"{ energyConsumptionForBlock(blockHash: "broken") { hash } }"#,
    )
    .await;

    assert!(
        message.starts_with("Failed to fetch block data:"),
        "Unexpected message: {message}"
    );
}

#[tokio::test]
async fn test_total_energy_consumption_per_day_length() {
    let schema = schema_over(MockBlockSource::new());

    let data = execute(&schema, "{ totalEnergyConsumptionPerDay(days: 3) }").await;

    assert_eq!(data, json!({ "totalEnergyConsumptionPerDay": [0.0, 0.0, 0.0] }));
}

#[tokio::test]
async fn test_total_energy_consumption_per_day_negative_days() {
    let schema = schema_over(MockBlockSource::new());

    let data = execute(&schema, "{ totalEnergyConsumptionPerDay(days: -2) }").await;

    assert_eq!(data, json!({ "totalEnergyConsumptionPerDay": [] }));
}

#[tokio::test]
async fn test_total_energy_consumption_by_address() {
    let schema = schema_over(MockBlockSource::new().with_address("addr", numbered_txs("tx", 1)));

    let data = execute(
        &schema,
        r#"{ totalEnergyConsumptionByAddress(address: "addr") }"#,
    )
    .await;

    assert_eq!(data, json!({ "totalEnergyConsumptionByAddress": energy_cost(100.0) }));
}

#[tokio::test]
async fn test_total_energy_consumption_by_address_error() {
    let schema = schema_over(MockBlockSource::new());

    let message = execute_err(
        &schema,
        r#"{ totalEnergyConsumptionByAddress(address: "unknown") }"#,
    )
    .await;

    assert!(
        message.starts_with(
            "Failed to calculate total energy consumption for address: \
             Failed to fetch transactions for address:"
        ),
        "Unexpected message: {message}"
    );
}

#[tokio::test]
async fn test_api_serves_root_and_graphql_paths() {
    let schema = schema_over(MockBlockSource::new());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_api(listener, schema));

    let client = reqwest::Client::new();
    for path in ["/", "/graphql"] {
        let url = format!("http://{addr}{path}");

        let posted: Value = client
            .post(&url)
            .json(&json!({ "query": "{ hello }" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(posted, json!({ "data": { "hello": HELLO_MESSAGE } }));

        let fetched: Value = client
            .get(&url)
            .query(&[("query", "{ hello }")])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(fetched, json!({ "data": { "hello": HELLO_MESSAGE } }));
    }
}
