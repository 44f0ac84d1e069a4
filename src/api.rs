// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use async_graphql_axum::GraphQL;
use axum::Router;
use tokio::net::TcpListener;

use crate::query::EnergyscanSchema;

/// Routes for the GraphQL endpoint.
///
/// Queries are accepted over GET and POST on both `/` and `/graphql`.
pub fn router(schema: EnergyscanSchema) -> Router {
    Router::new()
        .route_service("/", GraphQL::new(schema.clone()))
        .route_service("/graphql", GraphQL::new(schema))
}

/// Starts the API server.
pub async fn serve_api(listener: TcpListener, schema: EnergyscanSchema) -> anyhow::Result<()> {
    let app = router(schema);

    let addr = listener.local_addr()?;

    tracing::info!(address = ?addr, "Starting server");

    axum::serve(listener, app).await?;

    Ok(())
}
