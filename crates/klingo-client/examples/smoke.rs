//! Manual smoke test against a live installation.
//!
//! ```sh
//! KLINGO_DOMAIN=irb KLINGO_LOGIN=user KLINGO_SENHA=secret \
//!     cargo run --example smoke
//! ```

use anyhow::Context;
use klingo_client::{KlingoClient, KlingoConfig, QueryDescriptor, RoutingHints};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let domain = std::env::var("KLINGO_DOMAIN").unwrap_or_else(|_| "irb".to_string());
    let login = std::env::var("KLINGO_LOGIN").context("KLINGO_LOGIN not set")?;
    let senha = std::env::var("KLINGO_SENHA").context("KLINGO_SENHA not set")?;

    let client = KlingoClient::new(KlingoConfig::new(domain)?)?;
    client.login(&login, &senha).await?;
    println!("login ok");

    let specialties = client.specialties().list(true).await?;
    println!(
        "specialties: {}",
        specialties.as_array().map_or(0, Vec::len)
    );

    let practitioners = client.practitioners().list(true).await?;
    println!(
        "practitioners: {}",
        practitioners.as_array().map_or(0, Vec::len)
    );

    let schedules = client.schedules().list(&Default::default()).await?;
    println!("today's schedule loaded: {}", schedules != serde_json::Value::Null);

    // Several lookups in one round trip.
    let batch = client
        .query_batch(
            vec![
                QueryDescriptor::new("forma_pagamentos.index", "formas"),
                QueryDescriptor::new("sinalizadores.index", "sinalizadores")
                    .with_parms(json!({"ativos": true})),
            ],
            RoutingHints::new(),
        )
        .await?;
    println!("batch keys: {:?}", batch.as_object().map(|map| map.len()));

    Ok(())
}
