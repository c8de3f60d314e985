//! Contention checks against a real Postgres pool, started in a throwaway
//! container. SQLite in memory runs on one connection and never contends.

use std::collections::HashSet;

use anyhow::Result;
use products_quoting::{LifecycleError, LifecycleService};
use quoting_tests::{entry, numbered, postgres_image, postgres_service};
use testcontainers::clients::Cli;
use tokio::task::JoinSet;
use uuid::Uuid;

#[tokio::test]
async fn postgres_promotions_under_contention() -> Result<()> {
    let docker = Cli::default();
    let container = docker.run(postgres_image());
    let service = postgres_service(container.get_host_port_ipv4(5432)).await?;

    distinct_entries_get_gapless_numbers(&service, 32).await?;
    racing_promotions_of_one_entry(&service, 33).await?;

    let next = numbered(&service).await?;
    assert_eq!(next.sequence_number, 34);
    Ok(())
}

async fn distinct_entries_get_gapless_numbers(service: &LifecycleService, count: i32) -> Result<()> {
    let mut ids = Vec::new();
    for _ in 0..count {
        ids.push(entry(service).await?.id);
    }

    let mut tasks = JoinSet::new();
    for id in ids {
        let service = service.clone();
        tasks.spawn(async move { service.promote(id, Uuid::new_v4()).await });
    }

    let mut numbers = HashSet::new();
    while let Some(joined) = tasks.join_next().await {
        assert!(numbers.insert(joined??.sequence_number));
    }
    let expected: HashSet<i32> = (1..=count).collect();
    assert_eq!(numbers, expected);
    assert_eq!(service.last_assigned().await?, count);
    Ok(())
}

async fn racing_promotions_of_one_entry(service: &LifecycleService, expected: i32) -> Result<()> {
    let pending = entry(service).await?;

    let mut tasks = JoinSet::new();
    for _ in 0..4 {
        let service = service.clone();
        let id = pending.id;
        tasks.spawn(async move { service.promote(id, Uuid::new_v4()).await });
    }

    let mut promoted = 0;
    let mut refused = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined? {
            Ok(model) => {
                promoted += 1;
                assert_eq!(model.sequence_number, expected);
            }
            Err(LifecycleError::AlreadyPromoted) => refused += 1,
            Err(other) => return Err(other.into()),
        }
    }
    assert_eq!(promoted, 1);
    assert_eq!(refused, 3);
    assert_eq!(service.last_assigned().await?, expected);
    Ok(())
}
