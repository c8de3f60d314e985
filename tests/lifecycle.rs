use std::time::Duration;

use anyhow::Result;
use entity::proposal::{Priority, Status};
use products_quoting::{LifecycleError, NewDraft};
use quoting_tests::{entry, memory_service, numbered, work};
use uuid::Uuid;

#[tokio::test]
async fn promote_numbers_the_entry() -> Result<()> {
    let service = memory_service().await?;
    let entry = entry(&service).await?;
    let employee = Uuid::new_v4();

    let promoted = service.promote(entry.id, employee).await?;
    assert_eq!(promoted.status, Status::Draft);
    assert_eq!(promoted.sequence_number, 1);
    assert_eq!(promoted.employee_id, Some(employee));
    assert!(promoted.promoted_at.is_some());
    assert!(!promoted.is_entry());
    assert_eq!(service.last_assigned().await?, 1);
    assert!(service.entries().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn promoting_twice_keeps_the_first_number() -> Result<()> {
    let service = memory_service().await?;
    let proposal = numbered(&service).await?;

    let err = service
        .promote(proposal.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::AlreadyPromoted));

    let stored = service.require_proposal(proposal.id).await?;
    assert_eq!(stored.sequence_number, proposal.sequence_number);
    assert_eq!(stored.employee_id, proposal.employee_id);
    assert_eq!(service.last_assigned().await?, 1);
    Ok(())
}

#[tokio::test]
async fn entries_cannot_be_concluded_or_cancelled() -> Result<()> {
    let service = memory_service().await?;
    let entry = entry(&service).await?;

    let err = service.conclude(entry.id, "10,00").await.unwrap_err();
    assert!(matches!(err, LifecycleError::NotPromoted));
    let err = service.cancel(entry.id).await.unwrap_err();
    assert!(matches!(err, LifecycleError::NotPromoted));
    let err = service.create_contract(entry.id).await.unwrap_err();
    assert!(matches!(err, LifecycleError::NotConcluded(Status::NotStarted)));

    assert_eq!(service.require_proposal(entry.id).await?, entry);
    Ok(())
}

#[tokio::test]
async fn conclude_stores_the_price() -> Result<()> {
    let service = memory_service().await?;
    let proposal = numbered(&service).await?;

    let concluded = service.conclude(proposal.id, "150,50").await?;
    assert_eq!(concluded.status, Status::Concluded);
    assert_eq!(concluded.price_cents, 15_050);
    assert!(concluded.concluded_at.is_some());
    assert_eq!(service.require_proposal(proposal.id).await?, concluded);
    Ok(())
}

#[tokio::test]
async fn invalid_prices_leave_the_record_untouched() -> Result<()> {
    let service = memory_service().await?;
    let proposal = numbered(&service).await?;

    for input in ["-5,00", "0,00", "", "abc", "1,234", "1e3"] {
        let err = service.conclude(proposal.id, input).await.unwrap_err();
        assert!(
            matches!(err, LifecycleError::InvalidPrice(_)),
            "{input:?} gave {err:?}"
        );
        assert_eq!(service.require_proposal(proposal.id).await?, proposal);
    }
    Ok(())
}

#[tokio::test]
async fn reconcluding_replaces_the_price() -> Result<()> {
    let service = memory_service().await?;
    let proposal = numbered(&service).await?;

    service.conclude(proposal.id, "100").await?;
    let second = service.conclude(proposal.id, "99,90").await?;
    assert_eq!(second.status, Status::Concluded);
    assert_eq!(second.price_cents, 9_990);
    Ok(())
}

#[tokio::test]
async fn cancelling_again_refreshes_the_timestamp() -> Result<()> {
    let service = memory_service().await?;
    let proposal = numbered(&service).await?;

    let first = service.cancel(proposal.id).await?;
    assert_eq!(first.status, Status::Cancelled);
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = service.cancel(proposal.id).await?;
    assert_eq!(second.status, Status::Cancelled);
    assert!(second.concluded_at > first.concluded_at);
    Ok(())
}

#[tokio::test]
async fn cancelled_proposal_can_be_concluded() -> Result<()> {
    let service = memory_service().await?;
    let proposal = numbered(&service).await?;

    service.cancel(proposal.id).await?;
    let concluded = service.conclude(proposal.id, "42,00").await?;
    assert_eq!(concluded.status, Status::Concluded);
    assert_eq!(concluded.price_cents, 4_200);
    Ok(())
}

#[tokio::test]
async fn contract_requires_a_concluded_proposal() -> Result<()> {
    let service = memory_service().await?;
    let proposal = numbered(&service).await?;

    let err = service.create_contract(proposal.id).await.unwrap_err();
    assert!(matches!(err, LifecycleError::NotConcluded(Status::Draft)));

    service.cancel(proposal.id).await?;
    let err = service.create_contract(proposal.id).await.unwrap_err();
    assert!(matches!(err, LifecycleError::NotConcluded(Status::Cancelled)));

    assert!(service.contracts().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn contract_approves_the_proposal() -> Result<()> {
    let service = memory_service().await?;
    let customer = Uuid::new_v4();
    let work = service.register_work("Bridge", customer).await?;
    let entry = service.create_draft(NewDraft::for_work(work.id)).await?;
    let proposal = service.promote(entry.id, Uuid::new_v4()).await?;
    service.conclude(proposal.id, "1000,00").await?;

    let contract = service.create_contract(proposal.id).await?;
    assert_eq!(contract.proposal_id, proposal.id);
    assert_eq!(contract.contractor_id, customer);
    assert!(!contract.is_cancelled);

    let approved = service.require_proposal(proposal.id).await?;
    assert_eq!(approved.status, Status::Approved);
    assert_eq!(approved.price_cents, 100_000);
    assert_eq!(service.contracts().await?, vec![contract.clone()]);
    assert_eq!(
        service.contract_for_proposal(proposal.id).await?,
        Some(contract)
    );
    Ok(())
}

#[tokio::test]
async fn approved_proposals_are_frozen() -> Result<()> {
    let service = memory_service().await?;
    let proposal = numbered(&service).await?;
    service.conclude(proposal.id, "10").await?;
    service.create_contract(proposal.id).await?;
    let approved = service.require_proposal(proposal.id).await?;

    let err = service.conclude(proposal.id, "20").await.unwrap_err();
    assert!(matches!(err, LifecycleError::AlreadyApproved));
    let err = service.cancel(proposal.id).await.unwrap_err();
    assert!(matches!(err, LifecycleError::AlreadyApproved));
    let err = service.create_contract(proposal.id).await.unwrap_err();
    assert!(matches!(err, LifecycleError::NotConcluded(Status::Approved)));
    let err = service
        .promote(proposal.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::AlreadyApproved));

    assert_eq!(service.require_proposal(proposal.id).await?, approved);
    assert_eq!(service.contracts().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn entries_are_listed_by_priority() -> Result<()> {
    let service = memory_service().await?;
    let work = work(&service).await?;
    for priority in [Priority::Low, Priority::Urgent, Priority::Normal, Priority::High] {
        service
            .create_draft(NewDraft {
                priority: Some(priority),
                ..NewDraft::for_work(work.id)
            })
            .await?;
    }

    let listed: Vec<Priority> = service
        .entries()
        .await?
        .into_iter()
        .map(|entry| entry.priority)
        .collect();
    assert_eq!(
        listed,
        vec![Priority::Urgent, Priority::High, Priority::Normal, Priority::Low]
    );
    Ok(())
}

#[tokio::test]
async fn proposals_are_listed_by_number() -> Result<()> {
    let service = memory_service().await?;
    let first = numbered(&service).await?;
    let second = numbered(&service).await?;
    let _pending = entry(&service).await?;

    let numbers: Vec<i32> = service
        .proposals()
        .await?
        .into_iter()
        .map(|proposal| proposal.sequence_number)
        .collect();
    assert_eq!(numbers, vec![first.sequence_number, second.sequence_number]);
    assert_eq!(numbers, vec![1, 2]);
    Ok(())
}
