use std::sync::Arc;

use chrono::Utc;
use entity::{contract, proposal, work};
use entity::proposal::{Category, Priority, Status};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::counter::SequenceCounter;
use crate::error::{LifecycleError, LifecycleResult};
use crate::lifecycle::{Event, next_status};
use crate::price::parse_price;

/// Fields accepted when a new entry is registered.
#[derive(Clone, Debug, Default)]
pub struct NewDraft {
    pub work_id: Uuid,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub option_number: Option<i32>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub person_id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
}

impl NewDraft {
    pub fn for_work(work_id: Uuid) -> Self {
        Self {
            work_id,
            ..Self::default()
        }
    }
}

/// Entry points for every proposal state change. Each call runs in its own
/// transaction: the record is locked, guards are checked, and all writes
/// commit together or not at all.
#[derive(Clone)]
pub struct LifecycleService {
    db: Arc<DatabaseConnection>,
}

impl LifecycleService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        self.db.as_ref()
    }

    #[instrument(name = "quoting.works.register", skip(self))]
    pub async fn register_work(
        &self,
        name: &str,
        customer_id: Uuid,
    ) -> LifecycleResult<work::Model> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LifecycleError::InvalidInput("work name is required".into()));
        }
        if name.chars().count() > 100 {
            return Err(LifecycleError::InvalidInput(
                "work name must be at most 100 characters".into(),
            ));
        }
        let model = work::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            customer_id: Set(customer_id),
            created_at: Set(now()),
        }
        .insert(self.connection())
        .await?;
        info!(work_id = %model.id, "work registered");
        Ok(model)
    }

    pub async fn works(&self) -> LifecycleResult<Vec<work::Model>> {
        Ok(work::Entity::find()
            .order_by_asc(work::Column::Name)
            .all(self.connection())
            .await?)
    }

    #[instrument(name = "quoting.entries.create", skip(self, input), fields(work_id = %input.work_id))]
    pub async fn create_draft(&self, input: NewDraft) -> LifecycleResult<proposal::Model> {
        if let Some(option) = input.option_number {
            if option <= 0 {
                return Err(LifecycleError::InvalidInput(
                    "option must be a positive number".into(),
                ));
            }
        }

        let txn = self.db.begin().await?;
        work::Entity::find_by_id(input.work_id)
            .one(&txn)
            .await?
            .ok_or_else(|| LifecycleError::not_found("work", input.work_id))?;

        let now = now();
        let model = proposal::ActiveModel {
            id: Set(Uuid::new_v4()),
            sequence_number: Set(0),
            revision_number: Set(0),
            option_number: Set(input.option_number),
            priority: Set(input.priority.unwrap_or_default()),
            category: Set(input.category.unwrap_or_default()),
            description: Set(input.description.unwrap_or_default()),
            notes: Set(input.notes.unwrap_or_default()),
            status: Set(Status::NotStarted),
            price_cents: Set(0),
            work_id: Set(input.work_id),
            person_id: Set(input.person_id),
            employee_id: Set(None),
            seller_id: Set(input.seller_id),
            created_at: Set(now),
            updated_at: Set(now),
            promoted_at: Set(None),
            concluded_at: Set(None),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;
        info!(proposal_id = %model.id, "entry created");
        Ok(model)
    }

    /// Give an entry the next proposal number and bind the preparing employee.
    ///
    /// A record that already carries a number is rejected; numbers are never
    /// reassigned.
    #[instrument(name = "quoting.proposals.promote", skip(self))]
    pub async fn promote(
        &self,
        draft_id: Uuid,
        employee_id: Uuid,
    ) -> LifecycleResult<proposal::Model> {
        let txn = self.db.begin().await?;
        let record = lock_proposal(&txn, draft_id).await?;
        let next = guard(&record, Event::Promote)?;
        if !record.is_entry() {
            return Err(reject(&record, Event::Promote, LifecycleError::AlreadyPromoted));
        }

        let sequence = SequenceCounter::next_value_in(&txn).await?;
        let now = now();
        let mut active: proposal::ActiveModel = record.into();
        active.sequence_number = Set(sequence);
        active.employee_id = Set(Some(employee_id));
        active.status = Set(next);
        active.promoted_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(proposal_id = %updated.id, sequence, "entry promoted to proposal");
        Ok(updated)
    }

    /// Price the proposal. `price_input` uses a comma as decimal separator.
    #[instrument(name = "quoting.proposals.conclude", skip(self))]
    pub async fn conclude(
        &self,
        proposal_id: Uuid,
        price_input: &str,
    ) -> LifecycleResult<proposal::Model> {
        let txn = self.db.begin().await?;
        let record = lock_proposal(&txn, proposal_id).await?;
        let next = guard(&record, Event::Conclude)?;
        let price_cents =
            parse_price(price_input).map_err(|err| reject(&record, Event::Conclude, err))?;

        let now = now();
        let mut active: proposal::ActiveModel = record.into();
        active.price_cents = Set(price_cents);
        active.status = Set(next);
        active.concluded_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(proposal_id = %updated.id, price_cents, "proposal concluded");
        Ok(updated)
    }

    /// Void the proposal. Cancelling again refreshes `concluded_at`.
    #[instrument(name = "quoting.proposals.cancel", skip(self))]
    pub async fn cancel(&self, proposal_id: Uuid) -> LifecycleResult<proposal::Model> {
        let txn = self.db.begin().await?;
        let record = lock_proposal(&txn, proposal_id).await?;
        let previous = record.status;
        let next = guard(&record, Event::Cancel)?;

        let now = now();
        let mut active: proposal::ActiveModel = record.into();
        active.status = Set(next);
        active.concluded_at = Set(Some(now));
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(proposal_id = %updated.id, from = %previous, "proposal cancelled");
        Ok(updated)
    }

    /// Turn a concluded proposal into a contract with the work's customer as
    /// contractor. The proposal becomes Approved.
    #[instrument(name = "quoting.contracts.create", skip(self))]
    pub async fn create_contract(&self, proposal_id: Uuid) -> LifecycleResult<contract::Model> {
        let txn = self.db.begin().await?;
        let record = lock_proposal(&txn, proposal_id).await?;
        let next = guard(&record, Event::CreateContract)?;
        let contractor_id = contractor_for(&txn, &record).await?;

        let now = now();
        let contract = contract::ActiveModel {
            id: Set(Uuid::new_v4()),
            proposal_id: Set(record.id),
            contractor_id: Set(contractor_id),
            is_cancelled: Set(false),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut active: proposal::ActiveModel = record.into();
        active.status = Set(next);
        active.updated_at = Set(now);
        active.update(&txn).await?;
        txn.commit().await?;

        info!(proposal_id = %proposal_id, contract_id = %contract.id, "contract created");
        Ok(contract)
    }

    pub async fn proposal(&self, id: Uuid) -> LifecycleResult<Option<proposal::Model>> {
        Ok(proposal::Entity::find_by_id(id)
            .one(self.connection())
            .await?)
    }

    pub async fn require_proposal(&self, id: Uuid) -> LifecycleResult<proposal::Model> {
        self.proposal(id)
            .await?
            .ok_or_else(|| LifecycleError::not_found("proposal", id))
    }

    /// Unnumbered entries, most pressing first, then oldest first.
    pub async fn entries(&self) -> LifecycleResult<Vec<proposal::Model>> {
        let mut rows = proposal::Entity::find()
            .filter(proposal::Column::SequenceNumber.eq(0))
            .order_by_asc(proposal::Column::CreatedAt)
            .all(self.connection())
            .await?;
        rows.sort_by_key(|row| row.priority.rank());
        Ok(rows)
    }

    /// Numbered proposals in sequence order.
    pub async fn proposals(&self) -> LifecycleResult<Vec<proposal::Model>> {
        Ok(proposal::Entity::find()
            .filter(proposal::Column::SequenceNumber.gt(0))
            .order_by_asc(proposal::Column::SequenceNumber)
            .order_by_asc(proposal::Column::RevisionNumber)
            .order_by_asc(proposal::Column::OptionNumber)
            .all(self.connection())
            .await?)
    }

    pub async fn contract(&self, id: Uuid) -> LifecycleResult<Option<contract::Model>> {
        Ok(contract::Entity::find_by_id(id)
            .one(self.connection())
            .await?)
    }

    pub async fn contract_for_proposal(
        &self,
        proposal_id: Uuid,
    ) -> LifecycleResult<Option<contract::Model>> {
        Ok(contract::Entity::find()
            .filter(contract::Column::ProposalId.eq(proposal_id))
            .one(self.connection())
            .await?)
    }

    pub async fn contracts(&self) -> LifecycleResult<Vec<contract::Model>> {
        Ok(contract::Entity::find()
            .order_by_asc(contract::Column::CreatedAt)
            .all(self.connection())
            .await?)
    }

    pub async fn last_assigned(&self) -> LifecycleResult<i32> {
        Ok(SequenceCounter::last_assigned(self.connection()).await?)
    }
}

fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}

async fn lock_proposal(txn: &DatabaseTransaction, id: Uuid) -> LifecycleResult<proposal::Model> {
    proposal::Entity::find_by_id(id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(|| LifecycleError::not_found("proposal", id))
}

async fn contractor_for(
    txn: &DatabaseTransaction,
    record: &proposal::Model,
) -> LifecycleResult<Uuid> {
    work::Entity::find_by_id(record.work_id)
        .one(txn)
        .await?
        .map(|work| work.customer_id)
        .ok_or_else(|| LifecycleError::not_found("work", record.work_id))
}

fn guard(record: &proposal::Model, event: Event) -> LifecycleResult<Status> {
    next_status(record.status, event).map_err(|err| reject(record, event, err))
}

fn reject(record: &proposal::Model, event: Event, err: LifecycleError) -> LifecycleError {
    warn!(
        proposal_id = %record.id,
        status = %record.status,
        ?event,
        reason = %err,
        "transition rejected"
    );
    err
}
