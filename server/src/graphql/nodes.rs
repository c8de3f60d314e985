use async_graphql::{Enum, ID, InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use entity::{contract, proposal, work};
use products_quoting::{ProposalCode, format_cents};

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProposalStatus {
    NotStarted,
    Draft,
    Concluded,
    Cancelled,
    Approved,
}

impl From<proposal::Status> for ProposalStatus {
    fn from(value: proposal::Status) -> Self {
        match value {
            proposal::Status::NotStarted => ProposalStatus::NotStarted,
            proposal::Status::Draft => ProposalStatus::Draft,
            proposal::Status::Concluded => ProposalStatus::Concluded,
            proposal::Status::Cancelled => ProposalStatus::Cancelled,
            proposal::Status::Approved => ProposalStatus::Approved,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProposalPriority {
    Urgent,
    High,
    Normal,
    Low,
}

impl From<proposal::Priority> for ProposalPriority {
    fn from(value: proposal::Priority) -> Self {
        match value {
            proposal::Priority::Urgent => ProposalPriority::Urgent,
            proposal::Priority::High => ProposalPriority::High,
            proposal::Priority::Normal => ProposalPriority::Normal,
            proposal::Priority::Low => ProposalPriority::Low,
        }
    }
}

impl From<ProposalPriority> for proposal::Priority {
    fn from(value: ProposalPriority) -> Self {
        match value {
            ProposalPriority::Urgent => proposal::Priority::Urgent,
            ProposalPriority::High => proposal::Priority::High,
            ProposalPriority::Normal => proposal::Priority::Normal,
            ProposalPriority::Low => proposal::Priority::Low,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProposalCategory {
    Quote,
    Project,
    Service,
}

impl From<proposal::Category> for ProposalCategory {
    fn from(value: proposal::Category) -> Self {
        match value {
            proposal::Category::Quote => ProposalCategory::Quote,
            proposal::Category::Project => ProposalCategory::Project,
            proposal::Category::Service => ProposalCategory::Service,
        }
    }
}

impl From<ProposalCategory> for proposal::Category {
    fn from(value: ProposalCategory) -> Self {
        match value {
            ProposalCategory::Quote => proposal::Category::Quote,
            ProposalCategory::Project => proposal::Category::Project,
            ProposalCategory::Service => proposal::Category::Service,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct ProposalNode {
    pub id: ID,
    /// Display code such as `007/242`; absent until the entry is numbered.
    pub code: Option<String>,
    pub is_entry: bool,
    pub sequence_number: i32,
    pub revision_number: i32,
    pub option_number: Option<i32>,
    pub status: ProposalStatus,
    pub priority: ProposalPriority,
    pub category: ProposalCategory,
    pub description: String,
    pub notes: String,
    /// Decimal amount with a dot separator, e.g. `150.50`.
    pub price: String,
    pub price_cents: i64,
    pub work_id: ID,
    pub person_id: Option<ID>,
    pub employee_id: Option<ID>,
    pub seller_id: Option<ID>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub promoted_at: Option<DateTime<Utc>>,
    pub concluded_at: Option<DateTime<Utc>>,
}

impl From<proposal::Model> for ProposalNode {
    fn from(model: proposal::Model) -> Self {
        let code = (!model.is_entry()).then(|| ProposalCode::for_proposal(&model).to_string());
        Self {
            id: ID(model.id.to_string()),
            code,
            is_entry: model.is_entry(),
            sequence_number: model.sequence_number,
            revision_number: model.revision_number,
            option_number: model.option_number,
            status: model.status.into(),
            priority: model.priority.into(),
            category: model.category.into(),
            description: model.description,
            notes: model.notes,
            price: format_cents(model.price_cents),
            price_cents: model.price_cents,
            work_id: ID(model.work_id.to_string()),
            person_id: model.person_id.map(|id| ID(id.to_string())),
            employee_id: model.employee_id.map(|id| ID(id.to_string())),
            seller_id: model.seller_id.map(|id| ID(id.to_string())),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            promoted_at: model.promoted_at.map(|ts| ts.with_timezone(&Utc)),
            concluded_at: model.concluded_at.map(|ts| ts.with_timezone(&Utc)),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct ContractNode {
    pub id: ID,
    pub proposal_id: ID,
    pub contractor_id: ID,
    pub is_cancelled: bool,
    pub created_at: DateTime<Utc>,
}

impl From<contract::Model> for ContractNode {
    fn from(model: contract::Model) -> Self {
        Self {
            id: ID(model.id.to_string()),
            proposal_id: ID(model.proposal_id.to_string()),
            contractor_id: ID(model.contractor_id.to_string()),
            is_cancelled: model.is_cancelled,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct WorkNode {
    pub id: ID,
    pub name: String,
    pub customer_id: ID,
    pub created_at: DateTime<Utc>,
}

impl From<work::Model> for WorkNode {
    fn from(model: work::Model) -> Self {
        Self {
            id: ID(model.id.to_string()),
            name: model.name,
            customer_id: ID(model.customer_id.to_string()),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Clone, Debug, InputObject)]
pub struct CreateDraftInput {
    pub work_id: ID,
    pub priority: Option<ProposalPriority>,
    pub category: Option<ProposalCategory>,
    pub option_number: Option<i32>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub person_id: Option<ID>,
    pub seller_id: Option<ID>,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct HealthPayload {
    pub ok: bool,
}
