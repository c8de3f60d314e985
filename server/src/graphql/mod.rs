mod nodes;

use async_graphql::{Context, EmptySubscription, Error, ErrorExtensions, ID, Object, Schema};
use platform_api::{ApiError, internal_error};
use products_quoting::{LifecycleError, LifecycleService, NewDraft};
use tracing::instrument;
use uuid::Uuid;

use nodes::{ContractNode, CreateDraftInput, HealthPayload, ProposalNode, WorkNode};

pub type SchemaType = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(service: LifecycleService) -> SchemaType {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

/// SDL snapshot; needs no database.
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

#[derive(Default)]
pub struct QueryRoot;

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl QueryRoot {
    #[instrument(name = "graphql.health", skip_all)]
    async fn health(&self) -> HealthPayload {
        HealthPayload { ok: true }
    }

    #[instrument(name = "graphql.version", skip_all)]
    async fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    async fn proposal(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<ProposalNode>> {
        let service = service(ctx)?;
        let id = parse_uuid(&id)?;
        let model = service.proposal(id).await.map_err(lifecycle_error)?;
        Ok(model.map(ProposalNode::from))
    }

    /// Entries waiting for a proposal number.
    async fn entries(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<ProposalNode>> {
        let rows = service(ctx)?.entries().await.map_err(lifecycle_error)?;
        Ok(rows.into_iter().map(ProposalNode::from).collect())
    }

    async fn proposals(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<ProposalNode>> {
        let rows = service(ctx)?.proposals().await.map_err(lifecycle_error)?;
        Ok(rows.into_iter().map(ProposalNode::from).collect())
    }

    async fn contract(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<ContractNode>> {
        let service = service(ctx)?;
        let id = parse_uuid(&id)?;
        let model = service.contract(id).await.map_err(lifecycle_error)?;
        Ok(model.map(ContractNode::from))
    }

    async fn contract_for_proposal(
        &self,
        ctx: &Context<'_>,
        proposal_id: ID,
    ) -> async_graphql::Result<Option<ContractNode>> {
        let service = service(ctx)?;
        let id = parse_uuid(&proposal_id)?;
        let model = service
            .contract_for_proposal(id)
            .await
            .map_err(lifecycle_error)?;
        Ok(model.map(ContractNode::from))
    }

    async fn contracts(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<ContractNode>> {
        let rows = service(ctx)?.contracts().await.map_err(lifecycle_error)?;
        Ok(rows.into_iter().map(ContractNode::from).collect())
    }

    async fn works(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<WorkNode>> {
        let rows = service(ctx)?.works().await.map_err(lifecycle_error)?;
        Ok(rows.into_iter().map(WorkNode::from).collect())
    }

    async fn last_proposal_number(&self, ctx: &Context<'_>) -> async_graphql::Result<i32> {
        service(ctx)?.last_assigned().await.map_err(lifecycle_error)
    }
}

#[Object]
impl MutationRoot {
    #[instrument(name = "graphql.register_work", skip_all)]
    async fn register_work(
        &self,
        ctx: &Context<'_>,
        name: String,
        customer_id: ID,
    ) -> async_graphql::Result<WorkNode> {
        let service = service(ctx)?;
        let customer_id = parse_uuid(&customer_id)?;
        let work = service
            .register_work(&name, customer_id)
            .await
            .map_err(lifecycle_error)?;
        Ok(work.into())
    }

    #[instrument(name = "graphql.create_draft", skip_all)]
    async fn create_draft(
        &self,
        ctx: &Context<'_>,
        input: CreateDraftInput,
    ) -> async_graphql::Result<ProposalNode> {
        let service = service(ctx)?;
        let draft = NewDraft {
            work_id: parse_uuid(&input.work_id)?,
            priority: input.priority.map(Into::into),
            category: input.category.map(Into::into),
            option_number: input.option_number,
            description: input.description,
            notes: input.notes,
            person_id: input.person_id.as_ref().map(parse_uuid).transpose()?,
            seller_id: input.seller_id.as_ref().map(parse_uuid).transpose()?,
        };
        let model = service.create_draft(draft).await.map_err(lifecycle_error)?;
        Ok(model.into())
    }

    /// Number an entry. The acting employee is passed explicitly.
    #[instrument(name = "graphql.promote_draft", skip_all)]
    async fn promote_draft(
        &self,
        ctx: &Context<'_>,
        id: ID,
        employee_id: ID,
    ) -> async_graphql::Result<ProposalNode> {
        let service = service(ctx)?;
        let draft_id = parse_uuid(&id)?;
        let employee_id = parse_uuid(&employee_id)?;
        let model = service
            .promote(draft_id, employee_id)
            .await
            .map_err(lifecycle_error)?;
        Ok(model.into())
    }

    #[instrument(name = "graphql.conclude_proposal", skip_all)]
    async fn conclude_proposal(
        &self,
        ctx: &Context<'_>,
        id: ID,
        price: String,
    ) -> async_graphql::Result<ProposalNode> {
        let service = service(ctx)?;
        let proposal_id = parse_uuid(&id)?;
        let model = service
            .conclude(proposal_id, &price)
            .await
            .map_err(lifecycle_error)?;
        Ok(model.into())
    }

    #[instrument(name = "graphql.cancel_proposal", skip_all)]
    async fn cancel_proposal(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<ProposalNode> {
        let service = service(ctx)?;
        let proposal_id = parse_uuid(&id)?;
        let model = service.cancel(proposal_id).await.map_err(lifecycle_error)?;
        Ok(model.into())
    }

    #[instrument(name = "graphql.create_contract", skip_all)]
    async fn create_contract(
        &self,
        ctx: &Context<'_>,
        proposal_id: ID,
    ) -> async_graphql::Result<ContractNode> {
        let service = service(ctx)?;
        let proposal_id = parse_uuid(&proposal_id)?;
        let contract = service
            .create_contract(proposal_id)
            .await
            .map_err(lifecycle_error)?;
        Ok(contract.into())
    }
}

fn service<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a LifecycleService> {
    ctx.data::<LifecycleService>()
        .map_err(|_| internal_error(anyhow::anyhow!("lifecycle service missing")))
}

fn parse_uuid(id: &ID) -> async_graphql::Result<Uuid> {
    Uuid::parse_str(id.as_str())
        .map_err(|_| ApiError::InvalidInput(format!("invalid id `{}`", id.as_str())).extend())
}

fn lifecycle_error(err: LifecycleError) -> Error {
    let code = match &err {
        LifecycleError::InvalidPrice(_) => Some("INVALID_PRICE"),
        LifecycleError::AlreadyApproved => Some("ALREADY_APPROVED"),
        LifecycleError::AlreadyPromoted => Some("ALREADY_PROMOTED"),
        LifecycleError::NotPromoted => Some("NOT_PROMOTED"),
        LifecycleError::NotConcluded(_) => Some("NOT_CONCLUDED"),
        LifecycleError::InvalidInput(_)
        | LifecycleError::RecordNotFound { .. }
        | LifecycleError::Database(_) => None,
    };
    let api = match (code, err) {
        (Some(code), err) => ApiError::rejected(code, err.to_string()),
        (None, LifecycleError::InvalidInput(message)) => ApiError::InvalidInput(message),
        (None, LifecycleError::RecordNotFound { .. }) => ApiError::NotFound,
        (None, err) => ApiError::internal(err.into()),
    };
    api.extend()
}
