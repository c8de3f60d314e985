use std::fmt;

use sea_orm::prelude::{DateTimeWithTimeZone, *};
use uuid::Uuid;

/// A quote at any point of its life. Records with `sequence_number == 0` are
/// entries that have not been given a number yet.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "proposal")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub sequence_number: i32,
    pub revision_number: i32,
    pub option_number: Option<i32>,
    pub priority: Priority,
    pub category: Category,
    pub description: String,
    pub notes: String,
    pub status: Status,
    pub price_cents: i64,
    #[sea_orm(indexed)]
    pub work_id: Uuid,
    pub person_id: Option<Uuid>,
    pub employee_id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub promoted_at: Option<DateTimeWithTimeZone>,
    pub concluded_at: Option<DateTimeWithTimeZone>,
}

impl Model {
    pub fn is_entry(&self) -> bool {
        self.sequence_number == 0
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::work::Entity",
        from = "Column::WorkId",
        to = "crate::work::Column::Id",
        on_delete = "Cascade"
    )]
    Work,
    #[sea_orm(has_one = "crate::contract::Entity")]
    Contract,
}

impl Related<crate::work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Work.def()
    }
}

impl Related<crate::contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Hash)]
#[sea_orm(rs_type = "String", db_type = "String(Some(4))")]
pub enum Status {
    #[sea_orm(string_value = "n")]
    NotStarted,
    #[sea_orm(string_value = "elab")]
    Draft,
    #[sea_orm(string_value = "co")]
    Concluded,
    #[sea_orm(string_value = "c")]
    Cancelled,
    #[sea_orm(string_value = "a")]
    Approved,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::NotStarted => "not started",
            Status::Draft => "draft",
            Status::Concluded => "concluded",
            Status::Cancelled => "cancelled",
            Status::Approved => "approved",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Copy, Clone, Debug, Default, EnumIter, DeriveActiveEnum, Eq, PartialEq)]
#[sea_orm(rs_type = "String", db_type = "String(Some(8))")]
pub enum Priority {
    #[sea_orm(string_value = "URGENT")]
    Urgent,
    #[sea_orm(string_value = "HIGH")]
    High,
    #[default]
    #[sea_orm(string_value = "NORMAL")]
    Normal,
    #[sea_orm(string_value = "LOW")]
    Low,
}

impl Priority {
    /// Position in the entry queue, most pressing first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::High => 1,
            Priority::Normal => 2,
            Priority::Low => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, EnumIter, DeriveActiveEnum, Eq, PartialEq)]
#[sea_orm(rs_type = "String", db_type = "String(Some(8))")]
pub enum Category {
    #[default]
    #[sea_orm(string_value = "QUOTE")]
    Quote,
    #[sea_orm(string_value = "PROJECT")]
    Project,
    #[sea_orm(string_value = "SERVICE")]
    Service,
}

impl ActiveModelBehavior for ActiveModel {}
