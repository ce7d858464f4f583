use chrono::Utc;
use contracts::domain::a005_manual_payroll_entry::{ManualPayrollEntry, ManualPayrollEntryId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::domain::common::UpsertOutcome;
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_manual_payroll_entry")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub mandate_ref: String,
    pub year: i32,
    pub month: i32,
    pub total_hours: f64,
    pub total_gross: f64,
    pub social_charges: f64,
    pub total_cost: f64,
    pub employee_count: i32,
    pub source: String,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<Utc>>,
    pub updated_at: Option<chrono::DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ManualPayrollEntry {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        ManualPayrollEntry {
            base: BaseAggregate::with_metadata(
                ManualPayrollEntryId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            mandate_ref: m.mandate_ref,
            year: m.year,
            month: m.month.max(1) as u32,
            total_hours: m.total_hours,
            total_gross: m.total_gross,
            social_charges: m.social_charges,
            total_cost: m.total_cost,
            employee_count: m.employee_count,
            source: m.source,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active_model(aggregate: &ManualPayrollEntry) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        mandate_ref: Set(aggregate.mandate_ref.clone()),
        year: Set(aggregate.year),
        month: Set(aggregate.month as i32),
        total_hours: Set(aggregate.total_hours),
        total_gross: Set(aggregate.total_gross),
        social_charges: Set(aggregate.social_charges),
        total_cost: Set(aggregate.total_cost),
        employee_count: Set(aggregate.employee_count),
        source: Set(aggregate.source.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ManualPayrollEntry>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Поиск по натуральному ключу (mandate_ref, year, month)
pub async fn get_by_natural_key(
    mandate_ref: &str,
    year: i32,
    month: u32,
) -> anyhow::Result<Option<ManualPayrollEntry>> {
    let result = Entity::find()
        .filter(Column::MandateRef.eq(mandate_ref))
        .filter(Column::Year.eq(year))
        .filter(Column::Month.eq(month as i32))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn list_by_mandate(mandate_ref: &str) -> anyhow::Result<Vec<ManualPayrollEntry>> {
    let mut items: Vec<ManualPayrollEntry> = Entity::find()
        .filter(Column::MandateRef.eq(mandate_ref))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| (a.year, a.month).cmp(&(b.year, b.month)));
    Ok(items)
}

/// Upsert по натуральному ключу: повторный импорт месяца замещает итоги
pub async fn upsert_by_natural_key(
    aggregate: &ManualPayrollEntry,
) -> anyhow::Result<UpsertOutcome> {
    let existing =
        get_by_natural_key(&aggregate.mandate_ref, aggregate.year, aggregate.month).await?;

    match existing {
        Some(found) => {
            let mut active = to_active_model(aggregate);
            active.id = Set(found.base.id.value().to_string());
            active.code = Set(found.base.code.clone());
            active.created_at = sea_orm::ActiveValue::NotSet;
            active.version = Set(found.base.metadata.version + 1);
            active.update(conn()).await?;
            Ok(UpsertOutcome::Updated)
        }
        None => {
            to_active_model(aggregate).insert(conn()).await?;
            Ok(UpsertOutcome::Created)
        }
    }
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
