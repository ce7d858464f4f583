use chrono::{DateTime, NaiveDate, Utc};
use contracts::domain::a001_mandate::{Mandate, MandateId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_mandate")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub address: String,
    pub default_hourly_rate: Option<f64>,
    pub total_revenue: f64,
    pub last_entry_date: Option<String>, // stored as YYYY-MM-DD
    pub total_payroll_cost: f64,
    pub last_payroll_calculation: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Mandate {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let last_entry_date = m
            .last_entry_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());

        Mandate {
            base: BaseAggregate::with_metadata(
                MandateId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            address: m.address,
            default_hourly_rate: m.default_hourly_rate,
            total_revenue: m.total_revenue,
            last_entry_date,
            total_payroll_cost: m.total_payroll_cost,
            last_payroll_calculation: m.last_payroll_calculation,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active_model(aggregate: &Mandate) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        address: Set(aggregate.address.clone()),
        default_hourly_rate: Set(aggregate.default_hourly_rate),
        total_revenue: Set(aggregate.total_revenue),
        last_entry_date: Set(aggregate
            .last_entry_date
            .map(|d| d.format("%Y-%m-%d").to_string())),
        total_payroll_cost: Set(aggregate.total_payroll_cost),
        last_payroll_calculation: Set(aggregate.last_payroll_calculation),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<Mandate>> {
    let mut items: Vec<Mandate> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.base.description.cmp(&b.base.description));
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Mandate>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Mandate) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active_model(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Mandate) -> anyhow::Result<()> {
    let mut active = to_active_model(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
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

/// Обновить кэш зарплатных итогов после расчета всех периодов заведения
pub async fn update_payroll_stats(
    id: Uuid,
    total_payroll_cost: f64,
    calculated_at: DateTime<Utc>,
) -> anyhow::Result<()> {
    use sea_orm::sea_query::Expr;
    Entity::update_many()
        .col_expr(Column::TotalPayrollCost, Expr::value(total_payroll_cost))
        .col_expr(
            Column::LastPayrollCalculation,
            Expr::value(Some(calculated_at)),
        )
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(())
}

/// Обновить кэш даты последней записи после импорта
pub async fn update_last_entry_date(
    id: Uuid,
    last_entry_date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    use sea_orm::sea_query::Expr;
    Entity::update_many()
        .col_expr(
            Column::LastEntryDate,
            Expr::value(last_entry_date.map(|d| d.format("%Y-%m-%d").to_string())),
        )
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(())
}
