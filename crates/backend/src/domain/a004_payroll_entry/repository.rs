use chrono::{NaiveDate, Utc};
use contracts::domain::a004_payroll_entry::{PayrollEntry, PayrollEntryId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::PeriodType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::domain::common::UpsertOutcome;
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_payroll_entry")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub employee_ref: String,
    pub mandate_ref: String,
    pub period_start: String,
    pub period_end: String,
    /// Код типа периода (WEEKLY / MONTHLY), участвует в натуральном ключе
    pub period_type: String,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub total_hours: f64,
    pub hourly_rate: f64,
    pub base_salary: f64,
    pub overtime_pay: f64,
    pub total_gross: f64,
    pub social_charges: f64,
    pub total_cost: f64,
    pub is_locked: bool,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<Utc>>,
    pub updated_at: Option<chrono::DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PayrollEntry {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let period_start = NaiveDate::parse_from_str(&m.period_start, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive());
        let period_end = NaiveDate::parse_from_str(&m.period_end, "%Y-%m-%d")
            .unwrap_or(period_start);

        PayrollEntry {
            base: BaseAggregate::with_metadata(
                PayrollEntryId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            employee_ref: m.employee_ref,
            mandate_ref: m.mandate_ref,
            period_start,
            period_end,
            period_type: PeriodType::from_code(&m.period_type).unwrap_or(PeriodType::Weekly),
            regular_hours: m.regular_hours,
            overtime_hours: m.overtime_hours,
            total_hours: m.total_hours,
            hourly_rate: m.hourly_rate,
            base_salary: m.base_salary,
            overtime_pay: m.overtime_pay,
            total_gross: m.total_gross,
            social_charges: m.social_charges,
            total_cost: m.total_cost,
            is_locked: m.is_locked,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active_model(aggregate: &PayrollEntry) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        employee_ref: Set(aggregate.employee_ref.clone()),
        mandate_ref: Set(aggregate.mandate_ref.clone()),
        period_start: Set(aggregate.period_start.format("%Y-%m-%d").to_string()),
        period_end: Set(aggregate.period_end.format("%Y-%m-%d").to_string()),
        period_type: Set(aggregate.period_type.code().to_string()),
        regular_hours: Set(aggregate.regular_hours),
        overtime_hours: Set(aggregate.overtime_hours),
        total_hours: Set(aggregate.total_hours),
        hourly_rate: Set(aggregate.hourly_rate),
        base_salary: Set(aggregate.base_salary),
        overtime_pay: Set(aggregate.overtime_pay),
        total_gross: Set(aggregate.total_gross),
        social_charges: Set(aggregate.social_charges),
        total_cost: Set(aggregate.total_cost),
        is_locked: Set(aggregate.is_locked),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<PayrollEntry>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Поиск по натуральному ключу (employee_ref, mandate_ref, period_start, period_type)
pub async fn get_by_natural_key(
    employee_ref: &str,
    mandate_ref: &str,
    period_start: NaiveDate,
    period_type: PeriodType,
) -> anyhow::Result<Option<PayrollEntry>> {
    let result = Entity::find()
        .filter(Column::EmployeeRef.eq(employee_ref))
        .filter(Column::MandateRef.eq(mandate_ref))
        .filter(Column::PeriodStart.eq(period_start.format("%Y-%m-%d").to_string()))
        .filter(Column::PeriodType.eq(period_type.code()))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn list_by_mandate(mandate_ref: &str) -> anyhow::Result<Vec<PayrollEntry>> {
    let mut items: Vec<PayrollEntry> = Entity::find()
        .filter(Column::MandateRef.eq(mandate_ref))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| {
        a.period_start
            .cmp(&b.period_start)
            .then_with(|| a.employee_ref.cmp(&b.employee_ref))
    });
    Ok(items)
}

pub async fn list_by_mandate_and_range(
    mandate_ref: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<Vec<PayrollEntry>> {
    let mut items: Vec<PayrollEntry> = Entity::find()
        .filter(Column::MandateRef.eq(mandate_ref))
        .filter(Column::PeriodStart.gte(start.format("%Y-%m-%d").to_string()))
        .filter(Column::PeriodStart.lte(end.format("%Y-%m-%d").to_string()))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.period_start.cmp(&b.period_start));
    Ok(items)
}

/// Upsert по натуральному ключу: свежий расчёт замещает прежний на месте
///
/// Блокировка существующей записи сохраняется, её проверяет вызывающий
/// расчёт до вычислений
pub async fn upsert_by_natural_key(aggregate: &PayrollEntry) -> anyhow::Result<UpsertOutcome> {
    let existing = get_by_natural_key(
        &aggregate.employee_ref,
        &aggregate.mandate_ref,
        aggregate.period_start,
        aggregate.period_type,
    )
    .await?;

    match existing {
        Some(found) => {
            let mut active = to_active_model(aggregate);
            active.id = Set(found.base.id.value().to_string());
            active.code = Set(found.base.code.clone());
            active.is_locked = Set(found.is_locked);
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

/// Суммарная стоимость труда заведения, кэшируется в a001
pub async fn sum_total_cost_by_mandate(mandate_ref: &str) -> anyhow::Result<f64> {
    let items = Entity::find()
        .filter(Column::MandateRef.eq(mandate_ref))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?;
    Ok(items.iter().map(|m| m.total_cost).sum())
}

/// Установить или снять рекомендательную блокировку
pub async fn set_locked(id: Uuid, locked: bool) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsLocked, Expr::value(locked))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
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
