use chrono::{NaiveDate, Utc};
use contracts::domain::a003_time_record::{TimeRecord, TimeRecordId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::domain::common::UpsertOutcome;
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_time_record")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub employee_ref: String,
    pub mandate_ref: String,
    /// Дата в формате %Y-%m-%d, участвует в натуральном ключе
    pub work_date: String,
    pub clock_in: Option<String>,
    pub clock_out: Option<String>,
    pub break_minutes: i32,
    pub worked_hours: f64,
    pub is_overtime: bool,
    pub hourly_rate_used: Option<f64>,
    pub import_source: String,
    pub import_batch_ref: Option<String>,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<Utc>>,
    pub updated_at: Option<chrono::DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for TimeRecord {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let work_date = NaiveDate::parse_from_str(&m.work_date, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive());

        TimeRecord {
            base: BaseAggregate::with_metadata(
                TimeRecordId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            employee_ref: m.employee_ref,
            mandate_ref: m.mandate_ref,
            work_date,
            clock_in: m.clock_in,
            clock_out: m.clock_out,
            break_minutes: m.break_minutes,
            worked_hours: m.worked_hours,
            is_overtime: m.is_overtime,
            hourly_rate_used: m.hourly_rate_used,
            import_source: m.import_source,
            import_batch_ref: m.import_batch_ref,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active_model(aggregate: &TimeRecord) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        employee_ref: Set(aggregate.employee_ref.clone()),
        mandate_ref: Set(aggregate.mandate_ref.clone()),
        work_date: Set(aggregate.work_date.format("%Y-%m-%d").to_string()),
        clock_in: Set(aggregate.clock_in.clone()),
        clock_out: Set(aggregate.clock_out.clone()),
        break_minutes: Set(aggregate.break_minutes),
        worked_hours: Set(aggregate.worked_hours),
        is_overtime: Set(aggregate.is_overtime),
        hourly_rate_used: Set(aggregate.hourly_rate_used),
        import_source: Set(aggregate.import_source.clone()),
        import_batch_ref: Set(aggregate.import_batch_ref.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    err.to_string().to_uppercase().contains("UNIQUE")
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<TimeRecord>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn list_by_mandate(mandate_ref: &str) -> anyhow::Result<Vec<TimeRecord>> {
    let mut items: Vec<TimeRecord> = Entity::find()
        .filter(Column::MandateRef.eq(mandate_ref))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.work_date.cmp(&b.work_date));
    Ok(items)
}

/// Записи заведения за период, вход для расчёта зарплаты
pub async fn list_by_mandate_and_range(
    mandate_ref: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<Vec<TimeRecord>> {
    let mut items: Vec<TimeRecord> = Entity::find()
        .filter(Column::MandateRef.eq(mandate_ref))
        .filter(Column::WorkDate.gte(start.format("%Y-%m-%d").to_string()))
        .filter(Column::WorkDate.lte(end.format("%Y-%m-%d").to_string()))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.work_date.cmp(&b.work_date));
    Ok(items)
}

/// Последняя отработанная дата заведения, кэшируется в a001
pub async fn max_work_date(mandate_ref: &str) -> anyhow::Result<Option<NaiveDate>> {
    let latest = Entity::find()
        .filter(Column::MandateRef.eq(mandate_ref))
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::WorkDate)
        .one(conn())
        .await?;
    Ok(latest.and_then(|m| NaiveDate::parse_from_str(&m.work_date, "%Y-%m-%d").ok()))
}

pub async fn insert(aggregate: &TimeRecord) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active_model(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &TimeRecord) -> anyhow::Result<()> {
    let mut active = to_active_model(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

/// Upsert по натуральному ключу (employee_ref, work_date, mandate_ref)
/// внутри транзакции чанка импорта
///
/// Существующая запись обновляется на месте с сохранением id и created_at.
/// Гонка на вставке (ключ занят между select и insert) не валит чанк,
/// а возвращается как Conflict
pub async fn upsert_by_natural_key_txn<C: ConnectionTrait>(
    db: &C,
    aggregate: &TimeRecord,
) -> anyhow::Result<UpsertOutcome> {
    let existing = Entity::find()
        .filter(Column::EmployeeRef.eq(aggregate.employee_ref.as_str()))
        .filter(Column::WorkDate.eq(aggregate.work_date.format("%Y-%m-%d").to_string()))
        .filter(Column::MandateRef.eq(aggregate.mandate_ref.as_str()))
        .one(db)
        .await?;

    match existing {
        Some(found) => {
            let mut active = to_active_model(aggregate);
            active.id = Set(found.id);
            active.code = Set(found.code);
            active.created_at = sea_orm::ActiveValue::NotSet;
            active.version = Set(found.version + 1);
            active.update(db).await?;
            Ok(UpsertOutcome::Updated)
        }
        None => match to_active_model(aggregate).insert(db).await {
            Ok(_) => Ok(UpsertOutcome::Created),
            Err(err) if is_unique_violation(&err) => Ok(UpsertOutcome::Conflict),
            Err(err) => Err(err.into()),
        },
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
