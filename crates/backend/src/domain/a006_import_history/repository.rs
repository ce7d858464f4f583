use chrono::{NaiveDate, Utc};
use contracts::domain::a006_import_history::{ImportHistory, ImportHistoryId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::ImportStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a006_import_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub mandate_ref: String,
    pub file_name: String,
    pub import_kind: String,
    pub period_label: String,
    pub period_start: Option<String>,
    pub period_end: Option<String>,
    pub total_rows: i32,
    pub created_count: i32,
    pub updated_count: i32,
    pub skipped_count: i32,
    pub error_count: i32,
    pub status: String,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<Utc>>,
    pub updated_at: Option<chrono::DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_date(value: &Option<String>) -> Option<NaiveDate> {
    value
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

impl From<Model> for ImportHistory {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let period_start = parse_date(&m.period_start);
        let period_end = parse_date(&m.period_end);

        ImportHistory {
            base: BaseAggregate::with_metadata(
                ImportHistoryId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            mandate_ref: m.mandate_ref,
            file_name: m.file_name,
            import_kind: m.import_kind,
            period_label: m.period_label,
            period_start,
            period_end,
            total_rows: m.total_rows,
            created_count: m.created_count,
            updated_count: m.updated_count,
            skipped_count: m.skipped_count,
            error_count: m.error_count,
            status: ImportStatus::from_code(&m.status).unwrap_or(ImportStatus::Pending),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active_model(aggregate: &ImportHistory) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        mandate_ref: Set(aggregate.mandate_ref.clone()),
        file_name: Set(aggregate.file_name.clone()),
        import_kind: Set(aggregate.import_kind.clone()),
        period_label: Set(aggregate.period_label.clone()),
        period_start: Set(aggregate
            .period_start
            .map(|d| d.format("%Y-%m-%d").to_string())),
        period_end: Set(aggregate
            .period_end
            .map(|d| d.format("%Y-%m-%d").to_string())),
        total_rows: Set(aggregate.total_rows),
        created_count: Set(aggregate.created_count),
        updated_count: Set(aggregate.updated_count),
        skipped_count: Set(aggregate.skipped_count),
        error_count: Set(aggregate.error_count),
        status: Set(aggregate.status.code().to_string()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ImportHistory>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// История импортов заведения, свежие сверху
pub async fn list_by_mandate(mandate_ref: &str) -> anyhow::Result<Vec<ImportHistory>> {
    let items = Entity::find()
        .filter(Column::MandateRef.eq(mandate_ref))
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn list_all() -> anyhow::Result<Vec<ImportHistory>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn insert(aggregate: &ImportHistory) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active_model(aggregate).insert(conn()).await?;
    Ok(uuid)
}

/// Единственная мутация записи истории: итоговые счетчики и статус
pub async fn update_counts_and_status(aggregate: &ImportHistory) -> anyhow::Result<()> {
    use sea_orm::sea_query::Expr;
    Entity::update_many()
        .col_expr(Column::TotalRows, Expr::value(aggregate.total_rows))
        .col_expr(Column::CreatedCount, Expr::value(aggregate.created_count))
        .col_expr(Column::UpdatedCount, Expr::value(aggregate.updated_count))
        .col_expr(Column::SkippedCount, Expr::value(aggregate.skipped_count))
        .col_expr(Column::ErrorCount, Expr::value(aggregate.error_count))
        .col_expr(Column::Status, Expr::value(aggregate.status.code()))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(aggregate.base.id.value().to_string()))
        .exec(conn())
        .await?;
    Ok(())
}
