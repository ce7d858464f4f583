use chrono::Utc;
use contracts::domain::a002_employee::{Employee, EmployeeId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_employee")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub external_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub hourly_rate: Option<f64>,
    pub position: String,
    pub is_active: bool,
    pub mandate_ref: String,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<Utc>>,
    pub updated_at: Option<chrono::DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Employee {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Employee {
            base: BaseAggregate::with_metadata(
                EmployeeId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            external_id: m.external_id,
            first_name: m.first_name,
            last_name: m.last_name,
            hourly_rate: m.hourly_rate,
            position: m.position,
            is_active: m.is_active,
            mandate_ref: m.mandate_ref,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active_model(aggregate: &Employee) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        external_id: Set(aggregate.external_id.clone()),
        first_name: Set(aggregate.first_name.clone()),
        last_name: Set(aggregate.last_name.clone()),
        hourly_rate: Set(aggregate.hourly_rate),
        position: Set(aggregate.position.clone()),
        is_active: Set(aggregate.is_active),
        mandate_ref: Set(aggregate.mandate_ref.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<Employee>> {
    let mut items: Vec<Employee> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.base.description.cmp(&b.base.description));
    Ok(items)
}

pub async fn list_by_mandate(mandate_ref: &str) -> anyhow::Result<Vec<Employee>> {
    let mut items: Vec<Employee> = Entity::find()
        .filter(Column::MandateRef.eq(mandate_ref))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.base.description.cmp(&b.base.description));
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Employee>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Employee) -> anyhow::Result<Uuid> {
    insert_txn(conn(), aggregate).await
}

/// Вставка внутри транзакции чанка импорта
pub async fn insert_txn<C: ConnectionTrait>(db: &C, aggregate: &Employee) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active_model(aggregate).insert(db).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Employee) -> anyhow::Result<()> {
    update_txn(conn(), aggregate).await
}

/// Обновление внутри транзакции чанка импорта (актуализация ставки)
pub async fn update_txn<C: ConnectionTrait>(db: &C, aggregate: &Employee) -> anyhow::Result<()> {
    let mut active = to_active_model(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(db).await?;
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
