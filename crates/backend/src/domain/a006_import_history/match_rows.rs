use contracts::domain::a006_import_history::MatchRow;
use contracts::enums::MatchType;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

/// Строки аудита сопоставления, плоская таблица без метаданных агрегата

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a006_import_match_row")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub import_ref: String,
    pub raw_external_id: Option<String>,
    pub raw_first_name: String,
    pub raw_last_name: String,
    pub matched_employee_ref: Option<String>,
    pub match_type: String,
    pub confidence: i32,
    pub needs_review: bool,
    pub total_hours: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MatchRow {
    fn from(m: Model) -> Self {
        MatchRow {
            id: m.id,
            import_ref: m.import_ref,
            raw_external_id: m.raw_external_id,
            raw_first_name: m.raw_first_name,
            raw_last_name: m.raw_last_name,
            matched_employee_ref: m.matched_employee_ref,
            match_type: MatchType::from_code(&m.match_type).unwrap_or(MatchType::None),
            confidence: m.confidence,
            needs_review: m.needs_review,
            total_hours: m.total_hours,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active_model(row: &MatchRow) -> ActiveModel {
    ActiveModel {
        id: Set(row.id.clone()),
        import_ref: Set(row.import_ref.clone()),
        raw_external_id: Set(row.raw_external_id.clone()),
        raw_first_name: Set(row.raw_first_name.clone()),
        raw_last_name: Set(row.raw_last_name.clone()),
        matched_employee_ref: Set(row.matched_employee_ref.clone()),
        match_type: Set(row.match_type.code().to_string()),
        confidence: Set(row.confidence),
        needs_review: Set(row.needs_review),
        total_hours: Set(row.total_hours),
    }
}

/// Пакетная запись строк аудита одного импорта
pub async fn insert_many(rows: &[MatchRow]) -> anyhow::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let models: Vec<ActiveModel> = rows.iter().map(to_active_model).collect();
    Entity::insert_many(models).exec(conn()).await?;
    Ok(())
}

pub async fn list_by_import(import_ref: &str) -> anyhow::Result<Vec<MatchRow>> {
    let items = Entity::find()
        .filter(Column::ImportRef.eq(import_ref))
        .order_by_asc(Column::RawLastName)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}
