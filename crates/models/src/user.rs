use sea_orm::{entity::prelude::*, sea_query::Expr, DatabaseConnection, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{client, company};
use migration::schema::limits;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub company_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Company,
    Clients,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity).from(Column::CompanyId).to(company::Column::Id).into(),
            Relation::Clients => Entity::has_many(client::Entity).into(),
        }
    }
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl Related<client::Entity> for Entity {
    fn to() -> RelationDef { Relation::Clients.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_username(username: &str) -> Result<(), ModelError> {
    if username.trim().is_empty() { return Err(ModelError::Validation("username required".into())); }
    if username.chars().count() > limits::USERNAME as usize {
        return Err(ModelError::Validation(format!("username longer than {}", limits::USERNAME)));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, username: &str, company_id: Option<i32>) -> Result<Model, ModelError> {
    validate_username(username)?;
    let am = ActiveModel {
        username: Set(username.to_string()),
        company_id: Set(company_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Username.eq(username)).one(db).await?)
}

/// All users, or only those whose username equals `username` exactly.
/// No ordering is applied.
pub async fn list(db: &DatabaseConnection, username: Option<&str>) -> Result<Vec<Model>, ModelError> {
    let mut query = Entity::find();
    if let Some(name) = username {
        query = query.filter(Column::Username.eq(name));
    }
    Ok(query.all(db).await?)
}

/// Overwrite the username of user `id`. Returns `false` when no such user exists.
///
/// `None` is written as SQL NULL and left for the NOT NULL constraint to reject.
pub async fn replace_username(db: &DatabaseConnection, id: i32, username: Option<&str>) -> Result<bool, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::Username, Expr::value(username.map(str::to_owned)))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}
