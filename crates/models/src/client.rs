use sea_orm::{entity::prelude::*, sea_query::Expr, ActiveValue, DatabaseConnection, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{company, user};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_id: i32,
    pub company_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Company,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Company => Entity::belongs_to(company::Entity).from(Column::CompanyId).to(company::Column::Id).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a new client. Absent values are omitted from the INSERT,
/// so the store's NOT NULL constraints decide whether the row is accepted.
#[derive(Clone, Debug, Default)]
pub struct NewClient {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub user_id: Option<i32>,
    pub company_id: Option<i32>,
}

/// Replacement values for a client. The outer `None` keeps the stored value;
/// `Some(None)` writes NULL and is left for the NOT NULL constraint to reject.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientPatch {
    pub name: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
}

impl ClientPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

fn set_or_omit<T>(v: Option<T>) -> ActiveValue<T>
where
    T: Into<sea_orm::Value>,
{
    match v {
        Some(v) => Set(v),
        None => ActiveValue::NotSet,
    }
}

pub async fn create(db: &DatabaseConnection, input: NewClient) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: ActiveValue::NotSet,
        name: set_or_omit(input.name),
        email: set_or_omit(input.email),
        phone: set_or_omit(input.phone),
        user_id: set_or_omit(input.user_id),
        company_id: set_or_omit(input.company_id),
    };
    Ok(am.insert(db).await?)
}

/// Apply `patch` to client `id`. Returns `None` when no such client exists.
pub async fn patch(db: &DatabaseConnection, id: i32, patch: ClientPatch) -> Result<Option<Model>, ModelError> {
    let Some(found) = Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    if patch.is_empty() {
        return Ok(Some(found));
    }

    let mut update = Entity::update_many().filter(Column::Id.eq(id));
    for (column, value) in [(Column::Name, patch.name), (Column::Email, patch.email), (Column::Phone, patch.phone)] {
        if let Some(value) = value {
            update = update.col_expr(column, Expr::value(value));
        }
    }
    update.exec(db).await?;

    Ok(Entity::find_by_id(id).one(db).await?)
}
