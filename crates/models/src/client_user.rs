use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{client, user};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "client_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: i32,
    pub user_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Client,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Client => Entity::belongs_to(client::Entity).from(Column::ClientId).to(client::Column::Id).into(),
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Record a new association. Pairs are not deduplicated.
pub async fn link(db: &DatabaseConnection, client_id: i32, user_id: i32, active: bool) -> Result<Model, ModelError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        client_id: Set(client_id),
        user_id: Set(user_id),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        active: Set(active),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn list_for_client(db: &DatabaseConnection, client_id: i32) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().filter(Column::ClientId.eq(client_id)).all(db).await?)
}
