use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::registry::domain::{ClientPatch, ClientRecord, ClientUserRecord, CompanyRecord, NewClient, UserSummary};
use crate::registry::repository::RegistryRepository;
use models::{client, client_user, company, user};

pub struct SeaOrmRegistryRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRegistryRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl RegistryRepository for SeaOrmRegistryRepository {
    async fn list_users(&self, username: Option<&str>) -> Result<Vec<UserSummary>, ServiceError> {
        let users = user::list(&self.db, username).await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    async fn replace_username(&self, id: i32, username: Option<&str>) -> Result<bool, ServiceError> {
        Ok(user::replace_username(&self.db, id, username).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<UserSummary>, ServiceError> {
        Ok(user::find_by_username(&self.db, username).await?.map(UserSummary::from))
    }

    async fn create_user(&self, username: &str, company_id: Option<i32>) -> Result<UserSummary, ServiceError> {
        Ok(user::create(&self.db, username, company_id).await?.into())
    }

    async fn find_company_by_name(&self, name: &str) -> Result<Option<CompanyRecord>, ServiceError> {
        Ok(company::find_by_name(&self.db, name).await?.map(CompanyRecord::from))
    }

    async fn create_company(&self, name: &str) -> Result<CompanyRecord, ServiceError> {
        Ok(company::create(&self.db, name).await?.into())
    }

    async fn create_client(&self, input: NewClient) -> Result<ClientRecord, ServiceError> {
        Ok(client::create(&self.db, input).await?.into())
    }

    async fn patch_client(&self, id: i32, patch: ClientPatch) -> Result<Option<ClientRecord>, ServiceError> {
        Ok(client::patch(&self.db, id, patch).await?.map(ClientRecord::from))
    }

    async fn link_client_user(&self, client_id: i32, user_id: i32, active: bool) -> Result<ClientUserRecord, ServiceError> {
        Ok(client_user::link(&self.db, client_id, user_id, active).await?.into())
    }
}
