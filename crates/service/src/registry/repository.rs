use async_trait::async_trait;

use super::domain::{ClientPatch, ClientRecord, ClientUserRecord, CompanyRecord, NewClient, UserSummary};
use crate::errors::ServiceError;

/// Repository abstraction for registry persistence.
///
/// Constraint violations (unique names, NOT NULL columns, dangling references)
/// surface as `ServiceError::Db` / `ServiceError::Model`; the repository does not
/// pre-validate what the store enforces.
#[async_trait]
pub trait RegistryRepository: Send + Sync {
    async fn list_users(&self, username: Option<&str>) -> Result<Vec<UserSummary>, ServiceError>;
    /// `Ok(false)` when no user has this id.
    async fn replace_username(&self, id: i32, username: Option<&str>) -> Result<bool, ServiceError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<UserSummary>, ServiceError>;
    async fn create_user(&self, username: &str, company_id: Option<i32>) -> Result<UserSummary, ServiceError>;

    async fn find_company_by_name(&self, name: &str) -> Result<Option<CompanyRecord>, ServiceError>;
    async fn create_company(&self, name: &str) -> Result<CompanyRecord, ServiceError>;

    async fn create_client(&self, input: NewClient) -> Result<ClientRecord, ServiceError>;
    /// `Ok(None)` when no client has this id.
    async fn patch_client(&self, id: i32, patch: ClientPatch) -> Result<Option<ClientRecord>, ServiceError>;

    async fn link_client_user(&self, client_id: i32, user_id: i32, active: bool) -> Result<ClientUserRecord, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples.
///
/// Mirrors the store's constraints: unique usernames and company names,
/// NOT NULL client columns, and existing references.
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct State {
        users: Vec<(i32, String, Option<i32>)>,
        companies: Vec<CompanyRecord>,
        clients: Vec<ClientRecord>,
        client_users: Vec<ClientUserRecord>,
    }

    #[derive(Default)]
    pub struct MockRegistryRepository {
        state: Mutex<State>,
    }

    fn next_id(len: usize) -> i32 {
        len as i32 + 1
    }

    fn not_null(table: &str, column: &str) -> ServiceError {
        ServiceError::Db(format!("NOT NULL constraint failed: {table}.{column}"))
    }

    impl MockRegistryRepository {
        fn lock(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap()
        }

        pub fn users(&self) -> Vec<UserSummary> {
            self.lock().users.iter().map(|(id, name, _)| UserSummary { id: *id, username: name.clone() }).collect()
        }

        pub fn clients(&self) -> Vec<ClientRecord> {
            self.lock().clients.clone()
        }

        pub fn client_users(&self) -> Vec<ClientUserRecord> {
            self.lock().client_users.clone()
        }
    }

    #[async_trait]
    impl RegistryRepository for MockRegistryRepository {
        async fn list_users(&self, username: Option<&str>) -> Result<Vec<UserSummary>, ServiceError> {
            Ok(self
                .users()
                .into_iter()
                .filter(|u| username.map_or(true, |name| u.username == name))
                .collect())
        }

        async fn replace_username(&self, id: i32, username: Option<&str>) -> Result<bool, ServiceError> {
            let mut state = self.lock();
            if !state.users.iter().any(|(uid, _, _)| *uid == id) {
                return Ok(false);
            }
            let name = username.ok_or_else(|| not_null("users", "username"))?;
            if state.users.iter().any(|(uid, n, _)| *uid != id && n == name) {
                return Err(ServiceError::Db("UNIQUE constraint failed: users.username".into()));
            }
            if let Some(user) = state.users.iter_mut().find(|(uid, _, _)| *uid == id) {
                user.1 = name.to_string();
            }
            Ok(true)
        }

        async fn find_user_by_username(&self, username: &str) -> Result<Option<UserSummary>, ServiceError> {
            Ok(self.users().into_iter().find(|u| u.username == username))
        }

        async fn create_user(&self, username: &str, company_id: Option<i32>) -> Result<UserSummary, ServiceError> {
            let mut state = self.lock();
            if state.users.iter().any(|(_, n, _)| n == username) {
                return Err(ServiceError::Db("UNIQUE constraint failed: users.username".into()));
            }
            if let Some(cid) = company_id {
                if !state.companies.iter().any(|c| c.id == cid) {
                    return Err(ServiceError::Db("FOREIGN KEY constraint failed".into()));
                }
            }
            let id = next_id(state.users.len());
            state.users.push((id, username.to_string(), company_id));
            Ok(UserSummary { id, username: username.to_string() })
        }

        async fn find_company_by_name(&self, name: &str) -> Result<Option<CompanyRecord>, ServiceError> {
            Ok(self.lock().companies.iter().find(|c| c.name == name).cloned())
        }

        async fn create_company(&self, name: &str) -> Result<CompanyRecord, ServiceError> {
            let mut state = self.lock();
            if state.companies.iter().any(|c| c.name == name) {
                return Err(ServiceError::Db("UNIQUE constraint failed: companies.name".into()));
            }
            let company = CompanyRecord { id: next_id(state.companies.len()), name: name.to_string() };
            state.companies.push(company.clone());
            Ok(company)
        }

        async fn create_client(&self, input: NewClient) -> Result<ClientRecord, ServiceError> {
            let mut state = self.lock();
            let name = input.name.ok_or_else(|| not_null("clients", "name"))?;
            let email = input.email.ok_or_else(|| not_null("clients", "email"))?;
            let phone = input.phone.ok_or_else(|| not_null("clients", "phone"))?;
            let user_id = input.user_id.ok_or_else(|| not_null("clients", "user_id"))?;
            let company_id = input.company_id.ok_or_else(|| not_null("clients", "company_id"))?;
            let user_exists = state.users.iter().any(|(id, _, _)| *id == user_id);
            let company_exists = state.companies.iter().any(|c| c.id == company_id);
            if !user_exists || !company_exists {
                return Err(ServiceError::Db("FOREIGN KEY constraint failed".into()));
            }
            let client = ClientRecord { id: next_id(state.clients.len()), name, email, phone, user_id, company_id };
            state.clients.push(client.clone());
            Ok(client)
        }

        async fn patch_client(&self, id: i32, patch: ClientPatch) -> Result<Option<ClientRecord>, ServiceError> {
            let mut state = self.lock();
            let Some(client) = state.clients.iter_mut().find(|c| c.id == id) else { return Ok(None) };
            let name = patch.name.map(|v| v.ok_or_else(|| not_null("clients", "name"))).transpose()?;
            let email = patch.email.map(|v| v.ok_or_else(|| not_null("clients", "email"))).transpose()?;
            let phone = patch.phone.map(|v| v.ok_or_else(|| not_null("clients", "phone"))).transpose()?;
            if let Some(name) = name { client.name = name; }
            if let Some(email) = email { client.email = email; }
            if let Some(phone) = phone { client.phone = phone; }
            Ok(Some(client.clone()))
        }

        async fn link_client_user(&self, client_id: i32, user_id: i32, active: bool) -> Result<ClientUserRecord, ServiceError> {
            let mut state = self.lock();
            let client_exists = state.clients.iter().any(|c| c.id == client_id);
            let user_exists = state.users.iter().any(|(id, _, _)| *id == user_id);
            if !client_exists || !user_exists {
                return Err(ServiceError::Db("FOREIGN KEY constraint failed".into()));
            }
            let link = ClientUserRecord { id: next_id(state.client_users.len()), client_id, user_id, active };
            state.client_users.push(link.clone());
            Ok(link)
        }
    }
}
