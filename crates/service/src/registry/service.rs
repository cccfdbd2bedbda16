use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{ClientPatch, ClientRecord, CreateClientInput, UserSummary};
use super::repository::RegistryRepository;
use crate::errors::ServiceError;

/// Registry business service independent of web framework
#[derive(Clone)]
pub struct RegistryService {
    repo: Arc<dyn RegistryRepository>,
}

impl RegistryService {
    pub fn new(repo: Arc<dyn RegistryRepository>) -> Self { Self { repo } }

    /// List users, optionally filtered by exact username. An empty filter lists everyone.
    ///
    /// # Examples
    /// ```
    /// use service::registry::{RegistryService, repository::{RegistryRepository, mock::MockRegistryRepository}};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockRegistryRepository::default());
    /// tokio_test::block_on(repo.create_user("alice", None)).unwrap();
    /// tokio_test::block_on(repo.create_user("bob", None)).unwrap();
    /// let svc = RegistryService::new(repo);
    /// let found = tokio_test::block_on(svc.list_users(Some("alice"))).unwrap();
    /// assert_eq!(found.len(), 1);
    /// assert_eq!(tokio_test::block_on(svc.list_users(Some(""))).unwrap().len(), 2);
    /// ```
    #[instrument(skip(self))]
    pub async fn list_users(&self, username: Option<&str>) -> Result<Vec<UserSummary>, ServiceError> {
        let filter = username.filter(|u| !u.is_empty());
        let users = self.repo.list_users(filter).await?;
        info!(count = users.len(), "users_listed");
        Ok(users)
    }

    /// Overwrite a user's username. A missing username is passed through for the store to reject.
    #[instrument(skip(self))]
    pub async fn replace_user(&self, id: i32, username: Option<&str>) -> Result<(), ServiceError> {
        if !self.repo.replace_username(id, username).await? {
            return Err(ServiceError::not_found("User"));
        }
        info!(user_id = id, "user_updated");
        Ok(())
    }

    /// Insert a client with the given columns; references are not checked here.
    #[instrument(skip(self, input), fields(user_id = ?input.user_id, company_id = ?input.company_id))]
    pub async fn create_client(&self, input: CreateClientInput) -> Result<ClientRecord, ServiceError> {
        // The "Company already exists" duplicate check looks up `company_name` on
        // clients, which have no such column, so it can never match and is omitted.
        // TODO: confirm with product whether it should look up `companies.name` instead.
        let created = self.repo.create_client(input.into_new_client()).await?;
        info!(client_id = created.id, "client_created");
        Ok(created)
    }

    /// Replace the supplied client fields, keeping the rest.
    #[instrument(skip(self, patch))]
    pub async fn patch_client(&self, id: i32, patch: ClientPatch) -> Result<ClientRecord, ServiceError> {
        let updated = self
            .repo
            .patch_client(id, patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("Client"))?;
        info!(client_id = id, "client_fields_updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::repository::mock::MockRegistryRepository;

    fn input(user_id: i32, company_id: i32, company_name: &str) -> CreateClientInput {
        CreateClientInput {
            name: Some("Acme Inc".into()),
            email: Some("a@x.com".into()),
            phone: Some("555-1111".into()),
            user_id: Some(user_id),
            company_id: Some(company_id),
            company_name: Some(company_name.into()),
        }
    }

    async fn seeded() -> Result<(Arc<MockRegistryRepository>, RegistryService), ServiceError> {
        let repo = Arc::new(MockRegistryRepository::default());
        let acme = repo.create_company("Acme").await?;
        repo.create_user("alice", Some(acme.id)).await?;
        let svc = RegistryService::new(repo.clone());
        Ok((repo, svc))
    }

    #[tokio::test]
    async fn replace_missing_user_is_not_found() -> Result<(), ServiceError> {
        let (_, svc) = seeded().await?;
        let err = svc.replace_user(42, Some("alice")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "User not found"));
        Ok(())
    }

    #[tokio::test]
    async fn replace_persists_username() -> Result<(), ServiceError> {
        let (_, svc) = seeded().await?;
        svc.replace_user(1, Some("alice2")).await?;
        let users = svc.list_users(None).await?;
        assert_eq!(users, vec![UserSummary { id: 1, username: "alice2".into() }]);
        Ok(())
    }

    #[tokio::test]
    async fn replace_with_null_username_fails_in_store() -> Result<(), ServiceError> {
        let (_, svc) = seeded().await?;
        assert!(matches!(svc.replace_user(1, None).await, Err(ServiceError::Db(_))));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_company_check_never_trips() -> Result<(), ServiceError> {
        let (repo, svc) = seeded().await?;
        // "Acme" is a stored company name, and the same body twice still succeeds
        svc.create_client(input(1, 1, "Acme")).await?;
        svc.create_client(input(1, 1, "Acme")).await?;
        assert_eq!(repo.clients().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn patch_only_email() -> Result<(), ServiceError> {
        let (_, svc) = seeded().await?;
        let created = svc.create_client(input(1, 1, "Acme")).await?;
        let patched = svc
            .patch_client(created.id, ClientPatch { email: Some(Some("b@x.com".into())), ..Default::default() })
            .await?;
        assert_eq!(patched.email, "b@x.com");
        assert_eq!(patched.name, created.name);
        assert_eq!(patched.phone, created.phone);
        Ok(())
    }

    #[tokio::test]
    async fn patch_with_null_field_fails_in_store() -> Result<(), ServiceError> {
        let (repo, svc) = seeded().await?;
        let created = svc.create_client(input(1, 1, "Acme")).await?;
        let patch = ClientPatch { name: Some(None), phone: Some(Some("555-2222".into())), ..Default::default() };
        assert!(matches!(svc.patch_client(created.id, patch).await, Err(ServiceError::Db(_))));
        assert_eq!(repo.clients(), vec![created]);
        Ok(())
    }

    #[tokio::test]
    async fn patch_missing_client_is_not_found() -> Result<(), ServiceError> {
        let (_, svc) = seeded().await?;
        let err = svc.patch_client(7, ClientPatch::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Client not found"));
        Ok(())
    }
}
