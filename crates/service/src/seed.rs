//! Startup seeding for tables that no HTTP route writes to.
//!
//! Companies and users are inserted only when missing, so applying the same
//! seed twice is harmless. Client-user links are always appended.

use configs::SeedConfig;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::registry::repository::RegistryRepository;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub companies_created: usize,
    pub users_created: usize,
    pub client_users_linked: usize,
}

#[instrument(skip_all, fields(companies = seed.companies.len(), users = seed.users.len(), client_users = seed.client_users.len()))]
pub async fn apply(repo: &dyn RegistryRepository, seed: &SeedConfig) -> Result<SeedReport, ServiceError> {
    let mut report = SeedReport::default();

    for name in &seed.companies {
        if repo.find_company_by_name(name).await?.is_none() {
            repo.create_company(name).await?;
            report.companies_created += 1;
        }
    }

    for u in &seed.users {
        if repo.find_user_by_username(&u.username).await?.is_some() {
            continue;
        }
        let company_id = match &u.company {
            Some(name) => Some(
                repo.find_company_by_name(name)
                    .await?
                    .ok_or_else(|| ServiceError::Validation(format!("seed user {} references unknown company {}", u.username, name)))?
                    .id,
            ),
            None => None,
        };
        repo.create_user(&u.username, company_id).await?;
        report.users_created += 1;
    }

    for link in &seed.client_users {
        repo.link_client_user(link.client_id, link.user_id, link.active).await?;
        report.client_users_linked += 1;
    }

    info!(
        companies_created = report.companies_created,
        users_created = report.users_created,
        client_users_linked = report.client_users_linked,
        "seed_applied"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::domain::NewClient;
    use crate::registry::repo::seaorm::SeaOrmRegistryRepository;
    use crate::registry::repository::mock::MockRegistryRepository;
    use crate::test_support::get_db;
    use configs::{SeedClientUser, SeedUser};

    fn sample() -> SeedConfig {
        SeedConfig {
            companies: vec!["Acme".into(), "Globex".into()],
            users: vec![
                SeedUser { username: "alice".into(), company: Some("Acme".into()) },
                SeedUser { username: "bob".into(), company: None },
            ],
            client_users: vec![],
        }
    }

    #[tokio::test]
    async fn seeding_twice_is_idempotent() -> Result<(), anyhow::Error> {
        let repo = SeaOrmRegistryRepository::new(get_db().await?);

        let first = apply(&repo, &sample()).await?;
        assert_eq!(first, SeedReport { companies_created: 2, users_created: 2, client_users_linked: 0 });

        let second = apply(&repo, &sample()).await?;
        assert_eq!(second, SeedReport::default());
        assert_eq!(repo.list_users(None).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_company_is_rejected() -> Result<(), anyhow::Error> {
        let repo = MockRegistryRepository::default();
        let seed = SeedConfig {
            users: vec![SeedUser { username: "carol".into(), company: Some("Initech".into()) }],
            ..Default::default()
        };
        assert!(matches!(apply(&repo, &seed).await, Err(ServiceError::Validation(_))));
        assert!(repo.users().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn client_user_links_are_appended() -> Result<(), anyhow::Error> {
        let repo = MockRegistryRepository::default();
        apply(&repo, &sample()).await?;
        repo.create_client(NewClient {
            name: Some("Acme Inc".into()),
            email: Some("a@x.com".into()),
            phone: Some("555-1111".into()),
            user_id: Some(1),
            company_id: Some(1),
        }).await?;

        let seed = SeedConfig {
            client_users: vec![SeedClientUser { client_id: 1, user_id: 1, active: true }],
            ..Default::default()
        };
        apply(&repo, &seed).await?;
        let report = apply(&repo, &seed).await?;
        assert_eq!(report.client_users_linked, 1);
        assert_eq!(repo.client_users().len(), 2);
        Ok(())
    }
}
