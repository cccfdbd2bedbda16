use anyhow::Result;
use sea_orm::EntityTrait;

use super::setup_test_db;
use crate::client::{ClientPatch, NewClient};
use crate::{client, client_user, company, user};

fn acme_client(user_id: i32, company_id: i32) -> NewClient {
    NewClient {
        name: Some("Acme Inc".into()),
        email: Some("a@x.com".into()),
        phone: Some("555-1111".into()),
        user_id: Some(user_id),
        company_id: Some(company_id),
    }
}

#[tokio::test]
async fn company_create_and_find() -> Result<()> {
    let db = setup_test_db().await?;

    let c = company::create(&db, "Acme").await?;
    assert_eq!(c.name, "Acme");

    let found = company::find_by_name(&db, "Acme").await?.expect("company by name");
    assert_eq!(found.id, c.id);
    assert!(company::find_by_name(&db, "Globex").await?.is_none());

    assert!(company::create(&db, "  ").await.is_err());
    Ok(())
}

#[tokio::test]
async fn user_list_filters_on_exact_username() -> Result<()> {
    let db = setup_test_db().await?;
    let acme = company::create(&db, "Acme").await?;

    let alice = user::create(&db, "alice", Some(acme.id)).await?;
    user::create(&db, "alicia", None).await?;
    user::create(&db, "bob", None).await?;

    let all = user::list(&db, None).await?;
    assert_eq!(all.len(), 3);

    let only = user::list(&db, Some("alice")).await?;
    assert_eq!(only, vec![alice.clone()]);
    assert_eq!(only[0].company_id, Some(acme.id));

    assert!(user::list(&db, Some("ALICE")).await?.is_empty());
    assert!(user::list(&db, Some("nobody")).await?.is_empty());

    let by_name = user::find_by_username(&db, "bob").await?.expect("bob");
    assert_eq!(by_name.username, "bob");
    Ok(())
}

#[tokio::test]
async fn user_replace_username() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, "alice", None).await?;

    assert!(user::replace_username(&db, u.id, Some("alice2")).await?);
    let reloaded = user::Entity::find_by_id(u.id).one(&db).await?.expect("user");
    assert_eq!(reloaded.username, "alice2");

    assert!(!user::replace_username(&db, 42, Some("ghost")).await?);
    Ok(())
}

#[tokio::test]
async fn client_create_and_patch() -> Result<()> {
    let db = setup_test_db().await?;
    let acme = company::create(&db, "Acme").await?;
    let owner = user::create(&db, "owner", Some(acme.id)).await?;

    let created = client::create(&db, acme_client(owner.id, acme.id)).await?;
    assert_eq!(created.name, "Acme Inc");
    assert_eq!(created.user_id, owner.id);

    let patched = client::patch(&db, created.id, ClientPatch { email: Some(Some("b@x.com".into())), ..Default::default() })
        .await?
        .expect("client exists");
    assert_eq!(patched.email, "b@x.com");
    assert_eq!(patched.name, "Acme Inc");
    assert_eq!(patched.phone, "555-1111");

    let untouched = client::patch(&db, created.id, ClientPatch::default()).await?.expect("client exists");
    assert_eq!(untouched, patched);

    assert!(client::patch(&db, 999, ClientPatch::default()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn client_user_links_are_not_deduplicated() -> Result<()> {
    let db = setup_test_db().await?;
    let acme = company::create(&db, "Acme").await?;
    let owner = user::create(&db, "owner", Some(acme.id)).await?;
    let c = client::create(&db, acme_client(owner.id, acme.id)).await?;

    let first = client_user::link(&db, c.id, owner.id, true).await?;
    let second = client_user::link(&db, c.id, owner.id, false).await?;
    assert_ne!(first.id, second.id);
    assert!(first.active);
    assert!(!second.active);
    assert!(first.deleted_at.is_none());
    assert_eq!(first.created_at, first.updated_at);

    let links = client_user::list_for_client(&db, c.id).await?;
    assert_eq!(links.len(), 2);
    Ok(())
}
