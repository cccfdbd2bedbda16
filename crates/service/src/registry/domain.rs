use serde::{Deserialize, Deserializer, Serialize};

pub use models::client::{ClientPatch, NewClient};

/// Public shape of a user in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_id: i32,
    pub company_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientUserRecord {
    pub id: i32,
    pub client_id: i32,
    pub user_id: i32,
    pub active: bool,
}

/// Body of `PUT /users/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplaceUserInput {
    #[serde(default)]
    pub username: Option<String>,
}

/// Body of `POST /clients`. Every field may be missing; the store decides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateClientInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub user_id: Option<i32>,
    #[serde(default)]
    pub company_id: Option<i32>,
    #[serde(default)]
    pub company_name: Option<String>,
}

impl CreateClientInput {
    pub fn into_new_client(self) -> NewClient {
        NewClient {
            name: self.name,
            email: self.email,
            phone: self.phone,
            user_id: self.user_id,
            company_id: self.company_id,
        }
    }
}

/// Body of `PATCH /clients/{id}`. An absent field keeps the stored value; an
/// explicit `null` is sent on to the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatchClientInput {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub phone: Option<Option<String>>,
}

/// Only runs for keys present in the body, so `null` becomes `Some(None)`.
fn present<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(de).map(Some)
}

impl From<PatchClientInput> for ClientPatch {
    fn from(p: PatchClientInput) -> Self {
        ClientPatch { name: p.name, email: p.email, phone: p.phone }
    }
}

impl From<models::user::Model> for UserSummary {
    fn from(u: models::user::Model) -> Self {
        UserSummary { id: u.id, username: u.username }
    }
}

impl From<models::company::Model> for CompanyRecord {
    fn from(c: models::company::Model) -> Self {
        CompanyRecord { id: c.id, name: c.name }
    }
}

impl From<models::client::Model> for ClientRecord {
    fn from(c: models::client::Model) -> Self {
        ClientRecord { id: c.id, name: c.name, email: c.email, phone: c.phone, user_id: c.user_id, company_id: c.company_id }
    }
}

impl From<models::client_user::Model> for ClientUserRecord {
    fn from(l: models::client_user::Model) -> Self {
        ClientUserRecord { id: l.id, client_id: l.client_id, user_id: l.user_id, active: l.active }
    }
}
