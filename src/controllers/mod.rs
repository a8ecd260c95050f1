pub mod admin;
pub mod favorites;
pub mod home;
pub mod library;
pub mod manga;
pub mod profile;

/// Identifier of the entry a mutation created or updated.
#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct EntryIdResponse {
    pub id: i64,
}
