use std::{fmt, str::FromStr};

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("{} is not a known role", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MangaStatus {
    Ongoing,
    Completed,
    Hiatus,
}

impl MangaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MangaStatus::Ongoing => "ongoing",
            MangaStatus::Completed => "completed",
            MangaStatus::Hiatus => "hiatus",
        }
    }
}

impl FromStr for MangaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ongoing" => Ok(MangaStatus::Ongoing),
            "completed" => Ok(MangaStatus::Completed),
            "hiatus" => Ok(MangaStatus::Hiatus),
            other => Err(format!("{} is not a known status", other)),
        }
    }
}

#[derive(sqlx::FromRow, serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub id: i64,
    pub owner_id: String,
    pub manga_id: String,
    pub added_at: i64,
    pub last_read: Option<i64>,
    pub chapter: Option<f64>,
}

#[derive(sqlx::FromRow, serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub id: i64,
    pub owner_id: String,
    pub manga_id: String,
    pub added_at: i64,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub owner_id: String,
    pub role: Role,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Manga {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub cover_image: String,
    pub status: MangaStatus,
    pub rating: f64,
    pub chapters: i64,
    pub genres: Vec<String>,
    pub added_at: i64,
}

#[derive(sqlx::FromRow, serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub manga_id: String,
    pub number: i64,
    pub title: String,
    pub released_at: i64,
    pub pages: i64,
}

#[derive(sqlx::FromRow, serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page_number: i64,
    pub image_url: String,
}

#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct MangaGenreEntity {
    pub manga_id: String,
    pub genre: String,
}

/// Page of a chapter as stored, keyed by its chapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageEntity {
    pub manga_id: String,
    pub chapter: i64,
    pub page_number: i64,
    pub image_url: String,
}
