use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::guard::Owned;
use crate::userdb::UserId;

/// A published news item; read-only for the web flows
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

/// News item to seed into the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewNews {
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

impl NewNews {
    /// A news item dated today
    pub fn today(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            date: Utc::now().date_naive(),
        }
    }
}

/// A reader's comment under a news item
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub news_id: i64,
    #[sqlx(rename = "author_id")]
    pub author: UserId,
    pub text: String,
    pub created: DateTime<Utc>,
}

impl Owned for Comment {
    fn owner(&self) -> UserId {
        self.author
    }
}
