use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::guard::Owned;
use crate::userdb::UserId;

/// A private note, addressed by its slug
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    #[sqlx(rename = "author_id")]
    pub author: UserId,
}

impl Owned for Note {
    fn owner(&self) -> UserId {
        self.author
    }
}

/// A validated note ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewNote {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author: UserId,
}
