use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub author_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub loves_count: u32,
    #[serde(default)]
    pub saves_count: u32,
    #[serde(default)]
    pub is_loved: bool,
    #[serde(default)]
    pub is_saved: bool,
}

impl Post {
    pub fn reacted(&self, kind: ReactionKind) -> bool {
        match kind {
            ReactionKind::Love => self.is_loved,
            ReactionKind::Save => self.is_saved,
        }
    }

    pub fn count(&self, kind: ReactionKind) -> u32 {
        match kind {
            ReactionKind::Love => self.loves_count,
            ReactionKind::Save => self.saves_count,
        }
    }

    pub fn toggle(&mut self, kind: ReactionKind) {
        let (flag, count) = match kind {
            ReactionKind::Love => (&mut self.is_loved, &mut self.loves_count),
            ReactionKind::Save => (&mut self.is_saved, &mut self.saves_count),
        };
        *flag = !*flag;
        *count = if *flag {
            count.saturating_add(1)
        } else {
            count.saturating_sub(1)
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub page: u32,
    pub posts: Vec<Post>,
    #[serde(default)]
    pub next_page: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Love,
    Save,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Love => "love",
            ReactionKind::Save => "save",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRequest {
    pub target_id: u64,
    pub target_type: TargetType,
    pub reaction_kind: ReactionKind,
    pub user_id: String,
}
