// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile and per-user trail lists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Membership lists a user keeps of trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum TrailList {
    Favourites,
    Wishlist,
    Completed,
}

impl TrailList {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrailList::Favourites => "favourites",
            TrailList::Wishlist => "wishlist",
            TrailList::Completed => "completed",
        }
    }
}

impl fmt::Display for TrailList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrailList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "favourites" | "favorites" => Ok(TrailList::Favourites),
            "wishlist" => Ok(TrailList::Wishlist),
            "completed" => Ok(TrailList::Completed),
            other => Err(format!("unknown list: {other}")),
        }
    }
}

/// Add or remove a trail from a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    Add,
    Remove,
}

/// User profile stored in Firestore, keyed by auth uid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    pub uid: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub favourites: Vec<String>,
    #[serde(default)]
    pub wishlist: Vec<String>,
    #[serde(default)]
    pub completed: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl UserProfile {
    pub fn new(uid: &str, now: &str) -> Self {
        Self {
            uid: uid.to_string(),
            created_at: now.to_string(),
            updated_at: now.to_string(),
            ..Default::default()
        }
    }

    pub fn list(&self, list: TrailList) -> &[String] {
        match list {
            TrailList::Favourites => &self.favourites,
            TrailList::Wishlist => &self.wishlist,
            TrailList::Completed => &self.completed,
        }
    }

    fn list_mut(&mut self, list: TrailList) -> &mut Vec<String> {
        match list {
            TrailList::Favourites => &mut self.favourites,
            TrailList::Wishlist => &mut self.wishlist,
            TrailList::Completed => &mut self.completed,
        }
    }

    /// Apply set-like union/removal to a list.
    ///
    /// Returns `true` if the list changed.
    pub fn apply_list_change(
        &mut self,
        list: TrailList,
        trail_id: &str,
        change: ListChange,
        now: &str,
    ) -> bool {
        let entries = self.list_mut(list);
        let changed = match change {
            ListChange::Add => {
                if entries.iter().any(|id| id == trail_id) {
                    false
                } else {
                    entries.push(trail_id.to_string());
                    true
                }
            }
            ListChange::Remove => {
                let before = entries.len();
                entries.retain(|id| id != trail_id);
                entries.len() != before
            }
        };

        if changed {
            self.updated_at = now.to_string();
        }
        changed
    }
}
