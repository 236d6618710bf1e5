//! Data models for the IPTV channel browser

use serde::{Deserialize, Serialize};

/// A single channel as served by the backend. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// One page of channels plus the total match count
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelPage {
    pub channels: Vec<Channel>,
    pub total: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupsResponse {
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<String>,
}

/// A scheduled EPG program. Times are ISO-8601 strings from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// EPG data for one channel: what is on now and what comes next
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EpgInfo {
    #[serde(default)]
    pub current_program: Option<Program>,
    #[serde(default)]
    pub upcoming_programs: Vec<Program>,
}
