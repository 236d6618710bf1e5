//! View descriptions derived from session state. Pure data - the egui
//! layer in main.rs decides how each description is drawn, so the
//! rendering target stays swappable.

use chrono::NaiveDateTime;

use crate::models::{Channel, EpgInfo};
use crate::session::SessionState;

/// How many upcoming EPG programs the panel shows
const EPG_UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum LogoView {
    /// Remote image; the renderer falls back to the placeholder when
    /// the fetch or decode fails
    Image(String),
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelCard {
    pub id: String,
    pub name: String,
    pub favorited: bool,
    pub logo: LogoView,
    pub group: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridView {
    Loading,
    /// Inline message replacing the grid: a load error or "no results"
    Message(String),
    Cards(Vec<ChannelCard>),
}

/// One entry of the group sidebar / filter dropdown. The leading
/// "All Channels" entry carries no filter.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupEntry {
    pub label: String,
    pub filter: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageBar {
    pub label: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramLine {
    pub title: String,
    pub time_range: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpgPanel {
    pub current: Option<ProgramLine>,
    pub upcoming: Vec<ProgramLine>,
}

fn card(channel: &Channel, favorited: bool) -> ChannelCard {
    ChannelCard {
        id: channel.id.clone(),
        name: channel.name.clone(),
        favorited,
        logo: match &channel.logo {
            Some(url) if !url.is_empty() => LogoView::Image(url.clone()),
            _ => LogoView::Placeholder,
        },
        group: channel.group.clone(),
        language: channel.language.clone(),
    }
}

/// The channel grid for the current state. Shows at most one page of
/// cards even if the backend over-delivers.
pub fn grid(state: &SessionState, loading: bool, error: Option<&str>) -> GridView {
    if loading {
        return GridView::Loading;
    }
    if let Some(message) = error {
        return GridView::Message(message.to_string());
    }
    if state.channels.is_empty() {
        return GridView::Message("No channels found".to_string());
    }
    GridView::Cards(
        state
            .channels
            .iter()
            .take(state.page_size())
            .map(|channel| card(channel, state.is_favorite(&channel.id)))
            .collect(),
    )
}

/// One derivation feeds both the sidebar and the dropdown
pub fn group_entries(state: &SessionState) -> Vec<GroupEntry> {
    let mut entries = vec![GroupEntry {
        label: "All Channels".to_string(),
        filter: None,
        active: state.current_filter().is_none(),
    }];
    for group in &state.groups {
        entries.push(GroupEntry {
            label: group.clone(),
            filter: Some(group.clone()),
            active: state.current_filter() == Some(group.as_str()),
        });
    }
    entries
}

pub fn page_bar(state: &SessionState) -> PageBar {
    let page = state.current_page();
    let total_pages = state.total_pages();
    PageBar {
        label: format!(
            "Page {} of {} ({} channels)",
            page,
            total_pages,
            state.total_channels()
        ),
        prev_enabled: page > 1,
        next_enabled: page < total_pages,
    }
}

/// Format an ISO-8601 program time as HH:MM for display. The backend
/// sends naive local timestamps; offsets are accepted too. Anything
/// unparseable passes through untouched.
fn format_program_time(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%H:%M").to_string();
    }
    raw.to_string()
}

fn program_line(program: &crate::models::Program) -> ProgramLine {
    ProgramLine {
        title: program.title.clone(),
        time_range: format!(
            "{} - {}",
            format_program_time(&program.start_time),
            format_program_time(&program.end_time)
        ),
        description: program.description.clone(),
    }
}

/// EPG panel for the open channel: "Now Playing" plus at most five
/// upcoming programs
pub fn epg_panel(epg: &EpgInfo) -> EpgPanel {
    EpgPanel {
        current: epg.current_program.as_ref().map(program_line),
        upcoming: epg
            .upcoming_programs
            .iter()
            .take(EPG_UPCOMING_LIMIT)
            .map(program_line)
            .collect(),
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
