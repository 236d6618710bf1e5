//! IPTV Channel Browser
//! Desktop client for browsing, searching and playing IPTV channels
//! against a channel-manager backend

// Hide console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Use mimalloc for faster memory allocation (Linux, macOS)
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use eframe::egui;
use std::collections::HashSet;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

mod api;
mod config;
mod models;
mod player;
mod session;
mod view;

use api::ApiClient;
use config::AppConfig;
use models::{Channel, EpgInfo};
use player::{
    PlaybackCoordinator, PlaybackProgress, PlaybackState, ProcessEngineFactory, Strategy,
};
use session::{FavoriteAction, FetchSpec, SearchDebounce, SearchInput, SessionState};
use view::{GridView, LogoView};

/// Get current time as HH:MM:SS (UTC)
fn timestamp_now() -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let secs = now % 86400;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Window icon: purple gradient tile with a play triangle
fn load_icon() -> egui::IconData {
    let size: usize = 64;
    let mut rgba = vec![0u8; size * size * 4];

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let nx = x as f32 / size as f32;
            let ny = y as f32 / size as f32;

            // Gradient #667eea -> #764ba2
            let t = nx * 0.5 + ny * 0.5;
            let r = (102.0 + (118.0 - 102.0) * t) as u8;
            let g = (126.0 + (75.0 - 126.0) * t) as u8;
            let b = (234.0 + (162.0 - 234.0) * t) as u8;

            // Play triangle in the middle
            let px = nx - 0.38;
            let py = ny - 0.5;
            let in_play = px >= 0.0 && px <= 0.28 && py.abs() <= (0.28 - px) * 0.75;

            if in_play {
                rgba[idx] = 255;
                rgba[idx + 1] = 255;
                rgba[idx + 2] = 255;
            } else {
                rgba[idx] = r;
                rgba[idx + 1] = g;
                rgba[idx + 2] = b;
            }
            rgba[idx + 3] = 255;
        }
    }

    egui::IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}

/// Background task messages
enum TaskResult {
    GroupsLoaded(Vec<String>),
    GroupsFailed(String),
    FavoritesLoaded(HashSet<String>),
    FavoritesFailed(String),
    FavoriteSyncFailed { channel_id: String, error: String },
    PageLoaded { channels: Vec<Channel>, total: usize },
    PageFailed { message: String, error: String },
    RefreshFinished,
    RefreshFailed(String),
    EpgLoaded { channel_id: String, epg: EpgInfo },
    EpgFailed { channel_id: String, error: String },
}

/// Context for background fetch operations - carries everything a
/// worker thread needs without touching app state
struct FetchContext {
    base_url: String,
    user_agent: String,
    sender: Sender<TaskResult>,
}

impl FetchContext {
    fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url, &self.user_agent)
    }
}

struct BrowserApp {
    config: AppConfig,

    // Session state
    state: SessionState,
    debounce: SearchDebounce,
    search_input: String,

    // Background task channel
    task_receiver: Receiver<TaskResult>,
    task_sender: Sender<TaskResult>,

    // Transient fetch status
    loading: bool,
    grid_error: Option<String>,
    refreshing: bool,

    // Playback
    playback: PlaybackCoordinator,
    engine_factory: ProcessEngineFactory,
    player_open: bool,
    playing_channel: Option<Channel>,
    epg: Option<EpgInfo>,

    // Console log
    status_message: String,
    console_log: Vec<String>,
    show_console: bool,
    alert: Option<String>,
}

impl BrowserApp {
    fn new(config: AppConfig) -> Self {
        let (task_sender, task_receiver) = channel();
        let engine_factory = ProcessEngineFactory::new(&config.external_player, &config.user_agent);

        let mut app = Self {
            config,
            state: SessionState::new(),
            debounce: SearchDebounce::new(),
            search_input: String::new(),
            task_receiver,
            task_sender,
            loading: false,
            grid_error: None,
            refreshing: false,
            playback: PlaybackCoordinator::new(),
            engine_factory,
            player_open: false,
            playing_channel: None,
            epg: None,
            status_message: "Connecting...".to_string(),
            console_log: Vec::new(),
            show_console: false,
            alert: None,
        };

        // Initial sync: favorites, groups, first page
        app.load_favorites();
        app.load_groups();
        let spec = app.state.active_fetch();
        app.issue_fetch(spec);
        app
    }

    fn log(&mut self, message: &str) {
        let timestamp = timestamp_now();
        self.console_log.push(format!("[{}] {}", timestamp, message));
        // Keep last 500 lines
        if self.console_log.len() > 500 {
            self.console_log.remove(0);
        }
    }

    fn fetch_context(&self) -> FetchContext {
        FetchContext {
            base_url: self.config.backend_url.clone(),
            user_agent: self.config.user_agent.clone(),
            sender: self.task_sender.clone(),
        }
    }

    fn load_groups(&mut self) {
        let ctx = self.fetch_context();
        thread::spawn(move || {
            let result = match ctx.client().get_groups() {
                Ok(groups) => TaskResult::GroupsLoaded(groups),
                Err(e) => TaskResult::GroupsFailed(e.to_string()),
            };
            let _ = ctx.sender.send(result);
        });
    }

    fn load_favorites(&mut self) {
        let ctx = self.fetch_context();
        thread::spawn(move || {
            let result = match ctx.client().get_favorites() {
                Ok(favorites) => TaskResult::FavoritesLoaded(favorites.into_iter().collect()),
                Err(e) => TaskResult::FavoritesFailed(e.to_string()),
            };
            let _ = ctx.sender.send(result);
        });
    }

    /// Issue the page fetch for a listing or search. Never cancelled;
    /// whichever response lands last wins.
    fn issue_fetch(&mut self, spec: FetchSpec) {
        self.loading = true;
        self.grid_error = None;

        let message = match &spec {
            FetchSpec::Search { .. } => "Failed to search channels",
            FetchSpec::Listing { .. } => "Failed to load channels",
        }
        .to_string();

        let ctx = self.fetch_context();
        thread::spawn(move || {
            let result = match ctx.client().get_page(&spec) {
                Ok(page) => TaskResult::PageLoaded {
                    channels: page.channels,
                    total: page.total,
                },
                Err(e) => TaskResult::PageFailed {
                    message,
                    error: e.to_string(),
                },
            };
            let _ = ctx.sender.send(result);
        });
    }

    /// Optimistic: the local set flips before the request resolves. A
    /// failure only logs; the set stays until the next favorites sync.
    fn toggle_favorite(&mut self, channel_id: &str) {
        let action = self.state.toggle_favorite(channel_id);
        let ctx = self.fetch_context();
        thread::spawn(move || {
            let (channel_id, result) = match &action {
                FavoriteAction::Add {
                    channel_id,
                    list_name,
                } => (
                    channel_id.clone(),
                    ctx.client().add_favorite(channel_id, list_name),
                ),
                FavoriteAction::Remove { channel_id } => {
                    (channel_id.clone(), ctx.client().remove_favorite(channel_id))
                }
            };
            if let Err(e) = result {
                let _ = ctx.sender.send(TaskResult::FavoriteSyncFailed {
                    channel_id,
                    error: e.to_string(),
                });
            }
        });
    }

    fn start_refresh(&mut self) {
        if self.refreshing {
            return;
        }
        self.refreshing = true;
        self.status_message = "Refreshing channels...".to_string();

        let ctx = self.fetch_context();
        thread::spawn(move || {
            let result = match ctx.client().refresh_channels() {
                Ok(()) => TaskResult::RefreshFinished,
                Err(e) => TaskResult::RefreshFailed(e.to_string()),
            };
            let _ = ctx.sender.send(result);
        });
    }

    fn load_epg(&mut self, channel_id: &str) {
        let channel_id = channel_id.to_string();
        let ctx = self.fetch_context();
        thread::spawn(move || {
            let result = match ctx.client().get_epg(&channel_id) {
                Ok(epg) => TaskResult::EpgLoaded { channel_id, epg },
                Err(e) => TaskResult::EpgFailed {
                    channel_id,
                    error: e.to_string(),
                },
            };
            let _ = ctx.sender.send(result);
        });
    }

    fn open_channel(&mut self, channel: Channel) {
        match self.playback.open(&channel, &self.engine_factory) {
            Ok(strategy) => {
                let how = match strategy {
                    Strategy::Engine => "streaming engine",
                    Strategy::Native => "native playback",
                };
                self.log(&format!("[PLAY] {} via {}", channel.name, how));
                self.status_message = format!("Playing {}", channel.name);
                self.player_open = true;
                self.epg = None;
                // EPG loads in the background; playback never waits on it
                self.load_epg(&channel.id);
                self.playing_channel = Some(channel);
            }
            Err(e) => {
                self.log(&format!("[ERROR] {}", e));
                self.alert = Some(e.to_string());
            }
        }
    }

    fn close_player(&mut self) {
        self.playback.close();
        self.player_open = false;
        self.playing_channel = None;
        self.epg = None;
        self.status_message = "Ready".to_string();
    }

    fn process_results(&mut self) {
        while let Ok(result) = self.task_receiver.try_recv() {
            match result {
                TaskResult::GroupsLoaded(groups) => {
                    self.log(&format!("[INFO] Loaded {} groups", groups.len()));
                    self.state.set_groups(groups);
                }
                TaskResult::GroupsFailed(e) => {
                    self.log(&format!("[ERROR] {}", e));
                }
                TaskResult::FavoritesLoaded(favorites) => {
                    self.log(&format!("[INFO] Loaded {} favorites", favorites.len()));
                    self.state.set_favorites(favorites);
                }
                TaskResult::FavoritesFailed(e) => {
                    self.log(&format!("[ERROR] Favorites: {}", e));
                }
                TaskResult::FavoriteSyncFailed { channel_id, error } => {
                    // Known gap: the optimistic flip is not rolled back
                    self.log(&format!(
                        "[ERROR] Favorite sync failed for {}: {}",
                        channel_id, error
                    ));
                }
                TaskResult::PageLoaded { channels, total } => {
                    self.loading = false;
                    self.grid_error = None;
                    self.state.apply_page(channels, total);
                    self.status_message = format!(
                        "Page {} of {} ({} channels)",
                        self.state.current_page(),
                        self.state.total_pages(),
                        total
                    );
                }
                TaskResult::PageFailed { message, error } => {
                    self.loading = false;
                    self.log(&format!("[ERROR] {}: {}", message, error));
                    self.grid_error = Some(message);
                }
                TaskResult::RefreshFinished => {
                    self.refreshing = false;
                    self.log("[INFO] Channel refresh finished");
                    self.status_message = "Channels refreshed".to_string();
                    // Refresh returns nothing to apply - re-fetch everything
                    self.load_groups();
                    let spec = self.state.active_fetch();
                    self.issue_fetch(spec);
                }
                TaskResult::RefreshFailed(e) => {
                    self.refreshing = false;
                    self.log(&format!("[ERROR] Refresh failed: {}", e));
                    self.alert = Some("Failed to refresh channels".to_string());
                }
                TaskResult::EpgLoaded { channel_id, epg } => {
                    // Only for the channel still open; a late response for
                    // a closed one is dropped
                    if self
                        .playing_channel
                        .as_ref()
                        .is_some_and(|c| c.id == channel_id)
                    {
                        self.epg = Some(epg);
                    }
                }
                TaskResult::EpgFailed { channel_id, error } => {
                    self.log(&format!("[ERROR] EPG for {}: {}", channel_id, error));
                }
            }
        }
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("📺 IPTV Browser").strong().size(16.0));
            ui.separator();

            // Debounced search box
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search_input)
                    .hint_text("Search channels...")
                    .desired_width(200.0),
            );
            if response.changed() {
                let input = self.search_input.clone();
                match self.debounce.input(&input, Instant::now()) {
                    SearchInput::Cleared => {
                        let spec = self.state.clear_search();
                        self.issue_fetch(spec);
                    }
                    SearchInput::Armed => {}
                }
            }

            // Group dropdown, same entries as the sidebar
            let entries = view::group_entries(&self.state);
            let selected = entries
                .iter()
                .find(|e| e.active)
                .map(|e| e.label.clone())
                .unwrap_or_else(|| "All Channels".to_string());
            let mut clicked_filter: Option<Option<String>> = None;
            egui::ComboBox::from_id_salt("group_filter")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    for entry in &entries {
                        if ui.selectable_label(entry.active, &entry.label).clicked() {
                            clicked_filter = Some(entry.filter.clone());
                        }
                    }
                });
            if let Some(filter) = clicked_filter {
                let spec = self.state.select_group(filter);
                self.issue_fetch(spec);
            }

            let refresh_label = if self.refreshing {
                "Refreshing..."
            } else {
                "Refresh"
            };
            if ui
                .add_enabled(!self.refreshing, egui::Button::new(refresh_label))
                .clicked()
            {
                self.start_refresh();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let bar = view::page_bar(&self.state);
                if ui
                    .add_enabled(bar.next_enabled, egui::Button::new("Next ▶"))
                    .clicked()
                {
                    if let Some(spec) = self.state.next_page() {
                        self.issue_fetch(spec);
                    }
                }
                ui.label(&bar.label);
                if ui
                    .add_enabled(bar.prev_enabled, egui::Button::new("◀ Previous"))
                    .clicked()
                {
                    if let Some(spec) = self.state.prev_page() {
                        self.issue_fetch(spec);
                    }
                }
            });
        });
    }

    fn show_group_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.heading("Groups");
        ui.separator();

        let entries = view::group_entries(&self.state);
        let mut clicked_filter: Option<Option<String>> = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for entry in &entries {
                if ui.selectable_label(entry.active, &entry.label).clicked() {
                    clicked_filter = Some(entry.filter.clone());
                }
            }
        });
        if let Some(filter) = clicked_filter {
            let spec = self.state.select_group(filter);
            self.issue_fetch(spec);
        }
    }

    fn show_card_logo(&self, ui: &mut egui::Ui, logo: &LogoView) {
        let placeholder = |ui: &mut egui::Ui| {
            ui.label(egui::RichText::new("📺").size(32.0));
        };
        match logo {
            LogoView::Image(url) => {
                // Placeholder when the image cannot be fetched or decoded
                match ui.ctx().try_load_image(url, egui::load::SizeHint::default()) {
                    Ok(_) => {
                        ui.add(
                            egui::Image::from_uri(url.as_str())
                                .max_size(egui::vec2(120.0, 60.0))
                                .show_loading_spinner(false),
                        );
                    }
                    Err(_) => placeholder(ui),
                }
            }
            LogoView::Placeholder => placeholder(ui),
        }
    }

    fn show_grid(&mut self, ui: &mut egui::Ui) {
        let grid = view::grid(&self.state, self.loading, self.grid_error.as_deref());

        match grid {
            GridView::Loading => {
                ui.centered_and_justified(|ui| {
                    ui.label("Loading channels...");
                });
            }
            GridView::Message(message) => {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new(message).size(16.0));
                });
            }
            GridView::Cards(cards) => {
                let columns = (ui.available_width() / 190.0).floor().max(1.0) as usize;
                let mut toggle_fav: Option<String> = None;
                let mut to_play: Option<String> = None;

                egui::ScrollArea::vertical().show(ui, |ui| {
                    for row in cards.chunks(columns) {
                        ui.horizontal(|ui| {
                            for card in row {
                                ui.group(|ui| {
                                    ui.set_width(170.0);
                                    ui.vertical(|ui| {
                                        ui.horizontal(|ui| {
                                            let fav_text = if card.favorited {
                                                egui::RichText::new("★")
                                                    .size(18.0)
                                                    .color(egui::Color32::GOLD)
                                            } else {
                                                egui::RichText::new("☆")
                                                    .size(18.0)
                                                    .color(egui::Color32::GRAY)
                                            };
                                            if ui
                                                .button(fav_text)
                                                .on_hover_text(if card.favorited {
                                                    "Remove from favorites"
                                                } else {
                                                    "Add to favorites"
                                                })
                                                .clicked()
                                            {
                                                toggle_fav = Some(card.id.clone());
                                            }
                                            if ui.button("▶").clicked() {
                                                to_play = Some(card.id.clone());
                                            }
                                        });
                                        self.show_card_logo(ui, &card.logo);
                                        ui.label(egui::RichText::new(&card.name).strong());
                                        if let Some(group) = &card.group {
                                            ui.small(group);
                                        }
                                        if let Some(language) = &card.language {
                                            ui.small(format!("🌐 {}", language));
                                        }
                                    });
                                });
                            }
                        });
                    }
                });

                if let Some(id) = toggle_fav {
                    self.toggle_favorite(&id);
                }
                if let Some(id) = to_play {
                    if let Some(channel) = self.state.channels.iter().find(|c| c.id == id).cloned()
                    {
                        self.open_channel(channel);
                    }
                }
            }
        }
    }

    fn show_player_window(&mut self, ctx: &egui::Context) {
        if !self.player_open {
            return;
        }
        let Some(channel) = self.playing_channel.clone() else {
            return;
        };

        let mut open = true;
        let mut close_clicked = false;
        egui::Window::new(&channel.name)
            .open(&mut open)
            .collapsible(false)
            .default_width(420.0)
            .show(ctx, |ui| {
                if let Some(group) = &channel.group {
                    ui.label(format!("Category: {}", group));
                }
                match self.playback.state() {
                    PlaybackState::Opening => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Opening stream...");
                        });
                    }
                    PlaybackState::Playing => {
                        let how = match self.playback.strategy() {
                            Some(Strategy::Native) => "Playing (native)",
                            _ => "Playing",
                        };
                        ui.label(how);
                    }
                    PlaybackState::Idle => {
                        ui.label("Stopped");
                    }
                }

                ui.separator();
                ui.heading("Program Guide");
                if let Some(epg) = &self.epg {
                    let panel = view::epg_panel(epg);
                    if let Some(current) = &panel.current {
                        ui.label(egui::RichText::new("Now Playing").strong());
                        ui.label(egui::RichText::new(&current.title).strong());
                        ui.label(&current.time_range);
                        if let Some(description) = &current.description {
                            ui.label(egui::RichText::new(description).weak());
                        }
                        ui.add_space(8.0);
                    }
                    if !panel.upcoming.is_empty() {
                        ui.label(egui::RichText::new("Coming Up").strong());
                        for line in &panel.upcoming {
                            ui.label(&line.title);
                            ui.label(egui::RichText::new(&line.time_range).weak());
                        }
                    }
                }

                ui.separator();
                if ui.button("Close").clicked() {
                    close_clicked = true;
                }
            });

        if !open || close_clicked {
            self.close_player();
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&message);
                if ui.button("OK").clicked() {
                    self.alert = None;
                }
            });
    }

    fn show_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(&self.status_message);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .selectable_label(self.show_console, "Console")
                    .clicked()
                {
                    self.show_console = !self.show_console;
                }
                let theme = if self.config.dark_mode { "🌙" } else { "☀" };
                if ui.button(theme).clicked() {
                    self.config.dark_mode = !self.config.dark_mode;
                    self.config.save();
                    ui.ctx().set_visuals(if self.config.dark_mode {
                        egui::Visuals::dark()
                    } else {
                        egui::Visuals::light()
                    });
                }
            });
        });
        if self.show_console {
            ui.separator();
            egui::ScrollArea::vertical()
                .max_height(140.0)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &self.console_log {
                        ui.monospace(line);
                    }
                });
        }
    }
}

impl eframe::App for BrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process background task results (non-blocking)
        self.process_results();

        // Fire a quiet search
        if let Some(query) = self.debounce.poll(Instant::now()) {
            self.log(&format!("[INFO] Searching '{}'", query));
            let spec = self.state.search_fired(query);
            self.issue_fetch(spec);
        }

        // Drive an opening stream forward
        if let Some(progress) = self.playback.poll() {
            match progress {
                PlaybackProgress::Started => {
                    self.log("[PLAY] Stream started");
                }
                PlaybackProgress::Failed(e) => {
                    self.log(&format!("[ERROR] Playback: {}", e));
                    self.alert = Some("Failed to load stream".to_string());
                    self.player_open = false;
                    self.playing_channel = None;
                    self.epg = None;
                }
            }
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.show_toolbar(ui);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.show_status_bar(ui);
        });

        egui::SidePanel::left("groups")
            .default_width(180.0)
            .show(ctx, |ui| {
                self.show_group_sidebar(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_grid(ui);
        });

        self.show_player_window(ctx);
        self.show_alert(ctx);

        // Keep polling while anything is in flight
        if let Some(deadline) = self.debounce.deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
        if self.loading || self.refreshing || self.playback.has_engine() {
            ctx.request_repaint_after(Duration::from_millis(150));
        }
    }
}

/// Load a system emoji font so the favorite/logo glyphs render
fn install_emoji_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    #[cfg(target_os = "windows")]
    let candidates: &[&str] = &["C:\\Windows\\Fonts\\seguiemj.ttf"];
    #[cfg(target_os = "macos")]
    let candidates: &[&str] = &["/System/Library/Fonts/Apple Color Emoji.ttc"];
    #[cfg(target_os = "linux")]
    let candidates: &[&str] = &[
        "/usr/share/fonts/truetype/noto/NotoColorEmoji.ttf",
        "/usr/share/fonts/noto-emoji/NotoColorEmoji.ttf",
        "/usr/share/fonts/google-noto-emoji/NotoColorEmoji.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    ];
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    let candidates: &[&str] = &[];

    for path in candidates {
        if let Ok(font_data) = std::fs::read(path) {
            fonts.font_data.insert(
                "emoji".to_owned(),
                egui::FontData::from_owned(font_data).into(),
            );
            fonts
                .families
                .entry(egui::FontFamily::Proportional)
                .or_default()
                .push("emoji".to_owned());
            break;
        }
    }

    ctx.set_fonts(fonts);
}

fn main() -> Result<(), eframe::Error> {
    // Force X11 backend on Linux before any windowing code runs
    #[cfg(target_os = "linux")]
    {
        std::env::set_var("WINIT_UNIX_BACKEND", "x11");
        std::env::remove_var("WAYLAND_DISPLAY");
    }

    let icon = load_icon();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 720.0])
            .with_min_inner_size([900.0, 540.0])
            .with_icon(icon),
        vsync: true,
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        ..Default::default()
    };

    eframe::run_native(
        "IPTV Channel Browser",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            install_emoji_fonts(&cc.egui_ctx);

            let config = AppConfig::load();
            cc.egui_ctx.set_visuals(if config.dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });

            Ok(Box::new(BrowserApp::new(config)))
        }),
    )
}
