//! Playback coordination. The streaming engine itself is a collaborator
//! behind the `EngineFactory`/`StreamEngine` traits; this module owns
//! the single engine instance and the Idle -> Opening -> Playing state
//! machine around it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::models::Channel;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Opening,
    Playing,
}

/// Notifications polled from a live engine instance
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ManifestReady,
    Error(String),
}

/// How the open channel is being played
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Dedicated adaptive-streaming engine instance
    Engine,
    /// The media surface handles the stream URL natively
    Native,
}

#[derive(Debug, PartialEq)]
pub enum PlaybackError {
    /// No viable playback strategy in this environment
    Unsupported,
    Engine(String),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::Unsupported => write!(f, "No supported playback method for this stream"),
            PlaybackError::Engine(e) => write!(f, "Failed to start playback: {}", e),
        }
    }
}

/// A constructed streaming-engine instance bound to one stream
pub trait StreamEngine {
    fn load_source(&mut self, url: &str);
    fn attach_media(&mut self) -> Result<(), String>;
    /// Drain pending notifications (manifest ready, fatal errors)
    fn poll_events(&mut self) -> Vec<EngineEvent>;
    fn destroy(&mut self);
}

/// Environment capability probe plus engine construction
pub trait EngineFactory {
    fn adaptive_supported(&self) -> bool;
    fn native_hls_supported(&self) -> bool;
    fn create_engine(&self) -> Box<dyn StreamEngine>;
}

/// Progress reported while a channel is opening
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackProgress {
    Started,
    Failed(String),
}

fn looks_like_hls(url: &str) -> bool {
    url.contains(".m3u8")
}

/// Owns the at-most-one engine instance. All creation and disposal goes
/// through here, sequentially.
#[derive(Default)]
pub struct PlaybackCoordinator {
    state: PlaybackState,
    strategy: Option<Strategy>,
    engine: Option<Box<dyn StreamEngine>>,
    channel_id: Option<String>,
}

impl PlaybackCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn strategy(&self) -> Option<Strategy> {
        self.strategy
    }

    pub fn channel_id(&self) -> Option<&str> {
        self.channel_id.as_deref()
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// Open a channel from Idle or Playing. Any prior engine instance is
    /// destroyed before a new one exists. On `Err` the coordinator is
    /// back in Idle and the caller alerts the user.
    pub fn open(
        &mut self,
        channel: &Channel,
        factory: &dyn EngineFactory,
    ) -> Result<Strategy, PlaybackError> {
        self.teardown();

        if factory.adaptive_supported() && looks_like_hls(&channel.url) {
            let mut engine = factory.create_engine();
            engine.load_source(&channel.url);
            if let Err(e) = engine.attach_media() {
                engine.destroy();
                return Err(PlaybackError::Engine(e));
            }
            self.engine = Some(engine);
            self.strategy = Some(Strategy::Engine);
            self.channel_id = Some(channel.id.clone());
            self.state = PlaybackState::Opening;
            Ok(Strategy::Engine)
        } else if factory.native_hls_supported() {
            self.strategy = Some(Strategy::Native);
            self.channel_id = Some(channel.id.clone());
            self.state = PlaybackState::Playing;
            Ok(Strategy::Native)
        } else {
            Err(PlaybackError::Unsupported)
        }
    }

    /// Drive an Opening engine forward: manifest-ready starts playback,
    /// an engine error tears down and reports
    pub fn poll(&mut self) -> Option<PlaybackProgress> {
        let engine = self.engine.as_mut()?;
        for event in engine.poll_events() {
            match event {
                EngineEvent::ManifestReady => {
                    if self.state == PlaybackState::Opening {
                        self.state = PlaybackState::Playing;
                        return Some(PlaybackProgress::Started);
                    }
                }
                EngineEvent::Error(e) => {
                    self.teardown();
                    return Some(PlaybackProgress::Failed(e));
                }
            }
        }
        None
    }

    /// Stop playback, clear the media source, destroy the engine
    pub fn close(&mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.destroy();
        }
        self.strategy = None;
        self.channel_id = None;
        self.state = PlaybackState::Idle;
    }
}

/// Engine implementation over an external player process. `destroy`
/// kills and reaps the child so no orphan keeps the stream open.
pub struct ProcessEngine {
    player: PathBuf,
    user_agent: String,
    source: Option<String>,
    child: Option<Child>,
    announced: bool,
}

impl ProcessEngine {
    fn new(player: PathBuf, user_agent: String) -> Self {
        Self {
            player,
            user_agent,
            source: None,
            child: None,
            announced: false,
        }
    }

    fn spawn(&mut self, url: &str) -> Result<Child, String> {
        let name = self
            .player
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        let mut command = Command::new(&self.player);
        // Per-player argument shapes; ffplay is the quiet default
        if name.contains("mpv") {
            command
                .arg("--really-quiet")
                .arg(format!("--user-agent={}", self.user_agent))
                .arg(url);
        } else if name.contains("vlc") {
            command
                .arg("--play-and-exit")
                .arg(format!("--http-user-agent={}", self.user_agent))
                .arg(url);
        } else {
            command
                .arg("-loglevel")
                .arg("quiet")
                .arg("-user_agent")
                .arg(&self.user_agent)
                .arg("-autoexit")
                .arg(url);
        }

        command
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| format!("Failed to launch {}: {}", self.player.display(), e))
    }
}

impl StreamEngine for ProcessEngine {
    fn load_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
    }

    fn attach_media(&mut self) -> Result<(), String> {
        let url = self
            .source
            .clone()
            .ok_or_else(|| "No source loaded".to_string())?;
        let child = self.spawn(&url)?;
        self.child = Some(child);
        self.announced = false;
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        let Some(child) = self.child.as_mut() else {
            return Vec::new();
        };
        match child.try_wait() {
            Ok(None) => {
                // Still running: the stream was accepted
                if !self.announced {
                    self.announced = true;
                    vec![EngineEvent::ManifestReady]
                } else {
                    Vec::new()
                }
            }
            Ok(Some(status)) => {
                self.child = None;
                if self.announced && status.success() {
                    // Player exited normally after playing
                    Vec::new()
                } else {
                    vec![EngineEvent::Error(format!("Player exited: {}", status))]
                }
            }
            Err(e) => {
                self.child = None;
                vec![EngineEvent::Error(format!("Player wait failed: {}", e))]
            }
        }
    }

    fn destroy(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait(); // Reap the process
        }
        self.source = None;
        self.announced = false;
    }
}

impl Drop for ProcessEngine {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Locate a binary on PATH, plus the usual install dirs on Windows
fn resolve_binary(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.is_absolute() && candidate.exists() {
        return Some(candidate.to_path_buf());
    }

    #[cfg(target_os = "windows")]
    {
        let known = [
            format!(r"C:\Program Files\VideoLAN\VLC\{}.exe", name),
            format!(r"C:\Program Files (x86)\VideoLAN\VLC\{}.exe", name),
            format!(r"C:\Program Files\mpv\{}.exe", name),
        ];
        for path in &known {
            if Path::new(path).exists() {
                return Some(PathBuf::from(path));
            }
        }
    }

    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join(name);
        if candidate.exists() {
            return Some(candidate);
        }
        #[cfg(target_os = "windows")]
        {
            let candidate = dir.join(format!("{}.exe", name));
            if candidate.exists() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Production factory: adaptive playback is available when the
/// configured player binary resolves. There is no native media surface
/// in this shell, so the native path never probes true here.
pub struct ProcessEngineFactory {
    player: String,
    user_agent: String,
}

impl ProcessEngineFactory {
    pub fn new(external_player: &str, user_agent: &str) -> Self {
        let player = if external_player.is_empty() {
            "ffplay".to_string()
        } else {
            external_player.to_string()
        };
        Self {
            player,
            user_agent: user_agent.to_string(),
        }
    }

    fn resolved(&self) -> Option<PathBuf> {
        resolve_binary(&self.player)
    }
}

impl EngineFactory for ProcessEngineFactory {
    fn adaptive_supported(&self) -> bool {
        self.resolved().is_some()
    }

    fn native_hls_supported(&self) -> bool {
        false
    }

    fn create_engine(&self) -> Box<dyn StreamEngine> {
        let player = self
            .resolved()
            .unwrap_or_else(|| PathBuf::from(&self.player));
        Box::new(ProcessEngine::new(player, self.user_agent.clone()))
    }
}

#[cfg(test)]
#[path = "player_tests.rs"]
mod tests;
