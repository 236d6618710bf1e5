//! Tests for the playback coordinator state machine

#[cfg(test)]
mod tests {
    use crate::models::Channel;
    use crate::player::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    fn channel(id: &str, url: &str) -> Channel {
        Channel {
            id: id.to_string(),
            name: id.to_uppercase(),
            url: url.to_string(),
            logo: None,
            group: None,
            language: None,
        }
    }

    fn hls_channel(id: &str) -> Channel {
        channel(id, &format!("http://stream.example.com/{}.m3u8", id))
    }

    #[derive(Default)]
    struct Shared {
        calls: Vec<String>,
        live: i32,
        max_live: i32,
        next_id: usize,
        attach_fails: bool,
        scripted: VecDeque<Vec<EngineEvent>>,
    }

    struct MockEngine {
        id: usize,
        shared: Rc<RefCell<Shared>>,
        queued: Vec<EngineEvent>,
        destroyed: bool,
    }

    impl StreamEngine for MockEngine {
        fn load_source(&mut self, url: &str) {
            self.shared
                .borrow_mut()
                .calls
                .push(format!("load#{} {}", self.id, url));
        }

        fn attach_media(&mut self) -> Result<(), String> {
            let mut shared = self.shared.borrow_mut();
            shared.calls.push(format!("attach#{}", self.id));
            if shared.attach_fails {
                Err("no media element".to_string())
            } else {
                Ok(())
            }
        }

        fn poll_events(&mut self) -> Vec<EngineEvent> {
            std::mem::take(&mut self.queued)
        }

        fn destroy(&mut self) {
            if !self.destroyed {
                self.destroyed = true;
                let mut shared = self.shared.borrow_mut();
                shared.live -= 1;
                shared.calls.push(format!("destroy#{}", self.id));
            }
        }
    }

    struct MockFactory {
        adaptive: bool,
        native: bool,
        shared: Rc<RefCell<Shared>>,
    }

    impl MockFactory {
        fn new(adaptive: bool, native: bool) -> Self {
            Self {
                adaptive,
                native,
                shared: Rc::new(RefCell::new(Shared::default())),
            }
        }

        /// Queue the events the next created engine will deliver
        fn script(self, events: Vec<EngineEvent>) -> Self {
            self.shared.borrow_mut().scripted.push_back(events);
            self
        }

        fn failing_attach(self) -> Self {
            self.shared.borrow_mut().attach_fails = true;
            self
        }

        fn calls(&self) -> Vec<String> {
            self.shared.borrow().calls.clone()
        }

        fn live(&self) -> i32 {
            self.shared.borrow().live
        }

        fn max_live(&self) -> i32 {
            self.shared.borrow().max_live
        }
    }

    impl EngineFactory for MockFactory {
        fn adaptive_supported(&self) -> bool {
            self.adaptive
        }

        fn native_hls_supported(&self) -> bool {
            self.native
        }

        fn create_engine(&self) -> Box<dyn StreamEngine> {
            let mut shared = self.shared.borrow_mut();
            let id = shared.next_id;
            shared.next_id += 1;
            shared.live += 1;
            shared.max_live = shared.max_live.max(shared.live);
            shared.calls.push(format!("create#{}", id));
            let queued = shared.scripted.pop_front().unwrap_or_default();
            drop(shared);
            Box::new(MockEngine {
                id,
                shared: self.shared.clone(),
                queued,
                destroyed: false,
            })
        }
    }

    #[test]
    fn test_engine_path_opens_then_plays() {
        let factory = MockFactory::new(true, false).script(vec![EngineEvent::ManifestReady]);
        let mut playback = PlaybackCoordinator::new();

        let strategy = playback.open(&hls_channel("c1"), &factory).unwrap();
        assert_eq!(strategy, Strategy::Engine);
        assert_eq!(playback.state(), PlaybackState::Opening);
        assert_eq!(playback.channel_id(), Some("c1"));
        assert_eq!(
            factory.calls(),
            vec![
                "create#0",
                "load#0 http://stream.example.com/c1.m3u8",
                "attach#0",
            ]
        );

        assert_eq!(playback.poll(), Some(PlaybackProgress::Started));
        assert_eq!(playback.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_second_open_disposes_first_engine() {
        let factory = MockFactory::new(true, false)
            .script(vec![EngineEvent::ManifestReady])
            .script(vec![EngineEvent::ManifestReady]);
        let mut playback = PlaybackCoordinator::new();

        playback.open(&hls_channel("a"), &factory).unwrap();
        playback.poll();
        playback.open(&hls_channel("b"), &factory).unwrap();

        // A's instance is destroyed before B's exists
        let calls = factory.calls();
        let destroy_a = calls.iter().position(|c| c == "destroy#0").unwrap();
        let create_b = calls.iter().position(|c| c == "create#1").unwrap();
        assert!(destroy_a < create_b);
        assert_eq!(factory.max_live(), 1);
        assert_eq!(factory.live(), 1);
        assert_eq!(playback.channel_id(), Some("b"));
    }

    #[test]
    fn test_close_tears_down() {
        let factory = MockFactory::new(true, false).script(vec![EngineEvent::ManifestReady]);
        let mut playback = PlaybackCoordinator::new();

        playback.open(&hls_channel("c1"), &factory).unwrap();
        playback.poll();
        playback.close();

        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(!playback.has_engine());
        assert_eq!(playback.channel_id(), None);
        assert_eq!(factory.live(), 0);
    }

    #[test]
    fn test_unsupported_environment_stays_idle() {
        let factory = MockFactory::new(false, false);
        let mut playback = PlaybackCoordinator::new();

        let result = playback.open(&hls_channel("c1"), &factory);
        assert_eq!(result, Err(PlaybackError::Unsupported));
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(factory.calls().is_empty());
    }

    #[test]
    fn test_native_fallback_plays_directly() {
        let factory = MockFactory::new(false, true);
        let mut playback = PlaybackCoordinator::new();

        let strategy = playback.open(&hls_channel("c1"), &factory).unwrap();
        assert_eq!(strategy, Strategy::Native);
        assert_eq!(playback.state(), PlaybackState::Playing);
        assert!(!playback.has_engine());
        assert!(factory.calls().is_empty());
    }

    #[test]
    fn test_non_hls_url_skips_engine() {
        // The engine only takes HLS playlists; anything else goes native
        let factory = MockFactory::new(true, true);
        let mut playback = PlaybackCoordinator::new();
        let strategy = playback
            .open(&channel("c1", "http://stream.example.com/c1.ts"), &factory)
            .unwrap();
        assert_eq!(strategy, Strategy::Native);
        assert!(factory.calls().is_empty());

        let factory = MockFactory::new(true, false);
        let result = playback.open(&channel("c1", "http://stream.example.com/c1.ts"), &factory);
        assert_eq!(result, Err(PlaybackError::Unsupported));
    }

    #[test]
    fn test_engine_error_reports_and_goes_idle() {
        let factory =
            MockFactory::new(true, false).script(vec![EngineEvent::Error("bad manifest".into())]);
        let mut playback = PlaybackCoordinator::new();

        playback.open(&hls_channel("c1"), &factory).unwrap();
        assert_eq!(
            playback.poll(),
            Some(PlaybackProgress::Failed("bad manifest".to_string()))
        );
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(!playback.has_engine());
        assert_eq!(factory.live(), 0);
    }

    #[test]
    fn test_attach_failure_destroys_engine() {
        let factory = MockFactory::new(true, false).failing_attach();
        let mut playback = PlaybackCoordinator::new();

        let result = playback.open(&hls_channel("c1"), &factory);
        assert_eq!(
            result,
            Err(PlaybackError::Engine("no media element".to_string()))
        );
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(!playback.has_engine());
        assert_eq!(factory.live(), 0);
        assert!(factory.calls().contains(&"destroy#0".to_string()));
    }
}
