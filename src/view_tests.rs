//! Tests for the state -> view-description mapping

#[cfg(test)]
mod tests {
    use crate::models::{Channel, EpgInfo, Program};
    use crate::session::SessionState;
    use crate::view::*;

    fn channel(id: &str) -> Channel {
        Channel {
            id: id.to_string(),
            name: id.to_uppercase(),
            url: format!("http://stream.example.com/{}.m3u8", id),
            logo: None,
            group: None,
            language: None,
        }
    }

    fn program(title: &str, start: &str, end: &str) -> Program {
        Program {
            title: title.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_grid_loading_and_error() {
        let state = SessionState::new();
        assert_eq!(grid(&state, true, None), GridView::Loading);
        assert_eq!(
            grid(&state, false, Some("Failed to load channels")),
            GridView::Message("Failed to load channels".to_string())
        );
    }

    #[test]
    fn test_grid_empty_message() {
        let mut state = SessionState::new();
        state.apply_page(Vec::new(), 0);
        assert_eq!(
            grid(&state, false, None),
            GridView::Message("No channels found".to_string())
        );
    }

    #[test]
    fn test_grid_cards_carry_favorite_state() {
        let mut state = SessionState::new();
        state.apply_page(vec![channel("c1"), channel("c2")], 2);
        state.toggle_favorite("c2");

        let GridView::Cards(cards) = grid(&state, false, None) else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), 2);
        assert!(!cards[0].favorited);
        assert!(cards[1].favorited);
    }

    #[test]
    fn test_grid_caps_at_page_size() {
        let mut state = SessionState::new();
        let many: Vec<Channel> = (0..60).map(|i| channel(&format!("c{}", i))).collect();
        state.apply_page(many, 60);

        let GridView::Cards(cards) = grid(&state, false, None) else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), state.page_size());
    }

    #[test]
    fn test_logo_placeholder_when_missing() {
        let mut with_logo = channel("c1");
        with_logo.logo = Some("https://example.com/c1.png".to_string());
        let mut empty_logo = channel("c2");
        empty_logo.logo = Some(String::new());

        let mut state = SessionState::new();
        state.apply_page(vec![with_logo, empty_logo, channel("c3")], 3);

        let GridView::Cards(cards) = grid(&state, false, None) else {
            panic!("expected cards");
        };
        assert_eq!(
            cards[0].logo,
            LogoView::Image("https://example.com/c1.png".to_string())
        );
        assert_eq!(cards[1].logo, LogoView::Placeholder);
        assert_eq!(cards[2].logo, LogoView::Placeholder);
    }

    #[test]
    fn test_card_badges() {
        let mut ch = channel("c1");
        ch.group = Some("News".to_string());
        ch.language = Some("Malay".to_string());

        let mut state = SessionState::new();
        state.apply_page(vec![ch, channel("c2")], 2);

        let GridView::Cards(cards) = grid(&state, false, None) else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].group, Some("News".to_string()));
        assert_eq!(cards[0].language, Some("Malay".to_string()));
        assert_eq!(cards[1].group, None);
        assert_eq!(cards[1].language, None);
    }

    #[test]
    fn test_group_entries_lead_with_all_channels() {
        let mut state = SessionState::new();
        state.set_groups(vec!["News".to_string(), "Sports".to_string()]);

        let entries = group_entries(&state);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].label, "All Channels");
        assert_eq!(entries[0].filter, None);
        assert!(entries[0].active);
        assert!(!entries[1].active);

        state.select_group(Some("Sports".to_string()));
        let entries = group_entries(&state);
        assert!(!entries[0].active);
        assert!(entries[2].active);
    }

    #[test]
    fn test_page_bar() {
        let mut state = SessionState::new();
        let page: Vec<Channel> = (0..50).map(|i| channel(&format!("c{}", i))).collect();
        state.apply_page(page, 123);

        let bar = page_bar(&state);
        assert_eq!(bar.label, "Page 1 of 3 (123 channels)");
        assert!(!bar.prev_enabled);
        assert!(bar.next_enabled);

        state.next_page();
        state.next_page();
        let bar = page_bar(&state);
        assert_eq!(bar.label, "Page 3 of 3 (123 channels)");
        assert!(bar.prev_enabled);
        assert!(!bar.next_enabled);
    }

    #[test]
    fn test_page_bar_empty() {
        let mut state = SessionState::new();
        state.apply_page(Vec::new(), 0);
        let bar = page_bar(&state);
        assert!(!bar.prev_enabled);
        assert!(!bar.next_enabled);
    }

    #[test]
    fn test_epg_panel_truncates_upcoming() {
        let epg = EpgInfo {
            current_program: Some(program(
                "News at 8",
                "2024-01-01T20:00:00",
                "2024-01-01T21:00:00",
            )),
            upcoming_programs: (0..8)
                .map(|i| {
                    program(
                        &format!("Show {}", i),
                        "2024-01-01T21:00:00",
                        "2024-01-01T22:00:00",
                    )
                })
                .collect(),
        };

        let panel = epg_panel(&epg);
        assert_eq!(panel.current.as_ref().unwrap().title, "News at 8");
        assert_eq!(panel.upcoming.len(), 5);
    }

    #[test]
    fn test_epg_panel_time_formats() {
        let epg = EpgInfo {
            current_program: Some(program(
                "News at 8",
                "2024-01-01T20:00:00",
                "2024-01-01T21:30:00",
            )),
            upcoming_programs: vec![program(
                "Offset",
                "2024-01-01T21:30:00+08:00",
                "2024-01-01T22:00:00+08:00",
            )],
        };

        let panel = epg_panel(&epg);
        assert_eq!(panel.current.as_ref().unwrap().time_range, "20:00 - 21:30");
        assert_eq!(panel.upcoming[0].time_range, "21:30 - 22:00");
    }

    #[test]
    fn test_epg_panel_passes_raw_time_through() {
        let epg = EpgInfo {
            current_program: Some(program("Odd", "soon", "later")),
            upcoming_programs: Vec::new(),
        };
        let panel = epg_panel(&epg);
        assert_eq!(panel.current.as_ref().unwrap().time_range, "soon - later");
    }

    #[test]
    fn test_epg_panel_without_current() {
        let panel = epg_panel(&EpgInfo::default());
        assert!(panel.current.is_none());
        assert!(panel.upcoming.is_empty());
    }
}
