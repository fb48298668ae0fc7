// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::sync::{Arc, Mutex};

use crate::{
    command::{CommandContext, CommandRegistry, ParsedCommand, Usage},
    error::CommandError,
    events::AppEvent,
    player::{PlaybackStatus, PlayerState},
    shortcuts::DEFAULT_SHORTCUTS,
    tests::{Call, Fixture, MockPlayer},
};

/// A valid invocation of every built-in command.
const MINIMAL_LINES: &[&str] = &[
    "about",
    "add_subtitles subs.srt",
    "boss",
    "fitwindow",
    "fullscreen",
    "help",
    "jump 0",
    "media_info",
    "mpv show-progress",
    "open",
    "open_recent 0",
    "output",
    "play_pause",
    "playlist toggle",
    "quit",
    "screenshot",
    "sh true",
    "shortcut list",
    "speed 1.5",
    "stop",
    "volume 50",
];

#[test]
fn given_every_registered_verb_when_dispatched_with_minimal_arguments_then_no_error_is_reported() {
    // Given
    let mut fixture = Fixture::new();
    fixture.recent.push("/media/last.mkv");

    let registered: Vec<String> = fixture
        .registry
        .describe_all()
        .into_iter()
        .map(|(name, _)| name.to_string())
        .collect();

    let covered: Vec<String> = MINIMAL_LINES
        .iter()
        .filter_map(|line| ParsedCommand::parse(line))
        .map(|parsed| parsed.verb)
        .collect();

    assert_eq!(registered, covered);

    // When / Then
    for line in MINIMAL_LINES {
        let verb = ParsedCommand::parse(line).map(|parsed| parsed.verb).unwrap_or_default();
        assert!(fixture.registry.resolve(&verb).is_ok(), "{} should resolve", verb);
        assert_eq!(fixture.execute(line), Ok(()), "{} failed", line);
    }
}

#[test]
fn given_unregistered_verb_when_dispatched_then_unknown_command_is_reported_without_side_effects() {
    // Given
    let mut fixture = Fixture::new();

    // When
    let result = fixture.execute("frobnicate now");
    let dispatched = fixture.dispatch("frobnicate");

    // Then
    assert_eq!(result, Err(CommandError::UnknownCommand("frobnicate".to_string())));
    assert!(!dispatched);
    assert!(fixture.player.calls().is_empty());
    assert_eq!(fixture.output_lines(), vec!["[kuro]: invalid command 'frobnicate'".to_string()]);
}

#[test]
fn given_blank_line_when_dispatched_then_nothing_happens() {
    // Given
    let mut fixture = Fixture::new();

    // When
    let dispatched = fixture.dispatch("   ");

    // Then
    assert!(dispatched);
    assert!(fixture.output_lines().is_empty());
}

#[test]
fn given_registered_verb_when_registered_again_then_duplicate_is_rejected() {
    // Given
    let mut registry = CommandRegistry::with_builtins().expect("builtins register");

    // When
    let result = registry.register(
        "stop",
        |_: &mut CommandContext<'_>, _: &[String]| -> Result<(), CommandError> { Ok(()) },
        Usage::new("", "another stop"),
    );

    // Then
    assert_eq!(result, Err(CommandError::DuplicateCommand("stop".to_string())));
    assert_eq!(registry.describe("stop").map(|usage| usage.description), Ok("stops the current playback"));
}

#[test]
fn given_custom_command_when_dispatched_then_it_receives_whitespace_split_arguments() {
    // Given
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);

    let mut fixture = Fixture::new();
    fixture
        .registry
        .register(
            "echo",
            move |_: &mut CommandContext<'_>, args: &[String]| -> Result<(), CommandError> {
                sink.lock().expect("lock").push(args.to_vec());
                Ok(())
            },
            Usage::new("<text...>", "records its arguments"),
        )
        .expect("echo registers");

    // When
    let dispatched = fixture.dispatch("  echo   one two\tthree ");

    // Then
    assert!(dispatched);
    assert_eq!(
        *received.lock().expect("lock"),
        vec![vec!["one".to_string(), "two".to_string(), "three".to_string()]]
    );
}

#[test]
fn given_default_shortcuts_when_their_verbs_are_resolved_then_every_verb_is_registered() {
    // Given
    let registry = CommandRegistry::with_builtins().expect("builtins register");

    // When / Then
    for (chord, binding) in DEFAULT_SHORTCUTS.iter() {
        let parsed = ParsedCommand::parse(&binding.command).expect("default binding has a command");
        assert!(registry.resolve(&parsed.verb).is_ok(), "{} is bound to unknown verb {}", chord, parsed.verb);
    }
}

#[test]
fn given_missing_parameters_when_dispatched_then_requires_parameters_is_reported() {
    let mut fixture = Fixture::new();

    assert_eq!(fixture.execute("mpv"), Err(CommandError::RequiresParameters("mpv".to_string())));
    assert_eq!(fixture.execute("sh"), Err(CommandError::RequiresParameters("sh".to_string())));
    assert_eq!(fixture.execute("playlist"), Err(CommandError::RequiresParameters("playlist".to_string())));
    assert_eq!(
        fixture.execute("playlist repeat"),
        Err(CommandError::RequiresParameters("playlist repeat".to_string()))
    );
    assert_eq!(
        fixture.execute("open_recent"),
        Err(CommandError::RequiresParameters("open_recent".to_string()))
    );
}

#[test]
fn given_mpv_command_when_dispatched_then_arguments_pass_through_unchanged() {
    // Given
    let mut fixture = Fixture::new();

    // When
    fixture.execute("mpv add chapter +1").expect("mpv runs");

    // Then
    assert_eq!(
        fixture.player.calls(),
        vec![Call::Command(vec!["add".to_string(), "chapter".to_string(), "+1".to_string()])]
    );
}

#[test]
fn given_playing_file_when_volume_adjusted_then_relative_and_absolute_levels_are_applied() {
    // Given
    let mut fixture = Fixture::with_player(MockPlayer::playing(10.0, 100.0, 60.0));

    // When
    fixture.execute("volume +5").expect("relative volume");
    fixture.execute("volume -15").expect("relative volume");
    fixture.execute("volume 30").expect("absolute volume");

    // Then
    assert_eq!(
        fixture.player.calls(),
        vec![Call::SetVolume(65.0), Call::SetVolume(45.0), Call::SetVolume(30.0)]
    );
    assert_eq!(
        fixture.execute("volume loud"),
        Err(CommandError::invalid_parameter("volume", "loud"))
    );
}

#[test]
fn given_no_argument_when_volume_dispatched_then_current_level_is_printed() {
    // Given
    let mut fixture = Fixture::with_player(MockPlayer::playing(0.0, 100.0, 42.0));

    // When
    fixture.execute("volume").expect("volume prints");

    // Then
    assert_eq!(fixture.output_lines(), vec!["[kuro]: volume: 42".to_string()]);
    assert!(fixture.player.calls().is_empty());
}

#[test]
fn given_speed_adjustment_when_it_would_stop_playback_then_it_is_rejected() {
    // Given
    let mut fixture = Fixture::with_player(MockPlayer::playing(0.0, 100.0, 100.0));

    // When
    fixture.execute("speed +0.25").expect("speed up");
    let result = fixture.execute("speed -1");

    // Then
    assert_eq!(fixture.player.calls(), vec![Call::SetSpeed(1.25)]);
    assert_eq!(result, Err(CommandError::invalid_parameter("speed", "-1")));
}

#[test]
fn given_duration_when_jumping_then_targets_inside_the_file_seek() {
    // Given
    let mut fixture = Fixture::with_player(MockPlayer::playing(30.0, 7200.0, 100.0));

    // When
    fixture.execute("jump 1:02:03").expect("absolute jump");
    fixture.execute("jump +30").expect("relative jump");
    fixture.execute("jump -0:30").expect("relative jump back");

    // Then
    assert_eq!(
        fixture.player.calls(),
        vec![Call::Seek(3723.0), Call::Seek(60.0), Call::Seek(0.0)]
    );
    assert_eq!(fixture.execute("jump 2:00:01"), Err(CommandError::invalid_parameter("jump", "2:00:01")));
    assert_eq!(fixture.execute("jump -1:00"), Err(CommandError::invalid_parameter("jump", "-1:00")));
    assert_eq!(fixture.execute("jump 1:75"), Err(CommandError::invalid_parameter("jump", "1:75")));
}

#[test]
fn given_jump_without_time_when_dispatched_then_command_line_is_prompted() {
    // Given
    let mut fixture = Fixture::new();

    // When
    fixture.execute("jump").expect("jump prompts");

    // Then
    assert_eq!(fixture.view.prompt.as_deref(), Some("jump "));
    assert!(fixture.player.calls().is_empty());
}

#[test]
fn given_fitwindow_when_dispatched_then_percent_defaults_and_is_range_checked() {
    let mut fixture = Fixture::new();

    fixture.execute("fitwindow").expect("default fit");
    fixture.execute("fitwindow 50").expect("half size");

    assert_eq!(fixture.player.calls(), vec![Call::FitWindow(100), Call::FitWindow(50)]);
    assert_eq!(fixture.execute("fitwindow 0"), Err(CommandError::invalid_parameter("fitwindow", "0")));
    assert_eq!(fixture.execute("fitwindow +50"), Err(CommandError::invalid_parameter("fitwindow", "+50")));
    assert_eq!(fixture.execute("fitwindow -50"), Err(CommandError::invalid_parameter("fitwindow", "-50")));
    assert_eq!(fixture.player.calls().len(), 2);
}

#[test]
fn given_oversized_playlist_step_when_dispatched_then_invalid_parameter_is_reported() {
    // Given
    let mut fixture = Fixture::new();
    fixture.execute("open http://example.com/stream.m3u8").expect("open url");
    let huge = "+9223372036854775807";

    // When
    let select = fixture.execute(&format!("playlist select {}", huge));
    let play = fixture.execute(&format!("playlist play {}", huge));

    // Then
    assert_eq!(select, Err(CommandError::invalid_parameter("playlist", huge)));
    assert_eq!(play, Err(CommandError::invalid_parameter("playlist", huge)));
    assert_eq!(fixture.playlist.selected_index(), Some(0));
    assert_eq!(fixture.player.calls().len(), 1);
}

#[test]
fn given_playlist_filters_when_dispatched_then_they_apply_and_report() {
    // Given
    let mut fixture = Fixture::new();
    fixture.execute("open http://example.com/stream.m3u8").expect("open url");

    // When
    fixture.execute("playlist search my   stream").expect("search");
    fixture.execute("playlist all").expect("same type only");
    fixture.execute("playlist refresh").expect("refresh");

    // Then
    assert_eq!(fixture.playlist.search_text(), "my stream");
    assert!(!fixture.playlist.show_all());
    assert_eq!(
        fixture.output_lines(),
        vec![
            "[kuro]: showing files of the same type".to_string(),
            "[kuro]: nothing to refresh".to_string(),
        ]
    );
    assert_eq!(fixture.playlist.current(), Some("http://example.com/stream.m3u8"));
}

#[test]
fn given_screenshot_option_when_dispatched_then_subtitles_flag_is_passed() {
    let mut fixture = Fixture::new();

    fixture.execute("screenshot").expect("plain screenshot");
    fixture.execute("screenshot subtitles").expect("screenshot with subtitles");

    assert_eq!(fixture.player.calls(), vec![Call::Screenshot(false), Call::Screenshot(true)]);
    assert_eq!(
        fixture.execute("screenshot osd"),
        Err(CommandError::invalid_parameter("screenshot", "osd"))
    );
}

#[test]
fn given_playing_state_when_play_pause_dispatched_then_pause_is_toggled() {
    // Given
    let mut fixture = Fixture::with_player(MockPlayer::playing(0.0, 100.0, 100.0));

    // When
    fixture.execute("play_pause").expect("toggle");

    // Then
    assert_eq!(fixture.player.calls(), vec![Call::TogglePause]);
}

#[test]
fn given_stopped_with_nothing_to_play_when_play_pause_dispatched_then_open_is_prompted() {
    // Given
    let mut fixture = Fixture::new();

    // When
    fixture.execute("play_pause").expect("prompts");

    // Then
    assert_eq!(fixture.view.prompt.as_deref(), Some("open "));
}

#[test]
fn given_location_when_opened_then_it_loads_and_becomes_most_recent() {
    // Given
    let mut fixture = Fixture::new();
    fixture.recent.push("/media/older.mkv");

    // When
    fixture.execute("open http://example.com/stream.m3u8").expect("open url");

    // Then
    assert_eq!(
        fixture.player.calls(),
        vec![Call::LoadFile("http://example.com/stream.m3u8".to_string())]
    );
    assert_eq!(fixture.recent.get(0), Some("http://example.com/stream.m3u8"));
    assert_eq!(fixture.recent.get(1), Some("/media/older.mkv"));
    assert_eq!(fixture.playlist.current(), Some("http://example.com/stream.m3u8"));
}

#[test]
fn given_recent_index_out_of_range_when_opened_then_invalid_parameter_is_reported() {
    let mut fixture = Fixture::new();

    assert_eq!(
        fixture.execute("open_recent 3"),
        Err(CommandError::invalid_parameter("open_recent", "3"))
    );
    assert!(fixture.player.calls().is_empty());
}

#[test]
fn given_playing_state_when_boss_dispatched_then_playback_pauses_and_interface_hides() {
    // Given
    let mut fixture = Fixture::with_player(MockPlayer::playing(0.0, 100.0, 100.0));

    // When
    fixture.execute("boss").expect("boss key");

    // Then
    assert_eq!(fixture.player.calls(), vec![Call::Pause]);
    assert!(fixture.view.hidden);
}

#[test]
fn given_paused_state_when_boss_dispatched_then_no_pause_is_sent() {
    // Given
    let mut fixture = Fixture::with_player(MockPlayer::playing(0.0, 100.0, 100.0));
    fixture.player.set_state(PlayerState::Paused);

    // When
    fixture.execute("boss").expect("boss key");

    // Then
    assert!(fixture.player.calls().is_empty());
    assert!(fixture.view.hidden);
}

#[test]
fn given_toggle_verbs_when_dispatched_twice_then_view_state_returns_to_start() {
    let mut fixture = Fixture::new();

    fixture.execute("media_info").expect("toggle");
    assert!(fixture.view.show_media_info);
    fixture.execute("media_info").expect("toggle");
    assert!(!fixture.view.show_media_info);

    fixture.execute("playlist toggle").expect("toggle");
    assert!(!fixture.view.show_playlist);
    fixture.execute("playlist toggle").expect("toggle");
    assert!(fixture.view.show_playlist);

    fixture.execute("output").expect("toggle");
    assert!(fixture.view.show_output);
    assert_eq!(fixture.view.prompt.as_deref(), Some(""));
}

#[test]
fn given_failing_engine_when_command_dispatched_then_playback_error_is_reported() {
    // Given
    let mut fixture = Fixture::new();
    fixture.player.fail_calls();

    // When
    let dispatched = fixture.dispatch("stop");

    // Then
    assert!(!dispatched);
    assert_eq!(
        fixture.output_lines(),
        vec!["[kuro]: playback error: engine unavailable".to_string()]
    );
}

#[test]
fn given_shortcut_bind_when_dispatched_then_binding_takes_registry_description() {
    // Given
    let mut fixture = Fixture::new();

    // When
    fixture.execute("shortcut bind shift+ctrl+k volume +10").expect("bind");

    // Then
    let binding = fixture.shortcuts.lookup("Ctrl+Shift+K").expect("bound");
    assert_eq!(binding.command, "volume +10");
    assert_eq!(binding.description, "adjusts the volume");
}

#[test]
fn given_shortcut_bind_to_unknown_verb_when_dispatched_then_it_is_rejected() {
    let mut fixture = Fixture::new();

    assert_eq!(
        fixture.execute("shortcut bind Ctrl+K frobnicate"),
        Err(CommandError::UnknownCommand("frobnicate".to_string()))
    );
    assert!(fixture.shortcuts.lookup("Ctrl+K").is_none());
}

#[test]
fn given_bound_default_when_unbound_and_reset_then_default_returns() {
    // Given
    let mut fixture = Fixture::new();

    // When
    fixture.execute("shortcut unbind space").expect("unbind");

    // Then
    assert!(fixture.shortcuts.lookup("Space").is_none());
    assert_eq!(
        fixture.execute("shortcut unbind Space"),
        Err(CommandError::invalid_parameter("shortcut", "Space"))
    );

    fixture.execute("shortcut reset").expect("reset");
    assert_eq!(fixture.shortcuts.lookup("Space").map(|b| b.command.as_str()), Some("play_pause"));
}

#[test]
fn given_help_for_command_when_dispatched_then_usage_and_advanced_help_are_printed() {
    // Given
    let mut fixture = Fixture::new();

    // When
    fixture.execute("help volume").expect("help");

    // Then
    assert_eq!(
        fixture.output_lines(),
        vec![
            "[kuro]: volume [level] - adjusts the volume".to_string(),
            "[kuro]: 0 to 100, a leading + or - adjusts the current volume".to_string(),
        ]
    );
    assert_eq!(
        fixture.execute("help frobnicate"),
        Err(CommandError::invalid_parameter("help", "frobnicate"))
    );
}

#[test]
fn given_help_without_command_when_dispatched_then_every_command_is_listed() {
    let mut fixture = Fixture::new();

    fixture.execute("help").expect("help");

    assert_eq!(fixture.output_lines().len(), fixture.registry.describe_all().len());
}

#[test]
fn given_shell_command_when_dispatched_then_output_arrives_as_events() {
    // Given
    let mut fixture = Fixture::new();

    // When
    fixture.execute("sh echo hello").expect("sh runs");

    // Then
    match fixture.event_rx.recv() {
        Ok(AppEvent::Output { source, text }) => {
            assert_eq!(source, "sh");
            assert_eq!(text, "hello");
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn given_quit_when_dispatched_then_view_requests_exit() {
    let mut fixture = Fixture::new();

    fixture.execute("quit").expect("quit");

    assert!(fixture.view.quit);
}

#[test]
fn given_stopped_with_current_file_when_play_pause_dispatched_then_it_is_loaded() {
    // Given
    let mut fixture = Fixture::new();
    fixture.player.set_status(PlaybackStatus::default());
    fixture.execute("open /no/such/file.mkv").expect("open");

    // When
    fixture.execute("play_pause").expect("play");

    // Then
    assert_eq!(
        fixture.player.last_call(),
        Some(Call::LoadFile("/no/such/file.mkv".to_string()))
    );
}

#[test]
fn given_removed_default_when_shortcuts_listed_then_it_is_shown_as_removed() {
    // Given
    let mut fixture = Fixture::new();
    fixture.execute("shortcut unbind ctrl+q").expect("unbind");

    // When
    fixture.execute("shortcut list").expect("list");

    // Then
    let lines = fixture.output_lines();
    assert_eq!(lines.last().map(String::as_str), Some("[kuro]: Ctrl+Q: removed"));
    assert!(lines.iter().any(|line| line == "[kuro]: Space: play_pause (Play/Pause)"));
    assert!(!lines.iter().any(|line| line.starts_with("[kuro]: Ctrl+Q: quit")));
}
