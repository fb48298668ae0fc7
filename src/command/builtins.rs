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

//! The built-in commands.

use std::{
    process::{self, Stdio},
    thread,
};

use crate::{
    command::{
        CommandContext, CommandRegistry, Usage,
        args::{self, Adjustment, Step},
    },
    error::CommandError,
    events::AppEvent,
    output::DEFAULT_SOURCE,
    player::{PlayerState, MIN_SPEED},
    playlist::RepeatMode,
    shortcuts::{DEFAULT_SHORTCUTS, parse_chord},
};

type Handler = fn(&mut CommandContext<'_>, &[String]) -> Result<(), CommandError>;

const MAX_FIT_PERCENT: u32 = 1000;

struct Builtin {
    name: &'static str,
    handler: Handler,
    usage: Usage,
}

static BUILTINS: &[Builtin] = &[
    Builtin {
        name: "mpv",
        handler: mpv,
        usage: Usage::new("<command...>", "executes mpv command")
            .with_advanced("passes the arguments to mpv unchanged, e.g. 'mpv add chapter +1'"),
    },
    Builtin {
        name: "sh",
        handler: sh,
        usage: Usage::new("<command...>", "executes system shell command"),
    },
    Builtin {
        name: "open",
        handler: open,
        usage: Usage::new("[file]", "opens the file specified, or prompts for one"),
    },
    Builtin {
        name: "open_recent",
        handler: open_recent,
        usage: Usage::new("<index>", "opens a recently played file (0 is the last)"),
    },
    Builtin {
        name: "add_subtitles",
        handler: add_subtitles,
        usage: Usage::new("[file]", "adds a subtitle file"),
    },
    Builtin {
        name: "screenshot",
        handler: screenshot,
        usage: Usage::new("[subs]", "take a screenshot (with subtitles if specified)"),
    },
    Builtin {
        name: "media_info",
        handler: media_info,
        usage: Usage::new("", "toggles media info display"),
    },
    Builtin {
        name: "stop",
        handler: stop,
        usage: Usage::new("", "stops the current playback"),
    },
    Builtin {
        name: "playlist",
        handler: playlist,
        usage: Usage::new("[...]", "playlist options").with_advanced(
            "play [+n|-n|row], select <+n|-n|row>, remove, shuffle, \
             repeat <off|playlist|this>, search [text], all, refresh, toggle, full",
        ),
    },
    Builtin {
        name: "jump",
        handler: jump,
        usage: Usage::new("[time]", "jumps to a time, or prompts for one")
            .with_advanced("[[hh:]mm:]ss, a leading + or - jumps relative to the current time"),
    },
    Builtin {
        name: "output",
        handler: output,
        usage: Usage::new("", "toggles output panel"),
    },
    Builtin {
        name: "play_pause",
        handler: play_pause,
        usage: Usage::new("", "toggle play/pause state"),
    },
    Builtin {
        name: "fitwindow",
        handler: fit_window,
        usage: Usage::new("[percent]", "fit the window"),
    },
    Builtin {
        name: "volume",
        handler: volume,
        usage: Usage::new("[level]", "adjusts the volume")
            .with_advanced("0 to 100, a leading + or - adjusts the current volume"),
    },
    Builtin {
        name: "speed",
        handler: speed,
        usage: Usage::new("[ratio]", "adjusts the speed")
            .with_advanced("a leading + or - adjusts the current speed, 1.0 is normal speed"),
    },
    Builtin {
        name: "fullscreen",
        handler: fullscreen,
        usage: Usage::new("", "toggles fullscreen state"),
    },
    Builtin {
        name: "boss",
        handler: boss,
        usage: Usage::new("", "pause and hide the interface"),
    },
    Builtin {
        name: "shortcut",
        handler: shortcut,
        usage: Usage::new("[...]", "keyboard shortcut options")
            .with_advanced("list, bind <chord> <command...>, unbind <chord>, reset"),
    },
    Builtin {
        name: "help",
        handler: help,
        usage: Usage::new("[command]", "internal help menu"),
    },
    Builtin {
        name: "about",
        handler: about,
        usage: Usage::new("", "shows the version"),
    },
    Builtin {
        name: "quit",
        handler: quit,
        usage: Usage::new("", "quit kuroui"),
    },
];

pub(super) fn register(registry: &mut CommandRegistry) -> Result<(), CommandError> {
    for builtin in BUILTINS {
        registry.register(builtin.name, builtin.handler, builtin.usage)?;
    }
    Ok(())
}

fn mpv(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    if args.is_empty() {
        return Err(CommandError::requires_parameters("mpv"));
    }
    ctx.player.command(args)?;
    Ok(())
}

fn sh(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    if args.is_empty() {
        return Err(CommandError::requires_parameters("sh"));
    }

    let line = args.join(" ");
    let event_tx = ctx.event_tx.clone();

    thread::spawn(move || {
        let result = shell(&line)
            .stdin(Stdio::null())
            .output();

        match result {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                for text in stdout.lines().chain(stderr.lines()) {
                    let _ = event_tx.send(AppEvent::Output {
                        source: "sh".to_string(),
                        text: text.to_string(),
                    });
                }
            }
            Err(e) => {
                let _ = event_tx.send(AppEvent::Error(format!("Failed to run '{}': {}", line, e)));
            }
        }
    });

    Ok(())
}

#[cfg(windows)]
fn shell(line: &str) -> process::Command {
    let mut command = process::Command::new("cmd");
    command.args(["/C", line]);
    command
}

#[cfg(not(windows))]
fn shell(line: &str) -> process::Command {
    let mut command = process::Command::new("sh");
    command.args(["-c", line]);
    command
}

fn open(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    if args.is_empty() {
        ctx.view.prompt("open ");
        return Ok(());
    }
    open_location(ctx, &args.join(" "))
}

/// Fill the playlist from `location` and start playing it.
pub(crate) fn open_location(ctx: &mut CommandContext<'_>, location: &str) -> Result<(), CommandError> {
    ctx.playlist.populate(location);
    load(ctx, location)
}

pub(crate) fn load(ctx: &mut CommandContext<'_>, file: &str) -> Result<(), CommandError> {
    ctx.recent.push(file);
    ctx.player.load_file(file)?;
    Ok(())
}

fn open_recent(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    let index = args
        .first()
        .ok_or_else(|| CommandError::requires_parameters("open_recent"))?;

    let file = index
        .parse::<usize>()
        .ok()
        .and_then(|i| ctx.recent.get(i))
        .map(str::to_string)
        .ok_or_else(|| CommandError::invalid_parameter("open_recent", index))?;

    open_location(ctx, &file)
}

fn add_subtitles(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    if args.is_empty() {
        ctx.view.prompt("add_subtitles ");
        return Ok(());
    }
    ctx.player.add_subtitles(&args.join(" "))?;
    Ok(())
}

fn screenshot(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    let subtitles = match args.first().map(String::as_str) {
        None => false,
        Some("subs" | "subtitles") => true,
        Some(other) => return Err(CommandError::invalid_parameter("screenshot", other)),
    };
    ctx.player.screenshot(subtitles)?;
    Ok(())
}

fn media_info(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<(), CommandError> {
    ctx.view.show_media_info = !ctx.view.show_media_info;
    Ok(())
}

fn stop(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<(), CommandError> {
    ctx.player.stop()?;
    Ok(())
}

fn playlist(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    let Some((option, rest)) = args.split_first() else {
        return Err(CommandError::requires_parameters("playlist"));
    };

    let parse_step = |text: &String| {
        Step::parse(text).ok_or_else(|| CommandError::invalid_parameter("playlist", text))
    };

    match (option.as_str(), rest) {
        ("play", []) => {
            let file = ctx.playlist.play_selected().map(str::to_string);
            play_from_playlist(ctx, file)?;
        }
        ("play", [step]) => {
            let file = match parse_step(step)? {
                Step::Relative(n) => ctx.playlist.play_step(n),
                Step::Index(i) => ctx.playlist.play_index(i),
            }
            .map(str::to_string);
            play_from_playlist(ctx, file)?;
        }
        ("select", [step]) => {
            let selected = match parse_step(step)? {
                Step::Relative(n) => ctx.playlist.select_step(n),
                Step::Index(i) => ctx.playlist.select_index(i),
            };
            if selected.is_none() {
                return Err(CommandError::invalid_parameter("playlist", step));
            }
        }
        ("select", []) | ("repeat", []) => {
            return Err(CommandError::requires_parameters(&format!("playlist {}", option)));
        }
        ("remove", []) => {
            if let Some(file) = ctx.playlist.remove_selected() {
                ctx.output.print(DEFAULT_SOURCE, format!("removed {}", file));
            }
        }
        ("shuffle", []) => ctx.playlist.shuffle(),
        ("repeat", [mode]) => {
            ctx.playlist.repeat = match mode.as_str() {
                "off" => RepeatMode::Off,
                "playlist" => RepeatMode::Playlist,
                "this" => RepeatMode::This,
                _ => return Err(CommandError::invalid_parameter("playlist", mode)),
            };
        }
        ("search", words) => ctx.playlist.search(&words.join(" ")),
        ("all", []) => {
            let message = if ctx.playlist.toggle_show_all() {
                "showing all files"
            } else {
                "showing files of the same type"
            };
            ctx.output.print(DEFAULT_SOURCE, message);
        }
        ("refresh", []) => {
            if !ctx.playlist.refresh() {
                ctx.output.print(DEFAULT_SOURCE, "nothing to refresh");
            }
        }
        ("toggle", []) => ctx.view.show_playlist = !ctx.view.show_playlist,
        ("full", []) => ctx.view.playlist_full = !ctx.view.playlist_full,
        _ => return Err(CommandError::invalid_parameter("playlist", &args.join(" "))),
    }

    Ok(())
}

fn play_from_playlist(ctx: &mut CommandContext<'_>, file: Option<String>) -> Result<(), CommandError> {
    match file {
        Some(file) => load(ctx, &file),
        None => Ok(()),
    }
}

fn jump(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    let Some(time) = args.first() else {
        ctx.view.prompt("jump ");
        return Ok(());
    };

    let status = ctx.player.status();
    let target = args::parse_time(time)
        .map(|adjustment| adjustment.apply(status.time))
        .filter(|target| *target >= 0.0 && (status.duration <= 0.0 || *target <= status.duration))
        .ok_or_else(|| CommandError::invalid_parameter("jump", time))?;

    ctx.player.seek(target)?;
    Ok(())
}

fn output(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<(), CommandError> {
    ctx.view.show_output = !ctx.view.show_output;
    if ctx.view.show_output {
        ctx.view.prompt("");
    }
    Ok(())
}

fn play_pause(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<(), CommandError> {
    if ctx.player.status().state != PlayerState::Stopped {
        ctx.player.toggle_pause()?;
        return Ok(());
    }

    let file = ctx
        .playlist
        .current()
        .or(ctx.playlist.selected())
        .map(str::to_string);

    match file {
        Some(file) => {
            ctx.playlist.mark_current(&file);
            load(ctx, &file)
        }
        None => {
            ctx.view.prompt("open ");
            Ok(())
        }
    }
}

fn fit_window(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    let percent = match args.first() {
        None => 100,
        Some(text) => Some(text)
            .filter(|text| !args::is_signed(text))
            .and_then(|text| text.parse::<u32>().ok())
            .filter(|percent| (1..=MAX_FIT_PERCENT).contains(percent))
            .ok_or_else(|| CommandError::invalid_parameter("fitwindow", text))?,
    };
    ctx.player.fit_window(percent)?;
    Ok(())
}

fn volume(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    let status = ctx.player.status();

    let Some(level) = args.first() else {
        ctx.output
            .print(DEFAULT_SOURCE, format!("volume: {:.0}", status.volume));
        return Ok(());
    };

    let target = Adjustment::parse(level)
        .ok_or_else(|| CommandError::invalid_parameter("volume", level))?
        .apply(status.volume);

    ctx.player.set_volume(target)?;
    Ok(())
}

fn speed(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    let status = ctx.player.status();

    let Some(ratio) = args.first() else {
        ctx.output
            .print(DEFAULT_SOURCE, format!("speed: {:.2}x", status.speed));
        return Ok(());
    };

    let target = Adjustment::parse(ratio)
        .map(|adjustment| adjustment.apply(status.speed))
        .filter(|target| *target >= MIN_SPEED)
        .ok_or_else(|| CommandError::invalid_parameter("speed", ratio))?;

    ctx.player.set_speed(target)?;
    Ok(())
}

fn fullscreen(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<(), CommandError> {
    ctx.player.toggle_fullscreen()?;
    Ok(())
}

fn boss(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<(), CommandError> {
    if ctx.player.status().state == PlayerState::Playing {
        ctx.player.pause()?;
    }
    ctx.view.hidden = true;
    Ok(())
}

fn shortcut(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    let option = args.split_first().map(|(option, rest)| (option.as_str(), rest));

    match option {
        None | Some(("list", [])) => {
            for (chord, binding) in ctx.shortcuts.bindings() {
                ctx.output.print(
                    DEFAULT_SOURCE,
                    format!("{}: {} ({})", chord, binding.command, binding.description),
                );
            }

            let mut removed: Vec<&str> = DEFAULT_SHORTCUTS
                .keys()
                .map(String::as_str)
                .filter(|chord| ctx.shortcuts.is_removed(chord))
                .collect();
            removed.sort();
            for chord in removed {
                ctx.output.print(DEFAULT_SOURCE, format!("{}: removed", chord));
            }
        }
        Some(("bind", [chord, command @ ..])) if !command.is_empty() => {
            let chord = parse_chord(chord)
                .ok_or_else(|| CommandError::invalid_parameter("shortcut", chord))?;
            let line = command.join(" ");
            let usage = ctx.registry.describe(&command[0])?;
            ctx.shortcuts.bind(&chord, &line, usage.description);
        }
        Some(("bind", _)) => return Err(CommandError::requires_parameters("shortcut bind")),
        Some(("unbind", [chord])) => {
            let removed = parse_chord(chord)
                .is_some_and(|normalized| ctx.shortcuts.unbind(&normalized));
            if !removed {
                return Err(CommandError::invalid_parameter("shortcut", chord));
            }
        }
        Some(("unbind", [])) => return Err(CommandError::requires_parameters("shortcut unbind")),
        Some(("reset", [])) => ctx.shortcuts.reset_to_defaults(),
        Some(_) => return Err(CommandError::invalid_parameter("shortcut", &args.join(" "))),
    }

    Ok(())
}

fn help(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    let registry = ctx.registry;

    match args.first() {
        None => {
            for (name, usage) in registry.describe_all() {
                ctx.output.print(DEFAULT_SOURCE, format_usage(name, usage));
            }
        }
        Some(name) => {
            let usage = registry
                .describe(name)
                .map_err(|_| CommandError::invalid_parameter("help", name))?;
            ctx.output.print(DEFAULT_SOURCE, format_usage(name, usage));
            if let Some(advanced) = usage.advanced {
                ctx.output.print(DEFAULT_SOURCE, advanced);
            }
        }
    }

    Ok(())
}

fn format_usage(name: &str, usage: &Usage) -> String {
    if usage.params.is_empty() {
        format!("{} - {}", name, usage.description)
    } else {
        format!("{} {} - {}", name, usage.params, usage.description)
    }
}

fn about(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<(), CommandError> {
    ctx.output.print(
        DEFAULT_SOURCE,
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
    );
    Ok(())
}

fn quit(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<(), CommandError> {
    ctx.view.quit = true;
    Ok(())
}
