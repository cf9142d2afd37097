//! `carconf session` — drive one session from line-oriented commands.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use carconf_core::{Configurator, PartRegistry};

use crate::manifest::PresentationConfig;
use crate::presenter::ConsoleHost;

const HELP: &str = "\
Commands:
  toggle <id>   select or deselect a part
  add <id>      select a part (no-op if already selected)
  remove <id>   deselect a part (no-op if not selected)
  reset         start over with nothing selected
  list          show the catalog with selection markers
  status        show completion state
  help          show this help
  quit          end the session";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Toggle(String),
    Add(String),
    Remove(String),
    Reset,
    List,
    Status,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse a line. Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default();
        let arg = words.next();
        if words.next().is_some() {
            return Err(format!("too many arguments: '{line}'"));
        }

        let with_id = |make: fn(String) -> SessionCommand| match arg {
            Some(id) => Ok(Some(make(id.to_string()))),
            None => Err(format!("'{verb}' needs a part id")),
        };
        let bare = |cmd: SessionCommand| match arg {
            None => Ok(Some(cmd)),
            Some(_) => Err(format!("'{verb}' takes no arguments")),
        };

        match verb {
            "toggle" | "t" => with_id(SessionCommand::Toggle),
            "add" => with_id(SessionCommand::Add),
            "remove" | "rm" => with_id(SessionCommand::Remove),
            "reset" => bare(SessionCommand::Reset),
            "list" | "ls" => bare(SessionCommand::List),
            "status" => bare(SessionCommand::Status),
            "help" | "?" => bare(SessionCommand::Help),
            "quit" | "exit" | "q" => bare(SessionCommand::Quit),
            other => Err(format!("unknown command '{other}' (try 'help')")),
        }
    }
}

fn say<W: Write>(cfg: &mut Configurator<ConsoleHost<W>>, text: &str) -> io::Result<()> {
    writeln!(cfg.hooks_mut().writer(), "{text}")
}

/// Read commands from `input` until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    registry: PartRegistry,
    presentation: &PresentationConfig,
    input: R,
    out: &mut W,
) -> Result<()> {
    let mut cfg = Configurator::new(registry, ConsoleHost::new(&mut *out, presentation.clone()));
    let header = format!(
        "{} ({} parts). Type 'help' for commands.",
        presentation.title,
        cfg.total_parts()
    );
    say(&mut cfg, &header)?;

    for line in input.lines() {
        let line = line?;
        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                say(&mut cfg, &format!("error: {msg}"))?;
                continue;
            }
        };

        let result = match command {
            SessionCommand::Toggle(id) => cfg.toggle_part(&id).map(|_| ()),
            SessionCommand::Add(id) => match cfg.add_part(&id) {
                Ok(None) => {
                    say(&mut cfg, &format!("{id} is already selected and in the cart"))?;
                    Ok(())
                }
                other => other.map(|_| ()),
            },
            SessionCommand::Remove(id) => match cfg.remove_part(&id) {
                Ok(None) => {
                    say(&mut cfg, &format!("{id} is not in the cart"))?;
                    Ok(())
                }
                other => other.map(|_| ()),
            },
            SessionCommand::Reset => {
                cfg.reset();
                cfg.hooks_mut().restart();
                Ok(())
            }
            SessionCommand::List => {
                let listing = list_text(&cfg);
                say(&mut cfg, &listing)?;
                Ok(())
            }
            SessionCommand::Status => {
                let report = cfg.report();
                let status = format!(
                    "State: {}  Parts: {}/{}  Episodes: {}  Synced: {}\nTitle: {}",
                    report.state,
                    report.selection.len(),
                    report.total,
                    report.episodes,
                    cfg.hooks().cart().items().len(),
                    cfg.hooks().title()
                );
                say(&mut cfg, &status)?;
                Ok(())
            }
            SessionCommand::Help => {
                say(&mut cfg, HELP)?;
                Ok(())
            }
            SessionCommand::Quit => break,
        };

        if let Err(e) = result {
            say(&mut cfg, &format!("error: {e}"))?;
        }
        cfg.hooks_mut().play_pending();
    }

    Ok(())
}

fn list_text<W: Write>(cfg: &Configurator<ConsoleHost<W>>) -> String {
    cfg.registry()
        .all_parts()
        .iter()
        .map(|part| {
            let marker = if cfg.is_selected(part.id.as_str()).unwrap_or(false) {
                "x"
            } else {
                " "
            };
            format!("[{marker}] {:<14} {}", part.id.as_str(), part.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(script: &str) -> String {
        let mut out = Vec::new();
        run(
            PartRegistry::car_default().unwrap(),
            &PresentationConfig::default().immediate(),
            script.as_bytes(),
            &mut out,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(
            SessionCommand::parse("toggle car-body"),
            Ok(Some(SessionCommand::Toggle("car-body".into())))
        );
        assert_eq!(
            SessionCommand::parse("  rm wheel-rear "),
            Ok(Some(SessionCommand::Remove("wheel-rear".into())))
        );
        assert_eq!(SessionCommand::parse("quit"), Ok(Some(SessionCommand::Quit)));
        assert_eq!(SessionCommand::parse(""), Ok(None));
        assert_eq!(SessionCommand::parse("# comment"), Ok(None));
    }

    #[test]
    fn parse_errors() {
        assert!(SessionCommand::parse("toggle").is_err());
        assert!(SessionCommand::parse("reset now").is_err());
        assert!(SessionCommand::parse("toggle a b").is_err());
        assert!(SessionCommand::parse("fly").unwrap_err().contains("unknown command"));
    }

    #[test]
    fn unknown_part_keeps_session_alive() {
        let out = drive("toggle spoiler\ntoggle car-body\nstatus\n");
        assert!(out.contains("error: unknown part 'spoiler'"));
        assert!(out.contains("State: CONFIGURING  Parts: 1/5  Episodes: 0"));
    }

    #[test]
    fn full_assembly_then_revert() {
        let out = drive(
            "toggle car-body\ntoggle car-roof\ntoggle car-window\n\
             toggle wheel-rear\ntoggle wheel-front\nstatus\nremove car-body\nstatus\n",
        );
        assert!(out.contains("State: COMPLETED  Parts: 5/5  Episodes: 1"));
        assert!(out.contains("Build incomplete"));
        assert!(out.contains("State: CONFIGURING  Parts: 4/5  Episodes: 1"));
    }

    #[test]
    fn noop_add_and_remove_are_reported() {
        let out = drive("add car-roof\nadd car-roof\nremove wheel-front\n");
        assert!(out.contains("car-roof is already selected and in the cart"));
        assert!(out.contains("wheel-front is not in the cart"));
        assert_eq!(out.matches("Selected parts (").count(), 1);
    }

    #[test]
    fn quit_stops_reading() {
        let out = drive("toggle car-body\nquit\ntoggle car-roof\n");
        assert!(!out.contains("[x] car-roof"));
    }

    #[test]
    fn list_and_reset() {
        let out = drive("toggle car-window\nlist\nreset\nstatus\n");
        assert!(out.contains("[x] car-window"));
        assert!(out.contains("[ ] car-body"));
        assert!(out.contains("Cart is empty"));
        assert!(out.contains("State: CONFIGURING  Parts: 0/5  Episodes: 0  Synced: 0"));
    }

    #[test]
    fn banner_follows_final_render() {
        let out = drive(
            "toggle car-body\ntoggle car-roof\ntoggle car-window\n\
             toggle wheel-rear\ntoggle wheel-front\n",
        );
        let render = out.find("Selected parts (5/5)").unwrap();
        let banner = out.find("*** Congratulations!").unwrap();
        assert!(render < banner);
    }

    #[test]
    fn reset_clears_episodes() {
        let out = drive(
            "toggle car-body\ntoggle car-roof\ntoggle car-window\n\
             toggle wheel-rear\ntoggle wheel-front\nreset\nstatus\n",
        );
        assert!(out.contains("State: CONFIGURING  Parts: 0/5  Episodes: 0  Synced: 0"));
        assert!(out.ends_with("Title: Car Configurator\n"));
    }
}
