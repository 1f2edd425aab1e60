//! Line-based stand-in for the form: each input line is one user event.

use std::io::{self, BufRead, Write};

use packager_core::{Field, Msg};

use crate::render::render;
use crate::Session;

pub const HELP: &str = "\
Commands:
  url <value>        set the web app URL
  name <value>       set the app name
  blur url|name      leave a field without editing it
  submit             create the package
  wait               block until the current request settles
  show               print the form
  help               show this help
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(Field, String),
    Blur(Field),
    Submit,
    Wait,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim_start();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    match word.trim_end() {
        "url" => Ok(Command::Set(Field::Url, rest.to_string())),
        "name" => Ok(Command::Set(Field::AppName, rest.to_string())),
        "blur" => Field::from_name(rest)
            .map(Command::Blur)
            .ok_or_else(|| format!("unknown field {:?}", rest.trim())),
        "submit" => Ok(Command::Submit),
        "wait" => Ok(Command::Wait),
        "show" | "" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command {other:?}; type help")),
    }
}

/// Runs until `quit` or end of input. The form is reprinted whenever a
/// command or a settled request changed it, and on `show`.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, mut out: W) -> io::Result<()> {
    writeln!(out, "{HELP}")?;
    session.consume_dirty();
    write_view(session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        session.pump();

        let mut forced = false;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(out, "{HELP}")?,
            Ok(Command::Show) => forced = true,
            Ok(Command::Wait) => session.wait_for_settlement(),
            Ok(Command::Set(field, value)) => session.dispatch(Msg::FieldChanged { field, value }),
            Ok(Command::Blur(field)) => session.dispatch(Msg::FieldBlurred(field)),
            Ok(Command::Submit) => session.dispatch(Msg::SubmitClicked),
            Err(message) => writeln!(out, "{message}")?,
        }
        if session.consume_dirty() || forced {
            write_view(session, &mut out)?;
        }
    }

    Ok(())
}

fn write_view<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    for line in render(&session.view()) {
        writeln!(out, "{line}")?;
    }
    writeln!(out)
}
