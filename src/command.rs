//! Line protocol spoken over stdin and the control socket.
//!
//! One command per line: `next`, `prev`, `jump <i>`, `select <key>`,
//! `compact on|off|toggle`, `gap <n>`, `show`, `quit`.

use crate::events::AppEvent;
use crate::slide::SlideKey;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Verb {
    #[strum(to_string = "next", serialize = "n", serialize = "right")]
    Next,
    #[strum(to_string = "previous", serialize = "prev", serialize = "p", serialize = "left")]
    Previous,
    #[strum(to_string = "jump", serialize = "goto", serialize = "j")]
    Jump,
    #[strum(to_string = "select", serialize = "click")]
    Select,
    #[strum(to_string = "compact")]
    Compact,
    #[strum(to_string = "gap")]
    Gap,
    #[strum(to_string = "show", serialize = "frame")]
    Show,
    #[strum(to_string = "quit", serialize = "exit", serialize = "q")]
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    UnknownVerb(String),
    #[error("'{verb}' expects {expected}")]
    MissingArgument { verb: Verb, expected: &'static str },
    #[error("'{verb}' got invalid argument '{arg}'")]
    InvalidArgument { verb: Verb, arg: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command(pub AppEvent);

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(CommandError::Empty)?;
        let verb =
            Verb::from_str(head).map_err(|_| CommandError::UnknownVerb(head.to_string()))?;
        let arg = words.next();

        let event = match verb {
            Verb::Next => AppEvent::Next,
            Verb::Previous => AppEvent::Previous,
            Verb::Show => AppEvent::Show,
            Verb::Quit => AppEvent::Quit,
            Verb::Jump => AppEvent::JumpTo(parse_arg(verb, arg, "a slide index")?),
            Verb::Gap => AppEvent::SetGap(parse_arg(verb, arg, "a number")?),
            Verb::Select => {
                let key = arg.ok_or(CommandError::MissingArgument {
                    verb,
                    expected: "a slide key",
                })?;
                AppEvent::Select(SlideKey::new(key))
            }
            Verb::Compact => match arg.map(str::to_ascii_lowercase).as_deref() {
                None | Some("toggle") => AppEvent::ToggleCompact,
                Some("on" | "true" | "1") => AppEvent::SetCompact(true),
                Some("off" | "false" | "0") => AppEvent::SetCompact(false),
                Some(other) => {
                    return Err(CommandError::InvalidArgument {
                        verb,
                        arg: other.to_string(),
                    });
                }
            },
        };

        Ok(Command(event))
    }
}

fn parse_arg<T: FromStr>(
    verb: Verb,
    arg: Option<&str>,
    expected: &'static str,
) -> Result<T, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument { verb, expected })?;
    arg.parse().map_err(|_| CommandError::InvalidArgument {
        verb,
        arg: arg.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<AppEvent, CommandError> {
        line.parse::<Command>().map(|c| c.0)
    }

    #[test]
    fn test_command_parsing() {
        let cases = vec![
            ("next", AppEvent::Next),
            ("NEXT", AppEvent::Next),
            ("  prev  ", AppEvent::Previous),
            ("Previous", AppEvent::Previous),
            ("jump 3", AppEvent::JumpTo(3)),
            ("jump -1", AppEvent::JumpTo(-1)),
            ("select slide-2", AppEvent::Select(SlideKey::new("slide-2"))),
            ("compact", AppEvent::ToggleCompact),
            ("compact ON", AppEvent::SetCompact(true)),
            ("compact off", AppEvent::SetCompact(false)),
            ("gap 12.5", AppEvent::SetGap(12.5)),
            ("show", AppEvent::Show),
            ("q", AppEvent::Quit),
        ];

        for (line, expected) in cases {
            assert_eq!(parse(line), Ok(expected), "{line:?}");
        }
    }

    #[test]
    fn test_command_errors() {
        assert_eq!(parse("   "), Err(CommandError::Empty));
        assert_eq!(parse("spin"), Err(CommandError::UnknownVerb("spin".into())));
        assert_eq!(
            parse("jump"),
            Err(CommandError::MissingArgument {
                verb: Verb::Jump,
                expected: "a slide index"
            })
        );
        assert_eq!(
            parse("jump two"),
            Err(CommandError::InvalidArgument {
                verb: Verb::Jump,
                arg: "two".into()
            })
        );
        assert_eq!(
            parse("compact maybe"),
            Err(CommandError::InvalidArgument {
                verb: Verb::Compact,
                arg: "maybe".into()
            })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = parse("gap wide").unwrap_err();
        assert_eq!(err.to_string(), "'gap' got invalid argument 'wide'");
    }
}
