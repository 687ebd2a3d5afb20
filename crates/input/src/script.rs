//! Textual input scripts for headless replay.
//!
//! A script is a whitespace-separated list of tokens:
//!
//! ```text
//! cursor:X,Y     absolute cursor position
//! look:DX,DY     look delta, positive DY looks up
//! scroll:DY      scroll lines
//! press:DIR      hold a movement key
//! release:DIR    release a movement key
//! tick:SECONDS   advance held-key movement
//! ```
//!
//! `DIR` is one of `forward`, `backward`, `left`, `right`, `up`, `down`.

use std::str::FromStr;

use cubeview_camera::Direction;
use glam::Vec2;

use crate::action::Action;

/// Errors from parsing an input script.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("unknown action in `{0}`")]
    UnknownAction(String),
    #[error("malformed arguments in `{0}`")]
    MalformedArguments(String),
    #[error("unknown direction in `{0}`")]
    UnknownDirection(String),
    #[error("negative tick in `{0}`")]
    NegativeTick(String),
}

impl FromStr for Action {
    type Err = InputError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (name, args) = token
            .split_once(':')
            .ok_or_else(|| InputError::MalformedArguments(token.to_string()))?;

        match name {
            "cursor" => Ok(Action::CursorMoved(parse_pair(token, args)?)),
            "look" => Ok(Action::Look(parse_pair(token, args)?)),
            "scroll" => Ok(Action::Scroll(parse_scalar(token, args)?)),
            "press" => Ok(Action::Press(parse_direction(token, args)?)),
            "release" => Ok(Action::Release(parse_direction(token, args)?)),
            "tick" => {
                let dt = parse_scalar(token, args)?;
                if dt < 0.0 {
                    return Err(InputError::NegativeTick(token.to_string()));
                }
                Ok(Action::Tick(dt))
            }
            _ => Err(InputError::UnknownAction(token.to_string())),
        }
    }
}

/// Parse a whole script into actions, stopping at the first bad token.
pub fn parse_script(script: &str) -> Result<Vec<Action>, InputError> {
    script.split_whitespace().map(str::parse).collect()
}

fn parse_scalar(token: &str, args: &str) -> Result<f32, InputError> {
    let value: f32 = args
        .trim()
        .parse()
        .map_err(|_| InputError::MalformedArguments(token.to_string()))?;
    if !value.is_finite() {
        return Err(InputError::MalformedArguments(token.to_string()));
    }
    Ok(value)
}

fn parse_pair(token: &str, args: &str) -> Result<Vec2, InputError> {
    let (x, y) = args
        .split_once(',')
        .ok_or_else(|| InputError::MalformedArguments(token.to_string()))?;
    Ok(Vec2::new(parse_scalar(token, x)?, parse_scalar(token, y)?))
}

fn parse_direction(token: &str, args: &str) -> Result<Direction, InputError> {
    Direction::from_name(args.trim())
        .ok_or_else(|| InputError::UnknownDirection(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_action_kind() {
        let actions = parse_script(
            "cursor:10,20 look:0,1000 scroll:-1.5 press:forward tick:0.25 release:forward",
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![
                Action::CursorMoved(Vec2::new(10.0, 20.0)),
                Action::Look(Vec2::new(0.0, 1000.0)),
                Action::Scroll(-1.5),
                Action::Press(Direction::Forward),
                Action::Tick(0.25),
                Action::Release(Direction::Forward),
            ]
        );
    }

    #[test]
    fn empty_script_is_empty() {
        assert!(parse_script("   \n ").unwrap().is_empty());
    }

    #[test]
    fn unknown_action_reports_token() {
        let err = parse_script("press:up jump:3").unwrap_err();
        assert_eq!(err, InputError::UnknownAction("jump:3".into()));
    }

    #[test]
    fn malformed_arguments() {
        assert!(matches!(
            "look:1".parse::<Action>(),
            Err(InputError::MalformedArguments(_))
        ));
        assert!(matches!(
            "scroll:abc".parse::<Action>(),
            Err(InputError::MalformedArguments(_))
        ));
        assert!(matches!(
            "tick".parse::<Action>(),
            Err(InputError::MalformedArguments(_))
        ));
        assert!(matches!(
            "scroll:NaN".parse::<Action>(),
            Err(InputError::MalformedArguments(_))
        ));
    }

    #[test]
    fn unknown_direction() {
        let err = "press:sideways".parse::<Action>().unwrap_err();
        assert_eq!(err, InputError::UnknownDirection("press:sideways".into()));
    }

    #[test]
    fn negative_tick_rejected() {
        let err = "tick:-0.1".parse::<Action>().unwrap_err();
        assert_eq!(err, InputError::NegativeTick("tick:-0.1".into()));
    }

    #[test]
    fn error_messages_name_token() {
        let err = "warp:1".parse::<Action>().unwrap_err();
        assert_eq!(err.to_string(), "unknown action in `warp:1`");
    }
}
