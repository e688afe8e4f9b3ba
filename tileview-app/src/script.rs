//! Navigation scripts: a comma or whitespace separated list of commands.
//!
//! `left`, `right`, `up`, `down` press the arrow keys, `in` and `out`
//! zoom, `click:X:Y` clicks at surface pixel (X, Y) and
//! `resize:W:H` resizes the surface.

use anyhow::{bail, Context, Result};
use tileview::{input::events::KeyCode, InputEvent, Point};

fn number(value: Option<&str>, command: &str) -> Result<f64> {
    let value = value.with_context(|| format!("'{}' is missing a coordinate", command))?;
    value
        .parse()
        .with_context(|| format!("'{}' has a bad number '{}'", command, value))
}

fn pair(parts: &mut std::str::Split<'_, char>, command: &str) -> Result<(f64, f64)> {
    let a = number(parts.next(), command)?;
    let b = number(parts.next(), command)?;
    if parts.next().is_some() {
        bail!("'{}' has too many arguments", command);
    }
    Ok((a, b))
}

/// Parse one command
pub fn parse_command(command: &str) -> Result<InputEvent> {
    let mut parts = command.split(':');
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let key = |key: KeyCode| -> Result<InputEvent> { Ok(InputEvent::KeyPress { key }) };
    match name.as_str() {
        "left" => key(KeyCode::ArrowLeft),
        "right" => key(KeyCode::ArrowRight),
        "up" => key(KeyCode::ArrowUp),
        "down" => key(KeyCode::ArrowDown),
        "in" | "+" => key(KeyCode::Plus),
        "out" | "-" => key(KeyCode::Minus),
        "click" => {
            let (x, y) = pair(&mut parts, command)?;
            Ok(InputEvent::Click {
                position: Point::new(x, y),
            })
        }
        "resize" => {
            let (width, height) = pair(&mut parts, command)?;
            Ok(InputEvent::Resize { width, height })
        }
        _ => bail!("unknown command '{}'", command),
    }
}

/// Parse a whole script
pub fn parse_script(script: &str) -> Result<Vec<InputEvent>> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_command)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let events = parse_script("right, down\nclick:790:10 out").unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            InputEvent::KeyPress {
                key: KeyCode::ArrowRight
            }
        );
        assert_eq!(
            events[2],
            InputEvent::Click {
                position: Point::new(790.0, 10.0)
            }
        );
        assert_eq!(events[3], InputEvent::KeyPress { key: KeyCode::Minus });
    }

    #[test]
    fn test_empty_script() {
        assert!(parse_script("  ,, ").unwrap().is_empty());
    }

    #[test]
    fn test_bad_commands() {
        assert!(parse_command("jump").is_err());
        assert!(parse_command("click:10").is_err());
        assert!(parse_command("click:a:b").is_err());
        assert!(parse_command("resize:1:2:3").is_err());
    }
}
