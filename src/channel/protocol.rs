//! Text wire format of robot commands.
//!
//! Every command is one text message, prefixed with its sequence id:
//!
//! ```text
//! 7 s            stop
//! 8 m 0.4 0.2    move: left and right wheel speeds
//! ```

use crate::error::ChannelError;

/// A motor command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Halt both wheels
    Stop,
    /// Drive the wheels at normalized speeds
    Move { left: f64, right: f64 },
}

impl Command {
    /// Render the command as the wire message with sequence id `id`.
    pub fn encode(&self, id: u64) -> String {
        // Debug formatting keeps a fractional part on whole numbers ("1.0").
        match self {
            Command::Stop => format!("{id} s"),
            Command::Move { left, right } => format!("{id} m {left:?} {right:?}"),
        }
    }

    /// Parse a wire message back into its sequence id and command.
    pub fn parse(text: &str) -> Result<(u64, Command), ChannelError> {
        let malformed = || ChannelError::Malformed(text.to_string());
        let mut parts = text.split_whitespace();

        let id = parts
            .next()
            .and_then(|p| p.parse::<u64>().ok())
            .ok_or_else(malformed)?;

        let command = match parts.next() {
            Some("s") => Command::Stop,
            Some("m") => {
                let mut speed = || {
                    parts
                        .next()
                        .and_then(|p| p.parse::<f64>().ok())
                        .ok_or_else(malformed)
                };
                let left = speed()?;
                let right = speed()?;
                Command::Move { left, right }
            }
            _ => return Err(malformed()),
        };

        if parts.next().is_some() {
            return Err(malformed());
        }
        Ok((id, command))
    }
}
