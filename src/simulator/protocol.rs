//! Messages from the controller to the simulator window, one JSON object
//! per line.

use std::io::Write;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// New background color, `[red, blue, green]`.
    Update([u8; 3]),
    Quit,
}

impl Message {
    pub fn encode(&self) -> String {
        let payload = match *self {
            Message::Update([red, blue, green]) => json::object! {
                action: "update",
                color: json::array![red, blue, green],
            },
            Message::Quit => json::object! {
                action: "quit",
            },
        };

        json::stringify(payload)
    }

    pub fn decode(line: &str) -> Result<Message> {
        let json = json::parse(line)
            .map_err(|err| Error::Protocol(format!("{}: {:?}", err, line)))?;

        match json["action"].as_str() {
            Some("update") => decode_color(&json["color"]).map(Message::Update),
            Some("quit") => Ok(Message::Quit),
            _ => Err(Error::Protocol(format!("unknown message: {}", json))),
        }
    }

    pub fn write_to(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "{}", self.encode())?;
        out.flush()?;
        Ok(())
    }
}

fn decode_color(color: &json::JsonValue) -> Result<[u8; 3]> {
    if !color.is_array() || color.len() != 3 {
        return Err(Error::Protocol(format!("expected three channels: {}", color)));
    }

    let mut channels = [0u8; 3];
    for (slot, value) in channels.iter_mut().zip(color.members()) {
        *slot = value
            .as_u8()
            .ok_or_else(|| Error::Protocol(format!("channel out of range: {}", value)))?;
    }

    Ok(channels)
}
