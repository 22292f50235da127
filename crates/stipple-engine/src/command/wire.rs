use serde::Deserialize;
use serde_json::Value;

use crate::coords::Vec2;
use crate::data::ColorSet;
use crate::error::{Error, Result};

use super::Command;

/// Tags accepted by [`decode`]. `init` is absent: it carries a live backend.
pub const WIRE_TAGS: [&str; 8] = [
    "setData",
    "setColors",
    "render",
    "handlePan",
    "handleZoom",
    "moveCamera",
    "endPan",
    "resize",
];

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum WireCommand {
    SetData { data: Coordinates },
    SetColors { data: ColorSet },
    Render,
    HandlePan { clip: [f64; 2] },
    /// `[clipX, clipY, deltaY]`
    HandleZoom { clip: [f64; 3] },
    MoveCamera { clip: [f64; 2] },
    EndPan,
    Resize { width: u32, height: u32 },
}

#[derive(Debug, Deserialize)]
struct Coordinates {
    x: Vec<f64>,
    y: Vec<f64>,
}

/// Decodes one JSON message such as `{"type":"handlePan","clip":[0.1,-0.4]}`.
///
/// Unknown or missing tags are [`Error::InvalidCommand`]; a known tag with a
/// bad payload is [`Error::MalformedCommand`].
pub fn decode<B>(text: &str) -> Result<Command<B>> {
    let value: Value = serde_json::from_str(text).map_err(|e| Error::MalformedCommand {
        tag: String::new(),
        reason: e.to_string(),
    })?;

    let tag = value
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| Error::InvalidCommand("<missing type>".to_owned()))?;

    if tag == "init" {
        return Err(Error::MalformedCommand {
            tag,
            reason: "init carries a render surface and cannot be sent as JSON".to_owned(),
        });
    }
    if !WIRE_TAGS.contains(&tag.as_str()) {
        return Err(Error::InvalidCommand(tag));
    }

    let wire: WireCommand = serde_json::from_value(value).map_err(|e| Error::MalformedCommand {
        tag: tag.clone(),
        reason: e.to_string(),
    })?;
    log::trace!("decoded {wire:?}");

    Ok(match wire {
        WireCommand::SetData { data } => Command::SetData { x: data.x, y: data.y },
        WireCommand::SetColors { data } => Command::SetColors(data),
        WireCommand::Render => Command::Render,
        WireCommand::HandlePan { clip } => Command::HandlePan(clip.into()),
        WireCommand::HandleZoom { clip: [x, y, delta_y] } => Command::HandleZoom {
            clip: Vec2::new(x, y),
            delta_y,
        },
        WireCommand::MoveCamera { clip } => Command::MoveCamera(clip.into()),
        WireCommand::EndPan => Command::EndPan,
        WireCommand::Resize { width, height } => Command::Resize { width, height },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_unit(text: &str) -> Result<Command<()>> {
        decode(text)
    }

    #[test]
    fn decodes_pan_and_zoom() {
        match decode_unit(r#"{"type":"handlePan","clip":[0.25,-0.5]}"#).unwrap() {
            Command::HandlePan(p) => assert_eq!(p, Vec2::new(0.25, -0.5)),
            other => panic!("unexpected {other:?}"),
        }
        match decode_unit(r#"{"type":"handleZoom","clip":[0.1,0.2,-120]}"#).unwrap() {
            Command::HandleZoom { clip, delta_y } => {
                assert_eq!(clip, Vec2::new(0.1, 0.2));
                assert_eq!(delta_y, -120.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn decodes_data_and_both_color_forms() {
        let cmd = decode_unit(r#"{"type":"setData","data":{"x":[0,10],"y":[0,10]}}"#).unwrap();
        assert!(matches!(cmd, Command::SetData { ref x, .. } if x == &[0.0, 10.0]));

        let cmd = decode_unit(r#"{"type":"setColors","data":[16744448,255]}"#).unwrap();
        assert!(matches!(
            cmd,
            Command::SetColors(ColorSet::Packed(ref v)) if v == &[0xFF8000, 0xFF]
        ));

        let cmd =
            decode_unit(r#"{"type":"setColors","data":{"r":[1],"g":[0],"b":[0.5]}}"#).unwrap();
        assert!(matches!(cmd, Command::SetColors(ColorSet::Channels { .. })));
    }

    #[test]
    fn decodes_unit_commands() {
        assert!(decode_unit(r#"{"type":"render"}"#).unwrap().is_render());
        // a release may still carry the pointer position
        assert!(matches!(
            decode_unit(r#"{"type":"endPan","clip":[0,0]}"#).unwrap(),
            Command::EndPan
        ));
        assert!(matches!(
            decode_unit(r#"{"type":"resize","width":640,"height":480}"#).unwrap(),
            Command::Resize { width: 640, height: 480 }
        ));
    }

    #[test]
    fn unknown_tag_is_invalid() {
        assert_eq!(
            decode_unit(r#"{"type":"rotate","angle":1}"#).unwrap_err(),
            Error::InvalidCommand("rotate".into())
        );
        assert!(matches!(
            decode_unit(r#"{"clip":[0,0]}"#).unwrap_err(),
            Error::InvalidCommand(_)
        ));
    }

    #[test]
    fn bad_payload_is_malformed() {
        let err = decode_unit(r#"{"type":"handleZoom","clip":[0.1,0.2]}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedCommand { ref tag, .. } if tag == "handleZoom"));

        let err = decode_unit("not json").unwrap_err();
        assert!(matches!(err, Error::MalformedCommand { .. }));
    }

    #[test]
    fn init_cannot_travel_as_json() {
        let err = decode_unit(r#"{"type":"init","canvas":{}}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedCommand { ref tag, .. } if tag == "init"));
    }
}
