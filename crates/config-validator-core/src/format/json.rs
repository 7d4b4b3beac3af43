use super::Format;
use crate::error::ParseError;
use crate::value::Value;

pub(super) fn parse(bytes: &[u8]) -> Result<Value, ParseError> {
    let json: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| {
        let err = ParseError::new(Format::Json, e.to_string());
        if e.line() > 0 {
            err.at_line(e.line())
        } else {
            err
        }
    })?;
    Value::try_from(json).map_err(|message| ParseError::new(Format::Json, message))
}
