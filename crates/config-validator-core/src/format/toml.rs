use super::{line_of, Format};
use crate::error::ParseError;
use crate::value::Value;

pub(super) fn parse(source: &str) -> Result<Value, ParseError> {
    let table: ::toml::Table = ::toml::from_str(source).map_err(|e| {
        let err = ParseError::new(Format::Toml, e.message().trim().to_string());
        match e.span() {
            Some(span) => err.at_line(line_of(source, span.start)),
            None => err,
        }
    })?;
    Ok(Value::from(::toml::Value::Table(table)))
}
