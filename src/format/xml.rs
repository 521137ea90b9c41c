//! XML pretty-printer.

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

use super::FormatError;

/// Re-indents an XML document with `indent` spaces per level.
///
/// Whitespace-only text between tags is dropped and replaced by the
/// writer's indentation. Any other text is copied through untouched,
/// including its leading and trailing whitespace, as are attributes and
/// entities.
pub fn pretty(body: &str, indent: usize) -> Result<String, FormatError> {
    let mut reader = Reader::from_str(body);

    let mut writer = Writer::new_with_indent(Vec::with_capacity(body.len() * 2), b' ', indent);

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Text(text)) if text.iter().all(u8::is_ascii_whitespace) => {}
            Ok(event) => writer
                .write_event(event)
                .map_err(|e| FormatError::Xml(e.to_string()))?,
            Err(e) => {
                return Err(FormatError::Xml(format!(
                    "at position {}: {e}",
                    reader.error_position()
                )));
            }
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|e| FormatError::Xml(e.to_string()))
}
