use std::borrow::Cow;

use common_utils::CustomResult;
use domain_types::errors;
use error_stack::report;
use quick_xml::events::Event;

/// Decodes a gateway body to text.
///
/// The non `_utf8` pages answer in ISO-8859-1, so anything that is not valid UTF-8 is read
/// as Windows-1252 (its superset).
pub fn decode_response_text(body: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(body) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            tracing::info!("Response is not valid UTF-8, decoding as Windows-1252");
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(body);
            text
        }
    }
}

/// Reads the attributes of the document's root element, e.g. `<ncresponse STATUS="9" .../>`.
///
/// Child elements, the XML declaration and comments are ignored.
pub fn parse_root_attributes(
    xml_data: &str,
) -> CustomResult<Vec<(String, String)>, errors::ConnectorError> {
    let mut reader = quick_xml::Reader::from_str(xml_data.trim());
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                let mut attributes = Vec::new();
                for attribute in element.attributes() {
                    let attribute = attribute.map_err(|err| {
                        tracing::error!(error=?err, "Malformed attribute in XML response");
                        report!(errors::ConnectorError::ResponseDeserializationFailed)
                    })?;
                    let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
                    let value = attribute
                        .unescape_value()
                        .map_err(|err| {
                            tracing::error!(error=?err, %key, "Failed to unescape XML attribute");
                            report!(errors::ConnectorError::ResponseDeserializationFailed)
                        })?
                        .into_owned();
                    attributes.push((key, value));
                }
                tracing::debug!(count = attributes.len(), "Parsed XML response attributes");
                return Ok(attributes);
            }
            Ok(Event::Eof) => {
                tracing::error!("XML response has no root element");
                return Err(report!(
                    errors::ConnectorError::ResponseDeserializationFailed
                ));
            }
            Ok(_) => {}
            Err(err) => {
                tracing::error!(error=?err, "Failed to parse XML response");
                return Err(report!(
                    errors::ConnectorError::ResponseDeserializationFailed
                ));
            }
        }
    }
}
