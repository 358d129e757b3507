//! Response envelope parsing and device-error extraction
//!
//! Every reply from the device is a single `USG` element whose `RESULT`
//! attribute carries the outcome. `RESULT="ERROR"` becomes an
//! [`NseError::Device`] with the numeric code and a description (device
//! supplied, or resolved from the static error table). Anything that is
//! not a well-formed `USG` envelope is an [`NseError::ResponseParse`] —
//! malformed bodies are never silently coerced, and a device error is
//! never converted into a successful payload.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::constants::{
    error_description, ERROR_DESC_ATTR, ERROR_NUM_ATTR, RESULT_ATTR, RESULT_ERROR, ROOT_TAG,
};
use crate::error::{NseError, NseResult};

/// One child element of the response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseElement {
    /// Element tag name
    pub name: String,
    /// Text content, empty for empty elements
    pub text: String,
    /// XML attributes in document order
    pub attributes: Vec<(String, String)>,
}

/// The payload of a successful response: the envelope's root attributes
/// and child elements, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    /// Root element attributes (including `RESULT`)
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order
    pub elements: Vec<ResponseElement>,
}

impl Response {
    /// Parse a complete response body.
    ///
    /// Returns the payload on success, [`NseError::Device`] when the
    /// envelope signals failure, and [`NseError::ResponseParse`] when the
    /// body is not a well-formed `USG` envelope.
    pub fn parse(body: &str) -> NseResult<Response> {
        let response = read_envelope(body)?;
        if response.attribute(RESULT_ATTR) == Some(RESULT_ERROR) {
            let code = response
                .attribute(ERROR_NUM_ATTR)
                .and_then(|raw| raw.trim().parse::<u16>().ok())
                .ok_or_else(|| {
                    NseError::response_parse(format!(
                        "error envelope without a numeric {ERROR_NUM_ATTR}"
                    ))
                })?;
            let description = match response.attribute(ERROR_DESC_ATTR) {
                Some(desc) if !desc.is_empty() => desc.to_string(),
                _ => error_description(code).to_string(),
            };
            debug!(code, %description, "device reported error");
            return Err(NseError::Device { code, description });
        }
        Ok(response)
    }

    /// Read a root attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Find the first child element with the given tag name.
    pub fn element(&self, name: &str) -> Option<&ResponseElement> {
        self.elements.iter().find(|e| e.name == name)
    }
}

impl ResponseElement {
    /// Read an attribute of this element by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn collect_attributes(start: &BytesStart<'_>) -> NseResult<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr =
            attr.map_err(|e| NseError::response_parse(format!("bad attribute: {e}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| NseError::response_parse(format!("bad attribute value: {e}")))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}

/// Read the raw `USG` envelope without interpreting the result marker.
fn read_envelope(body: &str) -> NseResult<Response> {
    let mut reader = Reader::from_str(body);
    reader.trim_text(true);

    let mut response = Response::default();
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Decl(_)) | Ok(Event::Comment(_)) | Ok(Event::PI(_)) => {}
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if !saw_root => {
                if e.name().as_ref() != ROOT_TAG.as_bytes() {
                    return Err(NseError::response_parse(format!(
                        "unexpected root element {:?}, expected {ROOT_TAG}",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                saw_root = true;
                response.attributes = collect_attributes(&e)?;
            }
            Ok(Event::Start(e)) => {
                let element = read_element(&mut reader, &e)?;
                response.elements.push(element);
            }
            Ok(Event::Empty(e)) => {
                response.elements.push(ResponseElement {
                    name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    text: String::new(),
                    attributes: collect_attributes(&e)?,
                });
            }
            // stray text between children is tolerated
            Ok(Event::Text(_)) => {}
            Ok(Event::End(_)) => {
                // end of the envelope; trailing events are ignored
                break;
            }
            Ok(Event::Eof) => {
                if saw_root {
                    break;
                }
                return Err(NseError::response_parse("empty response body"));
            }
            Ok(Event::CData(_)) | Ok(Event::DocType(_)) => {}
            Err(e) => return Err(NseError::response_parse(e.to_string())),
        }
    }

    if !saw_root {
        return Err(NseError::response_parse(format!("no {ROOT_TAG} envelope")));
    }
    Ok(response)
}

/// Read one child element: its attributes and flattened text content.
fn read_element(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> NseResult<ResponseElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let attributes = collect_attributes(start)?;
    let mut text = String::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) if depth == 0 => {
                let chunk = t
                    .unescape()
                    .map_err(|e| NseError::response_parse(e.to_string()))?;
                text.push_str(&chunk);
            }
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::Empty(_)) => {}
            Ok(Event::End(_)) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Ok(Event::Eof) => {
                return Err(NseError::response_parse(format!(
                    "unterminated element {name}"
                )));
            }
            Ok(_) => {}
            Err(e) => return Err(NseError::response_parse(e.to_string())),
        }
    }

    Ok(ResponseElement {
        name,
        text,
        attributes,
    })
}
