//! Support for Android `strings.xml` localization files.
//!
//! Children of `<resources>` map to keys by their `name` attribute: `<string>` to a
//! string, `<plurals>` to an object keyed by `quantity`, `<string-array>` to an array.
//! Saving streams the existing document back out and only touches the elements whose
//! text changed, so comments, attributes and unsupported elements survive.

use std::collections::HashMap;

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use serde_json::{Map, Value};

use crate::{error::Error, traits::FormatPlugin};

#[derive(Debug, Clone, Copy, Default)]
pub struct AndroidStringsPlugin;

impl FormatPlugin for AndroidStringsPlugin {
    fn name(&self) -> &'static str {
        "android"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".xml"]
    }

    fn parse(&self, raw: &str) -> Result<Value, Error> {
        let mut xml_reader = Reader::from_str(raw);

        let mut resources = Map::new();
        let mut saw_resources = false;
        let mut depth = 0usize;

        loop {
            match xml_reader.read_event()? {
                Event::Start(ref e) if depth == 0 => {
                    saw_resources |= e.name().as_ref() == b"resources";
                    depth += 1;
                }
                Event::Empty(ref e) if depth == 0 => {
                    saw_resources |= e.name().as_ref() == b"resources";
                }
                Event::Start(ref e) => match e.name().as_ref() {
                    b"string" => {
                        let name = string_name(e)?;
                        let value = read_text(&mut xml_reader)?;
                        resources.insert(name, Value::String(value));
                    }
                    b"plurals" => {
                        let name = string_name(e)?;
                        let items = read_plurals(&mut xml_reader)?;
                        resources.insert(name, Value::Object(items));
                    }
                    b"string-array" => {
                        let name = string_name(e)?;
                        let items = read_array(&mut xml_reader)?;
                        resources.insert(name, Value::Array(items));
                    }
                    _ => skip_element(&mut xml_reader)?,
                },
                Event::Empty(ref e) => {
                    let empty = match e.name().as_ref() {
                        b"string" => Value::String(String::new()),
                        b"plurals" => Value::Object(Map::new()),
                        b"string-array" => Value::Array(Vec::new()),
                        _ => continue,
                    };
                    resources.insert(string_name(e)?, empty);
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Eof => break,
                _ => {}
            }
        }

        if !saw_resources {
            return Err(Error::InvalidResource(
                "missing <resources> root element".to_string(),
            ));
        }
        Ok(Value::Object(resources))
    }

    fn serialize(&self, data: &Value) -> Result<String, Error> {
        let object = resource_map(data)?;

        let mut xml_writer = Writer::new(Vec::new());

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        xml_writer.write_event(Event::Start(BytesStart::new("resources")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        for (name, value) in object {
            write_resource(&mut xml_writer, name, &Resource::from_value(name, value)?)?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("resources")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        into_string(xml_writer)
    }

    /// Re-emits `original` event by event, replacing the text of changed strings and
    /// items and inserting new resources before `</resources>`.
    fn rewrite(&self, original: &str, data: &Value) -> Result<String, Error> {
        let current = self.parse(original)?;
        let current = resource_map(&current)?;

        let mut changed: HashMap<&str, (Resource, Resource)> = HashMap::new();
        let mut added = Vec::new();
        for (name, value) in resource_map(data)? {
            let resource = Resource::from_value(name, value)?;
            match current.get(name) {
                Some(old) => {
                    let old = Resource::from_value(name, old)?;
                    if old != resource {
                        changed.insert(name.as_str(), (old, resource));
                    }
                }
                None => added.push((name.as_str(), resource)),
            }
        }

        let mut xml_reader = Reader::from_str(original);
        let mut xml_writer = Writer::new(Vec::new());
        let mut depth = 0usize;

        loop {
            match xml_reader.read_event()? {
                Event::Start(e) => {
                    if depth == 1 {
                        if let Some((old, new)) = changed_resource(&changed, &e)? {
                            xml_writer.write_event(Event::Start(e))?;
                            match new {
                                Resource::Text(text) => {
                                    skip_element(&mut xml_reader)?;
                                    xml_writer.write_event(Event::Text(BytesText::new(text)))?;
                                    xml_writer.write_event(Event::End(BytesEnd::new(new.tag())))?;
                                }
                                _ => rewrite_items(&mut xml_reader, &mut xml_writer, old, new)?,
                            }
                            continue;
                        }
                    }
                    depth += 1;
                    xml_writer.write_event(Event::Start(e))?;
                }
                Event::Empty(e) => {
                    if depth == 0 && !added.is_empty() {
                        // `<resources/>` has to be opened up to take new children.
                        let end = BytesEnd::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                        xml_writer.write_event(Event::Start(e))?;
                        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
                        for (name, resource) in &added {
                            write_resource(&mut xml_writer, name, resource)?;
                        }
                        xml_writer.write_event(Event::End(end))?;
                        continue;
                    }
                    if depth == 1 {
                        if let Some((_, new)) = changed_resource(&changed, &e)? {
                            xml_writer.write_event(Event::Start(e))?;
                            write_body(&mut xml_writer, new)?;
                            xml_writer.write_event(Event::End(BytesEnd::new(new.tag())))?;
                            continue;
                        }
                    }
                    xml_writer.write_event(Event::Empty(e))?;
                }
                Event::End(e) => {
                    if depth == 1 {
                        for (name, resource) in &added {
                            write_resource(&mut xml_writer, name, resource)?;
                        }
                    }
                    depth = depth.saturating_sub(1);
                    xml_writer.write_event(Event::End(e))?;
                }
                Event::Eof => break,
                event => xml_writer.write_event(event)?,
            }
        }

        into_string(xml_writer)
    }
}

/// Structured content of one child of `<resources>`.
#[derive(Debug, PartialEq)]
enum Resource {
    Text(String),
    Plurals(Vec<(String, String)>),
    Array(Vec<String>),
}

impl Resource {
    fn from_value(name: &str, value: &Value) -> Result<Self, Error> {
        Ok(match value {
            Value::Object(items) => Resource::Plurals(
                items
                    .iter()
                    .map(|(quantity, text)| -> Result<(String, String), Error> {
                        Ok((quantity.clone(), scalar_text(name, text)?))
                    })
                    .collect::<Result<_, Error>>()?,
            ),
            Value::Array(items) => Resource::Array(
                items
                    .iter()
                    .map(|text| scalar_text(name, text))
                    .collect::<Result<_, Error>>()?,
            ),
            other => Resource::Text(scalar_text(name, other)?),
        })
    }

    fn tag(&self) -> &'static str {
        match self {
            Resource::Text(_) => "string",
            Resource::Plurals(_) => "plurals",
            Resource::Array(_) => "string-array",
        }
    }

    /// Item texts keyed by quantity for plurals and by position for arrays.
    fn items(&self) -> Vec<(String, &str)> {
        match self {
            Resource::Text(_) => Vec::new(),
            Resource::Plurals(items) => items
                .iter()
                .map(|(quantity, text)| (quantity.clone(), text.as_str()))
                .collect(),
            Resource::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, text)| (index.to_string(), text.as_str()))
                .collect(),
        }
    }

    fn item_start<'a>(&self, key: &'a str) -> BytesStart<'a> {
        let mut elem = BytesStart::new("item");
        if let Resource::Plurals(_) = self {
            elem.push_attribute(("quantity", key));
        }
        elem
    }
}

fn resource_map(data: &Value) -> Result<&Map<String, Value>, Error> {
    data.as_object().ok_or_else(|| {
        Error::DataMismatch("strings.xml holds a key/value map".to_string())
    })
}

fn scalar_text(name: &str, value: &Value) -> Result<String, Error> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(_) | Value::Number(_) => Ok(value.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(Error::DataMismatch(format!(
            "value for `{}` is nested too deeply for strings.xml",
            name
        ))),
    }
}

fn attribute(e: &BytesStart, key: &[u8]) -> Result<Option<String>, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::InvalidResource(e.to_string()))?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.to_string()));
        }
    }
    Ok(None)
}

fn string_name(e: &BytesStart) -> Result<String, Error> {
    attribute(e, b"name")?.ok_or_else(|| {
        Error::InvalidResource(format!(
            "{} tag missing 'name'",
            String::from_utf8_lossy(e.name().as_ref())
        ))
    })
}

/// Looks up the pending change for a `<resources>` child, if any.
fn changed_resource<'m>(
    changed: &'m HashMap<&str, (Resource, Resource)>,
    e: &BytesStart,
) -> Result<Option<&'m (Resource, Resource)>, Error> {
    let Some(name) = attribute(e, b"name")? else {
        return Ok(None);
    };
    let Some(change) = changed.get(name.as_str()) else {
        return Ok(None);
    };
    if e.name().as_ref() != change.1.tag().as_bytes() {
        return Err(Error::DataMismatch(format!(
            "`{}` cannot change from <{}> to <{}>",
            name,
            String::from_utf8_lossy(e.name().as_ref()),
            change.1.tag()
        )));
    }
    Ok(Some(change))
}

fn unexpected_eof() -> Error {
    Error::InvalidResource("unexpected end of file".to_string())
}

/// Reads the text of the element whose start tag was just consumed, through its end
/// tag. Text inside nested markup is included.
fn read_text(xml_reader: &mut Reader<&[u8]>) -> Result<String, Error> {
    let mut text = String::new();
    let mut depth = 0usize;
    loop {
        match xml_reader.read_event()? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => return Ok(text.trim().to_string()),
            Event::End(_) => depth -= 1,
            Event::Eof => return Err(unexpected_eof()),
            _ => {}
        }
    }
}

fn read_plurals(xml_reader: &mut Reader<&[u8]>) -> Result<Map<String, Value>, Error> {
    let mut items = Map::new();
    loop {
        match xml_reader.read_event()? {
            Event::Start(ref e) if e.name().as_ref() == b"item" => {
                let quantity = attribute(e, b"quantity")?;
                let text = read_text(xml_reader)?;
                if let Some(quantity) = quantity {
                    items.insert(quantity, Value::String(text));
                }
            }
            Event::Empty(ref e) if e.name().as_ref() == b"item" => {
                if let Some(quantity) = attribute(e, b"quantity")? {
                    items.insert(quantity, Value::String(String::new()));
                }
            }
            Event::Start(_) => skip_element(xml_reader)?,
            Event::End(_) => return Ok(items),
            Event::Eof => return Err(unexpected_eof()),
            _ => {}
        }
    }
}

fn read_array(xml_reader: &mut Reader<&[u8]>) -> Result<Vec<Value>, Error> {
    let mut items = Vec::new();
    loop {
        match xml_reader.read_event()? {
            Event::Start(ref e) if e.name().as_ref() == b"item" => {
                items.push(Value::String(read_text(xml_reader)?));
            }
            Event::Empty(ref e) if e.name().as_ref() == b"item" => {
                items.push(Value::String(String::new()));
            }
            Event::Start(_) => skip_element(xml_reader)?,
            Event::End(_) => return Ok(items),
            Event::Eof => return Err(unexpected_eof()),
            _ => {}
        }
    }
}

/// Consumes events through the end tag of the element just opened.
fn skip_element(xml_reader: &mut Reader<&[u8]>) -> Result<(), Error> {
    let mut depth = 0usize;
    loop {
        match xml_reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => return Ok(()),
            Event::End(_) => depth -= 1,
            Event::Eof => return Err(unexpected_eof()),
            _ => {}
        }
    }
}

/// Like [`skip_element`], but writes every event it consumes.
fn copy_element(xml_reader: &mut Reader<&[u8]>, xml_writer: &mut Writer<Vec<u8>>) -> Result<(), Error> {
    let mut depth = 0usize;
    loop {
        let event = xml_reader.read_event()?;
        let done = match event {
            Event::Start(_) => {
                depth += 1;
                false
            }
            Event::End(_) if depth == 0 => true,
            Event::End(_) => {
                depth -= 1;
                false
            }
            Event::Eof => return Err(unexpected_eof()),
            _ => false,
        };
        xml_writer.write_event(event)?;
        if done {
            return Ok(());
        }
    }
}

fn find_item<'a>(items: &'a [(String, &'a str)], key: &str) -> Option<&'a str> {
    items
        .iter()
        .find(|(item_key, _)| item_key == key)
        .map(|(_, text)| *text)
}

/// Key of an `<item>`: its quantity in plurals, its position in arrays.
fn item_key(e: &BytesStart, resource: &Resource, position: &mut usize) -> Result<Option<String>, Error> {
    if let Resource::Plurals(_) = resource {
        return attribute(e, b"quantity");
    }
    *position += 1;
    Ok(Some((*position - 1).to_string()))
}

/// New text for the item at `key`, if it differs from the old one.
fn changed_item<'a>(
    old_items: &[(String, &str)],
    new_items: &'a [(String, &'a str)],
    key: Option<String>,
) -> Option<&'a str> {
    let key = key?;
    let text = find_item(new_items, &key)?;
    (find_item(old_items, &key) != Some(text)).then_some(text)
}

/// Streams the children of a `<plurals>` or `<string-array>`, replacing changed item
/// text and appending new items before the closing tag.
fn rewrite_items(
    xml_reader: &mut Reader<&[u8]>,
    xml_writer: &mut Writer<Vec<u8>>,
    old: &Resource,
    new: &Resource,
) -> Result<(), Error> {
    let old_items = old.items();
    let new_items = new.items();
    let mut position = 0usize;

    loop {
        match xml_reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"item" => {
                let key = item_key(&e, new, &mut position)?;
                match changed_item(&old_items, &new_items, key) {
                    Some(text) => {
                        skip_element(xml_reader)?;
                        xml_writer.write_event(Event::Start(e))?;
                        xml_writer.write_event(Event::Text(BytesText::new(text)))?;
                        xml_writer.write_event(Event::End(BytesEnd::new("item")))?;
                    }
                    None => {
                        xml_writer.write_event(Event::Start(e))?;
                        copy_element(xml_reader, xml_writer)?;
                    }
                }
            }
            Event::Empty(e) if e.name().as_ref() == b"item" => {
                let key = item_key(&e, new, &mut position)?;
                match changed_item(&old_items, &new_items, key) {
                    Some(text) => {
                        xml_writer.write_event(Event::Start(e))?;
                        xml_writer.write_event(Event::Text(BytesText::new(text)))?;
                        xml_writer.write_event(Event::End(BytesEnd::new("item")))?;
                    }
                    None => xml_writer.write_event(Event::Empty(e))?,
                }
            }
            Event::Start(e) => {
                xml_writer.write_event(Event::Start(e))?;
                copy_element(xml_reader, xml_writer)?;
            }
            Event::End(e) => {
                for (key, text) in &new_items {
                    if find_item(&old_items, key).is_none() {
                        xml_writer.write_event(Event::Text(BytesText::new("    ")))?;
                        write_item(xml_writer, new, key, text)?;
                        xml_writer.write_event(Event::Text(BytesText::new("\n    ")))?;
                    }
                }
                xml_writer.write_event(Event::End(e))?;
                return Ok(());
            }
            Event::Eof => return Err(unexpected_eof()),
            event => xml_writer.write_event(event)?,
        }
    }
}

fn write_item(
    xml_writer: &mut Writer<Vec<u8>>,
    resource: &Resource,
    key: &str,
    text: &str,
) -> Result<(), Error> {
    xml_writer.write_event(Event::Start(resource.item_start(key)))?;
    xml_writer.write_event(Event::Text(BytesText::new(text)))?;
    xml_writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

/// Writes the content between a resource's start and end tags.
fn write_body(xml_writer: &mut Writer<Vec<u8>>, resource: &Resource) -> Result<(), Error> {
    if let Resource::Text(text) = resource {
        xml_writer.write_event(Event::Text(BytesText::new(text)))?;
        return Ok(());
    }
    for (key, text) in resource.items() {
        xml_writer.write_event(Event::Text(BytesText::new("\n        ")))?;
        write_item(xml_writer, resource, &key, text)?;
    }
    xml_writer.write_event(Event::Text(BytesText::new("\n    ")))?;
    Ok(())
}

/// Writes one indented `<resources>` child followed by a newline.
fn write_resource(
    xml_writer: &mut Writer<Vec<u8>>,
    name: &str,
    resource: &Resource,
) -> Result<(), Error> {
    let mut elem = BytesStart::new(resource.tag());
    elem.push_attribute(("name", name));

    xml_writer.write_event(Event::Text(BytesText::new("    ")))?;
    xml_writer.write_event(Event::Start(elem))?;
    write_body(xml_writer, resource)?;
    xml_writer.write_event(Event::End(BytesEnd::new(resource.tag())))?;
    xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
    Ok(())
}

fn into_string(xml_writer: Writer<Vec<u8>>) -> Result<String, Error> {
    String::from_utf8(xml_writer.into_inner()).map_err(|e| Error::DataMismatch(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use serde_json::json;

    #[test]
    fn test_parse_basic_strings_xml() {
        let xml = r#"
        <resources>
            <string name="hello">Hello</string>
            <string name="bye" translatable="false">Goodbye</string>
            <string name="empty"></string>
        </resources>
        "#;
        let data = AndroidStringsPlugin.parse(xml).unwrap();
        assert_eq!(
            data,
            json!({ "hello": "Hello", "bye": "Goodbye", "empty": "" })
        );
    }

    #[test]
    fn test_parse_plurals_and_arrays() {
        let xml = r#"
        <resources>
            <string name="hello">Hello</string>
            <plurals name="apples">
                <item quantity="one">One apple</item>
                <item quantity="other">%d apples</item>
            </plurals>
            <string-array name="days">
                <item>Mon</item>
                <item>Tue</item>
            </string-array>
        </resources>
        "#;
        let data = AndroidStringsPlugin.parse(xml).unwrap();
        assert_eq!(
            data,
            json!({
                "hello": "Hello",
                "apples": { "one": "One apple", "other": "%d apples" },
                "days": ["Mon", "Tue"]
            })
        );
    }

    #[test]
    fn test_parse_nested_markup_and_cdata() {
        let xml = r#"<resources>
            <string name="bold">Hi <b>there</b></string>
            <string name="raw"><![CDATA[<i>x</i>]]></string>
        </resources>"#;
        let data = AndroidStringsPlugin.parse(xml).unwrap();
        assert_eq!(data, json!({ "bold": "Hi there", "raw": "<i>x</i>" }));
    }

    #[test]
    fn test_missing_name_attribute() {
        let xml = r#"
        <resources>
            <string>No name attr</string>
        </resources>
        "#;
        let err = AndroidStringsPlugin.parse(xml).unwrap_err();
        assert!(format!("{:?}", err).contains("missing 'name'"));
    }

    #[test]
    fn test_non_resource_xml_is_rejected() {
        let xml = r#"<manifest package="com.example"></manifest>"#;
        assert!(AndroidStringsPlugin.parse(xml).is_err());
    }

    #[test]
    fn test_round_trip_serialization() {
        let data = json!({ "greet": "Hi & welcome", "bye": "Bye" });
        let output = AndroidStringsPlugin.serialize(&data).unwrap();
        assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(output.contains("<string name=\"greet\">Hi &amp; welcome</string>"));
        assert_eq!(AndroidStringsPlugin.parse(&output).unwrap(), data);
    }

    #[test]
    fn test_serialize_plurals_and_arrays() {
        let data = json!({ "n": { "one": "1 file", "other": "%d files" }, "days": ["Mon"] });
        let output = AndroidStringsPlugin.serialize(&data).unwrap();
        assert_eq!(
            output,
            indoc! {r#"
                <?xml version="1.0" encoding="utf-8"?>
                <resources>
                    <plurals name="n">
                        <item quantity="one">1 file</item>
                        <item quantity="other">%d files</item>
                    </plurals>
                    <string-array name="days">
                        <item>Mon</item>
                    </string-array>
                </resources>
            "#}
        );
        assert_eq!(AndroidStringsPlugin.parse(&output).unwrap(), data);

        let too_deep = json!({ "n": { "one": ["x"] } });
        assert!(matches!(
            AndroidStringsPlugin.serialize(&too_deep),
            Err(Error::DataMismatch(_))
        ));
    }

    #[test]
    fn test_rewrite_keeps_everything_it_does_not_change() {
        let original = indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <!-- Shared strings -->
            <resources xmlns:tools="http://schemas.android.com/tools">
                <string name="a">A</string>
                <string name="b" translatable="false">B</string>
                <plurals name="n">
                    <item quantity="one">1</item>
                    <item quantity="other">%d</item>
                </plurals>
                <string-array name="days">
                    <item>Mon</item>
                </string-array>
            </resources>
        "#};
        let mut data = AndroidStringsPlugin.parse(original).unwrap();
        data["a"] = json!("AA");

        let output = AndroidStringsPlugin.rewrite(original, &data).unwrap();
        assert_eq!(output, original.replace(">A<", ">AA<"));
    }

    #[test]
    fn test_rewrite_edits_items_and_appends_resources() {
        let original = indoc! {r#"
            <resources>
                <plurals name="n">
                    <item quantity="one">1</item>
                </plurals>
                <string-array name="days">
                    <item>Mon</item>
                </string-array>
            </resources>
        "#};
        let data = json!({
            "n": { "one": "one", "other": "many" },
            "days": ["Mon", "Tue"],
            "fresh": "New"
        });

        let output = AndroidStringsPlugin.rewrite(original, &data).unwrap();
        assert_eq!(
            output,
            indoc! {r#"
                <resources>
                    <plurals name="n">
                        <item quantity="one">one</item>
                        <item quantity="other">many</item>
                    </plurals>
                    <string-array name="days">
                        <item>Mon</item>
                        <item>Tue</item>
                    </string-array>
                    <string name="fresh">New</string>
                </resources>
            "#}
        );
        assert_eq!(AndroidStringsPlugin.parse(&output).unwrap(), data);
    }

    #[test]
    fn test_rewrite_rejects_kind_change() {
        let original = "<resources><string name=\"a\">A</string></resources>";
        let result = AndroidStringsPlugin.rewrite(original, &json!({ "a": ["x"] }));
        assert!(matches!(result, Err(Error::DataMismatch(_))));
    }
}
