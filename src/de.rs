// Copyright 2014-2015 Galen Clark Haynes
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Rust XML-RPC library

use std::io::Read;

use crate::config::DecoderConfig;
use crate::error::{Error, Result};
use crate::event::{Event, EventSource, XmlReader};
use crate::scalar::Scalar;
use crate::value::{Array, Struct, Value};

/// Decodes XML-RPC values from a stream of tokenizer events.
///
/// A `Deserializer` holds the state of one decode. The envelope entry points
/// ([`method_call`](Deserializer::method_call),
/// [`method_response`](Deserializer::method_response) and
/// [`root_value`](Deserializer::root_value)) consume it.
#[derive(Debug)]
pub struct Deserializer<S> {
    source: S,
    config: DecoderConfig,
    depth: usize,
}

impl<R: Read> Deserializer<XmlReader<R>> {
    /// Reads an XML document with xml-rs.
    pub fn from_reader(source: R) -> Deserializer<XmlReader<R>> {
        Deserializer::new(XmlReader::new(source))
    }
}

impl<'a> Deserializer<XmlReader<&'a [u8]>> {
    pub fn from_str(s: &'a str) -> Deserializer<XmlReader<&'a [u8]>> {
        Deserializer::from_reader(s.as_bytes())
    }
}

impl<S: EventSource> Deserializer<S> {
    pub fn new(source: S) -> Deserializer<S> {
        Deserializer::with_config(source, DecoderConfig::default())
    }

    pub fn with_config(source: S, config: DecoderConfig) -> Deserializer<S> {
        Deserializer {
            source,
            config,
            depth: 0,
        }
    }

    /// Decodes a document whose root element is a single `<value>`.
    pub fn root_value(mut self) -> Result<Value> {
        self.expect_start("value")?;
        let value = self.value()?;
        self.expect_end_document()?;
        Ok(value)
    }

    /// Decodes the inside of a `<value>` element whose start tag has already
    /// been consumed, up to and including `</value>`.
    pub fn value(&mut self) -> Result<Value> {
        let frame = self.open_value()?;
        self.run(frame)
    }

    /// Decodes one `<value>` child whose start tag `<tag>` has already been
    /// consumed, up to and including `</tag>`.
    pub fn typed(&mut self, tag: &str) -> Result<Value> {
        match tag {
            "array" => self.run(Frame::ArrayStart),
            "struct" => self.run(Frame::Struct(Struct::new())),
            _ => self.scalar(tag),
        }
    }

    fn scalar(&mut self, tag: &str) -> Result<Value> {
        let scalar: Scalar = tag.parse()?;
        let text = self.text(tag)?;
        scalar.coerce(text)
    }

    fn open_value(&mut self) -> Result<Frame> {
        if let Some(max) = self.config.max_depth {
            if self.depth >= max {
                return Err(Error::DepthLimitExceeded(max));
            }
        }
        self.depth += 1;
        Ok(Frame::Value {
            text: String::new(),
            child: None,
        })
    }

    // Open containers wait in `parents`; nesting costs heap, not stack.
    fn run(&mut self, mut frame: Frame) -> Result<Value> {
        let mut parents = Vec::new();
        loop {
            let step = match frame {
                Frame::Value { text, child } => self.in_value(&mut parents, text, child)?,
                Frame::ArrayStart => match self.next_tag()? {
                    Event::StartElement { ref name } if name == "data" => {
                        Step::Next(Frame::Data(Array::new()))
                    }
                    // <array/>
                    Event::EndElement { ref name } if name == "array" => {
                        finish_child(&mut parents, Value::Array(Array::new()))?
                    }
                    other => return Err(unexpected("<data>", &other)),
                },
                Frame::Data(values) => match self.next_tag()? {
                    Event::StartElement { ref name } if name == "value" => {
                        parents.push(Frame::Data(values));
                        Step::Next(self.open_value()?)
                    }
                    Event::EndElement { ref name } if name == "data" => {
                        self.expect_end("array")?;
                        finish_child(&mut parents, Value::Array(values))?
                    }
                    other => return Err(unexpected("<value> or </data>", &other)),
                },
                Frame::Struct(members) => match self.next_tag()? {
                    Event::StartElement { ref name } if name == "member" => {
                        parents.push(Frame::Struct(members));
                        Step::Next(Frame::Member {
                            key: None,
                            value: None,
                        })
                    }
                    Event::EndElement { ref name } if name == "struct" => {
                        finish_child(&mut parents, Value::Struct(members))?
                    }
                    other => return Err(unexpected("<member> or </struct>", &other)),
                },
                Frame::Member { key, value } => self.in_member(&mut parents, key, value)?,
            };
            frame = match step {
                Step::Next(next) => next,
                Step::Done(value) => return Ok(value),
            };
        }
    }

    fn in_value(&mut self, parents: &mut Vec<Frame>, mut text: String, child: Option<Value>) -> Result<Step> {
        match self.source.next_event()? {
            Event::Characters(chunk) => {
                if child.is_none() {
                    text.push_str(&chunk);
                } else if !chunk.trim().is_empty() {
                    return Err(Error::structural(format!("unexpected text {:?}", chunk)));
                }
                Ok(Step::Next(Frame::Value { text, child }))
            }
            Event::StartElement { name } => {
                if child.is_some() {
                    return Err(Error::structural(format!(
                        "<value> has more than one child, found a second <{}>",
                        name
                    )));
                }
                if !text.trim().is_empty() {
                    return Err(Error::structural(format!(
                        "text {:?} before <{}> in <value>",
                        text, name
                    )));
                }
                let next = match name.as_str() {
                    "array" => Frame::ArrayStart,
                    "struct" => Frame::Struct(Struct::new()),
                    tag => {
                        let child = Some(self.scalar(tag)?);
                        return Ok(Step::Next(Frame::Value { text, child }));
                    }
                };
                parents.push(Frame::Value { text, child });
                Ok(Step::Next(next))
            }
            Event::EndElement { ref name } if name == "value" => {
                self.depth -= 1;
                let value = match child {
                    Some(value) => value,
                    None if self.config.implicit_string => Value::String(text),
                    None => return Err(Error::structural("<value> has no typed child")),
                };
                match parents.pop() {
                    None => Ok(Step::Done(value)),
                    Some(Frame::Data(mut values)) => {
                        values.push(value);
                        Ok(Step::Next(Frame::Data(values)))
                    }
                    Some(Frame::Member { key, .. }) => Ok(Step::Next(Frame::Member {
                        key,
                        value: Some(value),
                    })),
                    Some(_) => Err(Error::structural("<value> closed outside <data> or <member>")),
                }
            }
            other if child.is_none() => Err(unexpected("a <value> child", &other)),
            other => Err(unexpected("</value>", &other)),
        }
    }

    fn in_member(&mut self, parents: &mut Vec<Frame>, key: Option<String>, value: Option<Value>) -> Result<Step> {
        match self.next_tag()? {
            Event::StartElement { ref name } if name == "name" => {
                if key.is_some() {
                    return Err(Error::structural("<member> has more than one <name>"));
                }
                let key = Some(self.text("name")?);
                Ok(Step::Next(Frame::Member { key, value }))
            }
            Event::StartElement { ref name } if name == "value" => {
                if value.is_some() {
                    return Err(Error::structural("<member> has more than one <value>"));
                }
                parents.push(Frame::Member { key, value });
                Ok(Step::Next(self.open_value()?))
            }
            Event::EndElement { ref name } if name == "member" => {
                let (key, value) = match (key, value) {
                    (Some(key), Some(value)) => (key, value),
                    (None, _) => return Err(Error::structural("<member> is missing <name>")),
                    (_, None) => return Err(Error::structural("<member> is missing <value>")),
                };
                match parents.pop() {
                    Some(Frame::Struct(mut members)) => {
                        members.insert(key, value);
                        Ok(Step::Next(Frame::Struct(members)))
                    }
                    _ => Err(Error::structural("<member> closed outside <struct>")),
                }
            }
            other => Err(unexpected("<name>, <value> or </member>", &other)),
        }
    }

    /// Decodes `<params>` after its start tag, through `</params>`.
    pub(crate) fn params(&mut self) -> Result<Vec<Value>> {
        let mut params = Vec::new();
        loop {
            match self.next_tag()? {
                Event::StartElement { ref name } if name == "param" => {
                    self.expect_start("value")?;
                    params.push(self.value()?);
                    self.expect_end("param")?;
                }
                Event::EndElement { ref name } if name == "params" => return Ok(params),
                other => return Err(unexpected("<param> or </params>", &other)),
            }
        }
    }

    /// Collects character data up to `</tag>`. Child elements are an error.
    pub(crate) fn text(&mut self, tag: &str) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.source.next_event()? {
                Event::Characters(chunk) => text.push_str(&chunk),
                Event::EndElement { ref name } if name == tag => return Ok(text),
                other => return Err(unexpected(&format!("text or </{}>", tag), &other)),
            }
        }
    }

    /// Next event, skipping whitespace between elements. Any other text is
    /// out of place here.
    pub(crate) fn next_tag(&mut self) -> Result<Event> {
        loop {
            match self.source.next_event()? {
                Event::Characters(ref text) if text.trim().is_empty() => continue,
                Event::Characters(text) => {
                    return Err(Error::structural(format!("unexpected text {:?}", text)));
                }
                event => return Ok(event),
            }
        }
    }

    pub(crate) fn expect_start(&mut self, tag: &str) -> Result<()> {
        match self.next_tag()? {
            Event::StartElement { ref name } if name == tag => Ok(()),
            other => Err(unexpected(&format!("<{}>", tag), &other)),
        }
    }

    pub(crate) fn expect_end(&mut self, tag: &str) -> Result<()> {
        match self.next_tag()? {
            Event::EndElement { ref name } if name == tag => Ok(()),
            other => Err(unexpected(&format!("</{}>", tag), &other)),
        }
    }

    pub(crate) fn expect_end_document(&mut self) -> Result<()> {
        match self.next_tag()? {
            Event::EndDocument => Ok(()),
            other => Err(unexpected("end of document", &other)),
        }
    }
}

/// An element whose contents are still being read.
enum Frame {
    /// Inside `<value>`: leading text, then the decoded child.
    Value { text: String, child: Option<Value> },
    /// Inside `<array>`, before `<data>`.
    ArrayStart,
    Data(Array),
    Struct(Struct),
    Member { key: Option<String>, value: Option<Value> },
}

enum Step {
    Next(Frame),
    Done(Value),
}

/// Hands a finished `<value>` child to the `<value>` frame waiting for it.
fn finish_child(parents: &mut Vec<Frame>, child: Value) -> Result<Step> {
    match parents.pop() {
        None => Ok(Step::Done(child)),
        Some(Frame::Value { text, child: None }) => Ok(Step::Next(Frame::Value {
            text,
            child: Some(child),
        })),
        Some(_) => Err(Error::structural("container closed outside <value>")),
    }
}

fn unexpected(expected: &str, found: &Event) -> Error {
    Error::structural(format!("expected {}, found {}", expected, found))
}
