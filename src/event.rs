// Copyright 2014-2015 Galen Clark Haynes
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Rust XML-RPC library

//! The tokenizer side of the decoder.
//!
//! The decoder only needs four kinds of event, in document order. Anything
//! that can produce them implements [`EventSource`]: [`XmlReader`] wraps
//! xml-rs, and [`EventBuffer`] collects events pushed by any other
//! tokenizer.

use std::collections::VecDeque;
use std::fmt;
use std::io::Read;

use log::trace;
use xml::reader::{EventReader, ParserConfig, XmlEvent};

use crate::error::Result;

/// A tokenizer event. Element names are local names, without prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    StartElement { name: String },
    EndElement { name: String },
    Characters(String),
    EndDocument,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Event::StartElement { ref name } => write!(f, "<{}>", name),
            Event::EndElement { ref name } => write!(f, "</{}>", name),
            Event::Characters(ref text) => write!(f, "text {:?}", text),
            Event::EndDocument => f.write_str("end of document"),
        }
    }
}

/// A cursor over tokenizer events.
pub trait EventSource {
    /// Returns the next event. Once the document is exhausted this keeps
    /// returning `Event::EndDocument`.
    fn next_event(&mut self) -> Result<Event>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn next_event(&mut self) -> Result<Event> {
        (**self).next_event()
    }
}

/// Events from an XML document, read with xml-rs.
pub struct XmlReader<R: Read> {
    parser: EventReader<R>,
}

impl<R: Read> XmlReader<R> {
    pub fn new(source: R) -> XmlReader<R> {
        let parser = ParserConfig::new()
            .whitespace_to_characters(true)
            .cdata_to_characters(true)
            .ignore_comments(true)
            .coalesce_characters(true)
            .create_reader(source);
        XmlReader { parser }
    }
}

impl<R: Read> EventSource for XmlReader<R> {
    fn next_event(&mut self) -> Result<Event> {
        loop {
            let event = match self.parser.next()? {
                XmlEvent::StartElement { name, .. } => Event::StartElement {
                    name: name.local_name,
                },
                XmlEvent::EndElement { name } => Event::EndElement {
                    name: name.local_name,
                },
                XmlEvent::Characters(text) => Event::Characters(text),
                XmlEvent::EndDocument => Event::EndDocument,
                // prolog, processing instructions
                _ => continue,
            };
            trace!("xml event: {}", event);
            return Ok(event);
        }
    }
}

impl<R: Read> fmt::Debug for XmlReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("XmlReader").finish_non_exhaustive()
    }
}

/// Events recorded from a push-style tokenizer, replayed in order.
///
/// ```
/// use xmlrpc_parser::{Deserializer, EventBuffer, Value};
///
/// let mut events = EventBuffer::new();
/// events.start_element("value", &[]);
/// events.start_element("int", &[]);
/// events.characters("7");
/// events.end_element("int");
/// events.end_element("value");
/// events.end_document();
///
/// assert_eq!(Value::Integer(7), Deserializer::new(events).root_value().unwrap());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventBuffer {
    events: VecDeque<Event>,
}

impl EventBuffer {
    pub fn new() -> EventBuffer {
        EventBuffer::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Attributes carry no meaning in XML-RPC and are dropped.
    pub fn start_element(&mut self, name: &str, _attributes: &[(&str, &str)]) {
        self.push(Event::StartElement {
            name: name.to_string(),
        });
    }

    pub fn end_element(&mut self, name: &str) {
        self.push(Event::EndElement {
            name: name.to_string(),
        });
    }

    /// Adjacent character runs are kept apart; the decoder joins them.
    pub fn characters(&mut self, text: &str) {
        self.push(Event::Characters(text.to_string()));
    }

    pub fn end_document(&mut self) {
        self.push(Event::EndDocument);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<Event> for EventBuffer {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> EventBuffer {
        EventBuffer {
            events: iter.into_iter().collect(),
        }
    }
}

impl EventSource for EventBuffer {
    fn next_event(&mut self) -> Result<Event> {
        Ok(self.events.pop_front().unwrap_or(Event::EndDocument))
    }
}
