// Copyright 2014-2015 Galen Clark Haynes
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Rust XML-RPC library

use std::collections::{BTreeMap, HashMap};
use std::ops::Index;

use crate::datetime::DateTime;

/// Represents an XML-RPC data value
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Nil,
    Boolean(bool),
    /// `<int>` and `<i4>`
    Integer(i64),
    Double(f64),
    String(String),
    DateTime(DateTime),
    Array(self::Array),
    Struct(self::Struct),
}

pub type Array = Vec<Value>;
pub type Struct = BTreeMap<String, Value>;

static NIL: Value = Value::Nil;

impl Value {
    /// If the value is a Struct, returns the member with the provided name.
    /// Otherwise, returns None.
    pub fn find<'a>(&'a self, key: &str) -> Option<&'a Value> {
        match *self {
            Value::Struct(ref map) => map.get(key),
            _ => None,
        }
    }

    /// Follows `keys` through nested Structs.
    /// If any key is found not to exist, find_path will return None.
    /// Otherwise, it will return the value associated with the final key.
    pub fn find_path<'a>(&'a self, keys: &[&str]) -> Option<&'a Value> {
        let mut target = self;
        for key in keys {
            target = target.find(key)?;
        }
        Some(target)
    }

    /// If the value is a Struct, performs a depth-first search until a member
    /// with the provided name is found. If no member is found or the value is
    /// not a Struct, returns None.
    pub fn search<'a>(&'a self, key: &str) -> Option<&'a Value> {
        match *self {
            Value::Struct(ref map) => match map.get(key) {
                Some(value) => Some(value),
                None => map.values().find_map(|v| v.search(key)),
            },
            _ => None,
        }
    }

    pub fn is_struct(&self) -> bool {
        self.as_struct().is_some()
    }

    /// If the value is a Struct, returns the associated BTreeMap.
    /// Returns None otherwise.
    pub fn as_struct(&self) -> Option<&Struct> {
        match *self {
            Value::Struct(ref map) => Some(map),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        self.as_array().is_some()
    }

    /// If the value is an Array, returns the associated vector.
    /// Returns None otherwise.
    pub fn as_array(&self) -> Option<&Array> {
        match *self {
            Value::Array(ref array) => Some(array),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        self.as_str().is_some()
    }

    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Value::String(ref s) => Some(s),
            _ => None,
        }
    }

    /// Returns true for Integer and Double.
    pub fn is_number(&self) -> bool {
        matches!(*self, Value::Integer(_) | Value::Double(_))
    }

    pub fn is_i64(&self) -> bool {
        self.as_i64().is_some()
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is a number, return or cast it to a f64.
    /// Returns None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Integer(n) => Some(n as f64),
            Value::Double(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_boolean(&self) -> bool {
        self.as_boolean().is_some()
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match *self {
            Value::Boolean(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_datetime(&self) -> bool {
        self.as_datetime().is_some()
    }

    pub fn as_datetime(&self) -> Option<&DateTime> {
        match *self {
            Value::DateTime(ref dt) => Some(dt),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(*self, Value::Nil)
    }
}

/// Member lookup; yields `Nil` for a missing member or a non-Struct.
impl<'a> Index<&'a str> for Value {
    type Output = Value;

    fn index(&self, key: &'a str) -> &Value {
        self.find(key).unwrap_or(&NIL)
    }
}

/// Element lookup; yields `Nil` out of bounds or for a non-Array.
impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, idx: usize) -> &Value {
        match *self {
            Value::Array(ref v) => v.get(idx).unwrap_or(&NIL),
            _ => &NIL,
        }
    }
}

macro_rules! from_integer_impl {
    ($($t:ty),+) => (
        $(impl From<$t> for Value {
            fn from(n: $t) -> Value { Value::Integer(i64::from(n)) }
        })+
    )
}

from_integer_impl! { i8, i16, i32, i64, u8, u16, u32 }

impl From<f32> for Value {
    fn from(n: f32) -> Value {
        Value::Double(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Double(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Boolean(b)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Value {
        Value::Nil
    }
}

impl<'a> From<&'a str> for Value {
    fn from(s: &'a str) -> Value {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s)
    }
}

impl From<DateTime> for Value {
    fn from(dt: DateTime) -> Value {
        Value::DateTime(dt)
    }
}

impl<A: Into<Value>> From<Vec<A>> for Value {
    fn from(v: Vec<A>) -> Value {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Value>> From<BTreeMap<String, A>> for Value {
    fn from(map: BTreeMap<String, A>) -> Value {
        Value::Struct(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<A: Into<Value>> From<HashMap<String, A>> for Value {
    fn from(map: HashMap<String, A>) -> Value {
        Value::Struct(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<A: Into<Value>> From<Option<A>> for Value {
    fn from(opt: Option<A>) -> Value {
        match opt {
            None => Value::Nil,
            Some(value) => value.into(),
        }
    }
}

impl<A: Into<Value>> FromIterator<A> for Value {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Value {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> Value {
        let mut address = Struct::new();
        address.insert("city".to_string(), "Lima".into());
        address.insert("zip".to_string(), 15001.into());

        let mut person = Struct::new();
        person.insert("name".to_string(), "Clark".into());
        person.insert("age".to_string(), 35.into());
        person.insert("address".to_string(), Value::Struct(address));
        Value::Struct(person)
    }

    #[test]
    fn test_find() {
        let p = person();
        assert_eq!(Some(&Value::Integer(35)), p.find("age"));
        assert_eq!(None, p.find("height"));
        assert_eq!(None, Value::Integer(1).find("age"));
    }

    #[test]
    fn test_find_path() {
        let p = person();
        assert_eq!(Some("Lima"), p.find_path(&["address", "city"]).and_then(Value::as_str));
        assert_eq!(None, p.find_path(&["address", "street"]));
        assert_eq!(Some(&p), p.find_path(&[]));
    }

    #[test]
    fn test_search() {
        let p = person();
        assert_eq!(Some(&Value::Integer(15001)), p.search("zip"));
        assert_eq!(None, p.search("street"));
    }

    #[test]
    fn test_index() {
        let p = person();
        assert_eq!(Value::String("Clark".into()), p["name"]);
        assert_eq!(Value::Nil, p["missing"]);
        assert_eq!(Value::Nil, p["address"]["city"][0]);

        let list: Value = vec![1, 2, 3].into();
        assert_eq!(Value::Integer(2), list[1]);
        assert_eq!(Value::Nil, list[9]);
    }

    #[test]
    fn test_accessors() {
        assert!(Value::Nil.is_nil());
        assert!(Value::Integer(3).is_number());
        assert!(Value::Double(0.5).is_number());
        assert!(!Value::String("3".into()).is_number());
        assert_eq!(Some(3.0), Value::Integer(3).as_f64());
        assert_eq!(None, Value::Double(3.0).as_i64());
        assert_eq!(Some(false), Value::Boolean(false).as_boolean());
        assert!(person().is_struct());
        assert!(Value::Array(vec![]).is_array());
        assert!(!Value::Nil.is_datetime());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::Integer(7), Value::from(7u8));
        assert_eq!(Value::Double(0.5), Value::from(0.5f32));
        assert_eq!(Value::Nil, Value::from(None::<i32>));
        assert_eq!(Value::Boolean(true), Value::from(Some(true)));
        assert_eq!(
            Value::Array(vec![Value::String("a".into()), Value::String("b".into())]),
            vec!["a", "b"].into_iter().collect::<Value>()
        );

        let mut map = HashMap::new();
        map.insert("k".to_string(), ());
        let mut expected = Struct::new();
        expected.insert("k".to_string(), Value::Nil);
        assert_eq!(Value::Struct(expected), Value::from(map));
    }
}
