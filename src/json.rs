//! JSON emission sink contract.
//!
//! Containers emit themselves by driving a [`JsonSink`] rather than
//! formatting JSON text directly, so that callers can plug in their own
//! writer (a `String` builder, a streaming writer, a DOM builder) without
//! this crate depending on a particular JSON library.
//!
//! Maps with string-typed keys emit as a JSON object (`name`/`value` pairs);
//! maps with any other key type emit as a JSON array of `{Key, Value}`
//! objects. The null key, when present, is emitted first. Absent
//! `NullList` positions and bit-packed positions with no logical value
//! emit as JSON `null`.

/// A push-style JSON sink. Implementations do not validate structural
/// correctness (matching `enter_object`/`exit_object` pairs etc.); callers
/// are expected to drive it correctly, the way a serializer drives a
/// `serde::Serializer`.
pub trait JsonSink {
    fn enter_object(&mut self);
    fn exit_object(&mut self);
    fn enter_array(&mut self);
    fn exit_array(&mut self);
    fn name(&mut self, key: &str);
    fn value_str(&mut self, value: &str);
    fn value_i64(&mut self, value: i64);
    fn value_f64(&mut self, value: f64);
    fn value_bool(&mut self, value: bool);
    /// Emits a JSON `null`.
    fn value_null(&mut self);
    /// Hints at the number of characters about to be written, so a
    /// string-backed sink can reserve capacity up front.
    fn preallocate(&mut self, n_chars_hint: usize);
}

/// A dependency-free [`JsonSink`] that accumulates directly into a `String`.
#[derive(Debug, Default)]
pub struct StringSink {
    buf: String,
    needs_comma: Vec<bool>,
}

impl StringSink {
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            needs_comma: Vec::new(),
        }
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    fn before_value(&mut self) {
        if let Some(needs) = self.needs_comma.last_mut() {
            if *needs {
                self.buf.push(',');
            }
            *needs = true;
        }
    }

    fn escape_into(buf: &mut String, s: &str) {
        buf.push('"');
        for c in s.chars() {
            match c {
                '"' => buf.push_str("\\\""),
                '\\' => buf.push_str("\\\\"),
                '\n' => buf.push_str("\\n"),
                '\t' => buf.push_str("\\t"),
                '\r' => buf.push_str("\\r"),
                c if (c as u32) < 0x20 => buf.push_str(&format!("\\u{:04x}", c as u32)),
                c => buf.push(c),
            }
        }
        buf.push('"');
    }
}

impl JsonSink for StringSink {
    fn enter_object(&mut self) {
        self.before_value();
        self.buf.push('{');
        self.needs_comma.push(false);
    }

    fn exit_object(&mut self) {
        self.buf.push('}');
        self.needs_comma.pop();
    }

    fn enter_array(&mut self) {
        self.before_value();
        self.buf.push('[');
        self.needs_comma.push(false);
    }

    fn exit_array(&mut self) {
        self.buf.push(']');
        self.needs_comma.pop();
    }

    fn name(&mut self, key: &str) {
        self.before_value();
        // A name is followed by its value; undo the comma bookkeeping that
        // `before_value` just applied so the value itself doesn't insert one.
        if let Some(needs) = self.needs_comma.last_mut() {
            *needs = false;
        }
        Self::escape_into(&mut self.buf, key);
        self.buf.push(':');
        if let Some(needs) = self.needs_comma.last_mut() {
            *needs = true;
        }
    }

    fn value_str(&mut self, value: &str) {
        self.before_value();
        Self::escape_into(&mut self.buf, value);
    }

    fn value_i64(&mut self, value: i64) {
        self.before_value();
        self.buf.push_str(&value.to_string());
    }

    fn value_f64(&mut self, value: f64) {
        self.before_value();
        self.buf.push_str(&value.to_string());
    }

    fn value_bool(&mut self, value: bool) {
        self.before_value();
        self.buf.push_str(if value { "true" } else { "false" });
    }

    fn value_null(&mut self) {
        self.before_value();
        self.buf.push_str("null");
    }

    fn preallocate(&mut self, n_chars_hint: usize) {
        self.buf.reserve(n_chars_hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_object_with_comma_separated_members() {
        let mut sink = StringSink::new();
        sink.enter_object();
        sink.name("a");
        sink.value_i64(1);
        sink.name("b");
        sink.value_null();
        sink.exit_object();
        assert_eq!(sink.into_string(), r#"{"a":1,"b":null}"#);
    }

    #[test]
    fn emits_array_of_objects() {
        let mut sink = StringSink::new();
        sink.enter_array();
        sink.enter_object();
        sink.name("Key");
        sink.value_i64(7);
        sink.name("Value");
        sink.value_str("x");
        sink.exit_object();
        sink.enter_object();
        sink.name("Key");
        sink.value_i64(8);
        sink.name("Value");
        sink.value_null();
        sink.exit_object();
        sink.exit_array();
        assert_eq!(
            sink.into_string(),
            r#"[{"Key":7,"Value":"x"},{"Key":8,"Value":null}]"#
        );
    }

    #[test]
    fn escapes_control_characters_and_quotes() {
        let mut sink = StringSink::new();
        sink.value_str("line\n\"quoted\"");
        assert_eq!(sink.into_string(), r#""line\n\"quoted\"""#);
    }
}
