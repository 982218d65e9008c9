//! EMV tag-length-value fields.

use crate::error::PixError;

/// Contents of a TLV field: either text or a nested template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixValue {
    Text(String),
    Nested(Vec<PixField>),
}

/// One `tag + length + value` field. Tags and lengths are two ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixField {
    tag: &'static str,
    value: PixValue,
}

impl PixField {
    pub fn text(tag: &'static str, value: impl Into<String>) -> Self {
        Self {
            tag,
            value: PixValue::Text(value.into()),
        }
    }

    pub fn nested(tag: &'static str, fields: Vec<PixField>) -> Self {
        Self {
            tag,
            value: PixValue::Nested(fields),
        }
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn value(&self) -> &PixValue {
        &self.value
    }

    /// Append the serialized field to `out`.
    pub fn write_to(&self, out: &mut String) -> Result<(), PixError> {
        let value = match &self.value {
            PixValue::Text(text) => {
                if !text.is_ascii() {
                    return Err(PixError::NonAscii {
                        tag: self.tag.to_string(),
                    });
                }
                text.clone()
            }
            PixValue::Nested(fields) => encode_fields(fields)?,
        };

        if value.len() > 99 {
            return Err(PixError::FieldTooLong {
                tag: self.tag.to_string(),
                len: value.len(),
            });
        }

        out.push_str(self.tag);
        out.push_str(&format!("{:02}", value.len()));
        out.push_str(&value);
        Ok(())
    }
}

/// Serialize a field sequence back to back.
pub fn encode_fields(fields: &[PixField]) -> Result<String, PixError> {
    let mut out = String::new();
    for field in fields {
        field.write_to(&mut out)?;
    }
    Ok(out)
}

/// Split a flat TLV sequence into `(tag, value)` pairs without interpreting
/// nested templates.
pub fn decode_fields(input: &str) -> Result<Vec<(String, String)>, PixError> {
    if !input.is_ascii() {
        return Err(PixError::Malformed("payload is not ASCII".to_string()));
    }

    let mut fields = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        if rest.len() < 4 {
            return Err(PixError::Malformed(format!("truncated header {rest:?}")));
        }
        let (tag, after_tag) = rest.split_at(2);
        let (len, after_len) = after_tag.split_at(2);
        if !tag.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PixError::Malformed(format!("bad tag {tag:?}")));
        }
        let len: usize = len
            .parse()
            .map_err(|_| PixError::Malformed(format!("bad length {len:?} for tag {tag}")))?;
        if after_len.len() < len {
            return Err(PixError::Malformed(format!("value of tag {tag} is truncated")));
        }
        let (value, next) = after_len.split_at(len);
        fields.push((tag.to_string(), value.to_string()));
        rest = next;
    }
    Ok(fields)
}
