//! S-expression plist helpers.
//!
//! Config files, replay scripts and emitted events are all plists such as
//! `(:type :frame :pinch 0.8 :twist 10)`.

use lexpr::Value;

use crate::hand::math::Vec3;

/// Find the value following `:key` in a plist.
///
/// Walks key/value pairs, so a value never matches as a key. Handles both
/// `Value::Keyword("key")` (elisp parser) and `Value::Symbol(":key")`
/// (default parser) forms.
pub fn get_value<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let prefixed = format!(":{}", key);
    let mut current = value;
    while let Value::Cons(pair) = current {
        let is_key = match pair.car() {
            Value::Keyword(k) => k.as_ref() == key,
            Value::Symbol(s) => s.as_ref() == prefixed,
            _ => false,
        };
        let Value::Cons(next) = pair.cdr() else {
            return None;
        };
        if is_key {
            return Some(next.car());
        }
        current = next.cdr();
    }
    None
}

/// Extract a keyword value as text, without the leading colon.
pub fn get_keyword(value: &Value, key: &str) -> Option<String> {
    let val = get_value(value, key)?;
    let text = match val {
        Value::Keyword(v) => v.to_string(),
        Value::Symbol(v) => {
            let s = v.to_string();
            s.strip_prefix(':').unwrap_or(&s).to_string()
        }
        Value::String(v) => v.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => bool_sexp(*b).to_string(),
        Value::Null | Value::Nil => "nil".to_string(),
        _ => val.to_string(),
    };
    Some(text)
}

/// Treats "nil" as false, anything else as true.
pub fn get_bool(value: &Value, key: &str) -> Option<bool> {
    get_keyword(value, key).map(|s| s != "nil")
}

pub fn get_float(value: &Value, key: &str) -> Option<f64> {
    get_keyword(value, key).and_then(|s| s.parse().ok())
}

/// Extract a `(x y z)` list.
pub fn get_vec3(value: &Value, key: &str) -> Option<Vec3> {
    let mut nums = Vec::with_capacity(3);
    let mut current = get_value(value, key)?;
    while let Value::Cons(pair) = current {
        match pair.car() {
            Value::Number(n) => nums.push(n.as_f64()? as f32),
            _ => return None,
        }
        current = pair.cdr();
    }
    match nums.as_slice() {
        [x, y, z] => Some(Vec3::new(*x, *y, *z)),
        _ => None,
    }
}

/// Format an event message.
pub fn format_event(event_type: &str, fields: &[(&str, &str)]) -> String {
    let mut s = format!("(:type :event :event :{}", event_type);
    for (key, val) in fields {
        s.push_str(&format!(" :{} {}", key, val));
    }
    s.push(')');
    s
}

pub fn bool_sexp(b: bool) -> &'static str {
    if b {
        "t"
    } else {
        "nil"
    }
}
