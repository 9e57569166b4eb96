use serde_json::Value;

/// Shortest decimal form: whole numbers print without a fraction (`120`, not `120.0`).
pub fn fmt_number(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    if v.fract() == 0.0 && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    format!("{v}")
}

/// Stringifies an element attribute for modifier lookup and for scalar input fields.
///
/// - strings are returned verbatim
/// - booleans map to `1`/`0`, the spelling draw.io styles use (not `true`/`True`)
/// - integers print in decimal; floats use [`fmt_number`], so `2.0` becomes `2`
/// - `null`, arrays and objects print as their JSON text
pub fn attribute_value_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => match n.as_u64() {
                Some(u) => u.to_string(),
                None => n.as_f64().map(fmt_number).unwrap_or_else(|| n.to_string()),
            },
        },
        other => other.to_string(),
    }
}

pub(crate) fn escape_xml_into(out: &mut String, text: &str) {
    let mut start = 0usize;
    for (i, ch) in text.char_indices() {
        let esc = match ch {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' => "&quot;",
            '\n' => "&#10;",
            '\r' => "&#13;",
            '\t' => "&#9;",
            _ => continue,
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + ch.len_utf8();
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}
