//! Minimal HTML assembly shared by the document renderers.

/// Escapes text for element content and double-quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes, then turns newlines into `<br>`.
pub fn escape_lines(text: &str) -> String {
    text.lines().map(escape).collect::<Vec<_>>().join("<br>")
}

/// Wraps a rendered body into a standalone printable document.
pub fn document(title: &str, css: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        css,
        body
    )
}

/// `<div class="{class}">{escaped text}</div>`
pub fn div(class: &str, text: &str) -> String {
    format!("<div class=\"{class}\">{}</div>", escape(text))
}

/// A label/value pair as used throughout the forms.
pub fn field(label: &str, value: &str) -> String {
    format!(
        "<div class=\"field\"><div class=\"field-label\">{}</div><div class=\"field-value\">{}</div></div>",
        escape(label),
        escape(value)
    )
}

/// One `<tr>` of escaped `<td>` cells.
pub fn row<S: AsRef<str>>(cells: &[S]) -> String {
    let mut out = String::from("<tr>");
    for cell in cells {
        out.push_str("<td>");
        out.push_str(&escape(cell.as_ref()));
        out.push_str("</td>");
    }
    out.push_str("</tr>");
    out
}
