use crate::output::Digest;

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Strip a leading bullet marker ("-", "*", "•" or "1.") from a line.
fn bullet_text(line: &str) -> Option<&str> {
    for marker in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest.trim());
        }
    }

    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return Some(rest.trim());
        }
    }

    None
}

fn render_body(summary: &str) -> String {
    let mut body = String::new();
    let mut in_list = false;

    for line in summary.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match bullet_text(line) {
            Some(item) => {
                if !in_list {
                    body.push_str("<ul>\n");
                    in_list = true;
                }
                body.push_str(&format!("  <li>{}</li>\n", escape_html(item)));
            }
            None => {
                if in_list {
                    body.push_str("</ul>\n");
                    in_list = false;
                }
                body.push_str(&format!("<p>{}</p>\n", escape_html(line)));
            }
        }
    }

    if in_list {
        body.push_str("</ul>\n");
    }

    body
}

/// Render a digest as a standalone HTML page.
pub fn render_html(digest: &Digest) -> String {
    let video_id = escape_html(&digest.video_id);
    let language = escape_html(&digest.summary_language);

    format!(
        "<!DOCTYPE html>\n\
<html>\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<title>Summary of {video_id}</title>\n\
</head>\n\
<body>\n\
<h1>Summary of <a href=\"https://www.youtube.com/watch?v={video_id}\">{video_id}</a></h1>\n\
{body}\
<footer>{language} summary of {chunks} transcript chunks, generated {generated}</footer>\n\
</body>\n\
</html>\n",
        body = render_body(&digest.summary),
        chunks = digest.chunk_count,
        generated = digest.generated_at.format("%Y-%m-%d %H:%M"),
    )
}
