//! HTML page assembly
//!
//! Small hand-rolled rendering helpers; every piece of user-provided text
//! goes through [`escape`] before it reaches a page.

/// Stylesheet served inline with every page.
const STYLE: &str = include_str!("ui/style.css");

/// Escape text for embedding in HTML element or attribute content.
pub fn escape(text: &str) -> String {
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

/// Wrap body markup in the standard page skeleton.
pub fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <title>pairrank</title>\n\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1.0\">\n\
         <meta charset=\"utf-8\">\n\
         <style>{STYLE}</style>\n\
         </head>\n\
         <body>\n{body}\n</body>\n\
         </html>\n"
    )
}

/// One `<li>` link item.
pub fn link_item(href: &str, label: &str, suffix: &str) -> String {
    format!(
        "<li><a href=\"{}\">{}</a>{}</li>",
        escape(href),
        escape(label),
        suffix
    )
}

/// Hidden form input.
pub fn hidden(name: &str, value: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
        escape(name),
        escape(value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_covers_html_metacharacters() {
        assert_eq!(
            escape("<b>&\"fish\"'s</b>"),
            "&lt;b&gt;&amp;&quot;fish&quot;&#39;s&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_page_embeds_body_and_style() {
        let html = page("<h1>hi</h1>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>hi</h1>"));
        assert!(html.contains("<style>"));
    }
}
