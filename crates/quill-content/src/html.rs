//! HTML backend for render trees.
//!
//! Produces HTML5 with stable class hooks for the site stylesheet and the
//! client-side highlighter.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::node::{Attributes, EXTERNAL_REL, EXTERNAL_TARGET};
use crate::util::escape_html;

/// HTML render backend.
///
/// Produces:
/// - `<div class="code-block">` with language badge, copy button and
///   `<pre><code class="language-…">`
/// - `<figure>` with `<figcaption>` for captioned images
/// - `target="_blank" rel="noopener noreferrer"` on external links
/// - `id` and a trailing `#` self-link on headings
/// - `<div class="table-scroll">` around tables
/// - `data-index` and `row-even`/`row-odd` classes on table rows
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(language: &str, code: &str, out: &mut String) {
        let lang = escape_html(language);
        let code = escape_html(code);
        write!(
            out,
            r#"<div class="code-block" data-language="{lang}"><span class="code-block-language">{lang}</span><button type="button" class="code-block-copy" data-code="{code}">Copy</button><pre><code class="language-{lang}">{code}</code></pre></div>"#
        )
        .unwrap();
    }

    fn figure(image: &Attributes, caption: Option<&str>, out: &mut String) {
        out.push_str("<figure><img");
        write_attrs(image, out);
        out.push('>');
        if let Some(caption) = caption {
            write!(out, "<figcaption>{}</figcaption>", escape_html(caption)).unwrap();
        }
        out.push_str("</figure>");
    }

    fn link_start(attrs: &Attributes, external: bool, out: &mut String) {
        out.push_str("<a");
        if external {
            let mut attrs = attrs.clone();
            attrs.insert("target", EXTERNAL_TARGET);
            attrs.insert("rel", EXTERNAL_REL);
            write_attrs(&attrs, out);
        } else {
            write_attrs(attrs, out);
        }
        out.push('>');
    }

    fn heading_start(level: u8, id: &str, attrs: &Attributes, out: &mut String) {
        let mut attrs = attrs.clone();
        attrs.insert("id", id);
        write!(out, "<h{level}").unwrap();
        write_attrs(&attrs, out);
        out.push('>');
    }

    fn heading_end(level: u8, id: &str, out: &mut String) {
        write!(
            out,
            r##"<a class="heading-anchor" href="#{}">#</a></h{level}>"##,
            escape_html(id)
        )
        .unwrap();
    }

    fn table_start(attrs: &Attributes, out: &mut String) {
        out.push_str(r#"<div class="table-scroll"><table"#);
        write_attrs(attrs, out);
        out.push('>');
    }

    fn table_end(out: &mut String) {
        out.push_str("</table></div>");
    }

    fn row_start(index: usize, attrs: &Attributes, out: &mut String) {
        let stripe = if index % 2 == 0 { "row-even" } else { "row-odd" };
        let mut attrs = attrs.clone();
        let class = match attrs.get("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {stripe}", existing.trim()),
            _ => stripe.to_owned(),
        };
        attrs.insert("class", class);
        attrs.insert("data-index", index.to_string());
        out.push_str("<tr");
        write_attrs(&attrs, out);
        out.push('>');
    }
}

/// Write attributes as ` name="value"` pairs.
///
/// Names that would break out of the tag are skipped.
pub(crate) fn write_attrs(attrs: &Attributes, out: &mut String) {
    for (name, value) in attrs.iter().filter(|(name, _)| is_valid_attr_name(name)) {
        write!(out, r#" {name}="{}""#, escape_html(value)).unwrap();
    }
}

fn is_valid_attr_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '<' | '/' | '=')
        })
}
