// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-page HTML report of demo sections.

use std::fmt::Write as _;

#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: &'static str,
    pub(crate) description: &'static str,
    /// Inline markup, usually one or more `<svg>` snapshots.
    pub(crate) body: String,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_xml(title));
    out.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 2rem; color: #141619; }\n\
         section { margin-bottom: 2.5rem; }\n\
         .frames { display: flex; flex-wrap: wrap; gap: 1.5rem; align-items: flex-end; }\n\
         .frames figure { margin: 0; text-align: center; }\n\
         .frames figcaption { font-size: 0.75rem; color: #6b7280; }\n\
         </style>\n</head>\n<body>\n",
    );
    let _ = writeln!(out, "<h1>{}</h1>", escape_xml(title));
    for section in sections {
        out.push_str("<section>\n");
        let _ = writeln!(out, "<h2>{}</h2>", escape_xml(section.title));
        let _ = writeln!(out, "<p>{}</p>", escape_xml(section.description));
        out.push_str("<div class=\"frames\">\n");
        out.push_str(&section.body);
        out.push_str("</div>\n</section>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

/// Wraps one snapshot with a caption.
pub(crate) fn figure(caption: &str, markup: &str) -> String {
    format!(
        "<figure>\n{markup}<figcaption>{}</figcaption>\n</figure>\n",
        escape_xml(caption)
    )
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
