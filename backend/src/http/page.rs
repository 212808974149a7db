//! Server-rendered form page.
//!
//! Markup is assembled through [`Markup`]: literal markup can only be a
//! `&'static str`, and every dynamic string goes through an escaping method.

use crate::models::{Axis, Eye};
use crate::services::form::FormState;
use crate::services::options::{cylinder_options, sphere_options};
use crate::services::overlay::{self, Block, OverlayTopic};

const PAGE_TITLE: &str = "裸眼視力の目安計算";

/// Append `text` to `out` with HTML special characters escaped.
pub fn escape_into(out: &mut String, text: &str) {
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
}

/// HTML buffer.
#[derive(Debug, Default)]
pub struct Markup {
    buf: String,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Literal markup.
    pub fn raw(&mut self, markup: &'static str) -> &mut Self {
        self.buf.push_str(markup);
        self
    }

    /// Escaped text content.
    pub fn text(&mut self, text: &str) -> &mut Self {
        escape_into(&mut self.buf, text);
        self
    }

    /// ` name="value"` with the value escaped.
    pub fn attr(&mut self, name: &'static str, value: &str) -> &mut Self {
        self.buf.push(' ');
        self.buf.push_str(name);
        self.buf.push_str("=\"");
        escape_into(&mut self.buf, value);
        self.buf.push('"');
        self
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Id of the page form; buttons outside it submit it through `form=`.
const FORM_ID: &str = "estimator";

/// Submit button that reposts every field and opens `topic`.
fn info_button(m: &mut Markup, topic: OverlayTopic, label: &str) {
    m.raw(" <button type=\"submit\" class=\"info\" name=\"info\"")
        .attr("form", FORM_ID)
        .attr("value", topic.slug())
        .raw(">")
        .text(label)
        .raw("</button>");
}

/// Fields of the last submit, so overlay navigation can rebuild the result.
fn submitted_fields(m: &mut Markup, state: &FormState) {
    let Some(submitted) = state.submitted_inputs() else {
        return;
    };
    for (name, value) in [
        ("prev_rs", &submitted.rs),
        ("prev_rc", &submitted.rc),
        ("prev_ls", &submitted.ls),
        ("prev_lc", &submitted.lc),
    ] {
        m.raw("<input type=\"hidden\"")
            .attr("name", name)
            .attr("value", value)
            .raw(">");
    }
    m.raw("\n");
}

fn eye_fields(m: &mut Markup, state: &FormState, eye: Eye) {
    let input = state.input(eye);
    let (sphere_name, cylinder_name, axis_name) = match eye {
        Eye::Right => ("rs", "rc", "ra"),
        Eye::Left => ("ls", "lc", "la"),
    };

    m.raw("<section class=\"eye\"><h2>").text(eye.label()).raw("</h2>\n");

    m.raw("<label>球面度数（S） <input list=\"sphere-options\"")
        .attr("name", sphere_name)
        .attr("value", &input.sphere)
        .raw("></label>");
    info_button(m, OverlayTopic::Sphere, "?");
    m.raw("<br>\n");

    m.raw("<label>乱視度数（C） <input list=\"cylinder-options\"")
        .attr("name", cylinder_name)
        .attr("value", &input.cylinder)
        .raw("></label>");
    info_button(m, OverlayTopic::Cylinder, "?");
    m.raw("<br>\n");

    m.raw("<label>乱視軸（AX） <select").attr("name", axis_name).raw(">");
    for axis in Axis::ALL {
        m.raw("<option").attr("value", &axis.to_string());
        if axis == input.axis {
            m.raw(" selected");
        }
        m.raw(">").text(&axis.to_string()).raw("</option>");
    }
    m.raw("</select></label>");
    info_button(m, OverlayTopic::Axis, "?");
    m.raw("\n</section>\n");
}

fn datalist(m: &mut Markup, id: &'static str, values: &[String]) {
    m.raw("<datalist").attr("id", id).raw(">");
    for value in values {
        m.raw("<option").attr("value", value).raw(">");
    }
    m.raw("</datalist>\n");
}

fn render_block(m: &mut Markup, block: &Block) {
    match block {
        Block::Paragraph { text } => {
            m.raw("<p>").text(text).raw("</p>\n");
        }
        Block::BulletList { items } => {
            m.raw("<ul>");
            for item in items {
                m.raw("<li>").text(item).raw("</li>");
            }
            m.raw("</ul>\n");
        }
        Block::Table { header, rows } => {
            m.raw("<table><thead><tr>");
            for cell in header {
                m.raw("<th>").text(cell).raw("</th>");
            }
            m.raw("</tr></thead><tbody>");
            for row in rows {
                m.raw("<tr>");
                for cell in row {
                    m.raw("<td>").text(cell).raw("</td>");
                }
                m.raw("</tr>");
            }
            m.raw("</tbody></table>\n");
        }
    }
}

fn render_overlay(m: &mut Markup, topic: OverlayTopic) {
    let content = overlay::content(topic);
    m.raw("<div class=\"overlay\" role=\"dialog\" aria-modal=\"true\"><h3>")
        .text(&content.title)
        .raw("</h3>\n");
    for block in &content.blocks {
        render_block(m, block);
    }
    m.raw("<button type=\"submit\" class=\"close\" name=\"action\" value=\"close\"")
        .attr("form", FORM_ID)
        .raw(">閉じる</button></div>\n");
}

/// Full HTML document for a form snapshot.
pub fn render_page(state: &FormState) -> String {
    let mut m = Markup::new();
    m.raw("<!DOCTYPE html>\n<html lang=\"ja\"><head><meta charset=\"utf-8\"><title>")
        .text(PAGE_TITLE)
        .raw("</title></head>\n<body><main>\n<h1>")
        .text(PAGE_TITLE)
        .raw("</h1>\n<form method=\"post\" action=\"/\"")
        .attr("id", FORM_ID)
        .raw(">\n");
    // First submit button in tree order, so Enter computes.
    m.raw("<button type=\"submit\" name=\"action\" value=\"submit\" hidden tabindex=\"-1\"></button>\n");
    submitted_fields(&mut m, state);
    for eye in Eye::BOTH {
        eye_fields(&mut m, state, eye);
    }
    datalist(&mut m, "sphere-options", &sphere_options());
    datalist(&mut m, "cylinder-options", &cylinder_options());
    m.raw("<button type=\"submit\" name=\"action\" value=\"submit\">計算する</button>\n</form>\n");

    if let Some(result) = state.result_text() {
        m.raw("<section id=\"result\"><pre>").text(&result).raw("</pre>");
        info_button(&mut m, OverlayTopic::Result, "早見表");
        if let Some(link) = state.share_link() {
            m.raw("\n<p>共有リンク: <a id=\"share-link\"")
                .attr("href", link.as_str())
                .raw(">")
                .text(link.as_str())
                .raw("</a></p>");
        }
        m.raw("</section>\n");
    }

    if let Some(topic) = state.overlay() {
        render_overlay(&mut m, topic);
    }

    m.raw("</main></body></html>\n");
    m.into_string()
}
