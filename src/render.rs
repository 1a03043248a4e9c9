//! HTML fragments for the progress bar.
//!
//! The interactive variant is what the page shows; the image variant drops
//! every editing and sharing affordance so screenshots match the live page.

use crate::models::ProgressData;
use crate::path_state::format_date;
use crate::status::{share_text, status_text};
use chrono::{DateTime, Utc};

/// Escapes `& < > " '` for HTML and SVG text or attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Fixed-point formatting that rounds exact ties up, so `0.125` becomes `0.13`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits as i32);
    format!("{:.*}", digits, (value * scale).round() / scale)
}

/// `Monday, 1 January 2024`
pub fn format_date_long(date: DateTime<Utc>) -> String {
    date.format("%A, %-d %B %Y").to_string()
}

pub fn render_progress_bar(data: &ProgressData) -> String {
    render_container(data, true)
}

pub fn render_progress_bar_for_image(data: &ProgressData) -> String {
    render_container(data, false)
}

fn render_container(data: &ProgressData, interactive: bool) -> String {
    let mut html = String::from(r#"<div class="progress-container">"#);

    html.push_str(r#"<div class="progress-title-wrapper">"#);
    if interactive {
        html.push_str(&format!(
            r#"<h2 class="progress-title" contenteditable="true" role="textbox" aria-label="Progress title (Alt+T to edit)" tabindex="0" title="Alt+T to edit">{}</h2>"#,
            escape_xml(&data.title)
        ));
    } else {
        html.push_str(&format!(
            r#"<h2 class="progress-title">{}</h2>"#,
            escape_xml(&data.title)
        ));
    }
    html.push_str("</div>");

    html.push_str(&format!(
        r#"<p class="progress-status">{}</p>"#,
        escape_xml(&status_text(data))
    ));

    html.push_str(r#"<div class="progress-bar-wrapper">"#);
    html.push_str(r#"<div class="progress-bar">"#);
    if let Some(percentage) = data.percentage {
        html.push_str(&format!(
            r#"<div class="progress-fill" style="width: {percentage}%"></div>"#
        ));
        html.push_str(&format!(
            r#"<div class="progress-percentage" style="left: {percentage}%">{}%</div>"#,
            to_fixed(percentage, 2)
        ));
        html.push_str(&format!(
            r#"<div class="progress-indicator" style="left: {percentage}%"></div>"#
        ));
    }
    html.push_str("</div>");
    html.push_str("</div>");

    html.push_str(r#"<div class="progress-dates">"#);
    html.push_str(&render_date(data.start, "start", data, interactive));
    html.push_str(&format!(
        r#"<div class="progress-date-current">{}</div>"#,
        format_date_long(data.current)
    ));
    html.push_str(&render_date(data.end, "end", data, interactive));
    html.push_str("</div>");

    if interactive {
        html.push_str(r#"<div class="progress-share">"#);
        html.push_str(&format!(
            r#"<button type="button" class="share-button" data-share="true" data-share-text="{}" aria-label="Share progress">Share</button>"#,
            escape_xml(&share_text(data))
        ));
        html.push_str("</div>");
    }

    html.push_str("</div>");
    html
}

fn render_date(date: DateTime<Utc>, kind: &str, data: &ProgressData, interactive: bool) -> String {
    let formatted = format_date_long(date);
    if !interactive {
        return format!(
            r#"<div class="progress-date-{kind}"><span class="date-display">{formatted}</span></div>"#
        );
    }

    let (label, key) = match kind {
        "start" => ("Start date", "s"),
        _ => ("End date", "d"),
    };
    // The start picker stays in the past, matching how ranges are usually entered.
    let max = if kind == "start" {
        format!(r#" max="{}""#, format_date(data.current))
    } else {
        String::new()
    };

    format!(
        concat!(
            r#"<div class="progress-date-{kind}">"#,
            r#"<label for="{kind}-date-input" class="visually-hidden">{label}</label>"#,
            r#"<input type="date" id="{kind}-date-input" class="date-input" name="{kind}" value="{value}"{max} aria-label="{label} (Alt+{upper} to edit)" data-date-type="{kind}" accesskey="{key}" />"#,
            r#"<span class="date-display" tabindex="0" role="button" data-date-type="{kind}" aria-label="{label} (Alt+{upper} to edit)" title="Alt+{upper} to edit">{formatted}</span>"#,
            "</div>"
        ),
        kind = kind,
        label = label,
        value = format_date(date),
        max = max,
        key = key,
        upper = key.to_uppercase(),
        formatted = formatted,
    )
}
