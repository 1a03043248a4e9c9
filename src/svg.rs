use crate::clock::Clock;
use crate::models::ProgressData;
use crate::path_state::progress_bar_data;
use crate::render::{escape_xml, format_date_long, to_fixed};
use crate::status::status_text;

const WIDTH: i32 = 1200;
const HEIGHT: i32 = 630;
const PADDING: i32 = 60;
const BAR_HEIGHT: i32 = 40;
const BAR_WIDTH: i32 = WIDTH - PADDING * 2;

const BACKGROUND: &str = "#fafafa";
const ACCENT: &str = "#1565C0";
const TRACK: &str = "#E0E0E0";
const TRACK_BORDER: &str = "#BBDEFB";
const TEXT: &str = "#212121";
const MUTED: &str = "#757575";

const FONT: &str = "Atkinson Hyperlegible, Arial, sans-serif";

/// Open Graph image for an application path; accepts the same paths as the page.
pub fn progress_bar_svg<C: Clock + ?Sized>(path: &str, clock: &C) -> String {
    render_progress_bar_svg(&progress_bar_data(path, clock))
}

pub fn render_progress_bar_svg(data: &ProgressData) -> String {
    let bar_y = HEIGHT / 2 - 20;
    let date_y = bar_y + BAR_HEIGHT + 50;
    let title_y = bar_y - 80;
    let status_y = bar_y - 30;
    let center = WIDTH / 2;

    let mut svg = open_canvas();

    svg.push_str(&format!(
        r#"<text x="{center}" y="{title_y}" text-anchor="middle" font-family="{FONT}" font-size="36" font-weight="bold" fill="{ACCENT}">{}</text>"#,
        escape_xml(&data.title)
    ));
    svg.push_str(&format!(
        r#"<text x="{center}" y="{status_y}" text-anchor="middle" font-family="{FONT}" font-size="22" fill="{MUTED}">{}</text>"#,
        escape_xml(&status_text(data))
    ));

    svg.push_str(&track(bar_y));

    if let Some(percentage) = data.percentage {
        let fill_width = f64::from(BAR_WIDTH) * percentage / 100.0;
        let indicator_x = f64::from(PADDING) + fill_width;
        let label_y = bar_y + BAR_HEIGHT / 2;
        let label = to_fixed(percentage, 2);

        svg.push_str(&format!(
            r#"<rect x="{PADDING}" y="{bar_y}" width="{fill_width}" height="{BAR_HEIGHT}" fill="{ACCENT}" rx="4"/>"#
        ));
        svg.push_str(&format!(
            r#"<line x1="{indicator_x}" y1="{bar_y}" x2="{indicator_x}" y2="{}" stroke="{ACCENT}" stroke-width="4"/>"#,
            bar_y + BAR_HEIGHT
        ));
        svg.push_str(&format!(
            r#"<text x="{indicator_x}" y="{label_y}" text-anchor="middle" dominant-baseline="middle" font-family="{FONT}" font-size="18" font-weight="bold" fill="{TEXT}"><tspan x="{indicator_x}" dy="0">{label}%</tspan></text>"#
        ));
    }

    svg.push_str(&format!(
        r#"<text x="{PADDING}" y="{date_y}" font-family="{FONT}" font-size="24" fill="{TEXT}">{}</text>"#,
        format_date_long(data.start)
    ));
    if data.percentage.is_some() {
        svg.push_str(&format!(
            r#"<text x="{center}" y="{date_y}" text-anchor="middle" font-family="{FONT}" font-size="24" font-weight="bold" fill="{TEXT}">{}</text>"#,
            format_date_long(data.current)
        ));
    }
    svg.push_str(&format!(
        r#"<text x="{}" y="{date_y}" text-anchor="end" font-family="{FONT}" font-size="24" fill="{TEXT}">{}</text>"#,
        WIDTH - PADDING,
        format_date_long(data.end)
    ));

    svg.push_str("</svg>");
    svg
}

/// Placeholder card with a title, an empty track and a footer line.
pub fn fallback_svg(title: &str, footer: &str) -> String {
    let bar_y = HEIGHT / 2 - 40;
    let date_y = bar_y + BAR_HEIGHT + 50;
    let title_y = bar_y - 50;
    let center = WIDTH / 2;

    let mut svg = open_canvas();
    svg.push_str(&format!(
        r#"<text x="{center}" y="{title_y}" text-anchor="middle" font-family="{FONT}" font-size="36" font-weight="bold" fill="{ACCENT}">{}</text>"#,
        escape_xml(title)
    ));
    svg.push_str(&track(bar_y));
    svg.push_str(&format!(
        r#"<text x="{center}" y="{}" text-anchor="middle" font-family="{FONT}" font-size="24" fill="{TEXT}">{}</text>"#,
        date_y + 30,
        escape_xml(footer)
    ));
    svg.push_str("</svg>");
    svg
}

fn open_canvas() -> String {
    format!(
        r#"<svg width="{WIDTH}" height="{HEIGHT}" xmlns="http://www.w3.org/2000/svg"><rect width="{WIDTH}" height="{HEIGHT}" fill="{BACKGROUND}"/>"#
    )
}

fn track(bar_y: i32) -> String {
    format!(
        r#"<rect x="{PADDING}" y="{bar_y}" width="{BAR_WIDTH}" height="{BAR_HEIGHT}" fill="{TRACK}" stroke="{TRACK_BORDER}" stroke-width="2" rx="4"/>"#
    )
}
