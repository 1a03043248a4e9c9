use crate::render::escape_xml;
use chrono::NaiveDate;

pub fn render_sitemap(origin: &str, prefix: &str, today: NaiveDate) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>{}/</loc>
    <lastmod>{}</lastmod>
    <changefreq>daily</changefreq>
    <priority>1.0</priority>
  </url>
</urlset>"#,
        escape_xml(&format!("{origin}{prefix}")),
        today.format("%Y-%m-%d")
    )
}
