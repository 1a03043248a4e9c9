use crate::render::escape_xml;

/// Everything the page template needs besides the progress fragment.
/// Text fields are raw; escaping happens here.
pub struct Page<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub image_url: &'a str,
    pub base_path: &'a str,
    pub site_name: &'a str,
    pub fragment: &'a str,
}

pub fn render_page(page: &Page<'_>) -> String {
    let full_title = escape_xml(&format!("{} | {}", page.title, page.site_name));
    let base_tag = if page.base_path == "/" {
        String::new()
    } else {
        format!(r#"<base href="{}/" />"#, escape_xml(page.base_path))
    };
    let prefix = if page.base_path == "/" { "" } else { page.base_path };
    let description = escape_xml(page.description);
    let url = escape_xml(page.url);
    let image_url = escape_xml(page.image_url);
    let prefix = escape_xml(prefix);
    let site_name = escape_xml(page.site_name);

    fill(
        INDEX_HTML,
        &[
            ("BASE_TAG", base_tag.as_str()),
            ("TITLE", full_title.as_str()),
            ("DESCRIPTION", description.as_str()),
            ("URL", url.as_str()),
            ("IMAGE", image_url.as_str()),
            ("PREFIX", prefix.as_str()),
            ("SITE_NAME", site_name.as_str()),
            ("STYLES", STYLES),
            ("PROGRESS", page.fragment),
        ],
    )
}

/// Standalone 1200px document around the static fragment, used as a screenshot source.
pub fn render_image_page(fragment: &str) -> String {
    fill(IMAGE_HTML, &[("STYLES", STYLES), ("PROGRESS", fragment)])
}

/// Single pass over `{{KEY}}` placeholders, so substituted values are never rescanned.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = &after[..close];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 4]),
        }
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    out
}

const STYLES: &str = r#"
    @import url('https://fonts.googleapis.com/css2?family=Atkinson+Hyperlegible:wght@400;700&display=swap');

    :root {
      --bg: #fafafa;
      --ink: #212121;
      --muted: #757575;
      --accent: #1565C0;
      --track: #E0E0E0;
      --track-border: #BBDEFB;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Atkinson Hyperlegible", Arial, sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .progress-container {
      width: min(1080px, 100%);
      display: grid;
      gap: 24px;
    }

    .progress-title-wrapper {
      text-align: center;
    }

    .progress-title {
      margin: 0;
      color: var(--accent);
      font-size: clamp(1.8rem, 4vw, 2.25rem);
      font-weight: 700;
      outline: none;
      border-bottom: 2px dashed transparent;
    }

    .progress-title[contenteditable="true"]:hover,
    .progress-title[contenteditable="true"]:focus {
      border-bottom-color: var(--track-border);
    }

    .progress-status {
      margin: 0;
      text-align: center;
      color: var(--muted);
      font-size: 1.375rem;
    }

    .progress-bar-wrapper {
      padding: 12px 0;
    }

    .progress-bar {
      position: relative;
      height: 40px;
      background: var(--track);
      border: 2px solid var(--track-border);
      border-radius: 4px;
    }

    .progress-fill {
      position: absolute;
      inset: 0 auto 0 0;
      background: var(--accent);
      border-radius: 4px;
    }

    .progress-indicator {
      position: absolute;
      top: 0;
      bottom: 0;
      width: 4px;
      margin-left: -2px;
      background: var(--accent);
    }

    .progress-percentage {
      position: absolute;
      top: 50%;
      transform: translate(-50%, -50%);
      font-size: 18px;
      font-weight: 700;
      color: var(--ink);
      white-space: nowrap;
    }

    .progress-dates {
      display: grid;
      grid-template-columns: 1fr 1fr 1fr;
      font-size: 24px;
    }

    .progress-date-current {
      text-align: center;
      font-weight: 700;
    }

    .progress-date-end {
      text-align: right;
    }

    .date-input {
      display: none;
      font: inherit;
    }

    .date-display[role="button"] {
      cursor: pointer;
      border-bottom: 1px dotted var(--muted);
    }

    .progress-share {
      text-align: center;
    }

    .share-button {
      border: none;
      border-radius: 999px;
      padding: 10px 28px;
      background: var(--accent);
      color: #fff;
      font: inherit;
      cursor: pointer;
    }

    .share-button:focus-visible {
      outline: 3px solid var(--track-border);
      outline-offset: 2px;
    }

    .visually-hidden {
      position: absolute;
      width: 1px;
      height: 1px;
      overflow: hidden;
      clip: rect(0 0 0 0);
      white-space: nowrap;
    }

    @media (max-width: 600px) {
      .progress-dates {
        grid-template-columns: 1fr;
        gap: 8px;
        text-align: center;
        font-size: 18px;
      }
      .progress-date-end {
        text-align: center;
      }
    }
"#;

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  {{BASE_TAG}}
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <meta name="description" content="{{DESCRIPTION}}" />
  <meta property="og:type" content="website" />
  <meta property="og:title" content="{{TITLE}}" />
  <meta property="og:description" content="{{DESCRIPTION}}" />
  <meta property="og:url" content="{{URL}}" />
  <meta property="og:image" content="{{IMAGE}}" />
  <meta property="og:image:width" content="1200" />
  <meta property="og:image:height" content="630" />
  <meta name="twitter:card" content="summary_large_image" />
  <meta name="twitter:image" content="{{IMAGE}}" />
  <style>{{STYLES}}</style>
</head>
<body data-prefix="{{PREFIX}}" data-site-name="{{SITE_NAME}}">
  <main id="progress-container">{{PROGRESS}}</main>

  <script>
    const prefix = document.body.dataset.prefix;
    const siteName = document.body.dataset.siteName;
    const container = document.getElementById('progress-container');

    // Listeners bound to the current fragment; cleared before every re-render.
    const registry = {
      entries: [],
      register(target, type, handler) {
        target.addEventListener(type, handler);
        this.entries.push({ target, type, handler });
      },
      clear() {
        this.entries.forEach(({ target, type, handler }) => target.removeEventListener(type, handler));
        this.entries = [];
      }
    };

    const setTitle = (title) => {
      const full = `${title} | ${siteName}`;
      document.title = full;
      const ogTitle = document.querySelector('meta[property="og:title"]');
      if (ogTitle) {
        ogTitle.setAttribute('content', full);
      }
    };

    const show = (fragment) => {
      container.innerHTML = fragment;
      bind();
    };

    const applyEdit = async (changes) => {
      const res = await fetch(`${prefix}/api/edit`, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ path: window.location.pathname, ...changes })
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Update failed');
      }
      const body = await res.json();
      window.history.pushState({}, '', body.path);
      setTitle(body.title);
      show(body.fragment);
    };

    const reload = async () => {
      const res = await fetch(`${prefix}/api/fragment?path=${encodeURIComponent(window.location.pathname)}`);
      if (res.ok) {
        show(await res.text());
        const title = container.querySelector('.progress-title');
        if (title) {
          setTitle(title.textContent);
        }
      }
    };

    const share = async (button) => {
      const data = {
        title: document.title,
        text: button.dataset.shareText,
        url: window.location.href
      };
      try {
        if (navigator.share) {
          await navigator.share(data);
        } else if (navigator.clipboard) {
          await navigator.clipboard.writeText(data.url);
          button.textContent = 'Link copied';
        }
      } catch (err) {
        console.warn('share failed', err);
      }
    };

    const isEditing = () => {
      const active = document.activeElement;
      return active && (active.tagName === 'INPUT' || active.tagName === 'TEXTAREA' || active.isContentEditable);
    };

    const bind = () => {
      registry.clear();

      const title = container.querySelector('.progress-title');
      if (title) {
        const original = title.textContent;
        registry.register(title, 'blur', () => {
          const next = title.textContent.trim();
          if (next === '' || next === original) {
            title.textContent = original;
            return;
          }
          applyEdit({ title: next }).catch((err) => console.error(err));
        });
        registry.register(title, 'keydown', (event) => {
          if (event.key === 'Enter') {
            event.preventDefault();
            title.blur();
          } else if (event.key === 'Escape') {
            event.preventDefault();
            title.textContent = original;
            title.blur();
          }
        });
        registry.register(document, 'keydown', (event) => {
          if ((event.altKey || event.metaKey) && !event.ctrlKey && !event.shiftKey && event.key.toLowerCase() === 't') {
            if (isEditing()) {
              return;
            }
            event.preventDefault();
            title.focus();
          }
        });
      }

      container.querySelectorAll('.date-input').forEach((input) => {
        const kind = input.dataset.dateType;
        const display = container.querySelector(`.date-display[data-date-type="${kind}"]`);
        if (!display) {
          return;
        }
        const open = () => {
          input.style.display = 'inline-block';
          display.style.display = 'none';
          input.focus();
          if (input.showPicker) {
            input.showPicker();
          }
        };
        registry.register(display, 'click', open);
        registry.register(display, 'keydown', (event) => {
          if (event.key === 'Enter' || event.key === ' ') {
            event.preventDefault();
            open();
          }
        });
        registry.register(input, 'change', () => {
          if (input.value) {
            applyEdit({ [kind]: input.value }).catch((err) => console.error(err));
          }
        });
        registry.register(input, 'blur', () => {
          input.style.display = 'none';
          display.style.display = 'inline';
        });
      });

      const shareButton = container.querySelector('.share-button');
      if (shareButton) {
        registry.register(shareButton, 'click', () => share(shareButton));
      }
    };

    window.addEventListener('popstate', () => {
      reload().catch((err) => console.error(err));
    });

    bind();
  </script>
</body>
</html>
"##;

const IMAGE_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <style>{{STYLES}}</style>
</head>
<body>
  <div style="width: 1200px; padding: 40px; background: #fafafa;">{{PROGRESS}}</div>
</body>
</html>
"##;
