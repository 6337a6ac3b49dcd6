//! Page assembly: markdown document + HTML template → finished page.

use anyhow::{Context, Result};

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Render `markdown` into `template`.
///
/// The first `# ` heading becomes the title. Root-relative `href`/`src`
/// attributes are rewritten under `base_path`.
pub fn render_page(markdown: &str, template: &str, base_path: &str) -> Result<String> {
    let title = md_html::extract_title(markdown)?;
    let content = md_html::markdown_to_html_node(markdown)?
        .to_html()
        .context("Failed to serialize HTML")?;

    let page = fill_template(template, &title, &content);
    Ok(apply_base_path(&page, base_path))
}

/// Substitute the title and content placeholders.
pub fn fill_template(template: &str, title: &str, content: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content)
}

/// Prefix root-relative links and sources with `base_path`.
///
/// A base path of `/` leaves the page unchanged.
pub fn apply_base_path(html: &str, base_path: &str) -> String {
    let base = normalise_base_path(base_path);
    if base == "/" {
        return html.to_string();
    }
    html.replace("href=\"/", &format!("href=\"{base}"))
        .replace("src=\"/", &format!("src=\"{base}"))
}

/// Ensure the base path starts and ends with `/`.
fn normalise_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}
