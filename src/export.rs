/// Static HTML export of the current gallery view
///
/// Produces a standalone page with the same three states as the window:
/// card grid, "no results" and "no data". Every string that comes from
/// the feed or the search box goes through `escape_html` before it lands
/// in the markup, attributes included.
use chrono::{DateTime, Local};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use url::Url;

use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};
use crate::state::data::GallerySnapshot;
use crate::state::search::{DisplayState, SearchResults};
use crate::ui::thumbnail::ThumbCache;

const STYLE: &str = "body{font-family:sans-serif;background:#1e1e24;color:#eee;margin:0;padding:24px}\
.grid{display:flex;flex-wrap:wrap;gap:16px}\
.prompt-card{background:#2a2a33;border-radius:8px;padding:12px;width:320px}\
.thumbnail{margin:0 auto;overflow:hidden}.thumbnail img{width:100%;height:100%;object-fit:contain}\
.prompt-title{font-size:18px;margin:8px 0}.prompt-text{white-space:pre-wrap;font-size:14px}\
.empty-state{text-align:center;margin-top:80px}.empty-state-icon{font-size:56px}\
.cms-link{color:#8ab4f8}";

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `src` for an image: a file:// URL when the path is absolute, so the page
/// works wherever it is saved
fn image_src(path: &Path) -> String {
    Url::from_file_path(path)
        .map(String::from)
        .unwrap_or_else(|_| path.to_string_lossy().into_owned())
}

/// Everything the page needs, borrowed from the running gallery
pub struct ExportView<'a> {
    pub display: DisplayState<'a>,
    pub snapshot: &'a GallerySnapshot,
    pub results: &'a SearchResults,
    pub thumbs: &'a ThumbCache,
    pub config: &'a GalleryConfig,
    pub indicator: Option<String>,
}

/// Render the page as a string
pub fn render_page(view: &ExportView<'_>, generated_at: DateTime<Local>) -> String {
    let mut html = String::new();

    // Writing into a String cannot fail
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"id\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Prompt Gallery</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header><h1>Prompt Gallery</h1><p class=\"generated\">{}</p>",
        escape_html(&generated_at.format("%Y-%m-%d %H:%M:%S").to_string()),
    );
    if let Some(indicator) = &view.indicator {
        let _ = write!(html, "<p class=\"search-info\">{}</p>", escape_html(indicator));
    }
    html.push_str("</header>\n");

    match view.display {
        DisplayState::Grid => {
            html.push_str("<main class=\"grid\">\n");
            for &index in view.results.indices() {
                let Some(item) = view.snapshot.get(index) else {
                    continue;
                };
                let size = view.thumbs.size_for(&item.image);
                let src = view.config.image_path(&item.image);
                let _ = write!(
                    html,
                    "<div class=\"prompt-card\">\
                     <div class=\"thumbnail\" style=\"width: {}px; height: {}px;\">\
                     <img src=\"{}\" alt=\"{}\" loading=\"lazy\"></div>\
                     <div class=\"prompt-title\">{}</div>\
                     <div class=\"prompt-text\">{}</div></div>\n",
                    size.width,
                    size.height,
                    escape_html(&image_src(&src)),
                    escape_html(&item.title),
                    escape_html(&item.title),
                    escape_html(&item.prompt),
                );
            }
            html.push_str("</main>\n");
        }
        DisplayState::NoResults { query } => {
            let _ = write!(
                html,
                "<div class=\"empty-state\"><div class=\"empty-state-icon\">🔍</div>\
                 <h2>Tidak Ditemukan</h2>\
                 <p>Tidak ada prompt yang cocok dengan pencarian \"{}\"</p></div>\n",
                escape_html(query),
            );
        }
        DisplayState::NoData => {
            let _ = write!(
                html,
                "<div class=\"empty-state\"><div class=\"empty-state-icon\">🎨</div>\
                 <h2>Belum Ada Prompt</h2>\
                 <p>Mulai tambahkan prompt pertama Anda melalui CMS</p>\
                 <a href=\"{}\" class=\"cms-link\">➕ Buka Chapteria</a></div>\n",
                escape_html(&view.config.cms_url),
            );
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Write a rendered page to disk
pub async fn write_page(path: PathBuf, html: String) -> Result<PathBuf> {
    tokio::fs::write(&path, html)
        .await
        .map_err(|source| GalleryError::Io {
            path: path.clone(),
            source,
        })?;
    info!("💾 Exported gallery to {}", path.display());
    Ok(path)
}
