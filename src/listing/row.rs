use maud::{Markup, html};

use super::classify::DirEntry;
use super::format::{permissions_string, size_string};
use super::path_utils::encode_path_segment;
use super::styles::{DEFAULT_ICON, DIRECTORY_ICON, icon_class_for};

/// Per-request inputs shared by every row of a listing.
#[derive(Debug, Clone, Copy)]
pub struct RowOptions<'a> {
    /// Request path as received, still percent-encoded.
    pub request_path: &'a str,
    /// Query string without the leading `?`.
    pub query: Option<&'a str>,
    pub hide_permissions: bool,
    pub human_readable: bool,
    pub si: bool,
}

/// Link to `name` inside the directory at `request_path`.
pub fn entry_href(request_path: &str, name: &str) -> String {
    let base = request_path.strip_suffix('/').unwrap_or(request_path);
    format!("{base}/{}", encode_path_segment(name))
}

/// Directory links end in `/` and carry the current query along.
fn row_href(entry: &DirEntry, opts: &RowOptions<'_>) -> String {
    let mut href = entry_href(opts.request_path, &entry.name);
    if entry.is_dir() {
        href.push('/');
        if let Some(query) = opts.query.filter(|q| !q.is_empty()) {
            href.push('?');
            href.push_str(query);
        }
    }
    href
}

fn icon_class(entry: &DirEntry) -> &'static str {
    if entry.is_dir() {
        return DIRECTORY_ICON;
    }
    let extension = entry.name.rsplit('.').next().unwrap_or(&entry.name);
    icon_class_for(extension).unwrap_or(DEFAULT_ICON)
}

/// One `<tr>` of the listing table.
pub fn render_row(entry: &DirEntry, opts: &RowOptions<'_>) -> Markup {
    let is_dir = entry.is_dir();
    let stat = entry.stat.as_ref();
    let row_class = stat.is_none().then_some("unknown");

    html! {
        tr class=[row_class] {
            td { i class={ "icon " (icon_class(entry)) } {} }
            @if !opts.hide_permissions {
                td class="perms" { code { "(" (permissions_string(stat)) ")" } }
            }
            td class="file-size" { code { (size_string(stat, opts.human_readable, opts.si)) } }
            td class="display-name" {
                a href=(row_href(entry, opts)) {
                    (entry.name)
                    @if is_dir { "/" }
                }
            }
        }
    }
}
