use std::sync::LazyLock;

use maud::{DOCTYPE, PreEscaped, html};
use regex::Regex;

use super::classify::{DirEntry, EntryBuckets};
use super::row::{RowOptions, entry_href, render_row};
use super::styles::{LISTING_CSS, PREVIEW_CSS, PREVIEW_JS};

static IMAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(png|jpe?g|gif|svg|bmp)(\?.*)?$").expect("image pattern is valid")
});

/// Everything the page needs besides the entries themselves.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Decoded request path, shown in the title and heading.
    pub display_path: &'a str,
    /// `Host` request header, shown in the footer.
    pub host: Option<&'a str>,
    pub row: RowOptions<'a>,
}

pub fn is_image_name(name: &str) -> bool {
    IMAGE_NAME.is_match(name)
}

/// Links to every image among `files`, in display order.
pub fn image_hrefs(files: &[DirEntry], request_path: &str) -> Vec<String> {
    files
        .iter()
        .filter(|entry| is_image_name(&entry.name))
        .map(|entry| entry_href(request_path, &entry.name))
        .collect()
}

/// Render the complete listing document.
///
/// Rows come out as directories, then files, then failed entries, each in
/// the order given; callers sort the buckets first.
pub fn render_page(buckets: &EntryBuckets, ctx: &PageContext<'_>) -> String {
    let images = image_hrefs(&buckets.files, ctx.row.request_path);
    let host = ctx.host.unwrap_or_default();

    let markup = html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta http-equiv="X-UA-Compatible" content="IE=edge;chrome=1";
                meta name="renderer" content="webkit";
                meta name="viewport" content="width=device-width,initial-scale=1.0,minimum-scale=1.0,maximum-scale=1.0,user-scalable=no";
                title { "Index of " (ctx.display_path) }
                style type="text/css" { (PreEscaped(LISTING_CSS)) }
                style { (PreEscaped(PREVIEW_CSS)) }
            }
            body {
                h1 { "Index of " (ctx.display_path) }
                table {
                    @for entry in &buckets.directories { (render_row(entry, &ctx.row)) }
                    @for entry in &buckets.files { (render_row(entry, &ctx.row)) }
                    @for entry in &buckets.failed { (render_row(entry, &ctx.row)) }
                }
                br;
                address {
                    "dirview/" (env!("CARGO_PKG_VERSION")) " server running @ " (host)
                }
                @if !images.is_empty() {
                    div id="preview" {
                        @for href in &images { img src=(href); }
                    }
                    div class="toolbox" {
                        button id="show" { "SHOW" }
                        button id="close" { "CLOSE" }
                    }
                    script { (PreEscaped(PREVIEW_JS)) }
                }
            }
        }
    };

    markup.into_string()
}
