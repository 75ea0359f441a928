/// Icon class for directories.
pub const DIRECTORY_ICON: &str = "icon-_blank";

/// Icon class for files whose extension has no entry in the catalog.
pub const DEFAULT_ICON: &str = "icon-_page";

/// Look up the icon class for a file extension (case-insensitive).
pub fn icon_class_for(extension: &str) -> Option<&'static str> {
    let class = match extension.to_ascii_lowercase().as_str() {
        "png" | "jpg" | "jpeg" | "gif" | "svg" | "bmp" | "webp" | "ico" | "tif" | "tiff" => {
            "icon-image"
        }
        "mp4" | "mkv" | "mov" | "avi" | "webm" | "flv" | "wmv" => "icon-video",
        "mp3" | "wav" | "flac" | "ogg" | "aac" | "m4a" => "icon-audio",
        "zip" | "gz" | "tgz" | "tar" | "bz2" | "xz" | "7z" | "rar" | "zst" => "icon-archive",
        "rs" | "c" | "h" | "cpp" | "hpp" | "go" | "py" | "js" | "ts" | "java" | "rb" | "sh"
        | "css" | "html" | "htm" | "xml" => "icon-code",
        "json" | "toml" | "yaml" | "yml" | "ini" | "conf" | "lock" => "icon-config",
        "pdf" | "doc" | "docx" | "odt" | "rtf" | "xls" | "xlsx" | "ods" | "csv" | "ppt"
        | "pptx" | "odp" => "icon-document",
        "txt" | "md" | "log" | "rst" => "icon-text",
        _ => return None,
    };
    Some(class)
}

/// Base listing stylesheet, including every class `icon_class_for` returns.
pub const LISTING_CSS: &str = "\
body{\
    font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,'Helvetica Neue',Arial,sans-serif;\
    color:#3D3D3D;background:#FFF8F3;padding:0 16px;\
}\
h1{font-size:1.3em;font-weight:600;padding:16px 0}\
table{border-collapse:collapse}\
td{padding:3px 10px;vertical-align:middle}\
tr:hover td{background:#FFF1E6}\
a{color:#2D9B87;text-decoration:none}\
a:hover{color:#E8853A;text-decoration:underline}\
code{font-family:'SF Mono',Monaco,'Cascadia Code',Menlo,Consolas,monospace;font-size:.85em}\
.perms,.file-size{color:#8D8682;white-space:nowrap}\
.file-size{text-align:right}\
tr.unknown .display-name a{color:#8D8682;font-style:italic}\
address{color:#8D8682;font-size:.82em;padding:8px 0}\
.icon{display:inline-block;width:14px;height:16px;border-radius:2px 6px 2px 2px;background:#B8B0AA}\
.icon-_blank{width:18px;height:14px;border-radius:2px;background:#E8853A}\
.icon-_page{background:#B8B0AA}\
.icon-image{background:#8B6BB5}\
.icon-video{background:#D4722A}\
.icon-audio{background:#A08AC5}\
.icon-archive{background:#9C7A54}\
.icon-code{background:#3BB8A2}\
.icon-config{background:#2D9B87}\
.icon-document{background:#9CB4D4}\
.icon-text{background:#8D8682}\
";

/// Layout for the image preview overlay and its toolbar.
pub const PREVIEW_CSS: &str = "\
h1{margin:0}\
body{position:relative;min-height:100vh;margin:0;padding-bottom:35px}\
*{box-sizing:border-box}\
#preview{\
    position:absolute;min-height:100%;width:100%;top:0;left:0;\
    display:none;background-color:black;margin-bottom:35px;\
}\
#preview img{width:100%}\
.toolbox{\
    position:fixed;bottom:0;height:35px;width:100%;background-color:black;\
    display:flex;justify-content:space-between;align-items:center;color:white;\
}\
.toolbox button{height:100%;background-color:#eee;font-size:18px}\
";

/// Toggles the preview overlay from the toolbar buttons.
pub const PREVIEW_JS: &str = "\
document.getElementById('show').addEventListener('click',function(){\
    document.getElementById('preview').setAttribute('style','display: block');\
});\
document.getElementById('close').addEventListener('click',function(){\
    document.getElementById('preview').setAttribute('style','display: none');\
});\
";
