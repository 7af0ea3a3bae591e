//! Module for mapping file types and names to Nerd Font icons.
//!
//! Entries get a glyph by extension category (image, video, audio, code,
//! archive, text, model, data), with dedicated glyphs for directories and
//! the parent marker and a plain document fallback for everything else.

use phf::phf_map;

/// File extension to icon mapping.
static EXT_ICON_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    // image
    "png" => "\u{f1c5}",
    "jpg" => "\u{f1c5}",
    "jpeg" => "\u{f1c5}",
    "gif" => "\u{f1c5}",
    "bmp" => "\u{f1c5}",
    "webp" => "\u{f1c5}",
    "svg" => "\u{f1c5}",
    "tiff" => "\u{f1c5}",
    "ico" => "\u{f1c5}",
    // video
    "mp4" => "\u{f1c8}",
    "avi" => "\u{f1c8}",
    "mkv" => "\u{f1c8}",
    "mov" => "\u{f1c8}",
    "wmv" => "\u{f1c8}",
    "flv" => "\u{f1c8}",
    "webm" => "\u{f1c8}",
    // audio
    "mp3" => "\u{f1c7}",
    "wav" => "\u{f1c7}",
    "ogg" => "\u{f1c7}",
    "flac" => "\u{f1c7}",
    "aac" => "\u{f1c7}",
    "wma" => "\u{f1c7}",
    "m4a" => "\u{f1c7}",
    // code
    "py" => "\u{f1c9}",
    "js" => "\u{f1c9}",
    "ts" => "\u{f1c9}",
    "html" => "\u{f1c9}",
    "css" => "\u{f1c9}",
    "json" => "\u{f1c9}",
    "xml" => "\u{f1c9}",
    "yaml" => "\u{f1c9}",
    "yml" => "\u{f1c9}",
    "toml" => "\u{f1c9}",
    "sh" => "\u{f1c9}",
    "bat" => "\u{f1c9}",
    "c" => "\u{f1c9}",
    "cpp" => "\u{f1c9}",
    "h" => "\u{f1c9}",
    "rs" => "\u{f1c9}",
    "go" => "\u{f1c9}",
    "java" => "\u{f1c9}",
    "lua" => "\u{f1c9}",
    // archive
    "zip" => "\u{f1c6}",
    "tar" => "\u{f1c6}",
    "gz" => "\u{f1c6}",
    "bz2" => "\u{f1c6}",
    "7z" => "\u{f1c6}",
    "rar" => "\u{f1c6}",
    "xz" => "\u{f1c6}",
    // text
    "txt" => "\u{f15c}",
    "md" => "\u{f15c}",
    "log" => "\u{f15c}",
    "csv" => "\u{f15c}",
    "ini" => "\u{f15c}",
    "cfg" => "\u{f15c}",
    "conf" => "\u{f15c}",
    // model
    "safetensors" => "\u{f0493}",
    "ckpt" => "\u{f0493}",
    "pt" => "\u{f0493}",
    "pth" => "\u{f0493}",
    "bin" => "\u{f0493}",
    "onnx" => "\u{f0493}",
    "gguf" => "\u{f0493}",
    // data
    "db" => "\u{f1c0}",
    "sqlite" => "\u{f1c0}",
    "sql" => "\u{f1c0}",
    "parquet" => "\u{f1c0}",
};

const DIR_ICON: &str = "\u{f07b}";
const PARENT_ICON: &str = "\u{f148}";
const DEFAULT_FILE_ICON: &str = "\u{f15b}";

/// Icon for the synthetic parent row.
pub fn parent_icon() -> &'static str {
    PARENT_ICON
}

/// Get the icon for an entry by name and kind.
pub fn icon_for(name: &str, is_dir: bool) -> &'static str {
    if is_dir {
        return DIR_ICON;
    }

    if let Some(dot_idx) = name.rfind('.')
        && dot_idx > 0
        && dot_idx < name.len() - 1
    {
        let ext = name[dot_idx + 1..].to_lowercase();
        if let Some(icon) = EXT_ICON_MAP.get(ext.as_str()) {
            return icon;
        }
    }

    DEFAULT_FILE_ICON
}
