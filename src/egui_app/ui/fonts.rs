use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};

const CJK_FONT_NAME: &str = "cjk_fallback";

#[cfg(target_os = "windows")]
const SYSTEM_CJK_FONTS: &[&str] = &[
    r"C:\Windows\Fonts\msyh.ttc",
    r"C:\Windows\Fonts\msyh.ttf",
    r"C:\Windows\Fonts\simhei.ttf",
    r"C:\Windows\Fonts\simsun.ttc",
];

#[cfg(target_os = "macos")]
const SYSTEM_CJK_FONTS: &[&str] = &[
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/System/Library/Fonts/STHeiti Medium.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const SYSTEM_CJK_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc",
    "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
];

/// Pick the font file to load for Chinese text.
///
/// The configured path wins when it exists, then the first existing entry of
/// `system_fonts`.
pub(super) fn select_cjk_font(
    configured: Option<&Path>,
    system_fonts: &[&str],
    exists: impl Fn(&Path) -> bool,
) -> Option<PathBuf> {
    if let Some(path) = configured {
        if exists(path) {
            return Some(path.to_path_buf());
        }
        tracing::warn!("Configured CJK font {} not found", path.display());
    }
    system_fonts
        .iter()
        .map(Path::new)
        .find(|path| exists(path))
        .map(Path::to_path_buf)
}

/// Register a CJK-capable font behind the default fonts.
///
/// egui ships without Chinese glyphs. The configured font is tried first,
/// then common system fonts. Finding none only logs.
pub fn install_cjk_font(ctx: &egui::Context, configured: Option<&Path>) {
    let Some(path) = select_cjk_font(configured, SYSTEM_CJK_FONTS, Path::is_file) else {
        tracing::warn!("No CJK font found; Chinese labels will not render");
        return;
    };
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!("Unable to read CJK font {}: {err}", path.display());
            return;
        }
    };
    let mut fonts = FontDefinitions::default();
    fonts.font_data.insert(
        CJK_FONT_NAME.to_owned(),
        Arc::new(FontData::from_owned(bytes)),
    );
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(CJK_FONT_NAME.to_owned());
    }
    ctx.set_fonts(fonts);
    tracing::info!("Installed CJK font from {}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM: &[&str] = &["/fonts/a.ttc", "/fonts/b.ttf"];

    #[test]
    fn configured_font_wins_when_present() {
        let picked = select_cjk_font(Some(Path::new("/custom/zh.ttf")), SYSTEM, |_| true);
        assert_eq!(picked, Some(PathBuf::from("/custom/zh.ttf")));
    }

    #[test]
    fn falls_back_to_first_existing_system_font() {
        let picked = select_cjk_font(Some(Path::new("/custom/zh.ttf")), SYSTEM, |path| {
            path == Path::new("/fonts/b.ttf")
        });
        assert_eq!(picked, Some(PathBuf::from("/fonts/b.ttf")));

        let unset = select_cjk_font(None, SYSTEM, |_| true);
        assert_eq!(unset, Some(PathBuf::from("/fonts/a.ttc")));
    }

    #[test]
    fn nothing_found_yields_none() {
        assert_eq!(select_cjk_font(None, SYSTEM, |_| false), None);
    }

    #[test]
    fn every_platform_lists_system_fonts() {
        assert!(!SYSTEM_CJK_FONTS.is_empty());
    }
}
