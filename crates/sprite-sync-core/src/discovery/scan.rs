//! Pure HTML text scanning for sprite links and the site's asset token.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

use crate::asset::Asset;

/// Absolute `http(s)://` URL or root-relative path ending in
/// `/img/<stem>.png` or `/css/<stem>.png`, with an optional query.
/// Directory, stem and extension match case-insensitively.
///
/// The link (group 1) must start at the beginning of the text or right after
/// whitespace, a quote, `=`, `(` or `,`. The path part never crosses `?`.
const SPRITE_LINK_PATTERN: &str = r#"(?:^|[\s"'=(,])((?:https?://|/)[^\s"'<>()?]*?/(?i:img|css)/(?i:sheets|renders)\.(?i:png)\b(?:\?[^\s"'<>()#]*)?)"#;

/// Versioned stylesheet link, `/s/<token>/css/<name>.css`.
const ASSET_TOKEN_PATTERN: &str = r#"/s/([^/\s"'<>()]+)/css/[^\s"'<>()]+\.css"#;

fn sprite_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SPRITE_LINK_PATTERN).expect("sprite link pattern is valid"))
}

fn asset_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ASSET_TOKEN_PATTERN).expect("asset token pattern is valid"))
}

/// A sprite link found in page text, resolved to an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteLink {
    pub asset: Asset,
    /// Absolute URL with the query preserved. Absolute links are kept exactly
    /// as written; relative ones are joined onto the base.
    pub url: String,
}

/// Returns every sprite link in `html`, in text order, resolved against `base`.
///
/// Matches that fail to resolve, or whose last path segment is not a known
/// asset file name, are skipped.
pub fn scan_sprite_links(html: &str, base: &Url) -> Vec<SpriteLink> {
    sprite_link_re()
        .captures_iter(html)
        .filter_map(|c| {
            let raw = c.get(1)?.as_str();
            let resolved = base.join(raw).ok()?;
            let asset = asset_from_url(&resolved)?;
            let url = if raw.starts_with("http://") || raw.starts_with("https://") {
                raw.to_string()
            } else {
                resolved.to_string()
            };
            Some(SpriteLink { asset, url })
        })
        .collect()
}

/// First asset token seen in a versioned stylesheet link, if any.
pub fn scan_asset_token(html: &str) -> Option<String> {
    asset_token_re()
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Maps a URL to its asset by the last path segment; the query is not part of the path.
fn asset_from_url(url: &Url) -> Option<Asset> {
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    Asset::from_file_name(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.realmeye.com").unwrap()
    }

    #[test]
    fn finds_relative_and_absolute_links() {
        let html = r#"
            <link rel="stylesheet" href="/s/ab/css/site.css">
            <div style="background: url(/s/ab/css/renders.png)"></div>
            <img src="https://cdn.example.com/s/ab/img/sheets.png">
        "#;
        let links = scan_sprite_links(html, &base());
        assert_eq!(
            links,
            vec![
                SpriteLink {
                    asset: Asset::Renders,
                    url: "https://www.realmeye.com/s/ab/css/renders.png".to_string(),
                },
                SpriteLink {
                    asset: Asset::Sheets,
                    url: "https://cdn.example.com/s/ab/img/sheets.png".to_string(),
                },
            ]
        );
    }

    #[test]
    fn keyword_match_is_case_insensitive_and_keeps_case() {
        let html = r#"<img src="/s/Xy/IMG/Sheets.PNG">"#;
        let links = scan_sprite_links(html, &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].asset, Asset::Sheets);
        assert_eq!(links[0].url, "https://www.realmeye.com/s/Xy/IMG/Sheets.PNG");
    }

    #[test]
    fn query_is_kept_in_url_but_not_in_key() {
        let html = r#"<img src='/s/ab/img/sheets.png?v=12'>"#;
        let links = scan_sprite_links(html, &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].asset, Asset::Sheets);
        assert_eq!(links[0].url, "https://www.realmeye.com/s/ab/img/sheets.png?v=12");
    }

    #[test]
    fn ignores_other_directories_and_names() {
        let html = r#"
            <img src="/s/ab/js/sheets.png">
            <img src="/s/ab/img/items.png">
            <img src="/s/ab/img/sheets.pngx">
            <img src="/s/ab/img/sheets.jpg">
        "#;
        assert!(scan_sprite_links(html, &base()).is_empty());
    }

    #[test]
    fn protocol_relative_link_takes_base_scheme() {
        let html = r#"<img src="//cdn.example.com/s/q/img/sheets.png">"#;
        let links = scan_sprite_links(html, &base());
        assert_eq!(links[0].url, "https://cdn.example.com/s/q/img/sheets.png");
    }

    #[test]
    fn path_relative_link_is_not_a_sprite_link() {
        let html = r#"<img src="s/ab/img/sheets.png"> <a href=../s/ab/css/renders.png>"#;
        assert!(scan_sprite_links(html, &base()).is_empty());
    }

    #[test]
    fn slash_inside_other_scheme_is_not_root_relative() {
        let html = r#"<img src="ftp://files.example/s/ab/img/sheets.png">"#;
        assert!(scan_sprite_links(html, &base()).is_empty());
    }

    #[test]
    fn sprite_path_inside_a_query_is_found() {
        let html = r#"<a href="/go?to=/s/ab/img/sheets.png">"#;
        let links = scan_sprite_links(html, &base());
        assert_eq!(
            links,
            vec![SpriteLink {
                asset: Asset::Sheets,
                url: "https://www.realmeye.com/s/ab/img/sheets.png".to_string(),
            }]
        );
    }

    #[test]
    fn absolute_link_keeps_host_case() {
        let html = r#"<img src="https://CDN.Example.com/s/ab/IMG/sheets.png?v=1">"#;
        let links = scan_sprite_links(html, &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://CDN.Example.com/s/ab/IMG/sheets.png?v=1");
    }

    #[test]
    fn link_at_start_of_text_and_after_comma() {
        let html = "/s/a/img/sheets.png,/s/a/css/renders.png";
        let links = scan_sprite_links(html, &base());
        assert_eq!(links.len(), 2);
        assert_eq!(links[1].asset, Asset::Renders);
    }

    #[test]
    fn asset_token_from_stylesheet_link() {
        let html = r#"<link href="/s/gv/css/main.css" rel="stylesheet">"#;
        assert_eq!(scan_asset_token(html).as_deref(), Some("gv"));
        assert_eq!(scan_asset_token("<html></html>"), None);
    }
}
