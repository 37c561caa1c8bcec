use crate::utils::error::{ResolverError, Result};
use regex::Regex;
use url::Url;

/// 從搜尋結果 HTML 抽出 `<a href>` 連結
#[derive(Debug, Clone)]
pub struct AnchorExtractor {
    anchor: Regex,
}

impl AnchorExtractor {
    pub fn new() -> Result<Self> {
        // href 前必須是空白或引號，避免吃到 data-href 之類的屬性
        let anchor = Regex::new(
            r#"(?is)<a\b[^>]*?[\s"']href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#,
        )
        .map_err(|e| ResolverError::ParseError {
            message: format!("Invalid anchor pattern: {}", e),
        })?;
        Ok(Self { anchor })
    }

    /// 依文件順序回傳所有 href，已解碼 `&amp;` 並展開搜尋引擎的轉址連結
    pub fn hrefs(&self, html: &str) -> Vec<String> {
        self.anchor
            .captures_iter(html)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
            .map(|m| unwrap_redirect(&decode_entities(m.as_str())))
            .collect()
    }

    pub fn first_matching(&self, html: &str, marker: &str) -> Option<String> {
        self.hrefs(html)
            .into_iter()
            .find(|href| href.contains(marker))
    }
}

fn decode_entities(raw: &str) -> String {
    raw.replace("&amp;", "&")
        .replace("&#x2F;", "/")
        .replace("&#47;", "/")
        .replace("&quot;", "\"")
}

/// `/url?q=<target>&sa=...` 形式的連結改回目標網址
fn unwrap_redirect(href: &str) -> String {
    if !href.starts_with("/url?") {
        return href.to_string();
    }

    let target = Url::parse("https://search.local/")
        .and_then(|base| base.join(href))
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "q" || key == "url")
                .map(|(_, value)| value.into_owned())
        });

    target.unwrap_or_else(|| href.to_string())
}
