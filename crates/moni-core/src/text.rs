//! 초안 텍스트 변환.
//!
//! 제안 텍스트 → 호스트 초안 HTML, 제출된 초안 HTML → 일반 텍스트.

use tracing::warn;

/// html2text 줄바꿈 폭 (사실상 줄바꿈 없음)
const PLAIN_TEXT_WIDTH: usize = 10_000;

/// HTML 특수 문자 이스케이프
///
/// 일반 텍스트가 초안 편집기에서 HTML로 해석되지 않도록 한다.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(ch),
        }
    }
    out
}

/// 제안 텍스트 → 초안 HTML (이스케이프 + 줄바꿈 `<br>`)
pub fn text_to_draft_html(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

/// 초안 HTML → 일반 텍스트
///
/// 문단(`<p>`) 사이의 빈 줄은 한 줄로 줄인다.
pub fn html_to_plain_text(html: &str) -> String {
    let rendered = match html2text::from_read(html.as_bytes(), PLAIN_TEXT_WIDTH) {
        Ok(text) => text,
        Err(e) => {
            warn!("HTML 변환 실패, 원문 사용: {e}");
            html.to_string()
        }
    };

    rendered.replace("\n\n", "\n").trim_end().to_string()
}

/// 최대 길이로 자르기 (`...` 포함)
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let keep = max_length.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_all_special_chars() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;&#x2F;a&gt;"
        );
    }

    #[test]
    fn draft_html_converts_newlines() {
        assert_eq!(
            text_to_draft_html("Hallo\nWelt <3"),
            "Hallo<br>Welt &lt;3"
        );
    }

    #[test]
    fn plain_text_from_simple_string() {
        assert_eq!(html_to_plain_text("Hi there"), "Hi there");
    }

    #[test]
    fn plain_text_from_paragraphs() {
        assert_eq!(html_to_plain_text("<p>Hi</p><p>there</p>"), "Hi\nthere");
    }

    #[test]
    fn plain_text_decodes_entities() {
        assert_eq!(html_to_plain_text("Tom &amp; Jerry"), "Tom & Jerry");
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_text("kurz", 10), "kurz");
        assert_eq!(truncate_text("abcdefghij", 8), "abcde...");
    }
}
