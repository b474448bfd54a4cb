//! Field extraction from text pasted out of map applications.

use crate::types::{District, ParsedInput};

/// Leading tags of the map-app share format: line 2 is the name, line 3 the address.
pub const MAP_APP_TAGS: [&str; 2] = ["[네이버 지도]", "[카카오맵]"];

/// City boilerplate removed from the start of an address.
pub const CITY_PREFIX: &str = "경기 성남시 ";

const URL_PREFIXES: [&str; 2] = ["https://", "http://"];

/// Split pasted text into a name/address pair. Never fails; fields that
/// cannot be found come back empty.
pub fn extract_fields(text: &str) -> ParsedInput {
    let text = text.trim_start_matches('\u{feff}');
    if MAP_APP_TAGS.iter().any(|tag| text.starts_with(tag)) {
        return extract_map_app(text);
    }
    extract_generic(text)
}

fn extract_map_app(text: &str) -> ParsedInput {
    let mut lines = text.lines().skip(1);
    let name = lines.next().unwrap_or("").trim();
    let address = lines.next().unwrap_or("").trim();
    ParsedInput::new(name, strip_city_prefix(address))
}

fn extract_generic(text: &str) -> ParsedInput {
    let mut name = "";
    let mut address_parts: Vec<&str> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || is_tag_line(line) || is_url_line(line) { continue; }
        if name.is_empty() { name = line; } else { address_parts.push(line); }
    }
    let address = address_parts.join(" ");
    ParsedInput::new(name, strip_city_prefix(address.trim()))
}

fn is_tag_line(line: &str) -> bool { line.starts_with('[') && line.ends_with(']') }

fn is_url_line(line: &str) -> bool { URL_PREFIXES.iter().any(|p| line.starts_with(p)) }

fn strip_city_prefix(address: &str) -> &str {
    address.strip_prefix(CITY_PREFIX).unwrap_or(address).trim()
}

impl District {
    /// First known sub-district contained in `address`, in priority order.
    pub fn extract(address: &str) -> Option<District> {
        District::ALL.into_iter().find(|d| address.contains(d.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_skips_tags_and_urls() {
        let input = "[가게 공유]\n스타벅스 정자점\n경기 성남시 분당구 정자동 123\n2층\nhttps://naver.me/abc";
        let parsed = extract_fields(input);
        assert_eq!(parsed.name, "스타벅스 정자점");
        assert_eq!(parsed.address, "분당구 정자동 123 2층");
    }

    #[test]
    fn generic_single_line_is_name_only() {
        let parsed = extract_fields("  스타벅스  \n\n");
        assert_eq!(parsed.name, "스타벅스");
        assert!(!parsed.has_address());
    }

    #[test]
    fn blank_and_noise_only_inputs_are_empty() {
        assert!(extract_fields("").is_empty());
        assert!(extract_fields("   \n \n").is_empty());
        assert!(extract_fields("[네이버]\nhttp://example.com").is_empty());
    }

    #[test]
    fn map_app_uses_fixed_lines() {
        let input = "[네이버 지도]\n김밥천국 수진점\n경기 성남시 수정구 수진동 45\nhttps://naver.me/xyz";
        let parsed = extract_fields(input);
        assert_eq!(parsed.name, "김밥천국 수진점");
        assert_eq!(parsed.address, "수정구 수진동 45");

        let kakao = extract_fields("[카카오맵]\n파리바게뜨\n");
        assert_eq!(kakao.name, "파리바게뜨");
        assert_eq!(kakao.address, "");
    }

    #[test]
    fn city_prefix_only_stripped_at_start() {
        let parsed = extract_fields("가게\n정자동 경기 성남시 분당구");
        assert_eq!(parsed.address, "정자동 경기 성남시 분당구");
    }

    #[test]
    fn district_priority_and_absence() {
        assert_eq!(District::extract("성남시 분당구 정자동"), Some(District::Bundang));
        assert_eq!(District::extract("수정구 중원구 경계"), Some(District::Sujeong));
        assert_eq!(District::extract("서울 강남구 역삼동"), None);
        assert_eq!(District::extract(""), None);
    }
}
