use std::sync::OnceLock;

use regex::Regex;

struct Patterns {
    url: Regex,
    mention: Regex,
    whitespace: Regex,
    hashtag: Regex,
    punctuation: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        url: Regex::new(r"(www\.\S+)|(https?://\S+)").expect("valid url pattern"),
        mention: Regex::new(r"@\S+").expect("valid mention pattern"),
        whitespace: Regex::new(r"\s+").expect("valid whitespace pattern"),
        hashtag: Regex::new(r"#(\S+)").expect("valid hashtag pattern"),
        punctuation: Regex::new(r#"[.!:?\-'"\\/]"#).expect("valid punctuation pattern"),
    })
}

/// Clean user input before it is handed to the fallback translator.
///
/// Lowercases, drops URLs and `@mentions`, collapses whitespace, unwraps
/// `#hashtags` and removes sentence punctuation. Surrounding spaces left
/// behind by removed URLs are not trimmed.
pub fn process_input(text: &str) -> String {
    let p = patterns();
    let text = text.to_lowercase();
    let text = p.url.replace_all(&text, "");
    let text = p.mention.replace_all(&text, "");
    let text = p.whitespace.replace_all(&text, " ");
    let text = p.hashtag.replace_all(&text, "$1");
    let text = p.punctuation.replace_all(&text, "");
    text.trim_matches(|c| c == '\'' || c == '"').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(process_input("Hello, World!"), "hello, world");
        assert_eq!(process_input("Don't stop"), "dont stop");
        assert_eq!(process_input("what? yes: no - maybe/so"), "what yes no  maybeso");
    }

    #[test]
    fn removes_urls_mentions_and_unwraps_hashtags() {
        assert_eq!(
            process_input("Check out www.example.com @bob #Cebu!"),
            "check out cebu"
        );
        assert_eq!(process_input("see https://a.b/c?x=1 now"), "see now");
    }

    #[test]
    fn collapses_whitespace_but_keeps_edges() {
        assert_eq!(process_input("good\t\tmorning\n friend"), "good morning friend");
        assert_eq!(process_input("http://x.y hello"), " hello");
    }

    #[test]
    fn quotes_and_backslashes_are_removed() {
        assert_eq!(process_input(r#""salamat\""#), "salamat");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(process_input(""), "");
    }
}
