use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::{Captures, Regex};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Load a text file, tolerating a UTF-8 BOM and falling back to GBK for
/// files that are not valid UTF-8
pub fn load_text_file_with_guess_encoding(path: &Path) -> Result<String> {
    let mut bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(0..UTF8_BOM.len());
    }

    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(err) => {
            let bytes = err.into_bytes();
            let (cow, _, had_errors) = encoding_rs::GBK.decode(&bytes);
            if had_errors {
                let (cow, _, _) = encoding_rs::UTF_8.decode(&bytes);
                return Ok(cow.into_owned());
            }
            Ok(cow.into_owned())
        }
    }
}

fn env_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{(\w+)\}").expect("valid env pattern"))
}

/// Replace `${VAR_NAME}` placeholders with environment values. Unset
/// variables are left as-is.
pub fn substitute_env_vars(content: &str) -> String {
    env_pattern()
        .replace_all(content, |caps: &Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
