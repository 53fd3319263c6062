use std::fmt::Debug;

use crate::secrets::Secret;

pub const CAMERA_PASSWORD_ENV_KEY: &str = "FRIGATE_RTSP_PASSWORD";
pub const MQTT_PASSWORD_ENV_KEY: &str = "FRIGATE_MQTT_PASSWORD";

/// Rendered `KEY="VALUE"` lines. Holds secrets, so `Debug` only shows the keys.
#[derive(Clone, PartialEq, Eq)]
pub struct EnvFile {
    keys: Vec<&'static str>,
    contents: String,
}

impl EnvFile {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.contents.as_bytes()
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.contents
    }

    #[must_use]
    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }
}

impl Debug for EnvFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvFile").field("keys", &self.keys).finish_non_exhaustive()
    }
}

// Double-quoted env file values expand `$` and backslash escapes, so both are escaped
fn quote_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '$' => quoted.push_str("\\$"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// One line per key, each terminated by `\n`, no blank lines.
#[must_use]
pub fn build_env_file(camera_password: &Secret, mqtt_password: &Secret) -> EnvFile {
    let entries = [
        (CAMERA_PASSWORD_ENV_KEY, camera_password),
        (MQTT_PASSWORD_ENV_KEY, mqtt_password),
    ];

    let contents = entries
        .iter()
        .map(|(key, value)| format!("{key}={}\n", quote_value(value.expose())))
        .collect::<String>();

    EnvFile {
        keys: entries.iter().map(|(key, _)| *key).collect(),
        contents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use test_utils::asserts::assert_non_blank_lines;

    #[test]
    fn two_quoted_lines() {
        let env = build_env_file(&Secret::new("abc"), &Secret::new("def"));
        assert_eq!(
            env.expose(),
            "FRIGATE_RTSP_PASSWORD=\"abc\"\nFRIGATE_MQTT_PASSWORD=\"def\"\n"
        );
        assert_non_blank_lines(env.expose(), 2);
        assert_eq!(env.keys(), ["FRIGATE_RTSP_PASSWORD", "FRIGATE_MQTT_PASSWORD"]);
    }

    #[rstest]
    #[case("p@ss word", "\"p@ss word\"")]
    #[case("say \"hi\"", "\"say \\\"hi\\\"\"")]
    #[case("back\\slash", "\"back\\\\slash\"")]
    #[case("$HOME", "\"\\$HOME\"")]
    #[case("two\nlines", "\"two\\nlines\"")]
    #[case("trailing  ", "\"trailing  \"")]
    #[case("", "\"\"")]
    fn special_characters(#[case] secret: &str, #[case] expected: &str) {
        assert_eq!(quote_value(secret), expected);

        // Embedded newlines never break the one-line-per-key layout
        let env = build_env_file(&Secret::new(secret), &Secret::new("x"));
        assert_non_blank_lines(env.expose(), 2);
    }

    #[test]
    fn debug_hides_values() {
        let env = build_env_file(&Secret::new("hunter2"), &Secret::new("swordfish"));
        let printed = format!("{env:?}");
        assert!(printed.contains("FRIGATE_MQTT_PASSWORD"));
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("swordfish"));
    }
}
