//! Display and serialization formatting for responses.

use serde::{Deserialize, Serialize};

/// Markers and indentation used when rendering a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseFormat {
    pub thinking_marker: String,
    pub answer_marker: String,
    /// Spaces per level in serialized JSON
    pub indent: usize,
}

impl Default for ResponseFormat {
    fn default() -> Self {
        Self {
            thinking_marker: "[Thinking]".to_string(),
            answer_marker: "[Answer]".to_string(),
            indent: 4,
        }
    }
}

impl ResponseFormat {
    /// Render display text, prefixing reasoning only when it is non-empty.
    pub fn display(&self, reasoning: Option<&str>, text: &str) -> String {
        match reasoning {
            Some(reasoning) if !reasoning.is_empty() => format!(
                "{}\n{}\n{}\n{}",
                self.thinking_marker, reasoning, self.answer_marker, text
            ),
            _ => text.to_string(),
        }
    }

    pub(crate) fn indent_bytes(&self) -> Vec<u8> {
        vec![b' '; self.indent]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        let format = ResponseFormat::default();
        assert_eq!(format.thinking_marker, "[Thinking]");
        assert_eq!(format.answer_marker, "[Answer]");
        assert_eq!(format.indent, 4);
    }

    #[test]
    fn test_display_with_reasoning() {
        let format = ResponseFormat::default();
        assert_eq!(
            format.display(Some("thinking..."), "42"),
            "[Thinking]\nthinking...\n[Answer]\n42"
        );
    }

    #[test]
    fn test_display_empty_reasoning_is_plain() {
        let format = ResponseFormat::default();
        assert_eq!(format.display(Some(""), "42"), "42");
        assert_eq!(format.display(None, "42"), "42");
    }

    #[test]
    fn test_custom_markers() {
        let format = ResponseFormat {
            thinking_marker: "<think>".to_string(),
            answer_marker: "<answer>".to_string(),
            indent: 2,
        };
        assert_eq!(format.display(Some("r"), "t"), "<think>\nr\n<answer>\nt");
        assert_eq!(format.indent_bytes(), b"  ".to_vec());
    }

    #[test]
    fn test_deserialize_partial_yaml() {
        let format: ResponseFormat = serde_yaml::from_str("indent: 2\n").unwrap();
        assert_eq!(format.indent, 2);
        assert_eq!(format.thinking_marker, "[Thinking]");
    }
}
