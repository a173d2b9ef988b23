use serde::{Deserialize, Serialize};

use super::rules::Rule;

/// One entry of `arguments.game` / `arguments.jvm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentToken {
    Literal(String),
    Conditional(ConditionalArgument),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalArgument {
    #[serde(default)]
    pub rules: Vec<Rule>,
    pub value: ArgumentValue,
}

/// A conditional argument carries either one value or several, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentValue {
    Single(String),
    Multiple(Vec<String>),
}

impl ArgumentValue {
    pub fn as_slice(&self) -> &[String] {
        match self {
            ArgumentValue::Single(value) => std::slice::from_ref(value),
            ArgumentValue::Multiple(values) => values,
        }
    }
}

impl ArgumentToken {
    pub fn literal(value: impl Into<String>) -> Self {
        ArgumentToken::Literal(value.into())
    }

    pub fn conditional(rules: Vec<Rule>, value: ArgumentValue) -> Self {
        ArgumentToken::Conditional(ConditionalArgument { rules, value })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Arguments {
    #[serde(default)]
    pub game: Vec<ArgumentToken>,
    #[serde(default)]
    pub jvm: Vec<ArgumentToken>,
}

/// Tokenize a pre-1.13 `minecraftArguments` string.
pub fn legacy_tokens(raw: &str) -> Vec<ArgumentToken> {
    raw.split_whitespace().map(ArgumentToken::literal).collect()
}

/// JVM arguments implied for versions that predate `arguments.jvm`.
pub fn default_jvm_tokens() -> Vec<ArgumentToken> {
    vec![
        ArgumentToken::literal("-Djava.library.path=${natives_directory}"),
        ArgumentToken::literal("-cp"),
        ArgumentToken::literal("${classpath}"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::version::rules::RuleAction;

    #[test]
    fn deserializes_mixed_token_array() {
        let args: Arguments = serde_json::from_value(serde_json::json!({
            "game": [
                "--username",
                "${auth_player_name}",
                {"rules": [{"action": "allow", "features": {"is_demo_user": true}}], "value": "--demo"},
                {"rules": [{"action": "allow", "features": {"has_custom_resolution": true}}],
                 "value": ["--width", "${resolution_width}", "--height", "${resolution_height}"]}
            ]
        }))
        .unwrap();

        assert!(args.jvm.is_empty());
        assert_eq!(args.game[0], ArgumentToken::literal("--username"));
        match &args.game[2] {
            ArgumentToken::Conditional(c) => {
                assert_eq!(c.rules[0].action, RuleAction::Allow);
                assert_eq!(c.value, ArgumentValue::Single("--demo".into()));
            }
            other => panic!("expected conditional, got {:?}", other),
        }
        match &args.game[3] {
            ArgumentToken::Conditional(c) => assert_eq!(c.value.as_slice().len(), 4),
            other => panic!("expected conditional, got {:?}", other),
        }
    }

    #[test]
    fn legacy_string_splits_on_whitespace() {
        let tokens = legacy_tokens("--username ${auth_player_name}  --version ${version_name}");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1], ArgumentToken::literal("${auth_player_name}"));
    }
}
