// ─── Argument Composer ───
// Expands literal and conditional argument tokens into the final argument
// list, substituting `${...}` placeholders from the launch context.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::auth::PlayerIdentity;
use crate::core::platform::PlatformDescriptor;
use crate::core::version::{evaluate, ArgumentToken, FeatureFlags};

use super::classpath::safe_path_str;

/// How substituted values containing whitespace are emitted.
///
/// Pick by how the composed arguments reach the JVM. A command line joined
/// into one string and parsed by a shell needs `WrapWhitespace`. An argv
/// vector handed to a process API (`std::process::Command::args`,
/// `tokio::process::Command::args`) needs `Verbatim`, otherwise the quotes
/// reach the JVM literally. Default data directories can contain spaces
/// (`~/Library/Application Support` on macOS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotingPolicy {
    /// Wrap the value in double quotes, for shell command lines.
    #[default]
    WrapWhitespace,
    /// Emit values as-is, for launchers that pass argv without a shell.
    Verbatim,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickPlay {
    Singleplayer(String),
    Multiplayer(String),
    Realms(String),
}

/// Values available to placeholders.
#[derive(Debug, Clone)]
pub struct LaunchContext {
    pub player: PlayerIdentity,
    pub version_name: String,
    pub version_type: String,
    pub game_directory: PathBuf,
    pub assets_root: PathBuf,
    pub assets_index_name: String,
    pub natives_directory: PathBuf,
    pub libraries_directory: PathBuf,
    pub classpath: String,
    pub classpath_separator: String,
    pub launcher_name: String,
    pub launcher_version: String,
    pub resolution: Option<(u32, u32)>,
    pub quick_play: Option<QuickPlay>,
    pub quick_play_path: Option<PathBuf>,
    /// Extra placeholder values; they override built-in ones.
    pub extra: HashMap<String, String>,
}

impl LaunchContext {
    pub fn placeholders(&self) -> HashMap<String, String> {
        let mut values: HashMap<String, String> = HashMap::new();
        let mut put = |key: &str, value: String| {
            values.insert(key.to_string(), value);
        };

        put("auth_player_name", self.player.username.clone());
        put("auth_uuid", self.player.uuid.clone());
        put("auth_access_token", self.player.access_token.clone());
        put("auth_session", self.player.access_token.clone());
        put("auth_xuid", self.player.xuid.clone());
        put("clientid", self.player.client_id.clone());
        put("user_type", self.player.user_type.clone());
        put("user_properties", "{}".to_string());

        put("version_name", self.version_name.clone());
        put("version_type", self.version_type.clone());

        put("game_directory", safe_path_str(&self.game_directory));
        put("assets_root", safe_path_str(&self.assets_root));
        put("game_assets", safe_path_str(&self.assets_root));
        put("assets_index_name", self.assets_index_name.clone());
        put("natives_directory", safe_path_str(&self.natives_directory));
        put("library_directory", safe_path_str(&self.libraries_directory));
        put("classpath", self.classpath.clone());
        put("classpath_separator", self.classpath_separator.clone());

        put("launcher_name", self.launcher_name.clone());
        put("launcher_version", self.launcher_version.clone());

        if let Some((width, height)) = self.resolution {
            put("resolution_width", width.to_string());
            put("resolution_height", height.to_string());
        }

        if let Some(path) = &self.quick_play_path {
            put("quickPlayPath", safe_path_str(path));
        }
        match &self.quick_play {
            Some(QuickPlay::Singleplayer(world)) => put("quickPlaySingleplayer", world.clone()),
            Some(QuickPlay::Multiplayer(server)) => put("quickPlayMultiplayer", server.clone()),
            Some(QuickPlay::Realms(realm)) => put("quickPlayRealms", realm.clone()),
            None => {}
        }

        for (key, value) in &self.extra {
            values.insert(key.clone(), value.clone());
        }
        values
    }
}

/// Expands argument tokens for one platform and feature set.
#[derive(Debug, Clone)]
pub struct ArgumentComposer {
    platform: PlatformDescriptor,
    features: FeatureFlags,
    quoting: QuotingPolicy,
}

impl ArgumentComposer {
    pub fn new(platform: PlatformDescriptor, features: FeatureFlags) -> Self {
        Self {
            platform,
            features,
            quoting: QuotingPolicy::default(),
        }
    }

    pub fn with_quoting(mut self, quoting: QuotingPolicy) -> Self {
        self.quoting = quoting;
        self
    }

    /// Literal tokens are substituted and appended. Conditional tokens
    /// contribute their values, in order, only when their rules allow.
    pub fn compose(&self, tokens: &[ArgumentToken], context: &LaunchContext) -> Vec<String> {
        let values = context.placeholders();
        self.compose_with(tokens, &values)
    }

    pub fn compose_with(&self, tokens: &[ArgumentToken], values: &HashMap<String, String>) -> Vec<String> {
        let mut args = Vec::with_capacity(tokens.len());
        for token in tokens {
            match token {
                ArgumentToken::Literal(raw) => args.push(substitute(raw, values, self.quoting)),
                ArgumentToken::Conditional(conditional) => {
                    if !evaluate(&conditional.rules, &self.platform, &self.features) {
                        continue;
                    }
                    args.extend(
                        conditional
                            .value
                            .as_slice()
                            .iter()
                            .map(|raw| substitute(raw, values, self.quoting)),
                    );
                }
            }
        }
        args
    }
}

/// Replace every `${name}` with its value in one left-to-right pass.
///
/// Unknown names stay verbatim; substituted text is never rescanned.
pub fn substitute(template: &str, values: &HashMap<String, String>, quoting: QuotingPolicy) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        match values.get(name) {
            Some(value) => out.push_str(&quote(value, quoting)),
            None => {
                out.push_str("${");
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

fn quote(value: &str, quoting: QuotingPolicy) -> String {
    match quoting {
        QuotingPolicy::WrapWhitespace if value.chars().any(char::is_whitespace) => {
            format!("\"{}\"", value)
        }
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::{Arch, OsFamily};
    use crate::core::version::rules::{FEATURE_CUSTOM_RESOLUTION, FEATURE_DEMO_USER};
    use crate::core::version::{ArgumentValue, Rule};

    fn context() -> LaunchContext {
        LaunchContext {
            player: PlayerIdentity::offline("Alex"),
            version_name: "1.21.1".into(),
            version_type: "release".into(),
            game_directory: PathBuf::from("/games/main"),
            assets_root: PathBuf::from("/data/assets"),
            assets_index_name: "17".into(),
            natives_directory: PathBuf::from("/data/versions/1.21.1/natives"),
            libraries_directory: PathBuf::from("/data/libraries"),
            classpath: "/a.jar:/b.jar".into(),
            classpath_separator: ":".into(),
            launcher_name: "launch-core".into(),
            launcher_version: "0.1.0".into(),
            resolution: None,
            quick_play: None,
            quick_play_path: None,
            extra: HashMap::new(),
        }
    }

    fn composer(features: FeatureFlags) -> ArgumentComposer {
        ArgumentComposer::new(PlatformDescriptor::new(OsFamily::Linux, Arch::X64), features)
    }

    #[test]
    fn demo_flag_off_drops_conditional() {
        let tokens = vec![
            ArgumentToken::literal("-Xss1M"),
            ArgumentToken::conditional(
                vec![Rule::allow().with_feature(FEATURE_DEMO_USER, true)],
                ArgumentValue::Single("--demo".into()),
            ),
        ];
        let features = FeatureFlags::default().with(FEATURE_DEMO_USER, false);
        assert_eq!(composer(features).compose(&tokens, &context()), vec!["-Xss1M"]);
    }

    #[test]
    fn conditional_multiple_values_keep_order() {
        let tokens = vec![ArgumentToken::conditional(
            vec![Rule::allow().with_feature(FEATURE_CUSTOM_RESOLUTION, true)],
            ArgumentValue::Multiple(vec![
                "--width".into(),
                "${resolution_width}".into(),
                "--height".into(),
                "${resolution_height}".into(),
            ]),
        )];
        let mut ctx = context();
        ctx.resolution = Some((1280, 720));
        let features = FeatureFlags::default().with(FEATURE_CUSTOM_RESOLUTION, true);

        assert_eq!(
            composer(features).compose(&tokens, &ctx),
            vec!["--width", "1280", "--height", "720"]
        );
    }

    #[test]
    fn known_placeholders_substitute_and_unknown_stay() {
        let tokens = vec![
            ArgumentToken::literal("--username"),
            ArgumentToken::literal("${auth_player_name}"),
            ArgumentToken::literal("-Djava.library.path=${natives_directory}"),
            ArgumentToken::literal("--bad=${not_a_placeholder}"),
            ArgumentToken::literal("${unterminated"),
        ];
        let args = composer(FeatureFlags::default()).compose(&tokens, &context());
        assert_eq!(
            args,
            vec![
                "--username",
                "Alex",
                "-Djava.library.path=/data/versions/1.21.1/natives",
                "--bad=${not_a_placeholder}",
                "${unterminated",
            ]
        );
    }

    #[test]
    fn whitespace_values_are_quoted_by_policy() {
        let mut ctx = context();
        ctx.game_directory = PathBuf::from("/home/me/My Games/mc");
        let tokens = vec![ArgumentToken::literal("${game_directory}")];

        let wrapped = composer(FeatureFlags::default()).compose(&tokens, &ctx);
        assert_eq!(wrapped, vec!["\"/home/me/My Games/mc\""]);

        let verbatim = composer(FeatureFlags::default())
            .with_quoting(QuotingPolicy::Verbatim)
            .compose(&tokens, &ctx);
        assert_eq!(verbatim, vec!["/home/me/My Games/mc"]);
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let mut ctx = context();
        ctx.extra.insert("custom".into(), "${auth_player_name}".into());
        let args = composer(FeatureFlags::default())
            .compose(&[ArgumentToken::literal("${custom}")], &ctx);
        assert_eq!(args, vec!["${auth_player_name}"]);
    }

    #[test]
    fn quick_play_values_are_exposed() {
        let mut ctx = context();
        ctx.quick_play = Some(QuickPlay::Multiplayer("mc.example.net:25565".into()));
        let values = ctx.placeholders();
        assert_eq!(values["quickPlayMultiplayer"], "mc.example.net:25565");
        assert!(!values.contains_key("quickPlaySingleplayer"));
        assert!(!values.contains_key("resolution_width"));
    }
}
