// ─── Rules ───
// Allow/disallow gates on libraries and arguments, evaluated against the
// platform and the session's feature flags.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::platform::PlatformDescriptor;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    pub action: RuleAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<OsConstraint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<BTreeMap<String, bool>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Allow,
    Disallow,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OsConstraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Regular expression over the OS version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
}

impl Rule {
    pub fn allow() -> Self {
        Self {
            action: RuleAction::Allow,
            os: None,
            features: None,
        }
    }

    pub fn disallow() -> Self {
        Self {
            action: RuleAction::Disallow,
            os: None,
            features: None,
        }
    }

    pub fn for_os(mut self, name: &str) -> Self {
        self.os.get_or_insert_with(OsConstraint::default).name = Some(name.to_string());
        self
    }

    pub fn with_feature(mut self, flag: &str, value: bool) -> Self {
        self.features
            .get_or_insert_with(BTreeMap::new)
            .insert(flag.to_string(), value);
        self
    }
}

// ─── Feature flags ───

pub const FEATURE_DEMO_USER: &str = "is_demo_user";
pub const FEATURE_CUSTOM_RESOLUTION: &str = "has_custom_resolution";
pub const FEATURE_QUICK_PLAYS_SUPPORT: &str = "has_quick_plays_support";
pub const FEATURE_QUICK_PLAY_SINGLEPLAYER: &str = "is_quick_play_singleplayer";
pub const FEATURE_QUICK_PLAY_MULTIPLAYER: &str = "is_quick_play_multiplayer";
pub const FEATURE_QUICK_PLAY_REALMS: &str = "is_quick_play_realms";

/// Session-level boolean toggles consulted by `features` rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    flags: BTreeMap<String, bool>,
}

impl Default for FeatureFlags {
    /// Every flag the manifests are known to use, all off.
    fn default() -> Self {
        let flags = [
            FEATURE_DEMO_USER,
            FEATURE_CUSTOM_RESOLUTION,
            FEATURE_QUICK_PLAYS_SUPPORT,
            FEATURE_QUICK_PLAY_SINGLEPLAYER,
            FEATURE_QUICK_PLAY_MULTIPLAYER,
            FEATURE_QUICK_PLAY_REALMS,
        ]
        .into_iter()
        .map(|name| (name.to_string(), false))
        .collect();
        Self { flags }
    }
}

impl FeatureFlags {
    pub fn empty() -> Self {
        Self {
            flags: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, flag: &str, value: bool) -> &mut Self {
        self.flags.insert(flag.to_string(), value);
        self
    }

    pub fn with(mut self, flag: &str, value: bool) -> Self {
        self.set(flag, value);
        self
    }

    pub fn get(&self, flag: &str) -> Option<bool> {
        self.flags.get(flag).copied()
    }
}

// ─── Evaluation ───

/// Something worth reporting that did not change the defined outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleDiagnostic {
    /// A `features` constraint named a flag the session does not define.
    UnknownFeature(String),
    /// An `os.version` pattern failed to compile.
    InvalidVersionPattern(String),
}

/// Scan state: nothing matched yet, an allow matched, or a disallow matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    NoMatch,
    AllowPending,
    Denied,
}

impl Verdict {
    fn absorb(self, action: RuleAction) -> Self {
        match (self, action) {
            (Verdict::Denied, _) | (_, RuleAction::Disallow) => Verdict::Denied,
            (_, RuleAction::Allow) => Verdict::AllowPending,
        }
    }

    fn into_bool(self) -> bool {
        matches!(self, Verdict::AllowPending)
    }
}

/// Evaluate `rules` for `platform` and `features`.
///
/// - Empty list: allowed.
/// - A matching disallow denies, regardless of any allow before or after it.
/// - Otherwise allowed only if at least one allow matched; a non-empty list
///   where nothing matches is denied.
pub fn evaluate(rules: &[Rule], platform: &PlatformDescriptor, features: &FeatureFlags) -> bool {
    let (allowed, diagnostics) = evaluate_with_diagnostics(rules, platform, features);
    for diagnostic in diagnostics {
        match diagnostic {
            RuleDiagnostic::UnknownFeature(flag) => {
                warn!("Rule references unknown feature flag '{}', treating as false", flag)
            }
            RuleDiagnostic::InvalidVersionPattern(pattern) => {
                warn!("Invalid os.version pattern '{}', treating as no match", pattern)
            }
        }
    }
    allowed
}

/// Same as [`evaluate`], returning diagnostics instead of logging them.
pub fn evaluate_with_diagnostics(
    rules: &[Rule],
    platform: &PlatformDescriptor,
    features: &FeatureFlags,
) -> (bool, Vec<RuleDiagnostic>) {
    if rules.is_empty() {
        return (true, Vec::new());
    }

    let mut diagnostics = Vec::new();
    let mut verdict = Verdict::NoMatch;

    for rule in rules {
        let condition_met = os_matches(rule.os.as_ref(), platform, &mut diagnostics)
            && features_match(rule.features.as_ref(), features, &mut diagnostics);
        if !condition_met {
            continue;
        }

        verdict = verdict.absorb(rule.action);
        if verdict == Verdict::Denied {
            break;
        }
    }

    (verdict.into_bool(), diagnostics)
}

fn os_matches(
    constraint: Option<&OsConstraint>,
    platform: &PlatformDescriptor,
    diagnostics: &mut Vec<RuleDiagnostic>,
) -> bool {
    let Some(os) = constraint else {
        return true;
    };

    if let Some(name) = &os.name {
        if !name.eq_ignore_ascii_case(platform.os_name()) {
            return false;
        }
    }

    if let Some(arch) = &os.arch {
        if !arch.eq_ignore_ascii_case(platform.arch_name()) {
            return false;
        }
    }

    if let Some(pattern) = &os.version {
        let Some(version) = platform.os_version.as_deref() else {
            return false;
        };
        match Regex::new(pattern) {
            Ok(re) => {
                if !re.is_match(version) {
                    return false;
                }
            }
            Err(_) => {
                diagnostics.push(RuleDiagnostic::InvalidVersionPattern(pattern.clone()));
                return false;
            }
        }
    }

    true
}

fn features_match(
    constraint: Option<&BTreeMap<String, bool>>,
    features: &FeatureFlags,
    diagnostics: &mut Vec<RuleDiagnostic>,
) -> bool {
    let Some(required) = constraint else {
        return true;
    };

    let mut all_match = true;
    for (flag, expected) in required {
        let actual = match features.get(flag) {
            Some(value) => value,
            None => {
                diagnostics.push(RuleDiagnostic::UnknownFeature(flag.clone()));
                false
            }
        };
        if actual != *expected {
            all_match = false;
        }
    }
    all_match
}
