//! Solidity compiler profiles.
//!
//! The contracts are compiled by the external toolchain; these profiles record the
//! versions and settings that build is expected to use, so the deployer can flag a
//! build-info that was produced with something else before it is sent to a verifier.

use std::collections::BTreeMap;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Source path of Uniswap's `TickMath` library, which only compiles with 0.7.
pub const TICK_MATH_SOURCE: &str = "@uniswap/v3-core/contracts/libraries/TickMath.sol";

const DEFAULT_OPTIMIZER_RUNS: u32 = 200;

/// solc optimizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    /// Whether the optimizer runs at all.
    #[serde(default)]
    pub enabled: bool,
    /// Expected number of contract executions the optimizer tunes for.
    #[serde(default = "default_runs")]
    pub runs: u32,
}

const fn default_runs() -> u32 {
    DEFAULT_OPTIMIZER_RUNS
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self { enabled: false, runs: DEFAULT_OPTIMIZER_RUNS }
    }
}

impl OptimizerSettings {
    /// Optimizer on with 200 runs, the project's setting for every compiler.
    pub const fn enabled() -> Self {
        Self { enabled: true, runs: DEFAULT_OPTIMIZER_RUNS }
    }
}

/// The subset of solc `settings` the project pins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolcSettings {
    /// Optimizer configuration.
    #[serde(default)]
    pub optimizer: OptimizerSettings,
    /// Compile through the Yul IR pipeline.
    #[serde(default, rename = "viaIR")]
    pub via_ir: bool,
}

impl SolcSettings {
    /// Renders the settings as the `settings` object of solc standard-JSON input.
    pub fn to_standard_json(&self) -> Value {
        json!({
            "optimizer": {
                "enabled": self.optimizer.enabled,
                "runs": self.optimizer.runs,
            },
            "viaIR": self.via_ir,
        })
    }

    /// Reads the pinned settings back out of a standard-JSON `settings` object.
    ///
    /// Missing keys take solc's defaults.
    pub fn from_standard_json(settings: &Value) -> Self {
        let optimizer = &settings["optimizer"];
        Self {
            optimizer: OptimizerSettings {
                enabled: optimizer["enabled"].as_bool().unwrap_or(false),
                runs: optimizer["runs"]
                    .as_u64()
                    .and_then(|runs| u32::try_from(runs).ok())
                    .unwrap_or(DEFAULT_OPTIMIZER_RUNS),
            },
            via_ir: settings["viaIR"].as_bool().unwrap_or(false),
        }
    }
}

/// A compiler version together with its settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerProfile {
    /// Short solc version, e.g. `0.8.24`.
    pub version: String,
    /// Settings passed to that compiler.
    #[serde(default)]
    pub settings: SolcSettings,
}

impl CompilerProfile {
    /// A profile with the project's standard settings (optimizer on, 200 runs, viaIR).
    pub fn optimized(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            settings: SolcSettings { optimizer: OptimizerSettings::enabled(), via_ir: true },
        }
    }

    /// A profile with solc's default settings.
    pub fn plain(version: impl Into<String>) -> Self {
        Self { version: version.into(), settings: SolcSettings::default() }
    }
}

/// A difference between a build-info and the configured compiler profiles.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BuildMismatch {
    /// The build used a compiler version that no profile names.
    #[display("solc {actual} is not one of the configured compilers")]
    UnknownCompiler {
        /// Version reported by the build.
        actual: String,
    },
    /// The source has an override pinning a different version.
    #[display("source is pinned to solc {expected} but was built with {actual}")]
    Version {
        /// Version from the override.
        expected: String,
        /// Version reported by the build.
        actual: String,
    },
    /// Optimizer settings differ.
    #[display(
        "optimizer expected enabled={} runs={}, build used enabled={} runs={}",
        expected.enabled,
        expected.runs,
        actual.enabled,
        actual.runs
    )]
    Optimizer {
        /// Configured optimizer.
        expected: OptimizerSettings,
        /// Optimizer reported by the build.
        actual: OptimizerSettings,
    },
    /// The viaIR flag differs.
    #[display("viaIR expected {expected}, build used {actual}")]
    ViaIr {
        /// Configured flag.
        expected: bool,
        /// Flag reported by the build.
        actual: bool,
    },
}

/// Compiler versions used by the project plus per-source overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Available compilers, preferred first.
    pub compilers: Vec<CompilerProfile>,
    /// Source path → profile that must be used for it.
    #[serde(default)]
    pub overrides: BTreeMap<String, CompilerProfile>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            compilers: vec![
                CompilerProfile::optimized("0.8.24"),
                CompilerProfile::optimized("0.8.20"),
                CompilerProfile::optimized("0.7.6"),
            ],
            overrides: BTreeMap::from([(
                TICK_MATH_SOURCE.to_string(),
                CompilerProfile::plain("0.7.6"),
            )]),
        }
    }
}

impl CompilerConfig {
    /// Returns the override for `source`, or the preferred compiler.
    pub fn profile_for(&self, source: &str) -> Option<&CompilerProfile> {
        self.overrides.get(source).or_else(|| self.compilers.first())
    }

    /// Returns the configured profile with exactly this version.
    pub fn profile_for_version(&self, version: &str) -> Option<&CompilerProfile> {
        self.compilers.iter().find(|profile| profile.version == version)
    }

    /// Compares what a build-info reports for `source` against the configuration.
    ///
    /// `settings` is the standard-JSON `settings` object from the build input. An empty
    /// result means the build matches.
    pub fn check_build(
        &self,
        source: &str,
        solc_version: &str,
        settings: &Value,
    ) -> Vec<BuildMismatch> {
        let expected = match self.overrides.get(source) {
            Some(pinned) if pinned.version != solc_version => {
                return vec![BuildMismatch::Version {
                    expected: pinned.version.clone(),
                    actual: solc_version.to_string(),
                }];
            }
            Some(pinned) => pinned,
            None => match self.profile_for_version(solc_version) {
                Some(profile) => profile,
                None => {
                    return vec![BuildMismatch::UnknownCompiler {
                        actual: solc_version.to_string(),
                    }];
                }
            },
        };

        let actual = SolcSettings::from_standard_json(settings);
        let mut mismatches = Vec::new();
        if actual.optimizer != expected.settings.optimizer {
            mismatches.push(BuildMismatch::Optimizer {
                expected: expected.settings.optimizer,
                actual: actual.optimizer,
            });
        }
        if actual.via_ir != expected.settings.via_ir {
            mismatches.push(BuildMismatch::ViaIr {
                expected: expected.settings.via_ir,
                actual: actual.via_ir,
            });
        }
        mismatches
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn default_compilers_are_optimized_with_via_ir() {
        let config = CompilerConfig::default();
        let versions: Vec<_> = config.compilers.iter().map(|p| p.version.as_str()).collect();
        assert_eq!(versions, ["0.8.24", "0.8.20", "0.7.6"]);

        for profile in &config.compilers {
            assert!(profile.settings.optimizer.enabled);
            assert_eq!(profile.settings.optimizer.runs, 200);
            assert!(profile.settings.via_ir);
        }
    }

    #[rstest]
    #[case::override_applies(TICK_MATH_SOURCE, "0.7.6")]
    #[case::default_is_newest("contracts/LabelFactory.sol", "0.8.24")]
    fn profile_for_source(#[case] source: &str, #[case] version: &str) {
        let config = CompilerConfig::default();
        assert_eq!(config.profile_for(source).unwrap().version, version);
    }

    #[test]
    fn override_uses_solc_default_settings() {
        let config = CompilerConfig::default();
        let profile = config.profile_for(TICK_MATH_SOURCE).unwrap();
        assert_eq!(profile.settings, SolcSettings::default());
    }

    #[test]
    fn standard_json_settings_round_trip() {
        let settings = CompilerProfile::optimized("0.8.24").settings;
        let json = settings.to_standard_json();

        assert_eq!(json["optimizer"]["enabled"], true);
        assert_eq!(json["optimizer"]["runs"], 200);
        assert_eq!(json["viaIR"], true);
        assert_eq!(SolcSettings::from_standard_json(&json), settings);
    }

    #[test]
    fn matching_build_has_no_mismatches() {
        let config = CompilerConfig::default();
        let settings = json!({"optimizer": {"enabled": true, "runs": 200}, "viaIR": true});
        let mismatches = config.check_build("contracts/ArtChartFactory.sol", "0.8.20", &settings);
        assert!(mismatches.is_empty());
    }

    #[test]
    fn unknown_compiler_is_reported() {
        let config = CompilerConfig::default();
        let mismatches = config.check_build("contracts/A.sol", "0.8.26", &json!({}));
        assert_eq!(
            mismatches,
            vec![BuildMismatch::UnknownCompiler { actual: "0.8.26".to_string() }]
        );
    }

    #[test]
    fn pinned_source_with_other_version_is_reported() {
        let config = CompilerConfig::default();
        let mismatches = config.check_build(TICK_MATH_SOURCE, "0.8.24", &json!({}));
        assert_eq!(
            mismatches,
            vec![BuildMismatch::Version { expected: "0.7.6".into(), actual: "0.8.24".into() }]
        );
    }

    #[test]
    fn settings_drift_is_reported() {
        let config = CompilerConfig::default();
        let settings = json!({"optimizer": {"enabled": true, "runs": 1000}});
        let mismatches = config.check_build("contracts/A.sol", "0.8.24", &settings);

        assert_eq!(mismatches.len(), 2);
        assert!(matches!(mismatches[0], BuildMismatch::Optimizer { .. }));
        assert_eq!(mismatches[1], BuildMismatch::ViaIr { expected: true, actual: false });
        assert_eq!(mismatches[1].to_string(), "viaIR expected true, build used false");
    }
}
