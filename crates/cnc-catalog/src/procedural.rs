//! Procedural fallback
//!
//! Guesses a machine profile from tokens in the identifier. Never fails and
//! never claims geometry.

use cnc_resolver::{Descriptor, FallbackProvider, NormalizedId};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Machine class inferred from an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineKind {
    /// Generic vertical mill; the default guess
    ThreeAxisMill,
    /// Mill with one rotary axis
    FourAxisMill,
    /// Simultaneous 5-axis mill
    FiveAxisMill,
    /// Turning center
    Lathe,
    /// Combined milling and turning
    MillTurn,
    /// Gantry router
    Router,
}

/// Token phrases checked in order; first match wins
///
/// A phrase matches a run of consecutive whole tokens, so `5-Axis` and
/// `5ax` both hit while `returning` does not count as `turning`.
const HINTS: &[(&[&[&str]], MachineKind)] = &[
    (&[&["mill", "turn"], &["millturn"]], MachineKind::MillTurn),
    (
        &[&["5ax"], &["5axis"], &["5", "ax"], &["5", "axis"], &["five", "axis"], &["trunnion"]],
        MachineKind::FiveAxisMill,
    ),
    (
        &[&["4ax"], &["4axis"], &["4", "ax"], &["4", "axis"], &["four", "axis"], &["rotary"]],
        MachineKind::FourAxisMill,
    ),
    (&[&["lathe"], &["turning"]], MachineKind::Lathe),
    (&[&["router"], &["gantry"]], MachineKind::Router),
];

impl MachineKind {
    /// Infer kind from identifier tokens
    #[must_use]
    pub fn infer(id: &NormalizedId) -> Self {
        let tokens: Vec<&str> = id.tokens().collect();
        HINTS
            .iter()
            .find(|(phrases, _)| {
                phrases
                    .iter()
                    .any(|phrase| tokens.windows(phrase.len()).any(|run| run == *phrase))
            })
            .map_or(Self::ThreeAxisMill, |(_, kind)| *kind)
    }

    /// Short type tag used in payloads
    #[must_use]
    pub const fn type_tag(self) -> &'static str {
        match self {
            Self::ThreeAxisMill => "3axis",
            Self::FourAxisMill => "4axis",
            Self::FiveAxisMill => "5axis",
            Self::Lathe => "lathe",
            Self::MillTurn => "mill_turn",
            Self::Router => "router",
        }
    }

    /// Nominal controlled axes
    #[must_use]
    pub const fn axes(self) -> u8 {
        match self {
            Self::Lathe => 2,
            Self::ThreeAxisMill | Self::Router => 3,
            Self::FourAxisMill => 4,
            Self::FiveAxisMill | Self::MillTurn => 5,
        }
    }
}

/// Total fallback synthesizing a profile from the identifier
#[derive(Debug, Clone, Copy, Default)]
pub struct ProceduralGenerator;

impl ProceduralGenerator {
    /// Create generator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FallbackProvider for ProceduralGenerator {
    fn name(&self) -> &str {
        "procedural"
    }

    fn generate(&self, id: &NormalizedId) -> Descriptor {
        let kind = MachineKind::infer(id);
        Descriptor::new(json!({
            "id": id.as_str(),
            "type": kind.type_tag(),
            "kind": kind,
            "axes": kind.axes(),
            "procedural": true,
        }))
    }
}
