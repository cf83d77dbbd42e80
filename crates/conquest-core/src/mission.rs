//! Mission catalog and mission verification.
//!
//! Every session draws exactly one [`MissionKind`] at start. Once per turn the
//! [`MissionVerifier`] checks it against the live registry; a satisfied
//! mission ends the game.

use crate::randomness::RandomnessSource;
use crate::registry::Registry;
use crate::types::TroopCount;
use serde::{Deserialize, Serialize};

/// The fixed catalog of objectives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionKind {
    /// Hold at least three territories named "Alpha".
    ConquerAlpha,
    /// Have at least 15 troops across your territories.
    TotalTroops,
    /// Leave the Red faction with no troops on the map.
    EliminateRed,
    /// Own both the first and the last registered territory.
    FirstAndLast,
    /// Keep more than 3 troops in every territory you own.
    Garrison,
}

impl MissionKind {
    /// Catalog order. Draws index into this slice.
    pub const ALL: [MissionKind; 5] = [
        MissionKind::ConquerAlpha,
        MissionKind::TotalTroops,
        MissionKind::EliminateRed,
        MissionKind::FirstAndLast,
        MissionKind::Garrison,
    ];

    /// Canonical mission text.
    pub const fn text(&self) -> &'static str {
        match self {
            MissionKind::ConquerAlpha => "Conquer at least 3 territories named 'Alpha'.",
            MissionKind::TotalTroops => "Have at least 15 troops on the map.",
            MissionKind::EliminateRed => "Eliminate all troops of the color 'Red'.",
            MissionKind::FirstAndLast => {
                "Conquer the first and last registered territory (indices 0 and N-1)."
            }
            MissionKind::Garrison => "Have more than 3 troops in every one of your territories.",
        }
    }

    /// Draw one mission uniformly from the catalog.
    pub fn assign(rng: &mut impl RandomnessSource) -> MissionKind {
        let index = rng.pick_index(Self::ALL.len());
        let mission = Self::ALL[index.min(Self::ALL.len() - 1)];
        tracing::debug!(index, ?mission, "mission drawn");
        mission
    }
}

impl std::fmt::Display for MissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Current standing toward a mission, for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionProgress {
    /// Short human-readable status line.
    pub summary: String,
    /// Whether the mission is complete.
    pub satisfied: bool,
}

/// Evaluates missions against the registry on behalf of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionVerifier {
    /// Faction the player controls.
    pub player_faction: String,
    /// Territory name counted by the "Alpha" mission.
    pub alpha_name: String,
    /// Number of such territories needed.
    pub alpha_target: usize,
    /// Troops needed by the total-troops mission.
    pub troop_target: i64,
    /// Faction that must be eliminated.
    pub eliminate_faction: String,
    /// Every player territory must hold strictly more than this.
    pub garrison_minimum: TroopCount,
}

impl MissionVerifier {
    /// Verifier with the canonical thresholds for `player_faction`.
    pub fn new(player_faction: impl Into<String>) -> Self {
        Self {
            player_faction: player_faction.into(),
            alpha_name: "Alpha".to_string(),
            alpha_target: 3,
            troop_target: 15,
            eliminate_faction: "Red".to_string(),
            garrison_minimum: 3,
        }
    }

    /// Check whether `mission` is currently met. Never mutates the registry.
    pub fn is_satisfied(&self, mission: MissionKind, registry: &Registry) -> bool {
        if registry.is_empty() {
            return false;
        }
        match mission {
            MissionKind::ConquerAlpha => self.alpha_held(registry) >= self.alpha_target,
            MissionKind::TotalTroops => self.player_troops(registry) >= self.troop_target,
            MissionKind::EliminateRed => self.enemy_troops(registry) == 0,
            MissionKind::FirstAndLast => self.ends_held(registry) == 2,
            MissionKind::Garrison => {
                let (owned, garrisoned) = self.garrison_counts(registry);
                owned > 0 && owned == garrisoned
            }
        }
    }

    /// Mission text using this verifier's thresholds.
    pub fn describe(&self, mission: MissionKind) -> String {
        match mission {
            MissionKind::ConquerAlpha => format!(
                "Conquer at least {} territories named '{}'.",
                self.alpha_target, self.alpha_name
            ),
            MissionKind::TotalTroops => {
                format!("Have at least {} troops on the map.", self.troop_target)
            }
            MissionKind::EliminateRed => format!(
                "Eliminate all troops of the color '{}'.",
                self.eliminate_faction
            ),
            MissionKind::FirstAndLast => mission.text().to_string(),
            MissionKind::Garrison => format!(
                "Have more than {} troops in every one of your territories.",
                self.garrison_minimum
            ),
        }
    }

    /// Progress toward `mission`.
    pub fn progress(&self, mission: MissionKind, registry: &Registry) -> MissionProgress {
        let summary = match mission {
            MissionKind::ConquerAlpha => format!(
                "{}/{} territories named '{}' held",
                self.alpha_held(registry),
                self.alpha_target,
                self.alpha_name
            ),
            MissionKind::TotalTroops => format!(
                "{}/{} troops",
                self.player_troops(registry),
                self.troop_target
            ),
            MissionKind::EliminateRed => format!(
                "{} '{}' troops remaining",
                self.enemy_troops(registry),
                self.eliminate_faction
            ),
            MissionKind::FirstAndLast => {
                format!("{}/2 end territories held", self.ends_held(registry))
            }
            MissionKind::Garrison => {
                let (owned, garrisoned) = self.garrison_counts(registry);
                format!(
                    "{}/{} territories with more than {} troops",
                    garrisoned, owned, self.garrison_minimum
                )
            }
        };
        MissionProgress {
            summary,
            satisfied: self.is_satisfied(mission, registry),
        }
    }

    fn alpha_held(&self, registry: &Registry) -> usize {
        registry
            .territories_of(&self.player_faction)
            .filter(|t| t.name == self.alpha_name)
            .count()
    }

    fn player_troops(&self, registry: &Registry) -> i64 {
        registry.troops_of(&self.player_faction)
    }

    fn enemy_troops(&self, registry: &Registry) -> i64 {
        registry.troops_of(&self.eliminate_faction)
    }

    fn ends_held(&self, registry: &Registry) -> usize {
        if registry.len() < 2 {
            return 0;
        }
        [registry.first(), registry.last()]
            .into_iter()
            .flatten()
            .filter(|t| t.is_owned_by(&self.player_faction))
            .count()
    }

    fn garrison_counts(&self, registry: &Registry) -> (usize, usize) {
        let mut owned = 0;
        let mut garrisoned = 0;
        for territory in registry.territories_of(&self.player_faction) {
            owned += 1;
            if territory.troop_count > self.garrison_minimum {
                garrisoned += 1;
            }
        }
        (owned, garrisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomness::ScriptedRandomness;
    use crate::territory::Territory;

    fn registry(territories: &[(&str, &str, i32)]) -> Registry {
        Registry::from_territories(
            territories
                .iter()
                .map(|&(name, faction, troops)| Territory::new(name, faction, troops))
                .collect(),
        )
        .unwrap()
    }

    // ==================== Catalog ====================

    #[test]
    fn test_catalog_text_and_order() {
        assert_eq!(MissionKind::ALL.len(), 5);
        assert_eq!(
            MissionKind::ALL[0].text(),
            "Conquer at least 3 territories named 'Alpha'."
        );
        assert_eq!(MissionKind::ALL[1].text(), "Have at least 15 troops on the map.");
        assert_eq!(
            MissionKind::ALL[2].text(),
            "Eliminate all troops of the color 'Red'."
        );
        assert_eq!(
            MissionKind::ALL[3].text(),
            "Conquer the first and last registered territory (indices 0 and N-1)."
        );
        assert_eq!(
            MissionKind::ALL[4].text(),
            "Have more than 3 troops in every one of your territories."
        );
    }

    #[test]
    fn test_assign_uses_pick() {
        for (index, expected) in MissionKind::ALL.iter().enumerate() {
            let mut rng = ScriptedRandomness::new().and_picks([index]);
            assert_eq!(MissionKind::assign(&mut rng), *expected);
        }
    }

    #[test]
    fn test_default_describe_matches_catalog() {
        let verifier = MissionVerifier::new("Blue");
        for mission in MissionKind::ALL {
            assert_eq!(verifier.describe(mission), mission.text());
        }
    }

    // ==================== Total troops ====================

    #[test]
    fn test_total_troops_threshold() {
        let verifier = MissionVerifier::new("Blue");
        let short = registry(&[("A", "Blue", 10), ("B", "Red", 30), ("C", "Blue", 4)]);
        let exact = registry(&[("A", "Blue", 10), ("B", "Red", 30), ("C", "Blue", 5)]);

        assert!(!verifier.is_satisfied(MissionKind::TotalTroops, &short));
        assert!(verifier.is_satisfied(MissionKind::TotalTroops, &exact));
    }

    // ==================== Eliminate Red ====================

    #[test]
    fn test_red_with_zero_troops_counts_as_eliminated() {
        let verifier = MissionVerifier::new("Blue");
        let empty_red = registry(&[("A", "Blue", 5), ("B", "Red", 0)]);
        let one_red = registry(&[("A", "Blue", 5), ("B", "Red", 1)]);
        let no_red = registry(&[("A", "Blue", 5), ("B", "Green", 4)]);

        assert!(verifier.is_satisfied(MissionKind::EliminateRed, &empty_red));
        assert!(!verifier.is_satisfied(MissionKind::EliminateRed, &one_red));
        assert!(verifier.is_satisfied(MissionKind::EliminateRed, &no_red));
    }

    // ==================== First and last ====================

    #[test]
    fn test_first_and_last_needs_two_territories() {
        let verifier = MissionVerifier::new("Blue");
        let single = registry(&[("A", "Blue", 5)]);
        assert!(!verifier.is_satisfied(MissionKind::FirstAndLast, &single));
    }

    #[test]
    fn test_first_and_last_ignores_middle() {
        let verifier = MissionVerifier::new("Blue");
        let held = registry(&[
            ("A", "Blue", 5),
            ("B", "Red", 3),
            ("C", "Green", 3),
            ("D", "Blue", 1),
        ]);
        let missing_last = registry(&[
            ("A", "Blue", 5),
            ("B", "Blue", 3),
            ("C", "Blue", 3),
            ("D", "Red", 1),
        ]);
        let missing_first = registry(&[
            ("A", "Red", 5),
            ("B", "Blue", 3),
            ("C", "Blue", 3),
            ("D", "Blue", 1),
        ]);

        assert!(verifier.is_satisfied(MissionKind::FirstAndLast, &held));
        assert!(!verifier.is_satisfied(MissionKind::FirstAndLast, &missing_last));
        assert!(!verifier.is_satisfied(MissionKind::FirstAndLast, &missing_first));
    }

    // ==================== Alpha ====================

    #[test]
    fn test_conquer_alpha_counts_owned_only() {
        let verifier = MissionVerifier::new("Blue");
        let two = registry(&[
            ("Alpha", "Blue", 2),
            ("Alpha", "Blue", 2),
            ("Alpha", "Red", 2),
        ]);
        let three = registry(&[
            ("Alpha", "Blue", 2),
            ("Alpha", "Blue", 2),
            ("Alpha", "Blue", 0),
            ("Beta", "Red", 2),
        ]);

        assert!(!verifier.is_satisfied(MissionKind::ConquerAlpha, &two));
        assert!(verifier.is_satisfied(MissionKind::ConquerAlpha, &three));
    }

    // ==================== Garrison ====================

    #[test]
    fn test_garrison_requires_more_than_three_everywhere() {
        let verifier = MissionVerifier::new("Blue");
        let strong = registry(&[("A", "Blue", 4), ("B", "Red", 1), ("C", "Blue", 9)]);
        let weak = registry(&[("A", "Blue", 4), ("B", "Red", 1), ("C", "Blue", 3)]);
        let none_owned = registry(&[("A", "Red", 4)]);

        assert!(verifier.is_satisfied(MissionKind::Garrison, &strong));
        assert!(!verifier.is_satisfied(MissionKind::Garrison, &weak));
        assert!(!verifier.is_satisfied(MissionKind::Garrison, &none_owned));
    }

    // ==================== Configuration ====================

    #[test]
    fn test_player_faction_is_explicit() {
        // Player is Green even though slot 0 is Blue.
        let verifier = MissionVerifier::new("Green");
        let board = registry(&[("A", "Blue", 20), ("B", "Green", 15)]);

        assert!(verifier.is_satisfied(MissionKind::TotalTroops, &board));
        assert!(!verifier.is_satisfied(MissionKind::FirstAndLast, &board));
    }

    #[test]
    fn test_custom_thresholds() {
        let verifier = MissionVerifier {
            troop_target: 30,
            eliminate_faction: "Green".to_string(),
            ..MissionVerifier::new("Blue")
        };
        let board = registry(&[("A", "Blue", 20), ("B", "Red", 15), ("C", "Green", 0)]);

        assert!(!verifier.is_satisfied(MissionKind::TotalTroops, &board));
        assert!(verifier.is_satisfied(MissionKind::EliminateRed, &board));
        assert_eq!(
            verifier.describe(MissionKind::TotalTroops),
            "Have at least 30 troops on the map."
        );
    }

    #[test]
    fn test_verification_is_pure() {
        let verifier = MissionVerifier::new("Blue");
        let board = registry(&[("A", "Blue", 5), ("B", "Red", 3)]);
        let snapshot = board.clone();
        for mission in MissionKind::ALL {
            verifier.is_satisfied(mission, &board);
            verifier.progress(mission, &board);
        }
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_progress_summaries() {
        let verifier = MissionVerifier::new("Blue");
        let board = registry(&[("Alpha", "Blue", 5), ("B", "Red", 3), ("C", "Blue", 2)]);

        let troops = verifier.progress(MissionKind::TotalTroops, &board);
        assert_eq!(troops.summary, "7/15 troops");
        assert!(!troops.satisfied);

        let red = verifier.progress(MissionKind::EliminateRed, &board);
        assert_eq!(red.summary, "3 'Red' troops remaining");

        let ends = verifier.progress(MissionKind::FirstAndLast, &board);
        assert_eq!(ends.summary, "2/2 end territories held");
        assert!(ends.satisfied);

        let garrison = verifier.progress(MissionKind::Garrison, &board);
        assert_eq!(garrison.summary, "1/2 territories with more than 3 troops");
    }
}
