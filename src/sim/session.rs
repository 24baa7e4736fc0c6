//! State handed from one scene to the next

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::assets::{Hat, Pet, Skin};
use super::character::PlayerId;
use crate::prefs::Preferences;

/// A lobby participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    pub color: u32,
    pub ready: bool,
    pub is_local: bool,
}

/// Maps offered by the host menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MapChoice {
    #[default]
    TheSkeld,
    MiraHq,
    Polus,
}

impl MapChoice {
    pub const ALL: [MapChoice; 3] = [MapChoice::TheSkeld, MapChoice::MiraHq, MapChoice::Polus];

    pub fn display_name(&self) -> &'static str {
        match self {
            MapChoice::TheSkeld => "The Skeld",
            MapChoice::MiraHq => "MIRA HQ",
            MapChoice::Polus => "Polus",
        }
    }

    /// Lowercased display name with the first space replaced by `_`
    pub fn key(&self) -> &'static str {
        match self {
            MapChoice::TheSkeld => "the_skeld",
            MapChoice::MiraHq => "mira_hq",
            MapChoice::Polus => "polus",
        }
    }

    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

pub const MIN_IMPOSTORS: u8 = 1;
pub const MAX_IMPOSTORS: u8 = 3;
pub const MIN_TASKS: u8 = 1;
pub const MAX_TASKS: u8 = 5;

/// Host-chosen game options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSettings {
    pub impostor_count: u8,
    pub task_count: u8,
    pub map: MapChoice,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            impostor_count: 1,
            task_count: 3,
            map: MapChoice::TheSkeld,
        }
    }
}

impl HostSettings {
    /// Adjust the impostor count by `delta`, staying within 1..=3
    pub fn change_impostors(&mut self, delta: i8) {
        self.impostor_count = (self.impostor_count as i8 + delta)
            .clamp(MIN_IMPOSTORS as i8, MAX_IMPOSTORS as i8) as u8;
    }

    /// Adjust the task count by `delta`, staying within 1..=5
    pub fn change_tasks(&mut self, delta: i8) {
        self.task_count =
            (self.task_count as i8 + delta).clamp(MIN_TASKS as i8, MAX_TASKS as i8) as u8;
    }

    pub fn cycle_map(&mut self) {
        self.map = self.map.next();
    }
}

/// Cosmetics picked in the dropship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outfit {
    pub hat: Option<Hat>,
    pub skin: Option<Skin>,
    pub pet: Option<Pet>,
}

/// Cross-scene registry
#[derive(Debug, Clone)]
pub struct Session {
    pub prefs: Preferences,
    pub players: Vec<PlayerRecord>,
    pub local_player: Option<PlayerId>,
    pub is_impostor: bool,
    pub host_settings: HostSettings,
    pub outfit: Outfit,
    /// Touch input detected; enables the joystick
    pub touch_mode: bool,
    pub rng: Pcg32,
}

impl Session {
    pub fn new(prefs: Preferences, seed: u64) -> Self {
        Self {
            prefs,
            players: Vec::new(),
            local_player: None,
            is_impostor: false,
            host_settings: HostSettings::default(),
            outfit: Outfit::default(),
            touch_mode: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_settings_limits() {
        let mut hs = HostSettings::default();
        assert_eq!((hs.impostor_count, hs.task_count), (1, 3));
        hs.change_impostors(-1);
        assert_eq!(hs.impostor_count, 1);
        for _ in 0..5 {
            hs.change_impostors(1);
        }
        assert_eq!(hs.impostor_count, 3);
        for _ in 0..5 {
            hs.change_tasks(1);
        }
        assert_eq!(hs.task_count, 5);
        for _ in 0..9 {
            hs.change_tasks(-1);
        }
        assert_eq!(hs.task_count, 1);
    }

    #[test]
    fn test_map_cycle_and_keys() {
        let mut hs = HostSettings::default();
        assert_eq!(hs.map.key(), "the_skeld");
        hs.cycle_map();
        assert_eq!(hs.map, MapChoice::MiraHq);
        assert_eq!(hs.map.key(), "mira_hq");
        hs.cycle_map();
        hs.cycle_map();
        assert_eq!(hs.map, MapChoice::TheSkeld);
        for map in MapChoice::ALL {
            let derived = map.display_name().to_lowercase().replacen(' ', "_", 1);
            assert_eq!(derived, map.key());
        }
    }
}
