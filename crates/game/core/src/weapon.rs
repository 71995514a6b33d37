//! Weapons and their balance tables.
//!
//! A [`WeaponProfile`] is the unit captured when a shot is accepted: cooldown,
//! radius and damage travel together so a weapon switch can never mix old and
//! new parameters within one shot.

use crate::pose::BodyRegion;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Weapon {
    Sniper,
    #[default]
    Pistol,
    Shotgun,
}

impl Weapon {
    /// Default balance profile for this weapon.
    pub const fn profile(self) -> WeaponProfile {
        match self {
            Self::Sniper => WeaponProfile {
                weapon: self,
                cooldown_ms: 400,
                radius: 160.0,
                damage: RegionDamage::new(40, 15, 10),
            },
            Self::Pistol => WeaponProfile {
                weapon: self,
                cooldown_ms: 200,
                radius: 150.0,
                damage: RegionDamage::STANDARD,
            },
            Self::Shotgun => WeaponProfile {
                weapon: self,
                cooldown_ms: 600,
                radius: 250.0,
                damage: RegionDamage::STANDARD,
            },
        }
    }
}

/// Damage dealt per body region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionDamage {
    pub head: u32,
    pub torso: u32,
    pub lower_body: u32,
}

impl RegionDamage {
    pub const STANDARD: Self = Self::new(20, 15, 10);

    pub const fn new(head: u32, torso: u32, lower_body: u32) -> Self {
        Self {
            head,
            torso,
            lower_body,
        }
    }

    pub const fn for_region(&self, region: BodyRegion) -> u32 {
        match region {
            BodyRegion::Head => self.head,
            BodyRegion::Torso => self.torso,
            BodyRegion::LowerBody => self.lower_body,
        }
    }
}

/// Everything a shot needs to know about the weapon that fired it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponProfile {
    pub weapon: Weapon,
    /// Minimum time between accepted shots.
    pub cooldown_ms: u64,
    /// Hit-detection radius around the crosshair, in frame pixels.
    pub radius: f32,
    pub damage: RegionDamage,
}

impl WeaponProfile {
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }
}

/// Oracle providing weapon balance tables.
///
/// Defines the profile used for a weapon without fixing where those numbers
/// come from (constants, configuration, server-pushed tables).
pub trait WeaponTable: Send + Sync {
    fn profile(&self, weapon: Weapon) -> WeaponProfile;
}

/// Built-in balance table.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultArsenal;

impl WeaponTable for DefaultArsenal {
    fn profile(&self, weapon: Weapon) -> WeaponProfile {
        weapon.profile()
    }
}

/// Balance table with per-weapon radius overrides.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arsenal {
    pub sniper_radius: Option<f32>,
    pub pistol_radius: Option<f32>,
    pub shotgun_radius: Option<f32>,
}

impl Arsenal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_radius(&mut self, weapon: Weapon, radius: f32) {
        let slot = match weapon {
            Weapon::Sniper => &mut self.sniper_radius,
            Weapon::Pistol => &mut self.pistol_radius,
            Weapon::Shotgun => &mut self.shotgun_radius,
        };
        *slot = Some(radius);
    }

    fn radius_override(&self, weapon: Weapon) -> Option<f32> {
        match weapon {
            Weapon::Sniper => self.sniper_radius,
            Weapon::Pistol => self.pistol_radius,
            Weapon::Shotgun => self.shotgun_radius,
        }
    }
}

impl WeaponTable for Arsenal {
    fn profile(&self, weapon: Weapon) -> WeaponProfile {
        let base = weapon.profile();
        match self.radius_override(weapon) {
            Some(radius) => base.with_radius(radius),
            None => base,
        }
    }
}
