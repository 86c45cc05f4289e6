//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for countries (index into the scenario roster)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CountryId(pub u32);

impl CountryId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Focus chain instance identifier, unique within one country
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u32);

/// Focus step identifier, unique within one country
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StepId(pub u32);

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Power tier of a country (positional, derived from strength ranking)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Tier {
    Weak = 1,
    Regional = 2,
    Major = 3,
}

impl Tier {
    /// Returns true if this tier outranks the other
    pub fn outranks(&self, other: &Tier) -> bool {
        (*self as u8) > (*other as u8)
    }

    /// Returns true if this tier is at least as high as the other
    pub fn at_least(&self, other: &Tier) -> bool {
        (*self as u8) >= (*other as u8)
    }
}

/// Overall strategy stance of a country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Expansionist,
    Defensive,
    Isolationist,
}

/// Political ideologies, in the order party popularity is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ideology {
    Fascism,
    Democratic,
    Communism,
    Neutrality,
}

impl Ideology {
    pub const ALL: [Ideology; 4] = [
        Ideology::Fascism,
        Ideology::Democratic,
        Ideology::Communism,
        Ideology::Neutrality,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Army doctrines a country can adopt
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Doctrine {
    Blitz,
    Infantry,
    Militia,
    Artillery,
    Armored,
    Mass,
    Support,
    Defensive,
}

/// Named resources tracked per region and country
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Aluminium,
    Chromium,
    Oil,
    Rubber,
    Steel,
    Tungsten,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Aluminium,
        Resource::Chromium,
        Resource::Oil,
        Resource::Rubber,
        Resource::Steel,
        Resource::Tungsten,
    ];
}
