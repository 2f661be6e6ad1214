//! 데모 데이터 모듈
//!
//! - Deterministic demo squads and 4-4-2 team sheets (tests, CLI)
//! - Seeded random squads for development runs

pub mod generator;

pub use generator::{demo_match, demo_sheet, demo_squad, generate_squad, FORMATION_442};
