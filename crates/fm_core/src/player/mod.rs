//! Player Model
//!
//! ## 모듈 구조
//! - `skill_model`: effective skill / position fit (match time)
//! - `condition`: weekly condition-arrow transitions
//! - `valuation`: market value and wage
//! - `development`: weekly tick + season boundary processor
//! - `season_update`: match result → season stats

pub mod condition;
pub mod development;
pub mod season_update;
pub mod skill_model;
pub mod valuation;

pub use condition::{ConditionTransitions, TransitionRow};
pub use development::{
    AdvanceReport, DevelopmentConfig, DevelopmentProcessor, RetirementConfig, SeasonReport,
    SkillChange, WeeklyReport,
};
pub use season_update::{apply_match_result, SeasonUpdateConfig};
pub use skill_model::{effective_skill, has_chemistry, position_fit, PositionFit};
pub use valuation::ValuationConfig;
