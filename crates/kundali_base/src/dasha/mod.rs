//! Proportional dasha trees: Vimshottari, Yogini, and the annual Mudda dasha.
//!
//! All three share one builder: a lord sequence with year weights, a
//! nakshatra-to-lord map seeding the first period from the Moon, and a
//! recursive split where every level repeats the sequence from the parent's
//! own lord.

pub mod balance;
pub mod query;
pub mod scheme;
pub mod tree;
pub mod types;

pub use balance::{DashaBalance, nakshatra_birth_balance};
pub use query::{ActivePeriod, DashaSnapshot, active_periods, periods_at_level};
pub use scheme::{DashaScheme, MUDDA, VIMSHOTTARI, VIMSHOTTARI_YEARS, YOGINI};
pub use tree::{
    BalanceMode, DashaOptions, DashaTree, build_dasha_tree, mudda_dasha, vimshottari_dasha,
    yogini_dasha,
};
pub use types::{
    DAYS_PER_YEAR, DEFAULT_DASHA_DEPTH, DashaLevel, DashaLord, DashaNode, DashaSystem,
    MAX_DASHA_DEPTH, Yogini,
};
