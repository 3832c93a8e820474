//! Pure-math Vedic chart engine over resolved sidereal longitudes.
//!
//! This crate provides:
//! - Position normalization (sign, degree, nakshatra, pada, DMS)
//! - Whole-sign houses and house classification
//! - Divisional charts for any D-N with Vargottama detection
//! - Dignity, natural friendship, and combustion
//! - Vimshottari, Yogini, and Mudda dasha trees with active-period lookup
//! - Ashtakavarga (BAV, SAV, sodhana)
//! - Varshaphala: Muntha, sahams, Tajika aspects and yogas
//! - Ashta-koota compatibility and the Manglik check
//! - A declarative yoga rule table
//!
//! Nothing here touches an ephemeris or performs I/O. Inputs are
//! [`SiderealPositions`]; every output is a plain serializable value.

pub mod ashtakavarga;
pub mod aspect;
pub mod chart;
pub mod dasha;
pub mod dignity;
pub mod error;
pub mod graha;
pub mod house;
pub mod koota;
pub mod manglik;
pub mod nakshatra;
pub mod position;
pub mod rashi;
pub mod util;
pub mod varga;
pub mod varshaphala;
pub mod yoga;

pub use ashtakavarga::{
    AshtakavargaTable, BAV_TOTALS, Bav, SAV_TOTAL, ashtakavarga, ashtakavarga_from_signs,
    bav_points, ekadhipatya_sodhana, trikona_sodhana,
};
pub use aspect::{aspected_houses, aspected_signs, aspects_sign};
pub use chart::{Chart, ChartKind, Placement};
pub use dasha::{
    ActivePeriod, BalanceMode, DAYS_PER_YEAR, DEFAULT_DASHA_DEPTH, DashaBalance, DashaLevel,
    DashaLord, DashaNode, DashaOptions, DashaScheme, DashaSnapshot, DashaSystem, DashaTree,
    MAX_DASHA_DEPTH, Yogini, build_dasha_tree, mudda_dasha, vimshottari_dasha, yogini_dasha,
};
pub use dignity::{
    Dignity, Relationship, combustion_orb, debilitation_sign, dignity_in_rashi,
    exaltation_degree, exaltation_sign, is_combust, is_natural_benefic, is_natural_malefic,
    naisargika_maitri, own_signs, relationship_with_sign_lord,
};
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Body, Graha, SAPTA_GRAHAS, rashi_lord, rashi_lord_by_index};
pub use house::{
    house_between, house_from, house_lord, is_apoklima, is_dusthana, is_kendra, is_panaphara,
    is_trikona, is_upachaya, sign_of_house,
};
pub use koota::{
    Gana, Koota, KootaPoints, KootaScore, MAX_KOOTA_SCORE, MoonProfile, Nadi, VashyaGroup,
    Verdict, Yoni, ashta_koota, score_profiles,
};
pub use manglik::{ManglikCancellation, ManglikReport, ManglikSeverity, manglik};
pub use nakshatra::{
    ALL_NAKSHATRAS_27, NAKSHATRA_SPAN_27, Nakshatra, NakshatraInfo, nakshatra_from_longitude,
};
pub use position::{PositionInfo, SiderealPositions, normalize_position};
pub use rashi::{
    ALL_RASHIS, Dms, Rashi, RashiInfo, deg_to_dms, dms_to_deg, rashi_from_longitude,
};
pub use util::{angular_distance, forward_arc, normalize_360, normalize_to_pm180};
pub use varga::{
    PRESET_VARGAS, Varga, is_vargottama, navamsha_rashi, varga_longitude, varga_rashi,
    varga_sign,
};
pub use varshaphala::{
    DEFAULT_SAHAMS, FAVORABLE_MUNTHA_HOUSES, Muntha, Saham, SahamFormula, SahamPoint, TajikaAspect, TajikaAspectKind,
    TajikaOrbs, TajikaStrength, TajikaYoga, TajikaYogaKind, VarshaphalaChart, VarshaphalaOptions,
    build_varshaphala, is_favorable_muntha_house, muntha, sahams, tajika_aspects, tajika_yogas,
};
pub use yoga::{YOGA_RULES, YogaCategory, YogaMatch, YogaRule, detect_yogas, detect_yogas_with};
