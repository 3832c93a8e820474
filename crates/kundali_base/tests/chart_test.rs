//! Integration tests for position normalization, houses, vargas and dignity.
//!
//! The reference chart is 1990-01-15T08:00:00 at 28.6139 N, 77.2090 E with
//! the Sun at 271.4 deg sidereal; the other longitudes are fixed inputs.

use kundali_base::{
    Body, Chart, ChartKind, Dignity, Graha, Rashi, SiderealPositions, Varga, VedicError,
    is_vargottama, normalize_position, varga_rashi, varga_sign,
};
use pretty_assertions::assert_eq;

fn reference_positions() -> SiderealPositions {
    SiderealPositions::new(
        [271.4, 40.0, 215.0, 260.0, 72.0, 290.0, 265.0, 308.0, 128.0],
        305.0,
    )
}

#[test]
fn reference_d1_chart() {
    let chart = Chart::from_positions(&reference_positions()).unwrap();
    assert_eq!(chart.kind, ChartKind::Varga(Varga::D1));
    assert_eq!(chart.ascendant(), Rashi::Kumbha);
    assert_eq!(chart.lagna.house, 1);
    assert_eq!(chart.lagna.dignity, None);

    let sun = chart.graha(Graha::Surya);
    assert_eq!(sun.rashi, Rashi::Makara);
    assert_eq!(sun.sign, 10);
    assert_eq!(sun.house, 12);
    assert!((sun.degrees_in_sign - 1.4).abs() < 1e-9);

    // Moon exalted in Vrishabha, 4th from Kumbha
    assert_eq!(chart.house_of(Graha::Chandra), 4);
    assert_eq!(chart.dignity_of(Graha::Chandra), Dignity::Exalted);
    // Mars own sign in Vrischika, Jupiter in Mithuna
    assert_eq!(chart.dignity_of(Graha::Mangal), Dignity::OwnSign);
    assert_eq!(chart.house_of(Graha::Guru), 5);
    // Nodes are always neutral
    assert_eq!(chart.dignity_of(Graha::Rahu), Dignity::Neutral);
    assert_eq!(chart.house_of(Graha::Rahu), 1);
    assert_eq!(chart.house_of(Graha::Ketu), 7);
}

#[test]
fn every_placement_has_a_valid_house() {
    let chart = Chart::from_positions(&reference_positions()).unwrap();
    for p in chart.placements() {
        assert!((1..=12).contains(&p.house), "{:?} house {}", p.body, p.house);
        assert!((1..=4).contains(&p.pada));
        if p.body == Body::Lagna {
            assert!(!p.retrograde);
        }
    }
}

#[test]
fn sign_is_stable_modulo_360() {
    for lon in [-725.5, -30.0, -0.1, 0.0, 29.999, 359.99, 360.0, 721.3] {
        let p = normalize_position(lon);
        assert!((1..=12).contains(&p.sign));
        assert_eq!(p.sign, normalize_position(lon.rem_euclid(360.0)).sign);
    }
}

#[test]
fn varga_one_is_identity() {
    let chart = Chart::from_positions(&reference_positions()).unwrap();
    assert_eq!(chart.varga(1).unwrap(), chart);
}

#[test]
fn varga_is_deterministic_and_leaves_source_untouched() {
    let chart = Chart::from_positions(&reference_positions()).unwrap();
    let before = chart.clone();
    let d9a = chart.varga(9).unwrap();
    let d9b = chart.varga(9).unwrap();
    assert_eq!(d9a, d9b);
    assert_eq!(chart, before);
    assert_eq!(d9a.kind, ChartKind::Varga(Varga::D9));
    assert_eq!(d9a.source(), chart.source());
}

#[test]
fn navamsha_of_reference_sun() {
    // 271.4 * 9 / 30 = 81.42 -> floor 81 mod 12 = 9 -> Makara
    assert_eq!(varga_sign(271.4, 9), 10);
    let d9 = Chart::from_positions(&reference_positions())
        .unwrap()
        .varga(9)
        .unwrap();
    assert_eq!(d9.rashi_of(Graha::Surya), Rashi::Makara);
    assert!(d9.graha(Graha::Surya).vargottama);
}

#[test]
fn vargottama_flips_at_navamsha_boundary() {
    // Mesha: first navamsha (0..3deg20') is Mesha itself
    assert!(is_vargottama(3.3));
    assert!(!is_vargottama(3.4));
    assert_eq!(varga_rashi(3.3, 9), Rashi::Mesha);
    assert_eq!(varga_rashi(3.4, 9), Rashi::Vrishabha);

    let mut pos = reference_positions();
    pos.longitudes[Graha::Surya.index() as usize] = 3.3;
    let chart = Chart::from_positions(&pos).unwrap();
    assert!(chart.graha(Graha::Surya).vargottama);

    pos.longitudes[Graha::Surya.index() as usize] = 3.4;
    let chart = Chart::from_positions(&pos).unwrap();
    assert!(!chart.graha(Graha::Surya).vargottama);
}

#[test]
fn vargottama_iff_d9_sign_equals_d1_sign() {
    let mut lon = 0.05;
    while lon < 360.0 {
        let d1 = normalize_position(lon).sign;
        assert_eq!(is_vargottama(lon), varga_sign(lon, 9) == d1, "lon {lon}");
        lon += 0.5;
    }
}

#[test]
fn custom_division_and_zero_rejected() {
    let chart = Chart::from_positions(&reference_positions()).unwrap();
    let d5 = chart.varga(5).unwrap();
    assert_eq!(d5.kind, ChartKind::Varga(Varga::Custom(5)));
    assert_eq!(
        chart.varga(0),
        Err(VedicError::InvalidInput("varga division must be >= 1"))
    );
}

#[test]
fn non_finite_longitude_rejected() {
    let mut pos = reference_positions();
    pos.longitudes[Graha::Guru.index() as usize] = f64::NAN;
    assert!(Chart::from_positions(&pos).is_err());
    let mut pos = reference_positions();
    pos.lagna = f64::INFINITY;
    assert!(Chart::from_positions(&pos).is_err());
}
