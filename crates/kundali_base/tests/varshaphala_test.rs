//! Integration tests for annual chart assembly with default and custom tables.

use kundali_base::varshaphala::{SahamFormula, SahamPoint, TajikaYogaKind};
use kundali_base::{
    DAYS_PER_YEAR, DashaLord, Graha, Rashi, SiderealPositions, TajikaOrbs, VarshaphalaOptions,
    build_varshaphala,
};

const RETURN_JD: f64 = 2_460_325.25;

/// Annual positions: lagna Simha, Sun back at 271.4, Moon applying to Jupiter.
fn annual_positions() -> SiderealPositions {
    SiderealPositions::new(
        [271.4, 92.0, 20.0, 250.0, 100.0, 300.0, 200.0, 30.0, 210.0],
        125.0,
    )
}

#[test]
fn default_options_produce_full_reading() {
    let v = build_varshaphala(
        Rashi::Kumbha,
        34,
        RETURN_JD,
        &annual_positions(),
        &VarshaphalaOptions::default(),
    )
    .unwrap();

    assert_eq!(v.chart.ascendant(), Rashi::Simha);
    // Muntha Dhanu, 5th from Simha, ruled by Jupiter in the 12th (Karka)
    assert_eq!(v.muntha.rashi, Rashi::Dhanu);
    assert_eq!(v.muntha.house, 5);
    assert_eq!(v.muntha.lord, Graha::Guru);
    assert_eq!(v.muntha.lord_house, 12);
    assert!(v.muntha.favorable);

    // Sun in the 6th from Simha: night chart, reversible sahams swap
    let punya = v.sahams.iter().find(|s| s.name == "Punya").unwrap();
    assert!(punya.reversed);
    let bhratri = v.sahams.iter().find(|s| s.name == "Bhratri").unwrap();
    assert!(!bhratri.reversed);

    // Moon (92) is 8 deg short of Jupiter (100): applying conjunction
    assert!(v.tajika_yogas.iter().any(|y| y.kind == TajikaYogaKind::Ithasala
        && y.grahas == vec![Graha::Chandra, Graha::Guru]));

    // Mudda starts from the annual Moon's nakshatra lord (Punarvasu: Jupiter)
    assert_eq!(v.mudda.periods[0].lord, DashaLord::Graha(Graha::Guru));
    assert!((v.mudda.end_jd - v.mudda.start_jd - DAYS_PER_YEAR).abs() < 1e-9);
}

#[test]
fn custom_tables_replace_defaults() {
    const FORTUNE: &[SahamFormula] = &[SahamFormula {
        name: "Fortune",
        a: SahamPoint::Graha(Graha::Chandra),
        b: SahamPoint::Graha(Graha::Surya),
        c: SahamPoint::Lagna,
        reverse_at_night: false,
    }];
    let options = VarshaphalaOptions {
        mudda_depth: 1,
        orbs: TajikaOrbs {
            moon: 2.0,
            jupiter: 2.0,
            ..TajikaOrbs::default()
        },
        sahams: FORTUNE,
        saham_correction: false,
    };
    let v = build_varshaphala(Rashi::Kumbha, 34, RETURN_JD, &annual_positions(), &options)
        .unwrap();

    assert_eq!(v.sahams.len(), 1);
    // 92 - 271.4 + 125
    assert!((v.sahams[0].longitude() - 305.6).abs() < 1e-9);
    assert!(v.mudda.periods.iter().all(|p| p.children.is_empty()));
    // A 2 deg orb no longer reaches the Moon-Jupiter conjunction
    assert!(
        !v.tajika_yogas
            .iter()
            .any(|y| y.aspect.is_some_and(|a| a.joins(Graha::Chandra, Graha::Guru)))
    );
}

#[test]
fn bad_mudda_depth_is_rejected() {
    let options = VarshaphalaOptions {
        mudda_depth: 0,
        ..VarshaphalaOptions::default()
    };
    assert!(
        build_varshaphala(Rashi::Kumbha, 1, RETURN_JD, &annual_positions(), &options).is_err()
    );
}
