use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::{debug, warn};
use serde::Serialize;

use kundali_base::{
    AshtakavargaTable, Chart, ChartKind, DashaNode, DashaSnapshot, DashaSystem, DashaTree, Graha,
    KootaScore, ManglikReport, Placement, SAPTA_GRAHAS, SiderealPositions, YogaMatch, ashta_koota,
    ashtakavarga, detect_yogas,
};
use kundali_search::{
    AnnualReading, BirthData, Compatibility, Ephemeris, GeoLocation, KundaliConfig,
    MeanMotionEphemeris, compatibility_from_charts, dasha_snapshot_with_moon, dasha_with_moon,
    jd_from_utc, parse_local_datetime, utc_from_jd, varshaphala_for_birth,
};

#[derive(Parser)]
#[command(name = "kundali", version, about = "Vedic chart engine CLI")]
struct Cli {
    /// TOML config file (KundaliConfig keys; flags override it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Birth instant and place. Positions not given explicitly come from the
/// approximate mean-motion ephemeris at this instant.
#[derive(Args, Clone)]
struct BirthArgs {
    /// Local birth date-time (YYYY-MM-DDTHH:MM[:SS])
    #[arg(long = "birth")]
    datetime: Option<String>,
    /// Timezone: fixed offset (+05:30, Z) or IANA name (Asia/Kolkata)
    #[arg(long, default_value = "Z")]
    tz: String,
    /// Latitude in degrees, north positive
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    lat: f64,
    /// Longitude in degrees, east positive
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    lon: f64,
}

#[derive(Args, Clone)]
struct ChartInput {
    /// Nine comma-separated sidereal longitudes, Sun..Ketu
    #[arg(long, requires = "lagna")]
    positions: Option<String>,
    /// Sidereal ascendant longitude in degrees
    #[arg(long)]
    lagna: Option<f64>,
    #[command(flatten)]
    birth: BirthArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Rashi (D1) chart
    Chart {
        #[command(flatten)]
        input: ChartInput,
    },
    /// Divisional chart(s)
    Varga {
        #[command(flatten)]
        input: ChartInput,
        /// Division factor N of D-N (default: the config's vargas)
        #[arg(long, short = 'n')]
        division: Option<u16>,
    },
    /// Dasha tree, or the active periods at --at
    Dasha {
        #[command(flatten)]
        input: ChartInput,
        /// vimshottari, yogini or mudda
        #[arg(long)]
        system: Option<String>,
        /// Levels 1..=5
        #[arg(long)]
        depth: Option<u8>,
        /// Local date-time (same timezone as --birth) for a snapshot
        #[arg(long)]
        at: Option<String>,
    },
    /// Bhinna and sarva ashtakavarga
    Ashtakavarga {
        #[command(flatten)]
        input: ChartInput,
    },
    /// Classical yogas present in the chart
    Yogas {
        #[command(flatten)]
        input: ChartInput,
    },
    /// Annual (solar-return) chart
    Varshaphala {
        #[command(flatten)]
        birth: BirthArgs,
        /// Completed years of life
        #[arg(long)]
        years: u32,
        /// Cast the annual chart at this latitude instead of the birthplace
        #[arg(long, requires = "relocate_lon", allow_hyphen_values = true)]
        relocate_lat: Option<f64>,
        /// Cast the annual chart at this longitude instead of the birthplace
        #[arg(long, requires = "relocate_lat", allow_hyphen_values = true)]
        relocate_lon: Option<f64>,
    },
    /// Ashta-koota compatibility (plus Manglik when both charts are given)
    Match {
        /// Groom's sidereal Moon longitude
        #[arg(long)]
        groom_moon: Option<f64>,
        /// Bride's sidereal Moon longitude
        #[arg(long)]
        bride_moon: Option<f64>,
        /// Groom's nine longitudes, Sun..Ketu
        #[arg(long, requires = "groom_lagna")]
        groom_positions: Option<String>,
        #[arg(long)]
        groom_lagna: Option<f64>,
        /// Bride's nine longitudes, Sun..Ketu
        #[arg(long, requires = "bride_lagna")]
        bride_positions: Option<String>,
        #[arg(long)]
        bride_lagna: Option<f64>,
    },
}

fn parse_longitudes_9(s: &str) -> Result<[f64; 9], String> {
    let vals = s
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("Invalid longitude '{v}': {e}"))
        })
        .collect::<Result<Vec<f64>, String>>()?;
    if vals.len() != 9 {
        return Err(format!(
            "Expected 9 comma-separated longitudes, got {}",
            vals.len()
        ));
    }
    let mut arr = [0.0f64; 9];
    arr.copy_from_slice(&vals);
    Ok(arr)
}

fn parse_dasha_system(s: &str) -> Result<DashaSystem, String> {
    match s.to_lowercase().as_str() {
        "vimshottari" => Ok(DashaSystem::Vimshottari),
        "yogini" => Ok(DashaSystem::Yogini),
        "mudda" => Ok(DashaSystem::Mudda),
        other => Err(format!(
            "Unknown dasha system: {other} (valid: vimshottari, yogini, mudda)"
        )),
    }
}

fn load_config(path: Option<&Path>) -> Result<KundaliConfig, String> {
    let Some(path) = path else {
        return Ok(KundaliConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read config {}: {e}", path.display()))?;
    let config: KundaliConfig =
        toml::from_str(&text).map_err(|e| format!("Invalid config {}: {e}", path.display()))?;
    config
        .validate()
        .map_err(|e| format!("Invalid config {}: {e}", path.display()))?;
    debug!("loaded config from {}", path.display());
    Ok(config)
}

impl BirthArgs {
    fn parse(&self) -> Result<Option<BirthData>, String> {
        self.datetime
            .as_deref()
            .map(|dt| BirthData::parse(dt, &self.tz, self.lat, self.lon))
            .transpose()
            .map_err(|e| e.to_string())
    }

    fn require(&self, command: &str) -> Result<BirthData, String> {
        self.parse()?
            .ok_or_else(|| format!("{command} requires --birth"))
    }
}

fn ephemeris_positions(birth: &BirthData) -> Result<SiderealPositions, String> {
    warn!("positions from the mean-motion ephemeris are approximate");
    let jd = birth.jd_ut().map_err(|e| e.to_string())?;
    MeanMotionEphemeris::default()
        .positions(jd, &birth.location)
        .map_err(|e| e.to_string())
}

fn explicit_positions(list: &str, lagna: Option<f64>) -> Result<SiderealPositions, String> {
    let lagna = lagna.ok_or("--lagna is required with positions")?;
    Ok(SiderealPositions::new(parse_longitudes_9(list)?, lagna))
}

impl ChartInput {
    /// Explicit positions win over the ephemeris; returns the birth record
    /// when one was given.
    fn resolve(&self) -> Result<(SiderealPositions, Option<BirthData>), String> {
        let birth = self.birth.parse()?;
        let positions = match (&self.positions, &birth) {
            (Some(list), _) => explicit_positions(list, self.lagna)?,
            (None, Some(b)) => ephemeris_positions(b)?,
            (None, None) => return Err("Either --positions/--lagna or --birth is required".into()),
        };
        Ok((positions, birth))
    }

    fn chart(&self) -> Result<(Chart, Option<BirthData>), String> {
        let (positions, birth) = self.resolve()?;
        let chart = Chart::from_positions(&positions).map_err(|e| e.to_string())?;
        Ok((chart, birth))
    }
}

fn emit<T: Serialize + ?Sized>(json: bool, value: &T, text: impl FnOnce(&T)) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        text(value);
    }
    Ok(())
}

fn format_jd(jd: f64) -> String {
    match utc_from_jd(jd) {
        Some(dt) => format!("{} (JD {jd:.5})", dt.format("%Y-%m-%d %H:%M:%S UTC")),
        None => format!("JD {jd:.5}"),
    }
}

fn chart_label(kind: ChartKind) -> String {
    match kind {
        ChartKind::Varga(v) => format!("{v} ({})", v.name()),
        ChartKind::Varshaphala => "Varshaphala".to_string(),
    }
}

fn print_placement(p: &Placement) {
    let mut flags = Vec::new();
    if p.retrograde {
        flags.push("R");
    }
    if p.combust {
        flags.push("C");
    }
    if p.vargottama {
        flags.push("V");
    }
    println!(
        "  {:<10} {:>8.4}  {:<10} {:>12}  {:<18} p{}  H{:<2}  {:<11} {}",
        p.body.name(),
        p.longitude,
        p.rashi.name(),
        p.dms.to_string(),
        p.nakshatra.name(),
        p.pada,
        p.house,
        p.dignity.map_or("-", |d| d.name()),
        flags.join(",")
    );
}

fn print_chart(chart: &Chart) {
    println!(
        "{} chart, ascendant {}",
        chart_label(chart.kind),
        chart.ascendant().name()
    );
    print_placement(&chart.lagna);
    for p in &chart.grahas {
        print_placement(p);
    }
}

fn print_node(node: &DashaNode, indent: usize, max_depth: u8) {
    println!(
        "{:indent$}{:<10} {} -> {}",
        "",
        node.lord.to_string(),
        format_jd(node.start_jd),
        format_jd(node.end_jd),
        indent = indent
    );
    if node.level as u8 + 1 < max_depth {
        for child in &node.children {
            print_node(child, indent + 2, max_depth);
        }
    }
}

fn print_dasha(tree: &DashaTree) {
    println!(
        "{} dasha from Moon {:.4}, balance {:.4} days",
        tree.system.name(),
        tree.moon_longitude,
        tree.balance.balance_days
    );
    for root in &tree.periods {
        print_node(root, 2, 2);
    }
}

fn print_snapshot(snap: &DashaSnapshot) {
    println!("{} periods at {}", snap.system.name(), format_jd(snap.query_jd));
    if snap.periods.is_empty() {
        println!("  (outside the dasha span)");
    }
    for p in &snap.periods {
        println!(
            "  {:<14} {:<10} {} -> {}",
            p.level.name(),
            p.lord.to_string(),
            format_jd(p.start_jd),
            format_jd(p.end_jd)
        );
    }
}

fn print_ashtakavarga(t: &AshtakavargaTable) {
    println!("Ashtakavarga (columns are houses 1-12 from {})", t.ascendant.name());
    let row = |label: &str, points: [u8; 12]| {
        let cells: Vec<String> = points.iter().map(|p| format!("{p:>3}")).collect();
        println!("  {label:<10}{}", cells.join(""));
    };
    for g in SAPTA_GRAHAS {
        if let Some(points) = t.bav_by_house(g) {
            row(g.name(), points);
        }
    }
    row("SAV", t.sav_by_house());
    println!("  total {}", t.sav_total());
}

fn print_yogas(yogas: &[YogaMatch]) {
    if yogas.is_empty() {
        println!("No yogas found");
    }
    for y in yogas {
        let bodies: Vec<&str> = y.bodies.iter().map(|b| b.name()).collect();
        println!(
            "{} [{}] strength {}/10: {}",
            y.name,
            y.category.name(),
            y.strength,
            bodies.join(", ")
        );
        println!("    {}", y.description);
    }
}

fn print_manglik(label: &str, r: &ManglikReport) {
    let cancelled: Vec<&str> = r.cancellations.iter().map(|c| c.description()).collect();
    println!(
        "{label}: Mars in house {}, manglik {}, severity {:?}{}",
        r.mars_house,
        r.is_manglik,
        r.severity,
        if cancelled.is_empty() {
            String::new()
        } else {
            format!(" (cancelled: {})", cancelled.join("; "))
        }
    );
}

fn print_koota(s: &KootaScore) {
    for k in &s.kootas {
        println!("  {:<14} {:>4.1} / {}", k.koota.name(), k.points, k.max_points);
    }
    println!(
        "  Total {:.1} / 36 ({:.0}%), {:?}",
        s.total,
        s.percentage(),
        s.verdict
    );
    if s.nadi_dosha {
        println!("  Nadi dosha");
    }
    if s.bhakoot_dosha {
        println!("  Bhakoot dosha");
    }
}

fn print_varshaphala(r: &AnnualReading) {
    let v = &r.varshaphala;
    println!(
        "Solar return for year {}: {} (Sun {:.4}, residual {:.3}\")",
        v.completed_years,
        format_jd(v.return_jd),
        r.solar_return.sun_longitude,
        r.solar_return.residual_arcsec
    );
    println!("Cast at {:.4}, {:.4}", r.location.latitude, r.location.longitude);
    print_chart(&v.chart);
    println!(
        "Muntha {} in house {} ({}), lord {} in house {}",
        v.muntha.rashi.name(),
        v.muntha.house,
        if v.muntha.favorable { "favorable" } else { "unfavorable" },
        v.muntha.lord,
        v.muntha.lord_house
    );
    println!("Annual lagna lord {}", v.annual_lagna_lord());
    print_dasha(&v.mudda);
    println!("Sahams");
    for s in &v.sahams {
        println!(
            "  {:<10} {:>8.4}  {:<10} H{:<2}{}",
            s.name,
            s.longitude(),
            s.position.rashi.name(),
            s.house,
            if s.reversed { "  (night)" } else { "" }
        );
    }
    println!("Tajika yogas");
    for y in &v.tajika_yogas {
        let grahas: Vec<&str> = y.grahas.iter().map(|g| g.name()).collect();
        println!("  {:<16} {:?}: {}", y.kind.name(), y.strength, grahas.join(", "));
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = load_config(cli.config.as_deref())?;
    let json = cli.json;

    match cli.command {
        Commands::Chart { input } => {
            let (chart, _) = input.chart()?;
            emit(json, &chart, print_chart)
        }

        Commands::Varga { input, division } => {
            let (chart, _) = input.chart()?;
            let divisions = division.map_or_else(|| config.vargas.clone(), |n| vec![n]);
            let charts = divisions
                .iter()
                .map(|&n| chart.varga(n))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| e.to_string())?;
            emit(json, &charts, |charts| {
                for c in charts {
                    print_chart(c);
                    println!();
                }
            })
        }

        Commands::Dasha {
            input,
            system,
            depth,
            at,
        } => {
            let (positions, birth) = input.resolve()?;
            let birth = birth.ok_or("dasha requires --birth")?;
            let birth_jd = birth.jd_ut().map_err(|e| e.to_string())?;
            let mut dasha_config = config.dasha;
            if let Some(s) = system {
                dasha_config.system = parse_dasha_system(&s)?;
            }
            if let Some(d) = depth {
                dasha_config.depth = d;
            }
            let moon = positions.longitude(Graha::Chandra);

            match at {
                Some(at) => {
                    let local = parse_local_datetime(&at).map_err(|e| e.to_string())?;
                    let utc = birth.timezone.to_utc(&local).map_err(|e| e.to_string())?;
                    let snap =
                        dasha_snapshot_with_moon(moon, birth_jd, jd_from_utc(&utc), &dasha_config)
                            .map_err(|e| e.to_string())?;
                    emit(json, &snap, print_snapshot)
                }
                None => {
                    let tree =
                        dasha_with_moon(moon, birth_jd, &dasha_config).map_err(|e| e.to_string())?;
                    emit(json, &tree, print_dasha)
                }
            }
        }

        Commands::Ashtakavarga { input } => {
            let (chart, _) = input.chart()?;
            emit(json, &ashtakavarga(&chart), print_ashtakavarga)
        }

        Commands::Yogas { input } => {
            let (chart, _) = input.chart()?;
            emit(json, detect_yogas(&chart).as_slice(), print_yogas)
        }

        Commands::Varshaphala {
            birth,
            years,
            relocate_lat,
            relocate_lon,
        } => {
            let birth = birth.require("varshaphala")?;
            let mut vp_config = config.varshaphala;
            if let (Some(lat), Some(lon)) = (relocate_lat, relocate_lon) {
                vp_config.relocation = Some(GeoLocation::new(lat, lon).map_err(|e| e.to_string())?);
            }
            warn!("solar return uses the approximate mean-motion ephemeris");
            let reading = varshaphala_for_birth(
                &MeanMotionEphemeris::default(),
                &birth,
                years,
                &vp_config,
            )
            .map_err(|e| e.to_string())?;
            emit(json, &reading, print_varshaphala)
        }

        Commands::Match {
            groom_moon,
            bride_moon,
            groom_positions,
            groom_lagna,
            bride_positions,
            bride_lagna,
        } => match (groom_positions, bride_positions) {
            (Some(g), Some(b)) => {
                let groom = Chart::from_positions(&explicit_positions(&g, groom_lagna)?)
                    .map_err(|e| e.to_string())?;
                let bride = Chart::from_positions(&explicit_positions(&b, bride_lagna)?)
                    .map_err(|e| e.to_string())?;
                let c = compatibility_from_charts(&groom, &bride).map_err(|e| e.to_string())?;
                emit(json, &c, |c: &Compatibility| {
                    print_koota(&c.koota);
                    print_manglik("Groom", &c.groom_manglik);
                    print_manglik("Bride", &c.bride_manglik);
                })
            }
            (None, None) => {
                let (g, b) = groom_moon
                    .zip(bride_moon)
                    .ok_or("match requires --groom-moon and --bride-moon, or both position sets")?;
                let score = ashta_koota(g, b).map_err(|e| e.to_string())?;
                emit(json, &score, print_koota)
            }
            _ => Err("give positions for both partners or for neither".to_string()),
        },
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
