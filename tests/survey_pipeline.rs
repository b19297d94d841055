use std::fs;
use std::path::Path;

use geo::Point;
use tempfile::TempDir;

use wcs::analysis::{observations, Classifier, ExemplarClassifier, MedianClassifier};
use wcs::prelude::*;
use wcs::sites::read_sites_from_path;

// one latitude band in the level-3 layout with every longitude set to `value`
fn band(lat: f64, value: u32) -> String {
    let mut out = String::new();
    for line in 0..12 {
        out.push(' ');
        let count = if line == 11 { 13 } else { 25 };
        for _ in 0..count {
            out.push_str(&format!("{:3}", value));
        }
        if line == 11 {
            out.push_str(&format!("   lat = {:6.1}", lat));
        }
        out.push('\n');
    }
    out
}

fn uv_file(bands: &[(f64, u32)]) -> String {
    let mut out = String::from(" Day: 1\n Longitudes: 288\n Latitudes: 180\n");
    for &(lat, value) in bands {
        out.push_str(&band(lat, value));
    }
    out
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn survey_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "term.txt", "1\t1\t1\tLB\n1\t1\t2\tWK\n2\t1\t1\tG\n");
    write(root, "chip.txt", "1\tE\t29\tE29\n2\tC\t23\tC23\n");
    write(root, "dict.txt", "LNUM\tTNUM\tTRAN\tWCSC\n1\t1\tbinaka\tLB\n1\t2\tkulaka\tWK\n");
    // languages near the equator have merged terms, high latitudes distinct
    write(
        root,
        "sites.txt",
        "LNUM NAME BG LAT LONG\n\
         1 Alpha no 0.4 10.0\n\
         2 Beta no 1.2 -40.0\n\
         3 Gamma no 0.6 100.0\n\
         4 Delta yes 60.3 20.0\n\
         5 Epsilon yes 61.4 -100.0\n\
         6 Zeta yes 59.8 150.0\n",
    );
    let uv = root.join("L3");
    fs::create_dir(&uv).unwrap();
    let bands = [(0.5, 300), (1.5, 290), (59.5, 80), (60.5, 70), (61.5, 60)];
    write(&uv, "jan.txt", &uv_file(&bands));
    let brighter: Vec<(f64, u32)> = bands.iter().map(|&(lat, v)| (lat, v + 20)).collect();
    write(&uv, "feb.txt", &uv_file(&brighter));
    // notebook checkpoints and similar must be ignored
    write(&uv, ".hidden", "not a data file");
    fs::create_dir(uv.join(".ipynb_checkpoints")).unwrap();
    dir
}

fn config_for(dir: &TempDir) -> WcsConfig {
    let text = format!(
        "data_dir = {:?}\nsites = \"sites.txt\"\nexemplar_scale = 50.0\n",
        dir.path().to_str().unwrap()
    );
    let path = dir.path().join("wcs.toml");
    fs::write(&path, text).unwrap();
    WcsConfig::load(Some(path.as_path())).unwrap()
}

#[test]
fn loads_every_file() {
    let dir = survey_dir();
    let config = config_for(&dir);

    let naming = NamingData::from_path(config.terms_path()).unwrap();
    let chips = ChipTable::from_path(config.chips_path()).unwrap();
    let dict = TermDictionary::from_path(config.dictionary_path()).unwrap();

    let chip = chips.resolve("E29").unwrap();
    let term = naming.term(1, 1, chip).unwrap();
    assert_eq!(term, "LB");
    assert_eq!(dict.translate(1, term), Some("binaka"));
    assert_eq!(chips.position(2).unwrap().to_string(), "C23");
}

#[test]
fn climatology_averages_files() {
    let dir = survey_dir();
    let config = config_for(&dir);
    let clim = UvClimatology::from_dir(config.uv_path()).unwrap();
    assert_eq!(clim.files(), 2);
    assert_eq!(clim.at_point(Point::new(10.0, 0.4)), 310.0);
    // halfway between the 59.5 and 60.5 bands goes south
    assert_eq!(clim.at_point(Point::new(0.0, 60.0)), 90.0);
    // a band neither file had
    assert_eq!(clim.at_point(Point::new(0.0, -45.0)), 0.0);
}

#[test]
fn classifies_separated_sites() {
    let dir = survey_dir();
    let config = config_for(&dir);
    let sites = read_sites_from_path(config.sites_path()).unwrap();
    let clim = UvClimatology::from_dir(config.uv_path()).unwrap();
    let obs = observations(&sites, &clim);
    assert_eq!(obs.len(), 6);
    assert_eq!(obs[0].uv, 310.0);
    assert_eq!(obs[1].uv, 300.0);
    assert_eq!(obs[4].uv, 70.0);

    let median = MedianClassifier.evaluate(&obs);
    assert_eq!(median.accuracy(), Some(1.0));
    let exemplar = ExemplarClassifier {
        scale: config.exemplar_scale,
    }
    .evaluate(&obs);
    assert_eq!(exemplar.accuracy(), Some(1.0));
}

#[test]
fn missing_files_name_their_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("term.txt");
    match NamingData::from_path(&missing) {
        Err(WcsError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected an I/O error, got {:?}", other),
    }
    let empty = dir.path().join("L3");
    fs::create_dir(&empty).unwrap();
    assert!(matches!(
        UvClimatology::from_dir(&empty),
        Err(WcsError::NoData(_))
    ));
}
