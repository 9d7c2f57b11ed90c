use crate::component::Component;
use crate::error::{MixError, MixResult};
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, warn};

/// Existing mixtures: mixture name to member component names.
pub type MixtureMap = BTreeMap<String, Vec<String>>;

/// Loads components from `.json` (an array of `{name, peaks}`) or from CSV
/// (`name,position` rows, one per peak).
pub fn load_components<P: AsRef<Path>>(path: P) -> MixResult<Vec<Component>> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let components = if is_json {
        load_components_json(path)?
    } else {
        load_components_csv(path)?
    };
    if components.is_empty() {
        return Err(MixError::Validation(format!(
            "No components found in '{}'",
            path.display()
        )));
    }
    Ok(components)
}

pub fn load_components_json<P: AsRef<Path>>(path: P) -> MixResult<Vec<Component>> {
    let content = fs::read_to_string(path)?;
    let components: Vec<Component> = serde_json::from_str(&content)?;
    check_unique_names(&components)?;
    Ok(components)
}

/// Rows whose position does not parse (a header line, for instance) or is
/// not finite are skipped. Components keep the order of their first row; peaks keep row
/// order.
pub fn load_components_csv<P: AsRef<Path>>(path: P) -> MixResult<Vec<Component>> {
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut order: Vec<String> = Vec::new();
    let mut peaks: HashMap<String, Vec<f64>> = HashMap::new();
    let mut skipped = 0;

    for result in rdr.records() {
        let rec = result?;
        if rec.len() < 2 || rec[0].is_empty() {
            skipped += 1;
            continue;
        }
        let position: f64 = match rec[1].parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                skipped += 1;
                continue;
            }
        };
        let name = rec[0].to_string();
        peaks
            .entry(name.clone())
            .or_insert_with(|| {
                order.push(name);
                Vec::new()
            })
            .push(position);
    }

    if skipped > 0 {
        debug!("Skipped {} rows without a usable peak position", skipped);
    }

    Ok(order
        .into_iter()
        .map(|name| {
            let p = peaks.remove(&name).unwrap_or_default();
            Component::new(name, p)
        })
        .collect())
}

pub fn save_components_csv<P: AsRef<Path>>(path: P, components: &[Component]) -> MixResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["name", "position"])?;
    for c in components {
        for p in c.peaks() {
            let position = format!("{:.4}", p);
            wtr.write_record([c.name.as_str(), position.as_str()])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn load_mixtures<P: AsRef<Path>>(path: P) -> MixResult<MixtureMap> {
    let content = fs::read_to_string(path)?;
    let mixtures: MixtureMap = serde_json::from_str(&content)?;
    Ok(mixtures)
}

/// Translates member names into indices of `components`. Unknown names and
/// components listed twice are validation errors.
pub fn resolve_mixtures(
    components: &[Component],
    mixtures: &MixtureMap,
) -> MixResult<Vec<(String, Vec<usize>)>> {
    let index: HashMap<&str, usize> = components
        .iter()
        .enumerate()
        .map(|(i, c)| (c.name.as_str(), i))
        .collect();

    let mut seen = vec![false; components.len()];
    let mut resolved = Vec::with_capacity(mixtures.len());
    for (mixture, names) in mixtures {
        let mut pool = Vec::with_capacity(names.len());
        for name in names {
            let idx = *index.get(name.as_str()).ok_or_else(|| {
                MixError::Validation(format!(
                    "Mixture '{}' lists unknown component '{}'",
                    mixture, name
                ))
            })?;
            if seen[idx] {
                return Err(MixError::Validation(format!(
                    "Component '{}' appears in more than one mixture",
                    name
                )));
            }
            seen[idx] = true;
            pool.push(idx);
        }
        resolved.push((mixture.clone(), pool));
    }

    let unassigned = seen.iter().filter(|s| !**s).count();
    if unassigned > 0 {
        warn!("{} components are not part of any mixture", unassigned);
    }
    Ok(resolved)
}

fn check_unique_names(components: &[Component]) -> MixResult<()> {
    let mut names = std::collections::HashSet::new();
    for c in components {
        if !names.insert(c.name.as_str()) {
            return Err(MixError::Validation(format!(
                "Duplicate component name '{}'",
                c.name
            )));
        }
    }
    Ok(())
}
