//! Manifest variant enumeration and naming
//!
//! A run can request up to three generation modes. Each mode enumerates
//! substitution subsets over the specialized set, and every subset becomes
//! one manifest variant with a derived file name.

use crate::domain::{GenerationMode, ManifestOutcome, SpecializedDependency};
use crate::error::{AppError, ConfigError};
use crate::manifest::PomDocument;
use std::path::{Path, PathBuf};

/// Upper bound on the specialized-set size in all-combinations mode
pub const MAX_POWER_SET_DEPENDENCIES: usize = 16;

/// One manifest variant to generate
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    /// 1-based position within the mode's enumeration
    pub ordinal: usize,
    /// Size of the whole specialized set
    pub total: usize,
    /// Substitutions this variant applies
    pub subset: Vec<SpecializedDependency>,
}

impl Combination {
    pub fn size(&self) -> usize {
        self.subset.len()
    }
}

/// Enumerates the combinations for one generation mode. The specialized
/// set is put in canonical order first so ordinals are reproducible.
pub fn enumerate(
    mode: GenerationMode,
    specialized: &[SpecializedDependency],
    include_empty: bool,
) -> Result<Vec<Combination>, ConfigError> {
    let mut ordered = specialized.to_vec();
    ordered.sort();
    let total = ordered.len();

    match mode {
        GenerationMode::Single => Ok(vec![Combination {
            ordinal: 1,
            total,
            subset: ordered,
        }]),
        GenerationMode::PerDependency => Ok(ordered
            .iter()
            .enumerate()
            .map(|(index, dependency)| Combination {
                ordinal: index + 1,
                total,
                subset: vec![dependency.clone()],
            })
            .collect()),
        GenerationMode::AllCombinations => {
            if total > MAX_POWER_SET_DEPENDENCIES {
                return Err(ConfigError::too_many_combinations(
                    total,
                    MAX_POWER_SET_DEPENDENCIES,
                ));
            }
            let mut combinations = Vec::new();
            let mut ordinal = 0;
            for mask in 0u32..(1u32 << total) {
                let subset: Vec<SpecializedDependency> = ordered
                    .iter()
                    .enumerate()
                    .filter(|(index, _)| mask & (1 << index) != 0)
                    .map(|(_, dependency)| dependency.clone())
                    .collect();
                if subset.is_empty() && !include_empty {
                    continue;
                }
                ordinal += 1;
                combinations.push(Combination {
                    ordinal,
                    total,
                    subset,
                });
            }
            Ok(combinations)
        }
    }
}

/// Derives the output path for one manifest variant. The input stem drops
/// a trailing `-debloated` marker and gains `-specialized`; enumerating
/// modes append the combination numbering before the extension.
pub fn specialized_manifest_path(
    input: &Path,
    mode: GenerationMode,
    combination: &Combination,
) -> PathBuf {
    let extension = input
        .extension()
        .map(|extension| extension.to_string_lossy().into_owned())
        .unwrap_or_else(|| "xml".to_string());
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = stem.strip_suffix("-debloated").unwrap_or(&stem);
    let name = match mode {
        GenerationMode::Single => format!("{}-specialized.{}", base, extension),
        GenerationMode::PerDependency => format!(
            "{}-specialized_{}_{}.{}",
            base, combination.ordinal, combination.total, extension
        ),
        GenerationMode::AllCombinations => format!(
            "{}-specialized_{}_{}_{}.{}",
            base,
            combination.ordinal,
            combination.size(),
            combination.total,
            extension
        ),
    };
    input.with_file_name(name)
}

/// Generates every requested manifest variant from `manifest_path`.
///
/// The manifest is parsed once up front, so a broken manifest aborts the
/// whole phase. Failures writing an individual variant are recorded in its
/// outcome and do not stop the remaining variants.
pub fn generate_manifests(
    manifest_path: &Path,
    modes: &[GenerationMode],
    specialized: &[SpecializedDependency],
    include_empty: bool,
) -> Result<Vec<ManifestOutcome>, AppError> {
    let template = PomDocument::load(manifest_path)?;
    let mut outcomes = Vec::new();
    for &mode in modes {
        let combinations = enumerate(mode, specialized, include_empty)?;
        for combination in combinations {
            let output = specialized_manifest_path(manifest_path, mode, &combination);
            match write_variant(&template, &combination, &output) {
                Ok(()) => outcomes.push(ManifestOutcome::written(
                    output,
                    mode,
                    combination.ordinal,
                    combination.size(),
                )),
                Err(error) => outcomes.push(ManifestOutcome::failed(
                    output,
                    mode,
                    combination.ordinal,
                    combination.size(),
                    error.to_string(),
                )),
            }
        }
    }
    Ok(outcomes)
}

fn write_variant(
    template: &PomDocument,
    combination: &Combination,
    output: &Path,
) -> Result<(), crate::error::ManifestError> {
    let mut document = template.clone();
    document.substitute_all(&combination.subset)?;
    document.save(output)
}
