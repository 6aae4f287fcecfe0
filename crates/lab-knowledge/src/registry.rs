#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::diseases::{DiseaseSignature, parse_diseases_toml};
use crate::error::KnowledgeError;
use crate::hash::{sha256_hex, sha256_hex_parts};
use crate::manifest::{Manifest, ManifestFile};
use crate::ranges::{RangeTable, parse_ranges_csv};
use crate::synonyms::SynonymTable;

const MANIFEST_SCHEMA: &str = "blood-report.knowledge-manifest";

const REQUIRED_ROLES: &[&str] = &["synonyms", "ranges", "diseases"];

const ALLOWED_KINDS: &[&str] = &["csv", "toml", "other"];

const BUILTIN_SYNONYMS: &str = include_str!("../../../knowledge/synonyms.toml");
const BUILTIN_RANGES: &str = include_str!("../../../knowledge/ranges.csv");
const BUILTIN_DISEASES: &str = include_str!("../../../knowledge/diseases.toml");

/// Where a knowledge base was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeSource {
    /// Tables compiled into the binary.
    Builtin,
    /// A verified knowledge directory.
    Directory(PathBuf),
    /// Tables assembled in code.
    Custom,
}

/// A cross-table observation that is not fatal but worth surfacing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ConsistencyNote {
    pub kind: String,
    pub parameter: String,
    pub message: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct KnowledgeSummary {
    pub source: KnowledgeSource,
    pub fingerprint: Option<String>,
    pub parameter_count: usize,
    pub range_count: usize,
    pub disease_count: usize,
    pub parameters: Vec<String>,
    pub diseases: Vec<String>,
    pub notes: Vec<ConsistencyNote>,
}

/// Immutable bundle of the static tables every analysis reads.
///
/// Built once at startup and shared by reference or `Arc`.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    synonyms: SynonymTable,
    ranges: RangeTable,
    diseases: Vec<DiseaseSignature>,
    fingerprint: Option<String>,
    source: KnowledgeSource,
}

impl KnowledgeBase {
    /// Parse the tables embedded at compile time.
    pub fn builtin() -> Result<Self, KnowledgeError> {
        let kb = Self::parse(
            BUILTIN_SYNONYMS.as_bytes(),
            BUILTIN_RANGES.as_bytes(),
            BUILTIN_DISEASES.as_bytes(),
            Path::new("<builtin>"),
            KnowledgeSource::Builtin,
        )?;
        debug!(parameters = kb.synonyms.len(), "loaded builtin knowledge base");
        Ok(kb)
    }

    /// Verify `manifest.toml` in `dir` against the files it pins, then parse them.
    pub fn load(dir: &Path) -> Result<Self, KnowledgeError> {
        let manifest = load_manifest(&dir.join("manifest.toml"))?;
        validate_manifest(&manifest)?;

        let synonyms = read_verified(dir, &manifest.files, "synonyms")?;
        let ranges = read_verified(dir, &manifest.files, "ranges")?;
        let diseases = read_verified(dir, &manifest.files, "diseases")?;

        let kb = Self::parse(
            &synonyms,
            &ranges,
            &diseases,
            dir,
            KnowledgeSource::Directory(dir.to_path_buf()),
        )?;
        info!(
            dir = %dir.display(),
            parameters = kb.synonyms.len(),
            ranges = kb.ranges.len(),
            diseases = kb.diseases.len(),
            "loaded knowledge base"
        );
        for note in kb.consistency_notes() {
            warn!(parameter = %note.parameter, kind = %note.kind, "{}", note.message);
        }
        Ok(kb)
    }

    /// Assemble a knowledge base from tables built in code.
    pub fn from_parts(
        synonyms: SynonymTable,
        ranges: RangeTable,
        diseases: Vec<DiseaseSignature>,
    ) -> Self {
        Self {
            synonyms,
            ranges,
            diseases,
            fingerprint: None,
            source: KnowledgeSource::Custom,
        }
    }

    fn parse(
        synonyms: &[u8],
        ranges: &[u8],
        diseases: &[u8],
        dir: &Path,
        source: KnowledgeSource,
    ) -> Result<Self, KnowledgeError> {
        let synonyms_path = dir.join("synonyms.toml");
        let diseases_path = dir.join("diseases.toml");
        let synonym_table =
            SynonymTable::from_toml(utf8(synonyms, &synonyms_path)?, &synonyms_path)?;
        let range_table = parse_ranges_csv(ranges, &dir.join("ranges.csv"))?;
        let signatures = parse_diseases_toml(utf8(diseases, &diseases_path)?, &diseases_path)?;

        Ok(Self {
            synonyms: synonym_table,
            ranges: range_table,
            diseases: signatures,
            fingerprint: Some(sha256_hex_parts(&[synonyms, ranges, diseases])),
            source,
        })
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    pub fn ranges(&self) -> &RangeTable {
        &self.ranges
    }

    pub fn diseases(&self) -> &[DiseaseSignature] {
        &self.diseases
    }

    /// Digest of the three source tables; `None` for tables built in code.
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    pub fn source(&self) -> &KnowledgeSource {
        &self.source
    }

    /// Parameters the tables disagree about.
    ///
    /// A synonym whose display name has no range evaluates as Unknown; an
    /// indicator on a parameter that is never extracted can only match
    /// manually entered values.
    pub fn consistency_notes(&self) -> Vec<ConsistencyNote> {
        let mut notes = Vec::new();
        let extracted: BTreeSet<String> = self.synonyms.display_names().into_iter().collect();

        for name in &extracted {
            if !self.ranges.contains(name) {
                notes.push(ConsistencyNote {
                    kind: "synonym_without_range".to_string(),
                    parameter: name.clone(),
                    message: format!("{name} is extracted but has no reference range"),
                });
            }
        }

        let mut seen = BTreeSet::new();
        for signature in &self.diseases {
            for indicator in &signature.indicators {
                let parameter = &indicator.parameter;
                if extracted.contains(parameter) || !seen.insert(parameter.clone()) {
                    continue;
                }
                notes.push(ConsistencyNote {
                    kind: "indicator_not_extracted".to_string(),
                    parameter: parameter.clone(),
                    message: format!(
                        "{parameter} is used by disease signatures but no synonym produces it"
                    ),
                });
            }
        }

        notes
    }

    pub fn summary(&self) -> KnowledgeSummary {
        KnowledgeSummary {
            source: self.source.clone(),
            fingerprint: self.fingerprint.clone(),
            parameter_count: self.synonyms.len(),
            range_count: self.ranges.len(),
            disease_count: self.diseases.len(),
            parameters: self.synonyms.display_names(),
            diseases: self.diseases.iter().map(|d| d.name.clone()).collect(),
            notes: self.consistency_notes(),
        }
    }
}

fn utf8<'a>(bytes: &'a [u8], path: &Path) -> Result<&'a str, KnowledgeError> {
    std::str::from_utf8(bytes).map_err(|e| {
        KnowledgeError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })
}

fn load_manifest(path: &Path) -> Result<Manifest, KnowledgeError> {
    let contents = std::fs::read_to_string(path).map_err(|e| KnowledgeError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| KnowledgeError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_manifest(manifest: &Manifest) -> Result<(), KnowledgeError> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(KnowledgeError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != 1 {
        return Err(KnowledgeError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }

    let mut roles: BTreeSet<&str> = BTreeSet::new();
    for file in &manifest.files {
        if !roles.insert(file.role.as_str()) {
            return Err(KnowledgeError::DuplicateRole {
                role: file.role.clone(),
            });
        }
        if !ALLOWED_KINDS.contains(&file.kind.as_str()) {
            return Err(KnowledgeError::InvalidManifest {
                message: format!("unsupported kind '{}' for {}", file.kind, file.path),
            });
        }
        validate_sha(&file.sha256, &file.path)?;
        validate_path(&file.path)?;
    }

    for role in REQUIRED_ROLES {
        if !roles.contains(role) {
            return Err(KnowledgeError::MissingRole {
                role: role.to_string(),
            });
        }
    }

    Ok(())
}

/// Read the file registered for `role` and check it against its pinned digest.
fn read_verified(
    dir: &Path,
    files: &[ManifestFile],
    role: &str,
) -> Result<Vec<u8>, KnowledgeError> {
    let file = files
        .iter()
        .find(|f| f.role == role)
        .ok_or_else(|| KnowledgeError::MissingRole {
            role: role.to_string(),
        })?;
    let full_path = dir.join(&file.path);
    let bytes = std::fs::read(&full_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            KnowledgeError::MissingFile {
                path: full_path.clone(),
            }
        } else {
            KnowledgeError::io(full_path.clone(), e)
        }
    })?;

    let actual = sha256_hex(&bytes);
    let expected = file.sha256.to_ascii_lowercase();
    if actual != expected {
        return Err(KnowledgeError::Sha256Mismatch {
            path: full_path,
            expected,
            actual,
        });
    }
    Ok(bytes)
}

fn validate_sha(sha: &str, path: &str) -> Result<(), KnowledgeError> {
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(KnowledgeError::InvalidSha256 {
            path: PathBuf::from(path),
            message: "sha256 must be 64 hex characters".to_string(),
        });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<(), KnowledgeError> {
    if path.contains('\\') {
        return Err(KnowledgeError::InvalidPath {
            path: PathBuf::from(path),
            message: "manifest path must use '/' separators".to_string(),
        });
    }

    let p = PathBuf::from(path);
    if p.is_absolute() {
        return Err(KnowledgeError::InvalidPath {
            path: p,
            message: "manifest path must be relative".to_string(),
        });
    }

    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(KnowledgeError::InvalidPath {
            path: p,
            message: "manifest path must not traverse out of the knowledge directory"
                .to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::diseases::{Condition, Indicator};
    use crate::ranges::ReferenceRange;
    use crate::synonyms::SynonymEntry;

    #[test]
    fn builtin_tables_parse() {
        let kb = KnowledgeBase::builtin().expect("builtin knowledge");
        assert_eq!(kb.synonyms().len(), 8);
        assert_eq!(kb.ranges().len(), 8);
        assert!(kb.diseases().iter().any(|d| d.name == "Anemia"));
        assert_eq!(kb.source(), &KnowledgeSource::Builtin);
        assert_eq!(kb.fingerprint().map(str::len), Some(64));
        assert!(kb.consistency_notes().is_empty());
    }

    #[test]
    fn notes_flag_gaps_between_tables() {
        let synonyms = SynonymTable::new(
            vec![SynonymEntry {
                key: "glucose".to_string(),
                synonyms: vec!["glucose".to_string()],
            }],
            BTreeMap::new(),
        )
        .unwrap();
        let ranges = RangeTable::from_ranges(vec![
            ReferenceRange::new("Ferritin", "ng/mL", 20.0, 250.0).unwrap(),
        ])
        .unwrap();
        let diseases = vec![DiseaseSignature {
            name: "Iron deficiency".to_string(),
            indicators: vec![Indicator {
                parameter: "Ferritin".to_string(),
                condition: Condition::LessThan(20.0),
            }],
            symptoms: vec![],
            weight: 80.0,
            description: String::new(),
            recommendation: String::new(),
        }];
        let kb = KnowledgeBase::from_parts(synonyms, ranges, diseases);
        let kinds: Vec<String> = kb
            .consistency_notes()
            .into_iter()
            .map(|n| format!("{}:{}", n.kind, n.parameter))
            .collect();
        assert_eq!(
            kinds,
            vec![
                "synonym_without_range:Glucose",
                "indicator_not_extracted:Ferritin"
            ]
        );
        assert_eq!(kb.fingerprint(), None);
    }

    #[test]
    fn rejects_traversing_paths() {
        assert!(validate_path("../ranges.csv").is_err());
        assert!(validate_path("sub\\ranges.csv").is_err());
        assert!(validate_path("tables/ranges.csv").is_ok());
    }
}
