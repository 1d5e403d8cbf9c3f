//! Per-attribute domain-share tables.
//!
//! A domain share maps a generalized label to the fraction of the attribute's
//! value domain it denotes, a number in `(0, 1]`. Two construction strategies
//! exist: the raw strategy enumerates the materialized hierarchy, the
//! redaction strategy computes shares in closed form from redaction-builder
//! parameters. Selection is per attribute, never global.

use std::collections::{HashMap, HashSet};

use crate::dataset::HierarchyBuilderInfo;

use super::config::QualityConfig;
use super::hierarchy::Hierarchy;

/// Domain-share table for one attribute.
#[derive(Debug, Clone)]
pub enum DomainShare {
    /// Shares derived by enumerating the materialized hierarchy
    Raw(RawDomainShare),
    /// Shares computed in closed form from redaction-builder parameters
    Redaction(RedactionDomainShare),
}

impl DomainShare {
    /// Builds the share table for one attribute.
    ///
    /// Uses the closed-form redaction strategy when the builder metadata
    /// carries complete domain parameters; falls back to enumerating the
    /// hierarchy otherwise. Interval-built hierarchies are incompatible with
    /// the raw fallback and yield `None`, as does any construction failure;
    /// models tolerate the absent share for that attribute.
    pub fn for_attribute(
        hierarchy: &Hierarchy,
        builder: Option<&HierarchyBuilderInfo>,
        config: &QualityConfig,
    ) -> Option<Self> {
        match builder {
            Some(info @ HierarchyBuilderInfo::Redaction { .. })
                if info.domain_properties_available() =>
            {
                RedactionDomainShare::from_builder(info).map(Self::Redaction)
            }
            Some(HierarchyBuilderInfo::Interval) => {
                tracing::warn!(
                    "interval-built hierarchy is not supported by the raw domain-share \
                     strategy; attribute share marked unavailable"
                );
                None
            }
            _ => RawDomainShare::from_hierarchy(hierarchy, &config.suppression_sentinel)
                .map(Self::Raw),
        }
    }

    /// Fraction of the domain the label denotes at the given level.
    pub fn share(&self, label: &str, level: usize) -> Option<f64> {
        match self {
            Self::Raw(raw) => raw.share(label, level),
            Self::Redaction(redaction) => Some(redaction.share(level)),
        }
    }

    /// Size of the attribute's value domain.
    pub fn domain_size(&self) -> f64 {
        match self {
            Self::Raw(raw) => raw.domain_size,
            Self::Redaction(redaction) => redaction.domain_size,
        }
    }
}

/// Shares derived from how many leaf values each label subsumes.
#[derive(Debug, Clone)]
pub struct RawDomainShare {
    domain_size: f64,
    /// Per level: label to share of the domain
    shares: Vec<HashMap<String, f64>>,
}

impl RawDomainShare {
    fn from_hierarchy(hierarchy: &Hierarchy, sentinel: &str) -> Option<Self> {
        let domain_size = hierarchy.domain_size();
        if domain_size == 0 {
            tracing::warn!("hierarchy has an empty value domain; share unavailable");
            return None;
        }

        // Distinct leaves subsumed per (level, label)
        let mut subsumed: Vec<HashMap<&str, HashSet<&str>>> =
            vec![HashMap::new(); hierarchy.height()];
        for row in hierarchy.rows() {
            let Some(leaf) = row.first() else { continue };
            for (level, label) in row.iter().enumerate() {
                if let Some(per_level) = subsumed.get_mut(level) {
                    per_level
                        .entry(label.as_str())
                        .or_default()
                        .insert(leaf.as_str());
                }
            }
        }

        let shares = subsumed
            .into_iter()
            .map(|per_level| {
                per_level
                    .into_iter()
                    .map(|(label, leaves)| {
                        let share = if label == sentinel {
                            1.0
                        } else {
                            leaves.len() as f64 / domain_size as f64
                        };
                        (label.to_string(), share)
                    })
                    .collect()
            })
            .collect();

        Some(Self {
            domain_size: domain_size as f64,
            shares,
        })
    }

    fn share(&self, label: &str, level: usize) -> Option<f64> {
        if let Some(share) = self.shares.get(level).and_then(|m| m.get(label)) {
            return Some(*share);
        }
        // A label observed on another level than expected: fall back to the
        // lowest level that defines it
        self.shares.iter().find_map(|m| m.get(label)).copied()
    }
}

/// Closed-form shares for redaction-generated hierarchies.
///
/// Redaction masks one trailing character per level, so a label on level `l`
/// covers `alphabet^l` values of the domain.
#[derive(Debug, Clone)]
pub struct RedactionDomainShare {
    domain_size: f64,
    alphabet_size: f64,
}

impl RedactionDomainShare {
    fn from_builder(info: &HierarchyBuilderInfo) -> Option<Self> {
        match info {
            HierarchyBuilderInfo::Redaction {
                domain_size: Some(domain_size),
                alphabet_size: Some(alphabet_size),
                max_value_length: Some(_),
            } if *domain_size > 0.0 && *alphabet_size > 0.0 => Some(Self {
                domain_size: *domain_size,
                alphabet_size: *alphabet_size,
            }),
            _ => {
                tracing::warn!("redaction builder has unusable domain parameters");
                None
            }
        }
    }

    fn share(&self, level: usize) -> f64 {
        let covered = self.alphabet_size.powi(level as i32).min(self.domain_size);
        (covered / self.domain_size).clamp(f64::MIN_POSITIVE, 1.0)
    }
}
