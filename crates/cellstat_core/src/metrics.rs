//! Named resource-contribution metrics and logging setup.
//!
//! The catalog below is the fixed set of figures the `resource` report prints,
//! in report order. Each entry is either the unmasked mean or a relational
//! mean under one predicate.

use crate::aggregate::{mean_resource_contributed, relational_mean};
use crate::config::ResourceConfig;
use crate::error::{AnalysisError, Result};
use crate::relation::{Predicate, Relation};
use crate::view::{RunView, UpdateRange};
use cellstat_data::layout;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceMetric {
    Means,
    SameChannel,
    SameChannelNot,
    CellParent,
    CellParentNot,
    CellChild,
    CellChildNot,
    PropaguleParent,
    PropaguleParentNot,
    PropaguleChild,
    PropaguleChildNot,
}

impl ResourceMetric {
    pub const ALL: [ResourceMetric; 11] = [
        ResourceMetric::Means,
        ResourceMetric::SameChannel,
        ResourceMetric::SameChannelNot,
        ResourceMetric::CellParent,
        ResourceMetric::CellParentNot,
        ResourceMetric::CellChild,
        ResourceMetric::CellChildNot,
        ResourceMetric::PropaguleParent,
        ResourceMetric::PropaguleParentNot,
        ResourceMetric::PropaguleChild,
        ResourceMetric::PropaguleChildNot,
    ];

    /// Report key of the metric.
    pub fn label(self) -> &'static str {
        match self {
            ResourceMetric::Means => "means",
            ResourceMetric::SameChannel => "means_samechannel_levs",
            ResourceMetric::SameChannelNot => "means_samechannelNot_levs",
            ResourceMetric::CellParent => "means_cell_parent",
            ResourceMetric::CellParentNot => "means_cell_parentNot",
            ResourceMetric::CellChild => "means_cell_child",
            ResourceMetric::CellChildNot => "means_cell_childNot",
            ResourceMetric::PropaguleParent => "means_propagule_parent",
            ResourceMetric::PropaguleParentNot => "means_propagule_parentNot",
            ResourceMetric::PropaguleChild => "means_propagule_child",
            ResourceMetric::PropaguleChildNot => "means_propagule_childNot",
        }
    }

    /// True for metrics evaluated once per channel level.
    pub fn per_level(self) -> bool {
        matches!(
            self,
            ResourceMetric::SameChannel | ResourceMetric::SameChannelNot
        )
    }

    /// Predicate selecting the samples of this metric, `None` for the unmasked mean.
    ///
    /// `level` is the channel level the relation reads: the level being sliced
    /// for per-level metrics, the deepest level for propagule metrics.
    ///
    /// `PropaguleChildNot` uses the same equality comparison as
    /// `PropaguleChild` unless `config.negate_propagule_child_not` is set.
    pub fn predicate(self, level: &str, config: &ResourceConfig) -> Option<Predicate> {
        let channel = || level.to_string();
        let predicate = match self {
            ResourceMetric::Means => return None,
            ResourceMetric::SameChannel => {
                Predicate::holds(Relation::SameChannel { level: channel() })
            }
            ResourceMetric::SameChannelNot => {
                Predicate::fails(Relation::SameChannel { level: channel() })
            }
            ResourceMetric::CellParent => Predicate::holds(Relation::CellParent),
            ResourceMetric::CellParentNot => Predicate::fails(Relation::CellParent),
            ResourceMetric::CellChild => Predicate::holds(Relation::CellChild),
            ResourceMetric::CellChildNot => Predicate::fails(Relation::CellChild),
            ResourceMetric::PropaguleParent => {
                Predicate::holds(Relation::PropaguleParent { level: channel() })
            }
            ResourceMetric::PropaguleParentNot => {
                Predicate::fails(Relation::PropaguleParent { level: channel() })
            }
            ResourceMetric::PropaguleChild => {
                Predicate::holds(Relation::PropaguleChild { level: channel() })
            }
            ResourceMetric::PropaguleChildNot => {
                let relation = Relation::PropaguleChild { level: channel() };
                if config.negate_propagule_child_not {
                    Predicate::fails(relation)
                } else {
                    Predicate::holds(relation)
                }
            }
        };
        Some(predicate)
    }

    /// Evaluates the metric on one run.
    pub fn evaluate<R: RunView + ?Sized>(
        self,
        run: &R,
        range: UpdateRange,
        level: &str,
        config: &ResourceConfig,
    ) -> Result<f64> {
        match self.predicate(level, config) {
            None => mean_resource_contributed(run, range),
            Some(predicate) => relational_mean(run, range, &predicate),
        }
    }
}

/// Key of the deepest channel level, `lev_<nlev - 1>`.
pub fn deepest_level(level_count: u32) -> Result<String> {
    level_count
        .checked_sub(1)
        .map(layout::lev_key)
        .ok_or_else(|| AnalysisError::missing("channel levels (NLEV is 0)"))
}

/// Per-run values of one metric, pooled over levels for per-level metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricValues {
    pub metric: ResourceMetric,
    pub values: Vec<f64>,
}

/// Evaluates the whole catalog over `runs`.
///
/// Channel levels and the deepest level come from the first run. Per-level
/// metrics hold one value per (level, run), level-major.
pub fn evaluate_catalog<R: RunView>(
    runs: &[R],
    range: UpdateRange,
    config: &ResourceConfig,
) -> Result<Vec<MetricValues>> {
    let Some(first) = runs.first() else {
        return Ok(ResourceMetric::ALL
            .iter()
            .map(|&metric| MetricValues {
                metric,
                values: Vec::new(),
            })
            .collect());
    };
    let levels = first.channel_levels()?;
    let deepest = deepest_level(first.level_count()?)?;

    ResourceMetric::ALL
        .iter()
        .map(|&metric| -> Result<MetricValues> {
            let mut values = Vec::new();
            if metric.per_level() {
                for level in &levels {
                    for run in runs {
                        values.push(metric.evaluate(run, range, level, config)?);
                    }
                }
            } else {
                for run in runs {
                    values.push(metric.evaluate(run, range, &deepest, config)?);
                }
            }
            tracing::info!(metric = metric.label(), samples = values.len(), "Evaluated metric");
            Ok(MetricValues { metric, values })
        })
        .collect()
}

/// Initialize tracing subscriber for logging.
///
/// Honors `RUST_LOG`, defaulting to `cellstat=info`. Output goes to stderr so
/// report lines on stdout stay clean.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "cellstat=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .ok();
}
