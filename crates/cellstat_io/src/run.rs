use crate::archive::load_document;
use crate::error::Result;
use crate::treatment::extract_treatment;
use cellstat_core::error::{AnalysisError, Result as AnalysisResult};
use cellstat_core::RunView;
use cellstat_data::layout::{self, join, upd_key};
use cellstat_data::{Dataset, Group, Values};
use std::path::{Path, PathBuf};

/// One loaded simulation run.
pub struct Run {
    path: PathBuf,
    root: Group,
}

impl Run {
    /// Loads the run document at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let root = load_document(path)?;
        tracing::info!(path = %path.display(), "Opened run");
        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    /// Wraps an in-memory document. `path` is only used for naming.
    pub fn from_document<P: Into<PathBuf>>(path: P, root: Group) -> Self {
        Self {
            path: path.into(),
            root,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Treatment segment of the run's file name.
    pub fn treatment(&self) -> Result<String> {
        extract_treatment(&self.path)
    }

    fn dataset(&self, path: &str) -> AnalysisResult<&Dataset> {
        self.root
            .dataset(path)
            .ok_or_else(|| AnalysisError::missing(path))
    }

    fn group(&self, path: &str) -> AnalysisResult<&Group> {
        self.root
            .group(path)
            .ok_or_else(|| AnalysisError::missing(path))
    }

    fn member_names(&self, path: &str) -> AnalysisResult<Vec<String>> {
        Ok(self
            .group(path)?
            .member_names()
            .map(str::to_string)
            .collect())
    }
}

fn type_mismatch(path: &str, expected: &'static str, found: impl Into<String>) -> AnalysisError {
    AnalysisError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: found.into(),
    }
}

/// Any numeric dataset, as floats.
fn to_f64(ds: &Dataset) -> Vec<f64> {
    match &ds.values {
        Values::U64(v) => v.iter().map(|&x| x as f64).collect(),
        Values::I64(v) => v.iter().map(|&x| x as f64).collect(),
        Values::F64(v) => v.clone(),
    }
}

/// Integer labels compared only for equality. Labels must be non-negative so
/// that signed and unsigned arrays compare by value.
fn to_ids(ds: &Dataset, path: &str) -> AnalysisResult<Vec<u64>> {
    match &ds.values {
        Values::U64(v) => Ok(v.clone()),
        Values::I64(v) => v
            .iter()
            .map(|&x| {
                u64::try_from(x)
                    .map_err(|_| type_mismatch(path, "non-negative label", x.to_string()))
            })
            .collect(),
        Values::F64(_) => Err(type_mismatch(path, "integer labels", ds.values.dtype())),
    }
}

fn bad_position(path: &str, value: impl ToString) -> AnalysisError {
    type_mismatch(path, "agent position", value.to_string())
}

/// Agent positions: non-negative integers, possibly stored as integral floats.
fn to_positions(ds: &Dataset, path: &str) -> AnalysisResult<Vec<usize>> {
    match &ds.values {
        Values::U64(v) => v
            .iter()
            .map(|&x| usize::try_from(x).map_err(|_| bad_position(path, x)))
            .collect(),
        Values::I64(v) => v
            .iter()
            .map(|&x| usize::try_from(x).map_err(|_| bad_position(path, x)))
            .collect(),
        Values::F64(v) => v
            .iter()
            .map(|&x| {
                if x >= 0.0 && x.fract() == 0.0 && x <= usize::MAX as f64 {
                    Ok(x as usize)
                } else {
                    Err(bad_position(path, x))
                }
            })
            .collect(),
    }
}

impl RunView for Run {
    fn agent_count(&self) -> AnalysisResult<usize> {
        Ok(self.dataset(&join(layout::INDEX, layout::OWN))?.size())
    }

    fn level_count(&self) -> AnalysisResult<u32> {
        let nlev = self
            .root
            .attr(layout::NLEV_ATTR)
            .and_then(|values| values.first())
            .ok_or_else(|| AnalysisError::missing(layout::NLEV_ATTR))?;
        u32::try_from(*nlev)
            .map_err(|_| type_mismatch(layout::NLEV_ATTR, "level count", nlev.to_string()))
    }

    fn direction_keys(&self) -> AnalysisResult<Vec<String>> {
        self.member_names(layout::RESOURCE_CONTRIBUTED)
    }

    fn channel_levels(&self) -> AnalysisResult<Vec<String>> {
        self.member_names(layout::CHANNEL)
    }

    fn neighbor_index(&self, dir: &str) -> AnalysisResult<Vec<usize>> {
        let path = join(layout::INDEX, dir);
        to_positions(self.dataset(&path)?, &path)
    }

    fn resource_contributed(&self, dir: &str, update: u64) -> AnalysisResult<Vec<f64>> {
        let path = format!("{}/{dir}/{}", layout::RESOURCE_CONTRIBUTED, upd_key(update));
        Ok(to_f64(self.dataset(&path)?))
    }

    fn channel(&self, level: &str, update: u64) -> AnalysisResult<Vec<u64>> {
        let path = format!("{}/{level}/{}", layout::CHANNEL, upd_key(update));
        to_ids(self.dataset(&path)?, &path)
    }

    fn parent_pos(&self, update: u64) -> AnalysisResult<Vec<usize>> {
        let path = join(layout::PARENT_POS, &upd_key(update));
        to_positions(self.dataset(&path)?, &path)
    }

    fn prev_chan(&self, update: u64) -> AnalysisResult<Vec<u64>> {
        let path = join(layout::PREV_CHAN, &upd_key(update));
        to_ids(self.dataset(&path)?, &path)
    }

    fn apoptosis(&self, update: u64) -> AnalysisResult<Vec<u64>> {
        let path = join(layout::APOPTOSIS, &upd_key(update));
        to_ids(self.dataset(&path)?, &path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Group {
        let mut root = Group::new();
        root.set_attr(layout::NLEV_ATTR, vec![2]);
        root.put_dataset(
            "Index/own",
            Dataset::from_u64(vec![0, 1, 2, 3]).with_shape(vec![2, 2]),
        );
        root.put_dataset("Index/west", Dataset::from_i64(vec![1, 0, 3, 2]));
        root.put_dataset("Index/east", Dataset::from_f64(vec![1.0, 0.0, 3.0, 2.0]));
        root.put_dataset(
            "ResourceContributed/west/upd_4",
            Dataset::from_u64(vec![1, 0, 0, 2]),
        );
        root.put_dataset(
            "ResourceContributed/east/upd_4",
            Dataset::from_f64(vec![0.5; 4]),
        );
        root.put_dataset("Channel/lev_1/upd_4", Dataset::from_i64(vec![9, 9, 5, 5]));
        root.put_dataset("Channel/lev_0/upd_4", Dataset::from_u64(vec![9, 9, 9, 9]));
        root.put_dataset("PrevChan/upd_4", Dataset::from_f64(vec![0.0; 4]));
        root.put_dataset("ParentPos/upd_4", Dataset::from_i64(vec![1, -1, 3, 2]));
        root
    }

    #[test]
    fn test_layout_accessors() {
        let run = Run::from_document("x+treat=a+seed=1.json.gz", document());
        assert_eq!(run.agent_count().unwrap(), 4);
        assert_eq!(run.level_count().unwrap(), 2);
        assert_eq!(run.direction_keys().unwrap(), vec!["east", "west"]);
        assert_eq!(run.channel_levels().unwrap(), vec!["lev_0", "lev_1"]);
        assert_eq!(run.neighbor_index("west").unwrap(), vec![1, 0, 3, 2]);
        assert_eq!(run.neighbor_index("east").unwrap(), vec![1, 0, 3, 2]);
        assert_eq!(
            run.resource_contributed("west", 4).unwrap(),
            vec![1.0, 0.0, 0.0, 2.0]
        );
        assert_eq!(run.treatment().unwrap(), "treat=a");
    }

    #[test]
    fn test_signed_channels_compare_by_value() {
        let run = Run::from_document("r", document());
        let signed = run.channel("lev_1", 4).unwrap();
        let unsigned = run.channel("lev_0", 4).unwrap();
        assert_eq!(signed, vec![9, 9, 5, 5]);
        assert_eq!(signed[0], unsigned[0]);
        assert_ne!(signed[2], unsigned[2]);
    }

    #[test]
    fn test_negative_channel_rejected() {
        let mut root = document();
        root.put_dataset("Channel/lev_1/upd_4", Dataset::from_i64(vec![-1, 0, 5, 5]));
        let run = Run::from_document("r", root);
        let err = run.channel("lev_1", 4).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::TypeMismatch {
                path: "Channel/lev_1/upd_4".to_string(),
                expected: "non-negative label",
                found: "-1".to_string(),
            }
        );
    }

    #[test]
    fn test_float_channels_rejected() {
        let run = Run::from_document("r", document());
        let err = run.prev_chan(4).unwrap_err();
        assert!(matches!(err, AnalysisError::TypeMismatch { ref found, .. } if found == "f64"));
    }

    #[test]
    fn test_negative_position_rejected() {
        let run = Run::from_document("r", document());
        let err = run.parent_pos(4).unwrap_err();
        assert!(matches!(err, AnalysisError::TypeMismatch { .. }));
    }

    #[test]
    fn test_missing_update_reports_path() {
        let run = Run::from_document("r", document());
        let err = run.apoptosis(9).unwrap_err();
        assert_eq!(err, AnalysisError::missing("Apoptosis/upd_9"));
    }

    #[test]
    fn test_missing_nlev() {
        let mut root = document();
        root.attrs.clear();
        let run = Run::from_document("r", root);
        assert_eq!(run.level_count().unwrap_err(), AnalysisError::missing("NLEV"));
    }
}
