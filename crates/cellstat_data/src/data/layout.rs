//! Names of the groups, datasets, and attributes inside a run document.
//!
//! ```text
//! /                          attrs: NLEV = [levels]
//! Index/own                  agent indices 0..N
//! Index/<dir>                neighbor index per agent, one dataset per direction
//! Apoptosis/upd_<u>          apoptosis type code per agent
//! ResourceContributed/<dir>/upd_<u>
//! Channel/lev_<l>/upd_<u>
//! ParentPos/upd_<u>
//! PrevChan/upd_<u>
//! ```

pub const NLEV_ATTR: &str = "NLEV";

pub const INDEX: &str = "Index";
pub const OWN: &str = "own";
pub const APOPTOSIS: &str = "Apoptosis";
pub const RESOURCE_CONTRIBUTED: &str = "ResourceContributed";
pub const CHANNEL: &str = "Channel";
pub const PARENT_POS: &str = "ParentPos";
pub const PREV_CHAN: &str = "PrevChan";

const UPD_PREFIX: &str = "upd_";
const LEV_PREFIX: &str = "lev_";

/// Dataset name of the snapshot taken at `update`.
pub fn upd_key(update: u64) -> String {
    format!("{UPD_PREFIX}{update}")
}

/// Group name of channel hierarchy level `level`.
pub fn lev_key(level: u32) -> String {
    format!("{LEV_PREFIX}{level}")
}

/// Path of a dataset inside a group, `group/member`.
pub fn join(group: &str, member: &str) -> String {
    format!("{group}/{member}")
}
