//! Startup shard-topology arguments.
//!
//! A sharded deployment runs one process per subset of shard ids:
//! `emote-manager <shard count> <id>[-<id>...]`. With no arguments the
//! process runs as a single unsharded connection.

use std::ops::Range;

use thiserror::Error;

/// Printed to stderr when the arguments don't match the contract.
#[derive(Error, Debug)]
#[error("Usage: {program} [<shard count> <hyphen-separated list of shard IDs>]")]
pub struct UsageError {
    program: String,
}

/// Which gateway shards this process owns.
#[derive(Debug, PartialEq, Eq)]
pub enum ShardTopology {
    /// Single process, no explicit sharding.
    Auto,
    /// `ids` out of `total` shards. Always nonempty, ascending, contiguous.
    Owned { total: u32, ids: Vec<u32> },
}

impl ShardTopology {
    /// Parses `std::env::args`-shaped arguments.
    ///
    /// Shards are started as a range, so a hyphen list that is not
    /// contiguous ascending is rejected up front.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, UsageError> {
        let program = args
            .next()
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
        let usage = move || UsageError {
            program: program.clone(),
        };

        let (count, ids) = match (args.next(), args.next(), args.next()) {
            (None, _, _) => return Ok(Self::Auto),
            (Some(count), Some(ids), None) => (count, ids),
            _ => return Err(usage()),
        };

        let total: u32 = count.parse().map_err(|_| usage())?;
        let ids: Vec<u32> = ids
            .split('-')
            .map(|id| id.parse::<u32>().map_err(|_| usage()))
            .collect::<Result<_, _>>()?;

        let in_range = ids.iter().all(|&id| id < total);
        let contiguous = ids
            .windows(2)
            .all(|pair| pair[0].checked_add(1) == Some(pair[1]));
        if total == 0 || !in_range || !contiguous {
            return Err(usage());
        }

        Ok(Self::Owned { total, ids })
    }

    /// The owned ids as a start range, with the shard total.
    /// `None` means start unsharded.
    pub fn range(&self) -> Option<(Range<u32>, u32)> {
        match self {
            Self::Auto => None,
            Self::Owned { total, ids } => {
                let first = *ids.first()?;
                Some((first..first + ids.len() as u32, *total))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn args<'a>(list: &'a [&'a str]) -> impl Iterator<Item = String> + 'a {
        list.iter().map(|arg| arg.to_string())
    }

    #[test]
    fn no_args_runs_unsharded() {
        let topology = ShardTopology::from_args(args(&["emote-manager"])).unwrap();
        assert_eq!(topology, ShardTopology::Auto);
        assert_eq!(topology.range(), None);
    }

    #[test]
    fn count_and_id_list() {
        let topology = ShardTopology::from_args(args(&["emote-manager", "4", "0-1-2-3"])).unwrap();
        assert_eq!(
            topology,
            ShardTopology::Owned {
                total: 4,
                ids: vec![0, 1, 2, 3],
            }
        );
        assert_eq!(topology.range(), Some((0..4, 4)));
    }

    #[test]
    fn partial_ownership() {
        let topology = ShardTopology::from_args(args(&["emote-manager", "6", "2-3"])).unwrap();
        assert_eq!(topology.range(), Some((2..4, 6)));
    }

    #[test]
    fn missing_id_list_is_usage_error() {
        assert!(ShardTopology::from_args(args(&["emote-manager", "4"])).is_err());
    }

    #[test]
    fn extra_args_are_usage_error() {
        assert!(ShardTopology::from_args(args(&["emote-manager", "4", "0", "extra"])).is_err());
    }

    #[test]
    fn non_numeric_args_are_usage_error() {
        assert!(ShardTopology::from_args(args(&["emote-manager", "four", "0"])).is_err());
        assert!(ShardTopology::from_args(args(&["emote-manager", "4", "0-x"])).is_err());
    }

    #[test]
    fn ids_must_fit_the_count() {
        assert!(ShardTopology::from_args(args(&["emote-manager", "2", "1-2"])).is_err());
    }

    #[test]
    fn huge_ids_are_usage_errors_not_panics() {
        // u32::MAX must fall out as a usage error; the contiguity scan
        // runs on out-of-range ids too and must not overflow.
        let result = ShardTopology::from_args(args(&["emote-manager", "1", "4294967295-0"]));
        assert!(result.is_err());
    }

    #[test]
    fn ids_must_be_contiguous_ascending() {
        assert!(ShardTopology::from_args(args(&["emote-manager", "4", "0-2"])).is_err());
        assert!(ShardTopology::from_args(args(&["emote-manager", "4", "1-0"])).is_err());
    }
}
