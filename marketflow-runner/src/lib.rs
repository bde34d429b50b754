//! MarketFlow Runner: snapshot orchestration, universe configuration, breadth.
//!
//! This crate builds on `marketflow-core` to provide:
//! - Section-organized universe configuration (TOML)
//! - Monitor configuration with breadth settings
//! - Parallel snapshot evaluation with dataset hashing
//! - Market breadth over a configured section

pub mod breadth;
pub mod config;
pub mod snapshot;
pub mod universe;

pub use breadth::{Breadth, BreadthLabel};
pub use config::{BreadthConfig, ConfigError, MonitorConfig};
pub use snapshot::{
    evaluate_snapshot, merge, SkipReason, SkippedSymbol, Snapshot, SnapshotError, SnapshotReport,
};
pub use universe::{Instrument, Section, Universe};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn snapshot_types_are_send_sync() {
        assert_send::<Snapshot>();
        assert_sync::<Snapshot>();
        assert_send::<SnapshotReport>();
        assert_sync::<SnapshotReport>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<MonitorConfig>();
        assert_sync::<MonitorConfig>();
        assert_send::<Universe>();
        assert_sync::<Universe>();
    }

    #[test]
    fn error_types_are_send_sync() {
        assert_send::<ConfigError>();
        assert_sync::<ConfigError>();
        assert_send::<SnapshotError>();
        assert_sync::<SnapshotError>();
    }
}
