//! Regression test module wiring for board behaviour.

mod ice_rays;

/// Shared imports for board tests.
mod support {
    pub(super) use super::super::*;
    pub(super) use crate::board::test_support::*;
    pub(super) use crate::entities::{BlockKind, CoveredHazard, FruitKind, MonsterKind};
}
