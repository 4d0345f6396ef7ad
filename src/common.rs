use std::fmt::{Debug, Display};
use std::hash::Hash;

pub trait CompetitorName: Eq + Hash + Debug + Clone + Display {}
impl<T> CompetitorName for T where T: Eq + Hash + Debug + Clone + Display {}

pub type Capacity = i64;

/// Capacity of edges that should never be part of a minimum cut.
/// Larger than any sum of finite capacities an elimination network can hold.
pub const UNBOUNDED: Capacity = Capacity::MAX;
